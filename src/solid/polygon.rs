//! Convex polygons: the currency every producer, consumer, and BSP operation
//! trades in.

use crate::float_types::Real;
use crate::float_types::parry3d::bounding_volume::Aabb;
use crate::solid::plane::Plane;
use crate::solid::vertex::Vertex;
use nalgebra::Point3;
use std::fmt::Debug;
use std::sync::OnceLock;

/// An ordered loop of at least three coplanar vertices forming a convex,
/// counter-clockwise polygon, plus an opaque `metadata` tag that is forwarded
/// unchanged to every fragment and clone. The engine never inspects the tag.
#[derive(Debug, Clone)]
pub struct Polygon<S: Clone> {
    /// The loop, counter-clockwise when viewed from the normal side.
    pub vertices: Vec<Vertex>,

    /// Plane derived from the first three vertices at construction time.
    pub plane: Plane,

    /// Lazily calculated AABB that spans `vertices`.
    pub bounding_box: OnceLock<Aabb>,

    /// Opaque per-polygon tag shared with all fragments
    pub metadata: Option<S>,
}

impl<S: Clone + Send + Sync + Debug> Polygon<S> {
    /// Create a polygon from vertices. The plane comes from the first three
    /// vertices, so their winding fixes the orientation of the whole loop.
    pub fn new(vertices: Vec<Vertex>, metadata: Option<S>) -> Self {
        assert!(
            vertices.len() >= 3,
            "degenerate polygon: fewer than three vertices"
        );
        let plane = Plane::from_vertices(&vertices);
        Polygon {
            vertices,
            plane,
            bounding_box: OnceLock::new(),
            metadata,
        }
    }

    /// Reverses winding order, flips vertices normals, and flips the plane normal
    pub fn flip(&mut self) {
        self.vertices.reverse();
        for v in &mut self.vertices {
            v.flip();
        }
        self.plane.flip();
    }

    /// Fan-triangulate this polygon into triangles, each represented as a
    /// triple of vertices. Valid because the loop is convex.
    pub fn triangulate(&self) -> Vec<[Vertex; 3]> {
        let mut triangles = Vec::with_capacity(self.vertices.len().saturating_sub(2));
        if self.vertices.len() < 3 {
            return triangles;
        }
        let v0 = self.vertices[0];
        for window in self.vertices[1..].windows(2) {
            triangles.push([v0, window[0], window[1]]);
        }
        triangles
    }

    /// Recompute this polygon's plane from its current vertices and assign
    /// the plane's normal to every vertex.
    pub fn set_new_normal(&mut self) {
        self.plane = Plane::from_vertices(&self.vertices);
        let n = self.plane.normal();
        for v in &mut self.vertices {
            v.normal = n;
        }
    }

    /// Returns an [`Aabb`] spanning this polygon's vertices.
    pub fn bounding_box(&self) -> Aabb {
        *self.bounding_box.get_or_init(|| {
            let mut mins = Point3::new(Real::MAX, Real::MAX, Real::MAX);
            let mut maxs = Point3::new(-Real::MAX, -Real::MAX, -Real::MAX);
            for v in &self.vertices {
                mins.x = mins.x.min(v.pos.x);
                mins.y = mins.y.min(v.pos.y);
                mins.z = mins.z.min(v.pos.z);
                maxs.x = maxs.x.max(v.pos.x);
                maxs.y = maxs.y.max(v.pos.y);
                maxs.z = maxs.z.max(v.pos.z);
            }
            Aabb::new(mins, maxs)
        })
    }

    /// Reference to this polygon's metadata, if any.
    pub const fn metadata(&self) -> Option<&S> {
        self.metadata.as_ref()
    }

    /// Set this polygon's metadata.
    pub fn set_metadata(&mut self, metadata: S) {
        self.metadata = Some(metadata);
    }
}
