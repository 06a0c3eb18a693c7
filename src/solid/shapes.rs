//! Primitive-shape tessellators. These only produce polygon lists that feed
//! the Boolean engine; nothing here touches the BSP machinery.

use crate::errors::ValidationError;
use crate::float_types::{EPSILON, PI, Real, TAU};
use crate::solid::Solid;
use crate::solid::polygon::Polygon;
use crate::solid::vertex::Vertex;
use crate::traits::CSG;
use nalgebra::{Point3, Vector3};
use std::fmt::Debug;

impl<S: Clone + Send + Sync + Debug> Solid<S> {
    /// Create a right prism (a box) that spans from (0, 0, 0)
    /// to (width, length, height). All dimensions must be >= 0.
    pub fn cuboid(width: Real, length: Real, height: Real, metadata: Option<S>) -> Solid<S> {
        // Define the eight corner points of the prism.
        //    (x, y, z)
        let p000 = Point3::new(0.0, 0.0, 0.0);
        let p100 = Point3::new(width, 0.0, 0.0);
        let p110 = Point3::new(width, length, 0.0);
        let p010 = Point3::new(0.0, length, 0.0);

        let p001 = Point3::new(0.0, 0.0, height);
        let p101 = Point3::new(width, 0.0, height);
        let p111 = Point3::new(width, length, height);
        let p011 = Point3::new(0.0, length, height);

        // Six faces with outward normals and counter-clockwise winding as
        // viewed from outside the prism.

        // Bottom face (z=0, normal -Z)
        let bottom_normal = -Vector3::z();
        let bottom = Polygon::new(
            vec![
                Vertex::new(p000, bottom_normal),
                Vertex::new(p010, bottom_normal),
                Vertex::new(p110, bottom_normal),
                Vertex::new(p100, bottom_normal),
            ],
            metadata.clone(),
        );

        // Top face (z=height, normal +Z)
        let top_normal = Vector3::z();
        let top = Polygon::new(
            vec![
                Vertex::new(p001, top_normal),
                Vertex::new(p101, top_normal),
                Vertex::new(p111, top_normal),
                Vertex::new(p011, top_normal),
            ],
            metadata.clone(),
        );

        // Front face (y=0, normal -Y)
        let front_normal = -Vector3::y();
        let front = Polygon::new(
            vec![
                Vertex::new(p000, front_normal),
                Vertex::new(p100, front_normal),
                Vertex::new(p101, front_normal),
                Vertex::new(p001, front_normal),
            ],
            metadata.clone(),
        );

        // Back face (y=length, normal +Y)
        let back_normal = Vector3::y();
        let back = Polygon::new(
            vec![
                Vertex::new(p010, back_normal),
                Vertex::new(p011, back_normal),
                Vertex::new(p111, back_normal),
                Vertex::new(p110, back_normal),
            ],
            metadata.clone(),
        );

        // Left face (x=0, normal -X)
        let left_normal = -Vector3::x();
        let left = Polygon::new(
            vec![
                Vertex::new(p000, left_normal),
                Vertex::new(p001, left_normal),
                Vertex::new(p011, left_normal),
                Vertex::new(p010, left_normal),
            ],
            metadata.clone(),
        );

        // Right face (x=width, normal +X)
        let right_normal = Vector3::x();
        let right = Polygon::new(
            vec![
                Vertex::new(p100, right_normal),
                Vertex::new(p110, right_normal),
                Vertex::new(p111, right_normal),
                Vertex::new(p101, right_normal),
            ],
            metadata.clone(),
        );

        Solid::from_polygons(&[bottom, top, front, back, left, right], metadata)
    }

    /// An axis-aligned cube spanning `[0, width]` on every axis.
    pub fn cube(width: Real, metadata: Option<S>) -> Solid<S> {
        Self::cuboid(width, width, width, metadata)
    }

    /// Construct a sphere centered at the origin. `segments` controls the
    /// tessellation along the longitude direction, `stacks` along the
    /// latitude direction; the rings adjacent to the poles emit triangles,
    /// every other ring emits quads.
    pub fn sphere(
        radius: Real,
        segments: usize,
        stacks: usize,
        metadata: Option<S>,
    ) -> Solid<S> {
        let mut polygons = Vec::new();

        for i in 0..segments {
            for j in 0..stacks {
                let mut vertices = Vec::new();

                let vertex = |theta: Real, phi: Real| {
                    let dir =
                        Vector3::new(theta.cos() * phi.sin(), phi.cos(), theta.sin() * phi.sin());
                    Vertex::new(
                        Point3::new(dir.x * radius, dir.y * radius, dir.z * radius),
                        dir,
                    )
                };

                let t0 = i as Real / segments as Real;
                let t1 = (i + 1) as Real / segments as Real;
                let p0 = j as Real / stacks as Real;
                let p1 = (j + 1) as Real / stacks as Real;

                let theta0 = t0 * TAU;
                let theta1 = t1 * TAU;
                let phi0 = p0 * PI;
                let phi1 = p1 * PI;

                vertices.push(vertex(theta0, phi0));
                if j > 0 {
                    vertices.push(vertex(theta1, phi0));
                }
                if j < stacks - 1 {
                    vertices.push(vertex(theta1, phi1));
                }
                vertices.push(vertex(theta0, phi1));

                polygons.push(Polygon::new(vertices, metadata.clone()));
            }
        }
        Solid::from_polygons(&polygons, metadata)
    }

    /// Constructs a frustum between `start` and `end` with bottom radius
    /// `radius1` and top radius `radius2`. In the normal case it creates side
    /// quads and cap triangle fans; if one of the radii is 0 (within
    /// EPSILON), the degenerate face is treated as a single point and the
    /// side is stitched with triangles.
    ///
    /// A zero-length axis (`start == end` within EPSILON) yields an empty
    /// solid.
    pub fn frustum_ptp(
        start: Point3<Real>,
        end: Point3<Real>,
        radius1: Real,
        radius2: Real,
        segments: usize,
        metadata: Option<S>,
    ) -> Solid<S> {
        // Compute the axis and check that start and end do not coincide.
        let s = start.coords;
        let e = end.coords;
        let ray = e - s;
        if ray.norm_squared() < EPSILON {
            return Solid::new();
        }
        let axis_z = ray.normalize();
        // Pick an axis not parallel to axis_z.
        let axis_x = if axis_z.y.abs() > 0.5 {
            Vector3::x()
        } else {
            Vector3::y()
        }
        .cross(&axis_z)
        .normalize();
        let axis_y = axis_x.cross(&axis_z).normalize();

        // The cap centers for the bottom and top.
        let start_v = Vertex::new(start, -axis_z);
        let end_v = Vertex::new(end, axis_z);

        // A vertex on the lateral surface, for a given stack (0.0 bottom,
        // 1.0 top), slice (fraction along the circle), and normal blend
        // factor (used for cap smoothing).
        let point = |stack: Real, slice: Real, normal_blend: Real| {
            // Linear interpolation of radius.
            let r = radius1 * (1.0 - stack) + radius2 * stack;
            let angle = slice * TAU;
            let radial_dir = axis_x * angle.cos() + axis_y * angle.sin();
            let pos = s + ray * stack + radial_dir * r;
            let normal = radial_dir * (1.0 - normal_blend.abs()) + axis_z * normal_blend;
            Vertex::new(Point3::from(pos), normal.normalize())
        };

        let mut polygons = Vec::new();

        let bottom_degenerate = radius1.abs() < EPSILON;
        let top_degenerate = radius2.abs() < EPSILON;

        // If both faces are degenerate, we cannot build a meaningful volume.
        if bottom_degenerate && top_degenerate {
            return Solid::new();
        }

        for i in 0..segments {
            let slice0 = i as Real / segments as Real;
            let slice1 = (i + 1) as Real / segments as Real;

            if !bottom_degenerate {
                // Bottom cap: triangle fan from the bottom center to two
                // consecutive points on the bottom ring.
                polygons.push(Polygon::new(
                    vec![
                        start_v,
                        point(0.0, slice0, -1.0),
                        point(0.0, slice1, -1.0),
                    ],
                    metadata.clone(),
                ));
            }
            if !top_degenerate {
                // Top cap: triangle fan from the top center to two
                // consecutive points on the top ring.
                polygons.push(Polygon::new(
                    vec![end_v, point(1.0, slice1, 1.0), point(1.0, slice0, 1.0)],
                    metadata.clone(),
                ));
            }

            if bottom_degenerate {
                // Bottom is a point; triangle from it to the top ring.
                polygons.push(Polygon::new(
                    vec![start_v, point(1.0, slice0, 0.0), point(1.0, slice1, 0.0)],
                    metadata.clone(),
                ));
            } else if top_degenerate {
                // Top is a point; triangle from the bottom ring to it.
                polygons.push(Polygon::new(
                    vec![point(0.0, slice1, 0.0), point(0.0, slice0, 0.0), end_v],
                    metadata.clone(),
                ));
            } else {
                // Normal case: a quad for the side wall.
                polygons.push(Polygon::new(
                    vec![
                        point(0.0, slice1, 0.0),
                        point(0.0, slice0, 0.0),
                        point(1.0, slice0, 0.0),
                        point(1.0, slice1, 0.0),
                    ],
                    metadata.clone(),
                ));
            }
        }

        Solid::from_polygons(&polygons, metadata)
    }

    /// A vertical frustum along Z from z=0 to z=height.
    pub fn frustum(
        radius1: Real,
        radius2: Real,
        height: Real,
        segments: usize,
        metadata: Option<S>,
    ) -> Solid<S> {
        Solid::frustum_ptp(
            Point3::origin(),
            Point3::new(0.0, 0.0, height),
            radius1,
            radius2,
            segments,
            metadata,
        )
    }

    /// A vertical cylinder along Z from z=0 to z=height with the specified
    /// radius (NOT diameter).
    pub fn cylinder(
        radius: Real,
        height: Real,
        segments: usize,
        metadata: Option<S>,
    ) -> Solid<S> {
        Solid::frustum_ptp(
            Point3::origin(),
            Point3::new(0.0, 0.0, height),
            radius,
            radius,
            segments,
            metadata,
        )
    }

    /// Creates a solid polyhedron from raw vertex data (`points`) and face
    /// indices.
    ///
    /// # Parameters
    ///
    /// - `points`: a slice of `[x,y,z]` coordinates.
    /// - `faces`: each element is a list of indices into `points`, describing
    ///   one face. Each face must have at least 3 indices.
    ///
    /// ## Errors
    /// If a face has fewer than three indices, refers to a point that does
    /// not exist, or its leading points are collinear.
    pub fn polyhedron(
        points: &[[Real; 3]],
        faces: &[Vec<usize>],
        metadata: Option<S>,
    ) -> Result<Solid<S>, ValidationError> {
        let mut polygons = Vec::new();

        for face in faces {
            if face.len() < 3 {
                return Err(ValidationError::FieldLessThan {
                    name: "face.len()",
                    min: 3,
                });
            }

            // Gather the vertices for this face
            let mut face_vertices = Vec::with_capacity(face.len());
            for &idx in face {
                if idx >= points.len() {
                    return Err(ValidationError::IndexOutOfRange {
                        index: idx,
                        len: points.len(),
                    });
                }
                let [x, y, z] = points[idx];
                face_vertices.push(Vertex::new(
                    Point3::new(x, y, z),
                    Vector3::zeros(), // set below from the face plane
                ));
            }

            // Reject collinear leading points before Polygon::new derives a
            // non-finite plane from them.
            crate::solid::plane::Plane::try_from_points(
                &face_vertices[0].pos,
                &face_vertices[1].pos,
                &face_vertices[2].pos,
            )?;

            // Build the polygon (plane is auto-computed from first 3 vertices).
            let mut poly = Polygon::new(face_vertices, metadata.clone());

            // Set each vertex normal to match the polygon's plane normal
            let plane_normal = poly.plane.normal();
            for v in &mut poly.vertices {
                v.normal = plane_normal;
            }
            polygons.push(poly);
        }

        Ok(Solid::from_polygons(&polygons, metadata))
    }
}
