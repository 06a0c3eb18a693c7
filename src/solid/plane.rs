//! Oriented planes and the polygon-splitting predicate at the heart of BSP
//! construction and clipping.

use crate::float_types::{Real, tolerance};
use crate::solid::polygon::Polygon;
use crate::solid::vertex::Vertex;
use nalgebra::{Point3, Vector3};
use std::fmt::Debug;

// Vertex classifications relative to a plane. They form a two-bit lattice:
// FRONT | BACK == SPANNING, and COPLANAR is the identity, so OR-ing the
// per-vertex values yields the whole polygon's class.
pub const COPLANAR: i8 = 0;
pub const FRONT: i8 = 1;
pub const BACK: i8 = 2;
pub const SPANNING: i8 = 3;

/// Construction failed because the input does not span a plane.
#[derive(Clone, Debug, thiserror::Error, PartialEq)]
pub enum PlaneError {
    #[error("Degenerate polygon: vertices do not define a plane")]
    DegeneratePolygon,
}

/// An oriented plane `{ p : normal · p = offset }` with unit normal.
#[derive(Debug, Clone, PartialEq)]
pub struct Plane {
    normal: Vector3<Real>,
    offset: Real,
}

impl Plane {
    /// Build a plane from a (not necessarily unit) normal and the offset of
    /// the plane along it. The normal is normalized and the offset rescaled
    /// to match.
    pub fn from_normal(normal: Vector3<Real>, offset: Real) -> Self {
        let norm = normal.norm();
        Plane {
            normal: normal / norm,
            offset: offset / norm,
        }
    }

    /// Build the plane through three points, oriented so that `a`, `b`, `c`
    /// wind counter-clockwise when viewed from the side the normal points
    /// toward.
    ///
    /// Collinear points yield a non-finite normal which propagates through
    /// later classifications; use [`Plane::try_from_points`] to validate
    /// instead.
    pub fn from_points(a: &Point3<Real>, b: &Point3<Real>, c: &Point3<Real>) -> Self {
        let n = (b - a).cross(&(c - a)).normalize();
        Plane {
            normal: n,
            offset: n.dot(&a.coords),
        }
    }

    /// Like [`Plane::from_points`], but reports collinear input instead of
    /// producing a non-finite plane.
    pub fn try_from_points(
        a: &Point3<Real>,
        b: &Point3<Real>,
        c: &Point3<Real>,
    ) -> Result<Self, PlaneError> {
        let cross = (b - a).cross(&(c - a));
        let norm = cross.norm();
        if !norm.is_finite() || norm < tolerance() {
            return Err(PlaneError::DegeneratePolygon);
        }
        let n = cross / norm;
        Ok(Plane {
            normal: n,
            offset: n.dot(&a.coords),
        })
    }

    /// Plane through the first three vertices of a loop.
    pub fn from_vertices(vertices: &[Vertex]) -> Self {
        Self::from_points(&vertices[0].pos, &vertices[1].pos, &vertices[2].pos)
    }

    /// The unit normal of this plane.
    #[inline]
    pub const fn normal(&self) -> Vector3<Real> {
        self.normal
    }

    /// The signed offset of this plane along its normal.
    #[inline]
    pub const fn offset(&self) -> Real {
        self.offset
    }

    /// Reverse orientation: the plane's point set is unchanged, but front and
    /// back swap.
    pub fn flip(&mut self) {
        self.normal = -self.normal;
        self.offset = -self.offset;
    }

    /// Classify a point as `FRONT`, `BACK`, or `COPLANAR` within tolerance.
    #[inline]
    pub fn orient_point(&self, point: &Point3<Real>) -> i8 {
        let t = self.normal.dot(&point.coords) - self.offset;
        if t < -tolerance() {
            BACK
        } else if t > tolerance() {
            FRONT
        } else {
            COPLANAR
        }
    }

    /// Which side a coplanar polygon belongs to, judged by its normal:
    /// strictly positive alignment is `FRONT`, everything else (including an
    /// exact zero dot product) is `BACK`.
    #[inline]
    pub fn orient_plane(&self, other: &Plane) -> i8 {
        if self.normal.dot(&other.normal) > 0.0 {
            FRONT
        } else {
            BACK
        }
    }

    /// Classify a polygon with respect to this plane by OR-ing its vertex
    /// classifications.
    pub fn classify_polygon<S: Clone + Send + Sync + Debug>(&self, polygon: &Polygon<S>) -> i8 {
        polygon
            .vertices
            .iter()
            .fold(COPLANAR, |acc, v| acc | self.orient_point(&v.pos))
    }

    /// Split `polygon` by this plane if needed, then put the polygon or
    /// polygon fragments in the appropriate bins. Coplanar polygons go into
    /// either `coplanar_front` or `coplanar_back` depending on their
    /// orientation with respect to this plane. Polygons entirely in front or
    /// in back go into `front` or `back` unchanged.
    ///
    /// All four bins are supplied by the caller so they can be reused across
    /// many splits: the BSP builder funnels both coplanar bins into a node's
    /// own polygon list, while the clipper merges them with `front`/`back`.
    ///
    /// Spanning polygons are cut along the plane; each edge that strictly
    /// crosses contributes one interpolated vertex to both halves. A half
    /// with fewer than three vertices is a degenerate sliver and is dropped.
    /// Fragments keep the parent's metadata and derive fresh planes from
    /// their own vertices.
    pub fn split_polygon<S: Clone + Send + Sync + Debug>(
        &self,
        polygon: &Polygon<S>,
        coplanar_front: &mut Vec<Polygon<S>>,
        coplanar_back: &mut Vec<Polygon<S>>,
        front: &mut Vec<Polygon<S>>,
        back: &mut Vec<Polygon<S>>,
    ) {
        let types: Vec<i8> = polygon
            .vertices
            .iter()
            .map(|v| self.orient_point(&v.pos))
            .collect();
        let polygon_type = types.iter().fold(COPLANAR, |acc, &t| acc | t);

        match polygon_type {
            COPLANAR => {
                if self.orient_plane(&polygon.plane) == FRONT {
                    coplanar_front.push(polygon.clone());
                } else {
                    coplanar_back.push(polygon.clone());
                }
            },
            FRONT => front.push(polygon.clone()),
            BACK => back.push(polygon.clone()),
            _ => {
                // SPANNING: walk the edge loop and route each vertex to the
                // half (or halves) it belongs to, inserting the crossing
                // point on edges that straddle the plane.
                let n = polygon.vertices.len();
                let mut f = Vec::with_capacity(n + 1);
                let mut b = Vec::with_capacity(n + 1);

                for i in 0..n {
                    let j = (i + 1) % n;
                    let ti = types[i];
                    let tj = types[j];
                    let vi = &polygon.vertices[i];
                    let vj = &polygon.vertices[j];

                    if ti != BACK {
                        f.push(*vi);
                    }
                    if ti != FRONT {
                        b.push(*vi);
                    }

                    if (ti | tj) == SPANNING {
                        let denom = self.normal.dot(&(vj.pos - vi.pos));
                        // A strictly crossing edge keeps the denominator well
                        // away from zero; the guard only filters inputs that
                        // already violated the convexity contract.
                        if denom.abs() > tolerance() {
                            let t =
                                (self.offset - self.normal.dot(&vi.pos.coords)) / denom;
                            let v = vi.interpolate(vj, t);
                            f.push(v);
                            b.push(v);
                        }
                    }
                }

                if f.len() >= 3 {
                    front.push(Polygon::new(f, polygon.metadata.clone()));
                }
                if b.len() >= 3 {
                    back.push(Polygon::new(b, polygon.metadata.clone()));
                }
            },
        }
    }
}
