use csgkit::{
    float_types::EPSILON,
    solid::{polygon::Polygon, vertex::Vertex},
};
use nalgebra::{Point3, Vector3};

mod support;

use crate::support::approx_eq;

#[test]
fn vertex_interpolate() {
    let a = Vertex::new(Point3::origin(), Vector3::z());
    let b = Vertex::new(Point3::new(2.0, 0.0, 0.0), Vector3::x());
    let mid = a.interpolate(&b, 0.5);
    assert!(approx_eq(mid.pos.x, 1.0, EPSILON));
    assert!(approx_eq(mid.normal.x, 0.5, EPSILON));
    assert!(approx_eq(mid.normal.z, 0.5, EPSILON));
}

#[test]
fn vertex_flip() {
    let mut v = Vertex::new(Point3::origin(), Vector3::y());
    v.flip();
    assert_eq!(v.normal, -Vector3::y());
    assert_eq!(v.pos, Point3::origin());
}

#[test]
fn construction() {
    let v1 = Vertex::new(Point3::origin(), Vector3::y());
    let v2 = Vertex::new(Point3::new(1.0, 0.0, 1.0), Vector3::y());
    let v3 = Vertex::new(Point3::new(1.0, 0.0, -1.0), Vector3::y());

    let poly: Polygon<()> = Polygon::new(vec![v1, v2, v3], None);
    assert_eq!(poly.vertices.len(), 3);
    // Plane should be defined by these three points. We expect a normal near ±Y.
    assert!(
        approx_eq(poly.plane.normal().dot(&Vector3::y()).abs(), 1.0, 1e-8),
        "Expected plane normal to match ±Y"
    );
}

#[test]
fn new() {
    let vertices = vec![
        Vertex::new(Point3::origin(), Vector3::z()),
        Vertex::new(Point3::new(1.0, 0.0, 0.0), Vector3::z()),
        Vertex::new(Point3::new(0.0, 1.0, 0.0), Vector3::z()),
    ];
    let poly: Polygon<()> = Polygon::new(vertices.clone(), None);
    assert_eq!(poly.vertices.len(), 3);
    assert_eq!(poly.metadata, None);
    // Plane normal should be +Z for the above points
    assert!(approx_eq(poly.plane.normal().x, 0.0, EPSILON));
    assert!(approx_eq(poly.plane.normal().y, 0.0, EPSILON));
    assert!(approx_eq(poly.plane.normal().z, 1.0, EPSILON));
}

#[test]
fn flip() {
    let mut poly: Polygon<()> = Polygon::new(
        vec![
            Vertex::new(Point3::origin(), Vector3::z()),
            Vertex::new(Point3::new(1.0, 0.0, 0.0), Vector3::z()),
            Vertex::new(Point3::new(0.0, 1.0, 0.0), Vector3::z()),
        ],
        None,
    );
    let plane_normal_before = poly.plane.normal();
    poly.flip();
    // The vertices should be reversed, and normal flipped
    assert_eq!(poly.vertices.len(), 3);
    assert_eq!(poly.vertices[0].pos, Point3::new(0.0, 1.0, 0.0));
    assert_eq!(poly.vertices[2].pos, Point3::origin());
    assert!(approx_eq(
        poly.plane.normal().z,
        -plane_normal_before.z,
        EPSILON
    ));
    for v in &poly.vertices {
        assert!(approx_eq(v.normal.z, -1.0, EPSILON));
    }
}

#[test]
fn flip_is_involution() {
    let original: Polygon<()> = Polygon::new(
        vec![
            Vertex::new(Point3::origin(), Vector3::z()),
            Vertex::new(Point3::new(1.0, 0.0, 0.0), Vector3::z()),
            Vertex::new(Point3::new(1.0, 1.0, 0.0), Vector3::z()),
            Vertex::new(Point3::new(0.0, 1.0, 0.0), Vector3::z()),
        ],
        None,
    );
    let mut poly = original.clone();
    poly.flip();
    poly.flip();
    for (a, b) in poly.vertices.iter().zip(original.vertices.iter()) {
        assert_eq!(a.pos, b.pos);
        assert_eq!(a.normal, b.normal);
    }
    assert_eq!(poly.plane.normal(), original.plane.normal());
}

#[test]
fn triangulate() {
    // A quad:
    let poly: Polygon<()> = Polygon::new(
        vec![
            Vertex::new(Point3::origin(), Vector3::z()),
            Vertex::new(Point3::new(1.0, 0.0, 0.0), Vector3::z()),
            Vertex::new(Point3::new(1.0, 1.0, 0.0), Vector3::z()),
            Vertex::new(Point3::new(0.0, 1.0, 0.0), Vector3::z()),
        ],
        None,
    );
    let triangles = poly.triangulate();
    assert_eq!(triangles.len(), 2);
    // Fan triangulation always pivots on the first vertex.
    assert_eq!(triangles[0][0].pos, poly.vertices[0].pos);
    assert_eq!(triangles[1][0].pos, poly.vertices[0].pos);
}

#[test]
fn vertices_lie_on_plane() {
    let poly: Polygon<()> = Polygon::new(
        vec![
            Vertex::new(Point3::new(0.0, 0.0, 2.0), Vector3::z()),
            Vertex::new(Point3::new(3.0, 0.0, 2.0), Vector3::z()),
            Vertex::new(Point3::new(3.0, 3.0, 2.0), Vector3::z()),
            Vertex::new(Point3::new(0.0, 3.0, 2.0), Vector3::z()),
        ],
        None,
    );
    for v in &poly.vertices {
        let d = poly.plane.normal().dot(&v.pos.coords) - poly.plane.offset();
        assert!(d.abs() < EPSILON);
    }
}

#[test]
fn metadata_forwarding() {
    let mut poly: Polygon<&'static str> = Polygon::new(
        vec![
            Vertex::new(Point3::origin(), Vector3::z()),
            Vertex::new(Point3::new(1.0, 0.0, 0.0), Vector3::z()),
            Vertex::new(Point3::new(0.0, 1.0, 0.0), Vector3::z()),
        ],
        Some("wall"),
    );
    assert_eq!(poly.metadata(), Some(&"wall"));

    let clone = poly.clone();
    assert_eq!(clone.metadata, Some("wall"));

    poly.set_metadata("floor");
    assert_eq!(poly.metadata(), Some(&"floor"));
    // The clone keeps its own tag.
    assert_eq!(clone.metadata, Some("wall"));
}
