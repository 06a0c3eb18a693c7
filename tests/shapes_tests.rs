mod support;

use csgkit::{
    errors::ValidationError,
    float_types::EPSILON,
    solid::Solid,
    traits::CSG,
};

use crate::support::approx_eq;

#[test]
fn cube() {
    let cube: Solid<()> = Solid::cube(2.0, None);
    assert_eq!(cube.polygons.len(), 6);
    for poly in &cube.polygons {
        assert_eq!(poly.vertices.len(), 4);
        // Vertex normals agree with the face plane.
        for v in &poly.vertices {
            assert!(approx_eq(v.normal.dot(&poly.plane.normal()), 1.0, 1e-8));
        }
    }
    let bb = cube.bounding_box();
    assert!(approx_eq(bb.mins.x, 0.0, EPSILON));
    assert!(approx_eq(bb.maxs.x, 2.0, EPSILON));
}

#[test]
fn cuboid() {
    let cuboid: Solid<()> = Solid::cuboid(1.0, 2.0, 3.0, None);
    assert_eq!(cuboid.polygons.len(), 6);
    let bb = cuboid.bounding_box();
    assert!(approx_eq(bb.maxs.x, 1.0, EPSILON));
    assert!(approx_eq(bb.maxs.y, 2.0, EPSILON));
    assert!(approx_eq(bb.maxs.z, 3.0, EPSILON));
}

#[test]
fn cube_faces_point_outward() {
    let cube: Solid<()> = Solid::cube(2.0, None).center();
    for poly in &cube.polygons {
        // For a convex solid centered at the origin, every outward face
        // plane has a positive offset.
        assert!(poly.plane.offset() > 0.0);
    }
}

#[test]
fn sphere() {
    let segments = 16;
    let stacks = 8;
    let sphere: Solid<()> = Solid::sphere(1.0, segments, stacks, None);
    assert_eq!(sphere.polygons.len(), segments * stacks);

    // Pole rings emit triangles, middle rings quads.
    for poly in &sphere.polygons {
        assert!(poly.vertices.len() == 3 || poly.vertices.len() == 4);
        for v in &poly.vertices {
            assert!(approx_eq(v.pos.coords.norm(), 1.0, 1e-8));
        }
    }
}

#[test]
fn cylinder() {
    let segments = 16;
    let cyl: Solid<()> = Solid::cylinder(1.0, 2.0, segments, None);
    // Per segment: one bottom cap triangle, one top cap triangle, one side quad.
    assert_eq!(cyl.polygons.len(), 3 * segments);
    let bb = cyl.bounding_box();
    assert!(approx_eq(bb.mins.z, 0.0, EPSILON));
    assert!(approx_eq(bb.maxs.z, 2.0, EPSILON));
    assert!(approx_eq(bb.maxs.x, 1.0, 1e-8));
}

#[test]
fn cone_has_no_top_cap() {
    let segments = 16;
    let cone: Solid<()> = Solid::frustum(1.0, 0.0, 2.0, segments, None);
    // Per segment: one bottom cap triangle and one side triangle.
    assert_eq!(cone.polygons.len(), 2 * segments);
}

#[test]
fn degenerate_cylinder_is_empty() {
    // Zero-length axis
    let cyl: Solid<()> = Solid::cylinder(1.0, 0.0, 16, None);
    assert!(cyl.polygons.is_empty());

    // Both radii zero
    let spike: Solid<()> = Solid::frustum(0.0, 0.0, 2.0, 16, None);
    assert!(spike.polygons.is_empty());
}

#[test]
fn polyhedron() {
    let pts = &[
        [0.0, 0.0, 0.0],
        [1.0, 0.0, 0.0],
        [1.0, 1.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.5, 0.5, 1.0],
    ];
    let faces = vec![
        vec![3, 2, 1, 0],
        vec![0, 1, 4],
        vec![1, 2, 4],
        vec![2, 3, 4],
        vec![3, 0, 4],
    ];
    let pyramid: Solid<()> = Solid::polyhedron(pts, &faces, None).unwrap();
    assert_eq!(pyramid.polygons.len(), 5);
    // Vertex normals were copied from each face plane.
    for poly in &pyramid.polygons {
        for v in &poly.vertices {
            assert_eq!(v.normal, poly.plane.normal());
        }
    }
}

#[test]
fn polyhedron_bad_index() {
    let pts = &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
    let faces = vec![vec![0, 1, 7]];
    let err = Solid::<()>::polyhedron(pts, &faces, None);
    assert_eq!(
        err.unwrap_err(),
        ValidationError::IndexOutOfRange { index: 7, len: 3 }
    );
}

#[test]
fn polyhedron_collinear_face() {
    let pts = &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [2.0, 0.0, 0.0]];
    let faces = vec![vec![0, 1, 2]];
    let err = Solid::<()>::polyhedron(pts, &faces, None);
    assert!(err.is_err());
}

#[test]
fn polyhedron_short_face() {
    let pts = &[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]];
    let faces = vec![vec![0, 1]];
    let err = Solid::<()>::polyhedron(pts, &faces, None);
    assert_eq!(
        err.unwrap_err(),
        ValidationError::FieldLessThan {
            name: "face.len()",
            min: 3
        }
    );
}
