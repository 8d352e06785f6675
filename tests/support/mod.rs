//! Test support library
//! Provides fixtures and invariant checks shared by the integration tests.
#![allow(dead_code)]

use affordance::{
    CollisionObject, Predicate, SemanticsData,
    float_types::{Real, parry3d::shape::TriMesh},
    shapes,
    triangle::build_triangles,
};
use nalgebra::{Isometry3, Point3};
use std::sync::Arc;

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// A `width × length` rectangle placed at `pose`.
pub fn rectangle_object(width: Real, length: Real, pose: Isometry3<Real>) -> Arc<CollisionObject> {
    let mesh = shapes::rectangle(width, length).expect("rectangle fixture");
    Arc::new(CollisionObject::from_trimesh(mesh, pose))
}

/// A box with its minimum corner at the origin of its local frame, placed at `pose`.
pub fn cuboid_object(
    width: Real,
    length: Real,
    height: Real,
    pose: Isometry3<Real>,
) -> Arc<CollisionObject> {
    let mesh = shapes::cuboid(width, length, height).expect("cuboid fixture");
    Arc::new(CollisionObject::from_trimesh(mesh, pose))
}

/// An arbitrary triangle soup placed at `pose`.
pub fn trimesh_object(
    vertices: Vec<Point3<Real>>,
    indices: Vec<[u32; 3]>,
    pose: Isometry3<Real>,
) -> Arc<CollisionObject> {
    let mesh = TriMesh::new(vertices, indices).expect("trimesh fixture");
    Arc::new(CollisionObject::from_trimesh(mesh, pose))
}

/// A flat square of `cells × cells` square cells of side `cell` in the z = 0 plane,
/// two triangles per cell, all facing +Z.
pub fn flat_grid_object(cells: u32, cell: Real, pose: Isometry3<Real>) -> Arc<CollisionObject> {
    let side = cells + 1;
    let vertices = (0..side)
        .flat_map(|j| (0..side).map(move |i| Point3::new(i as Real * cell, j as Real * cell, 0.0)))
        .collect();
    let at = |i: u32, j: u32| j * side + i;
    let indices = (0..cells)
        .flat_map(|j| (0..cells).map(move |i| (i, j)))
        .flat_map(|(i, j)| {
            let (a, b, c, d) = (at(i, j), at(i + 1, j), at(i + 1, j + 1), at(i, j + 1));
            [[a, b, c], [a, c, d]]
        })
        .collect();
    trimesh_object(vertices, indices, pose)
}

/// Triangle index lists per bucket, for comparing results.
pub fn bucket_indices(data: &SemanticsData) -> Vec<Vec<Vec<usize>>> {
    data.buckets()
        .iter()
        .map(|bucket| bucket.iter().map(|a| a.indices.clone()).collect())
        .collect()
}

/// Asserts the invariants every analysis result must satisfy:
/// members pass their predicate, no triangle is claimed twice, and every
/// affordance's area is the sum of its triangles and exceeds the minimum.
pub fn assert_result_invariants(
    object: &CollisionObject,
    predicates: &[Predicate],
    data: &SemanticsData,
) {
    let triangles = build_triangles(object.trimesh().expect("mesh object"), object.pose());
    assert_eq!(data.len(), predicates.len(), "one bucket per predicate");

    let mut claimed = vec![false; triangles.len()];
    for (slot, predicate) in predicates.iter().enumerate() {
        for aff in data.get(slot).expect("bucket") {
            let mut area = 0.0;
            for &idx in &aff.indices {
                assert!(
                    predicate.requirement(&triangles[idx].normal),
                    "triangle {idx} does not satisfy {}",
                    predicate.name()
                );
                assert!(!claimed[idx], "triangle {idx} claimed twice");
                claimed[idx] = true;
                area += triangles[idx].area;
            }
            assert!(approx_eq(area, aff.area, 1e-9), "area {area} != {}", aff.area);
            assert!(aff.area > predicate.min_area());
        }
    }
}
