//! Small triangulated solids and surfaces for demos and tests.

use crate::errors::AffordanceResult;
use crate::float_types::{Real, parry3d::shape::TriMesh};
use nalgebra::Point3;

/// An axis-aligned box with one corner at the origin and the opposite corner at
/// `(width, length, height)`.
///
/// Eight shared vertices, two triangles per face, wound counter-clockwise seen from
/// outside so that every normal points out of the box. Faces come in the order
/// bottom, top, front (−Y), back (+Y), left (−X), right (+X).
pub fn cuboid(width: Real, length: Real, height: Real) -> AffordanceResult<TriMesh> {
    let vertices = vec![
        Point3::new(0.0, 0.0, 0.0),         // 0: origin
        Point3::new(width, 0.0, 0.0),       // 1: +X
        Point3::new(width, length, 0.0),    // 2: +X+Y
        Point3::new(0.0, length, 0.0),      // 3: +Y
        Point3::new(0.0, 0.0, height),      // 4: +Z
        Point3::new(width, 0.0, height),    // 5: +X+Z
        Point3::new(width, length, height), // 6: +X+Y+Z
        Point3::new(0.0, length, height),   // 7: +Y+Z
    ];

    let faces: [[u32; 4]; 6] = [
        [0, 3, 2, 1], // Bottom
        [4, 5, 6, 7], // Top
        [0, 1, 5, 4], // Front
        [3, 7, 6, 2], // Back
        [0, 4, 7, 3], // Left
        [1, 2, 6, 5], // Right
    ];
    let indices = faces
        .iter()
        .flat_map(|&[a, b, c, d]| [[a, b, c], [a, c, d]])
        .collect();

    Ok(TriMesh::new(vertices, indices)?)
}

/// A `width × length` rectangle in the z = 0 plane, facing +Z, as two triangles
/// sharing the diagonal from the origin.
pub fn rectangle(width: Real, length: Real) -> AffordanceResult<TriMesh> {
    let vertices = vec![
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(width, 0.0, 0.0),
        Point3::new(width, length, 0.0),
        Point3::new(0.0, length, 0.0),
    ];
    Ok(TriMesh::new(vertices, vec![[0, 1, 2], [0, 2, 3]])?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triangle::build_triangles;
    use nalgebra::{Isometry3, Vector3};

    #[test]
    fn cuboid_normals_point_outward() {
        let mesh = cuboid(2.0, 3.0, 4.0).unwrap();
        let tris = build_triangles(&mesh, &Isometry3::identity());
        assert_eq!(tris.len(), 12);

        let expected = [
            -Vector3::z(),
            Vector3::z(),
            -Vector3::y(),
            Vector3::y(),
            -Vector3::x(),
            Vector3::x(),
        ];
        for (face, normal) in expected.iter().enumerate() {
            for tri in &tris[face * 2..face * 2 + 2] {
                assert!((tri.normal - normal).norm() < 1e-9, "face {face}: {}", tri.normal);
            }
        }

        let total: Real = tris.iter().map(|t| t.area).sum();
        assert!((total - 2.0 * (2.0 * 3.0 + 2.0 * 4.0 + 3.0 * 4.0)).abs() < 1e-9);
    }

    #[test]
    fn rectangle_faces_up() {
        let mesh = rectangle(1.0, 2.0).unwrap();
        let tris = build_triangles(&mesh, &Isometry3::identity());
        assert_eq!(tris.len(), 2);
        for tri in &tris {
            assert!((tri.normal - Vector3::z()).norm() < 1e-9);
            assert!((tri.area - 1.0).abs() < 1e-9);
        }
    }
}
