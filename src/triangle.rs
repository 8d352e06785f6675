//! World-frame triangle records derived from a mesh and its placement.

use crate::float_types::{Real, parry3d::shape::TriMesh, tolerance};
use nalgebra::{Isometry3, Point3, Vector3};

/// The three world-frame corners of a triangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrianglePoints {
    pub p1: Point3<Real>,
    pub p2: Point3<Real>,
    pub p3: Point3<Real>,
}

impl TrianglePoints {
    pub const fn new(p1: Point3<Real>, p2: Point3<Real>, p3: Point3<Real>) -> Self {
        Self { p1, p2, p3 }
    }

    /// Un-normalized face normal `(p2 − p1) × (p3 − p1)`; its length is twice the area.
    #[inline]
    pub fn scaled_normal(&self) -> Vector3<Real> {
        (self.p2 - self.p1).cross(&(self.p3 - self.p1))
    }
}

/// A mesh triangle with its derived normal and area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// Vertex indices into the source mesh; used for adjacency.
    pub indices: [u32; 3],
    pub points: TrianglePoints,
    /// Unit normal, or zero for a degenerate triangle.
    pub normal: Vector3<Real>,
    pub area: Real,
}

impl Triangle {
    /// Derives the unit normal and area from `points`.
    ///
    /// Corners that are collinear up to [`tolerance`] (relative to the edge
    /// lengths, so small but well-shaped triangles keep their normal) give a zero
    /// normal instead.
    pub fn new(indices: [u32; 3], points: TrianglePoints) -> Self {
        let e1 = points.p2 - points.p1;
        let e2 = points.p3 - points.p1;
        let scaled = e1.cross(&e2);
        let len = scaled.norm();
        let normal = if len > tolerance() * e1.norm() * e2.norm() {
            scaled / len
        } else {
            Vector3::zeros()
        };
        Self { indices, points, normal, area: 0.5 * len }
    }

    /// A triangle whose corners are (nearly) collinear has no usable normal.
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.normal == Vector3::zeros()
    }
}

/// Builds one [`Triangle`] per mesh triangle, in mesh order, with every vertex
/// moved into the world frame by `pose`.
pub fn build_triangles(trimesh: &TriMesh, pose: &Isometry3<Real>) -> Vec<Triangle> {
    let vertices = trimesh.vertices();
    trimesh
        .indices()
        .iter()
        .map(|&idx| {
            let [a, b, c] = idx.map(|i| pose * vertices[i as usize]);
            Triangle::new(idx, TrianglePoints::new(a, b, c))
        })
        .collect()
}
