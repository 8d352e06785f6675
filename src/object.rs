//! The rigid body an analysis runs on: a parry collision shape placed in the world.

use crate::errors::{AffordanceError, AffordanceResult};
use crate::float_types::{
    Real,
    parry3d::shape::{SharedShape, TriMesh},
};
use nalgebra::{Isometry3, Matrix3, Point3, Vector3};
use std::fmt;

/// A collision shape together with its world placement.
///
/// Only triangle-mesh shapes can be analysed; any other shape kind is rejected by
/// [`CollisionObject::trimesh`]. The object is read-only once built and is meant to
/// be shared behind an `Arc` between the analysis results that refer to it.
#[derive(Clone)]
pub struct CollisionObject {
    shape: SharedShape,
    pose: Isometry3<Real>,
}

impl CollisionObject {
    pub const fn new(shape: SharedShape, pose: Isometry3<Real>) -> Self {
        Self { shape, pose }
    }

    /// Wraps a triangle mesh placed at `pose`.
    pub fn from_trimesh(trimesh: TriMesh, pose: Isometry3<Real>) -> Self {
        Self::new(SharedShape::new(trimesh), pose)
    }

    pub const fn shape(&self) -> &SharedShape {
        &self.shape
    }

    pub const fn pose(&self) -> &Isometry3<Real> {
        &self.pose
    }

    /// World-frame rotation of the object as a 3×3 matrix.
    pub fn rotation(&self) -> Matrix3<Real> {
        self.pose.rotation.to_rotation_matrix().into_inner()
    }

    /// World-frame translation of the object.
    pub fn translation(&self) -> Vector3<Real> {
        self.pose.translation.vector
    }

    /// Maps a point from the object's local frame into the world frame.
    #[inline]
    pub fn to_world(&self, local: &Point3<Real>) -> Point3<Real> {
        self.pose * local
    }

    /// The underlying triangle mesh.
    ///
    /// ### Errors
    /// [`AffordanceError::InvalidGeometryKind`] when the shape is not a `TriMesh`.
    pub fn trimesh(&self) -> AffordanceResult<&TriMesh> {
        self.shape
            .as_trimesh()
            .ok_or_else(|| AffordanceError::InvalidGeometryKind {
                found: self.shape.shape_type(),
            })
    }
}

impl fmt::Debug for CollisionObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollisionObject")
            .field("shape", &self.shape.shape_type())
            .field("pose", &self.pose)
            .finish()
    }
}
