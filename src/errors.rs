//! Analysis errors

use crate::float_types::parry3d::shape::{ShapeType, TriMeshBuilderError};

/// Result type for affordance operations.
pub type AffordanceResult<T> = Result<T, AffordanceError>;

/// All the ways an analysis or a fixture construction can fail
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum AffordanceError {
    /// The object's collision shape is not a triangle mesh
    #[error("(InvalidGeometryKind) expected a triangle mesh, found a {found:?} shape")]
    InvalidGeometryKind {
        /// Kind of the shape that was supplied.
        found: ShapeType,
    },
    /// Indicates an inconsistency while building a triangle mesh
    #[error("(TriMesh) {0}")]
    TriMesh(#[from] TriMeshBuilderError),
}
