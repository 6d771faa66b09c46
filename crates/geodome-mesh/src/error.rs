//! Error types for mesh construction.

use thiserror::Error;

/// Errors that can occur while building or validating a mesh.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeshError {
    /// Frequency or radius outside its valid range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A face references a vertex that does not exist.
    #[error("face {face} references vertex {index}, but the mesh has {vertex_count} vertices")]
    IndexOutOfRange {
        /// Offending face.
        face: usize,
        /// Offending vertex index.
        index: u32,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },

    /// An interpolated point had no radial direction to project along.
    #[error("cannot project point ({0}, {1}, {2}) onto the sphere")]
    DegenerateProjection(f64, f64, f64),

    /// Mesh is not a closed, consistently oriented 2-manifold.
    #[error("mesh is not a closed manifold: {0}")]
    NonManifold(String),
}

/// Result type for mesh operations.
pub type Result<T> = std::result::Result<T, MeshError>;
