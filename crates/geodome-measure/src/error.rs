//! Error types for mesh measurement.

use thiserror::Error;

/// Errors that can occur while measuring a mesh.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeasureError {
    /// Mesh has no triangles.
    #[error("mesh is empty")]
    EmptyMesh,

    /// A face is collinear or collapsed: its area is below tolerance.
    #[error("face {face} is degenerate (area {area:e})")]
    DegenerateMesh {
        /// Offending face.
        face: usize,
        /// Its area.
        area: f64,
    },
}

/// Result type for measurement operations.
pub type Result<T> = std::result::Result<T, MeasureError>;
