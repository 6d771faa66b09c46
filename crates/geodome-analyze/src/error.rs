//! Error types for convergence analysis.

use geodome_measure::MeasureError;
use geodome_mesh::MeshError;
use thiserror::Error;

/// Errors that can occur during convergence analysis.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// Radius or tolerance outside its valid range. Aborts the whole request.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A single requested frequency is outside its valid range.
    #[error("invalid frequency {frequency}: {reason}")]
    InvalidFrequency {
        /// Requested frequency.
        frequency: u32,
        /// Why it was rejected.
        reason: String,
    },

    /// The builder failed for a frequency.
    #[error("failed to build mesh at frequency {frequency}: {source}")]
    Build {
        /// Frequency being built.
        frequency: u32,
        /// Underlying builder error.
        #[source]
        source: MeshError,
    },

    /// The evaluator rejected a built mesh. Indicates a builder defect.
    #[error("degenerate mesh at frequency {frequency}: {source}")]
    DegenerateMesh {
        /// Frequency being measured.
        frequency: u32,
        /// Underlying evaluator error.
        #[source]
        source: MeasureError,
    },

    /// No frequency up to the limit met the requested tolerance.
    #[error("surface area did not converge to within {tolerance} of the sphere by frequency {max_frequency}")]
    NotConverged {
        /// Requested relative tolerance.
        tolerance: f64,
        /// Last frequency tried.
        max_frequency: u32,
    },

    /// Invalid analysis settings.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),
}

impl AnalysisError {
    /// Frequency the error belongs to, if it is a per-frequency error.
    pub fn frequency(&self) -> Option<u32> {
        match self {
            AnalysisError::InvalidFrequency { frequency, .. }
            | AnalysisError::Build { frequency, .. }
            | AnalysisError::DegenerateMesh { frequency, .. } => Some(*frequency),
            _ => None,
        }
    }

    /// Whether the error was caused by a caller-supplied parameter.
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(
            self,
            AnalysisError::InvalidParameter(_)
                | AnalysisError::InvalidFrequency { .. }
                | AnalysisError::InvalidSettings(_)
                | AnalysisError::Build {
                    source: MeshError::InvalidParameter(_),
                    ..
                }
        )
    }
}

/// Result type for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;
