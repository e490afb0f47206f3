use thiserror::Error;

use super::WindTriangleError;

/// Errors from evaluating the sail forces.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AeroError {
    /// The apparent wind could not be resolved.
    #[error("wind triangle failed")]
    WindTriangle(#[from] WindTriangleError),

    /// Flattening must lie in `(0, 1]`.
    #[error("flattening {flat} is outside (0, 1]")]
    Flattening { flat: f64 },

    /// Reef must lie in `(0, 1]`.
    #[error("reef {reef} is outside (0, 1]")]
    Reef { reef: f64 },

    /// The sail area factor must lie in `(0, 1]`.
    #[error("area factor {area} is outside (0, 1]")]
    Area { area: f64 },

    /// A sail combination refers to a sail the yacht does not carry.
    #[error("no sail at inventory index {index}")]
    UnknownSail { index: usize },
}
