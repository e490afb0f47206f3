use thiserror::Error;

use crate::support::constraint::ConstraintError;

use super::super::calibration::CalibrationError;

/// Fatal problems found while building a yacht or its force models.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigurationError {
    /// A geometric or mass particular is out of range.
    #[error("invalid {field}: {source}")]
    InvalidParticular {
        field: &'static str,
        #[source]
        source: ConstraintError,
    },

    /// The sail inventory has no mainsail.
    #[error("sail inventory has no mainsail")]
    MissingMain,

    /// The sail inventory has more than one mainsail.
    #[error("sail inventory has {count} mainsails, expected one")]
    MultipleMains { count: usize },

    /// The sail inventory has nothing to pair with the mainsail.
    #[error("sail inventory needs at least one headsail or downwind sail")]
    NoSecondarySail,

    /// A calibration table the models depend on is missing or malformed.
    #[error(transparent)]
    Calibration(#[from] CalibrationError),
}

impl ConfigurationError {
    pub(crate) fn invalid(field: &'static str) -> impl FnOnce(ConstraintError) -> Self {
        move |source| Self::InvalidParticular { field, source }
    }
}
