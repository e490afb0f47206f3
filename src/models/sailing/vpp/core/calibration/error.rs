use thiserror::Error;

use crate::support::interp::InterpError;

/// Errors raised while building or reading calibration tables.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalibrationError {
    /// No table is registered under this name.
    #[error("calibration table `{name}` is not registered")]
    Missing { name: String },

    /// The table exists but has a different shape.
    #[error("calibration table `{name}` is a {found}, expected a {expected}")]
    WrongKind {
        name: String,
        expected: &'static str,
        found: &'static str,
    },

    /// The coordinate count does not match the table dimension.
    #[error("calibration table `{name}` takes {expected} coordinates, got {found}")]
    Dimension {
        name: String,
        expected: usize,
        found: usize,
    },

    /// Table data failed validation.
    #[error("invalid table data for `{name}`")]
    Table {
        name: String,
        #[source]
        source: InterpError,
    },
}
