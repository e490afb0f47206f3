use std::error::Error;

use serde::Serialize;

use crate::support::levenberg_marquardt::Status;

/// Which analysis axis an excluded value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisAxis {
    /// True wind speed, knots.
    Tws,
    /// True wind angle, degrees.
    Twa,
}

/// An analysis point dropped because it lies outside the accepted range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RangeWarning {
    pub axis: AnalysisAxis,
    pub value: f64,
    pub range: (f64, f64),
}

/// Why a cell has no converged state.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConvergenceFailure {
    /// The solver stopped short of the tolerance; the cell keeps its best state.
    NotConverged {
        status: &'static str,
        max_residual: f64,
        iters: usize,
    },

    /// The balance converged, but derating could not bring the heel under the
    /// limit. The cell keeps its least-derated state.
    HeelLimited { heel: f64, derate_steps: usize },

    /// The models could not be evaluated at the seed; the cell is empty.
    ///
    /// `error` carries the whole chain of causes, outermost first.
    Failed { error: String },
}

impl ConvergenceFailure {
    pub(super) fn not_converged(status: Status, max_residual: f64, iters: usize) -> Self {
        let status = match status {
            Status::Converged => "converged",
            Status::MaxIters => "max_iters",
            Status::Stalled => "stalled",
        };
        Self::NotConverged {
            status,
            max_residual,
            iters,
        }
    }

    pub(super) fn failed(err: &(dyn Error + 'static)) -> Self {
        let mut error = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            error.push_str(": ");
            error.push_str(&cause.to_string());
            source = cause.source();
        }
        Self::Failed { error }
    }
}

/// A grid cell that did not converge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConvergenceWarning {
    /// True wind speed, knots.
    pub tws: f64,
    /// True wind angle, degrees.
    pub twa: f64,
    /// Sail combination label.
    pub combination: String,
    pub failure: ConvergenceFailure,
}

/// Summary of a completed or cancelled run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunReport {
    /// Cells attempted.
    pub attempted: usize,
    pub converged: usize,
    /// Cells left over the heel limit after derating; not counted as converged.
    pub heel_limited: usize,
    /// Cells skipped because the sail does not suit the wind angle.
    pub skipped: usize,
    /// True if the run stopped early on request.
    pub cancelled: bool,
    pub warnings: Vec<ConvergenceWarning>,
}
