use thiserror::Error;

use crate::support::levenberg_marquardt;

/// A single equilibrium solve that could not start.
#[derive(Debug, Error)]
pub enum CellError {
    /// The force models failed at the seed state.
    #[error("equilibrium solve failed")]
    Solver(#[from] levenberg_marquardt::Error),
}

/// Misuse of the run sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RunError {
    /// `run` or `results` was called before `set_analysis`.
    #[error("no analysis has been set")]
    NoAnalysis,

    /// `results` was called before `run`.
    #[error("the analysis has not been run")]
    NotRun,
}
