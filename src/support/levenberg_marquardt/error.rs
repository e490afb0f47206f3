use thiserror::Error;

type BoxedError = Box<dyn std::error::Error + Send + Sync>;

/// Failure to evaluate the system at the initial guess.
#[derive(Debug, Error)]
pub enum Error {
    /// The model could not be called.
    #[error("model failed")]
    Model {
        #[source]
        source: BoxedError,
    },

    /// The problem could not map variables to input, or output to residuals.
    #[error("problem failed")]
    Problem {
        #[source]
        source: BoxedError,
    },

    /// A residual was `NaN` or infinite.
    #[error("non-finite residual at x = {x:?}")]
    NonFinite { x: Vec<f64> },
}

impl Error {
    pub(super) fn model(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Model {
            source: Box::new(err),
        }
    }

    pub(super) fn problem(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Problem {
            source: Box::new(err),
        }
    }
}
