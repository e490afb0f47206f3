//! Damped least-squares root finding for small square systems.
//!
//! [`solve`] drives the residuals of a [`twine_core::EquationProblem`] toward
//! zero using the Levenberg–Marquardt method: each iteration forms a
//! forward-difference Jacobian `J`, then solves
//!
//! ```text
//! (JᵀJ + λ·diag(JᵀJ)) · Δx = −Jᵀr
//! ```
//!
//! for a step. Steps that reduce `½‖r‖²` are accepted and the damping `λ`
//! relaxed toward Gauss–Newton; rejected steps raise `λ` toward gradient
//! descent. Iterates are projected onto box [`Bounds`] after every step.
//!
//! The solver never panics on a bad trial point: a model or problem error at a
//! trial step counts as a rejected step. Only a failure at the initial guess
//! is reported as an [`Error`]. Non-convergence is a [`Status`] on the returned
//! [`Solution`], which always carries the best iterate found.
//!
//! # Example
//!
//! ```
//! use std::convert::Infallible;
//!
//! use twine_core::{EquationProblem, Model};
//! use yacht_vpp::support::levenberg_marquardt::{self, Bounds, Config, Status};
//!
//! struct Circle;
//!
//! impl Model for Circle {
//!     type Input = [f64; 2];
//!     type Output = [f64; 2];
//!     type Error = Infallible;
//!
//!     fn call(&self, x: &[f64; 2]) -> Result<[f64; 2], Infallible> {
//!         Ok([x[0] * x[0] + x[1] * x[1] - 4.0, x[0] - x[1]])
//!     }
//! }
//!
//! struct Zero;
//!
//! impl EquationProblem<2> for Zero {
//!     type Input = [f64; 2];
//!     type Output = [f64; 2];
//!     type Error = Infallible;
//!
//!     fn input(&self, x: &[f64; 2]) -> Result<[f64; 2], Infallible> {
//!         Ok(*x)
//!     }
//!
//!     fn residuals(&self, _: &[f64; 2], out: &[f64; 2]) -> Result<[f64; 2], Infallible> {
//!         Ok(*out)
//!     }
//! }
//!
//! let solution =
//!     levenberg_marquardt::solve(&Circle, &Zero, [1.0, 0.5], &Bounds::unbounded(), &Config::default())
//!         .unwrap();
//! assert_eq!(solution.status, Status::Converged);
//! assert!((solution.x[0] - 2.0_f64.sqrt()).abs() < 1e-6);
//! ```

mod config;
mod dense;
mod error;

pub use config::{Bounds, Config};
pub use error::Error;

use twine_core::{EquationProblem, Model};

use dense::solve_dense;

/// Termination status of a solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Every residual is within [`Config::residual_tol`].
    Converged,

    /// The iteration cap was reached first.
    MaxIters,

    /// No further progress was possible (damping saturated or the step
    /// collapsed below [`Config::step_tol`]).
    Stalled,
}

/// Best iterate found by [`solve`].
#[derive(Debug, Clone)]
pub struct Solution<I, O, const N: usize> {
    /// Solver variables at the best iterate.
    pub x: [f64; N],

    /// Model input at the best iterate.
    pub input: I,

    /// Model output at the best iterate.
    pub output: O,

    /// Residuals at the best iterate.
    pub residuals: [f64; N],

    /// Iterations performed.
    pub iters: usize,

    /// Why the solver stopped.
    pub status: Status,
}

impl<I, O, const N: usize> Solution<I, O, N> {
    /// Largest absolute residual.
    #[must_use]
    pub fn max_residual(&self) -> f64 {
        max_abs(&self.residuals)
    }
}

/// Solves `residuals(model(input(x))) = 0` starting from `x0`.
///
/// # Errors
///
/// Returns an [`Error`] if the model or problem fails, or produces non-finite
/// residuals, at the (projected) initial guess.
pub fn solve<M, P, const N: usize>(
    model: &M,
    problem: &P,
    x0: [f64; N],
    bounds: &Bounds<N>,
    config: &Config,
) -> Result<Solution<P::Input, P::Output, N>, Error>
where
    M: Model<Input = P::Input, Output = P::Output>,
    P: EquationProblem<N>,
    M::Error: std::error::Error + Send + Sync + 'static,
    P::Error: std::error::Error + Send + Sync + 'static,
{
    let mut current = evaluate(model, problem, bounds.project(x0))?;
    let mut damping = config.initial_damping;

    for iter in 0..config.max_iters {
        if max_abs(&current.residuals) <= config.residual_tol {
            return Ok(current.into_solution(iter, Status::Converged));
        }

        let Some(jacobian) = jacobian(model, problem, &current, bounds, config) else {
            return Ok(current.into_solution(iter, Status::Stalled));
        };

        // Normal equations: A = JᵀJ, g = Jᵀr.
        let mut a = [[0.0; N]; N];
        let mut g = [0.0; N];
        for row in 0..N {
            for col in 0..N {
                a[row][col] = (0..N).map(|k| jacobian[k][row] * jacobian[k][col]).sum();
            }
            g[row] = (0..N).map(|k| jacobian[k][row] * current.residuals[k]).sum();
        }

        let accepted = loop {
            if damping > config.max_damping {
                break None;
            }

            let mut damped = a;
            for (j, row) in damped.iter_mut().enumerate() {
                row[j] += damping * a[j][j].max(config.min_scaling);
            }

            let Some(step) = solve_dense(damped, g.map(|gi| -gi)) else {
                damping *= config.damping_increase;
                continue;
            };

            let trial_x = bounds.project(std::array::from_fn(|j| current.x[j] + step[j]));
            match evaluate(model, problem, trial_x) {
                Ok(trial) if trial.cost < current.cost => {
                    damping = (damping / config.damping_decrease).max(config.min_damping);
                    break Some(trial);
                }
                _ => damping *= config.damping_increase,
            }
        };

        let Some(next) = accepted else {
            return Ok(current.into_solution(iter + 1, Status::Stalled));
        };

        let collapsed = (0..N).all(|j| {
            (next.x[j] - current.x[j]).abs() <= config.step_tol * (current.x[j].abs() + config.step_tol)
        });
        current = next;

        if collapsed && max_abs(&current.residuals) > config.residual_tol {
            return Ok(current.into_solution(iter + 1, Status::Stalled));
        }
    }

    let status = if max_abs(&current.residuals) <= config.residual_tol {
        Status::Converged
    } else {
        Status::MaxIters
    };
    Ok(current.into_solution(config.max_iters, status))
}

/// A fully evaluated point.
struct Point<I, O, const N: usize> {
    x: [f64; N],
    input: I,
    output: O,
    residuals: [f64; N],
    cost: f64,
}

impl<I, O, const N: usize> Point<I, O, N> {
    fn into_solution(self, iters: usize, status: Status) -> Solution<I, O, N> {
        Solution {
            x: self.x,
            input: self.input,
            output: self.output,
            residuals: self.residuals,
            iters,
            status,
        }
    }
}

fn evaluate<M, P, const N: usize>(
    model: &M,
    problem: &P,
    x: [f64; N],
) -> Result<Point<P::Input, P::Output, N>, Error>
where
    M: Model<Input = P::Input, Output = P::Output>,
    P: EquationProblem<N>,
    M::Error: std::error::Error + Send + Sync + 'static,
    P::Error: std::error::Error + Send + Sync + 'static,
{
    let input = problem.input(&x).map_err(Error::problem)?;
    let output = model.call(&input).map_err(Error::model)?;
    let residuals = problem
        .residuals(&input, &output)
        .map_err(Error::problem)?;

    if residuals.iter().any(|r| !r.is_finite()) {
        return Err(Error::NonFinite { x: x.to_vec() });
    }

    let cost = 0.5 * residuals.iter().map(|r| r * r).sum::<f64>();
    Ok(Point {
        x,
        input,
        output,
        residuals,
        cost,
    })
}

/// Forward-difference Jacobian, `jacobian[i][j] = ∂rᵢ/∂xⱼ`.
///
/// Steps backward when the forward step would leave the bounds or the model
/// fails there. Returns `None` if neither direction can be evaluated.
fn jacobian<M, P, const N: usize>(
    model: &M,
    problem: &P,
    at: &Point<P::Input, P::Output, N>,
    bounds: &Bounds<N>,
    config: &Config,
) -> Option<[[f64; N]; N]>
where
    M: Model<Input = P::Input, Output = P::Output>,
    P: EquationProblem<N>,
    M::Error: std::error::Error + Send + Sync + 'static,
    P::Error: std::error::Error + Send + Sync + 'static,
{
    let mut jac = [[0.0; N]; N];

    for j in 0..N {
        let h = config.fd_step * at.x[j].abs().max(1.0);

        let column = [h, -h].into_iter().find_map(|step| {
            let mut x = at.x;
            x[j] += step;
            if x[j] < bounds.lower[j] || x[j] > bounds.upper[j] {
                return None;
            }
            let perturbed = evaluate(model, problem, x).ok()?;
            Some(std::array::from_fn::<f64, N, _>(|i| {
                (perturbed.residuals[i] - at.residuals[i]) / step
            }))
        })?;

        for (row, value) in jac.iter_mut().zip(column) {
            row[j] = value;
        }
    }

    Some(jac)
}

fn max_abs(values: &[f64]) -> f64 {
    values.iter().fold(0.0, |acc, v| acc.max(v.abs()))
}
