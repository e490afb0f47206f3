//! Apparent wind from true wind and boat speed.
//!
//! The apparent wind angle `awa` satisfies
//!
//! ```text
//! vb·sin(awa) = tws·sin(twa − awa)
//! ```
//!
//! i.e. the boat-speed and true-wind components normal to the apparent wind
//! cancel. For `0 < twa < 180` the root lies in `[0, twa]` and is bracketed
//! there, so it is found by bisection.

use std::convert::Infallible;

use thiserror::Error;
use twine_core::{EquationProblem, Model};
use twine_solvers::equation::bisection;
use uom::si::{
    angle::degree,
    f64::{Angle, Velocity},
    velocity::meter_per_second,
};

use super::super::state::WindState;

/// Apparent wind seen by the rig.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ApparentWind {
    pub angle: Angle,
    pub speed: Velocity,
}

/// Bisection settings for the apparent wind angle.
#[derive(Debug, Clone, Copy)]
pub struct WindTriangleConfig {
    /// Maximum iteration count.
    pub max_iters: usize,

    /// Absolute tolerance on the apparent wind angle.
    pub angle_tol: Angle,
}

impl Default for WindTriangleConfig {
    fn default() -> Self {
        Self {
            max_iters: 100,
            angle_tol: Angle::new::<degree>(1e-12),
        }
    }
}

impl WindTriangleConfig {
    fn bisection(&self) -> bisection::Config {
        bisection::Config {
            max_iters: self.max_iters,
            x_abs_tol: self.angle_tol.get::<degree>(),
            x_rel_tol: 0.0,
            residual_tol: 0.0,
        }
    }
}

/// Wind-triangle failures.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WindTriangleError {
    /// The true wind angle is not within `[0°, 180°]`.
    #[error("true wind angle {twa}° is outside [0°, 180°]")]
    AngleOutOfRange { twa: f64 },

    /// The bisection solver rejected the problem.
    #[error("bisection solver error: {0}")]
    Bisection(String),

    /// The iteration budget ran out before the angle converged.
    #[error("apparent wind angle did not converge: residual={residual} m/s after {iters} iterations")]
    NotConverged { residual: f64, iters: usize },
}

/// Solves the wind triangle.
///
/// With the boat at rest the apparent wind is the true wind, exactly.
///
/// # Errors
///
/// Returns a [`WindTriangleError`] if the true wind angle is out of range or
/// the bisection does not converge.
pub fn solve(
    boat_speed: Velocity,
    wind: &WindState,
    config: &WindTriangleConfig,
) -> Result<ApparentWind, WindTriangleError> {
    let vb = boat_speed.get::<meter_per_second>().max(0.0);
    let tws = wind.speed.get::<meter_per_second>();
    let twa = wind.angle.get::<degree>();

    if !(0.0..=180.0).contains(&twa) {
        return Err(WindTriangleError::AngleOutOfRange { twa });
    }

    if vb == 0.0 {
        return Ok(ApparentWind {
            angle: wind.angle,
            speed: wind.speed,
        });
    }

    let twa_rad = twa.to_radians();
    let aws = (tws * twa_rad.sin()).hypot(tws * twa_rad.cos() + vb);

    let awa = if twa == 0.0 || tws == 0.0 {
        0.0
    } else if twa == 180.0 {
        if vb > tws { 0.0 } else { 180.0 }
    } else {
        let model = CrossWindModel { vb, tws, twa };
        let solution = bisection::solve(
            &model,
            &CrossWindBalance,
            [0.0, twa],
            &config.bisection(),
            |_: &bisection::Event<'_, _, _>| None,
        )
        .map_err(|err| WindTriangleError::Bisection(err.to_string()))?;

        if solution.status != bisection::Status::Converged {
            return Err(WindTriangleError::NotConverged {
                residual: solution.residual,
                iters: solution.iters,
            });
        }
        solution.snapshot.output.awa
    };

    Ok(ApparentWind {
        angle: Angle::new::<degree>(awa),
        speed: Velocity::new::<meter_per_second>(aws),
    })
}

/// Velocity components normal to a trial apparent wind direction.
#[derive(Debug, Clone, Copy)]
struct CrossWind {
    awa: f64,
    boat: f64,
    wind: f64,
}

/// Evaluates [`CrossWind`] at a trial apparent wind angle.
struct CrossWindModel {
    vb: f64,
    tws: f64,
    twa: f64,
}

impl Model for CrossWindModel {
    type Input = Angle;
    type Output = CrossWind;
    type Error = Infallible;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let awa = input.get::<degree>();
        Ok(CrossWind {
            awa,
            boat: self.vb * awa.to_radians().sin(),
            wind: self.tws * (self.twa - awa).to_radians().sin(),
        })
    }
}

/// Residual `boat − wind` (m/s) over the apparent wind angle in degrees.
struct CrossWindBalance;

impl EquationProblem<1> for CrossWindBalance {
    type Input = Angle;
    type Output = CrossWind;
    type Error = Infallible;

    fn input(&self, x: &[f64; 1]) -> Result<Self::Input, Self::Error> {
        Ok(Angle::new::<degree>(x[0]))
    }

    fn residuals(
        &self,
        _input: &Self::Input,
        output: &Self::Output,
    ) -> Result<[f64; 1], Self::Error> {
        Ok([output.boat - output.wind])
    }
}
