use std::f64::consts::PI;

use uom::si::{
    angle::degree,
    f64::{Angle, Force, Torque, Velocity},
    force::newton,
    torque::newton_meter,
    velocity::meter_per_second,
};

use crate::support::{
    levenberg_marquardt::{self, Bounds},
    units::from_knots,
};

use super::super::{aero::AeroConfig, hydro::HydroConfig};

/// Configuration of every model taking part in a prediction.
#[derive(Debug, Clone, Copy, Default)]
pub struct VppConfig {
    pub aero: AeroConfig,
    pub hydro: HydroConfig,
    pub solver: SolverConfig,
}

/// Equilibrium solver settings.
#[derive(Debug, Clone, Copy)]
pub struct SolverConfig {
    /// Levenberg–Marquardt settings.
    ///
    /// Residuals are divided by [`Self::force_tol`] and [`Self::moment_tol`]
    /// before they reach the solver, so a residual tolerance of one means
    /// every balance is met to its own tolerance.
    pub levenberg_marquardt: levenberg_marquardt::Config,

    /// Acceptable imbalance in drive and side force.
    pub force_tol: Force,

    /// Acceptable imbalance in heeling moment.
    pub moment_tol: Torque,

    /// Heel, to either side, above which the rig is derated.
    ///
    /// A cell still over it after derating is not counted as converged.
    pub max_heel: Angle,

    pub derate: DeratePolicy,

    pub flattening: FlatteningSchedule,

    /// Upwind sets are not tried at or beyond this true wind angle.
    pub upwind_limit: Angle,

    /// Downwind sets are not tried at or before this true wind angle.
    pub downwind_limit: Angle,

    /// Slowest true wind accepted by an analysis.
    pub min_tws: Velocity,

    /// Fastest true wind accepted by an analysis.
    pub max_tws: Velocity,

    /// Limits on boat speed (m/s), heel and leeway (degrees).
    pub bounds: Bounds<3>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            levenberg_marquardt: levenberg_marquardt::Config {
                residual_tol: 1.0,
                ..levenberg_marquardt::Config::default()
            },
            force_tol: Force::new::<newton>(1e-2),
            moment_tol: Torque::new::<newton_meter>(1e-2),
            max_heel: Angle::new::<degree>(30.0),
            derate: DeratePolicy::default(),
            flattening: FlatteningSchedule::default(),
            upwind_limit: Angle::new::<degree>(135.0),
            downwind_limit: Angle::new::<degree>(60.0),
            min_tws: from_knots(2.0),
            max_tws: from_knots(35.0),
            bounds: Bounds {
                lower: [0.0, -90.0, -15.0],
                upper: [30.0, 90.0, 15.0],
            },
        }
    }
}

impl SolverConfig {
    /// Scale dividing `(fx, fy, mx)` imbalances into solver residuals.
    pub(super) fn residual_scale(&self) -> [f64; 3] {
        let force = self.force_tol.get::<newton>();
        [force, force, self.moment_tol.get::<newton_meter>()]
    }
}

/// How the rig is shortened when the boat heels past the limit.
///
/// The area factor starts at one and is multiplied by `factor` after each
/// over-heeled solve, but never falls below `min_area`. It scales the area of
/// every set sail, kite included.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeratePolicy {
    pub factor: f64,
    pub min_area: f64,
    pub max_steps: usize,
}

impl Default for DeratePolicy {
    fn default() -> Self {
        Self {
            factor: 0.8,
            min_area: 0.3,
            max_steps: 6,
        }
    }
}

/// Sail flattening held during a solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlatteningSchedule {
    /// The same flattening at every wind speed.
    Fixed(f64),

    /// Full power in light air, easing to 0.62 from 8.5 m/s of true wind.
    TwsRamp,
}

impl Default for FlatteningSchedule {
    fn default() -> Self {
        Self::Fixed(1.0)
    }
}

impl FlatteningSchedule {
    /// Flattening at a true wind speed.
    #[must_use]
    pub fn at(&self, tws: Velocity) -> f64 {
        match *self {
            Self::Fixed(flat) => flat,
            Self::TwsRamp => {
                let tws = tws.get::<meter_per_second>();
                if tws < 2.5 {
                    1.0
                } else if tws <= 8.5 {
                    0.81 + 0.19 * ((tws - 2.5) / 6.0 * PI).cos()
                } else {
                    0.62
                }
            }
        }
    }
}
