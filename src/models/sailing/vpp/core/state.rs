//! Explicit state passed into and out of the force models.

use serde::Serialize;
use uom::si::{
    angle::degree,
    f64::{Angle, Force, Torque, Velocity},
    force::newton,
    torque::newton_meter,
    velocity::meter_per_second,
};

/// Boat speed, heel and leeway.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoatState {
    pub speed: Velocity,
    pub heel: Angle,
    pub leeway: Angle,
}

impl BoatState {
    /// Builds a state from speed in m/s and angles in degrees.
    #[must_use]
    pub fn from_si(speed: f64, heel: f64, leeway: f64) -> Self {
        Self {
            speed: Velocity::new::<meter_per_second>(speed),
            heel: Angle::new::<degree>(heel),
            leeway: Angle::new::<degree>(leeway),
        }
    }

    /// Speed in m/s, heel and leeway in degrees.
    #[must_use]
    pub fn to_si(&self) -> [f64; 3] {
        [
            self.speed.get::<meter_per_second>(),
            self.heel.get::<degree>(),
            self.leeway.get::<degree>(),
        ]
    }
}

/// True wind over the ground.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindState {
    /// True wind speed.
    pub speed: Velocity,

    /// True wind angle off the bow, 0° to 180°.
    pub angle: Angle,
}

/// Sail trim held fixed during an equilibrium solve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SailControls {
    /// Flattening, in `(0, 1]`; one is a full-powered sail.
    pub flat: f64,

    /// Linear reef factor applied to the main hoist and jib foretriangle, in `(0, 1]`.
    pub reef: f64,

    /// Multiplier on the area of every set sail, kite included, in `(0, 1]`.
    pub area: f64,
}

impl Default for SailControls {
    fn default() -> Self {
        Self {
            flat: 1.0,
            reef: 1.0,
            area: 1.0,
        }
    }
}

/// Forces and heeling moment in boat axes.
///
/// `fx` is positive forward for the rig and positive aft (resistance) for the
/// hull, so the two balance when equal. Likewise `fy` and `mx` are heeling for
/// the rig and resisting for the hull.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Forces {
    pub fx: Force,
    pub fy: Force,
    pub mx: Torque,
}

impl Forces {
    pub(crate) fn from_si(fx: f64, fy: f64, mx: f64) -> Self {
        Self {
            fx: Force::new::<newton>(fx),
            fy: Force::new::<newton>(fy),
            mx: Torque::new::<newton_meter>(mx),
        }
    }

    /// `(fx, fy)` in newtons and `mx` in newton-metres.
    #[must_use]
    pub fn to_si(&self) -> [f64; 3] {
        [
            self.fx.get::<newton>(),
            self.fy.get::<newton>(),
            self.mx.get::<newton_meter>(),
        ]
    }
}

/// A boat state together with the trim it was solved at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquilibriumState {
    pub speed: Velocity,
    pub heel: Angle,
    pub leeway: Angle,
    pub flattening: f64,
    pub reef: f64,

    /// Sail area factor left after derating.
    pub area: f64,
}

impl EquilibriumState {
    #[must_use]
    pub fn new(boat: BoatState, controls: SailControls) -> Self {
        Self {
            speed: boat.speed,
            heel: boat.heel,
            leeway: boat.leeway,
            flattening: controls.flat,
            reef: controls.reef,
            area: controls.area,
        }
    }

    #[must_use]
    pub fn boat(&self) -> BoatState {
        BoatState {
            speed: self.speed,
            heel: self.heel,
            leeway: self.leeway,
        }
    }

    #[must_use]
    pub fn controls(&self) -> SailControls {
        SailControls {
            flat: self.flattening,
            reef: self.reef,
            area: self.area,
        }
    }
}
