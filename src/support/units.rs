//! Extensions to [`uom`] for sailing conventions.
//!
//! This crate uses [`uom`] for physical quantities at its public boundaries.
//! Sailing practice quotes wind and boat speeds in knots with a rounded
//! conversion factor, and angles in degrees; the helpers here keep those
//! conventions in one place.
//!
//! ```
//! use uom::si::velocity::meter_per_second;
//! use yacht_vpp::support::units::{from_knots, to_knots};
//!
//! let tws = from_knots(10.0);
//! assert!((tws.get::<meter_per_second>() - 5.144).abs() < 1e-12);
//! assert!((to_knots(tws) - 10.0).abs() < 1e-12);
//! ```

use uom::si::{
    angle::degree,
    f64::{Angle, Velocity},
    velocity::meter_per_second,
};

/// Metres per second in one knot, as used throughout the analysis.
///
/// This is the rounded sailing value, not the exact 1852/3600.
pub const KNOTS_TO_MPS: f64 = 0.5144;

/// Standard gravitational acceleration, m/s².
pub const GRAVITY: f64 = 9.81;

/// Converts a speed in knots to a [`Velocity`].
#[must_use]
pub fn from_knots(knots: f64) -> Velocity {
    Velocity::new::<meter_per_second>(knots * KNOTS_TO_MPS)
}

/// Converts a [`Velocity`] to knots.
#[must_use]
pub fn to_knots(speed: Velocity) -> f64 {
    speed.get::<meter_per_second>() / KNOTS_TO_MPS
}

/// Shorthand for an [`Angle`] in degrees.
#[must_use]
pub fn degrees(value: f64) -> Angle {
    Angle::new::<degree>(value)
}
