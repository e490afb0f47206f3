//! Hull and appendage forces.
//!
//! Resistance is the sum of residuary, viscous and induced parts. Side force
//! comes from the lifting bodies at the current leeway, and the heeling
//! resistance combines hydrostatic, dynamic and crew righting moments less
//! the moment of the keel side force.
//!
//! Heel and leeway are signed. The hull behaves the same heeled to either
//! side, so resistance is even in both and side force and righting moment
//! are odd.

use std::f64::consts::PI;

use tracing::warn;
use uom::si::{
    angle::degree,
    dynamic_viscosity::pascal_second,
    f64::{Angle, DynamicViscosity, Force, MassDensity, Velocity},
    force::newton,
    mass_density::kilogram_per_cubic_meter,
    velocity::meter_per_second,
};

use crate::support::{
    interp::{LinearCurve, TrilinearCube},
    units::GRAVITY,
};

use super::{
    calibration::{CalibrationError, CalibrationRegistry, names},
    state::{BoatState, Forces},
    yacht::Yacht,
};

/// Froude numbers above this are looked up at the limit.
const MAX_HULL_FROUDE: f64 = 0.7;

/// Appendage residuary tables stop here.
const MAX_APPENDAGE_FROUDE: f64 = 0.6;

/// Heel beyond which residuary resistance grows.
const RESIDUARY_HEEL: f64 = 30.0;

/// Settings for the hull force model.
#[derive(Debug, Clone, Copy)]
pub struct HydroConfig {
    pub water_density: MassDensity,
    pub water_viscosity: DynamicViscosity,

    /// Heel at which righting moment and rudder lift stop changing.
    pub max_heel: Angle,
}

impl Default for HydroConfig {
    fn default() -> Self {
        Self {
            water_density: MassDensity::new::<kilogram_per_cubic_meter>(1025.0),
            water_viscosity: DynamicViscosity::new::<pascal_second>(0.00119),
            max_heel: Angle::new::<degree>(30.0),
        }
    }
}

/// A hull ratio outside the sampled range of the residuary surface.
///
/// The surface still answers by extrapolation; results are less trustworthy.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainWarning {
    pub quantity: &'static str,
    pub value: f64,
    pub domain: (f64, f64),
}

/// Upright resistance split by component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resistance {
    pub residuary: Force,
    pub viscous: Force,
}

impl Resistance {
    #[must_use]
    pub fn total(&self) -> Force {
        self.residuary + self.viscous
    }
}

/// Hydrodynamic force model for one yacht.
#[derive(Debug, Clone)]
pub struct HullForceModel<'a> {
    yacht: &'a Yacht,
    residuary: &'a TrilinearCube,
    righting_arm: &'a LinearCurve,
    appendage_residuary: Vec<Option<&'a LinearCurve>>,
    config: HydroConfig,
    warnings: Vec<DomainWarning>,
}

impl<'a> HullForceModel<'a> {
    /// Builds the model, warning if the hull lies outside the residuary surface.
    ///
    /// # Errors
    ///
    /// Returns a [`CalibrationError`] if a required table is missing.
    pub fn new(
        yacht: &'a Yacht,
        registry: &'a CalibrationRegistry,
        config: HydroConfig,
    ) -> Result<Self, CalibrationError> {
        let residuary = registry.cube(names::HULL_RESIDUARY)?;
        let righting_arm = registry.curve(names::RIGHTING_ARM)?;
        let appendage_residuary = yacht
            .appendages()
            .iter()
            .map(|appendage| {
                appendage
                    .residuary_table()
                    .map(|name| registry.curve(name))
                    .transpose()
            })
            .collect::<Result<Vec<_>, _>>()?;

        let hull = yacht.hull();
        let [_, btr_axis, lvr_axis] = residuary.axes();
        let warnings: Vec<DomainWarning> = [("btr", hull.btr, btr_axis), ("lvr", hull.lvr, lvr_axis)]
            .into_iter()
            .filter(|(_, value, axis)| !axis.contains(*value))
            .map(|(quantity, value, axis)| DomainWarning {
                quantity,
                value,
                domain: axis.domain(),
            })
            .collect();
        for w in &warnings {
            warn!(
                yacht = yacht.name(),
                quantity = w.quantity,
                value = w.value,
                lower = w.domain.0,
                upper = w.domain.1,
                "hull ratio outside the residuary surface, extrapolating"
            );
        }

        Ok(Self {
            yacht,
            residuary,
            righting_arm,
            appendage_residuary,
            config,
            warnings,
        })
    }

    /// Hull ratios that fell outside the calibration domain.
    #[must_use]
    pub fn warnings(&self) -> &[DomainWarning] {
        &self.warnings
    }

    /// Hydrodynamic resistance, side force and righting moment.
    #[must_use]
    pub fn forces(&self, boat: &BoatState) -> Forces {
        let [vb, phi, leeway] = boat.to_si();
        let vb = vb.max(0.0);
        let max_heel = self.max_heel();
        let phi_c = phi.clamp(-max_heel, max_heel);
        let heel = phi_c.abs();

        let hull = self.yacht.hull();
        let q = 0.5 * self.rho() * vb * vb;

        let residuary = self.residuary(vb, phi);
        let viscous = self.viscous(vb);

        // Lift-curve area of each lifting body, hull first.
        let bodies: Vec<(f64, f64)> = std::iter::once((hull.cla, hull.teff))
            .chain(
                self.yacht
                    .appendages()
                    .iter()
                    .map(|a| (a.cla * a.side_force_factor(heel), a.teff)),
            )
            .collect();
        let cla: f64 = bodies.iter().map(|(c, _)| c).sum();

        let (side, induced) = if q == 0.0 || cla == 0.0 {
            (0.0, 0.0)
        } else {
            let side = q * leeway.to_radians() * cla;
            let induced = bodies
                .iter()
                .filter(|&&(c, teff)| c != 0.0 && teff > 0.0)
                .map(|&(c, teff)| {
                    let local = side * c / cla;
                    local * local / (q * PI * teff * teff)
                })
                .sum();
            (side, induced)
        };

        let statics =
            self.righting_arm.eval(heel) * hull.mass * GRAVITY + self.yacht.crew_righting_moment(heel);
        let mx = phi_c.signum() * statics
            + (5.955e-5 / 3.0)
                * hull.vol
                * hull.lwl
                * (1.0 - 6.25 * hull.bwl / hull.amax.sqrt())
                * vb
                / hull.lwl
                * phi_c
            - side * hull.keel_arm;

        Forces::from_si(
            residuary + viscous + induced,
            side * phi_c.to_radians().cos(),
            mx,
        )
    }

    /// Residuary and viscous resistance at a given speed and heel, without leeway.
    #[must_use]
    pub fn resistance(&self, speed: Velocity, heel: Angle) -> Resistance {
        let vb = speed.get::<meter_per_second>().max(0.0);
        Resistance {
            residuary: Force::new::<newton>(self.residuary(vb, heel.get::<degree>())),
            viscous: Force::new::<newton>(self.viscous(vb)),
        }
    }

    fn residuary(&self, vb: f64, phi: f64) -> f64 {
        let hull = self.yacht.hull();
        let fn_ = vb / (GRAVITY * hull.lwl).sqrt();

        let canoe = self
            .residuary
            .eval([fn_.clamp(0.0, MAX_HULL_FROUDE), hull.btr, hull.lvr])
            * hull.mass
            * GRAVITY
            * 1e-3;
        let appendages: f64 = self
            .yacht
            .appendages()
            .iter()
            .zip(&self.appendage_residuary)
            .filter_map(|(appendage, table)| {
                table.map(|curve| {
                    curve.eval(fn_.clamp(0.0, MAX_APPENDAGE_FROUDE))
                        * appendage.volume
                        * self.rho()
                        * GRAVITY
                        * 1e-3
                })
            })
            .sum();

        let total = canoe + appendages;
        let heel = phi.abs();
        if heel >= RESIDUARY_HEEL {
            total * (1.0 + 0.0004 * (heel - RESIDUARY_HEEL).powi(2))
        } else {
            total
        }
    }

    fn viscous(&self, vb: f64) -> f64 {
        let hull = self.yacht.hull();
        let q = 0.5 * self.rho() * vb * vb;

        let canoe = q * hull.wsa * self.friction(vb, 0.85 * hull.lwl) * 1.05;
        let appendages: f64 = self
            .yacht
            .appendages()
            .iter()
            .map(|a| q * a.wsa * self.friction(vb, a.chord) * a.cof)
            .sum();
        canoe + appendages
    }

    /// ITTC-57 friction line.
    fn friction(&self, vb: f64, length: f64) -> f64 {
        let nu = self.config.water_viscosity.get::<pascal_second>() / self.rho();
        let re = (vb * length / nu).max(1e4);
        0.066 / (re.log10() - 2.03).powi(2)
    }

    fn rho(&self) -> f64 {
        self.config.water_density.get::<kilogram_per_cubic_meter>()
    }

    fn max_heel(&self) -> f64 {
        self.config.max_heel.get::<degree>()
    }
}
