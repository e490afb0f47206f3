//! Sail forces.
//!
//! Resolves the apparent wind, blends the polars of the set sails by area,
//! adds induced and parasitic drag and hull windage, then projects lift and
//! drag into boat axes. Heel reduces the side force and its heeling moment
//! by `cos(heel)`.

mod error;
mod rig;
mod wind_triangle;

pub use error::AeroError;
pub use wind_triangle::{ApparentWind, WindTriangleConfig, WindTriangleError};

use std::f64::consts::PI;

use uom::si::{
    angle::degree,
    f64::{Force, Length, MassDensity},
    force::newton,
    length::meter,
    mass_density::kilogram_per_cubic_meter,
    velocity::meter_per_second,
};

use crate::support::interp::LinearCurve;

use super::{
    calibration::{CalibrationError, CalibrationRegistry, SailPolar, names},
    state::{BoatState, Forces, SailControls, WindState},
    yacht::{SailCombination, Yacht},
};

use rig::Rig;

/// Settings for the sail force model.
#[derive(Debug, Clone, Copy)]
pub struct AeroConfig {
    pub air_density: MassDensity,
    pub wind_triangle: WindTriangleConfig,
}

impl Default for AeroConfig {
    fn default() -> Self {
        Self {
            air_density: MassDensity::new::<kilogram_per_cubic_meter>(1.225),
            wind_triangle: WindTriangleConfig::default(),
        }
    }
}

/// Full aerodynamic readout at one boat and wind state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AeroState {
    pub apparent: ApparentWind,

    /// Combined lift coefficient after flattening.
    pub cl: f64,

    /// Combined drag coefficient including induced drag.
    pub cd: f64,

    pub lift: Force,

    /// Sail drag plus hull windage.
    pub drag: Force,

    /// Height of the centre of effort above the sheer.
    pub zce: Length,

    pub forces: Forces,
}

/// Aerodynamic force model for one yacht.
///
/// Polars and depowering curves are resolved from the registry when the model
/// is built, so evaluation never looks a table up by name.
#[derive(Debug, Clone)]
pub struct SailForceModel<'a> {
    yacht: &'a Yacht,
    polars: Vec<&'a SailPolar>,
    flat_drag: &'a LinearCurve,
    effective_height: &'a LinearCurve,
    config: AeroConfig,
}

/// One set sail at the current apparent wind.
struct SetSail {
    area: f64,
    vce: f64,
    cl: f64,
    cd: f64,
    kp: f64,
}

impl<'a> SailForceModel<'a> {
    /// Builds the model.
    ///
    /// # Errors
    ///
    /// Returns a [`CalibrationError`] if a sail polar or a depowering curve is
    /// missing from the registry.
    pub fn new(
        yacht: &'a Yacht,
        registry: &'a CalibrationRegistry,
        config: AeroConfig,
    ) -> Result<Self, CalibrationError> {
        let polars = yacht
            .sails()
            .iter()
            .map(|sail| registry.polar(sail.polar()))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            yacht,
            polars,
            flat_drag: registry.curve(names::FLAT_DRAG)?,
            effective_height: registry.curve(names::EFFECTIVE_HEIGHT)?,
            config,
        })
    }

    #[must_use]
    pub fn yacht(&self) -> &'a Yacht {
        self.yacht
    }

    /// Sail forces on the boat.
    ///
    /// # Errors
    ///
    /// See [`SailForceModel::evaluate`].
    pub fn forces(
        &self,
        combination: SailCombination,
        boat: &BoatState,
        wind: &WindState,
        controls: &SailControls,
    ) -> Result<Forces, AeroError> {
        self.evaluate(combination, boat, wind, controls)
            .map(|state| state.forces)
    }

    /// Evaluates the sail plan and returns every intermediate quantity.
    ///
    /// # Errors
    ///
    /// Returns an [`AeroError`] if the controls are out of range, the
    /// combination refers to an unknown sail, or the wind triangle fails.
    pub fn evaluate(
        &self,
        combination: SailCombination,
        boat: &BoatState,
        wind: &WindState,
        controls: &SailControls,
    ) -> Result<AeroState, AeroError> {
        let SailControls {
            flat,
            reef,
            area: area_factor,
        } = *controls;
        if !(flat > 0.0 && flat <= 1.0) {
            return Err(AeroError::Flattening { flat });
        }
        if !(reef > 0.0 && reef <= 1.0) {
            return Err(AeroError::Reef { reef });
        }
        if !(area_factor > 0.0 && area_factor <= 1.0) {
            return Err(AeroError::Area { area: area_factor });
        }

        let apparent = wind_triangle::solve(boat.speed, wind, &self.config.wind_triangle)?;
        let awa = apparent.angle.get::<degree>();
        let aws = apparent.speed.get::<meter_per_second>();

        let set = [
            self.set_sail(combination.main, awa, reef, area_factor)?,
            self.set_sail(combination.other, awa, reef, area_factor)?,
        ];
        let other = &self.yacht.sails()[combination.other];
        let upwind = other.is_upwind();
        let rig = Rig::new(self.yacht.rig(), reef);

        let area: f64 = set.iter().map(|s| s.area).sum();
        let mut cl = set.iter().map(|s| s.cl * s.area).sum::<f64>() / area;
        let mut cd = set.iter().map(|s| s.cd * s.area).sum::<f64>() / area;
        let kpp: f64 = set.iter().map(|s| s.cl * s.cl * s.area * s.kp).sum();

        let heff = rig.effective_height(upwind, self.effective_height.eval(awa.clamp(0.0, 90.0)));
        let parasitic = if area * cl * cl == 0.0 {
            0.0
        } else {
            kpp / (area * cl * cl)
        };
        let induced = if heff == 0.0 {
            0.0
        } else {
            area / (PI * heff * heff)
        };
        let ce = parasitic + induced;

        // Share of drag carried by the headsail, which flattening depowers separately.
        let fcdj = if other.is_jib() && cd * area != 0.0 {
            set[1].cd * set[1].area / (cd * area)
        } else {
            0.0
        };

        let fm = self.flat_drag.eval(flat);
        cd = cd * (flat * fm * fcdj + 1.0 - fcdj) + ce * cl * cl * flat * flat * fm;
        cl *= flat;

        let hull = self.yacht.hull();
        let rho = self.config.air_density.get::<kilogram_per_cubic_meter>();
        let q = 0.5 * rho * aws * aws;
        let awa_rad = awa.to_radians();

        let d = 0.5 * (1.0 - (2.0 * awa_rad).cos());
        let fbav = 0.625 * hull.ff + 0.375 * hull.fa;
        let windage = q * 0.816 * fbav * ((1.0 - d) * hull.boa + d * hull.loa);

        let lift = q * area * cl;
        let drag = q * area * cd + windage;

        let fx = lift * awa_rad.sin() - drag * awa_rad.cos();
        let side = lift * awa_rad.cos() + drag * awa_rad.sin();

        let zce = rig.flattened(centre_of_effort(&set, upwind, &rig), flat);

        let cos_heel = boat.heel.get::<degree>().to_radians().cos();
        let forces = Forces::from_si(fx, side * cos_heel, side * zce * cos_heel);

        Ok(AeroState {
            apparent,
            cl,
            cd,
            lift: Force::new::<newton>(lift),
            drag: Force::new::<newton>(drag),
            zce: Length::new::<meter>(zce),
            forces,
        })
    }

    fn set_sail(
        &self,
        index: usize,
        awa: f64,
        reef: f64,
        area_factor: f64,
    ) -> Result<SetSail, AeroError> {
        let sail = self
            .yacht
            .sails()
            .get(index)
            .ok_or(AeroError::UnknownSail { index })?;
        let measure = sail.measure(reef, reef);
        let point = self.polars[index].at(awa);
        Ok(SetSail {
            area: measure.area * area_factor,
            vce: measure.vce,
            cl: point.cl,
            cd: point.cd,
            kp: point.kp,
        })
    }
}

/// Force-weighted centre of effort, before flattening.
///
/// Falls back to the area-weighted centre when no sail develops any force.
fn centre_of_effort(set: &[SetSail], upwind: bool, rig: &Rig) -> f64 {
    let weight = |s: &SetSail| s.area * s.cl.hypot(s.cd);
    let total: f64 = set.iter().map(weight).sum();

    let zce = if total > 0.0 {
        set.iter().map(|s| weight(s) * s.vce).sum::<f64>() / total
    } else {
        let area: f64 = set.iter().map(|s| s.area).sum();
        set.iter().map(|s| s.area * s.vce).sum::<f64>() / area
    };

    if upwind {
        zce - rig.hoist_correction
    } else {
        zce
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::f64::{Angle, Velocity};

    use crate::models::sailing::vpp::core::test_support::{
        jib, kite, main, registry, yd41, yd41_with,
    };

    fn wind(tws: f64, twa: f64) -> WindState {
        WindState {
            speed: Velocity::new::<meter_per_second>(tws),
            angle: Angle::new::<degree>(twa),
        }
    }

    const JIB_SET: SailCombination = SailCombination { main: 0, other: 1 };
    const KITE_SET: SailCombination = SailCombination { main: 0, other: 2 };

    #[test]
    fn boat_at_rest_feels_true_wind() {
        let yacht = yd41();
        let registry = registry();
        let model = SailForceModel::new(&yacht, &registry, AeroConfig::default()).unwrap();

        let state = model
            .evaluate(
                JIB_SET,
                &BoatState::from_si(0.0, 0.0, 0.0),
                &wind(5.144, 60.0),
                &SailControls::default(),
            )
            .unwrap();

        assert_eq!(state.apparent.angle.get::<degree>(), 60.0);
        assert_eq!(state.apparent.speed.get::<meter_per_second>(), 5.144);
    }

    #[test]
    fn beam_reach_drives_forward_and_heels() {
        let yacht = yd41();
        let registry = registry();
        let model = SailForceModel::new(&yacht, &registry, AeroConfig::default()).unwrap();

        let state = model
            .evaluate(
                JIB_SET,
                &BoatState::from_si(4.65, 12.7, 1.6),
                &wind(5.144, 90.0),
                &SailControls::default(),
            )
            .unwrap();
        let [fx, fy, mx] = state.forces.to_si();

        assert!(fx > 0.0, "drive {fx}");
        assert!(fy > 0.0, "side force {fy}");
        assert!(mx > 0.0, "heeling moment {mx}");

        // Moment arm is the centre of effort.
        assert_relative_eq!(mx / fy, state.zce.get::<meter>(), epsilon = 1e-12);
        let awa = state.apparent.angle.get::<degree>();
        assert!(awa > 0.0 && awa < 90.0);
    }

    #[test]
    fn heel_scales_side_force_and_moment_only() {
        let yacht = yd41();
        let registry = registry();
        let model = SailForceModel::new(&yacht, &registry, AeroConfig::default()).unwrap();
        let wind = wind(6.0, 50.0);
        let controls = SailControls::default();

        let [fx0, fy0, mx0] = model
            .forces(JIB_SET, &BoatState::from_si(3.0, 0.0, 2.0), &wind, &controls)
            .unwrap()
            .to_si();
        let [fx, fy, mx] = model
            .forces(JIB_SET, &BoatState::from_si(3.0, 20.0, 2.0), &wind, &controls)
            .unwrap()
            .to_si();

        let cos = 20.0_f64.to_radians().cos();
        assert_relative_eq!(fx, fx0, epsilon = 1e-9);
        assert_relative_eq!(fy, fy0 * cos, epsilon = 1e-9);
        assert_relative_eq!(mx, mx0 * cos, epsilon = 1e-9);
    }

    #[test]
    fn flattening_depowers_the_rig() {
        let yacht = yd41();
        let registry = registry();
        let model = SailForceModel::new(&yacht, &registry, AeroConfig::default()).unwrap();
        let boat = BoatState::from_si(3.5, 15.0, 2.0);
        let wind = wind(8.0, 45.0);

        let full = model
            .evaluate(JIB_SET, &boat, &wind, &SailControls::default())
            .unwrap();
        let flat = model
            .evaluate(
                JIB_SET,
                &boat,
                &wind,
                &SailControls {
                    flat: 0.6,
                    ..SailControls::default()
                },
            )
            .unwrap();

        assert_relative_eq!(flat.cl, 0.6 * full.cl, epsilon = 1e-12);
        assert!(flat.cd < full.cd);
        assert!(flat.zce < full.zce);
        assert!(flat.forces.mx < full.forces.mx);
    }

    #[test]
    fn reefing_lowers_area_and_centre_of_effort() {
        let yacht = yd41();
        let registry = registry();
        let model = SailForceModel::new(&yacht, &registry, AeroConfig::default()).unwrap();
        let boat = BoatState::from_si(3.5, 15.0, 2.0);
        let wind = wind(8.0, 45.0);

        let full = model
            .evaluate(JIB_SET, &boat, &wind, &SailControls::default())
            .unwrap();
        let reefed = model
            .evaluate(
                JIB_SET,
                &boat,
                &wind,
                &SailControls {
                    reef: 0.8,
                    ..SailControls::default()
                },
            )
            .unwrap();

        assert!(reefed.lift < full.lift);
        assert!(reefed.zce < full.zce);
        assert!(reefed.forces.mx < full.forces.mx);
    }

    #[test]
    fn area_factor_shrinks_the_kite_too() {
        let yacht = yd41();
        let registry = registry();
        let model = SailForceModel::new(&yacht, &registry, AeroConfig::default()).unwrap();
        let boat = BoatState::from_si(4.0, 10.0, 1.0);
        let wind = wind(8.0, 110.0);

        let full = model
            .evaluate(KITE_SET, &boat, &wind, &SailControls::default())
            .unwrap();
        let half = model
            .evaluate(
                KITE_SET,
                &boat,
                &wind,
                &SailControls {
                    area: 0.5,
                    ..SailControls::default()
                },
            )
            .unwrap();

        assert_relative_eq!(half.cl, full.cl, epsilon = 1e-12);
        assert_relative_eq!((half.lift / full.lift).value, 0.5, epsilon = 1e-12);
        assert_relative_eq!(half.zce.get::<meter>(), full.zce.get::<meter>(), epsilon = 1e-12);
        assert!(half.forces.mx < full.forces.mx);
    }

    #[test]
    fn heel_to_either_side_gives_the_same_forces() {
        let yacht = yd41();
        let registry = registry();
        let model = SailForceModel::new(&yacht, &registry, AeroConfig::default()).unwrap();
        let wind = wind(6.0, 170.0);
        let controls = SailControls::default();

        let port = model
            .forces(KITE_SET, &BoatState::from_si(3.0, -6.0, -1.0), &wind, &controls)
            .unwrap();
        let starboard = model
            .forces(KITE_SET, &BoatState::from_si(3.0, 6.0, 1.0), &wind, &controls)
            .unwrap();

        assert_eq!(port, starboard);
    }

    #[test]
    fn upwind_centre_of_effort_carries_the_hoist_correction() {
        let yacht = yd41();
        let registry = registry();
        let model = SailForceModel::new(&yacht, &registry, AeroConfig::default()).unwrap();
        let boat = BoatState::from_si(3.0, 10.0, 2.0);
        let wind = wind(6.0, 45.0);
        let controls = SailControls::default();

        let state = model.evaluate(JIB_SET, &boat, &wind, &controls).unwrap();
        let awa = state.apparent.angle.get::<degree>();

        let sails = yacht.sails();
        let weighted: Vec<(f64, f64)> = [0, 1]
            .into_iter()
            .map(|i| {
                let p = registry.polar(sails[i].polar()).unwrap().at(awa);
                (sails[i].area() * p.cl.hypot(p.cd), sails[i].vce())
            })
            .collect();
        let total: f64 = weighted.iter().map(|(w, _)| w).sum();
        let expected = weighted.iter().map(|(w, v)| w * v).sum::<f64>() / total - 0.05 * 16.2;

        assert_relative_eq!(state.zce.get::<meter>(), expected, epsilon = 1e-9);
    }

    #[test]
    fn kite_set_keeps_its_own_centre_of_effort() {
        let yacht = yd41();
        let registry = registry();
        let model = SailForceModel::new(&yacht, &registry, AeroConfig::default()).unwrap();

        let state = model
            .evaluate(
                KITE_SET,
                &BoatState::from_si(3.0, 5.0, 1.0),
                &wind(6.0, 120.0),
                &SailControls::default(),
            )
            .unwrap();

        // No hoist correction, so the centre sits between the two sail centres.
        let zce = state.zce.get::<meter>();
        let main_vce = yacht.sails()[0].vce();
        assert!(zce > 9.55_f64.min(main_vce) && zce < 9.55_f64.max(main_vce));
        assert!(state.forces.fx.get::<newton>() > 0.0);
    }

    #[test]
    fn main_with_kite_only_has_masthead_geometry() {
        let yacht = yd41_with(vec![main(), kite()]);
        let registry = registry();
        let model = SailForceModel::new(&yacht, &registry, AeroConfig::default()).unwrap();

        assert!(yacht.rig().foretriangle.is_none());
        let state = model
            .evaluate(
                SailCombination { main: 0, other: 1 },
                &BoatState::from_si(3.0, 5.0, 1.0),
                &wind(6.0, 150.0),
                &SailControls::default(),
            )
            .unwrap();
        assert!(state.forces.fx.get::<newton>() > 0.0);
    }

    #[test]
    fn rejects_out_of_range_controls_and_sails() {
        let yacht = yd41_with(vec![main(), jib()]);
        let registry = registry();
        let model = SailForceModel::new(&yacht, &registry, AeroConfig::default()).unwrap();
        let boat = BoatState::from_si(3.0, 5.0, 1.0);
        let wind = wind(6.0, 60.0);

        assert_eq!(
            model
                .forces(JIB_SET, &boat, &wind, &SailControls { flat: 0.0, ..SailControls::default() })
                .unwrap_err(),
            AeroError::Flattening { flat: 0.0 }
        );
        assert_eq!(
            model
                .forces(JIB_SET, &boat, &wind, &SailControls { reef: 1.5, ..SailControls::default() })
                .unwrap_err(),
            AeroError::Reef { reef: 1.5 }
        );
        assert_eq!(
            model
                .forces(JIB_SET, &boat, &wind, &SailControls { area: 0.0, ..SailControls::default() })
                .unwrap_err(),
            AeroError::Area { area: 0.0 }
        );
        assert_eq!(
            model
                .forces(KITE_SET, &boat, &wind, &SailControls::default())
                .unwrap_err(),
            AeroError::UnknownSail { index: 2 }
        );
    }

    #[test]
    fn missing_polar_fails_at_construction() {
        let yacht = yd41();
        let mut registry = CalibrationRegistry::new();
        registry.insert(names::FLAT_DRAG, LinearCurve::new(vec![0.0, 1.0], vec![0.6, 1.0]).unwrap());

        assert_eq!(
            SailForceModel::new(&yacht, &registry, AeroConfig::default()).unwrap_err(),
            CalibrationError::Missing {
                name: names::MAIN_POLAR.into()
            }
        );
    }
}
