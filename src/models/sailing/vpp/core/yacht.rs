//! Yacht particulars and the derived quantities the force models share.

mod appendage;
mod error;
mod sail;

pub use appendage::{Appendage, AppendageKind, AppendageParticulars};
pub use error::ConfigurationError;
pub use sail::{Sail, SailGeometry, SailMeasure, SailParticulars};

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use uom::si::{
    area::square_meter,
    f64::{Area, Length, Mass, Volume},
    length::meter,
    mass::kilogram,
    volume::cubic_meter,
};

use crate::support::constraint::{NonNegative, StrictlyPositive};

/// Standard crew body weight (kg).
pub const CREW_BODY_WEIGHT: f64 = 89.0;

/// Canoe-body particulars as supplied by configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HullParticulars {
    /// Waterline length.
    pub lwl: Length,
    /// Displaced volume of the canoe body.
    pub vol: Volume,
    /// Waterline beam.
    pub bwl: Length,
    /// Canoe-body draft.
    pub tc: Length,
    /// Wetted surface area.
    pub wsa: Area,
    /// Maximum draft including appendages.
    pub tmax: Length,
    /// Maximum section area.
    pub amax: Area,
    /// Total mass.
    pub mass: Mass,
    /// Length overall.
    pub loa: Length,
    /// Beam overall.
    pub boa: Length,
    /// Freeboard forward.
    pub ff: Length,
    /// Freeboard aft.
    pub fa: Length,
}

/// Everything needed to build a [`Yacht`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YachtParticulars {
    pub name: String,
    pub hull: HullParticulars,
    #[serde(default)]
    pub appendages: Vec<AppendageParticulars>,
    pub sails: Vec<SailParticulars>,
}

/// Canoe body with derived quantities, in SI units.
#[derive(Debug, Clone, PartialEq)]
pub struct Hull {
    pub lwl: f64,
    pub vol: f64,
    pub bwl: f64,
    pub tc: f64,
    pub wsa: f64,
    pub tmax: f64,
    pub amax: f64,
    pub mass: f64,
    pub loa: f64,
    pub boa: f64,
    pub ff: f64,
    pub fa: f64,

    /// Length/volume ratio, `lwl / vol^(1/3)`.
    pub lvr: f64,

    /// Beam/draft ratio, `bwl / tc`.
    pub btr: f64,

    /// Rough projected lateral area of the canoe body (m²).
    pub area_proj: f64,

    /// Lift-curve slope times projected area (m²).
    pub cla: f64,

    /// Effective span of the canoe body for induced drag (m).
    pub teff: f64,

    /// Maximum beam estimate (m).
    pub bmax: f64,

    /// Crew weight estimate (kg).
    pub crew_weight: f64,

    /// Crew lever arm (m).
    pub crew_arm: f64,

    /// Vertical arm of the keel side force (m).
    pub keel_arm: f64,
}

impl Hull {
    fn new(p: &HullParticulars) -> Result<Self, ConfigurationError> {
        let positive_length = |value: Length, field| {
            StrictlyPositive::new(value)
                .map_err(ConfigurationError::invalid(field))
                .map(|v| v.into_inner().get::<meter>())
        };
        let freeboard = |value: Length, field| {
            NonNegative::new(value)
                .map_err(ConfigurationError::invalid(field))
                .map(|v| v.into_inner().get::<meter>())
        };
        let positive_area = |value: Area, field| {
            StrictlyPositive::new(value)
                .map_err(ConfigurationError::invalid(field))
                .map(|v| v.into_inner().get::<square_meter>())
        };

        let lwl = positive_length(p.lwl, "lwl")?;
        let vol = StrictlyPositive::new(p.vol)
            .map_err(ConfigurationError::invalid("vol"))?
            .into_inner()
            .get::<cubic_meter>();
        let bwl = positive_length(p.bwl, "bwl")?;
        let tc = positive_length(p.tc, "tc")?;
        let wsa = positive_area(p.wsa, "wsa")?;
        let tmax = positive_length(p.tmax, "tmax")?;
        let amax = positive_area(p.amax, "amax")?;
        let mass = StrictlyPositive::new(p.mass)
            .map_err(ConfigurationError::invalid("mass"))?
            .into_inner()
            .get::<kilogram>();
        let loa = positive_length(p.loa, "loa")?;
        let boa = positive_length(p.boa, "boa")?;
        let ff = freeboard(p.ff, "ff")?;
        let fa = freeboard(p.fa, "fa")?;

        let area_proj = 0.666 * lwl * tc;
        let bmax = 1.4 * bwl;

        Ok(Self {
            lwl,
            vol,
            bwl,
            tc,
            wsa,
            tmax,
            amax,
            mass,
            loa,
            boa,
            ff,
            fa,
            lvr: lwl / vol.cbrt(),
            btr: bwl / tc,
            area_proj,
            cla: area_proj * 2.0 * PI / (1.0 + 0.5 * area_proj / tc),
            teff: 2.07 * tc,
            bmax,
            crew_weight: 25.8 * lwl.powf(1.4262),
            crew_arm: 0.8 * bmax,
            keel_arm: 0.43 * tmax,
        })
    }
}

/// Rig dimensions that shape the whole sail plan, in metres.
///
/// Taken from the mainsail and the first headsail of the inventory, whichever
/// sails are set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RigDimensions {
    /// Mainsail hoist.
    pub p: f64,

    /// Mainsail roach fraction.
    pub roach: f64,

    /// Boom height above the sheer.
    pub bad: f64,

    /// Foretriangle, if the inventory has a headsail.
    pub foretriangle: Option<Foretriangle>,
}

/// Headsail foretriangle dimensions, in metres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Foretriangle {
    pub i: f64,
    pub j: f64,
    pub lpg: f64,
    pub hbi: f64,
}

/// The main paired with one other sail of the inventory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SailCombination {
    /// Index of the mainsail in [`Yacht::sails`].
    pub main: usize,

    /// Index of the paired sail in [`Yacht::sails`].
    pub other: usize,
}

/// A yacht: canoe body, appendages and sail inventory.
///
/// Immutable once built. Force models and the solver borrow it.
#[derive(Debug, Clone, PartialEq)]
pub struct Yacht {
    name: String,
    hull: Hull,
    appendages: Vec<Appendage>,
    sails: Vec<Sail>,
    main: usize,
    rig: RigDimensions,
    combinations: Vec<SailCombination>,
}

impl Yacht {
    /// Builds a yacht and derives its shared quantities.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] on invalid geometry, if the inventory
    /// does not hold exactly one mainsail, or if it holds nothing else.
    pub fn new(particulars: &YachtParticulars) -> Result<Self, ConfigurationError> {
        let hull = Hull::new(&particulars.hull)?;

        let appendages = particulars
            .appendages
            .iter()
            .map(Appendage::new)
            .collect::<Result<Vec<_>, _>>()?;

        let sails = particulars
            .sails
            .iter()
            .map(Sail::new)
            .collect::<Result<Vec<_>, _>>()?;

        let mains: Vec<usize> = sails
            .iter()
            .enumerate()
            .filter_map(|(index, sail)| sail.is_main().then_some(index))
            .collect();
        let main = match mains.as_slice() {
            [] => return Err(ConfigurationError::MissingMain),
            [main] => *main,
            _ => {
                return Err(ConfigurationError::MultipleMains { count: mains.len() });
            }
        };

        let SailGeometry::Main { p, roach, bad, .. } = *sails[main].geometry() else {
            return Err(ConfigurationError::MissingMain);
        };
        let foretriangle = sails.iter().find_map(|sail| match *sail.geometry() {
            SailGeometry::Jib { i, j, lpg, hbi } => Some(Foretriangle { i, j, lpg, hbi }),
            _ => None,
        });
        let rig = RigDimensions {
            p,
            roach,
            bad,
            foretriangle,
        };

        let combinations: Vec<SailCombination> = (0..sails.len())
            .filter(|&other| other != main)
            .map(|other| SailCombination { main, other })
            .collect();
        if combinations.is_empty() {
            return Err(ConfigurationError::NoSecondarySail);
        }

        Ok(Self {
            name: particulars.name.clone(),
            hull,
            appendages,
            sails,
            main,
            rig,
            combinations,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn hull(&self) -> &Hull {
        &self.hull
    }

    #[must_use]
    pub fn appendages(&self) -> &[Appendage] {
        &self.appendages
    }

    #[must_use]
    pub fn sails(&self) -> &[Sail] {
        &self.sails
    }

    /// The mainsail.
    #[must_use]
    pub fn main(&self) -> &Sail {
        &self.sails[self.main]
    }

    /// The first headsail of the inventory, which sets the rig's foretriangle.
    #[must_use]
    pub fn first_jib(&self) -> Option<&Sail> {
        self.sails.iter().find(|sail| sail.is_jib())
    }

    #[must_use]
    pub fn rig(&self) -> &RigDimensions {
        &self.rig
    }

    /// Sail combinations in inventory order, main first in each.
    #[must_use]
    pub fn combinations(&self) -> &[SailCombination] {
        &self.combinations
    }

    /// Display label of a combination, e.g. `"MN1 + J1"`.
    ///
    /// Returns `None` if the combination refers to a sail the yacht does not
    /// carry.
    #[must_use]
    pub fn label(&self, combination: SailCombination) -> Option<String> {
        let main = self.sails.get(combination.main)?;
        let other = self.sails.get(combination.other)?;
        Some(format!("{} + {}", main.name(), other.name()))
    }

    /// Labels of [`Self::combinations`], in the same order.
    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        self.combinations
            .iter()
            .filter_map(|&combination| self.label(combination))
            .collect()
    }

    /// Hydrostatic crew righting moment at heel `phi` degrees.
    ///
    /// Ramps in smoothly between 2.5° and 7.5° of heel.
    #[must_use]
    pub fn crew_righting_moment(&self, phi: f64) -> f64 {
        let hull = &self.hull;
        let full = hull.crew_arm
            * (hull.crew_weight + 0.7 * hull.bmax * CREW_BODY_WEIGHT)
            * phi.to_radians().cos();
        let ramp = if phi <= 7.5 {
            0.5 * (1.0 - ((phi - 2.5).max(0.0) / 5.0 * PI).cos())
        } else {
            1.0
        };
        full * ramp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::models::sailing::vpp::core::test_support::{jib, kite, main, yd41_particulars};

    #[test]
    fn derived_hull_quantities() {
        let yacht = Yacht::new(&yd41_particulars()).unwrap();
        let hull = yacht.hull();

        assert_relative_eq!(hull.lvr, 11.9 / 6.05_f64.cbrt(), epsilon = 1e-12);
        assert_relative_eq!(hull.btr, 7.95, epsilon = 1e-12);
        assert_relative_eq!(hull.area_proj, 0.666 * 11.9 * 0.4, epsilon = 1e-12);
        assert_relative_eq!(hull.teff, 0.828, epsilon = 1e-12);
        assert_relative_eq!(hull.bmax, 4.452, epsilon = 1e-12);
        assert_relative_eq!(hull.crew_arm, 0.8 * 4.452, epsilon = 1e-12);
        assert_relative_eq!(hull.keel_arm, 0.989, epsilon = 1e-12);
        assert_relative_eq!(hull.crew_weight, 25.8 * 11.9_f64.powf(1.4262), epsilon = 1e-9);
    }

    #[test]
    fn combinations_pair_main_with_each_other_sail() {
        let yacht = Yacht::new(&yd41_particulars()).unwrap();
        assert_eq!(yacht.labels(), ["MN1 + J1", "MN1 + A2"]);
        assert_eq!(
            yacht.label(SailCombination { main: 0, other: 2 }).as_deref(),
            Some("MN1 + A2")
        );
        assert_eq!(yacht.label(SailCombination { main: 0, other: 3 }), None);
        assert_eq!(yacht.main().name(), "MN1");
        assert_eq!(yacht.first_jib().map(Sail::name), Some("J1"));
        assert_eq!(
            yacht.rig().foretriangle,
            Some(Foretriangle {
                i: 16.2,
                j: 5.1,
                lpg: 5.4,
                hbi: 1.8
            })
        );
    }

    #[test]
    fn crew_moment_ramps_between_2_5_and_7_5_degrees() {
        let yacht = Yacht::new(&yd41_particulars()).unwrap();
        let full_at = |phi: f64| {
            let hull = yacht.hull();
            hull.crew_arm
                * (hull.crew_weight + 0.7 * hull.bmax * CREW_BODY_WEIGHT)
                * phi.to_radians().cos()
        };

        assert_eq!(yacht.crew_righting_moment(0.0), 0.0);
        assert_eq!(yacht.crew_righting_moment(2.5), 0.0);
        assert_relative_eq!(yacht.crew_righting_moment(5.0), 0.5 * full_at(5.0), epsilon = 1e-9);
        assert_relative_eq!(yacht.crew_righting_moment(7.5), full_at(7.5), epsilon = 1e-9);
        assert_relative_eq!(yacht.crew_righting_moment(20.0), full_at(20.0), epsilon = 1e-9);
    }

    #[test]
    fn inventory_needs_exactly_one_main_and_a_partner() {
        let mut particulars = yd41_particulars();

        particulars.sails = vec![jib(), kite()];
        assert_eq!(
            Yacht::new(&particulars).unwrap_err(),
            ConfigurationError::MissingMain
        );

        particulars.sails = vec![main(), main(), jib()];
        assert_eq!(
            Yacht::new(&particulars).unwrap_err(),
            ConfigurationError::MultipleMains { count: 2 }
        );

        particulars.sails = vec![main()];
        assert_eq!(
            Yacht::new(&particulars).unwrap_err(),
            ConfigurationError::NoSecondarySail
        );
    }

    #[test]
    fn rejects_invalid_hull_particulars() {
        let mut particulars = yd41_particulars();
        particulars.hull.mass = Mass::new::<kilogram>(-6500.0);
        assert!(matches!(
            Yacht::new(&particulars).unwrap_err(),
            ConfigurationError::InvalidParticular { field: "mass", .. }
        ));

        let mut particulars = yd41_particulars();
        particulars.hull.tc = Length::new::<meter>(f64::NAN);
        assert!(matches!(
            Yacht::new(&particulars).unwrap_err(),
            ConfigurationError::InvalidParticular { field: "tc", .. }
        ));
    }

    #[test]
    fn particulars_deserialize_from_json() {
        let json = r#"{
            "name": "YD41",
            "hull": {
                "lwl": 11.9, "vol": 6.05, "bwl": 3.18, "tc": 0.4, "wsa": 28.2,
                "tmax": 2.3, "amax": 1.051, "mass": 6500.0,
                "loa": 12.5, "boa": 4.2, "ff": 1.5, "fa": 1.5
            },
            "appendages": [
                { "type": "keel", "root_chord": 1.0, "tip_chord": 0.78, "span": 1.9 },
                { "type": "rudder", "root_chord": 0.48, "tip_chord": 0.22, "span": 1.15 }
            ],
            "sails": [
                { "type": "main", "name": "MN1", "p": 16.6, "e": 5.6, "roach": 0.1, "bad": 1.0 },
                { "type": "jib", "name": "J1", "i": 16.2, "j": 5.1, "lpg": 5.4, "hbi": 1.8 },
                { "type": "kite", "name": "A2", "area": 150.0, "vce": 9.55 }
            ]
        }"#;

        let particulars: YachtParticulars = serde_json::from_str(json).unwrap();
        assert_eq!(particulars, yd41_particulars());
    }
}
