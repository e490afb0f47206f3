use serde::{Deserialize, Serialize};
use uom::si::{
    area::square_meter,
    f64::{Area, Length},
    length::meter,
};

use crate::support::constraint::{NonNegative, StrictlyPositive};

use super::super::calibration::names;
use super::ConfigurationError;

/// Sail dimensions as supplied by configuration.
///
/// `polar` overrides the calibration table used for lift and drag; by default
/// each sail type uses its own built-in polar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SailParticulars {
    Main {
        name: String,
        /// Mainsail hoist.
        p: Length,
        /// Boom length.
        e: Length,
        /// Roach as a fraction of the triangular area.
        roach: f64,
        /// Boom height above the sheer.
        bad: Length,
        #[serde(default)]
        polar: Option<String>,
    },
    Jib {
        name: String,
        /// Foretriangle height.
        i: Length,
        /// Foretriangle base.
        j: Length,
        /// Luff perpendicular.
        lpg: Length,
        /// Height of the foretriangle base above the sheer.
        hbi: Length,
        #[serde(default)]
        polar: Option<String>,
    },
    Kite {
        name: String,
        area: Area,
        /// Vertical centre of effort above the sheer.
        vce: Length,
        #[serde(default)]
        polar: Option<String>,
    },
}

/// Sail geometry by type, in metres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SailGeometry {
    Main { p: f64, e: f64, roach: f64, bad: f64 },
    Jib { i: f64, j: f64, lpg: f64, hbi: f64 },
    Kite { area: f64, vce: f64 },
}

/// Effective area and centre of effort after reefing or furling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SailMeasure {
    /// Area (m²).
    pub area: f64,

    /// Vertical centre of effort above the sheer (m).
    pub vce: f64,
}

/// A sail of the inventory.
#[derive(Debug, Clone, PartialEq)]
pub struct Sail {
    name: String,
    geometry: SailGeometry,
    polar: String,
    full: SailMeasure,
}

impl Sail {
    /// Derives a sail from its particulars.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if a dimension is not strictly
    /// positive or the roach is negative.
    pub fn new(particulars: &SailParticulars) -> Result<Self, ConfigurationError> {
        let (name, geometry, polar) = match particulars {
            SailParticulars::Main {
                name,
                p,
                e,
                roach,
                bad,
                polar,
            } => (
                name,
                SailGeometry::Main {
                    p: positive(*p, "main P")?,
                    e: positive(*e, "main E")?,
                    roach: NonNegative::new(*roach)
                        .map_err(ConfigurationError::invalid("main roach"))?
                        .into_inner(),
                    bad: non_negative(*bad, "main BAD")?,
                },
                polar.as_deref().unwrap_or(names::MAIN_POLAR),
            ),
            SailParticulars::Jib {
                name,
                i,
                j,
                lpg,
                hbi,
                polar,
            } => (
                name,
                SailGeometry::Jib {
                    i: positive(*i, "jib I")?,
                    j: positive(*j, "jib J")?,
                    lpg: positive(*lpg, "jib LPG")?,
                    hbi: non_negative(*hbi, "jib HBI")?,
                },
                polar.as_deref().unwrap_or(names::JIB_POLAR),
            ),
            SailParticulars::Kite {
                name,
                area,
                vce,
                polar,
            } => (
                name,
                SailGeometry::Kite {
                    area: StrictlyPositive::new(*area)
                        .map_err(ConfigurationError::invalid("kite area"))?
                        .into_inner()
                        .get::<square_meter>(),
                    vce: positive(*vce, "kite vce")?,
                },
                polar.as_deref().unwrap_or(names::KITE_POLAR),
            ),
        };

        Ok(Self {
            name: name.clone(),
            geometry,
            polar: polar.to_owned(),
            full: measure(&geometry, 1.0, 1.0),
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn geometry(&self) -> &SailGeometry {
        &self.geometry
    }

    /// Name of the polar table for this sail.
    #[must_use]
    pub fn polar(&self) -> &str {
        &self.polar
    }

    /// True for sails set when sailing upwind (main and headsails).
    #[must_use]
    pub fn is_upwind(&self) -> bool {
        !matches!(self.geometry, SailGeometry::Kite { .. })
    }

    #[must_use]
    pub fn is_main(&self) -> bool {
        matches!(self.geometry, SailGeometry::Main { .. })
    }

    #[must_use]
    pub fn is_jib(&self) -> bool {
        matches!(self.geometry, SailGeometry::Jib { .. })
    }

    /// Full-hoist area (m²).
    #[must_use]
    pub fn area(&self) -> f64 {
        self.full.area
    }

    /// Full-hoist vertical centre of effort (m).
    #[must_use]
    pub fn vce(&self) -> f64 {
        self.full.vce
    }

    /// Area and centre of effort with the main reefed and the jib furled.
    ///
    /// `reef` scales the main hoist and `furl` the jib's foretriangle, so area
    /// goes with their squares. Downwind sails are unaffected.
    #[must_use]
    pub fn measure(&self, reef: f64, furl: f64) -> SailMeasure {
        measure(&self.geometry, reef, furl)
    }
}

fn measure(geometry: &SailGeometry, reef: f64, furl: f64) -> SailMeasure {
    match *geometry {
        SailGeometry::Main { p, e, roach, bad } => {
            let p_r = p * reef;
            SailMeasure {
                area: 0.5 * p * e * (1.0 + roach) * reef * reef,
                vce: p_r / 3.0 * (1.0 + roach) + bad,
            }
        }
        SailGeometry::Jib { i, j, lpg, hbi } => {
            let (i_r, j_r, lpg_r) = (i * furl, j * furl, lpg * furl);
            SailMeasure {
                area: 0.5 * i_r * j_r.max(lpg_r),
                vce: i_r / 3.0 + hbi,
            }
        }
        SailGeometry::Kite { area, vce } => SailMeasure { area, vce },
    }
}

fn positive(value: Length, field: &'static str) -> Result<f64, ConfigurationError> {
    Ok(StrictlyPositive::new(value)
        .map_err(ConfigurationError::invalid(field))?
        .into_inner()
        .get::<meter>())
}

fn non_negative(value: Length, field: &'static str) -> Result<f64, ConfigurationError> {
    Ok(NonNegative::new(value)
        .map_err(ConfigurationError::invalid(field))?
        .into_inner()
        .get::<meter>())
}
