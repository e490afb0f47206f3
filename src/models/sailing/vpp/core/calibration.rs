//! Named calibration tables.
//!
//! Every empirical input to the force models (sail polars, the hydrostatic
//! righting arm, residuary-resistance surfaces, depowering curves) is a table
//! looked up by name. The [`CalibrationRegistry`] is populated once, before
//! any model is built, and is only read afterwards. Force models resolve the
//! tables they need when they are constructed and keep plain references.

mod builtin;
mod error;

pub use error::CalibrationError;

use std::collections::BTreeMap;

use crate::support::interp::{LinearCurve, TrilinearCube};

/// Table names used by the force models.
pub mod names {
    /// Hydrostatic righting arm (m) against heel (deg).
    pub const RIGHTING_ARM: &str = "rm";

    /// Keel residuary coefficient against Froude number.
    pub const KEEL_RESIDUARY: &str = "rrk_keel";

    /// Bulb residuary coefficient against Froude number.
    pub const BULB_RESIDUARY: &str = "rrk_bulb";

    /// Drag multiplier against flattening.
    pub const FLAT_DRAG: &str = "fcdmult";

    /// Effective-height factor against apparent wind angle (deg).
    pub const EFFECTIVE_HEIGHT: &str = "kheff";

    /// Hull residuary resistance over (Froude number, beam/draft, length/volume).
    pub const HULL_RESIDUARY: &str = "residuary";

    /// Default polar for mainsails.
    pub const MAIN_POLAR: &str = "main";

    /// Default polar for headsails.
    pub const JIB_POLAR: &str = "jib";

    /// Default polar for downwind sails.
    pub const KITE_POLAR: &str = "kite";
}

/// Lift and drag coefficients of one sail against apparent wind angle.
#[derive(Debug, Clone, PartialEq)]
pub struct SailPolar {
    kp: f64,
    cl: LinearCurve,
    cd: LinearCurve,
}

/// Coefficients read from a [`SailPolar`] at one apparent wind angle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolarPoint {
    /// Lift coefficient.
    pub cl: f64,

    /// Drag coefficient.
    pub cd: f64,

    /// Viscous quadratic parasitic-drag parameter.
    pub kp: f64,
}

impl SailPolar {
    /// Builds a polar from its parasitic-drag parameter and coefficient curves.
    ///
    /// Both curves are indexed by apparent wind angle in degrees.
    #[must_use]
    pub fn new(kp: f64, cl: LinearCurve, cd: LinearCurve) -> Self {
        Self { kp, cl, cd }
    }

    /// Reads the polar at `awa` degrees, clamped to `[0, 180]`.
    #[must_use]
    pub fn at(&self, awa: f64) -> PolarPoint {
        let awa = awa.clamp(0.0, 180.0);
        PolarPoint {
            cl: self.cl.eval(awa),
            cd: self.cd.eval(awa),
            kp: self.kp,
        }
    }
}

/// A calibration table of any supported shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Table {
    /// One independent variable.
    Curve(LinearCurve),

    /// Lift and drag against apparent wind angle.
    Polar(SailPolar),

    /// Three independent variables.
    Cube(TrilinearCube),
}

impl Table {
    fn kind(&self) -> &'static str {
        match self {
            Table::Curve(_) => "curve",
            Table::Polar(_) => "polar",
            Table::Cube(_) => "cube",
        }
    }
}

impl From<LinearCurve> for Table {
    fn from(curve: LinearCurve) -> Self {
        Table::Curve(curve)
    }
}

impl From<SailPolar> for Table {
    fn from(polar: SailPolar) -> Self {
        Table::Polar(polar)
    }
}

impl From<TrilinearCube> for Table {
    fn from(cube: TrilinearCube) -> Self {
        Table::Cube(cube)
    }
}

/// Read-only map from table name to interpolation table.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalibrationRegistry {
    tables: BTreeMap<String, Table>,
}

impl CalibrationRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry holding the built-in calibration set.
    ///
    /// # Errors
    ///
    /// Returns a [`CalibrationError`] if a built-in table fails validation.
    pub fn builtin() -> Result<Self, CalibrationError> {
        builtin::registry()
    }

    /// Adds or replaces a table, returning the previous one under that name.
    pub fn insert(&mut self, name: impl Into<String>, table: impl Into<Table>) -> Option<Table> {
        self.tables.insert(name.into(), table.into())
    }

    /// True if a table with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// Iterates over table names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    /// Looks up a 1-D table.
    ///
    /// # Errors
    ///
    /// Returns a [`CalibrationError`] if the table is missing or not a curve.
    pub fn curve(&self, name: &str) -> Result<&LinearCurve, CalibrationError> {
        match self.get(name)? {
            Table::Curve(curve) => Ok(curve),
            other => Err(wrong_kind(name, "curve", other)),
        }
    }

    /// Looks up a sail polar.
    ///
    /// # Errors
    ///
    /// Returns a [`CalibrationError`] if the table is missing or not a polar.
    pub fn polar(&self, name: &str) -> Result<&SailPolar, CalibrationError> {
        match self.get(name)? {
            Table::Polar(polar) => Ok(polar),
            other => Err(wrong_kind(name, "polar", other)),
        }
    }

    /// Looks up a 3-D table.
    ///
    /// # Errors
    ///
    /// Returns a [`CalibrationError`] if the table is missing or not a cube.
    pub fn cube(&self, name: &str) -> Result<&TrilinearCube, CalibrationError> {
        match self.get(name)? {
            Table::Cube(cube) => Ok(cube),
            other => Err(wrong_kind(name, "cube", other)),
        }
    }

    /// Evaluates a curve or cube by name, extrapolating outside its domain.
    ///
    /// A curve takes one coordinate and a cube takes three. Polars return
    /// several coefficients at once and are read through [`Self::polar`].
    ///
    /// # Errors
    ///
    /// Returns a [`CalibrationError`] if the table is missing, is a polar, or
    /// the coordinate count does not match its dimension.
    pub fn lookup(&self, name: &str, coords: &[f64]) -> Result<f64, CalibrationError> {
        match (self.get(name)?, coords) {
            (Table::Curve(curve), &[x]) => Ok(curve.eval(x)),
            (Table::Cube(cube), &[x, y, z]) => Ok(cube.eval([x, y, z])),
            (Table::Curve(_), _) => Err(CalibrationError::Dimension {
                name: name.to_owned(),
                expected: 1,
                found: coords.len(),
            }),
            (Table::Cube(_), _) => Err(CalibrationError::Dimension {
                name: name.to_owned(),
                expected: 3,
                found: coords.len(),
            }),
            (other @ Table::Polar(_), _) => Err(wrong_kind(name, "curve or cube", other)),
        }
    }

    fn get(&self, name: &str) -> Result<&Table, CalibrationError> {
        self.tables
            .get(name)
            .ok_or_else(|| CalibrationError::Missing {
                name: name.to_owned(),
            })
    }
}

fn wrong_kind(name: &str, expected: &'static str, found: &Table) -> CalibrationError {
    CalibrationError::WrongKind {
        name: name.to_owned(),
        expected,
        found: found.kind(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn residuary_cube_reproduces_its_corners() {
        let registry = CalibrationRegistry::builtin().unwrap();
        let corners = [
            ([0.125, 3.0, 2.5], 0.0487),
            ([0.125, 3.0, 9.0], 0.0487),
            ([0.125, 9.0, 2.5], 0.0393),
            ([0.125, 9.0, 9.0], 0.0613),
            ([0.700, 3.0, 2.5], 357.062),
            ([0.700, 3.0, 9.0], 357.062),
            ([0.700, 9.0, 2.5], 38.0526),
            ([0.700, 9.0, 9.0], 42.2353),
        ];

        for (coords, expected) in corners {
            let value = registry
                .lookup(names::HULL_RESIDUARY, &coords)
                .unwrap();
            assert_relative_eq!(value, expected, max_relative = 1e-12);
        }
    }

    #[test]
    fn curves_extrapolate_instead_of_rejecting() {
        let registry = CalibrationRegistry::builtin().unwrap();
        let kheff = registry.curve(names::EFFECTIVE_HEIGHT).unwrap();
        let (lo, hi) = kheff.axis().domain();

        let slope = kheff.eval(hi) - kheff.eval(hi - 1.0);
        assert_relative_eq!(kheff.eval(hi + 1.0), kheff.eval(hi) + slope, epsilon = 1e-12);
        assert!(registry.lookup(names::EFFECTIVE_HEIGHT, &[lo - 10.0]).is_ok());
    }

    #[test]
    fn polars_clamp_apparent_wind_angle() {
        let registry = CalibrationRegistry::builtin().unwrap();
        let main = registry.polar(names::MAIN_POLAR).unwrap();
        assert_eq!(main.at(-20.0), main.at(0.0));
        assert_eq!(main.at(200.0), main.at(180.0));
        assert!(main.at(45.0).cl > 1.0);
    }

    #[test]
    fn lookup_reports_misuse() {
        let registry = CalibrationRegistry::builtin().unwrap();

        assert_eq!(
            registry.lookup("nope", &[0.0]).unwrap_err(),
            CalibrationError::Missing {
                name: "nope".into()
            }
        );
        assert_eq!(
            registry.lookup(names::RIGHTING_ARM, &[1.0, 2.0]).unwrap_err(),
            CalibrationError::Dimension {
                name: names::RIGHTING_ARM.into(),
                expected: 1,
                found: 2
            }
        );
        assert!(matches!(
            registry.cube(names::MAIN_POLAR),
            Err(CalibrationError::WrongKind {
                expected: "cube",
                found: "polar",
                ..
            })
        ));
    }

    #[test]
    fn insert_replaces_by_name() {
        let mut registry = CalibrationRegistry::builtin().unwrap();
        let flat = LinearCurve::new(vec![0.0, 90.0], vec![1.0, 1.0]).unwrap();

        let previous = registry.insert(names::EFFECTIVE_HEIGHT, flat);
        assert!(matches!(previous, Some(Table::Curve(_))));
        assert_relative_eq!(
            registry.lookup(names::EFFECTIVE_HEIGHT, &[80.0]).unwrap(),
            1.0
        );
    }
}
