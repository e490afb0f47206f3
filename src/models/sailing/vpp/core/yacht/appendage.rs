use std::f64::consts::PI;

use serde::{Deserialize, Serialize};
use uom::si::{
    area::square_meter,
    f64::{Area, Length, Volume},
    length::meter,
    volume::cubic_meter,
};

use crate::support::constraint::{NonNegative, StrictlyPositive};

use super::super::calibration::names;
use super::ConfigurationError;

/// Appendage dimensions as supplied by configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AppendageParticulars {
    /// Trapezoidal fin keel.
    Keel {
        root_chord: Length,
        tip_chord: Length,
        span: Length,
    },

    /// Trapezoidal spade rudder.
    Rudder {
        root_chord: Length,
        tip_chord: Length,
        span: Length,
    },

    /// Ballast bulb at the keel tip.
    Bulb {
        chord: Length,
        area: Area,
        volume: Volume,
        /// Vertical position of the centre of gravity.
        cg: Length,
    },
}

/// Which kind of body an [`Appendage`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppendageKind {
    Keel,
    Rudder,
    Bulb,
}

/// An appendage with its derived hydrodynamic properties, in SI units.
#[derive(Debug, Clone, PartialEq)]
pub struct Appendage {
    pub kind: AppendageKind,

    /// Mean chord (m).
    pub chord: f64,

    /// Span (m); zero for a bulb.
    pub span: f64,

    /// Planform area (m²).
    pub area: f64,

    /// Wetted area, both faces (m²).
    pub wsa: f64,

    /// Displaced volume (m³).
    pub volume: f64,

    /// Vertical centre-of-effort offset (m), negative below the canoe body.
    pub ce: f64,

    /// Lift-curve slope per radian.
    pub dcl_da: f64,

    /// Lift-curve slope times area (m²).
    pub cla: f64,

    /// Effective span for induced drag (m).
    pub teff: f64,

    /// Friction correction for section thickness.
    pub cof: f64,
}

impl Appendage {
    /// Derives an appendage from its particulars.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if a chord, span, area or volume is
    /// negative or `NaN`, or if a fin has zero chord or span.
    pub fn new(particulars: &AppendageParticulars) -> Result<Self, ConfigurationError> {
        match *particulars {
            AppendageParticulars::Keel {
                root_chord,
                tip_chord,
                span,
            } => Self::fin(AppendageKind::Keel, root_chord, tip_chord, span, 1.2, 1.31),
            AppendageParticulars::Rudder {
                root_chord,
                tip_chord,
                span,
            } => Self::fin(AppendageKind::Rudder, root_chord, tip_chord, span, 1.1, 1.21),
            AppendageParticulars::Bulb {
                chord,
                area,
                volume,
                cg,
            } => {
                let chord = StrictlyPositive::new(chord)
                    .map_err(ConfigurationError::invalid("bulb chord"))?
                    .into_inner()
                    .get::<meter>();
                let area = NonNegative::new(area)
                    .map_err(ConfigurationError::invalid("bulb area"))?
                    .into_inner()
                    .get::<square_meter>();
                let volume = NonNegative::new(volume)
                    .map_err(ConfigurationError::invalid("bulb volume"))?
                    .into_inner()
                    .get::<cubic_meter>();

                Ok(Self::derive(
                    AppendageKind::Bulb,
                    chord,
                    0.0,
                    area,
                    volume,
                    cg.get::<meter>(),
                    1.50,
                ))
            }
        }
    }

    fn fin(
        kind: AppendageKind,
        root_chord: Length,
        tip_chord: Length,
        span: Length,
        thickness: f64,
        cof: f64,
    ) -> Result<Self, ConfigurationError> {
        let (root_field, tip_field, span_field) = match kind {
            AppendageKind::Rudder => ("rudder root chord", "rudder tip chord", "rudder span"),
            _ => ("keel root chord", "keel tip chord", "keel span"),
        };
        let cu = StrictlyPositive::new(root_chord)
            .map_err(ConfigurationError::invalid(root_field))?
            .into_inner()
            .get::<meter>();
        let cl = NonNegative::new(tip_chord)
            .map_err(ConfigurationError::invalid(tip_field))?
            .into_inner()
            .get::<meter>();
        let span = StrictlyPositive::new(span)
            .map_err(ConfigurationError::invalid(span_field))?
            .into_inner()
            .get::<meter>();

        let chord = 0.5 * (cu + cl);
        let area = chord * span;
        let ce = -span * (cu + 2.0 * cl) / (3.0 * (cu + cl));
        let volume = 0.666 * chord * thickness * span;

        Ok(Self::derive(kind, chord, span, area, volume, ce, cof))
    }

    fn derive(
        kind: AppendageKind,
        chord: f64,
        span: f64,
        area: f64,
        volume: f64,
        ce: f64,
        cof: f64,
    ) -> Self {
        // Same lift-slope form as the canoe body, with span over area as the ratio.
        let dcl_da = if span > 0.0 && area > 0.0 {
            2.0 * PI / (1.0 + 0.5 * span / area)
        } else {
            0.0
        };

        Self {
            kind,
            chord,
            span,
            area,
            wsa: 2.0 * area,
            volume,
            ce,
            dcl_da,
            cla: dcl_da * area,
            teff: 1.8 * span,
            cof,
        }
    }

    /// Name of the residuary-resistance table for this body, if it has one.
    #[must_use]
    pub fn residuary_table(&self) -> Option<&'static str> {
        match self.kind {
            AppendageKind::Keel => Some(names::KEEL_RESIDUARY),
            AppendageKind::Bulb => Some(names::BULB_RESIDUARY),
            AppendageKind::Rudder => None,
        }
    }

    /// Side-force participation factor at heel `phi` degrees.
    ///
    /// The rudder's contribution ramps smoothly from one to two times its area
    /// between upright and 30°. A bulb carries no side force.
    #[must_use]
    pub fn side_force_factor(&self, phi: f64) -> f64 {
        match self.kind {
            AppendageKind::Keel => 1.0,
            AppendageKind::Rudder if phi <= 30.0 => 1.0 + 0.5 * (1.0 - (phi / 30.0 * PI).cos()),
            AppendageKind::Rudder => 1.0,
            AppendageKind::Bulb => 0.0,
        }
    }
}
