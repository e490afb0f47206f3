use crate::models::sailing::vpp::core::yacht::RigDimensions;

/// Sail-plan quantities at one reef setting, in metres.
///
/// Reefing shortens the main hoist and the foretriangle alike. Without a
/// headsail the rig behaves as a masthead rig with no overlap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Rig {
    /// Foretriangle height over main hoist plus boom height.
    pub fractionality: f64,

    /// Rig height used for the effective span.
    pub height: f64,

    /// Foretriangle base above the sheer.
    pub hbi: f64,

    /// Span correction for upwind sets.
    pub span_correction: f64,

    /// Effective height of a downwind set.
    pub max_spinnaker_height: f64,

    /// Centre-of-effort offset applied to upwind sets.
    pub hoist_correction: f64,
}

impl Rig {
    pub(super) fn new(dims: &RigDimensions, reef: f64) -> Self {
        let p = dims.p * reef;
        let hoist = p + dims.bad;

        let (fractionality, overlap, i, hbi) = match dims.foretriangle {
            Some(ft) => {
                let i = ft.i * reef;
                (i / hoist, ft.lpg / ft.j, i, ft.hbi)
            }
            None => (1.0, 0.0, 0.0, 0.0),
        };

        let span_correction = 1.1
            + 0.08 * (dims.roach - 0.2)
            + 0.5 * (0.68 + 0.31 * fractionality + 0.0075 * overlap - 1.1);
        let top = (0.16 * (1.0 - 0.024) / p + 0.94) * p + dims.bad;

        Self {
            fractionality,
            height: hoist.max(i),
            hbi,
            span_correction,
            max_spinnaker_height: (top + hbi).max(0.0),
            hoist_correction: 0.05 * i,
        }
    }

    /// Effective height for induced drag.
    ///
    /// `kheff` is the effective-height factor at the current apparent wind
    /// angle and only matters for upwind sets.
    pub(super) fn effective_height(&self, upwind: bool, kheff: f64) -> f64 {
        let factor = if upwind {
            self.span_correction * kheff
        } else {
            self.max_spinnaker_height / self.height
        };
        (self.height + self.hbi) * factor
    }

    /// Scales a centre-of-effort height for flattening.
    pub(super) fn flattened(&self, zce: f64, flat: f64) -> f64 {
        zce * (1.0 - 0.203 * (1.0 - flat) - 0.451 * (1.0 - flat) * (1.0 - self.fractionality))
    }
}
