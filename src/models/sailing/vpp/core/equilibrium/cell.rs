//! One equilibrium solve, with heel-limit derating.

use uom::si::{
    angle::degree,
    f64::{Angle, Velocity},
    velocity::meter_per_second,
};

use crate::support::levenberg_marquardt::{self, Status};

use super::{
    CellError, SolverConfig,
    problem::{BalanceModel, BalanceProblem},
};
use super::super::{
    aero::SailForceModel,
    hydro::HullForceModel,
    state::{BoatState, EquilibriumState, SailControls, WindState},
    yacht::SailCombination,
};

/// A single point of sail to solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointOfSail {
    pub tws: Velocity,
    pub twa: Angle,
    pub combination: SailCombination,
}

/// Outcome of one equilibrium solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellSolution {
    pub state: EquilibriumState,

    /// Sail minus hull `(fx, fy, mx)` at the state, in N and N·m.
    pub imbalance: [f64; 3],

    pub status: Status,

    /// Solver iterations summed over derate steps.
    pub iters: usize,

    /// Derate steps taken.
    pub derate_steps: usize,

    /// Derating could not bring the heel within the limit.
    pub heel_limited: bool,
}

impl CellSolution {
    /// True if the balance was met within the heel limit.
    ///
    /// A heel-limited cell never counts as converged, even though its own
    /// balance may have been met.
    #[must_use]
    pub fn converged(&self) -> bool {
        self.balanced() && !self.heel_limited
    }

    fn balanced(&self) -> bool {
        self.status == Status::Converged
    }
}

/// Starting state for a cell with no converged neighbour.
pub(super) fn closed_form_seed(tws: Velocity, twa: Angle) -> BoatState {
    let twa = twa.get::<degree>();
    BoatState::from_si(
        0.8 * tws.get::<meter_per_second>(),
        5.0,
        (100.0 / twa).clamp(1.0, 10.0),
    )
}

/// Models and settings shared by every cell of a run.
pub(super) struct CellSolver<'m, 'a> {
    pub aero: &'m SailForceModel<'a>,
    pub hydro: &'m HullForceModel<'a>,
    pub config: &'m SolverConfig,
}

impl CellSolver<'_, '_> {
    /// Solves the balance from `seed`, derating while the boat heels too far.
    ///
    /// Each derate step shrinks the area of every set sail and restarts from
    /// the previous solution. If the heel is still over the limit once the
    /// steps or the minimum area run out, or a derated solve fails, the last
    /// balanced over-heeled state is returned flagged as heel-limited.
    pub(super) fn solve(
        &self,
        combination: SailCombination,
        wind: &WindState,
        seed: BoatState,
    ) -> Result<CellSolution, CellError> {
        let config = self.config;
        let policy = config.derate;
        let max_heel = config.max_heel.get::<degree>();
        let flat = config.flattening.at(wind.speed);

        let mut area: f64 = 1.0;
        let mut start = seed;
        let mut iters = 0;
        let mut best: Option<CellSolution> = None;
        let mut step = 0;

        loop {
            let controls = SailControls {
                flat,
                area,
                ..SailControls::default()
            };

            let attempt = self.balance(combination, wind, controls, start);
            let cell = match (attempt, best) {
                (Ok(cell), _) if cell.balanced() => cell,
                (_, Some(previous)) => {
                    return Ok(CellSolution {
                        heel_limited: true,
                        ..previous
                    });
                }
                (attempt, None) => return attempt,
            };

            iters += cell.iters;
            let cell = CellSolution {
                iters,
                derate_steps: step,
                ..cell
            };

            if cell.state.heel.get::<degree>().abs() <= max_heel {
                return Ok(cell);
            }

            let next = (area * policy.factor).max(policy.min_area);
            if step == policy.max_steps || next >= area {
                return Ok(CellSolution {
                    heel_limited: true,
                    ..cell
                });
            }

            area = next;
            start = cell.state.boat();
            best = Some(cell);
            step += 1;
        }
    }

    fn balance(
        &self,
        combination: SailCombination,
        wind: &WindState,
        controls: SailControls,
        seed: BoatState,
    ) -> Result<CellSolution, CellError> {
        let model = BalanceModel {
            aero: self.aero,
            hydro: self.hydro,
            combination,
            wind: *wind,
            controls,
        };
        let problem = BalanceProblem {
            scale: self.config.residual_scale(),
        };

        let solution = levenberg_marquardt::solve(
            &model,
            &problem,
            seed.to_si(),
            &self.config.bounds,
            &self.config.levenberg_marquardt,
        )?;

        Ok(CellSolution {
            state: EquilibriumState::new(solution.input, controls),
            imbalance: solution.output.imbalance(),
            status: solution.status,
            iters: solution.iters,
            derate_steps: 0,
            heel_limited: false,
        })
    }
}
