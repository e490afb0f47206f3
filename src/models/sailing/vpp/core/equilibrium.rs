//! Equilibrium solver over a wind grid.
//!
//! For every true wind speed and sail combination, the true wind angles of
//! the analysis are solved in order as a chain: the first solvable angle is
//! seeded from a closed-form guess, each later angle from the previous
//! converged cell. Chains are independent of each other, so they can run in
//! any order or in parallel, and their cells land in disjoint grid slots.
//!
//! A cell that fails never aborts the run; it is recorded as a
//! [`ConvergenceWarning`] and left unconverged or empty. A cell still heeled
//! past the limit after derating is kept, but never counted as converged.

mod cell;
mod config;
mod error;
mod problem;
mod report;

pub use cell::{CellSolution, PointOfSail};
pub use config::{DeratePolicy, FlatteningSchedule, SolverConfig, VppConfig};
pub use error::{CellError, RunError};
pub use report::{AnalysisAxis, ConvergenceFailure, ConvergenceWarning, RangeWarning, RunReport};

use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info, warn};
use twine_core::Model;
use uom::si::{angle::degree, f64::Angle};

use crate::support::units::{degrees, from_knots, to_knots};

use super::{
    aero::SailForceModel,
    calibration::CalibrationRegistry,
    hydro::HullForceModel,
    results::{CellResult, ResultGrid, VppResults},
    state::WindState,
    yacht::{ConfigurationError, SailCombination, Yacht},
};

use cell::{CellSolver, closed_form_seed};

/// Wind speeds and angles of an analysis, after range checks.
#[derive(Debug, Clone, PartialEq)]
struct Analysis {
    tws: Vec<f64>,
    twa: Vec<f64>,
}

/// One solved chain: a wind speed, a sail combination and its cells by angle.
struct Chain {
    tws: usize,
    combination: usize,
    cells: Vec<(usize, Option<CellResult>)>,
    warnings: Vec<ConvergenceWarning>,
    attempted: usize,
    skipped: usize,
    cancelled: bool,
}

/// Predicts boat speed, heel and leeway across a wind grid.
///
/// Drive it as construct, [`set_analysis`](Self::set_analysis),
/// [`run`](Self::run), then [`results`](Self::results).
#[derive(Debug)]
pub struct EquilibriumSolver<'a> {
    yacht: &'a Yacht,
    aero: SailForceModel<'a>,
    hydro: HullForceModel<'a>,
    config: SolverConfig,
    labels: Vec<String>,
    analysis: Option<Analysis>,
    grid: Option<ResultGrid>,
}

impl<'a> EquilibriumSolver<'a> {
    /// Builds a solver with default settings.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if a calibration table is missing.
    pub fn new(
        yacht: &'a Yacht,
        registry: &'a CalibrationRegistry,
    ) -> Result<Self, ConfigurationError> {
        Self::with_config(yacht, registry, VppConfig::default())
    }

    /// Builds a solver with the given model and solver settings.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigurationError`] if a calibration table is missing.
    pub fn with_config(
        yacht: &'a Yacht,
        registry: &'a CalibrationRegistry,
        config: VppConfig,
    ) -> Result<Self, ConfigurationError> {
        Ok(Self {
            yacht,
            aero: SailForceModel::new(yacht, registry, config.aero)?,
            hydro: HullForceModel::new(yacht, registry, config.hydro)?,
            config: config.solver,
            labels: yacht.labels(),
            analysis: None,
            grid: None,
        })
    }

    #[must_use]
    pub fn aero(&self) -> &SailForceModel<'a> {
        &self.aero
    }

    #[must_use]
    pub fn hydro(&self) -> &HullForceModel<'a> {
        &self.hydro
    }

    #[must_use]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Sets the wind speeds (knots) and angles (degrees) to analyse.
    ///
    /// Values outside the accepted ranges are dropped, never clamped, and
    /// returned as warnings. Any previous results are discarded.
    pub fn set_analysis(&mut self, tws_knots: &[f64], twa_deg: &[f64]) -> Vec<RangeWarning> {
        let tws_range = (to_knots(self.config.min_tws), to_knots(self.config.max_tws));
        let twa_range = (0.0, 180.0);

        let mut warnings = Vec::new();
        let mut keep = |axis: AnalysisAxis, values: &[f64], (lo, hi): (f64, f64)| -> Vec<f64> {
            values
                .iter()
                .copied()
                .filter(|&value| {
                    let inside = (lo..=hi).contains(&value);
                    if !inside {
                        warn!(?axis, value, lo, hi, "analysis point out of range, excluded");
                        warnings.push(RangeWarning {
                            axis,
                            value,
                            range: (lo, hi),
                        });
                    }
                    inside
                })
                .collect()
        };

        let tws = keep(AnalysisAxis::Tws, tws_knots, tws_range);
        let twa = keep(AnalysisAxis::Twa, twa_deg, twa_range);

        self.analysis = Some(Analysis { tws, twa });
        self.grid = None;
        warnings
    }

    /// Solves every cell of the analysis.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::NoAnalysis`] if no analysis has been set.
    pub fn run(&mut self, verbose: bool) -> Result<RunReport, RunError> {
        self.run_chains(verbose, None, |solver, keys, verbose, cancel| {
            keys.iter()
                .map(|&(i, k)| solver.solve_chain(i, k, verbose, cancel))
                .collect()
        })
    }

    /// Like [`run`](Self::run), but stops between cells once `cancel` is set.
    ///
    /// Cells solved before cancellation are kept.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::NoAnalysis`] if no analysis has been set.
    pub fn run_cancellable(
        &mut self,
        verbose: bool,
        cancel: &AtomicBool,
    ) -> Result<RunReport, RunError> {
        self.run_chains(verbose, Some(cancel), |solver, keys, verbose, cancel| {
            keys.iter()
                .map(|&(i, k)| solver.solve_chain(i, k, verbose, cancel))
                .collect()
        })
    }

    /// Like [`run`](Self::run), with chains solved on the rayon thread pool.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::NoAnalysis`] if no analysis has been set.
    #[cfg(feature = "rayon")]
    pub fn run_parallel(&mut self, verbose: bool) -> Result<RunReport, RunError> {
        use rayon::prelude::*;

        self.run_chains(verbose, None, |solver, keys, verbose, cancel| {
            keys.par_iter()
                .map(|&(i, k)| solver.solve_chain(i, k, verbose, cancel))
                .collect()
        })
    }

    /// The solved grid in serializable form.
    ///
    /// # Errors
    ///
    /// Returns a [`RunError`] if no analysis has been set or it has not run.
    pub fn results(&self) -> Result<VppResults, RunError> {
        Ok(self.grid()?.to_results(self.yacht.name()))
    }

    /// The solved grid.
    ///
    /// # Errors
    ///
    /// Returns a [`RunError`] if no analysis has been set or it has not run.
    pub fn grid(&self) -> Result<&ResultGrid, RunError> {
        match (&self.analysis, &self.grid) {
            (None, _) => Err(RunError::NoAnalysis),
            (Some(_), None) => Err(RunError::NotRun),
            (Some(_), Some(grid)) => Ok(grid),
        }
    }

    fn run_chains<F>(
        &mut self,
        verbose: bool,
        cancel: Option<&AtomicBool>,
        solve: F,
    ) -> Result<RunReport, RunError>
    where
        F: FnOnce(&Self, &[(usize, usize)], bool, Option<&AtomicBool>) -> Vec<Chain>,
    {
        let analysis = self.analysis.as_ref().ok_or(RunError::NoAnalysis)?;
        let combinations = self.yacht.combinations();

        let mut grid = ResultGrid::new(
            analysis.tws.clone(),
            analysis.twa.clone(),
            self.labels.clone(),
        );

        let keys: Vec<(usize, usize)> = (0..analysis.tws.len())
            .flat_map(|i| (0..combinations.len()).map(move |k| (i, k)))
            .collect();

        if verbose {
            info!(
                yacht = self.yacht.name(),
                tws = analysis.tws.len(),
                twa = analysis.twa.len(),
                combinations = combinations.len(),
                "running analysis"
            );
        }

        let chains = solve(self, &keys, verbose, cancel);

        let mut report = RunReport::default();
        for chain in chains {
            for (j, cell) in chain.cells {
                if let Some(cell) = &cell {
                    report.converged += usize::from(cell.converged);
                    report.heel_limited += usize::from(cell.heel_limited);
                }
                grid.set(chain.tws, j, chain.combination, cell);
            }
            report.attempted += chain.attempted;
            report.skipped += chain.skipped;
            report.cancelled |= chain.cancelled;
            report.warnings.extend(chain.warnings);
        }

        if verbose {
            info!(
                attempted = report.attempted,
                converged = report.converged,
                heel_limited = report.heel_limited,
                warnings = report.warnings.len(),
                cancelled = report.cancelled,
                "analysis finished"
            );
        }

        self.grid = Some(grid);
        Ok(report)
    }

    /// Solves the angles of one wind speed and combination in order.
    fn solve_chain(
        &self,
        tws_index: usize,
        combination_index: usize,
        verbose: bool,
        cancel: Option<&AtomicBool>,
    ) -> Chain {
        let mut chain = Chain {
            tws: tws_index,
            combination: combination_index,
            cells: Vec::new(),
            warnings: Vec::new(),
            attempted: 0,
            skipped: 0,
            cancelled: false,
        };
        let Some(analysis) = &self.analysis else {
            return chain;
        };

        let combination = self.yacht.combinations()[combination_index];
        let label = &self.labels[combination_index];
        let tws_knots = analysis.tws[tws_index];
        let tws = from_knots(tws_knots);

        if verbose {
            debug!(tws = tws_knots, combination = %label, "solving chain");
        }

        let mut previous = None;
        for (j, &twa_deg) in analysis.twa.iter().enumerate() {
            if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                chain.cancelled = true;
                break;
            }

            let twa = degrees(twa_deg);
            if !self.suits(combination, twa) {
                chain.skipped += 1;
                continue;
            }
            chain.attempted += 1;

            let wind = WindState {
                speed: tws,
                angle: twa,
            };
            let solver = self.cell_solver();
            let fresh = closed_form_seed(tws, twa);

            let mut outcome = solver.solve(combination, &wind, previous.unwrap_or(fresh));
            let retry = previous.is_some()
                && !matches!(&outcome, Ok(cell) if cell.converged());
            if retry {
                outcome = solver.solve(combination, &wind, fresh);
            }

            let warning = |failure| ConvergenceWarning {
                tws: tws_knots,
                twa: twa_deg,
                combination: label.clone(),
                failure,
            };

            let result = match outcome {
                Ok(cell) if cell.converged() => {
                    previous = Some(cell.state.boat());
                    if verbose {
                        debug!(
                            tws = tws_knots,
                            twa = twa_deg,
                            combination = %label,
                            speed = to_knots(cell.state.speed),
                            heel = cell.state.heel.get::<degree>(),
                            iters = cell.iters,
                            "cell converged"
                        );
                    }
                    Some(CellResult::from(&cell))
                }
                Ok(cell) if cell.heel_limited => {
                    let heel = cell.state.heel.get::<degree>();
                    warn!(
                        tws = tws_knots,
                        twa = twa_deg,
                        combination = %label,
                        heel,
                        derate_steps = cell.derate_steps,
                        "cell over the heel limit after derating"
                    );
                    chain.warnings.push(warning(ConvergenceFailure::HeelLimited {
                        heel,
                        derate_steps: cell.derate_steps,
                    }));
                    Some(CellResult::from(&cell))
                }
                Ok(cell) => {
                    let max_residual = cell
                        .imbalance
                        .iter()
                        .fold(0.0_f64, |acc, r| acc.max(r.abs()));
                    warn!(
                        tws = tws_knots,
                        twa = twa_deg,
                        combination = %label,
                        status = ?cell.status,
                        max_residual,
                        "cell did not converge"
                    );
                    chain.warnings.push(warning(ConvergenceFailure::not_converged(
                        cell.status,
                        max_residual,
                        cell.iters,
                    )));
                    Some(CellResult::from(&cell))
                }
                Err(err) => {
                    warn!(
                        tws = tws_knots,
                        twa = twa_deg,
                        combination = %label,
                        error = %err,
                        "cell could not be solved"
                    );
                    chain.warnings.push(warning(ConvergenceFailure::failed(&err)));
                    None
                }
            };
            chain.cells.push((j, result));
        }

        chain
    }

    /// True if the combination's second sail is meant for this wind angle.
    fn suits(&self, combination: SailCombination, twa: Angle) -> bool {
        let twa = twa.get::<degree>();
        if self.yacht.sails()[combination.other].is_upwind() {
            twa < self.config.upwind_limit.get::<degree>()
        } else {
            twa > self.config.downwind_limit.get::<degree>()
        }
    }

    fn cell_solver(&self) -> CellSolver<'_, 'a> {
        CellSolver {
            aero: &self.aero,
            hydro: &self.hydro,
            config: &self.config,
        }
    }
}

/// Solves a single point of sail from the closed-form seed.
///
/// Sail-regime limits are not applied; any combination can be asked for at
/// any angle.
impl Model for EquilibriumSolver<'_> {
    type Input = PointOfSail;
    type Output = CellSolution;
    type Error = CellError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let wind = WindState {
            speed: input.tws,
            angle: input.twa,
        };
        self.cell_solver().solve(
            input.combination,
            &wind,
            closed_form_seed(input.tws, input.twa),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::velocity::meter_per_second;

    use crate::models::sailing::vpp::core::test_support::{kite, main, registry, yd41, yd41_with};

    const JIB_SET: SailCombination = SailCombination { main: 0, other: 1 };
    const KITE_SET: SailCombination = SailCombination { main: 0, other: 2 };

    fn beam_reach() -> PointOfSail {
        PointOfSail {
            tws: from_knots(10.0),
            twa: degrees(90.0),
            combination: JIB_SET,
        }
    }

    #[test]
    fn yd41_beam_reach_converges() {
        let yacht = yd41();
        let registry = registry();
        let solver = EquilibriumSolver::new(&yacht, &registry).unwrap();

        let cell = solver.call(&beam_reach()).unwrap();

        assert!(cell.converged(), "{cell:?}");
        assert!(!cell.heel_limited);
        assert_eq!(cell.derate_steps, 0);

        let speed = cell.state.speed.get::<meter_per_second>();
        let heel = cell.state.heel.get::<degree>();
        let leeway = cell.state.leeway.get::<degree>();
        assert!((4.4..4.9).contains(&speed), "speed {speed}");
        assert!((10.0..15.0).contains(&heel), "heel {heel}");
        assert!((0.5..4.0).contains(&leeway), "leeway {leeway}");
    }

    #[test]
    fn accepted_state_balances_forces() {
        let yacht = yd41();
        let registry = registry();
        let solver = EquilibriumSolver::new(&yacht, &registry).unwrap();

        let cell = solver.call(&beam_reach()).unwrap();
        assert!(cell.converged());

        let [fx, fy, mx] = cell.imbalance;
        assert!(fx.abs() <= 1e-2 && fy.abs() <= 1e-2, "forces {fx} {fy}");
        assert!(mx.abs() <= 1e-2, "moment {mx}");

        // Recompute from the force models directly.
        let boat = cell.state.boat();
        let wind = WindState {
            speed: from_knots(10.0),
            angle: degrees(90.0),
        };
        let aero = solver
            .aero()
            .forces(JIB_SET, &boat, &wind, &cell.state.controls())
            .unwrap()
            .to_si();
        let hydro = solver.hydro().forces(&boat).to_si();
        for i in 0..3 {
            assert!((aero[i] - hydro[i]).abs() <= 1e-2);
        }
    }

    #[test]
    fn solves_are_deterministic() {
        let yacht = yd41();
        let registry = registry();
        let solver = EquilibriumSolver::new(&yacht, &registry).unwrap();

        assert_eq!(solver.call(&beam_reach()).unwrap(), solver.call(&beam_reach()).unwrap());
    }

    #[test]
    fn heel_over_the_limit_is_derated_or_unconverged() {
        let yacht = yd41();
        let registry = registry();
        let mut config = VppConfig::default();
        config.solver.max_heel = degrees(8.0);
        let solver = EquilibriumSolver::with_config(&yacht, &registry, config).unwrap();

        let cell = solver.call(&beam_reach()).unwrap();
        let heel = cell.state.heel.get::<degree>();

        if cell.converged() {
            assert!(heel.abs() <= 8.0, "{cell:?}");
            assert!(cell.state.area < 1.0 && cell.derate_steps > 0, "{cell:?}");
        } else {
            assert!(cell.heel_limited, "{cell:?}");
            assert!(heel.abs() > 8.0);
        }
    }

    #[test]
    fn kite_is_derated_by_area() {
        let yacht = yd41();
        let registry = registry();
        let mut config = VppConfig::default();
        config.solver.max_heel = degrees(10.0);
        let solver = EquilibriumSolver::with_config(&yacht, &registry, config).unwrap();

        let cell = solver
            .call(&PointOfSail {
                tws: from_knots(16.0),
                twa: degrees(100.0),
                combination: KITE_SET,
            })
            .unwrap();

        assert!(cell.derate_steps > 0, "{cell:?}");
        assert!(cell.state.area < 1.0);
        assert_eq!(cell.state.reef, 1.0);
        assert!(cell.converged() || cell.heel_limited);
        assert!(cell.state.heel.get::<degree>().abs() <= 10.0 || !cell.converged());
    }

    #[test]
    fn no_converged_cell_exceeds_the_heel_limit() {
        let yacht = yd41();
        let registry = registry();
        let mut solver = EquilibriumSolver::new(&yacht, &registry).unwrap();
        let max_heel = solver.config().max_heel.get::<degree>();

        solver.set_analysis(
            &[2.0, 8.0, 14.0, 20.0, 26.0, 35.0],
            &[30.0, 45.0, 60.0, 90.0, 110.0, 135.0, 150.0, 170.0, 180.0],
        );
        let report = solver.run(false).unwrap();
        let grid = solver.grid().unwrap();

        let mut limited = 0;
        for i in 0..grid.tws().len() {
            for j in 0..grid.twa().len() {
                for k in 0..grid.combinations().len() {
                    let Some(cell) = grid.get(i, j, k) else {
                        continue;
                    };
                    assert!(cell.heel.abs() <= max_heel + 1e-9 || !cell.converged, "{cell:?}");
                    assert!(!(cell.converged && cell.heel_limited));
                    limited += usize::from(cell.heel_limited);
                }
            }
        }

        let flagged = report
            .warnings
            .iter()
            .filter(|w| matches!(w.failure, ConvergenceFailure::HeelLimited { .. }))
            .count();
        assert_eq!(flagged, limited);
        assert_eq!(report.heel_limited, limited);

        for (i, summary) in grid.vmg_summary().iter().enumerate() {
            for point in summary.upwind.iter().chain(&summary.downwind) {
                let j = grid.twa().iter().position(|&twa| twa == point.twa).unwrap();
                let cell = grid.get(i, j, point.combination).unwrap();
                assert!(cell.converged && cell.heel.abs() <= max_heel + 1e-9);
            }
        }
    }

    #[test]
    fn kite_balances_with_the_wind_on_the_quarter() {
        let yacht = yd41();
        let registry = registry();
        let solver = EquilibriumSolver::new(&yacht, &registry).unwrap();

        let cell = solver
            .call(&PointOfSail {
                tws: from_knots(10.0),
                twa: degrees(170.0),
                combination: KITE_SET,
            })
            .unwrap();

        assert!(cell.converged(), "{cell:?}");
        // Side force reverses this deep, so the boat heels and slips the other way.
        assert!(cell.state.heel.get::<degree>() < 0.0, "{cell:?}");
        assert!(cell.state.leeway.get::<degree>() < 0.0, "{cell:?}");
    }

    #[test]
    fn grid_run_respects_regimes_and_heel_limit() {
        let yacht = yd41();
        let registry = registry();
        let mut solver = EquilibriumSolver::new(&yacht, &registry).unwrap();

        let warnings = solver.set_analysis(&[6.0, 10.0, 16.0], &[45.0, 60.0, 90.0, 110.0, 150.0]);
        assert!(warnings.is_empty());

        let report = solver.run(false).unwrap();
        assert!(!report.cancelled);
        // Jib skips 150°, kite skips 45° and 60°.
        assert_eq!(report.skipped, 3 * (1 + 2));
        assert_eq!(report.attempted, 3 * (4 + 3));

        let grid = solver.grid().unwrap();
        assert_eq!(grid.combinations(), ["MN1 + J1", "MN1 + A2"]);
        for i in 0..3 {
            assert!(grid.get(i, 4, 0).is_none());
            assert!(grid.get(i, 0, 1).is_none());
            assert!(grid.get(i, 1, 1).is_none());
            for j in 0..5 {
                for k in 0..2 {
                    if let Some(cell) = grid.get(i, j, k) {
                        assert!(cell.heel.abs() <= 30.0 + 1e-9 || !cell.converged, "{cell:?}");
                    }
                }
            }
        }

        let beam = grid.get(1, 2, 0).unwrap();
        assert!(beam.converged);
        assert!((8.5..9.5).contains(&beam.speed), "speed {}", beam.speed);
    }

    #[test]
    fn single_downwind_sail_gives_one_combination() {
        let yacht = yd41_with(vec![main(), kite()]);
        let registry = registry();
        let mut solver = EquilibriumSolver::new(&yacht, &registry).unwrap();

        solver.set_analysis(&[10.0], &[70.0, 80.0, 90.0, 120.0, 150.0]);
        solver.run(false).unwrap();

        let grid = solver.grid().unwrap();
        assert_eq!(grid.combinations(), ["MN1 + A2"]);

        let summary = grid.vmg_summary();
        let upwind = summary[0].upwind.unwrap();
        assert_eq!(upwind.combination, 0);
        let best = grid
            .series(0, 0)
            .filter(|(twa, _)| *twa < 90.0)
            .map(|(twa, cell)| cell.speed * twa.to_radians().cos())
            .fold(f64::NEG_INFINITY, f64::max);
        assert!((upwind.vmg - best).abs() < 1e-12);

        let downwind = summary[0].downwind.unwrap();
        assert_eq!(downwind.combination, 0);
        let best = grid
            .series(0, 0)
            .filter(|(twa, _)| *twa > 90.0)
            .map(|(twa, cell)| -cell.speed * twa.to_radians().cos())
            .fold(f64::NEG_INFINITY, f64::max);
        assert!((downwind.vmg - best).abs() < 1e-12);
    }

    #[test]
    fn out_of_range_points_are_excluded() {
        let yacht = yd41();
        let registry = registry();
        let mut solver = EquilibriumSolver::new(&yacht, &registry).unwrap();

        let warnings = solver.set_analysis(&[1.0, 10.0, 40.0], &[-5.0, 90.0, 200.0, f64::NAN]);

        let excluded: Vec<(AnalysisAxis, f64)> = warnings
            .iter()
            .filter(|w| !w.value.is_nan())
            .map(|w| (w.axis, w.value))
            .collect();
        assert_eq!(
            excluded,
            [
                (AnalysisAxis::Tws, 1.0),
                (AnalysisAxis::Tws, 40.0),
                (AnalysisAxis::Twa, -5.0),
                (AnalysisAxis::Twa, 200.0),
            ]
        );
        assert_eq!(warnings.len(), 5);

        solver.run(false).unwrap();
        let results = solver.results().unwrap();
        assert_eq!(results.tws, [10.0]);
        assert_eq!(results.twa, [90.0]);
    }

    #[test]
    fn run_sequence_is_enforced() {
        let yacht = yd41();
        let registry = registry();
        let mut solver = EquilibriumSolver::new(&yacht, &registry).unwrap();

        assert_eq!(solver.run(false).unwrap_err(), RunError::NoAnalysis);
        assert_eq!(solver.results().unwrap_err(), RunError::NoAnalysis);

        solver.set_analysis(&[10.0], &[90.0]);
        assert_eq!(solver.results().unwrap_err(), RunError::NotRun);
    }

    #[test]
    fn cancelled_run_keeps_a_valid_empty_grid() {
        let yacht = yd41();
        let registry = registry();
        let mut solver = EquilibriumSolver::new(&yacht, &registry).unwrap();
        solver.set_analysis(&[10.0], &[60.0, 90.0]);

        let report = solver
            .run_cancellable(false, &AtomicBool::new(true))
            .unwrap();

        assert!(report.cancelled);
        assert_eq!(report.attempted, 0);
        let results = solver.results().unwrap();
        assert!(results.results[0].iter().flatten().all(Option::is_none));
    }

    #[test]
    fn results_serialize_to_the_documented_shape() {
        let yacht = yd41();
        let registry = registry();
        let mut solver = EquilibriumSolver::new(&yacht, &registry).unwrap();
        solver.set_analysis(&[10.0], &[90.0, 150.0]);
        solver.run(true).unwrap();

        let value = serde_json::to_value(solver.results().unwrap()).unwrap();

        assert_eq!(value["name"], "YD41");
        assert_eq!(value["tws"][0], 10.0);
        assert_eq!(value["twa"][1], 150.0);
        assert!(value["results"][0][1][0].is_null());
        let cell = &value["results"][0][0][0];
        for key in ["speed", "heel", "leeway", "flattening", "reef"] {
            assert!(cell[key].is_number(), "missing {key}");
        }
    }

    #[cfg(feature = "rayon")]
    #[test]
    fn parallel_run_matches_sequential() {
        let yacht = yd41();
        let registry = registry();

        let mut sequential = EquilibriumSolver::new(&yacht, &registry).unwrap();
        sequential.set_analysis(&[6.0, 12.0], &[60.0, 90.0, 120.0]);
        sequential.run(false).unwrap();

        let mut parallel = EquilibriumSolver::new(&yacht, &registry).unwrap();
        parallel.set_analysis(&[6.0, 12.0], &[60.0, 90.0, 120.0]);
        parallel.run_parallel(false).unwrap();

        assert_eq!(sequential.results().unwrap(), parallel.results().unwrap());
    }
}
