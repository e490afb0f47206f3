//! The result grid and its summaries.

use serde::Serialize;
use uom::si::angle::degree;

use crate::support::units::to_knots;

use super::equilibrium::CellSolution;

/// One solved grid cell, in sailing units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CellResult {
    /// Boat speed, knots.
    pub speed: f64,
    /// Heel, degrees.
    pub heel: f64,
    /// Leeway, degrees.
    pub leeway: f64,
    pub flattening: f64,
    pub reef: f64,
    /// Sail area factor after derating.
    pub area: f64,
    /// Balanced within the heel limit; only these cells feed the summaries.
    pub converged: bool,
    pub heel_limited: bool,
}

impl From<&CellSolution> for CellResult {
    fn from(cell: &CellSolution) -> Self {
        let state = &cell.state;
        Self {
            speed: to_knots(state.speed),
            heel: state.heel.get::<degree>(),
            leeway: state.leeway.get::<degree>(),
            flattening: state.flattening,
            reef: state.reef,
            area: state.area,
            converged: cell.converged(),
            heel_limited: cell.heel_limited,
        }
    }
}

/// Best velocity made good at one true wind speed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VmgPoint {
    /// True wind angle, degrees.
    pub twa: f64,
    /// Boat speed, knots.
    pub speed: f64,
    /// Speed made good toward or away from the wind, knots.
    pub vmg: f64,
    /// Index into [`ResultGrid::combinations`].
    pub combination: usize,
}

/// Upwind and downwind optima for one true wind speed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VmgSummary {
    /// True wind speed, knots.
    pub tws: f64,
    pub upwind: Option<VmgPoint>,
    pub downwind: Option<VmgPoint>,
}

/// Serializable form of a completed analysis.
///
/// `results[tws][twa][combination]` is `null` where a cell was skipped or
/// could not be solved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VppResults {
    pub name: String,
    pub tws: Vec<f64>,
    pub twa: Vec<f64>,
    pub sail_combinations: Vec<String>,
    pub results: Vec<Vec<Vec<Option<CellResult>>>>,
}

/// Cells indexed by true wind speed, true wind angle and sail combination.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultGrid {
    tws: Vec<f64>,
    twa: Vec<f64>,
    combinations: Vec<String>,
    cells: Vec<Option<CellResult>>,
}

impl ResultGrid {
    pub(crate) fn new(tws: Vec<f64>, twa: Vec<f64>, combinations: Vec<String>) -> Self {
        let len = tws.len() * twa.len() * combinations.len();
        Self {
            tws,
            twa,
            combinations,
            cells: vec![None; len],
        }
    }

    /// True wind speeds, knots.
    #[must_use]
    pub fn tws(&self) -> &[f64] {
        &self.tws
    }

    /// True wind angles, degrees.
    #[must_use]
    pub fn twa(&self) -> &[f64] {
        &self.twa
    }

    /// Sail combination labels.
    #[must_use]
    pub fn combinations(&self) -> &[String] {
        &self.combinations
    }

    #[must_use]
    pub fn get(&self, tws: usize, twa: usize, combination: usize) -> Option<&CellResult> {
        self.index(tws, twa, combination)
            .and_then(|index| self.cells[index].as_ref())
    }

    pub(crate) fn set(
        &mut self,
        tws: usize,
        twa: usize,
        combination: usize,
        cell: Option<CellResult>,
    ) {
        if let Some(index) = self.index(tws, twa, combination) {
            self.cells[index] = cell;
        }
    }

    /// Converged cells of one combination at one wind speed, with their angle.
    pub fn series(
        &self,
        tws: usize,
        combination: usize,
    ) -> impl Iterator<Item = (f64, &CellResult)> + '_ {
        self.twa.iter().enumerate().filter_map(move |(j, &twa)| {
            self.get(tws, j, combination)
                .filter(|cell| cell.converged)
                .map(|cell| (twa, cell))
        })
    }

    /// Best upwind (`twa < 90°`) and downwind (`twa > 90°`) VMG per wind speed.
    #[must_use]
    pub fn vmg_summary(&self) -> Vec<VmgSummary> {
        self.tws
            .iter()
            .enumerate()
            .map(|(i, &tws)| {
                let mut upwind: Option<VmgPoint> = None;
                let mut downwind: Option<VmgPoint> = None;

                for combination in 0..self.combinations.len() {
                    for (twa, cell) in self.series(i, combination) {
                        let vmg = cell.speed * twa.to_radians().cos();
                        let point = |vmg| VmgPoint {
                            twa,
                            speed: cell.speed,
                            vmg,
                            combination,
                        };
                        if twa < 90.0 && upwind.is_none_or(|best| vmg > best.vmg) {
                            upwind = Some(point(vmg));
                        } else if twa > 90.0 && downwind.is_none_or(|best| -vmg > best.vmg) {
                            downwind = Some(point(-vmg));
                        }
                    }
                }

                VmgSummary {
                    tws,
                    upwind,
                    downwind,
                }
            })
            .collect()
    }

    /// Fastest converged combination in each `[tws][twa]` cell.
    #[must_use]
    pub fn best_sails(&self) -> Vec<Vec<Option<usize>>> {
        (0..self.tws.len())
            .map(|i| {
                (0..self.twa.len())
                    .map(|j| {
                        (0..self.combinations.len())
                            .filter_map(|k| {
                                self.get(i, j, k)
                                    .filter(|cell| cell.converged)
                                    .map(|cell| (k, cell.speed))
                            })
                            .max_by(|a, b| a.1.total_cmp(&b.1))
                            .map(|(k, _)| k)
                    })
                    .collect()
            })
            .collect()
    }

    /// Nests the grid for serialization.
    #[must_use]
    pub fn to_results(&self, name: &str) -> VppResults {
        let results = (0..self.tws.len())
            .map(|i| {
                (0..self.twa.len())
                    .map(|j| {
                        (0..self.combinations.len())
                            .map(|k| self.get(i, j, k).copied())
                            .collect()
                    })
                    .collect()
            })
            .collect();

        VppResults {
            name: name.to_owned(),
            tws: self.tws.clone(),
            twa: self.twa.clone(),
            sail_combinations: self.combinations.clone(),
            results,
        }
    }

    fn index(&self, tws: usize, twa: usize, combination: usize) -> Option<usize> {
        (tws < self.tws.len() && twa < self.twa.len() && combination < self.combinations.len())
            .then(|| (tws * self.twa.len() + twa) * self.combinations.len() + combination)
    }
}
