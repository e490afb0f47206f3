//! Force balance as an equation problem over `(speed, heel, leeway)`.

use std::convert::Infallible;

use twine_core::{EquationProblem, Model};

use super::super::{
    aero::{AeroError, SailForceModel},
    hydro::HullForceModel,
    state::{BoatState, Forces, SailControls, WindState},
    yacht::SailCombination,
};

/// Sail and hull forces at one boat state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Balance {
    pub aero: Forces,
    pub hydro: Forces,
}

impl Balance {
    /// Sail minus hull forces, in newtons and newton-metres.
    pub(super) fn imbalance(&self) -> [f64; 3] {
        let aero = self.aero.to_si();
        let hydro = self.hydro.to_si();
        std::array::from_fn(|i| aero[i] - hydro[i])
    }
}

/// Evaluates both force models for one sail set, wind and trim.
pub(super) struct BalanceModel<'m, 'a> {
    pub aero: &'m SailForceModel<'a>,
    pub hydro: &'m HullForceModel<'a>,
    pub combination: SailCombination,
    pub wind: WindState,
    pub controls: SailControls,
}

impl Model for BalanceModel<'_, '_> {
    type Input = BoatState;
    type Output = Balance;
    type Error = AeroError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let aero = self
            .aero
            .forces(self.combination, input, &self.wind, &self.controls)?;
        Ok(Balance {
            aero,
            hydro: self.hydro.forces(input),
        })
    }
}

/// Residuals are the imbalances divided by their tolerances.
pub(super) struct BalanceProblem {
    pub scale: [f64; 3],
}

impl EquationProblem<3> for BalanceProblem {
    type Input = BoatState;
    type Output = Balance;
    type Error = Infallible;

    fn input(&self, x: &[f64; 3]) -> Result<Self::Input, Self::Error> {
        Ok(BoatState::from_si(x[0], x[1], x[2]))
    }

    fn residuals(
        &self,
        _input: &Self::Input,
        output: &Self::Output,
    ) -> Result<[f64; 3], Self::Error> {
        let imbalance = output.imbalance();
        Ok(std::array::from_fn(|i| imbalance[i] / self.scale[i]))
    }
}
