//! Force models and equilibrium solver for sailing-yacht performance.
//!
//! A [`Yacht`] is built once from its particulars. The [`SailForceModel`] and
//! [`HullForceModel`] borrow it together with a [`CalibrationRegistry`] and
//! turn an explicit [`BoatState`] into forces. The [`EquilibriumSolver`]
//! balances the two over a grid of true wind speeds and angles.

mod aero;
mod calibration;
mod equilibrium;
mod hydro;
mod results;
mod state;
mod yacht;

#[cfg(test)]
mod test_support;

pub use aero::{
    AeroConfig, AeroError, AeroState, ApparentWind, SailForceModel, WindTriangleConfig,
    WindTriangleError,
};
pub use calibration::{CalibrationError, CalibrationRegistry, PolarPoint, SailPolar, Table, names};
pub use equilibrium::{
    AnalysisAxis, CellError, CellSolution, ConvergenceFailure, ConvergenceWarning, DeratePolicy,
    EquilibriumSolver, FlatteningSchedule, PointOfSail, RangeWarning, RunError, RunReport,
    SolverConfig, VppConfig,
};
pub use hydro::{DomainWarning, HullForceModel, HydroConfig, Resistance};
pub use results::{CellResult, ResultGrid, VmgPoint, VmgSummary, VppResults};
pub use state::{BoatState, EquilibriumState, Forces, SailControls, WindState};
pub use yacht::{
    Appendage, AppendageKind, AppendageParticulars, CREW_BODY_WEIGHT, ConfigurationError,
    Foretriangle, Hull, HullParticulars, RigDimensions, Sail, SailCombination, SailGeometry,
    SailMeasure, SailParticulars, Yacht, YachtParticulars,
};
