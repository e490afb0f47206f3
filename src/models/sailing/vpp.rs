//! Velocity prediction for sailing yachts.
//!
//! Given hull, appendage and sail particulars, predicts boat speed, heel and
//! leeway for each true wind speed, true wind angle and sail combination by
//! balancing sail forces against hull forces.
//!
//! ```no_run
//! use yacht_vpp::models::sailing::vpp::{
//!     CalibrationRegistry, EquilibriumSolver, Yacht, YachtParticulars,
//! };
//!
//! # fn particulars() -> YachtParticulars { unimplemented!() }
//! let yacht = Yacht::new(&particulars())?;
//! let registry = CalibrationRegistry::builtin()?;
//! let mut solver = EquilibriumSolver::new(&yacht, &registry)?;
//!
//! for warning in solver.set_analysis(&[6.0, 10.0, 16.0], &[45.0, 90.0, 135.0]) {
//!     eprintln!("excluded {warning:?}");
//! }
//! let report = solver.run(false)?;
//! println!("{} of {} cells converged", report.converged, report.attempted);
//!
//! let json = serde_json::to_string(&solver.results()?)?;
//! println!("{json}");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub(crate) mod core;

pub use self::core::*;
