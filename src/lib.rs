//! # Yacht VPP
//!
//! Velocity prediction for sailing yachts, built on
//! [Twine](https://github.com/isentropic-dev/twine) models and solvers.
//!
//! ## Crate layout
//!
//! - [`models`]: Domain models; the velocity prediction program lives in
//!   [`models::sailing::vpp`].
//! - [`support`]: Supporting utilities used by models (validated numbers,
//!   interpolation tables, a Levenberg–Marquardt solver, unit helpers).
//!
//! ## Utility code lifecycle
//!
//! Modules in [`support`] are part of the public API because they're useful,
//! but their APIs are not stable. Breaking changes may occur as needed.
//!
//! Utility code starts in a model's internal `core` module and moves to
//! [`support`] once it is useful outside that model.
//!
//! ## Features
//!
//! - `rayon`: solve independent wind-speed chains in parallel with
//!   `EquilibriumSolver::run_parallel`.

pub mod models;
pub mod support;
