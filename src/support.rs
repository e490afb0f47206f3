//! Crate-level utilities shared by models.
//!
//! These modules are public because they are useful on their own, but their
//! APIs are not stable.

pub mod constraint;
pub mod interp;
pub mod levenberg_marquardt;
pub mod units;
