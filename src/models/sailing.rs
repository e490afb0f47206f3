//! Sailing performance models.

pub mod vpp;
