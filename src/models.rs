//! Public models.
//!
//! Models are the primary public interface of this crate.
//!
//! # Organization
//!
//! Models are organized into domain-specific submodules (currently only
//! `sailing`). This organization may evolve as more models are added.
//!
//! # Model structure
//!
//! Each model lives in its own module and contains an internal `core` submodule
//! where the actual computation and domain logic lives. The `core` module
//! itself is private; the model module re-exports the types callers need.
//!
//! Entry points that take a single input and return a single output also
//! implement [`twine_core::Model`] as a thin adapter over the core API.

pub mod sailing;
