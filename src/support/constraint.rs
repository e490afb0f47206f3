//! Type-level numeric constraints for validated geometry.
//!
//! Yacht particulars arrive from configuration as plain quantities. Before a
//! [`Yacht`](crate::models::sailing::vpp::Yacht) is built, every
//! dimension is checked against one of the markers below so that a negative
//! span or a `NaN` mass is rejected at construction instead of surfacing as a
//! nonsensical force deep inside a solve.
//!
//! # Provided constraints
//!
//! - [`NonNegative`]: Zero or greater (spans, chords, roach)
//! - [`StrictlyPositive`]: Greater than zero (waterline length, mass, ...)
//!
//! Each marker is used with the generic [`Constrained<T, C>`] wrapper,
//! where `C` is the marker type implementing [`Constraint<T>`].

mod non_negative;
mod strictly_positive;

use std::marker::PhantomData;

use thiserror::Error;

pub use non_negative::NonNegative;
pub use strictly_positive::StrictlyPositive;

/// A trait for enforcing numeric invariants at construction time.
pub trait Constraint<T> {
    /// Checks that the given value satisfies this constraint.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] if the value does not satisfy the constraint.
    fn check(value: &T) -> Result<(), ConstraintError>;
}

/// An error returned when a [`Constraint`] is violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConstraintError {
    #[error("value must not be negative")]
    Negative,
    #[error("value must not be zero")]
    Zero,
    #[error("value is not a number")]
    NotANumber,
}

/// A wrapper enforcing a numeric constraint at construction time.
///
/// # Example
///
/// ```
/// use uom::si::{f64::Length, length::meter};
/// use yacht_vpp::support::constraint::{Constrained, StrictlyPositive};
///
/// let lwl = Constrained::<_, StrictlyPositive>::new(Length::new::<meter>(11.9)).unwrap();
/// assert_eq!(lwl.into_inner().get::<meter>(), 11.9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Constrained<T, C: Constraint<T>> {
    value: T,
    _marker: PhantomData<C>,
}

impl<T, C: Constraint<T>> Constrained<T, C> {
    /// Constructs a new constrained value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value does not satisfy the constraint.
    pub fn new(value: T) -> Result<Self, ConstraintError> {
        C::check(&value)?;
        Ok(Self {
            value,
            _marker: PhantomData,
        })
    }

    /// Consumes the wrapper and returns the inner value.
    pub fn into_inner(self) -> T {
        self.value
    }
}
