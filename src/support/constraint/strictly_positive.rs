use std::cmp::Ordering;

use num_traits::Zero;

use super::{Constrained, Constraint, ConstraintError};

/// Marker type enforcing that a value is strictly greater than zero.
///
/// Hull dimensions and masses use this bound because they appear as divisors
/// in the derived ratios (`bwl / tc`, `lwl / vol^(1/3)`).
///
/// ```
/// use yacht_vpp::support::constraint::StrictlyPositive;
///
/// assert!(StrictlyPositive::new(6500.0).is_ok());
/// assert!(StrictlyPositive::new(0.0).is_err());
/// assert!(StrictlyPositive::new(-1).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct StrictlyPositive;

impl StrictlyPositive {
    /// Constructs a [`Constrained<T, StrictlyPositive>`] if the value is strictly positive.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is zero, negative, or not a number (`NaN`).
    pub fn new<T: PartialOrd + Zero>(
        value: T,
    ) -> Result<Constrained<T, StrictlyPositive>, ConstraintError> {
        Constrained::<T, StrictlyPositive>::new(value)
    }
}

impl<T: PartialOrd + Zero> Constraint<T> for StrictlyPositive {
    fn check(value: &T) -> Result<(), ConstraintError> {
        match value.partial_cmp(&T::zero()) {
            Some(Ordering::Greater) => Ok(()),
            Some(Ordering::Equal) => Err(ConstraintError::Zero),
            Some(Ordering::Less) => Err(ConstraintError::Negative),
            None => Err(ConstraintError::NotANumber),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::{f64::Mass, mass::kilogram};

    #[test]
    fn integers() {
        let x = Constrained::<i32, StrictlyPositive>::new(1).unwrap();
        assert_eq!(x.into_inner(), 1);
        assert!(StrictlyPositive::new(0).is_err());
    }

    #[test]
    fn masses() {
        assert!(StrictlyPositive::new(Mass::new::<kilogram>(6500.0)).is_ok());
        assert_eq!(
            StrictlyPositive::new(Mass::new::<kilogram>(0.0)).unwrap_err(),
            ConstraintError::Zero
        );
        assert_eq!(
            StrictlyPositive::new(Mass::new::<kilogram>(-10.0)).unwrap_err(),
            ConstraintError::Negative
        );
    }
}
