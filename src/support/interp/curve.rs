use super::{Axis, InterpError, check_finite, lerp};

/// A 1-D piecewise-linear function with linear extrapolation.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearCurve {
    axis: Axis,
    values: Vec<f64>,
}

impl LinearCurve {
    /// Builds a curve through the points `(x[i], y[i])`.
    ///
    /// # Errors
    ///
    /// Returns an [`InterpError`] if `x` is not a valid [`Axis`], if the
    /// lengths differ, or if any `y` is not finite.
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Result<Self, InterpError> {
        let axis = Axis::new(x)?;
        if y.len() != axis.len() {
            return Err(InterpError::LengthMismatch {
                expected: axis.len(),
                found: y.len(),
            });
        }
        check_finite(&y)?;
        Ok(Self { axis, values: y })
    }

    /// Evaluates the curve at `x`.
    #[must_use]
    pub fn eval(&self, x: f64) -> f64 {
        let (i, t) = self.axis.locate(x);
        lerp(self.values[i], self.values[i + 1], t)
    }

    /// The abscissa of the curve.
    #[must_use]
    pub fn axis(&self) -> &Axis {
        &self.axis
    }
}
