use super::{Axis, InterpError, check_finite, lerp};

/// A 3-D trilinear interpolant on a rectilinear grid.
///
/// Samples are stored in row-major order: the first axis varies slowest and
/// the third axis fastest, so the sample at node `(i, j, k)` lives at index
/// `(i * n1 + j) * n2 + k`.
#[derive(Debug, Clone, PartialEq)]
pub struct TrilinearCube {
    axes: [Axis; 3],
    values: Vec<f64>,
}

impl TrilinearCube {
    /// Builds a cube from its three axes and row-major samples.
    ///
    /// # Errors
    ///
    /// Returns an [`InterpError`] if any axis is invalid, if the sample count
    /// does not match the grid shape, or if any sample is not finite.
    pub fn new(axes: [Vec<f64>; 3], values: Vec<f64>) -> Result<Self, InterpError> {
        let [a0, a1, a2] = axes;
        let axes = [Axis::new(a0)?, Axis::new(a1)?, Axis::new(a2)?];

        let expected = axes.iter().map(Axis::len).product();
        if values.len() != expected {
            return Err(InterpError::LengthMismatch {
                expected,
                found: values.len(),
            });
        }
        check_finite(&values)?;

        Ok(Self { axes, values })
    }

    /// Evaluates the cube at `point`, extrapolating linearly outside the grid.
    #[must_use]
    pub fn eval(&self, point: [f64; 3]) -> f64 {
        let (i, ti) = self.axes[0].locate(point[0]);
        let (j, tj) = self.axes[1].locate(point[1]);
        let (k, tk) = self.axes[2].locate(point[2]);

        let at = |i: usize, j: usize, k: usize| self.values[self.index(i, j, k)];

        // Collapse the third axis, then the second, then the first.
        let c00 = lerp(at(i, j, k), at(i, j, k + 1), tk);
        let c01 = lerp(at(i, j + 1, k), at(i, j + 1, k + 1), tk);
        let c10 = lerp(at(i + 1, j, k), at(i + 1, j, k + 1), tk);
        let c11 = lerp(at(i + 1, j + 1, k), at(i + 1, j + 1, k + 1), tk);

        let c0 = lerp(c00, c01, tj);
        let c1 = lerp(c10, c11, tj);

        lerp(c0, c1, ti)
    }

    /// The three grid axes.
    #[must_use]
    pub fn axes(&self) -> &[Axis; 3] {
        &self.axes
    }

    fn index(&self, i: usize, j: usize, k: usize) -> usize {
        (i * self.axes[1].len() + j) * self.axes[2].len() + k
    }
}
