//! Piecewise-linear interpolation over tabulated data.
//!
//! Empirical calibration data (sail polars, righting-moment curves,
//! residuary-resistance surfaces) is sampled on rectilinear grids. This module
//! provides the two lookups those tables need:
//!
//! - [`LinearCurve`]: 1-D linear interpolation on a single [`Axis`]
//! - [`TrilinearCube`]: 3-D trilinear interpolation on three axes
//!
//! Both extrapolate linearly from the end segments when a coordinate lies
//! outside the sampled domain. Callers that need clamping (for example to a
//! physically meaningful range) clamp before the lookup; the tables never
//! reject a coordinate.
//!
//! # Example
//!
//! ```
//! use yacht_vpp::support::interp::LinearCurve;
//!
//! let curve = LinearCurve::new(vec![0.0, 10.0], vec![0.0, 1.0]).unwrap();
//! assert_eq!(curve.eval(5.0), 0.5);
//! assert_eq!(curve.eval(20.0), 2.0); // extrapolated
//! ```

mod axis;
mod cube;
mod curve;

pub use axis::Axis;
pub use cube::TrilinearCube;
pub use curve::LinearCurve;

use thiserror::Error;

/// Errors raised while building an interpolation table.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InterpError {
    /// An axis needs at least two nodes to define a segment.
    #[error("axis needs at least 2 nodes, got {len}")]
    TooFewNodes { len: usize },

    /// Axis nodes must be strictly increasing.
    #[error("axis nodes must be strictly increasing (at index {index})")]
    NotIncreasing { index: usize },

    /// A node or sample value is `NaN` or infinite.
    #[error("non-finite value at index {index}")]
    NonFinite { index: usize },

    /// The number of samples does not match the grid shape.
    #[error("expected {expected} samples, got {found}")]
    LengthMismatch { expected: usize, found: usize },
}

fn check_finite(values: &[f64]) -> Result<(), InterpError> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(InterpError::NonFinite { index }),
        None => Ok(()),
    }
}

#[inline]
fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + t * (b - a)
}
