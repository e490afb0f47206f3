/// Tuning parameters for the Levenberg–Marquardt solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Maximum number of outer iterations.
    pub max_iters: usize,

    /// Convergence threshold on the largest absolute residual.
    pub residual_tol: f64,

    /// Relative step size below which the solver reports a stall.
    pub step_tol: f64,

    /// Relative forward-difference step for the Jacobian.
    pub fd_step: f64,

    /// Damping used for the first step.
    pub initial_damping: f64,

    /// Factor applied to the damping after a rejected step.
    pub damping_increase: f64,

    /// Divisor applied to the damping after an accepted step.
    pub damping_decrease: f64,

    /// Lower limit on the damping.
    pub min_damping: f64,

    /// Damping above which the solver gives up on the current iterate.
    pub max_damping: f64,

    /// Floor on the diagonal scaling, for columns with vanishing sensitivity.
    pub min_scaling: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_iters: 100,
            residual_tol: 1e-8,
            step_tol: 1e-12,
            fd_step: 1e-6,
            initial_damping: 1e-3,
            damping_increase: 10.0,
            damping_decrease: 10.0,
            min_damping: 1e-12,
            max_damping: 1e12,
            min_scaling: 1e-12,
        }
    }
}

/// Inclusive box bounds on the solver variables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds<const N: usize> {
    pub lower: [f64; N],
    pub upper: [f64; N],
}

impl<const N: usize> Bounds<N> {
    /// Bounds that never restrict an iterate.
    #[must_use]
    pub fn unbounded() -> Self {
        Self {
            lower: [f64::NEG_INFINITY; N],
            upper: [f64::INFINITY; N],
        }
    }

    /// Clamps each component of `x` into its bounds.
    #[must_use]
    pub fn project(&self, x: [f64; N]) -> [f64; N] {
        std::array::from_fn(|j| x[j].max(self.lower[j]).min(self.upper[j]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projection_clamps_each_component() {
        let bounds = Bounds {
            lower: [0.0, -45.0],
            upper: [10.0, 45.0],
        };
        assert_eq!(bounds.project([-1.0, 50.0]), [0.0, 45.0]);
        assert_eq!(bounds.project([5.0, 3.0]), [5.0, 3.0]);
        assert_eq!(Bounds::<2>::unbounded().project([1e30, -1e30]), [1e30, -1e30]);
    }
}
