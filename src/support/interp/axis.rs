use super::{InterpError, check_finite};

/// A strictly increasing set of sample coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
    nodes: Vec<f64>,
}

impl Axis {
    /// Builds an axis from sample coordinates.
    ///
    /// # Errors
    ///
    /// Returns an [`InterpError`] if there are fewer than two nodes, if any
    /// node is not finite, or if the nodes are not strictly increasing.
    pub fn new(nodes: Vec<f64>) -> Result<Self, InterpError> {
        if nodes.len() < 2 {
            return Err(InterpError::TooFewNodes { len: nodes.len() });
        }
        check_finite(&nodes)?;
        if let Some(index) = nodes.windows(2).position(|w| w[1] <= w[0]) {
            return Err(InterpError::NotIncreasing { index: index + 1 });
        }
        Ok(Self { nodes })
    }

    /// Returns the sample coordinates.
    #[must_use]
    pub fn nodes(&self) -> &[f64] {
        &self.nodes
    }

    /// Number of nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false; an axis holds at least two nodes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the sampled range `(first, last)`.
    #[must_use]
    pub fn domain(&self) -> (f64, f64) {
        (self.nodes[0], self.nodes[self.nodes.len() - 1])
    }

    /// True if `x` lies within the sampled range, ends included.
    #[must_use]
    pub fn contains(&self, x: f64) -> bool {
        let (lo, hi) = self.domain();
        (lo..=hi).contains(&x)
    }

    /// Locates the segment used to interpolate at `x`.
    ///
    /// Returns the lower node index `i` and the fractional position `t` along
    /// segment `[i, i + 1]`. Outside the domain the end segment is returned and
    /// `t` falls outside `[0, 1]`, which turns interpolation into linear
    /// extrapolation.
    pub(super) fn locate(&self, x: f64) -> (usize, f64) {
        let last_segment = self.nodes.len() - 2;
        let i = self
            .nodes
            .partition_point(|&node| node <= x)
            .saturating_sub(1)
            .min(last_segment);
        let (a, b) = (self.nodes[i], self.nodes[i + 1]);
        (i, (x - a) / (b - a))
    }
}
