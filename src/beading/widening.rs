//! Wrapper guaranteeing hairline features still print: a single bead
//! narrower than the printable minimum is widened rather than dropped.
//!
//! Grounded on `original_source/src/WideningBeadingStrategy.cpp`.

use crate::beading::distributed::offsets_from_widths;
use crate::beading::{Beading, BeadingStrategy, BeadVec};

pub struct Widening {
    /// Below this thickness, no bead is printed at all (§4.A edge case:
    /// regions thinner than the minimum printable feature produce zero
    /// beads).
    pub min_input_width: i64,
    /// A single bead is never narrower than this, even if the inner
    /// strategy would have produced less.
    pub min_output_width: i64,
    inner: Box<dyn BeadingStrategy>,
}

impl Widening {
    pub fn new(min_input_width: i64, min_output_width: i64, inner: Box<dyn BeadingStrategy>) -> Self {
        Self {
            min_input_width,
            min_output_width,
            inner,
        }
    }
}

impl BeadingStrategy for Widening {
    fn compute(&self, thickness: i64, bead_count: usize) -> Beading {
        let mut result = self.inner.compute(thickness, bead_count);
        if bead_count == 1 && result.bead_widths[0] < self.min_output_width {
            let widths: BeadVec<i64> = [self.min_output_width].into_iter().collect();
            let offsets = offsets_from_widths(&widths, thickness);
            result.bead_widths = widths;
            result.toolpath_locations = offsets;
            result.left_over = (thickness - self.min_output_width).max(0);
        }
        result
    }

    fn optimal_thickness(&self, bead_count: usize) -> i64 {
        self.inner.optimal_thickness(bead_count)
    }

    fn transition_thickness(&self, bead_count: usize) -> i64 {
        if bead_count == 0 {
            self.min_input_width
        } else {
            self.inner.transition_thickness(bead_count)
        }
    }

    fn optimal_bead_count(&self, thickness: i64) -> usize {
        let n = self.inner.optimal_bead_count(thickness);
        if n < 1 && thickness > self.min_input_width {
            1
        } else {
            n
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::beading::distributed::Distributed;

    #[test]
    fn hairline_feature_is_widened() {
        let strategy = Widening::new(50, 200, Box::new(Distributed::new(400)));
        let beading = strategy.compute(80, 1);
        assert_eq!(beading.bead_widths[0], 200);
        // Widening deliberately overextrudes a hairline feature rather than
        // dropping it, so the usual sum(widths) <= thickness invariant does
        // not hold here by design.
    }

    #[test]
    fn forces_at_least_one_bead_above_min_input_width() {
        let strategy = Widening::new(50, 200, Box::new(Distributed::new(400)));
        assert_eq!(strategy.optimal_bead_count(60), 1);
        assert_eq!(strategy.optimal_bead_count(40), 0);
    }
}
