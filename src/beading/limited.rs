//! Wrapper capping the bead count at a configured maximum. Requests for one
//! more bead than the cap allows still produce a result — `max` real beads
//! plus a single zero-width **marker bead** that lets downstream consumers
//! (e.g. infill) align to where the wall boundary would have continued —
//! rather than either refusing the request or silently overflowing the
//! bead count.
//!
//! Grounded on `original_source/src/BeadingStrategy/LimitedBeadingStrategy.{h,cpp}`.

use crate::beading::distributed::offsets_from_widths;
use crate::beading::{Beading, BeadingStrategy, BeadVec};

/// Stands in for "further away than any real thickness will ever be", so
/// that once the bead count cap is reached, further transitions are
/// effectively disabled rather than chased. Mirrors the "10 metre" /
/// "9 metre" sentinels used by the original implementation.
const SENTINEL_OPTIMAL_THICKNESS: i64 = 10_000_000;
const SENTINEL_TRANSITION_THICKNESS: i64 = 9_000_000;

pub struct Limited {
    pub max_bead_count: usize,
    inner: Box<dyn BeadingStrategy>,
}

impl Limited {
    pub fn new(max_bead_count: usize, inner: Box<dyn BeadingStrategy>) -> Self {
        Self {
            max_bead_count,
            inner,
        }
    }
}

impl BeadingStrategy for Limited {
    fn compute(&self, thickness: i64, bead_count: usize) -> Beading {
        if bead_count <= self.max_bead_count {
            return self.inner.compute(thickness, bead_count);
        }

        // Only `max_bead_count + 1` is handled specially; larger requests
        // are never produced by `optimal_bead_count` on this wrapper
        // (transitions past the cap are disabled), but we still answer
        // them the same way for a caller that asks directly.
        let capped_thickness = self.inner.optimal_thickness(self.max_bead_count);
        let inner = self.inner.compute(capped_thickness, self.max_bead_count);

        let marker_index = (self.max_bead_count + 1) / 2;
        let mut widths: BeadVec<i64> = BeadVec::with_capacity(self.max_bead_count + 1);
        widths.extend(inner.bead_widths[..marker_index].iter().copied());
        widths.push(0);
        widths.extend(inner.bead_widths[marker_index..].iter().copied());

        let offsets = offsets_from_widths(&widths, thickness);
        let left_over = inner.left_over + (thickness - capped_thickness);

        Beading {
            total_thickness: thickness,
            bead_widths: widths,
            toolpath_locations: offsets,
            left_over,
        }
    }

    fn optimal_thickness(&self, bead_count: usize) -> i64 {
        if bead_count <= self.max_bead_count {
            self.inner.optimal_thickness(bead_count)
        } else {
            SENTINEL_OPTIMAL_THICKNESS
        }
    }

    fn transition_thickness(&self, bead_count: usize) -> i64 {
        if bead_count < self.max_bead_count {
            self.inner.transition_thickness(bead_count)
        } else {
            SENTINEL_TRANSITION_THICKNESS
        }
    }

    fn optimal_bead_count(&self, thickness: i64) -> usize {
        self.inner.optimal_bead_count(thickness).min(self.max_bead_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::beading::distributed::Distributed;

    #[test]
    fn scenario_2_limited_wrapper() {
        let strategy = Limited::new(2, Box::new(Distributed::new(400)));
        let beading = strategy.compute(1200, 3);
        assert_eq!(&beading.bead_widths[..], &[400, 0, 400]);
        assert_eq!(&beading.toolpath_locations[..], &[200, 600, 1000]);
        assert_eq!(beading.left_over, 400);
    }

    #[test]
    fn exactly_one_marker_bead_for_every_thickness() {
        let strategy = Limited::new(4, Box::new(Distributed::new(400)));
        for t in [1000, 2500, 5000, 9000] {
            let beading = strategy.compute(t, 5);
            let zero_count = beading.bead_widths.iter().filter(|&&w| w == 0).count();
            let positive_count = beading.bead_widths.iter().filter(|&&w| w > 0).count();
            assert_eq!(zero_count, 1, "thickness {t}");
            assert_eq!(positive_count, 4, "thickness {t}");
        }
    }

    #[test]
    fn bead_count_never_exceeds_max() {
        let strategy = Limited::new(3, Box::new(Distributed::new(400)));
        for t in (0..20_000i64).step_by(137) {
            assert!(strategy.optimal_bead_count(t) <= 3);
        }
    }
}
