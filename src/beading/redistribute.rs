//! Wrapper that locks the two outermost beads to a fixed "outer optimal"
//! width once there is enough thickness to afford it, handing whatever
//! thickness remains to the wrapped (inner) strategy.
//!
//! Grounded on `original_source/src/BeadingStrategy/RedistributeBeadingStrategy.cpp`:
//! `getOptimalOuterBeadWidth` for the lock condition, `resetToolPathLocations`
//! for recomputing offsets from the assembled width sequence rather than
//! stitching the inner strategy's own offsets, and `validateInnerBeadWidths`
//! for dropping an inner bead that came out too thin.

use crate::beading::distributed::offsets_from_widths;
use crate::beading::{Beading, BeadingStrategy, BeadVec};

pub struct Redistribute {
    pub outer_width: i64,
    pub minimum_width_inner: i64,
    inner: Box<dyn BeadingStrategy>,
}

impl Redistribute {
    pub fn new(outer_width: i64, minimum_width_inner: i64, inner: Box<dyn BeadingStrategy>) -> Self {
        Self {
            outer_width,
            minimum_width_inner,
            inner,
        }
    }

    fn outer_beads_locked(&self, thickness: i64) -> bool {
        thickness >= 2 * self.outer_width + self.minimum_width_inner
    }
}

impl BeadingStrategy for Redistribute {
    fn compute(&self, thickness: i64, bead_count: usize) -> Beading {
        if bead_count < 2 || !self.outer_beads_locked(thickness) {
            return self.inner.compute(thickness, bead_count);
        }

        let inner_count = bead_count - 2;
        let inner_thickness = thickness - 2 * self.outer_width;
        let inner = self.inner.compute(inner_thickness, inner_count);

        if inner
            .bead_widths
            .iter()
            .any(|&w| w > 0 && w < self.minimum_width_inner)
        {
            // An inner bead came out too thin to print; drop one bead and
            // let the next-larger outer beads absorb more of the thickness.
            return self.compute(thickness, bead_count - 1);
        }

        let mut widths: BeadVec<i64> = BeadVec::with_capacity(bead_count);
        widths.push(self.outer_width);
        widths.extend(inner.bead_widths.iter().copied());
        widths.push(self.outer_width);

        let offsets = offsets_from_widths(&widths, thickness);

        Beading {
            total_thickness: thickness,
            bead_widths: widths,
            toolpath_locations: offsets,
            left_over: inner.left_over,
        }
    }

    fn optimal_thickness(&self, bead_count: usize) -> i64 {
        self.inner.optimal_thickness(bead_count)
    }

    fn transition_thickness(&self, bead_count: usize) -> i64 {
        self.inner.transition_thickness(bead_count)
    }

    fn optimal_bead_count(&self, thickness: i64) -> usize {
        self.inner.optimal_bead_count(thickness)
    }
}
