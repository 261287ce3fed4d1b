//! Wrapper that shifts the outermost wall's toolpath inward by a fixed
//! distance, clamped to the region midline — used when the outer wall's
//! nominal centreline should sit slightly inside the model outline (e.g. to
//! hide seams or compensate for outer-wall extrusion bulge).
//!
//! Grounded on `original_source/src/BeadingStrategy/OuterWallInsetBeadingStrategy.cpp`.

use crate::beading::{Beading, BeadingStrategy};

pub struct OuterWallInset {
    pub offset: i64,
    inner: Box<dyn BeadingStrategy>,
}

impl OuterWallInset {
    pub fn new(offset: i64, inner: Box<dyn BeadingStrategy>) -> Self {
        Self { offset, inner }
    }
}

impl BeadingStrategy for OuterWallInset {
    fn compute(&self, thickness: i64, bead_count: usize) -> Beading {
        let mut result = self.inner.compute(thickness, bead_count);

        // Marker beads (zero width) don't count toward "the outer wall";
        // only shift the offset if there are at least two real beads.
        let real_beads = result.bead_widths.iter().filter(|&&w| w > 0).count();
        if real_beads < 2 || result.toolpath_locations.is_empty() {
            return result;
        }

        let outer_idx = result
            .bead_widths
            .iter()
            .position(|&w| w > 0)
            .unwrap_or(0);
        result.toolpath_locations[outer_idx] =
            (result.toolpath_locations[outer_idx] + self.offset).min(thickness / 2);
        result
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
