//! # Beading Strategy Chain
//!
//! Converts a `(thickness, desired bead count)` query into a concrete
//! [`Beading`]: the widths and toolpath offsets of the concentric wall
//! contours needed to fill a region of that thickness.
//!
//! ## Module Organization
//!
//! - **distributed**: `Distributed`, the base strategy (`width = T/n`, with
//!   the remainder redistributed symmetrically)
//! - **center_deviation**: `CenterDeviation`, the base strategy that holds
//!   every bead at exactly the configured optimal width
//! - **redistribute**: `Redistribute` wrapper, locks outer bead widths
//! - **widening**: `Widening` wrapper, guarantees hairline features print
//! - **outer_wall_inset**: `OuterWallInset` wrapper, shifts the outer offset
//! - **limited**: `Limited` wrapper, caps bead count with a marker bead
//! - **factory**: builds the standard wrapper chain
//! - **transitions**: places bead-count transition regions on a skeleton

pub mod center_deviation;
pub mod distributed;
pub mod factory;
pub mod limited;
pub mod outer_wall_inset;
pub mod redistribute;
pub mod transitions;
pub mod widening;

use smallvec::SmallVec;

/// Most walled regions carry well under eight beads; inline storage avoids
/// a heap allocation for the overwhelmingly common case.
pub type BeadVec<T> = SmallVec<[T; 8]>;

/// The output of a beading query for one thickness: widths and toolpath
/// offsets for every bead, outer to inner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Beading {
    pub total_thickness: i64,
    /// Bead widths, ordered outer → inner.
    pub bead_widths: BeadVec<i64>,
    /// Toolpath centreline offsets from the outline, ordered outer → inner.
    pub toolpath_locations: BeadVec<i64>,
    /// `total_thickness - sum(bead_widths)`, the gap this beading cannot
    /// account for (nonzero only once the bead-count cap is in effect).
    pub left_over: i64,
}

impl Beading {
    pub fn bead_count(&self) -> usize {
        self.bead_widths.len()
    }

    pub fn sum_widths(&self) -> i64 {
        self.bead_widths.iter().sum()
    }

    /// Checks the invariants every `Beading` must satisfy regardless of
    /// which strategy produced it (§8 item 1): widths sum to at most the
    /// total thickness, offsets are symmetric about the midline, and an odd
    /// bead count centres its middle bead exactly.
    #[cfg(test)]
    pub(crate) fn check_invariants(&self) {
        assert!(
            self.sum_widths() <= self.total_thickness,
            "sum of widths {} exceeds thickness {}",
            self.sum_widths(),
            self.total_thickness
        );
        assert_eq!(self.sum_widths() + self.left_over, self.total_thickness);

        let n = self.bead_widths.len();
        for i in 0..n {
            assert_eq!(
                self.bead_widths[i],
                self.bead_widths[n - 1 - i],
                "widths are not symmetric at index {i}"
            );
            assert_eq!(
                self.toolpath_locations[i],
                self.total_thickness - self.toolpath_locations[n - 1 - i],
                "offsets are not symmetric at index {i}"
            );
        }
        if n % 2 == 1 {
            assert_eq!(self.toolpath_locations[n / 2], self.total_thickness / 2);
        }
    }
}

/// A stateless capability, polymorphic over the four query operations of
/// §4.A. Implementations hold no interior mutability; wrappers own their
/// inner strategy by value and form a linear, non-shared chain.
pub trait BeadingStrategy: Send + Sync {
    /// Produces widths and offsets for thickness `thickness` with exactly
    /// `bead_count` beads.
    fn compute(&self, thickness: i64, bead_count: usize) -> Beading;

    /// The thickness at which `bead_count` beads print at their ideal
    /// width.
    fn optimal_thickness(&self, bead_count: usize) -> i64;

    /// The thickness at which it becomes better to switch from
    /// `bead_count` to `bead_count + 1` beads. Strictly increasing in
    /// `bead_count`.
    fn transition_thickness(&self, bead_count: usize) -> i64;

    /// The ideal bead count for thickness `thickness`.
    fn optimal_bead_count(&self, thickness: i64) -> usize;

    /// The arc length of skeleton over which a bead count of `bead_count`
    /// smoothly transitions to `bead_count + 1`.
    fn transitioning_length(&self, bead_count: usize) -> i64 {
        if bead_count == 0 {
            10
        } else {
            DEFAULT_TRANSITION_LENGTH
        }
    }

    /// The fractional position within the transition region, counted from
    /// the `bead_count`-bead end, at which thickness equals
    /// `transition_thickness(bead_count)`.
    fn transition_anchor(&self, bead_count: usize) -> f64 {
        let lower = self.optimal_thickness(bead_count);
        let upper = self.optimal_thickness(bead_count + 1);
        let transition_point = self.transition_thickness(bead_count);
        if upper == lower {
            return 0.5;
        }
        1.0 - (transition_point - lower) as f64 / (upper - lower) as f64
    }
}

/// Default transitioning length in micrometres, used whenever a strategy
/// does not override it. Grounded on `BeadingStrategy::getTransitioningLength`
/// in the original source, which falls back to a fixed default outside the
/// `bead_count == 0` special case.
pub const DEFAULT_TRANSITION_LENGTH: i64 = 400;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::beading::distributed::Distributed;

    #[test]
    fn transition_anchor_is_fraction_between_optimal_thicknesses() {
        let strategy = Distributed::new(400);
        let anchor = strategy.transition_anchor(2);
        assert!((0.0..=1.0).contains(&anchor));
    }
}
