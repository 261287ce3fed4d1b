//! Placement of bead-count transition regions along a skeleton thickness
//! profile (§4.A "Transition placement").

use crate::beading::BeadingStrategy;
use crate::geometry::skeleton::ThicknessProfile;

/// A contiguous skeleton interval over which the bead count smoothly
/// changes from `lower_bead_count` to `lower_bead_count + 1` (or back).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionRegion {
    pub lower_bead_count: usize,
    pub start_arc_length: f64,
    pub end_arc_length: f64,
    /// The arc length at which the profile's thickness exactly equals
    /// `transition_thickness(lower_bead_count)`.
    pub crossing_arc_length: f64,
}

/// Scans a thickness profile for every point at which `optimal_bead_count`
/// changes between adjacent samples, and places a transition region of
/// length `transitioning_length(n)` anchored so that `transition_anchor(n)`
/// of its length (counted from the lower-count end) lands on the precise
/// crossing point.
pub fn find_transitions(
    strategy: &dyn BeadingStrategy,
    profile: &ThicknessProfile,
) -> Vec<TransitionRegion> {
    let samples = profile.samples();
    if samples.len() < 2 {
        return Vec::new();
    }

    let mut regions = Vec::new();
    for w in samples.windows(2) {
        let (a, b) = (w[0], w[1]);
        let count_a = strategy.optimal_bead_count(a.thickness);
        let count_b = strategy.optimal_bead_count(b.thickness);
        if count_a == count_b {
            continue;
        }
        let lower = count_a.min(count_b);
        let threshold = strategy.transition_thickness(lower);

        let span_t = b.thickness - a.thickness;
        let crossing = if span_t == 0 {
            (a.arc_length + b.arc_length) / 2.0
        } else {
            let t = ((threshold - a.thickness) as f64 / span_t as f64).clamp(0.0, 1.0);
            a.arc_length + (b.arc_length - a.arc_length) * t
        };

        let length = strategy.transitioning_length(lower) as f64;
        let anchor = strategy.transition_anchor(lower).clamp(0.0, 1.0);

        // `anchor` is measured from the end of the region where the bead
        // count is still `lower`. That end is at `a` when the count rises
        // going forward, and at `b` when it falls.
        let lower_end_at_a = count_a == lower;
        let start = if lower_end_at_a {
            crossing - anchor * length
        } else {
            crossing - (1.0 - anchor) * length
        };

        regions.push(TransitionRegion {
            lower_bead_count: lower,
            start_arc_length: start,
            end_arc_length: start + length,
            crossing_arc_length: crossing,
        });
    }
    regions
}
