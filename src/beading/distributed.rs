//! The base "distributed" strategy: every bead at a thickness-dependent
//! width of `T/n`, with the integer-division remainder spread symmetrically
//! rather than dumped onto one end.

use crate::beading::{Beading, BeadingStrategy, BeadVec};

/// `compute(T, n)` splits `T` evenly across `n` beads. Grounded on
/// `original_source/src/DistributedBeadingStrategy.cpp` for the
/// `optimal_thickness`/`transition_thickness`/`optimal_bead_count` family;
/// `compute` itself follows the spec's explicit Scenario 1 numbers (a
/// symmetric remainder split) rather than the literal source's plain
/// truncating division, which does not redistribute the remainder and
/// would violate the `Σwᵢ = T − left_over` invariant at unit precision.
#[derive(Debug, Clone, Copy)]
pub struct Distributed {
    pub optimal_width: i64,
}

impl Distributed {
    pub fn new(optimal_width: i64) -> Self {
        Self { optimal_width }
    }
}

impl BeadingStrategy for Distributed {
    fn compute(&self, thickness: i64, bead_count: usize) -> Beading {
        if bead_count == 0 {
            return Beading {
                total_thickness: thickness,
                bead_widths: BeadVec::new(),
                toolpath_locations: BeadVec::new(),
                left_over: thickness,
            };
        }
        let n = bead_count as i64;
        let base = thickness / n;
        let mut remainder = thickness - base * n;

        let mut widths: BeadVec<i64> = BeadVec::from_elem(base, bead_count);

        if bead_count % 2 == 1 && remainder > 0 {
            widths[bead_count / 2] += 1;
            remainder -= 1;
        }

        // Distribute the rest in symmetric pairs, working outward from the
        // centre so widths stay mirror-symmetric at every step.
        let mut pair_idx = (bead_count / 2) as i64 - 1;
        while remainder >= 2 && pair_idx >= 0 {
            let i = pair_idx as usize;
            widths[i] += 1;
            widths[bead_count - 1 - i] += 1;
            remainder -= 2;
            pair_idx -= 1;
        }

        let left_over = remainder.max(0);

        let offsets = offsets_from_widths(&widths, thickness);

        Beading {
            total_thickness: thickness,
            bead_widths: widths,
            toolpath_locations: offsets,
            left_over,
        }
    }

    fn optimal_thickness(&self, bead_count: usize) -> i64 {
        bead_count as i64 * self.optimal_width
    }

    fn transition_thickness(&self, bead_count: usize) -> i64 {
        bead_count as i64 * self.optimal_width + self.optimal_width / 2
    }

    fn optimal_bead_count(&self, thickness: i64) -> usize {
        ((thickness + self.optimal_width / 2) / self.optimal_width).max(0) as usize
    }
}

/// Computes symmetric toolpath offsets from a symmetric width sequence:
/// cumulative half-width sums for the first half, `T/2` for an odd middle
/// bead, and a mirror (`T - o`) for the second half.
pub(crate) fn offsets_from_widths(widths: &[i64], thickness: i64) -> BeadVec<i64> {
    let n = widths.len();
    let mut offsets = BeadVec::from_elem(0, n);
    let mut cumulative = 0i64;
    for i in 0..n / 2 {
        offsets[i] = cumulative + (widths[i] + 1) / 2;
        cumulative += widths[i];
    }
    if n % 2 == 1 {
        offsets[n / 2] = thickness / 2;
    }
    for i in 0..n / 2 {
        offsets[n - 1 - i] = thickness - offsets[i];
    }
    offsets
}
