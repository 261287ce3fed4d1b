//! The "centre-deviation" base strategy: every bead holds exactly the
//! configured optimal width except a possible absorbing middle bead: no
//! bead is ever narrower than optimal to keep the wall's outer appearance
//! uniform, at the cost of letting the total thickness deviate from what a
//! `Distributed` strategy would fill exactly.
//!
//! Grounded on `original_source/src/BeadingStrategy/CenterDeviationBeadingStrategy.cpp`.

use crate::beading::{Beading, BeadingStrategy, BeadVec};

#[derive(Debug, Clone, Copy)]
pub struct CenterDeviation {
    pub optimal_width: i64,
    /// Minimum thickness above a transition point needed to justify
    /// *splitting* an existing middle bead into two (odd → even bead
    /// count).
    pub minimum_line_width_split: i64,
    /// Minimum thickness above a transition point needed to justify
    /// *adding* a new centre bead (even → odd bead count).
    pub minimum_line_width_add: i64,
}

impl CenterDeviation {
    pub fn new(optimal_width: i64, split_fraction: f64, add_fraction: f64) -> Self {
        Self {
            optimal_width,
            minimum_line_width_split: (optimal_width as f64 * split_fraction).round() as i64,
            minimum_line_width_add: (optimal_width as f64 * add_fraction).round() as i64,
        }
    }
}

impl BeadingStrategy for CenterDeviation {
    fn compute(&self, thickness: i64, bead_count: usize) -> Beading {
        if bead_count == 0 {
            return Beading {
                total_thickness: thickness,
                bead_widths: BeadVec::new(),
                toolpath_locations: BeadVec::new(),
                left_over: thickness,
            };
        }

        let n = bead_count;
        let half = n / 2;
        let mut widths = BeadVec::from_elem(self.optimal_width, n);
        let mut offsets = BeadVec::from_elem(0, n);

        for i in 0..half {
            offsets[i] = self.optimal_width * (2 * i as i64 + 1) / 2;
        }
        if n % 2 == 1 {
            widths[half] = thickness - (n as i64 - 1) * self.optimal_width;
            offsets[half] = thickness / 2;
        }
        for i in 0..half {
            widths[n - 1 - i] = widths[i];
            offsets[n - 1 - i] = thickness - offsets[i];
        }

        let left_over = thickness - widths.iter().sum::<i64>();
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
        let margin = if bead_count % 2 == 1 {
            self.minimum_line_width_split
        } else {
            self.minimum_line_width_add
        };
        self.optimal_thickness(bead_count) + margin
    }

    fn optimal_bead_count(&self, thickness: i64) -> usize {
        let mut n = 0usize;
        // transition_thickness is strictly increasing, so this terminates;
        // the +2 margin guards against a misconfigured (non-monotonic)
        // strategy looping forever.
        let max_iterations = (thickness / self.optimal_width.max(1) + 2) as usize;
        for _ in 0..max_iterations {
            let threshold = self.transition_thickness(n);
            let crosses = if n % 2 == 0 {
                thickness >= threshold
            } else {
                thickness > threshold
            };
            if crosses {
                n += 1;
            } else {
                break;
            }
        }
        n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_3_center_deviation() {
        let strategy = CenterDeviation::new(400, 0.5, 0.5);
        assert_eq!(strategy.optimal_bead_count(0), 0);
        assert_eq!(strategy.optimal_bead_count(200), 1);
        assert_eq!(strategy.optimal_bead_count(600), 1);
        let at_700 = strategy.optimal_bead_count(700);
        assert!(at_700 == 1 || at_700 == 2);
        assert_eq!(strategy.optimal_bead_count(800), 2);
    }

    #[test]
    fn compute_keeps_outer_beads_at_optimal_width() {
        let strategy = CenterDeviation::new(400, 0.5, 0.5);
        let beading = strategy.compute(1300, 3);
        assert_eq!(beading.bead_widths[0], 400);
        assert_eq!(beading.bead_widths[2], 400);
        assert_eq!(beading.bead_widths[1], 1300 - 800);
        beading.check_invariants();
    }
}
