//! Per-segment trapezoidal speed profile and the jerk-limited junction-speed
//! reverse/forward pass (§4.D, grounded on `original_source/src/timeEstimate.h`).
//!
//! Jerk here is the classical Marlin sense named in the spec: the maximum
//! instantaneous speed change permitted at a junction between two motion
//! segments, not true (derivative-of-acceleration) jerk.

/// One motion segment's static shape, before junction speeds are resolved.
#[derive(Debug, Clone, Copy)]
pub struct SegmentInput {
    pub length: f64,
    pub direction: (f64, f64),
    pub nominal_speed: f64,
}

/// The resolved accelerate/cruise/decelerate breakdown of one segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrapezoidProfile {
    pub accelerate_distance: f64,
    pub cruise_distance: f64,
    pub decelerate_distance: f64,
    pub accelerate_time: f64,
    pub cruise_time: f64,
    pub decelerate_time: f64,
    pub cruise_speed: f64,
}

impl TrapezoidProfile {
    pub fn total_time(&self) -> f64 {
        self.accelerate_time + self.cruise_time + self.decelerate_time
    }

    pub fn total_distance(&self) -> f64 {
        self.accelerate_distance + self.cruise_distance + self.decelerate_distance
    }
}

/// Computes the trapezoid for one segment of `length`, entering at
/// `entry_speed` and required to leave at `exit_speed`, targeting
/// `nominal_speed` with at most `acceleration`.
///
/// If the segment is too short to reach `nominal_speed` given its entry and
/// exit speeds, the cruise phase collapses and the segment peaks at
/// whatever speed the available distance allows (a "triangle" profile).
pub fn trapezoid_for_segment(
    length: f64,
    entry_speed: f64,
    exit_speed: f64,
    nominal_speed: f64,
    acceleration: f64,
) -> TrapezoidProfile {
    let length = length.max(0.0);
    let accel = acceleration.max(1e-9);
    let nominal_speed = nominal_speed.max(entry_speed).max(exit_speed);

    let full_accel_distance = ((nominal_speed.powi(2) - entry_speed.powi(2)) / (2.0 * accel)).max(0.0);
    let full_decel_distance = ((nominal_speed.powi(2) - exit_speed.powi(2)) / (2.0 * accel)).max(0.0);

    if full_accel_distance + full_decel_distance <= length {
        let cruise_distance = length - full_accel_distance - full_decel_distance;
        TrapezoidProfile {
            accelerate_distance: full_accel_distance,
            cruise_distance,
            decelerate_distance: full_decel_distance,
            accelerate_time: (nominal_speed - entry_speed) / accel,
            cruise_time: cruise_distance / nominal_speed.max(1e-9),
            decelerate_time: (nominal_speed - exit_speed) / accel,
            cruise_speed: nominal_speed,
        }
    } else {
        let peak_speed_sq = (2.0 * accel * length + entry_speed.powi(2) + exit_speed.powi(2)) / 2.0;
        let peak_speed = peak_speed_sq.max(0.0).sqrt().max(entry_speed).max(exit_speed);
        let accel_distance = ((peak_speed.powi(2) - entry_speed.powi(2)) / (2.0 * accel)).max(0.0).min(length);
        let decel_distance = (length - accel_distance).max(0.0);
        TrapezoidProfile {
            accelerate_distance: accel_distance,
            cruise_distance: 0.0,
            decelerate_distance: decel_distance,
            accelerate_time: (peak_speed - entry_speed) / accel,
            cruise_time: 0.0,
            decelerate_time: (peak_speed - exit_speed) / accel,
            cruise_speed: peak_speed,
        }
    }
}

/// The maximum junction speed two adjacent segments can share without
/// exceeding `jerk`'s instantaneous-speed-change budget. Collinear
/// segments (no direction change) are unconstrained by jerk.
pub fn junction_speed_limit(
    jerk: f64,
    direction_a: (f64, f64),
    direction_b: (f64, f64),
    speed_a: f64,
    speed_b: f64,
) -> f64 {
    let cos_theta = (direction_a.0 * direction_b.0 + direction_a.1 * direction_b.1).clamp(-1.0, 1.0);
    let half_angle_sin = ((1.0 - cos_theta) / 2.0).max(0.0).sqrt();
    let max_speed = if half_angle_sin < 1e-9 {
        f64::INFINITY
    } else {
        jerk / (2.0 * half_angle_sin)
    };
    max_speed.min(speed_a).min(speed_b)
}

/// Resolves the achievable speed at every junction of a chain of segments,
/// given the speeds the segments' own nominal speed and jerk allow at each
/// internal junction, and fixed `start_speed`/`end_speed` boundary
/// conditions (e.g. 0 at rest, or a carried-over speed from a previous
/// plan).
///
/// Returns `segments.len() + 1` junction speeds: index `i` is the speed at
/// the start of segment `i` (so index `0` is `start_speed` and the last
/// index is `end_speed`, both possibly clamped down further by what
/// deceleration/acceleration over the adjoining segment's length allows).
pub fn plan_junction_speeds(
    segments: &[SegmentInput],
    jerk: f64,
    acceleration: f64,
    start_speed: f64,
    end_speed: f64,
) -> Vec<f64> {
    let n = segments.len();
    if n == 0 {
        return vec![start_speed.min(end_speed)];
    }

    let mut junctions = vec![0.0; n + 1];
    junctions[0] = start_speed;
    junctions[n] = end_speed;
    for i in 1..n {
        junctions[i] = junction_speed_limit(
            jerk,
            segments[i - 1].direction,
            segments[i].direction,
            segments[i - 1].nominal_speed,
            segments[i].nominal_speed,
        );
    }

    // Reverse pass: a junction's speed must not exceed what the segment
    // after it can decelerate from within its length.
    for i in (0..n).rev() {
        let max_entry = (junctions[i + 1].powi(2) + 2.0 * acceleration * segments[i].length)
            .max(0.0)
            .sqrt();
        junctions[i] = junctions[i].min(max_entry);
    }

    // Forward pass: a junction's speed must not exceed what the segment
    // before it can accelerate to within its length.
    for i in 0..n {
        let max_exit = (junctions[i].powi(2) + 2.0 * acceleration * segments[i].length)
            .max(0.0)
            .sqrt();
        junctions[i + 1] = junctions[i + 1].min(max_exit);
    }

    junctions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jerkless_single_segment_matches_scenario_four() {
        // Firmware: max speed 50, acceleration 50, jerk 0. Path from (0,0)
        // to (1000,0) at feed 50, starting from rest and ending at the
        // minimum planner speed floor of 0.05.
        let segments = [SegmentInput {
            length: 1000.0,
            direction: (1.0, 0.0),
            nominal_speed: 50.0,
        }];
        let junctions = plan_junction_speeds(&segments, 0.0, 50.0, 0.0, 0.05);
        let profile = trapezoid_for_segment(1000.0, junctions[0], junctions[1], 50.0, 50.0);

        assert!((profile.accelerate_time - 1.0).abs() < 1e-6);
        assert!((profile.total_time() - 20.99).abs() < 0.01);
    }

    #[test]
    fn sharp_turn_is_limited_by_jerk() {
        let segments = [
            SegmentInput { length: 1000.0, direction: (1.0, 0.0), nominal_speed: 100.0 },
            SegmentInput { length: 1000.0, direction: (0.0, 1.0), nominal_speed: 100.0 },
        ];
        let junctions = plan_junction_speeds(&segments, 10.0, 500.0, 0.0, 0.0);
        // A 90-degree turn with a small jerk should clamp the shared
        // junction speed well below the nominal 100.
        assert!(junctions[1] < 100.0);
        assert!(junctions[1] > 0.0);
    }

    #[test]
    fn straight_through_junction_is_unconstrained_by_jerk() {
        let segments = [
            SegmentInput { length: 1000.0, direction: (1.0, 0.0), nominal_speed: 50.0 },
            SegmentInput { length: 1000.0, direction: (1.0, 0.0), nominal_speed: 50.0 },
        ];
        let junctions = plan_junction_speeds(&segments, 1.0, 50.0, 0.0, 0.0);
        assert!((junctions[1] - 50.0).abs() < 1e-9);
    }

    #[test]
    fn short_segment_produces_a_triangle_profile() {
        let profile = trapezoid_for_segment(10.0, 0.0, 0.0, 100.0, 50.0);
        assert_eq!(profile.cruise_distance, 0.0);
        assert!(profile.cruise_speed < 100.0);
    }
}
