//! `TimeMaterialEstimate` and per-path time/material estimation (§4.D,
//! §9 "Time estimates as sum type").

use crate::motion::trapezoid::{plan_junction_speeds, trapezoid_for_segment, SegmentInput};
use crate::motion::{GCodePath, GCodePathKind};
use std::ops::{Add, Sub};

/// The minimum speed a segment is allowed to decelerate to rather than a
/// full stop, matching the firmware's planner floor.
pub const MIN_PLANNER_SPEED: f64 = 0.05;

/// Per-axis feedrate/acceleration/jerk limits consulted when estimating a
/// path's time. A single scalar XY jerk and acceleration is used for
/// junction-speed limiting, per §4.D's "a common maximum acceleration".
#[derive(Debug, Clone, Copy)]
pub struct FirmwareLimits {
    pub max_feedrate_xy: f64,
    pub max_feedrate_e: f64,
    pub max_acceleration: f64,
    pub max_jerk_xy: f64,
    pub min_planner_speed: f64,
}

impl Default for FirmwareLimits {
    fn default() -> Self {
        Self {
            max_feedrate_xy: 300.0,
            max_feedrate_e: 50.0,
            max_acceleration: 3000.0,
            max_jerk_xy: 20.0,
            min_planner_speed: MIN_PLANNER_SPEED,
        }
    }
}

/// The four time/material components of a path or plan's cost, addable and
/// subtractable componentwise rather than modeled as a class hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TimeMaterialEstimate {
    pub extrude_time: f64,
    pub unretracted_travel_time: f64,
    pub retracted_travel_time: f64,
    pub material: f64,
}

impl TimeMaterialEstimate {
    pub fn total_time(&self) -> f64 {
        self.extrude_time + self.unretracted_travel_time + self.retracted_travel_time
    }
}

impl Add for TimeMaterialEstimate {
    type Output = TimeMaterialEstimate;
    fn add(self, rhs: TimeMaterialEstimate) -> TimeMaterialEstimate {
        TimeMaterialEstimate {
            extrude_time: self.extrude_time + rhs.extrude_time,
            unretracted_travel_time: self.unretracted_travel_time + rhs.unretracted_travel_time,
            retracted_travel_time: self.retracted_travel_time + rhs.retracted_travel_time,
            material: self.material + rhs.material,
        }
    }
}

impl Sub for TimeMaterialEstimate {
    type Output = TimeMaterialEstimate;
    fn sub(self, rhs: TimeMaterialEstimate) -> TimeMaterialEstimate {
        TimeMaterialEstimate {
            extrude_time: self.extrude_time - rhs.extrude_time,
            unretracted_travel_time: self.unretracted_travel_time - rhs.unretracted_travel_time,
            retracted_travel_time: self.retracted_travel_time - rhs.retracted_travel_time,
            material: self.material - rhs.material,
        }
    }
}

fn segment_inputs(points: &[(f64, f64)], nominal_speed: f64) -> Vec<SegmentInput> {
    points
        .windows(2)
        .map(|w| {
            let (ax, ay) = w[0];
            let (bx, by) = w[1];
            let (dx, dy) = (bx - ax, by - ay);
            let length = (dx * dx + dy * dy).sqrt();
            let direction = if length < 1e-9 { (1.0, 0.0) } else { (dx / length, dy / length) };
            SegmentInput { length, direction, nominal_speed }
        })
        .collect()
}

/// Estimates one path's time and material cost in isolation: entry speed
/// is rest (0), exit speed is the firmware's minimum planner speed floor,
/// and internal junctions are jerk-limited (§4.D steps 1-4).
///
/// This treats each path as printed standalone rather than threading
/// carried-over entry/exit speeds across an entire plan; `extruder_plan`
/// builds on this per-path estimate when assembling a full plan.
pub fn estimate_path(path: &GCodePath, firmware: &FirmwareLimits, last_position: (f64, f64)) -> TimeMaterialEstimate {
    let mut points = vec![last_position];
    match &path.kind {
        GCodePathKind::Extrude(pts) => {
            points.extend(pts.iter().map(|p| p.as_f64()));
        }
        GCodePathKind::Travel(dest) => {
            points.push(dest.as_f64());
        }
    }

    if points.len() < 2 {
        return TimeMaterialEstimate::default();
    }

    let nominal_speed = path.config.speed.min(firmware.max_feedrate_xy).max(firmware.min_planner_speed);
    let segments = segment_inputs(&points, nominal_speed);
    let junctions = plan_junction_speeds(
        &segments,
        firmware.max_jerk_xy,
        firmware.max_acceleration,
        0.0,
        firmware.min_planner_speed,
    );

    let mut time = 0.0;
    let mut material = 0.0;
    for (i, segment) in segments.iter().enumerate() {
        let profile = trapezoid_for_segment(
            segment.length,
            junctions[i],
            junctions[i + 1],
            nominal_speed,
            firmware.max_acceleration,
        );
        time += profile.total_time();
        if path.is_extrusion() {
            let cross_section = path.config.line_width as f64 * path.config.layer_thickness as f64;
            material += segment.length * cross_section * path.config.flow_ratio;
        }
    }

    let mut estimate = TimeMaterialEstimate::default();
    if path.is_extrusion() {
        estimate.extrude_time = time;
        estimate.material = material;
    } else if path.retract {
        estimate.retracted_travel_time = time;
    } else {
        estimate.unretracted_travel_time = time;
    }
    estimate
}
