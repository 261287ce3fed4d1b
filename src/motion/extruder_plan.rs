//! `ExtruderPlan` construction, minimum-layer-time speed scaling, and fan
//! speed interpolation (§4.D).

use crate::motion::estimate::{estimate_path, FirmwareLimits, TimeMaterialEstimate};
use crate::motion::GCodePath;
use tracing::debug;

/// One temperature command to be inserted before a given path, keyed by
/// `(path_index, delta)`: the command fires `delta` seconds after the
/// start of `paths[path_index]`. Inserts at the same `path_index` fire in
/// FIFO order (§9 "Temperature inserts").
///
/// `extruder` names which physical extruder the command addresses. It is
/// not always the extruder owning the plan the insert lives in: a preheat
/// for an upcoming extruder switch is frequently placed inside an
/// intervening plan belonging to a different extruder, so the owning
/// plan is only where the command sits in the stream, not who it's for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureInsert {
    pub extruder: usize,
    pub path_index: usize,
    pub delta: f64,
    pub temperature: f64,
    pub wait: bool,
}

/// An ordered sequence of paths produced by a single extruder on a single
/// layer, plus the temperature metadata carried alongside it.
#[derive(Debug, Clone)]
pub struct ExtruderPlan {
    pub extruder_nr: usize,
    pub paths: Vec<GCodePath>,
    /// Parallel to `paths`: each path's own estimated total time, needed to
    /// walk a plan backward by a time offset when placing preheat inserts.
    pub path_times: Vec<f64>,
    pub required_start_temperature: f64,
    pub extrusion_temperature: Option<f64>,
    pub prev_extruder_standby_temperature: Option<f64>,
    pub estimate: TimeMaterialEstimate,
    pub temperature_inserts: Vec<TemperatureInsert>,
}

impl ExtruderPlan {
    pub fn new(extruder_nr: usize, required_start_temperature: f64) -> Self {
        Self {
            extruder_nr,
            paths: Vec::new(),
            path_times: Vec::new(),
            required_start_temperature,
            extrusion_temperature: None,
            prev_extruder_standby_temperature: None,
            estimate: TimeMaterialEstimate::default(),
            temperature_inserts: Vec::new(),
        }
    }

    pub fn layer_time(&self) -> f64 {
        self.estimate.total_time()
    }

    /// Appends a temperature insert, preserving FIFO order (§9).
    pub fn insert_temperature(&mut self, insert: TemperatureInsert) {
        self.temperature_inserts.push(insert);
    }
}

/// Splits an ordered sequence of paths into per-extruder plans, starting a
/// new plan whenever the active extruder changes. `extruder_of` maps a
/// path index to the extruder it runs on, and `required_temperature`
/// supplies each plan's `required_start_temperature`.
pub fn build_plans(
    paths: Vec<GCodePath>,
    extruder_of: impl Fn(usize) -> usize,
    required_temperature: impl Fn(usize) -> f64,
    firmware: &FirmwareLimits,
) -> Vec<ExtruderPlan> {
    let mut plans: Vec<ExtruderPlan> = Vec::new();
    let mut last_position = (0.0, 0.0);

    for (i, path) in paths.into_iter().enumerate() {
        let extruder = extruder_of(i);
        let needs_new_plan = match plans.last() {
            Some(plan) => plan.extruder_nr != extruder,
            None => true,
        };
        if needs_new_plan {
            plans.push(ExtruderPlan::new(extruder, required_temperature(extruder)));
        }

        let estimate = estimate_path(&path, firmware, last_position);
        if let Some(last) = path.points().last() {
            last_position = last.as_f64();
        }

        let plan = plans.last_mut().unwrap();
        plan.estimate = plan.estimate + estimate;
        plan.path_times.push(estimate.total_time());
        plan.paths.push(path);
    }

    plans
}

/// If the sum of a layer's plan times falls below `min_layer_time`,
/// uniformly scales every extrusion path's speed down (never below
/// `min_speed`) and re-estimates until the layer time meets the target, or
/// until speeds have bottomed out at the floor.
///
/// Returns the total layer time after scaling.
pub fn scale_to_min_layer_time(
    plans: &mut [ExtruderPlan],
    firmware: &FirmwareLimits,
    min_layer_time: f64,
    min_speed: f64,
) -> f64 {
    let mut layer_time: f64 = plans.iter().map(|p| p.layer_time()).sum();
    if layer_time >= min_layer_time || layer_time <= 0.0 {
        return layer_time;
    }

    // Binary search a single uniform scale factor in (0, 1] applied to
    // every extrusion path's nominal speed, since re-estimating is cheap
    // and a closed-form inverse of the trapezoid isn't worth deriving.
    // Lower scale means slower speed means longer time, so `low` tracks
    // the largest scale tried that was still too fast (time too short).
    let mut low = 0.0_f64;
    let mut high = 1.0_f64;

    for _ in 0..24 {
        let mid = (low + high) / 2.0;
        let candidate_time = estimate_layer_time_at_scale(plans, firmware, mid, min_speed);
        if candidate_time < min_layer_time {
            high = mid;
        } else {
            low = mid;
        }
    }

    apply_scale(plans, firmware, low, min_speed);
    layer_time = plans.iter().map(|p| p.layer_time()).sum();
    debug!(layer_time, min_layer_time, scale = low, "scaled layer to minimum time");
    layer_time
}

fn estimate_layer_time_at_scale(
    plans: &[ExtruderPlan],
    firmware: &FirmwareLimits,
    scale: f64,
    min_speed: f64,
) -> f64 {
    let mut total = 0.0;
    let mut last_position = (0.0, 0.0);
    for plan in plans {
        for path in &plan.paths {
            let mut scaled = path.clone();
            if scaled.is_extrusion() {
                scaled.config.speed = (scaled.config.speed * scale).max(min_speed);
            }
            let estimate = estimate_path(&scaled, firmware, last_position);
            total += estimate.total_time();
            if let Some(last) = scaled.points().last() {
                last_position = last.as_f64();
            }
        }
    }
    total
}

fn apply_scale(plans: &mut [ExtruderPlan], firmware: &FirmwareLimits, scale: f64, min_speed: f64) {
    let mut last_position = (0.0, 0.0);
    for plan in plans.iter_mut() {
        let mut total = TimeMaterialEstimate::default();
        let mut path_times = Vec::with_capacity(plan.paths.len());
        for path in plan.paths.iter_mut() {
            if path.is_extrusion() {
                path.config.speed = (path.config.speed * scale).max(min_speed);
            }
            let estimate = estimate_path(path, firmware, last_position);
            total = total + estimate;
            path_times.push(estimate.total_time());
            if let Some(last) = path.points().last() {
                last_position = last.as_f64();
            }
        }
        plan.estimate = total;
        plan.path_times = path_times;
    }
}

/// Fan speed for a layer of the given duration: linear interpolation
/// between `fan_speed_min` at `min_layer_time_fan_max` and `fan_speed_max`
/// at `min_layer_time`; pinned to `fan_speed_max` below `min_layer_time`.
pub fn fan_speed_for_layer_time(
    layer_time: f64,
    min_layer_time: f64,
    min_layer_time_fan_max: f64,
    fan_speed_min: f64,
    fan_speed_max: f64,
) -> f64 {
    if layer_time <= min_layer_time {
        return fan_speed_max;
    }
    if layer_time >= min_layer_time_fan_max {
        return fan_speed_min;
    }
    let span = (min_layer_time_fan_max - min_layer_time).max(1e-9);
    let t = (layer_time - min_layer_time) / span;
    fan_speed_max + (fan_speed_min - fan_speed_max) * t
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::IntPoint;
    use crate::motion::{GCodePathKind, PathConfig, PrintFeatureType};

    fn extrude_path(speed: f64, to: IntPoint) -> GCodePath {
        GCodePath {
            config: PathConfig {
                feature_type: PrintFeatureType::OuterWall,
                speed,
                acceleration: 2000.0,
                jerk: 10.0,
                line_width: 400,
                layer_thickness: 200,
                flow_ratio: 1.0,
                fan_speed_override: None,
                is_bridge: false,
            },
            kind: GCodePathKind::Extrude(vec![to]),
            retract: false,
            z_hop: false,
            spiralize: false,
            done: false,
        }
    }

    #[test]
    fn build_plans_splits_on_extruder_change() {
        let paths = vec![
            extrude_path(50.0, IntPoint::new(1_000_000, 0)),
            extrude_path(50.0, IntPoint::new(2_000_000, 0)),
            extrude_path(50.0, IntPoint::new(3_000_000, 0)),
        ];
        let extruder_of = |i: usize| if i < 2 { 0 } else { 1 };
        let plans = build_plans(paths, extruder_of, |_| 200.0, &FirmwareLimits::default());
        assert_eq!(plans.len(), 2);
        assert_eq!(plans[0].paths.len(), 2);
        assert_eq!(plans[1].paths.len(), 1);
    }

    #[test]
    fn scaling_down_speed_increases_layer_time_toward_target() {
        let paths = vec![extrude_path(300.0, IntPoint::new(5_000_000, 0))];
        let mut plans = build_plans(paths, |_| 0, |_| 200.0, &FirmwareLimits::default());
        let original_time = plans[0].layer_time();
        let target = original_time * 4.0;
        let scaled_time = scale_to_min_layer_time(&mut plans, &FirmwareLimits::default(), target, 5.0);
        assert!(scaled_time >= original_time);
    }

    #[test]
    fn fan_speed_interpolates_between_bounds() {
        let fast = fan_speed_for_layer_time(5.0, 10.0, 20.0, 0.2, 1.0);
        assert_eq!(fast, 1.0);
        let slow = fan_speed_for_layer_time(30.0, 10.0, 20.0, 0.2, 1.0);
        assert_eq!(slow, 0.2);
        let mid = fan_speed_for_layer_time(15.0, 10.0, 20.0, 0.2, 1.0);
        assert!(mid > 0.2 && mid < 1.0);
    }
}
