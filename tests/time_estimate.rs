//! §8 item 8 (time conservation across a layer) and Scenario 4's literal
//! total time for a single isolated extrude path.

use beadline::motion::estimate::{estimate_path, FirmwareLimits};
use beadline::motion::extruder_plan::build_plans;
use beadline::motion::{GCodePath, GCodePathKind, PathConfig, PrintFeatureType};
use beadline::IntPoint;

fn extrude_path(speed: f64, to: IntPoint) -> GCodePath {
    GCodePath {
        config: PathConfig {
            feature_type: PrintFeatureType::OuterWall,
            speed,
            acceleration: 50.0,
            jerk: 0.0,
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

fn travel_path(to: IntPoint) -> GCodePath {
    GCodePath {
        config: PathConfig {
            feature_type: PrintFeatureType::MoveCombing,
            speed: 150.0,
            acceleration: 50.0,
            jerk: 0.0,
            line_width: 0,
            layer_thickness: 200,
            flow_ratio: 1.0,
            fan_speed_override: None,
            is_bridge: false,
        },
        kind: GCodePathKind::Travel(to),
        retract: true,
        z_hop: false,
        spiralize: false,
        done: false,
    }
}

#[test]
fn scenario_4_single_extrude_path_total_time_is_about_21_seconds() {
    let firmware = FirmwareLimits {
        max_feedrate_xy: 50.0,
        max_feedrate_e: 50.0,
        max_acceleration: 50.0,
        max_jerk_xy: 0.0,
        min_planner_speed: FirmwareLimits::default().min_planner_speed,
    };
    let path = extrude_path(50.0, IntPoint::new(1_000_000, 0));
    let estimate = estimate_path(&path, &firmware, (0.0, 0.0));
    assert!((estimate.extrude_time - 20.99).abs() < 0.01);
}

#[test]
fn item_8_layer_time_equals_the_sum_of_its_paths_own_estimates() {
    let firmware = FirmwareLimits::default();
    let paths = vec![
        extrude_path(50.0, IntPoint::new(1_000_000, 0)),
        travel_path(IntPoint::new(1_000_000, 500_000)),
        extrude_path(50.0, IntPoint::new(2_000_000, 500_000)),
    ];

    let mut last_position = (0.0, 0.0);
    let mut independent_total = 0.0;
    for path in &paths {
        let estimate = estimate_path(path, &firmware, last_position);
        independent_total += estimate.total_time();
        if let Some(last) = path.points().last() {
            last_position = last.as_f64();
        }
    }

    let plans = build_plans(paths, |_| 0, |_| 200.0, &firmware);
    let plan_total: f64 = plans.iter().map(|p| p.layer_time()).sum();
    let path_times_total: f64 = plans.iter().flat_map(|p| p.path_times.iter()).sum();

    assert!((plan_total - independent_total).abs() < 1e-6);
    assert!((path_times_total - independent_total).abs() < 1e-6);
}
