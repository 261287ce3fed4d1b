//! §8 item 7: every extruding plan is preceded, somewhere earlier in the
//! buffered stream, by a temperature command that brought its extruder up
//! to at least its required start temperature. Also re-verifies Scenario
//! 5's literal cool-down/preheat temperatures at the integration level.

use beadline::geometry::IntPoint;
use beadline::layer_plan::buffer::LayerPlanBuffer;
use beadline::layer_plan::LayerPlan;
use beadline::motion::estimate::TimeMaterialEstimate;
use beadline::motion::extruder_plan::{ExtruderPlan, TemperatureInsert};
use beadline::motion::{GCodePath, GCodePathKind, PathConfig, PrintFeatureType};

fn plan_with_duration(extruder_nr: usize, required_temp: f64, extrusion_temp: f64, duration: f64, path_count: usize) -> ExtruderPlan {
    let mut plan = ExtruderPlan::new(extruder_nr, required_temp);
    plan.extrusion_temperature = Some(extrusion_temp);
    plan.estimate = TimeMaterialEstimate { extrude_time: duration, ..Default::default() };
    let per_path = duration / path_count as f64;
    plan.path_times = vec![per_path; path_count];
    plan.paths = (0..path_count)
        .map(|_| GCodePath {
            config: PathConfig {
                feature_type: PrintFeatureType::OuterWall,
                speed: 50.0,
                acceleration: 500.0,
                jerk: 5.0,
                line_width: 400,
                layer_thickness: 200,
                flow_ratio: 1.0,
                fan_speed_override: None,
                is_bridge: false,
            },
            kind: GCodePathKind::Travel(IntPoint::ZERO),
            retract: false,
            z_hop: false,
            spiralize: false,
            done: false,
        })
        .collect();
    plan
}

fn layer_with_plans(plans: Vec<ExtruderPlan>) -> LayerPlan {
    LayerPlan { z_height: 0, layer_thickness: 200, extruder_plans: plans, last_planned_position: IntPoint::ZERO, first_travel_destination_index: 0 }
}

/// A flat position in the buffered stream: which plan, and where within it.
type StreamPos = (usize, usize, f64);

fn plan_start(flat_idx: usize) -> StreamPos {
    (flat_idx, 0, 0.0)
}

fn precedes_or_equals(a: StreamPos, b: StreamPos) -> bool {
    if a.0 != b.0 {
        return a.0 < b.0;
    }
    if a.1 != b.1 {
        return a.1 < b.1;
    }
    a.2 <= b.2
}

#[test]
fn item_7_every_plan_is_preceded_by_a_qualifying_temperature_command() {
    let a = plan_with_duration(0, 190.0, 190.0, 60.0, 3);
    let b = plan_with_duration(1, 200.0, 200.0, 20.0, 4);
    let c = plan_with_duration(0, 210.0, 210.0, 10.0, 2);
    let mut layers = vec![layer_with_plans(vec![a, b, c])];

    let settings = beadline::layer_plan::temperature::TemperatureSettings {
        standby_temperature: 175.0,
        nozzle_heat_up_speed: (210.0 - 175.0) / 14.0,
        min_cool_heat_time_window: 1.0,
        safety_margin: 0.0,
    };
    beadline::layer_plan::temperature::insert_temperature_commands(&mut layers, &settings);

    // Flatten every (plan, insert) pair into a stream position.
    let mut events: Vec<(StreamPos, TemperatureInsert)> = Vec::new();
    for (flat_idx, plan) in layers[0].extruder_plans.iter().enumerate() {
        for insert in &plan.temperature_inserts {
            events.push(((flat_idx, insert.path_index, insert.delta), *insert));
        }
    }

    for (flat_idx, plan) in layers[0].extruder_plans.iter().enumerate() {
        if plan.paths.is_empty() {
            continue;
        }
        let start = plan_start(flat_idx);
        let satisfied = events.iter().any(|(pos, insert)| {
            insert.extruder == plan.extruder_nr
                && insert.temperature >= plan.required_start_temperature
                && precedes_or_equals(*pos, start)
        });
        assert!(satisfied, "plan {flat_idx} (extruder {}) has no qualifying temperature command before it", plan.extruder_nr);
    }
}

#[test]
fn scenario_5_literal_cooldown_and_preheat_temperatures() {
    let a = plan_with_duration(0, 190.0, 190.0, 60.0, 3);
    let b = plan_with_duration(1, 200.0, 200.0, 20.0, 4);
    let c = plan_with_duration(0, 210.0, 210.0, 10.0, 2);
    let mut layers = vec![layer_with_plans(vec![a, b, c])];

    let settings = beadline::layer_plan::temperature::TemperatureSettings {
        standby_temperature: 175.0,
        nozzle_heat_up_speed: (210.0 - 175.0) / 14.0,
        min_cool_heat_time_window: 1.0,
        safety_margin: 0.0,
    };
    beadline::layer_plan::temperature::insert_temperature_commands(&mut layers, &settings);

    let a_inserts = &layers[0].extruder_plans[0].temperature_inserts;
    let cooldown = a_inserts.iter().find(|i| i.temperature == 175.0).expect("cooldown present");
    assert_eq!(cooldown.extruder, 0);

    let b_inserts = &layers[0].extruder_plans[1].temperature_inserts;
    let preheat = b_inserts.iter().find(|i| i.temperature == 210.0).expect("preheat present");
    assert_eq!(preheat.extruder, 0, "preheat targets extruder 0 even though it's stored in extruder 1's plan");
}

#[test]
fn buffer_runs_temperature_insertion_through_handle_and_flush() {
    struct CollectingSink {
        layers: Vec<LayerPlan>,
    }
    impl beadline::layer_plan::buffer::LayerSink for CollectingSink {
        fn accept(&mut self, layer: LayerPlan) {
            self.layers.push(layer);
        }
    }

    let settings = beadline::layer_plan::temperature::TemperatureSettings::default();
    let mut buffer = LayerPlanBuffer::new(2, settings, &beadline::settings::StaticSettings::new());
    let mut sink = CollectingSink { layers: Vec::new() };

    buffer.handle(layer_with_plans(vec![plan_with_duration(0, 200.0, 200.0, 10.0, 1)]), &mut sink);
    buffer.handle(layer_with_plans(vec![plan_with_duration(1, 205.0, 205.0, 10.0, 1)]), &mut sink);
    buffer.handle(layer_with_plans(vec![plan_with_duration(0, 210.0, 210.0, 10.0, 1)]), &mut sink);
    buffer.flush(&mut sink);

    assert_eq!(sink.layers.len(), 3);
    // Layer 0 stayed buffered across all three `handle()` calls before
    // being evicted; its insert list must still reflect a single pass, not
    // one copy per call that saw it.
    let first_inserts = &sink.layers[0].extruder_plans[0].temperature_inserts;
    let initial_waits: Vec<_> = first_inserts.iter().filter(|i| i.wait && i.temperature == 200.0).collect();
    assert_eq!(initial_waits.len(), 1, "expected exactly one initial temperature wait, got {initial_waits:?}");
}
