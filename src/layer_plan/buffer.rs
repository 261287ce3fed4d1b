//! `LayerPlanBuffer`: push/handle/flush, connecting travel between layers
//! (§4.E), grounded on `original_source/src/LayerPlanBuffer.cpp`.

use crate::geometry::IntPoint;
use crate::layer_plan::temperature::{insert_temperature_commands, TemperatureSettings};
use crate::layer_plan::LayerPlan;
use crate::motion::{GCodePath, GCodePathKind, PathConfig, PrintFeatureType};
use crate::settings::{names, Settings};
use tracing::debug;

/// A sink that finished layer plans are emitted to once they leave the
/// buffer's rolling window. Kept as a trait rather than a concrete writer
/// since G-code emission itself is out of scope here.
pub trait LayerSink {
    fn accept(&mut self, layer: LayerPlan);
}

/// Holds back up to `capacity` layer plans so that temperature commands for
/// an upcoming layer can be back-inserted into an earlier, already-finished
/// one (§4.E).
pub struct LayerPlanBuffer {
    capacity: usize,
    settings: TemperatureSettings,
    /// Whether a connecting travel move should always retract, regardless
    /// of the next layer's first feature (§4.E, `retract_at_layer_change`).
    retract_at_layer_change: bool,
    buffered: Vec<LayerPlan>,
}

impl LayerPlanBuffer {
    pub fn new(capacity: usize, settings: TemperatureSettings, print_settings: &dyn Settings) -> Self {
        assert!(capacity >= 1, "a layer-plan buffer needs room for at least one layer");
        let retract_at_layer_change = print_settings.get_bool(names::RETRACT_AT_LAYER_CHANGE).unwrap_or(false);
        Self { capacity, settings, retract_at_layer_change, buffered: Vec::new() }
    }

    /// Adds a finished layer to the buffer, stitching a connecting travel
    /// move onto the tail of the previous layer if one is present, then
    /// evicts the oldest layer to `sink` if the buffer is now over
    /// capacity.
    pub fn handle(&mut self, layer: LayerPlan, sink: &mut impl LayerSink) {
        self.push(layer);
        insert_temperature_commands(&mut self.buffered, &self.settings);
        while self.buffered.len() > self.capacity {
            let finished = self.buffered.remove(0);
            debug!(z_height = finished.z_height, "evicting layer plan from buffer");
            sink.accept(finished);
        }
    }

    fn push(&mut self, mut layer: LayerPlan) {
        if let Some(prev) = self.buffered.last_mut() {
            connect_layers(prev, &mut layer, self.retract_at_layer_change);
        }
        self.buffered.push(layer);
    }

    /// Emits every remaining buffered layer, in order, to `sink`. Called at
    /// the end of a job so the last few layers (which never got evicted by
    /// a `handle` call) still reach the sink.
    pub fn flush(&mut self, sink: &mut impl LayerSink) {
        insert_temperature_commands(&mut self.buffered, &self.settings);
        for layer in self.buffered.drain(..) {
            sink.accept(layer);
        }
    }
}

/// Appends a travel move to the end of `prev` that carries the nozzle from
/// its last planned position to the first destination of `next`, so the
/// two layers aren't left implicitly disconnected. Retracts if the
/// extruder settings demand a retract on every layer change, or if `next`'s
/// first feature is an outer wall, since starting a visible wall from an
/// un-retracted travel risks stringing (§4.E "connecting travel").
fn connect_layers(prev: &mut LayerPlan, next: &mut LayerPlan, retract_at_layer_change: bool) {
    let destination = first_destination(next);
    let Some(destination) = destination else { return };

    let retract = retract_at_layer_change || first_feature_is_outer_wall(next);

    let travel = GCodePath {
        config: PathConfig {
            feature_type: PrintFeatureType::MoveCombing,
            speed: 0.0,
            acceleration: 0.0,
            jerk: 0.0,
            line_width: 0,
            layer_thickness: prev.layer_thickness,
            flow_ratio: 0.0,
            fan_speed_override: None,
            is_bridge: false,
        },
        kind: GCodePathKind::Travel(destination),
        retract,
        z_hop: false,
        spiralize: false,
        done: false,
    };

    if let Some(plan) = prev.extruder_plans.last_mut() {
        plan.paths.push(travel);
        plan.path_times.push(0.0);
        next.first_travel_destination_index = 0;
    }
    prev.last_planned_position = destination;
}

fn first_destination(layer: &LayerPlan) -> Option<IntPoint> {
    layer
        .extruder_plans
        .iter()
        .find_map(|plan| plan.paths.first())
        .and_then(|path| path.points().into_iter().next())
}

fn first_feature_is_outer_wall(layer: &LayerPlan) -> bool {
    layer
        .extruder_plans
        .iter()
        .find_map(|plan| plan.paths.first())
        .map(|path| path.config.feature_type == PrintFeatureType::OuterWall)
        .unwrap_or(false)
}
