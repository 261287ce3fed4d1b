//! # Layer-Plan Buffer
//!
//! Holds a rolling window of finished layer plans long enough that
//! temperature commands can be back-inserted at the moment heating or
//! cooling must begin (§4.E), grounded on
//! `original_source/src/LayerPlanBuffer.cpp`.
//!
//! ## Module Organization
//!
//! - **buffer**: `LayerPlanBuffer`: push/handle/flush, connecting travel
//!   between layers
//! - **temperature**: the standby/preheat profile math and
//!   `insert_temperature_commands`

pub mod buffer;
pub mod temperature;

use crate::geometry::IntPoint;
use crate::motion::extruder_plan::ExtruderPlan;

/// An ordered sequence of extruder plans for one layer.
#[derive(Debug, Clone)]
pub struct LayerPlan {
    pub z_height: i64,
    pub layer_thickness: i64,
    pub extruder_plans: Vec<ExtruderPlan>,
    pub last_planned_position: IntPoint,
    /// Index, within the flattened path list of the *next* layer, of the
    /// first travel destination — consulted when stitching a connecting
    /// travel move between layers.
    pub first_travel_destination_index: usize,
}

impl LayerPlan {
    pub fn new(z_height: i64, layer_thickness: i64) -> Self {
        Self {
            z_height,
            layer_thickness,
            extruder_plans: Vec::new(),
            last_planned_position: IntPoint::ZERO,
            first_travel_destination_index: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.extruder_plans.iter().all(|p| p.paths.is_empty())
    }

    pub fn total_time(&self) -> f64 {
        self.extruder_plans.iter().map(|p| p.layer_time()).sum()
    }
}
