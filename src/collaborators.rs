//! The three narrow contracts the core interacts through, besides
//! `Settings` (§6): per-layer geometry input, command emission, and
//! reading back an already-completed layer plan for bridge detection.

use crate::geometry::{IntPoint, Shape};
use crate::layer_plan::LayerPlan;

/// One layer's worth of input geometry, as returned by `get_layer`.
#[derive(Debug, Clone)]
pub struct LayerGeometry {
    pub outline: Shape,
    pub skin: Shape,
    pub infill: Shape,
    pub support: Shape,
    pub z: i64,
    pub layer_thickness: i64,
}

/// Supplies per-layer input geometry (§6.1). Implementors typically wrap a
/// mesh-slicing stage that sits outside this crate's scope.
pub trait LayerSource {
    fn get_layer(&self, layer_index: usize) -> anyhow::Result<LayerGeometry>;

    /// Total number of layers available, if known in advance.
    fn layer_count(&self) -> Option<usize> {
        None
    }
}

/// A single emitted instruction, matching §6.3's `emit_command(kind,
/// parameters)` contract. Order of emission to a `CommandSink` is the
/// contract the core guarantees.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Move { to: IntPoint },
    Extrude { to: IntPoint, width: i64 },
    SetTemperature { extruder: usize, temperature: f64, wait: bool },
    SetFan { speed: f64 },
    Retract,
    Unretract,
    ZHopStart,
    ZHopEnd,
    Comment(String),
}

/// Write-only output sink (§6.3). Plain byte/file emission is out of
/// scope; this trait is the seam a G-code writer attaches to.
pub trait CommandSink {
    fn emit_command(&mut self, command: Command);
}

/// Read-only access to a previously emitted layer's plan, consulted by the
/// bridge detector to see what infill the layer below actually printed
/// (§6.4). Only layers strictly below the one currently being planned are
/// ever queried.
pub trait LayerBelow {
    fn layer_below(&self, index: usize) -> Option<&LayerPlan>;
}

/// The simplest possible `LayerBelow`: a flat, append-only history of
/// completed plans, indexed by layer number.
#[derive(Debug, Clone, Default)]
pub struct PlanHistory {
    plans: Vec<LayerPlan>,
}

impl PlanHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, plan: LayerPlan) {
        self.plans.push(plan);
    }
}

impl LayerBelow for PlanHistory {
    fn layer_below(&self, index: usize) -> Option<&LayerPlan> {
        self.plans.get(index)
    }
}
