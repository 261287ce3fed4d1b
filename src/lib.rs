//! # Beadline Slicer Core
//!
//! This library provides the core computational pipeline of an FDM
//! slicer: turning per-layer outline/skin/infill/support geometry into
//! ordered, time-estimated extrusion plans. It does not load models,
//! parse configuration files, or emit G-code text — those are external
//! collaborators (§1, §6).
//!
//! ## Architecture
//!
//! The pipeline is organized into five stages, one module tree each:
//!
//! - **geometry**: integer-coordinate points, polygons/shapes, segment
//!   queries, rotation, and the medial-axis thickness profile
//! - **beading**: the strategy chain that turns `(thickness, bead count)`
//!   into concrete wall widths and toolpath offsets
//! - **prime_tower**: per-layer prime/purge tower ring and sparse-infill
//!   planning
//! - **ordering**: nearest-neighbour path ordering with seam scoring, and
//!   bridge-angle detection
//! - **motion**: trapezoidal time/material estimation and per-extruder
//!   plan construction
//! - **layer_plan**: the rolling buffer that back-inserts temperature
//!   commands once heating/cooling windows are known
//!
//! Supporting these: **settings** (typed `get_setting` access),
//! **collaborators** (the narrow I/O contracts of §6), and **error**
//! (`SlicerError`).
//!
//! ## Pipeline Workflow
//!
//! A caller typically proceeds layer by layer:
//!
//! 1. Fetch a layer's geometry via a [`collaborators::LayerSource`].
//! 2. Query a [`beading::BeadingStrategy`] chain for each region's wall
//!    widths and offsets.
//! 3. Ask the [`prime_tower::PrimeTower`] whether this layer's extruders
//!    need a ring.
//! 4. Order the resulting paths with [`ordering::path_order::order_paths`]
//!    and classify bridges with [`ordering::bridge::detect_bridge_angle`].
//! 5. Build per-extruder plans with [`motion::extruder_plan::build_plans`]
//!    and estimate their time/material.
//! 6. Hand the finished [`layer_plan::LayerPlan`] to a
//!    [`layer_plan::buffer::LayerPlanBuffer`], which back-inserts
//!    temperature commands and emits layers once they leave its window.
//!
//! ## Concurrency
//!
//! Per §5, beading, bridging, and path ordering are pure functions over
//! immutable inputs and may be parallelised per-layer or per-region. Each
//! per-layer entry point below has a `_par` sibling that fans the work out
//! over a `rayon` scope; the sequential version remains the default and
//! the one exercised by most tests. [`layer_plan::buffer::LayerPlanBuffer`]
//! itself is never parallelised — it is single-producer/single-emitter by
//! contract.

pub mod beading;
pub mod collaborators;
pub mod error;
pub mod geometry;
pub mod layer_plan;
pub mod motion;
pub mod ordering;
pub mod prime_tower;
pub mod settings;

pub use error::SlicerError;

pub use beading::{Beading, BeadingStrategy};
pub use collaborators::{Command, CommandSink, LayerBelow, LayerGeometry, LayerSource, PlanHistory};
pub use geometry::{IntPoint, Polygon, Polyline, Shape};
pub use layer_plan::buffer::LayerPlanBuffer;
pub use layer_plan::LayerPlan;
pub use motion::extruder_plan::ExtruderPlan;
pub use ordering::path_order::{OrderedPath, PathToOrder, SeamConfig, SeamHint};
pub use prime_tower::{ExtruderPrime, PrimeTower};
pub use settings::{Settings, StaticSettings};

use beading::BeadingStrategy as _;
use ordering::path_order::order_paths;
use geometry::IntPoint as Point;

/// One region's beading query: its total thickness and the bead count the
/// caller wants evaluated at.
#[derive(Debug, Clone, Copy)]
pub struct BeadingQuery {
    pub thickness: i64,
    pub bead_count: usize,
}

/// Evaluates a strategy chain over a batch of regions, in order.
pub fn compute_beadings(strategy: &dyn BeadingStrategy, queries: &[BeadingQuery]) -> Vec<Beading> {
    queries.iter().map(|q| strategy.compute(q.thickness, q.bead_count)).collect()
}

/// Same as [`compute_beadings`], fanned out over a `rayon` thread pool.
/// Safe because `BeadingStrategy` implementations hold no interior
/// mutability (§5).
pub fn compute_beadings_par(strategy: &dyn BeadingStrategy, queries: &[BeadingQuery]) -> Vec<Beading> {
    use rayon::prelude::*;
    queries.par_iter().map(|q| strategy.compute(q.thickness, q.bead_count)).collect()
}

/// Orders every layer's paths independently, in order.
pub fn order_layers(
    layers: &[Vec<PathToOrder>],
    start_position: Point,
    config: &SeamConfig,
) -> Vec<Vec<OrderedPath>> {
    layers.iter().map(|paths| order_paths(paths, start_position, config)).collect()
}

/// Same as [`order_layers`], fanned out over a `rayon` thread pool. Each
/// layer's ordering is independent of every other layer's (§5).
pub fn order_layers_par(
    layers: &[Vec<PathToOrder>],
    start_position: Point,
    config: &SeamConfig,
) -> Vec<Vec<OrderedPath>> {
    use rayon::prelude::*;
    layers.par_iter().map(|paths| order_paths(paths, start_position, config)).collect()
}
