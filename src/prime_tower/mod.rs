//! # Prime-Tower Planner
//!
//! Plans the sacrificial geometry outside the model where an idle extruder
//! purges drool and re-establishes a known extrusion width before resuming
//! work on the model (§4.B).
//!
//! ## Module Organization
//!
//! - **planner**: per-layer ring selection, Normal vs Interleaved modes,
//!   base/raft outset
//! - **bridging**: the sparse bridging "wheel" pattern used by Interleaved
//!   mode's unprimed extruders

pub mod bridging;
pub mod planner;

use crate::geometry::{IntPoint, Polygon, Shape};
use std::collections::HashMap;

/// Whether, and how, an extruder needs to visit the prime tower on a given
/// layer. Grounded on `original_source/include/ExtruderPrime.h`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtruderPrime {
    /// Do not visit the tower at all this layer.
    None,
    /// Extrude only the sparse support pattern holding up the rings above.
    Support,
    /// Do a real purge/prime pass.
    Prime,
}

/// Outside-to-inside ordering: extruders with a stronger tendency to drool
/// or ooze get the outer ring, since the outer ring is visited first and
/// its surface quality matters least.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct AdhesionTendency(pub i32);

/// One extruder's concentric ring: its radial band `[inner_radius,
/// outer_radius)` around the tower centre, and the line width it's printed
/// at.
#[derive(Debug, Clone, Copy)]
pub struct Ring {
    pub extruder_nr: usize,
    pub inner_radius: i64,
    pub outer_radius: i64,
    pub line_width: i64,
}

/// Two exactly-one-chosen-per-job placement modes for deciding which
/// extruders get a full ring on a given layer (§4.B).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementMode {
    /// Every layer gets a full set of rings for every extruder used on
    /// that layer.
    Normal,
    /// Rings are only emitted for extruders that need priming that layer;
    /// others are filled by a sparse bridging pattern.
    Interleaved,
}

/// Approximates a circle with a fixed polygon, matching the tower outline
/// construction described in §4.B ("the outline is a circle approximated
/// by 32 segments").
pub const CIRCLE_SEGMENTS: u32 = 32;

pub fn approximate_circle(center: IntPoint, radius: i64) -> Polygon {
    let mut points = Vec::with_capacity(CIRCLE_SEGMENTS as usize);
    for i in 0..CIRCLE_SEGMENTS {
        let angle = 2.0 * std::f64::consts::PI * i as f64 / CIRCLE_SEGMENTS as f64;
        let x = center.x as f64 + radius as f64 * angle.cos();
        let y = center.y as f64 + radius as f64 * angle.sin();
        points.push(IntPoint::from_f64(x, y));
    }
    Polygon::new(points)
}

/// Evenly-spread start locations around the tower perimeter, rotated by a
/// caller-supplied index (layer/extruder) to diffuse z-seam blobs (§4.B).
pub fn start_locations(center: IntPoint, radius: i64, count: u32, rotation_index: u32) -> Vec<IntPoint> {
    (0..count)
        .map(|i| {
            let angle = 2.0 * std::f64::consts::PI * ((i + rotation_index) % count) as f64 / count as f64;
            IntPoint::from_f64(
                center.x as f64 + radius as f64 * angle.cos(),
                center.y as f64 + radius as f64 * angle.sin(),
            )
        })
        .collect()
}

/// The fixed number of evenly-spread candidate start locations around the
/// tower perimeter.
pub const START_LOCATION_COUNT: u32 = 21;

/// The number of line-width wall passes needed to deposit at least
/// `required_purge_volume`, and the resulting radial ring width.
///
/// Grounded on `materials/purge.rs`'s `PurgeCalculator::calculate_purge_volume`
/// pattern: volume in, pass count out, ceiling-rounded so every purge
/// requirement is fully satisfied rather than truncated short.
pub fn ring_width_for_purge(required_purge_volume: f64, line_width: i64, layer_height: i64, flow: f64) -> i64 {
    let volume_per_pass = line_width as f64 * layer_height as f64 * flow;
    if volume_per_pass <= 0.0 {
        return 0;
    }
    let passes = (required_purge_volume / volume_per_pass).ceil().max(0.0) as i64;
    passes * line_width
}

/// The complete, immutable-after-generation prime tower: its outer outline
/// plus, per layer, the geometry each extruder needs.
#[derive(Debug, Clone)]
pub struct PrimeTower {
    pub center: IntPoint,
    pub outer_radius: i64,
    pub outer_outline: Polygon,
    pub mode: PlacementMode,
    /// Per-layer extruder moves, keyed by layer index.
    pub layers: HashMap<i32, LayerPrimeGeometry>,
}

/// The prime-tower geometry for a single layer.
#[derive(Debug, Clone, Default)]
pub struct LayerPrimeGeometry {
    pub rings: Vec<ExtruderRingMoves>,
    /// Sparse infill shapes, keyed by bitmask of which extruders this ring
    /// region covers (§9 design note: "Prime-tower group bitmask").
    pub sparse_infill: HashMap<u32, Shape>,
    pub base_outset: Option<Shape>,
}

#[derive(Debug, Clone)]
pub struct ExtruderRingMoves {
    pub extruder_nr: usize,
    pub prime: ExtruderPrime,
    pub moves: Shape,
    pub start_location: IntPoint,
    pub post_wipe_point: IntPoint,
}

impl PrimeTower {
    pub fn new(center: IntPoint, outer_radius: i64, mode: PlacementMode) -> Self {
        Self {
            center,
            outer_radius,
            outer_outline: approximate_circle(center, outer_radius),
            mode,
            layers: HashMap::new(),
        }
    }
}
