//! Per-layer ring selection: decides, for each configured extruder, whether
//! this layer gets a real purge ring, a sparse support pattern, or nothing
//! at all, and assembles the resulting [`LayerPrimeGeometry`].

use crate::geometry::IntPoint;
use crate::prime_tower::bridging::sparse_bridging_wheel;
use crate::prime_tower::{
    approximate_circle, start_locations, ExtruderPrime, ExtruderRingMoves, LayerPrimeGeometry,
    PlacementMode, Ring, AdhesionTendency, START_LOCATION_COUNT,
};
use std::collections::HashSet;

/// Static per-extruder tooling parameters used to size its ring, fixed for
/// the whole job.
#[derive(Debug, Clone, Copy)]
pub struct ExtruderTooling {
    pub extruder_nr: usize,
    pub line_width: i64,
    pub ring_width: i64,
    pub adhesion_tendency: AdhesionTendency,
}

/// The tower's fixed radial ring layout: computed once, consulted
/// read-only afterward (§5: the prime tower's geometry is immutable after
/// generation).
#[derive(Debug, Clone)]
pub struct RingLayout {
    pub rings: Vec<Ring>,
    pub center: IntPoint,
    pub outer_radius: i64,
}

/// Assigns each extruder a concentric band, ordered outside-to-inside by
/// decreasing adhesion tendency (§4.B).
pub fn layout_rings(center: IntPoint, tooling: &[ExtruderTooling]) -> RingLayout {
    let mut ordered: Vec<&ExtruderTooling> = tooling.iter().collect();
    ordered.sort_by(|a, b| b.adhesion_tendency.cmp(&a.adhesion_tendency));

    let mut rings = Vec::with_capacity(ordered.len());
    let mut outer = ordered.iter().map(|t| t.ring_width).sum::<i64>().max(0);
    for t in ordered {
        let inner = outer - t.ring_width;
        rings.push(Ring {
            extruder_nr: t.extruder_nr,
            inner_radius: inner,
            outer_radius: outer,
            line_width: t.line_width,
        });
        outer = inner;
    }
    let max_outer = rings.iter().map(|r| r.outer_radius).max().unwrap_or(0);
    RingLayout {
        rings,
        center,
        outer_radius: max_outer,
    }
}

/// Decides, per §4.B, which extruders need priming this layer: active on
/// the current layer but not the last-used extruder.
fn needs_prime(extruder_nr: usize, used_extruders: &HashSet<usize>, last_used: Option<usize>) -> bool {
    used_extruders.contains(&extruder_nr) && last_used != Some(extruder_nr)
}

/// Plans one layer's prime-tower geometry.
pub fn plan_layer(
    layout: &RingLayout,
    mode: PlacementMode,
    used_extruders: &HashSet<usize>,
    last_used: Option<usize>,
    max_bridging_distance: i64,
    layer_index: i32,
) -> LayerPrimeGeometry {
    let mut geometry = LayerPrimeGeometry::default();

    for (i, ring) in layout.rings.iter().enumerate() {
        let active = used_extruders.contains(&ring.extruder_nr);
        let prime_needed = needs_prime(ring.extruder_nr, used_extruders, last_used);

        let include_full_ring = match mode {
            PlacementMode::Normal => active,
            PlacementMode::Interleaved => prime_needed,
        };

        let prime = if prime_needed {
            ExtruderPrime::Prime
        } else if mode == PlacementMode::Interleaved {
            ExtruderPrime::Support
        } else {
            ExtruderPrime::None
        };

        if !include_full_ring && mode == PlacementMode::Interleaved {
            // Not primed this layer: fill the band with a sparse bridging
            // wheel instead of a full wall ring, bounded by the maximum
            // bridging span so spokes stay printable unsupported.
            let wheel = sparse_bridging_wheel(
                layout.center,
                ring.inner_radius,
                ring.outer_radius,
                max_bridging_distance,
            );
            let bitmask = 1u32 << (i.min(31));
            geometry.sparse_infill.insert(bitmask, wheel);
            continue;
        }

        if !include_full_ring {
            continue;
        }

        let outer_circle = approximate_circle(layout.center, ring.outer_radius);
        let inner_circle = approximate_circle(layout.center, ring.inner_radius.max(0));
        let moves = crate::geometry::Shape::new(vec![outer_circle, inner_circle]);

        let starts = start_locations(
            layout.center,
            ring.outer_radius,
            START_LOCATION_COUNT,
            (layer_index as u32).wrapping_add(ring.extruder_nr as u32),
        );
        let start_location = starts[0];
        let post_wipe_point = starts[starts.len() / 2];

        geometry.rings.push(ExtruderRingMoves {
            extruder_nr: ring.extruder_nr,
            prime,
            moves,
            start_location,
            post_wipe_point,
        });
    }

    geometry
}

/// Generates the first-layer base outset (extra-width rings for bed
/// adhesion), and, for a raft, the additional decaying-outset layers above
/// it (§4.B).
///
/// `curve_magnitude` exponentially decays the outset with layer index:
/// `outset(layer) = base_outset * exp(-curve_magnitude * layer)`.
pub fn generate_base_outset(
    layout: &RingLayout,
    base_outset: i64,
    raft_layers: u32,
    curve_magnitude: f64,
) -> Vec<crate::geometry::Shape> {
    (0..raft_layers.max(1))
        .map(|layer| {
            let decay = (-curve_magnitude * layer as f64).exp();
            let outset = (base_outset as f64 * decay).round() as i64;
            let outer = approximate_circle(layout.center, layout.outer_radius + outset);
            crate::geometry::Shape::new(vec![outer])
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tooling(n: usize, ring_width: i64, adhesion: i32) -> ExtruderTooling {
        ExtruderTooling {
            extruder_nr: n,
            line_width: 400,
            ring_width,
            adhesion_tendency: AdhesionTendency(adhesion),
        }
    }

    #[test]
    fn rings_ordered_outside_in_by_adhesion() {
        let layout = layout_rings(
            IntPoint::ZERO,
            &[tooling(0, 800, 1), tooling(1, 800, 5)],
        );
        // Extruder 1 has higher adhesion tendency, so it gets the outer ring.
        assert_eq!(layout.rings[0].extruder_nr, 1);
        assert_eq!(layout.rings[1].extruder_nr, 0);
        assert_eq!(layout.rings[0].outer_radius, layout.outer_radius);
        assert_eq!(layout.rings[1].outer_radius, layout.rings[0].inner_radius);
    }

    #[test]
    fn normal_mode_always_includes_active_extruders() {
        let layout = layout_rings(IntPoint::ZERO, &[tooling(0, 800, 1), tooling(1, 800, 1)]);
        let mut used = HashSet::new();
        used.insert(0);
        used.insert(1);
        let geometry = plan_layer(&layout, PlacementMode::Normal, &used, Some(0), 5000, 3);
        assert_eq!(geometry.rings.len(), 2);
    }

    #[test]
    fn interleaved_mode_fills_unprimed_band_with_bridging() {
        let layout = layout_rings(IntPoint::ZERO, &[tooling(0, 800, 1), tooling(1, 800, 1)]);
        let mut used = HashSet::new();
        used.insert(0);
        let geometry = plan_layer(&layout, PlacementMode::Interleaved, &used, None, 5000, 3);
        assert_eq!(geometry.rings.len(), 1);
        assert_eq!(geometry.rings[0].prime, ExtruderPrime::Prime);
        assert_eq!(geometry.sparse_infill.len(), 1);
    }
}
