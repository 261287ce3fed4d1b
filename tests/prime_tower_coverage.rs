//! §8 item 10: whenever an extruder is used on a layer but wasn't the
//! last-used extruder, that layer's plan contains a `Prime` ring for it.

use beadline::geometry::IntPoint;
use beadline::prime_tower::planner::{layout_rings, plan_layer, ExtruderTooling};
use beadline::prime_tower::{AdhesionTendency, ExtruderPrime, PlacementMode};
use std::collections::HashSet;

fn tooling(n: usize, adhesion: i32) -> ExtruderTooling {
    ExtruderTooling { extruder_nr: n, line_width: 400, ring_width: 800, adhesion_tendency: AdhesionTendency(adhesion) }
}

fn used(extruders: &[usize]) -> HashSet<usize> {
    extruders.iter().copied().collect()
}

/// Drives a sequence of layers, each naming which single extruder printed
/// on it, and checks the prime-ring coverage property at every switch.
fn check_job(mode: PlacementMode, sequence: &[usize]) {
    let layout = layout_rings(IntPoint::ZERO, &[tooling(0, 1), tooling(1, 2), tooling(2, 3)]);

    let mut last_used: Option<usize> = None;
    for (layer_index, &extruder) in sequence.iter().enumerate() {
        let active = used(&[extruder]);
        let geometry = plan_layer(&layout, mode, &active, last_used, 5_000, layer_index as i32);

        let switched_onto = last_used != Some(extruder);
        if switched_onto {
            let has_prime_ring = geometry.rings.iter().any(|r| r.extruder_nr == extruder && r.prime == ExtruderPrime::Prime);
            assert!(
                has_prime_ring,
                "layer {layer_index}: extruder {extruder} switched onto but has no prime ring ({mode:?})"
            );
        }

        last_used = Some(extruder);
    }
}

#[test]
fn item_10_normal_mode_primes_on_every_extruder_switch() {
    check_job(PlacementMode::Normal, &[0, 0, 1, 1, 2, 0, 1]);
}

#[test]
fn item_10_interleaved_mode_primes_on_every_extruder_switch() {
    check_job(PlacementMode::Interleaved, &[0, 1, 1, 2, 2, 0]);
}

#[test]
fn no_switch_means_no_prime_ring_needed() {
    let layout = layout_rings(IntPoint::ZERO, &[tooling(0, 1), tooling(1, 2)]);
    let active = used(&[0]);
    let geometry = plan_layer(&layout, PlacementMode::Normal, &active, Some(0), 5_000, 5);
    assert!(geometry.rings.iter().all(|r| r.prime != ExtruderPrime::Prime));
}
