//! §8 item 9 (bridge-angle determinism) and Scenario 6 (bridge angle over
//! sparse infill).

use beadline::ordering::bridge::{bridge_over_infill_angle, detect_bridge_angle};
use beadline::{IntPoint, Polygon, Shape};

fn square(x0: i64, y0: i64, x1: i64, y1: i64) -> Polygon {
    Polygon::new(vec![
        IntPoint::new(x0, y0),
        IntPoint::new(x1, y0),
        IntPoint::new(x1, y1),
        IntPoint::new(x0, y1),
    ])
}

#[test]
fn scenario_6_bridge_over_rectilinear_infill_is_perpendicular() {
    // Infill below is rectilinear at 0 degrees and nearly all of the area
    // under the skin is sparse infill rather than solid (coverage ~1.0);
    // the shortcut should report the bridge running perpendicular to it.
    let infill_angle_degrees = 0;
    let infill_coverage_fraction = 1.0;
    let angle = bridge_over_infill_angle(infill_angle_degrees, infill_coverage_fraction);
    assert_eq!(angle, Some(90));
}

#[test]
fn item_9_repeated_runs_on_identical_inputs_return_the_same_angle() {
    let skin = square(0, 0, 10_000, 10_000);
    let strip_a = square(0, 0, 2_000, 10_000);
    let strip_b = square(8_000, 0, 10_000, 10_000);
    let support = Shape::new(vec![strip_a, strip_b]);

    let first = detect_bridge_angle(&skin, &support, 400);
    for _ in 0..5 {
        assert_eq!(detect_bridge_angle(&skin, &support, 400), first);
    }

    let first_shortcut = bridge_over_infill_angle(0, 1.0);
    for _ in 0..5 {
        assert_eq!(bridge_over_infill_angle(0, 1.0), first_shortcut);
    }
}

#[test]
fn below_coverage_threshold_the_shortcut_declines_and_falls_through_to_the_full_scan() {
    assert_eq!(bridge_over_infill_angle(0, 0.1), None);
}
