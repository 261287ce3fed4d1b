//! The sparse bridging "wheel" pattern used by Interleaved mode to fill an
//! extruder's ring band on a layer where it doesn't need a real prime: a
//! set of radial spokes, short enough to bridge unsupported, alternated
//! between radial sub-bands so each layer's spokes are caught by the one
//! below (§4.B).

use crate::geometry::{IntPoint, Polygon, Shape};
use std::f64::consts::PI;

const SPOKE_COUNT: u32 = 8;
const SPOKE_HALF_WIDTH: i64 = 150;

/// Builds the wheel pattern for the radial band `[inner_radius,
/// outer_radius)`, subdividing it into concentric sub-bands if the full
/// span would exceed `max_bridging_distance`.
pub fn sparse_bridging_wheel(
    center: IntPoint,
    inner_radius: i64,
    outer_radius: i64,
    max_bridging_distance: i64,
) -> Shape {
    let span = (outer_radius - inner_radius).max(0);
    if span == 0 {
        return Shape::empty();
    }

    let bound = max_bridging_distance.max(1);
    let sub_bands = ((span as f64 / bound as f64).ceil() as i64).max(1);
    let band_height = span / sub_bands;

    let mut polygons = Vec::new();
    for band in 0..sub_bands {
        let r_in = inner_radius + band * band_height;
        let r_out = if band == sub_bands - 1 {
            outer_radius
        } else {
            r_in + band_height
        };
        // Alternate spoke phase between bands so spokes land over the
        // midpoint of the band below, giving every spoke an anchor.
        let angle_offset = if band % 2 == 0 { 0.0 } else { PI / SPOKE_COUNT as f64 };

        for i in 0..SPOKE_COUNT {
            let angle = 2.0 * PI * i as f64 / SPOKE_COUNT as f64 + angle_offset;
            polygons.push(spoke_quad(center, r_in, r_out, angle));
        }
    }
    Shape::new(polygons)
}

fn spoke_quad(center: IntPoint, r_in: i64, r_out: i64, angle: f64) -> Polygon {
    let (sin, cos) = angle.sin_cos();
    let perp = (-sin, cos);

    let inner = (
        center.x as f64 + cos * r_in as f64,
        center.y as f64 + sin * r_in as f64,
    );
    let outer = (
        center.x as f64 + cos * r_out as f64,
        center.y as f64 + sin * r_out as f64,
    );
    let hw = SPOKE_HALF_WIDTH as f64;

    Polygon::new(vec![
        IntPoint::from_f64(inner.0 + perp.0 * hw, inner.1 + perp.1 * hw),
        IntPoint::from_f64(outer.0 + perp.0 * hw, outer.1 + perp.1 * hw),
        IntPoint::from_f64(outer.0 - perp.0 * hw, outer.1 - perp.1 * hw),
        IntPoint::from_f64(inner.0 - perp.0 * hw, inner.1 - perp.1 * hw),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wheel_subdivides_to_respect_bridging_bound() {
        let shape = sparse_bridging_wheel(IntPoint::ZERO, 0, 10_000, 3_000);
        // 10_000 / 3_000 -> 4 sub-bands * 8 spokes.
        assert_eq!(shape.polygons.len(), 32);
    }

    #[test]
    fn single_band_when_span_fits() {
        let shape = sparse_bridging_wheel(IntPoint::ZERO, 0, 2_000, 3_000);
        assert_eq!(shape.polygons.len(), SPOKE_COUNT as usize);
    }

    #[test]
    fn zero_span_produces_nothing() {
        let shape = sparse_bridging_wheel(IntPoint::ZERO, 5_000, 5_000, 3_000);
        assert!(shape.is_empty());
    }
}
