//! Rotation helper used by the bridge-angle scan (§4.C) to align a
//! candidate bridging direction with the X axis before running the
//! horizontal-line sweep.

use crate::geometry::point::IntPoint;
use crate::geometry::polygon::{Polygon, Shape};

/// A 2x2 rotation matrix, applied to integer points with rounding.
#[derive(Debug, Clone, Copy)]
pub struct PointMatrix {
    matrix: [[f64; 2]; 2],
}

impl PointMatrix {
    /// Builds the rotation that would carry a line at `angle_degrees` onto
    /// the X axis (i.e. rotates by `-angle_degrees`).
    pub fn for_angle_degrees(angle_degrees: f64) -> Self {
        let rad = -angle_degrees.to_radians();
        let (sin, cos) = rad.sin_cos();
        Self {
            matrix: [[cos, -sin], [sin, cos]],
        }
    }

    pub fn apply(&self, p: IntPoint) -> IntPoint {
        let (x, y) = p.as_f64();
        let nx = self.matrix[0][0] * x + self.matrix[0][1] * y;
        let ny = self.matrix[1][0] * x + self.matrix[1][1] * y;
        IntPoint::from_f64(nx, ny)
    }

    pub fn apply_polygon(&self, poly: &Polygon) -> Polygon {
        Polygon::new(poly.points.iter().map(|&p| self.apply(p)).collect())
    }

    pub fn apply_shape(&self, shape: &Shape) -> Shape {
        Shape::new(shape.polygons.iter().map(|p| self.apply_polygon(p)).collect())
    }
}
