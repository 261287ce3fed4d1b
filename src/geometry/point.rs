//! Integer-coordinate points, in micrometres.
//!
//! All spatial arithmetic in the core pipeline happens in fixed-point
//! micrometres rather than floating point so that equal points compare
//! equal bitwise (§3 of the exactness requirement this crate is built
//! against).

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Neg, Sub};

/// A point in the XY plane, in integer micrometres.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IntPoint {
    pub x: i64,
    pub y: i64,
}

impl IntPoint {
    pub const ZERO: IntPoint = IntPoint { x: 0, y: 0 };

    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance, avoiding the precision loss of an
    /// intermediate square root.
    pub fn distance_squared(self, other: IntPoint) -> i64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    pub fn distance(self, other: IntPoint) -> f64 {
        (self.distance_squared(other) as f64).sqrt()
    }

    /// 2D cross product (z-component) of `self` and `other`, treated as
    /// vectors from the origin.
    pub fn cross(self, other: IntPoint) -> i64 {
        self.x * other.y - self.y * other.x
    }

    pub fn dot(self, other: IntPoint) -> i64 {
        self.x * other.x + self.y * other.y
    }

    pub fn length(self) -> f64 {
        ((self.x * self.x + self.y * self.y) as f64).sqrt()
    }

    /// Returns this point as an `(f64, f64)` pair, for use in floating-point
    /// geometry (rotation, trigonometric angle scans) where exactness is not
    /// required.
    pub fn as_f64(self) -> (f64, f64) {
        (self.x as f64, self.y as f64)
    }

    pub fn from_f64(x: f64, y: f64) -> Self {
        Self {
            x: x.round() as i64,
            y: y.round() as i64,
        }
    }

    /// Linear interpolation between `self` and `other` at parameter `t` in
    /// `[0, 1]`, rounded to the nearest micrometre.
    pub fn lerp(self, other: IntPoint, t: f64) -> IntPoint {
        IntPoint::from_f64(
            self.x as f64 + (other.x - self.x) as f64 * t,
            self.y as f64 + (other.y - self.y) as f64 * t,
        )
    }
}

impl Add for IntPoint {
    type Output = IntPoint;
    fn add(self, rhs: IntPoint) -> IntPoint {
        IntPoint::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for IntPoint {
    type Output = IntPoint;
    fn sub(self, rhs: IntPoint) -> IntPoint {
        IntPoint::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for IntPoint {
    type Output = IntPoint;
    fn neg(self) -> IntPoint {
        IntPoint::new(-self.x, -self.y)
    }
}

impl Mul<i64> for IntPoint {
    type Output = IntPoint;
    fn mul(self, rhs: i64) -> IntPoint {
        IntPoint::new(self.x * rhs, self.y * rhs)
    }
}

impl Div<i64> for IntPoint {
    type Output = IntPoint;
    fn div(self, rhs: i64) -> IntPoint {
        IntPoint::new(self.x / rhs, self.y / rhs)
    }
}
