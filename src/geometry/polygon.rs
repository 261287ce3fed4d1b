//! Polygons, shapes, and winding/area queries.
//!
//! A [`Polygon`] is an ordered, implicitly-closed sequence of points. A
//! [`Shape`] is an ordered collection of polygons with conventional
//! outer-then-hole winding (outer contours counter-clockwise, holes
//! clockwise, by the signed-area convention below).

use crate::geometry::point::IntPoint;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub points: Vec<IntPoint>,
}

/// An ordered sequence of points that is *not* implicitly closed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Polyline {
    pub points: Vec<IntPoint>,
}

impl Polygon {
    pub fn new(points: Vec<IntPoint>) -> Self {
        Self { points }
    }

    pub fn is_empty(&self) -> bool {
        self.points.len() < 3
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// The edge following `points[i]`, wrapping around the implicit closure.
    pub fn edge(&self, i: usize) -> (IntPoint, IntPoint) {
        let n = self.points.len();
        (self.points[i], self.points[(i + 1) % n])
    }

    /// Signed area (shoelace formula). Positive for counter-clockwise
    /// winding. Units are micrometres squared.
    pub fn signed_area(&self) -> i64 {
        if self.points.len() < 3 {
            return 0;
        }
        let n = self.points.len();
        let mut sum: i64 = 0;
        for i in 0..n {
            let a = self.points[i];
            let b = self.points[(i + 1) % n];
            sum += a.x * b.y - b.x * a.y;
        }
        sum / 2
    }

    pub fn area(&self) -> i64 {
        self.signed_area().abs()
    }

    pub fn is_counter_clockwise(&self) -> bool {
        self.signed_area() > 0
    }

    /// Three consecutive points are collinear if the cross product of the
    /// two edges they form vanishes. Used to detect degenerate input that
    /// would make a medial-axis computation ill-defined (§7: geometric
    /// degeneracy).
    pub fn has_collinear_triplet(&self) -> bool {
        let n = self.points.len();
        if n < 3 {
            return false;
        }
        for i in 0..n {
            let a = self.points[i];
            let b = self.points[(i + 1) % n];
            let c = self.points[(i + 2) % n];
            if (b - a).cross(c - b) == 0 {
                return true;
            }
        }
        false
    }

    /// A region is geometrically degenerate if it has fewer than three
    /// points or zero area.
    pub fn is_degenerate(&self) -> bool {
        self.is_empty() || self.area() == 0
    }

    /// Reverses point order, flipping winding direction.
    pub fn reversed(&self) -> Polygon {
        let mut points = self.points.clone();
        points.reverse();
        Polygon::new(points)
    }

    /// Offsets every edge outward (positive `distance`) or inward
    /// (negative) by moving each vertex along the bisector of its two
    /// adjacent edge normals, scaled to preserve the offset distance at a
    /// miter join. This is a local, per-vertex construction rather than a
    /// full polygon-clipping offset (no self-intersection removal); callers
    /// needing robust offsets on highly concave input should simplify the
    /// input polygon first.
    pub fn offset(&self, distance: i64) -> Polygon {
        let n = self.points.len();
        if n < 3 || distance == 0 {
            return self.clone();
        }
        let mut out = Vec::with_capacity(n);
        for i in 0..n {
            let prev = self.points[(i + n - 1) % n];
            let cur = self.points[i];
            let next = self.points[(i + 1) % n];

            let n1 = edge_normal(prev, cur);
            let n2 = edge_normal(cur, next);
            let bisector = (n1.0 + n2.0, n1.1 + n2.1);
            let blen = (bisector.0 * bisector.0 + bisector.1 * bisector.1).sqrt();
            if blen < 1e-9 {
                out.push(cur);
                continue;
            }
            let bisector = (bisector.0 / blen, bisector.1 / blen);
            // cos(half the angle between the two normals); scales the
            // bisector step so the offset edges, not the vertex, sit at
            // exactly `distance`.
            let cos_half = (1.0 + (n1.0 * n2.0 + n1.1 * n2.1)).max(1e-6) / 2.0;
            let scale = (distance as f64) / cos_half.sqrt();
            out.push(IntPoint::from_f64(
                cur.x as f64 + bisector.0 * scale,
                cur.y as f64 + bisector.1 * scale,
            ));
        }
        Polygon::new(out)
    }
}

/// Outward unit normal of the directed edge `a -> b`, assuming
/// counter-clockwise winding.
fn edge_normal(a: IntPoint, b: IntPoint) -> (f64, f64) {
    let (ax, ay) = a.as_f64();
    let (bx, by) = b.as_f64();
    let (dx, dy) = (bx - ax, by - ay);
    let len = (dx * dx + dy * dy).sqrt();
    if len < 1e-9 {
        return (0.0, 0.0);
    }
    (dy / len, -dx / len)
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub polygons: Vec<Polygon>,
}

impl Shape {
    pub fn new(polygons: Vec<Polygon>) -> Self {
        Self { polygons }
    }

    pub fn empty() -> Self {
        Self { polygons: Vec::new() }
    }

    pub fn is_empty(&self) -> bool {
        self.polygons.iter().all(|p| p.is_empty())
    }

    pub fn area(&self) -> i64 {
        self.polygons.iter().map(Polygon::signed_area).sum::<i64>().abs()
    }

    /// Bounding box as `(min, max)`, or `None` for an empty shape.
    pub fn bounding_box(&self) -> Option<(IntPoint, IntPoint)> {
        let mut min = IntPoint::new(i64::MAX, i64::MAX);
        let mut max = IntPoint::new(i64::MIN, i64::MIN);
        let mut any = false;
        for poly in &self.polygons {
            for &p in &poly.points {
                any = true;
                min.x = min.x.min(p.x);
                min.y = min.y.min(p.y);
                max.x = max.x.max(p.x);
                max.y = max.y.max(p.y);
            }
        }
        any.then_some((min, max))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_square_area_and_winding() {
        let square = Polygon::new(vec![
            IntPoint::new(0, 0),
            IntPoint::new(1000, 0),
            IntPoint::new(1000, 1000),
            IntPoint::new(0, 1000),
        ]);
        assert_eq!(square.area(), 1_000_000);
        assert!(square.is_counter_clockwise());
        assert!(square.reversed().signed_area() < 0);
    }

    #[test]
    fn degenerate_polygon_detected() {
        let line = Polygon::new(vec![IntPoint::new(0, 0), IntPoint::new(100, 0)]);
        assert!(line.is_degenerate());

        let collinear = Polygon::new(vec![
            IntPoint::new(0, 0),
            IntPoint::new(500, 0),
            IntPoint::new(1000, 0),
        ]);
        assert!(collinear.has_collinear_triplet());
    }
}
