//! Medial-axis arc-length parameterisation.
//!
//! A full Voronoi-diagram medial-axis extraction is out of scope for this
//! crate (the upstream system this pipeline is modelled on factors it into
//! its own dedicated geometry library); what the beading stage actually
//! consumes is narrower: a one-dimensional **thickness profile** along the
//! skeleton, parameterised by arc length, on which transition regions are
//! placed. [`ThicknessProfile`] models exactly that contract so
//! `beading::transitions` can be written and tested against it without
//! depending on a specific skeletonisation algorithm.

use crate::geometry::point::IntPoint;

/// A sample of the region thickness at one point along the medial skeleton.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThicknessSample {
    pub arc_length: f64,
    pub position: IntPoint,
    pub thickness: i64,
}

/// An ordered, piecewise-linear thickness profile along a skeleton arc.
#[derive(Debug, Clone, Default)]
pub struct ThicknessProfile {
    samples: Vec<ThicknessSample>,
}

impl ThicknessProfile {
    pub fn new(samples: Vec<ThicknessSample>) -> Self {
        Self { samples }
    }

    /// Builds a profile from an ordered skeleton polyline and a matching
    /// per-vertex thickness array, computing arc length by accumulated
    /// Euclidean distance between consecutive vertices.
    pub fn from_polyline(points: &[IntPoint], thickness: &[i64]) -> Self {
        assert_eq!(points.len(), thickness.len());
        let mut samples = Vec::with_capacity(points.len());
        let mut arc_length = 0.0;
        for i in 0..points.len() {
            if i > 0 {
                arc_length += points[i - 1].distance(points[i]);
            }
            samples.push(ThicknessSample {
                arc_length,
                position: points[i],
                thickness: thickness[i],
            });
        }
        Self { samples }
    }

    pub fn total_length(&self) -> f64 {
        self.samples.last().map_or(0.0, |s| s.arc_length)
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn samples(&self) -> &[ThicknessSample] {
        &self.samples
    }

    /// Linearly-interpolated thickness at a given arc length. Clamps to the
    /// endpoints outside `[0, total_length()]`.
    pub fn thickness_at(&self, arc_length: f64) -> i64 {
        if self.samples.is_empty() {
            return 0;
        }
        if arc_length <= self.samples[0].arc_length {
            return self.samples[0].thickness;
        }
        let last = self.samples.len() - 1;
        if arc_length >= self.samples[last].arc_length {
            return self.samples[last].thickness;
        }
        for w in self.samples.windows(2) {
            let (a, b) = (w[0], w[1]);
            if arc_length >= a.arc_length && arc_length <= b.arc_length {
                let span = b.arc_length - a.arc_length;
                if span <= 0.0 {
                    return a.thickness;
                }
                let t = (arc_length - a.arc_length) / span;
                return (a.thickness as f64 + (b.thickness - a.thickness) as f64 * t).round() as i64;
            }
        }
        self.samples[last].thickness
    }

    /// The position on the skeleton at a given arc length, by the same
    /// linear interpolation used for thickness.
    pub fn position_at(&self, arc_length: f64) -> IntPoint {
        if self.samples.is_empty() {
            return IntPoint::ZERO;
        }
        let last = self.samples.len() - 1;
        if arc_length <= self.samples[0].arc_length {
            return self.samples[0].position;
        }
        if arc_length >= self.samples[last].arc_length {
            return self.samples[last].position;
        }
        for w in self.samples.windows(2) {
            let (a, b) = (w[0], w[1]);
            if arc_length >= a.arc_length && arc_length <= b.arc_length {
                let span = b.arc_length - a.arc_length;
                let t = if span <= 0.0 { 0.0 } else { (arc_length - a.arc_length) / span };
                return a.position.lerp(b.position, t);
            }
        }
        self.samples[last].position
    }
}
