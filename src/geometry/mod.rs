//! # Geometric Primitives
//!
//! The small set of geometry operations the rest of the pipeline shares:
//! integer points, polygons/shapes, segment queries, rotation, and the
//! medial-axis thickness profile consumed by the beading stage.
//!
//! ## Module Organization
//!
//! - **point**: `IntPoint`, the i64-micrometre coordinate type
//! - **polygon**: `Polygon`, `Polyline`, `Shape`, winding/area, offset
//! - **segment**: closest-point-on-segment, segment/segment intersection
//! - **skeleton**: medial-axis arc-length thickness profile
//! - **transform**: rotation matrix used by the bridge-angle scan

pub mod point;
pub mod polygon;
pub mod segment;
pub mod skeleton;
pub mod transform;

pub use point::IntPoint;
pub use polygon::{Polygon, Polyline, Shape};
pub use skeleton::{ThicknessProfile, ThicknessSample};
pub use transform::PointMatrix;
