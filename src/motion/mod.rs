//! # Extruder-Plan Construction
//!
//! Groups ordered paths into per-extruder plans and estimates the time and
//! material each path costs, using a trapezoidal motion model (§4.D).
//!
//! ## Module Organization
//!
//! - **trapezoid**: per-segment accelerate/cruise/decelerate profile and the
//!   jerk-limited junction-speed reverse/forward pass
//! - **estimate**: `TimeMaterialEstimate`, per-path time/material estimation
//! - **extruder_plan**: `ExtruderPlan` construction, minimum-layer-time
//!   speed scaling, fan-speed interpolation

pub mod estimate;
pub mod extruder_plan;
pub mod trapezoid;

use crate::geometry::IntPoint;

/// What a path is for, shared between path construction and the prime
/// tower's ring classification. Carried from the original's
/// `PrintFeature.h` enumeration (§B of the expanded spec).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrintFeatureType {
    OuterWall,
    InnerWall,
    Skin,
    Support,
    SkirtBrim,
    Infill,
    SupportInfill,
    MoveCombing,
    MoveRetraction,
}

impl PrintFeatureType {
    /// Whether paths of this type extrude material, as opposed to being a
    /// pure travel classification.
    pub fn is_extrusion(self) -> bool {
        !matches!(self, PrintFeatureType::MoveCombing | PrintFeatureType::MoveRetraction)
    }
}

/// A point on an extrusion line annotated with the wall width at that
/// point; widths vary piecewise-linearly between adjacent junctions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtrusionJunction {
    pub position: IntPoint,
    pub width: i64,
}

/// An ordered sequence of width-annotated junctions.
pub type ExtrusionLine = Vec<ExtrusionJunction>;

/// The fixed per-feature parameters a path is printed with.
#[derive(Debug, Clone, Copy)]
pub struct PathConfig {
    pub feature_type: PrintFeatureType,
    pub speed: f64,
    pub acceleration: f64,
    pub jerk: f64,
    pub line_width: i64,
    pub layer_thickness: i64,
    pub flow_ratio: f64,
    pub fan_speed_override: Option<f64>,
    pub is_bridge: bool,
}

/// Either a sequence of extrusion points, or a single travel destination.
#[derive(Debug, Clone)]
pub enum GCodePathKind {
    Extrude(Vec<IntPoint>),
    Travel(IntPoint),
}

/// One contiguous move segment.
#[derive(Debug, Clone)]
pub struct GCodePath {
    pub config: PathConfig,
    pub kind: GCodePathKind,
    pub retract: bool,
    pub z_hop: bool,
    pub spiralize: bool,
    pub done: bool,
}

impl GCodePath {
    pub fn is_extrusion(&self) -> bool {
        matches!(self.kind, GCodePathKind::Extrude(_)) && self.config.feature_type.is_extrusion()
    }

    /// The ordered points a move visits, always at least one point.
    pub fn points(&self) -> Vec<IntPoint> {
        match &self.kind {
            GCodePathKind::Extrude(points) => points.clone(),
            GCodePathKind::Travel(dest) => vec![*dest],
        }
    }
}
