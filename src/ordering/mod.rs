//! # Path Ordering and Bridging
//!
//! Orders an unordered set of polygons and polylines for minimal travel and
//! seam visibility (§4.C "Ordering"), and detects the printing direction
//! for unsupported bridge regions (§4.C "Bridge-angle detection").
//!
//! ## Module Organization
//!
//! - **path_order**: start-vertex/endpoint scoring, nearest-neighbour
//!   sweep with one-step lookahead
//! - **bridge**: the per-degree horizontal-line sweep and sparse-infill
//!   skin expansion

pub mod bridge;
pub mod path_order;

pub use path_order::{order_paths, OrderedPath, PathToOrder, SeamConfig, SeamHint};
