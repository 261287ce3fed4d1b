//! Nearest-neighbour path ordering with seam scoring and one-step lookahead
//! (§4.C "Ordering").
//!
//! Closed polygons always return to their start point once printed, so the
//! only travel-affecting choice for a polygon is *which* vertex to start
//! at. Open polylines can be reversed, which changes both endpoints — that
//! is where the lookahead actually earns its keep.

use crate::geometry::IntPoint;

/// How a closed polygon's start vertex is chosen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeamHint {
    /// Minimize travel distance only.
    Shortest,
    /// Prefer the vertex closest to a fixed point (e.g. a corner of the
    /// bounding box), for a consistent visible seam.
    UserSpecified(IntPoint),
    /// Prefer the sharpest interior-angle vertex, where a seam is least
    /// visible.
    SharpestCorner,
    /// Deterministically spread seams across vertices rather than
    /// minimizing any visual or travel metric.
    Random,
}

/// Weights applied on top of raw travel distance when scoring start
/// vertices and paths.
#[derive(Debug, Clone, Copy)]
pub struct SeamConfig {
    pub hint: SeamHint,
    /// Multiplier applied to the seam-hint component of the score.
    pub seam_weight: f64,
    /// Added to the score of any vertex flagged as sitting on an overhang,
    /// to discourage (but not forbid) seams on unsupported geometry.
    pub overhang_penalty: f64,
}

impl Default for SeamConfig {
    fn default() -> Self {
        Self {
            hint: SeamHint::Shortest,
            seam_weight: 1.0,
            overhang_penalty: 0.0,
        }
    }
}

/// One path to be ordered: either a closed polygon or an open polyline.
#[derive(Debug, Clone)]
pub struct PathToOrder {
    pub points: Vec<IntPoint>,
    pub is_closed: bool,
    /// Parallel to `points`; marks vertices that sit over unsupported
    /// regions, for closed-polygon seam scoring.
    pub overhang: Vec<bool>,
}

impl PathToOrder {
    pub fn new(points: Vec<IntPoint>, is_closed: bool) -> Self {
        let overhang = vec![false; points.len()];
        Self {
            points,
            is_closed,
            overhang,
        }
    }

    fn is_overhang(&self, index: usize) -> bool {
        self.overhang.get(index).copied().unwrap_or(false)
    }
}

/// The result of ordering one input path: which original index it was,
/// which vertex/endpoint to start from, and whether it should be printed
/// in reverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderedPath {
    pub index: usize,
    pub start_index: usize,
    pub reversed: bool,
    pub closed: bool,
}

fn interior_angle(points: &[IntPoint], i: usize) -> f64 {
    let n = points.len();
    let prev = points[(i + n - 1) % n];
    let next = points[(i + 1) % n];
    let cur = points[i];
    let a = (prev - cur).as_f64();
    let b = (next - cur).as_f64();
    let dot = a.0 * b.0 + a.1 * b.1;
    let cross = a.0 * b.1 - a.1 * b.0;
    cross.atan2(dot).abs()
}

/// A small deterministic pseudo-random value in `[0, 1)`, stable across
/// runs, used only for [`SeamHint::Random`].
fn pseudo_random(seed: usize) -> f64 {
    let mut x = seed as u64 ^ 0x9E3779B97F4A7C15;
    x ^= x >> 30;
    x = x.wrapping_mul(0xBF58476D1CE4E5B9);
    x ^= x >> 27;
    x = x.wrapping_mul(0x94D049BB133111EB);
    x ^= x >> 31;
    (x % 1_000_000) as f64 / 1_000_000.0
}

/// Scores a candidate start vertex: lower is better. Combines raw travel
/// distance, the seam hint's own component, and the overhang penalty.
fn score_vertex(path: &PathToOrder, index: usize, from: IntPoint, config: &SeamConfig) -> f64 {
    let point = path.points[index];
    let distance = from.distance(point);

    let seam_component = match config.hint {
        SeamHint::Shortest => 0.0,
        SeamHint::UserSpecified(target) => point.distance(target) * config.seam_weight,
        SeamHint::SharpestCorner => {
            let sharpness = std::f64::consts::PI - interior_angle(&path.points, index);
            -sharpness * config.seam_weight
        }
        SeamHint::Random => pseudo_random(index) * config.seam_weight,
    };

    let overhang_component = if path.is_overhang(index) {
        config.overhang_penalty
    } else {
        0.0
    };

    distance + seam_component + overhang_component
}

/// Picks the best start vertex of a closed polygon, by [`score_vertex`].
fn best_closed_start(path: &PathToOrder, from: IntPoint, config: &SeamConfig) -> (usize, f64) {
    let mut best = (0usize, f64::INFINITY);
    for i in 0..path.points.len() {
        let s = score_vertex(path, i, from, config);
        if s < best.1 {
            best = (i, s);
        }
    }
    best
}

/// The two endpoints of an open polyline, with their raw travel distances
/// from `from`. Index 0 is the path's first point, index `len - 1` the
/// last.
fn open_endpoint_distances(path: &PathToOrder, from: IntPoint) -> (f64, f64) {
    let first = path.points[0];
    let last = *path.points.last().unwrap();
    (from.distance(first), from.distance(last))
}

/// How close two candidate totals need to be before the cheaper-looking
/// one is preferred outright, without the lookahead correction kicking
/// in. Expressed as an absolute distance, since coordinates are in
/// micrometres.
const LOOKAHEAD_EPSILON: f64 = 1e-6;

/// Orders every path in `paths` starting from `start_position`, returning
/// one [`OrderedPath`] per input path in print order.
///
/// For a closed polygon, the nearest remaining path is the one whose
/// best-scoring start vertex is closest; its direction is otherwise fixed
/// (a closed loop returns to the same point regardless of direction).
/// For an open polyline the nearer endpoint is chosen as the start *unless*
/// starting from the farther endpoint would leave the current position
/// materially closer to the best next remaining path once this one is
/// printed — the one-step lookahead.
pub fn order_paths(
    paths: &[PathToOrder],
    start_position: IntPoint,
    config: &SeamConfig,
) -> Vec<OrderedPath> {
    let mut remaining: Vec<usize> = (0..paths.len()).collect();
    let mut current = start_position;
    let mut result = Vec::with_capacity(paths.len());

    while !remaining.is_empty() {
        // Find the nearest remaining path by best achievable start distance.
        let mut best_pos = 0usize;
        let mut best_distance = f64::INFINITY;
        let mut best_start_index = 0usize;
        for (pos, &idx) in remaining.iter().enumerate() {
            let path = &paths[idx];
            let (distance, start_index) = if path.is_closed {
                best_closed_start(path, current, config)
            } else {
                let (d_first, d_last) = open_endpoint_distances(path, current);
                if d_first <= d_last {
                    (d_first, 0)
                } else {
                    (d_last, path.points.len() - 1)
                }
            };
            if distance < best_distance {
                best_distance = distance;
                best_pos = pos;
                best_start_index = start_index;
            }
        }

        let primary_idx = remaining[best_pos];
        let primary = &paths[primary_idx];

        let (start_index, reversed, end_point) = if primary.is_closed {
            (best_start_index, false, primary.points[best_start_index])
        } else {
            let len = primary.points.len();
            let (d_first, d_last) = open_endpoint_distances(primary, current);
            let (near_start, near_end, near_dist, far_start, far_end, far_dist) = if d_first <= d_last
            {
                (0usize, len - 1, d_first, len - 1, 0usize, d_last)
            } else {
                (len - 1, 0usize, d_last, 0usize, len - 1, d_first)
            };

            let others: Vec<usize> = remaining
                .iter()
                .copied()
                .filter(|&i| i != primary_idx)
                .collect();
            let best_next_from = |point: IntPoint| -> f64 {
                others
                    .iter()
                    .map(|&i| {
                        let p = &paths[i];
                        if p.is_closed {
                            best_closed_start(p, point, config).1
                        } else {
                            let (a, b) = open_endpoint_distances(p, point);
                            a.min(b)
                        }
                    })
                    .fold(f64::INFINITY, f64::min)
            };

            let total_near = near_dist + best_next_from(primary.points[near_end]);
            let total_far = far_dist + best_next_from(primary.points[far_end]);

            if total_far + LOOKAHEAD_EPSILON < total_near {
                (far_start, far_start != 0, primary.points[far_end])
            } else {
                (near_start, near_start != 0, primary.points[near_end])
            }
        };

        result.push(OrderedPath {
            index: primary_idx,
            start_index,
            reversed,
            closed: primary.is_closed,
        });
        current = end_point;
        remaining.remove(best_pos);
    }

    result
}
