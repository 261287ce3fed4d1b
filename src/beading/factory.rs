//! Builds the standard beading strategy chain, leaves (innermost) first:
//! a concrete base strategy → `Redistribute` → optional `Widening` →
//! optional `OuterWallInset` → `Limited` (always outermost, so its marker
//! bead cannot be reinterpreted by any other wrapper).
//!
//! Grounded on `original_source/src/BeadingStrategy/BeadingStrategyFactory.cpp`.

use crate::beading::center_deviation::CenterDeviation;
use crate::beading::distributed::Distributed;
use crate::beading::limited::Limited;
use crate::beading::outer_wall_inset::OuterWallInset;
use crate::beading::redistribute::Redistribute;
use crate::beading::widening::Widening;
use crate::beading::BeadingStrategy;

/// Which concrete base strategy anchors the chain. `Distributed` spreads
/// the thickness evenly across all beads; `CenterDeviation` holds every
/// bead at the configured optimal width and lets total coverage deviate
/// instead.
#[derive(Debug, Clone, Copy)]
pub enum BaseStrategyKind {
    Distributed,
    CenterDeviation { split_fraction: f64, add_fraction: f64 },
}

#[derive(Debug, Clone, Copy)]
pub struct BeadingConfig {
    pub base: BaseStrategyKind,
    pub optimal_width: i64,
    pub outer_wall_width: i64,
    pub minimum_width_inner: i64,
    pub max_bead_count: usize,
    /// Whether hairline features should be widened instead of dropped
    /// (`print_thin_walls`).
    pub print_thin_walls: bool,
    pub min_input_width: i64,
    pub min_output_width: i64,
    /// `wall_0_inset`: nonzero enables the outer-wall-inset wrapper.
    pub outer_wall_offset: i64,
}

pub fn build_chain(config: &BeadingConfig) -> Box<dyn BeadingStrategy> {
    let base: Box<dyn BeadingStrategy> = match config.base {
        BaseStrategyKind::Distributed => Box::new(Distributed::new(config.optimal_width)),
        BaseStrategyKind::CenterDeviation {
            split_fraction,
            add_fraction,
        } => Box::new(CenterDeviation::new(
            config.optimal_width,
            split_fraction,
            add_fraction,
        )),
    };

    let mut chain: Box<dyn BeadingStrategy> = Box::new(Redistribute::new(
        config.outer_wall_width,
        config.minimum_width_inner,
        base,
    ));

    if config.print_thin_walls {
        chain = Box::new(Widening::new(
            config.min_input_width,
            config.min_output_width,
            chain,
        ));
    }

    if config.outer_wall_offset > 0 {
        chain = Box::new(OuterWallInset::new(config.outer_wall_offset, chain));
    }

    Box::new(Limited::new(config.max_bead_count, chain))
}
