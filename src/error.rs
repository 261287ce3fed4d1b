//! `SlicerError`, the four recoverable failure kinds named in §7, plus a
//! catch-all passthrough for collaborator-reported failures.

/// Errors the core can report. §7 treats all four kinds as recoverable —
/// callers that want the "drop and continue" behaviour described there
/// should log these and keep going rather than abort a whole job.
#[derive(Debug, thiserror::Error)]
pub enum SlicerError {
    #[error("degenerate geometry: {0}")]
    DegenerateGeometry(String),

    #[error("requested bead count exceeds max_bead_count: {0}")]
    BeadCountExceeded(String),

    #[error("preheat window too short for required temperature delta: {0}")]
    PreheatWindowTooShort(String),

    #[error("empty plan or empty layer: {0}")]
    EmptyPlan(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
