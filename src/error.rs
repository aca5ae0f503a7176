use thiserror::Error;

/// Errors raised at the ingestion and configuration boundaries.
///
/// The pipeline stages themselves never fail; anything reaching them has
/// already passed [`crate::io::validate_segments`].
#[derive(Debug, Error)]
pub enum DiarizeError {
    #[error("segment {index}: end {t1}s precedes start {t0}s")]
    InvalidTimestamps { index: usize, t0: f64, t1: f64 },

    #[error("segment {index}: text is empty")]
    EmptyText { index: usize },

    #[error("segment {index}: starts at {t0}s, before the previous segment at {previous_t0}s")]
    OutOfOrder {
        index: usize,
        t0: f64,
        previous_t0: f64,
    },

    #[error("found {count} distinct speakers, at most 2 are supported")]
    TooManySpeakers { count: usize },

    #[error("invalid filler pattern {pattern:?}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("failed to parse JSON")]
    Json(#[from] serde_json::Error),

    #[error("I/O error")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DiarizeError>;
