use serde::Serialize;
use tracing::{debug, info};

use crate::heuristics::{
    SmoothingConfig, absorb_crumbs, enforce_min_hold, majority_vote, merge_adjacent,
};
use crate::models::{RawSegment, SmoothedSegment, count_flips};

/// Counters describing what smoothing changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct SmoothingDiagnostics {
    /// Bucket changes in the raw input
    pub flips_before: usize,
    /// Bucket changes after hysteresis
    pub flips_after: usize,
    /// Segments removed by adjacent merging
    pub merged: usize,
    /// Segments removed by crumb absorption
    pub crumbs_absorbed: usize,
}

/// Result of Stage 1 smoothing
#[derive(Debug, Clone, Default, Serialize)]
pub struct SmoothingResult {
    pub segments: Vec<SmoothedSegment>,
    pub diagnostics: SmoothingDiagnostics,
}

/// Execute Stage 1: temporal smoothing of bucket labels
///
/// Four passes, each a pure function over the previous pass's output:
/// 1. Windowed majority vote
/// 2. Minimum-hold hysteresis
/// 3. Adjacent same-bucket merge
/// 4. Crumb absorption
pub fn smooth(segments: &[RawSegment], config: &SmoothingConfig) -> SmoothingResult {
    if segments.is_empty() {
        return SmoothingResult::default();
    }

    let flips_before = count_flips(segments);

    let voted = majority_vote(segments, config.window);
    debug!(
        "Majority vote relabeled {} segments",
        relabeled(segments, &voted)
    );

    let held = enforce_min_hold(&voted, config.min_hold);
    debug!("Min-hold relabeled {} segments", relabeled(&voted, &held));
    let flips_after = count_flips(&held);

    let merged = merge_adjacent(&held, config.merge_gap);
    let final_segments = absorb_crumbs(&merged, config.min_segment);

    let diagnostics = SmoothingDiagnostics {
        flips_before,
        flips_after,
        merged: segments.len() - merged.len(),
        crumbs_absorbed: merged.len() - final_segments.len(),
    };

    info!(
        "Stage 1: {} -> {} segments, flips {} -> {}, {} merged, {} crumbs absorbed",
        segments.len(),
        final_segments.len(),
        diagnostics.flips_before,
        diagnostics.flips_after,
        diagnostics.merged,
        diagnostics.crumbs_absorbed
    );

    SmoothingResult {
        segments: final_segments,
        diagnostics,
    }
}

fn relabeled(before: &[RawSegment], after: &[RawSegment]) -> usize {
    before
        .iter()
        .zip(after)
        .filter(|(b, a)| b.bucket != a.bucket)
        .count()
}
