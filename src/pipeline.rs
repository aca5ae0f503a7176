use serde::Serialize;
use tracing::{info, warn};

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::models::{Language, RawSegment, RoleMappingResult, Turn, TurnStats};
use crate::stages::{
    CleanupStats, SmoothingResult, TurnCleaner, build_turns, map_roles, smooth, turn_summary,
};

/// Everything the pipeline produced for one dialogue
#[derive(Debug, Clone, Serialize)]
pub struct DialogueOutcome {
    pub language: Language,
    pub raw_segment_count: usize,
    pub smoothing: SmoothingResult,
    pub role_mapping: RoleMappingResult,
    /// Cleaned turns
    pub turns: Vec<Turn>,
    /// Stats over the cleaned turns
    pub turn_stats: TurnStats,
    pub cleanup: CleanupStats,
}

/// Smoother, role mapper, turn builder and cleanup run in sequence
///
/// Holds no per-dialogue state; one instance can process any number of
/// dialogues, from any number of threads.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
    cleaner: TurnCleaner,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Result<Self> {
        let cleaner = TurnCleaner::new(&config.cleanup)?;
        Ok(Self { config, cleaner })
    }

    pub fn run(&self, segments: &[RawSegment], language: Language) -> DialogueOutcome {
        info!(
            "Processing {} segments ({}, profile {})",
            segments.len(),
            language,
            self.cleaner.profile().name
        );

        let smoothing = smooth(segments, &self.config.smoothing);
        let role_mapping = map_roles(&smoothing.segments, language, &self.config.roles);

        if !smoothing.segments.is_empty()
            && role_mapping.confidence < self.config.low_confidence_threshold
        {
            warn!(
                "Low role mapping confidence {:.3} (threshold {:.2})",
                role_mapping.confidence, self.config.low_confidence_threshold
            );
        }

        let built = build_turns(
            &smoothing.segments,
            &role_mapping,
            language,
            &self.config.turns,
        );
        let cleaned = self.cleaner.clean_turns(&built.turns, language);
        let turn_stats = TurnStats::from_turns(&cleaned.turns);

        info!("Complete: {}", turn_summary(&cleaned.turns));

        DialogueOutcome {
            language,
            raw_segment_count: segments.len(),
            smoothing,
            role_mapping,
            turns: cleaned.turns,
            turn_stats,
            cleanup: cleaned.stats,
        }
    }
}
