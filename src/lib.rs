pub mod config;
pub mod error;
pub mod heuristics;
pub mod io;
pub mod models;
pub mod pipeline;
pub mod stages;

pub use config::PipelineConfig;
pub use error::DiarizeError;
pub use heuristics::SmoothingConfig;
pub use io::{
    DialogueReport, HumanTranscript, parse_deepgram_file, parse_deepgram_json,
    parse_segments_file, parse_segments_json, validate_segments,
};
pub use models::{Bucket, Language, RawSegment, Role, RoleMap, RoleMappingResult, Turn, TurnStats};
pub use pipeline::{DialogueOutcome, Pipeline};
pub use stages::{
    CleanupConfig, CleanupProfileName, RoleMapperConfig, TurnCleaner, TurnConfig, build_turns,
    map_roles, normalize_language, smooth,
};
