use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::models::{Language, Role, RoleMappingResult, SmoothedSegment, Turn, TurnStats};

/// Configuration for Stage 3 turn building
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TurnConfig {
    /// A same-role segment starting this many seconds or more after the
    /// open turn ends starts a new turn
    pub max_gap: f64,
}

impl Default for TurnConfig {
    fn default() -> Self {
        Self { max_gap: 2.5 }
    }
}

/// Result of Stage 3 turn building
#[derive(Debug, Clone, Default, Serialize)]
pub struct TurnBuildResult {
    pub turns: Vec<Turn>,
    pub stats: TurnStats,
}

/// Execute Stage 3: group role-labeled segments into dialogue turns
pub fn build_turns(
    segments: &[SmoothedSegment],
    role_mapping: &RoleMappingResult,
    language: Language,
    config: &TurnConfig,
) -> TurnBuildResult {
    let mut turns: Vec<Turn> = Vec::new();
    let mut open_role: Option<Role> = None;

    for segment in segments {
        let role = role_mapping.role_map.role_of(segment.bucket);
        let text = clean_turn_text(&segment.text);

        match turns.last_mut() {
            Some(turn) if open_role == Some(role) && segment.t0 - turn.t1 < config.max_gap => {
                if !text.is_empty() {
                    if !turn.text.is_empty() {
                        turn.text.push(' ');
                    }
                    turn.text.push_str(&text);
                }
                turn.t1 = turn.t1.max(segment.t1);
            }
            _ => {
                turns.push(Turn {
                    role: role_mapping.label_for(segment.bucket).to_string(),
                    text,
                    t0: segment.t0,
                    t1: segment.t1,
                });
                open_role = Some(role);
            }
        }
    }

    let stats = TurnStats::from_turns(&turns);
    if !turns.is_empty() {
        info!("Stage 3 ({}): {}", language, turn_summary(&turns));
    }

    TurnBuildResult { turns, stats }
}

fn re_whitespace() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("valid regex"))
}

fn re_space_before_punct() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+([,.!?;:])").expect("valid regex"))
}

/// Collapse whitespace, drop spaces before punctuation and trim
pub fn clean_turn_text(text: &str) -> String {
    let collapsed = re_whitespace().replace_all(text, " ");
    let tightened = re_space_before_punct().replace_all(&collapsed, "$1");
    tightened.trim().to_string()
}

/// Render turns as "Role: text" blocks separated by blank lines
pub fn format_turns_for_display(turns: &[Turn]) -> String {
    turns
        .iter()
        .map(|turn| format!("{}: {}", turn.role, clean_turn_text(&turn.text)))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// One-line summary of a turn sequence for logs
pub fn turn_summary(turns: &[Turn]) -> String {
    let stats = TurnStats::from_turns(turns);
    format!(
        "Turns: {} ({}C/{}P), Duration: {:.1}s, Avg: {:.1}s/turn",
        stats.total_turns,
        stats.clinician_turns,
        stats.patient_turns,
        stats.total_duration,
        stats.average_turn_duration()
    )
}
