use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::{Language, RoleMappingResult, Turn, TurnStats};
use crate::pipeline::DialogueOutcome;
use crate::stages::{CleanupProfileName, CleanupStats, SmoothingDiagnostics, turn_summary};

/// Machine-readable report for one processed dialogue
#[derive(Debug, Clone, Serialize)]
pub struct DialogueReport {
    pub metadata: ReportMetadata,
    pub smoothing: SmoothingDiagnostics,
    pub role_mapping: RoleMappingResult,
    pub turns: Vec<Turn>,
    pub turn_stats: TurnStats,
    pub cleanup: CleanupStats,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportMetadata {
    pub dialogue_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub language: Language,
    pub cleanup_profile: CleanupProfileName,
    pub raw_segments: usize,
    pub smoothed_segments: usize,
    /// One-line turn summary
    pub summary: String,
}

impl DialogueReport {
    pub fn from_outcome(outcome: &DialogueOutcome) -> Self {
        let metadata = ReportMetadata {
            dialogue_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            language: outcome.language,
            cleanup_profile: outcome.cleanup.profile,
            raw_segments: outcome.raw_segment_count,
            smoothed_segments: outcome.smoothing.segments.len(),
            summary: turn_summary(&outcome.turns),
        };

        Self {
            metadata,
            smoothing: outcome.smoothing.diagnostics,
            role_mapping: outcome.role_mapping.clone(),
            turns: outcome.turns.clone(),
            turn_stats: outcome.turn_stats,
            cleanup: outcome.cleanup.clone(),
        }
    }

    /// Write to a JSON file
    pub fn write_json(&self, path: &Path) -> Result<()> {
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        serde_json::to_writer_pretty(file, self).context("Failed to write JSON")?;
        Ok(())
    }
}

/// Human-readable transcript format
pub struct HumanTranscript<'a> {
    turns: &'a [Turn],
}

impl<'a> HumanTranscript<'a> {
    pub fn new(turns: &'a [Turn]) -> Self {
        Self { turns }
    }

    /// Format the turns as human-readable text
    pub fn format(&self) -> String {
        let mut output = String::new();

        for turn in self.turns {
            output.push_str(&format!("[{}] {}:\n", format_timestamp(turn.t0), turn.role));
            output.push_str(&wrap_text(&turn.text, 80));
            output.push_str("\n\n");
        }

        output
    }

    /// Write to a text file
    pub fn write_file(&self, path: &Path) -> Result<()> {
        let mut file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create file: {:?}", path))?;
        write!(file, "{}", self.format())?;
        Ok(())
    }
}

/// Format seconds as MM:SS.mmm
fn format_timestamp(seconds: f64) -> String {
    let ms = (seconds.max(0.0) * 1000.0).round() as u64;
    let millis = ms % 1000;
    let total_secs = ms / 1000;
    format!("{:02}:{:02}.{:03}", total_secs / 60, total_secs % 60, millis)
}

/// Wrap text at approximately the given width
fn wrap_text(text: &str, width: usize) -> String {
    let mut result = String::new();
    let mut line_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if line_len + word_len + 1 > width && line_len > 0 {
            result.push('\n');
            line_len = 0;
        }
        if line_len > 0 {
            result.push(' ');
            line_len += 1;
        }
        result.push_str(word);
        line_len += word_len;
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;
    use crate::models::{Bucket, Segment};
    use crate::pipeline::Pipeline;

    fn turn(role: &str, text: &str, t0: f64, t1: f64) -> Turn {
        Turn {
            role: role.to_string(),
            text: text.to_string(),
            t0,
            t1,
        }
    }

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0.0), "00:00.000");
        assert_eq!(format_timestamp(1.5), "00:01.500");
        assert_eq!(format_timestamp(65.0), "01:05.000");
        assert_eq!(format_timestamp(3661.5), "61:01.500");
    }

    #[test]
    fn test_wrap_text() {
        let text = "This is a test of the text wrapping function that should wrap at 20 chars";
        let wrapped = wrap_text(text, 20);
        assert!(wrapped.lines().count() > 1);
        for line in wrapped.lines() {
            assert!(line.chars().count() <= 20);
        }
        assert_eq!(wrapped.split_whitespace().collect::<Vec<_>>().join(" "), text);
    }

    #[test]
    fn test_human_transcript_format() {
        let turns = vec![
            turn("Clinicien", "Où avez-vous mal?", 0.0, 1.5),
            turn("Patient", "Au dos.", 2.25, 3.0),
        ];

        assert_eq!(
            HumanTranscript::new(&turns).format(),
            "[00:00.000] Clinicien:\nOù avez-vous mal?\n\n[00:02.250] Patient:\nAu dos.\n\n"
        );
    }

    #[test]
    fn test_report_json_shape() {
        let segments = vec![
            Segment::new(0.0, 1.5, Bucket::A, "How long have you had this pain?"),
            Segment::new(2.0, 4.0, Bucket::B, "I have had it for a week."),
        ];
        let outcome = Pipeline::new(PipelineConfig::default())
            .unwrap()
            .run(&segments, Language::En);
        let report = DialogueReport::from_outcome(&outcome);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        report.write_json(&path).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(json["metadata"]["language"], "en");
        assert_eq!(json["metadata"]["cleanup_profile"], "default");
        assert_eq!(json["metadata"]["raw_segments"], 2);
        assert!(json["metadata"]["dialogue_id"].as_str().unwrap().len() == 36);
        assert_eq!(json["role_mapping"]["role_map"]["A"], "CLINICIAN");
        assert_eq!(json["turns"][1]["role"], "Patient");
        assert_eq!(json["turn_stats"]["total_turns"], 2);
        assert!(json["smoothing"]["flips_before"].is_u64());
    }
}
