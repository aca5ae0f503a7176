use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use crate::error::DiarizeError;
use crate::models::{Bucket, DeepgramResponse, RawSegment};

/// Pauses longer than this split a same-speaker run of Deepgram words
pub const DEFAULT_MAX_PAUSE: f64 = 0.5;

/// Accepted shapes of a segment file
#[derive(Deserialize)]
#[serde(untagged)]
enum SegmentsInput {
    List(Vec<RawSegment>),
    Wrapped { segments: Vec<RawSegment> },
}

/// Parse a segment JSON file into validated raw segments
pub fn parse_segments_file(path: &Path) -> Result<Vec<RawSegment>> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    parse_segments_json(&content).with_context(|| format!("Invalid segment file: {:?}", path))
}

/// Parse segment JSON, either a bare array or `{"segments": [...]}`
pub fn parse_segments_json(json: &str) -> Result<Vec<RawSegment>> {
    let input: SegmentsInput =
        serde_json::from_str(json).context("Failed to parse segment JSON")?;
    let segments = match input {
        SegmentsInput::List(segments) => segments,
        SegmentsInput::Wrapped { segments } => segments,
    };
    Ok(validate_segments(segments)?)
}

/// Parse a Deepgram JSON file into validated raw segments
pub fn parse_deepgram_file(path: &Path) -> Result<Vec<RawSegment>> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {:?}", path))?;
    parse_deepgram_json(&content).with_context(|| format!("Invalid Deepgram file: {:?}", path))
}

/// Parse Deepgram JSON into validated raw segments
pub fn parse_deepgram_json(json: &str) -> Result<Vec<RawSegment>> {
    let response: DeepgramResponse =
        serde_json::from_str(json).context("Failed to parse Deepgram JSON")?;
    let segments = segments_from_deepgram(&response, DEFAULT_MAX_PAUSE)?;
    Ok(validate_segments(segments)?)
}

/// Group diarized Deepgram words into raw segments
///
/// A segment is a run of words from one speaker with no pause longer than
/// `max_pause` seconds. The first speaker heard becomes bucket A and the
/// second bucket B; a third speaker is rejected.
pub fn segments_from_deepgram(
    response: &DeepgramResponse,
    max_pause: f64,
) -> Result<Vec<RawSegment>, DiarizeError> {
    let words = response.words();
    let mut speakers: Vec<u32> = Vec::with_capacity(2);
    let mut segments: Vec<RawSegment> = Vec::new();
    let mut current_speaker: Option<u32> = None;

    for word in words {
        let bucket = match speakers.iter().position(|&s| s == word.speaker) {
            Some(0) => Bucket::A,
            Some(_) => Bucket::B,
            None if speakers.len() < 2 => {
                speakers.push(word.speaker);
                if speakers.len() == 1 { Bucket::A } else { Bucket::B }
            }
            None => {
                let mut distinct: Vec<u32> = words.iter().map(|w| w.speaker).collect();
                distinct.sort_unstable();
                distinct.dedup();
                return Err(DiarizeError::TooManySpeakers {
                    count: distinct.len(),
                });
            }
        };

        match segments.last_mut() {
            Some(segment)
                if current_speaker == Some(word.speaker) && word.start - segment.t1 <= max_pause =>
            {
                segment.t1 = segment.t1.max(word.end);
                segment.text.push(' ');
                segment.text.push_str(word.text());
            }
            _ => segments.push(RawSegment::new(word.start, word.end, bucket, word.text())),
        }
        current_speaker = Some(word.speaker);
    }

    debug!(
        "Grouped {} words from {} speakers into {} segments",
        words.len(),
        speakers.len(),
        segments.len()
    );

    Ok(segments)
}

/// Check ordering and content of raw segments, trimming their text
pub fn validate_segments(segments: Vec<RawSegment>) -> Result<Vec<RawSegment>, DiarizeError> {
    let mut previous_t0: Option<f64> = None;

    segments
        .into_iter()
        .enumerate()
        .map(|(index, mut segment)| {
            let RawSegment { t0, t1, .. } = segment;
            if !t0.is_finite() || !t1.is_finite() || t1 < t0 {
                return Err(DiarizeError::InvalidTimestamps { index, t0, t1 });
            }
            if let Some(previous_t0) = previous_t0.filter(|&p| t0 < p) {
                return Err(DiarizeError::OutOfOrder {
                    index,
                    t0,
                    previous_t0,
                });
            }

            let trimmed = segment.text.trim();
            if trimmed.is_empty() {
                return Err(DiarizeError::EmptyText { index });
            }
            if trimmed.len() != segment.text.len() {
                segment.text = trimmed.to_string();
            }

            previous_t0 = Some(t0);
            Ok(segment)
        })
        .collect()
}
