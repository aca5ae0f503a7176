use serde::Deserialize;

/// Word-level diarized transcript from Deepgram's prerecorded API
///
/// Only the first alternative of the first channel is read; everything
/// else in the response is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct DeepgramResponse {
    results: Results,
}

#[derive(Debug, Clone, Deserialize)]
struct Results {
    #[serde(default)]
    channels: Vec<Channel>,
}

#[derive(Debug, Clone, Deserialize)]
struct Channel {
    #[serde(default)]
    alternatives: Vec<Alternative>,
}

#[derive(Debug, Clone, Deserialize)]
struct Alternative {
    #[serde(default)]
    words: Vec<DiarizedWord>,
}

/// One recognised word tagged with its diarizer speaker
#[derive(Debug, Clone, Deserialize)]
pub struct DiarizedWord {
    pub word: String,
    /// Seconds
    pub start: f64,
    /// Seconds
    pub end: f64,
    pub speaker: u32,
    #[serde(default)]
    pub punctuated_word: Option<String>,
}

impl DiarizedWord {
    /// Punctuated form when smart formatting produced one
    pub fn text(&self) -> &str {
        self.punctuated_word.as_deref().unwrap_or(&self.word)
    }
}

impl DeepgramResponse {
    pub fn words(&self) -> &[DiarizedWord] {
        self.results
            .channels
            .first()
            .and_then(|channel| channel.alternatives.first())
            .map(|alternative| alternative.words.as_slice())
            .unwrap_or_default()
    }
}
