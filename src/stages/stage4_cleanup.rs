use std::fmt;
use std::str::FromStr;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{DiarizeError, Result};
use crate::heuristics::clean_disfluencies;
use crate::models::{Language, Turn};

use super::stage3_turns::clean_turn_text;

/// French filler expressions. Each entry is a regex fragment matched as
/// whole words, case-insensitively.
const DEFAULT_FR_FILLERS: &[&str] = &[
    r"euh+",
    r"heu",
    r"hum+",
    r"ben",
    r"bah",
    r"hein",
    r"tu\s+sais",
    r"tu\s+vois",
    r"je\s+veux\s+dire",
];

/// English filler expressions, also applied to French dialogue
const DEFAULT_EN_FILLERS: &[&str] = &[
    r"u+h+",
    r"u+m+",
    // "ER" is the emergency room
    r"(?-i:[Ee]rm?)",
    r"hmm+",
    r"mmm+",
    r"you\s+know",
    r"i\s+mean",
];

const DEFAULT_MEDICAL_TERMS: &[&str] = &[
    "douleur",
    "symptôme",
    "diagnostic",
    "traitement",
    "médicament",
    "pain",
    "symptom",
    "diagnosis",
    "treatment",
    "medication",
    "mg",
    "mm",
    "ml",
    "cc",
    "mg/kg",
    "bpm",
    "mmhg",
];

const PUNCTUATION: &[char] = &[',', '.', '!', '?', ';', ':'];

/// Named cleanup profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CleanupProfileName {
    #[default]
    Default,
    ClinicalLight,
}

impl fmt::Display for CleanupProfileName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CleanupProfileName::Default => write!(f, "default"),
            CleanupProfileName::ClinicalLight => write!(f, "clinical_light"),
        }
    }
}

impl FromStr for CleanupProfileName {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "default" => Ok(CleanupProfileName::Default),
            "clinical_light" => Ok(CleanupProfileName::ClinicalLight),
            other => Err(format!(
                "unknown cleanup profile '{other}', expected 'default' or 'clinical_light'"
            )),
        }
    }
}

/// Tokens a profile protects from full removal when repeated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ClinicalGuards {
    pub preserve_medical_terms: bool,
    pub preserve_numbers: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CleanupProfile {
    pub name: CleanupProfileName,
    pub guards: ClinicalGuards,
}

impl CleanupProfile {
    pub fn named(name: CleanupProfileName) -> Self {
        let guards = match name {
            CleanupProfileName::Default => ClinicalGuards::default(),
            CleanupProfileName::ClinicalLight => ClinicalGuards {
                preserve_medical_terms: true,
                preserve_numbers: true,
            },
        };
        Self { name, guards }
    }
}

/// Filler regex fragments per language
///
/// French dialogue runs the French list and then the English one; English
/// dialogue runs only the English list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FillerPatterns {
    pub fr: Vec<String>,
    pub en: Vec<String>,
}

impl Default for FillerPatterns {
    fn default() -> Self {
        let owned = |patterns: &[&str]| patterns.iter().map(|p| p.to_string()).collect();
        Self {
            fr: owned(DEFAULT_FR_FILLERS),
            en: owned(DEFAULT_EN_FILLERS),
        }
    }
}

/// Configuration for Stage 4 cleanup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanupConfig {
    pub profile: CleanupProfileName,
    pub filler_patterns: FillerPatterns,
    /// Terms a guarded profile never deletes as fillers and keeps once when
    /// repeated
    pub medical_terms: Vec<String>,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            profile: CleanupProfileName::Default,
            filler_patterns: FillerPatterns::default(),
            medical_terms: DEFAULT_MEDICAL_TERMS.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// Statistics from a cleanup pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleanupStats {
    pub profile: CleanupProfileName,
    pub original_turns: usize,
    pub cleaned_turns: usize,
    /// Characters removed across all turns, dropped turns included
    pub removed_chars: usize,
    /// Tokens removed by the repetition pass
    pub repetitions_removed: usize,
}

/// Result of Stage 4 cleanup
#[derive(Debug, Clone, Serialize)]
pub struct CleanupResult {
    pub turns: Vec<Turn>,
    pub stats: CleanupStats,
}

/// Compiled cleanup profile, reusable across dialogues
#[derive(Debug, Clone)]
pub struct TurnCleaner {
    profile: CleanupProfile,
    fr_fillers: Vec<Regex>,
    en_fillers: Vec<Regex>,
    medical_terms: Vec<String>,
}

impl TurnCleaner {
    pub fn new(config: &CleanupConfig) -> Result<Self> {
        Ok(Self {
            profile: CleanupProfile::named(config.profile),
            fr_fillers: compile_fillers(&config.filler_patterns.fr)?,
            en_fillers: compile_fillers(&config.filler_patterns.en)?,
            medical_terms: config.medical_terms.iter().map(|t| t.to_lowercase()).collect(),
        })
    }

    pub fn profile(&self) -> CleanupProfile {
        self.profile
    }

    /// Clean a single piece of text
    pub fn clean_text(&self, text: &str, language: Language) -> String {
        self.clean_counted(text, language).0
    }

    /// Execute Stage 4: clean every turn and drop the ones left empty
    pub fn clean_turns(&self, turns: &[Turn], language: Language) -> CleanupResult {
        let mut cleaned = Vec::with_capacity(turns.len());
        let mut repetitions_removed = 0;

        for turn in turns {
            let (text, removed) = self.clean_counted(&turn.text, language);
            repetitions_removed += removed;
            if text.is_empty() {
                debug!("Dropping turn at {:.2}s, empty after cleanup", turn.t0);
                continue;
            }
            cleaned.push(Turn {
                text,
                ..turn.clone()
            });
        }

        let original_chars: usize = turns.iter().map(|t| t.text.chars().count()).sum();
        let cleaned_chars: usize = cleaned.iter().map(|t| t.text.chars().count()).sum();

        let stats = CleanupStats {
            profile: self.profile.name,
            original_turns: turns.len(),
            cleaned_turns: cleaned.len(),
            removed_chars: original_chars.saturating_sub(cleaned_chars),
            repetitions_removed,
        };

        info!(
            "Stage 4 ({}): {} -> {} turns, {} chars removed, {} repeated tokens",
            stats.profile,
            stats.original_turns,
            stats.cleaned_turns,
            stats.removed_chars,
            stats.repetitions_removed
        );

        CleanupResult {
            turns: cleaned,
            stats,
        }
    }

    fn clean_counted(&self, text: &str, language: Language) -> (String, usize) {
        let mut text = clean_disfluencies(text, language);
        let french: &[Regex] = match language {
            Language::Fr => &self.fr_fillers,
            Language::En => &[],
        };
        let guard_terms = self.profile.guards.preserve_medical_terms;
        for filler in french.iter().chain(&self.en_fillers) {
            text = filler
                .replace_all(&text, |caps: &Captures| {
                    if guard_terms && self.is_medical_term(&caps[0]) {
                        caps[0].to_string()
                    } else {
                        " ".to_string()
                    }
                })
                .into_owned();
        }
        let (text, removed) = self.remove_repetitions(&text);
        (normalize_spacing(&text), removed)
    }

    /// Drop runs of identical adjacent tokens; guarded tokens keep one copy
    fn remove_repetitions(&self, text: &str) -> (String, usize) {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        let mut kept: Vec<&str> = Vec::with_capacity(tokens.len());
        let mut removed = 0;

        let mut i = 0;
        while i < tokens.len() {
            let token = tokens[i];
            let run = tokens[i..].iter().take_while(|&&t| t == token).count();
            if run == 1 {
                kept.push(token);
            } else if self.is_guarded(token) {
                kept.push(token);
                removed += run - 1;
            } else {
                removed += run;
            }
            i += run;
        }

        (kept.join(" "), removed)
    }

    fn is_guarded(&self, token: &str) -> bool {
        let guards = self.profile.guards;
        (guards.preserve_numbers && is_number(token))
            || (guards.preserve_medical_terms && self.is_medical_term(token))
    }

    fn is_medical_term(&self, token: &str) -> bool {
        let word = token.trim_matches(PUNCTUATION).to_lowercase();
        let unit = word.trim_start_matches(|c: char| c.is_ascii_digit() || c == '.' || c == ',');
        self.medical_terms
            .iter()
            .any(|term| *term == word || (*term == unit && unit.len() < word.len()))
    }
}

fn compile_fillers(patterns: &[String]) -> Result<Vec<Regex>> {
    patterns
        .iter()
        .map(|pattern| {
            Regex::new(&format!(r"(?i)\b(?:{pattern})\b,?")).map_err(|source| {
                DiarizeError::InvalidPattern {
                    pattern: pattern.clone(),
                    source,
                }
            })
        })
        .collect()
}

fn is_number(token: &str) -> bool {
    let word = token.trim_matches(PUNCTUATION);
    word.starts_with(|c: char| c.is_ascii_digit())
        && word
            .chars()
            .all(|c| c.is_ascii_digit() || c == '.' || c == ',')
}

/// Collapse whitespace, remove space before punctuation and collapse
/// punctuation runs. Leading punctuation is dropped.
pub fn normalize_spacing(text: &str) -> String {
    let tightened = clean_turn_text(text);

    let mut out = String::with_capacity(tightened.len());
    for c in tightened.chars() {
        if !PUNCTUATION.contains(&c) {
            out.push(c);
            continue;
        }
        let last = out.trim_end().chars().last();
        match last {
            None => {}
            Some(prev) if PUNCTUATION.contains(&prev) => {
                // a terminal mark wins over a soft one
                if matches!(c, '.' | '!' | '?') && matches!(prev, ',' | ';' | ':') {
                    let cut = out.trim_end().len() - prev.len_utf8();
                    out.truncate(cut);
                    out.push(c);
                }
            }
            Some(_) => out.push(c),
        }
    }

    out.split_whitespace().collect::<Vec<_>>().join(" ")
}
