use crate::models::Language;

/// Tokens that open a question
const EN_INTERROGATIVES: &[&str] = &[
    "what", "how", "can", "do", "does", "did", "are", "is", "when", "why",
];
const FR_INTERROGATIVES: &[&str] = &["qu'est", "comment", "pouvez", "depuis", "avez", "est-ce"];

/// First-person symptom-report phrases
const EN_SELF_REPORT: &[&str] = &[
    "i have",
    "i've",
    "i feel",
    "i think",
    "my pain",
    "i'm having",
    "i'm feeling",
    "it hurts",
];
const FR_SELF_REPORT: &[&str] = &[
    "j'ai",
    "je pense",
    "ma douleur",
    "je me sens",
    "je ressens",
    "j'éprouve",
];

/// Lowercase words with surrounding punctuation stripped, apostrophes unified
fn words(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|w| {
            w.replace('\u{2019}', "'")
                .trim_matches(|c: char| !c.is_alphanumeric() && c != '\'' && c != '-')
                .to_lowercase()
        })
        .filter(|w| !w.is_empty())
        .collect()
}

/// Whether a segment reads as a question: trailing "?" or an interrogative opener
pub fn is_question(text: &str, language: Language) -> bool {
    if text.trim_end().ends_with('?') {
        return true;
    }

    let words = words(text);
    let Some(first) = words.first() else {
        return false;
    };

    match language {
        Language::En => EN_INTERROGATIVES
            .iter()
            .any(|q| first == q || first.strip_prefix(q).is_some_and(|rest| rest.starts_with('\''))),
        Language::Fr => FR_INTERROGATIVES.iter().any(|q| first.starts_with(q)),
    }
}

/// Whether a segment contains a first-person symptom report
pub fn is_self_report(text: &str, language: Language) -> bool {
    let patterns = match language {
        Language::En => EN_SELF_REPORT,
        Language::Fr => FR_SELF_REPORT,
    };
    let padded = format!(" {} ", words(text).join(" "));

    patterns
        .iter()
        .any(|p| padded.contains(&format!(" {p} ")))
}
