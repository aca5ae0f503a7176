use crate::models::Language;

const EN_FILLERS: &[&str] = &["uh", "um", "mmm", "er", "ah", "like"];
const FR_FILLERS: &[&str] = &["euh", "heu", "ben", "bah", "alors", "hum"];

/// Whether a whole token is a filler in the given language (case-insensitive)
pub fn is_filler(token: &str, language: Language) -> bool {
    let vocabulary = match language {
        Language::En => EN_FILLERS,
        Language::Fr => FR_FILLERS,
    };
    let lower = token.to_lowercase();
    vocabulary.contains(&lower.as_str())
}

/// Collapse runs of the same filler token to a single occurrence
///
/// "um um um I think" becomes "um I think". Non-filler tokens, and runs of
/// different fillers, pass through unchanged. Whitespace is normalized to
/// single spaces.
pub fn clean_disfluencies(text: &str, language: Language) -> String {
    let mut kept: Vec<&str> = Vec::new();
    let mut last_filler: Option<String> = None;

    for token in text.split_whitespace() {
        if is_filler(token, language) {
            let lower = token.to_lowercase();
            if last_filler.as_deref() == Some(lower.as_str()) {
                continue;
            }
            last_filler = Some(lower);
        } else {
            last_filler = None;
        }
        kept.push(token);
    }

    kept.join(" ")
}
