use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Bucket, ByBucket};

/// Semantic role of a dialogue participant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Clinician,
    Patient,
}

impl Role {
    /// Display label in the given language
    pub fn label(self, language: Language) -> &'static str {
        match (self, language) {
            (Role::Clinician, Language::En) => "Clinician",
            (Role::Clinician, Language::Fr) => "Clinicien",
            (Role::Patient, _) => "Patient",
        }
    }

    /// Recover a role from any of its display labels
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Clinician" | "Clinicien" => Some(Role::Clinician),
            "Patient" => Some(Role::Patient),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Clinician => write!(f, "CLINICIAN"),
            Role::Patient => write!(f, "PATIENT"),
        }
    }
}

/// Dialogue language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Fr,
    #[default]
    En,
}

impl Language {
    /// Map a language tag such as "fr-CA" or "en-US" onto a supported language.
    ///
    /// Anything that does not start with "fr" falls back to English.
    pub fn normalize(tag: &str) -> Self {
        let prefix = tag.trim().get(..2);
        if prefix.is_some_and(|p| p.eq_ignore_ascii_case("fr")) {
            Language::Fr
        } else {
            Language::En
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::Fr => "fr",
            Language::En => "en",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Bijective assignment of the two roles onto the two buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoleMap {
    clinician: Bucket,
}

impl RoleMap {
    /// Map with the clinician on the given bucket and the patient on the other
    pub fn with_clinician(clinician: Bucket) -> Self {
        Self { clinician }
    }

    pub fn role_of(&self, bucket: Bucket) -> Role {
        if bucket == self.clinician {
            Role::Clinician
        } else {
            Role::Patient
        }
    }

    pub fn bucket_of(&self, role: Role) -> Bucket {
        match role {
            Role::Clinician => self.clinician,
            Role::Patient => self.clinician.other(),
        }
    }

    pub fn as_by_bucket(&self) -> ByBucket<Role> {
        ByBucket::new(self.role_of(Bucket::A), self.role_of(Bucket::B))
    }

    pub fn localized(&self, language: Language) -> ByBucket<String> {
        self.as_by_bucket()
            .map(|_, role| role.label(language).to_string())
    }
}

impl Default for RoleMap {
    fn default() -> Self {
        Self::with_clinician(Bucket::A)
    }
}

/// Linguistic and temporal features extracted per bucket
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FeatureVector {
    pub question_ratio_a: f64,
    pub question_ratio_b: f64,
    pub self_report_ratio_a: f64,
    pub self_report_ratio_b: f64,
    pub starts_first_a: u8,
    pub talk_share_a: f64,
    pub talk_share_b: f64,
}

impl Default for FeatureVector {
    fn default() -> Self {
        Self {
            question_ratio_a: 0.0,
            question_ratio_b: 0.0,
            self_report_ratio_a: 0.0,
            self_report_ratio_b: 0.0,
            starts_first_a: 0,
            talk_share_a: 0.5,
            talk_share_b: 0.5,
        }
    }
}

/// Outcome of role mapping for one dialogue
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoleMappingResult {
    #[serde(serialize_with = "serialize_role_map")]
    pub role_map: RoleMap,
    pub localized_role_map: ByBucket<String>,
    /// In [0.5, 1)
    pub confidence: f64,
    /// Raw score before squashing; positive favours A as clinician
    pub score: f64,
    pub features: FeatureVector,
}

fn serialize_role_map<S: serde::Serializer>(map: &RoleMap, s: S) -> Result<S::Ok, S::Error> {
    map.as_by_bucket().serialize(s)
}

impl RoleMappingResult {
    /// Default assignment used when no evidence is available
    pub fn fallback(language: Language) -> Self {
        let role_map = RoleMap::default();
        Self {
            role_map,
            localized_role_map: role_map.localized(language),
            confidence: 0.5,
            score: 0.0,
            features: FeatureVector::default(),
        }
    }

    /// Localized label for the role mapped onto a bucket
    pub fn label_for(&self, bucket: Bucket) -> &str {
        &self.localized_role_map[bucket]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_language() {
        assert_eq!(Language::normalize("fr-CA"), Language::Fr);
        assert_eq!(Language::normalize("fr"), Language::Fr);
        assert_eq!(Language::normalize("FR_fr"), Language::Fr);
        assert_eq!(Language::normalize("en-US"), Language::En);
        assert_eq!(Language::normalize("en-CA"), Language::En);
        assert_eq!(Language::normalize("es"), Language::En);
        assert_eq!(Language::normalize(""), Language::En);
        assert_eq!(Language::normalize("f"), Language::En);
    }

    #[test]
    fn test_normalize_language_idempotent() {
        for tag in ["fr-CA", "en-US", "es", "xx", "Fr"] {
            let once = Language::normalize(tag);
            assert_eq!(Language::normalize(once.code()), once);
        }
    }

    #[test]
    fn test_role_map_is_bijective() {
        for clinician in Bucket::ALL {
            let map = RoleMap::with_clinician(clinician);
            assert_ne!(map.role_of(Bucket::A), map.role_of(Bucket::B));
            assert_eq!(map.bucket_of(Role::Clinician), clinician);
            assert_eq!(map.bucket_of(Role::Patient), clinician.other());
        }
    }

    #[test]
    fn test_localized_labels() {
        let map = RoleMap::with_clinician(Bucket::B);
        let fr = map.localized(Language::Fr);
        assert_eq!(fr.a, "Patient");
        assert_eq!(fr.b, "Clinicien");
        let en = map.localized(Language::En);
        assert_eq!(en.b, "Clinician");
        assert_eq!(Role::from_label("Clinicien"), Some(Role::Clinician));
        assert_eq!(Role::from_label("Doctor"), None);
    }

    #[test]
    fn test_role_mapping_serializes_roles() {
        let json = serde_json::to_value(RoleMappingResult::fallback(Language::En)).unwrap();
        assert_eq!(json["role_map"]["A"], "CLINICIAN");
        assert_eq!(json["role_map"]["B"], "PATIENT");
        assert_eq!(json["localized_role_map"]["A"], "Clinician");
    }
}
