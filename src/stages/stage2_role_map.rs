use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::heuristics::{is_question, is_self_report};
use crate::models::{
    Bucket, ByBucket, FeatureVector, Language, Role, RoleMap, RoleMappingResult,
    SmoothedSegment,
};

/// Weights of the clinician-vs-patient score
///
/// Each weight multiplies a feature difference oriented so that a positive
/// contribution means "bucket A looks like the clinician".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoleMapperConfig {
    /// Weight of questionRatioA - questionRatioB
    pub question_weight: f64,
    /// Weight of selfReportRatioB - selfReportRatioA
    pub self_report_weight: f64,
    /// Weight of +1 when A speaks first, -1 otherwise
    pub starts_first_weight: f64,
    /// Weight of talkShareB - talkShareA
    pub talk_share_weight: f64,
    /// Steepness of the logistic confidence curve
    pub steepness: f64,
}

impl Default for RoleMapperConfig {
    fn default() -> Self {
        Self {
            question_weight: 3.0,
            self_report_weight: 2.0,
            starts_first_weight: 1.0,
            talk_share_weight: 0.5,
            steepness: 1.0,
        }
    }
}

/// Per-bucket counts gathered in one pass over the segments
#[derive(Debug, Clone, Copy, Default)]
struct BucketTally {
    segments: usize,
    questions: usize,
    self_reports: usize,
    duration: f64,
    earliest: Option<f64>,
}

impl BucketTally {
    fn ratio(&self, count: usize) -> f64 {
        if self.segments > 0 {
            count as f64 / self.segments as f64
        } else {
            0.0
        }
    }
}

/// Map a language tag onto a supported language, defaulting to English
pub fn normalize_language(tag: &str) -> Language {
    Language::normalize(tag)
}

/// Execute Stage 2: assign clinician and patient roles to the two buckets
pub fn map_roles(
    segments: &[SmoothedSegment],
    language: Language,
    config: &RoleMapperConfig,
) -> RoleMappingResult {
    if segments.is_empty() {
        return RoleMappingResult::fallback(language);
    }

    let tallies = tally(segments, language);
    let features = features_from(&tallies);

    if tallies.a.segments == 0 || tallies.b.segments == 0 {
        warn!("Only one bucket present, keeping default role assignment");
        return RoleMappingResult {
            features,
            ..RoleMappingResult::fallback(language)
        };
    }

    let has_linguistic_signal = tallies.a.questions
        + tallies.b.questions
        + tallies.a.self_reports
        + tallies.b.self_reports
        > 0;

    let score = if has_linguistic_signal {
        score(&features, config)
    } else {
        0.0
    };

    let role_map = if score >= 0.0 {
        RoleMap::with_clinician(Bucket::A)
    } else {
        RoleMap::with_clinician(Bucket::B)
    };
    let confidence = confidence(score, config.steepness);

    info!(
        "Stage 2: clinician is bucket {} (score {:.3}, confidence {:.3})",
        role_map.bucket_of(Role::Clinician),
        score,
        confidence
    );

    RoleMappingResult {
        role_map,
        localized_role_map: role_map.localized(language),
        confidence,
        score,
        features,
    }
}

/// Linear clinician score; non-negative means bucket A is the clinician
pub fn score(features: &FeatureVector, config: &RoleMapperConfig) -> f64 {
    config.question_weight * (features.question_ratio_a - features.question_ratio_b)
        + config.self_report_weight * (features.self_report_ratio_b - features.self_report_ratio_a)
        + config.starts_first_weight * (2.0 * f64::from(features.starts_first_a) - 1.0)
        + config.talk_share_weight * (features.talk_share_b - features.talk_share_a)
}

/// Squash a score magnitude into [0.5, 1)
pub fn confidence(score: f64, steepness: f64) -> f64 {
    let squashed = 1.0 / (1.0 + (-steepness * score.abs()).exp());
    squashed.clamp(0.5, 1.0 - f64::EPSILON)
}

fn tally(segments: &[SmoothedSegment], language: Language) -> ByBucket<BucketTally> {
    let mut tallies: ByBucket<BucketTally> = ByBucket::default();

    for segment in segments {
        let t = &mut tallies[segment.bucket];
        t.segments += 1;
        t.duration += segment.duration();
        if is_question(&segment.text, language) {
            t.questions += 1;
        }
        if is_self_report(&segment.text, language) {
            t.self_reports += 1;
        }
        t.earliest = Some(t.earliest.map_or(segment.t0, |e| e.min(segment.t0)));
    }

    tallies
}

fn features_from(tallies: &ByBucket<BucketTally>) -> FeatureVector {
    let total = tallies.a.duration + tallies.b.duration;
    let (talk_share_a, talk_share_b) = if total > 0.0 {
        (tallies.a.duration / total, tallies.b.duration / total)
    } else {
        (0.5, 0.5)
    };

    let global_earliest = match (tallies.a.earliest, tallies.b.earliest) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    };
    let starts_first_a =
        u8::from(tallies.a.earliest.is_some() && tallies.a.earliest == global_earliest);

    FeatureVector {
        question_ratio_a: tallies.a.ratio(tallies.a.questions),
        question_ratio_b: tallies.b.ratio(tallies.b.questions),
        self_report_ratio_a: tallies.a.ratio(tallies.a.self_reports),
        self_report_ratio_b: tallies.b.ratio(tallies.b.self_reports),
        starts_first_a,
        talk_share_a,
        talk_share_b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Segment;

    fn map(segments: &[Segment], language: Language) -> RoleMappingResult {
        map_roles(segments, language, &RoleMapperConfig::default())
    }

    #[test]
    fn test_empty_segments_use_default() {
        let result = map(&[], Language::En);
        assert_eq!(result.role_map.role_of(Bucket::A), Role::Clinician);
        assert_eq!(result.role_map.role_of(Bucket::B), Role::Patient);
        assert_eq!(result.confidence, 0.5);
        assert_eq!(result.features, FeatureVector::default());
    }

    #[test]
    fn test_question_heavy_a_is_clinician_english() {
        let segments = vec![
            Segment::new(0.0, 2.0, Bucket::A, "What brings you in today?"),
            Segment::new(2.5, 6.0, Bucket::B, "I have been having back pain"),
            Segment::new(6.5, 8.0, Bucket::A, "How long have you had this pain?"),
        ];

        let result = map(&segments, Language::En);

        assert_eq!(result.role_map.role_of(Bucket::A), Role::Clinician);
        assert_eq!(result.role_map.role_of(Bucket::B), Role::Patient);
        assert!(result.confidence > 0.5);
        assert_eq!(result.localized_role_map.a, "Clinician");
        assert_eq!(result.features.question_ratio_a, 1.0);
        assert_eq!(result.features.self_report_ratio_b, 1.0);
        assert_eq!(result.features.starts_first_a, 1);
        assert!((result.features.talk_share_a + result.features.talk_share_b - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_question_heavy_a_is_clinician_french() {
        let segments = vec![
            Segment::new(0.0, 2.0, Bucket::A, "Qu'est-ce qui vous amène aujourd'hui?"),
            Segment::new(2.5, 6.0, Bucket::B, "J'ai mal au dos depuis une semaine"),
            Segment::new(6.5, 8.0, Bucket::A, "Depuis quand exactement"),
            Segment::new(8.5, 12.0, Bucket::B, "Je pense que c'est le travail"),
        ];

        let result = map(&segments, Language::Fr);

        assert_eq!(result.role_map.role_of(Bucket::A), Role::Clinician);
        assert_eq!(result.localized_role_map.a, "Clinicien");
        assert_eq!(result.localized_role_map.b, "Patient");
        assert!(result.confidence > 0.5);
    }

    #[test]
    fn test_clinician_on_b_despite_a_starting() {
        let segments = vec![
            Segment::new(0.0, 4.0, Bucket::A, "I have a terrible headache"),
            Segment::new(4.5, 6.0, Bucket::B, "When did it start?"),
            Segment::new(6.5, 10.0, Bucket::A, "I think it was Monday"),
            Segment::new(10.5, 12.0, Bucket::B, "Does light bother you?"),
        ];

        let result = map(&segments, Language::En);

        assert_eq!(result.role_map.role_of(Bucket::B), Role::Clinician);
        assert_eq!(result.role_map.role_of(Bucket::A), Role::Patient);
        assert!(result.score < 0.0);
        assert!(result.confidence > 0.5);
        assert_eq!(result.label_for(Bucket::B), "Clinician");
    }

    #[test]
    fn test_no_linguistic_signal_settles_at_half() {
        let segments = vec![
            Segment::new(0.0, 1.0, Bucket::A, "Hello there."),
            Segment::new(1.5, 2.5, Bucket::B, "Good morning."),
        ];

        let result = map(&segments, Language::En);

        assert_eq!(result.role_map.role_of(Bucket::A), Role::Clinician);
        assert_eq!(result.confidence, 0.5);
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn test_single_bucket_keeps_default_with_features() {
        let segments = vec![
            Segment::new(0.0, 1.0, Bucket::B, "How are you?"),
            Segment::new(1.5, 2.5, Bucket::B, "I have pain"),
        ];

        let result = map(&segments, Language::En);

        assert_eq!(result.role_map.role_of(Bucket::A), Role::Clinician);
        assert_eq!(result.confidence, 0.5);
        assert_eq!(result.features.talk_share_b, 1.0);
        assert_eq!(result.features.starts_first_a, 0);
    }

    #[test]
    fn test_confidence_bounds_and_monotonicity() {
        let mut previous = 0.5;
        for step in 0..=200 {
            let s = step as f64 * 0.25;
            for signed in [s, -s] {
                let c = confidence(signed, 1.0);
                assert!((0.5..1.0).contains(&c), "confidence {c} out of range for {signed}");
            }
            let c = confidence(s, 1.0);
            assert!(c >= previous);
            previous = c;
        }
        assert_eq!(confidence(0.0, 1.0), 0.5);
        assert_eq!(confidence(-2.0, 1.0), confidence(2.0, 1.0));
    }

    #[test]
    fn test_normalize_language() {
        assert_eq!(normalize_language("fr-CA"), Language::Fr);
        assert_eq!(normalize_language("en-US"), Language::En);
        assert_eq!(normalize_language("es"), Language::En);
    }
}
