use serde::{Deserialize, Serialize};

use super::Role;

/// A run of consecutive segments attributed to one role
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    /// Localized role label ("Clinician", "Clinicien", "Patient")
    pub role: String,
    pub text: String,
    /// Start time in seconds
    pub t0: f64,
    /// End time in seconds
    pub t1: f64,
}

impl Turn {
    /// Semantic role behind the label, if recognised
    pub fn semantic_role(&self) -> Option<Role> {
        Role::from_label(&self.role)
    }
}

/// Aggregate counts over a turn sequence
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct TurnStats {
    pub total_turns: usize,
    pub clinician_turns: usize,
    pub patient_turns: usize,
    /// Span from the first turn start to the last turn end, in seconds
    pub total_duration: f64,
}

impl TurnStats {
    pub fn from_turns(turns: &[Turn]) -> Self {
        if turns.is_empty() {
            return Self::default();
        }

        let count = |role| {
            turns
                .iter()
                .filter(|t| t.semantic_role() == Some(role))
                .count()
        };
        let start = turns.iter().map(|t| t.t0).fold(f64::INFINITY, f64::min);
        let end = turns.iter().map(|t| t.t1).fold(f64::NEG_INFINITY, f64::max);

        Self {
            total_turns: turns.len(),
            clinician_turns: count(Role::Clinician),
            patient_turns: count(Role::Patient),
            total_duration: (end - start).max(0.0),
        }
    }

    /// Mean turn duration in seconds
    pub fn average_turn_duration(&self) -> f64 {
        if self.total_turns > 0 {
            self.total_duration / self.total_turns as f64
        } else {
            0.0
        }
    }
}
