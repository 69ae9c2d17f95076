// Difficulty index: composite score rescaled to 0-100
use serde::{Deserialize, Serialize};

use super::policy::ScoringPolicy;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DifficultyCategory {
    Routine,
    Caution,
    Challenging,
    Hazardous,
    Severe,
}

impl DifficultyCategory {
    /// Five-way table, independent of the three-way risk level.
    pub fn from_index(index: u32) -> Self {
        match index {
            0..=19 => DifficultyCategory::Routine,
            20..=39 => DifficultyCategory::Caution,
            40..=59 => DifficultyCategory::Challenging,
            60..=79 => DifficultyCategory::Hazardous,
            _ => DifficultyCategory::Severe,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DifficultyCategory::Routine => "Routine",
            DifficultyCategory::Caution => "Caution",
            DifficultyCategory::Challenging => "Challenging",
            DifficultyCategory::Hazardous => "Hazardous",
            DifficultyCategory::Severe => "Severe",
        }
    }
}

/// Halves round to even, so 12.5 becomes 12 and 37.5 becomes 38.
pub fn difficulty(composite: u32, policy: &ScoringPolicy) -> (u32, DifficultyCategory) {
    let max_possible = policy.max_possible();
    let index = if max_possible == 0 {
        0
    } else {
        let scaled = (composite as f64 / max_possible as f64 * 100.0).round_ties_even();
        scaled.clamp(0.0, 100.0) as u32
    };
    (index, DifficultyCategory::from_index(index))
}
