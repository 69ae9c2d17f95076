// Cross-location rollup
use serde::{Deserialize, Serialize};

use super::assessment::LocationAssessment;
use super::scoring::RiskLevel;

/// How the headline global index is derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationStrategy {
    /// Maximum composite score: one severe location sets the posture.
    #[default]
    WorstCase,
    /// Integer mean of composite scores.
    Average,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskDistribution {
    pub low: usize,
    pub moderate: usize,
    pub high: usize,
}

impl RiskDistribution {
    pub fn count(&self, level: RiskLevel) -> usize {
        match level {
            RiskLevel::Low => self.low,
            RiskLevel::Moderate => self.moderate,
            RiskLevel::High => self.high,
        }
    }

    fn record(&mut self, level: RiskLevel) {
        match level {
            RiskLevel::Low => self.low += 1,
            RiskLevel::Moderate => self.moderate += 1,
            RiskLevel::High => self.high += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.low + self.moderate + self.high
    }
}

/// Reference to the worst location by name and score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighestRisk {
    pub name: String,
    pub score: u32,
    pub level: RiskLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalSummary {
    pub strategy: AggregationStrategy,
    pub global_index: u32,
    pub global_level: RiskLevel,
    pub worst_case_index: u32,
    pub average_index: u32,
    pub distribution: RiskDistribution,
    pub highest_risk: Option<HighestRisk>,
    pub assessed: usize,
    pub excluded: usize,
    pub posture_line: String,
    pub highest_line: String,
    pub counts_line: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excluded_line: Option<String>,
}

impl GlobalSummary {
    /// Records locations that failed retrieval or assessment and were left out.
    pub fn with_excluded(mut self, excluded: usize) -> Self {
        self.excluded = excluded;
        self.excluded_line = (excluded > 0).then(|| {
            format!(
                "{} location{} excluded from this assessment due to data errors.",
                excluded,
                if excluded == 1 { "" } else { "s" }
            )
        });
        self
    }

    pub fn lines(&self) -> Vec<&str> {
        let mut lines = vec![
            self.posture_line.as_str(),
            self.highest_line.as_str(),
            self.counts_line.as_str(),
        ];
        if let Some(line) = &self.excluded_line {
            lines.push(line);
        }
        lines
    }
}

pub fn aggregate(assessments: &[LocationAssessment]) -> GlobalSummary {
    aggregate_with(assessments, AggregationStrategy::default())
}

pub fn aggregate_with(
    assessments: &[LocationAssessment],
    strategy: AggregationStrategy,
) -> GlobalSummary {
    let mut distribution = RiskDistribution::default();
    let mut highest: Option<&LocationAssessment> = None;
    let mut total: u64 = 0;

    for assessment in assessments {
        distribution.record(assessment.risk.level);
        total += u64::from(assessment.risk.score);
        // Strictly greater keeps the earliest location on ties.
        if highest.is_none_or(|h| assessment.risk.score > h.risk.score) {
            highest = Some(assessment);
        }
    }

    let worst_case_index = highest.map(|h| h.risk.score).unwrap_or(0);
    let average_index = if assessments.is_empty() {
        0
    } else {
        (total / assessments.len() as u64) as u32
    };
    let global_index = match strategy {
        AggregationStrategy::WorstCase => worst_case_index,
        AggregationStrategy::Average => average_index,
    };
    let global_level = RiskLevel::from_score(global_index);

    let highest_risk = highest.map(|h| HighestRisk {
        name: h.location.name.clone(),
        score: h.risk.score,
        level: h.risk.level,
    });
    let highest_line = match &highest_risk {
        Some(h) => format!(
            "Highest operational risk: {} (Score {}, {} risk).",
            h.name,
            h.score,
            h.level.as_str()
        ),
        None => "No locations currently assessed.".to_string(),
    };
    let counts_line = format!(
        "Risk distribution: {} low, {} moderate, {} high.",
        distribution.low, distribution.moderate, distribution.high
    );

    GlobalSummary {
        strategy,
        global_index,
        global_level,
        worst_case_index,
        average_index,
        distribution,
        highest_risk,
        assessed: assessments.len(),
        excluded: 0,
        posture_line: posture_line(global_level).to_string(),
        highest_line,
        counts_line,
        excluded_line: None,
    }
}

fn posture_line(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::Low => {
            "Overall risk remains low. Moderate conditions are limited and localized. \
             No high-risk weather disruptions are expected within the next 24 hours."
        }
        RiskLevel::Moderate => {
            "Global risk is elevated to moderate. Weather-driven constraints may impact \
             operations at select locations. No widespread high-risk disruptions are \
             currently assessed."
        }
        RiskLevel::High => {
            "Global risk is high. Weather conditions at one or more locations may significantly \
             impact maritime operations within the next 24 hours."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::assessment::{assess, Location};
    use crate::domain::policy::ScoringPolicy;
    use crate::domain::weather::fixtures::constant_series;

    /// Builds an assessment and overrides its composite score.
    fn scored(name: &str, score: u32) -> LocationAssessment {
        let series = constant_series(10.0, 20000.0, 0.0);
        let mut assessment = assess(
            &Location::new(name, 0.0, 0.0),
            &series,
            &ScoringPolicy::chokepoint_transit(),
        )
        .unwrap();
        assessment.risk.score = score;
        assessment.risk.level = RiskLevel::from_score(score);
        assessment
    }

    #[test]
    fn test_three_location_rollup() {
        let assessments = vec![
            scored("Suez Canal", 10),
            scored("Bab el-Mandeb", 35),
            scored("Danish Straits", 72),
        ];
        let summary = aggregate(&assessments);

        assert_eq!(summary.distribution, RiskDistribution { low: 1, moderate: 1, high: 1 });
        assert_eq!(summary.strategy, AggregationStrategy::WorstCase);
        assert_eq!(summary.global_index, 72);
        assert_eq!(summary.global_level, RiskLevel::High);
        assert_eq!(summary.average_index, 39);
        assert_eq!(summary.highest_risk.as_ref().unwrap().name, "Danish Straits");
        assert_eq!(
            summary.highest_line,
            "Highest operational risk: Danish Straits (Score 72, high risk)."
        );
        assert_eq!(summary.counts_line, "Risk distribution: 1 low, 1 moderate, 1 high.");
    }

    #[test]
    fn test_average_strategy_is_opt_in() {
        let assessments = vec![scored("A", 10), scored("B", 35), scored("C", 72)];
        let summary = aggregate_with(&assessments, AggregationStrategy::Average);

        assert_eq!(summary.global_index, 39);
        assert_eq!(summary.global_level, RiskLevel::Moderate);
        assert_eq!(summary.worst_case_index, 72);
    }

    #[test]
    fn test_ties_keep_earliest_location() {
        let assessments = vec![scored("First", 45), scored("Second", 60), scored("Third", 60)];
        let summary = aggregate(&assessments);
        assert_eq!(summary.highest_risk.unwrap().name, "Second");
    }

    #[test]
    fn test_distribution_covers_every_location() {
        let assessments: Vec<_> = (0..9).map(|i| scored(&format!("L{}", i), i * 10)).collect();
        let summary = aggregate(&assessments);
        assert_eq!(summary.distribution.total(), 9);
        assert_eq!(summary.distribution.count(RiskLevel::Low), 3);
        assert_eq!(summary.distribution.count(RiskLevel::High), 3);
    }

    #[test]
    fn test_empty_input() {
        let summary = aggregate(&[]);
        assert_eq!(summary.global_index, 0);
        assert_eq!(summary.global_level, RiskLevel::Low);
        assert!(summary.highest_risk.is_none());
        assert_eq!(summary.highest_line, "No locations currently assessed.");
    }

    #[test]
    fn test_excluded_locations_are_reported() {
        let summary = aggregate(&[scored("A", 10)]).with_excluded(2);
        assert_eq!(summary.excluded, 2);
        assert_eq!(summary.lines().len(), 4);
        assert_eq!(
            summary.excluded_line.as_deref(),
            Some("2 locations excluded from this assessment due to data errors.")
        );

        let clean = aggregate(&[scored("A", 10)]).with_excluded(0);
        assert!(clean.excluded_line.is_none());
    }
}
