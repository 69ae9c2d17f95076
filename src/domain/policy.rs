// Scoring policies: named, versioned breakpoint tables
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::error::AssessmentError;

pub const CHOKEPOINT_TRANSIT: &str = "chokepoint-transit";
pub const PORT_OPERATIONS: &str = "port-operations";

/// Upper bound (exclusive) on a policy's total. At 200 or more a composite of
/// 1 rounds to difficulty index 0.
pub const MAX_POLICY_TOTAL: u32 = 200;

/// Weather factors that contribute to the composite score, in tie-break
/// priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Factor {
    Wind,
    Visibility,
    Precipitation,
}

impl Factor {
    pub const PRIORITY: [Factor; 3] = [Factor::Wind, Factor::Visibility, Factor::Precipitation];

    pub fn as_str(&self) -> &'static str {
        match self {
            Factor::Wind => "wind",
            Factor::Visibility => "visibility",
            Factor::Precipitation => "precipitation",
        }
    }

    /// Whether a larger raw value means more risk.
    fn risk_rises_with_value(&self) -> bool {
        !matches!(self, Factor::Visibility)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparator {
    Below,
    AtMost,
    Above,
}

impl Comparator {
    pub fn matches(&self, value: f64, bound: f64) -> bool {
        match self {
            Comparator::Below => value < bound,
            Comparator::AtMost => value <= bound,
            Comparator::Above => value > bound,
        }
    }

    fn ascending(&self) -> bool {
        !matches!(self, Comparator::Above)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Step {
    pub op: Comparator,
    pub bound: f64,
    pub score: u32,
}

impl Step {
    const fn new(op: Comparator, bound: f64, score: u32) -> Self {
        Self { op, bound, score }
    }
}

/// Monotonic step function evaluated top to bottom; the first matching step
/// wins, otherwise `otherwise` applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepTable {
    pub steps: Vec<Step>,
    pub otherwise: u32,
}

impl StepTable {
    pub fn score(&self, value: f64) -> u32 {
        self.steps
            .iter()
            .find(|step| step.op.matches(value, step.bound))
            .map(|step| step.score)
            .unwrap_or(self.otherwise)
    }

    pub fn max_score(&self) -> u32 {
        self.steps
            .iter()
            .map(|step| step.score)
            .fold(self.otherwise, u32::max)
    }

    fn validate(&self, factor: Factor) -> Result<(), String> {
        let Some(first) = self.steps.first() else {
            return Ok(());
        };
        let ascending = first.op.ascending();
        if ascending != factor.risk_rises_with_value() {
            return Err(format!("{} steps point in the wrong risk direction", factor.as_str()));
        }

        for pair in self.steps.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            if next.op.ascending() != ascending {
                return Err(format!("{} steps mix comparator directions", factor.as_str()));
            }
            let ordered = if ascending { next.bound > prev.bound } else { next.bound < prev.bound };
            if !ordered {
                return Err(format!("{} bounds are not strictly ordered", factor.as_str()));
            }
            if next.score < prev.score {
                return Err(format!("{} scores decrease between steps", factor.as_str()));
            }
        }

        if self.steps.iter().any(|step| step.score > self.otherwise) {
            return Err(format!("{} fallback score is not the largest", factor.as_str()));
        }
        Ok(())
    }
}

/// Which value of the 24-hour window feeds the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowReduction {
    ReferenceHour,
    WindowMax,
    WindowMin,
}

impl WindowReduction {
    /// NaN when the window is empty or any hour is NaN, so the step table falls
    /// through to its fallback score just as the hourly strip does.
    pub fn reduce(&self, values: &[f64]) -> f64 {
        if values.is_empty() || values.iter().any(|v| v.is_nan()) {
            return f64::NAN;
        }
        match self {
            WindowReduction::ReferenceHour => values[0],
            WindowReduction::WindowMax => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            WindowReduction::WindowMin => values.iter().copied().fold(f64::INFINITY, f64::min),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorRule {
    pub table: StepTable,
    pub composite_input: WindowReduction,
}

/// Flavour of the operational-impact narrative attached to an assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactProfile {
    Transit,
    Port,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringPolicy {
    pub name: String,
    pub version: u32,
    pub wind: FactorRule,
    pub visibility: FactorRule,
    pub precipitation: FactorRule,
    pub impact_profile: ImpactProfile,
}

impl ScoringPolicy {
    /// Strait and canal transits: worst hour of the window drives the score.
    pub fn chokepoint_transit() -> Self {
        use Comparator::*;
        Self {
            name: CHOKEPOINT_TRANSIT.to_string(),
            version: 1,
            wind: FactorRule {
                table: StepTable {
                    steps: vec![
                        Step::new(Below, 20.0, 5),
                        Step::new(Below, 40.0, 15),
                        Step::new(Below, 60.0, 30),
                    ],
                    otherwise: 40,
                },
                composite_input: WindowReduction::WindowMax,
            },
            visibility: FactorRule {
                table: StepTable {
                    steps: vec![
                        Step::new(Above, 10000.0, 0),
                        Step::new(Above, 5000.0, 5),
                        Step::new(Above, 1000.0, 10),
                    ],
                    otherwise: 20,
                },
                composite_input: WindowReduction::WindowMin,
            },
            precipitation: FactorRule {
                table: StepTable {
                    steps: vec![
                        Step::new(AtMost, 0.0, 0),
                        Step::new(Below, 2.0, 5),
                        Step::new(Below, 10.0, 10),
                    ],
                    otherwise: 20,
                },
                composite_input: WindowReduction::WindowMax,
            },
            impact_profile: ImpactProfile::Transit,
        }
    }

    /// Berthing, pilotage and cargo handling: the reference hour drives the score.
    pub fn port_operations() -> Self {
        use Comparator::*;
        Self {
            name: PORT_OPERATIONS.to_string(),
            version: 1,
            wind: FactorRule {
                table: StepTable {
                    steps: vec![
                        Step::new(AtMost, 15.0, 0),
                        Step::new(AtMost, 25.0, 10),
                        Step::new(AtMost, 35.0, 20),
                        Step::new(AtMost, 45.0, 35),
                    ],
                    otherwise: 50,
                },
                composite_input: WindowReduction::ReferenceHour,
            },
            visibility: FactorRule {
                table: StepTable {
                    steps: vec![
                        Step::new(Above, 10000.0, 0),
                        Step::new(Above, 5000.0, 5),
                        Step::new(Above, 2000.0, 10),
                        Step::new(Above, 500.0, 20),
                    ],
                    otherwise: 30,
                },
                composite_input: WindowReduction::ReferenceHour,
            },
            precipitation: FactorRule {
                table: StepTable {
                    steps: vec![
                        Step::new(AtMost, 0.5, 0),
                        Step::new(AtMost, 2.0, 5),
                        Step::new(AtMost, 5.0, 10),
                        Step::new(AtMost, 10.0, 15),
                    ],
                    otherwise: 20,
                },
                composite_input: WindowReduction::ReferenceHour,
            },
            impact_profile: ImpactProfile::Port,
        }
    }

    pub fn rule(&self, factor: Factor) -> &FactorRule {
        match factor {
            Factor::Wind => &self.wind,
            Factor::Visibility => &self.visibility,
            Factor::Precipitation => &self.precipitation,
        }
    }

    /// Saturates instead of overflowing; `validate` rejects such policies.
    pub fn max_possible(&self) -> u32 {
        self.checked_total().unwrap_or(u32::MAX)
    }

    fn checked_total(&self) -> Option<u32> {
        Factor::PRIORITY
            .iter()
            .try_fold(0u32, |total, factor| total.checked_add(self.rule(*factor).table.max_score()))
    }

    pub fn validate(&self) -> Result<(), AssessmentError> {
        let invalid = |reason: String| AssessmentError::InvalidPolicy {
            name: self.name.clone(),
            reason,
        };
        if self.name.trim().is_empty() {
            return Err(invalid("name must not be empty".to_string()));
        }
        for factor in Factor::PRIORITY {
            self.rule(factor).table.validate(factor).map_err(invalid)?;
        }
        match self.checked_total() {
            Some(0) => Err(invalid("maximum total score must be positive".to_string())),
            Some(total) if total < MAX_POLICY_TOTAL => Ok(()),
            _ => Err(invalid(format!("maximum total score must be below {}", MAX_POLICY_TOTAL))),
        }
    }
}

/// Policies selectable by name for a run.
#[derive(Debug, Clone, Default)]
pub struct PolicyRegistry {
    policies: BTreeMap<String, ScoringPolicy>,
}

impl PolicyRegistry {
    pub fn with_presets() -> Self {
        let mut registry = Self::default();
        for preset in [ScoringPolicy::chokepoint_transit(), ScoringPolicy::port_operations()] {
            registry.policies.insert(preset.name.clone(), preset);
        }
        registry
    }

    /// Adds a policy, replacing any previous one with the same name.
    pub fn register(&mut self, policy: ScoringPolicy) -> Result<(), AssessmentError> {
        policy.validate()?;
        if self.policies.contains_key(&policy.name) {
            tracing::warn!("Scoring policy {} overrides an existing registration", policy.name);
        }
        self.policies.insert(policy.name.clone(), policy);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<&ScoringPolicy, AssessmentError> {
        self.policies
            .get(name)
            .ok_or_else(|| AssessmentError::UnknownPolicy(name.to_string()))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.policies.keys().map(String::as_str)
    }
}
