// Per-location risk assessment
use serde::{Deserialize, Serialize};

use super::difficulty::{difficulty, DifficultyCategory};
use super::driver::{dominant, driver_label};
use super::error::AssessmentError;
use super::impact::operational_impact;
use super::policy::{Factor, ScoringPolicy};
use super::scoring::{classify, composite_scores, RiskFactorScores, RiskLevel};
use super::strip::risk_strip;
use super::trend::{outlook, Outlook};
use super::weather::{WeatherObservation, WeatherSeries};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self {
            name: name.into(),
            latitude,
            longitude,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub policy: String,
    pub score: u32,
    pub level: RiskLevel,
    pub color: String,
    pub factors: RiskFactorScores,
    pub difficulty_index: u32,
    pub difficulty_category: DifficultyCategory,
    pub dominant_driver: Factor,
    pub dominant_driver_label: String,
    pub outlook: Outlook,
    pub outlook_summary: String,
    pub hourly_risk_strip: Vec<RiskLevel>,
}

/// Everything produced for one location in one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationAssessment {
    pub location: Location,
    pub current: WeatherObservation,
    pub forecast_24h: Vec<WeatherObservation>,
    pub risk: RiskAssessment,
    pub impact: String,
}

/// Scores one series under one policy. Either every field is computed from a
/// complete, aligned 24-hour window or an error is returned.
pub fn assess_series(
    series: &WeatherSeries,
    policy: &ScoringPolicy,
) -> Result<RiskAssessment, AssessmentError> {
    let window = series.window()?;

    let factors = composite_scores(&window, policy);
    let (score, level) = classify(&factors, policy);
    let (difficulty_index, difficulty_category) = difficulty(score, policy);
    let dominant_driver = dominant(&factors);
    let outlook = outlook(&window);

    Ok(RiskAssessment {
        policy: policy.name.clone(),
        score,
        level,
        color: level.color().to_string(),
        factors,
        difficulty_index,
        difficulty_category,
        dominant_driver,
        dominant_driver_label: driver_label(dominant_driver).to_string(),
        outlook,
        outlook_summary: outlook.summary().to_string(),
        hourly_risk_strip: risk_strip(&window, policy),
    })
}

pub fn assess(
    location: &Location,
    series: &WeatherSeries,
    policy: &ScoringPolicy,
) -> Result<LocationAssessment, AssessmentError> {
    let risk = assess_series(series, policy)?;
    let window = series.window()?;
    let current = window.observation(0);
    let impact = operational_impact(policy.impact_profile, &risk.factors, risk.level, &current);

    Ok(LocationAssessment {
        location: location.clone(),
        current,
        forecast_24h: window.observations(),
        risk,
        impact,
    })
}
