// Assessment service - Use case for one full multi-location run
use crate::application::weather_provider::WeatherProvider;
use crate::domain::assessment::{assess, Location, LocationAssessment};
use crate::domain::policy::ScoringPolicy;
use crate::domain::summary::{aggregate_with, AggregationStrategy, GlobalSummary};
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Where a location dropped out of the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureStage {
    Retrieval,
    Assessment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationFailure {
    pub location: Location,
    pub stage: FailureStage,
    pub error: String,
}

/// Result of one run: successes, failures and the rollup over the successes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRun {
    pub generated_at: DateTime<Utc>,
    pub policy: String,
    pub policy_version: u32,
    pub assessments: Vec<LocationAssessment>,
    pub failures: Vec<LocationFailure>,
    pub summary: GlobalSummary,
}

/// Immutable inputs shared by the batch and streaming services.
#[derive(Debug, Clone)]
pub struct RunSettings {
    pub policy: Arc<ScoringPolicy>,
    pub locations: Arc<Vec<Location>>,
    pub max_concurrency: usize,
    pub strategy: AggregationStrategy,
}

impl RunSettings {
    pub fn concurrency(&self) -> usize {
        self.max_concurrency.max(1)
    }
}

/// Fetches and scores a single location. Never retries.
pub async fn assess_location(
    provider: &dyn WeatherProvider,
    location: &Location,
    policy: &ScoringPolicy,
) -> Result<LocationAssessment, LocationFailure> {
    let series = provider.hourly_series(location).await.map_err(|e| LocationFailure {
        location: location.clone(),
        stage: FailureStage::Retrieval,
        error: format!("{:#}", e),
    })?;

    assess(location, &series, policy).map_err(|e| LocationFailure {
        location: location.clone(),
        stage: FailureStage::Assessment,
        error: e.to_string(),
    })
}

pub fn log_failure(failure: &LocationFailure) {
    tracing::warn!(
        location = %failure.location.name,
        stage = ?failure.stage,
        "Excluding location from run: {}",
        failure.error
    );
}

#[derive(Clone)]
pub struct AssessmentService {
    provider: Arc<dyn WeatherProvider>,
    settings: RunSettings,
}

impl AssessmentService {
    pub fn new(provider: Arc<dyn WeatherProvider>, settings: RunSettings) -> Self {
        Self { provider, settings }
    }

    pub fn locations(&self) -> &[Location] {
        &self.settings.locations
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.settings.policy
    }

    pub async fn run(&self) -> AssessmentRun {
        let policy = self.settings.policy.as_ref();
        tracing::info!(
            "Assessing {} locations with policy {} v{} via {}",
            self.settings.locations.len(),
            policy.name,
            policy.version,
            self.provider.name()
        );

        // `buffered` keeps input order, which the highest-risk tie-break relies on.
        let results: Vec<Result<LocationAssessment, LocationFailure>> =
            stream::iter(self.settings.locations.iter().cloned())
                .map(|location| {
                    let provider = self.provider.clone();
                    let policy = self.settings.policy.clone();
                    async move { assess_location(provider.as_ref(), &location, &policy).await }
                })
                .buffered(self.settings.concurrency())
                .collect()
                .await;

        let mut assessments = Vec::new();
        let mut failures = Vec::new();
        for result in results {
            match result {
                Ok(assessment) => {
                    tracing::debug!(
                        "{}: score {} ({})",
                        assessment.location.name,
                        assessment.risk.score,
                        assessment.risk.level.as_str()
                    );
                    assessments.push(assessment);
                }
                Err(failure) => {
                    log_failure(&failure);
                    failures.push(failure);
                }
            }
        }

        let summary =
            aggregate_with(&assessments, self.settings.strategy).with_excluded(failures.len());
        tracing::info!(
            "Run complete: {} assessed, {} excluded, global index {} ({})",
            summary.assessed,
            summary.excluded,
            summary.global_index,
            summary.global_level.as_str()
        );

        AssessmentRun {
            generated_at: Utc::now(),
            policy: policy.name.clone(),
            policy_version: policy.version,
            assessments,
            failures,
            summary,
        }
    }
}
