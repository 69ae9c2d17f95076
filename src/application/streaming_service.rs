// Streaming assessment service - Progressive delivery of per-location results
use crate::application::assessment_service::{
    assess_location, log_failure, LocationFailure, RunSettings,
};
use crate::application::weather_provider::WeatherProvider;
use crate::domain::assessment::LocationAssessment;
use crate::domain::summary::{aggregate_with, GlobalSummary};
use futures::stream::{self, StreamExt};
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;

const CHANNEL_CAPACITY: usize = 64;

/// One message of a streamed run. `Summary` is always last.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", content = "data", rename_all = "snake_case")]
pub enum RunEvent {
    Started { total: usize, policy: String },
    Assessed(Box<LocationAssessment>),
    Failed(LocationFailure),
    Summary(GlobalSummary),
}

#[derive(Clone)]
pub struct StreamingAssessmentService {
    provider: Arc<dyn WeatherProvider>,
    settings: RunSettings,
}

impl StreamingAssessmentService {
    pub fn new(provider: Arc<dyn WeatherProvider>, settings: RunSettings) -> Self {
        Self { provider, settings }
    }

    /// Starts a run in the background. Location events arrive in completion
    /// order; the summary is computed over successes in configured order.
    /// Dropping the receiver stops delivery; no partial state is kept.
    pub fn stream_run(&self) -> mpsc::Receiver<RunEvent> {
        let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
        let provider = self.provider.clone();
        let settings = self.settings.clone();

        tokio::spawn(async move {
            let start_time = Instant::now();
            let total = settings.locations.len();
            let started = RunEvent::Started {
                total,
                policy: settings.policy.name.clone(),
            };
            if tx.send(started).await.is_err() {
                return;
            }

            let mut slots: Vec<Option<LocationAssessment>> = vec![None; total];
            let mut failures = 0usize;

            let mut completions = stream::iter(settings.locations.iter().cloned().enumerate())
                .map(|(index, location)| {
                    let provider = provider.clone();
                    let policy = settings.policy.clone();
                    async move {
                        let result = assess_location(provider.as_ref(), &location, &policy).await;
                        (index, result)
                    }
                })
                .buffer_unordered(settings.concurrency());

            while let Some((index, result)) = completions.next().await {
                let event = match result {
                    Ok(assessment) => {
                        slots[index] = Some(assessment.clone());
                        RunEvent::Assessed(Box::new(assessment))
                    }
                    Err(failure) => {
                        log_failure(&failure);
                        failures += 1;
                        RunEvent::Failed(failure)
                    }
                };
                if tx.send(event).await.is_err() {
                    tracing::debug!("Stream receiver dropped, abandoning run");
                    return;
                }
            }

            let assessments: Vec<LocationAssessment> = slots.into_iter().flatten().collect();
            let summary = aggregate_with(&assessments, settings.strategy).with_excluded(failures);
            tracing::info!(
                "Streamed run finished in {} ms: {} assessed, {} excluded",
                start_time.elapsed().as_millis(),
                summary.assessed,
                summary.excluded
            );
            let _ = tx.send(RunEvent::Summary(summary)).await;
        });

        rx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::{flat_series, StubProvider};
    use crate::domain::assessment::Location;
    use crate::domain::policy::ScoringPolicy;
    use crate::domain::summary::AggregationStrategy;
    use std::time::Duration;

    fn service(provider: StubProvider, names: &[&str]) -> StreamingAssessmentService {
        StreamingAssessmentService::new(
            Arc::new(provider),
            RunSettings {
                policy: Arc::new(ScoringPolicy::chokepoint_transit()),
                locations: Arc::new(names.iter().map(|n| Location::new(*n, 0.0, 0.0)).collect()),
                max_concurrency: 4,
                strategy: AggregationStrategy::WorstCase,
            },
        )
    }

    async fn drain(mut rx: mpsc::Receiver<RunEvent>) -> Vec<RunEvent> {
        let mut events = Vec::new();
        while let Some(event) = rx.recv().await {
            events.push(event);
        }
        events
    }

    #[tokio::test]
    async fn test_stream_emits_started_locations_then_summary() {
        let provider = StubProvider::default()
            .with_series("Suez Canal", flat_series(10.0, 20000.0, 0.0))
            .with_failure("Panama Canal", "timeout");
        let events = drain(service(provider, &["Suez Canal", "Panama Canal"]).stream_run()).await;

        assert_eq!(events.len(), 4);
        assert!(matches!(events[0], RunEvent::Started { total: 2, .. }));
        let RunEvent::Summary(summary) = &events[3] else {
            panic!("last event should be the summary");
        };
        assert_eq!(summary.assessed, 1);
        assert_eq!(summary.excluded, 1);
    }

    #[tokio::test]
    async fn test_summary_tie_break_uses_configured_order() {
        let provider = StubProvider::default()
            .with_series("First", flat_series(65.0, 800.0, 0.0))
            .with_delay("First", Duration::from_millis(50))
            .with_series("Second", flat_series(65.0, 800.0, 0.0));
        let events = drain(service(provider, &["First", "Second"]).stream_run()).await;

        let RunEvent::Assessed(first_done) = &events[1] else {
            panic!("expected an assessment event");
        };
        assert_eq!(first_done.location.name, "Second");
        let RunEvent::Summary(summary) = events.last().unwrap() else {
            panic!("last event should be the summary");
        };
        assert_eq!(summary.highest_risk.as_ref().unwrap().name, "First");
    }

    #[test]
    fn test_event_wire_shape() {
        let event = RunEvent::Started { total: 3, policy: "port-operations".to_string() };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "started");
        assert_eq!(json["data"]["total"], 3);
    }
}
