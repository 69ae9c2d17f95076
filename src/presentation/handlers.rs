// HTTP request handlers
use crate::application::assessment_service::AssessmentRun;
use crate::domain::assessment::Location;
use crate::domain::policy::ScoringPolicy;
use crate::infrastructure::ndjson_stream::stream_from_receiver;
use crate::presentation::app_state::AppState;
use crate::presentation::html_dashboard::render_dashboard;
use axum::{
    extract::State,
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use std::sync::Arc;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(health_check))
        .route("/locations", get(list_locations))
        .route("/policy", get(current_policy))
        .route("/assessments", get(get_assessments))
        .route("/assessments/stream", get(stream_assessments))
        .route("/dashboard", get(dashboard))
        .with_state(state)
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

/// Configured locations, in assessment order
pub async fn list_locations(State(state): State<Arc<AppState>>) -> Json<Vec<Location>> {
    Json(state.assessment_service.locations().to_vec())
}

pub async fn current_policy(State(state): State<Arc<AppState>>) -> Json<ScoringPolicy> {
    Json(state.assessment_service.policy().clone())
}

/// Run a fresh assessment and return it whole
pub async fn get_assessments(State(state): State<Arc<AppState>>) -> Json<AssessmentRun> {
    Json(state.assessment_service.run().await)
}

/// Stream per-location results as they complete, then the summary
pub async fn stream_assessments(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let rx = state.streaming_service.stream_run();
    stream_from_receiver(rx)
}

pub async fn dashboard(State(state): State<Arc<AppState>>) -> Html<String> {
    let run = state.assessment_service.run().await;
    Html(render_dashboard(&run, &state.dashboard_title))
}
