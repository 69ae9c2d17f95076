// Application state for HTTP handlers
use crate::application::assessment_service::AssessmentService;
use crate::application::streaming_service::StreamingAssessmentService;

#[derive(Clone)]
pub struct AppState {
    pub assessment_service: AssessmentService,
    pub streaming_service: StreamingAssessmentService,
    pub dashboard_title: String,
}
