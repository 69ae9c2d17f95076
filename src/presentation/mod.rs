// Presentation layer - HTTP handlers and report rendering
pub mod app_state;
pub mod handlers;
pub mod html_dashboard;
