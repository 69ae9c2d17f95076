//! Weather-driven operational risk assessment for maritime locations.
//!
//! `domain` holds the pure scoring engine. The remaining layers fetch hourly
//! forecasts, run the engine across locations, and persist or serve the results.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
