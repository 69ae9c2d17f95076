// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod ndjson_stream;
pub mod open_meteo;
pub mod report_store;
