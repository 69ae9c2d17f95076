// Application layer - Use cases over the scoring engine
pub mod assessment_service;
pub mod streaming_service;
pub mod weather_provider;

#[cfg(test)]
pub(crate) mod test_support;
