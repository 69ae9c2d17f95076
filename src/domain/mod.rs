// Domain layer - Pure risk scoring engine
pub mod assessment;
pub mod difficulty;
pub mod driver;
pub mod error;
pub mod impact;
pub mod policy;
pub mod scoring;
pub mod strip;
pub mod summary;
pub mod trend;
pub mod weather;
