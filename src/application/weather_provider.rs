// Provider trait for hourly weather retrieval
use crate::domain::assessment::Location;
use crate::domain::weather::WeatherSeries;
use async_trait::async_trait;

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Fetch the hourly series for a location, reference hour first.
    /// Columns the provider could not supply are left as `None`.
    async fn hourly_series(&self, location: &Location) -> anyhow::Result<WeatherSeries>;
}
