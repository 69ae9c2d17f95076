// In-memory provider for service tests
use crate::application::weather_provider::WeatherProvider;
use crate::domain::assessment::Location;
use crate::domain::weather::{WeatherObservation, WeatherSeries, ASSESSMENT_WINDOW};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

pub enum Canned {
    Series(WeatherSeries),
    Fail(String),
}

#[derive(Default)]
pub struct StubProvider {
    responses: HashMap<String, Canned>,
    delays: HashMap<String, Duration>,
}

impl StubProvider {
    pub fn with_series(mut self, name: &str, series: WeatherSeries) -> Self {
        self.responses.insert(name.to_string(), Canned::Series(series));
        self
    }

    pub fn with_failure(mut self, name: &str, message: &str) -> Self {
        self.responses.insert(name.to_string(), Canned::Fail(message.to_string()));
        self
    }

    pub fn with_delay(mut self, name: &str, delay: Duration) -> Self {
        self.delays.insert(name.to_string(), delay);
        self
    }
}

#[async_trait]
impl WeatherProvider for StubProvider {
    fn name(&self) -> &str {
        "stub"
    }

    async fn hourly_series(&self, location: &Location) -> anyhow::Result<WeatherSeries> {
        if let Some(delay) = self.delays.get(&location.name) {
            tokio::time::sleep(*delay).await;
        }
        match self.responses.get(&location.name) {
            Some(Canned::Series(series)) => Ok(series.clone()),
            Some(Canned::Fail(message)) => anyhow::bail!("{}", message),
            None => anyhow::bail!("no canned response for {}", location.name),
        }
    }
}

/// 24-hour series whose every hour carries the same conditions.
pub fn flat_series(wind: f64, visibility: f64, precip: f64) -> WeatherSeries {
    let observations: Vec<WeatherObservation> = (0..ASSESSMENT_WINDOW)
        .map(|hour| WeatherObservation {
            time: format!("2026-03-01T{:02}:00", hour),
            temperature_c: 18.0,
            wind_kmh: wind,
            visibility_m: visibility,
            precip_mm: precip,
        })
        .collect();
    WeatherSeries::from_observations(&observations)
}

/// Keeps only the first `hours` entries of every column.
pub fn truncated(mut series: WeatherSeries, hours: usize) -> WeatherSeries {
    series.time.truncate(hours);
    for column in [
        &mut series.temperature_c,
        &mut series.wind_kmh,
        &mut series.visibility_m,
        &mut series.precip_mm,
    ]
    .into_iter()
    .flatten()
    {
        column.truncate(hours);
    }
    series
}
