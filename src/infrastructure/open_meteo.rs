// Open-Meteo forecast provider
use crate::application::weather_provider::WeatherProvider;
use crate::domain::assessment::Location;
use crate::domain::weather::WeatherSeries;
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

const HOURLY_VARIABLES: &str = "temperature_2m,windspeed_10m,visibility,precipitation";

#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    client: reqwest::Client,
    base_url: String,
    forecast_hours: usize,
    timezone: String,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    hourly: Option<HourlyBlock>,
    #[serde(default)]
    reason: Option<String>,
}

/// Columns may be absent, and individual hours may be `null`.
#[derive(Debug, Default, Deserialize)]
struct HourlyBlock {
    #[serde(default)]
    time: Vec<String>,
    temperature_2m: Option<Vec<Option<f64>>>,
    windspeed_10m: Option<Vec<Option<f64>>>,
    visibility: Option<Vec<Option<f64>>>,
    precipitation: Option<Vec<Option<f64>>>,
}

impl OpenMeteoProvider {
    pub fn new(
        base_url: String,
        timeout: Duration,
        forecast_hours: usize,
        timezone: String,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            forecast_hours,
            timezone,
        })
    }

    fn build_forecast_url(&self, location: &Location) -> String {
        format!(
            "{}/v1/forecast?latitude={}&longitude={}&hourly={}&forecast_hours={}&timezone={}",
            self.base_url,
            location.latitude,
            location.longitude,
            HOURLY_VARIABLES,
            self.forecast_hours,
            urlencoding::encode(&self.timezone)
        )
    }

    async fn execute_request(&self, url: &str) -> Result<ForecastResponse> {
        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .context("Failed to send request to Open-Meteo")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Open-Meteo request failed with status {}: {}", status, body);
        }

        response
            .json::<ForecastResponse>()
            .await
            .context("Failed to parse Open-Meteo response")
    }
}

/// A column with any `null` hour is treated as missing; the assessor reports
/// it as a malformed series.
fn dense(column: Option<Vec<Option<f64>>>) -> Option<Vec<f64>> {
    column?.into_iter().collect()
}

fn into_series(response: ForecastResponse) -> Result<WeatherSeries> {
    if let Some(reason) = response.reason {
        anyhow::bail!("Open-Meteo error: {}", reason);
    }
    let hourly = response.hourly.context("Open-Meteo response has no hourly block")?;

    Ok(WeatherSeries {
        time: hourly.time,
        temperature_c: dense(hourly.temperature_2m),
        wind_kmh: dense(hourly.windspeed_10m),
        visibility_m: dense(hourly.visibility),
        precip_mm: dense(hourly.precipitation),
    })
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    fn name(&self) -> &str {
        "open-meteo"
    }

    async fn hourly_series(&self, location: &Location) -> Result<WeatherSeries> {
        let url = self.build_forecast_url(location);
        tracing::debug!("Fetching forecast for {}: {}", location.name, url);

        let response = self.execute_request(&url).await?;
        let series = into_series(response)?;

        tracing::debug!("Got {} hourly samples for {}", series.time.len(), location.name);
        Ok(series)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::AssessmentError;

    fn provider() -> OpenMeteoProvider {
        OpenMeteoProvider::new(
            "https://api.open-meteo.com/".to_string(),
            Duration::from_secs(5),
            24,
            "Europe/Amsterdam".to_string(),
        )
        .unwrap()
    }

    fn hourly_json(hours: usize, visibility: serde_json::Value) -> serde_json::Value {
        let time: Vec<String> = (0..hours).map(|h| format!("2026-03-01T{:02}:00", h)).collect();
        let temperature = vec![8.5; hours];
        let wind = vec![12.0; hours];
        let precipitation = vec![0.0; hours];
        serde_json::json!({
            "latitude": 51.95,
            "longitude": 4.13,
            "hourly": {
                "time": time,
                "temperature_2m": temperature,
                "windspeed_10m": wind,
                "visibility": visibility,
                "precipitation": precipitation
            }
        })
    }

    #[test]
    fn test_build_forecast_url() {
        let rotterdam = Location::new("Port of Rotterdam", 51.9526, 4.1339);
        let url = provider().build_forecast_url(&rotterdam);
        assert_eq!(
            url,
            "https://api.open-meteo.com/v1/forecast?latitude=51.9526&longitude=4.1339\
             &hourly=temperature_2m,windspeed_10m,visibility,precipitation\
             &forecast_hours=24&timezone=Europe%2FAmsterdam"
        );
    }

    #[test]
    fn test_response_becomes_aligned_series() {
        let visibility = vec![24140.0; 24];
        let body = hourly_json(24, serde_json::json!(visibility));
        let response: ForecastResponse = serde_json::from_value(body).unwrap();
        let series = into_series(response).unwrap();

        let window = series.window().unwrap();
        assert_eq!(window.len(), 24);
        assert_eq!(window.observation(0).visibility_m, 24140.0);
    }

    #[test]
    fn test_null_hour_marks_column_missing() {
        let mut visibility = vec![serde_json::json!(24140.0); 24];
        visibility[7] = serde_json::Value::Null;
        let body = hourly_json(24, serde_json::json!(visibility));
        let response: ForecastResponse = serde_json::from_value(body).unwrap();
        let series = into_series(response).unwrap();

        assert!(series.visibility_m.is_none());
        assert_eq!(
            series.window().unwrap_err(),
            AssessmentError::MalformedSeries("missing visibility column".to_string())
        );
    }

    #[test]
    fn test_error_reason_is_surfaced() {
        let body = serde_json::json!({ "error": true, "reason": "Latitude must be in range" });
        let response: ForecastResponse = serde_json::from_value(body).unwrap();
        let err = into_series(response).unwrap_err();
        assert_eq!(err.to_string(), "Open-Meteo error: Latitude must be in range");
    }
}
