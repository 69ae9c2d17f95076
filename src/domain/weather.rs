// Weather series domain models
use serde::{Deserialize, Serialize};

use super::error::AssessmentError;

/// Number of hours the engine looks at: the reference hour plus the next 23.
pub const ASSESSMENT_WINDOW: usize = 24;

/// One hour's sample for one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherObservation {
    pub time: String,
    pub temperature_c: f64,
    pub wind_kmh: f64,
    pub visibility_m: f64,
    pub precip_mm: f64,
}

/// Hourly series in column form, as delivered by a forecast provider.
///
/// A factor column is `None` when the provider did not return it. Index 0 is
/// the reference hour.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeatherSeries {
    pub time: Vec<String>,
    pub temperature_c: Option<Vec<f64>>,
    pub wind_kmh: Option<Vec<f64>>,
    pub visibility_m: Option<Vec<f64>>,
    pub precip_mm: Option<Vec<f64>>,
}

/// Borrowed, validated view over the first [`ASSESSMENT_WINDOW`] hours.
#[derive(Debug, Clone, Copy)]
pub struct SeriesWindow<'a> {
    pub time: &'a [String],
    pub temperature_c: &'a [f64],
    pub wind_kmh: &'a [f64],
    pub visibility_m: &'a [f64],
    pub precip_mm: &'a [f64],
}

impl WeatherSeries {
    pub fn from_observations(observations: &[WeatherObservation]) -> Self {
        Self {
            time: observations.iter().map(|o| o.time.clone()).collect(),
            temperature_c: Some(observations.iter().map(|o| o.temperature_c).collect()),
            wind_kmh: Some(observations.iter().map(|o| o.wind_kmh).collect()),
            visibility_m: Some(observations.iter().map(|o| o.visibility_m).collect()),
            precip_mm: Some(observations.iter().map(|o| o.precip_mm).collect()),
        }
    }

    /// Checks column presence and alignment, then length, and returns the
    /// 24-hour window the engine operates on.
    pub fn window(&self) -> Result<SeriesWindow<'_>, AssessmentError> {
        let temperature = required_column("temperature", self.temperature_c.as_deref())?;
        let wind = required_column("wind speed", self.wind_kmh.as_deref())?;
        let visibility = required_column("visibility", self.visibility_m.as_deref())?;
        let precip = required_column("precipitation", self.precip_mm.as_deref())?;

        let expected = self.time.len();
        for (name, len) in [
            ("temperature", temperature.len()),
            ("wind speed", wind.len()),
            ("visibility", visibility.len()),
            ("precipitation", precip.len()),
        ] {
            if len != expected {
                return Err(AssessmentError::MalformedSeries(format!(
                    "{} has {} values but the series has {} timestamps",
                    name, len, expected
                )));
            }
        }

        if expected < ASSESSMENT_WINDOW {
            return Err(AssessmentError::InsufficientData {
                required: ASSESSMENT_WINDOW,
                actual: expected,
            });
        }

        Ok(SeriesWindow {
            time: &self.time[..ASSESSMENT_WINDOW],
            temperature_c: &temperature[..ASSESSMENT_WINDOW],
            wind_kmh: &wind[..ASSESSMENT_WINDOW],
            visibility_m: &visibility[..ASSESSMENT_WINDOW],
            precip_mm: &precip[..ASSESSMENT_WINDOW],
        })
    }
}

fn required_column<'a>(
    name: &str,
    column: Option<&'a [f64]>,
) -> Result<&'a [f64], AssessmentError> {
    column.ok_or_else(|| AssessmentError::MalformedSeries(format!("missing {} column", name)))
}

impl SeriesWindow<'_> {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn observation(&self, hour: usize) -> WeatherObservation {
        WeatherObservation {
            time: self.time[hour].clone(),
            temperature_c: self.temperature_c[hour],
            wind_kmh: self.wind_kmh[hour],
            visibility_m: self.visibility_m[hour],
            precip_mm: self.precip_mm[hour],
        }
    }

    pub fn observations(&self) -> Vec<WeatherObservation> {
        (0..self.len()).map(|hour| self.observation(hour)).collect()
    }
}
