// Short-horizon outlook from near-term vs mid-term averages
use serde::{Deserialize, Serialize};

use super::weather::SeriesWindow;

const NEAR: std::ops::Range<usize> = 0..3;
const MID: std::ops::Range<usize> = 3..6;

const WIND_DELTA_KMH: f64 = 5.0;
const VISIBILITY_DELTA_M: f64 = 2000.0;
const PRECIP_DELTA_MM: f64 = 2.0;

/// Hour compared against the reference hour by the wind-only fallback.
pub const WIND_OUTLOOK_HOUR: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outlook {
    Stable,
    Improving,
    Deteriorating,
    Mixed,
}

impl Outlook {
    pub fn summary(&self) -> &'static str {
        match self {
            Outlook::Stable => "Stable conditions expected over the next 6 hours.",
            Outlook::Improving => "Conditions improving over the next 6 hours.",
            Outlook::Deteriorating => "Conditions deteriorating over the next 6 hours.",
            Outlook::Mixed => "Mixed signals: some factors improving, others deteriorating.",
        }
    }
}

fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

fn delta(values: &[f64]) -> f64 {
    average(&values[MID]) - average(&values[NEAR])
}

/// Multi-factor 6-hour outlook. Expects a validated 24-hour window.
pub fn outlook(window: &SeriesWindow<'_>) -> Outlook {
    let d_wind = delta(window.wind_kmh);
    let d_vis = delta(window.visibility_m);
    let d_precip = delta(window.precip_mm);

    let worsening =
        d_wind > WIND_DELTA_KMH || d_vis < -VISIBILITY_DELTA_M || d_precip > PRECIP_DELTA_MM;
    let improving =
        d_wind < -WIND_DELTA_KMH || d_vis > VISIBILITY_DELTA_M || d_precip < -PRECIP_DELTA_MM;

    match (worsening, improving) {
        (true, false) => Outlook::Deteriorating,
        (false, true) => Outlook::Improving,
        (true, true) => Outlook::Mixed,
        (false, false) => Outlook::Stable,
    }
}

/// Reduced outlook for callers that only hold wind speeds: reference hour
/// against hour 6. Returns `None` when hour 6 is not available.
pub fn wind_outlook(wind_kmh: &[f64]) -> Option<Outlook> {
    let reference = *wind_kmh.first()?;
    let later = *wind_kmh.get(WIND_OUTLOOK_HOUR)?;
    let trend = later - reference;
    Some(if trend > WIND_DELTA_KMH {
        Outlook::Deteriorating
    } else if trend < -WIND_DELTA_KMH {
        Outlook::Improving
    } else {
        Outlook::Stable
    })
}
