// Operational impact narrative
use super::policy::ImpactProfile;
use super::scoring::{RiskFactorScores, RiskLevel};
use super::weather::WeatherObservation;

const QUIET_TRANSIT: &str =
    "No significant weather-driven operational impacts are expected at this chokepoint.";
const ROUTINE_CAUTION: &str = "Weather conditions may require routine caution but are not \
                               assessed as significantly disruptive.";
const NORMAL_PORT: &str =
    "Normal operating conditions with no significant weather-related restrictions.";

pub fn operational_impact(
    profile: ImpactProfile,
    scores: &RiskFactorScores,
    level: RiskLevel,
    current: &WeatherObservation,
) -> String {
    match profile {
        ImpactProfile::Transit => transit_impact(scores, level),
        ImpactProfile::Port => port_impact(current),
    }
}

/// Transit narrative keys off factor scores.
fn transit_impact(scores: &RiskFactorScores, level: RiskLevel) -> String {
    let mut impacts = Vec::new();

    if scores.wind >= 30 {
        impacts.push("High winds may affect vessel maneuverability and transit safety.");
    } else if scores.wind >= 15 {
        impacts.push("Elevated winds could require increased caution during transits.");
    }

    if scores.visibility >= 10 {
        impacts.push("Reduced visibility may slow traffic and increase collision risk.");
    } else if scores.visibility >= 5 {
        impacts.push(
            "Visibility degradation may require speed reductions and tighter traffic control.",
        );
    }

    if scores.precipitation >= 10 {
        impacts.push(
            "Heavy precipitation may degrade sensor performance and complicate navigation.",
        );
    } else if scores.precipitation >= 5 {
        impacts.push(
            "Precipitation may reduce situational awareness and increase workload on \
             bridge teams.",
        );
    }

    if impacts.is_empty() {
        return match level {
            RiskLevel::Low => QUIET_TRANSIT,
            _ => ROUTINE_CAUTION,
        }
        .to_string();
    }
    impacts.join(" ")
}

/// Port narrative keys off the reference hour's raw values.
fn port_impact(current: &WeatherObservation) -> String {
    let mut impacts = Vec::new();

    let wind = current.wind_kmh;
    if wind > 45.0 {
        impacts.push(
            "High winds may halt STS crane operations, delay pilotage, and require tug \
             assistance for berthing.",
        );
    } else if wind > 35.0 {
        impacts.push(
            "Elevated winds may reduce crane speeds, affect mooring integrity, and slow \
             berthing operations.",
        );
    } else if wind > 25.0 {
        impacts.push(
            "Moderate winds may require caution during cargo handling and vessel maneuvering.",
        );
    } else if wind > 15.0 {
        impacts.push("Light to moderate winds with minor operational impact.");
    }

    let visibility = current.visibility_m;
    if visibility < 500.0 {
        impacts.push(
            "Severely reduced visibility may suspend pilotage and restrict vessel movements.",
        );
    } else if visibility < 2000.0 {
        impacts.push("Reduced visibility may slow pilot boarding and inbound traffic.");
    }

    let precip = current.precip_mm;
    if precip > 10.0 {
        impacts.push("Heavy precipitation may halt container and bulk cargo operations.");
    } else if precip > 5.0 {
        impacts.push("Rain may reduce cargo handling efficiency and slow yard operations.");
    } else if precip > 1.0 {
        impacts.push("Light precipitation with minor operational impact.");
    }

    if impacts.is_empty() {
        return NORMAL_PORT.to_string();
    }
    impacts.join(" ")
}
