// Dominant driver selection
use super::policy::Factor;
use super::scoring::RiskFactorScores;

/// Factor with the strictly largest contribution. Ties go to the earlier
/// factor in `Factor::PRIORITY` (wind, then visibility, then precipitation).
pub fn dominant(scores: &RiskFactorScores) -> Factor {
    let mut best = Factor::PRIORITY[0];
    for factor in Factor::PRIORITY.into_iter().skip(1) {
        if scores.get(factor) > scores.get(best) {
            best = factor;
        }
    }
    best
}

pub fn driver_label(factor: Factor) -> &'static str {
    match factor {
        Factor::Wind => "Wind-driven risk",
        Factor::Visibility => "Visibility degradation",
        Factor::Precipitation => "Heavy precipitation",
    }
}
