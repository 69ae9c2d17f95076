// Hour-by-hour risk strip
use super::policy::ScoringPolicy;
use super::scoring::{classify, hour_scores, RiskLevel};
use super::weather::SeriesWindow;

/// Classifies every hour of the window on its own values, never on window
/// aggregates, so hour 0 may differ from the composite level.
pub fn risk_strip(window: &SeriesWindow<'_>, policy: &ScoringPolicy) -> Vec<RiskLevel> {
    (0..window.len())
        .map(|hour| classify(&hour_scores(window, hour, policy), policy).1)
        .collect()
}
