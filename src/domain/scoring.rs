// Factor scoring and composite classification
use serde::{Deserialize, Serialize};

use super::policy::{Factor, ScoringPolicy};
use super::weather::SeriesWindow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 3] = [RiskLevel::Low, RiskLevel::Moderate, RiskLevel::High];

    /// Thresholds are shared by every policy.
    pub fn from_score(score: u32) -> Self {
        if score < 30 {
            RiskLevel::Low
        } else if score < 60 {
            RiskLevel::Moderate
        } else {
            RiskLevel::High
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
        }
    }

    /// Presentation colour; never a decision input.
    pub fn color(&self) -> &'static str {
        match self {
            RiskLevel::Low => "#2ECC71",
            RiskLevel::Moderate => "#F1C40F",
            RiskLevel::High => "#E74C3C",
        }
    }
}

/// Per-factor contributions for one hour or one aggregated window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskFactorScores {
    pub wind: u32,
    pub visibility: u32,
    pub precipitation: u32,
}

impl RiskFactorScores {
    pub fn get(&self, factor: Factor) -> u32 {
        match factor {
            Factor::Wind => self.wind,
            Factor::Visibility => self.visibility,
            Factor::Precipitation => self.precipitation,
        }
    }

    pub fn total(&self) -> u32 {
        self.wind + self.visibility + self.precipitation
    }
}

pub fn score(factor: Factor, value: f64, policy: &ScoringPolicy) -> u32 {
    policy.rule(factor).table.score(value)
}

/// Scores one set of raw inputs. Both the composite path and the hourly strip
/// go through here; they differ only in which values they pass.
pub fn score_inputs(
    wind_kmh: f64,
    visibility_m: f64,
    precip_mm: f64,
    policy: &ScoringPolicy,
) -> RiskFactorScores {
    RiskFactorScores {
        wind: score(Factor::Wind, wind_kmh, policy),
        visibility: score(Factor::Visibility, visibility_m, policy),
        precipitation: score(Factor::Precipitation, precip_mm, policy),
    }
}

pub fn hour_scores(
    window: &SeriesWindow<'_>,
    hour: usize,
    policy: &ScoringPolicy,
) -> RiskFactorScores {
    score_inputs(
        window.wind_kmh[hour],
        window.visibility_m[hour],
        window.precip_mm[hour],
        policy,
    )
}

/// Scores the window using each factor's composite input reduction.
pub fn composite_scores(window: &SeriesWindow<'_>, policy: &ScoringPolicy) -> RiskFactorScores {
    score_inputs(
        policy.wind.composite_input.reduce(window.wind_kmh),
        policy.visibility.composite_input.reduce(window.visibility_m),
        policy.precipitation.composite_input.reduce(window.precip_mm),
        policy,
    )
}

pub fn classify(scores: &RiskFactorScores, policy: &ScoringPolicy) -> (u32, RiskLevel) {
    let composite = scores.total().min(policy.max_possible());
    (composite, RiskLevel::from_score(composite))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::weather::fixtures::constant_series;
    use proptest::prelude::*;

    fn chokepoint() -> ScoringPolicy {
        ScoringPolicy::chokepoint_transit()
    }

    fn port() -> ScoringPolicy {
        ScoringPolicy::port_operations()
    }

    #[test]
    fn test_chokepoint_boundaries() {
        let p = chokepoint();
        assert_eq!(score(Factor::Wind, 20.0, &p), 15);
        assert_eq!(score(Factor::Wind, 19.99, &p), 5);
        assert_eq!(score(Factor::Wind, 60.0, &p), 40);
        assert_eq!(score(Factor::Wind, 59.99, &p), 30);
        assert_eq!(score(Factor::Visibility, 10000.0, &p), 5);
        assert_eq!(score(Factor::Visibility, 10000.01, &p), 0);
        assert_eq!(score(Factor::Precipitation, 0.0, &p), 0);
        assert_eq!(score(Factor::Precipitation, 0.01, &p), 5);
    }

    #[test]
    fn test_port_boundaries() {
        let p = port();
        assert_eq!(score(Factor::Wind, 15.0, &p), 0);
        assert_eq!(score(Factor::Wind, 15.01, &p), 10);
        assert_eq!(score(Factor::Wind, 45.0, &p), 35);
        assert_eq!(score(Factor::Wind, 45.01, &p), 50);
        assert_eq!(score(Factor::Visibility, 500.0, &p), 30);
        assert_eq!(score(Factor::Precipitation, 0.5, &p), 0);
        assert_eq!(score(Factor::Precipitation, 10.01, &p), 20);
    }

    #[test]
    fn test_level_buckets() {
        assert_eq!(RiskLevel::from_score(0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(29), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(30), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_score(59), RiskLevel::Moderate);
        assert_eq!(RiskLevel::from_score(60), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(100), RiskLevel::High);
    }

    #[test]
    fn test_composite_uses_window_extremes_for_chokepoint() {
        let mut series = constant_series(10.0, 20000.0, 0.0);
        series.wind_kmh.as_mut().unwrap()[17] = 65.0;
        series.visibility_m.as_mut().unwrap()[3] = 800.0;
        series.precip_mm.as_mut().unwrap()[22] = 12.0;
        let window = series.window().unwrap();

        let scores = composite_scores(&window, &chokepoint());
        assert_eq!(scores, RiskFactorScores { wind: 40, visibility: 20, precipitation: 20 });
        assert_eq!(classify(&scores, &chokepoint()), (80, RiskLevel::High));
    }

    #[test]
    fn test_composite_uses_reference_hour_for_port() {
        let mut series = constant_series(10.0, 20000.0, 0.0);
        series.wind_kmh.as_mut().unwrap()[5] = 80.0;
        let window = series.window().unwrap();

        let scores = composite_scores(&window, &port());
        assert_eq!(classify(&scores, &port()), (0, RiskLevel::Low));
        assert_eq!(hour_scores(&window, 5, &port()).wind, 50);
    }

    #[test]
    fn test_nan_scores_as_worst_case() {
        let p = chokepoint();
        assert_eq!(score(Factor::Wind, f64::NAN, &p), 40);
        assert_eq!(score(Factor::Visibility, f64::NAN, &p), 20);
        assert_eq!(score(Factor::Precipitation, f64::NAN, &p), 20);
    }

    #[test]
    fn test_nan_hour_drives_composite_like_strip() {
        let mut series = constant_series(10.0, 20000.0, 0.0);
        series.wind_kmh.as_mut().unwrap()[5] = f64::NAN;
        let window = series.window().unwrap();

        let composite = composite_scores(&window, &chokepoint());
        assert_eq!(composite.wind, 40);
        assert_eq!(hour_scores(&window, 5, &chokepoint()).wind, 40);
        assert_eq!(classify(&composite, &chokepoint()), (40, RiskLevel::Moderate));
    }

    #[test]
    fn test_colors_follow_level() {
        assert_eq!(RiskLevel::Low.color(), "#2ECC71");
        assert_eq!(RiskLevel::Moderate.color(), "#F1C40F");
        assert_eq!(RiskLevel::High.color(), "#E74C3C");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn property_scores_monotonic_and_bounded(a in 0.0f64..100_000.0, b in 0.0f64..100_000.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            for policy in [chokepoint(), port()] {
                let wind_max = policy.wind.table.max_score();
                let vis_max = policy.visibility.table.max_score();
                let precip_max = policy.precipitation.table.max_score();

                let wind = |v| score(Factor::Wind, v, &policy);
                let visibility = |v| score(Factor::Visibility, v, &policy);
                let precip = |v| score(Factor::Precipitation, v, &policy);

                prop_assert!(wind(lo) <= wind(hi));
                prop_assert!(precip(lo) <= precip(hi));
                prop_assert!(visibility(hi) <= visibility(lo));

                prop_assert!(score(Factor::Wind, hi, &policy) <= wind_max);
                prop_assert!(score(Factor::Visibility, lo, &policy) <= vis_max);
                prop_assert!(score(Factor::Precipitation, hi, &policy) <= precip_max);
            }
        }

        #[test]
        fn property_composite_within_policy_range(
            wind in 0.0f64..200.0,
            vis in 0.0f64..50_000.0,
            precip in 0.0f64..50.0,
        ) {
            for policy in [chokepoint(), port()] {
                let scores = score_inputs(wind, vis, precip, &policy);
                let (composite, level) = classify(&scores, &policy);
                prop_assert!(composite <= policy.max_possible());
                prop_assert_eq!(level, RiskLevel::from_score(composite));
            }
        }
    }
}
