use super::category::CategoryScores;
use crate::domain::InsulinMetrics;
use serde::{Deserialize, Serialize};

/// Top-level category weights for the community scorecard.
pub const ECONOMIC_WEIGHT: f64 = 0.25;
pub const DEMOGRAPHIC_WEIGHT: f64 = 0.20;
pub const EDUCATION_WEIGHT: f64 = 0.20;
pub const HEALTH_WEIGHT: f64 = 0.20;
pub const INFRASTRUCTURE_WEIGHT: f64 = 0.15;

/// Weights for the insulin-specific composite.
pub const ACCESS_PROXIMITY_WEIGHT: f64 = 0.4;
pub const COVERAGE_FRICTION_WEIGHT: f64 = 0.3;
pub const AVAILABILITY_WEIGHT: f64 = 0.2;
pub const PRICE_PRESSURE_WEIGHT: f64 = 0.1;

/// Discrete banding applied to any 0-100 composite score.
///
/// This four-tier split is canonical across the atlas; the legacy two-tier
/// 35/65 split used by one list view has been retired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub const fn from_score(score: u8) -> Self {
        match score {
            0..=25 => Self::Low,
            26..=50 => Self::Medium,
            51..=75 => Self::High,
            _ => Self::Critical,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

/// Weighted overall score across the five scorecard categories.
pub fn overall_risk(scores: &CategoryScores) -> u8 {
    let weighted = f64::from(scores.economic) * ECONOMIC_WEIGHT
        + f64::from(scores.demographic) * DEMOGRAPHIC_WEIGHT
        + f64::from(scores.education) * EDUCATION_WEIGHT
        + f64::from(scores.health) * HEALTH_WEIGHT
        + f64::from(scores.infrastructure) * INFRASTRUCTURE_WEIGHT;
    weighted.round() as u8
}

/// Composite insulin-access risk from the four district factors.
pub fn insulin_risk(
    access_proximity: u8,
    coverage_friction: u8,
    availability: u8,
    price_pressure: u8,
) -> u8 {
    let weighted = f64::from(access_proximity) * ACCESS_PROXIMITY_WEIGHT
        + f64::from(coverage_friction) * COVERAGE_FRICTION_WEIGHT
        + f64::from(availability) * AVAILABILITY_WEIGHT
        + f64::from(price_pressure) * PRICE_PRESSURE_WEIGHT;
    weighted.round() as u8
}

/// Build a metrics record with the derived composite. This is the only
/// constructor; `risk_score` is never set independently.
pub fn insulin_metrics(
    access_proximity: u8,
    coverage_friction: u8,
    availability: u8,
    price_pressure: u8,
) -> InsulinMetrics {
    InsulinMetrics {
        access_proximity,
        coverage_friction,
        availability,
        price_pressure,
        risk_score: insulin_risk(
            access_proximity,
            coverage_friction,
            availability,
            price_pressure,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overall_risk_of_perfect_categories_is_100() {
        let scores = CategoryScores {
            economic: 100,
            demographic: 100,
            education: 100,
            health: 100,
            infrastructure: 100,
        };
        assert_eq!(overall_risk(&scores), 100);
    }

    #[test]
    fn overall_risk_of_zero_categories_is_zero() {
        let scores = CategoryScores {
            economic: 0,
            demographic: 0,
            education: 0,
            health: 0,
            infrastructure: 0,
        };
        assert_eq!(overall_risk(&scores), 0);
    }

    #[test]
    fn insulin_risk_matches_published_example() {
        // round(0.4*65 + 0.3*70 + 0.2*40 + 0.1*50) == 60
        assert_eq!(insulin_risk(65, 70, 40, 50), 60);
    }

    #[test]
    fn risk_levels_band_on_the_four_tier_thresholds() {
        assert_eq!(RiskLevel::from_score(0), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(25), RiskLevel::Low);
        assert_eq!(RiskLevel::from_score(26), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(50), RiskLevel::Medium);
        assert_eq!(RiskLevel::from_score(51), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(75), RiskLevel::High);
        assert_eq!(RiskLevel::from_score(76), RiskLevel::Critical);
        assert_eq!(RiskLevel::from_score(100), RiskLevel::Critical);
    }

    #[test]
    fn metrics_constructor_derives_the_composite() {
        let metrics = insulin_metrics(65, 70, 40, 50);
        assert_eq!(metrics.risk_score, 60);
        assert_eq!(RiskLevel::from_score(metrics.risk_score), RiskLevel::High);
    }

    #[test]
    fn scorers_are_idempotent() {
        assert_eq!(insulin_risk(33, 44, 55, 66), insulin_risk(33, 44, 55, 66));
        let scores = CategoryScores {
            economic: 61,
            demographic: 47,
            education: 72,
            health: 58,
            infrastructure: 63,
        };
        assert_eq!(overall_risk(&scores), overall_risk(&scores));
    }
}
