use serde::{Deserialize, Serialize};

/// Whether a larger raw value improves or worsens the sub-score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    HigherBetter,
    HigherWorse,
}

/// Clamp `raw` to `[low, high]` and rescale linearly to 0-100.
///
/// Out-of-range values are silently clamped, never rejected. With
/// `Polarity::HigherWorse` the scale is flipped so a larger raw value
/// yields a lower score.
pub fn normalize(raw: f64, low: f64, high: f64, polarity: Polarity) -> f64 {
    let clamped = raw.clamp(low, high);
    let fraction = (clamped - low) / (high - low);
    match polarity {
        Polarity::HigherBetter => fraction * 100.0,
        Polarity::HigherWorse => (1.0 - fraction) * 100.0,
    }
}

/// Scorecard indicators with their fixed normalization bounds. The bounds
/// are domain constants; callers never supply their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    GdpGrowth,
    UnemploymentRate,
    MedianIncome,
    PovertyRate,
    PopulationGrowth,
    AgeDistribution,
    DiversityIndex,
    MigrationRate,
    GraduationRate,
    TestScores,
    TeacherRatio,
    FundingPerStudent,
    LifeExpectancy,
    AccessToCare,
    HealthOutcomes,
    InsuranceCoverage,
    RoadQuality,
    BroadbandAccess,
    PublicTransport,
    Utilities,
}

impl Indicator {
    pub const fn bounds(self) -> (f64, f64) {
        match self {
            Self::GdpGrowth => (-5.0, 10.0),
            Self::UnemploymentRate => (2.0, 15.0),
            Self::MedianIncome => (30_000.0, 100_000.0),
            Self::PovertyRate => (5.0, 25.0),
            Self::PopulationGrowth => (-2.0, 5.0),
            Self::AgeDistribution => (0.1, 0.3),
            Self::DiversityIndex => (0.1, 0.8),
            Self::MigrationRate => (-3.0, 3.0),
            Self::GraduationRate => (60.0, 95.0),
            Self::TestScores => (60.0, 90.0),
            Self::TeacherRatio => (15.0, 25.0),
            Self::FundingPerStudent => (8_000.0, 20_000.0),
            Self::LifeExpectancy => (70.0, 85.0),
            Self::AccessToCare => (0.6, 0.95),
            Self::HealthOutcomes => (0.5, 0.9),
            Self::InsuranceCoverage => (0.7, 0.98),
            Self::RoadQuality => (0.3, 0.95),
            Self::BroadbandAccess => (0.5, 0.98),
            Self::PublicTransport => (0.2, 0.9),
            Self::Utilities => (0.7, 0.99),
        }
    }

    pub const fn polarity(self) -> Polarity {
        match self {
            Self::UnemploymentRate | Self::PovertyRate | Self::AgeDistribution | Self::TeacherRatio => {
                Polarity::HigherWorse
            }
            _ => Polarity::HigherBetter,
        }
    }

    /// Normalized 0-100 sub-score for a raw reading of this indicator.
    pub fn score(self, raw: f64) -> f64 {
        let (low, high) = self.bounds();
        normalize(raw, low, high, self.polarity())
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::GdpGrowth => "GDP growth",
            Self::UnemploymentRate => "Unemployment rate",
            Self::MedianIncome => "Median income",
            Self::PovertyRate => "Poverty rate",
            Self::PopulationGrowth => "Population growth",
            Self::AgeDistribution => "Senior population share",
            Self::DiversityIndex => "Diversity index",
            Self::MigrationRate => "Migration rate",
            Self::GraduationRate => "Graduation rate",
            Self::TestScores => "Test scores",
            Self::TeacherRatio => "Student-teacher ratio",
            Self::FundingPerStudent => "Funding per student",
            Self::LifeExpectancy => "Life expectancy",
            Self::AccessToCare => "Access to care",
            Self::HealthOutcomes => "Health outcomes",
            Self::InsuranceCoverage => "Insurance coverage",
            Self::RoadQuality => "Road quality",
            Self::BroadbandAccess => "Broadband access",
            Self::PublicTransport => "Public transport",
            Self::Utilities => "Utility reliability",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_below_the_low_bound_pin_to_the_floor() {
        assert_eq!(normalize(-10.0, -5.0, 10.0, Polarity::HigherBetter), 0.0);
        assert_eq!(normalize(-10.0, -5.0, 10.0, Polarity::HigherWorse), 100.0);
    }

    #[test]
    fn values_above_the_high_bound_pin_to_the_ceiling() {
        assert_eq!(normalize(50.0, 2.0, 15.0, Polarity::HigherBetter), 100.0);
        assert_eq!(normalize(50.0, 2.0, 15.0, Polarity::HigherWorse), 0.0);
    }

    #[test]
    fn midpoint_rescales_linearly() {
        let score = normalize(65_000.0, 30_000.0, 100_000.0, Polarity::HigherBetter);
        assert_eq!(score, 50.0);
    }

    #[test]
    fn unemployment_indicator_matches_published_formula() {
        // ((15 - u) / 13) * 100 for u in [2, 15]
        let score = Indicator::UnemploymentRate.score(6.0);
        assert!((score - ((15.0 - 6.0) / 13.0) * 100.0).abs() < 1e-9);
    }

    #[test]
    fn every_indicator_stays_within_bounds_for_extreme_inputs() {
        let all = [
            Indicator::GdpGrowth,
            Indicator::UnemploymentRate,
            Indicator::MedianIncome,
            Indicator::PovertyRate,
            Indicator::PopulationGrowth,
            Indicator::AgeDistribution,
            Indicator::DiversityIndex,
            Indicator::MigrationRate,
            Indicator::GraduationRate,
            Indicator::TestScores,
            Indicator::TeacherRatio,
            Indicator::FundingPerStudent,
            Indicator::LifeExpectancy,
            Indicator::AccessToCare,
            Indicator::HealthOutcomes,
            Indicator::InsuranceCoverage,
            Indicator::RoadQuality,
            Indicator::BroadbandAccess,
            Indicator::PublicTransport,
            Indicator::Utilities,
        ];
        for indicator in all {
            for raw in [-1.0e9, 0.0, 1.0e9] {
                let score = indicator.score(raw);
                assert!(
                    (0.0..=100.0).contains(&score),
                    "{indicator:?} produced {score} for raw {raw}"
                );
            }
        }
    }
}
