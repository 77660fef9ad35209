use super::normalize::Indicator;
use serde::{Deserialize, Serialize};

/// Raw economic readings for one district.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EconomicIndicators {
    pub gdp_growth: f64,
    pub unemployment_rate: f64,
    pub median_income: f64,
    pub poverty_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DemographicIndicators {
    pub population_growth: f64,
    /// Senior share of the population, 0-1.
    pub age_distribution: f64,
    pub diversity_index: f64,
    pub migration_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EducationIndicators {
    pub graduation_rate: f64,
    pub test_scores: f64,
    pub teacher_ratio: f64,
    pub funding_per_student: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthIndicators {
    pub life_expectancy: f64,
    pub access_to_care: f64,
    pub health_outcomes: f64,
    pub insurance_coverage: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InfrastructureIndicators {
    pub road_quality: f64,
    pub broadband_access: f64,
    pub public_transport: f64,
    pub utilities: f64,
}

/// Full five-category scorecard input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScorecardMetrics {
    pub economic: EconomicIndicators,
    pub demographic: DemographicIndicators,
    pub education: EducationIndicators,
    pub health: HealthIndicators,
    pub infrastructure: InfrastructureIndicators,
}

/// One 0-100 integer score per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryScores {
    pub economic: u8,
    pub demographic: u8,
    pub education: u8,
    pub health: u8,
    pub infrastructure: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Economic,
    Demographic,
    Education,
    Health,
    Infrastructure,
}

impl Category {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Economic => "Economic",
            Self::Demographic => "Demographic",
            Self::Education => "Education",
            Self::Health => "Health",
            Self::Infrastructure => "Infrastructure",
        }
    }
}

/// Weighted sum of normalized sub-scores, rounded to the nearest integer.
/// Weights within each category sum to 1.0, so the result is always 0-100.
fn weighted_score(parts: &[(Indicator, f64, f64)]) -> u8 {
    let total: f64 = parts
        .iter()
        .map(|(indicator, raw, weight)| indicator.score(*raw) * weight)
        .sum();
    total.round() as u8
}

pub fn economic_score(indicators: &EconomicIndicators) -> u8 {
    weighted_score(&[
        (Indicator::GdpGrowth, indicators.gdp_growth, 0.30),
        (Indicator::UnemploymentRate, indicators.unemployment_rate, 0.25),
        (Indicator::MedianIncome, indicators.median_income, 0.25),
        (Indicator::PovertyRate, indicators.poverty_rate, 0.20),
    ])
}

pub fn demographic_score(indicators: &DemographicIndicators) -> u8 {
    weighted_score(&[
        (Indicator::PopulationGrowth, indicators.population_growth, 0.30),
        (Indicator::AgeDistribution, indicators.age_distribution, 0.25),
        (Indicator::DiversityIndex, indicators.diversity_index, 0.25),
        (Indicator::MigrationRate, indicators.migration_rate, 0.20),
    ])
}

pub fn education_score(indicators: &EducationIndicators) -> u8 {
    weighted_score(&[
        (Indicator::GraduationRate, indicators.graduation_rate, 0.35),
        (Indicator::TestScores, indicators.test_scores, 0.30),
        (Indicator::TeacherRatio, indicators.teacher_ratio, 0.20),
        (Indicator::FundingPerStudent, indicators.funding_per_student, 0.15),
    ])
}

pub fn health_score(indicators: &HealthIndicators) -> u8 {
    weighted_score(&[
        (Indicator::LifeExpectancy, indicators.life_expectancy, 0.30),
        (Indicator::AccessToCare, indicators.access_to_care, 0.25),
        (Indicator::HealthOutcomes, indicators.health_outcomes, 0.25),
        (Indicator::InsuranceCoverage, indicators.insurance_coverage, 0.20),
    ])
}

pub fn infrastructure_score(indicators: &InfrastructureIndicators) -> u8 {
    weighted_score(&[
        (Indicator::RoadQuality, indicators.road_quality, 0.30),
        (Indicator::BroadbandAccess, indicators.broadband_access, 0.25),
        (Indicator::PublicTransport, indicators.public_transport, 0.25),
        (Indicator::Utilities, indicators.utilities, 0.20),
    ])
}

pub fn score_all(metrics: &ScorecardMetrics) -> CategoryScores {
    CategoryScores {
        economic: economic_score(&metrics.economic),
        demographic: demographic_score(&metrics.demographic),
        education: education_score(&metrics.education),
        health: health_score(&metrics.health),
        infrastructure: infrastructure_score(&metrics.infrastructure),
    }
}

/// One normalized reading inside a category breakdown.
#[derive(Debug, Clone, Serialize)]
pub struct IndicatorReading {
    pub indicator: Indicator,
    pub label: &'static str,
    pub raw_value: f64,
    pub score: f64,
}

/// Per-category contribution to the overall score, for score-bar rendering.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryBreakdown {
    pub category: Category,
    pub label: &'static str,
    pub score: u8,
    pub weight: f64,
    pub weighted_score: f64,
    pub indicators: Vec<IndicatorReading>,
}

fn readings(parts: &[(Indicator, f64)]) -> Vec<IndicatorReading> {
    parts
        .iter()
        .map(|(indicator, raw)| IndicatorReading {
            indicator: *indicator,
            label: indicator.label(),
            raw_value: *raw,
            score: indicator.score(*raw),
        })
        .collect()
}

/// Complete breakdown across all five categories, using the same top-level
/// weights as `risk::overall_risk`.
pub fn score_breakdown(metrics: &ScorecardMetrics) -> Vec<CategoryBreakdown> {
    let scores = score_all(metrics);
    let entries = [
        (
            Category::Economic,
            scores.economic,
            super::risk::ECONOMIC_WEIGHT,
            readings(&[
                (Indicator::GdpGrowth, metrics.economic.gdp_growth),
                (Indicator::UnemploymentRate, metrics.economic.unemployment_rate),
                (Indicator::MedianIncome, metrics.economic.median_income),
                (Indicator::PovertyRate, metrics.economic.poverty_rate),
            ]),
        ),
        (
            Category::Demographic,
            scores.demographic,
            super::risk::DEMOGRAPHIC_WEIGHT,
            readings(&[
                (Indicator::PopulationGrowth, metrics.demographic.population_growth),
                (Indicator::AgeDistribution, metrics.demographic.age_distribution),
                (Indicator::DiversityIndex, metrics.demographic.diversity_index),
                (Indicator::MigrationRate, metrics.demographic.migration_rate),
            ]),
        ),
        (
            Category::Education,
            scores.education,
            super::risk::EDUCATION_WEIGHT,
            readings(&[
                (Indicator::GraduationRate, metrics.education.graduation_rate),
                (Indicator::TestScores, metrics.education.test_scores),
                (Indicator::TeacherRatio, metrics.education.teacher_ratio),
                (Indicator::FundingPerStudent, metrics.education.funding_per_student),
            ]),
        ),
        (
            Category::Health,
            scores.health,
            super::risk::HEALTH_WEIGHT,
            readings(&[
                (Indicator::LifeExpectancy, metrics.health.life_expectancy),
                (Indicator::AccessToCare, metrics.health.access_to_care),
                (Indicator::HealthOutcomes, metrics.health.health_outcomes),
                (Indicator::InsuranceCoverage, metrics.health.insurance_coverage),
            ]),
        ),
        (
            Category::Infrastructure,
            scores.infrastructure,
            super::risk::INFRASTRUCTURE_WEIGHT,
            readings(&[
                (Indicator::RoadQuality, metrics.infrastructure.road_quality),
                (Indicator::BroadbandAccess, metrics.infrastructure.broadband_access),
                (Indicator::PublicTransport, metrics.infrastructure.public_transport),
                (Indicator::Utilities, metrics.infrastructure.utilities),
            ]),
        ),
    ];

    entries
        .into_iter()
        .map(|(category, score, weight, indicators)| CategoryBreakdown {
            category,
            label: category.label(),
            score,
            weight,
            weighted_score: f64::from(score) * weight,
            indicators,
        })
        .collect()
}
