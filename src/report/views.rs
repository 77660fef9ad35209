use crate::domain::{Alert, District, Facility, FacilityKind, InsulinMetrics};
use crate::scoring::RiskLevel;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Row for the district list surface: id, headline risk, representative.
#[derive(Debug, Clone, Serialize)]
pub struct DistrictListEntry {
    pub id: String,
    pub name: String,
    pub state: String,
    pub representative: String,
    pub risk_score: u8,
    pub risk_level: RiskLevel,
    pub risk_label: &'static str,
}

impl DistrictListEntry {
    pub fn from_district(district: &District) -> Self {
        let level = RiskLevel::from_score(district.metrics.risk_score);
        Self {
            id: district.id.clone(),
            name: district.name.clone(),
            state: district.state.clone(),
            representative: district.representative.name.clone(),
            risk_score: district.metrics.risk_score,
            risk_level: level,
            risk_label: level.label(),
        }
    }
}

/// One bar in the factor breakdown panel.
#[derive(Debug, Clone, Serialize)]
pub struct FactorBarEntry {
    pub factor: &'static str,
    pub score: u8,
}

pub fn factor_bars(metrics: &InsulinMetrics) -> Vec<FactorBarEntry> {
    vec![
        FactorBarEntry {
            factor: "Access Proximity",
            score: metrics.access_proximity,
        },
        FactorBarEntry {
            factor: "Coverage Friction",
            score: metrics.coverage_friction,
        },
        FactorBarEntry {
            factor: "Availability",
            score: metrics.availability,
        },
        FactorBarEntry {
            factor: "Price Pressure",
            score: metrics.price_pressure,
        },
    ]
}

#[derive(Debug, Clone, Serialize)]
pub struct FacilityView {
    pub id: String,
    pub name: String,
    pub kind: FacilityKind,
    pub kind_label: &'static str,
    pub city: String,
    pub state: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_miles: Option<f64>,
}

impl FacilityView {
    pub fn new(facility: &Facility, distance_miles: Option<f64>) -> Self {
        Self {
            id: facility.id.clone(),
            name: facility.name.clone(),
            kind: facility.kind,
            kind_label: facility.kind.label(),
            city: facility.address.city.clone(),
            state: facility.address.state.clone(),
            phone: facility.phone.clone(),
            distance_miles: distance_miles.map(|d| (d * 10.0).round() / 10.0),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ProximityView {
    pub average_distance: f64,
    pub coverage_score: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nearest_center: Option<FacilityView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nearest_pharmacy: Option<FacilityView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NetworkView {
    pub total_pharmacies: usize,
    pub average_distance: f64,
    pub density_score: u8,
}

#[derive(Debug, Clone, Serialize)]
pub struct PolicyView {
    pub state_name: String,
    pub friction_score: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copay_cap: Option<String>,
    pub benefits: Vec<String>,
    pub limitations: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ShortageView {
    pub score: u8,
    pub insulin_shortages: usize,
    pub affected_products: Vec<String>,
}

/// Full per-district report payload consumed by the drawer and the CLI.
#[derive(Debug, Clone, Serialize)]
pub struct DistrictRiskReport {
    pub district_id: String,
    pub name: String,
    pub state: String,
    pub generated_at: DateTime<Utc>,
    pub metrics: InsulinMetrics,
    pub risk_level: RiskLevel,
    pub risk_label: &'static str,
    pub factor_bars: Vec<FactorBarEntry>,
    pub proximity: ProximityView,
    pub network: NetworkView,
    pub policy: PolicyView,
    pub shortages: ShortageView,
    pub insights: super::ActionInsights,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub alerts: Vec<Alert>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facilities: Option<Vec<FacilityView>>,
}
