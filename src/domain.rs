use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Signed decimal-degree pair. Range validation is the caller's concern.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// One congressional district with its scored metrics and reference sites.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct District {
    pub id: String,
    pub name: String,
    pub state: String,
    pub state_code: String,
    pub population: u32,
    pub area_sq_mi: f64,
    pub coordinates: Coordinates,
    pub metrics: InsulinMetrics,
    #[serde(default)]
    pub sites: Vec<Facility>,
    pub representative: Representative,
}

/// Canonical per-district metric record. Every sub-score is 0-100 and
/// `risk_score` is always the weighted aggregate, never set directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InsulinMetrics {
    pub access_proximity: u8,
    pub coverage_friction: u8,
    pub availability: u8,
    pub price_pressure: u8,
    pub risk_score: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Representative {
    pub name: String,
    pub party: Party,
    pub phone: String,
    pub email: String,
    pub office_address: String,
    #[serde(default)]
    pub committee_memberships: Vec<String>,
    pub voting_record: InsulinVotingRecord,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Party {
    Democratic,
    Republican,
    Independent,
}

/// Voting history on insulin-related bills, used for action suggestions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsulinVotingRecord {
    pub support_for_insulin_bills: u8,
    #[serde(default)]
    pub recent_votes: Vec<RecentVote>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentVote {
    pub bill: String,
    pub vote: VotePosition,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VotePosition {
    Yes,
    No,
    Abstain,
}

/// Read-only reference record for a care or dispensing location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Facility {
    pub id: String,
    pub name: String,
    pub kind: FacilityKind,
    pub address: Address,
    #[serde(default)]
    pub services: Vec<String>,
    #[serde(default)]
    pub hours: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FacilityKind {
    /// Federally Qualified Health Center.
    HealthCenter,
    /// Pharmacy operating as a health-center service site.
    Pharmacy,
    /// 340B contract pharmacy tied to a covered entity.
    ContractPharmacy,
}

impl FacilityKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::HealthCenter => "Health Center (FQHC)",
            Self::Pharmacy => "Pharmacy",
            Self::ContractPharmacy => "340B Contract Pharmacy",
        }
    }

    /// Whether this location dispenses prescriptions.
    pub const fn dispenses(self) -> bool {
        matches!(self, Self::Pharmacy | Self::ContractPharmacy)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub coordinates: Coordinates,
}

/// Per-state insulin copay-cap policy record, keyed by state code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatePolicy {
    pub state: String,
    pub state_name: String,
    pub copay_cap: CopayCap,
    #[serde(default)]
    pub provisions: Vec<PolicyProvision>,
    pub friction_tier: FrictionTier,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CopayCap {
    /// Cap amount in whole US dollars; zero means no cost sharing.
    pub amount: u32,
    pub period: CapPeriod,
    pub effective_date: NaiveDate,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CapPeriod {
    Monthly,
    Annual,
}

impl CapPeriod {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Monthly => "month",
            Self::Annual => "year",
        }
    }
}

/// Qualitative policy flags. The caution variants describe barriers a plan
/// may impose; the rest are protective benefits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyProvision {
    NoPriorAuthorization,
    NoStepTherapy,
    EmergencyRefills,
    PatientAssistancePrograms,
    ExtendedSupply,
    TelemedicineCoverage,
    PatientEducation,
    PriorAuthorizationMayBeRequired,
    StepTherapyMayBeRequired,
    LimitedInsulinTypes,
    LimitedFormulary,
    NoEmergencyRefills,
}

impl PolicyProvision {
    pub const fn label(self) -> &'static str {
        match self {
            Self::NoPriorAuthorization => "No prior authorization required for insulin",
            Self::NoStepTherapy => "No step therapy requirements",
            Self::EmergencyRefills => "Emergency refills allowed",
            Self::PatientAssistancePrograms => "Patient assistance programs supported",
            Self::ExtendedSupply => "90-day supply allowed",
            Self::TelemedicineCoverage => "Telemedicine coverage for diabetes management",
            Self::PatientEducation => "Patient education programs",
            Self::PriorAuthorizationMayBeRequired => "Prior authorization may be required",
            Self::StepTherapyMayBeRequired => "Step therapy may be required",
            Self::LimitedInsulinTypes => "Limited to specific insulin types",
            Self::LimitedFormulary => "Limited formulary coverage",
            Self::NoEmergencyRefills => "No emergency refill protection",
        }
    }

    pub const fn is_caution(self) -> bool {
        matches!(
            self,
            Self::PriorAuthorizationMayBeRequired
                | Self::StepTherapyMayBeRequired
                | Self::LimitedInsulinTypes
                | Self::LimitedFormulary
                | Self::NoEmergencyRefills
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrictionTier {
    VeryLow,
    Low,
    Medium,
    High,
}

/// FDA-style drug shortage record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrugShortage {
    pub id: String,
    pub drug_name: String,
    pub generic_name: String,
    pub ndc: String,
    pub manufacturer: String,
    pub status: ShortageStatus,
    pub reason: String,
    pub severity: ShortageSeverity,
    #[serde(default)]
    pub affected_areas: Vec<String>,
    pub estimated_resupply: NaiveDate,
    pub last_updated: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShortageStatus {
    Current,
    Resolved,
    Anticipated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShortageSeverity {
    High,
    Medium,
    Low,
}

/// Externally generated notification tied to a district. Pure display data;
/// alerts never trigger side effects in the scoring core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Alert {
    pub id: String,
    pub title: String,
    pub message: String,
    pub severity: AlertSeverity,
    pub source: String,
    pub district_id: String,
    pub timestamp: DateTime<Utc>,
    pub status: AlertStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta: Option<AlertDelta>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    Critical,
    Warning,
    Info,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertStatus {
    Active,
    Resolved,
}

/// Before/after value pair with the derived movement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlertDelta {
    pub previous_value: f64,
    pub current_value: f64,
    pub change: f64,
    pub change_percent: f64,
}

impl AlertDelta {
    pub fn from_values(previous_value: f64, current_value: f64) -> Self {
        let change = current_value - previous_value;
        let change_percent = if previous_value == 0.0 {
            0.0
        } else {
            (change / previous_value * 1000.0).round() / 10.0
        };
        Self {
            previous_value,
            current_value,
            change,
            change_percent,
        }
    }
}

/// Typed filter applied to in-memory alert lists.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlertFilter {
    pub search_term: Option<String>,
    pub source: Option<String>,
    pub severity: Option<AlertSeverity>,
    pub district_id: Option<String>,
}

impl AlertFilter {
    pub fn matches(&self, alert: &Alert) -> bool {
        if let Some(term) = &self.search_term {
            let term = term.to_lowercase();
            let hit = alert.title.to_lowercase().contains(&term)
                || alert.message.to_lowercase().contains(&term)
                || alert.district_id.to_lowercase().contains(&term);
            if !hit {
                return false;
            }
        }
        if let Some(source) = &self.source {
            if !alert.source.eq_ignore_ascii_case(source) {
                return false;
            }
        }
        if let Some(severity) = self.severity {
            if alert.severity != severity {
                return false;
            }
        }
        if let Some(district_id) = &self.district_id {
            if !alert.district_id.eq_ignore_ascii_case(district_id) {
                return false;
            }
        }
        true
    }
}

pub fn filter_alerts(alerts: &[Alert], filter: &AlertFilter) -> Vec<Alert> {
    alerts
        .iter()
        .filter(|alert| filter.matches(alert))
        .cloned()
        .collect()
}

/// Sort keys for district listings, replacing ad hoc comparators with one
/// comparison function per key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DistrictSortKey {
    Name,
    RiskScore,
    State,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl DistrictSortKey {
    pub fn compare(self, a: &District, b: &District) -> Ordering {
        match self {
            Self::Name => a.name.cmp(&b.name),
            Self::RiskScore => a.metrics.risk_score.cmp(&b.metrics.risk_score),
            Self::State => a.state.cmp(&b.state).then_with(|| a.name.cmp(&b.name)),
        }
    }
}

pub fn sort_districts(districts: &mut [District], key: DistrictSortKey, direction: SortDirection) {
    districts.sort_by(|a, b| {
        let ordering = key.compare(a, b);
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}
