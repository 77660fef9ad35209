//! Embedded reference data used when no data directory is configured.
//!
//! Mirrors the published demo datasets: three districts, HRSA-style health
//! centers and 340B contract pharmacies, five state policies, and the FDA
//! insulin shortage list.

use crate::domain::{
    Address, Alert, AlertDelta, AlertSeverity, AlertStatus, CapPeriod, Coordinates, CopayCap,
    District, DrugShortage, Facility, FacilityKind, FrictionTier, InsulinVotingRecord, Party,
    PolicyProvision, RecentVote, Representative, ShortageSeverity, ShortageStatus, StatePolicy,
    VotePosition,
};
use crate::scoring::insulin_metrics;
use chrono::{DateTime, NaiveDate, TimeZone, Utc};

fn stamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0)
        .single()
        .unwrap_or_default()
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

fn representative(
    name: &str,
    phone: &str,
    email: &str,
    committees: &[&str],
    support: u8,
) -> Representative {
    Representative {
        name: name.to_string(),
        party: Party::Democratic,
        phone: phone.to_string(),
        email: email.to_string(),
        office_address: "Washington, DC".to_string(),
        committee_memberships: committees.iter().map(|c| c.to_string()).collect(),
        voting_record: InsulinVotingRecord {
            support_for_insulin_bills: support,
            recent_votes: vec![RecentVote {
                bill: "HR 1234".to_string(),
                vote: VotePosition::Yes,
                date: date(2024, 1, 10),
            }],
        },
    }
}

fn facility(
    id: &str,
    name: &str,
    kind: FacilityKind,
    street: &str,
    city: &str,
    state: &str,
    zip: &str,
    lat: f64,
    lon: f64,
    services: &[&str],
    hours: &str,
    phone: &str,
) -> Facility {
    Facility {
        id: id.to_string(),
        name: name.to_string(),
        kind,
        address: Address {
            street: street.to_string(),
            city: city.to_string(),
            state: state.to_string(),
            zip_code: zip.to_string(),
            coordinates: Coordinates { lat, lon },
        },
        services: services.iter().map(|s| s.to_string()).collect(),
        hours: Some(hours.to_string()),
        phone: Some(phone.to_string()),
    }
}

pub fn districts() -> Vec<District> {
    vec![
        District {
            id: "MA-04".to_string(),
            name: "Massachusetts 4th District".to_string(),
            state: "Massachusetts".to_string(),
            state_code: "MA".to_string(),
            population: 734_823,
            area_sq_mi: 325.0,
            coordinates: Coordinates {
                lat: 42.3601,
                lon: -71.0589,
            },
            metrics: insulin_metrics(48, 10, 50, 45),
            sites: Vec::new(),
            representative: representative(
                "Jake Auchincloss",
                "(202) 225-5931",
                "district4@mail.house.gov",
                &["Armed Services", "Transportation"],
                85,
            ),
        },
        District {
            id: "CA-16".to_string(),
            name: "California 16th District".to_string(),
            state: "California".to_string(),
            state_code: "CA".to_string(),
            population: 761_387,
            area_sq_mi: 412.0,
            coordinates: Coordinates {
                lat: 37.3382,
                lon: -121.8863,
            },
            metrics: insulin_metrics(20, 15, 30, 35),
            sites: Vec::new(),
            representative: representative(
                "Anna Eshoo",
                "(202) 225-8104",
                "district16@mail.house.gov",
                &["Energy and Commerce", "Intelligence"],
                92,
            ),
        },
        District {
            id: "GA-07".to_string(),
            name: "Georgia 7th District".to_string(),
            state: "Georgia".to_string(),
            state_code: "GA".to_string(),
            population: 789_234,
            area_sq_mi: 298.0,
            coordinates: Coordinates {
                lat: 33.7490,
                lon: -84.3880,
            },
            metrics: insulin_metrics(70, 55, 60, 65),
            sites: Vec::new(),
            representative: representative(
                "Lucy McBath",
                "(202) 225-4272",
                "district7@mail.house.gov",
                &["Education and the Workforce", "Judiciary"],
                88,
            ),
        },
    ]
}

pub fn facilities() -> Vec<Facility> {
    vec![
        facility(
            "HC-MA-001",
            "Community Health Center of Cape Cod",
            FacilityKind::HealthCenter,
            "107 Commercial Street",
            "Provincetown",
            "MA",
            "02657",
            42.0587,
            -70.1787,
            &["Primary Care", "Pharmacy", "Diabetes Management", "Mental Health"],
            "Mon-Fri 8AM-6PM, Sat 9AM-1PM",
            "(508) 487-9395",
        ),
        facility(
            "HC-MA-002",
            "Martha's Vineyard Community Services",
            FacilityKind::HealthCenter,
            "111 Edgartown Road",
            "Vineyard Haven",
            "MA",
            "02568",
            41.4545,
            -70.5995,
            &["Primary Care", "Pharmacy", "Diabetes Education", "Social Services"],
            "Mon-Fri 8AM-5PM",
            "(508) 693-7900",
        ),
        facility(
            "HC-CA-001",
            "Santa Clara Valley Medical Center",
            FacilityKind::HealthCenter,
            "751 S Bascom Ave",
            "San Jose",
            "CA",
            "95128",
            37.3382,
            -121.8863,
            &["Primary Care", "Specialty Care", "Pharmacy", "Diabetes Management"],
            "Mon-Fri 7AM-7PM, Sat 8AM-4PM",
            "(408) 885-5000",
        ),
        facility(
            "HC-GA-001",
            "Grady Health System",
            FacilityKind::HealthCenter,
            "80 Jesse Hill Jr Dr SE",
            "Atlanta",
            "GA",
            "30303",
            33.7490,
            -84.3880,
            &["Primary Care", "Pharmacy", "Diabetes Care", "Mental Health"],
            "Mon-Fri 8AM-8PM, Sat 9AM-5PM",
            "(404) 616-1000",
        ),
        facility(
            "SS-MA-001",
            "Cape Cod Health Center Pharmacy",
            FacilityKind::Pharmacy,
            "107 Commercial Street",
            "Provincetown",
            "MA",
            "02657",
            42.0587,
            -70.1787,
            &["Dispensing", "Diabetes Education", "Financial Assistance"],
            "Mon-Fri 8AM-6PM, Sat 9AM-1PM",
            "(508) 487-9395",
        ),
        facility(
            "SS-CA-001",
            "Santa Clara Valley Pharmacy",
            FacilityKind::Pharmacy,
            "751 S Bascom Ave",
            "San Jose",
            "CA",
            "95128",
            37.3382,
            -121.8863,
            &["Dispensing", "Diabetes Education"],
            "Mon-Fri 7AM-7PM, Sat 8AM-4PM",
            "(408) 885-5000",
        ),
        facility(
            "CP-MA-001",
            "CVS Pharmacy - Provincetown",
            FacilityKind::ContractPharmacy,
            "185 Commercial Street",
            "Provincetown",
            "MA",
            "02657",
            42.0587,
            -70.1787,
            &["Prescription Dispensing", "340B Pricing", "Patient Assistance"],
            "Mon-Fri 8AM-9PM, Sat 9AM-6PM, Sun 10AM-6PM",
            "(508) 487-9395",
        ),
        facility(
            "CP-MA-002",
            "Walgreens - Vineyard Haven",
            FacilityKind::ContractPharmacy,
            "123 Main Street",
            "Vineyard Haven",
            "MA",
            "02568",
            41.4545,
            -70.5995,
            &["Prescription Dispensing", "340B Pricing", "Diabetes Care"],
            "Mon-Fri 8AM-8PM, Sat 9AM-6PM, Sun 10AM-6PM",
            "(508) 693-7900",
        ),
        facility(
            "CP-CA-001",
            "Rite Aid - San Jose",
            FacilityKind::ContractPharmacy,
            "789 S Bascom Ave",
            "San Jose",
            "CA",
            "95128",
            37.3382,
            -121.8863,
            &["Prescription Dispensing", "340B Pricing", "Specialty Medications"],
            "Mon-Fri 7AM-9PM, Sat 8AM-8PM, Sun 9AM-6PM",
            "(408) 885-5000",
        ),
        facility(
            "CP-GA-001",
            "Walmart Pharmacy - Atlanta",
            FacilityKind::ContractPharmacy,
            "100 Jesse Hill Jr Dr SE",
            "Atlanta",
            "GA",
            "30303",
            33.7490,
            -84.3880,
            &["Prescription Dispensing", "340B Pricing", "Patient Education"],
            "Mon-Fri 8AM-8PM, Sat 9AM-6PM, Sun 10AM-6PM",
            "(404) 616-1000",
        ),
    ]
}

pub fn policies() -> Vec<StatePolicy> {
    vec![
        StatePolicy {
            state: "MA".to_string(),
            state_name: "Massachusetts".to_string(),
            copay_cap: CopayCap {
                amount: 25,
                period: CapPeriod::Monthly,
                effective_date: date(2021, 1, 1),
                notes: "Applies to all insulin products, regardless of type or dosage".to_string(),
            },
            provisions: vec![
                PolicyProvision::NoPriorAuthorization,
                PolicyProvision::EmergencyRefills,
                PolicyProvision::PatientAssistancePrograms,
            ],
            friction_tier: FrictionTier::Low,
            last_updated: stamp(),
        },
        StatePolicy {
            state: "CA".to_string(),
            state_name: "California".to_string(),
            copay_cap: CopayCap {
                amount: 30,
                period: CapPeriod::Monthly,
                effective_date: date(2020, 1, 1),
                notes: "Covers all FDA-approved insulin products".to_string(),
            },
            provisions: vec![
                PolicyProvision::NoStepTherapy,
                PolicyProvision::ExtendedSupply,
                PolicyProvision::TelemedicineCoverage,
            ],
            friction_tier: FrictionTier::Low,
            last_updated: stamp(),
        },
        StatePolicy {
            state: "GA".to_string(),
            state_name: "Georgia".to_string(),
            copay_cap: CopayCap {
                amount: 50,
                period: CapPeriod::Monthly,
                effective_date: date(2022, 7, 1),
                notes: "Applies to state-regulated health plans only".to_string(),
            },
            provisions: vec![
                PolicyProvision::PriorAuthorizationMayBeRequired,
                PolicyProvision::LimitedInsulinTypes,
                PolicyProvision::NoEmergencyRefills,
            ],
            friction_tier: FrictionTier::Medium,
            last_updated: stamp(),
        },
        StatePolicy {
            state: "TX".to_string(),
            state_name: "Texas".to_string(),
            copay_cap: CopayCap {
                amount: 75,
                period: CapPeriod::Monthly,
                effective_date: date(2023, 1, 1),
                notes: "Limited to state employee health plans".to_string(),
            },
            provisions: vec![
                PolicyProvision::StepTherapyMayBeRequired,
                PolicyProvision::PriorAuthorizationMayBeRequired,
                PolicyProvision::LimitedFormulary,
            ],
            friction_tier: FrictionTier::High,
            last_updated: stamp(),
        },
        StatePolicy {
            state: "NY".to_string(),
            state_name: "New York".to_string(),
            copay_cap: CopayCap {
                amount: 0,
                period: CapPeriod::Monthly,
                effective_date: date(2020, 1, 1),
                notes: "Zero copay for all insulin products".to_string(),
            },
            provisions: vec![
                PolicyProvision::NoPriorAuthorization,
                PolicyProvision::NoStepTherapy,
                PolicyProvision::EmergencyRefills,
                PolicyProvision::PatientEducation,
            ],
            friction_tier: FrictionTier::VeryLow,
            last_updated: stamp(),
        },
    ]
}

pub fn shortages() -> Vec<DrugShortage> {
    vec![
        DrugShortage {
            id: "DS-001".to_string(),
            drug_name: "Humalog (insulin lispro)".to_string(),
            generic_name: "insulin lispro".to_string(),
            ndc: "00002-7510-01".to_string(),
            manufacturer: "Eli Lilly and Company".to_string(),
            status: ShortageStatus::Current,
            reason: "Demand increase for the drug".to_string(),
            severity: ShortageSeverity::High,
            affected_areas: vec!["Nationwide".to_string()],
            estimated_resupply: date(2024, 3, 15),
            last_updated: stamp(),
        },
        DrugShortage {
            id: "DS-002".to_string(),
            drug_name: "NovoLog (insulin aspart)".to_string(),
            generic_name: "insulin aspart".to_string(),
            ndc: "0169-1837-11".to_string(),
            manufacturer: "Novo Nordisk".to_string(),
            status: ShortageStatus::Current,
            reason: "Manufacturing delay".to_string(),
            severity: ShortageSeverity::Medium,
            affected_areas: vec!["Northeast".to_string(), "Midwest".to_string()],
            estimated_resupply: date(2024, 2, 28),
            last_updated: stamp(),
        },
        DrugShortage {
            id: "DS-003".to_string(),
            drug_name: "Lantus (insulin glargine)".to_string(),
            generic_name: "insulin glargine".to_string(),
            ndc: "00088-2837-33".to_string(),
            manufacturer: "Sanofi".to_string(),
            status: ShortageStatus::Resolved,
            reason: "Temporary manufacturing issue".to_string(),
            severity: ShortageSeverity::Low,
            affected_areas: vec!["California".to_string(), "Texas".to_string()],
            estimated_resupply: date(2024, 1, 10),
            last_updated: Utc
                .with_ymd_and_hms(2024, 1, 10, 12, 0, 0)
                .single()
                .unwrap_or_default(),
        },
        DrugShortage {
            id: "DS-004".to_string(),
            drug_name: "Tresiba (insulin degludec)".to_string(),
            generic_name: "insulin degludec".to_string(),
            ndc: "0169-1837-12".to_string(),
            manufacturer: "Novo Nordisk".to_string(),
            status: ShortageStatus::Current,
            reason: "Supply chain disruption".to_string(),
            severity: ShortageSeverity::High,
            affected_areas: vec!["Southeast".to_string(), "Southwest".to_string()],
            estimated_resupply: date(2024, 4, 1),
            last_updated: stamp(),
        },
    ]
}

pub fn alerts() -> Vec<Alert> {
    vec![
        Alert {
            id: "AL-001".to_string(),
            title: "Risk score rising in GA-07".to_string(),
            message: "Composite insulin access risk moved from 65 to 75 week over week".to_string(),
            severity: AlertSeverity::Warning,
            source: "atlas".to_string(),
            district_id: "GA-07".to_string(),
            timestamp: stamp(),
            status: AlertStatus::Active,
            delta: Some(AlertDelta::from_values(65.0, 75.0)),
        },
        Alert {
            id: "AL-002".to_string(),
            title: "Pharmacy access improved in CA-16".to_string(),
            message: "Contract pharmacy roster grew after a new 340B registration".to_string(),
            severity: AlertSeverity::Info,
            source: "hrsa".to_string(),
            district_id: "CA-16".to_string(),
            timestamp: stamp(),
            status: AlertStatus::Active,
            delta: Some(AlertDelta::from_values(95.0, 103.0)),
        },
        Alert {
            id: "AL-003".to_string(),
            title: "Uninsured rate declining in MA-04".to_string(),
            message: "Survey data shows the uninsured rate easing from 15.2% to 13.4%".to_string(),
            severity: AlertSeverity::Info,
            source: "census".to_string(),
            district_id: "MA-04".to_string(),
            timestamp: stamp(),
            status: AlertStatus::Resolved,
            delta: Some(AlertDelta::from_values(15.2, 13.4)),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{insulin_risk, RiskLevel};

    #[test]
    fn sample_district_scores_are_derived_not_stored() {
        for district in districts() {
            let expected = insulin_risk(
                district.metrics.access_proximity,
                district.metrics.coverage_friction,
                district.metrics.availability,
                district.metrics.price_pressure,
            );
            assert_eq!(district.metrics.risk_score, expected, "{}", district.id);
        }
    }

    #[test]
    fn sample_districts_span_the_risk_bands() {
        let levels: Vec<RiskLevel> = districts()
            .iter()
            .map(|district| RiskLevel::from_score(district.metrics.risk_score))
            .collect();
        assert!(levels.contains(&RiskLevel::Low));
        assert!(levels.contains(&RiskLevel::High));
    }

    #[test]
    fn every_sample_district_state_has_facilities_and_a_policy() {
        let facilities = facilities();
        let policies = policies();
        for district in districts() {
            assert!(
                facilities
                    .iter()
                    .any(|facility| facility.address.state == district.state_code),
                "no facilities for {}",
                district.state_code
            );
            assert!(
                policies
                    .iter()
                    .any(|policy| policy.state == district.state_code),
                "no policy for {}",
                district.state_code
            );
        }
    }
}
