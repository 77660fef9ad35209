//! District report assembly.
//!
//! Pulls the stateless scorers together over one district's reference data
//! and produces the payload the dashboard drawer and the CLI both render.
//! Reports are recomputed from scratch on every call; nothing is cached.

mod insights;
pub mod views;

pub use insights::{ActionInsights, PriorityAction, Urgency};
pub use views::{DistrictListEntry, DistrictRiskReport};

use crate::domain::{filter_alerts, AlertFilter, District, Facility, FacilityKind};
use crate::scoring::{
    friction_score, insulin_metrics, network_density, rank_proximity, shortage_impact, RiskLevel,
};
use crate::datasets::AtlasDatasets;
use chrono::Utc;
use views::{factor_bars, FacilityView, NetworkView, PolicyView, ProximityView, ShortageView};

/// Build the full risk report for one district.
///
/// `facilities` is the roster to score against; callers may substitute an
/// imported CSV roster for the stored reference data. All scores are
/// recomputed here, so the returned metrics honor the derived-composite
/// invariant regardless of what the stored district record says.
pub fn build_report(
    district: &District,
    facilities: &[Facility],
    datasets: &AtlasDatasets,
    include_facilities: bool,
) -> DistrictRiskReport {
    let origin = district.coordinates;

    let centers: Vec<Facility> = facilities
        .iter()
        .filter(|facility| facility.kind == FacilityKind::HealthCenter)
        .cloned()
        .collect();
    let dispensers: Vec<Facility> = facilities
        .iter()
        .filter(|facility| facility.kind.dispenses())
        .cloned()
        .collect();
    let contract_pharmacies: Vec<Facility> = facilities
        .iter()
        .filter(|facility| facility.kind == FacilityKind::ContractPharmacy)
        .cloned()
        .collect();

    let proximity = rank_proximity(origin, &centers);
    let pharmacy_proximity = rank_proximity(origin, &dispensers);
    let network = network_density(origin, &contract_pharmacies);

    let friction = friction_score(&district.state_code, &datasets.policies);
    let shortage = shortage_impact(&district.state, &datasets.shortages);

    let metrics = insulin_metrics(
        proximity.coverage_score,
        friction.score,
        shortage.score,
        district.metrics.price_pressure,
    );
    let risk_level = RiskLevel::from_score(metrics.risk_score);

    let insights = insights::generate_insights(district, &metrics, &proximity, &friction, &shortage);

    let alerts = filter_alerts(
        &datasets.alerts,
        &AlertFilter {
            district_id: Some(district.id.clone()),
            ..AlertFilter::default()
        },
    );

    let facility_views = include_facilities.then(|| {
        facilities
            .iter()
            .map(|facility| {
                let distance =
                    crate::scoring::distance_between(origin, facility.address.coordinates);
                FacilityView::new(facility, Some(distance))
            })
            .collect()
    });

    DistrictRiskReport {
        district_id: district.id.clone(),
        name: district.name.clone(),
        state: district.state.clone(),
        generated_at: Utc::now(),
        metrics,
        risk_level,
        risk_label: risk_level.label(),
        factor_bars: factor_bars(&metrics),
        proximity: ProximityView {
            average_distance: proximity.average_distance,
            coverage_score: proximity.coverage_score,
            nearest_center: proximity
                .nearest
                .as_ref()
                .map(|facility| FacilityView::new(facility, None)),
            nearest_pharmacy: pharmacy_proximity
                .nearest
                .as_ref()
                .map(|facility| FacilityView::new(facility, None)),
        },
        network: NetworkView {
            total_pharmacies: network.total_facilities,
            average_distance: network.average_distance,
            density_score: network.density_score,
        },
        policy: PolicyView {
            state_name: friction
                .policy
                .as_ref()
                .map(|policy| policy.state_name.clone())
                .unwrap_or_else(|| district.state.clone()),
            friction_score: friction.score,
            copay_cap: friction.policy.as_ref().map(|policy| {
                format!(
                    "${} per {}",
                    policy.copay_cap.amount,
                    policy.copay_cap.period.label()
                )
            }),
            benefits: friction.benefits,
            limitations: friction.limitations,
        },
        shortages: ShortageView {
            score: shortage.score,
            insulin_shortages: shortage.insulin_shortages,
            affected_products: shortage.affected_products,
        },
        insights,
        alerts,
        facilities: facility_views,
    }
}

/// District list rows in stored order; callers sort with a typed key.
pub fn district_list(districts: &[District]) -> Vec<DistrictListEntry> {
    districts.iter().map(DistrictListEntry::from_district).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::insulin_risk;

    #[test]
    fn report_metrics_honor_the_derived_composite_invariant() {
        let datasets = AtlasDatasets::sample();
        let district = datasets.district("MA-04").expect("district");
        let roster = datasets.facilities_in_state(&district.state_code);
        let report = build_report(district, &roster, &datasets, false);

        let expected = insulin_risk(
            report.metrics.access_proximity,
            report.metrics.coverage_friction,
            report.metrics.availability,
            report.metrics.price_pressure,
        );
        assert_eq!(report.metrics.risk_score, expected);
        assert_eq!(report.factor_bars.len(), 4);
        assert!(report.facilities.is_none());
    }

    #[test]
    fn report_includes_facilities_with_distances_on_request() {
        let datasets = AtlasDatasets::sample();
        let district = datasets.district("MA-04").expect("district");
        let roster = datasets.facilities_in_state(&district.state_code);
        let report = build_report(district, &roster, &datasets, true);

        let facilities = report.facilities.expect("facility views");
        assert_eq!(facilities.len(), roster.len());
        assert!(facilities
            .iter()
            .all(|facility| facility.distance_miles.is_some()));
    }

    #[test]
    fn empty_roster_reports_the_sentinel_and_still_scores() {
        let datasets = AtlasDatasets::sample();
        let district = datasets.district("GA-07").expect("district");
        let report = build_report(district, &[], &datasets, false);

        assert_eq!(report.proximity.average_distance, 999.0);
        assert_eq!(report.metrics.access_proximity, 0);
        assert!(report.proximity.nearest_center.is_none());
        assert_eq!(report.network.density_score, 0);
    }

    #[test]
    fn district_alerts_are_scoped_to_the_district() {
        let datasets = AtlasDatasets::sample();
        let district = datasets.district("GA-07").expect("district");
        let roster = datasets.facilities_in_state(&district.state_code);
        let report = build_report(district, &roster, &datasets, false);

        assert!(!report.alerts.is_empty());
        assert!(report
            .alerts
            .iter()
            .all(|alert| alert.district_id == "GA-07"));
    }

    #[test]
    fn list_rows_carry_the_four_tier_band_label() {
        let datasets = AtlasDatasets::sample();
        let rows = district_list(&datasets.districts);
        let ga = rows.iter().find(|row| row.id == "GA-07").expect("GA row");
        assert_eq!(ga.risk_label, "high");
        let ca = rows.iter().find(|row| row.id == "CA-16").expect("CA row");
        assert_eq!(ca.risk_label, "low");
    }
}
