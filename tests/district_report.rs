use insulin_atlas::datasets::AtlasDatasets;
use insulin_atlas::report::build_report;
use insulin_atlas::scoring::{insulin_risk, RiskLevel};

#[test]
fn sample_reports_build_end_to_end_for_every_district() {
    let datasets = AtlasDatasets::sample();

    for district in &datasets.districts {
        let roster = datasets.facilities_in_state(&district.state_code);
        let report = build_report(district, &roster, &datasets, true);

        assert_eq!(report.district_id, district.id);
        assert_eq!(
            report.metrics.risk_score,
            insulin_risk(
                report.metrics.access_proximity,
                report.metrics.coverage_friction,
                report.metrics.availability,
                report.metrics.price_pressure,
            ),
            "composite must be derived from the four factors for {}",
            district.id
        );
        assert_eq!(report.risk_level, RiskLevel::from_score(report.metrics.risk_score));
        assert_eq!(report.factor_bars.len(), 4);
        assert!(report.factor_bars.iter().all(|bar| bar.score <= 100));
        assert!(!report.insights.observations.is_empty());
        assert!(!report.insights.priority_actions.is_empty());

        let facilities = report.facilities.as_ref().expect("facility listing requested");
        assert_eq!(facilities.len(), roster.len());
    }
}

#[test]
fn massachusetts_report_reflects_its_policy_and_roster() {
    let datasets = AtlasDatasets::sample();
    let district = datasets.district("MA-04").expect("district on file");
    let roster = datasets.facilities_in_state("MA");
    let report = build_report(district, &roster, &datasets, false);

    assert_eq!(report.policy.state_name, "Massachusetts");
    assert_eq!(report.policy.copay_cap.as_deref(), Some("$25 per month"));
    assert!(report.proximity.nearest_center.is_some());
    assert!(report.proximity.average_distance < 999.0);
}

#[test]
fn a_state_without_policy_scores_worst_case_friction() {
    let datasets = AtlasDatasets::sample();
    let mut district = datasets.district("MA-04").expect("district on file").clone();
    district.state_code = "WY".to_string();
    district.state = "Wyoming".to_string();

    let report = build_report(&district, &[], &datasets, false);

    assert_eq!(report.policy.friction_score, 100);
    assert!(report.policy.copay_cap.is_none());
    assert!(report
        .policy
        .limitations
        .iter()
        .any(|line| line.contains("No insulin copay cap policy")));
    assert_eq!(report.metrics.coverage_friction, 100);
}
