use crate::domain::District;
use crate::domain::InsulinMetrics;
use crate::scoring::{PolicyFriction, ProximityOutcome, RiskLevel, ShortageImpact};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Urgency {
    High,
    Medium,
    Low,
}

/// One suggested constituent action with a contact line where one applies.
#[derive(Debug, Clone, Serialize)]
pub struct PriorityAction {
    pub action: String,
    pub urgency: Urgency,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
}

/// Generated observations and suggested actions for one district.
#[derive(Debug, Clone, Serialize)]
pub struct ActionInsights {
    pub risk_level: RiskLevel,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub observations: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub priority_actions: Vec<PriorityAction>,
}

pub(crate) fn generate_insights(
    district: &District,
    metrics: &InsulinMetrics,
    proximity: &ProximityOutcome,
    friction: &PolicyFriction,
    shortage: &ShortageImpact,
) -> ActionInsights {
    let risk_level = RiskLevel::from_score(metrics.risk_score);
    let representative = &district.representative;

    let mut observations = Vec::new();
    observations.push(format!(
        "Composite insulin access risk is {} ({}) for {}",
        metrics.risk_score,
        risk_level.label(),
        district.name
    ));

    if proximity.nearest.is_some() {
        observations.push(format!(
            "Average distance to a care site is {:.1} miles",
            proximity.average_distance
        ));
    } else {
        observations.push("No care sites on file for this district".to_string());
    }

    if shortage.insulin_shortages > 0 {
        observations.push(format!(
            "{} current insulin shortage(s) nationally, {} affecting this state",
            shortage.insulin_shortages,
            shortage.affected_products.len()
        ));
    }

    if friction.score >= 50 {
        observations.push(
            "State policy leaves substantial cost sharing and administrative barriers".to_string(),
        );
    }

    let mut priority_actions = Vec::new();

    if metrics.coverage_friction >= 50 {
        priority_actions.push(PriorityAction {
            action: "Contact your representative about a copay cap".to_string(),
            urgency: Urgency::High,
            description: format!(
                "{} has supported insulin bills at {}%; ask for a state copay cap with no prior authorization",
                representative.name, representative.voting_record.support_for_insulin_bills
            ),
            contact: Some(format!(
                "{} / {}",
                representative.phone, representative.email
            )),
        });
    }

    if metrics.access_proximity >= 50 {
        let contact = proximity
            .nearest
            .as_ref()
            .and_then(|facility| facility.phone.clone());
        priority_actions.push(PriorityAction {
            action: "Locate the nearest FQHC or 340B pharmacy".to_string(),
            urgency: Urgency::High,
            description: proximity
                .nearest
                .as_ref()
                .map(|facility| {
                    format!(
                        "{} in {} offers sliding-scale insulin services",
                        facility.name, facility.address.city
                    )
                })
                .unwrap_or_else(|| {
                    "No nearby facility on file; check the HRSA find-a-health-center tool"
                        .to_string()
                }),
            contact,
        });
    }

    if shortage.score >= 40 {
        priority_actions.push(PriorityAction {
            action: "Ask your pharmacist about shortage alternatives".to_string(),
            urgency: Urgency::Medium,
            description: format!(
                "Products currently short: {}",
                shortage.affected_products.join(", ")
            ),
            contact: None,
        });
    }

    if representative.voting_record.support_for_insulin_bills < 50 {
        priority_actions.push(PriorityAction {
            action: "Urge support for pending insulin legislation".to_string(),
            urgency: Urgency::Medium,
            description: format!(
                "{} has a {}% support record on insulin bills",
                representative.name, representative.voting_record.support_for_insulin_bills
            ),
            contact: Some(representative.phone.clone()),
        });
    }

    if priority_actions.is_empty() {
        priority_actions.push(PriorityAction {
            action: "Share the district dashboard".to_string(),
            urgency: Urgency::Low,
            description: "Access conditions look stable; spread awareness of local resources"
                .to_string(),
            contact: None,
        });
    }

    ActionInsights {
        risk_level,
        observations,
        priority_actions,
    }
}
