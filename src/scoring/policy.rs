use crate::domain::{PolicyProvision, StatePolicy};
use serde::Serialize;

/// Friction assessment for one state's copay-cap policy. Higher scores mean
/// more administrative barriers between a constituent and insulin.
#[derive(Debug, Clone, Serialize)]
pub struct PolicyFriction {
    pub score: u8,
    pub benefits: Vec<String>,
    pub limitations: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub policy: Option<StatePolicy>,
}

/// Base friction from the cap amount before provision deductions.
fn cap_tier_score(amount: u32) -> u8 {
    match amount {
        0 => 0,
        1..=25 => 10,
        26..=50 => 25,
        51..=75 => 50,
        _ => 75,
    }
}

const fn provision_deduction(provision: PolicyProvision) -> u8 {
    match provision {
        PolicyProvision::NoPriorAuthorization => 15,
        PolicyProvision::NoStepTherapy => 10,
        PolicyProvision::EmergencyRefills => 5,
        _ => 0,
    }
}

/// Look up a state's policy and derive its friction score.
///
/// An unknown state code degrades to the worst case (score 100 with the
/// standard no-cap limitations) rather than failing.
pub fn friction_score(state_code: &str, policies: &[StatePolicy]) -> PolicyFriction {
    let Some(policy) = policies.iter().find(|policy| policy.state == state_code) else {
        return PolicyFriction {
            score: 100,
            benefits: Vec::new(),
            limitations: vec![
                "No insulin copay cap policy".to_string(),
                "Full cost sharing applies".to_string(),
            ],
            policy: None,
        };
    };

    let mut score = cap_tier_score(policy.copay_cap.amount);
    for provision in &policy.provisions {
        score = score.saturating_sub(provision_deduction(*provision));
    }

    let benefits: Vec<String> = policy
        .provisions
        .iter()
        .filter(|provision| !provision.is_caution())
        .map(|provision| provision.label().to_string())
        .collect();

    let mut limitations = Vec::new();
    if policy.copay_cap.amount > 0 {
        limitations.push(format!(
            "Copay cap: ${} per {}",
            policy.copay_cap.amount,
            policy.copay_cap.period.label()
        ));
    }
    limitations.extend(
        policy
            .provisions
            .iter()
            .filter(|provision| provision.is_caution())
            .map(|provision| provision.label().to_string()),
    );

    PolicyFriction {
        score: score.min(100),
        benefits,
        limitations,
        policy: Some(policy.clone()),
    }
}

/// Aggregate view across all known state policies.
#[derive(Debug, Clone, Serialize)]
pub struct PolicySummary {
    pub total_states: usize,
    pub states_with_caps: usize,
    pub average_copay_cap: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_policy: Option<StatePolicy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub worst_policy: Option<StatePolicy>,
}

pub fn policy_summary(policies: &[StatePolicy]) -> PolicySummary {
    let capped: Vec<&StatePolicy> = policies
        .iter()
        .filter(|policy| policy.copay_cap.amount < 100)
        .collect();
    let average_copay_cap = if capped.is_empty() {
        0
    } else {
        let total: u32 = capped.iter().map(|policy| policy.copay_cap.amount).sum();
        (f64::from(total) / capped.len() as f64).round() as u32
    };

    PolicySummary {
        total_states: policies.len(),
        states_with_caps: capped.len(),
        average_copay_cap,
        best_policy: policies
            .iter()
            .min_by_key(|policy| policy.copay_cap.amount)
            .cloned(),
        worst_policy: policies
            .iter()
            .max_by_key(|policy| policy.copay_cap.amount)
            .cloned(),
    }
}
