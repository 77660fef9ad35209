use crate::domain::{DrugShortage, ShortageSeverity, ShortageStatus};
use serde::Serialize;

/// Supply-disruption assessment for one state. Higher scores mean worse
/// availability.
#[derive(Debug, Clone, Serialize)]
pub struct ShortageImpact {
    pub total_shortages: usize,
    pub current_shortages: usize,
    pub insulin_shortages: usize,
    pub score: u8,
    pub affected_products: Vec<String>,
}

const fn severity_points(severity: ShortageSeverity) -> u8 {
    match severity {
        ShortageSeverity::High => 30,
        ShortageSeverity::Medium => 20,
        ShortageSeverity::Low => 10,
    }
}

fn affects_state(shortage: &DrugShortage, state: &str) -> bool {
    let needle = state.to_lowercase();
    shortage
        .affected_areas
        .iter()
        .any(|area| area == "Nationwide" || area.to_lowercase().contains(&needle))
}

/// Score insulin supply disruption for a state or region name.
///
/// Only current shortages whose drug name contains "insulin" count. Any such
/// shortage anywhere contributes a 20-point base; shortages whose affected
/// areas include `Nationwide` or match the state add severity points, with
/// the sum capped at 100. No shortages degrade to a zero score, not an error.
pub fn shortage_impact(state: &str, shortages: &[DrugShortage]) -> ShortageImpact {
    let current_insulin: Vec<&DrugShortage> = shortages
        .iter()
        .filter(|shortage| {
            shortage.status == ShortageStatus::Current
                && shortage.drug_name.to_lowercase().contains("insulin")
        })
        .collect();

    let affecting: Vec<&DrugShortage> = current_insulin
        .iter()
        .copied()
        .filter(|shortage| affects_state(shortage, state))
        .collect();

    let mut score: u16 = 0;
    if !current_insulin.is_empty() {
        score += 20;
    }
    for shortage in &affecting {
        score += u16::from(severity_points(shortage.severity));
    }

    ShortageImpact {
        total_shortages: shortages.len(),
        current_shortages: shortages
            .iter()
            .filter(|shortage| shortage.status == ShortageStatus::Current)
            .count(),
        insulin_shortages: current_insulin.len(),
        score: score.min(100) as u8,
        affected_products: affecting
            .iter()
            .map(|shortage| shortage.drug_name.clone())
            .collect(),
    }
}
