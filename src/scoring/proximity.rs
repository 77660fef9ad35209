use super::geo::distance_between;
use crate::domain::{Coordinates, Facility};
use serde::Serialize;

/// Sentinel average distance reported when no facilities are supplied.
pub const EMPTY_ROSTER_DISTANCE: f64 = 999.0;

/// Proximity summary for a district against a facility roster.
///
/// `coverage_score` is 0-100 with higher meaning worse access.
#[derive(Debug, Clone, Serialize)]
pub struct ProximityOutcome {
    pub average_distance: f64,
    pub coverage_score: u8,
    pub nearest: Option<Facility>,
}

/// Network-density summary for 340B contract-pharmacy rosters. Scores
/// primarily on facility count with a coarse distance bonus; distinct from
/// the coverage score and selected by callers per use case.
#[derive(Debug, Clone, Serialize)]
pub struct NetworkDensity {
    pub total_facilities: usize,
    pub average_distance: f64,
    pub density_score: u8,
    pub nearest: Option<Facility>,
}

fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn distances(origin: Coordinates, facilities: &[Facility]) -> Vec<f64> {
    facilities
        .iter()
        .map(|facility| distance_between(origin, facility.address.coordinates))
        .collect()
}

/// Nearest facility by minimum distance, first-encountered wins ties.
fn nearest_index(distances: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (index, distance) in distances.iter().enumerate() {
        match best {
            Some((_, best_distance)) if *distance >= best_distance => {}
            _ => best = Some((index, *distance)),
        }
    }
    best.map(|(index, _)| index)
}

/// Rank facilities by distance from `origin` and derive the coverage score.
///
/// Piecewise-linear score over the average distance: 0-5 mi maps to 0-20
/// points, 5-15 mi to 20-60, beyond 15 mi to 60-100 (capped). An empty
/// roster returns the sentinel rather than failing.
pub fn rank_proximity(origin: Coordinates, facilities: &[Facility]) -> ProximityOutcome {
    if facilities.is_empty() {
        return ProximityOutcome {
            average_distance: EMPTY_ROSTER_DISTANCE,
            coverage_score: 0,
            nearest: None,
        };
    }

    let distances = distances(origin, facilities);
    let average = distances.iter().sum::<f64>() / distances.len() as f64;
    let nearest = nearest_index(&distances).map(|index| facilities[index].clone());

    let coverage = if average <= 5.0 {
        (average / 5.0) * 20.0
    } else if average <= 15.0 {
        20.0 + ((average - 5.0) / 10.0) * 40.0
    } else {
        60.0 + (((average - 15.0) / 10.0) * 40.0).min(40.0)
    };

    ProximityOutcome {
        average_distance: round_tenths(average),
        coverage_score: coverage.round() as u8,
        nearest,
    }
}

/// Score a contract-pharmacy roster on count and coarse distance tiers.
pub fn network_density(origin: Coordinates, facilities: &[Facility]) -> NetworkDensity {
    if facilities.is_empty() {
        return NetworkDensity {
            total_facilities: 0,
            average_distance: EMPTY_ROSTER_DISTANCE,
            density_score: 0,
            nearest: None,
        };
    }

    let distances = distances(origin, facilities);
    let average = distances.iter().sum::<f64>() / distances.len() as f64;
    let nearest = nearest_index(&distances).map(|index| facilities[index].clone());

    let mut score: u8 = 0;
    if average <= 2.0 {
        score += 60;
    } else if average <= 5.0 {
        score += 40;
    } else if average <= 10.0 {
        score += 20;
    }

    score += match facilities.len() {
        n if n >= 5 => 40,
        n if n >= 3 => 30,
        2 => 20,
        _ => 10,
    };

    NetworkDensity {
        total_facilities: facilities.len(),
        average_distance: round_tenths(average),
        density_score: score.min(100),
        nearest,
    }
}
