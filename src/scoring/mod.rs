//! Stateless scoring core for the atlas.
//!
//! Every function here is a pure transform over fully materialized inputs:
//! no I/O, no shared state, no ordering dependency between invocations.
//! Degenerate inputs produce documented sentinels or worst-case scores,
//! never errors.

pub mod category;
pub mod geo;
pub mod normalize;
pub mod policy;
pub mod proximity;
pub mod risk;
pub mod shortage;

pub use category::{score_all, score_breakdown, CategoryBreakdown, CategoryScores, ScorecardMetrics};
pub use geo::{distance_between, distance_miles};
pub use normalize::{normalize, Indicator, Polarity};
pub use policy::{friction_score, policy_summary, PolicyFriction, PolicySummary};
pub use proximity::{network_density, rank_proximity, NetworkDensity, ProximityOutcome};
pub use risk::{insulin_metrics, insulin_risk, overall_risk, RiskLevel};
pub use shortage::{shortage_impact, ShortageImpact};
