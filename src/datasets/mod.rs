//! Dataset loading for the atlas.
//!
//! Reference data comes from static JSON files in a configurable directory,
//! with facility rosters importable from HRSA-style CSV exports. Any
//! collection missing on disk falls back to the embedded sample data so the
//! service always has something to render.

pub mod facilities;
pub mod sample;

pub use facilities::{parse_roster, roster_from_path};

use crate::domain::{Alert, District, DrugShortage, Facility, StatePolicy};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, thiserror::Error)]
pub enum DatasetError {
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed JSON in {path}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("malformed facility roster")]
    Csv(#[from] csv::Error),
    #[error("facility roster row {row}: {detail}")]
    FacilityRow { row: usize, detail: String },
    #[error("unknown district '{0}'")]
    UnknownDistrict(String),
}

#[derive(Debug, Deserialize)]
struct DistrictsFile {
    districts: Vec<District>,
}

/// Fully materialized reference data for one request cycle. Immutable once
/// loaded; every scoring pass recomputes from these collections.
#[derive(Debug, Clone)]
pub struct AtlasDatasets {
    pub districts: Vec<District>,
    pub facilities: Vec<Facility>,
    pub policies: Vec<StatePolicy>,
    pub shortages: Vec<DrugShortage>,
    pub alerts: Vec<Alert>,
}

impl AtlasDatasets {
    /// Embedded demo data, used when no data directory is configured.
    pub fn sample() -> Self {
        Self {
            districts: sample::districts(),
            facilities: sample::facilities(),
            policies: sample::policies(),
            shortages: sample::shortages(),
            alerts: sample::alerts(),
        }
    }

    /// Load datasets from a directory, falling back to samples per
    /// collection when a file is absent. Present-but-malformed files are
    /// an error; silent corruption would poison every score downstream.
    pub fn load(dir: &Path) -> Result<Self, DatasetError> {
        let districts = match load_json::<DistrictsFile>(&dir.join("districts.json"))? {
            Some(file) => file.districts,
            None => sample::districts(),
        };
        let facilities = {
            let path = dir.join("facilities.csv");
            if path.exists() {
                roster_from_path(&path)?
            } else {
                sample::facilities()
            }
        };
        let policies =
            load_json(&dir.join("state-policies.json"))?.unwrap_or_else(sample::policies);
        let shortages =
            load_json(&dir.join("drug-shortages.json"))?.unwrap_or_else(sample::shortages);
        let alerts = load_json(&dir.join("alerts.json"))?.unwrap_or_else(sample::alerts);

        Ok(Self {
            districts,
            facilities,
            policies,
            shortages,
            alerts,
        })
    }

    pub fn district(&self, id: &str) -> Result<&District, DatasetError> {
        self.districts
            .iter()
            .find(|district| district.id.eq_ignore_ascii_case(id))
            .ok_or_else(|| DatasetError::UnknownDistrict(id.to_string()))
    }

    /// Reference facilities in a district's state.
    pub fn facilities_in_state(&self, state_code: &str) -> Vec<Facility> {
        self.facilities
            .iter()
            .filter(|facility| facility.address.state.eq_ignore_ascii_case(state_code))
            .cloned()
            .collect()
    }
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, DatasetError> {
    if !path.exists() {
        debug!(path = %path.display(), "dataset file absent, using embedded sample");
        return Ok(None);
    }
    let raw = std::fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value = serde_json::from_str(&raw).map_err(|source| DatasetError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{sort_districts, DistrictSortKey, SortDirection};
    use std::io::Write;

    #[test]
    fn sample_datasets_are_internally_consistent() {
        let datasets = AtlasDatasets::sample();
        assert_eq!(datasets.districts.len(), 3);
        assert!(datasets.district("ma-04").is_ok(), "lookup ignores case");
        assert!(matches!(
            datasets.district("ZZ-99"),
            Err(DatasetError::UnknownDistrict(_))
        ));
        assert_eq!(datasets.facilities_in_state("MA").len(), 5);
        assert!(datasets.facilities_in_state("WY").is_empty());
    }

    #[test]
    fn districts_sort_by_risk_score_descending() {
        let mut districts = AtlasDatasets::sample().districts;
        sort_districts(
            &mut districts,
            DistrictSortKey::RiskScore,
            SortDirection::Descending,
        );
        assert_eq!(districts[0].id, "GA-07");
        assert_eq!(districts[2].id, "CA-16");
    }

    #[test]
    fn missing_directory_files_fall_back_to_samples() {
        let dir = tempfile::tempdir().expect("tempdir");
        let datasets = AtlasDatasets::load(dir.path()).expect("load with fallbacks");
        assert_eq!(datasets.districts.len(), 3);
        assert_eq!(datasets.policies.len(), 5);
    }

    #[test]
    fn malformed_json_is_an_error_not_a_fallback() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("state-policies.json");
        let mut file = std::fs::File::create(&path).expect("create file");
        file.write_all(b"{ not json").expect("write");
        assert!(matches!(
            AtlasDatasets::load(dir.path()),
            Err(DatasetError::Json { .. })
        ));
    }

    #[test]
    fn districts_file_round_trips_through_json() {
        let dir = tempfile::tempdir().expect("tempdir");
        let districts = sample::districts();
        let payload = serde_json::json!({ "districts": districts });
        std::fs::write(
            dir.path().join("districts.json"),
            serde_json::to_string(&payload).expect("serialize"),
        )
        .expect("write districts");

        let datasets = AtlasDatasets::load(dir.path()).expect("load");
        assert_eq!(datasets.districts.len(), districts.len());
        assert_eq!(
            datasets.district("GA-07").expect("district").metrics,
            districts[2].metrics
        );
    }
}
