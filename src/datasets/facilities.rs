//! Facility roster import from HRSA-style CSV exports.

use super::DatasetError;
use crate::domain::{Address, Coordinates, Facility, FacilityKind};
use serde::{Deserialize, Deserializer};
use std::io::Read;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct FacilityRow {
    #[serde(rename = "Site ID")]
    id: String,
    #[serde(rename = "Site Name")]
    name: String,
    #[serde(rename = "Facility Type")]
    facility_type: String,
    #[serde(rename = "Street Address")]
    street: String,
    #[serde(rename = "City")]
    city: String,
    #[serde(rename = "State")]
    state: String,
    #[serde(rename = "ZIP Code")]
    zip_code: String,
    #[serde(rename = "Latitude")]
    latitude: f64,
    #[serde(rename = "Longitude")]
    longitude: f64,
    #[serde(rename = "Services", default, deserialize_with = "empty_string_as_none")]
    services: Option<String>,
    #[serde(rename = "Hours", default, deserialize_with = "empty_string_as_none")]
    hours: Option<String>,
    #[serde(rename = "Phone", default, deserialize_with = "empty_string_as_none")]
    phone: Option<String>,
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|raw| !raw.trim().is_empty()))
}

fn parse_kind(raw: &str, row: usize) -> Result<FacilityKind, DatasetError> {
    let trimmed = raw.trim().to_ascii_lowercase();
    match trimmed.as_str() {
        "fqhc" | "health center" => Ok(FacilityKind::HealthCenter),
        "pharmacy" | "service site" => Ok(FacilityKind::Pharmacy),
        "340b contract pharmacy" | "contract pharmacy" => Ok(FacilityKind::ContractPharmacy),
        _ => Err(DatasetError::FacilityRow {
            row,
            detail: format!("unknown facility type '{raw}'"),
        }),
    }
}

impl FacilityRow {
    fn into_facility(self, row: usize) -> Result<Facility, DatasetError> {
        let kind = parse_kind(&self.facility_type, row)?;
        let services = self
            .services
            .map(|raw| {
                raw.split(';')
                    .map(|service| service.trim().to_string())
                    .filter(|service| !service.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Facility {
            id: self.id,
            name: self.name,
            kind,
            address: Address {
                street: self.street,
                city: self.city,
                state: self.state,
                zip_code: self.zip_code,
                coordinates: Coordinates {
                    lat: self.latitude,
                    lon: self.longitude,
                },
            },
            services,
            hours: self.hours,
            phone: self.phone,
        })
    }
}

/// Parse a facility roster from any reader.
pub fn parse_roster<R: Read>(reader: R) -> Result<Vec<Facility>, DatasetError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut facilities = Vec::new();
    for (index, record) in csv_reader.deserialize::<FacilityRow>().enumerate() {
        let row = record?;
        facilities.push(row.into_facility(index + 1)?);
    }
    Ok(facilities)
}

pub fn roster_from_path(path: &Path) -> Result<Vec<Facility>, DatasetError> {
    let file = std::fs::File::open(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_roster(file)
}
