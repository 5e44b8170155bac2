//! Blood-bank facility records.
//!
//! Blood banks are read-mostly: a fixed list is seeded when the store is
//! empty and hospitals may add further entries. `(name, address)` is unique.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::Area;

/// Validation failures for blood-bank input.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum BloodBankValidationError {
    /// A required text field was blank.
    #[error("{field} must not be empty")]
    MissingField { field: &'static str },
    /// Latitude was NaN, infinite or outside [-90, 90].
    #[error("latitude {value} is out of range")]
    Latitude { value: f64 },
    /// Longitude was NaN, infinite or outside [-180, 180].
    #[error("longitude {value} is out of range")]
    Longitude { value: f64 },
}

/// Validated WGS84 position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    /// Validate a latitude/longitude pair.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, BloodBankValidationError> {
        if !latitude.is_finite() || !(-90.0..=90.0).contains(&latitude) {
            return Err(BloodBankValidationError::Latitude { value: latitude });
        }
        if !longitude.is_finite() || !(-180.0..=180.0).contains(&longitude) {
            return Err(BloodBankValidationError::Longitude { value: longitude });
        }
        Ok(Self {
            latitude,
            longitude,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

/// Blood bank to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewBloodBank {
    name: String,
    address: String,
    phone: String,
    coordinates: Coordinates,
    area: Area,
}

impl NewBloodBank {
    /// Validate the text fields and assemble a record ready for insertion.
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        phone: impl Into<String>,
        coordinates: Coordinates,
        area: Area,
    ) -> Result<Self, BloodBankValidationError> {
        let name = require("name", name.into())?;
        let address = require("address", address.into())?;
        let phone = require("phone", phone.into())?;
        Ok(Self {
            name,
            address,
            phone,
            coordinates,
            area,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    pub fn area(&self) -> &Area {
        &self.area
    }

    /// Assign a storage identifier.
    pub fn into_blood_bank(self, id: Uuid) -> BloodBank {
        BloodBank {
            id,
            name: self.name,
            address: self.address,
            phone: self.phone,
            latitude: self.coordinates.latitude,
            longitude: self.coordinates.longitude,
            area: self.area,
        }
    }
}

fn require(field: &'static str, value: String) -> Result<String, BloodBankValidationError> {
    if value.trim().is_empty() {
        return Err(BloodBankValidationError::MissingField { field });
    }
    Ok(value)
}

/// Stored blood bank as exposed by the directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BloodBank {
    pub id: Uuid,
    #[schema(example = "Ruby Hall Clinic Blood Bank")]
    pub name: String,
    #[schema(example = "40, Sassoon Road, Pune, Maharashtra 411001")]
    pub address: String,
    #[schema(example = "+91-20-26122101")]
    pub phone: String,
    #[serde(rename = "lat")]
    #[schema(example = 18.5204)]
    pub latitude: f64,
    #[serde(rename = "lng")]
    #[schema(example = 73.8567)]
    pub longitude: f64,
    #[schema(value_type = String, example = "Shivajinagar")]
    pub area: Area,
}
