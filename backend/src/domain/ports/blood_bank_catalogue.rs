//! Driving port for the blood-bank directory.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::{BloodBank, Error};

/// New blood-bank fields, unvalidated.
///
/// Coordinates are optional here so that a missing value surfaces as a
/// validation error rather than a decoding failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddBloodBankRequest {
    pub name: String,
    pub address: String,
    pub phone: String,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub area: String,
}

/// Driving port for listing and adding blood banks.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BloodBankCatalogue: Send + Sync {
    /// List blood banks, optionally restricted to one area.
    async fn list_blood_banks(&self, area: Option<String>) -> Result<Vec<BloodBank>, Error>;

    /// Validate and add a blood bank.
    ///
    /// Errors: `InvalidRequest` for missing fields or out-of-range
    /// coordinates; `Conflict` when the name and address are taken.
    async fn add_blood_bank(&self, request: AddBloodBankRequest) -> Result<BloodBank, Error>;
}

/// Fixture catalogue with no entries that rejects additions.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureBloodBankCatalogue;

#[async_trait]
impl BloodBankCatalogue for FixtureBloodBankCatalogue {
    async fn list_blood_banks(&self, _area: Option<String>) -> Result<Vec<BloodBank>, Error> {
        Ok(Vec::new())
    }

    async fn add_blood_bank(&self, _request: AddBloodBankRequest) -> Result<BloodBank, Error> {
        Err(Error::service_unavailable("blood bank catalogue is not configured"))
    }
}
