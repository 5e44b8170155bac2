//! Blood-bank directory service.
//!
//! Implements [`BloodBankCatalogue`] and the one-off seeding used at startup.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tracing::info;
use uuid::Uuid;

use crate::domain::ports::{
    AddBloodBankRequest, BloodBankCatalogue, BloodBankRepository, BloodBankRepositoryError,
};
use crate::domain::{
    Area, AreaFilter, BloodBank, BloodBankValidationError, Coordinates, Error, NewBloodBank,
};

const MISSING_FIELDS_MESSAGE: &str = "All fields are required";
const DUPLICATE_MESSAGE: &str = "Blood bank already exists";

fn map_repository_error(error: BloodBankRepositoryError) -> Error {
    match error {
        BloodBankRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("blood bank repository unavailable: {message}"))
        }
        BloodBankRepositoryError::Query { message } => {
            Error::internal(format!("blood bank repository error: {message}"))
        }
        BloodBankRepositoryError::Duplicate { .. } => Error::conflict(DUPLICATE_MESSAGE),
    }
}

fn missing_field(field: &str) -> Error {
    Error::invalid_request(MISSING_FIELDS_MESSAGE)
        .with_details(json!({ "field": field, "code": "missing_field" }))
}

fn map_validation_error(error: &BloodBankValidationError) -> Error {
    match error {
        BloodBankValidationError::MissingField { field } => missing_field(field),
        BloodBankValidationError::Latitude { .. } => {
            Error::invalid_request("Latitude must be between -90 and 90")
                .with_details(json!({ "field": "lat", "code": "out_of_range" }))
        }
        BloodBankValidationError::Longitude { .. } => {
            Error::invalid_request("Longitude must be between -180 and 180")
                .with_details(json!({ "field": "lng", "code": "out_of_range" }))
        }
    }
}

fn parse_blood_bank(request: AddBloodBankRequest) -> Result<NewBloodBank, Error> {
    let AddBloodBankRequest {
        name,
        address,
        phone,
        lat,
        lng,
        area,
    } = request;

    let latitude = lat.ok_or_else(|| missing_field("lat"))?;
    let longitude = lng.ok_or_else(|| missing_field("lng"))?;
    let area = Area::new(area).map_err(|_| missing_field("area"))?;
    let coordinates =
        Coordinates::new(latitude, longitude).map_err(|err| map_validation_error(&err))?;

    NewBloodBank::new(name, address, phone, coordinates, area)
        .map_err(|err| map_validation_error(&err))
}

/// Blood-bank service implementing [`BloodBankCatalogue`].
#[derive(Clone)]
pub struct BloodBankService<R> {
    blood_bank_repo: Arc<R>,
}

impl<R> BloodBankService<R> {
    /// Create a service over the blood-bank repository.
    pub fn new(blood_bank_repo: Arc<R>) -> Self {
        Self { blood_bank_repo }
    }
}

impl<R> BloodBankService<R>
where
    R: BloodBankRepository,
{
    /// Insert `banks` when the store holds no blood banks.
    ///
    /// Returns whether anything was written. A non-empty store is left as is.
    pub async fn seed_if_empty(&self, banks: Vec<NewBloodBank>) -> Result<bool, Error> {
        let existing = self
            .blood_bank_repo
            .count()
            .await
            .map_err(map_repository_error)?;
        if existing > 0 {
            info!(existing, "blood bank store already populated; skipping seed");
            return Ok(false);
        }

        let records: Vec<BloodBank> = banks
            .into_iter()
            .map(|bank| bank.into_blood_bank(Uuid::new_v4()))
            .collect();
        self.blood_bank_repo
            .insert_all(&records)
            .await
            .map_err(map_repository_error)?;
        info!(count = records.len(), "seeded blood banks");
        Ok(true)
    }
}

#[async_trait]
impl<R> BloodBankCatalogue for BloodBankService<R>
where
    R: BloodBankRepository,
{
    async fn list_blood_banks(&self, area: Option<String>) -> Result<Vec<BloodBank>, Error> {
        let filter = AreaFilter::from_query(area.as_deref());
        self.blood_bank_repo
            .list(&filter)
            .await
            .map_err(map_repository_error)
    }

    async fn add_blood_bank(&self, request: AddBloodBankRequest) -> Result<BloodBank, Error> {
        let bank = parse_blood_bank(request)?;

        let exists = self
            .blood_bank_repo
            .exists(bank.name(), bank.address())
            .await
            .map_err(map_repository_error)?;
        if exists {
            return Err(Error::conflict(DUPLICATE_MESSAGE));
        }

        let record = bank.into_blood_bank(Uuid::new_v4());
        self.blood_bank_repo
            .insert(&record)
            .await
            .map_err(map_repository_error)?;
        info!(id = %record.id, area = %record.area, "blood bank added");
        Ok(record)
    }
}

#[cfg(test)]
#[path = "blood_bank_service_tests.rs"]
mod tests;
