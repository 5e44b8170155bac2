//! Donor registration and directory services.
//!
//! These services implement the registration command and the directory
//! driving port on top of [`DonorRepository`].

use std::sync::Arc;

use async_trait::async_trait;
use mockable::Clock;
use serde_json::json;
use tracing::info;

use crate::domain::ports::{
    DonorDirectory, DonorQuery, DonorRegistrationCommand, DonorRepository, DonorRepositoryError,
    ListDonorsRequest, RegisterDonorRequest,
};
use crate::domain::{
    Area, AreaFilter, BloodGroup, BloodGroupFilter, Donor, DonorDraft, DonorName, Error,
    PhoneNumber,
};

const MISSING_FIELDS_MESSAGE: &str = "All fields are required";
const INVALID_PHONE_MESSAGE: &str =
    "Please enter a valid 10-digit Indian phone number (e.g., +919322659210)";
const INVALID_BLOOD_GROUP_MESSAGE: &str =
    "Blood group must be one of A+, A-, B+, B-, AB+, AB-, O+, O-";
const DUPLICATE_PHONE_MESSAGE: &str = "Phone number already registered";

pub(crate) fn map_donor_repository_error(error: DonorRepositoryError) -> Error {
    match error {
        DonorRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("donor repository unavailable: {message}"))
        }
        DonorRepositoryError::Query { message } => {
            Error::internal(format!("donor repository error: {message}"))
        }
        DonorRepositoryError::DuplicatePhone { .. } => Error::conflict(DUPLICATE_PHONE_MESSAGE),
    }
}

fn field_error(message: &str, field: &str, code: &str) -> Error {
    Error::invalid_request(message).with_details(json!({ "field": field, "code": code }))
}

fn parse_registration(request: RegisterDonorRequest) -> Result<DonorDraft, Error> {
    let RegisterDonorRequest {
        name,
        area,
        phone,
        blood_group,
    } = request;

    for (field, value) in [
        ("name", &name),
        ("area", &area),
        ("phone", &phone),
        ("bloodGroup", &blood_group),
    ] {
        if value.trim().is_empty() {
            return Err(field_error(MISSING_FIELDS_MESSAGE, field, "missing_field"));
        }
    }

    let name = DonorName::new(name)
        .map_err(|_| field_error(MISSING_FIELDS_MESSAGE, "name", "missing_field"))?;
    let area =
        Area::new(area).map_err(|_| field_error(MISSING_FIELDS_MESSAGE, "area", "missing_field"))?;
    let phone = PhoneNumber::new(phone)
        .map_err(|_| field_error(INVALID_PHONE_MESSAGE, "phone", "invalid_phone"))?;
    let blood_group = blood_group.parse::<BloodGroup>().map_err(|_| {
        field_error(INVALID_BLOOD_GROUP_MESSAGE, "bloodGroup", "invalid_blood_group")
    })?;

    Ok(DonorDraft {
        name,
        area,
        phone,
        blood_group,
    })
}

/// Registration service implementing [`DonorRegistrationCommand`].
#[derive(Clone)]
pub struct DonorRegistrationService<R> {
    donor_repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> DonorRegistrationService<R> {
    /// Create a registration service stamping donors with `clock`.
    pub fn new(donor_repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { donor_repo, clock }
    }
}

#[async_trait]
impl<R> DonorRegistrationCommand for DonorRegistrationService<R>
where
    R: DonorRepository,
{
    async fn register(&self, request: RegisterDonorRequest) -> Result<(), Error> {
        let draft = parse_registration(request)?;

        // The unique index still guards against a concurrent insert.
        let existing = self
            .donor_repo
            .find_by_phone(&draft.phone)
            .await
            .map_err(map_donor_repository_error)?;
        if existing.is_some() {
            return Err(Error::conflict(DUPLICATE_PHONE_MESSAGE));
        }

        let donor = draft.into_donor(self.clock.utc());
        self.donor_repo
            .insert(&donor)
            .await
            .map_err(map_donor_repository_error)?;

        info!(
            phone = %donor.phone.masked(),
            area = %donor.area,
            blood_group = %donor.blood_group,
            "donor registered"
        );
        Ok(())
    }
}

/// Directory service implementing [`DonorDirectory`].
#[derive(Clone)]
pub struct DonorDirectoryService<R> {
    donor_repo: Arc<R>,
}

impl<R> DonorDirectoryService<R> {
    /// Create a directory service over the donor repository.
    pub fn new(donor_repo: Arc<R>) -> Self {
        Self { donor_repo }
    }
}

#[async_trait]
impl<R> DonorDirectory for DonorDirectoryService<R>
where
    R: DonorRepository,
{
    async fn list_donors(&self, request: ListDonorsRequest) -> Result<Vec<Donor>, Error> {
        let blood_group = BloodGroupFilter::from_query(request.blood_group.as_deref())
            .map_err(|_| {
                field_error(
                    "Blood group must be one of A+, A-, B+, B-, AB+, AB-, O+, O- or Any",
                    "bloodGroup",
                    "invalid_blood_group",
                )
            })?;
        let query = DonorQuery {
            area: AreaFilter::from_query(request.area.as_deref()),
            blood_group,
        };

        self.donor_repo
            .list(&query)
            .await
            .map_err(map_donor_repository_error)
    }

    async fn remove_donor(&self, phone: String) -> Result<(), Error> {
        // A malformed number cannot be registered, so there is nothing to delete.
        let Ok(phone) = PhoneNumber::new(phone) else {
            return Ok(());
        };

        let removed = self
            .donor_repo
            .delete(&phone)
            .await
            .map_err(map_donor_repository_error)?;
        info!(phone = %phone.masked(), removed, "donor removal requested");
        Ok(())
    }
}

#[cfg(test)]
#[path = "donor_service_tests.rs"]
mod tests;
