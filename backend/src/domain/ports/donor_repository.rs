//! Port for donor persistence.

use async_trait::async_trait;

use crate::domain::{AreaFilter, BloodGroupFilter, Donor, PhoneNumber};

use super::define_port_error;

define_port_error! {
    /// Errors raised by donor repository adapters.
    pub enum DonorRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "donor repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "donor repository query failed: {message}",
        /// The phone number is already registered.
        DuplicatePhone { phone: String } =>
            "donor with phone {phone} already exists",
    }
}

/// Selection criteria for listing donors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DonorQuery {
    pub area: AreaFilter,
    pub blood_group: BloodGroupFilter,
}

impl DonorQuery {
    /// Query matching every donor.
    pub fn everyone() -> Self {
        Self {
            area: AreaFilter::All,
            blood_group: BloodGroupFilter::Any,
        }
    }

    /// Whether `donor` satisfies both dimensions.
    pub fn matches(&self, donor: &Donor) -> bool {
        self.area.matches(&donor.area) && self.blood_group.matches(donor.blood_group)
    }
}

/// Port for reading and writing donor records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DonorRepository: Send + Sync {
    /// Look up a donor by phone number.
    async fn find_by_phone(
        &self,
        phone: &PhoneNumber,
    ) -> Result<Option<Donor>, DonorRepositoryError>;

    /// Insert a new donor.
    ///
    /// Returns [`DonorRepositoryError::DuplicatePhone`] when the phone number
    /// is already present, including when a concurrent insert won the race.
    async fn insert(&self, donor: &Donor) -> Result<(), DonorRepositoryError>;

    /// List donors matching `query`, newest first with phone as tie-breaker.
    async fn list(&self, query: &DonorQuery) -> Result<Vec<Donor>, DonorRepositoryError>;

    /// Delete the donor with this phone number if present.
    ///
    /// Returns whether a record was removed. Deleting an absent donor is not
    /// an error.
    async fn delete(&self, phone: &PhoneNumber) -> Result<bool, DonorRepositoryError>;
}

/// Fixture implementation for tests that do not exercise donor persistence.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureDonorRepository;

#[async_trait]
impl DonorRepository for FixtureDonorRepository {
    async fn find_by_phone(
        &self,
        _phone: &PhoneNumber,
    ) -> Result<Option<Donor>, DonorRepositoryError> {
        Ok(None)
    }

    async fn insert(&self, _donor: &Donor) -> Result<(), DonorRepositoryError> {
        Ok(())
    }

    async fn list(&self, _query: &DonorQuery) -> Result<Vec<Donor>, DonorRepositoryError> {
        Ok(Vec::new())
    }

    async fn delete(&self, _phone: &PhoneNumber) -> Result<bool, DonorRepositoryError> {
        Ok(false)
    }
}
