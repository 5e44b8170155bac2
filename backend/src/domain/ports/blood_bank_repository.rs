//! Port for blood-bank persistence.

use async_trait::async_trait;

use crate::domain::{AreaFilter, BloodBank};

use super::define_port_error;

define_port_error! {
    /// Errors raised by blood-bank repository adapters.
    pub enum BloodBankRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "blood bank repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "blood bank repository query failed: {message}",
        /// A blood bank with the same name and address exists.
        Duplicate { name: String } =>
            "blood bank {name} already exists at this address",
    }
}

/// Port for reading and writing blood-bank records.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BloodBankRepository: Send + Sync {
    /// List blood banks in `area`, ordered by name.
    async fn list(&self, area: &AreaFilter) -> Result<Vec<BloodBank>, BloodBankRepositoryError>;

    /// Whether a blood bank with this exact name and address exists.
    async fn exists(&self, name: &str, address: &str) -> Result<bool, BloodBankRepositoryError>;

    /// Insert one blood bank.
    ///
    /// Returns [`BloodBankRepositoryError::Duplicate`] when the
    /// `(name, address)` pair is taken.
    async fn insert(&self, bank: &BloodBank) -> Result<(), BloodBankRepositoryError>;

    /// Number of stored blood banks.
    async fn count(&self) -> Result<u64, BloodBankRepositoryError>;

    /// Insert every bank atomically; nothing is written on failure.
    async fn insert_all(&self, banks: &[BloodBank]) -> Result<(), BloodBankRepositoryError>;
}

/// Fixture implementation for tests that do not exercise blood-bank storage.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureBloodBankRepository;

#[async_trait]
impl BloodBankRepository for FixtureBloodBankRepository {
    async fn list(&self, _area: &AreaFilter) -> Result<Vec<BloodBank>, BloodBankRepositoryError> {
        Ok(Vec::new())
    }

    async fn exists(&self, _name: &str, _address: &str) -> Result<bool, BloodBankRepositoryError> {
        Ok(false)
    }

    async fn insert(&self, _bank: &BloodBank) -> Result<(), BloodBankRepositoryError> {
        Ok(())
    }

    async fn count(&self) -> Result<u64, BloodBankRepositoryError> {
        Ok(0)
    }

    async fn insert_all(&self, _banks: &[BloodBank]) -> Result<(), BloodBankRepositoryError> {
        Ok(())
    }
}
