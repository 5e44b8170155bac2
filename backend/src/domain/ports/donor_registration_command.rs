//! Driving port for donor self-registration.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::Error;

/// Registration form fields, unvalidated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterDonorRequest {
    pub name: String,
    pub area: String,
    pub phone: String,
    pub blood_group: String,
}

/// Driving port for registering donors.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DonorRegistrationCommand: Send + Sync {
    /// Validate and persist a donor.
    ///
    /// Errors: `InvalidRequest` for missing fields, a malformed phone number
    /// or an unknown blood group; `Conflict` when the phone is taken.
    async fn register(&self, request: RegisterDonorRequest) -> Result<(), Error>;
}

/// Fixture command that accepts every registration.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureDonorRegistrationCommand;

#[async_trait]
impl DonorRegistrationCommand for FixtureDonorRegistrationCommand {
    async fn register(&self, _request: RegisterDonorRequest) -> Result<(), Error> {
        Ok(())
    }
}
