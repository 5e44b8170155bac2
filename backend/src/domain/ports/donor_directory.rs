//! Driving port for the donor directory and administrative removal.

use async_trait::async_trait;

use crate::domain::{Donor, Error};

/// Optional filters for the directory listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListDonorsRequest {
    pub area: Option<String>,
    pub blood_group: Option<String>,
}

/// Driving port for reading and pruning the donor registry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DonorDirectory: Send + Sync {
    /// List donors, newest first.
    ///
    /// Absent filters, `"All"` areas and `"Any"` blood groups are
    /// unfiltered. An unknown blood group is `InvalidRequest`.
    async fn list_donors(&self, request: ListDonorsRequest) -> Result<Vec<Donor>, Error>;

    /// Remove a donor by phone number. Succeeds whether or not it existed.
    async fn remove_donor(&self, phone: String) -> Result<(), Error>;
}

/// Fixture directory with no donors.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureDonorDirectory;

#[async_trait]
impl DonorDirectory for FixtureDonorDirectory {
    async fn list_donors(&self, _request: ListDonorsRequest) -> Result<Vec<Donor>, Error> {
        Ok(Vec::new())
    }

    async fn remove_donor(&self, _phone: String) -> Result<(), Error> {
        Ok(())
    }
}
