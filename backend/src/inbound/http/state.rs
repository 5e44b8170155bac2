//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    AlertDispatchCommand, BloodBankCatalogue, DonorDirectory, DonorRegistrationCommand,
    FixtureAlertDispatchCommand, FixtureBloodBankCatalogue, FixtureDonorDirectory,
    FixtureDonorRegistrationCommand, FixtureStoreHealth, StoreHealth,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub alerts: Arc<dyn AlertDispatchCommand>,
    pub registration: Arc<dyn DonorRegistrationCommand>,
    pub directory: Arc<dyn DonorDirectory>,
    pub blood_banks: Arc<dyn BloodBankCatalogue>,
    pub store_health: Arc<dyn StoreHealth>,
}

impl HttpState {
    /// State backed entirely by fixture ports.
    ///
    /// Tests override the one port under test with struct update syntax.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use bloodlink::domain::ports::FixtureDonorDirectory;
    /// use bloodlink::inbound::http::state::HttpState;
    ///
    /// let state = HttpState {
    ///     directory: Arc::new(FixtureDonorDirectory),
    ///     ..HttpState::fixtures()
    /// };
    /// let _directory = state.directory.clone();
    /// ```
    pub fn fixtures() -> Self {
        Self {
            alerts: Arc::new(FixtureAlertDispatchCommand),
            registration: Arc::new(FixtureDonorRegistrationCommand),
            directory: Arc::new(FixtureDonorDirectory),
            blood_banks: Arc::new(FixtureBloodBankCatalogue),
            store_health: Arc::new(FixtureStoreHealth),
        }
    }
}
