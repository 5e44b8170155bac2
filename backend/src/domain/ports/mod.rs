//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod alert_dispatch_command;
mod alert_metrics;
mod blood_bank_catalogue;
mod blood_bank_repository;
mod donor_directory;
mod donor_registration_command;
mod donor_repository;
mod sms_gateway;
mod store_health;

#[cfg(test)]
pub use alert_dispatch_command::MockAlertDispatchCommand;
pub use alert_dispatch_command::{
    AlertDispatchCommand, FixtureAlertDispatchCommand, SendAlertRequest, SendAlertResponse,
};
pub use alert_metrics::{AlertMetrics, AlertMetricsError, NoOpAlertMetrics};
#[cfg(test)]
pub use blood_bank_catalogue::MockBloodBankCatalogue;
pub use blood_bank_catalogue::{
    AddBloodBankRequest, BloodBankCatalogue, FixtureBloodBankCatalogue,
};
#[cfg(test)]
pub use blood_bank_repository::MockBloodBankRepository;
pub use blood_bank_repository::{
    BloodBankRepository, BloodBankRepositoryError, FixtureBloodBankRepository,
};
#[cfg(test)]
pub use donor_directory::MockDonorDirectory;
pub use donor_directory::{DonorDirectory, FixtureDonorDirectory, ListDonorsRequest};
#[cfg(test)]
pub use donor_registration_command::MockDonorRegistrationCommand;
pub use donor_registration_command::{
    DonorRegistrationCommand, FixtureDonorRegistrationCommand, RegisterDonorRequest,
};
#[cfg(test)]
pub use donor_repository::MockDonorRepository;
pub use donor_repository::{
    DonorQuery, DonorRepository, DonorRepositoryError, FixtureDonorRepository,
};
#[cfg(test)]
pub use sms_gateway::MockSmsGateway;
pub use sms_gateway::{FixtureSmsGateway, SmsGateway, SmsGatewayError, SmsReceipt};
#[cfg(test)]
pub use store_health::MockStoreHealth;
pub use store_health::{FixtureStoreHealth, StoreHealth, StoreHealthError};
