//! Domain primitives, services and ports.
//!
//! Purpose: define the donor registry and alert dispatch rules independently
//! of HTTP, SQL and the SMS provider. Adapters depend on this module; it
//! depends on none of them.
//!
//! Public surface:
//! - Error and ErrorCode: transport-agnostic failure payload.
//! - Donor, PhoneNumber, BloodGroup, Area and their filters: registry model.
//! - BloodBank and NewBloodBank: facility directory model.
//! - AlertRequest, DeliveryOutcome, AlertSummary: dispatch bookkeeping.
//! - Services implementing the driving ports in [`ports`].

pub mod ports;

mod alert;
mod alert_dispatch_service;
mod alert_secret;
mod area;
mod blood_bank;
mod blood_bank_service;
mod blood_group;
mod donor;
mod donor_service;
pub mod error;
mod trace_id;

pub use self::alert::{
    AlertRequest, AlertSummary, DeliveryOutcome, DeliveryStatus, invalid_destinations,
};
pub use self::alert_dispatch_service::AlertDispatchService;
pub use self::alert_secret::AlertSecret;
pub use self::area::{Area, AreaFilter, EmptyAreaError};
pub use self::blood_bank::{BloodBank, BloodBankValidationError, Coordinates, NewBloodBank};
pub use self::blood_bank_service::BloodBankService;
pub use self::blood_group::{BloodGroup, BloodGroupFilter, BloodGroupParseError};
pub use self::donor::{Donor, DonorDraft, DonorName, DonorValidationError, PhoneNumber, mask_phone};
pub use self::donor_service::{DonorDirectoryService, DonorRegistrationService};
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
