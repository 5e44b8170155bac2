//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: every HTTP endpoint in the inbound layer (donors, alerts,
//!   blood banks, health)
//! - **Schemas**: the domain records returned by the API and the request and
//!   response bodies owned by the handlers
//!
//! The generated specification is served by Swagger UI in debug builds.

use utoipa::OpenApi;

use crate::domain::{BloodBank, BloodGroup, Donor, Error, ErrorCode};
use crate::inbound::http::alerts::{SendAlertBody, SendAlertResponseBody};
use crate::inbound::http::blood_banks::AddBloodBankBody;
use crate::inbound::http::donors::RegisterDonorBody;
use crate::inbound::http::health::{DatabaseStatus, HealthDocument};
use crate::inbound::http::schemas::MessageResponse;

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bloodlink API",
        description = "Donor registry, blood-bank directory and emergency SMS alerts."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::donors::register_donor,
        crate::inbound::http::donors::list_donors,
        crate::inbound::http::donors::delete_donor,
        crate::inbound::http::alerts::send_alert,
        crate::inbound::http::blood_banks::list_blood_banks,
        crate::inbound::http::blood_banks::add_blood_bank,
        crate::inbound::http::health::api_health,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Donor,
        BloodGroup,
        BloodBank,
        Error,
        ErrorCode,
        RegisterDonorBody,
        SendAlertBody,
        SendAlertResponseBody,
        AddBloodBankBody,
        MessageResponse,
        HealthDocument,
        DatabaseStatus,
    )),
    tags(
        (name = "donors", description = "Donor registration and directory"),
        (name = "alerts", description = "Emergency SMS alerts to matching donors"),
        (name = "blood-banks", description = "Blood-bank directory"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
