//! Driving port for emergency alert dispatch.
//!
//! Requests arrive as raw strings so that the dispatcher can check the
//! password before looking at any other field.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::alert_dispatch_service::UNAUTHORIZED_MESSAGE;
use crate::domain::{Error, PhoneNumber};

/// Alert parameters as submitted by a hospital.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendAlertRequest {
    pub hospital_name: String,
    pub area: String,
    pub blood_group: String,
    pub additional_info: Option<String>,
    pub password: Option<String>,
}

/// Aggregate result of a dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendAlertResponse {
    pub message: String,
    pub successful_sends: usize,
    pub failed_sends: usize,
    pub failed_numbers: Vec<PhoneNumber>,
}

/// Driving port for sending an alert to matching donors.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AlertDispatchCommand: Send + Sync {
    /// Authorise, select recipients, send, prune and summarise.
    ///
    /// Errors: `Unauthorized` for a bad password, `InvalidRequest` for
    /// missing or malformed fields, `NotFound` when no donor matches, and
    /// `ServiceUnavailable`/`InternalError` when the donor store fails.
    /// Individual send failures are reported in the response, not as errors.
    async fn dispatch(&self, request: SendAlertRequest) -> Result<SendAlertResponse, Error>;
}

/// Fixture dispatcher with no alert password configured.
///
/// Like the real dispatcher without a secret, it rejects every request as
/// unauthorised and sends nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureAlertDispatchCommand;

#[async_trait]
impl AlertDispatchCommand for FixtureAlertDispatchCommand {
    async fn dispatch(&self, _request: SendAlertRequest) -> Result<SendAlertResponse, Error> {
        Err(Error::unauthorized(UNAUTHORIZED_MESSAGE))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    #[case(Some("anything"))]
    #[tokio::test]
    async fn fixture_rejects_every_password(#[case] password: Option<&str>) {
        let error = FixtureAlertDispatchCommand
            .dispatch(SendAlertRequest {
                hospital_name: "Ruby Hall Clinic".to_owned(),
                area: "All".to_owned(),
                blood_group: "Any".to_owned(),
                additional_info: None,
                password: password.map(str::to_owned),
            })
            .await
            .expect_err("fixture has no secret");

        assert_eq!(error.code(), ErrorCode::Unauthorized);
    }
}
