//! Emergency alert HTTP handler.
//!
//! ```text
//! POST /api/send-alert
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{SendAlertRequest, SendAlertResponse};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Alert form submitted by hospital staff.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendAlertBody {
    #[schema(example = "Ruby Hall Clinic")]
    pub hospital_name: Option<String>,
    /// Area name, or `All`.
    #[schema(example = "Kothrud")]
    pub area: Option<String>,
    /// Blood group label, or `Any`.
    #[schema(example = "O-")]
    pub blood_group: Option<String>,
    pub additional_info: Option<String>,
    /// Shared hospital alert password.
    pub password: Option<String>,
}

impl From<SendAlertBody> for SendAlertRequest {
    fn from(body: SendAlertBody) -> Self {
        Self {
            hospital_name: body.hospital_name.unwrap_or_default(),
            area: body.area.unwrap_or_default(),
            blood_group: body.blood_group.unwrap_or_default(),
            additional_info: body.additional_info,
            password: body.password,
        }
    }
}

/// Dispatch summary. `failedNumbers` is omitted when every send succeeded.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendAlertResponseBody {
    #[schema(example = "Alert sent to 3 donor(s). 1 failed.")]
    pub message: String,
    pub successful_sends: usize,
    pub failed_sends: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub failed_numbers: Vec<String>,
}

impl From<SendAlertResponse> for SendAlertResponseBody {
    fn from(response: SendAlertResponse) -> Self {
        Self {
            message: response.message,
            successful_sends: response.successful_sends,
            failed_sends: response.failed_sends,
            failed_numbers: response
                .failed_numbers
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Send an emergency SMS alert to matching donors.
#[utoipa::path(
    post,
    path = "/api/send-alert",
    request_body = SendAlertBody,
    responses(
        (status = 200, description = "Alert dispatched, possibly with partial failures", body = SendAlertResponseBody),
        (status = 400, description = "Missing field or unknown blood group", body = crate::domain::Error),
        (status = 401, description = "Invalid password", body = crate::domain::Error),
        (status = 404, description = "No matching donors", body = crate::domain::Error),
        (status = 500, description = "Internal server error", body = crate::domain::Error),
        (status = 503, description = "Donor store unavailable", body = crate::domain::Error)
    ),
    tags = ["alerts"],
    operation_id = "sendAlert"
)]
#[post("/api/send-alert")]
pub async fn send_alert(
    state: web::Data<HttpState>,
    payload: web::Json<SendAlertBody>,
) -> ApiResult<web::Json<SendAlertResponseBody>> {
    let response = state.alerts.dispatch(payload.into_inner().into()).await?;
    Ok(web::Json(response.into()))
}

#[cfg(test)]
#[path = "alerts_tests.rs"]
mod tests;
