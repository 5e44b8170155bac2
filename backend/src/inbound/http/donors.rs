//! Donor registry HTTP handlers.
//!
//! ```text
//! POST   /api/register-donor
//! GET    /api/donors?area=&bloodGroup=
//! DELETE /api/donor/{phone}
//! ```

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::Donor;
use crate::domain::ports::{ListDonorsRequest, RegisterDonorRequest};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::MessageResponse;
use crate::inbound::http::state::HttpState;

/// Registration form. Absent and `null` fields are treated as empty so the
/// service can report them as missing.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterDonorBody {
    #[schema(example = "Asha Patil")]
    pub name: Option<String>,
    #[schema(example = "Kothrud")]
    pub area: Option<String>,
    #[schema(example = "+919322659210")]
    pub phone: Option<String>,
    #[schema(example = "O+")]
    pub blood_group: Option<String>,
}

impl From<RegisterDonorBody> for RegisterDonorRequest {
    fn from(body: RegisterDonorBody) -> Self {
        Self {
            name: body.name.unwrap_or_default(),
            area: body.area.unwrap_or_default(),
            phone: body.phone.unwrap_or_default(),
            blood_group: body.blood_group.unwrap_or_default(),
        }
    }
}

/// Directory filters. `All` / `Any` or an absent value mean unfiltered.
#[derive(Debug, Default, Deserialize, Serialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct DonorFilterQuery {
    pub area: Option<String>,
    pub blood_group: Option<String>,
}

/// Register a donor.
#[utoipa::path(
    post,
    path = "/api/register-donor",
    request_body = RegisterDonorBody,
    responses(
        (status = 201, description = "Donor registered", body = MessageResponse),
        (status = 400, description = "Missing field, malformed phone, unknown blood group or duplicate phone", body = crate::domain::Error),
        (status = 500, description = "Internal server error", body = crate::domain::Error),
        (status = 503, description = "Donor store unavailable", body = crate::domain::Error)
    ),
    tags = ["donors"],
    operation_id = "registerDonor"
)]
#[post("/api/register-donor")]
pub async fn register_donor(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterDonorBody>,
) -> ApiResult<HttpResponse> {
    state
        .registration
        .register(payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(MessageResponse::new("Donor registered successfully")))
}

/// List donors, newest first.
#[utoipa::path(
    get,
    path = "/api/donors",
    params(DonorFilterQuery),
    responses(
        (status = 200, description = "Matching donors", body = [Donor]),
        (status = 400, description = "Unknown blood group", body = crate::domain::Error),
        (status = 500, description = "Internal server error", body = crate::domain::Error)
    ),
    tags = ["donors"],
    operation_id = "listDonors"
)]
#[get("/api/donors")]
pub async fn list_donors(
    state: web::Data<HttpState>,
    query: web::Query<DonorFilterQuery>,
) -> ApiResult<web::Json<Vec<Donor>>> {
    let DonorFilterQuery { area, blood_group } = query.into_inner();
    let donors = state
        .directory
        .list_donors(ListDonorsRequest { area, blood_group })
        .await?;
    Ok(web::Json(donors))
}

/// Remove a donor by phone. Succeeds whether or not the donor existed.
#[utoipa::path(
    delete,
    path = "/api/donor/{phone}",
    params(("phone" = String, Path, description = "Donor phone number, e.g. +919322659210")),
    responses(
        (status = 200, description = "Donor removed", body = MessageResponse),
        (status = 500, description = "Internal server error", body = crate::domain::Error)
    ),
    tags = ["donors"],
    operation_id = "deleteDonor"
)]
#[delete("/api/donor/{phone}")]
pub async fn delete_donor(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<MessageResponse>> {
    state.directory.remove_donor(path.into_inner()).await?;
    Ok(web::Json(MessageResponse::new("Donor deleted successfully")))
}

#[cfg(test)]
#[path = "donors_tests.rs"]
mod tests;
