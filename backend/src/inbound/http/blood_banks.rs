//! Blood-bank directory HTTP handlers.
//!
//! ```text
//! GET  /api/bloodbanks?area=
//! POST /api/bloodbanks
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::BloodBank;
use crate::domain::ports::AddBloodBankRequest;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::MessageResponse;
use crate::inbound::http::state::HttpState;

/// Area filter; `All` or absent means every bank.
#[derive(Debug, Default, Deserialize, Serialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BloodBankFilterQuery {
    pub area: Option<String>,
}

/// New blood-bank form.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct AddBloodBankBody {
    #[schema(example = "Ruby Hall Clinic Blood Bank")]
    pub name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    #[schema(example = 18.5204)]
    pub lat: Option<f64>,
    #[schema(example = 73.8567)]
    pub lng: Option<f64>,
    pub area: Option<String>,
}

impl From<AddBloodBankBody> for AddBloodBankRequest {
    fn from(body: AddBloodBankBody) -> Self {
        Self {
            name: body.name.unwrap_or_default(),
            address: body.address.unwrap_or_default(),
            phone: body.phone.unwrap_or_default(),
            lat: body.lat,
            lng: body.lng,
            area: body.area.unwrap_or_default(),
        }
    }
}

/// List blood banks ordered by name.
#[utoipa::path(
    get,
    path = "/api/bloodbanks",
    params(BloodBankFilterQuery),
    responses(
        (status = 200, description = "Matching blood banks", body = [BloodBank]),
        (status = 500, description = "Internal server error", body = crate::domain::Error)
    ),
    tags = ["blood-banks"],
    operation_id = "listBloodBanks"
)]
#[get("/api/bloodbanks")]
pub async fn list_blood_banks(
    state: web::Data<HttpState>,
    query: web::Query<BloodBankFilterQuery>,
) -> ApiResult<web::Json<Vec<BloodBank>>> {
    let banks = state
        .blood_banks
        .list_blood_banks(query.into_inner().area)
        .await?;
    Ok(web::Json(banks))
}

/// Add a blood bank to the directory.
#[utoipa::path(
    post,
    path = "/api/bloodbanks",
    request_body = AddBloodBankBody,
    responses(
        (status = 201, description = "Blood bank added", body = MessageResponse),
        (status = 400, description = "Missing field, coordinates out of range or duplicate", body = crate::domain::Error),
        (status = 500, description = "Internal server error", body = crate::domain::Error)
    ),
    tags = ["blood-banks"],
    operation_id = "addBloodBank"
)]
#[post("/api/bloodbanks")]
pub async fn add_blood_bank(
    state: web::Data<HttpState>,
    payload: web::Json<AddBloodBankBody>,
) -> ApiResult<HttpResponse> {
    state
        .blood_banks
        .add_blood_bank(payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created().json(MessageResponse::new("Blood bank added successfully")))
}

#[cfg(test)]
#[path = "blood_banks_tests.rs"]
mod tests;
