//! HTTP inbound adapter exposing REST endpoints.

pub mod alerts;
pub mod blood_banks;
pub mod donors;
pub mod error;
pub mod health;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;

use actix_web::web;

pub use error::ApiResult;

use crate::domain::Error;

/// JSON extractor settings shared by every handler.
///
/// Malformed bodies are reported with the domain error envelope instead of
/// Actix's plain-text default.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(16 * 1024)
        .error_handler(|err, _req| {
            Error::invalid_request(format!("Invalid JSON body: {err}")).into()
        })
}

/// Register every API route on `cfg`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(donors::register_donor)
        .service(donors::list_donors)
        .service(donors::delete_donor)
        .service(alerts::send_alert)
        .service(blood_banks::list_blood_banks)
        .service(blood_banks::add_blood_bank)
        .service(health::api_health);
}
