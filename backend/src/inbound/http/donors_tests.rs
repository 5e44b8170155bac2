//! Handler tests for the donor registry endpoints.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test as actix_test;
use chrono::{TimeZone, Utc};
use rstest::rstest;
use serde_json::{Value, json};

use super::*;
use crate::domain::ports::{MockDonorDirectory, MockDonorRegistrationCommand};
use crate::domain::{Area, BloodGroup, DonorDraft, DonorName, Error, PhoneNumber, TRACE_ID_HEADER};
use crate::inbound::http::test_utils::test_app;

fn donor(phone: &str, group: BloodGroup) -> Donor {
    DonorDraft {
        name: DonorName::new("Asha Patil").expect("valid name"),
        area: Area::new("Kothrud").expect("valid area"),
        phone: PhoneNumber::new(phone).expect("valid phone"),
        blood_group: group,
    }
    .into_donor(
        Utc.with_ymd_and_hms(2026, 2, 1, 9, 0, 0)
            .single()
            .expect("valid timestamp"),
    )
}

#[actix_web::test]
async fn register_returns_created_message() {
    let mut registration = MockDonorRegistrationCommand::new();
    registration
        .expect_register()
        .withf(|request| {
            request.name == "Asha Patil"
                && request.phone == "+919322659210"
                && request.blood_group == "O+"
        })
        .times(1)
        .return_once(|_| Ok(()));
    let state = HttpState {
        registration: Arc::new(registration),
        ..HttpState::fixtures()
    };
    let app = actix_test::init_service(test_app(state)).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/register-donor")
        .set_json(json!({
            "name": "Asha Patil",
            "area": "Kothrud",
            "phone": "+919322659210",
            "bloodGroup": "O+"
        }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert!(response.headers().contains_key(TRACE_ID_HEADER));
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body, json!({"message": "Donor registered successfully"}));
}

#[actix_web::test]
async fn register_passes_absent_fields_as_empty() {
    let mut registration = MockDonorRegistrationCommand::new();
    registration
        .expect_register()
        .withf(|request| request.area.is_empty() && request.blood_group.is_empty())
        .times(1)
        .return_once(|_| Err(Error::invalid_request("All fields are required")));
    let state = HttpState {
        registration: Arc::new(registration),
        ..HttpState::fixtures()
    };
    let app = actix_test::init_service(test_app(state)).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/register-donor")
        .set_json(json!({"name": "Asha", "phone": "+919322659210", "area": null}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], "All fields are required");
    assert_eq!(body["code"], "invalid_request");
}

#[actix_web::test]
async fn duplicate_registration_is_bad_request() {
    let mut registration = MockDonorRegistrationCommand::new();
    registration
        .expect_register()
        .times(1)
        .return_once(|_| Err(Error::conflict("Phone number already registered")));
    let state = HttpState {
        registration: Arc::new(registration),
        ..HttpState::fixtures()
    };
    let app = actix_test::init_service(test_app(state)).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/register-donor")
        .set_json(json!({
            "name": "Asha Patil",
            "area": "Kothrud",
            "phone": "+919322659210",
            "bloodGroup": "O+"
        }))
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], "Phone number already registered");
}

#[actix_web::test]
async fn malformed_json_uses_error_envelope() {
    let app = actix_test::init_service(test_app(HttpState::fixtures())).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/register-donor")
        .insert_header(("content-type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let response = actix_test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["code"], "invalid_request");
    assert!(body["traceId"].is_string());
}

#[rstest]
#[case("/api/donors", None, None)]
#[case("/api/donors?area=Kothrud", Some("Kothrud"), None)]
#[case("/api/donors?area=All&bloodGroup=AB%2B", Some("All"), Some("AB+"))]
#[actix_web::test]
async fn list_forwards_query_filters(
    #[case] uri: &str,
    #[case] area: Option<&'static str>,
    #[case] blood_group: Option<&'static str>,
) {
    let mut directory = MockDonorDirectory::new();
    directory
        .expect_list_donors()
        .withf(move |request| {
            request.area.as_deref() == area && request.blood_group.as_deref() == blood_group
        })
        .times(1)
        .return_once(|_| {
            Ok(vec![
                donor("+919000000002", BloodGroup::AbPositive),
                donor("+919000000001", BloodGroup::OPositive),
            ])
        });
    let state = HttpState {
        directory: Arc::new(directory),
        ..HttpState::fixtures()
    };
    let app = actix_test::init_service(test_app(state)).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri(uri).to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    let donors = body.as_array().expect("array body");
    assert_eq!(donors.len(), 2);
    assert_eq!(donors[0]["phone"], "+919000000002");
    assert_eq!(donors[0]["bloodGroup"], "AB+");
    assert!(donors[0]["createdAt"].is_string());
}

#[actix_web::test]
async fn list_rejects_unknown_blood_group() {
    let mut directory = MockDonorDirectory::new();
    directory
        .expect_list_donors()
        .times(1)
        .return_once(|_| Err(Error::invalid_request("Blood group must be one of A+, A-, B+, B-, AB+, AB-, O+, O- or Any")));
    let state = HttpState {
        directory: Arc::new(directory),
        ..HttpState::fixtures()
    };
    let app = actix_test::init_service(test_app(state)).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri("/api/donors?bloodGroup=Z")
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn delete_passes_raw_phone_and_acknowledges() {
    let mut directory = MockDonorDirectory::new();
    directory
        .expect_remove_donor()
        .withf(|phone| phone == "+919322659210")
        .times(1)
        .return_once(|_| Ok(()));
    let state = HttpState {
        directory: Arc::new(directory),
        ..HttpState::fixtures()
    };
    let app = actix_test::init_service(test_app(state)).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri("/api/donor/+919322659210")
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body, json!({"message": "Donor deleted successfully"}));
}

#[actix_web::test]
async fn internal_failures_are_redacted() {
    let mut directory = MockDonorDirectory::new();
    directory
        .expect_remove_donor()
        .times(1)
        .return_once(|_| Err(Error::internal("donor repository error: syntax error at DELETE")));
    let state = HttpState {
        directory: Arc::new(directory),
        ..HttpState::fixtures()
    };
    let app = actix_test::init_service(test_app(state)).await;

    let response = actix_test::call_service(
        &app,
        actix_test::TestRequest::delete()
            .uri("/api/donor/+919322659210")
            .to_request(),
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = actix_test::read_body_json(response).await;
    assert_eq!(body["message"], "Internal server error");
}
