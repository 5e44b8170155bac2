//! Tests for the blood-bank service.

use std::sync::Arc;

use rstest::{fixture, rstest};

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::MockBloodBankRepository;

#[fixture]
fn request() -> AddBloodBankRequest {
    AddBloodBankRequest {
        name: "Ruby Hall Clinic Blood Bank".to_owned(),
        address: "40, Sassoon Road, Pune, Maharashtra 411001".to_owned(),
        phone: "+91-20-26122101".to_owned(),
        lat: Some(18.5204),
        lng: Some(73.8567),
        area: "Shivajinagar".to_owned(),
    }
}

fn seed_bank(name: &str) -> NewBloodBank {
    NewBloodBank::new(
        name,
        "Road 1",
        "+91-20-1",
        Coordinates::new(18.5, 73.8).expect("valid coordinates"),
        Area::new("Kothrud").expect("valid area"),
    )
    .expect("valid bank")
}

#[rstest]
#[tokio::test]
async fn add_inserts_new_bank(request: AddBloodBankRequest) {
    let mut repo = MockBloodBankRepository::new();
    repo.expect_exists()
        .withf(|name, address| {
            name == "Ruby Hall Clinic Blood Bank" && address.starts_with("40, Sassoon Road")
        })
        .times(1)
        .return_once(|_, _| Ok(false));
    repo.expect_insert()
        .withf(|bank| bank.area.as_ref() == "Shivajinagar" && bank.latitude == 18.5204)
        .times(1)
        .return_once(|_| Ok(()));

    let bank = BloodBankService::new(Arc::new(repo))
        .add_blood_bank(request)
        .await
        .expect("bank added");

    assert_eq!(bank.name, "Ruby Hall Clinic Blood Bank");
}

#[rstest]
#[tokio::test]
async fn add_accepts_zero_coordinates(mut request: AddBloodBankRequest) {
    request.lat = Some(0.0);
    request.lng = Some(0.0);
    let mut repo = MockBloodBankRepository::new();
    repo.expect_exists().times(1).return_once(|_, _| Ok(false));
    repo.expect_insert().times(1).return_once(|_| Ok(()));

    BloodBankService::new(Arc::new(repo))
        .add_blood_bank(request)
        .await
        .expect("zero is a valid coordinate");
}

#[rstest]
#[case::name("name")]
#[case::lat("lat")]
#[case::area("area")]
#[tokio::test]
async fn add_rejects_missing_fields(mut request: AddBloodBankRequest, #[case] field: &str) {
    match field {
        "name" => request.name = String::new(),
        "lat" => request.lat = None,
        _ => request.area = String::new(),
    }
    let mut repo = MockBloodBankRepository::new();
    repo.expect_exists().times(0);
    repo.expect_insert().times(0);

    let error = BloodBankService::new(Arc::new(repo))
        .add_blood_bank(request)
        .await
        .expect_err("invalid request");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.message(), MISSING_FIELDS_MESSAGE);
}

#[rstest]
#[tokio::test]
async fn add_rejects_out_of_range_latitude(mut request: AddBloodBankRequest) {
    request.lat = Some(120.0);
    let mut repo = MockBloodBankRepository::new();
    repo.expect_insert().times(0);

    let error = BloodBankService::new(Arc::new(repo))
        .add_blood_bank(request)
        .await
        .expect_err("invalid latitude");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn add_rejects_duplicates(request: AddBloodBankRequest) {
    let mut repo = MockBloodBankRepository::new();
    repo.expect_exists().times(1).return_once(|_, _| Ok(true));
    repo.expect_insert().times(0);

    let error = BloodBankService::new(Arc::new(repo))
        .add_blood_bank(request)
        .await
        .expect_err("duplicate");

    assert_eq!(error.code(), ErrorCode::Conflict);
    assert_eq!(error.message(), DUPLICATE_MESSAGE);
}

#[rstest]
#[case(None)]
#[case(Some("All"))]
#[tokio::test]
async fn list_without_area_is_unfiltered(#[case] area: Option<&str>) {
    let mut repo = MockBloodBankRepository::new();
    repo.expect_list()
        .withf(|filter| *filter == AreaFilter::All)
        .times(1)
        .return_once(|_| Ok(Vec::new()));

    BloodBankService::new(Arc::new(repo))
        .list_blood_banks(area.map(str::to_owned))
        .await
        .expect("list succeeds");
}

#[tokio::test]
async fn seed_writes_only_into_empty_store() {
    let mut repo = MockBloodBankRepository::new();
    repo.expect_count().times(1).return_once(|| Ok(0));
    repo.expect_insert_all()
        .withf(|banks| banks.len() == 2)
        .times(1)
        .return_once(|_| Ok(()));

    let seeded = BloodBankService::new(Arc::new(repo))
        .seed_if_empty(vec![seed_bank("A"), seed_bank("B")])
        .await
        .expect("seed succeeds");

    assert!(seeded);
}

#[tokio::test]
async fn seed_skips_populated_store() {
    let mut repo = MockBloodBankRepository::new();
    repo.expect_count().times(1).return_once(|| Ok(8));
    repo.expect_insert_all().times(0);

    let seeded = BloodBankService::new(Arc::new(repo))
        .seed_if_empty(vec![seed_bank("A")])
        .await
        .expect("seed check succeeds");

    assert!(!seeded);
}

#[tokio::test]
async fn seed_surfaces_store_outages() {
    let mut repo = MockBloodBankRepository::new();
    repo.expect_count()
        .times(1)
        .return_once(|| Err(BloodBankRepositoryError::connection("refused")));

    let error = BloodBankService::new(Arc::new(repo))
        .seed_if_empty(Vec::new())
        .await
        .expect_err("store outage");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}
