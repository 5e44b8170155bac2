//! Tests for donor registration and directory services.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::MockDonorRepository;

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 8, 30, 0)
        .single()
        .expect("valid timestamp")
}

fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock {
        utc_now: fixture_timestamp(),
    })
}

#[fixture]
fn request() -> RegisterDonorRequest {
    RegisterDonorRequest {
        name: "Asha Patil".to_owned(),
        area: "Kothrud".to_owned(),
        phone: "+919322659210".to_owned(),
        blood_group: "B-".to_owned(),
    }
}

fn registration(repo: MockDonorRepository) -> DonorRegistrationService<MockDonorRepository> {
    DonorRegistrationService::new(Arc::new(repo), fixture_clock())
}

#[rstest]
#[tokio::test]
async fn register_persists_stamped_donor(request: RegisterDonorRequest) {
    let mut repo = MockDonorRepository::new();
    repo.expect_find_by_phone().times(1).return_once(|_| Ok(None));
    repo.expect_insert()
        .withf(|donor| {
            donor.phone.as_ref() == "+919322659210"
                && donor.blood_group == BloodGroup::BNegative
                && donor.created_at == fixture_timestamp()
        })
        .times(1)
        .return_once(|_| Ok(()));

    registration(repo)
        .register(request)
        .await
        .expect("registration succeeds");
}

#[rstest]
#[case::name("name")]
#[case::area("area")]
#[case::phone("phone")]
#[case::blood_group("bloodGroup")]
#[tokio::test]
async fn missing_fields_are_rejected(mut request: RegisterDonorRequest, #[case] field: &str) {
    match field {
        "name" => request.name = String::new(),
        "area" => request.area = "  ".to_owned(),
        "phone" => request.phone = String::new(),
        _ => request.blood_group = String::new(),
    }
    let mut repo = MockDonorRepository::new();
    repo.expect_find_by_phone().times(0);
    repo.expect_insert().times(0);

    let error = registration(repo)
        .register(request)
        .await
        .expect_err("invalid request");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.message(), MISSING_FIELDS_MESSAGE);
}

#[rstest]
#[case("9322659210")]
#[case("+91932265921")]
#[case("+91-9322659210")]
#[tokio::test]
async fn malformed_phone_creates_no_record(mut request: RegisterDonorRequest, #[case] phone: &str) {
    request.phone = phone.to_owned();
    let mut repo = MockDonorRepository::new();
    repo.expect_insert().times(0);

    let error = registration(repo)
        .register(request)
        .await
        .expect_err("invalid phone");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert_eq!(error.message(), INVALID_PHONE_MESSAGE);
}

#[rstest]
#[tokio::test]
async fn unknown_blood_group_is_rejected(mut request: RegisterDonorRequest) {
    request.blood_group = "Any".to_owned();
    let mut repo = MockDonorRepository::new();
    repo.expect_insert().times(0);

    let error = registration(repo)
        .register(request)
        .await
        .expect_err("invalid blood group");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[tokio::test]
async fn existing_phone_is_a_conflict(request: RegisterDonorRequest) {
    let existing = DonorDraft {
        name: DonorName::new("Someone").expect("valid name"),
        area: Area::new("Aundh").expect("valid area"),
        phone: PhoneNumber::new("+919322659210").expect("valid phone"),
        blood_group: BloodGroup::APositive,
    }
    .into_donor(fixture_timestamp());
    let mut repo = MockDonorRepository::new();
    repo.expect_find_by_phone()
        .times(1)
        .return_once(move |_| Ok(Some(existing)));
    repo.expect_insert().times(0);

    let error = registration(repo)
        .register(request)
        .await
        .expect_err("duplicate");

    assert_eq!(error.code(), ErrorCode::Conflict);
    assert_eq!(error.message(), DUPLICATE_PHONE_MESSAGE);
}

#[rstest]
#[tokio::test]
async fn losing_an_insert_race_is_a_conflict(request: RegisterDonorRequest) {
    let mut repo = MockDonorRepository::new();
    repo.expect_find_by_phone().times(1).return_once(|_| Ok(None));
    repo.expect_insert()
        .times(1)
        .return_once(|_| Err(DonorRepositoryError::duplicate_phone("+919322659210")));

    let error = registration(repo)
        .register(request)
        .await
        .expect_err("duplicate");

    assert_eq!(error.code(), ErrorCode::Conflict);
}

#[rstest]
#[case(None, None, AreaFilter::All, BloodGroupFilter::Any)]
#[case(Some("All"), Some("Any"), AreaFilter::All, BloodGroupFilter::Any)]
#[case(
    Some("Kothrud"),
    Some("O-"),
    AreaFilter::Only(Area::new("Kothrud").expect("valid area")),
    BloodGroupFilter::Only(BloodGroup::ONegative)
)]
#[tokio::test]
async fn list_donors_builds_query(
    #[case] area: Option<&str>,
    #[case] blood_group: Option<&str>,
    #[case] expected_area: AreaFilter,
    #[case] expected_group: BloodGroupFilter,
) {
    let mut repo = MockDonorRepository::new();
    repo.expect_list()
        .withf(move |query| query.area == expected_area && query.blood_group == expected_group)
        .times(1)
        .return_once(|_| Ok(Vec::new()));

    let donors = DonorDirectoryService::new(Arc::new(repo))
        .list_donors(ListDonorsRequest {
            area: area.map(str::to_owned),
            blood_group: blood_group.map(str::to_owned),
        })
        .await
        .expect("list succeeds");

    assert!(donors.is_empty());
}

#[tokio::test]
async fn list_donors_rejects_unknown_blood_group() {
    let mut repo = MockDonorRepository::new();
    repo.expect_list().times(0);

    let error = DonorDirectoryService::new(Arc::new(repo))
        .list_donors(ListDonorsRequest {
            area: None,
            blood_group: Some("Z+".to_owned()),
        })
        .await
        .expect_err("invalid blood group");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[case(true)]
#[case(false)]
#[tokio::test]
async fn remove_donor_is_idempotent(#[case] existed: bool) {
    let mut repo = MockDonorRepository::new();
    repo.expect_delete()
        .withf(|phone| phone.as_ref() == "+919322659210")
        .times(1)
        .return_once(move |_| Ok(existed));

    DonorDirectoryService::new(Arc::new(repo))
        .remove_donor("+919322659210".to_owned())
        .await
        .expect("removal succeeds");
}

#[tokio::test]
async fn remove_donor_skips_malformed_numbers() {
    let mut repo = MockDonorRepository::new();
    repo.expect_delete().times(0);

    DonorDirectoryService::new(Arc::new(repo))
        .remove_donor("not-a-phone".to_owned())
        .await
        .expect("removal succeeds");
}

#[tokio::test]
async fn remove_donor_surfaces_store_outages() {
    let mut repo = MockDonorRepository::new();
    repo.expect_delete()
        .times(1)
        .return_once(|_| Err(DonorRepositoryError::connection("refused")));

    let error = DonorDirectoryService::new(Arc::new(repo))
        .remove_donor("+919322659210".to_owned())
        .await
        .expect_err("store outage");

    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}
