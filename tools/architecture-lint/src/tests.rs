//! Unit tests for the architecture lint.

use std::path::PathBuf;

use rstest::rstest;

use super::*;

fn lint_one(file: &str, contents: &str) -> Result<(), ArchitectureLintError> {
    lint_sources(&[LintSource {
        file: PathBuf::from(file),
        contents: contents.to_owned(),
    }])
}

fn messages(result: Result<(), ArchitectureLintError>) -> Vec<String> {
    match result {
        Err(ArchitectureLintError::Violations(violations)) => {
            violations.into_iter().map(|v| v.message).collect()
        }
        other => panic!("expected violations, got {other:?}"),
    }
}

#[rstest]
#[case(
    "inbound/http/donors.rs",
    "use crate::domain::PhoneNumber; fn handler() { let _ = PhoneNumber::new(\"x\"); }"
)]
#[case(
    "domain/donor.rs",
    "use utoipa::ToSchema; #[derive(ToSchema)] struct Donor;"
)]
#[case(
    "domain/alert_dispatch_service.rs",
    "use super::ports::SmsGateway; use crate::domain::Donor; fn f(_: &dyn SmsGateway, _: Donor) {}"
)]
#[case(
    "outbound/sms/twilio.rs",
    "use reqwest::Client; use crate::domain::ports::SmsGateway; fn f(_: Client) {}"
)]
#[case(
    "outbound/persistence/diesel_donor_repository.rs",
    "use diesel::prelude::*; use crate::domain::Donor; fn f(_: Donor) {}"
)]
fn accepts_sources_within_their_layer(#[case] file: &str, #[case] contents: &str) {
    let result = lint_one(file, contents);
    assert!(result.is_ok(), "result: {result:?}");
}

#[rstest]
#[case(
    "inbound/http/donors.rs",
    "use crate::outbound::persistence::DieselDonorRepository; fn f() {}",
    "inbound module must not depend on crate::outbound"
)]
#[case(
    "inbound/http/donors.rs",
    "use outbound::persistence::DieselDonorRepository; fn f() {}",
    "inbound module must not depend on crate::outbound"
)]
#[case(
    "inbound/http/donors.rs",
    "use bloodlink::outbound::sms::TwilioSmsGateway; fn f() {}",
    "inbound module must not depend on crate::outbound"
)]
#[case(
    "inbound/http/alerts.rs",
    "fn f() { let _ = super::super::super::outbound::sms::TwilioSmsGateway::new; }",
    "inbound module must not depend on crate::outbound"
)]
#[case(
    "inbound/http/donors.rs",
    "use diesel::prelude::*; fn f() {}",
    "inbound module must not depend on external crate `diesel`"
)]
#[case(
    "inbound/http/alerts.rs",
    "fn f() { let _ = reqwest::Client::new(); }",
    "inbound module must not depend on external crate `reqwest`"
)]
#[case(
    "domain/donor.rs",
    "use crate::inbound::http; fn f() {}",
    "domain module must not depend on crate::inbound"
)]
#[case(
    "domain/donor.rs",
    "use actix_web::HttpResponse; fn f() {}",
    "domain module must not depend on external crate `actix_web`"
)]
#[case(
    "domain/alert_dispatch_service.rs",
    "use reqwest::Client; fn f(_: Client) {}",
    "domain module must not depend on external crate `reqwest`"
)]
#[case(
    "domain/ports/donor_repository.rs",
    "use diesel_async::AsyncPgConnection; fn f(_: AsyncPgConnection) {}",
    "domain module must not depend on external crate `diesel_async`"
)]
#[case(
    "outbound/persistence/diesel_donor_repository.rs",
    "use inbound::http; fn f() {}",
    "outbound module must not depend on crate::inbound"
)]
#[case(
    "outbound/metrics/prometheus.rs",
    "use actix_web::HttpResponse; fn f() {}",
    "outbound module must not depend on external crate `actix_web`"
)]
fn reports_boundary_violations(#[case] file: &str, #[case] contents: &str, #[case] expected: &str) {
    let found = messages(lint_one(file, contents));
    assert!(
        found.iter().any(|message| message == expected),
        "expected {expected:?} in {found:?}"
    );
}

#[rstest]
fn repeated_imports_are_reported_once() {
    let found = messages(lint_one(
        "inbound/http/donors.rs",
        "use diesel::prelude::*; use diesel::QueryDsl; fn f() { let _ = diesel::insert_into; }",
    ));
    assert_eq!(
        found,
        vec!["inbound module must not depend on external crate `diesel`".to_owned()]
    );
}

#[rstest]
#[case("settings.rs")]
#[case("main.rs")]
fn files_outside_the_layers_are_rejected(#[case] file: &str) {
    let result = lint_one(file, "fn f() {}");
    assert!(matches!(result, Err(ArchitectureLintError::Parse { .. })));
}

#[rstest]
fn unparsable_source_is_a_parse_error() {
    let result = lint_one("domain/donor.rs", "fn broken( {");
    assert!(matches!(result, Err(ArchitectureLintError::Parse { .. })));
}

#[rstest]
fn violations_display_lists_each_file() {
    let error = ArchitectureLintError::Violations(vec![Violation {
        file: PathBuf::from("domain/donor.rs"),
        message: "domain module must not depend on crate::inbound".to_owned(),
    }]);
    let rendered = error.to_string();
    assert!(rendered.starts_with("1 architecture boundary violation(s):"));
    assert!(rendered.contains("- domain/donor.rs: domain module must not depend on crate::inbound"));
}
