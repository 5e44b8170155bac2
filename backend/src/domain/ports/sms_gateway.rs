//! Port for the outbound SMS gateway.
//!
//! Adapters own the sender identity and credentials; the domain supplies only
//! the destination and body. Failures are classified so the alert dispatcher
//! can tell a permanently invalid number from a transient problem.

use async_trait::async_trait;

use crate::domain::PhoneNumber;

use super::define_port_error;

define_port_error! {
    /// Errors raised by SMS gateway adapters.
    pub enum SmsGatewayError {
        /// The gateway reported the destination as not a valid mobile number.
        InvalidDestination { message: String } =>
            "sms destination rejected as invalid: {message}",
        /// The gateway refused the request for another client-side reason.
        Rejected { message: String } =>
            "sms gateway rejected the request: {message}",
        /// The gateway throttled the request.
        RateLimited { message: String } =>
            "sms gateway rate limited the request: {message}",
        /// The request exceeded the configured timeout.
        Timeout { message: String } =>
            "sms gateway request timed out: {message}",
        /// Network failure or server-side gateway error.
        Transport { message: String } =>
            "sms gateway transport failed: {message}",
    }
}

impl SmsGatewayError {
    /// Whether the number should be removed from the registry.
    pub fn is_invalid_destination(&self) -> bool {
        matches!(self, Self::InvalidDestination { .. })
    }
}

/// Acknowledgement returned for an accepted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmsReceipt {
    /// Gateway-assigned message identifier.
    pub message_id: String,
}

/// Port for sending one SMS message.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SmsGateway: Send + Sync {
    /// Send `body` to `to`.
    async fn send(&self, to: &PhoneNumber, body: &str) -> Result<SmsReceipt, SmsGatewayError>;
}

/// Fixture gateway that accepts every message.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureSmsGateway;

#[async_trait]
impl SmsGateway for FixtureSmsGateway {
    async fn send(&self, _to: &PhoneNumber, _body: &str) -> Result<SmsReceipt, SmsGatewayError> {
        Ok(SmsReceipt {
            message_id: "SM00000000000000000000000000000000".to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(SmsGatewayError::invalid_destination("21211"), true)]
    #[case(SmsGatewayError::rejected("21610"), false)]
    #[case(SmsGatewayError::rate_limited("slow down"), false)]
    #[case(SmsGatewayError::timeout("30s"), false)]
    #[case(SmsGatewayError::transport("reset"), false)]
    fn only_invalid_destinations_prune(#[case] error: SmsGatewayError, #[case] expected: bool) {
        assert_eq!(error.is_invalid_destination(), expected);
    }

    #[tokio::test]
    async fn fixture_accepts_messages() {
        let phone = PhoneNumber::new("+919322659210").expect("valid phone");
        let receipt = FixtureSmsGateway
            .send(&phone, "hello")
            .await
            .expect("fixture send succeeds");
        assert!(receipt.message_id.starts_with("SM"));
    }
}
