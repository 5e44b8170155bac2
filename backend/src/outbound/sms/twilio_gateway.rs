//! Reqwest-backed Twilio SMS adapter.
//!
//! This adapter owns transport details only: form encoding, basic auth,
//! timeout and HTTP error mapping. Twilio's error code 21211 is the only
//! response classified as an invalid destination.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use zeroize::Zeroizing;

use super::dto::{ErrorResponseDto, MessageResourceDto};
use crate::domain::PhoneNumber;
use crate::domain::ports::{SmsGateway, SmsGatewayError, SmsReceipt};

/// Account credentials and sender number for the Twilio REST API.
#[derive(Clone)]
pub struct TwilioCredentials {
    /// Account SID, used both in the URL path and as the basic-auth user.
    pub account_sid: String,
    /// Auth token, used as the basic-auth password.
    pub auth_token: Zeroizing<String>,
    /// Sender number in E.164 form.
    pub from: String,
}

impl fmt::Debug for TwilioCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TwilioCredentials")
            .field("account_sid", &self.account_sid)
            .field("auth_token", &"<redacted>")
            .field("from", &self.from)
            .finish()
    }
}

/// SMS gateway adapter that POSTs to one Twilio account's Messages resource.
pub struct TwilioSmsGateway {
    client: Client,
    messages_url: Url,
    credentials: TwilioCredentials,
}

impl TwilioSmsGateway {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// `api_base` is the scheme and host, normally `https://api.twilio.com`.
    ///
    /// # Errors
    ///
    /// Returns [`SmsGatewayError::Transport`] when the messages URL cannot be
    /// derived from `api_base` or the reqwest client cannot be constructed.
    pub fn new(
        api_base: &Url,
        credentials: TwilioCredentials,
        timeout: Duration,
    ) -> Result<Self, SmsGatewayError> {
        let messages_url = messages_url(api_base, &credentials.account_sid)?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| SmsGatewayError::transport(err.to_string()))?;
        Ok(Self {
            client,
            messages_url,
            credentials,
        })
    }
}

fn messages_url(api_base: &Url, account_sid: &str) -> Result<Url, SmsGatewayError> {
    if account_sid.is_empty() || !account_sid.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(SmsGatewayError::transport(
            "account SID must be a non-empty alphanumeric string",
        ));
    }
    api_base
        .join(&format!("/2010-04-01/Accounts/{account_sid}/Messages.json"))
        .map_err(|err| SmsGatewayError::transport(format!("invalid Twilio base URL: {err}")))
}

#[async_trait]
impl SmsGateway for TwilioSmsGateway {
    async fn send(&self, to: &PhoneNumber, body: &str) -> Result<SmsReceipt, SmsGatewayError> {
        let response = self
            .client
            .post(self.messages_url.clone())
            .basic_auth(
                self.credentials.account_sid.as_str(),
                Some(self.credentials.auth_token.as_str()),
            )
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&[
                ("To", to.as_ref()),
                ("From", self.credentials.from.as_str()),
                ("Body", body),
            ])
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, bytes.as_ref()));
        }

        parse_receipt(bytes.as_ref())
    }
}

fn parse_receipt(body: &[u8]) -> Result<SmsReceipt, SmsGatewayError> {
    let decoded: MessageResourceDto = serde_json::from_slice(body).map_err(|error| {
        SmsGatewayError::transport(format!("invalid Twilio message payload: {error}"))
    })?;
    Ok(SmsReceipt {
        message_id: decoded.sid,
    })
}

fn map_transport_error(error: reqwest::Error) -> SmsGatewayError {
    if error.is_timeout() {
        SmsGatewayError::timeout(error.to_string())
    } else {
        SmsGatewayError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> SmsGatewayError {
    let decoded = serde_json::from_slice::<ErrorResponseDto>(body).ok();
    let detail = match &decoded {
        Some(error) if !error.message.is_empty() => match error.code {
            Some(code) => format!("{code} {}", error.message),
            None => error.message.clone(),
        },
        _ => body_preview(body),
    };
    let message = if detail.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), detail)
    };

    if decoded
        .as_ref()
        .is_some_and(ErrorResponseDto::is_invalid_destination)
    {
        return SmsGatewayError::invalid_destination(message);
    }

    match status {
        StatusCode::TOO_MANY_REQUESTS => SmsGatewayError::rate_limited(message),
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => {
            SmsGatewayError::timeout(message)
        }
        _ if status.is_client_error() => SmsGatewayError::rejected(message),
        _ => SmsGatewayError::transport(message),
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}

#[cfg(test)]
#[path = "twilio_gateway_tests.rs"]
mod tests;
