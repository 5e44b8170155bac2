//! DTOs for decoding Twilio Messages API responses.

use serde::Deserialize;

/// Error code Twilio returns when the `To` number is not a valid phone number.
pub(super) const INVALID_TO_NUMBER_CODE: u32 = 21211;

/// Body of a successful `Messages.json` POST. Only the SID is kept.
#[derive(Debug, Deserialize)]
pub(super) struct MessageResourceDto {
    pub(super) sid: String,
}

/// Error envelope returned with 4xx and 5xx statuses.
#[derive(Debug, Deserialize)]
pub(super) struct ErrorResponseDto {
    pub(super) code: Option<u32>,
    #[serde(default)]
    pub(super) message: String,
}

impl ErrorResponseDto {
    pub(super) fn is_invalid_destination(&self) -> bool {
        self.code == Some(INVALID_TO_NUMBER_CODE)
    }
}
