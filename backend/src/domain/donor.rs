//! Donor data model.
//!
//! A donor is keyed by phone number. Records are created by registration,
//! never updated, and removed either by an administrator or by the alert
//! dispatcher when the SMS gateway reports the number as unreachable.

use std::fmt;
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{Area, BloodGroup};

/// Validation errors returned by the donor constructors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DonorValidationError {
    EmptyName,
    EmptyPhone,
    InvalidPhone,
}

impl fmt::Display for DonorValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "donor name must not be empty"),
            Self::EmptyPhone => write!(f, "phone number must not be empty"),
            Self::InvalidPhone => write!(
                f,
                "phone number must be +91 followed by exactly ten digits"
            ),
        }
    }
}

impl std::error::Error for DonorValidationError {}

static PHONE_RE: OnceLock<Regex> = OnceLock::new();

fn phone_regex() -> &'static Regex {
    PHONE_RE.get_or_init(|| {
        Regex::new(r"^\+91[0-9]{10}$")
            .unwrap_or_else(|error| panic!("phone regex failed to compile: {error}"))
    })
}

/// Indian mobile number in E.164 form (`+91` and ten digits).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Validate and construct a [`PhoneNumber`].
    ///
    /// # Examples
    /// ```
    /// use bloodlink::domain::PhoneNumber;
    ///
    /// assert!(PhoneNumber::new("+919322659210").is_ok());
    /// assert!(PhoneNumber::new("9322659210").is_err());
    /// ```
    pub fn new(phone: impl Into<String>) -> Result<Self, DonorValidationError> {
        let phone = phone.into();
        if phone.is_empty() {
            return Err(DonorValidationError::EmptyPhone);
        }
        if !phone_regex().is_match(&phone) {
            return Err(DonorValidationError::InvalidPhone);
        }
        Ok(Self(phone))
    }

    /// Log-safe rendering keeping only the last four digits.
    pub fn masked(&self) -> String {
        mask_phone(&self.0)
    }
}

/// Mask all but the last four characters of a phone-like string.
pub fn mask_phone(raw: &str) -> String {
    let total = raw.chars().count();
    raw.chars()
        .enumerate()
        .map(|(index, ch)| if index + 4 < total { '*' } else { ch })
        .collect()
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<PhoneNumber> for String {
    fn from(value: PhoneNumber) -> Self {
        value.0
    }
}

impl TryFrom<String> for PhoneNumber {
    type Error = DonorValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Donor display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DonorName(String);

impl DonorName {
    /// Validate and construct a [`DonorName`].
    pub fn new(name: impl Into<String>) -> Result<Self, DonorValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DonorValidationError::EmptyName);
        }
        Ok(Self(name))
    }
}

impl AsRef<str> for DonorName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl From<DonorName> for String {
    fn from(value: DonorName) -> Self {
        value.0
    }
}

impl TryFrom<String> for DonorName {
    type Error = DonorValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Validated registration input, not yet persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DonorDraft {
    pub name: DonorName,
    pub area: Area,
    pub phone: PhoneNumber,
    pub blood_group: BloodGroup,
}

impl DonorDraft {
    /// Stamp the draft with its creation time.
    pub fn into_donor(self, created_at: DateTime<Utc>) -> Donor {
        Donor {
            name: self.name,
            area: self.area,
            phone: self.phone,
            blood_group: self.blood_group,
            created_at,
        }
    }
}

/// Registered donor.
///
/// ## Invariants
/// - `phone` is unique across the registry.
/// - `created_at` never changes after insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Donor {
    #[schema(value_type = String, example = "Asha Patil")]
    pub name: DonorName,
    #[schema(value_type = String, example = "Kothrud")]
    pub area: Area,
    #[schema(value_type = String, example = "+919322659210")]
    pub phone: PhoneNumber,
    pub blood_group: BloodGroup,
    pub created_at: DateTime<Utc>,
}
