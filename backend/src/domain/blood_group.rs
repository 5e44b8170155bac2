//! ABO/Rh blood groups and the directory filter built on them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error returned when a string does not name one of the eight blood groups.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown blood group: {value}")]
pub struct BloodGroupParseError {
    /// The rejected input.
    pub value: String,
}

/// One of the eight ABO/Rh blood groups.
///
/// Serialised in the conventional short form (`"AB-"`, `"O+"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum BloodGroup {
    /// A positive.
    #[serde(rename = "A+")]
    APositive,
    /// A negative.
    #[serde(rename = "A-")]
    ANegative,
    /// B positive.
    #[serde(rename = "B+")]
    BPositive,
    /// B negative.
    #[serde(rename = "B-")]
    BNegative,
    /// AB positive.
    #[serde(rename = "AB+")]
    AbPositive,
    /// AB negative.
    #[serde(rename = "AB-")]
    AbNegative,
    /// O positive.
    #[serde(rename = "O+")]
    OPositive,
    /// O negative.
    #[serde(rename = "O-")]
    ONegative,
}

impl BloodGroup {
    /// Every group, in the order forms present them.
    pub const ALL: [Self; 8] = [
        Self::APositive,
        Self::ANegative,
        Self::BPositive,
        Self::BNegative,
        Self::AbPositive,
        Self::AbNegative,
        Self::OPositive,
        Self::ONegative,
    ];

    /// Short textual form stored in the database and shown to users.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::APositive => "A+",
            Self::ANegative => "A-",
            Self::BPositive => "B+",
            Self::BNegative => "B-",
            Self::AbPositive => "AB+",
            Self::AbNegative => "AB-",
            Self::OPositive => "O+",
            Self::ONegative => "O-",
        }
    }
}

impl fmt::Display for BloodGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BloodGroup {
    type Err = BloodGroupParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|group| group.as_str() == s)
            .ok_or_else(|| BloodGroupParseError {
                value: s.to_owned(),
            })
    }
}

/// Blood-group dimension of a donor query.
///
/// The literal `"Any"` disables filtering. The comparison is exact, so
/// `"any"` is rejected like any other unknown group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BloodGroupFilter {
    /// Match every group.
    Any,
    /// Match only this group.
    Only(BloodGroup),
}

impl BloodGroupFilter {
    /// Sentinel string meaning "no blood-group filter".
    pub const ANY: &'static str = "Any";

    /// Parse an explicit filter value.
    pub fn parse(raw: &str) -> Result<Self, BloodGroupParseError> {
        if raw == Self::ANY {
            return Ok(Self::Any);
        }
        raw.parse().map(Self::Only)
    }

    /// Parse an optional query parameter; absent or empty means [`Self::Any`].
    pub fn from_query(raw: Option<&str>) -> Result<Self, BloodGroupParseError> {
        match raw {
            None | Some("") => Ok(Self::Any),
            Some(value) => Self::parse(value),
        }
    }

    /// The concrete group, if the filter is restrictive.
    pub const fn group(self) -> Option<BloodGroup> {
        match self {
            Self::Any => None,
            Self::Only(group) => Some(group),
        }
    }

    /// Whether a donor with `group` passes this filter.
    pub fn matches(self, group: BloodGroup) -> bool {
        self.group().is_none_or(|wanted| wanted == group)
    }

    /// Textual form used in alert messages.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Any => Self::ANY,
            Self::Only(group) => group.as_str(),
        }
    }
}
