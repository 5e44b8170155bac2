//! Free-text localities and the area filter used by donor and blood-bank
//! queries.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when an area is blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("area must not be empty")]
pub struct EmptyAreaError;

/// Locality name as entered by the donor or hospital.
///
/// Stored verbatim; equality is exact and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Area(String);

impl Area {
    /// Validate and construct an [`Area`].
    pub fn new(area: impl Into<String>) -> Result<Self, EmptyAreaError> {
        let area = area.into();
        if area.trim().is_empty() {
            return Err(EmptyAreaError);
        }
        Ok(Self(area))
    }
}

impl AsRef<str> for Area {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Area {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Area> for String {
    fn from(value: Area) -> Self {
        value.0
    }
}

impl TryFrom<String> for Area {
    type Error = EmptyAreaError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Area dimension of a query.
///
/// Only the exact literal `"All"` disables filtering; `"all"` or `" All"`
/// are ordinary locality names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AreaFilter {
    /// Every area.
    All,
    /// A single locality.
    Only(Area),
}

impl AreaFilter {
    /// Sentinel string meaning "no area filter".
    pub const ALL: &'static str = "All";

    /// Parse an explicit filter value.
    pub fn parse(raw: &str) -> Result<Self, EmptyAreaError> {
        if raw == Self::ALL {
            return Ok(Self::All);
        }
        Area::new(raw).map(Self::Only)
    }

    /// Parse an optional query parameter; absent or empty means [`Self::All`].
    pub fn from_query(raw: Option<&str>) -> Self {
        match raw.map(Self::parse) {
            Some(Ok(filter)) => filter,
            None | Some(Err(_)) => Self::All,
        }
    }

    /// The concrete area, if the filter is restrictive.
    pub fn area(&self) -> Option<&Area> {
        match self {
            Self::All => None,
            Self::Only(area) => Some(area),
        }
    }

    /// Whether `area` passes this filter.
    pub fn matches(&self, area: &Area) -> bool {
        self.area().is_none_or(|wanted| wanted == area)
    }

    /// Textual form used in alert messages.
    pub fn as_str(&self) -> &str {
        match self {
            Self::All => Self::ALL,
            Self::Only(area) => area.as_ref(),
        }
    }
}
