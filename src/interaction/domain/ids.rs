//! Platform identifier types.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Milliseconds between the Unix epoch and the platform epoch (2015-01-01).
const PLATFORM_EPOCH_MILLIS: u64 = 1_420_070_400_000;

/// Number of low bits holding worker, process and increment fields.
const TIMESTAMP_SHIFT: u32 = 22;

/// Platform-issued 64-bit identifier, serialized as a decimal string.
///
/// # Examples
///
/// ```
/// use slashgate::interaction::domain::Snowflake;
///
/// let id: Snowflake = "175928847299117063".parse().expect("valid snowflake");
/// let created = id.timestamp().expect("timestamp in range");
/// assert_eq!(created.to_rfc3339(), "2016-04-30T11:18:25.796+00:00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "SnowflakeRepr", into = "String")]
pub struct Snowflake(u64);

impl Snowflake {
    /// Wraps a raw identifier.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Returns the creation time encoded in the identifier.
    ///
    /// Returns `None` when the encoded time falls outside the representable
    /// range.
    #[must_use]
    pub fn timestamp(self) -> Option<DateTime<Utc>> {
        let millis = (self.0 >> TIMESTAMP_SHIFT).checked_add(PLATFORM_EPOCH_MILLIS)?;
        let signed = i64::try_from(millis).ok()?;
        Utc.timestamp_millis_opt(signed).single()
    }
}

impl fmt::Display for Snowflake {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Snowflake {
    type Err = ParseSnowflakeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        value
            .trim()
            .parse::<u64>()
            .map(Self)
            .map_err(|_| ParseSnowflakeError(value.to_owned()))
    }
}

impl From<Snowflake> for String {
    fn from(value: Snowflake) -> Self {
        value.to_string()
    }
}

impl From<u64> for Snowflake {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

/// Wire representation accepted when deserializing identifiers.
#[derive(Deserialize)]
#[serde(untagged)]
enum SnowflakeRepr {
    Text(String),
    Number(u64),
}

impl TryFrom<SnowflakeRepr> for Snowflake {
    type Error = ParseSnowflakeError;

    fn try_from(value: SnowflakeRepr) -> Result<Self, Self::Error> {
        match value {
            SnowflakeRepr::Text(text) => text.parse(),
            SnowflakeRepr::Number(number) => Ok(Self(number)),
        }
    }
}

/// Error returned when a string is not a valid identifier.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid snowflake identifier: '{0}'")]
pub struct ParseSnowflakeError(pub String);
