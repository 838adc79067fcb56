//! Platform option type identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Option type identifiers understood by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum OptionType {
    /// A sub-command (1).
    SubCommand,
    /// A group of sub-commands (2).
    SubCommandGroup,
    /// Free text (3).
    String,
    /// Integer (4).
    Integer,
    /// Boolean (5).
    Boolean,
    /// User reference (6).
    User,
    /// Channel reference (7).
    Channel,
    /// Role reference (8).
    Role,
    /// User or role reference (9).
    Mentionable,
}

impl OptionType {
    /// Returns the numeric type id.
    #[must_use]
    pub const fn id(self) -> u8 {
        match self {
            Self::SubCommand => 1,
            Self::SubCommandGroup => 2,
            Self::String => 3,
            Self::Integer => 4,
            Self::Boolean => 5,
            Self::User => 6,
            Self::Channel => 7,
            Self::Role => 8,
            Self::Mentionable => 9,
        }
    }

    /// Returns `true` for sub-command and sub-command group options.
    #[must_use]
    pub const fn is_subcommand(self) -> bool {
        matches!(self, Self::SubCommand | Self::SubCommandGroup)
    }

    /// Returns `true` when values of this type carry an entity id.
    #[must_use]
    pub const fn is_identifiable(self) -> bool {
        !matches!(self, Self::String | Self::Integer | Self::Boolean)
    }
}

impl From<OptionType> for u8 {
    fn from(value: OptionType) -> Self {
        value.id()
    }
}

impl TryFrom<u8> for OptionType {
    type Error = UnknownOptionType;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::SubCommand),
            2 => Ok(Self::SubCommandGroup),
            3 => Ok(Self::String),
            4 => Ok(Self::Integer),
            5 => Ok(Self::Boolean),
            6 => Ok(Self::User),
            7 => Ok(Self::Channel),
            8 => Ok(Self::Role),
            9 => Ok(Self::Mentionable),
            other => Err(UnknownOptionType(other)),
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

/// Error returned for option type ids outside the supported range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown option type id {0}")]
pub struct UnknownOptionType(pub u8);
