//! Serialized command trees for bulk publishing.

use serde::{Deserialize, Serialize};

use super::OptionType;

/// One top-level command as registered with the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationCommand {
    /// Command name.
    pub name: String,
    /// Command description.
    pub description: String,
    /// Arguments, or sub-commands for groups.
    #[serde(default)]
    pub options: Vec<ApplicationCommandOption>,
}

/// An argument or sub-command entry of a registered command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationCommandOption {
    /// Option type id.
    #[serde(rename = "type")]
    pub kind: OptionType,
    /// Option name.
    pub name: String,
    /// Option description.
    pub description: String,
    /// Whether the value must be supplied; omitted for sub-commands.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    /// Nested options of sub-commands and groups.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<ApplicationCommandOption>,
}
