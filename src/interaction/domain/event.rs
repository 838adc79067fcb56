//! Inbound gateway events and interaction payloads.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;

use super::{Channel, PartialMember, Role, Snowflake, User};
use crate::command::domain::OptionType;

/// Gateway dispatch name carrying interactions.
pub const INTERACTION_CREATE: &str = "INTERACTION_CREATE";

/// A raw gateway frame as received from the socket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayEvent {
    /// Dispatch event name (`t`), absent for non-dispatch opcodes.
    #[serde(default)]
    pub t: Option<String>,
    /// Event payload (`d`).
    #[serde(default)]
    pub d: Option<Value>,
}

impl GatewayEvent {
    /// Creates an `INTERACTION_CREATE` dispatch wrapping `payload`.
    #[must_use]
    pub fn interaction_create(payload: Value) -> Self {
        Self {
            t: Some(INTERACTION_CREATE.to_owned()),
            d: Some(payload),
        }
    }

    /// Returns the interaction type of the payload when this is an
    /// interaction dispatch.
    #[must_use]
    pub fn interaction_kind(&self) -> Option<InteractionKind> {
        if self.t.as_deref() != Some(INTERACTION_CREATE) {
            return None;
        }
        self.d
            .as_ref()
            .and_then(|payload| payload.get("type"))
            .and_then(Value::as_u64)
            .and_then(|kind| u8::try_from(kind).ok())
            .map(InteractionKind::from)
    }
}

/// Interaction type discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "u8", into = "u8")]
pub enum InteractionKind {
    /// Endpoint verification ping.
    Ping,
    /// A slash-command invocation.
    ApplicationCommand,
    /// A UI component interaction.
    MessageComponent,
    /// Any other interaction type.
    Other(u8),
}

impl From<u8> for InteractionKind {
    fn from(value: u8) -> Self {
        match value {
            1 => Self::Ping,
            2 => Self::ApplicationCommand,
            3 => Self::MessageComponent,
            other => Self::Other(other),
        }
    }
}

impl From<InteractionKind> for u8 {
    fn from(value: InteractionKind) -> Self {
        match value {
            InteractionKind::Ping => 1,
            InteractionKind::ApplicationCommand => 2,
            InteractionKind::MessageComponent => 3,
            InteractionKind::Other(other) => other,
        }
    }
}

impl InteractionKind {
    /// Returns `true` for kinds accepted by the gateway filter.
    #[must_use]
    pub const fn is_dispatchable(self) -> bool {
        matches!(self, Self::ApplicationCommand | Self::MessageComponent)
    }
}

/// A single inbound interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    /// Interaction identifier, first half of the callback token pair.
    pub id: Snowflake,
    /// Single-use callback token.
    pub token: String,
    /// Interaction type.
    #[serde(rename = "type")]
    pub kind: InteractionKind,
    /// Owning application.
    #[serde(default)]
    pub application_id: Option<Snowflake>,
    /// Command data for application-command interactions.
    #[serde(default)]
    pub data: Option<CommandData>,
    /// Channel the interaction was sent from.
    #[serde(default)]
    pub channel_id: Option<Snowflake>,
    /// Guild the interaction was sent from.
    #[serde(default)]
    pub guild_id: Option<Snowflake>,
    /// Invoking member, for guild interactions.
    #[serde(default)]
    pub member: Option<PartialMember>,
    /// Invoking user, for direct-message interactions.
    #[serde(default)]
    pub user: Option<User>,
}

impl Interaction {
    /// Recovers the routing envelope of a payload that failed full decoding.
    ///
    /// Only the identifier, token, type, application and guild fields and
    /// the command name are read; options and resolved entities are dropped.
    /// Returns `None` when the payload cannot even be addressed.
    #[must_use]
    pub fn recover(payload: &Value) -> Option<Self> {
        let field = |key: &str| payload.get(key).filter(|value| !value.is_null());
        let snowflake =
            |key: &str| field(key).and_then(|value| Snowflake::deserialize(value).ok());

        let id = snowflake("id")?;
        let token = field("token")?.as_str()?.to_owned();
        let kind = field("type")
            .and_then(Value::as_u64)
            .and_then(|kind| u8::try_from(kind).ok())
            .map(InteractionKind::from)?;
        let name = payload
            .pointer("/data/name")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_owned();

        Some(Self {
            id,
            token,
            kind,
            application_id: snowflake("application_id"),
            data: Some(CommandData {
                name,
                ..CommandData::default()
            }),
            channel_id: snowflake("channel_id"),
            guild_id: snowflake("guild_id"),
            member: None,
            user: None,
        })
    }

    /// Returns the invoked top-level command name.
    #[must_use]
    pub fn command_name(&self) -> Option<&str> {
        self.data.as_ref().map(|data| data.name.as_str())
    }

    /// Returns the top-level option list, empty when no data is present.
    #[must_use]
    pub fn options(&self) -> &[CommandOption] {
        self.data
            .as_ref()
            .map_or(&[][..], |data| data.options.as_slice())
    }

    /// Returns the resolved entity table, if any.
    #[must_use]
    pub fn resolved(&self) -> Option<&ResolvedData> {
        self.data.as_ref().map(|data| &data.resolved)
    }

    /// Returns the invoking user, whether sent as a member or a user.
    #[must_use]
    pub fn author(&self) -> Option<&User> {
        self.member
            .as_ref()
            .and_then(|member| member.user.as_ref())
            .or(self.user.as_ref())
    }
}

/// Command data attached to an application-command interaction.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandData {
    /// Registered command identifier.
    #[serde(default)]
    pub id: Option<Snowflake>,
    /// Top-level command name.
    #[serde(default)]
    pub name: String,
    /// Supplied options.
    #[serde(default)]
    pub options: Vec<CommandOption>,
    /// Entities referenced by option values, keyed by identifier.
    #[serde(default)]
    pub resolved: ResolvedData,
}

/// One supplied option, or a sub-command carrying nested options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandOption {
    /// Option name.
    pub name: String,
    /// Raw option type id, kept even for types this crate does not model.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<u8>,
    /// Raw option value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// Nested options of a sub-command or group.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<CommandOption>,
}

impl CommandOption {
    /// Returns the option type, or `None` when absent or not modelled.
    #[must_use]
    pub fn option_type(&self) -> Option<OptionType> {
        self.kind.and_then(|id| OptionType::try_from(id).ok())
    }
}

/// Side table of fully materialized entities referenced by option values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedData {
    /// Users keyed by identifier.
    #[serde(default)]
    pub users: HashMap<String, User>,
    /// Members keyed by user identifier.
    #[serde(default)]
    pub members: HashMap<String, PartialMember>,
    /// Channels keyed by identifier.
    #[serde(default)]
    pub channels: HashMap<String, Channel>,
    /// Roles keyed by identifier.
    #[serde(default)]
    pub roles: HashMap<String, Role>,
}
