//! Minimal platform entity records materialized from the resolved table.
//!
//! The full object model belongs to the host library; these records carry
//! only the fields needed for argument conversion and handler use.

use serde::{Deserialize, Serialize};

use super::Snowflake;

/// A platform user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// User identifier.
    pub id: Snowflake,
    /// Account name.
    pub username: String,
    /// Display name, when set.
    #[serde(default)]
    pub global_name: Option<String>,
    /// Legacy discriminator, when present.
    #[serde(default)]
    pub discriminator: Option<String>,
    /// Whether the account belongs to a bot.
    #[serde(default)]
    pub bot: bool,
}

/// Guild member data as delivered in payloads, without a guaranteed user.
///
/// Resolved-table entries omit the `user`, `deaf` and `mute` fields; the
/// voice-state flags default to `false`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartialMember {
    /// Embedded user record, present on the invoking member only.
    #[serde(default)]
    pub user: Option<User>,
    /// Guild nickname.
    #[serde(default)]
    pub nick: Option<String>,
    /// Role identifiers held by the member.
    #[serde(default)]
    pub roles: Vec<Snowflake>,
    /// ISO-8601 join timestamp.
    #[serde(default)]
    pub joined_at: Option<String>,
    /// Whether the member is server-deafened.
    #[serde(default)]
    pub deaf: bool,
    /// Whether the member is server-muted.
    #[serde(default)]
    pub mute: bool,
}

impl PartialMember {
    /// Completes the record with its user.
    #[must_use]
    pub fn into_member(self, user: User) -> Member {
        Member {
            user,
            nick: self.nick,
            roles: self.roles,
            joined_at: self.joined_at,
            deaf: self.deaf,
            mute: self.mute,
        }
    }
}

/// A guild member joined with its user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// The member's user record.
    pub user: User,
    /// Guild nickname.
    pub nick: Option<String>,
    /// Role identifiers held by the member.
    pub roles: Vec<Snowflake>,
    /// ISO-8601 join timestamp.
    pub joined_at: Option<String>,
    /// Whether the member is server-deafened.
    pub deaf: bool,
    /// Whether the member is server-muted.
    pub mute: bool,
}

impl Member {
    /// Returns the nickname, falling back to the account name.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.nick
            .as_deref()
            .or(self.user.global_name.as_deref())
            .unwrap_or(&self.user.username)
    }
}

/// A guild or private channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    /// Channel identifier.
    pub id: Snowflake,
    /// Platform channel type.
    #[serde(rename = "type")]
    pub kind: u8,
    /// Channel name.
    #[serde(default)]
    pub name: Option<String>,
    /// Owning guild.
    #[serde(default)]
    pub guild_id: Option<Snowflake>,
    /// Parent category.
    #[serde(default)]
    pub parent_id: Option<Snowflake>,
}

impl Channel {
    /// Channel type of a guild text channel.
    pub const GUILD_TEXT: u8 = 0;
    /// Channel type of a guild category.
    pub const GUILD_CATEGORY: u8 = 4;
}

/// A guild role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Role identifier.
    pub id: Snowflake,
    /// Role name.
    pub name: String,
    /// RGB colour value.
    #[serde(default)]
    pub color: u32,
    /// Sort position.
    #[serde(default)]
    pub position: i64,
}
