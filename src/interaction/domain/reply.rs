//! Reply payloads and the per-interaction reply state machine.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Message flag marking a response as visible to the invoker only.
pub const EPHEMERAL_FLAG: u64 = 1 << 6;

/// Callback type answering with a message in the invoking channel.
pub const CHANNEL_MESSAGE_WITH_SOURCE: u8 = 4;

/// Reply state of one interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplyState {
    /// The callback token has not been exchanged yet.
    #[default]
    Unreplied,
    /// The initial callback has been sent; replies are follow-ups.
    FirstReplySent,
}

/// Path taken by a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyKind {
    /// Sent through the single-use initial callback.
    InitialResponse,
    /// Sent as a follow-up message.
    FollowUp,
}

/// A reply composed by a handler.
///
/// # Examples
///
/// ```
/// use slashgate::interaction::domain::ReplyMessage;
/// use serde_json::json;
///
/// let reply = ReplyMessage::text("pong").with_embed(json!({"title": "Latency"}));
/// let payload = reply.to_payload(true);
/// assert_eq!(payload.flags, Some(64));
/// assert_eq!(payload.content.as_deref(), Some("pong"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReplyMessage {
    content: Option<String>,
    tts: bool,
    embed: Option<Value>,
    embeds: Vec<Value>,
    allowed_mentions: Option<Value>,
}

impl ReplyMessage {
    /// Creates an empty reply.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a plain-text reply.
    #[must_use]
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    /// Enables text-to-speech.
    #[must_use]
    pub const fn with_tts(mut self, tts: bool) -> Self {
        self.tts = tts;
        self
    }

    /// Sets a single embed; it takes precedence over [`Self::with_embeds`].
    #[must_use]
    pub fn with_embed(mut self, embed: Value) -> Self {
        self.embed = Some(embed);
        self
    }

    /// Sets a list of embeds.
    #[must_use]
    pub fn with_embeds(mut self, embeds: impl IntoIterator<Item = Value>) -> Self {
        self.embeds = embeds.into_iter().collect();
        self
    }

    /// Sets the allowed-mentions object.
    #[must_use]
    pub fn with_allowed_mentions(mut self, allowed_mentions: Value) -> Self {
        self.allowed_mentions = Some(allowed_mentions);
        self
    }

    /// Returns the text content.
    #[must_use]
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// Renders the wire payload.
    #[must_use]
    pub fn to_payload(&self, ephemeral: bool) -> MessagePayload {
        let embeds = match (&self.embed, self.embeds.is_empty()) {
            (Some(embed), _) => Some(vec![embed.clone()]),
            (None, false) => Some(self.embeds.clone()),
            (None, true) => None,
        };

        MessagePayload {
            tts: self.tts,
            flags: ephemeral.then_some(EPHEMERAL_FLAG),
            content: self.content.clone().filter(|content| !content.is_empty()),
            embeds,
            allowed_mentions: self.allowed_mentions.clone(),
        }
    }
}

impl From<&str> for ReplyMessage {
    fn from(content: &str) -> Self {
        Self::text(content)
    }
}

impl From<String> for ReplyMessage {
    fn from(content: String) -> Self {
        Self::text(content)
    }
}

/// Message body shared by initial callbacks and follow-ups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessagePayload {
    /// Text-to-speech flag.
    pub tts: bool,
    /// Message flags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flags: Option<u64>,
    /// Text content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Serialized embeds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub embeds: Option<Vec<Value>>,
    /// Allowed-mentions object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub allowed_mentions: Option<Value>,
}

/// Body of the initial interaction callback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionCallback {
    /// Callback type.
    #[serde(rename = "type")]
    pub kind: u8,
    /// Message data.
    pub data: MessagePayload,
}

impl InteractionCallback {
    /// Wraps a payload as a "message with source" callback.
    #[must_use]
    pub const fn message_with_source(data: MessagePayload) -> Self {
        Self {
            kind: CHANNEL_MESSAGE_WITH_SOURCE,
            data,
        }
    }
}
