//! Per-interaction invocation context and reply channel.

use chrono::{DateTime, Utc};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Mutex;
use tracing::debug;

use super::{
    Interaction, InteractionCallback, ReplyKind, ReplyMessage, ReplyState, ResolvedData,
    Snowflake,
};
use crate::interaction::error::ProtocolError;
use crate::interaction::ports::{ReplyTransport, TransportResult};

/// Context handed to checks, converters and handlers for one interaction.
///
/// The context owns the interaction's single-use callback token. The first
/// successful [`reply`](Self::reply) exchanges the token for the initial
/// callback; every later reply becomes a follow-up message.
pub struct InteractionContext {
    interaction: Interaction,
    raw: Value,
    transport: Arc<dyn ReplyTransport>,
    ephemeral: AtomicBool,
    state: Mutex<ReplyState>,
}

impl InteractionContext {
    /// Creates a context for a decoded interaction and its raw payload.
    #[must_use]
    pub fn new(interaction: Interaction, raw: Value, transport: Arc<dyn ReplyTransport>) -> Self {
        Self {
            interaction,
            raw,
            transport,
            ephemeral: AtomicBool::new(false),
            state: Mutex::new(ReplyState::Unreplied),
        }
    }

    /// Returns the decoded interaction.
    #[must_use]
    pub const fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    /// Returns the raw event payload.
    #[must_use]
    pub const fn raw(&self) -> &Value {
        &self.raw
    }

    /// Returns the resolved entity table, if any.
    #[must_use]
    pub fn resolved(&self) -> Option<&ResolvedData> {
        self.interaction.resolved()
    }

    /// Returns the invoked top-level command name.
    #[must_use]
    pub fn command_name(&self) -> Option<&str> {
        self.interaction.command_name()
    }

    /// Returns the guild the interaction came from.
    #[must_use]
    pub const fn guild_id(&self) -> Option<Snowflake> {
        self.interaction.guild_id
    }

    /// Returns the identifier of the invoking user.
    #[must_use]
    pub fn author_id(&self) -> Option<Snowflake> {
        self.interaction.author().map(|user| user.id)
    }

    /// Returns the time the interaction was created, derived from its id.
    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.interaction.id.timestamp()
    }

    /// Marks replies as visible to the invoker only.
    ///
    /// Only affects replies sent after the call.
    pub fn set_ephemeral(&self, ephemeral: bool) {
        self.ephemeral.store(ephemeral, Ordering::Release);
    }

    /// Returns whether replies are ephemeral.
    #[must_use]
    pub fn is_ephemeral(&self) -> bool {
        self.ephemeral.load(Ordering::Acquire)
    }

    /// Returns the current reply state.
    pub async fn reply_state(&self) -> ReplyState {
        *self.state.lock().await
    }

    /// Sends a reply.
    ///
    /// The first call sends the initial callback and moves the context to
    /// [`ReplyState::FirstReplySent`]; later calls send follow-ups. A failed
    /// initial callback leaves the context unreplied.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`](crate::interaction::ports::TransportError)
    /// when the platform rejects the request or it cannot be delivered.
    pub async fn reply(&self, message: impl Into<ReplyMessage>) -> TransportResult<ReplyKind> {
        let reply = message.into();
        let payload = reply.to_payload(self.is_ephemeral());
        let mut state = self.state.lock().await;

        match *state {
            ReplyState::Unreplied => {
                let callback = InteractionCallback::message_with_source(payload);
                self.transport
                    .create_response(&self.interaction, &callback)
                    .await?;
                *state = ReplyState::FirstReplySent;
                debug!(interaction_id = %self.interaction.id, "initial response sent");
                Ok(ReplyKind::InitialResponse)
            }
            ReplyState::FirstReplySent => {
                self.transport
                    .create_followup(&self.interaction, &payload)
                    .await?;
                debug!(interaction_id = %self.interaction.id, "follow-up sent");
                Ok(ReplyKind::FollowUp)
            }
        }
    }

    /// Re-running an interaction is not possible; always fails.
    ///
    /// # Errors
    ///
    /// Always returns [`ProtocolError::ReinvokeUnsupported`].
    #[expect(
        clippy::unused_self,
        reason = "mirrors the host context API where reinvoke is a method"
    )]
    pub const fn reinvoke(&self) -> Result<(), ProtocolError> {
        Err(ProtocolError::ReinvokeUnsupported)
    }
}

impl fmt::Debug for InteractionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InteractionContext")
            .field("interaction_id", &self.interaction.id)
            .field("command", &self.interaction.command_name())
            .field("ephemeral", &self.is_ephemeral())
            .finish_non_exhaustive()
    }
}
