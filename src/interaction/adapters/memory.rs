//! In-memory adapters recording replies, errors and published commands.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::command::domain::ApplicationCommand;
use crate::interaction::{
    domain::{Interaction, InteractionCallback, InteractionContext, MessagePayload, ReplyKind, Snowflake},
    error::CommandError,
    ports::{CommandErrorHook, CommandPublisher, PublishResult, ReplyTransport, TransportError, TransportResult},
};

/// A reply captured by [`InMemoryReplyTransport`].
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedReply {
    /// Interaction the reply belongs to.
    pub interaction_id: Snowflake,
    /// Delivery path used.
    pub kind: ReplyKind,
    /// Callback type for initial responses.
    pub callback_type: Option<u8>,
    /// Message body.
    pub payload: MessagePayload,
}

/// Thread-safe reply transport that records instead of sending.
#[derive(Debug, Clone, Default)]
pub struct InMemoryReplyTransport {
    state: Arc<RwLock<TransportState>>,
}

#[derive(Debug, Default)]
struct TransportState {
    replies: Vec<RecordedReply>,
    rejected_responses: usize,
}

impl InMemoryReplyTransport {
    /// Creates an empty transport.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects the next `count` initial responses with a 500 status.
    pub fn reject_responses(&self, count: usize) {
        let mut state = self.state.write().unwrap_or_else(std::sync::PoisonError::into_inner);
        state.rejected_responses = count;
    }

    /// Returns every recorded reply in delivery order.
    #[must_use]
    pub fn replies(&self) -> Vec<RecordedReply> {
        self.state
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .replies
            .clone()
    }

    fn record(&self, reply: RecordedReply) -> TransportResult<()> {
        let mut state = self
            .state
            .write()
            .map_err(|err| TransportError::request(std::io::Error::other(err.to_string())))?;
        state.replies.push(reply);
        Ok(())
    }
}

#[async_trait]
impl ReplyTransport for InMemoryReplyTransport {
    async fn create_response(
        &self,
        interaction: &Interaction,
        callback: &InteractionCallback,
    ) -> TransportResult<()> {
        {
            let mut state = self
                .state
                .write()
                .map_err(|err| TransportError::request(std::io::Error::other(err.to_string())))?;
            if state.rejected_responses > 0 {
                state.rejected_responses -= 1;
                return Err(TransportError::Status {
                    status: 500,
                    body: "rejected".to_owned(),
                });
            }
        }

        self.record(RecordedReply {
            interaction_id: interaction.id,
            kind: ReplyKind::InitialResponse,
            callback_type: Some(callback.kind),
            payload: callback.data.clone(),
        })
    }

    async fn create_followup(
        &self,
        interaction: &Interaction,
        message: &MessagePayload,
    ) -> TransportResult<()> {
        self.record(RecordedReply {
            interaction_id: interaction.id,
            kind: ReplyKind::FollowUp,
            callback_type: None,
            payload: message.clone(),
        })
    }
}

/// Error hook that keeps every report for later inspection.
#[derive(Debug, Clone, Default)]
pub struct RecordingErrorHook {
    errors: Arc<RwLock<Vec<(Snowflake, CommandError)>>>,
}

impl RecordingErrorHook {
    /// Creates an empty hook.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns recorded `(interaction id, error)` pairs.
    #[must_use]
    pub fn errors(&self) -> Vec<(Snowflake, CommandError)> {
        self.errors
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl CommandErrorHook for RecordingErrorHook {
    async fn on_command_error(&self, ctx: Arc<InteractionContext>, error: CommandError) {
        self.errors
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push((ctx.interaction().id, error));
    }
}

/// Publisher that stores the most recent command list.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCommandPublisher {
    published: Arc<RwLock<Option<Vec<ApplicationCommand>>>>,
}

impl InMemoryCommandPublisher {
    /// Creates a publisher with nothing published.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the last published list.
    #[must_use]
    pub fn published(&self) -> Option<Vec<ApplicationCommand>> {
        self.published
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl CommandPublisher for InMemoryCommandPublisher {
    async fn publish(&self, commands: &[ApplicationCommand]) -> PublishResult<()> {
        let mut published = self
            .published
            .write()
            .map_err(|err| TransportError::request(std::io::Error::other(err.to_string())))?;
        *published = Some(commands.to_vec());
        Ok(())
    }
}
