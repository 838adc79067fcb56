//! Outbound reply transport port.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::interaction::domain::{Interaction, InteractionCallback, MessagePayload};

/// Result type for reply transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Delivery contract for interaction replies.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReplyTransport: Send + Sync {
    /// Exchanges the interaction's callback token for the initial response.
    async fn create_response(
        &self,
        interaction: &Interaction,
        callback: &InteractionCallback,
    ) -> TransportResult<()>;

    /// Sends a follow-up message once the initial response is consumed.
    async fn create_followup(
        &self,
        interaction: &Interaction,
        message: &MessagePayload,
    ) -> TransportResult<()>;
}

/// Errors returned by reply transports.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    /// The platform answered with a non-success status.
    #[error("platform rejected request with status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: String,
    },

    /// A required routing value was missing from the interaction.
    #[error("cannot deliver reply: {0}")]
    MissingRoute(String),

    /// The request could not be sent.
    #[error("reply transport failure: {0}")]
    Request(Arc<dyn std::error::Error + Send + Sync>),
}

impl TransportError {
    /// Wraps a request failure from the transport adapter.
    pub fn request(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Request(Arc::new(err))
    }
}
