//! Bulk command publishing port.

use async_trait::async_trait;
use thiserror::Error;

use crate::command::domain::ApplicationCommand;
use crate::interaction::{error::ProtocolError, ports::TransportError};

/// Result type for publish operations.
pub type PublishResult<T> = Result<T, PublishError>;

/// Replaces the platform's registered command list.
#[async_trait]
pub trait CommandPublisher: Send + Sync {
    /// Publishes the full command list, overwriting what was registered.
    async fn publish(&self, commands: &[ApplicationCommand]) -> PublishResult<()>;
}

/// Errors returned by command publishers.
#[derive(Debug, Clone, Error)]
pub enum PublishError {
    /// The publisher is missing required configuration.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The request failed.
    #[error(transparent)]
    Transport(#[from] TransportError),
}
