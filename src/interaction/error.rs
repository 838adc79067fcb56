//! Error types for interaction routing.

use std::sync::Arc;
use thiserror::Error;

use crate::command::domain::ArgumentError;
use crate::interaction::ports::TransportError;

/// Failure raised while routing one interaction.
///
/// Every variant is caught at the router boundary and delivered to the
/// [`CommandErrorHook`](crate::interaction::ports::CommandErrorHook).
#[derive(Debug, Clone, Error)]
pub enum CommandError {
    /// The top-level command is not registered.
    #[error("the root command \"{0}\" was not found")]
    CommandNotFound(String),

    /// Sub-command resolution or argument conversion failed.
    #[error(transparent)]
    Argument(#[from] ArgumentError),

    /// An authorization check rejected the invocation.
    #[error("the check functions for command {command} failed")]
    CheckFailure {
        /// Qualified command name.
        command: String,
    },

    /// The context was used in a way the protocol does not allow.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A reply could not be delivered.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The application handler failed.
    #[error("command handler failed: {0}")]
    Handler(Arc<dyn std::error::Error + Send + Sync>),
}

impl CommandError {
    /// Wraps an application error raised by a handler.
    pub fn handler(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Handler(Arc::new(err))
    }

    /// Returns `true` for check failures.
    #[must_use]
    pub const fn is_check_failure(&self) -> bool {
        matches!(self, Self::CheckFailure { .. })
    }
}

/// Programmer-usage errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProtocolError {
    /// Slash interactions cannot be replayed.
    #[error("reinvoke is not implemented for slash commands")]
    ReinvokeUnsupported,

    /// Publishing was attempted before the application id was known.
    #[error("slash commands are not initialised: {0}")]
    NotInitialized(String),
}
