//! Error-report port for failed interactions.

use async_trait::async_trait;
use std::sync::Arc;

use crate::interaction::{domain::InteractionContext, error::CommandError};

/// Receives the single error report produced for a failed interaction.
///
/// The router never replies on its own; hooks decide whether the invoking
/// user sees anything.
#[async_trait]
pub trait CommandErrorHook: Send + Sync {
    /// Called once per failed interaction.
    async fn on_command_error(&self, ctx: Arc<InteractionContext>, error: CommandError);
}
