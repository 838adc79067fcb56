//! Error hook reporting failures through `tracing`.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{info, warn};

use crate::interaction::{domain::InteractionContext, error::CommandError, ports::CommandErrorHook};

/// Default error hook: logs the failure and does not reply.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingErrorHook;

#[async_trait]
impl CommandErrorHook for TracingErrorHook {
    async fn on_command_error(&self, ctx: Arc<InteractionContext>, error: CommandError) {
        let interaction_id = ctx.interaction().id;
        let command = ctx.command_name().unwrap_or_default();
        if error.is_check_failure() {
            info!(%interaction_id, command, %error, "command check failed");
        } else {
            warn!(%interaction_id, command, %error, "command failed");
        }
    }
}
