//! Command handler port.

use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;

use crate::command::domain::Arguments;
use crate::interaction::{domain::InteractionContext, error::CommandError};

/// Application code invoked for a leaf command.
///
/// The invocation context is always the first argument; converted option
/// values follow in declaration order.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommandHandler: Send + Sync {
    /// Runs the command.
    async fn invoke(
        &self,
        ctx: Arc<InteractionContext>,
        arguments: Arguments,
    ) -> Result<(), CommandError>;
}

struct FnHandler<F>(F);

#[async_trait]
impl<F, Fut> CommandHandler for FnHandler<F>
where
    F: Fn(Arc<InteractionContext>, Arguments) -> Fut + Send + Sync,
    Fut: Future<Output = Result<(), CommandError>> + Send,
{
    async fn invoke(
        &self,
        ctx: Arc<InteractionContext>,
        arguments: Arguments,
    ) -> Result<(), CommandError> {
        (self.0)(ctx, arguments).await
    }
}

/// Wraps an async closure as a [`CommandHandler`].
#[must_use]
pub fn handler_fn<F, Fut>(handler: F) -> Arc<dyn CommandHandler>
where
    F: Fn(Arc<InteractionContext>, Arguments) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), CommandError>> + Send + 'static,
{
    Arc::new(FnHandler(handler))
}
