//! Authorization check port.

use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;

use crate::interaction::domain::InteractionContext;

/// A predicate gating command execution.
///
/// Returning `false` aborts the invocation with a check failure.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Check: Send + Sync {
    /// Evaluates the predicate for an invocation.
    async fn check(&self, ctx: &Arc<InteractionContext>) -> bool;
}

struct SyncCheck<F>(F);

#[async_trait]
impl<F> Check for SyncCheck<F>
where
    F: Fn(&InteractionContext) -> bool + Send + Sync,
{
    async fn check(&self, ctx: &Arc<InteractionContext>) -> bool {
        (self.0)(ctx.as_ref())
    }
}

struct AsyncCheck<F>(F);

#[async_trait]
impl<F, Fut> Check for AsyncCheck<F>
where
    F: Fn(Arc<InteractionContext>) -> Fut + Send + Sync,
    Fut: Future<Output = bool> + Send,
{
    async fn check(&self, ctx: &Arc<InteractionContext>) -> bool {
        (self.0)(Arc::clone(ctx)).await
    }
}

/// Wraps a synchronous predicate as a [`Check`].
///
/// # Examples
///
/// ```
/// use slashgate::command::ports::check_fn;
///
/// let guild_only = check_fn(|ctx| ctx.guild_id().is_some());
/// # let _ = guild_only;
/// ```
#[must_use]
pub fn check_fn<F>(predicate: F) -> Arc<dyn Check>
where
    F: Fn(&InteractionContext) -> bool + Send + Sync + 'static,
{
    Arc::new(SyncCheck(predicate))
}

/// Wraps an async predicate as a [`Check`].
#[must_use]
pub fn async_check_fn<F, Fut>(predicate: F) -> Arc<dyn Check>
where
    F: Fn(Arc<InteractionContext>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = bool> + Send + 'static,
{
    Arc::new(AsyncCheck(predicate))
}
