//! Gateway event routing to registered commands.

use serde::Deserialize;
use serde_json::Value;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, instrument, warn};

use crate::command::domain::{
    ApplicationCommand, ArgumentError, CommandDefinition, CommandNode, ConstructionError, GlobalChecks,
};
use crate::command::ports::CommandModule;
use crate::command::services::CommandRegistry;
use crate::interaction::adapters::logging::TracingErrorHook;
use crate::interaction::domain::{GatewayEvent, Interaction, InteractionContext, InteractionKind};
use crate::interaction::error::CommandError;
use crate::interaction::ports::{CommandErrorHook, CommandPublisher, PublishResult, ReplyTransport};

/// How the router disposed of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    /// The handler ran to completion.
    Completed,
    /// Routing failed and the error hook was called.
    Failed,
    /// The event is not a slash-command invocation.
    Ignored,
}

/// Decodes a gateway text frame.
///
/// # Errors
///
/// Returns the JSON error when the frame is not a gateway event.
pub fn parse_gateway_event(frame: &str) -> Result<GatewayEvent, serde_json::Error> {
    serde_json::from_str(frame)
}

/// Routes interaction events to the registered command trees.
///
/// The router never returns routing failures to the caller; each failed
/// interaction produces exactly one call to the configured
/// [`CommandErrorHook`].
pub struct InteractionRouter {
    registry: RwLock<CommandRegistry>,
    checks: GlobalChecks,
    transport: Arc<dyn ReplyTransport>,
    error_hook: Arc<dyn CommandErrorHook>,
}

impl InteractionRouter {
    /// Creates a router replying through `transport` and logging failures.
    #[must_use]
    pub fn new(registry: CommandRegistry, transport: Arc<dyn ReplyTransport>) -> Self {
        Self {
            registry: RwLock::new(registry),
            checks: GlobalChecks::default(),
            transport,
            error_hook: Arc::new(TracingErrorHook),
        }
    }

    /// Replaces the error hook.
    #[must_use]
    pub fn with_error_hook(mut self, error_hook: Arc<dyn CommandErrorHook>) -> Self {
        self.error_hook = error_hook;
        self
    }

    /// Sets the checks applied before every command.
    #[must_use]
    pub fn with_global_checks(mut self, checks: GlobalChecks) -> Self {
        self.checks = checks;
        self
    }

    fn read_registry(&self) -> RwLockReadGuard<'_, CommandRegistry> {
        self.registry.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_registry(&self) -> RwLockWriteGuard<'_, CommandRegistry> {
        self.registry.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Builds and registers a root command.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError`] when the definition cannot be built.
    pub fn load(&self, definition: impl Into<CommandDefinition>) -> Result<(), ConstructionError> {
        self.write_registry().load(definition)
    }

    /// Removes a root command; unknown names are ignored.
    pub fn unload(&self, name: &str) {
        self.write_registry().unload(name);
    }

    /// Registers every command of a module.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError`] when any definition cannot be built;
    /// nothing is registered in that case.
    pub fn load_module(&self, module: &dyn CommandModule) -> Result<(), ConstructionError> {
        self.write_registry().load_module(module)
    }

    /// Removes every command of a module.
    pub fn unload_module(&self, module: &dyn CommandModule) {
        self.write_registry().unload_module(module);
    }

    /// Returns the registered root command names in order.
    #[must_use]
    pub fn command_names(&self) -> Vec<String> {
        self.read_registry().names().map(str::to_owned).collect()
    }

    /// Serializes every registered command for publishing.
    #[must_use]
    pub fn application_commands(&self) -> Vec<ApplicationCommand> {
        self.read_registry().application_commands()
    }

    /// Publishes the registered commands, replacing the platform's list.
    ///
    /// # Errors
    ///
    /// Returns the publisher's error.
    pub async fn publish(&self, publisher: &dyn CommandPublisher) -> PublishResult<()> {
        let commands = self.application_commands();
        publisher.publish(&commands).await
    }

    fn lookup(&self, name: &str) -> Option<Arc<CommandNode>> {
        self.read_registry().resolve(name)
    }

    /// Decodes a socket text frame and routes it.
    ///
    /// Undecodable frames are logged and ignored.
    pub async fn on_socket_message(&self, frame: &str) -> RouteOutcome {
        match parse_gateway_event(frame) {
            Ok(event) => self.on_gateway_event(&event).await,
            Err(err) => {
                warn!(error = %err, "ignoring undecodable gateway frame");
                RouteOutcome::Ignored
            }
        }
    }

    /// Routes a gateway event.
    ///
    /// Only `INTERACTION_CREATE` dispatches of application-command or
    /// component interactions pass the filter.
    pub async fn on_gateway_event(&self, event: &GatewayEvent) -> RouteOutcome {
        let dispatchable = event
            .interaction_kind()
            .is_some_and(InteractionKind::is_dispatchable);
        match (&event.d, dispatchable) {
            (Some(payload), true) => self.route(payload.clone()).await,
            _ => RouteOutcome::Ignored,
        }
    }

    /// Routes one interaction payload.
    ///
    /// Component interactions are ignored. Failures are reported to the
    /// error hook with the interaction context, including command payloads
    /// that do not decode.
    pub async fn route(&self, payload: Value) -> RouteOutcome {
        let interaction = match Interaction::deserialize(&payload) {
            Ok(decoded) => decoded,
            Err(err) => return self.report_malformed(payload, &err).await,
        };

        if interaction.kind != InteractionKind::ApplicationCommand {
            debug!(interaction_id = %interaction.id, kind = ?interaction.kind, "ignoring non-command interaction");
            return RouteOutcome::Ignored;
        }

        let ctx = Arc::new(InteractionContext::new(
            interaction,
            payload,
            Arc::clone(&self.transport),
        ));

        match self.dispatch(&ctx).await {
            Ok(()) => RouteOutcome::Completed,
            Err(error) => {
                self.error_hook.on_command_error(Arc::clone(&ctx), error).await;
                RouteOutcome::Failed
            }
        }
    }

    async fn report_malformed(&self, payload: Value, err: &serde_json::Error) -> RouteOutcome {
        let Some(interaction) = Interaction::recover(&payload)
            .filter(|partial| partial.kind == InteractionKind::ApplicationCommand)
        else {
            warn!(error = %err, "ignoring undecodable interaction payload");
            return RouteOutcome::Ignored;
        };

        let ctx = Arc::new(InteractionContext::new(
            interaction,
            payload,
            Arc::clone(&self.transport),
        ));
        let error = ArgumentError::MalformedPayload(err.to_string());
        self.error_hook.on_command_error(ctx, error.into()).await;
        RouteOutcome::Failed
    }

    #[instrument(skip_all, fields(interaction_id = %ctx.interaction().id, command = ctx.command_name()))]
    async fn dispatch(&self, ctx: &Arc<InteractionContext>) -> Result<(), CommandError> {
        let name = ctx.command_name().unwrap_or_default();
        let node = self
            .lookup(name)
            .ok_or_else(|| CommandError::CommandNotFound(name.to_owned()))?;
        node.execute(ctx, ctx.interaction().options(), &self.checks)
            .await
    }
}
