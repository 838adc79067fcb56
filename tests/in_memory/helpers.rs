//! Shared router fixtures for in-memory integration tests.

use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

use rstest::fixture;
use slashgate::command::domain::{CommandGroup, LeafCommand, Parameter, ParameterType};
use slashgate::command::ports::handler_fn;
use slashgate::command::services::CommandRegistry;
use slashgate::interaction::adapters::memory::{InMemoryReplyTransport, RecordingErrorHook};
use slashgate::interaction::services::InteractionRouter;

/// Router wired to recording adapters, with a `greet user <target>` tree.
pub struct RouterHarness {
    pub router: InteractionRouter,
    pub transport: InMemoryReplyTransport,
    pub errors: RecordingErrorHook,
    pub greeted: Arc<Mutex<Vec<String>>>,
}

#[fixture]
pub fn harness() -> RouterHarness {
    let transport = InMemoryReplyTransport::new();
    let errors = RecordingErrorHook::new();
    let greeted = Arc::new(Mutex::new(Vec::new()));
    let router = InteractionRouter::new(CommandRegistry::new(), Arc::new(transport.clone()))
        .with_error_hook(Arc::new(errors.clone()));

    let sink = Arc::clone(&greeted);
    let greet_user = LeafCommand::new(
        "user",
        handler_fn(move |ctx, args| {
            let recorded = Arc::clone(&sink);
            async move {
                let target = args.user("target")?.username.clone();
                recorded.lock().expect("greeted lock").push(target.clone());
                ctx.reply(format!("Hello, {target}!")).await?;
                Ok(())
            }
        }),
    )
    .with_description("Greet a user")
    .with_parameter(Parameter::new("target", ParameterType::user()));

    router
        .load(
            CommandGroup::new("greet")
                .with_description("Greetings")
                .with_child(greet_user),
        )
        .expect("greet should load");

    RouterHarness {
        router,
        transport,
        errors,
        greeted,
    }
}

/// Builds an application-command interaction payload.
pub fn command_payload(name: &str, options: Value) -> Value {
    json!({
        "id": "880000000000000000",
        "token": "integration-token",
        "type": 2,
        "application_id": "900",
        "guild_id": "100",
        "channel_id": "300",
        "member": { "user": { "id": "1", "username": "invoker" }, "roles": [] },
        "data": {
            "name": name,
            "options": options,
            "resolved": {
                "users": { "123": { "id": "123", "username": "alice" } }
            }
        }
    })
}

/// Builds the `greet user` payload addressed at `target`.
pub fn greet_payload(target: &str) -> Value {
    command_payload(
        "greet",
        json!([{ "name": "user", "type": 1, "options": [{ "name": "target", "value": target }] }]),
    )
}
