//! In-memory integration tests for command modules and publishing.

use rstest::rstest;
use serde_json::json;

use super::helpers::{RouterHarness, harness};
use slashgate::command::domain::{CommandDefinition, CommandGroup, LeafCommand, Parameter, ParameterType};
use slashgate::command::ports::{CommandModule, handler_fn};
use slashgate::interaction::adapters::memory::InMemoryCommandPublisher;

struct UtilityModule;

impl CommandModule for UtilityModule {
    fn name(&self) -> &str {
        "utility"
    }

    fn commands(&self) -> Vec<CommandDefinition> {
        vec![
            LeafCommand::new("echo", handler_fn(|_ctx, _args| async { Ok(()) }))
                .with_description("Repeat text")
                .with_parameter(Parameter::new(
                    "text",
                    ParameterType::union([ParameterType::integer(), ParameterType::text()]),
                ))
                .into(),
            CommandGroup::new("config")
                .with_description("Settings")
                .with_child(
                    LeafCommand::new("show", handler_fn(|_ctx, _args| async { Ok(()) }))
                        .with_description("Show settings")
                        .private(true),
                )
                .into(),
        ]
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn module_commands_are_published_in_name_order(harness: RouterHarness) {
    let publisher = InMemoryCommandPublisher::new();
    harness
        .router
        .load_module(&UtilityModule)
        .expect("module should load");

    harness
        .router
        .publish(&publisher)
        .await
        .expect("publish should succeed");

    let published = serde_json::to_value(publisher.published().expect("commands published"))
        .expect("commands serialize");
    assert_eq!(
        published,
        json!([
            {
                "name": "config",
                "description": "Settings",
                "options": [
                    { "type": 1, "name": "show", "description": "Show settings" }
                ]
            },
            {
                "name": "echo",
                "description": "Repeat text",
                "options": [
                    { "type": 3, "name": "text", "description": "Required input", "required": true }
                ]
            },
            {
                "name": "greet",
                "description": "Greetings",
                "options": [
                    {
                        "type": 1,
                        "name": "user",
                        "description": "Greet a user",
                        "options": [
                            { "type": 6, "name": "target", "description": "Required input", "required": true }
                        ]
                    }
                ]
            }
        ])
    );
}

#[rstest]
fn unloading_a_module_keeps_other_commands(harness: RouterHarness) {
    harness
        .router
        .load_module(&UtilityModule)
        .expect("module should load");

    harness.router.unload_module(&UtilityModule);

    assert_eq!(harness.router.command_names(), vec!["greet".to_owned()]);
}
