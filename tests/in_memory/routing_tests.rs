//! In-memory integration tests for interaction routing.

use rstest::rstest;
use serde_json::json;

use super::helpers::{RouterHarness, command_payload, greet_payload, harness};
use slashgate::command::domain::ArgumentError;
use slashgate::interaction::domain::GatewayEvent;
use slashgate::interaction::error::CommandError;
use slashgate::interaction::services::RouteOutcome;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn greet_user_receives_resolved_entity(harness: RouterHarness) {
    let event = GatewayEvent::interaction_create(greet_payload("123"));

    let outcome = harness.router.on_gateway_event(&event).await;

    assert_eq!(outcome, RouteOutcome::Completed);
    assert_eq!(
        *harness.greeted.lock().expect("greeted lock"),
        vec!["alice".to_owned()]
    );
    assert!(harness.errors.errors().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unresolved_user_is_reported_without_invoking_handler(harness: RouterHarness) {
    let outcome = harness.router.route(greet_payload("999")).await;

    let errors = harness.errors.errors();
    assert_eq!(outcome, RouteOutcome::Failed);
    assert_eq!(errors.len(), 1);
    assert!(errors.iter().all(|(_, error)| matches!(
        error,
        CommandError::Argument(ArgumentError::UnresolvedEntity(_))
    )));
    assert!(harness.greeted.lock().expect("greeted lock").is_empty());
    assert!(harness.transport.replies().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_root_command_is_reported(harness: RouterHarness) {
    let outcome = harness
        .router
        .route(command_payload("unknown", json!([])))
        .await;

    let errors = harness.errors.errors();
    assert_eq!(outcome, RouteOutcome::Failed);
    assert!(errors
        .iter()
        .all(|(_, error)| matches!(error, CommandError::CommandNotFound(name) if name == "unknown")));
    assert_eq!(errors.len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn socket_frames_are_decoded_and_routed(harness: RouterHarness) {
    let frame = json!({ "op": 0, "t": "INTERACTION_CREATE", "d": greet_payload("123") }).to_string();

    let outcome = harness.router.on_socket_message(&frame).await;

    assert_eq!(outcome, RouteOutcome::Completed);
    assert_eq!(harness.transport.replies().len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unloaded_commands_are_no_longer_routed(harness: RouterHarness) {
    harness.router.unload("greet");

    let outcome = harness.router.route(greet_payload("123")).await;

    assert_eq!(outcome, RouteOutcome::Failed);
    assert!(harness.router.command_names().is_empty());
}
