//! Behavioural tests for the interaction reply channel.

use std::sync::Arc;

use eyre::{Result, WrapErr, eyre};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::json;
use slashgate::interaction::adapters::memory::{InMemoryReplyTransport, RecordedReply};
use slashgate::interaction::domain::{
    EPHEMERAL_FLAG, Interaction, InteractionContext, ReplyKind,
};
use slashgate::interaction::error::ProtocolError;

#[derive(Default)]
struct ReplyWorld {
    transport: InMemoryReplyTransport,
    context: Option<InteractionContext>,
    reinvoke_result: Option<Result<(), ProtocolError>>,
}

#[fixture]
fn world() -> ReplyWorld {
    ReplyWorld::default()
}

fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

fn context(world: &ReplyWorld) -> Result<&InteractionContext> {
    world
        .context
        .as_ref()
        .ok_or_else(|| eyre!("context not initialised"))
}

fn reply_at(world: &ReplyWorld, position: usize) -> Result<RecordedReply> {
    world
        .transport
        .replies()
        .into_iter()
        .nth(position)
        .ok_or_else(|| eyre!("no reply at position {position}"))
}

#[given("a fresh interaction context")]
fn fresh_context(world: &mut ReplyWorld) -> Result<()> {
    let payload = json!({
        "id": "880000000000000003",
        "token": "bdd-token",
        "type": 2,
        "application_id": "900",
        "data": { "name": "ping" }
    });
    let interaction: Interaction =
        serde_json::from_value(payload.clone()).wrap_err("decode interaction")?;
    world.context = Some(InteractionContext::new(
        interaction,
        payload,
        Arc::new(world.transport.clone()),
    ));
    Ok(())
}

#[when("the handler replies twice")]
fn reply_twice(world: &mut ReplyWorld) -> Result<()> {
    let ctx = context(world)?;
    run_async(ctx.reply("first")).wrap_err("first reply")?;
    run_async(ctx.reply("second")).wrap_err("second reply")?;
    Ok(())
}

#[when("the handler replies ephemerally")]
fn reply_ephemerally(world: &mut ReplyWorld) -> Result<()> {
    let ctx = context(world)?;
    ctx.set_ephemeral(true);
    run_async(ctx.reply("only you")).wrap_err("ephemeral reply")?;
    Ok(())
}

#[when("the handler tries to reinvoke the interaction")]
fn try_reinvoke(world: &mut ReplyWorld) -> Result<()> {
    let result = context(world)?.reinvoke();
    world.reinvoke_result = Some(result);
    Ok(())
}

#[then("the first reply is the initial response")]
fn first_is_initial(world: &ReplyWorld) -> Result<()> {
    let reply = reply_at(world, 0)?;
    assert_eq!(reply.kind, ReplyKind::InitialResponse);
    assert_eq!(reply.callback_type, Some(4));
    Ok(())
}

#[then("the second reply is a follow-up")]
fn second_is_follow_up(world: &ReplyWorld) -> Result<()> {
    let reply = reply_at(world, 1)?;
    assert_eq!(reply.kind, ReplyKind::FollowUp);
    assert_eq!(reply.payload.content.as_deref(), Some("second"));
    Ok(())
}

#[then("the reply carries the ephemeral flag")]
fn reply_is_ephemeral(world: &ReplyWorld) -> Result<()> {
    let reply = reply_at(world, 0)?;
    assert_eq!(reply.payload.flags, Some(EPHEMERAL_FLAG));
    Ok(())
}

#[then("reinvoking fails as unsupported")]
fn reinvoke_unsupported(world: &ReplyWorld) {
    assert_eq!(
        world.reinvoke_result,
        Some(Err(ProtocolError::ReinvokeUnsupported))
    );
}

#[scenario(
    path = "tests/features/reply_channel.feature",
    name = "First reply uses the callback and later replies follow up"
)]
#[tokio::test(flavor = "multi_thread")]
async fn first_reply_then_follow_up(world: ReplyWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/reply_channel.feature",
    name = "Ephemeral replies are flagged"
)]
#[tokio::test(flavor = "multi_thread")]
async fn ephemeral_replies_are_flagged(world: ReplyWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/reply_channel.feature",
    name = "Reinvoking an interaction is not supported"
)]
#[tokio::test(flavor = "multi_thread")]
async fn reinvoke_is_unsupported(world: ReplyWorld) {
    let _ = world;
}
