//! In-memory integration tests for the reply channel.

use rstest::rstest;
use serde_json::json;

use super::helpers::{RouterHarness, command_payload, harness};
use slashgate::command::domain::LeafCommand;
use slashgate::command::ports::handler_fn;
use slashgate::interaction::domain::{EPHEMERAL_FLAG, ReplyKind, ReplyMessage};
use slashgate::interaction::services::RouteOutcome;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn second_reply_becomes_follow_up(harness: RouterHarness) {
    harness
        .router
        .load(LeafCommand::new("twice", handler_fn(|ctx, _args| async move {
            ctx.reply("first").await?;
            ctx.reply(ReplyMessage::text("second").with_embed(json!({ "title": "extra" })))
                .await?;
            Ok(())
        })))
        .expect("twice should load");

    let outcome = harness.router.route(command_payload("twice", json!([]))).await;

    let kinds = harness
        .transport
        .replies()
        .into_iter()
        .map(|reply| reply.kind)
        .collect::<Vec<_>>();
    assert_eq!(outcome, RouteOutcome::Completed);
    assert_eq!(kinds, vec![ReplyKind::InitialResponse, ReplyKind::FollowUp]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn ephemeral_replies_carry_flag(harness: RouterHarness) {
    harness
        .router
        .load(LeafCommand::new("secret", handler_fn(|ctx, _args| async move {
            ctx.set_ephemeral(true);
            ctx.reply("only you").await?;
            Ok(())
        })))
        .expect("secret should load");

    harness.router.route(command_payload("secret", json!([]))).await;

    let flags = harness
        .transport
        .replies()
        .into_iter()
        .map(|reply| reply.payload.flags)
        .collect::<Vec<_>>();
    assert_eq!(flags, vec![Some(EPHEMERAL_FLAG)]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_callback_is_reported_and_retry_stays_initial(harness: RouterHarness) {
    harness
        .router
        .load(LeafCommand::new("retry", handler_fn(|ctx, _args| async move {
            if ctx.reply("attempt").await.is_err() {
                ctx.reply("retried").await?;
            }
            Ok(())
        })))
        .expect("retry should load");
    harness.transport.reject_responses(1);

    let outcome = harness.router.route(command_payload("retry", json!([]))).await;

    let replies = harness.transport.replies();
    assert_eq!(outcome, RouteOutcome::Completed);
    assert_eq!(replies.len(), 1);
    assert!(replies
        .iter()
        .all(|reply| reply.kind == ReplyKind::InitialResponse
            && reply.payload.content.as_deref() == Some("retried")));
}
