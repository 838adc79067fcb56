//! Inbound interaction routing and the per-interaction reply channel.
//!
//! [`services::InteractionRouter`] filters gateway events, resolves the
//! addressed command and reports failures to a
//! [`ports::CommandErrorHook`]. Replies flow through
//! [`domain::InteractionContext`] and a [`ports::ReplyTransport`].

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
