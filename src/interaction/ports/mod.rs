//! Port trait definitions for the interaction subsystem.

mod error_hook;
mod publisher;
mod transport;

pub use error_hook::CommandErrorHook;
pub use publisher::{CommandPublisher, PublishError, PublishResult};
#[cfg(test)]
pub use transport::MockReplyTransport;
pub use transport::{ReplyTransport, TransportError, TransportResult};
