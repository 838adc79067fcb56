//! Port trait definitions for the command subsystem.

mod check;
mod converter;
mod handler;
mod module;

#[cfg(test)]
pub use check::MockCheck;
pub use check::{Check, async_check_fn, check_fn};
#[cfg(test)]
pub use converter::MockCustomConverter;
pub use converter::{Converter, CustomConverter};
#[cfg(test)]
pub use handler::MockCommandHandler;
pub use handler::{CommandHandler, handler_fn};
pub use module::CommandModule;
