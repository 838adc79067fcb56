//! Argument converter ports.

use async_trait::async_trait;
use serde_json::Value;

use crate::command::domain::{ArgumentError, ArgumentValue};
use crate::interaction::domain::InteractionContext;

/// Turns a raw option value into a typed argument.
#[async_trait]
pub trait Converter: Send + Sync {
    /// Converts `value` using the interaction's resolved data.
    async fn convert(
        &self,
        ctx: &InteractionContext,
        value: &Value,
    ) -> Result<ArgumentValue, ArgumentError>;
}

/// A user-supplied converter working on the textual form of a value.
///
/// Custom converters are exposed to the platform as free-text options.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomConverter: Send + Sync {
    /// Converts the raw text of an option.
    async fn convert(
        &self,
        ctx: &InteractionContext,
        raw: &str,
    ) -> Result<ArgumentValue, ArgumentError>;
}
