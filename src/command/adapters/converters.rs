//! Built-in argument converters.
//!
//! Entity converters look the raw snowflake up in the interaction's resolved
//! table; primitive converters only check the JSON shape.

use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

use crate::command::domain::{ArgumentError, ArgumentKind, ArgumentValue};
use crate::command::ports::{Converter, CustomConverter};
use crate::interaction::domain::{Channel, InteractionContext, ResolvedData, Snowflake};

const USER_NOT_VISIBLE: &str = "User specified is not someone the bot can see.";
const NOT_A_MEMBER: &str = "User specified is not a member.";
const CHANNEL_NOT_IN_GUILD: &str = "Channel not in this guild.";
const NOT_A_TEXT_CHANNEL: &str = "This is not a text channel.";
const NOT_A_CATEGORY_CHANNEL: &str = "This is not a category channel.";
const ROLE_NOT_RESOLVED: &str = "Role specified is not in the resolved data.";
const INTEGER_PARSE_FAILED: &str = "Unable to parse int.";

/// Returns the converter registered for `kind` by default.
#[must_use]
pub fn builtin_converter(kind: ArgumentKind) -> Arc<dyn Converter> {
    match kind {
        ArgumentKind::Text => Arc::new(TextConverter),
        ArgumentKind::Integer => Arc::new(IntegerConverter),
        ArgumentKind::Boolean => Arc::new(BooleanConverter),
        ArgumentKind::User => Arc::new(UserConverter),
        ArgumentKind::Member => Arc::new(MemberConverter),
        ArgumentKind::TextChannel => Arc::new(GuildChannelConverter::text()),
        ArgumentKind::CategoryChannel => Arc::new(GuildChannelConverter::category()),
        ArgumentKind::Role => Arc::new(RoleConverter),
        ArgumentKind::Mentionable => Arc::new(MentionableConverter),
    }
}

fn describe(value: &Value) -> String {
    match value {
        Value::Null => "null".to_owned(),
        Value::Bool(_) => "boolean".to_owned(),
        Value::Number(_) => "number".to_owned(),
        Value::String(_) => "string".to_owned(),
        Value::Array(_) => "array".to_owned(),
        Value::Object(_) => "object".to_owned(),
    }
}

fn mismatch(expected: &str, value: &Value) -> ArgumentError {
    ArgumentError::TypeMismatch {
        expected: expected.to_owned(),
        found: describe(value),
    }
}

/// Renders a scalar JSON value as the text the platform would have shown.
pub(crate) fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn entity_key(value: &Value) -> Result<String, ArgumentError> {
    match value {
        Value::String(text) => Ok(text.clone()),
        Value::Number(number) if number.is_u64() => Ok(number.to_string()),
        other => Err(mismatch("snowflake", other)),
    }
}

fn resolved_table<'a>(
    ctx: &'a InteractionContext,
    missing: &str,
) -> Result<&'a ResolvedData, ArgumentError> {
    ctx.resolved()
        .ok_or_else(|| ArgumentError::UnresolvedEntity(missing.to_owned()))
}

/// Passes strings through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextConverter;

#[async_trait]
impl Converter for TextConverter {
    async fn convert(
        &self,
        _ctx: &InteractionContext,
        value: &Value,
    ) -> Result<ArgumentValue, ArgumentError> {
        value
            .as_str()
            .map(|text| ArgumentValue::Text(text.to_owned()))
            .ok_or_else(|| mismatch("string", value))
    }
}

/// Passes integers through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntegerConverter;

#[async_trait]
impl Converter for IntegerConverter {
    async fn convert(
        &self,
        _ctx: &InteractionContext,
        value: &Value,
    ) -> Result<ArgumentValue, ArgumentError> {
        value
            .as_i64()
            .map(ArgumentValue::Integer)
            .ok_or_else(|| mismatch("integer", value))
    }
}

/// Passes booleans through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct BooleanConverter;

#[async_trait]
impl Converter for BooleanConverter {
    async fn convert(
        &self,
        _ctx: &InteractionContext,
        value: &Value,
    ) -> Result<ArgumentValue, ArgumentError> {
        value
            .as_bool()
            .map(ArgumentValue::Boolean)
            .ok_or_else(|| mismatch("boolean", value))
    }
}

/// Looks a user up in the resolved table.
#[derive(Debug, Clone, Copy, Default)]
pub struct UserConverter;

#[async_trait]
impl Converter for UserConverter {
    async fn convert(
        &self,
        ctx: &InteractionContext,
        value: &Value,
    ) -> Result<ArgumentValue, ArgumentError> {
        let key = entity_key(value)?;
        resolved_table(ctx, USER_NOT_VISIBLE)?
            .users
            .get(&key)
            .cloned()
            .map(ArgumentValue::User)
            .ok_or_else(|| ArgumentError::UnresolvedEntity(USER_NOT_VISIBLE.to_owned()))
    }
}

/// Joins a resolved member with its user record.
///
/// Voice-state fields are not part of resolved member data and default to
/// `false`.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemberConverter;

#[async_trait]
impl Converter for MemberConverter {
    async fn convert(
        &self,
        ctx: &InteractionContext,
        value: &Value,
    ) -> Result<ArgumentValue, ArgumentError> {
        let key = entity_key(value)?;
        let resolved = resolved_table(ctx, NOT_A_MEMBER)?;
        let not_a_member = || ArgumentError::UnresolvedEntity(NOT_A_MEMBER.to_owned());

        let partial = resolved.members.get(&key).cloned().ok_or_else(not_a_member)?;
        let user = resolved
            .users
            .get(&key)
            .cloned()
            .or_else(|| partial.user.clone())
            .ok_or_else(not_a_member)?;

        Ok(ArgumentValue::Member(partial.into_member(user)))
    }
}

/// Resolves a channel of the invoking guild with a fixed channel type.
#[derive(Debug, Clone, Copy)]
pub struct GuildChannelConverter {
    kind: u8,
    wrong_kind: &'static str,
}

impl GuildChannelConverter {
    /// Accepts text channels only.
    #[must_use]
    pub const fn text() -> Self {
        Self {
            kind: Channel::GUILD_TEXT,
            wrong_kind: NOT_A_TEXT_CHANNEL,
        }
    }

    /// Accepts category channels only.
    #[must_use]
    pub const fn category() -> Self {
        Self {
            kind: Channel::GUILD_CATEGORY,
            wrong_kind: NOT_A_CATEGORY_CHANNEL,
        }
    }
}

#[async_trait]
impl Converter for GuildChannelConverter {
    async fn convert(
        &self,
        ctx: &InteractionContext,
        value: &Value,
    ) -> Result<ArgumentValue, ArgumentError> {
        let key = entity_key(value)?;
        let channel = resolved_table(ctx, CHANNEL_NOT_IN_GUILD)?
            .channels
            .get(&key)
            .ok_or_else(|| ArgumentError::UnresolvedEntity(CHANNEL_NOT_IN_GUILD.to_owned()))?;

        if channel.guild_id.is_none() || channel.guild_id != ctx.guild_id() {
            return Err(ArgumentError::EntityMismatch(CHANNEL_NOT_IN_GUILD.to_owned()));
        }
        if channel.kind != self.kind {
            return Err(ArgumentError::EntityMismatch(self.wrong_kind.to_owned()));
        }

        Ok(ArgumentValue::Channel(channel.clone()))
    }
}

/// Looks a role up in the resolved table.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoleConverter;

#[async_trait]
impl Converter for RoleConverter {
    async fn convert(
        &self,
        ctx: &InteractionContext,
        value: &Value,
    ) -> Result<ArgumentValue, ArgumentError> {
        let key = entity_key(value)?;
        resolved_table(ctx, ROLE_NOT_RESOLVED)?
            .roles
            .get(&key)
            .cloned()
            .map(ArgumentValue::Role)
            .ok_or_else(|| ArgumentError::UnresolvedEntity(ROLE_NOT_RESOLVED.to_owned()))
    }
}

/// Parses a bare snowflake without any lookup.
#[derive(Debug, Clone, Copy, Default)]
pub struct MentionableConverter;

#[async_trait]
impl Converter for MentionableConverter {
    async fn convert(
        &self,
        _ctx: &InteractionContext,
        value: &Value,
    ) -> Result<ArgumentValue, ArgumentError> {
        let key = entity_key(value)?;
        key.parse::<Snowflake>()
            .map(ArgumentValue::Mentionable)
            .map_err(|_| mismatch("snowflake", value))
    }
}

/// Tries each branch in order and ends with a catch-all.
///
/// Branch failures are swallowed; only the catch-all's error surfaces.
#[derive(Clone)]
pub struct FallbackConverter {
    branches: Vec<Arc<dyn Converter>>,
    last: Arc<dyn Converter>,
}

impl FallbackConverter {
    /// Creates a fallback chain.
    #[must_use]
    pub const fn new(branches: Vec<Arc<dyn Converter>>, last: Arc<dyn Converter>) -> Self {
        Self { branches, last }
    }
}

#[async_trait]
impl Converter for FallbackConverter {
    async fn convert(
        &self,
        ctx: &InteractionContext,
        value: &Value,
    ) -> Result<ArgumentValue, ArgumentError> {
        for branch in &self.branches {
            if let Ok(converted) = branch.convert(ctx, value).await {
                return Ok(converted);
            }
        }
        self.last.convert(ctx, value).await
    }
}

/// Parses textual input as an integer before delegating.
///
/// Used when integers share a free-text option with strings.
#[derive(Clone)]
pub struct IntegerParsingConverter {
    inner: Arc<dyn Converter>,
}

impl IntegerParsingConverter {
    /// Wraps an integer converter.
    #[must_use]
    pub const fn new(inner: Arc<dyn Converter>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl Converter for IntegerParsingConverter {
    async fn convert(
        &self,
        ctx: &InteractionContext,
        value: &Value,
    ) -> Result<ArgumentValue, ArgumentError> {
        let parsed = match value {
            Value::String(text) => text
                .trim()
                .parse::<i64>()
                .map_err(|_| ArgumentError::Conversion(INTEGER_PARSE_FAILED.to_owned()))?,
            Value::Number(number) => number
                .as_i64()
                .ok_or_else(|| ArgumentError::Conversion(INTEGER_PARSE_FAILED.to_owned()))?,
            other => return Err(mismatch("integer text", other)),
        };
        self.inner.convert(ctx, &Value::from(parsed)).await
    }
}

/// Hands the textual form of a value to a [`CustomConverter`].
#[derive(Clone)]
pub struct CustomConverterAdapter {
    inner: Arc<dyn CustomConverter>,
}

impl CustomConverterAdapter {
    /// Wraps a custom converter.
    #[must_use]
    pub const fn new(inner: Arc<dyn CustomConverter>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl Converter for CustomConverterAdapter {
    async fn convert(
        &self,
        ctx: &InteractionContext,
        value: &Value,
    ) -> Result<ArgumentValue, ArgumentError> {
        let raw = scalar_text(value).ok_or_else(|| mismatch("scalar", value))?;
        self.inner.convert(ctx, &raw).await
    }
}
