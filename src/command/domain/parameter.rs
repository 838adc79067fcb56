//! Declarative parameter types for command handlers.

use std::fmt;
use std::sync::Arc;

use super::{ArgumentValue, OptionType};
use crate::command::ports::CustomConverter;

/// Built-in argument kinds with a registered converter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgumentKind {
    /// Free text.
    Text,
    /// Integer.
    Integer,
    /// Boolean.
    Boolean,
    /// A user from the resolved table.
    User,
    /// A guild member from the resolved table.
    Member,
    /// A text channel of the invoking guild.
    TextChannel,
    /// A category channel of the invoking guild.
    CategoryChannel,
    /// A role from the resolved table.
    Role,
    /// A bare user-or-role reference.
    Mentionable,
}

impl ArgumentKind {
    /// All kinds, in table order.
    pub const ALL: [Self; 9] = [
        Self::Text,
        Self::Integer,
        Self::Boolean,
        Self::User,
        Self::Member,
        Self::TextChannel,
        Self::CategoryChannel,
        Self::Role,
        Self::Mentionable,
    ];

    /// Returns the platform option type for the kind.
    #[must_use]
    pub const fn option_type(self) -> OptionType {
        match self {
            Self::Text => OptionType::String,
            Self::Integer => OptionType::Integer,
            Self::Boolean => OptionType::Boolean,
            Self::User | Self::Member => OptionType::User,
            Self::TextChannel | Self::CategoryChannel => OptionType::Channel,
            Self::Role => OptionType::Role,
            Self::Mentionable => OptionType::Mentionable,
        }
    }
}

/// Declared type of a handler parameter.
///
/// # Examples
///
/// ```
/// use slashgate::command::domain::ParameterType;
///
/// let count_or_name = ParameterType::union([ParameterType::integer(), ParameterType::text()]);
/// let maybe_user = ParameterType::optional(ParameterType::user());
/// assert!(!count_or_name.is_optional());
/// assert!(maybe_user.is_optional());
/// ```
#[derive(Clone)]
pub enum ParameterType {
    /// A built-in kind.
    Kind(ArgumentKind),
    /// An optional value of the inner type.
    Optional(Box<ParameterType>),
    /// One of several types, tried left to right.
    Union(Vec<ParameterType>),
    /// The absent value; only meaningful inside a union.
    NoneType,
    /// A collected list of values; not supported by slash commands.
    Variadic(Box<ParameterType>),
    /// The invocation context; never valid as a declared parameter.
    Context,
    /// A type converted by an application-provided converter.
    Custom(Arc<dyn CustomConverter>),
}

impl ParameterType {
    /// Free-text parameter.
    #[must_use]
    pub const fn text() -> Self {
        Self::Kind(ArgumentKind::Text)
    }

    /// Integer parameter.
    #[must_use]
    pub const fn integer() -> Self {
        Self::Kind(ArgumentKind::Integer)
    }

    /// Boolean parameter.
    #[must_use]
    pub const fn boolean() -> Self {
        Self::Kind(ArgumentKind::Boolean)
    }

    /// User parameter.
    #[must_use]
    pub const fn user() -> Self {
        Self::Kind(ArgumentKind::User)
    }

    /// Guild member parameter.
    #[must_use]
    pub const fn member() -> Self {
        Self::Kind(ArgumentKind::Member)
    }

    /// Text channel parameter.
    #[must_use]
    pub const fn text_channel() -> Self {
        Self::Kind(ArgumentKind::TextChannel)
    }

    /// Category channel parameter.
    #[must_use]
    pub const fn category_channel() -> Self {
        Self::Kind(ArgumentKind::CategoryChannel)
    }

    /// Role parameter.
    #[must_use]
    pub const fn role() -> Self {
        Self::Kind(ArgumentKind::Role)
    }

    /// Mentionable parameter.
    #[must_use]
    pub const fn mentionable() -> Self {
        Self::Kind(ArgumentKind::Mentionable)
    }

    /// Optional wrapper around `inner`.
    #[must_use]
    pub fn optional(inner: Self) -> Self {
        Self::Optional(Box::new(inner))
    }

    /// Union of `members`.
    #[must_use]
    pub fn union(members: impl IntoIterator<Item = Self>) -> Self {
        Self::Union(members.into_iter().collect())
    }

    /// Collected list of `inner`.
    #[must_use]
    pub fn variadic(inner: Self) -> Self {
        Self::Variadic(Box::new(inner))
    }

    /// Type converted by `converter`.
    #[must_use]
    pub fn custom(converter: Arc<dyn CustomConverter>) -> Self {
        Self::Custom(converter)
    }

    /// Returns `true` when the type itself admits absence.
    #[must_use]
    pub fn is_optional(&self) -> bool {
        match self {
            Self::Optional(_) | Self::NoneType => true,
            Self::Union(members) => members.iter().any(Self::is_optional),
            _ => false,
        }
    }
}

impl fmt::Debug for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Kind(kind) => f.debug_tuple("Kind").field(kind).finish(),
            Self::Optional(inner) => f.debug_tuple("Optional").field(inner).finish(),
            Self::Union(members) => f.debug_tuple("Union").field(members).finish(),
            Self::NoneType => f.write_str("NoneType"),
            Self::Variadic(inner) => f.debug_tuple("Variadic").field(inner).finish(),
            Self::Context => f.write_str("Context"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

impl From<ArgumentKind> for ParameterType {
    fn from(kind: ArgumentKind) -> Self {
        Self::Kind(kind)
    }
}

/// A declared handler parameter.
#[derive(Debug, Clone)]
pub struct Parameter {
    name: String,
    parameter_type: ParameterType,
    default: Option<ArgumentValue>,
    description: Option<String>,
}

impl Parameter {
    /// Creates a required parameter.
    #[must_use]
    pub fn new(name: impl Into<String>, parameter_type: impl Into<ParameterType>) -> Self {
        Self {
            name: name.into().to_ascii_lowercase(),
            parameter_type: parameter_type.into(),
            default: None,
            description: None,
        }
    }

    /// Declares a default, making the parameter optional.
    #[must_use]
    pub fn with_default(mut self, default: impl Into<ArgumentValue>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Sets the option description shown by the platform.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Returns the parameter name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared type.
    #[must_use]
    pub const fn parameter_type(&self) -> &ParameterType {
        &self.parameter_type
    }

    /// Returns the declared default.
    #[must_use]
    pub const fn default_value(&self) -> Option<&ArgumentValue> {
        self.default.as_ref()
    }

    /// Returns the declared description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}
