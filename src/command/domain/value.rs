//! Converted argument values handed to handlers.

use serde_json::Value;

use super::ArgumentError;
use crate::interaction::domain::{Channel, Member, Role, Snowflake, User};

/// A converted option value.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgumentValue {
    /// Free text.
    Text(String),
    /// Integer.
    Integer(i64),
    /// Boolean.
    Boolean(bool),
    /// A resolved user.
    User(User),
    /// A resolved guild member.
    Member(Member),
    /// A resolved channel.
    Channel(Channel),
    /// A resolved role.
    Role(Role),
    /// A bare user-or-role reference.
    Mentionable(Snowflake),
    /// A value produced by a custom converter.
    Custom(Value),
    /// No value was supplied for an optional parameter without a default.
    Absent,
}

impl ArgumentValue {
    /// Returns a short name of the variant for diagnostics.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Integer(_) => "integer",
            Self::Boolean(_) => "boolean",
            Self::User(_) => "user",
            Self::Member(_) => "member",
            Self::Channel(_) => "channel",
            Self::Role(_) => "role",
            Self::Mentionable(_) => "mentionable",
            Self::Custom(_) => "custom",
            Self::Absent => "absent",
        }
    }

    /// Returns `true` for [`ArgumentValue::Absent`].
    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

impl From<&str> for ArgumentValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for ArgumentValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for ArgumentValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<bool> for ArgumentValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

/// Converted arguments of one invocation, in declaration order.
///
/// # Examples
///
/// ```
/// use slashgate::command::domain::{ArgumentValue, Arguments};
///
/// let args = Arguments::new(vec![
///     ("count".to_owned(), ArgumentValue::Integer(3)),
///     ("note".to_owned(), ArgumentValue::Absent),
/// ]);
/// assert_eq!(args.integer("count"), Ok(3));
/// assert_eq!(args.optional_text("note"), Ok(None));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    values: Vec<(String, ArgumentValue)>,
}

impl Arguments {
    /// Creates an argument list from name/value pairs.
    #[must_use]
    pub const fn new(values: Vec<(String, ArgumentValue)>) -> Self {
        Self { values }
    }

    /// Returns the value bound to `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ArgumentValue> {
        self.values
            .iter()
            .find(|(candidate, _)| candidate == name)
            .map(|(_, value)| value)
    }

    /// Returns the number of bound arguments.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` when no arguments are bound.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over name/value pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ArgumentValue)> {
        self.values
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    /// Returns `true` when `name` is unbound or bound to [`ArgumentValue::Absent`].
    #[must_use]
    pub fn is_absent(&self, name: &str) -> bool {
        self.get(name).is_none_or(ArgumentValue::is_absent)
    }

    /// Returns a text argument.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::TypeMismatch`] when the argument is missing or
    /// not text.
    pub fn text(&self, name: &str) -> Result<&str, ArgumentError> {
        self.typed(name, "text", |value| match value {
            ArgumentValue::Text(text) => Some(text.as_str()),
            _ => None,
        })
    }

    /// Returns an optional text argument.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::TypeMismatch`] when a present value is not text.
    pub fn optional_text(&self, name: &str) -> Result<Option<&str>, ArgumentError> {
        self.optional(name, |args| args.text(name))
    }

    /// Returns an integer argument.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::TypeMismatch`] when the argument is missing or
    /// not an integer.
    pub fn integer(&self, name: &str) -> Result<i64, ArgumentError> {
        self.typed(name, "integer", |value| match value {
            ArgumentValue::Integer(number) => Some(*number),
            _ => None,
        })
    }

    /// Returns an optional integer argument.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::TypeMismatch`] when a present value is not an
    /// integer.
    pub fn optional_integer(&self, name: &str) -> Result<Option<i64>, ArgumentError> {
        self.optional(name, |args| args.integer(name))
    }

    /// Returns a boolean argument.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::TypeMismatch`] when the argument is missing or
    /// not a boolean.
    pub fn boolean(&self, name: &str) -> Result<bool, ArgumentError> {
        self.typed(name, "boolean", |value| match value {
            ArgumentValue::Boolean(flag) => Some(*flag),
            _ => None,
        })
    }

    /// Returns a user argument.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::TypeMismatch`] when the argument is missing or
    /// not a user.
    pub fn user(&self, name: &str) -> Result<&User, ArgumentError> {
        self.typed(name, "user", |value| match value {
            ArgumentValue::User(user) => Some(user),
            _ => None,
        })
    }

    /// Returns a member argument.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::TypeMismatch`] when the argument is missing or
    /// not a member.
    pub fn member(&self, name: &str) -> Result<&Member, ArgumentError> {
        self.typed(name, "member", |value| match value {
            ArgumentValue::Member(member) => Some(member),
            _ => None,
        })
    }

    /// Returns a channel argument.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::TypeMismatch`] when the argument is missing or
    /// not a channel.
    pub fn channel(&self, name: &str) -> Result<&Channel, ArgumentError> {
        self.typed(name, "channel", |value| match value {
            ArgumentValue::Channel(channel) => Some(channel),
            _ => None,
        })
    }

    /// Returns a role argument.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::TypeMismatch`] when the argument is missing or
    /// not a role.
    pub fn role(&self, name: &str) -> Result<&Role, ArgumentError> {
        self.typed(name, "role", |value| match value {
            ArgumentValue::Role(role) => Some(role),
            _ => None,
        })
    }

    /// Returns a mentionable argument.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError::TypeMismatch`] when the argument is missing or
    /// not a mentionable reference.
    pub fn mentionable(&self, name: &str) -> Result<Snowflake, ArgumentError> {
        self.typed(name, "mentionable", |value| match value {
            ArgumentValue::Mentionable(id) => Some(*id),
            _ => None,
        })
    }

    fn typed<'a, T>(
        &'a self,
        name: &str,
        expected: &str,
        extract: impl FnOnce(&'a ArgumentValue) -> Option<T>,
    ) -> Result<T, ArgumentError> {
        let value = self.get(name);
        value
            .and_then(extract)
            .ok_or_else(|| ArgumentError::TypeMismatch {
                expected: format!("{expected} argument '{name}'"),
                found: value.map_or("nothing", ArgumentValue::kind_name).to_owned(),
            })
    }

    fn optional<'a, T>(
        &'a self,
        name: &str,
        required: impl FnOnce(&'a Self) -> Result<T, ArgumentError>,
    ) -> Result<Option<T>, ArgumentError> {
        if self.is_absent(name) {
            Ok(None)
        } else {
            required(self).map(Some)
        }
    }
}
