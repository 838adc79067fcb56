//! Error types for command construction and argument conversion.

use thiserror::Error;

use super::OptionType;

/// Errors raised while building a command tree from its definition.
///
/// These are registration-time failures; the definition must be fixed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConstructionError {
    /// A group sits deeper than root → group → sub-command allows.
    #[error("command '{0}' is nested too deep")]
    NestedTooDeep(String),

    /// A group was declared without children.
    #[error("command group '{0}' requires children")]
    GroupWithoutChildren(String),

    /// A parameter declares the invocation context.
    #[error("the invocation context is only valid as the implicit first handler argument")]
    InvalidContextParameter,

    /// A parameter type cannot be expressed as a slash-command option.
    #[error("unsupported argument shape: {0}")]
    UnsupportedShape(String),

    /// Collected (variadic) parameters are not supported.
    #[error("collected (variadic) arguments are not supported with slash commands")]
    UnsupportedVariadic,

    /// A union mixes option types with no supported fallback.
    #[error("unsupported union fallback between option types [{0}]")]
    UnsupportedFallback(String),

    /// A union declares no convertible members.
    #[error("union declares no convertible members")]
    EmptyUnion,

    /// A mentionable fallback was combined with a non-entity option type.
    #[error("option type {0} cannot fall back to a mentionable reference")]
    NotIdentifiable(OptionType),

    /// A parameter failed to resolve.
    #[error("invalid parameter '{parameter}' for command '/{command}': {reason}")]
    InvalidParameter {
        /// Command name.
        command: String,
        /// Parameter name.
        parameter: String,
        /// Underlying failure.
        reason: Box<ConstructionError>,
    },
}

impl ConstructionError {
    /// Returns the innermost error, unwrapping parameter context.
    #[must_use]
    pub fn root_cause(&self) -> &Self {
        match self {
            Self::InvalidParameter { reason, .. } => reason.root_cause(),
            other => other,
        }
    }
}

/// Errors raised while walking the command tree or converting option values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ArgumentError {
    /// A group received anything but exactly one sub-command option.
    #[error("expected a single sub-command option for '{command}', found {found} options")]
    ExpectedSingleSubcommand {
        /// Qualified group name.
        command: String,
        /// Number of options received.
        found: usize,
    },

    /// The option addressed to a group is not a sub-command type.
    #[error("option '{option}' of '{command}' is not a sub-command")]
    NotASubcommand {
        /// Qualified group name.
        command: String,
        /// Option name.
        option: String,
    },

    /// The named sub-command is not registered under the group.
    #[error("unknown sub-command \"{name}\" of '{command}'")]
    UnknownSubcommand {
        /// Qualified group name.
        command: String,
        /// Requested sub-command name.
        name: String,
    },

    /// A referenced entity is missing from the resolved table.
    #[error("{0}")]
    UnresolvedEntity(String),

    /// A resolved entity has the wrong guild or kind.
    #[error("{0}")]
    EntityMismatch(String),

    /// A raw or converted value has an unexpected shape.
    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        /// Expected value description.
        expected: String,
        /// Found value description.
        found: String,
    },

    /// The platform omitted an option it promised to send.
    #[error("received no value for required option '{parameter}' of '{command}'")]
    MissingRequiredOption {
        /// Qualified command name.
        command: String,
        /// Parameter name.
        parameter: String,
    },

    /// The interaction payload does not match the command data model.
    #[error("malformed interaction payload: {0}")]
    MalformedPayload(String),

    /// A custom converter rejected the value.
    #[error("conversion failed: {0}")]
    Conversion(String),
}
