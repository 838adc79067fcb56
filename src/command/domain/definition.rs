//! Command definitions declared by applications.
//!
//! Definitions are inert descriptions; [`CommandNode::build`] turns them into
//! executable trees.
//!
//! [`CommandNode::build`]: super::CommandNode::build

use std::fmt;
use std::sync::Arc;

use super::Parameter;
use crate::command::ports::{Check, CommandHandler};

/// A handler-bearing command.
///
/// # Examples
///
/// ```
/// use slashgate::command::domain::{LeafCommand, Parameter, ParameterType};
/// use slashgate::command::ports::handler_fn;
///
/// let hello = LeafCommand::new("Hello", handler_fn(|_ctx, _args| async { Ok(()) }))
///     .with_description("Say hello")
///     .with_parameter(Parameter::new("target", ParameterType::user()));
/// assert_eq!(hello.name(), "hello");
/// ```
#[derive(Clone)]
pub struct LeafCommand {
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) private: bool,
    pub(crate) handler: Arc<dyn CommandHandler>,
    pub(crate) parameters: Vec<Parameter>,
    pub(crate) checks: Vec<Arc<dyn Check>>,
}

impl LeafCommand {
    /// Creates a command invoking `handler`.
    #[must_use]
    pub fn new(name: impl Into<String>, handler: Arc<dyn CommandHandler>) -> Self {
        Self {
            name: name.into().to_ascii_lowercase(),
            description: String::new(),
            private: false,
            handler,
            parameters: Vec::new(),
            checks: Vec::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Marks the command private.
    #[must_use]
    pub const fn private(mut self, private: bool) -> Self {
        self.private = private;
        self
    }

    /// Appends a parameter; parameters bind in declaration order.
    #[must_use]
    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Appends a check.
    ///
    /// Checks added later run first, matching decorator stacking.
    #[must_use]
    pub fn with_check(mut self, check: Arc<dyn Check>) -> Self {
        self.checks.push(check);
        self
    }

    /// Returns the command name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the declared parameters.
    #[must_use]
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }
}

impl fmt::Debug for LeafCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LeafCommand")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("private", &self.private)
            .field("parameters", &self.parameters)
            .field("checks", &self.checks.len())
            .finish_non_exhaustive()
    }
}

/// A parent command grouping sub-commands.
#[derive(Debug, Clone)]
pub struct CommandGroup {
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) private: bool,
    pub(crate) children: Vec<CommandDefinition>,
}

impl CommandGroup {
    /// Creates an empty group.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_lowercase(),
            description: String::new(),
            private: false,
            children: Vec::new(),
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Marks the group private.
    #[must_use]
    pub const fn private(mut self, private: bool) -> Self {
        self.private = private;
        self
    }

    /// Adds a sub-command or nested group.
    #[must_use]
    pub fn with_child(mut self, child: impl Into<CommandDefinition>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Returns the group name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Either a handler-bearing command or a group.
#[derive(Debug, Clone)]
pub enum CommandDefinition {
    /// A handler-bearing command.
    Leaf(LeafCommand),
    /// A group of sub-commands.
    Group(CommandGroup),
}

impl CommandDefinition {
    /// Returns the command name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Leaf(leaf) => leaf.name(),
            Self::Group(group) => group.name(),
        }
    }
}

impl From<LeafCommand> for CommandDefinition {
    fn from(leaf: LeafCommand) -> Self {
        Self::Leaf(leaf)
    }
}

impl From<CommandGroup> for CommandDefinition {
    fn from(group: CommandGroup) -> Self {
        Self::Group(group)
    }
}
