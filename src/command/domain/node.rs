//! Executable command trees.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, instrument};

use super::{
    ApplicationCommand, ApplicationCommandOption, ArgumentError, ArgumentValue, Arguments,
    CommandDefinition, CommandGroup, ConstructionError, GlobalChecks, LeafCommand, OptionType,
    Parameter,
};
use crate::command::ports::{Check, CommandHandler, Converter};
use crate::command::services::ConverterRegistry;
use crate::interaction::domain::{CommandOption, InteractionContext};
use crate::interaction::error::CommandError;

/// Deepest level at which a group may appear (root is 0).
pub const MAX_GROUP_DEPTH: usize = 1;

const REQUIRED_DESCRIPTION: &str = "Required input";
const OPTIONAL_DESCRIPTION: &str = "Optional input";

/// A node of a command tree: a handler-bearing leaf or a group of children.
pub struct CommandNode {
    name: String,
    description: String,
    private: bool,
    body: NodeBody,
}

enum NodeBody {
    Leaf(LeafBody),
    Group(BTreeMap<String, CommandNode>),
}

struct LeafBody {
    handler: Arc<dyn CommandHandler>,
    arguments: Vec<ArgumentSpec>,
    checks: Vec<Arc<dyn Check>>,
}

/// A resolved argument of a leaf command.
#[derive(Clone)]
pub struct ArgumentSpec {
    name: String,
    option_type: OptionType,
    required: bool,
    description: String,
    default: Option<ArgumentValue>,
    converter: Arc<dyn Converter>,
}

impl ArgumentSpec {
    /// Returns the parameter name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the platform option type.
    #[must_use]
    pub const fn option_type(&self) -> OptionType {
        self.option_type
    }

    /// Returns whether the platform must supply a value.
    #[must_use]
    pub const fn required(&self) -> bool {
        self.required
    }

    /// Returns the option description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the declared default.
    #[must_use]
    pub const fn default_value(&self) -> Option<&ArgumentValue> {
        self.default.as_ref()
    }

    fn resolve(parameter: &Parameter, converters: &ConverterRegistry) -> Result<Self, ConstructionError> {
        let resolved = converters.resolve(parameter.parameter_type())?;
        let required = resolved.required && parameter.default_value().is_none();
        let description = parameter.description().map_or_else(
            || {
                if required {
                    REQUIRED_DESCRIPTION.to_owned()
                } else {
                    OPTIONAL_DESCRIPTION.to_owned()
                }
            },
            str::to_owned,
        );

        Ok(Self {
            name: parameter.name().to_owned(),
            option_type: resolved.option_type,
            required,
            description,
            default: parameter.default_value().cloned(),
            converter: resolved.converter,
        })
    }

    async fn convert(
        &self,
        ctx: &InteractionContext,
        option: Option<&CommandOption>,
        command: &str,
    ) -> Result<ArgumentValue, ArgumentError> {
        let Some(raw) = option
            .and_then(|supplied| supplied.value.as_ref())
            .filter(|value| !value.is_null())
        else {
            if self.required {
                return Err(ArgumentError::MissingRequiredOption {
                    command: command.to_owned(),
                    parameter: self.name.clone(),
                });
            }
            return Ok(self.default.clone().unwrap_or(ArgumentValue::Absent));
        };

        self.converter.convert(ctx, raw).await
    }

    fn to_option(&self) -> ApplicationCommandOption {
        ApplicationCommandOption {
            kind: self.option_type,
            name: self.name.clone(),
            description: self.description.clone(),
            required: Some(self.required),
            options: Vec::new(),
        }
    }
}

impl fmt::Debug for ArgumentSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArgumentSpec")
            .field("name", &self.name)
            .field("option_type", &self.option_type)
            .field("required", &self.required)
            .field("description", &self.description)
            .field("default", &self.default)
            .finish_non_exhaustive()
    }
}

/// A leaf reached by walking a command tree.
#[derive(Debug)]
pub struct ResolvedCommand<'a> {
    node: &'a CommandNode,
    qualified_name: String,
    options: &'a [CommandOption],
}

impl<'a> ResolvedCommand<'a> {
    /// Returns the leaf node.
    #[must_use]
    pub const fn node(&self) -> &'a CommandNode {
        self.node
    }

    /// Returns the space-separated path from the root to the leaf.
    #[must_use]
    pub fn qualified_name(&self) -> &str {
        &self.qualified_name
    }

    /// Returns the options addressed to the leaf.
    #[must_use]
    pub const fn options(&self) -> &'a [CommandOption] {
        self.options
    }
}

impl CommandNode {
    /// Builds a node from a definition at `depth` below the root.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError`] when a group is nested below
    /// [`MAX_GROUP_DEPTH`], a group has no children, or a parameter type
    /// cannot be converted.
    pub fn build(
        definition: CommandDefinition,
        converters: &ConverterRegistry,
        depth: usize,
    ) -> Result<Self, ConstructionError> {
        match definition {
            CommandDefinition::Leaf(leaf) => Self::build_leaf(leaf, converters),
            CommandDefinition::Group(group) => Self::build_group(group, converters, depth),
        }
    }

    fn build_leaf(leaf: LeafCommand, converters: &ConverterRegistry) -> Result<Self, ConstructionError> {
        let LeafCommand {
            name,
            description,
            private,
            handler,
            parameters,
            checks,
        } = leaf;

        let arguments = parameters
            .iter()
            .map(|parameter| {
                ArgumentSpec::resolve(parameter, converters).map_err(|reason| {
                    ConstructionError::InvalidParameter {
                        command: name.clone(),
                        parameter: parameter.name().to_owned(),
                        reason: Box::new(reason),
                    }
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            name,
            description,
            private,
            body: NodeBody::Leaf(LeafBody {
                handler,
                arguments,
                checks,
            }),
        })
    }

    fn build_group(
        group: CommandGroup,
        converters: &ConverterRegistry,
        depth: usize,
    ) -> Result<Self, ConstructionError> {
        let CommandGroup {
            name,
            description,
            private,
            children,
        } = group;

        if depth > MAX_GROUP_DEPTH {
            return Err(ConstructionError::NestedTooDeep(name));
        }

        let mut built = BTreeMap::new();
        for child in children {
            let node = Self::build(child, converters, depth + 1)?;
            built.insert(node.name.clone(), node);
        }

        if built.is_empty() {
            return Err(ConstructionError::GroupWithoutChildren(name));
        }

        Ok(Self {
            name,
            description,
            private,
            body: NodeBody::Group(built),
        })
    }

    /// Returns the node name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the private flag.
    #[must_use]
    pub const fn is_private(&self) -> bool {
        self.private
    }

    /// Returns `true` when the node carries a handler.
    #[must_use]
    pub const fn has_handler(&self) -> bool {
        matches!(self.body, NodeBody::Leaf(_))
    }

    /// Returns the child named `name`.
    #[must_use]
    pub fn child(&self, name: &str) -> Option<&Self> {
        match &self.body {
            NodeBody::Group(children) => children.get(name),
            NodeBody::Leaf(_) => None,
        }
    }

    /// Iterates over children in name order; empty for leaves.
    pub fn children(&self) -> impl Iterator<Item = &Self> {
        let children = match &self.body {
            NodeBody::Group(children) => Some(children.values()),
            NodeBody::Leaf(_) => None,
        };
        children.into_iter().flatten()
    }

    /// Returns the argument specs; empty for groups.
    #[must_use]
    pub fn arguments(&self) -> &[ArgumentSpec] {
        match &self.body {
            NodeBody::Leaf(leaf) => &leaf.arguments,
            NodeBody::Group(_) => &[],
        }
    }

    /// Returns the number of handler-specific checks.
    #[must_use]
    pub fn check_count(&self) -> usize {
        match &self.body {
            NodeBody::Leaf(leaf) => leaf.checks.len(),
            NodeBody::Group(_) => 0,
        }
    }

    /// Returns the depth of the deepest handler below this node.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.children().map(|child| child.depth() + 1).max().unwrap_or(0)
    }

    /// Walks the tree along the sub-command options.
    ///
    /// # Errors
    ///
    /// Returns [`ArgumentError`] when a group does not receive exactly one
    /// sub-command option or the named child does not exist.
    pub fn resolve_path<'a>(
        &'a self,
        options: &'a [CommandOption],
    ) -> Result<ResolvedCommand<'a>, ArgumentError> {
        self.walk(options).map(|(node, _, qualified_name, leaf_options)| ResolvedCommand {
            node,
            qualified_name,
            options: leaf_options,
        })
    }

    fn walk<'a>(
        &'a self,
        options: &'a [CommandOption],
    ) -> Result<(&'a Self, &'a LeafBody, String, &'a [CommandOption]), ArgumentError> {
        let mut node = self;
        let mut remaining = options;
        let mut path = self.name.clone();

        loop {
            let children = match &node.body {
                NodeBody::Leaf(leaf) => return Ok((node, leaf, path, remaining)),
                NodeBody::Group(children) => children,
            };

            let [option] = remaining else {
                return Err(ArgumentError::ExpectedSingleSubcommand {
                    command: path,
                    found: remaining.len(),
                });
            };

            if !option.option_type().is_some_and(OptionType::is_subcommand) {
                return Err(ArgumentError::NotASubcommand {
                    command: path,
                    option: option.name.clone(),
                });
            }

            let Some(child) = children.get(&option.name) else {
                return Err(ArgumentError::UnknownSubcommand {
                    command: path,
                    name: option.name.clone(),
                });
            };

            path.push(' ');
            path.push_str(&child.name);
            node = child;
            remaining = &option.options;
        }
    }

    /// Resolves the addressed leaf, runs checks, converts arguments and
    /// invokes the handler.
    ///
    /// Checks run in order: global pre-checks, global check-once entries,
    /// then the handler's checks in reverse declaration order. Conversion
    /// starts only after every check passed.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::Argument`] for tree-walk and conversion
    /// failures, [`CommandError::CheckFailure`] when a check rejects, or the
    /// handler's own error.
    #[instrument(skip_all, fields(command = %self.name))]
    pub async fn execute(
        &self,
        ctx: &Arc<InteractionContext>,
        options: &[CommandOption],
        global_checks: &GlobalChecks,
    ) -> Result<(), CommandError> {
        let (_, leaf, qualified_name, leaf_options) = self.walk(options)?;

        for check in global_checks.iter().chain(leaf.checks.iter().rev()) {
            if !check.check(ctx).await {
                return Err(CommandError::CheckFailure {
                    command: qualified_name,
                });
            }
        }

        let mut values = Vec::with_capacity(leaf.arguments.len());
        for spec in &leaf.arguments {
            let supplied = leaf_options.iter().find(|option| option.name == spec.name);
            let value = spec.convert(ctx, supplied, &qualified_name).await?;
            values.push((spec.name.clone(), value));
        }

        debug!(command = %qualified_name, arguments = values.len(), "invoking handler");
        leaf.handler
            .invoke(Arc::clone(ctx), Arguments::new(values))
            .await
    }

    /// Serializes a root node for bulk publishing.
    #[must_use]
    pub fn to_application_command(&self) -> ApplicationCommand {
        let options = match &self.body {
            NodeBody::Leaf(leaf) => leaf.arguments.iter().map(ArgumentSpec::to_option).collect(),
            NodeBody::Group(children) => children.values().map(Self::to_subcommand_option).collect(),
        };

        ApplicationCommand {
            name: self.name.clone(),
            description: self.description.clone(),
            options,
        }
    }

    fn to_subcommand_option(&self) -> ApplicationCommandOption {
        let (kind, options) = match &self.body {
            NodeBody::Leaf(leaf) => (
                OptionType::SubCommand,
                leaf.arguments.iter().map(ArgumentSpec::to_option).collect(),
            ),
            NodeBody::Group(children) => (
                OptionType::SubCommandGroup,
                children.values().map(Self::to_subcommand_option).collect(),
            ),
        };

        ApplicationCommandOption {
            kind,
            name: self.name.clone(),
            description: self.description.clone(),
            required: None,
            options,
        }
    }
}

impl fmt::Debug for CommandNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct("CommandNode");
        debug
            .field("name", &self.name)
            .field("description", &self.description)
            .field("private", &self.private);
        match &self.body {
            NodeBody::Leaf(leaf) => debug
                .field("arguments", &leaf.arguments)
                .field("checks", &leaf.checks.len()),
            NodeBody::Group(children) => debug.field("children", &children.keys().collect::<Vec<_>>()),
        };
        debug.finish()
    }
}

