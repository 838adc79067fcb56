//! Registry of root commands.

use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

use super::ConverterRegistry;
use crate::command::domain::{ApplicationCommand, CommandDefinition, CommandNode, ConstructionError};
use crate::command::ports::CommandModule;

/// Root commands keyed by name.
///
/// Loading a name that already exists replaces the previous command.
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    converters: ConverterRegistry,
    commands: BTreeMap<String, Arc<CommandNode>>,
}

impl CommandRegistry {
    /// Creates an empty registry with the built-in converters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the converter registry used for subsequent loads.
    #[must_use]
    pub fn with_converters(mut self, converters: ConverterRegistry) -> Self {
        self.converters = converters;
        self
    }

    /// Returns the converter registry.
    #[must_use]
    pub const fn converters(&self) -> &ConverterRegistry {
        &self.converters
    }

    /// Builds and registers a root command.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructionError`] when the definition cannot be built; the
    /// registry is left unchanged.
    pub fn load(&mut self, definition: impl Into<CommandDefinition>) -> Result<(), ConstructionError> {
        let node = CommandNode::build(definition.into(), &self.converters, 0)?;
        self.insert(node);
        Ok(())
    }

    fn insert(&mut self, node: CommandNode) {
        let name = node.name().to_owned();
        if self.commands.insert(name.clone(), Arc::new(node)).is_some() {
            debug!(command = %name, "replaced registered command");
        } else {
            debug!(command = %name, "registered command");
        }
    }

    /// Removes a root command; unknown names are ignored.
    pub fn unload(&mut self, name: &str) {
        if self.commands.remove(name).is_some() {
            debug!(command = %name, "unregistered command");
        }
    }

    /// Returns the root command named `name`.
    #[must_use]
    pub fn resolve(&self, name: &str) -> Option<Arc<CommandNode>> {
        self.commands.get(name).map(Arc::clone)
    }

    /// Returns `true` when `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    /// Registers every command of a module.
    ///
    /// All definitions are built before any is registered, so a failing
    /// module leaves the registry unchanged.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConstructionError`] raised by the module's
    /// definitions.
    pub fn load_module(&mut self, module: &dyn CommandModule) -> Result<(), ConstructionError> {
        let nodes = module
            .commands()
            .into_iter()
            .map(|definition| CommandNode::build(definition, &self.converters, 0))
            .collect::<Result<Vec<_>, _>>()?;
        let count = nodes.len();
        for node in nodes {
            self.insert(node);
        }
        info!(module = module.name(), commands = count, "loaded command module");
        Ok(())
    }

    /// Removes every command a module declares.
    pub fn unload_module(&mut self, module: &dyn CommandModule) {
        for definition in module.commands() {
            self.unload(definition.name());
        }
        info!(module = module.name(), "unloaded command module");
    }

    /// Returns registered names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.commands.keys().map(String::as_str)
    }

    /// Returns the number of root commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Returns `true` when nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Serializes every root command, ordered by name.
    #[must_use]
    pub fn application_commands(&self) -> Vec<ApplicationCommand> {
        self.commands
            .values()
            .map(|node| node.to_application_command())
            .collect()
    }
}
