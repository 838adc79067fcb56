//! Command module port.

use crate::command::domain::CommandDefinition;

/// A bundle of commands loaded and unloaded as a unit.
pub trait CommandModule: Send + Sync {
    /// Returns the module name used in logs.
    fn name(&self) -> &str;

    /// Returns the commands the module contributes.
    fn commands(&self) -> Vec<CommandDefinition>;
}
