//! Command domain: definitions, parameter types, and executable trees.

mod checks;
mod definition;
mod error;
mod node;
mod option_type;
mod parameter;
mod payload;
mod value;

pub use checks::GlobalChecks;
pub use definition::{CommandDefinition, CommandGroup, LeafCommand};
pub use error::{ArgumentError, ConstructionError};
pub use node::{ArgumentSpec, CommandNode, MAX_GROUP_DEPTH, ResolvedCommand};
pub use option_type::{OptionType, UnknownOptionType};
pub use parameter::{ArgumentKind, Parameter, ParameterType};
pub use payload::{ApplicationCommand, ApplicationCommandOption};
pub use value::{ArgumentValue, Arguments};
