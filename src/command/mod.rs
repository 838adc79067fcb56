//! Command definitions, argument conversion, and the command registry.
//!
//! Applications declare [`domain::LeafCommand`] and [`domain::CommandGroup`]
//! values, which [`services::CommandRegistry`] builds into executable
//! [`domain::CommandNode`] trees.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
