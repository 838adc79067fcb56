//! Service layer for the command subsystem.

mod converters;
mod registry;

pub use converters::{ConverterRegistry, ResolvedConverter};
pub use registry::CommandRegistry;
