//! Adapter implementations for the interaction subsystem.

pub mod http;
pub mod logging;
pub mod memory;
