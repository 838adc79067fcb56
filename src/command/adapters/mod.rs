//! Adapter implementations for the command subsystem.

pub mod converters;
