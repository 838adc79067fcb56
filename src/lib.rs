//! Slashgate: slash-command dispatch for a real-time chat gateway.
//!
//! This crate registers structured slash-command definitions, routes inbound
//! interaction events to the matching handler, converts raw option payloads
//! into typed arguments, runs authorization checks and delivers replies
//! through the platform's single-use interaction callback.
//!
//! # Architecture
//!
//! Slashgate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure command and interaction types
//! - **Ports**: Abstract trait interfaces for handlers, checks, converters and
//!   outbound transports
//! - **Adapters**: Concrete implementations of ports (HTTP, in-memory, tracing)
//!
//! # Modules
//!
//! - [`command`]: Command trees, argument conversion and the command registry
//! - [`interaction`]: Inbound events, reply channel and the interaction router
//! - [`config`]: Platform API endpoint configuration

pub mod command;
pub mod config;
pub mod interaction;
