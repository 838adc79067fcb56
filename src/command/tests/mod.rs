//! Unit tests for the command module.
//!
//! Covers converter resolution, command tree construction and execution, and
//! the root command registry.

mod converter_tests;
