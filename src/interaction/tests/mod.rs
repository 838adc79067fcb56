//! Unit tests for the interaction module.
