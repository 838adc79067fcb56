//! Application-wide authorization checks.

use std::fmt;
use std::sync::Arc;

use crate::command::ports::Check;

/// Checks applied to every command before its own checks.
///
/// Pre-checks run first, then check-once entries.
#[derive(Clone, Default)]
pub struct GlobalChecks {
    checks: Vec<Arc<dyn Check>>,
    check_once: Vec<Arc<dyn Check>>,
}

impl GlobalChecks {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a pre-check.
    #[must_use]
    pub fn with_check(mut self, check: Arc<dyn Check>) -> Self {
        self.checks.push(check);
        self
    }

    /// Appends a check-once entry.
    #[must_use]
    pub fn with_check_once(mut self, check: Arc<dyn Check>) -> Self {
        self.check_once.push(check);
        self
    }

    /// Iterates pre-checks followed by check-once entries.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn Check>> {
        self.checks.iter().chain(self.check_once.iter())
    }

    /// Returns the total number of checks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.checks.len() + self.check_once.len()
    }

    /// Returns `true` when no checks are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.checks.is_empty() && self.check_once.is_empty()
    }
}

impl fmt::Debug for GlobalChecks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlobalChecks")
            .field("checks", &self.checks.len())
            .field("check_once", &self.check_once.len())
            .finish()
    }
}
