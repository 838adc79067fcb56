//! In-memory integration tests.
//!
//! Tests are organized into modules by functionality:
//! - `routing_tests`: Gateway filtering, tree walks and error reporting
//! - `reply_tests`: Initial callbacks, follow-ups and ephemeral replies
//! - `module_tests`: Module loading and command publishing

mod in_memory {
    pub mod helpers;

    mod module_tests;
    mod reply_tests;
    mod routing_tests;
}
