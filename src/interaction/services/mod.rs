//! Service layer for the interaction subsystem.

mod router;

pub use router::{InteractionRouter, RouteOutcome, parse_gateway_event};
