//! Adapters behind the domain ports: the simulated gateway, notifiers and the
//! concierge responder.

pub mod concierge;
pub mod gateway;
pub mod notifier;
