//! Delegated event dispatch.

pub mod bus;

pub use bus::{DomEvent, EventBus, EventType, Level, ListenerId, Modifiers, Outcome, Route};
