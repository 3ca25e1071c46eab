//! Timing primitives for the single-threaded event loop.
//!
//! - [`scheduler`]: virtual-clock queue with cancellable tokens
//! - [`debounce`]: trailing-edge debounce and leading-edge throttle

pub mod debounce;
pub mod scheduler;

pub use debounce::{debounce, throttle, Debounce, Debounced, Throttle, Throttled};
pub use scheduler::{Fired, Millis, Scheduler, TimerToken};
