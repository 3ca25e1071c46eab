//! Storage layer for user preferences.
//!
//! This module provides the persistence seam for the two flags the skin
//! remembers across sessions (dark mode, sidebar collapsed). The durable store
//! is treated as unreliable: [`PreferenceStore`] swallows every backend failure
//! and keeps the session value in memory.
//!
//! # Modules
//!
//! - `backend`: [`KeyValueStore`] trait abstraction
//! - `json`: JSON file implementation with atomic writes
//! - `memory`: in-process implementation with fault injection
//! - `preferences`: the failure-tolerant boolean layer

pub mod backend;
pub mod json;
pub mod memory;
pub mod preferences;

pub use backend::KeyValueStore;
pub use json::JsonKeyValueStore;
pub use memory::MemoryStore;
pub use preferences::PreferenceStore;
