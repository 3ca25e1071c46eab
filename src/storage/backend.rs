//! Key-value backend abstraction.
//!
//! This module defines the [`KeyValueStore`] trait the preference layer persists
//! through. It mirrors the browser's synchronous `getItem`/`setItem` surface:
//! string keys, string values, and operations that may fail at any time because
//! the store is disabled, full, or corrupt.
//!
//! # Design Philosophy
//!
//! The trait exposes only what [`PreferenceStore`](super::PreferenceStore) needs.
//! Failures are reported as [`SkinError::Storage`](crate::SkinError::Storage) or
//! [`SkinError::Io`](crate::SkinError::Io) and the caller decides whether to swallow them.

use crate::domain::error::Result;

/// Abstraction over durable string key-value stores.
///
/// # Implementations
///
/// - [`JsonKeyValueStore`](super::JsonKeyValueStore): JSON file with atomic writes
/// - [`MemoryStore`](super::MemoryStore): in-process map with optional fault injection
///
/// # Examples
///
/// ```
/// use mailskin::storage::{KeyValueStore, MemoryStore};
///
/// let mut store = MemoryStore::new();
/// store.set("mailskin_dark_mode", "true")?;
/// assert_eq!(store.get("mailskin_dark_mode")?.as_deref(), Some("true"));
/// # Ok::<(), mailskin::SkinError>(())
/// ```
pub trait KeyValueStore {
    /// Reads a value. Returns `Ok(None)` if the key is absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unavailable.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes a value, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unavailable or out of space.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Deletes a key. Deleting an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is unavailable.
    fn remove(&mut self, key: &str) -> Result<()>;
}
