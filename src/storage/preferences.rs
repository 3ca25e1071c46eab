//! Boolean preferences over an unreliable key-value store.
//!
//! [`PreferenceStore`] never fails. Reads that hit a missing key, an unreadable
//! value, or an unavailable backend all return `None` ("use the default"). Writes
//! update the in-memory cache first and then try the backend; a failed write is
//! logged and forgotten, and the cached value stays authoritative for the rest
//! of the session.

use crate::storage::backend::KeyValueStore;
use std::collections::HashMap;

/// Session-authoritative boolean preferences.
///
/// # Examples
///
/// ```
/// use mailskin::storage::{MemoryStore, PreferenceStore};
///
/// let mut prefs = PreferenceStore::new(Box::new(MemoryStore::unavailable()));
/// assert_eq!(prefs.get("mailskin_dark_mode"), None);
///
/// prefs.set("mailskin_dark_mode", true);
/// assert_eq!(prefs.get("mailskin_dark_mode"), Some(true));
/// assert!(!prefs.is_persisted("mailskin_dark_mode"));
/// ```
pub struct PreferenceStore {
    backend: Option<Box<dyn KeyValueStore>>,
    cache: HashMap<String, bool>,
    unpersisted: Vec<String>,
}

impl std::fmt::Debug for PreferenceStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PreferenceStore")
            .field("has_backend", &self.backend.is_some())
            .field("cache", &self.cache)
            .field("unpersisted", &self.unpersisted)
            .finish()
    }
}

impl Default for PreferenceStore {
    fn default() -> Self {
        Self::detached()
    }
}

impl PreferenceStore {
    #[must_use]
    pub fn new(backend: Box<dyn KeyValueStore>) -> Self {
        Self {
            backend: Some(backend),
            cache: HashMap::new(),
            unpersisted: Vec::new(),
        }
    }

    /// A store with no durable backend. Everything lives for the session only.
    #[must_use]
    pub fn detached() -> Self {
        Self {
            backend: None,
            cache: HashMap::new(),
            unpersisted: Vec::new(),
        }
    }

    /// Reads a preference. `None` means "use the default".
    pub fn get(&mut self, key: &str) -> Option<bool> {
        if let Some(&value) = self.cache.get(key) {
            return Some(value);
        }
        let raw = match self.backend.as_ref()?.get(key) {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "could not read preference");
                return None;
            }
        };
        let value = match raw.as_str() {
            "true" => true,
            "false" => false,
            other => {
                tracing::debug!(key = %key, value = %other, "ignoring unreadable preference");
                return None;
            }
        };
        self.cache.insert(key.to_string(), value);
        Some(value)
    }

    /// Records a preference. Never fails.
    pub fn set(&mut self, key: &str, value: bool) {
        self.cache.insert(key.to_string(), value);
        let Some(backend) = self.backend.as_mut() else {
            self.mark_unpersisted(key);
            return;
        };
        match backend.set(key, if value { "true" } else { "false" }) {
            Ok(()) => self.unpersisted.retain(|k| k != key),
            Err(e) => {
                tracing::warn!(key = %key, error = %e, "preference not persisted this session");
                self.mark_unpersisted(key);
            }
        }
    }

    /// Whether the last write of `key` reached the durable store.
    #[must_use]
    pub fn is_persisted(&self, key: &str) -> bool {
        self.cache.contains_key(key) && !self.unpersisted.iter().any(|k| k == key)
    }

    fn mark_unpersisted(&mut self, key: &str) {
        if !self.unpersisted.iter().any(|k| k == key) {
            self.unpersisted.push(key.to_string());
        }
    }
}
