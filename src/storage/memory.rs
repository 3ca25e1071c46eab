//! In-process key-value backend.

use crate::domain::error::{Result, SkinError};
use crate::storage::backend::KeyValueStore;
use std::collections::BTreeMap;

/// Map-backed store with optional failure modes.
///
/// [`MemoryStore::unavailable`] fails every operation, like a browser with
/// storage disabled. [`MemoryStore::with_quota`] rejects writes that would grow
/// the map past a fixed number of entries.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
    available: bool,
    quota: Option<usize>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: BTreeMap::new(),
            available: true,
            quota: None,
        }
    }

    /// A store whose every operation fails.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    /// A store that holds at most `entries` keys.
    #[must_use]
    pub fn with_quota(entries: usize) -> Self {
        Self {
            quota: Some(entries),
            ..Self::new()
        }
    }

    /// Seeds a value, bypassing availability and quota checks.
    #[must_use]
    pub fn with_value(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }

    fn check_available(&self) -> Result<()> {
        if self.available {
            Ok(())
        } else {
            Err(SkinError::Storage("store unavailable".to_string()))
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        self.check_available()?;
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.check_available()?;
        let grows = !self.values.contains_key(key);
        if let Some(quota) = self.quota {
            if grows && self.values.len() >= quota {
                return Err(SkinError::Storage(format!("quota of {quota} entries exceeded")));
            }
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.check_available()?;
        self.values.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unavailable_store_fails_every_operation() {
        let mut store = MemoryStore::unavailable();
        assert!(store.get("k").is_err());
        assert!(store.set("k", "v").is_err());
        assert!(store.remove("k").is_err());
    }

    #[test]
    fn quota_rejects_new_keys_but_allows_overwrites() {
        let mut store = MemoryStore::with_quota(1);
        store.set("a", "1").unwrap();
        store.set("a", "2").unwrap();
        assert!(store.set("b", "1").is_err());
        assert_eq!(store.get("a").unwrap().as_deref(), Some("2"));
    }
}
