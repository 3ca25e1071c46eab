//! mailskin: the interaction-state engine of a webmail skin.
//!
//! mailskin layers interactive behaviour over markup rendered by a host mail
//! client:
//! - Modals with scroll locking and cancellable overlay teardown
//! - Dropdowns that never overlap and flip near viewport edges
//! - Auto-expiring notifications with two-phase dismissal
//! - Touch swipes on message rows and edge swipes for the sidebar
//! - Keyboard shortcuts, tabs, tooltips, debounced search
//! - Persisted dark-mode and sidebar preferences that degrade to session state

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Embedding shell (main.rs, a browser bridge, tests) │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │  events, host hooks, clock
//! ┌─────────────────────────────────────────────────────┐
//! │  Composition root (app/)                            │
//! │  - Skin lifecycle                                   │
//! │  - Binding dispatch                                 │
//! │  - Keyboard shortcuts, signals                      │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Controllers   │   │ Storage       │   │ Host          │
//! │ (ui/)         │   │ (storage/)    │   │ (host/)       │
//! │ - Modals      │   │ - Preferences │   │ - Commands    │
//! │ - Dropdowns   │   │ - JSON file   │   │ - Environment │
//! │ - Notices     │   │ - Memory      │   │ - Hooks       │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │
//! ┌─────────────────────────────────────────────────────┐
//! │  Runtime primitives                                 │
//! │  - Delegated events (events/)                       │
//! │  - Gesture recognition (gesture/)                   │
//! │  - Virtual-clock timers, debounce (timing/)         │
//! │  - DOM adapter and selectors (dom/)                 │
//! │  - Errors and value types (domain/)                 │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: The [`Skin`] runtime, event bindings, shortcuts and signals
//! - [`ui`]: Interface controllers and content enhancements
//! - [`gesture`]: Swipe recognition
//! - [`events`]: Delegated event table
//! - [`dom`]: DOM adapter trait, selectors, in-memory document
//! - [`timing`]: Scheduler, debounce and throttle
//! - [`storage`]: Key-value stores and the preference layer
//! - [`host`]: Host mail-client capability
//! - [`domain`]: Error type and plain value types
//! - [`observability`]: Tracing subscriber setup
//!
//! # Configuration
//!
//! Tunables come from a host-supplied string map or a TOML file:
//!
//! ```toml
//! animation_duration_ms = 300
//! notification_duration_ms = 5000
//! debounce_delay_ms = 250
//! touch_threshold_px = 50.0
//! trace_level = "debug"
//! ```
//!
//! # Event Loop
//!
//! The runtime is single-threaded and never sleeps. The embedding shell:
//!
//! 1. Calls [`Skin::init`] (deferred automatically while the document loads)
//! 2. Feeds DOM events through [`Skin::dispatch`]
//! 3. Forwards host lifecycle hooks through [`Skin::on_host_hook`]
//! 4. Advances the clock with [`Skin::advance_to`], which fires due timers
//!
//! # Examples
//!
//! ```rust
//! use mailskin::dom::{Dom, MemoryDom};
//! use mailskin::host::RecordingHost;
//! use mailskin::storage::{MemoryStore, PreferenceStore};
//! use mailskin::{Skin, SkinConfig};
//!
//! let prefs = PreferenceStore::new(Box::new(MemoryStore::new()));
//! let mut skin = Skin::new(MemoryDom::new(), Some(RecordingHost::new()), prefs, SkinConfig::default())?;
//! skin.init();
//!
//! let id = skin.notify("Message sent", None, None);
//! skin.advance_by(10);
//! assert!(skin.dom().element_by_id(&id).is_some());
//! # Ok::<(), mailskin::SkinError>(())
//! ```
//!
//! # Key Design Decisions
//!
//! ## Timers as Data
//!
//! Every delay is a [`timing::Scheduler`] entry holding an [`app::Timer`]
//! payload and a cancellable token. Superseding transitions cancel the token
//! they replaced, so stale timers never act on reused state.
//!
//! ## Bindings as Data
//!
//! Delegated handlers are [`app::Binding`] values in a registration table. The
//! table is built once in [`Skin::new`]; content re-enhancement only touches
//! markup.
//!
//! ## Nothing Is Fatal
//!
//! Unknown ids, missing hosts, failing stores and malformed gestures are logged
//! and ignored. Only configuration loading returns errors.

pub mod app;
pub mod dom;
pub mod domain;
pub mod events;
pub mod gesture;
pub mod host;
pub mod storage;
pub mod timing;
pub mod ui;

pub mod observability;

pub use app::{Dispatched, Lifecycle, Signal, Skin};
pub use domain::{LayoutMode, NotificationKind, Result, SkinError};

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

/// Runtime tunables.
///
/// Every field has a default, so partial TOML documents and host maps are fine.
///
/// # Example
///
/// ```toml
/// animation_duration_ms = 200
/// dark_mode_key = "my_skin_dark"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SkinConfig {
    /// Modal teardown, notification removal and swipe-commit delay. Default: 300
    pub animation_duration_ms: u64,

    /// TTL for notifications shown without one. Default: 5000
    pub notification_duration_ms: u64,

    /// Resize and search debounce window. Default: 250
    pub debounce_delay_ms: u64,

    /// Distance a message row must travel to count as a swipe. Default: 50
    pub touch_threshold_px: f64,

    /// Distance a document swipe must travel to count. Default: 100
    pub edge_swipe_threshold_px: f64,

    /// Left-edge zone where a right swipe opens the sidebar. Default: 30
    pub edge_margin_px: f64,

    /// Start-x zone where a left swipe closes the sidebar. Default: 300
    pub sidebar_swipe_zone_px: f64,

    /// Drag distance before a row follows the finger. Default: 20
    pub live_drag_threshold_px: f64,

    /// Delay before focusing the first field of an opened modal. Default: 100
    pub focus_delay_ms: u64,

    /// Shortest query that triggers a search. Default: 2
    pub search_min_chars: usize,

    /// Preference key for dark mode.
    pub dark_mode_key: String,

    /// Preference key for the collapsed sidebar.
    pub sidebar_collapsed_key: String,

    /// Tracing filter directive.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`, or a full
    /// `EnvFilter` directive. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for SkinConfig {
    fn default() -> Self {
        Self {
            animation_duration_ms: 300,
            notification_duration_ms: 5_000,
            debounce_delay_ms: 250,
            touch_threshold_px: 50.0,
            edge_swipe_threshold_px: 100.0,
            edge_margin_px: 30.0,
            sidebar_swipe_zone_px: 300.0,
            live_drag_threshold_px: 20.0,
            focus_delay_ms: 100,
            search_min_chars: 2,
            dark_mode_key: "mailskin_dark_mode".to_string(),
            sidebar_collapsed_key: "mailskin_sidebar_collapsed".to_string(),
            trace_level: None,
        }
    }
}

impl SkinConfig {
    /// Parses configuration from a host-supplied string map.
    ///
    /// Keys are the field names. Values that fail to parse fall back to the
    /// default for that field; empty strings are ignored.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use mailskin::SkinConfig;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("debounce_delay_ms".to_string(), "400".to_string());
    /// map.insert("touch_threshold_px".to_string(), "wide".to_string());
    ///
    /// let config = SkinConfig::from_env_map(&map);
    /// assert_eq!(config.debounce_delay_ms, 400);
    /// assert_eq!(config.touch_threshold_px, 50.0);
    /// ```
    #[must_use]
    pub fn from_env_map(config: &BTreeMap<String, String>) -> Self {
        let defaults = Self::default();
        let text = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        Self {
            animation_duration_ms: parsed(config, "animation_duration_ms", defaults.animation_duration_ms),
            notification_duration_ms: parsed(config, "notification_duration_ms", defaults.notification_duration_ms),
            debounce_delay_ms: parsed(config, "debounce_delay_ms", defaults.debounce_delay_ms),
            touch_threshold_px: parsed(config, "touch_threshold_px", defaults.touch_threshold_px),
            edge_swipe_threshold_px: parsed(config, "edge_swipe_threshold_px", defaults.edge_swipe_threshold_px),
            edge_margin_px: parsed(config, "edge_margin_px", defaults.edge_margin_px),
            sidebar_swipe_zone_px: parsed(config, "sidebar_swipe_zone_px", defaults.sidebar_swipe_zone_px),
            live_drag_threshold_px: parsed(config, "live_drag_threshold_px", defaults.live_drag_threshold_px),
            focus_delay_ms: parsed(config, "focus_delay_ms", defaults.focus_delay_ms),
            search_min_chars: parsed(config, "search_min_chars", defaults.search_min_chars),
            dark_mode_key: text("dark_mode_key").unwrap_or(defaults.dark_mode_key),
            sidebar_collapsed_key: text("sidebar_collapsed_key").unwrap_or(defaults.sidebar_collapsed_key),
            trace_level: text("trace_level"),
        }
    }

    /// Parses a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`SkinError::Config`] if the document is not valid TOML or a field
    /// has the wrong type.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        toml::from_str(source).map_err(|e| SkinError::Config(e.to_string()))
    }

    /// Reads and parses a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`SkinError::Io`] if the file cannot be read and
    /// [`SkinError::Config`] if it does not parse.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&source)?;
        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }
}

fn parsed<T: FromStr>(config: &BTreeMap<String, String>, key: &str, default: T) -> T {
    match config.get(key).map(|v| v.trim().parse::<T>()) {
        Some(Ok(value)) => value,
        Some(Err(_)) => {
            tracing::debug!(key = %key, "unparsable configuration value, using default");
            default
        }
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_overrides_only_given_fields() {
        let config = SkinConfig::from_toml_str(
            r#"
            animation_duration_ms = 150
            search_min_chars = 3
            trace_level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.animation_duration_ms, 150);
        assert_eq!(config.search_min_chars, 3);
        assert_eq!(config.trace_level.as_deref(), Some("debug"));
        assert_eq!(config.notification_duration_ms, 5_000);
    }

    #[test]
    fn malformed_toml_is_a_config_error() {
        let err = SkinConfig::from_toml_str("animation_duration_ms = \"slow\"").unwrap_err();
        assert!(matches!(err, SkinError::Config(_)));
    }

    #[test]
    fn file_loading() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("skin.toml");
        std::fs::write(&path, "edge_margin_px = 40.0\n").unwrap();
        assert_eq!(SkinConfig::from_file(&path).unwrap().edge_margin_px, 40.0);

        let missing = SkinConfig::from_file(dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(missing, SkinError::Io(_)));
    }

    #[test]
    fn env_map_trims_and_ignores_blanks() {
        let mut map = BTreeMap::new();
        map.insert("focus_delay_ms".to_string(), " 50 ".to_string());
        map.insert("dark_mode_key".to_string(), "  ".to_string());
        map.insert("trace_level".to_string(), "warn".to_string());
        let config = SkinConfig::from_env_map(&map);
        assert_eq!(config.focus_delay_ms, 50);
        assert_eq!(config.dark_mode_key, "mailskin_dark_mode");
        assert_eq!(config.trace_level.as_deref(), Some("warn"));
    }
}
