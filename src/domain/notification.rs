//! Notification domain types.
//!
//! A notification is a short transient message with a severity kind. The lifecycle
//! (entering, visible, hiding) lives in [`NotificationQueue`](crate::ui::NotificationQueue);
//! this module only holds the data that crosses the public API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Severity of a notification, mapped to a CSS modifier class and an icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// Operation completed.
    Success,
    /// Operation failed.
    Error,
    /// Something needs attention.
    Warning,
    /// Neutral information (the default).
    #[default]
    Info,
}

impl NotificationKind {
    /// CSS class added next to `notification`.
    #[must_use]
    pub const fn as_class(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }

    /// Glyph rendered in the `.notification-icon` slot.
    #[must_use]
    pub const fn icon(self) -> &'static str {
        match self {
            Self::Success => "✓",
            Self::Error => "✕",
            Self::Warning => "⚠",
            Self::Info => "ℹ",
        }
    }

    /// Parses the loose kind names accepted from embedding code.
    ///
    /// Unknown names fall back to [`NotificationKind::Info`].
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "success" => Self::Success,
            "error" => Self::Error,
            "warning" => Self::Warning,
            _ => Self::Info,
        }
    }
}

/// A notification as created by `notify()`.
///
/// `ttl_ms == 0` means the entry never expires on its own and must be dismissed.
///
/// Two clocks are recorded. `created_at` is wall-clock time for display and
/// logs; `created_ms` is the runtime's scheduler time, which the TTL counts
/// from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationEntry {
    pub id: String,
    pub message: String,
    pub kind: NotificationKind,
    pub created_at: DateTime<Utc>,
    /// Scheduler time at creation.
    pub created_ms: u64,
    pub ttl_ms: u64,
}

impl NotificationEntry {
    /// Creates an entry created at scheduler time `created_ms`.
    #[must_use]
    pub fn new(id: String, message: String, kind: NotificationKind, created_ms: u64, ttl_ms: u64) -> Self {
        Self {
            id,
            message,
            kind,
            created_at: Utc::now(),
            created_ms,
            ttl_ms,
        }
    }

    /// Whether this entry schedules its own dismissal.
    #[must_use]
    pub const fn expires(&self) -> bool {
        self.ttl_ms > 0
    }

    /// Scheduler time at which the entry dismisses itself.
    #[must_use]
    pub const fn expires_at(&self) -> Option<u64> {
        if self.expires() {
            Some(self.created_ms.saturating_add(self.ttl_ms))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_kind_names_fall_back_to_info() {
        assert_eq!(NotificationKind::from_name("ERROR"), NotificationKind::Error);
        assert_eq!(NotificationKind::from_name(" warning "), NotificationKind::Warning);
        assert_eq!(NotificationKind::from_name("fatal"), NotificationKind::Info);
    }

    #[test]
    fn zero_ttl_never_expires() {
        let entry = NotificationEntry::new("n-1".into(), "hi".into(), NotificationKind::Info, 40, 0);
        assert!(!entry.expires());
        assert_eq!(entry.expires_at(), None);
    }

    #[test]
    fn expiry_counts_from_scheduler_creation_time() {
        let entry = NotificationEntry::new("n-2".into(), "hi".into(), NotificationKind::Error, 1_200, 5_000);
        assert_eq!(entry.expires_at(), Some(6_200));
    }

    #[test]
    fn entries_serialize_with_timestamps() {
        let entry = NotificationEntry::new("n-3".into(), "saved".into(), NotificationKind::Success, 7, 100);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["kind"], "success");
        assert_eq!(json["created_ms"], 7);
        assert!(json["created_at"].is_string());

        let back: NotificationEntry = serde_json::from_value(json).unwrap();
        assert_eq!(back, entry);
    }
}
