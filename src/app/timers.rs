//! Payloads for scheduled work.
//!
//! Every delay the runtime schedules is one of these variants. When the
//! [`Scheduler`](crate::timing::Scheduler) hands one back, the runtime routes it
//! to the owning controller, which checks that the entity is still in the state
//! that scheduled it.

use crate::dom::NodeId;

/// What to do when a scheduled delay elapses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Timer {
    /// Focus the first focusable field of an opened modal.
    ModalFocus { id: String },
    /// Hide the overlay of a modal that is still closed.
    ModalTeardown { id: String },
    /// Enter transition of a freshly created notification.
    NotificationShow { id: String },
    /// TTL expiry of a notification.
    NotificationExpire { id: String },
    /// Final removal of a dismissed notification.
    NotificationRemove { id: String },
    TooltipShow { node: NodeId },
    TooltipRemove { node: NodeId },
    /// Trailing edge of the search debounce.
    Search,
    /// Trailing edge of the resize debounce.
    Resize,
    /// Host command after a message swipe animation.
    SwipeCommit { action: SwipeAction },
    /// Removal of the faded-out preloader.
    PreloaderRemove { node: NodeId },
}

impl Timer {
    /// Short name for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::ModalFocus { .. } => "modal_focus",
            Self::ModalTeardown { .. } => "modal_teardown",
            Self::NotificationShow { .. } => "notification_show",
            Self::NotificationExpire { .. } => "notification_expire",
            Self::NotificationRemove { .. } => "notification_remove",
            Self::TooltipShow { .. } => "tooltip_show",
            Self::TooltipRemove { .. } => "tooltip_remove",
            Self::Search => "search",
            Self::Resize => "resize",
            Self::SwipeCommit { .. } => "swipe_commit",
            Self::PreloaderRemove { .. } => "preloader_remove",
        }
    }
}

/// Host command a message swipe commits to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwipeAction {
    Archive,
    Delete,
}

impl SwipeAction {
    /// Host command name, also the suffix of the `swipe-*` class.
    #[must_use]
    pub const fn command(self) -> &'static str {
        match self {
            Self::Archive => "archive",
            Self::Delete => "delete",
        }
    }
}
