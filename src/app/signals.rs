//! Observable events emitted by the runtime.
//!
//! The runtime queues a [`Signal`] whenever something an embedding page may want
//! to react to happens. Signals are collected in order and handed out by
//! [`Skin::drain_signals`](crate::app::Skin::drain_signals); nothing inside the
//! crate consumes them.
//!
//! # Example
//!
//! ```rust
//! use mailskin::app::Signal;
//!
//! let signal = Signal::DarkModeChanged { enabled: true };
//! assert_eq!(signal.name(), "darkModeChanged");
//! ```

/// A custom event raised by the skin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Signal {
    /// Dark mode was switched, by the user or by the platform scheme.
    DarkModeChanged {
        /// Whether dark mode is now on.
        enabled: bool,
    },

    /// A modal became visible.
    ModalOpened {
        /// Element id of the modal.
        id: String,
    },

    /// A visible modal was closed.
    ModalClosed {
        /// Element id of the modal.
        id: String,
    },

    /// A tab was activated.
    TabChanged {
        /// The activated tab's `data-tab` target.
        target: String,
    },
}

impl Signal {
    /// Event name as dispatched on the page.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::DarkModeChanged { .. } => "darkModeChanged",
            Self::ModalOpened { .. } => "modal:open",
            Self::ModalClosed { .. } => "modal:close",
            Self::TabChanged { .. } => "tab:change",
        }
    }
}
