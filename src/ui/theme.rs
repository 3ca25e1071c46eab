//! Dark-mode and sidebar presentation state.
//!
//! Both controllers own a single boolean mirrored onto one class:
//!
//! | Controller | Class | Element |
//! |------------|-------|---------|
//! | [`ThemeController`] | `dark-mode` | document element |
//! | [`SidebarController`] | `sidebar-collapsed` | body |
//!
//! Persistence is the caller's job. The runtime reads the stored preference once
//! at startup and writes it back on every user toggle, so these types stay free of
//! storage concerns and can be driven directly in tests.
//!
//! # System colour scheme
//!
//! When no dark-mode preference was stored, the theme follows the platform scheme
//! for the rest of the session: [`ThemeController::follow_system`] marks it, and
//! later scheme changes are honoured only while that mark is set.
//!
//! # Example
//!
//! ```rust
//! use mailskin::dom::{Dom, MemoryDom};
//! use mailskin::ui::ThemeController;
//!
//! let mut dom = MemoryDom::new();
//! let mut theme = ThemeController::new();
//! assert!(theme.toggle(&mut dom, None));
//! assert!(dom.has_class(dom.document_element(), "dark-mode"));
//! assert!(!theme.toggle(&mut dom, Some(false)));
//! ```

use crate::dom::Dom;

const DARK_CLASS: &str = "dark-mode";
const COLLAPSED_CLASS: &str = "sidebar-collapsed";

/// Icon shown on `#dark-mode-toggle` for the current theme.
#[must_use]
pub const fn dark_mode_icon(enabled: bool) -> &'static str {
    if enabled {
        "☀️"
    } else {
        "🌙"
    }
}

#[derive(Debug, Clone, Default)]
pub struct ThemeController {
    enabled: bool,
    follows_system: bool,
}

impl ThemeController {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            enabled: false,
            follows_system: false,
        }
    }

    #[must_use]
    pub const fn is_dark(&self) -> bool {
        self.enabled
    }

    #[must_use]
    pub const fn follows_system(&self) -> bool {
        self.follows_system
    }

    /// Marks the theme as tracking the platform scheme.
    pub fn follow_system(&mut self) {
        self.follows_system = true;
    }

    /// Sets the theme to `enable`, or flips it when `None`. Returns the new value.
    pub fn toggle<D: Dom + ?Sized>(&mut self, dom: &mut D, enable: Option<bool>) -> bool {
        self.enabled = enable.unwrap_or(!self.enabled);
        let root = dom.document_element();
        dom.set_class(root, DARK_CLASS, self.enabled);
        tracing::debug!(enabled = self.enabled, "dark mode applied");
        self.enabled
    }
}

#[derive(Debug, Clone, Default)]
pub struct SidebarController {
    collapsed: bool,
}

impl SidebarController {
    #[must_use]
    pub const fn new() -> Self {
        Self { collapsed: false }
    }

    #[must_use]
    pub const fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    /// Sets the collapsed state. Returns the new value.
    pub fn set<D: Dom + ?Sized>(&mut self, dom: &mut D, collapsed: bool) -> bool {
        self.collapsed = collapsed;
        let body = dom.body();
        dom.set_class(body, COLLAPSED_CLASS, collapsed);
        tracing::debug!(collapsed, "sidebar applied");
        collapsed
    }

    pub fn toggle<D: Dom + ?Sized>(&mut self, dom: &mut D) -> bool {
        self.set(dom, !self.collapsed)
    }
}
