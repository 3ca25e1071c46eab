//! Global keyboard shortcut table.
//!
//! [`resolve`] is a pure mapping from a key press to a [`Shortcut`]; whether the
//! shortcut may run (focus inside a form field, host attached) is decided by the
//! runtime.

use crate::events::Modifiers;

/// Action bound to a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    ToggleDarkMode,
    ToggleSidebar,
    /// Close every visible modal and the open dropdown.
    CloseAll,
    FocusSearch,
    /// A host command. Inert when no host is attached.
    Host(&'static str),
}

impl Shortcut {
    /// Whether handling the shortcut suppresses the browser default.
    #[must_use]
    pub const fn prevents_default(self) -> bool {
        !matches!(self, Self::CloseAll)
    }
}

/// Maps a key press to its shortcut. Key names compare case-insensitively.
///
/// # Examples
///
/// ```
/// use mailskin::app::{resolve, Shortcut};
/// use mailskin::events::Modifiers;
///
/// let ctrl = Modifiers { ctrl: true, ..Modifiers::default() };
/// assert_eq!(resolve("d", ctrl), Some(Shortcut::ToggleDarkMode));
/// assert_eq!(resolve("j", Modifiers::default()), Some(Shortcut::Host("nextmessage")));
/// assert_eq!(resolve("x", Modifiers::default()), None);
/// ```
#[must_use]
pub fn resolve(key: &str, modifiers: Modifiers) -> Option<Shortcut> {
    let key = key.to_lowercase();
    let command = modifiers.command();
    let shortcut = match key.as_str() {
        "d" if command => Shortcut::ToggleDarkMode,
        "b" if command => Shortcut::ToggleSidebar,
        "escape" => Shortcut::CloseAll,
        "/" if !command => Shortcut::FocusSearch,
        "c" if !command => Shortcut::Host("compose"),
        "r" if !command && modifiers.shift => Shortcut::Host("reply-all"),
        "r" if !command => Shortcut::Host("reply"),
        "f" if !command => Shortcut::Host("forward"),
        "delete" => Shortcut::Host("delete"),
        "j" => Shortcut::Host("nextmessage"),
        "k" => Shortcut::Host("previousmessage"),
        _ => return None,
    };
    Some(shortcut)
}

/// Tags whose focus suppresses shortcuts.
#[must_use]
pub fn is_form_field(tag: Option<&str>) -> bool {
    matches!(tag, Some("input" | "textarea" | "select"))
}
