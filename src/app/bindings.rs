//! Delegated event routes.
//!
//! Every interactive behaviour is a [`Binding`] registered once against a
//! selector (or the document) in [`BINDINGS`]. The runtime resolves a dispatch
//! to an ordered list of bindings through the [`EventBus`] and then matches on
//! them, so handlers are plain data and re-rendered content keeps matching
//! without ever being bound again.

use crate::domain::error::Result;
use crate::events::{EventBus, EventType};

/// What to do for a delegated event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Binding {
    DropdownToggle,
    /// Document click closing dropdowns when it lands outside all of them.
    DropdownOutside,
    ModalOpen,
    ModalBackdrop,
    ModalClose,
    Tab,
    SearchInput,
    SearchClear,
    SidebarToggle,
    FolderToggle,
    NotificationClose,
    TooltipEnter,
    TooltipLeave,
    PasswordToggle,
    LoginBlur,
    RecipientKey,
    TagRemove,
    HostCommand,
    DarkModeButton,
    SwipeStart,
    SwipeMove,
    SwipeEnd,
    EdgeStart,
    EdgeEnd,
    Keyboard,
}

const MESSAGE_ROWS: &str =
    "#messagelist .message-item, #messagelist tr, .message-list .message-item, .message-list tr";

const RECIPIENTS: &str = r#"#compose-form input[name="_to"], #compose-form input[name="_cc"], #compose-form input[name="_bcc"], .compose-form input[name="_to"], .compose-form input[name="_cc"], .compose-form input[name="_bcc"]"#;

/// Registration table. `None` registers on the document.
pub const BINDINGS: &[(EventType, Option<&str>, Binding)] = &[
    (EventType::Click, Some(".dropdown-toggle"), Binding::DropdownToggle),
    (EventType::Click, None, Binding::DropdownOutside),
    (EventType::Click, Some("[data-modal]"), Binding::ModalOpen),
    (EventType::Click, Some(".modal-overlay"), Binding::ModalBackdrop),
    (
        EventType::Click,
        Some(".modal-close, .dialog-close, [data-modal-close]"),
        Binding::ModalClose,
    ),
    (EventType::Click, Some(".tabs .tab"), Binding::Tab),
    (EventType::Input, Some("#quicksearchbar input, .search-input"), Binding::SearchInput),
    (EventType::Click, Some(".search-clear"), Binding::SearchClear),
    (EventType::Click, Some(".sidebar-toggle, #sidebar-toggle"), Binding::SidebarToggle),
    (EventType::Click, Some(".folder-toggle"), Binding::FolderToggle),
    (EventType::Click, Some(".notification-close"), Binding::NotificationClose),
    (EventType::MouseEnter, Some("[data-tooltip]"), Binding::TooltipEnter),
    (EventType::MouseLeave, Some("[data-tooltip]"), Binding::TooltipLeave),
    (EventType::Click, Some("#login-form .password-toggle"), Binding::PasswordToggle),
    (EventType::Blur, Some("#login-form input"), Binding::LoginBlur),
    (EventType::KeyDown, Some(RECIPIENTS), Binding::RecipientKey),
    (EventType::Click, Some(".tag-remove"), Binding::TagRemove),
    (EventType::Click, Some("[data-command]"), Binding::HostCommand),
    (EventType::Click, Some("#dark-mode-toggle"), Binding::DarkModeButton),
    (EventType::TouchStart, Some(MESSAGE_ROWS), Binding::SwipeStart),
    (EventType::TouchMove, Some(MESSAGE_ROWS), Binding::SwipeMove),
    (EventType::TouchEnd, Some(MESSAGE_ROWS), Binding::SwipeEnd),
    (EventType::TouchStart, None, Binding::EdgeStart),
    (EventType::TouchEnd, None, Binding::EdgeEnd),
    (EventType::KeyDown, None, Binding::Keyboard),
];

/// Builds the event table.
///
/// # Errors
///
/// Returns [`SkinError::Selector`](crate::SkinError::Selector) if a selector in
/// the table does not parse.
pub fn event_table() -> Result<EventBus<Binding>> {
    let mut bus = EventBus::new();
    for &(event_type, selector, binding) in BINDINGS {
        match selector {
            Some(selector) => {
                bus.on(event_type, selector, binding)?;
            }
            None => {
                bus.on_document(event_type, binding);
            }
        }
    }
    tracing::debug!(listeners = bus.len(), "event table built");
    Ok(bus)
}
