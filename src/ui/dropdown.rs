//! At-most-one dropdown state machine with viewport-aware placement.

use crate::dom::{Dom, NodeId, Selector};
use crate::domain::{Horizontal, Placement, Vertical};

/// The open dropdown and where its menu was placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropdownHandle {
    pub node: NodeId,
    pub placement: Placement,
}

/// Tracks the single open `.dropdown`.
///
/// Opening a dropdown first force-closes every `.dropdown.open` in the document,
/// including ones opened behind the controller's back, so the invariant holds for
/// the DOM and not only for this struct.
#[derive(Debug, Clone)]
pub struct DropdownController {
    open: Option<DropdownHandle>,
    open_selector: Option<Selector>,
    menu_selector: Option<Selector>,
}

impl Default for DropdownController {
    fn default() -> Self {
        Self::new()
    }
}

impl DropdownController {
    #[must_use]
    pub fn new() -> Self {
        Self {
            open: None,
            open_selector: Selector::parse(".dropdown.open").ok(),
            menu_selector: Selector::parse(".dropdown-menu").ok(),
        }
    }

    #[must_use]
    pub const fn open_dropdown(&self) -> Option<DropdownHandle> {
        self.open
    }

    /// Toggles `dropdown`. Returns whether it is open afterwards.
    pub fn toggle<D: Dom + ?Sized>(&mut self, dom: &mut D, dropdown: NodeId) -> bool {
        let _span = tracing::debug_span!("dropdown_toggle", node = %dropdown).entered();

        if dom.tag(dropdown).is_none() {
            tracing::debug!("unknown dropdown, ignoring");
            return false;
        }
        let was_open = dom.has_class(dropdown, "open");
        self.close_all(dom);
        if was_open {
            return false;
        }

        dom.add_class(dropdown, "open");
        let placement = self.place(dom, dropdown);
        self.open = Some(DropdownHandle {
            node: dropdown,
            placement,
        });
        tracing::debug!(?placement, "dropdown opened");
        true
    }

    /// Closes every open dropdown. Returns whether anything was open.
    pub fn close_all<D: Dom + ?Sized>(&mut self, dom: &mut D) -> bool {
        let mut open = self
            .open_selector
            .as_ref()
            .map(|s| dom.query_all(dom.document(), s))
            .unwrap_or_default();
        if let Some(handle) = self.open.take() {
            if !open.contains(&handle.node) {
                open.push(handle.node);
            }
        }
        for &node in &open {
            dom.remove_class(node, "open");
        }
        !open.is_empty()
    }

    /// Measures the menu against the viewport and sets the flip classes.
    fn place<D: Dom + ?Sized>(&self, dom: &mut D, dropdown: NodeId) -> Placement {
        let Some(menu) = self.menu_selector.as_ref().and_then(|s| dom.query(dropdown, s)) else {
            return Placement::default();
        };
        let placement = Placement::compute(dom.rect(dropdown), dom.rect(menu).size(), dom.viewport());
        dom.set_class(menu, "dropdown-right", placement.horizontal == Horizontal::Right);
        dom.set_class(menu, "dropdown-up", placement.vertical == Vertical::Up);
        placement
    }
}
