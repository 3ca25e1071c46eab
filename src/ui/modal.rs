//! Modal visibility state machine.
//!
//! The visible set is the state: a modal id is in it iff its overlay carries
//! `visible` and the body scroll lock is held. Every `open` and `close` keeps the
//! lock equal to "visible set is non-empty".
//!
//! # Teardown
//!
//! Closing schedules a [`Timer::ModalTeardown`] after the transition delay and
//! stores its token on the handle. Reopening cancels that token, so a modal
//! reopened inside the window is never torn down. When teardown does fire the
//! overlay is hidden (`display: none`) but kept, together with the modal, for
//! the next open.

use crate::app::Timer;
use crate::dom::{Dom, NodeId, Selector};
use crate::timing::{Millis, Scheduler, TimerToken};
use std::collections::BTreeMap;

const OVERLAY_CLASS: &str = "modal-overlay";
const FOCUSABLE: &str = "input, select, textarea, button";

/// Per-modal bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalHandle {
    pub id: String,
    pub visible: bool,
    teardown: Option<TimerToken>,
    focus: Option<TimerToken>,
}

impl ModalHandle {
    fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            visible: false,
            teardown: None,
            focus: None,
        }
    }

    /// Whether an overlay teardown is still scheduled.
    #[must_use]
    pub const fn teardown_pending(&self) -> bool {
        self.teardown.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct ModalController {
    handles: BTreeMap<String, ModalHandle>,
    /// Visible ids in the order they were opened.
    visible: Vec<String>,
    focus_delay: Millis,
    teardown_delay: Millis,
    focusable: Option<Selector>,
}

impl ModalController {
    #[must_use]
    pub fn new(focus_delay: Millis, teardown_delay: Millis) -> Self {
        Self {
            handles: BTreeMap::new(),
            visible: Vec::new(),
            focus_delay,
            teardown_delay,
            focusable: Selector::parse(FOCUSABLE).ok(),
        }
    }

    /// Ids of visible modals, oldest first.
    #[must_use]
    pub fn visible_ids(&self) -> &[String] {
        &self.visible
    }

    #[must_use]
    pub fn is_visible(&self, id: &str) -> bool {
        self.visible.iter().any(|v| v == id)
    }

    #[must_use]
    pub fn handle(&self, id: &str) -> Option<&ModalHandle> {
        self.handles.get(id)
    }

    /// Shows the modal with element id `id`.
    ///
    /// Returns `false` (and does nothing) when no such element exists or it is
    /// already visible.
    pub fn open<D: Dom + ?Sized>(&mut self, dom: &mut D, scheduler: &mut Scheduler<Timer>, id: &str) -> bool {
        let _span = tracing::debug_span!("modal_open", modal_id = %id).entered();

        let Some(modal) = dom.element_by_id(id) else {
            tracing::debug!("unknown modal, ignoring");
            return false;
        };
        if self.is_visible(id) {
            tracing::debug!("modal already visible");
            return false;
        }

        let overlay = Self::ensure_overlay(dom, modal);
        let handle = self
            .handles
            .entry(id.to_string())
            .or_insert_with(|| ModalHandle::new(id));

        if let Some(token) = handle.teardown.take() {
            scheduler.cancel(token);
            tracing::debug!("cancelled pending teardown");
        }
        if let Some(token) = handle.focus.take() {
            scheduler.cancel(token);
        }

        dom.remove_style(overlay, "display");
        dom.add_class(overlay, "visible");
        dom.add_class(modal, "visible");
        let body = dom.body();
        dom.set_style(body, "overflow", "hidden");

        handle.visible = true;
        handle.focus = Some(scheduler.schedule(self.focus_delay, Timer::ModalFocus { id: id.to_string() }));
        self.visible.push(id.to_string());

        tracing::debug!(visible = self.visible.len(), "modal opened");
        true
    }

    /// Hides a visible modal. Returns `false` if it was not visible.
    pub fn close<D: Dom + ?Sized>(&mut self, dom: &mut D, scheduler: &mut Scheduler<Timer>, id: &str) -> bool {
        let _span = tracing::debug_span!("modal_close", modal_id = %id).entered();

        if !self.is_visible(id) {
            tracing::debug!("modal not visible, ignoring");
            return false;
        }
        self.visible.retain(|v| v != id);

        if let Some(modal) = dom.element_by_id(id) {
            dom.remove_class(modal, "visible");
            if let Some(overlay) = Self::overlay_of(dom, modal) {
                dom.remove_class(overlay, "visible");
            }
        }
        if self.visible.is_empty() {
            let body = dom.body();
            dom.remove_style(body, "overflow");
        }

        if let Some(handle) = self.handles.get_mut(id) {
            handle.visible = false;
            if let Some(token) = handle.focus.take() {
                scheduler.cancel(token);
            }
            if let Some(token) = handle.teardown.take() {
                scheduler.cancel(token);
            }
            handle.teardown = Some(scheduler.schedule(
                self.teardown_delay,
                Timer::ModalTeardown { id: id.to_string() },
            ));
        }

        tracing::debug!(visible = self.visible.len(), "modal closed");
        true
    }

    /// Closes every visible modal. Returns the ids closed, in opening order.
    pub fn close_all<D: Dom + ?Sized>(&mut self, dom: &mut D, scheduler: &mut Scheduler<Timer>) -> Vec<String> {
        let ids = self.visible.clone();
        ids.into_iter()
            .filter(|id| self.close(dom, scheduler, id))
            .collect()
    }

    /// Focus tick for `id`.
    pub fn on_focus<D: Dom + ?Sized>(&mut self, dom: &mut D, id: &str) {
        let Some(handle) = self.handles.get_mut(id) else {
            return;
        };
        handle.focus = None;
        if !handle.visible {
            return;
        }
        let target = dom
            .element_by_id(id)
            .zip(self.focusable.as_ref())
            .and_then(|(modal, selector)| dom.query(modal, selector));
        if let Some(field) = target {
            dom.focus(field);
        }
    }

    /// Teardown tick for `id`. Hides the overlay only if the modal stayed closed.
    pub fn on_teardown<D: Dom + ?Sized>(&mut self, dom: &mut D, id: &str, token: TimerToken) {
        let Some(handle) = self.handles.get_mut(id) else {
            return;
        };
        if handle.teardown != Some(token) {
            return;
        }
        handle.teardown = None;
        if handle.visible {
            return;
        }
        if let Some(overlay) = dom.element_by_id(id).and_then(|m| Self::overlay_of(dom, m)) {
            if !dom.has_class(overlay, "visible") {
                dom.set_style(overlay, "display", "none");
                tracing::debug!(modal_id = %id, "overlay hidden after close");
            }
        }
    }

    fn overlay_of<D: Dom + ?Sized>(dom: &D, modal: NodeId) -> Option<NodeId> {
        dom.parent(modal).filter(|&p| dom.has_class(p, OVERLAY_CLASS))
    }

    fn ensure_overlay<D: Dom + ?Sized>(dom: &mut D, modal: NodeId) -> NodeId {
        if let Some(overlay) = Self::overlay_of(dom, modal) {
            return overlay;
        }
        let overlay = dom.create_element("div");
        dom.add_class(overlay, OVERLAY_CLASS);
        let body = dom.body();
        dom.append_child(body, overlay);
        dom.append_child(overlay, modal);
        overlay
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::MemoryDom;

    fn fixture() -> (MemoryDom, Scheduler<Timer>, ModalController) {
        let mut dom = MemoryDom::new();
        let body = dom.body();
        dom.append_html(
            body,
            r#"<div class="modal" id="settings"><p>Hi</p><input name="q"></div><div class="dialog" id="about"></div>"#,
        )
        .unwrap();
        (dom, Scheduler::new(), ModalController::new(100, 300))
    }

    fn advance(dom: &mut MemoryDom, scheduler: &mut Scheduler<Timer>, modals: &mut ModalController, until: Millis) {
        while let Some(fired) = scheduler.pop_due(until) {
            match fired.payload {
                Timer::ModalFocus { id } => modals.on_focus(dom, &id),
                Timer::ModalTeardown { id } => modals.on_teardown(dom, &id, fired.token),
                other => panic!("unexpected timer {other:?}"),
            }
        }
        scheduler.settle(until);
    }

    fn body_locked(dom: &MemoryDom) -> bool {
        dom.style(dom.body(), "overflow").as_deref() == Some("hidden")
    }

    #[test]
    fn open_wraps_in_overlay_locks_scroll_and_focuses() {
        let (mut dom, mut scheduler, mut modals) = fixture();
        assert!(modals.open(&mut dom, &mut scheduler, "settings"));

        let modal = dom.element_by_id("settings").unwrap();
        let overlay = dom.parent(modal).unwrap();
        assert!(dom.has_class(overlay, "modal-overlay"));
        assert!(dom.has_class(overlay, "visible"));
        assert!(body_locked(&dom));
        assert_eq!(dom.focused(), None);

        advance(&mut dom, &mut scheduler, &mut modals, 100);
        let field = dom.query(modal, &Selector::parse("input").unwrap()).unwrap();
        assert_eq!(dom.focused(), Some(field));
    }

    #[test]
    fn unknown_id_is_a_noop() {
        let (mut dom, mut scheduler, mut modals) = fixture();
        let before = dom.serialize();
        assert!(!modals.open(&mut dom, &mut scheduler, "missing"));
        assert!(!modals.close(&mut dom, &mut scheduler, "missing"));
        assert_eq!(dom.serialize(), before);
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn scroll_lock_released_only_when_last_modal_closes() {
        let (mut dom, mut scheduler, mut modals) = fixture();
        modals.open(&mut dom, &mut scheduler, "settings");
        modals.open(&mut dom, &mut scheduler, "about");

        modals.close(&mut dom, &mut scheduler, "settings");
        assert!(body_locked(&dom));
        modals.close(&mut dom, &mut scheduler, "about");
        assert!(!body_locked(&dom));
    }

    #[test]
    fn reopen_during_teardown_window_keeps_modal_intact() {
        let (mut dom, mut scheduler, mut modals) = fixture();
        modals.open(&mut dom, &mut scheduler, "settings");
        modals.close(&mut dom, &mut scheduler, "settings");
        advance(&mut dom, &mut scheduler, &mut modals, 150);
        assert!(modals.open(&mut dom, &mut scheduler, "settings"));
        advance(&mut dom, &mut scheduler, &mut modals, 2_000);

        let modal = dom.element_by_id("settings").unwrap();
        let overlay = dom.parent(modal).unwrap();
        assert!(modals.is_visible("settings"));
        assert!(dom.has_class(overlay, "visible"));
        assert_eq!(dom.style(overlay, "display"), None);
        assert!(body_locked(&dom));
    }

    #[test]
    fn teardown_hides_overlay_and_reopen_restores_it() {
        let (mut dom, mut scheduler, mut modals) = fixture();
        modals.open(&mut dom, &mut scheduler, "settings");
        modals.close(&mut dom, &mut scheduler, "settings");
        advance(&mut dom, &mut scheduler, &mut modals, 1_000);

        let modal = dom.element_by_id("settings").unwrap();
        let overlay = dom.parent(modal).unwrap();
        assert_eq!(dom.style(overlay, "display").as_deref(), Some("none"));
        assert!(!modals.handle("settings").unwrap().teardown_pending());

        modals.open(&mut dom, &mut scheduler, "settings");
        assert_eq!(dom.parent(modal), Some(overlay));
        assert_eq!(dom.style(overlay, "display"), None);
    }

    #[test]
    fn close_all_closes_every_visible_modal() {
        let (mut dom, mut scheduler, mut modals) = fixture();
        modals.open(&mut dom, &mut scheduler, "settings");
        modals.open(&mut dom, &mut scheduler, "about");

        let closed = modals.close_all(&mut dom, &mut scheduler);
        assert_eq!(closed, vec!["settings", "about"]);
        assert!(modals.visible_ids().is_empty());
        assert!(!body_locked(&dom));
    }
}
