//! Transient notification queue.
//!
//! Each entry moves through `Entering → Visible → Leaving → removed`:
//!
//! - `notify` creates the markup and schedules the enter tick (10ms) and, for a
//!   nonzero TTL, the expiry exactly `ttl` after creation.
//! - `dismiss` cancels both, drops `visible` at once and schedules removal after
//!   the transition delay. Dismissing a leaving or unknown id does nothing.
//! - [`NotificationQueue::visible`] excludes leaving entries, so callers see a
//!   dismissed entry disappear immediately while its cleanup still runs.
//!
//! Messages are always inserted as text.

use crate::app::Timer;
use crate::dom::{Dom, NodeId};
use crate::domain::{NotificationEntry, NotificationKind};
use crate::timing::{Millis, Scheduler, TimerToken};

const CONTAINER_ID: &str = "skin-notifications";
const SHOW_TICK_MS: Millis = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationState {
    Entering,
    Visible,
    Leaving,
}

#[derive(Debug, Clone)]
struct Slot {
    entry: NotificationEntry,
    node: NodeId,
    state: NotificationState,
    show: Option<TimerToken>,
    expiry: Option<TimerToken>,
    removal: Option<TimerToken>,
}

#[derive(Debug, Clone)]
pub struct NotificationQueue {
    slots: Vec<Slot>,
    next_id: u64,
    default_ttl: Millis,
    removal_delay: Millis,
}

impl NotificationQueue {
    #[must_use]
    pub const fn new(default_ttl: Millis, removal_delay: Millis) -> Self {
        Self {
            slots: Vec::new(),
            next_id: 1,
            default_ttl,
            removal_delay,
        }
    }

    /// Returns the `#skin-notifications` container, creating it on first use.
    pub fn ensure_container<D: Dom + ?Sized>(dom: &mut D) -> NodeId {
        if let Some(container) = dom.element_by_id(CONTAINER_ID) {
            return container;
        }
        let container = dom.create_element("div");
        dom.set_attr(container, "id", CONTAINER_ID);
        let body = dom.body();
        dom.append_child(body, container);
        container
    }

    /// Shows a notification and returns its id.
    ///
    /// `ttl` of `None` uses the configured default; `Some(0)` never expires.
    pub fn notify<D: Dom + ?Sized>(
        &mut self,
        dom: &mut D,
        scheduler: &mut Scheduler<Timer>,
        message: &str,
        kind: NotificationKind,
        ttl: Option<Millis>,
    ) -> String {
        let ttl = ttl.unwrap_or(self.default_ttl);
        let id = format!("notification-{}", self.next_id);
        self.next_id += 1;
        let _span = tracing::debug_span!("notify", notification_id = %id, kind = %kind.as_class(), ttl).entered();

        let entry = NotificationEntry::new(id.clone(), message.to_string(), kind, scheduler.now(), ttl);
        let node = Self::render(dom, &entry);

        let show = scheduler.schedule(SHOW_TICK_MS, Timer::NotificationShow { id: id.clone() });
        let expiry = (ttl > 0).then(|| scheduler.schedule(ttl, Timer::NotificationExpire { id: id.clone() }));

        self.slots.push(Slot {
            entry,
            node,
            state: NotificationState::Entering,
            show: Some(show),
            expiry,
            removal: None,
        });
        tracing::debug!(queued = self.slots.len(), "notification created");
        id
    }

    /// Starts the exit of `id`. Returns `false` for unknown or already leaving ids.
    pub fn dismiss<D: Dom + ?Sized>(&mut self, dom: &mut D, scheduler: &mut Scheduler<Timer>, id: &str) -> bool {
        let Some(slot) = self.slots.iter_mut().find(|s| s.entry.id == id) else {
            tracing::debug!(notification_id = %id, "unknown notification, ignoring");
            return false;
        };
        if slot.state == NotificationState::Leaving {
            return false;
        }
        for token in [slot.show.take(), slot.expiry.take()].into_iter().flatten() {
            scheduler.cancel(token);
        }
        dom.remove_class(slot.node, "visible");
        slot.state = NotificationState::Leaving;
        slot.removal = Some(scheduler.schedule(
            self.removal_delay,
            Timer::NotificationRemove { id: id.to_string() },
        ));
        tracing::debug!(notification_id = %id, "notification dismissed");
        true
    }

    pub fn on_show<D: Dom + ?Sized>(&mut self, dom: &mut D, id: &str) {
        if let Some(slot) = self.slots.iter_mut().find(|s| s.entry.id == id) {
            slot.show = None;
            if slot.state == NotificationState::Entering {
                dom.add_class(slot.node, "visible");
                slot.state = NotificationState::Visible;
            }
        }
    }

    pub fn on_expire<D: Dom + ?Sized>(&mut self, dom: &mut D, scheduler: &mut Scheduler<Timer>, id: &str) {
        if let Some(slot) = self.slots.iter_mut().find(|s| s.entry.id == id) {
            slot.expiry = None;
        }
        self.dismiss(dom, scheduler, id);
    }

    pub fn on_remove<D: Dom + ?Sized>(&mut self, dom: &mut D, id: &str) {
        let Some(index) = self
            .slots
            .iter()
            .position(|s| s.entry.id == id && s.state == NotificationState::Leaving)
        else {
            return;
        };
        let slot = self.slots.remove(index);
        dom.remove(slot.node);
        tracing::debug!(notification_id = %id, "notification removed");
    }

    /// Entries that should be rendered, oldest first.
    #[must_use]
    pub fn visible(&self) -> Vec<&NotificationEntry> {
        self.slots
            .iter()
            .filter(|s| s.state != NotificationState::Leaving)
            .map(|s| &s.entry)
            .collect()
    }

    #[must_use]
    pub fn state(&self, id: &str) -> Option<NotificationState> {
        self.slots.iter().find(|s| s.entry.id == id).map(|s| s.state)
    }

    /// Entries still held, including ones waiting for removal.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn render<D: Dom + ?Sized>(dom: &mut D, entry: &NotificationEntry) -> NodeId {
        let container = Self::ensure_container(dom);

        let node = dom.create_element("div");
        dom.set_attr(node, "id", &entry.id);
        dom.add_class(node, "notification");
        dom.add_class(node, entry.kind.as_class());

        let icon = dom.create_element("span");
        dom.add_class(icon, "notification-icon");
        dom.set_text(icon, entry.kind.icon());

        let content = dom.create_element("div");
        dom.add_class(content, "notification-content");
        let message = dom.create_element("div");
        dom.add_class(message, "notification-message");
        dom.set_text(message, &entry.message);
        dom.append_child(content, message);

        let close = dom.create_element("button");
        dom.add_class(close, "notification-close");
        dom.set_text(close, "✕");

        dom.append_child(node, icon);
        dom.append_child(node, content);
        dom.append_child(node, close);
        dom.append_child(container, node);
        node
    }
}
