//! Delegated event table.
//!
//! Handlers are registered against a selector rather than a concrete node, so
//! they keep matching as content is replaced. At dispatch time the bus walks the
//! target's inclusive ancestor chain and, for every element, collects the
//! handlers whose selector matches it, in registration order. Document-level
//! handlers run last.
//!
//! ## Propagation
//!
//! - [`Outcome::Stop`] from any handler on an element lets the remaining
//!   handlers on that same element run, then skips every ancestor and the
//!   document level.
//! - Default prevention lives on the [`DomEvent`] payload, not on [`Outcome`].
//!
//! The bus is generic over the handler token `H`. The runtime uses a plain enum
//! of routes, which keeps the table free of closures that would need to borrow
//! the runtime itself.

use crate::dom::{Dom, NodeId, Selector};
use crate::domain::error::Result;
use crate::domain::Point;

/// Event kinds the runtime listens for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    Click,
    KeyDown,
    Input,
    Blur,
    MouseEnter,
    MouseLeave,
    TouchStart,
    TouchMove,
    TouchEnd,
}

impl EventType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::KeyDown => "keydown",
            Self::Input => "input",
            Self::Blur => "blur",
            Self::MouseEnter => "mouseenter",
            Self::MouseLeave => "mouseleave",
            Self::TouchStart => "touchstart",
            Self::TouchMove => "touchmove",
            Self::TouchEnd => "touchend",
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keyboard modifier state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
}

impl Modifiers {
    /// Ctrl on most platforms, Cmd on macOS.
    #[must_use]
    pub const fn command(self) -> bool {
        self.ctrl || self.meta
    }
}

/// An input event delivered to the runtime.
///
/// # Examples
///
/// ```
/// use mailskin::dom::{Dom, MemoryDom};
/// use mailskin::events::{DomEvent, EventType};
///
/// let dom = MemoryDom::new();
/// let event = DomEvent::key_down(dom.body(), "d").with_ctrl();
/// assert_eq!(event.kind, EventType::KeyDown);
/// assert!(event.modifiers.command());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DomEvent {
    pub kind: EventType,
    pub target: NodeId,
    /// Key name for keyboard events (`"Escape"`, `"d"`, `"/"`).
    pub key: Option<String>,
    pub modifiers: Modifiers,
    /// Client coordinates for touch events.
    pub point: Option<Point>,
    /// Set by handlers that suppress the platform default action.
    pub default_prevented: bool,
}

impl DomEvent {
    #[must_use]
    pub const fn new(kind: EventType, target: NodeId) -> Self {
        Self {
            kind,
            target,
            key: None,
            modifiers: Modifiers {
                ctrl: false,
                meta: false,
                shift: false,
            },
            point: None,
            default_prevented: false,
        }
    }

    #[must_use]
    pub const fn click(target: NodeId) -> Self {
        Self::new(EventType::Click, target)
    }

    #[must_use]
    pub fn key_down(target: NodeId, key: &str) -> Self {
        Self {
            key: Some(key.to_string()),
            ..Self::new(EventType::KeyDown, target)
        }
    }

    #[must_use]
    pub const fn input(target: NodeId) -> Self {
        Self::new(EventType::Input, target)
    }

    #[must_use]
    pub const fn blur(target: NodeId) -> Self {
        Self::new(EventType::Blur, target)
    }

    #[must_use]
    pub const fn mouse_enter(target: NodeId) -> Self {
        Self::new(EventType::MouseEnter, target)
    }

    #[must_use]
    pub const fn mouse_leave(target: NodeId) -> Self {
        Self::new(EventType::MouseLeave, target)
    }

    #[must_use]
    pub fn touch_start(target: NodeId, x: f64, y: f64) -> Self {
        Self::touch(EventType::TouchStart, target, x, y)
    }

    #[must_use]
    pub fn touch_move(target: NodeId, x: f64, y: f64) -> Self {
        Self::touch(EventType::TouchMove, target, x, y)
    }

    #[must_use]
    pub fn touch_end(target: NodeId, x: f64, y: f64) -> Self {
        Self::touch(EventType::TouchEnd, target, x, y)
    }

    fn touch(kind: EventType, target: NodeId, x: f64, y: f64) -> Self {
        let mut event = Self::new(kind, target);
        event.point = Some(Point::new(x, y));
        event
    }

    #[must_use]
    pub fn with_ctrl(mut self) -> Self {
        self.modifiers.ctrl = true;
        self
    }

    #[must_use]
    pub fn with_meta(mut self) -> Self {
        self.modifiers.meta = true;
        self
    }

    #[must_use]
    pub fn with_shift(mut self) -> Self {
        self.modifiers.shift = true;
        self
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }
}

/// Propagation control returned by a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Outcome {
    #[default]
    Continue,
    /// Finish this element's handlers, then stop bubbling.
    Stop,
}

/// Identifies one registration for [`EventBus::remove`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

#[derive(Debug, Clone)]
struct Registration<H> {
    id: ListenerId,
    event_type: EventType,
    /// `None` registers on the document itself.
    selector: Option<Selector>,
    handler: H,
}

/// Registration table mapping `(event type, selector)` to ordered handlers.
#[derive(Debug, Clone)]
pub struct EventBus<H> {
    registrations: Vec<Registration<H>>,
    next_id: u64,
}

impl<H> Default for EventBus<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> EventBus<H> {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            registrations: Vec::new(),
            next_id: 0,
        }
    }

    /// Registers a delegated handler for elements matching `selector`.
    ///
    /// # Errors
    ///
    /// Returns [`SkinError::Selector`](crate::SkinError::Selector) if `selector`
    /// does not parse.
    pub fn on(&mut self, event_type: EventType, selector: &str, handler: H) -> Result<ListenerId> {
        let selector = Selector::parse(selector)?;
        Ok(self.on_selector(event_type, selector, handler))
    }

    /// Registers a delegated handler with an already parsed selector.
    pub fn on_selector(&mut self, event_type: EventType, selector: Selector, handler: H) -> ListenerId {
        self.push(event_type, Some(selector), handler)
    }

    /// Registers a handler on the document. It sees every event of `event_type`
    /// that was not stopped on the way up.
    pub fn on_document(&mut self, event_type: EventType, handler: H) -> ListenerId {
        self.push(event_type, None, handler)
    }

    /// Removes one registration.
    pub fn remove(&mut self, id: ListenerId) -> bool {
        let before = self.registrations.len();
        self.registrations.retain(|r| r.id != id);
        self.registrations.len() != before
    }

    /// Number of registrations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    fn push(&mut self, event_type: EventType, selector: Option<Selector>, handler: H) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        tracing::trace!(
            event_type = %event_type,
            selector = selector.as_ref().map_or("#document", Selector::source),
            "listener registered"
        );
        self.registrations.push(Registration {
            id,
            event_type,
            selector,
            handler,
        });
        id
    }
}

impl<H: PartialEq> EventBus<H> {
    /// Removes every registration of `handler` for `(event_type, selector)`.
    ///
    /// Returns how many were removed. A selector that does not parse matches
    /// nothing and removes nothing.
    pub fn off(&mut self, event_type: EventType, selector: &str, handler: &H) -> usize {
        let before = self.registrations.len();
        self.registrations.retain(|r| {
            !(r.event_type == event_type
                && r.selector.as_ref().is_some_and(|s| s.source().trim() == selector.trim())
                && r.handler == *handler)
        });
        before - self.registrations.len()
    }
}

impl<H: Clone> EventBus<H> {
    /// Resolves the delivery plan for an event of `event_type` on `target`.
    ///
    /// The plan is a snapshot: handlers registered or removed while it runs do not
    /// affect it.
    pub fn route<D: Dom + ?Sized>(&self, dom: &D, event_type: EventType, target: NodeId) -> Route<H> {
        let candidates: Vec<&Registration<H>> = self
            .registrations
            .iter()
            .filter(|r| r.event_type == event_type)
            .collect();

        let mut levels = Vec::new();
        if dom.tag(target).is_some() {
            let document = dom.document();
            let path = std::iter::once(target)
                .chain(dom.ancestors(target))
                .filter(|&n| n != document);
            for node in path {
                let handlers: Vec<H> = candidates
                    .iter()
                    .filter(|r| r.selector.as_ref().is_some_and(|s| s.matches(dom, node)))
                    .map(|r| r.handler.clone())
                    .collect();
                if !handlers.is_empty() {
                    levels.push(Level { node, handlers });
                }
            }
        }

        let document_handlers: Vec<H> = candidates
            .iter()
            .filter(|r| r.selector.is_none())
            .map(|r| r.handler.clone())
            .collect();
        if !document_handlers.is_empty() {
            levels.push(Level {
                node: dom.document(),
                handlers: document_handlers,
            });
        }

        Route { levels }
    }
}

/// Handlers attached to one element on the propagation path.
#[derive(Debug, Clone, PartialEq)]
pub struct Level<H> {
    /// The element the handlers were delegated to (the "current target").
    pub node: NodeId,
    pub handlers: Vec<H>,
}

/// Delivery plan produced by [`EventBus::route`].
#[derive(Debug, Clone, PartialEq)]
pub struct Route<H> {
    pub levels: Vec<Level<H>>,
}

impl<H> Route<H> {
    /// Runs `handler` for every `(handler, current target)` pair in order.
    ///
    /// Returns the node at which propagation stopped, or `None` if the plan ran
    /// to completion.
    pub fn run<F>(self, mut handler: F) -> Option<NodeId>
    where
        F: FnMut(H, NodeId) -> Outcome,
    {
        for level in self.levels {
            let mut stopped = false;
            for h in level.handlers {
                if handler(h, level.node) == Outcome::Stop {
                    stopped = true;
                }
            }
            if stopped {
                return Some(level.node);
            }
        }
        None
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::MemoryDom;

    fn fixture() -> (MemoryDom, NodeId) {
        let mut dom = MemoryDom::new();
        let body = dom.body();
        dom.append_html(
            body,
            r#"<ul class="folders"><li class="folder"><a class="folder-toggle" id="t">+</a></li></ul>"#,
        )
        .unwrap();
        let toggle = dom.element_by_id("t").unwrap();
        (dom, toggle)
    }

    fn collect(route: Route<&'static str>, stop_on: Option<&'static str>) -> Vec<&'static str> {
        let mut seen = Vec::new();
        route.run(|h, _| {
            seen.push(h);
            if Some(h) == stop_on {
                Outcome::Stop
            } else {
                Outcome::Continue
            }
        });
        seen
    }

    #[test]
    fn bubbles_from_target_to_document_in_registration_order() {
        let (dom, toggle) = fixture();
        let mut bus = EventBus::new();
        bus.on_document(EventType::Click, "document");
        bus.on(EventType::Click, ".folders", "list").unwrap();
        bus.on(EventType::Click, ".folder-toggle", "toggle-a").unwrap();
        bus.on(EventType::Click, "li", "item").unwrap();
        bus.on(EventType::Click, ".folder-toggle", "toggle-b").unwrap();
        bus.on(EventType::KeyDown, ".folder-toggle", "key").unwrap();

        let seen = collect(bus.route(&dom, EventType::Click, toggle), None);
        assert_eq!(seen, vec!["toggle-a", "toggle-b", "item", "list", "document"]);
    }

    #[test]
    fn stop_finishes_siblings_then_skips_ancestors() {
        let (dom, toggle) = fixture();
        let mut bus = EventBus::new();
        bus.on(EventType::Click, ".folder-toggle", "first").unwrap();
        bus.on(EventType::Click, ".folder-toggle", "second").unwrap();
        bus.on(EventType::Click, "li", "ancestor").unwrap();
        bus.on_document(EventType::Click, "document");

        let seen = collect(bus.route(&dom, EventType::Click, toggle), Some("first"));
        assert_eq!(seen, vec!["first", "second"]);
    }

    #[test]
    fn matches_elements_added_after_registration() {
        let (mut dom, _) = fixture();
        let mut bus = EventBus::new();
        bus.on(EventType::Click, ".late", "late").unwrap();

        let body = dom.body();
        let created = dom.append_html(body, r#"<button class="late">x</button>"#).unwrap();
        let seen = collect(bus.route(&dom, EventType::Click, created[0]), None);
        assert_eq!(seen, vec!["late"]);
    }

    #[test]
    fn off_removes_only_the_named_handler() {
        let (dom, toggle) = fixture();
        let mut bus = EventBus::new();
        bus.on(EventType::Click, ".folder-toggle", "keep").unwrap();
        bus.on(EventType::Click, ".folder-toggle", "drop").unwrap();
        bus.on(EventType::Click, "li", "drop").unwrap();

        assert_eq!(bus.off(EventType::Click, ".folder-toggle", &"drop"), 1);
        assert_eq!(bus.off(EventType::Click, ".folder-toggle", &"drop"), 0);
        let seen = collect(bus.route(&dom, EventType::Click, toggle), None);
        assert_eq!(seen, vec!["keep", "drop"]);
    }

    #[test]
    fn removed_target_only_reaches_document() {
        let (mut dom, toggle) = fixture();
        let mut bus = EventBus::new();
        bus.on(EventType::Click, ".folder-toggle", "toggle").unwrap();
        let id = bus.on_document(EventType::Click, "document");
        dom.remove(toggle);

        let seen = collect(bus.route(&dom, EventType::Click, toggle), None);
        assert_eq!(seen, vec!["document"]);
        assert!(bus.remove(id));
        assert!(bus.route(&dom, EventType::Click, toggle).is_empty());
    }

    #[test]
    fn invalid_selector_is_rejected() {
        let mut bus: EventBus<()> = EventBus::new();
        assert!(bus.on(EventType::Click, "[broken", ()).is_err());
        assert!(bus.is_empty());
    }
}
