//! The skin runtime.
//!
//! [`Skin`] owns the document adapter, the optional host, the preference store
//! and one instance of every controller. The embedding shell drives it with
//! four inputs and nothing else:
//!
//! - [`Skin::dispatch`] for DOM events
//! - [`Skin::on_host_hook`] for host lifecycle hooks
//! - [`Skin::window_resized`] and [`Skin::system_color_scheme_changed`] for
//!   window-level notifications
//! - [`Skin::advance_to`] to move the clock and fire due timers
//!
//! # Lifecycle
//!
//! ```text
//! Created ──init()──▶ Ready
//!    │                  ▲
//!    └─init() while ────┘ document_loaded()
//!      loading: Deferred
//! ```
//!
//! Events and host hooks are ignored until the runtime is ready. Calling
//! [`Skin::init`] again after that does nothing.

use crate::app::bindings::{event_table, Binding};
use crate::app::shortcuts::{is_form_field, resolve, Shortcut};
use crate::app::signals::Signal;
use crate::app::timers::Timer;
use crate::dom::{Dom, NodeId, Selector};
use crate::domain::{LayoutMode, NotificationKind, Point, Result};
use crate::events::{DomEvent, EventBus, Outcome};
use crate::gesture::{classify_edge, EdgeAction, EdgeZones, GestureRecognizer};
use crate::host::{HostApp, HostHook};
use crate::storage::PreferenceStore;
use crate::timing::{Debounce, Fired, Millis, Scheduler, TimerToken};
use crate::ui::theme::dark_mode_icon;
use crate::ui::{
    enhance, loading, DropdownController, DropdownHandle, LayoutController, ModalController,
    NotificationQueue, SidebarController, SwipeActions, TabsController, Task, ThemeController,
    TooltipController,
};
use crate::SkinConfig;

/// Where the runtime is in its start-up sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Constructed, `init` not called yet.
    Created,
    /// `init` was called while the document was still loading.
    Deferred,
    /// Initialised; events are handled.
    Ready,
}

/// Result of delivering one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dispatched {
    /// Whether a handler suppressed the platform default action.
    pub default_prevented: bool,
    /// The element at which propagation was stopped.
    pub stopped_at: Option<NodeId>,
    /// Number of bindings that ran.
    pub handled: usize,
}

/// Selectors the handlers query with, parsed once.
#[derive(Debug, Clone)]
struct Selectors {
    dropdown: Selector,
    modal_surface: Selector,
    notification: Selector,
    search_container: Selector,
    search_input: Selector,
    search_results: Selector,
    input: Selector,
    list_item: Selector,
}

impl Selectors {
    fn new() -> Result<Self> {
        Ok(Self {
            dropdown: Selector::parse(".dropdown")?,
            modal_surface: Selector::parse(".modal, .dialog")?,
            notification: Selector::parse(".notification")?,
            search_container: Selector::parse(".search-container, #quicksearchbar")?,
            search_input: Selector::parse("#quicksearchbar input, .search-input")?,
            search_results: Selector::parse(".search-results")?,
            input: Selector::parse("input")?,
            list_item: Selector::parse("li")?,
        })
    }
}

/// Composition root holding every controller.
pub struct Skin<D: Dom, H: HostApp> {
    dom: D,
    host: Option<H>,
    prefs: PreferenceStore,
    config: SkinConfig,
    lifecycle: Lifecycle,
    scheduler: Scheduler<Timer>,
    bus: EventBus<Binding>,
    selectors: Selectors,

    modals: ModalController,
    dropdowns: DropdownController,
    notifications: NotificationQueue,
    layout: LayoutController,
    theme: ThemeController,
    sidebar: SidebarController,
    tabs: TabsController,
    tooltips: TooltipController,
    swipes: SwipeActions,
    edge: GestureRecognizer,
    edge_zones: EdgeZones,

    search: Debounce<String>,
    search_timer: Option<TimerToken>,
    resize: Debounce<()>,
    resize_timer: Option<TimerToken>,

    signals: Vec<Signal>,
}

impl<D: Dom, H: HostApp> Skin<D, H> {
    /// Builds the runtime and its event table. Nothing touches the document
    /// until [`init`](Self::init).
    ///
    /// # Errors
    ///
    /// Returns [`SkinError::Selector`](crate::SkinError::Selector) if the built-in
    /// event table fails to parse.
    pub fn new(dom: D, host: Option<H>, prefs: PreferenceStore, config: SkinConfig) -> Result<Self> {
        let bus = event_table()?;
        let selectors = Selectors::new()?;
        let animation = config.animation_duration_ms;

        Ok(Self {
            modals: ModalController::new(config.focus_delay_ms, animation),
            dropdowns: DropdownController::new(),
            notifications: NotificationQueue::new(config.notification_duration_ms, animation),
            layout: LayoutController::new(),
            theme: ThemeController::new(),
            sidebar: SidebarController::new(),
            tabs: TabsController::new(),
            tooltips: TooltipController::new(),
            swipes: SwipeActions::new(config.touch_threshold_px, config.live_drag_threshold_px, animation),
            edge: GestureRecognizer::new(config.edge_swipe_threshold_px, config.live_drag_threshold_px),
            edge_zones: EdgeZones {
                edge_margin: config.edge_margin_px,
                sidebar_zone: config.sidebar_swipe_zone_px,
            },
            search: Debounce::new(config.debounce_delay_ms),
            search_timer: None,
            resize: Debounce::new(config.debounce_delay_ms),
            resize_timer: None,
            dom,
            host,
            prefs,
            config,
            lifecycle: Lifecycle::Created,
            scheduler: Scheduler::new(),
            bus,
            selectors,
            signals: Vec::new(),
        })
    }

    /// Starts the skin, or defers until [`document_loaded`](Self::document_loaded)
    /// if the document is still loading. Safe to call more than once.
    pub fn init(&mut self) {
        match self.lifecycle {
            Lifecycle::Ready => {
                tracing::debug!("already initialized");
                return;
            }
            Lifecycle::Deferred => return,
            Lifecycle::Created => {}
        }
        if self.dom.is_loading() {
            tracing::debug!("document still loading, deferring init");
            self.lifecycle = Lifecycle::Deferred;
            return;
        }
        self.start();
    }

    /// Signals that the document finished loading. Runs a deferred `init`.
    pub fn document_loaded(&mut self) {
        if self.lifecycle == Lifecycle::Deferred {
            self.start();
        }
    }

    fn start(&mut self) {
        let _span = tracing::info_span!("skin_init").entered();

        self.load_preferences();
        NotificationQueue::ensure_container(&mut self.dom);
        loading::document_ready(&mut self.dom, &mut self.scheduler);
        let width = self.dom.viewport().width;
        self.layout.apply_width(&mut self.dom, width);
        enhance::enhance_content(&mut self.dom);

        self.lifecycle = Lifecycle::Ready;
        tracing::info!("mailskin v{} initialized", env!("CARGO_PKG_VERSION"));
    }

    fn load_preferences(&mut self) {
        match self.prefs.get(&self.config.dark_mode_key) {
            Some(enabled) => {
                self.theme.toggle(&mut self.dom, Some(enabled));
            }
            None => {
                self.theme.follow_system();
                if self.dom.prefers_dark() {
                    self.toggle_dark_mode(Some(true));
                }
            }
        }
        if self.prefs.get(&self.config.sidebar_collapsed_key) == Some(true) {
            self.sidebar.set(&mut self.dom, true);
        }
        tracing::debug!(
            dark = self.theme.is_dark(),
            sidebar_collapsed = self.sidebar.is_collapsed(),
            "preferences loaded"
        );
    }

    // ---- public API -------------------------------------------------------

    /// Sets dark mode, or flips it when `enable` is `None`. Returns the new value.
    pub fn toggle_dark_mode(&mut self, enable: Option<bool>) -> bool {
        let enabled = self.theme.toggle(&mut self.dom, enable);
        self.prefs.set(&self.config.dark_mode_key, enabled);
        if let Some(button) = self.dom.element_by_id("dark-mode-toggle") {
            self.dom.set_text(button, dark_mode_icon(enabled));
        }
        self.signals.push(Signal::DarkModeChanged { enabled });
        enabled
    }

    /// Platform colour scheme changed. Followed only when no preference was stored.
    pub fn system_color_scheme_changed(&mut self, dark: bool) {
        if self.theme.follows_system() {
            self.toggle_dark_mode(Some(dark));
        }
    }

    /// Flips the sidebar and persists it. Returns whether it is now collapsed.
    pub fn toggle_sidebar(&mut self) -> bool {
        let collapsed = self.sidebar.toggle(&mut self.dom);
        self.prefs.set(&self.config.sidebar_collapsed_key, collapsed);
        collapsed
    }

    /// Shows a notification. `kind` defaults to info and `ttl` to the configured
    /// duration; `Some(0)` keeps it until dismissed.
    pub fn notify(&mut self, message: &str, kind: Option<NotificationKind>, ttl: Option<Millis>) -> String {
        self.notifications.notify(
            &mut self.dom,
            &mut self.scheduler,
            message,
            kind.unwrap_or_default(),
            ttl,
        )
    }

    pub fn dismiss_notification(&mut self, id: &str) -> bool {
        self.notifications.dismiss(&mut self.dom, &mut self.scheduler, id)
    }

    pub fn open_modal(&mut self, id: &str) -> bool {
        let opened = self.modals.open(&mut self.dom, &mut self.scheduler, id);
        if opened {
            self.signals.push(Signal::ModalOpened { id: id.to_string() });
        }
        opened
    }

    pub fn close_modal(&mut self, id: &str) -> bool {
        let closed = self.modals.close(&mut self.dom, &mut self.scheduler, id);
        if closed {
            self.signals.push(Signal::ModalClosed { id: id.to_string() });
        }
        closed
    }

    /// Closes every visible modal. Returns the ids closed.
    pub fn close_all_modals(&mut self) -> Vec<String> {
        let closed = self.modals.close_all(&mut self.dom, &mut self.scheduler);
        self.signals
            .extend(closed.iter().map(|id| Signal::ModalClosed { id: id.clone() }));
        closed
    }

    /// Toggles the dropdown with element id `id`. Returns whether it is open.
    pub fn toggle_dropdown(&mut self, id: &str) -> bool {
        match self.dom.element_by_id(id) {
            Some(node) => self.dropdowns.toggle(&mut self.dom, node),
            None => {
                tracing::debug!(dropdown_id = %id, "unknown dropdown, ignoring");
                false
            }
        }
    }

    /// Window size changed. The layout follows after the debounce window.
    pub fn window_resized(&mut self) {
        if let Some(token) = self.resize_timer.take() {
            self.scheduler.cancel(token);
        }
        let now = self.scheduler.now();
        let deadline = self.resize.call(now, ());
        self.resize_timer = Some(self.scheduler.schedule(deadline - now, Timer::Resize));
    }

    /// Takes the signals raised since the last call, oldest first.
    pub fn drain_signals(&mut self) -> Vec<Signal> {
        std::mem::take(&mut self.signals)
    }

    // ---- inputs -----------------------------------------------------------

    /// Routes a host lifecycle hook.
    pub fn on_host_hook(&mut self, hook: HostHook) {
        let _span = tracing::debug_span!("host_hook", hook = hook.as_str()).entered();
        if self.lifecycle != Lifecycle::Ready {
            tracing::debug!("not initialized, ignoring hook");
            return;
        }
        match hook {
            HostHook::Init => {
                let task = self.host.as_ref().and_then(|h| h.env("task"));
                if let Some(task) = task.as_deref().and_then(Task::from_name) {
                    enhance::enhance_task(&mut self.dom, task, self.theme.is_dark());
                }
            }
            HostHook::BeforeRequest => loading::show(&mut self.dom),
            HostHook::ResponseAfter => {
                loading::hide(&mut self.dom);
                enhance::enhance_content(&mut self.dom);
                self.layout.sync(&mut self.dom);
            }
        }
    }

    /// Delivers a DOM event through the delegated bindings.
    pub fn dispatch(&mut self, mut event: DomEvent) -> Dispatched {
        if self.lifecycle != Lifecycle::Ready {
            tracing::debug!(event_type = %event.kind, "not initialized, ignoring event");
            return Dispatched::default();
        }
        let _span = tracing::debug_span!("dispatch", event_type = %event.kind, target = %event.target).entered();

        let route = self.bus.route(&self.dom, event.kind, event.target);
        let mut handled = 0;
        let stopped_at = route.run(|binding, current| {
            handled += 1;
            self.handle(binding, current, &mut event)
        });

        Dispatched {
            default_prevented: event.default_prevented,
            stopped_at,
            handled,
        }
    }

    /// Moves the clock to `now`, firing every timer due by then in order.
    pub fn advance_to(&mut self, now: Millis) {
        while let Some(fired) = self.scheduler.pop_due(now) {
            self.fire(fired);
        }
        self.scheduler.settle(now);
    }

    pub fn advance_by(&mut self, delta: Millis) {
        self.advance_to(self.scheduler.now().saturating_add(delta));
    }

    // ---- accessors --------------------------------------------------------

    pub fn dom(&self) -> &D {
        &self.dom
    }

    pub fn dom_mut(&mut self) -> &mut D {
        &mut self.dom
    }

    pub fn host(&self) -> Option<&H> {
        self.host.as_ref()
    }

    pub fn host_mut(&mut self) -> Option<&mut H> {
        self.host.as_mut()
    }

    pub fn preferences(&mut self) -> &mut PreferenceStore {
        &mut self.prefs
    }

    pub fn config(&self) -> &SkinConfig {
        &self.config
    }

    pub const fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    pub const fn now(&self) -> Millis {
        self.scheduler.now()
    }

    pub fn pending_timers(&self) -> usize {
        self.scheduler.pending()
    }

    pub const fn is_dark_mode(&self) -> bool {
        self.theme.is_dark()
    }

    pub const fn is_sidebar_collapsed(&self) -> bool {
        self.sidebar.is_collapsed()
    }

    pub const fn layout_mode(&self) -> Option<LayoutMode> {
        self.layout.mode()
    }

    pub fn visible_modals(&self) -> &[String] {
        self.modals.visible_ids()
    }

    pub const fn open_dropdown(&self) -> Option<DropdownHandle> {
        self.dropdowns.open_dropdown()
    }

    pub fn notifications(&self) -> &NotificationQueue {
        &self.notifications
    }

    // ---- handlers ---------------------------------------------------------

    fn handle(&mut self, binding: Binding, current: NodeId, event: &mut DomEvent) -> Outcome {
        tracing::trace!(?binding, current = %current, "binding");
        match binding {
            Binding::DropdownToggle => {
                event.prevent_default();
                if let Some(dropdown) = self.dom.closest(current, &self.selectors.dropdown) {
                    self.dropdowns.toggle(&mut self.dom, dropdown);
                }
                return Outcome::Stop;
            }
            Binding::DropdownOutside => {
                if self.dom.closest(event.target, &self.selectors.dropdown).is_none() {
                    self.dropdowns.close_all(&mut self.dom);
                }
            }
            Binding::ModalOpen => {
                event.prevent_default();
                if let Some(id) = self.dom.attr(current, "data-modal") {
                    self.open_modal(&id);
                }
            }
            Binding::ModalBackdrop => {
                if event.target == current {
                    let id = self
                        .dom
                        .query(current, &self.selectors.modal_surface)
                        .and_then(|modal| self.dom.id(modal));
                    if let Some(id) = id {
                        self.close_modal(&id);
                    }
                }
            }
            Binding::ModalClose => {
                let id = self
                    .dom
                    .closest(current, &self.selectors.modal_surface)
                    .and_then(|modal| self.dom.id(modal));
                if let Some(id) = id {
                    self.close_modal(&id);
                }
            }
            Binding::Tab => {
                event.prevent_default();
                if let Some(target) = self.tabs.activate(&mut self.dom, current) {
                    self.signals.push(Signal::TabChanged { target });
                }
            }
            Binding::SearchInput => self.search_changed(current),
            Binding::SearchClear => self.clear_search(current),
            Binding::SidebarToggle => {
                self.toggle_sidebar();
            }
            Binding::FolderToggle => {
                event.prevent_default();
                if let Some(item) = self.dom.closest(current, &self.selectors.list_item) {
                    self.dom.toggle_class(item, "expanded");
                }
                return Outcome::Stop;
            }
            Binding::NotificationClose => {
                let id = self
                    .dom
                    .closest(current, &self.selectors.notification)
                    .and_then(|n| self.dom.id(n));
                if let Some(id) = id {
                    self.dismiss_notification(&id);
                }
            }
            Binding::TooltipEnter => {
                self.tooltips.show(&mut self.dom, &mut self.scheduler, current);
            }
            Binding::TooltipLeave => {
                self.tooltips.hide(&mut self.dom, &mut self.scheduler);
            }
            Binding::PasswordToggle => {
                event.prevent_default();
                self.toggle_password(current);
            }
            Binding::LoginBlur => {
                let filled = !self.dom.value(current).is_empty();
                self.dom.set_class(current, "has-value", filled);
            }
            Binding::RecipientKey => {
                if event.key.as_deref() == Some("Tab") {
                    self.tag_recipient(current);
                }
            }
            Binding::TagRemove => {
                if let Some(tag) = self.dom.parent(current).filter(|&p| self.dom.has_class(p, "tag")) {
                    self.dom.remove(tag);
                }
            }
            Binding::HostCommand => {
                if let Some(name) = self.dom.attr(current, "data-command") {
                    self.host_command(&name, &[]);
                }
            }
            Binding::DarkModeButton => {
                self.toggle_dark_mode(None);
            }
            Binding::SwipeStart | Binding::SwipeMove | Binding::SwipeEnd => {
                if let Some(point) = event.point {
                    self.handle_swipe(binding, current, point, event);
                }
            }
            Binding::EdgeStart => {
                if let Some(point) = event.point {
                    self.edge.start(point);
                }
            }
            Binding::EdgeEnd => {
                if let Some(point) = event.point {
                    self.edge_swipe_end(point);
                }
            }
            Binding::Keyboard => self.keyboard(event),
        }
        Outcome::Continue
    }

    fn handle_swipe(&mut self, binding: Binding, item: NodeId, point: Point, event: &mut DomEvent) {
        match binding {
            Binding::SwipeStart => self.swipes.start(item, point),
            Binding::SwipeMove => {
                if self.swipes.on_move(&mut self.dom, item, point) {
                    event.prevent_default();
                }
            }
            _ => {
                self.swipes.end(&mut self.dom, &mut self.scheduler, item, point);
            }
        }
    }

    fn edge_swipe_end(&mut self, point: Point) {
        let Some(origin) = self.edge.origin() else {
            self.edge.end(point);
            return;
        };
        let swipe = self.edge.end(point);
        match classify_edge(origin, swipe, self.sidebar.is_collapsed(), self.edge_zones) {
            // Revealing from the edge is transient and not persisted.
            EdgeAction::OpenSidebar => {
                self.sidebar.set(&mut self.dom, false);
            }
            EdgeAction::CloseSidebar => {
                self.toggle_sidebar();
            }
            EdgeAction::None => {}
        }
    }

    fn keyboard(&mut self, event: &mut DomEvent) {
        let Some(shortcut) = event.key.as_deref().and_then(|key| resolve(key, event.modifiers)) else {
            return;
        };
        if is_form_field(self.dom.tag(event.target)) {
            // Escape from a field dismisses the open menu but leaves modals open.
            if shortcut == Shortcut::CloseAll {
                self.dropdowns.close_all(&mut self.dom);
            }
            tracing::trace!(?shortcut, "shortcut suppressed inside form field");
            return;
        }
        match shortcut {
            Shortcut::ToggleDarkMode => {
                self.toggle_dark_mode(None);
            }
            Shortcut::ToggleSidebar => {
                self.toggle_sidebar();
            }
            Shortcut::CloseAll => {
                self.close_all_modals();
                self.dropdowns.close_all(&mut self.dom);
            }
            Shortcut::FocusSearch => {
                let document = self.dom.document();
                if let Some(input) = self.dom.query(document, &self.selectors.search_input) {
                    self.dom.focus(input);
                }
            }
            Shortcut::Host(command) => {
                if self.host.is_none() {
                    tracing::debug!(command, "no host attached, shortcut inert");
                    return;
                }
                self.host_command(command, &[]);
            }
        }
        if shortcut.prevents_default() {
            event.prevent_default();
        }
    }

    fn search_changed(&mut self, input: NodeId) {
        let query = self.dom.value(input);
        self.cancel_search();
        if query.chars().count() < self.config.search_min_chars {
            return;
        }
        let now = self.scheduler.now();
        let deadline = self.search.call(now, query);
        self.search_timer = Some(self.scheduler.schedule(deadline - now, Timer::Search));
    }

    fn cancel_search(&mut self) {
        if let Some(token) = self.search_timer.take() {
            self.scheduler.cancel(token);
        }
        self.search.cancel();
    }

    fn clear_search(&mut self, button: NodeId) {
        let Some(container) = self.dom.closest(button, &self.selectors.search_container) else {
            return;
        };
        self.cancel_search();
        let inputs = self.dom.query_all(container, &self.selectors.input);
        for &input in &inputs {
            self.dom.set_value(input, "");
        }
        if let Some(&first) = inputs.first() {
            self.dom.focus(first);
        }
        for results in self.dom.query_all(container, &self.selectors.search_results) {
            self.dom.set_style(results, "display", "none");
        }
    }

    fn toggle_password(&mut self, toggle: NodeId) {
        let Some(input) = self
            .dom
            .parent(toggle)
            .and_then(|wrapper| self.dom.query(wrapper, &self.selectors.input))
        else {
            return;
        };
        let hidden = self.dom.attr(input, "type").as_deref() == Some("password");
        let next = if hidden { "text" } else { "password" };
        self.dom.set_attr(input, "type", next);
        self.dom.set_text(toggle, if hidden { "🙈" } else { "👁" });
    }

    fn tag_recipient(&mut self, input: NodeId) {
        let value = self.dom.value(input);
        if !value.contains('@') {
            return;
        }
        let Some(parent) = self.dom.parent(input) else {
            return;
        };
        let tag = self.dom.create_element("span");
        self.dom.add_class(tag, "tag");
        self.dom.set_text(tag, &value);
        let remove = self.dom.create_element("span");
        self.dom.add_class(remove, "tag-remove");
        self.dom.set_text(remove, "✕");
        self.dom.append_child(tag, remove);
        self.dom.insert_before(parent, tag, input);
        self.dom.set_value(input, "");
        tracing::debug!("recipient tagged");
    }

    fn host_command(&mut self, name: &str, args: &[String]) {
        match self.host.as_mut() {
            Some(host) => host.command(name, args),
            None => tracing::debug!(command = %name, "no host attached, command dropped"),
        }
    }

    fn fire(&mut self, fired: Fired<Timer>) {
        let _span = tracing::debug_span!("timer", timer = fired.payload.name(), at = fired.at).entered();
        match fired.payload {
            Timer::ModalFocus { id } => self.modals.on_focus(&mut self.dom, &id),
            Timer::ModalTeardown { id } => self.modals.on_teardown(&mut self.dom, &id, fired.token),
            Timer::NotificationShow { id } => self.notifications.on_show(&mut self.dom, &id),
            Timer::NotificationExpire { id } => {
                self.notifications.on_expire(&mut self.dom, &mut self.scheduler, &id);
            }
            Timer::NotificationRemove { id } => self.notifications.on_remove(&mut self.dom, &id),
            Timer::TooltipShow { node } => self.tooltips.on_show(&mut self.dom, node),
            Timer::TooltipRemove { node } => self.tooltips.on_remove(&mut self.dom, node),
            Timer::Search => {
                self.search_timer = None;
                if let Some(query) = self.search.poll(fired.at) {
                    self.host_command("search", &[query]);
                }
            }
            Timer::Resize => {
                self.resize_timer = None;
                if self.resize.poll(fired.at).is_some() {
                    let width = self.dom.viewport().width;
                    self.layout.apply_width(&mut self.dom, width);
                }
            }
            Timer::SwipeCommit { action } => self.host_command(action.command(), &[]),
            Timer::PreloaderRemove { node } => loading::on_preloader_remove(&mut self.dom, node),
        }
    }
}
