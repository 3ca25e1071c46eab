use mailskin::dom::{Dom, MemoryDom, NodeId};
use mailskin::events::DomEvent;
use mailskin::host::{HostHook, RecordingHost};
use mailskin::storage::{JsonKeyValueStore, KeyValueStore, MemoryStore, PreferenceStore};
use mailskin::ui::NotificationState;
use mailskin::{NotificationKind, Signal, Skin, SkinConfig};
use std::path::PathBuf;
use tempfile::TempDir;

type TestSkin = Skin<MemoryDom, RecordingHost>;

const DARK_KEY: &str = "mailskin_dark_mode";
const SIDEBAR_KEY: &str = "mailskin_sidebar_collapsed";

fn page(html: &str) -> MemoryDom {
    let mut dom = MemoryDom::new();
    let body = dom.body();
    dom.append_html(body, html).unwrap();
    dom
}

fn start(dom: MemoryDom, prefs: PreferenceStore) -> TestSkin {
    let mut skin = Skin::new(dom, Some(RecordingHost::new()), prefs, SkinConfig::default()).unwrap();
    skin.init();
    skin
}

fn started(html: &str) -> TestSkin {
    start(page(html), PreferenceStore::new(Box::new(MemoryStore::new())))
}

fn node(skin: &TestSkin, id: &str) -> NodeId {
    skin.dom().element_by_id(id).unwrap()
}

fn commands(skin: &TestSkin) -> Vec<String> {
    skin.host()
        .map(|h| h.command_names().into_iter().map(str::to_string).collect())
        .unwrap_or_default()
}

const DROPDOWNS: &str = r#"
    <div class="dropdown" id="a"><button class="dropdown-toggle" id="a-toggle">A</button><ul class="dropdown-menu"><li id="a-item">One</li></ul></div>
    <div class="dropdown" id="b"><button class="dropdown-toggle" id="b-toggle">B</button><ul class="dropdown-menu"><li id="b-item">Two</li></ul></div>
    <p id="elsewhere">text</p>
"#;

#[test]
fn dropdowns_never_overlap() {
    let mut skin = started(DROPDOWNS);
    let (a, b) = (node(&skin, "a"), node(&skin, "b"));

    let toggle = node(&skin, "a-toggle");
    let result = skin.dispatch(DomEvent::click(toggle));
    assert!(result.default_prevented);
    assert_eq!(result.stopped_at, Some(toggle));
    assert!(skin.dom().has_class(a, "open"));

    skin.dispatch(DomEvent::click(node(&skin, "b-toggle")));
    assert!(!skin.dom().has_class(a, "open"));
    assert!(skin.dom().has_class(b, "open"));
    assert_eq!(skin.open_dropdown().map(|h| h.node), Some(b));
}

#[test]
fn clicks_inside_a_dropdown_keep_it_open() {
    let mut skin = started(DROPDOWNS);
    let b = node(&skin, "b");
    skin.dispatch(DomEvent::click(node(&skin, "b-toggle")));

    skin.dispatch(DomEvent::click(node(&skin, "b-item")));
    assert!(skin.dom().has_class(b, "open"));

    skin.dispatch(DomEvent::click(node(&skin, "elsewhere")));
    assert!(!skin.dom().has_class(b, "open"));
    assert!(skin.open_dropdown().is_none());
}

const MODAL: &str = r#"
    <button data-modal="about" id="open-about">About</button>
    <div class="modal" id="about"><p id="about-text">Hi</p><input id="about-field"><button class="modal-close" id="about-close">Close</button></div>
"#;

#[test]
fn modal_opens_focuses_and_tears_down() {
    let mut skin = started(MODAL);
    let result = skin.dispatch(DomEvent::click(node(&skin, "open-about")));
    assert!(result.default_prevented);
    assert_eq!(skin.visible_modals().to_vec(), vec!["about".to_string()]);

    let body = skin.dom().body();
    assert_eq!(skin.dom().style(body, "overflow").as_deref(), Some("hidden"));

    skin.advance_by(100);
    assert_eq!(skin.dom().focused(), Some(node(&skin, "about-field")));

    skin.dispatch(DomEvent::click(node(&skin, "about-close")));
    assert!(skin.visible_modals().is_empty());
    assert_eq!(skin.dom().style(body, "overflow"), None);

    let overlay = skin.dom().parent(node(&skin, "about")).unwrap();
    assert!(skin.dom().has_class(overlay, "modal-overlay"));
    assert_eq!(skin.dom().style(overlay, "display"), None);
    skin.advance_by(300);
    assert_eq!(skin.dom().style(overlay, "display").as_deref(), Some("none"));

    assert_eq!(
        skin.drain_signals(),
        vec![
            Signal::ModalOpened { id: "about".to_string() },
            Signal::ModalClosed { id: "about".to_string() },
        ]
    );
}

#[test]
fn reopening_during_teardown_keeps_overlay() {
    let mut skin = started(MODAL);
    assert!(skin.open_modal("about"));
    assert!(skin.close_modal("about"));
    skin.advance_by(150);
    assert!(skin.open_modal("about"));
    skin.advance_by(1_000);

    let overlay = skin.dom().parent(node(&skin, "about")).unwrap();
    assert_eq!(skin.dom().style(overlay, "display"), None);
    assert!(skin.dom().has_class(overlay, "visible"));
}

#[test]
fn backdrop_click_closes_only_on_the_overlay_itself() {
    let mut skin = started(MODAL);
    skin.open_modal("about");

    skin.dispatch(DomEvent::click(node(&skin, "about-text")));
    assert_eq!(skin.visible_modals().len(), 1);

    let overlay = skin.dom().parent(node(&skin, "about")).unwrap();
    skin.dispatch(DomEvent::click(overlay));
    assert!(skin.visible_modals().is_empty());
}

#[test]
fn escape_in_a_field_closes_only_the_dropdown() {
    let html = format!("{MODAL}{DROPDOWNS}");
    let mut skin = started(&html);
    skin.open_modal("about");
    skin.toggle_dropdown("a");

    let field = node(&skin, "about-field");
    let result = skin.dispatch(DomEvent::key_down(field, "Escape"));
    assert!(!result.default_prevented);
    assert_eq!(skin.visible_modals().to_vec(), vec!["about".to_string()]);
    assert!(skin.open_dropdown().is_none());
}

#[test]
fn escape_outside_fields_closes_modals_and_dropdown() {
    let html = format!("{MODAL}{DROPDOWNS}");
    let mut skin = started(&html);
    skin.open_modal("about");
    skin.toggle_dropdown("a");

    let body = skin.dom().body();
    let result = skin.dispatch(DomEvent::key_down(body, "Escape"));
    assert!(!result.default_prevented);
    assert!(skin.visible_modals().is_empty());
    assert!(skin.open_dropdown().is_none());
}

#[test]
fn shortcuts_are_suppressed_inside_form_fields() {
    let mut skin = started(r#"<input id="field"><textarea id="notes"></textarea>"#);

    let result = skin.dispatch(DomEvent::key_down(node(&skin, "field"), "j"));
    assert!(!result.default_prevented);
    skin.dispatch(DomEvent::key_down(node(&skin, "notes"), "d").with_ctrl());
    assert!(!skin.is_dark_mode());
    assert!(commands(&skin).is_empty());

    let body = skin.dom().body();
    let result = skin.dispatch(DomEvent::key_down(body, "j"));
    assert!(result.default_prevented);
    skin.dispatch(DomEvent::key_down(body, "R").with_shift());
    assert_eq!(commands(&skin), vec!["nextmessage", "reply-all"]);
}

#[test]
fn host_shortcuts_are_inert_without_a_host() {
    let mut skin: TestSkin = Skin::new(MemoryDom::new(), None, PreferenceStore::detached(), SkinConfig::default()).unwrap();
    skin.init();
    let body = skin.dom().body();

    let result = skin.dispatch(DomEvent::key_down(body, "c"));
    assert!(!result.default_prevented);

    let result = skin.dispatch(DomEvent::key_down(body, "b").with_meta());
    assert!(result.default_prevented);
    assert!(skin.is_sidebar_collapsed());
}

#[test]
fn slash_focuses_the_search_field() {
    let mut skin = started(r#"<div id="quicksearchbar"><input id="search"></div>"#);
    let body = skin.dom().body();
    let result = skin.dispatch(DomEvent::key_down(body, "/"));
    assert!(result.default_prevented);
    assert_eq!(skin.dom().focused(), Some(node(&skin, "search")));
}

const SEARCH: &str = r#"
    <div id="quicksearchbar">
        <input id="search">
        <button class="search-clear" id="clear">x</button>
        <div class="search-results" id="results"></div>
    </div>
"#;

fn type_query(skin: &mut TestSkin, text: &str) {
    let input = node(skin, "search");
    skin.dom_mut().set_value(input, text);
    skin.dispatch(DomEvent::input(input));
}

#[test]
fn search_fires_once_with_the_last_query() {
    let mut skin = started(SEARCH);
    type_query(&mut skin, "in");
    skin.advance_by(100);
    type_query(&mut skin, "inv");
    skin.advance_by(249);
    assert!(commands(&skin).is_empty());

    skin.advance_by(1);
    let host = skin.host().unwrap();
    assert_eq!(host.commands().len(), 1);
    assert_eq!(host.commands()[0].name, "search");
    assert_eq!(host.commands()[0].args, vec!["inv".to_string()]);
}

#[test]
fn short_query_cancels_pending_search() {
    let mut skin = started(SEARCH);
    type_query(&mut skin, "ab");
    skin.advance_by(100);
    type_query(&mut skin, "a");
    skin.advance_by(1_000);
    assert!(commands(&skin).is_empty());
}

#[test]
fn clear_button_resets_the_search_box() {
    let mut skin = started(SEARCH);
    type_query(&mut skin, "invoice");
    skin.dispatch(DomEvent::click(node(&skin, "clear")));
    skin.advance_by(1_000);

    let input = node(&skin, "search");
    assert_eq!(skin.dom().value(input), "");
    assert_eq!(skin.dom().focused(), Some(input));
    let results = node(&skin, "results");
    assert_eq!(skin.dom().style(results, "display").as_deref(), Some("none"));
    assert!(commands(&skin).is_empty());
}

#[test]
fn notification_expires_and_is_removed() {
    let mut skin = started("");
    let id = skin.notify("Saved", Some(NotificationKind::Success), None);
    let element = node(&skin, &id);
    assert!(skin.dom().has_class(element, "success"));

    skin.advance_by(10);
    assert!(skin.dom().has_class(element, "visible"));
    assert_eq!(skin.notifications().state(&id), Some(NotificationState::Visible));

    skin.advance_to(5_000);
    assert!(!skin.dom().has_class(element, "visible"));
    assert!(skin.notifications().visible().is_empty());

    skin.advance_to(5_300);
    assert!(skin.dom().element_by_id(&id).is_none());
    assert!(skin.notifications().is_empty());
}

#[test]
fn close_button_dismisses_sticky_notification_once() {
    let mut skin = started("");
    let id = skin.notify("Connection lost", Some(NotificationKind::Error), Some(0));
    skin.advance_by(60_000);
    assert_eq!(skin.notifications().state(&id), Some(NotificationState::Visible));

    let element = node(&skin, &id);
    let close = skin.dom().children(element).into_iter().last().unwrap();
    assert!(skin.dom().has_class(close, "notification-close"));
    skin.dispatch(DomEvent::click(close));
    assert_eq!(skin.notifications().state(&id), Some(NotificationState::Leaving));
    assert!(!skin.dismiss_notification(&id));

    skin.advance_by(300);
    assert!(skin.dom().element_by_id(&id).is_none());
}

#[test]
fn notifications_render_messages_as_text() {
    let mut skin = started("");
    let id = skin.notify("<b>bold</b>", None, None);
    let element = node(&skin, &id);
    assert!(skin.dom().has_class(element, "info"));
    assert!(skin.dom().text(element).contains("<b>bold</b>"));
    assert!(skin.dom().serialize().contains("&lt;b&gt;"));
}

#[test]
fn dark_mode_survives_a_reload() {
    let dir = TempDir::new().unwrap();
    let path: PathBuf = dir.path().join("prefs.json");

    let store = JsonKeyValueStore::open(path.clone()).unwrap();
    let mut skin = start(MemoryDom::new(), PreferenceStore::new(Box::new(store)));
    let body = skin.dom().body();
    skin.dispatch(DomEvent::key_down(body, "d").with_ctrl());
    assert!(skin.is_dark_mode());
    assert_eq!(skin.drain_signals(), vec![Signal::DarkModeChanged { enabled: true }]);

    let reopened = JsonKeyValueStore::open(path.clone()).unwrap();
    assert_eq!(reopened.get(DARK_KEY).unwrap().as_deref(), Some("true"));

    let skin = start(MemoryDom::new(), PreferenceStore::new(Box::new(reopened)));
    assert!(skin.is_dark_mode());
    let root = skin.dom().document_element();
    assert!(skin.dom().has_class(root, "dark-mode"));
}

#[test]
fn system_scheme_is_followed_only_without_a_stored_preference() {
    let mut dom = MemoryDom::new();
    dom.set_prefers_dark(true);
    let mut skin = start(dom, PreferenceStore::new(Box::new(MemoryStore::new())));
    assert!(skin.is_dark_mode());
    skin.system_color_scheme_changed(false);
    assert!(!skin.is_dark_mode());

    let stored = MemoryStore::new().with_value(DARK_KEY, "false");
    let mut skin = start(MemoryDom::new(), PreferenceStore::new(Box::new(stored)));
    skin.system_color_scheme_changed(true);
    assert!(!skin.is_dark_mode());
}

#[test]
fn unreadable_preference_falls_back_to_default() {
    let stored = MemoryStore::new().with_value(SIDEBAR_KEY, "maybe");
    let skin = start(MemoryDom::new(), PreferenceStore::new(Box::new(stored)));
    assert!(!skin.is_sidebar_collapsed());
}

#[test]
fn failing_storage_keeps_session_state() {
    let mut skin = start(MemoryDom::new(), PreferenceStore::new(Box::new(MemoryStore::unavailable())));
    assert!(skin.toggle_sidebar());
    let body = skin.dom().body();
    assert!(skin.dom().has_class(body, "sidebar-collapsed"));
    assert!(!skin.preferences().is_persisted(SIDEBAR_KEY));
    assert_eq!(skin.preferences().get(SIDEBAR_KEY), Some(true));
}

#[test]
fn edge_swipes_drive_the_sidebar() {
    let stored = MemoryStore::new().with_value(SIDEBAR_KEY, "true");
    let mut skin = start(MemoryDom::new(), PreferenceStore::new(Box::new(stored)));
    assert!(skin.is_sidebar_collapsed());
    let body = skin.dom().body();

    skin.dispatch(DomEvent::touch_start(body, 10.0, 300.0));
    skin.dispatch(DomEvent::touch_end(body, 150.0, 310.0));
    assert!(!skin.is_sidebar_collapsed());
    // Revealing from the edge is not persisted.
    assert_eq!(skin.preferences().get(SIDEBAR_KEY), Some(true));

    skin.dispatch(DomEvent::touch_start(body, 200.0, 300.0));
    skin.dispatch(DomEvent::touch_end(body, 50.0, 300.0));
    assert!(skin.is_sidebar_collapsed());
    assert_eq!(skin.preferences().get(SIDEBAR_KEY), Some(true));

    skin.dispatch(DomEvent::touch_start(body, 100.0, 300.0));
    skin.dispatch(DomEvent::touch_end(body, 300.0, 300.0));
    assert!(skin.is_sidebar_collapsed());
}

const MESSAGES: &str = r#"<ul class="message-list"><li class="message-item" id="m1">Hello</li><li class="message-item" id="m2">Bye</li></ul>"#;

#[test]
fn right_swipe_archives_after_the_animation() {
    let mut skin = started(MESSAGES);
    let row = node(&skin, "m1");

    skin.dispatch(DomEvent::touch_start(row, 100.0, 50.0));
    let moved = skin.dispatch(DomEvent::touch_move(row, 160.0, 52.0));
    assert!(moved.default_prevented);
    assert_eq!(skin.dom().style(row, "transform").as_deref(), Some("translateX(60px)"));

    skin.dispatch(DomEvent::touch_end(row, 200.0, 52.0));
    assert!(skin.dom().has_class(row, "swipe-archive"));
    assert!(commands(&skin).is_empty());

    skin.advance_by(300);
    assert_eq!(commands(&skin), vec!["archive"]);
}

#[test]
fn short_swipe_snaps_back() {
    let mut skin = started(MESSAGES);
    let row = node(&skin, "m2");
    skin.dispatch(DomEvent::touch_start(row, 200.0, 50.0));
    skin.dispatch(DomEvent::touch_move(row, 170.0, 50.0));
    assert!(skin.dom().style(row, "transform").is_some());

    skin.dispatch(DomEvent::touch_end(row, 170.0, 50.0));
    assert_eq!(skin.dom().style(row, "transform"), None);
    skin.advance_by(1_000);
    assert!(commands(&skin).is_empty());
}

#[test]
fn left_swipe_deletes() {
    let mut skin = started(MESSAGES);
    let row = node(&skin, "m2");
    skin.dispatch(DomEvent::touch_start(row, 250.0, 50.0));
    skin.dispatch(DomEvent::touch_end(row, 100.0, 40.0));
    assert!(skin.dom().has_class(row, "swipe-delete"));
    skin.advance_by(300);
    assert_eq!(commands(&skin), vec!["delete"]);
}

#[test]
fn tabs_switch_panes_and_signal() {
    let mut skin = started(
        r#"<div id="panel">
            <div class="tabs"><a class="tab active" id="t1" data-tab="p1">One</a><a class="tab" id="t2" data-tab="p2">Two</a></div>
            <div class="tab-content active" id="p1"></div>
            <div class="tab-content" id="p2"></div>
        </div>"#,
    );
    let result = skin.dispatch(DomEvent::click(node(&skin, "t2")));
    assert!(result.default_prevented);

    let dom = skin.dom();
    let active = |id: &str| dom.element_by_id(id).is_some_and(|n| dom.has_class(n, "active"));
    assert!(!active("t1"));
    assert!(active("t2"));
    assert!(!active("p1"));
    assert!(active("p2"));
    assert_eq!(skin.drain_signals(), vec![Signal::TabChanged { target: "p2".to_string() }]);
}

#[test]
fn folder_toggle_expands_its_item() {
    let mut skin = started(r#"<ul><li id="inbox"><span class="folder-toggle" id="toggle">+</span></li></ul>"#);
    let toggle = node(&skin, "toggle");
    let result = skin.dispatch(DomEvent::click(toggle));
    assert_eq!(result.stopped_at, Some(toggle));
    assert!(skin.dom().has_class(node(&skin, "inbox"), "expanded"));

    skin.dispatch(DomEvent::click(toggle));
    assert!(!skin.dom().has_class(node(&skin, "inbox"), "expanded"));
}

#[test]
fn tooltip_appears_and_is_removed() {
    let mut skin = started(r#"<button id="star" data-tooltip="Flag" data-tooltip-position="bottom">*</button>"#);
    let star = node(&skin, "star");

    skin.dispatch(DomEvent::mouse_enter(star));
    let tip = skin.dom().body();
    let tip = skin.dom().children(tip).into_iter().last().unwrap();
    assert!(skin.dom().has_class(tip, "skin-tooltip"));
    assert!(skin.dom().has_class(tip, "tooltip-bottom"));
    assert_eq!(skin.dom().text(tip), "Flag");

    skin.advance_by(10);
    assert!(skin.dom().has_class(tip, "visible"));

    skin.dispatch(DomEvent::mouse_leave(star));
    assert!(!skin.dom().has_class(tip, "visible"));
    skin.advance_by(200);
    assert!(!skin.dom().is_connected(tip));
}

#[test]
fn leaving_before_the_show_tick_never_reveals_the_tooltip() {
    let mut skin = started(r#"<button id="star" data-tooltip="Flag">*</button>"#);
    let star = node(&skin, "star");

    skin.dispatch(DomEvent::mouse_enter(star));
    let body = skin.dom().body();
    let tip = skin.dom().children(body).into_iter().last().unwrap();
    skin.dispatch(DomEvent::mouse_leave(star));

    skin.advance_by(10);
    assert!(!skin.dom().has_class(tip, "visible"));
    skin.advance_by(200);
    assert!(!skin.dom().is_connected(tip));
}

#[test]
fn recipients_become_removable_tags() {
    let mut skin = started(r#"<form id="compose-form"><div id="to-field"><input name="_to" id="to"></div></form>"#);
    let input = node(&skin, "to");

    skin.dom_mut().set_value(input, "bob");
    skin.dispatch(DomEvent::key_down(input, "Tab"));
    assert_eq!(skin.dom().value(input), "bob");

    skin.dom_mut().set_value(input, "bob@example.com");
    skin.dispatch(DomEvent::key_down(input, "Tab"));
    assert_eq!(skin.dom().value(input), "");

    let field = node(&skin, "to-field");
    let children = skin.dom().children(field);
    assert_eq!(children.len(), 2);
    let tag = children[0];
    assert!(skin.dom().has_class(tag, "tag"));
    assert!(skin.dom().text(tag).starts_with("bob@example.com"));

    let remove = skin.dom().children(tag).into_iter().last().unwrap();
    skin.dispatch(DomEvent::click(remove));
    assert_eq!(skin.dom().children(field), vec![input]);
}

#[test]
fn login_form_toggles_password_visibility() {
    let mut skin = started(
        r#"<form id="login-form"><input type="text" id="user"><input type="password" id="pass"></form>"#,
    );
    let pass = node(&skin, "pass");
    let wrapper = skin.dom().parent(pass).unwrap();
    let toggle = skin
        .dom()
        .children(wrapper)
        .into_iter()
        .find(|&c| skin.dom().has_class(c, "password-toggle"))
        .unwrap();

    let result = skin.dispatch(DomEvent::click(toggle));
    assert!(result.default_prevented);
    assert_eq!(skin.dom().attr(pass, "type").as_deref(), Some("text"));
    assert_eq!(skin.dom().text(toggle), "🙈");

    skin.dispatch(DomEvent::click(toggle));
    assert_eq!(skin.dom().attr(pass, "type").as_deref(), Some("password"));
    assert_eq!(skin.dom().text(toggle), "👁");

    let user = node(&skin, "user");
    skin.dom_mut().set_value(user, "alice");
    skin.dispatch(DomEvent::blur(user));
    assert!(skin.dom().has_class(user, "has-value"));
    skin.dom_mut().set_value(user, "");
    skin.dispatch(DomEvent::blur(user));
    assert!(!skin.dom().has_class(user, "has-value"));
}

#[test]
fn host_hooks_enhance_and_show_loading() {
    let dom = page(r#"<div id="toolbar"></div>"#);
    let host = RecordingHost::new().with_env("task", "mail");
    let prefs = PreferenceStore::new(Box::new(MemoryStore::new()));
    let mut skin = Skin::new(dom, Some(host), prefs, SkinConfig::default()).unwrap();
    skin.init();
    skin.on_host_hook(HostHook::Init);

    let toggle = node(&skin, "dark-mode-toggle");
    assert_eq!(skin.dom().text(toggle), "🌙");
    skin.dispatch(DomEvent::click(toggle));
    assert!(skin.is_dark_mode());
    assert_eq!(skin.dom().text(toggle), "☀️");

    let toolbar = node(&skin, "toolbar");
    let refresh = skin
        .dom()
        .query_all(toolbar, &"[data-command]".parse().unwrap())
        .into_iter()
        .next()
        .unwrap();
    skin.dispatch(DomEvent::click(refresh));
    assert_eq!(commands(&skin), vec!["refresh"]);

    skin.on_host_hook(HostHook::BeforeRequest);
    assert!(mailskin::ui::loading::is_visible(skin.dom()));
    let body = skin.dom().body();
    skin.dom_mut()
        .append_html(body, r#"<img id="late" data-src="/a.png">"#)
        .unwrap();
    skin.on_host_hook(HostHook::ResponseAfter);
    assert!(!mailskin::ui::loading::is_visible(skin.dom()));
    assert_eq!(skin.dom().attr(node(&skin, "late"), "src").as_deref(), Some("/a.png"));
}

#[test]
fn preloader_fades_out_after_init() {
    let mut skin = started(r#"<div id="preloader"></div>"#);
    let preloader = node(&skin, "preloader");
    assert!(skin.dom().has_class(preloader, "fade-out"));
    let body = skin.dom().body();
    assert!(skin.dom().has_class(body, "skin-loaded"));

    skin.advance_by(500);
    assert!(skin.dom().element_by_id("preloader").is_none());
}

#[test]
fn initial_layout_tags_panes() {
    let mut dom = page(r#"<div id="layout-sidebar"></div><div id="layout-list"></div>"#);
    dom.set_viewport(mailskin::domain::Size::new(900.0, 700.0));
    let skin = start(dom, PreferenceStore::detached());
    assert_eq!(skin.layout_mode(), Some(mailskin::LayoutMode::Tablet));
    let sidebar = node(&skin, "layout-sidebar");
    assert_eq!(skin.dom().attr(sidebar, "data-layout").as_deref(), Some("tablet"));
}
