//! Demo shell driving the skin over an in-memory document.
//!
//! The binary stands in for a browser bridge. It renders a small mail page
//! into a [`MemoryDom`], replays a scripted session through the same inputs a
//! real shell would feed, and prints the resulting markup, host commands and
//! signals.
//!
//! # Usage
//!
//! ```text
//! mailskin [CONFIG.toml] [PREFS.json]
//! ```
//!
//! Without a config file the defaults apply. Without a preference file the
//! preferences live for the session only.
//!
//! # Session
//!
//! 1. **Init**: Load config, install tracing, build the page, `init()`
//! 2. **Host init**: Fire the `init` hook with `task=mail`
//! 3. **Interact**: Dropdown, modal, search, notification, shortcut
//! 4. **Settle**: Advance the clock until every timer has fired
//! 5. **Report**: Print the document, host commands and signals

use mailskin::dom::{Dom, MemoryDom};
use mailskin::events::DomEvent;
use mailskin::host::{HostHook, RecordingHost};
use mailskin::observability::init_tracing;
use mailskin::storage::{JsonKeyValueStore, PreferenceStore};
use mailskin::{NotificationKind, Skin, SkinConfig};
use std::path::PathBuf;

const PAGE: &str = r##"<div id="layout-sidebar"><ul><li class="folder"><span class="folder-toggle">Inbox</span></li></ul></div>
<div id="layout-list">
  <div id="quicksearchbar"><input id="search" value=""><button class="search-clear">x</button></div>
  <div class="dropdown" id="account-menu"><button class="dropdown-toggle" id="account-toggle">Account</button><ul class="dropdown-menu"><li>Logout</li></ul></div>
  <ul class="message-list"><li class="message-item" id="msg-1">Welcome</li></ul>
</div>
<div id="layout-content"><button data-modal="about" id="about-button">About</button></div>
<div class="modal" id="about"><input id="about-field"><button class="modal-close" id="about-close">Close</button></div>
<div class="toolbar"></div>"##;

fn main() -> mailskin::Result<()> {
    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => SkinConfig::from_file(path)?,
        None => SkinConfig::default(),
    };
    init_tracing(&config);

    let _span = tracing::info_span!("demo").entered();
    let prefs = match args.next() {
        Some(path) => PreferenceStore::new(Box::new(JsonKeyValueStore::open(PathBuf::from(path))?)),
        None => PreferenceStore::detached(),
    };

    let mut dom = MemoryDom::new();
    let body = dom.body();
    dom.append_html(body, PAGE)?;

    let host = RecordingHost::new().with_env("task", "mail");
    let mut skin = Skin::new(dom, Some(host), prefs, config)?;
    skin.init();
    skin.on_host_hook(HostHook::Init);

    replay(&mut skin);

    let step = skin.config().animation_duration_ms.max(1);
    while skin.pending_timers() > 0 {
        skin.advance_by(step);
    }

    println!("{}", skin.dom().serialize());
    if let Some(host) = skin.host() {
        for command in host.commands() {
            println!("command: {} {:?}", command.name, command.args);
        }
    }
    for signal in skin.drain_signals() {
        println!("signal: {} {signal:?}", signal.name());
    }
    Ok(())
}

fn replay(skin: &mut Skin<MemoryDom, RecordingHost>) {
    let node = |skin: &Skin<MemoryDom, RecordingHost>, id: &str| skin.dom().element_by_id(id);

    if let Some(toggle) = node(skin, "account-toggle") {
        skin.dispatch(DomEvent::click(toggle));
    }
    let body = skin.dom().body();
    skin.dispatch(DomEvent::click(body));

    if let Some(button) = node(skin, "about-button") {
        skin.dispatch(DomEvent::click(button));
        skin.advance_by(skin.config().focus_delay_ms);
    }
    if let Some(close) = node(skin, "about-close") {
        skin.dispatch(DomEvent::click(close));
    }

    if let Some(search) = node(skin, "search") {
        skin.dom_mut().set_value(search, "invoice");
        skin.dispatch(DomEvent::input(search));
        skin.advance_by(skin.config().debounce_delay_ms);
    }

    skin.notify("Message sent", Some(NotificationKind::Success), None);
    skin.notify("Connection lost", Some(NotificationKind::Error), Some(0));

    skin.dispatch(DomEvent::key_down(body, "j"));
    skin.dispatch(DomEvent::key_down(body, "d").with_ctrl());
}
