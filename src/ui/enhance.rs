//! Content-dependent markup enhancements.
//!
//! These passes decorate whatever markup the host rendered. They run at startup
//! and again after every asynchronous content replacement, so each one checks a
//! marker before touching a node: running a pass over already enhanced markup
//! adds nothing and leaves the serialized document byte-identical.
//!
//! Passes only create markup. Behaviour (password toggles, tag removal, the
//! dark-mode button) is delegated through the event table, which is never
//! touched here, so nothing can be bound twice.

use crate::dom::{Dom, NodeId, Selector};
use crate::ui::theme::dark_mode_icon;

const GROUP_COLORS: [&str; 5] = ["#FF9A4D", "#4CAF50", "#2196F3", "#9C27B0", "#F44336"];

/// Checked in order; the first key contained in the section title wins.
const SECTION_ICONS: [(&str, &str); 8] = [
    ("general", "⚙️"),
    ("mailbox", "📬"),
    ("mailview", "👁"),
    ("compose", "✏️"),
    ("addressbook", "📒"),
    ("folders", "📁"),
    ("server", "🖥️"),
    ("encryption", "🔐"),
];

/// Host task the current page belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    Mail,
    AddressBook,
    Settings,
}

impl Task {
    /// Parses the host's `task` environment value.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "mail" => Some(Self::Mail),
            "addressbook" => Some(Self::AddressBook),
            "settings" => Some(Self::Settings),
            _ => None,
        }
    }
}

/// Runs every content pass. Returns how many nodes were changed.
pub fn enhance_content<D: Dom + ?Sized>(dom: &mut D) -> usize {
    let _span = tracing::debug_span!("enhance_content").entered();
    let changed = login_form(dom)
        + message_list(dom)
        + contacts(dom)
        + calendar(dom)
        + settings_switches(dom)
        + lazy_images(dom);
    tracing::debug!(changed, "content enhanced");
    changed
}

/// Runs the passes specific to `task`. `dark` picks the initial toolbar icon.
pub fn enhance_task<D: Dom + ?Sized>(dom: &mut D, task: Task, dark: bool) -> usize {
    let changed = match task {
        Task::Mail => mail_toolbar(dom, dark),
        Task::AddressBook => group_colors(dom),
        Task::Settings => section_icons(dom),
    };
    tracing::debug!(?task, changed, "task enhanced");
    changed
}

/// Resolves `img[data-src]` into `src`.
pub fn lazy_images<D: Dom + ?Sized>(dom: &mut D) -> usize {
    let images = select(dom, dom.document(), "img[data-src]");
    for &img in &images {
        if let Some(src) = dom.attr(img, "data-src") {
            dom.set_attr(img, "src", &src);
        }
        dom.remove_attr(img, "data-src");
    }
    images.len()
}

fn login_form<D: Dom + ?Sized>(dom: &mut D) -> usize {
    let Some(form) = dom.element_by_id("login-form") else {
        return 0;
    };
    let mut changed = 0;

    for input in select(dom, form, r#"input[type="text"], input[type="password"]"#) {
        let wrapped = dom
            .parent(input)
            .is_some_and(|p| dom.has_class(p, "input-icon-wrapper"));
        if wrapped {
            continue;
        }
        let password = dom.attr(input, "type").as_deref() == Some("password");
        let wrapper = element(dom, "div", "input-icon-wrapper");
        dom.wrap(input, wrapper);
        let icon = element(dom, "span", "input-icon");
        dom.set_text(icon, if password { "🔒" } else { "👤" });
        dom.insert_after(input, icon);
        changed += 1;
    }

    for input in select(dom, form, r#"input[type="password"]"#) {
        let Some(wrapper) = dom.parent(input) else {
            continue;
        };
        if !select(dom, wrapper, ".password-toggle").is_empty() {
            continue;
        }
        let toggle = element(dom, "button", "password-toggle");
        dom.set_attr(toggle, "type", "button");
        dom.set_text(toggle, "👁");
        dom.insert_after(input, toggle);
        changed += 1;
    }
    changed
}

fn message_list<D: Dom + ?Sized>(dom: &mut D) -> usize {
    let mut changed = 0;
    for list in select(dom, dom.document(), "#messagelist, .message-list") {
        for item in select(dom, list, ".message-item, tr") {
            if select(dom, item, ".select-indicator").is_empty() {
                let indicator = element(dom, "span", "select-indicator");
                dom.prepend_child(item, indicator);
                changed += 1;
            }
        }
    }
    changed
}

fn contacts<D: Dom + ?Sized>(dom: &mut D) -> usize {
    let mut changed = 0;
    for list in select(dom, dom.document(), "#contacts-list, .contacts-list") {
        for item in select(dom, list, ".contact-item, tr") {
            let Some(avatar) = first(dom, item, ".contact-avatar") else {
                continue;
            };
            if first(dom, avatar, "img").is_some() {
                continue;
            }
            let name = [".contact-name", ".name"]
                .iter()
                .filter_map(|s| first(dom, item, s))
                .map(|n| dom.text(n))
                .find(|t| !t.is_empty())
                .unwrap_or_default();
            let initials = initials(&name);
            if dom.text(avatar) != initials {
                dom.set_text(avatar, &initials);
                changed += 1;
            }
        }
    }
    changed
}

/// Up to two uppercase initials of a space-separated name.
#[must_use]
pub fn initials(name: &str) -> String {
    name.split(' ')
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

fn calendar<D: Dom + ?Sized>(dom: &mut D) -> usize {
    let mut changed = 0;
    for calendar in select(dom, dom.document(), "#calendar, .calendar-container") {
        for event in select(dom, calendar, ".calendar-event") {
            let title = dom.text(event);
            if dom.attr(event, "data-tooltip").as_deref() != Some(title.as_str()) {
                dom.set_attr(event, "data-tooltip", &title);
                changed += 1;
            }
        }
    }
    changed
}

fn settings_switches<D: Dom + ?Sized>(dom: &mut D) -> usize {
    let mut changed = 0;
    for section in select(dom, dom.document(), "#settings-sections, .settings-section") {
        for checkbox in select(dom, section, r#"input[type="checkbox"]"#) {
            let wrapped = dom
                .parent(checkbox)
                .is_some_and(|p| dom.has_class(p, "toggle-switch"));
            if wrapped {
                continue;
            }
            let label = element(dom, "label", "toggle-switch");
            dom.wrap(checkbox, label);
            let slider = element(dom, "span", "toggle-slider");
            dom.insert_after(checkbox, slider);
            changed += 1;
        }
    }
    changed
}

fn mail_toolbar<D: Dom + ?Sized>(dom: &mut D, dark: bool) -> usize {
    let Some(toolbar) = first(dom, dom.document(), "#toolbar, .toolbar") else {
        return 0;
    };
    if first(dom, toolbar, ".quick-actions").is_some() {
        return 0;
    }
    let actions = element(dom, "div", "quick-actions");

    let refresh = element(dom, "button", "btn");
    dom.add_class(refresh, "btn-icon");
    dom.set_attr(refresh, "data-tooltip", "Refresh");
    dom.set_attr(refresh, "data-command", "refresh");
    dom.set_text(refresh, "🔄");

    let theme = element(dom, "button", "btn");
    dom.add_class(theme, "btn-icon");
    dom.set_attr(theme, "data-tooltip", "Dark Mode");
    dom.set_attr(theme, "id", "dark-mode-toggle");
    dom.set_text(theme, dark_mode_icon(dark));

    dom.append_child(actions, refresh);
    dom.append_child(actions, theme);
    dom.append_child(toolbar, actions);
    1
}

fn group_colors<D: Dom + ?Sized>(dom: &mut D) -> usize {
    let mut changed = 0;
    let groups = select(dom, dom.document(), "#contactgrouplist li");
    for (index, group) in groups.into_iter().enumerate() {
        let Some(name) = first(dom, group, ".name") else {
            continue;
        };
        if first(dom, name, ".group-color").is_some() {
            continue;
        }
        let dot = element(dom, "span", "group-color");
        dom.set_style(dot, "background", GROUP_COLORS[index % GROUP_COLORS.len()]);
        dom.prepend_child(name, dot);
        changed += 1;
    }
    changed
}

fn section_icons<D: Dom + ?Sized>(dom: &mut D) -> usize {
    let mut changed = 0;
    let titles = select(dom, dom.document(), "#settings-menu li a, #settings-sections .section-title");
    for title in titles {
        if first(dom, title, ".section-icon").is_some() {
            continue;
        }
        let text = dom.text(title).to_lowercase();
        let Some((_, icon)) = SECTION_ICONS.iter().find(|(key, _)| text.contains(*key)) else {
            continue;
        };
        let span = element(dom, "span", "section-icon");
        dom.set_text(span, icon);
        dom.prepend_child(title, span);
        changed += 1;
    }
    changed
}

fn element<D: Dom + ?Sized>(dom: &mut D, tag: &str, class: &str) -> NodeId {
    let node = dom.create_element(tag);
    dom.add_class(node, class);
    node
}

fn select<D: Dom + ?Sized>(dom: &D, scope: NodeId, source: &str) -> Vec<NodeId> {
    match Selector::parse(source) {
        Ok(selector) => dom.query_all(scope, &selector),
        Err(e) => {
            tracing::warn!(error = %e, "enhancement selector rejected");
            Vec::new()
        }
    }
}

fn first<D: Dom + ?Sized>(dom: &D, scope: NodeId, source: &str) -> Option<NodeId> {
    select(dom, scope, source).into_iter().next()
}
