//! Tab strips: `.tabs > .tab[data-tab]` paired with sibling `.tab-content` panes.

use crate::dom::{Dom, NodeId, Selector};

#[derive(Debug, Clone)]
pub struct TabsController {
    strip: Option<Selector>,
    tab: Option<Selector>,
    pane: Option<Selector>,
}

impl Default for TabsController {
    fn default() -> Self {
        Self::new()
    }
}

impl TabsController {
    #[must_use]
    pub fn new() -> Self {
        Self {
            strip: Selector::parse(".tabs").ok(),
            tab: Selector::parse(".tab").ok(),
            pane: Selector::parse(".tab-content").ok(),
        }
    }

    /// Makes `tab` the active tab of its strip and shows its pane.
    ///
    /// Returns the `data-tab` target, or `None` if `tab` is outside a strip or
    /// names no target. Only panes inside the strip's parent are considered.
    pub fn activate<D: Dom + ?Sized>(&self, dom: &mut D, tab: NodeId) -> Option<String> {
        let strip = self.strip.as_ref().and_then(|s| dom.closest(tab, s))?;
        let siblings = self
            .tab
            .as_ref()
            .map(|s| dom.query_all(strip, s))
            .unwrap_or_default();
        for sibling in siblings {
            dom.remove_class(sibling, "active");
        }
        dom.add_class(tab, "active");

        let target = dom.attr(tab, "data-tab");
        let Some(container) = dom.parent(strip) else {
            return target;
        };
        let panes = self
            .pane
            .as_ref()
            .map(|s| dom.query_all(container, s))
            .unwrap_or_default();
        for pane in panes {
            dom.remove_class(pane, "active");
        }

        let pane = target
            .as_deref()
            .and_then(|id| dom.element_by_id(id))
            .filter(|&p| dom.ancestors(p).contains(&container));
        if let Some(pane) = pane {
            dom.add_class(pane, "active");
        }
        tracing::debug!(target = ?target, "tab activated");
        target
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::MemoryDom;

    const MARKUP: &str = r#"<section id="box">
        <nav class="tabs">
            <a class="tab active" id="t1" data-tab="general">General</a>
            <a class="tab" id="t2" data-tab="server">Server</a>
        </nav>
        <div class="tab-content active" id="general"></div>
        <div class="tab-content" id="server"></div>
    </section>
    <div class="tab-content" id="elsewhere"></div>"#;

    #[test]
    fn activates_tab_and_matching_pane() {
        let mut dom = MemoryDom::new();
        let body = dom.body();
        dom.append_html(body, MARKUP).unwrap();
        let t1 = dom.element_by_id("t1").unwrap();
        let t2 = dom.element_by_id("t2").unwrap();

        let target = TabsController::new().activate(&mut dom, t2);
        assert_eq!(target.as_deref(), Some("server"));
        assert!(dom.has_class(t2, "active"));
        assert!(!dom.has_class(t1, "active"));

        let general = dom.element_by_id("general").unwrap();
        let server = dom.element_by_id("server").unwrap();
        assert!(!dom.has_class(general, "active"));
        assert!(dom.has_class(server, "active"));
    }

    #[test]
    fn ignores_panes_outside_the_container() {
        let mut dom = MemoryDom::new();
        let body = dom.body();
        dom.append_html(body, MARKUP).unwrap();
        let t1 = dom.element_by_id("t1").unwrap();
        dom.set_attr(t1, "data-tab", "elsewhere");

        TabsController::new().activate(&mut dom, t1);
        let elsewhere = dom.element_by_id("elsewhere").unwrap();
        assert!(!dom.has_class(elsewhere, "active"));
    }

    #[test]
    fn tab_outside_strip_is_ignored() {
        let mut dom = MemoryDom::new();
        let body = dom.body();
        assert_eq!(TabsController::new().activate(&mut dom, body), None);
    }
}
