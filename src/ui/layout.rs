//! Responsive layout application.
//!
//! [`LayoutMode::classify`] is the pure half; [`LayoutController`] remembers the
//! last applied mode so a repeated `apply` with the same mode touches nothing.

use crate::dom::Dom;
use crate::domain::LayoutMode;

/// Panes that carry their own `data-layout` tag.
const PANES: [&str; 3] = ["layout-sidebar", "layout-list", "layout-content"];

#[derive(Debug, Clone, Default)]
pub struct LayoutController {
    mode: Option<LayoutMode>,
}

impl LayoutController {
    #[must_use]
    pub const fn new() -> Self {
        Self { mode: None }
    }

    #[must_use]
    pub const fn mode(&self) -> Option<LayoutMode> {
        self.mode
    }

    /// Tags the document with `mode`. Returns `false` if it was already applied.
    pub fn apply<D: Dom + ?Sized>(&mut self, dom: &mut D, mode: LayoutMode) -> bool {
        if self.mode == Some(mode) {
            return false;
        }
        let previous = self.mode.replace(mode);
        Self::tag(dom, mode);
        tracing::info!(mode = %mode, previous = ?previous, "layout mode applied");
        true
    }

    /// Classifies `width` CSS pixels and applies the result.
    pub fn apply_width<D: Dom + ?Sized>(&mut self, dom: &mut D, width: f64) -> bool {
        // Fractional widths round up so anything past a breakpoint leaves that
        // band. Negative or NaN widths clamp to zero, which is mobile.
        let px = if width.is_finite() && width > 0.0 {
            width.ceil() as u32
        } else {
            0
        };
        self.apply(dom, LayoutMode::classify(px))
    }

    /// Re-tags panes that appeared since the last change, keeping the mode.
    pub fn sync<D: Dom + ?Sized>(&self, dom: &mut D) {
        if let Some(mode) = self.mode {
            Self::tag(dom, mode);
        }
    }

    fn tag<D: Dom + ?Sized>(dom: &mut D, mode: LayoutMode) {
        let body = dom.body();
        dom.set_class(body, "mobile-view", mode == LayoutMode::Mobile);
        dom.set_attr(body, "data-layout", mode.as_str());
        let panes: Vec<_> = PANES.iter().filter_map(|id| dom.element_by_id(id)).collect();
        for pane in panes {
            dom.set_attr(pane, "data-layout", mode.as_str());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::MemoryDom;

    #[test]
    fn apply_is_idempotent_per_mode() {
        let mut dom = MemoryDom::new();
        let mut layout = LayoutController::new();

        assert!(layout.apply(&mut dom, LayoutMode::Mobile));
        let once = dom.serialize();
        assert!(!layout.apply(&mut dom, LayoutMode::Mobile));
        assert_eq!(dom.serialize(), once);
        assert!(dom.has_class(dom.body(), "mobile-view"));

        assert!(layout.apply(&mut dom, LayoutMode::Desktop));
        assert!(!dom.has_class(dom.body(), "mobile-view"));
        assert_eq!(dom.attr(dom.body(), "data-layout").as_deref(), Some("desktop"));
    }

    #[test]
    fn width_is_classified_before_applying() {
        let mut dom = MemoryDom::new();
        let mut layout = LayoutController::new();
        layout.apply_width(&mut dom, 800.0);
        assert_eq!(layout.mode(), Some(LayoutMode::Tablet));
        assert!(!layout.apply_width(&mut dom, 1000.0));
        layout.apply_width(&mut dom, -5.0);
        assert_eq!(layout.mode(), Some(LayoutMode::Mobile));
    }

    #[test]
    fn fractional_widths_past_a_breakpoint_leave_the_band() {
        let mut dom = MemoryDom::new();
        let mut layout = LayoutController::new();
        layout.apply_width(&mut dom, 768.0);
        assert_eq!(layout.mode(), Some(LayoutMode::Mobile));
        layout.apply_width(&mut dom, 768.4);
        assert_eq!(layout.mode(), Some(LayoutMode::Tablet));
    }

    #[test]
    fn apply_tags_every_present_pane() {
        let mut dom = MemoryDom::new();
        let body = dom.body();
        dom.append_html(body, r#"<div id="layout-sidebar"></div><div id="layout-content"></div>"#)
            .unwrap();
        let mut layout = LayoutController::new();
        layout.apply(&mut dom, LayoutMode::Desktop);

        for id in ["layout-sidebar", "layout-content"] {
            let pane = dom.element_by_id(id).unwrap();
            assert_eq!(dom.attr(pane, "data-layout").as_deref(), Some("desktop"));
        }
    }

    #[test]
    fn sync_tags_late_panes() {
        let mut dom = MemoryDom::new();
        let mut layout = LayoutController::new();
        layout.apply(&mut dom, LayoutMode::Tablet);

        let body = dom.body();
        dom.append_html(body, r#"<div id="layout-list"></div>"#).unwrap();
        layout.sync(&mut dom);
        let pane = dom.element_by_id("layout-list").unwrap();
        assert_eq!(dom.attr(pane, "data-layout").as_deref(), Some("tablet"));
    }
}
