//! Hover tooltips for `[data-tooltip]` anchors.

use crate::app::Timer;
use crate::dom::{Dom, NodeId, Selector};
use crate::domain::{Point, Rect, Size};
use crate::timing::{Millis, Scheduler, TimerToken};

const TOOLTIP_CLASS: &str = "skin-tooltip";
const GAP_PX: f64 = 8.0;
const SHOW_TICK_MS: Millis = 10;
const REMOVE_DELAY_MS: Millis = 200;

/// Side of the anchor a tooltip is placed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TooltipPosition {
    #[default]
    Top,
    Bottom,
    Left,
    Right,
}

impl TooltipPosition {
    /// Parses `data-tooltip-position`. Anything unrecognised is `Top`.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.trim() {
            "bottom" => Self::Bottom,
            "left" => Self::Left,
            "right" => Self::Right,
            _ => Self::Top,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    /// Top-left corner of a `tip` placed on this side of `anchor`.
    ///
    /// # Examples
    ///
    /// ```
    /// use mailskin::domain::{Point, Rect, Size};
    /// use mailskin::ui::TooltipPosition;
    ///
    /// let anchor = Rect::new(100.0, 100.0, 40.0, 20.0);
    /// let tip = Size::new(60.0, 10.0);
    /// assert_eq!(TooltipPosition::Top.place(anchor, tip), Point::new(90.0, 82.0));
    /// ```
    #[must_use]
    pub fn place(self, anchor: Rect, tip: Size) -> Point {
        let centered_x = anchor.x + (anchor.width - tip.width) / 2.0;
        let centered_y = anchor.y + (anchor.height - tip.height) / 2.0;
        match self {
            Self::Top => Point::new(centered_x, anchor.y - tip.height - GAP_PX),
            Self::Bottom => Point::new(centered_x, anchor.bottom() + GAP_PX),
            Self::Left => Point::new(anchor.x - tip.width - GAP_PX, centered_y),
            Self::Right => Point::new(anchor.right() + GAP_PX, centered_y),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TooltipController {
    selector: Option<Selector>,
    /// Tips still waiting for their show tick.
    pending_show: Vec<(NodeId, TimerToken)>,
}

impl Default for TooltipController {
    fn default() -> Self {
        Self::new()
    }
}

impl TooltipController {
    #[must_use]
    pub fn new() -> Self {
        Self {
            selector: Selector::parse(".skin-tooltip").ok(),
            pending_show: Vec::new(),
        }
    }

    /// Creates the tooltip for `anchor`. Returns `None` if it has no text.
    pub fn show<D: Dom + ?Sized>(
        &mut self,
        dom: &mut D,
        scheduler: &mut Scheduler<Timer>,
        anchor: NodeId,
    ) -> Option<NodeId> {
        let text = dom.attr(anchor, "data-tooltip")?;
        let position = dom
            .attr(anchor, "data-tooltip-position")
            .map(|p| TooltipPosition::from_name(&p))
            .unwrap_or_default();

        let tip = dom.create_element("div");
        dom.add_class(tip, TOOLTIP_CLASS);
        dom.add_class(tip, &format!("tooltip-{}", position.as_str()));
        dom.set_text(tip, &text);
        let body = dom.body();
        dom.append_child(body, tip);

        let at = position.place(dom.rect(anchor), dom.rect(tip).size());
        dom.set_style(tip, "top", &format!("{}px", at.y));
        dom.set_style(tip, "left", &format!("{}px", at.x));

        let token = scheduler.schedule(SHOW_TICK_MS, Timer::TooltipShow { node: tip });
        self.pending_show.push((tip, token));
        tracing::trace!(anchor = %anchor, position = position.as_str(), "tooltip shown");
        Some(tip)
    }

    /// Hides every tooltip and schedules their removal. A show tick that has
    /// not fired yet is cancelled.
    pub fn hide<D: Dom + ?Sized>(&mut self, dom: &mut D, scheduler: &mut Scheduler<Timer>) -> usize {
        for (_, token) in self.pending_show.drain(..) {
            scheduler.cancel(token);
        }
        let tips = self.tooltips(dom);
        for &tip in &tips {
            dom.remove_class(tip, "visible");
            scheduler.schedule(REMOVE_DELAY_MS, Timer::TooltipRemove { node: tip });
        }
        tips.len()
    }

    pub fn on_show<D: Dom + ?Sized>(&mut self, dom: &mut D, tip: NodeId) {
        self.pending_show.retain(|&(node, _)| node != tip);
        if dom.is_connected(tip) {
            dom.add_class(tip, "visible");
        }
    }

    pub fn on_remove<D: Dom + ?Sized>(&self, dom: &mut D, tip: NodeId) {
        if dom.is_connected(tip) {
            dom.remove(tip);
        }
    }

    /// Tooltips currently in the document.
    #[must_use]
    pub fn tooltips<D: Dom + ?Sized>(&self, dom: &D) -> Vec<NodeId> {
        self.selector
            .as_ref()
            .map(|s| dom.query_all(dom.document(), s))
            .unwrap_or_default()
    }
}
