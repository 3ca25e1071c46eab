//! Swipe-to-archive / swipe-to-delete on message rows.
//!
//! One row is tracked at a time. While the drag is horizontal the row follows the
//! finger through an inline `transform`; on release a swipe right marks the row
//! `swipe-archive`, a swipe left `swipe-delete`, and the host command is issued
//! once the slide-out animation had time to run. Anything else snaps back.

use crate::app::{SwipeAction, Timer};
use crate::dom::{Dom, NodeId};
use crate::domain::{Point, SwipeDirection};
use crate::gesture::{Classification, GestureRecognizer};
use crate::timing::{Millis, Scheduler};

#[derive(Debug, Clone)]
pub struct SwipeActions {
    item: Option<NodeId>,
    recognizer: GestureRecognizer,
    commit_delay: Millis,
}

impl SwipeActions {
    #[must_use]
    pub fn new(threshold: f64, live_threshold: f64, commit_delay: Millis) -> Self {
        Self {
            item: None,
            recognizer: GestureRecognizer::new(threshold, live_threshold),
            commit_delay,
        }
    }

    /// Row currently being dragged.
    #[must_use]
    pub const fn item(&self) -> Option<NodeId> {
        self.item
    }

    pub fn start(&mut self, item: NodeId, point: Point) {
        self.item = Some(item);
        self.recognizer.start(point);
    }

    /// Applies the live offset. Returns `true` when scrolling must be suppressed.
    pub fn on_move<D: Dom + ?Sized>(&mut self, dom: &mut D, item: NodeId, point: Point) -> bool {
        if self.item != Some(item) {
            return false;
        }
        let Some(dx) = self.recognizer.on_move(point) else {
            return false;
        };
        dom.set_style(item, "transform", &format!("translateX({dx}px)"));
        true
    }

    /// Classifies the release and schedules the host command for a swipe.
    pub fn end<D: Dom + ?Sized>(
        &mut self,
        dom: &mut D,
        scheduler: &mut Scheduler<Timer>,
        item: NodeId,
        point: Point,
    ) -> Option<SwipeAction> {
        if self.item.take() != Some(item) {
            self.recognizer.reset();
            return None;
        }
        let action = match self.recognizer.end(point) {
            Classification::Swipe {
                direction: SwipeDirection::Right,
                ..
            } => SwipeAction::Archive,
            Classification::Swipe {
                direction: SwipeDirection::Left,
                ..
            } => SwipeAction::Delete,
            Classification::None => {
                dom.remove_style(item, "transform");
                return None;
            }
        };
        dom.add_class(item, &format!("swipe-{}", action.command()));
        scheduler.schedule(self.commit_delay, Timer::SwipeCommit { action });
        tracing::debug!(item = %item, action = action.command(), "message swiped");
        Some(action)
    }
}
