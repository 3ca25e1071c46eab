//! Single-touch swipe recognition.
//!
//! [`GestureRecognizer`] is the `idle → tracking → (classified | idle)` state
//! machine for one pointer stream. It knows nothing about the DOM: callers feed
//! it start/move/end points and act on the result.
//!
//! ## Rules
//!
//! - A touch-start while already tracking replaces the gesture in flight.
//! - A move reports a live offset only once the drag is horizontal and longer
//!   than the live-drag threshold.
//! - An end is a swipe iff `|dx| > |dy|` and `|dx| > threshold`.
//! - An end (or move) without a start is ignored and leaves the recognizer idle.
//!
//! [`classify_edge`] layers the document-level sidebar semantics on top.

use crate::domain::{Point, SwipeDirection};

/// Live touch sequence.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GestureSample {
    pub start: Point,
    pub current: Point,
    pub active: bool,
}

impl GestureSample {
    /// `(current - start)` on both axes.
    #[must_use]
    pub fn delta(&self) -> (f64, f64) {
        (self.current.x - self.start.x, self.current.y - self.start.y)
    }
}

/// Result of ending a gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Classification {
    Swipe {
        direction: SwipeDirection,
        /// Horizontal distance, always positive.
        distance: f64,
    },
    /// Too short, vertical, or malformed. Consumers revert any live offset.
    None,
}

impl Classification {
    #[must_use]
    pub const fn direction(&self) -> Option<SwipeDirection> {
        match self {
            Self::Swipe { direction, .. } => Some(*direction),
            Self::None => None,
        }
    }
}

/// Swipe state machine for one pointer stream.
///
/// # Examples
///
/// ```
/// use mailskin::domain::{Point, SwipeDirection};
/// use mailskin::gesture::{Classification, GestureRecognizer};
///
/// let mut gesture = GestureRecognizer::new(50.0, 20.0);
/// gesture.start(Point::new(10.0, 50.0));
/// let result = gesture.end(Point::new(120.0, 55.0));
/// assert_eq!(result.direction(), Some(SwipeDirection::Right));
///
/// gesture.start(Point::new(10.0, 50.0));
/// assert_eq!(gesture.end(Point::new(40.0, 200.0)), Classification::None);
/// ```
#[derive(Debug, Clone)]
pub struct GestureRecognizer {
    threshold: f64,
    live_threshold: f64,
    sample: GestureSample,
}

impl GestureRecognizer {
    #[must_use]
    pub fn new(threshold: f64, live_threshold: f64) -> Self {
        Self {
            threshold,
            live_threshold,
            sample: GestureSample::default(),
        }
    }

    #[must_use]
    pub const fn threshold(&self) -> f64 {
        self.threshold
    }

    #[must_use]
    pub const fn is_tracking(&self) -> bool {
        self.sample.active
    }

    #[must_use]
    pub const fn sample(&self) -> GestureSample {
        self.sample
    }

    /// Origin of the gesture in flight.
    #[must_use]
    pub const fn origin(&self) -> Option<Point> {
        if self.sample.active {
            Some(self.sample.start)
        } else {
            None
        }
    }

    /// `idle → tracking`, or restarts a gesture already in flight.
    pub fn start(&mut self, point: Point) {
        if self.sample.active {
            tracing::trace!("touch-start while tracking, restarting gesture");
        }
        self.sample = GestureSample {
            start: point,
            current: point,
            active: true,
        };
    }

    /// Records a move. Returns the live horizontal offset to apply, if any.
    ///
    /// A `Some` result also means the consumer should suppress scrolling.
    pub fn on_move(&mut self, point: Point) -> Option<f64> {
        if !self.sample.active {
            return None;
        }
        self.sample.current = point;
        let (dx, dy) = self.sample.delta();
        (dx.abs() > dy.abs() && dx.abs() > self.live_threshold).then_some(dx)
    }

    /// Ends the gesture and classifies it. Always returns to idle.
    pub fn end(&mut self, point: Point) -> Classification {
        if !self.sample.active {
            tracing::debug!("touch-end without touch-start, ignoring");
            self.reset();
            return Classification::None;
        }
        self.sample.current = point;
        let (dx, dy) = self.sample.delta();
        self.reset();

        if dx.abs() > dy.abs() && dx.abs() > self.threshold {
            let direction = if dx > 0.0 {
                SwipeDirection::Right
            } else {
                SwipeDirection::Left
            };
            Classification::Swipe {
                direction,
                distance: dx.abs(),
            }
        } else {
            Classification::None
        }
    }

    /// Abandons the gesture in flight.
    pub fn reset(&mut self) {
        self.sample = GestureSample::default();
    }
}

/// Zones used by document-level swipes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeZones {
    /// Starts left of this x open the sidebar on a right swipe.
    pub edge_margin: f64,
    /// Starts left of this x close an expanded sidebar on a left swipe.
    pub sidebar_zone: f64,
}

impl Default for EdgeZones {
    fn default() -> Self {
        Self {
            edge_margin: 30.0,
            sidebar_zone: 300.0,
        }
    }
}

/// What a document-level swipe means for the sidebar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeAction {
    OpenSidebar,
    CloseSidebar,
    None,
}

/// Interprets a classified document swipe that started at `start`.
#[must_use]
pub fn classify_edge(
    start: Point,
    swipe: Classification,
    sidebar_collapsed: bool,
    zones: EdgeZones,
) -> EdgeAction {
    match swipe.direction() {
        Some(SwipeDirection::Right) if start.x < zones.edge_margin => EdgeAction::OpenSidebar,
        Some(SwipeDirection::Left) if start.x < zones.sidebar_zone && !sidebar_collapsed => {
            EdgeAction::CloseSidebar
        }
        _ => EdgeAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swipe(recognizer: &mut GestureRecognizer, from: (f64, f64), to: (f64, f64)) -> Classification {
        recognizer.start(Point::new(from.0, from.1));
        recognizer.end(Point::new(to.0, to.1))
    }

    #[test]
    fn classifies_horizontal_swipes_by_direction() {
        let mut recognizer = GestureRecognizer::new(50.0, 20.0);
        assert_eq!(
            swipe(&mut recognizer, (10.0, 50.0), (120.0, 55.0)),
            Classification::Swipe {
                direction: SwipeDirection::Right,
                distance: 110.0
            }
        );
        assert_eq!(
            swipe(&mut recognizer, (200.0, 50.0), (100.0, 40.0)).direction(),
            Some(SwipeDirection::Left)
        );
        assert!(!recognizer.is_tracking());
    }

    #[test]
    fn vertical_or_short_gestures_are_noops() {
        let mut recognizer = GestureRecognizer::new(50.0, 20.0);
        assert_eq!(swipe(&mut recognizer, (10.0, 50.0), (40.0, 200.0)), Classification::None);
        assert_eq!(swipe(&mut recognizer, (10.0, 50.0), (60.0, 50.0)), Classification::None);
        assert_eq!(swipe(&mut recognizer, (10.0, 10.0), (90.0, 90.0)), Classification::None);
    }

    #[test]
    fn end_without_start_resets_to_idle() {
        let mut recognizer = GestureRecognizer::new(50.0, 20.0);
        assert_eq!(recognizer.end(Point::new(500.0, 0.0)), Classification::None);
        assert_eq!(recognizer.on_move(Point::new(500.0, 0.0)), None);
        assert!(!recognizer.is_tracking());
    }

    #[test]
    fn restart_replaces_gesture_in_flight() {
        let mut recognizer = GestureRecognizer::new(50.0, 20.0);
        recognizer.start(Point::new(0.0, 0.0));
        recognizer.start(Point::new(100.0, 0.0));
        assert_eq!(recognizer.origin(), Some(Point::new(100.0, 0.0)));
        assert_eq!(recognizer.end(Point::new(140.0, 0.0)), Classification::None);
    }

    #[test]
    fn live_offset_requires_horizontal_drag_past_threshold() {
        let mut recognizer = GestureRecognizer::new(50.0, 20.0);
        recognizer.start(Point::new(100.0, 100.0));
        assert_eq!(recognizer.on_move(Point::new(110.0, 100.0)), None);
        assert_eq!(recognizer.on_move(Point::new(125.0, 130.0)), None);
        assert_eq!(recognizer.on_move(Point::new(70.0, 105.0)), Some(-30.0));
    }

    #[test]
    fn edge_swipes_map_to_sidebar_actions() {
        let zones = EdgeZones::default();
        let right = Classification::Swipe {
            direction: SwipeDirection::Right,
            distance: 120.0,
        };
        let left = Classification::Swipe {
            direction: SwipeDirection::Left,
            distance: 120.0,
        };

        assert_eq!(classify_edge(Point::new(10.0, 0.0), right, true, zones), EdgeAction::OpenSidebar);
        assert_eq!(classify_edge(Point::new(40.0, 0.0), right, true, zones), EdgeAction::None);
        assert_eq!(classify_edge(Point::new(250.0, 0.0), left, false, zones), EdgeAction::CloseSidebar);
        assert_eq!(classify_edge(Point::new(250.0, 0.0), left, true, zones), EdgeAction::None);
        assert_eq!(classify_edge(Point::new(350.0, 0.0), left, false, zones), EdgeAction::None);
        assert_eq!(
            classify_edge(Point::new(10.0, 0.0), Classification::None, true, zones),
            EdgeAction::None
        );
    }
}
