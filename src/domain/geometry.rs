//! Small geometry types shared by placement and gesture code.

use serde::{Deserialize, Serialize};

/// A point in viewport coordinates (CSS pixels).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Width and height in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned box in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    #[must_use]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[must_use]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Horizontal anchoring of a dropdown menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Horizontal {
    /// Menu grows rightwards from the toggle's left edge.
    #[default]
    Left,
    /// Menu is flipped to grow leftwards from the toggle's right edge.
    Right,
}

/// Vertical anchoring of a dropdown menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vertical {
    /// Menu opens below the toggle.
    #[default]
    Down,
    /// Menu is flipped to open above the toggle.
    Up,
}

/// Where a dropdown menu is drawn relative to its container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Placement {
    pub horizontal: Horizontal,
    pub vertical: Vertical,
}

impl Placement {
    /// Chooses flips so a menu of `menu` size anchored at `container` stays inside `viewport`.
    ///
    /// # Examples
    ///
    /// ```
    /// use mailskin::domain::{Horizontal, Placement, Rect, Size, Vertical};
    ///
    /// let container = Rect::new(900.0, 700.0, 80.0, 30.0);
    /// let placement = Placement::compute(container, Size::new(200.0, 150.0), Size::new(1000.0, 800.0));
    /// assert_eq!(placement.horizontal, Horizontal::Right);
    /// assert_eq!(placement.vertical, Vertical::Up);
    /// ```
    #[must_use]
    pub fn compute(container: Rect, menu: Size, viewport: Size) -> Self {
        let horizontal = if container.x + menu.width > viewport.width {
            Horizontal::Right
        } else {
            Horizontal::Left
        };
        let vertical = if container.y + menu.height > viewport.height {
            Vertical::Up
        } else {
            Vertical::Down
        };
        Self { horizontal, vertical }
    }
}

/// Direction of a classified horizontal swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SwipeDirection {
    Left,
    Right,
}
