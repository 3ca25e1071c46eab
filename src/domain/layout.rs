//! Responsive layout modes derived from viewport width.

use serde::{Deserialize, Serialize};

/// Widest viewport still treated as a phone.
pub const MOBILE_MAX_WIDTH: u32 = 768;

/// Widest viewport still treated as a tablet.
pub const TABLET_MAX_WIDTH: u32 = 1024;

/// Discrete layout classification of the viewport.
///
/// There is no persisted state behind a mode: it is recomputed from the width on
/// every (debounced) resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Stacked single-column layout, `width <= 768`.
    Mobile,
    /// Compact layout, `768 < width <= 1024`.
    Tablet,
    /// Full three-pane layout, `width > 1024`.
    Desktop,
}

impl LayoutMode {
    /// Classifies a viewport width in CSS pixels.
    ///
    /// # Examples
    ///
    /// ```
    /// use mailskin::domain::LayoutMode;
    ///
    /// assert_eq!(LayoutMode::classify(768), LayoutMode::Mobile);
    /// assert_eq!(LayoutMode::classify(769), LayoutMode::Tablet);
    /// assert_eq!(LayoutMode::classify(1200), LayoutMode::Desktop);
    /// ```
    #[must_use]
    pub const fn classify(width_px: u32) -> Self {
        if width_px <= MOBILE_MAX_WIDTH {
            Self::Mobile
        } else if width_px <= TABLET_MAX_WIDTH {
            Self::Tablet
        } else {
            Self::Desktop
        }
    }

    /// Value written to the `data-layout` attribute consumed by the stylesheet.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mobile => "mobile",
            Self::Tablet => "tablet",
            Self::Desktop => "desktop",
        }
    }
}

impl std::fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
