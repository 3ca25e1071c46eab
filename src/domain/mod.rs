//! Domain layer for the skin runtime.
//!
//! This module contains the plain data types shared by every controller,
//! independent of the DOM adapter or the host mail client.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`geometry`]: Points, rectangles, dropdown placement, swipe direction
//! - [`layout`]: Responsive layout classification
//! - [`notification`]: Notification kinds and entries
//!
//! # Examples
//!
//! ```
//! use mailskin::domain::{LayoutMode, NotificationKind};
//!
//! assert_eq!(LayoutMode::classify(800), LayoutMode::Tablet);
//! assert_eq!(NotificationKind::default(), NotificationKind::Info);
//! ```

pub mod error;
pub mod geometry;
pub mod layout;
pub mod notification;

pub use error::{Result, SkinError};
pub use geometry::{Horizontal, Placement, Point, Rect, Size, SwipeDirection, Vertical};
pub use layout::LayoutMode;
pub use notification::{NotificationEntry, NotificationKind};
