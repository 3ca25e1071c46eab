//! Interface controllers.
//!
//! Each controller owns one piece of transient interface state and the markup
//! that mirrors it. Controllers never reach for each other or for the runtime:
//! they take the [`Dom`](crate::dom::Dom) and, where they schedule work, the
//! shared [`Scheduler`](crate::timing::Scheduler) as arguments.
//!
//! # Modules
//!
//! - [`modal`]: Visible-set state machine with cancellable overlay teardown
//! - [`dropdown`]: At-most-one dropdown with viewport-aware placement
//! - [`notification`]: Auto-expiring notification queue with two-phase dismiss
//! - [`layout`]: Responsive layout mode application
//! - [`theme`]: Dark mode and sidebar collapse
//! - [`tabs`]: Tab strip activation
//! - [`tooltip`]: Hover tooltips
//! - [`swipe`]: Message row swipe actions
//! - [`loading`]: Request loading overlay and preloader
//! - [`enhance`]: Idempotent content enhancement passes
//!
//! # Flow
//!
//! ```text
//! Skin::dispatch → Binding → controller method → Dom mutations
//!                                   ↓
//!                           Scheduler<Timer> → Skin::advance_to → controller tick
//! ```

pub mod dropdown;
pub mod enhance;
pub mod layout;
pub mod loading;
pub mod modal;
pub mod notification;
pub mod swipe;
pub mod tabs;
pub mod theme;
pub mod tooltip;

pub use dropdown::{DropdownController, DropdownHandle};
pub use enhance::{enhance_content, enhance_task, Task};
pub use layout::LayoutController;
pub use modal::{ModalController, ModalHandle};
pub use notification::{NotificationQueue, NotificationState};
pub use swipe::SwipeActions;
pub use tabs::TabsController;
pub use theme::{dark_mode_icon, SidebarController, ThemeController};
pub use tooltip::{TooltipController, TooltipPosition};
