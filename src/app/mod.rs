//! Application layer tying the controllers to their inputs.
//!
//! This module sits between the embedding shell and the controllers in
//! [`crate::ui`]. It owns the delegated event table, the keyboard shortcut map,
//! the timer payloads and the [`Skin`] runtime that routes all of them.
//!
//! # Architecture
//!
//! Inputs flow one way through the runtime:
//!
//! ```text
//! DomEvent ─▶ EventBus route ─▶ Binding ─▶ controller ─▶ Dom mutations
//!                                              │
//!                                              ├─▶ Scheduler<Timer> ─▶ advance_to()
//!                                              ├─▶ HostApp commands
//!                                              └─▶ Signal queue
//! ```
//!
//! # Modules
//!
//! - [`bindings`]: Delegated event registrations
//! - [`runtime`]: The [`Skin`] composition root
//! - [`shortcuts`]: Key-to-shortcut mapping
//! - [`signals`]: Observable events raised by the runtime
//! - [`timers`]: Payloads for scheduled work
//!
//! # Example
//!
//! ```rust
//! use mailskin::app::{Signal, Skin};
//! use mailskin::dom::{Dom, MemoryDom};
//! use mailskin::events::DomEvent;
//! use mailskin::host::RecordingHost;
//! use mailskin::storage::PreferenceStore;
//! use mailskin::SkinConfig;
//!
//! let mut skin: Skin<MemoryDom, RecordingHost> =
//!     Skin::new(MemoryDom::new(), None, PreferenceStore::detached(), SkinConfig::default())?;
//! skin.init();
//!
//! let body = skin.dom().body();
//! skin.dispatch(DomEvent::key_down(body, "d").with_ctrl());
//! assert!(skin.is_dark_mode());
//! assert_eq!(skin.drain_signals(), vec![Signal::DarkModeChanged { enabled: true }]);
//! # Ok::<(), mailskin::SkinError>(())
//! ```

pub mod bindings;
pub mod runtime;
pub mod shortcuts;
pub mod signals;
pub mod timers;

pub use bindings::{event_table, Binding, BINDINGS};
pub use runtime::{Dispatched, Lifecycle, Skin};
pub use shortcuts::{resolve, Shortcut};
pub use signals::Signal;
pub use timers::{SwipeAction, Timer};
