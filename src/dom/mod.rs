//! DOM adapter layer.
//!
//! Controllers depend on the [`Dom`] capability trait, never on a concrete
//! document library. This module provides:
//!
//! - [`adapter`]: the `Dom` trait and `NodeId` handle
//! - [`selector`]: the CSS-like [`Selector`] used for delegation and queries
//! - [`memory`]: [`MemoryDom`], an arena-backed reference document

pub mod adapter;
pub mod memory;
pub mod selector;

pub use adapter::{Dom, NodeId};
pub use memory::MemoryDom;
pub use selector::Selector;
