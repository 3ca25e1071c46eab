//! Tracing subscriber setup.
//!
//! Every module logs through `tracing` macros. Nothing is recorded until the
//! embedding shell installs a subscriber with [`init_tracing`].
//!
//! # Configuration
//!
//! The filter is resolved from:
//! 1. `SkinConfig::trace_level` if set
//! 2. Default: `"info"`
//!
//! # Usage
//!
//! ```rust
//! use mailskin::observability::init_tracing;
//! use mailskin::SkinConfig;
//!
//! init_tracing(&SkinConfig::default());
//! tracing::debug!("skin starting");
//! ```
//!
//! # Modules
//!
//! - [`init`]: Subscriber construction

mod init;

pub use init::init_tracing;
