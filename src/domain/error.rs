//! Error types for the skin runtime.
//!
//! This module defines the centralized error type [`SkinError`] and a type alias
//! [`Result`] for convenient error handling throughout the crate. All errors are
//! implemented using the `thiserror` crate for automatic `Error` trait implementation.
//!
//! Very few of these ever reach a caller of the public [`Skin`](crate::Skin) API: persistence
//! failures are swallowed by [`PreferenceStore`](crate::storage::PreferenceStore) and
//! unknown ids are treated as no-ops. The variants exist so the internal layers can
//! propagate with `?` and the boundary can decide what to log.

use thiserror::Error;

/// The main error type for skin runtime operations.
///
/// # Examples
///
/// ```
/// use mailskin::SkinError;
///
/// fn validate() -> Result<(), SkinError> {
///     Err(SkinError::Config("debounce_delay_ms must be a number".to_string()))
/// }
///
/// assert!(validate().is_err());
/// ```
#[derive(Debug, Error)]
pub enum SkinError {
    /// Key-value store operation failed.
    ///
    /// Occurs when the durable preference store is unavailable, full, or holds
    /// unreadable data. The string contains a description of what went wrong.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    ///
    /// Wraps errors from standard library I/O operations. Automatically converts
    /// from `std::io::Error` using the `#[from]` attribute.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A selector string could not be parsed.
    #[error("Invalid selector: {0}")]
    Selector(String),

    /// An HTML fragment handed to the in-memory DOM was malformed.
    #[error("Markup error: {0}")]
    Markup(String),

    /// The host mail client rejected or could not run a command.
    #[error("Host error: {0}")]
    Host(String),
}

/// A specialized `Result` type for skin runtime operations.
pub type Result<T> = std::result::Result<T, SkinError>;
