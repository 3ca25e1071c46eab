//! Subscriber construction.

use crate::SkinConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the global tracing subscriber.
///
/// The pipeline is an `EnvFilter` built from `config.trace_level` (default
/// `"info"`) feeding a plain-text formatter on stderr. An unparsable directive
/// falls back to `"info"`.
///
/// Idempotent: only the first call installs anything, later calls (or a
/// subscriber installed by the embedding application) are left alone.
///
/// # Example
///
/// ```rust
/// use mailskin::observability::init_tracing;
/// use mailskin::SkinConfig;
///
/// let config = SkinConfig {
///     trace_level: Some("mailskin=debug".to_string()),
///     ..Default::default()
/// };
/// init_tracing(&config);
/// init_tracing(&config);
/// ```
pub fn init_tracing(config: &SkinConfig) {
    let level = config.trace_level.as_deref().unwrap_or("info");
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_target(true);

    let subscriber = tracing_subscriber::registry().with(filter).with(fmt_layer);

    let _ = subscriber.try_init();
}
