//! Tracing/logging setup shared by every binary embedding the billing core.

/// Log settings and their environment loading.
pub mod settings;

/// Tracing configuration (filters, layers).
pub mod tracing;

pub use settings::{ConfigError, LogSettings};

/// Initialize process-wide observability (tracing/logging).
///
/// This is safe to call multiple times; subsequent calls become no-ops.
pub fn init(settings: &LogSettings) {
    tracing::init(settings);
}
