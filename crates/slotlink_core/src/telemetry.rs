//! Tracing subscriber setup.
//!
//! Every slotlink crate logs through the `tracing` facade. Nothing is
//! printed until a subscriber is installed; [`init_tracing`] installs one
//! built from a [`TracingConfig`].
//!
//! # Example
//!
//! ```
//! use slotlink_core::telemetry::{TracingConfig, TracingFormat, init_tracing};
//! use tracing::Level;
//!
//! init_tracing(
//!     &TracingConfig::default()
//!         .with_level(Level::DEBUG)
//!         .with_format(TracingFormat::Compact)
//!         .with_env_filter("slotlink_port=trace,slotlink_core=debug"),
//! );
//! tracing::info!("ports online");
//! ```

use tracing::Level;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

// ─────────────────────────────────────────────────────────────────────────────
// TracingFormat
// ─────────────────────────────────────────────────────────────────────────────

/// Tracing output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TracingFormat {
    /// Human-readable colored output (default).
    #[default]
    Pretty,
    /// Compact single-line output.
    Compact,
    /// JSON structured output for log aggregation.
    Json,
}

// ─────────────────────────────────────────────────────────────────────────────
// TracingConfig
// ─────────────────────────────────────────────────────────────────────────────

/// Subscriber settings for [`init_tracing`].
///
/// # Configuration Options
///
/// ```
/// use slotlink_core::telemetry::{TracingConfig, TracingFormat};
/// use tracing::Level;
///
/// // Development: every slot transition, with span enter/exit
/// let dev = TracingConfig::default()
///     .with_level(Level::TRACE)
///     .with_format(TracingFormat::Pretty)
///     .with_span_events(true);
///
/// // Production: JSON, only contract violations and faults
/// let prod = TracingConfig::default()
///     .with_format(TracingFormat::Json)
///     .with_env_filter("slotlink_port=warn");
/// ```
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Maximum log level, used when no filter is set or the filter is invalid.
    pub level: Level,
    /// Output format.
    pub format: TracingFormat,
    /// Target filter (e.g., `"slotlink_port=debug,slotlink_core=info"`).
    pub env_filter: Option<String>,
    /// Whether span enter/exit events are emitted.
    pub span_events: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            format: TracingFormat::Pretty,
            env_filter: None,
            span_events: false,
        }
    }
}

impl TracingConfig {
    /// Creates a config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum log level.
    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Sets the output format.
    #[must_use]
    pub fn with_format(mut self, format: TracingFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets a target filter string.
    ///
    /// Format: `target=level,target=level,...`
    #[must_use]
    pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// Enables span enter/exit events in output.
    #[must_use]
    pub fn with_span_events(mut self, enabled: bool) -> Self {
        self.span_events = enabled;
        self
    }

    /// Builds the filter, falling back to `level` if the filter string is invalid.
    fn filter(&self) -> EnvFilter {
        match &self.env_filter {
            Some(filter) => {
                EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(self.level.as_str()))
            }
            None => EnvFilter::new(self.level.as_str()),
        }
    }

    fn fmt_span(&self) -> FmtSpan {
        if self.span_events {
            FmtSpan::ENTER | FmtSpan::EXIT
        } else {
            FmtSpan::NONE
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// init_tracing
// ─────────────────────────────────────────────────────────────────────────────

/// Installs a global subscriber built from `config`.
///
/// Only the first call in a process has an effect; later calls (and calls
/// made after another subscriber was installed) are ignored.
pub fn init_tracing(config: &TracingConfig) {
    let env_filter = config.filter();
    let span_events = config.fmt_span();

    // try_init().ok() ignores errors if already initialized
    match config.format {
        TracingFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .pretty()
                        .with_span_events(span_events),
                )
                .try_init()
                .ok();
        }
        TracingFormat::Compact => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .compact()
                        .with_span_events(span_events),
                )
                .try_init()
                .ok();
        }
        TracingFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_span_events(span_events),
                )
                .try_init()
                .ok();
        }
    }

    tracing::debug!(level = %config.level, format = ?config.format, "tracing initialized");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = TracingConfig::default();
        assert_eq!(config.level, Level::INFO);
        assert_eq!(config.format, TracingFormat::Pretty);
        assert_eq!(config.env_filter, None);
        assert!(!config.span_events);
    }

    #[test]
    fn builder_sets_fields() {
        let config = TracingConfig::new()
            .with_level(Level::TRACE)
            .with_format(TracingFormat::Json)
            .with_env_filter("slotlink_port=debug")
            .with_span_events(true);

        assert_eq!(config.level, Level::TRACE);
        assert_eq!(config.format, TracingFormat::Json);
        assert_eq!(config.env_filter.as_deref(), Some("slotlink_port=debug"));
        assert_eq!(config.fmt_span(), FmtSpan::ENTER | FmtSpan::EXIT);
    }

    #[test]
    fn invalid_filter_falls_back_to_level() {
        let config = TracingConfig::new()
            .with_level(Level::WARN)
            .with_env_filter("slotlink_port=loudest");

        assert_eq!(
            config.filter().max_level_hint(),
            Some(tracing::level_filters::LevelFilter::WARN)
        );
    }

    #[test]
    fn init_is_idempotent() {
        let config = TracingConfig::new().with_format(TracingFormat::Compact);
        init_tracing(&config);
        init_tracing(&config);
    }
}
