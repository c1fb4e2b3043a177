//! Logging setup
//!
//! The crate logs through `tracing`. Applications embedding it call
//! [`init`] (or [`init_with`]) once at startup to install a subscriber;
//! libraries and tests that install their own can skip this.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Multi-line human-readable output
    Pretty,
    /// Single-line human-readable output
    Compact,
    /// Newline-delimited JSON
    Json,
}

impl LogFormat {
    /// Pretty in debug builds, JSON in release builds
    #[must_use]
    pub const fn for_build() -> Self {
        if cfg!(debug_assertions) {
            Self::Pretty
        } else {
            Self::Json
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct ObservabilityConfig {
    /// Filter used when `RUST_LOG` is unset
    pub default_filter: String,

    /// Output format
    pub format: LogFormat,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            default_filter: if cfg!(debug_assertions) {
                "debug,bizcard=trace".to_string()
            } else {
                "info".to_string()
            },
            format: LogFormat::for_build(),
        }
    }
}

impl ObservabilityConfig {
    /// Config with an explicit fallback filter
    pub fn new(default_filter: impl Into<String>) -> Self {
        Self {
            default_filter: default_filter.into(),
            ..Default::default()
        }
    }

    /// Use JSON output
    #[must_use]
    pub const fn with_json(mut self) -> Self {
        self.format = LogFormat::Json;
        self
    }

    /// Use single-line output
    #[must_use]
    pub const fn with_compact(mut self) -> Self {
        self.format = LogFormat::Compact;
        self
    }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.default_filter))
    }
}

/// Install the global subscriber with the build's defaults
///
/// # Example
///
/// ```rust,no_run
/// use bizcard::observability;
///
/// # fn main() -> anyhow::Result<()> {
/// observability::init()?;
/// tracing::info!("bizcard client started");
/// # Ok(())
/// # }
/// ```
pub fn init() -> anyhow::Result<()> {
    init_with(&ObservabilityConfig::default())
}

/// Install the global subscriber
///
/// Fails if a global subscriber is already set.
pub fn init_with(config: &ObservabilityConfig) -> anyhow::Result<()> {
    let registry = tracing_subscriber::registry().with(config.env_filter());

    match config.format {
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().pretty())
            .try_init()?,
        LogFormat::Compact => registry
            .with(tracing_subscriber::fmt::layer().compact())
            .try_init()?,
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .try_init()?,
    }

    Ok(())
}
