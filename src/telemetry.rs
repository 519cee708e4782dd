//! Tracing subscriber setup
//!
//! Logging is configured once, from an explicit [`LogConfig`] built by the
//! binary. Library code only emits events through `tracing`.

use tracing::Level;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// How log output should look
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LogConfig {
    /// Emit debug-level events from this crate
    pub verbose: bool,
    /// Emit one JSON object per line instead of human-readable text
    pub json: bool,
}

impl LogConfig {
    /// Level for this crate's own events
    pub fn level(&self) -> Level {
        if self.verbose { Level::DEBUG } else { Level::INFO }
    }

    /// Default filter directives: this crate at [`Self::level`], HTTP client internals at warn
    pub fn filter_directives(&self) -> String {
        let level = self.level().as_str().to_lowercase();
        format!("{level},mcr_rss={level},reqwest=warn,hyper=warn")
    }
}

/// Install the global tracing subscriber
///
/// `RUST_LOG` takes precedence over [`LogConfig::filter_directives`]. Calling this
/// more than once is harmless; later calls are ignored.
pub fn init_tracing(config: &LogConfig) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.filter_directives()));

    if config.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_target(false).json())
            .try_init()
            .ok();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_target(false))
            .try_init()
            .ok();
    }
}
