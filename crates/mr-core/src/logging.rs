//! Structured logging setup for hosts embedding the resolver.
//!
//! The resolver only emits `tracing` events. Hosts that do not install their
//! own subscriber can call [`init_logging`]; it never replaces a subscriber
//! that is already installed.

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable overriding the configured filter.
pub const LOG_ENV_VAR: &str = "MODRULES_LOG";

/// Output format for log lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Human,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// `EnvFilter` directive string.
    pub filter: String,
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::verbosity(0)
    }
}

impl LogConfig {
    /// Filter for a `-v` count.
    pub fn verbosity(level: u8) -> Self {
        let filter = match level {
            0 => "warn,mr_core=info",
            1 => "info,mr_core=debug,mr_config=debug",
            2 => "debug,mr_core=trace,mr_config=trace",
            _ => "trace",
        };
        Self {
            filter: filter.to_string(),
            format: LogFormat::Human,
        }
    }

    pub fn json(mut self) -> Self {
        self.format = LogFormat::Json;
        self
    }

    /// `MODRULES_LOG` wins over the configured filter when set and valid.
    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(&self.filter))
    }
}

/// Install a stderr subscriber. Fails if one is already installed.
pub fn init_logging(config: &LogConfig) -> mr_common::Result<()> {
    let filter = config.env_filter();

    let result = match config.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Human => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init(),
    };

    result.map_err(|e| mr_common::Error::Config(format!("logging: {}", e)))
}
