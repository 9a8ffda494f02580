//! Configuration from the environment, overridable from the command line
//!
//! All settings have defaults; a `.env` file is honoured by the binary.

use cinema_api::ApiConfig;
use chrono::{FixedOffset, Local, Offset};
use clap::{Parser, ValueEnum};
use std::env;
use std::time::Duration;
use thiserror::Error;

/// Default service address
pub const DEFAULT_API_URL: &str = "http://localhost:3000";

/// Errors raised while reading configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is set but cannot be parsed
    #[error("Invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        /// Environment variable name
        key: &'static str,
        /// Raw value
        value: String,
        /// What was expected
        reason: &'static str,
    },
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Pretty,
    /// One JSON object per line
    Json,
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Filter directive used when `RUST_LOG` is unset
    pub level: String,
    /// Output format
    pub format: LogFormat,
}

/// Client configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Service connection
    pub api: ApiConfig,
    /// Shortest time between requesting a booking and showing it
    pub confirmation_min_delay: Duration,
    /// Offset show times are displayed in
    pub display_offset: FixedOffset,
    /// Logging
    pub log: LogConfig,
}

impl Config {
    /// Read configuration from process environment variables
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a variable is set to an unparsable value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read configuration through `lookup`, which maps a variable name to its value
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] if a variable is set to an unparsable value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("CINEMA_API_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let timeout_secs = parse(&lookup, "CINEMA_API_TIMEOUT_SECS", "whole seconds")?.unwrap_or(30);
        let delay_ms =
            parse(&lookup, "CINEMA_CONFIRMATION_MIN_DELAY_MS", "whole milliseconds")?.unwrap_or(800);
        let display_offset = match parse::<i32, _>(&lookup, "CINEMA_DISPLAY_UTC_OFFSET_MINUTES", "minutes east of UTC")? {
            Some(minutes) => offset_from_minutes(minutes).ok_or_else(|| ConfigError::Invalid {
                key: "CINEMA_DISPLAY_UTC_OFFSET_MINUTES",
                value: minutes.to_string(),
                reason: "offset must be within a day",
            })?,
            None => Local::now().offset().fix(),
        };
        let format = match lookup("CINEMA_LOG_FORMAT") {
            Some(raw) => LogFormat::from_str(raw.trim(), true).map_err(|_| ConfigError::Invalid {
                key: "CINEMA_LOG_FORMAT",
                value: raw,
                reason: "pretty or json",
            })?,
            None => LogFormat::default(),
        };

        Ok(Self {
            api: ApiConfig {
                base_url,
                timeout: Duration::from_secs(timeout_secs),
            },
            confirmation_min_delay: Duration::from_millis(delay_ms),
            display_offset,
            log: LogConfig {
                level: lookup("CINEMA_LOG_LEVEL").unwrap_or_else(|| "warn".to_string()),
                format,
            },
        })
    }

    /// Apply command-line overrides
    #[must_use]
    pub fn with_cli(mut self, cli: &Cli) -> Self {
        if let Some(url) = &cli.api_url {
            self.api.base_url.clone_from(url);
        }
        if let Some(level) = &cli.log_level {
            self.log.level.clone_from(level);
        }
        if let Some(format) = cli.log_format {
            self.log.format = format;
        }
        self
    }
}

fn parse<T, F>(lookup: &F, key: &'static str, reason: &'static str) -> Result<Option<T>, ConfigError>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| {
            raw.trim().parse().map_err(|_| ConfigError::Invalid {
                key,
                value: raw.clone(),
                reason,
            })
        })
        .transpose()
}

fn offset_from_minutes(minutes: i32) -> Option<FixedOffset> {
    FixedOffset::east_opt(minutes.checked_mul(60)?)
}

/// Command-line arguments of the `cinema` binary
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "cinema", version, about = "Book cinema seats from the terminal")]
pub struct Cli {
    /// Booking service base URL (overrides `CINEMA_API_URL`)
    #[arg(long)]
    pub api_url: Option<String>,

    /// Log filter, e.g. `info` or `cinema_app=debug` (overrides `CINEMA_LOG_LEVEL`)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (overrides `CINEMA_LOG_FORMAT`)
    #[arg(long, value_enum)]
    pub log_format: Option<LogFormat>,

    /// Path to open first
    #[arg(long, default_value = "/")]
    pub start: String,
}
