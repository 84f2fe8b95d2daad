//! Collector configuration.
//!
//! Settings are layered, later layers winning:
//!
//! 1. Built-in defaults for the chosen [`Preset`]
//! 2. An optional TOML/JSON/YAML file (`--config`)
//! 3. Environment variables prefixed `WAITWATCH_` (e.g. `WAITWATCH_URL`)
//! 4. Command line flags
//!
//! Durations are human strings such as `72h`, `30m` or `10s`.
//!
//! ```toml
//! url = "https://howlongwilliwait.com/sample.json"
//! output = "hospital_wait_times.xlsx"
//! duration = "72h"
//! interval = "30m"
//! timeout = "10s"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;

use crate::collector::Schedule;
use crate::duration::{format_duration, parse_duration};

/// Endpoint polled when none is configured.
pub const DEFAULT_URL: &str = "https://howlongwilliwait.com/sample.json";

/// Environment variable prefix for overrides.
pub const ENV_PREFIX: &str = "WAITWATCH";

/// Named default sets for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Preset {
    /// 72 hours at 30-minute intervals.
    #[default]
    Full,
    /// Two snapshots five minutes apart.
    Demo,
}

impl Preset {
    fn output(&self) -> &'static str {
        match self {
            Preset::Full => "hospital_wait_times.xlsx",
            Preset::Demo => "demo_hospital_wait_times.xlsx",
        }
    }

    fn duration(&self) -> &'static str {
        match self {
            Preset::Full => "72h",
            Preset::Demo => "10m",
        }
    }

    fn interval(&self) -> &'static str {
        match self {
            Preset::Full => "30m",
            Preset::Demo => "5m",
        }
    }
}

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// A configuration source could not be read or deserialized.
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// A duration setting did not parse.
    #[error("invalid duration for `{key}`: {message}")]
    InvalidDuration { key: &'static str, message: String },

    /// The endpoint is not a valid URL.
    #[error("invalid url `{url}`: {message}")]
    InvalidUrl { url: String, message: String },

    /// The interval between cycles is zero.
    #[error("interval must be greater than zero")]
    ZeroInterval,

    /// The request timeout is zero.
    #[error("timeout must be greater than zero")]
    ZeroTimeout,

    /// Not even one cycle fits in the configured duration.
    #[error("duration {duration} is shorter than interval {interval}")]
    DurationShorterThanInterval { duration: String, interval: String },
}

/// Overrides supplied on the command line. `None` leaves the lower layers alone.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub url: Option<String>,
    pub output: Option<PathBuf>,
    pub duration: Option<String>,
    pub interval: Option<String>,
    pub timeout: Option<String>,
}

/// Raw settings as read from the layered sources.
#[derive(Debug, Deserialize)]
struct RawSettings {
    url: String,
    output: PathBuf,
    duration: String,
    interval: String,
    timeout: String,
}

/// Validated configuration for one collection run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollectorConfig {
    /// Endpoint returning the hospital → wait time JSON object.
    pub url: String,
    /// Spreadsheet rewritten after every successful cycle.
    pub output: PathBuf,
    /// Wall-clock budget for the whole run.
    pub total_duration: Duration,
    /// Time between cycles.
    pub interval: Duration,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self::preset(Preset::Full)
    }
}

impl CollectorConfig {
    /// The built-in configuration for a preset.
    pub fn preset(preset: Preset) -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            output: PathBuf::from(preset.output()),
            total_duration: parse_preset_duration(preset.duration()),
            interval: parse_preset_duration(preset.interval()),
            timeout: crate::source::DEFAULT_TIMEOUT,
        }
    }

    /// Load configuration from defaults, an optional file, the environment
    /// and command line overrides.
    pub fn load(
        path: Option<&Path>,
        preset: Preset,
        overrides: &Overrides,
    ) -> Result<Self, SettingsError> {
        let mut builder = Config::builder()
            .set_default("url", DEFAULT_URL)?
            .set_default("output", preset.output())?
            .set_default("duration", preset.duration())?
            .set_default("interval", preset.interval())?
            .set_default("timeout", "10s")?;

        if let Some(path) = path {
            builder = builder.add_source(File::from(path));
        }

        let raw: RawSettings = builder
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .set_override_option("url", overrides.url.clone())?
            .set_override_option(
                "output",
                overrides.output.as_ref().map(|p| p.display().to_string()),
            )?
            .set_override_option("duration", overrides.duration.clone())?
            .set_override_option("interval", overrides.interval.clone())?
            .set_override_option("timeout", overrides.timeout.clone())?
            .build()?
            .try_deserialize()?;

        Self::from_raw(raw)
    }

    fn from_raw(raw: RawSettings) -> Result<Self, SettingsError> {
        let config = Self {
            total_duration: duration_setting("duration", &raw.duration)?,
            interval: duration_setting("interval", &raw.interval)?,
            timeout: duration_setting("timeout", &raw.timeout)?,
            url: raw.url,
            output: raw.output,
        };
        config.validate()?;
        Ok(config)
    }

    /// Check that the configuration describes at least one cycle against a valid URL.
    pub fn validate(&self) -> Result<(), SettingsError> {
        reqwest::Url::parse(&self.url).map_err(|e| SettingsError::InvalidUrl {
            url: self.url.clone(),
            message: e.to_string(),
        })?;

        if self.interval.is_zero() {
            return Err(SettingsError::ZeroInterval);
        }
        if self.timeout.is_zero() {
            return Err(SettingsError::ZeroTimeout);
        }
        if self.total_duration < self.interval {
            return Err(SettingsError::DurationShorterThanInterval {
                duration: format_duration(self.total_duration),
                interval: format_duration(self.interval),
            });
        }
        Ok(())
    }

    /// The run's schedule.
    pub fn schedule(&self) -> Schedule {
        Schedule::new(self.total_duration, self.interval)
    }
}

fn duration_setting(key: &'static str, value: &str) -> Result<Duration, SettingsError> {
    parse_duration(value).map_err(|e| SettingsError::InvalidDuration {
        key,
        message: e.to_string(),
    })
}

fn parse_preset_duration(value: &str) -> Duration {
    parse_duration(value).unwrap_or_default()
}
