//! Tracing setup.
//!
//! The library only emits `tracing` events; binaries decide where they go.
//! This module builds a `tracing-subscriber` registry with an env filter
//! (`RUST_LOG` wins over the configured level) and one of three formats.
//!
//! # Example
//! ```no_run
//! use camera_control::{config::CameraConfig, logging};
//!
//! let config = CameraConfig::load()?;
//! logging::init_from_config(&config)?;
//! tracing::info!("camera session starting");
//! # Ok::<(), camera_control::CameraError>(())
//! ```

use crate::config::CameraConfig;
use crate::error::{CameraError, CameraResult};
use std::str::FromStr;
use tracing::Level;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Output format for log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Multi-line, colored (for development)
    Pretty,
    /// One line per event, no colors
    #[default]
    Compact,
    /// JSON objects (for log aggregation)
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pretty" => Ok(OutputFormat::Pretty),
            "compact" => Ok(OutputFormat::Compact),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!(
                "Invalid log format '{}'. Must be one of: pretty, compact, json",
                s
            )),
        }
    }
}

/// Tracing configuration options
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Maximum level when `RUST_LOG` is not set
    pub level: Level,
    /// Output format
    pub format: OutputFormat,
    /// Whether to include file and line numbers
    pub with_file_and_line: bool,
    /// Whether to enable ANSI colors (Pretty format only)
    pub with_ansi: bool,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            format: OutputFormat::default(),
            with_file_and_line: false,
            with_ansi: true,
        }
    }
}

impl TracingConfig {
    /// Create tracing config from the camera configuration
    pub fn from_camera_config(config: &CameraConfig) -> CameraResult<Self> {
        Ok(Self {
            level: parse_log_level(&config.camera.log_level)?,
            ..Default::default()
        })
    }

    /// Create tracing config with custom level
    pub fn new(level: Level) -> Self {
        Self {
            level,
            ..Default::default()
        }
    }

    /// Set output format
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Enable or disable file and line numbers
    pub fn with_file_and_line(mut self, enabled: bool) -> Self {
        self.with_file_and_line = enabled;
        self
    }

    /// Enable or disable ANSI colors
    pub fn with_ansi(mut self, enabled: bool) -> Self {
        self.with_ansi = enabled;
        self
    }
}

/// Initialize tracing from the camera configuration
pub fn init_from_config(config: &CameraConfig) -> CameraResult<()> {
    init(TracingConfig::from_camera_config(config)?)
}

/// Initialize the global subscriber.
///
/// Idempotent: if a subscriber is already installed (tests, embedding
/// applications) this returns `Ok(())` and leaves it in place.
pub fn init(config: TracingConfig) -> CameraResult<()> {
    if tracing::dispatcher::has_been_set() {
        return Ok(());
    }

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_to_filter_string(config.level)));

    let layer = fmt::layer()
        .with_file(config.with_file_and_line)
        .with_line_number(config.with_file_and_line);
    let layer = match config.format {
        OutputFormat::Pretty => layer.pretty().with_ansi(config.with_ansi).boxed(),
        OutputFormat::Compact => layer.compact().with_ansi(false).boxed(),
        OutputFormat::Json => layer.json().boxed(),
    };

    tracing_subscriber::registry()
        .with(layer.with_filter(env_filter))
        .try_init()
        .map_err(|e| CameraError::Configuration(format!("Failed to initialize tracing: {}", e)))
}

/// Parse log level string into tracing Level
pub fn parse_log_level(level: &str) -> CameraResult<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(CameraError::Configuration(format!(
            "Invalid log level '{}'. Must be one of: trace, debug, info, warn, error",
            level
        ))),
    }
}

fn level_to_filter_string(level: Level) -> String {
    match level {
        Level::TRACE => "trace".to_string(),
        Level::DEBUG => "debug".to_string(),
        Level::INFO => "info".to_string(),
        Level::WARN => "warn".to_string(),
        Level::ERROR => "error".to_string(),
    }
}
