//! Configuration loading using Figment
//!
//! Configuration is loaded from:
//! 1. `config/camera.toml` (base configuration)
//! 2. Environment variables prefixed with `CAMERA_CONTROL_`, using `__` to
//!    separate nesting levels (e.g. `CAMERA_CONTROL_STARTUP__MTU_SIZE=9000`)
//!
//! # Example
//! ```no_run
//! use camera_control::config::CameraConfig;
//!
//! let config = CameraConfig::load()?;
//! config.validate()?;
//! println!("Family: {}", config.camera.family);
//! # Ok::<(), camera_control::error::CameraError>(())
//! ```

use crate::error::{CameraError, CameraResult};
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default configuration file, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config/camera.toml";

/// Environment variable prefix for overrides.
pub const ENV_PREFIX: &str = "CAMERA_CONTROL_";

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Camera selection and logging
    #[serde(default)]
    pub camera: CameraSection,
    /// Values applied once per session by the startup configuration
    #[serde(default)]
    pub startup: StartupParameters,
    /// Optional exposure sequence
    #[serde(default)]
    pub sequencer: SequencerSection,
}

/// Camera selection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraSection {
    /// Transport family of the connected camera
    #[serde(default)]
    pub family: FamilyKind,
    /// Logging level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for CameraSection {
    fn default() -> Self {
        Self {
            family: FamilyKind::default(),
            log_level: default_log_level(),
        }
    }
}

/// Camera transport family, as named in configuration files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FamilyKind {
    /// GigE Vision
    #[default]
    Gige,
    /// USB3 Vision
    Usb,
}

impl std::fmt::Display for FamilyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FamilyKind::Gige => write!(f, "gige"),
            FamilyKind::Usb => write!(f, "usb"),
        }
    }
}

/// Values supplied by the caller for the startup configuration.
///
/// `target_gain` is a fraction of the device's live gain range, not an
/// absolute value: 0.0 selects the minimum, 1.0 the maximum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StartupParameters {
    /// Normalized gain in [0, 1]
    #[serde(default = "default_target_gain")]
    pub target_gain: f64,
    /// Network packet size in bytes
    #[serde(default = "default_mtu_size")]
    pub mtu_size: u32,
}

impl StartupParameters {
    /// Create validated startup parameters.
    pub fn new(target_gain: f64, mtu_size: u32) -> CameraResult<Self> {
        let params = Self {
            target_gain,
            mtu_size,
        };
        params.validate()?;
        Ok(params)
    }

    /// Check the invariants; nothing is sent to the device if this fails.
    pub fn validate(&self) -> CameraResult<()> {
        if !(0.0..=1.0).contains(&self.target_gain) {
            return Err(CameraError::Configuration(format!(
                "target_gain must lie in [0, 1], got {}",
                self.target_gain
            )));
        }
        if self.mtu_size == 0 {
            return Err(CameraError::Configuration(
                "mtu_size must be positive".into(),
            ));
        }
        Ok(())
    }
}

impl Default for StartupParameters {
    fn default() -> Self {
        Self {
            target_gain: default_target_gain(),
            mtu_size: default_mtu_size(),
        }
    }
}

/// Exposure sequence settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SequencerSection {
    /// Exposure time per step in seconds; empty disables the sequencer
    #[serde(default)]
    pub exposure_times: Vec<f64>,
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_target_gain() -> f64 {
    0.5
}

fn default_mtu_size() -> u32 {
    3000
}

impl CameraConfig {
    /// Load configuration from `config/camera.toml` and environment variables
    pub fn load() -> CameraResult<Self> {
        Self::load_from(DEFAULT_CONFIG_PATH)
    }

    /// Load configuration from a specific file path
    ///
    /// A missing file is not an error; defaults and environment values apply.
    pub fn load_from<P: AsRef<Path>>(path: P) -> CameraResult<Self> {
        let config = Figment::new()
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> CameraResult<()> {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.camera.log_level.to_lowercase().as_str()) {
            return Err(CameraError::Configuration(format!(
                "Invalid log_level '{}'. Must be one of: {}",
                self.camera.log_level,
                valid_levels.join(", ")
            )));
        }

        self.startup.validate()?;

        if let Some(bad) = self
            .sequencer
            .exposure_times
            .iter()
            .find(|t| !t.is_finite() || **t <= 0.0)
        {
            return Err(CameraError::Configuration(format!(
                "sequencer exposure times must be positive, got {}",
                bad
            )));
        }

        Ok(())
    }
}
