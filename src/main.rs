//! CLI Entry Point for camera_control
//!
//! Drives the controller against the simulated camera, so startup and
//! sequencer behavior can be inspected without hardware.
//!
//! # Usage
//!
//! Apply the startup configuration and print the live ranges:
//! ```bash
//! camera_control startup --gain 0.25 --mtu 1500
//! ```
//!
//! Program and arm an exposure sequence (seconds):
//! ```bash
//! camera_control sequence 0.001 0.01 0.1
//! ```
//!
//! Settings not given on the command line come from `config/camera.toml`
//! and `CAMERA_CONTROL_*` environment variables.

use anyhow::{Context, Result};
use camera_control::config::{CameraConfig, FamilyKind};
use camera_control::logging::{self, OutputFormat, TracingConfig};
use camera_control::mock::MockNodeMap;
use camera_control::{CameraDriver, CameraFamily, GigE, StartupParameters, Usb};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "camera_control")]
#[command(about = "Machine-vision camera parameter control", long_about = None)]
struct Cli {
    /// Configuration file
    #[arg(long, default_value = camera_control::config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Camera family, overriding the configuration file
    #[arg(long, value_parser = parse_family)]
    family: Option<FamilyKind>,

    /// Log output format (pretty, compact, json)
    #[arg(long, default_value = "compact")]
    log_format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply the startup configuration and print the resulting ranges
    Startup {
        /// Gain as a fraction of the device range [0, 1]
        #[arg(long)]
        gain: Option<f64>,

        /// Network packet size in bytes
        #[arg(long)]
        mtu: Option<u32>,
    },

    /// Apply the startup configuration, then program and arm an exposure sequence
    Sequence {
        /// Exposure time per step in seconds (defaults to the configured sequence)
        exposure_times: Vec<f64>,
    },
}

fn parse_family(s: &str) -> Result<FamilyKind, String> {
    match s.to_lowercase().as_str() {
        "gige" => Ok(FamilyKind::Gige),
        "usb" => Ok(FamilyKind::Usb),
        _ => Err(format!("unknown camera family '{}', expected gige or usb", s)),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = CameraConfig::load_from(&cli.config)
        .with_context(|| format!("loading {}", cli.config.display()))?;
    if let Some(family) = cli.family {
        config.camera.family = family;
    }
    if let Commands::Startup { gain, mtu } = &cli.command {
        config.startup.target_gain = gain.unwrap_or(config.startup.target_gain);
        config.startup.mtu_size = mtu.unwrap_or(config.startup.mtu_size);
    }
    config.validate()?;

    let level = logging::parse_log_level(&config.camera.log_level)?;
    logging::init(TracingConfig::new(level).with_format(cli.log_format))?;

    match config.camera.family {
        FamilyKind::Gige => run::<GigE>(MockNodeMap::gige(), &config, &cli.command),
        FamilyKind::Usb => run::<Usb>(MockNodeMap::usb(), &config, &cli.command),
    }
}

fn run<F: CameraFamily>(
    device: MockNodeMap,
    config: &CameraConfig,
    command: &Commands,
) -> Result<()> {
    let mut camera = CameraDriver::<F, _>::new(device);
    startup(&mut camera, &config.startup)?;

    if let Commands::Sequence { exposure_times } = command {
        let steps = if exposure_times.is_empty() {
            &config.sequencer.exposure_times
        } else {
            exposure_times
        };
        let applied = camera.setup_sequencer(steps)?;

        println!("Sequencer armed with {} steps:", applied.len());
        for (index, (requested, actual)) in steps.iter().zip(&applied).enumerate() {
            println!("  step {}: requested {} s, applied {} s", index, requested, actual);
        }
    }
    Ok(())
}

fn startup<F: CameraFamily>(
    camera: &mut CameraDriver<F, MockNodeMap>,
    params: &StartupParameters,
) -> Result<()> {
    camera.apply_startup_settings(params)?;

    let gain = camera.gain()?;
    let (exposure_min, exposure_max) = camera.exposure_range()?;
    println!("{} camera configured", camera.type_name());
    println!(
        "  gain:       {} in [{} - {}] ({})",
        gain.value()?,
        gain.min()?,
        gain.max()?,
        gain.name()
    );
    println!(
        "  exposure:   {} s in [{} - {}] s",
        camera.current_exposure()?,
        exposure_min,
        exposure_max
    );
    println!(
        "  frame rate: {} Hz",
        camera.current_resulting_frame_rate()?
    );
    println!(
        "  brightness: {}",
        camera.current_auto_target_brightness()?
    );
    Ok(())
}
