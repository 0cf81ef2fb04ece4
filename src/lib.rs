//! # Camera Control
//!
//! Parameter control for machine-vision cameras of two transport families,
//! GigE Vision and USB3 Vision, which expose the same capabilities through
//! differently named registers with different units and value types.
//!
//! ## Crate Structure
//!
//! - **`components`**: the family bindings, the generic controller
//!   ([`CameraDriver`]), the exposure sequencer and the exception boundary that
//!   logs and converts register failures.
//! - **`config`**: Figment-based configuration (`config/camera.toml` plus
//!   `CAMERA_CONTROL_` environment overrides).
//! - **`error`**: [`CameraError`], the single error type of the crate.
//! - **`logging`**: tracing subscriber setup.
//! - **`mock`**: a simulated register map for tests and hardware-free runs
//!   (feature `mock`).
//!
//! ## Usage
//!
//! ```
//! use camera_control::mock::MockNodeMap;
//! use camera_control::{GigECamera, SequencerState, StartupParameters};
//!
//! let mut camera = GigECamera::new(MockNodeMap::gige());
//! camera.apply_startup_settings(&StartupParameters::new(0.5, 3000)?)?;
//!
//! let applied = camera.setup_sequencer(&[0.001, 0.01, 0.1])?;
//! assert_eq!(applied.len(), 3);
//! assert_eq!(camera.sequencer_state(), SequencerState::Armed);
//! # Ok::<(), camera_control::CameraError>(())
//! ```

pub mod components;
pub mod config;
pub mod error;
pub mod logging;

#[cfg(feature = "mock")]
pub mod mock;

pub use crate::components::family::CameraFamily;
pub use crate::components::features::{CameraDriver, SequencerState};
pub use crate::components::gige::GigE;
pub use crate::components::node_map::{AccessMode, NodeMap};
pub use crate::components::usb::Usb;
pub use crate::config::{CameraConfig, StartupParameters};
pub use crate::error::{CameraError, CameraResult, RegisterAccessError};

/// Controller for a GigE camera.
pub type GigECamera<M> = CameraDriver<GigE, M>;

/// Controller for a USB3 camera.
pub type UsbCamera<M> = CameraDriver<Usb, M>;
