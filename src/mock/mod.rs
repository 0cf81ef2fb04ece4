//! Simulated camera for tests and hardware-free runs.
//!
//! [`MockNodeMap`] implements [`NodeMap`](crate::components::node_map::NodeMap)
//! over an in-memory register table. It records every successful write and
//! command in a journal, reloads its power-on contents when the user-set
//! load command runs, and can fail on demand through [`FaultScenario`]s.
//!
//! # Example
//! ```
//! use camera_control::mock::MockNodeMap;
//! use camera_control::{GigECamera, StartupParameters};
//!
//! let device = MockNodeMap::gige();
//! let mut camera = GigECamera::new(device.clone());
//! camera.apply_startup_settings(&StartupParameters::new(0.5, 1500)?)?;
//! assert_eq!(device.entry("TriggerMode").as_deref(), Some("On"));
//! # Ok::<(), camera_control::CameraError>(())
//! ```

mod faults;
mod node_map;
mod presets;

pub use faults::FaultScenario;
pub use node_map::{Access, MockNodeMap, Value};
