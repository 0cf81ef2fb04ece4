//! Shared helpers for camera control integration tests.
//!
//! - device builders with specific ranges
//! - journal filters for asserting what reached the device and in which order

#![allow(dead_code)] // Not every helper is used by every test file

use camera_control::mock::{Access, MockNodeMap, Value};
use camera_control::{GigECamera, StartupParameters, UsbCamera};

/// Startup parameters used unless a test needs something specific.
pub fn params(target_gain: f64) -> StartupParameters {
    StartupParameters::new(target_gain, 3000).unwrap()
}

/// GigE device whose raw gain spans `[min, max]`.
pub fn gige_with_gain_range(min: i64, max: i64) -> MockNodeMap {
    MockNodeMap::gige().with_integer("GainRaw", min, min, max)
}

/// GigE device whose exposure spans `[min_us, max_us]`.
pub fn gige_with_exposure_range(min_us: f64, max_us: f64) -> MockNodeMap {
    MockNodeMap::gige().with_float("ExposureTimeAbs", min_us, min_us, max_us)
}

/// GigE controller after a successful startup, plus a probe on the same device.
pub fn started_gige(device: MockNodeMap) -> (GigECamera<MockNodeMap>, MockNodeMap) {
    let mut camera = GigECamera::new(device.clone());
    camera.apply_startup_settings(&params(0.5)).unwrap();
    device.clear_journal();
    (camera, device)
}

/// USB controller after a successful startup, plus a probe on the same device.
pub fn started_usb() -> (UsbCamera<MockNodeMap>, MockNodeMap) {
    let device = MockNodeMap::usb();
    let mut camera = UsbCamera::new(device.clone());
    camera.apply_startup_settings(&params(0.5)).unwrap();
    device.clear_journal();
    (camera, device)
}

/// Values written to `node`, in order.
pub fn writes_to(device: &MockNodeMap, node: &str) -> Vec<Value> {
    device
        .journal()
        .into_iter()
        .filter_map(|access| match access {
            Access::Write { node: n, value } if n == node => Some(value),
            _ => None,
        })
        .collect()
}

/// Number of executions of command `node`.
pub fn executions_of(device: &MockNodeMap, node: &str) -> usize {
    device
        .journal()
        .iter()
        .filter(|access| matches!(access, Access::Execute { node: n } if n == node))
        .count()
}

/// Whether any access touched a register whose name starts with `prefix`.
pub fn touched_prefix(device: &MockNodeMap, prefix: &str) -> bool {
    device
        .journal()
        .iter()
        .any(|access| access.node().starts_with(prefix))
}
