#![allow(clippy::unwrap_used, clippy::expect_used, missing_docs)]
//! Shipped configuration file and config-driven startup.

use camera_control::config::{CameraConfig, FamilyKind};
use camera_control::mock::MockNodeMap;
use camera_control::{GigECamera, SequencerState};

fn shipped_config() -> CameraConfig {
    CameraConfig::load_from(concat!(env!("CARGO_MANIFEST_DIR"), "/config/camera.toml")).unwrap()
}

#[test]
fn shipped_config_is_valid() {
    let config = shipped_config();

    config.validate().unwrap();
    assert_eq!(config.camera.family, FamilyKind::Gige);
    assert_eq!(config.startup.target_gain, 0.5);
    assert_eq!(config.startup.mtu_size, 3000);
    assert_eq!(config.sequencer.exposure_times, vec![0.001, 0.01, 0.1]);
}

#[test]
fn shipped_config_drives_a_full_session() {
    let config = shipped_config();
    let device = MockNodeMap::gige();
    let mut camera = GigECamera::new(device.clone());

    camera.apply_startup_settings(&config.startup).unwrap();
    let applied = camera
        .setup_sequencer(&config.sequencer.exposure_times)
        .unwrap();

    assert_eq!(applied, vec![0.001, 0.01, 0.1]);
    assert_eq!(camera.sequencer_state(), SequencerState::Armed);
    assert_eq!(device.integer("GevSCPSPacketSize"), Some(3000));
    assert_eq!(device.integer("GainRaw"), Some(180));
}

#[test]
fn config_outside_the_working_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("usb.toml");
    std::fs::write(
        &path,
        "[camera]\nfamily = \"usb\"\nlog_level = \"warn\"\n\n[startup]\ntarget_gain = 1.0\n",
    )
    .unwrap();

    let config = CameraConfig::load_from(&path).unwrap();

    config.validate().unwrap();
    assert_eq!(config.camera.family, FamilyKind::Usb);
    assert_eq!(config.startup.target_gain, 1.0);
    assert_eq!(config.startup.mtu_size, 3000);
}

#[test]
fn malformed_file_is_a_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "[startup]\ntarget_gain = \"half\"\n").unwrap();

    let err = CameraConfig::load_from(&path).unwrap_err();

    assert!(matches!(err, camera_control::CameraError::Config(_)));
}
