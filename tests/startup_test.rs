#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs
)]
//! Startup configuration against the simulated GigE camera.
//!
//! Covers gain placement inside the live range, auto-function limits, the
//! user-set load / trigger ordering, packet pacing, and the partial-failure
//! contract (stop at the failing step, no rollback).

mod common;

use camera_control::mock::{FaultScenario, MockNodeMap, Value};
use camera_control::{CameraError, GigECamera, SequencerState, StartupParameters};
use common::{gige_with_gain_range, params, writes_to};
use tracing_test::traced_test;

// =============================================================================
// Gain
// =============================================================================

mod gain {
    use super::*;

    #[test]
    fn target_gain_is_a_fraction_of_the_live_range() {
        for (min, max, expected) in [(0, 0, 0), (0, 100, 50), (50, 150, 100)] {
            let device = gige_with_gain_range(min, max);
            let mut camera = GigECamera::new(device.clone());

            camera.apply_startup_settings(&params(0.5)).unwrap();

            assert_eq!(device.integer("GainRaw"), Some(expected), "range [{min}, {max}]");
            assert_eq!(camera.current_gain().unwrap(), expected);
        }
    }

    #[test]
    fn extremes_select_min_and_max() {
        let device = gige_with_gain_range(50, 150);
        let mut camera = GigECamera::new(device.clone());

        camera.apply_startup_settings(&params(0.0)).unwrap();
        assert_eq!(device.integer("GainRaw"), Some(50));

        camera.apply_startup_settings(&params(1.0)).unwrap();
        assert_eq!(device.integer("GainRaw"), Some(150));
    }

    #[test]
    fn gain_auto_is_switched_off_with_gain_minimizing_profile() {
        let device = MockNodeMap::gige();
        let mut camera = GigECamera::new(device.clone());
        assert_eq!(device.entry("GainAuto").as_deref(), Some("Continuous"));

        camera.apply_startup_settings(&params(0.5)).unwrap();

        assert_eq!(device.entry("GainAuto").as_deref(), Some("Off"));
        assert_eq!(device.entry("AutoFunctionProfile").as_deref(), Some("GainMinimum"));
        assert_eq!(device.entry("GainSelector").as_deref(), Some("AnalogAll"));
    }
}

// =============================================================================
// Auto-function limits
// =============================================================================

mod limits {
    use super::*;

    #[test]
    fn limits_equal_the_device_range() {
        let device = gige_with_gain_range(20, 300);
        device.set_range("ExposureTimeAbs", 100.0, 500_000.0);
        let mut camera = GigECamera::new(device.clone());

        camera.apply_startup_settings(&params(0.5)).unwrap();

        assert_eq!(device.float("AutoExposureTimeAbsLowerLimit"), Some(100.0));
        assert_eq!(device.float("AutoExposureTimeAbsUpperLimit"), Some(500_000.0));
        assert_eq!(device.integer("AutoGainRawLowerLimit"), Some(20));
        assert_eq!(device.integer("AutoGainRawUpperLimit"), Some(300));
        assert_eq!(
            camera.current_auto_exposure_time_lower_limit().unwrap(),
            100.0 / 1e6
        );
        assert_eq!(camera.current_auto_exposure_time_upper_limit().unwrap(), 0.5);
    }

    #[test]
    fn running_startup_twice_yields_identical_limits() {
        let device = MockNodeMap::gige();
        let mut camera = GigECamera::new(device.clone());
        let snapshot = |d: &MockNodeMap| {
            (
                d.float("AutoExposureTimeAbsLowerLimit"),
                d.float("AutoExposureTimeAbsUpperLimit"),
                d.integer("AutoGainRawLowerLimit"),
                d.integer("AutoGainRawUpperLimit"),
                d.integer("GainRaw"),
            )
        };

        camera.apply_startup_settings(&params(0.5)).unwrap();
        let first = snapshot(&device);
        camera.apply_startup_settings(&params(0.5)).unwrap();
        let second = snapshot(&device);

        assert_eq!(first, second);
        assert_eq!(first.0, Some(35.0));
        assert_eq!(first.3, Some(360));
    }
}

// =============================================================================
// Ordering and trigger configuration
// =============================================================================

mod ordering {
    use super::*;

    #[test]
    fn trigger_mode_is_on_after_user_set_load() {
        let device = MockNodeMap::gige();
        let mut camera = GigECamera::new(device.clone());

        camera.apply_startup_settings(&params(0.5)).unwrap();

        // The user-set load resets trigger mode to Off; it must come first.
        assert_eq!(device.entry("TriggerMode").as_deref(), Some("On"));
        assert_eq!(device.entry("TriggerSource").as_deref(), Some("Software"));

        let load = device.position("UserSetLoad", 0).unwrap();
        let selector = device.position("UserSetSelector", 0).unwrap();
        let source = device.position("TriggerSource", 0).unwrap();
        let mode = device.position("TriggerMode", 0).unwrap();
        assert!(selector < load);
        assert!(load < source);
        assert!(source < mode);
    }

    #[test]
    fn startup_disarms_a_running_sequence() {
        let device = MockNodeMap::gige();
        let mut camera = GigECamera::new(device.clone());
        camera.apply_startup_settings(&params(0.5)).unwrap();
        camera.setup_sequencer(&[0.001, 0.002]).unwrap();
        assert_eq!(camera.sequencer_state(), SequencerState::Armed);

        camera.apply_startup_settings(&params(0.5)).unwrap();

        assert_eq!(camera.sequencer_state(), SequencerState::Disabled);
        assert_eq!(device.boolean("SequenceEnable"), Some(false));
        assert!(camera.set_exposure(0.01).is_ok());
    }
}

// =============================================================================
// Packet pacing
// =============================================================================

mod transport {
    use super::*;

    #[test]
    fn packet_size_and_inter_packet_delay_written() {
        let device = MockNodeMap::gige();
        let mut camera = GigECamera::new(device.clone());

        camera
            .apply_startup_settings(&StartupParameters::new(0.5, 9000).unwrap())
            .unwrap();

        assert_eq!(writes_to(&device, "GevSCPSPacketSize"), vec![Value::Integer(9000)]);
        assert_eq!(writes_to(&device, "GevSCPD"), vec![Value::Integer(1000)]);
    }

    #[test]
    fn oversized_packet_is_reported_by_the_device() {
        let device = MockNodeMap::gige();
        let mut camera = GigECamera::new(device.clone());

        let err = camera
            .apply_startup_settings(&StartupParameters::new(0.5, 20_000).unwrap())
            .unwrap_err();

        match err {
            CameraError::RegisterAccess {
                operation, node, ..
            } => {
                assert_eq!(operation, "apply_startup_settings");
                assert_eq!(node, "GevSCPSPacketSize");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}

// =============================================================================
// Validation and partial failure
// =============================================================================

mod failures {
    use super::*;

    #[test]
    fn invalid_parameters_write_nothing() {
        let device = MockNodeMap::gige();
        let mut camera = GigECamera::new(device.clone());
        let bad = StartupParameters {
            target_gain: 1.5,
            mtu_size: 3000,
        };

        let err = camera.apply_startup_settings(&bad).unwrap_err();

        assert!(matches!(err, CameraError::Configuration(_)));
        assert!(device.journal().is_empty());
    }

    #[test]
    fn failure_stops_at_the_failing_step_without_rollback() {
        let device = MockNodeMap::gige()
            .with_fault(FaultScenario::always("GainAuto", "Node is locked by auto function"));
        let mut camera = GigECamera::new(device.clone());

        let err = camera.apply_startup_settings(&params(0.5)).unwrap_err();

        assert_eq!(err.device_description(), Some("Node is locked by auto function"));
        // Earlier steps stay applied.
        assert_eq!(device.entry("TriggerMode").as_deref(), Some("On"));
        assert_eq!(device.float("AutoExposureTimeAbsLowerLimit"), Some(35.0));
        // Later steps never ran.
        assert!(writes_to(&device, "GainRaw").is_empty());
        assert!(writes_to(&device, "GevSCPSPacketSize").is_empty());
    }

    #[test]
    #[traced_test]
    fn ranges_are_logged_after_startup() {
        let mut camera = GigECamera::new(gige_with_gain_range(0, 100));

        camera.apply_startup_settings(&params(0.5)).unwrap();

        assert!(logs_contain("Cam has gain range: [0 - 100]"));
        assert!(logs_contain("Initially setting to: 50"));
        assert!(logs_contain("Cam has exposure time range: [35 - 1000000]"));
    }
}
