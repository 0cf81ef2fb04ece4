#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs
)]
//! Parameter accessors and the exception boundary.

mod common;

use camera_control::components::gige::{
    ExposureAuto, PixelFormat, PixelSize, ShutterMode, UserOutputSelector,
};
use camera_control::error::AccessErrorKind;
use camera_control::mock::{Access, FaultScenario, MockNodeMap, Value};
use camera_control::{AccessMode, CameraError, GigECamera};
use common::{started_gige, writes_to};
use tracing_test::traced_test;

// =============================================================================
// Exception boundary
// =============================================================================

mod boundary {
    use super::*;

    #[test]
    #[traced_test]
    fn failing_getter_logs_operation_and_description() {
        let (camera, device) = started_gige(MockNodeMap::gige());
        device.inject_fault(FaultScenario::always("ExposureTimeAbs", "GenICam timeout"));

        let err = camera.current_exposure().unwrap_err();

        match &err {
            CameraError::RegisterAccess {
                operation,
                node,
                description,
                ..
            } => {
                assert_eq!(*operation, "exposure_time");
                assert_eq!(node, "ExposureTimeAbs");
                assert_eq!(description, "GenICam timeout");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(logs_contain("exposure_time"));
        assert!(logs_contain("GenICam timeout"));
    }

    #[test]
    fn gain_getter_failure_is_an_error() {
        let (camera, device) = started_gige(MockNodeMap::gige());
        device.inject_fault(FaultScenario::always("GainRaw", "Node is not readable"));

        assert!(camera.current_gain().is_err());
        assert!(camera.gain().unwrap().value().is_err());
    }

    #[test]
    fn unreadable_register_cannot_be_acquired() {
        let (camera, device) = started_gige(MockNodeMap::gige());
        device.set_access("AutoTargetValue", AccessMode::NotAvailable);

        let err = camera.auto_target_brightness().unwrap_err();

        assert!(matches!(
            err,
            CameraError::RegisterAccess {
                operation: "auto_target_brightness",
                kind: AccessErrorKind::NotAvailable,
                ..
            }
        ));
    }

    #[test]
    #[traced_test]
    fn lost_device_is_reported_on_every_access() {
        let (camera, device) = started_gige(MockNodeMap::gige());
        device.inject_fault(FaultScenario::Disconnect { count: 0 });

        let err = camera.set_gain(10).unwrap_err();
        assert!(matches!(
            err,
            CameraError::RegisterAccess {
                kind: AccessErrorKind::Disconnected,
                ..
            }
        ));
        assert!(camera.current_resulting_frame_rate().is_err());
        assert!(logs_contain("lost contact with the device"));
    }
}

// =============================================================================
// Exposure
// =============================================================================

mod exposure {
    use super::*;

    #[test]
    fn exposure_is_written_in_microseconds() {
        let (camera, device) = started_gige(MockNodeMap::gige());

        camera.set_exposure(0.02).unwrap();

        assert_eq!(device.float("ExposureTimeAbs"), Some(20_000.0));
        assert_eq!(camera.current_exposure().unwrap(), 0.02);
        assert_eq!(camera.exposure_range().unwrap(), (35.0 / 1e6, 1.0));
    }

    #[test]
    fn non_positive_exposure_is_rejected_without_writes() {
        let (camera, device) = started_gige(MockNodeMap::gige());

        assert!(matches!(
            camera.set_exposure(0.0),
            Err(CameraError::Configuration(_))
        ));
        assert!(camera.set_exposure(f64::NAN).is_err());
        assert!(device.journal().is_empty());
    }

    #[test]
    fn auto_exposure_limits_and_mode() {
        let (camera, device) = started_gige(MockNodeMap::gige());

        camera.set_auto_exposure_time_limits(0.001, 0.5).unwrap();
        camera.set_exposure_auto(ExposureAuto::Continuous).unwrap();

        assert_eq!(camera.current_auto_exposure_time_lower_limit().unwrap(), 0.001);
        assert_eq!(camera.current_auto_exposure_time_upper_limit().unwrap(), 0.5);
        assert_eq!(camera.exposure_auto().unwrap(), ExposureAuto::Continuous);
        assert_eq!(
            device.entry("ExposureAuto").as_deref(),
            Some("Continuous")
        );
        assert!(camera.set_auto_exposure_time_limits(0.5, 0.001).is_err());
    }

    #[test]
    fn frame_rate_is_read_only() {
        let (camera, _device) = started_gige(MockNodeMap::gige());

        assert_eq!(camera.current_resulting_frame_rate().unwrap(), 30.0);
        let register = camera.resulting_frame_rate().unwrap();
        assert!(!register.is_writable());
        assert!(register.set_value(60.0).is_err());
    }
}

// =============================================================================
// Gain and brightness
// =============================================================================

mod gain_and_brightness {
    use super::*;

    #[test]
    fn gain_fraction_and_raw_gain() {
        let (camera, device) = started_gige(MockNodeMap::gige());

        assert_eq!(camera.set_gain_fraction(0.25).unwrap(), 90);
        assert_eq!(device.integer("GainRaw"), Some(90));

        camera.set_gain(200).unwrap();
        assert_eq!(camera.current_gain().unwrap(), 200);

        assert!(matches!(
            camera.set_gain_fraction(1.1),
            Err(CameraError::Configuration(_))
        ));
    }

    #[test]
    fn register_handle_exposes_range() {
        let (camera, _device) = started_gige(MockNodeMap::gige());

        let gain = camera.gain().unwrap();
        assert_eq!(gain.name(), "GainRaw");
        assert_eq!((gain.min().unwrap(), gain.max().unwrap()), (0, 360));
        gain.set_value(12).unwrap();
        assert_eq!(gain.value().unwrap(), 12);
    }

    #[test]
    fn brightness_passes_through_in_range() {
        let (camera, device) = started_gige(MockNodeMap::gige());

        assert_eq!(camera.set_auto_target_brightness(100).unwrap(), 100);
        assert_eq!(device.integer("AutoTargetValue"), Some(100));
        assert_eq!(camera.current_auto_target_brightness().unwrap(), 100);
    }

    #[test]
    #[traced_test]
    fn brightness_outside_register_range_is_clamped() {
        let (camera, device) = started_gige(MockNodeMap::gige());

        assert_eq!(camera.set_auto_target_brightness(255).unwrap(), 205);
        assert_eq!(camera.set_auto_target_brightness(0).unwrap(), 50);
        assert_eq!(
            writes_to(&device, "AutoTargetValue"),
            vec![Value::Integer(205), Value::Integer(50)]
        );
        assert!(logs_contain("outside [50 - 205]"));
    }
}

// =============================================================================
// Image format, shutter, digital output
// =============================================================================

mod image_and_io {
    use super::*;

    #[test]
    fn pixel_format_and_size() {
        let (camera, _device) = started_gige(MockNodeMap::gige());

        camera.set_pixel_format(PixelFormat::Mono12).unwrap();
        assert_eq!(camera.pixel_format().unwrap(), PixelFormat::Mono12);
        assert_eq!(camera.pixel_size().unwrap(), PixelSize::Bpp8);

        // Offered by the binding, not by this unit.
        let err = camera.set_pixel_format(PixelFormat::BayerRG8).unwrap_err();
        assert!(matches!(
            err,
            CameraError::RegisterAccess {
                kind: AccessErrorKind::OutOfRange,
                ..
            }
        ));
    }

    #[test]
    fn unknown_entry_from_device() {
        let device = MockNodeMap::gige().with_enumeration("PixelFormat", &["Mono10", "Mono8"]);
        let (camera, _device) = started_gige(device);

        let err = camera.pixel_format().unwrap_err();

        match err {
            CameraError::UnknownEntry { node, entry } => {
                assert_eq!(node, "PixelFormat");
                assert_eq!(entry, "Mono10");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn shutter_mode_round_trip() {
        let (camera, _device) = started_gige(MockNodeMap::gige());

        assert_eq!(camera.shutter_mode().unwrap(), ShutterMode::Global);
        camera.set_shutter_mode(ShutterMode::Rolling).unwrap();
        assert_eq!(camera.shutter_mode().unwrap(), ShutterMode::Rolling);
    }

    #[test]
    fn user_output_selects_line_before_value() {
        let (camera, device) = started_gige(MockNodeMap::gige());

        camera
            .set_user_output(UserOutputSelector::UserOutput3, true)
            .unwrap();

        assert_eq!(
            device.journal(),
            vec![
                Access::Write {
                    node: "UserOutputSelector".into(),
                    value: Value::Entry("UserOutput3".into()),
                },
                Access::Write {
                    node: "UserOutputValue".into(),
                    value: Value::Boolean(true),
                },
            ]
        );
    }

    #[test]
    fn controller_releases_the_device() {
        let camera = GigECamera::new(MockNodeMap::gige());
        assert_eq!(camera.type_name(), "GigE");
        let device = camera.into_inner();
        assert_eq!(device.entry("TriggerMode").as_deref(), Some("Off"));
    }
}
