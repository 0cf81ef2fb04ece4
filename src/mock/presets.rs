//! Register tables of typical devices.
//!
//! Ranges follow a mid-range monochrome sensor of each family. Every preset
//! loads the factory default user set at power-on: free-running trigger,
//! continuous gain auto, sequencer off.

use crate::components::node_map::AccessMode;
use crate::mock::node_map::MockNodeMap;

const EXPOSURE_AUTO: &[&str] = &["Off", "Once", "Continuous"];
const GAIN_AUTO: &[&str] = &["Continuous", "Once", "Off"];
const TRIGGER_MODE: &[&str] = &["Off", "On"];
const SHUTTER_MODE: &[&str] = &["Global", "Rolling", "GlobalResetRelease"];

impl MockNodeMap {
    /// A GigE camera with integer gain, packet pacing and a step sequencer.
    pub fn gige() -> Self {
        MockNodeMap::new()
            .with_float("ExposureTimeAbs", 10_000.0, 35.0, 1_000_000.0)
            .with_float("AutoExposureTimeAbsLowerLimit", 35.0, 35.0, 1_000_000.0)
            .with_float("AutoExposureTimeAbsUpperLimit", 1_000_000.0, 35.0, 1_000_000.0)
            .with_float("ResultingFrameRateAbs", 30.0, 0.0, 1_000.0)
            .with_access("ResultingFrameRateAbs", AccessMode::ReadOnly)
            .with_integer("GainRaw", 0, 0, 360)
            .with_integer("AutoGainRawLowerLimit", 0, 0, 360)
            .with_integer("AutoGainRawUpperLimit", 360, 0, 360)
            .with_integer("AutoTargetValue", 128, 50, 205)
            .with_enumeration("UserSetSelector", &["Default", "UserSet1", "UserSet2"])
            .with_user_set_load("UserSetLoad")
            .with_enumeration("TriggerSource", &["Line1", "Line2", "Software"])
            .with_enumeration("TriggerMode", TRIGGER_MODE)
            .with_enumeration("AutoFunctionProfile", &["ExposureMinimum", "GainMinimum"])
            .with_enumeration("GainSelector", &["AnalogAll", "DigitalAll"])
            .with_enumeration("GainAuto", GAIN_AUTO)
            .with_enumeration("ExposureAuto", EXPOSURE_AUTO)
            .with_enumeration(
                "PixelFormat",
                &["Mono8", "Mono12", "Mono12Packed", "Mono16"],
            )
            .with_enumeration("PixelSize", &["Bpp8", "Bpp12", "Bpp16"])
            .with_access("PixelSize", AccessMode::ReadOnly)
            .with_enumeration("ShutterMode", SHUTTER_MODE)
            .with_enumeration(
                "UserOutputSelector",
                &["UserOutput1", "UserOutput2", "UserOutput3", "UserOutput4"],
            )
            .with_boolean("UserOutputValue", false)
            .with_integer("GevSCPSPacketSize", 1500, 220, 16_404)
            .with_integer("GevSCPD", 0, 0, 65_535)
            .with_boolean("SequenceEnable", false)
            .with_enumeration("SequenceAdvanceMode", &["Auto", "Controlled", "FreeSelection"])
            .with_integer("SequenceSetTotalNumber", 1, 1, 64)
            .with_integer("SequenceSetIndex", 0, 0, 63)
            .with_command("SequenceSetStore")
            .with_write_lock(
                "SequenceEnable",
                &[
                    "ExposureTimeAbs",
                    "SequenceAdvanceMode",
                    "SequenceSetTotalNumber",
                    "SequenceSetIndex",
                    "SequenceSetStore",
                ],
            )
    }

    /// A USB3 camera with float gain and no packet pacing or sequencer.
    pub fn usb() -> Self {
        MockNodeMap::new()
            .with_float("ExposureTime", 5_000.0, 21.0, 10_000_000.0)
            .with_float("AutoExposureTimeLowerLimit", 21.0, 21.0, 10_000_000.0)
            .with_float("AutoExposureTimeUpperLimit", 10_000_000.0, 21.0, 10_000_000.0)
            .with_float("ResultingFrameRate", 60.0, 0.0, 1_000.0)
            .with_access("ResultingFrameRate", AccessMode::ReadOnly)
            .with_float("Gain", 0.0, 0.0, 24.0)
            .with_float("AutoGainLowerLimit", 0.0, 0.0, 24.0)
            .with_float("AutoGainUpperLimit", 24.0, 0.0, 24.0)
            .with_float("AutoTargetBrightness", 0.30196, 0.19608, 0.80392)
            .with_enumeration("UserSetSelector", &["Default", "UserSet1"])
            .with_user_set_load("UserSetLoad")
            .with_enumeration("TriggerSource", &["Line1", "Software"])
            .with_enumeration("TriggerMode", TRIGGER_MODE)
            .with_enumeration(
                "AutoFunctionProfile",
                &["MinimizeExposureTime", "MinimizeGain"],
            )
            .with_enumeration("GainSelector", &["All"])
            .with_enumeration("GainAuto", GAIN_AUTO)
            .with_enumeration("ExposureAuto", EXPOSURE_AUTO)
            .with_enumeration(
                "PixelFormat",
                &["Mono8", "Mono10", "Mono10p", "Mono12", "Mono12p"],
            )
            .with_enumeration("PixelSize", &["Bpp8", "Bpp10", "Bpp12"])
            .with_access("PixelSize", AccessMode::ReadOnly)
            .with_enumeration("ShutterMode", SHUTTER_MODE)
            .with_enumeration(
                "UserOutputSelector",
                &["UserOutput1", "UserOutput2", "UserOutput3"],
            )
            .with_boolean("UserOutputValue", false)
    }
}
