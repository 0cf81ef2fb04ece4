//! USB3 Vision camera family.
//!
//! Gain is a float register in dB and the brightness target is a float in
//! [0, 1], so 8-bit brightness values are scaled down by 255. USB3 devices
//! have no streaming-channel packet registers and no step sequencer in this
//! binding.

use crate::components::family::{CameraFamily, FamilyNodes};
use crate::components::node_map::{
    BooleanNode, CommandNode, EnumSetting, EnumerationNode, FloatNode,
};

/// USB3 camera family binding.
#[derive(Debug, Clone, Copy, Default)]
pub struct Usb;

crate::node_enum! {
    /// Exposure auto function mode.
    pub enum ExposureAuto {
        Off => "Off",
        Once => "Once",
        Continuous => "Continuous",
    }
}

crate::node_enum! {
    /// Pixel formats offered over USB3 (PFNC names).
    pub enum PixelFormat {
        Mono8 => "Mono8",
        Mono10 => "Mono10",
        Mono10p => "Mono10p",
        Mono12 => "Mono12",
        Mono12p => "Mono12p",
        BayerRG8 => "BayerRG8",
        BayerRG12 => "BayerRG12",
        Rgb8 => "RGB8",
        Bgr8 => "BGR8",
        YCbCr422 => "YCbCr422_8",
    }
}

crate::node_enum! {
    /// Bits per pixel of the current pixel format.
    pub enum PixelSize {
        Bpp8 => "Bpp8",
        Bpp10 => "Bpp10",
        Bpp12 => "Bpp12",
        Bpp16 => "Bpp16",
        Bpp24 => "Bpp24",
    }
}

crate::node_enum! {
    /// Sensor shutter mode.
    pub enum ShutterMode {
        Global => "Global",
        Rolling => "Rolling",
        GlobalResetRelease => "GlobalResetRelease",
    }
}

crate::node_enum! {
    /// Digital output lines.
    pub enum UserOutputSelector {
        UserOutput1 => "UserOutput1",
        UserOutput2 => "UserOutput2",
        UserOutput3 => "UserOutput3",
    }
}

impl CameraFamily for Usb {
    const TYPE_NAME: &'static str = "USB";

    type ExposureAuto = ExposureAuto;
    type PixelFormat = PixelFormat;
    type PixelSize = PixelSize;
    type ShutterMode = ShutterMode;
    type UserOutputSelector = UserOutputSelector;

    type Gain = FloatNode;
    type AutoTargetBrightness = FloatNode;
    type BrightnessValue = f64;

    const GAIN: FloatNode = FloatNode("Gain");
    const AUTO_GAIN_LOWER_LIMIT: FloatNode = FloatNode("AutoGainLowerLimit");
    const AUTO_GAIN_UPPER_LIMIT: FloatNode = FloatNode("AutoGainUpperLimit");
    const AUTO_TARGET_BRIGHTNESS: FloatNode = FloatNode("AutoTargetBrightness");

    const NODES: FamilyNodes = FamilyNodes {
        exposure_time: FloatNode("ExposureTime"),
        auto_exposure_lower_limit: FloatNode("AutoExposureTimeLowerLimit"),
        auto_exposure_upper_limit: FloatNode("AutoExposureTimeUpperLimit"),
        resulting_frame_rate: FloatNode("ResultingFrameRate"),

        user_set_default: EnumSetting::new("UserSetSelector", "Default"),
        user_set_load: CommandNode("UserSetLoad"),
        trigger_source_software: EnumSetting::new("TriggerSource", "Software"),
        trigger_mode_on: EnumSetting::new("TriggerMode", "On"),

        auto_function_profile_gain_minimum: EnumSetting::new(
            "AutoFunctionProfile",
            "MinimizeGain",
        ),
        gain_selector_all: Some(EnumSetting::new("GainSelector", "All")),
        gain_auto_off: EnumSetting::new("GainAuto", "Off"),

        exposure_auto: EnumerationNode("ExposureAuto"),
        pixel_format: EnumerationNode("PixelFormat"),
        pixel_size: EnumerationNode("PixelSize"),
        shutter_mode: EnumerationNode("ShutterMode"),
        user_output_selector: EnumerationNode("UserOutputSelector"),
        user_output_value: BooleanNode("UserOutputValue"),

        transport: None,
        sequencer: None,
    };

    fn convert_brightness(value: i32) -> f64 {
        f64::from(value) / 255.0
    }
}
