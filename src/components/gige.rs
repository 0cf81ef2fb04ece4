//! GigE Vision camera family.
//!
//! Gain and brightness are raw integer registers, exposure is the absolute
//! exposure register in microseconds, and the streaming channel exposes
//! packet size and inter-packet delay. Brightness values are already in
//! device units.

use crate::components::family::{CameraFamily, FamilyNodes, SequencerNodes, TransportNodes};
use crate::components::node_map::{
    BooleanNode, CommandNode, EnumSetting, EnumerationNode, FloatNode, IntegerNode,
};

/// GigE camera family binding.
#[derive(Debug, Clone, Copy, Default)]
pub struct GigE;

crate::node_enum! {
    /// Exposure auto function mode.
    pub enum ExposureAuto {
        Off => "Off",
        Once => "Once",
        Continuous => "Continuous",
    }
}

crate::node_enum! {
    /// Pixel formats offered over GigE.
    pub enum PixelFormat {
        Mono8 => "Mono8",
        Mono12 => "Mono12",
        Mono12Packed => "Mono12Packed",
        Mono16 => "Mono16",
        BayerRG8 => "BayerRG8",
        BayerBG8 => "BayerBG8",
        BayerRG12 => "BayerRG12",
        Rgb8Packed => "RGB8Packed",
        Yuv422Packed => "YUV422Packed",
    }
}

crate::node_enum! {
    /// Bits per pixel of the current pixel format.
    pub enum PixelSize {
        Bpp8 => "Bpp8",
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
        UserOutput4 => "UserOutput4",
    }
}

impl CameraFamily for GigE {
    const TYPE_NAME: &'static str = "GigE";

    type ExposureAuto = ExposureAuto;
    type PixelFormat = PixelFormat;
    type PixelSize = PixelSize;
    type ShutterMode = ShutterMode;
    type UserOutputSelector = UserOutputSelector;

    type Gain = IntegerNode;
    type AutoTargetBrightness = IntegerNode;
    type BrightnessValue = i64;

    const GAIN: IntegerNode = IntegerNode("GainRaw");
    const AUTO_GAIN_LOWER_LIMIT: IntegerNode = IntegerNode("AutoGainRawLowerLimit");
    const AUTO_GAIN_UPPER_LIMIT: IntegerNode = IntegerNode("AutoGainRawUpperLimit");
    const AUTO_TARGET_BRIGHTNESS: IntegerNode = IntegerNode("AutoTargetValue");

    const NODES: FamilyNodes = FamilyNodes {
        exposure_time: FloatNode("ExposureTimeAbs"),
        auto_exposure_lower_limit: FloatNode("AutoExposureTimeAbsLowerLimit"),
        auto_exposure_upper_limit: FloatNode("AutoExposureTimeAbsUpperLimit"),
        resulting_frame_rate: FloatNode("ResultingFrameRateAbs"),

        user_set_default: EnumSetting::new("UserSetSelector", "Default"),
        user_set_load: CommandNode("UserSetLoad"),
        trigger_source_software: EnumSetting::new("TriggerSource", "Software"),
        trigger_mode_on: EnumSetting::new("TriggerMode", "On"),

        auto_function_profile_gain_minimum: EnumSetting::new("AutoFunctionProfile", "GainMinimum"),
        gain_selector_all: Some(EnumSetting::new("GainSelector", "AnalogAll")),
        gain_auto_off: EnumSetting::new("GainAuto", "Off"),

        exposure_auto: EnumerationNode("ExposureAuto"),
        pixel_format: EnumerationNode("PixelFormat"),
        pixel_size: EnumerationNode("PixelSize"),
        shutter_mode: EnumerationNode("ShutterMode"),
        user_output_selector: EnumerationNode("UserOutputSelector"),
        user_output_value: BooleanNode("UserOutputValue"),

        transport: Some(TransportNodes {
            packet_size: IntegerNode("GevSCPSPacketSize"),
            inter_packet_delay: IntegerNode("GevSCPD"),
        }),
        sequencer: Some(SequencerNodes {
            enable: BooleanNode("SequenceEnable"),
            advance_mode_auto: EnumSetting::new("SequenceAdvanceMode", "Auto"),
            total_number: IntegerNode("SequenceSetTotalNumber"),
            set_index: IntegerNode("SequenceSetIndex"),
            set_store: CommandNode("SequenceSetStore"),
        }),
    };

    fn convert_brightness(value: i32) -> i64 {
        i64::from(value)
    }
}
