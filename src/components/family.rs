//! Camera family capability bindings.
//!
//! Each transport family (GigE, USB3) offers the same capabilities under
//! different register names, units and value types. A family is a zero-sized
//! type implementing [`CameraFamily`]; the generic controller is instantiated
//! over it, so every register lookup is resolved at compile time and one
//! controller can never switch families during its lifetime.
//!
//! The binding is a mapping table only: no I/O and no failure modes.

use crate::components::node_map::{
    BooleanNode, CommandNode, EnumSetting, EnumerationNode, FloatNode, IntegerNode, NodeEnum,
    NumericNode,
};
use std::fmt::{Debug, Display};

/// Static description of one camera family.
pub trait CameraFamily: Send + Sync + 'static {
    /// Human-readable family identifier.
    const TYPE_NAME: &'static str;

    /// Auto-exposure mode entries.
    type ExposureAuto: NodeEnum;
    /// Pixel format entries.
    type PixelFormat: NodeEnum;
    /// Pixel size (bit depth) entries.
    type PixelSize: NodeEnum;
    /// Sensor shutter mode entries.
    type ShutterMode: NodeEnum;
    /// Digital output line selector entries.
    type UserOutputSelector: NodeEnum;

    /// Register type used for gain and the auto-gain limits.
    type Gain: NumericNode;
    /// Register type used for the auto-function brightness target.
    type AutoTargetBrightness: NumericNode<Value = Self::BrightnessValue>;
    /// Device units of the brightness target.
    type BrightnessValue: Copy + PartialOrd + Debug + Display;

    /// Gain register.
    const GAIN: Self::Gain;
    /// Lower bound used by the camera's gain auto function.
    const AUTO_GAIN_LOWER_LIMIT: Self::Gain;
    /// Upper bound used by the camera's gain auto function.
    const AUTO_GAIN_UPPER_LIMIT: Self::Gain;
    /// Brightness target register of the auto functions.
    const AUTO_TARGET_BRIGHTNESS: Self::AutoTargetBrightness;

    /// Remaining register names.
    const NODES: FamilyNodes;

    /// Convert an 8-bit brightness value (0-255) into device units.
    fn convert_brightness(value: i32) -> Self::BrightnessValue;
}

/// Register names shared by every family, with family-specific spelling.
#[derive(Debug, Clone, Copy)]
pub struct FamilyNodes {
    /// Exposure time in microseconds.
    pub exposure_time: FloatNode,
    /// Auto-exposure lower limit in microseconds.
    pub auto_exposure_lower_limit: FloatNode,
    /// Auto-exposure upper limit in microseconds.
    pub auto_exposure_upper_limit: FloatNode,
    /// Frame rate the current configuration results in, in Hz.
    pub resulting_frame_rate: FloatNode,

    /// Selects the factory default user set.
    pub user_set_default: EnumSetting,
    /// Loads the selected user set.
    pub user_set_load: CommandNode,
    /// Trigger source set to software.
    pub trigger_source_software: EnumSetting,
    /// Trigger mode switched on.
    pub trigger_mode_on: EnumSetting,

    /// Auto-function profile that prefers keeping gain low.
    pub auto_function_profile_gain_minimum: EnumSetting,
    /// Gain channel selection, when the family has a gain selector.
    pub gain_selector_all: Option<EnumSetting>,
    /// Gain auto switched off.
    pub gain_auto_off: EnumSetting,

    /// Auto-exposure mode.
    pub exposure_auto: EnumerationNode,
    /// Pixel format.
    pub pixel_format: EnumerationNode,
    /// Pixel size (read-only on most devices).
    pub pixel_size: EnumerationNode,
    /// Shutter mode.
    pub shutter_mode: EnumerationNode,
    /// Digital output selector.
    pub user_output_selector: EnumerationNode,
    /// Value of the selected digital output.
    pub user_output_value: BooleanNode,

    /// Network packet pacing, for network transports only.
    pub transport: Option<TransportNodes>,
    /// Exposure sequencer, when the family supports it.
    pub sequencer: Option<SequencerNodes>,
}

/// Streaming channel packet registers of a network transport.
#[derive(Debug, Clone, Copy)]
pub struct TransportNodes {
    /// Packet size in bytes.
    pub packet_size: IntegerNode,
    /// Delay between packets in timestamp ticks.
    pub inter_packet_delay: IntegerNode,
}

/// Sequencer registers.
#[derive(Debug, Clone, Copy)]
pub struct SequencerNodes {
    /// Enables sequence mode. Must be false while programming steps.
    pub enable: BooleanNode,
    /// Advance mode set to automatic (one step per trigger).
    pub advance_mode_auto: EnumSetting,
    /// Number of steps in the sequence.
    pub total_number: IntegerNode,
    /// Step currently selected for programming.
    pub set_index: IntegerNode,
    /// Stores the current configuration into the selected step.
    pub set_store: CommandNode,
}

/// Declare an enumeration whose variants map 1:1 onto register entries.
///
/// ```ignore
/// node_enum! {
///     /// Shutter mode
///     pub enum ShutterMode {
///         Global => "Global",
///         Rolling => "Rolling",
///     }
/// }
/// ```
#[macro_export]
macro_rules! node_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $entry:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every variant, in declaration order.
            pub const ALL: &'static [$name] = &[$( $name::$variant ),+];
        }

        impl $crate::components::node_map::NodeEnum for $name {
            fn entry(&self) -> &'static str {
                match self {
                    $( $name::$variant => $entry ),+
                }
            }

            fn from_entry(entry: &str) -> Option<Self> {
                match entry {
                    $( $entry => Some($name::$variant), )+
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str($crate::components::node_map::NodeEnum::entry(self))
            }
        }
    };
}
