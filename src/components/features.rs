//! Generic camera feature control.
//!
//! [`CameraDriver`] implements every parameter operation once, against the
//! register table of a [`CameraFamily`]. Family differences (register names,
//! integer vs. float gain, brightness units, missing transport registers)
//! are resolved by the type parameter at compile time.
//!
//! ## Startup order
//!
//! [`CameraDriver::apply_startup_settings`] runs its steps in a fixed order
//! because several settings interact:
//!
//! 1. Load the default user set. This resets volatile state, including the
//!    trigger configuration and any armed sequencer.
//! 2. Software trigger source and trigger mode on. Must follow step 1.
//! 3. Auto-exposure limits from the live exposure range.
//! 4. Auto-gain limits from the live gain range, gain-minimizing auto
//!    profile, gain auto off, gain from the requested fraction.
//! 5. Packet size and inter-packet delay (network transports only).
//!
//! A failure stops the sequence where it happened. Steps already applied
//! stay applied; there is no rollback.

use crate::components::boundary::Guarded;
use crate::components::family::CameraFamily;
use crate::components::node_map::{parse_entry, FloatNode, NodeMap, NumericNode, Register};
use crate::config::StartupParameters;
use crate::error::{CameraError, CameraResult};
use std::marker::PhantomData;

/// Inter-packet delay in timestamp ticks.
///
/// Chosen empirically: lower values lose packets ("the image buffer was
/// incompletely grabbed") on links shared by several cameras or limited
/// hosts.
pub const INTER_PACKET_DELAY_TICKS: i64 = 1000;

/// Exposure registers are in microseconds.
pub(crate) const MICROSECONDS_PER_SECOND: f64 = 1_000_000.0;

/// State of the exposure sequencer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SequencerState {
    /// Sequence mode off; exposure is under direct control.
    #[default]
    Disabled,
    /// Steps are being programmed, or programming failed part-way.
    Configuring,
    /// Sequence enabled; the camera advances one step per trigger.
    Armed,
}

/// Camera controller bound to one family.
///
/// Owns the opened camera for the session. All accessors block until the
/// device answers. One logical owner per camera: concurrent configuration
/// from several threads must be serialized by the caller.
pub struct CameraDriver<F: CameraFamily, M: NodeMap> {
    pub(crate) cam: M,
    pub(crate) sequencer: SequencerState,
    _family: PhantomData<F>,
}

impl<F: CameraFamily, M: NodeMap> std::fmt::Debug for CameraDriver<F, M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CameraDriver")
            .field("family", &F::TYPE_NAME)
            .field("sequencer", &self.sequencer)
            .finish_non_exhaustive()
    }
}

impl<F: CameraFamily, M: NodeMap> CameraDriver<F, M> {
    /// Take ownership of an opened camera.
    pub fn new(cam: M) -> Self {
        tracing::debug!("Creating {} camera driver", F::TYPE_NAME);
        Self {
            cam,
            sequencer: SequencerState::Disabled,
            _family: PhantomData,
        }
    }

    /// Human-readable family identifier, e.g. "GigE".
    pub fn type_name(&self) -> &'static str {
        F::TYPE_NAME
    }

    /// Underlying register map.
    pub fn node_map(&self) -> &M {
        &self.cam
    }

    /// Release the camera back to the caller.
    pub fn into_inner(self) -> M {
        self.cam
    }

    /// Current sequencer state.
    pub fn sequencer_state(&self) -> SequencerState {
        self.sequencer
    }

    // =========================================================================
    // Startup configuration
    // =========================================================================

    /// Bring the camera into a known, software-triggered state.
    ///
    /// See the module documentation for the step order. Any register failure
    /// aborts at that step and the device keeps whatever was already applied.
    pub fn apply_startup_settings(&mut self, params: &StartupParameters) -> CameraResult<()> {
        const OP: &str = "apply_startup_settings";
        params.validate()?;

        let nodes = &F::NODES;
        let cam = &self.cam;

        // Remove all previous settings (sequencer etc.); the default set is free-running.
        nodes.user_set_default.apply(cam).during(OP)?;
        nodes.user_set_load.execute(cam).during(OP)?;
        self.sequencer = SequencerState::Disabled;

        // The default user set overrides the trigger configuration.
        nodes.trigger_source_software.apply(cam).during(OP)?;
        nodes.trigger_mode_on.apply(cam).during(OP)?;

        // Auto-exposure bounds only reject corrupt readings (lamp flicker,
        // motion blur); they follow the connected unit's range.
        let exposure_min = nodes.exposure_time.min(cam).during(OP)?;
        let exposure_max = nodes.exposure_time.max(cam).during(OP)?;
        nodes
            .auto_exposure_lower_limit
            .write(cam, exposure_min)
            .during(OP)?;
        nodes
            .auto_exposure_upper_limit
            .write(cam, exposure_max)
            .during(OP)?;

        let gain_min = F::GAIN.min(cam).during(OP)?;
        let gain_max = F::GAIN.max(cam).during(OP)?;
        F::AUTO_GAIN_LOWER_LIMIT.write(cam, gain_min).during(OP)?;
        F::AUTO_GAIN_UPPER_LIMIT.write(cam, gain_max).during(OP)?;

        // Gain auto and exposure auto may run together only with a profile set.
        nodes
            .auto_function_profile_gain_minimum
            .apply(cam)
            .during(OP)?;
        if let Some(selector) = &nodes.gain_selector_all {
            selector.apply(cam).during(OP)?;
        }
        nodes.gain_auto_off.apply(cam).during(OP)?;
        let gain = gain_in_range::<F::Gain>(gain_min, gain_max, params.target_gain);
        F::GAIN.write(cam, gain).during(OP)?;

        let gain_now = F::GAIN.read(cam).during(OP)?;
        let exposure_now = nodes.exposure_time.read(cam).during(OP)?;
        tracing::info!(
            "Cam has gain range: [{} - {}] measured in device specific units. Initially setting to: {}",
            gain_min,
            gain_max,
            gain_now
        );
        tracing::info!(
            "Cam has exposure time range: [{} - {}] measured in microseconds. Initially setting to: {}",
            exposure_min,
            exposure_max,
            exposure_now
        );

        match &nodes.transport {
            Some(transport) => {
                transport
                    .packet_size
                    .write(cam, i64::from(params.mtu_size))
                    .during(OP)?;
                transport
                    .inter_packet_delay
                    .write(cam, INTER_PACKET_DELAY_TICKS)
                    .during(OP)?;
            }
            None => tracing::debug!(
                "{} cameras have no packet pacing registers; mtu_size {} ignored",
                F::TYPE_NAME,
                params.mtu_size
            ),
        }

        Ok(())
    }

    // =========================================================================
    // Register handles
    // =========================================================================

    /// Exposure time register (microseconds).
    pub fn exposure_time(&self) -> CameraResult<Register<'_, M, FloatNode>> {
        Register::acquire(&self.cam, F::NODES.exposure_time, "exposure_time")
    }

    /// Gain register (device units).
    pub fn gain(&self) -> CameraResult<Register<'_, M, F::Gain>> {
        Register::acquire(&self.cam, F::GAIN, "gain")
    }

    /// Auto-exposure lower limit register (microseconds).
    pub fn auto_exposure_time_lower_limit(&self) -> CameraResult<Register<'_, M, FloatNode>> {
        Register::acquire(
            &self.cam,
            F::NODES.auto_exposure_lower_limit,
            "auto_exposure_time_lower_limit",
        )
    }

    /// Auto-exposure upper limit register (microseconds).
    pub fn auto_exposure_time_upper_limit(&self) -> CameraResult<Register<'_, M, FloatNode>> {
        Register::acquire(
            &self.cam,
            F::NODES.auto_exposure_upper_limit,
            "auto_exposure_time_upper_limit",
        )
    }

    /// Resulting frame rate register (Hz, read-only).
    pub fn resulting_frame_rate(&self) -> CameraResult<Register<'_, M, FloatNode>> {
        Register::acquire(
            &self.cam,
            F::NODES.resulting_frame_rate,
            "resulting_frame_rate",
        )
    }

    /// Auto-function brightness target register (device units).
    pub fn auto_target_brightness(
        &self,
    ) -> CameraResult<Register<'_, M, F::AutoTargetBrightness>> {
        Register::acquire(
            &self.cam,
            F::AUTO_TARGET_BRIGHTNESS,
            "auto_target_brightness",
        )
    }

    // =========================================================================
    // Exposure
    // =========================================================================

    /// Request an exposure time in seconds.
    ///
    /// The device may clamp or quantize the value; read it back with
    /// [`Self::current_exposure`].
    pub fn set_exposure(&self, seconds: f64) -> CameraResult<()> {
        if !seconds.is_finite() || seconds <= 0.0 {
            return Err(CameraError::Configuration(format!(
                "exposure must be positive, got {} s",
                seconds
            )));
        }
        F::NODES
            .exposure_time
            .write(&self.cam, seconds * MICROSECONDS_PER_SECOND)
            .during("set_exposure")
    }

    /// Exposure time currently applied, in seconds.
    pub fn current_exposure(&self) -> CameraResult<f64> {
        Ok(self.exposure_time()?.value()? / MICROSECONDS_PER_SECOND)
    }

    /// Exposure range of the connected unit, in seconds.
    pub fn exposure_range(&self) -> CameraResult<(f64, f64)> {
        let register = self.exposure_time()?;
        Ok((
            register.min()? / MICROSECONDS_PER_SECOND,
            register.max()? / MICROSECONDS_PER_SECOND,
        ))
    }

    /// Auto-exposure lower limit, in seconds.
    pub fn current_auto_exposure_time_lower_limit(&self) -> CameraResult<f64> {
        Ok(self.auto_exposure_time_lower_limit()?.value()? / MICROSECONDS_PER_SECOND)
    }

    /// Auto-exposure upper limit, in seconds.
    pub fn current_auto_exposure_time_upper_limit(&self) -> CameraResult<f64> {
        Ok(self.auto_exposure_time_upper_limit()?.value()? / MICROSECONDS_PER_SECOND)
    }

    /// Set both auto-exposure limits, in seconds.
    pub fn set_auto_exposure_time_limits(&self, lower: f64, upper: f64) -> CameraResult<()> {
        const OP: &str = "set_auto_exposure_time_limits";
        if !(lower > 0.0 && lower <= upper) || !upper.is_finite() {
            return Err(CameraError::Configuration(format!(
                "auto exposure limits must satisfy 0 < lower <= upper, got [{}, {}]",
                lower, upper
            )));
        }
        let nodes = &F::NODES;
        nodes
            .auto_exposure_lower_limit
            .write(&self.cam, lower * MICROSECONDS_PER_SECOND)
            .during(OP)?;
        nodes
            .auto_exposure_upper_limit
            .write(&self.cam, upper * MICROSECONDS_PER_SECOND)
            .during(OP)
    }

    /// Select the auto-exposure mode.
    pub fn set_exposure_auto(&self, mode: F::ExposureAuto) -> CameraResult<()> {
        F::NODES
            .exposure_auto
            .write(&self.cam, mode)
            .during("set_exposure_auto")
    }

    /// Current auto-exposure mode.
    pub fn exposure_auto(&self) -> CameraResult<F::ExposureAuto> {
        let node = F::NODES.exposure_auto;
        parse_entry(node, node.read_entry(&self.cam).during("exposure_auto")?)
    }

    // =========================================================================
    // Gain
    // =========================================================================

    /// Gain currently applied, in device units.
    pub fn current_gain(&self) -> CameraResult<<F::Gain as NumericNode>::Value> {
        self.gain()?.value()
    }

    /// Set gain in device units.
    pub fn set_gain(&self, value: <F::Gain as NumericNode>::Value) -> CameraResult<()> {
        F::GAIN.write(&self.cam, value).during("set_gain")
    }

    /// Set gain as a fraction of the live gain range.
    ///
    /// Returns the value written, in device units.
    pub fn set_gain_fraction(
        &self,
        fraction: f64,
    ) -> CameraResult<<F::Gain as NumericNode>::Value> {
        const OP: &str = "set_gain_fraction";
        if !(0.0..=1.0).contains(&fraction) {
            return Err(CameraError::Configuration(format!(
                "gain fraction must lie in [0, 1], got {}",
                fraction
            )));
        }
        let min = F::GAIN.min(&self.cam).during(OP)?;
        let max = F::GAIN.max(&self.cam).during(OP)?;
        let value = gain_in_range::<F::Gain>(min, max, fraction);
        F::GAIN.write(&self.cam, value).during(OP)?;
        Ok(value)
    }

    // =========================================================================
    // Frame rate and brightness
    // =========================================================================

    /// Frame rate the current configuration results in, in Hz.
    pub fn current_resulting_frame_rate(&self) -> CameraResult<f64> {
        self.resulting_frame_rate()?.value()
    }

    /// Brightness target of the auto functions, in device units.
    pub fn current_auto_target_brightness(&self) -> CameraResult<F::BrightnessValue> {
        self.auto_target_brightness()?.value()
    }

    /// Set the auto-function brightness target from an 8-bit value (0-255).
    ///
    /// The converted value is clamped to the register's range; the value
    /// actually written is returned.
    pub fn set_auto_target_brightness(&self, brightness: i32) -> CameraResult<F::BrightnessValue> {
        const OP: &str = "set_auto_target_brightness";
        let node = F::AUTO_TARGET_BRIGHTNESS;
        let requested = F::convert_brightness(brightness);
        let min = node.min(&self.cam).during(OP)?;
        let max = node.max(&self.cam).during(OP)?;

        let target = if requested < min {
            min
        } else if requested > max {
            max
        } else {
            requested
        };
        if target != requested {
            tracing::warn!(
                "Brightness {} ({} in device units) outside [{} - {}], using {}",
                brightness,
                requested,
                min,
                max,
                target
            );
        }

        node.write(&self.cam, target).during(OP)?;
        Ok(target)
    }

    // =========================================================================
    // Image format, shutter and digital I/O
    // =========================================================================

    /// Current pixel format.
    pub fn pixel_format(&self) -> CameraResult<F::PixelFormat> {
        let node = F::NODES.pixel_format;
        parse_entry(node, node.read_entry(&self.cam).during("pixel_format")?)
    }

    /// Select a pixel format.
    pub fn set_pixel_format(&self, format: F::PixelFormat) -> CameraResult<()> {
        F::NODES
            .pixel_format
            .write(&self.cam, format)
            .during("set_pixel_format")
    }

    /// Bit depth of the current pixel format.
    pub fn pixel_size(&self) -> CameraResult<F::PixelSize> {
        let node = F::NODES.pixel_size;
        parse_entry(node, node.read_entry(&self.cam).during("pixel_size")?)
    }

    /// Current shutter mode.
    pub fn shutter_mode(&self) -> CameraResult<F::ShutterMode> {
        let node = F::NODES.shutter_mode;
        parse_entry(node, node.read_entry(&self.cam).during("shutter_mode")?)
    }

    /// Select a shutter mode.
    pub fn set_shutter_mode(&self, mode: F::ShutterMode) -> CameraResult<()> {
        F::NODES
            .shutter_mode
            .write(&self.cam, mode)
            .during("set_shutter_mode")
    }

    /// Drive a digital output line high or low.
    pub fn set_user_output(&self, line: F::UserOutputSelector, value: bool) -> CameraResult<()> {
        const OP: &str = "set_user_output";
        let nodes = &F::NODES;
        nodes.user_output_selector.write(&self.cam, line).during(OP)?;
        nodes.user_output_value.write(&self.cam, value).during(OP)?;
        tracing::debug!("{} output {:?} set to {}", F::TYPE_NAME, line, value);
        Ok(())
    }
}

/// `min + fraction * (max - min)` in the register's native type.
fn gain_in_range<N: NumericNode>(min: N::Value, max: N::Value, fraction: f64) -> N::Value {
    let min = N::to_f64(min);
    let max = N::to_f64(max);
    N::from_f64(min + fraction * (max - min))
}
