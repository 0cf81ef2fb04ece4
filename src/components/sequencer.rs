//! Exposure sequencer.
//!
//! Programs a finite list of exposure times into the camera's sequence
//! memory; once armed, each trigger advances the camera to the next step.
//!
//! ```text
//!  Disabled ──(enable register writable)──▶ Configuring ──(all steps stored)──▶ Armed
//!     ▲                                          │
//!     └────────── disable_sequencer ◀────────────┴── (failure: stays Configuring)
//! ```
//!
//! The device has a single "currently selected step" register, so steps are
//! programmed strictly in order: select, program, store.

use crate::components::boundary::Guarded;
use crate::components::family::{CameraFamily, SequencerNodes};
use crate::components::features::{CameraDriver, SequencerState, MICROSECONDS_PER_SECOND};
use crate::components::node_map::{Node, NodeMap, NumericNode};
use crate::error::{CameraError, CameraResult};

impl<F: CameraFamily, M: NodeMap> CameraDriver<F, M> {
    /// Program `exposure_times` (seconds) as a sequence and arm it.
    ///
    /// Returns the exposure time the device actually applied for each step,
    /// read back right after the step was programmed. The device may have
    /// clamped or quantized the request, so compare against the returned
    /// values, not the input.
    ///
    /// On a precondition failure the sequencer stays [`SequencerState::Disabled`]
    /// and nothing is written. On a register failure while programming it
    /// stays [`SequencerState::Configuring`]: the device holds a partial
    /// sequence and is neither disabled nor armed.
    pub fn setup_sequencer(&mut self, exposure_times: &[f64]) -> CameraResult<Vec<f64>> {
        const OP: &str = "setup_sequencer";

        let nodes = self.sequencer_nodes(OP)?;
        validate_exposure_times(exposure_times)?;

        if !self.cam.is_writable(nodes.enable.name()) {
            tracing::error!("Sequence mode not enabled.");
            return Err(CameraError::Precondition {
                operation: OP,
                reason: format!("'{}' is not writable", nodes.enable.name()),
            });
        }

        nodes.enable.write(&self.cam, false).during(OP)?;
        self.sequencer = SequencerState::Configuring;

        nodes.advance_mode_auto.apply(&self.cam).during(OP)?;
        nodes
            .total_number
            .write(&self.cam, exposure_times.len() as i64)
            .during(OP)?;

        let mut applied = Vec::with_capacity(exposure_times.len());
        for (index, &requested) in exposure_times.iter().enumerate() {
            nodes.set_index.write(&self.cam, index as i64).during(OP)?;
            self.set_exposure(requested)?;
            let actual = F::NODES.exposure_time.read(&self.cam).during(OP)? / MICROSECONDS_PER_SECOND;
            applied.push(actual);
            nodes.set_store.execute(&self.cam).during(OP)?;
            tracing::debug!(
                step = index,
                requested_s = requested,
                applied_s = actual,
                "Stored sequence step"
            );
        }

        nodes.enable.write(&self.cam, true).during(OP)?;
        self.sequencer = SequencerState::Armed;
        tracing::info!(
            "{} sequencer armed with {} steps",
            F::TYPE_NAME,
            applied.len()
        );
        Ok(applied)
    }

    /// Switch sequence mode off, returning exposure to direct control.
    pub fn disable_sequencer(&mut self) -> CameraResult<()> {
        const OP: &str = "disable_sequencer";
        let nodes = self.sequencer_nodes(OP)?;
        nodes.enable.write(&self.cam, false).during(OP)?;
        self.sequencer = SequencerState::Disabled;
        tracing::info!("{} sequencer disabled", F::TYPE_NAME);
        Ok(())
    }

    fn sequencer_nodes(&self, operation: &'static str) -> CameraResult<SequencerNodes> {
        F::NODES.sequencer.ok_or_else(|| {
            tracing::error!("{} cameras have no exposure sequencer", F::TYPE_NAME);
            CameraError::Precondition {
                operation,
                reason: format!("{} cameras have no exposure sequencer", F::TYPE_NAME),
            }
        })
    }
}

fn validate_exposure_times(exposure_times: &[f64]) -> CameraResult<()> {
    if exposure_times.is_empty() {
        return Err(CameraError::Configuration(
            "exposure sequence must contain at least one step".into(),
        ));
    }
    if let Some((index, bad)) = exposure_times
        .iter()
        .enumerate()
        .find(|(_, t)| !t.is_finite() || **t <= 0.0)
    {
        return Err(CameraError::Configuration(format!(
            "exposure sequence step {} must be positive, got {}",
            index, bad
        )));
    }
    Ok(())
}
