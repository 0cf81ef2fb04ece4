//! Fault injection for the simulated camera.
//!
//! Scenarios make register accesses fail the way a real transport would, with
//! a device description attached, so error paths can be exercised without
//! hardware.

use crate::error::{AccessErrorKind, RegisterAccessError};
use std::collections::HashMap;

/// A failure pattern applied to register accesses.
#[derive(Debug, Clone)]
pub enum FaultScenario {
    /// Every access to `node` fails.
    Always {
        /// Register name.
        node: String,
        /// Description reported by the device.
        description: String,
    },
    /// Accesses to `node` succeed `count` times, then fail.
    FailAfterN {
        /// Register name.
        node: String,
        /// Number of successful accesses before failing.
        count: u32,
        /// Description reported by the device.
        description: String,
    },
    /// The device drops off the bus after `count` successful accesses to any register.
    Disconnect {
        /// Number of successful accesses before the link is lost.
        count: u32,
    },
}

impl FaultScenario {
    /// Every access to `node` fails with `description`.
    pub fn always(node: impl Into<String>, description: impl Into<String>) -> Self {
        FaultScenario::Always {
            node: node.into(),
            description: description.into(),
        }
    }

    /// Accesses to `node` fail after `count` successes.
    pub fn fail_after(node: impl Into<String>, count: u32, description: impl Into<String>) -> Self {
        FaultScenario::FailAfterN {
            node: node.into(),
            count,
            description: description.into(),
        }
    }
}

/// Active scenarios plus the per-register access counters they need.
#[derive(Debug, Default, Clone)]
pub(crate) struct FaultState {
    scenarios: Vec<FaultScenario>,
    access_counts: HashMap<String, u32>,
    total_accesses: u32,
    disconnected: bool,
}

impl FaultState {
    pub(crate) fn push(&mut self, scenario: FaultScenario) {
        self.scenarios.push(scenario);
    }

    pub(crate) fn clear(&mut self) {
        *self = FaultState::default();
    }

    pub(crate) fn is_disconnected(&self) -> bool {
        self.disconnected
    }

    /// Count one access to `node` and decide whether it fails.
    pub(crate) fn check(&mut self, node: &str) -> Result<(), RegisterAccessError> {
        if self.disconnected {
            return Err(RegisterAccessError::new(
                node,
                AccessErrorKind::Disconnected,
                "Device has been removed from the bus",
            ));
        }

        let count = self.access_counts.entry(node.to_string()).or_insert(0);
        *count += 1;
        let count = *count;
        self.total_accesses += 1;

        for scenario in &self.scenarios {
            match scenario {
                FaultScenario::Always {
                    node: target,
                    description,
                } if target == node => {
                    return Err(RegisterAccessError::generic(node, description.clone()));
                }
                FaultScenario::FailAfterN {
                    node: target,
                    count: limit,
                    description,
                } if target == node && count > *limit => {
                    return Err(RegisterAccessError::generic(node, description.clone()));
                }
                FaultScenario::Disconnect { count: limit } if self.total_accesses > *limit => {
                    self.disconnected = true;
                    return Err(RegisterAccessError::new(
                        node,
                        AccessErrorKind::Disconnected,
                        "Device has been removed from the bus",
                    ));
                }
                _ => {}
            }
        }
        Ok(())
    }
}
