//! In-memory register map.

use crate::components::node_map::{AccessMode, NodeMap};
use crate::error::{AccessErrorKind, RegisterAccessError};
use crate::mock::faults::{FaultScenario, FaultState};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// A value written to the simulated device.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Float register value.
    Float(f64),
    /// Integer register value.
    Integer(i64),
    /// Boolean register value.
    Boolean(bool),
    /// Enumeration entry name.
    Entry(String),
}

/// One recorded register access, in device order.
#[derive(Debug, Clone, PartialEq)]
pub enum Access {
    /// A successful write.
    Write {
        /// Register name.
        node: String,
        /// Value as stored by the device (after clamping).
        value: Value,
    },
    /// A successful command execution.
    Execute {
        /// Register name.
        node: String,
    },
}

impl Access {
    /// Register the access targeted.
    pub fn node(&self) -> &str {
        match self {
            Access::Write { node, .. } | Access::Execute { node } => node,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum MockValue {
    Float {
        value: f64,
        min: f64,
        max: f64,
        increment: Option<f64>,
    },
    Integer {
        value: i64,
        min: i64,
        max: i64,
    },
    Boolean(bool),
    Enumeration {
        entry: String,
        entries: Vec<String>,
    },
    Command,
}

#[derive(Debug, Clone)]
pub(crate) struct MockRegister {
    pub(crate) value: MockValue,
    pub(crate) access: AccessMode,
}

/// Registers that become read-only while a boolean register is set.
#[derive(Debug, Clone)]
struct WriteLock {
    trigger: String,
    locked: Vec<String>,
}

#[derive(Debug, Default)]
struct DeviceState {
    registers: HashMap<String, MockRegister>,
    /// Power-on contents, restored by the user-set load command.
    defaults: HashMap<String, MockRegister>,
    user_set_load: Option<String>,
    locks: Vec<WriteLock>,
    journal: Vec<Access>,
    faults: FaultState,
}

/// Simulated camera register map.
///
/// Cloning yields another handle to the same device, so a test can keep one
/// handle for inspection while the controller owns the other.
///
/// Device behavior:
/// - float writes are clamped into `[min, max]` and snapped to the increment;
/// - integer writes outside `[min, max]` fail with `OutOfRange`;
/// - executing the user-set load command restores the power-on contents;
/// - write locks make registers read-only while a boolean trigger is set.
#[derive(Debug, Clone, Default)]
pub struct MockNodeMap {
    state: Arc<Mutex<DeviceState>>,
}

impl MockNodeMap {
    /// Empty device with no registers.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Builders (define power-on contents)
    // =========================================================================

    fn define(self, node: &str, value: MockValue, access: AccessMode) -> Self {
        {
            let mut state = self.state.lock();
            let register = MockRegister { value, access };
            state.defaults.insert(node.to_string(), register.clone());
            state.registers.insert(node.to_string(), register);
        }
        self
    }

    /// Define a read-write float register.
    pub fn with_float(self, node: &str, value: f64, min: f64, max: f64) -> Self {
        self.define(
            node,
            MockValue::Float {
                value,
                min,
                max,
                increment: None,
            },
            AccessMode::ReadWrite,
        )
    }

    /// Give an existing float register a quantization step.
    pub fn with_float_increment(self, node: &str, increment: f64) -> Self {
        {
            let mut state = self.state.lock();
            let state = &mut *state;
            for table in [&mut state.registers, &mut state.defaults] {
                if let Some(MockRegister {
                    value: MockValue::Float { increment: inc, .. },
                    ..
                }) = table.get_mut(node)
                {
                    *inc = Some(increment);
                }
            }
        }
        self
    }

    /// Define a read-write integer register.
    pub fn with_integer(self, node: &str, value: i64, min: i64, max: i64) -> Self {
        self.define(
            node,
            MockValue::Integer { value, min, max },
            AccessMode::ReadWrite,
        )
    }

    /// Define a read-write boolean register.
    pub fn with_boolean(self, node: &str, value: bool) -> Self {
        self.define(node, MockValue::Boolean(value), AccessMode::ReadWrite)
    }

    /// Define a read-write enumeration register; the first entry is current.
    pub fn with_enumeration(self, node: &str, entries: &[&str]) -> Self {
        let entry = entries.first().map(|e| e.to_string()).unwrap_or_default();
        self.define(
            node,
            MockValue::Enumeration {
                entry,
                entries: entries.iter().map(|e| e.to_string()).collect(),
            },
            AccessMode::ReadWrite,
        )
    }

    /// Define a command register.
    pub fn with_command(self, node: &str) -> Self {
        self.define(node, MockValue::Command, AccessMode::WriteOnly)
    }

    /// Define the command that reloads the power-on contents.
    pub fn with_user_set_load(self, node: &str) -> Self {
        self.state.lock().user_set_load = Some(node.to_string());
        self.with_command(node)
    }

    /// Power-on access mode of an existing register.
    pub fn with_access(self, node: &str, access: AccessMode) -> Self {
        {
            let mut state = self.state.lock();
            let state = &mut *state;
            for table in [&mut state.registers, &mut state.defaults] {
                if let Some(register) = table.get_mut(node) {
                    register.access = access;
                }
            }
        }
        self
    }

    /// Make `locked` read-only while boolean register `trigger` is true.
    pub fn with_write_lock(self, trigger: &str, locked: &[&str]) -> Self {
        self.state.lock().locks.push(WriteLock {
            trigger: trigger.to_string(),
            locked: locked.iter().map(|n| n.to_string()).collect(),
        });
        self
    }

    /// Add a fault scenario.
    pub fn with_fault(self, scenario: FaultScenario) -> Self {
        self.inject_fault(scenario);
        self
    }

    // =========================================================================
    // Runtime control and inspection
    // =========================================================================

    /// Add a fault scenario to a running device.
    pub fn inject_fault(&self, scenario: FaultScenario) {
        self.state.lock().faults.push(scenario);
    }

    /// Remove all fault scenarios and reconnect.
    pub fn clear_faults(&self) {
        self.state.lock().faults.clear();
    }

    /// Change the current access mode of a register.
    pub fn set_access(&self, node: &str, access: AccessMode) {
        if let Some(register) = self.state.lock().registers.get_mut(node) {
            register.access = access;
        }
    }

    /// Change the range of a numeric register, as a different unit would report it.
    ///
    /// Ranges are a property of the unit, so user-set reloads keep them.
    pub fn set_range(&self, node: &str, new_min: f64, new_max: f64) {
        let mut state = self.state.lock();
        let state = &mut *state;
        for table in [&mut state.registers, &mut state.defaults] {
            match table.get_mut(node).map(|r| &mut r.value) {
                Some(MockValue::Float { min, max, .. }) => {
                    *min = new_min;
                    *max = new_max;
                }
                Some(MockValue::Integer { min, max, .. }) => {
                    *min = new_min as i64;
                    *max = new_max as i64;
                }
                _ => {}
            }
        }
    }

    /// All successful writes and executions so far.
    pub fn journal(&self) -> Vec<Access> {
        self.state.lock().journal.clone()
    }

    /// Forget recorded accesses.
    pub fn clear_journal(&self) {
        self.state.lock().journal.clear();
    }

    /// Index in the journal of the first access to `node` at or after `from`.
    pub fn position(&self, node: &str, from: usize) -> Option<usize> {
        self.state
            .lock()
            .journal
            .iter()
            .enumerate()
            .skip(from)
            .find(|(_, a)| a.node() == node)
            .map(|(i, _)| i)
    }

    /// Current float value, bypassing access checks and faults.
    pub fn float(&self, node: &str) -> Option<f64> {
        match self.state.lock().registers.get(node).map(|r| &r.value) {
            Some(MockValue::Float { value, .. }) => Some(*value),
            _ => None,
        }
    }

    /// Current integer value, bypassing access checks and faults.
    pub fn integer(&self, node: &str) -> Option<i64> {
        match self.state.lock().registers.get(node).map(|r| &r.value) {
            Some(MockValue::Integer { value, .. }) => Some(*value),
            _ => None,
        }
    }

    /// Current boolean value, bypassing access checks and faults.
    pub fn boolean(&self, node: &str) -> Option<bool> {
        match self.state.lock().registers.get(node).map(|r| &r.value) {
            Some(MockValue::Boolean(value)) => Some(*value),
            _ => None,
        }
    }

    /// Current enumeration entry, bypassing access checks and faults.
    pub fn entry(&self, node: &str) -> Option<String> {
        match self.state.lock().registers.get(node).map(|r| &r.value) {
            Some(MockValue::Enumeration { entry, .. }) => Some(entry.clone()),
            _ => None,
        }
    }

    // =========================================================================
    // Internal access helpers
    // =========================================================================

    fn read<T>(
        &self,
        node: &str,
        f: impl FnOnce(&MockValue) -> Option<T>,
    ) -> Result<T, RegisterAccessError> {
        let mut state = self.state.lock();
        state.faults.check(node)?;
        let register = lookup(&state.registers, node)?;
        if !register.access.is_readable() {
            return Err(RegisterAccessError::new(
                node,
                AccessErrorKind::NotAvailable,
                "Node is not readable",
            ));
        }
        f(&register.value).ok_or_else(|| type_mismatch(node))
    }

    fn write(
        &self,
        node: &str,
        f: impl FnOnce(&mut MockValue) -> Result<Value, RegisterAccessError>,
    ) -> Result<(), RegisterAccessError> {
        let mut state = self.state.lock();
        state.faults.check(node)?;
        let register = state
            .registers
            .get_mut(node)
            .ok_or_else(|| not_existing(node))?;
        if !register.access.is_writable() {
            return Err(RegisterAccessError::new(
                node,
                AccessErrorKind::NotWritable,
                "Node is not writable",
            ));
        }
        let value = f(&mut register.value)?;
        if let Value::Boolean(set) = value {
            apply_locks(&mut state, node, set);
        }
        state.journal.push(Access::Write {
            node: node.to_string(),
            value,
        });
        Ok(())
    }
}

impl NodeMap for MockNodeMap {
    fn access_mode(&self, node: &str) -> Result<AccessMode, RegisterAccessError> {
        let state = self.state.lock();
        if state.faults.is_disconnected() {
            return Err(RegisterAccessError::new(
                node,
                AccessErrorKind::Disconnected,
                "Device has been removed from the bus",
            ));
        }
        lookup(&state.registers, node).map(|r| r.access)
    }

    fn float_value(&self, node: &str) -> Result<f64, RegisterAccessError> {
        self.read(node, |v| match v {
            MockValue::Float { value, .. } => Some(*value),
            _ => None,
        })
    }

    fn set_float_value(&self, node: &str, requested: f64) -> Result<(), RegisterAccessError> {
        self.write(node, |v| match v {
            MockValue::Float {
                value,
                min,
                max,
                increment,
            } => {
                let mut applied = requested.clamp(*min, *max);
                if let Some(inc) = increment.filter(|inc| *inc > 0.0) {
                    applied = (*min + ((applied - *min) / inc).round() * inc).min(*max);
                }
                *value = applied;
                Ok(Value::Float(applied))
            }
            _ => Err(type_mismatch(node)),
        })
    }

    fn float_min(&self, node: &str) -> Result<f64, RegisterAccessError> {
        self.read(node, |v| match v {
            MockValue::Float { min, .. } => Some(*min),
            _ => None,
        })
    }

    fn float_max(&self, node: &str) -> Result<f64, RegisterAccessError> {
        self.read(node, |v| match v {
            MockValue::Float { max, .. } => Some(*max),
            _ => None,
        })
    }

    fn integer_value(&self, node: &str) -> Result<i64, RegisterAccessError> {
        self.read(node, |v| match v {
            MockValue::Integer { value, .. } => Some(*value),
            _ => None,
        })
    }

    fn set_integer_value(&self, node: &str, requested: i64) -> Result<(), RegisterAccessError> {
        self.write(node, |v| match v {
            MockValue::Integer { value, min, max } => {
                if requested < *min || requested > *max {
                    return Err(RegisterAccessError::new(
                        node,
                        AccessErrorKind::OutOfRange,
                        format!("Value {} must be within [{}, {}]", requested, min, max),
                    ));
                }
                *value = requested;
                Ok(Value::Integer(requested))
            }
            _ => Err(type_mismatch(node)),
        })
    }

    fn integer_min(&self, node: &str) -> Result<i64, RegisterAccessError> {
        self.read(node, |v| match v {
            MockValue::Integer { min, .. } => Some(*min),
            _ => None,
        })
    }

    fn integer_max(&self, node: &str) -> Result<i64, RegisterAccessError> {
        self.read(node, |v| match v {
            MockValue::Integer { max, .. } => Some(*max),
            _ => None,
        })
    }

    fn boolean_value(&self, node: &str) -> Result<bool, RegisterAccessError> {
        self.read(node, |v| match v {
            MockValue::Boolean(value) => Some(*value),
            _ => None,
        })
    }

    fn set_boolean_value(&self, node: &str, requested: bool) -> Result<(), RegisterAccessError> {
        self.write(node, |v| match v {
            MockValue::Boolean(value) => {
                *value = requested;
                Ok(Value::Boolean(requested))
            }
            _ => Err(type_mismatch(node)),
        })
    }

    fn enum_entry(&self, node: &str) -> Result<String, RegisterAccessError> {
        self.read(node, |v| match v {
            MockValue::Enumeration { entry, .. } => Some(entry.clone()),
            _ => None,
        })
    }

    fn set_enum_entry(&self, node: &str, requested: &str) -> Result<(), RegisterAccessError> {
        self.write(node, |v| match v {
            MockValue::Enumeration { entry, entries } => {
                if !entries.iter().any(|e| e == requested) {
                    return Err(RegisterAccessError::new(
                        node,
                        AccessErrorKind::OutOfRange,
                        format!("Entry '{}' is not available", requested),
                    ));
                }
                *entry = requested.to_string();
                Ok(Value::Entry(requested.to_string()))
            }
            _ => Err(type_mismatch(node)),
        })
    }

    fn execute(&self, node: &str) -> Result<(), RegisterAccessError> {
        let mut state = self.state.lock();
        state.faults.check(node)?;
        let register = lookup(&state.registers, node)?;
        if register.value != MockValue::Command {
            return Err(type_mismatch(node));
        }
        if !register.access.is_writable() {
            return Err(RegisterAccessError::new(
                node,
                AccessErrorKind::NotWritable,
                "Command is not executable",
            ));
        }

        if state.user_set_load.as_deref() == Some(node) {
            state.registers = state.defaults.clone();
            tracing::trace!("Simulated camera restored power-on register contents");
        }
        state.journal.push(Access::Execute {
            node: node.to_string(),
        });
        Ok(())
    }
}

fn lookup<'a>(
    registers: &'a HashMap<String, MockRegister>,
    node: &str,
) -> Result<&'a MockRegister, RegisterAccessError> {
    registers.get(node).ok_or_else(|| not_existing(node))
}

fn not_existing(node: &str) -> RegisterAccessError {
    RegisterAccessError::new(node, AccessErrorKind::NotAvailable, "Node not existing")
}

fn type_mismatch(node: &str) -> RegisterAccessError {
    RegisterAccessError::new(
        node,
        AccessErrorKind::TypeMismatch,
        "Node has a different interface type",
    )
}

fn apply_locks(state: &mut DeviceState, trigger: &str, set: bool) {
    let access = if set {
        AccessMode::ReadOnly
    } else {
        AccessMode::ReadWrite
    };
    let locked: Vec<String> = state
        .locks
        .iter()
        .filter(|lock| lock.trigger == trigger)
        .flat_map(|lock| lock.locked.iter().cloned())
        .collect();
    for node in locked {
        if let Some(register) = state.registers.get_mut(&node) {
            register.access = access;
        }
    }
}
