//! Register (node map) access.
//!
//! The transport stack exposes the camera as a map of named registers. This
//! module defines the minimal seam the controller depends on:
//!
//! - [`NodeMap`]: get/set/execute/min/max plus an access-mode query, all
//!   failing with [`RegisterAccessError`] carrying the device description.
//! - Typed node names ([`FloatNode`], [`IntegerNode`], [`BooleanNode`],
//!   [`CommandNode`], [`EnumerationNode`]) so a family binding cannot pair a
//!   register with the wrong accessor.
//! - [`Register`]: a borrowed handle to one register, valid for as long as the
//!   controller borrow lasts. Handles are never cached across calls, since a
//!   user-set reload can change which registers are available.

use crate::components::boundary::Guarded;
use crate::error::{AccessErrorKind, CameraError, CameraResult, RegisterAccessError};
use std::fmt::{Debug, Display};

/// Access mode of a register in the device's current state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    /// Present in the description but not implemented or not available now.
    NotAvailable,
    /// Readable only.
    ReadOnly,
    /// Writable only.
    WriteOnly,
    /// Readable and writable.
    ReadWrite,
}

impl AccessMode {
    /// Whether reads are allowed.
    pub fn is_readable(self) -> bool {
        matches!(self, AccessMode::ReadOnly | AccessMode::ReadWrite)
    }

    /// Whether writes are allowed.
    pub fn is_writable(self) -> bool {
        matches!(self, AccessMode::WriteOnly | AccessMode::ReadWrite)
    }
}

/// An opened camera, seen as a map of named registers.
///
/// Every call blocks until the device acknowledges or reports an error.
/// Implementations own whatever synchronization the transport needs; the
/// controller assumes a single logical owner per camera.
pub trait NodeMap {
    /// Current access mode of `node`. Fails if the node does not exist.
    fn access_mode(&self, node: &str) -> Result<AccessMode, RegisterAccessError>;

    /// Read a float register.
    fn float_value(&self, node: &str) -> Result<f64, RegisterAccessError>;
    /// Write a float register.
    fn set_float_value(&self, node: &str, value: f64) -> Result<(), RegisterAccessError>;
    /// Device-reported minimum of a float register.
    fn float_min(&self, node: &str) -> Result<f64, RegisterAccessError>;
    /// Device-reported maximum of a float register.
    fn float_max(&self, node: &str) -> Result<f64, RegisterAccessError>;

    /// Read an integer register.
    fn integer_value(&self, node: &str) -> Result<i64, RegisterAccessError>;
    /// Write an integer register.
    fn set_integer_value(&self, node: &str, value: i64) -> Result<(), RegisterAccessError>;
    /// Device-reported minimum of an integer register.
    fn integer_min(&self, node: &str) -> Result<i64, RegisterAccessError>;
    /// Device-reported maximum of an integer register.
    fn integer_max(&self, node: &str) -> Result<i64, RegisterAccessError>;

    /// Read a boolean register.
    fn boolean_value(&self, node: &str) -> Result<bool, RegisterAccessError>;
    /// Write a boolean register.
    fn set_boolean_value(&self, node: &str, value: bool) -> Result<(), RegisterAccessError>;

    /// Symbolic name of the current enumeration entry.
    fn enum_entry(&self, node: &str) -> Result<String, RegisterAccessError>;
    /// Select an enumeration entry by symbolic name.
    fn set_enum_entry(&self, node: &str, entry: &str) -> Result<(), RegisterAccessError>;

    /// Execute a command register.
    fn execute(&self, node: &str) -> Result<(), RegisterAccessError>;

    /// Writability predicate. Never fails; an error reads as "not writable".
    fn is_writable(&self, node: &str) -> bool {
        self.access_mode(node)
            .map(AccessMode::is_writable)
            .unwrap_or(false)
    }

    /// Readability predicate. Never fails; an error reads as "not readable".
    fn is_readable(&self, node: &str) -> bool {
        self.access_mode(node)
            .map(AccessMode::is_readable)
            .unwrap_or(false)
    }
}

// =============================================================================
// Typed node names
// =============================================================================

/// Anything that names a register.
pub trait Node: Copy + Debug {
    /// Register name as known to the device.
    fn name(&self) -> &'static str;
}

macro_rules! node_name {
    ($(#[$meta:meta])* $ty:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub struct $ty(pub &'static str);

        impl Node for $ty {
            fn name(&self) -> &'static str {
                self.0
            }
        }
    };
}

node_name!(
    /// Float register (IFloat).
    FloatNode
);
node_name!(
    /// Integer register (IInteger).
    IntegerNode
);
node_name!(
    /// Boolean register (IBoolean).
    BooleanNode
);
node_name!(
    /// Command register (ICommand).
    CommandNode
);
node_name!(
    /// Enumeration register (IEnumeration).
    EnumerationNode
);

/// A register with a numeric value and a device-reported range.
pub trait NumericNode: Node {
    /// Native value type of the register.
    type Value: Copy + PartialOrd + Debug + Display;

    /// Read the current value.
    fn read<M: NodeMap + ?Sized>(&self, map: &M) -> Result<Self::Value, RegisterAccessError>;
    /// Write a new value.
    fn write<M: NodeMap + ?Sized>(
        &self,
        map: &M,
        value: Self::Value,
    ) -> Result<(), RegisterAccessError>;
    /// Device-reported minimum.
    fn min<M: NodeMap + ?Sized>(&self, map: &M) -> Result<Self::Value, RegisterAccessError>;
    /// Device-reported maximum.
    fn max<M: NodeMap + ?Sized>(&self, map: &M) -> Result<Self::Value, RegisterAccessError>;

    /// Widen a native value for arithmetic.
    fn to_f64(value: Self::Value) -> f64;
    /// Narrow a computed value back to the native type.
    fn from_f64(value: f64) -> Self::Value;
}

impl NumericNode for FloatNode {
    type Value = f64;

    fn read<M: NodeMap + ?Sized>(&self, map: &M) -> Result<f64, RegisterAccessError> {
        map.float_value(self.0)
    }

    fn write<M: NodeMap + ?Sized>(&self, map: &M, value: f64) -> Result<(), RegisterAccessError> {
        map.set_float_value(self.0, value)
    }

    fn min<M: NodeMap + ?Sized>(&self, map: &M) -> Result<f64, RegisterAccessError> {
        map.float_min(self.0)
    }

    fn max<M: NodeMap + ?Sized>(&self, map: &M) -> Result<f64, RegisterAccessError> {
        map.float_max(self.0)
    }

    fn to_f64(value: f64) -> f64 {
        value
    }

    fn from_f64(value: f64) -> f64 {
        value
    }
}

impl NumericNode for IntegerNode {
    type Value = i64;

    fn read<M: NodeMap + ?Sized>(&self, map: &M) -> Result<i64, RegisterAccessError> {
        map.integer_value(self.0)
    }

    fn write<M: NodeMap + ?Sized>(&self, map: &M, value: i64) -> Result<(), RegisterAccessError> {
        map.set_integer_value(self.0, value)
    }

    fn min<M: NodeMap + ?Sized>(&self, map: &M) -> Result<i64, RegisterAccessError> {
        map.integer_min(self.0)
    }

    fn max<M: NodeMap + ?Sized>(&self, map: &M) -> Result<i64, RegisterAccessError> {
        map.integer_max(self.0)
    }

    fn to_f64(value: i64) -> f64 {
        value as f64
    }

    // Integer registers take the nearest representable value.
    fn from_f64(value: f64) -> i64 {
        value.round() as i64
    }
}

impl BooleanNode {
    /// Read the current value.
    pub fn read<M: NodeMap + ?Sized>(&self, map: &M) -> Result<bool, RegisterAccessError> {
        map.boolean_value(self.0)
    }

    /// Write a new value.
    pub fn write<M: NodeMap + ?Sized>(
        &self,
        map: &M,
        value: bool,
    ) -> Result<(), RegisterAccessError> {
        map.set_boolean_value(self.0, value)
    }
}

impl CommandNode {
    /// Execute the command.
    pub fn execute<M: NodeMap + ?Sized>(&self, map: &M) -> Result<(), RegisterAccessError> {
        map.execute(self.0)
    }
}

/// Enumeration types whose variants map onto symbolic register entries.
pub trait NodeEnum: Copy + Debug + PartialEq + Send + Sync + 'static {
    /// Symbolic entry name for this variant.
    fn entry(&self) -> &'static str;
    /// Parse a symbolic entry name.
    fn from_entry(entry: &str) -> Option<Self>;
}

impl EnumerationNode {
    /// Read the current entry name.
    pub fn read_entry<M: NodeMap + ?Sized>(&self, map: &M) -> Result<String, RegisterAccessError> {
        map.enum_entry(self.0)
    }

    /// Select an entry by name.
    pub fn write_entry<M: NodeMap + ?Sized>(
        &self,
        map: &M,
        entry: &str,
    ) -> Result<(), RegisterAccessError> {
        map.set_enum_entry(self.0, entry)
    }

    /// Select a typed entry.
    pub fn write<M: NodeMap + ?Sized, E: NodeEnum>(
        &self,
        map: &M,
        value: E,
    ) -> Result<(), RegisterAccessError> {
        map.set_enum_entry(self.0, value.entry())
    }
}

/// One fixed entry of an enumeration register.
///
/// Families use this for settings the controller always programs the same
/// way (trigger source `Software`, user set `Default`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnumSetting {
    /// Enumeration register.
    pub node: EnumerationNode,
    /// Entry to select.
    pub entry: &'static str,
}

impl EnumSetting {
    /// Build a setting.
    pub const fn new(node: &'static str, entry: &'static str) -> Self {
        Self {
            node: EnumerationNode(node),
            entry,
        }
    }

    /// Select the entry on the device.
    pub fn apply<M: NodeMap + ?Sized>(&self, map: &M) -> Result<(), RegisterAccessError> {
        self.node.write_entry(map, self.entry)
    }
}

// =============================================================================
// Register handle
// =============================================================================

/// Borrowed handle to one numeric register.
///
/// Obtained from the controller's register getters. Every access goes
/// through the exception boundary under the getter's operation name, so a
/// failure is logged and returned as [`CameraError::RegisterAccess`].
#[derive(Debug)]
pub struct Register<'a, M: ?Sized, N> {
    map: &'a M,
    node: N,
    operation: &'static str,
}

impl<'a, M: NodeMap + ?Sized, N: NumericNode> Register<'a, M, N> {
    /// Acquire a handle, checking that the register is readable right now.
    pub(crate) fn acquire(map: &'a M, node: N, operation: &'static str) -> CameraResult<Self> {
        let mode = map.access_mode(node.name()).during(operation)?;
        if !mode.is_readable() {
            return Err(crate::components::boundary::report(
                operation,
                RegisterAccessError::new(
                    node.name(),
                    AccessErrorKind::NotAvailable,
                    format!("Node '{}' is not readable ({:?})", node.name(), mode),
                ),
            ));
        }
        Ok(Self {
            map,
            node,
            operation,
        })
    }

    /// Register name.
    pub fn name(&self) -> &'static str {
        self.node.name()
    }

    /// Current value.
    pub fn value(&self) -> CameraResult<N::Value> {
        self.node.read(self.map).during(self.operation)
    }

    /// Write a new value.
    pub fn set_value(&self, value: N::Value) -> CameraResult<()> {
        self.node.write(self.map, value).during(self.operation)
    }

    /// Device-reported minimum.
    pub fn min(&self) -> CameraResult<N::Value> {
        self.node.min(self.map).during(self.operation)
    }

    /// Device-reported maximum.
    pub fn max(&self) -> CameraResult<N::Value> {
        self.node.max(self.map).during(self.operation)
    }

    /// Whether the register accepts writes in the current device mode.
    pub fn is_writable(&self) -> bool {
        self.map.is_writable(self.node.name())
    }
}

/// Parse a typed entry, mapping unknown names to [`CameraError::UnknownEntry`].
pub(crate) fn parse_entry<E: NodeEnum>(node: EnumerationNode, entry: String) -> CameraResult<E> {
    E::from_entry(&entry).ok_or(CameraError::UnknownEntry {
        node: node.name().to_string(),
        entry,
    })
}
