//! Error types for camera control.
//!
//! `CameraError` is the single error type returned by every controller and
//! sequencer operation. Register-level failures reported by the transport
//! ([`RegisterAccessError`]) are converted into `CameraError::RegisterAccess`
//! by the exception boundary in [`crate::components::boundary`], which also
//! records the failure in the log before the error reaches the caller.
//!
//! ## Error Categories
//!
//! 1. **Hardware errors** - `RegisterAccess`, `UnknownEntry`
//!    - Reported by the device or its transport while reading or writing a register
//!    - Always carry the device's own description text
//!    - Recovery: the caller decides whether to retry the whole operation
//!
//! 2. **State errors** - `Precondition`
//!    - The device is in a mode that forbids the requested operation
//!    - Recovery: change device mode, then retry
//!
//! 3. **Configuration errors** - `Configuration`, `Config`
//!    - Caller-supplied values are invalid, or the configuration file failed to parse
//!    - Recovery: fix the values; nothing was written to the device
//!
//! No operation in this crate retries on its own.

use thiserror::Error;

// =============================================================================
// Register Access Errors
// =============================================================================

/// Classification of a register access failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessErrorKind {
    /// The register does not exist or is not readable in the current mode.
    NotAvailable,
    /// The register exists but cannot be written in the current mode.
    NotWritable,
    /// The device rejected the value.
    OutOfRange,
    /// The value has a different type than the caller expected.
    TypeMismatch,
    /// The transport gave up waiting for an acknowledgement.
    Timeout,
    /// The device is no longer reachable.
    Disconnected,
    /// Anything the transport could not classify further.
    Generic,
}

impl std::fmt::Display for AccessErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            AccessErrorKind::NotAvailable => "not_available",
            AccessErrorKind::NotWritable => "not_writable",
            AccessErrorKind::OutOfRange => "out_of_range",
            AccessErrorKind::TypeMismatch => "type_mismatch",
            AccessErrorKind::Timeout => "timeout",
            AccessErrorKind::Disconnected => "disconnected",
            AccessErrorKind::Generic => "generic",
        };
        write!(f, "{}", label)
    }
}

/// Failure reported by the transport for a single register access.
///
/// This is the Rust shape of the SDK's generic exception: it names the
/// register and carries the human-readable description the device provided.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("register '{node}' {kind} error: {description}")]
pub struct RegisterAccessError {
    /// Register (node) name as known to the device.
    pub node: String,
    /// Failure classification.
    pub kind: AccessErrorKind,
    /// Description text provided by the device or SDK.
    pub description: String,
}

impl RegisterAccessError {
    /// Create a new access error.
    pub fn new(
        node: impl Into<String>,
        kind: AccessErrorKind,
        description: impl Into<String>,
    ) -> Self {
        Self {
            node: node.into(),
            kind,
            description: description.into(),
        }
    }

    /// Shorthand for a generic, unclassified failure.
    pub fn generic(node: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(node, AccessErrorKind::Generic, description)
    }
}

// =============================================================================
// Camera Errors
// =============================================================================

/// Convenience alias for results using the crate error type.
pub type CameraResult<T> = std::result::Result<T, CameraError>;

/// Primary error type for camera control operations.
#[derive(Error, Debug)]
pub enum CameraError {
    /// A register read, write or command execution failed.
    ///
    /// `operation` is the controller operation that was running (for example
    /// `"apply_startup_settings"`), `node` the register that failed and
    /// `description` the device's own explanation.
    ///
    /// **Error Type**: Depends on `kind`:
    /// - Transient: `Timeout`
    /// - Mode-dependent: `NotWritable`, `NotAvailable` (e.g. during an armed sequence)
    /// - Permanent: `Disconnected`
    ///
    /// **Recovery Strategy**: Not retried here. Multi-step operations that fail
    /// part-way leave the device in whatever state it reached.
    #[error("{operation} failed on register '{node}' ({kind}): {description}")]
    RegisterAccess {
        /// Controller operation in progress.
        operation: &'static str,
        /// Register name.
        node: String,
        /// Failure classification.
        kind: AccessErrorKind,
        /// Device-provided description.
        description: String,
    },

    /// An operation was invoked in a state that forbids it.
    ///
    /// Occurs when the sequencer cannot be configured because its enable
    /// register is not writable, or the camera family has no sequencer.
    ///
    /// **Error Type**: Permanent for the current device mode.
    ///
    /// **Recovery Strategy**: Change the device mode, then retry.
    #[error("{operation} precondition failed: {reason}")]
    Precondition {
        /// Operation that was refused.
        operation: &'static str,
        /// Why it was refused.
        reason: String,
    },

    /// The device reported an enumeration entry this family binding does not know.
    #[error("register '{node}' reported unknown entry '{entry}'")]
    UnknownEntry {
        /// Register name.
        node: String,
        /// Entry name reported by the device.
        entry: String,
    },

    /// Caller-supplied values failed validation.
    ///
    /// Occurs when a gain fraction lies outside [0, 1], the MTU is zero, or an
    /// exposure sequence is empty or contains non-positive times. Nothing has
    /// been written to the device when this is returned.
    ///
    /// # Example
    ///
    /// ```rust
    /// use camera_control::error::CameraError;
    ///
    /// fn validate_exposure(exposure_seconds: f64) -> Result<(), CameraError> {
    ///     if exposure_seconds <= 0.0 {
    ///         return Err(CameraError::Configuration(
    ///             "exposure_seconds must be positive".into()
    ///         ));
    ///     }
    ///     Ok(())
    /// }
    /// ```
    #[error("Configuration validation error: {0}")]
    Configuration(String),

    /// Configuration file or environment parsing failed.
    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),
}

impl CameraError {
    /// Attach the running operation to a transport failure.
    pub fn register_access(operation: &'static str, err: RegisterAccessError) -> Self {
        CameraError::RegisterAccess {
            operation,
            node: err.node,
            kind: err.kind,
            description: err.description,
        }
    }

    /// Device-provided description, if this error came from the hardware.
    pub fn device_description(&self) -> Option<&str> {
        match self {
            CameraError::RegisterAccess { description, .. } => Some(description),
            _ => None,
        }
    }
}

impl From<figment::Error> for CameraError {
    fn from(err: figment::Error) -> Self {
        CameraError::Config(Box::new(err))
    }
}
