//! Hardware exception boundary.
//!
//! Every register access the controller and sequencer perform ends here. A
//! transport failure is logged once, with the operation that was running
//! and the device's own description, and then handed back to the caller as
//! [`CameraError::RegisterAccess`]. Logging is an explicit step at this
//! boundary rather than a side effect buried in each accessor.

use crate::error::{AccessErrorKind, CameraError, CameraResult, RegisterAccessError};

/// Log a register failure and convert it into the crate error type.
pub(crate) fn report(operation: &'static str, err: RegisterAccessError) -> CameraError {
    match err.kind {
        // The transport already waited; this is the only signal we get.
        AccessErrorKind::Timeout | AccessErrorKind::Disconnected => tracing::error!(
            operation,
            node = %err.node,
            kind = %err.kind,
            "{} lost contact with the device on '{}': {}",
            operation,
            err.node,
            err.description
        ),
        _ => tracing::error!(
            operation,
            node = %err.node,
            kind = %err.kind,
            "Err trying to access {} in {}: {}",
            err.node,
            operation,
            err.description
        ),
    }
    CameraError::register_access(operation, err)
}

/// Route a raw transport result through the boundary.
pub(crate) trait Guarded<T> {
    /// Attach `operation` to any failure, logging it on the way out.
    fn during(self, operation: &'static str) -> CameraResult<T>;
}

impl<T> Guarded<T> for Result<T, RegisterAccessError> {
    fn during(self, operation: &'static str) -> CameraResult<T> {
        self.map_err(|err| report(operation, err))
    }
}
