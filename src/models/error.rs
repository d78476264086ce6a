use thiserror::Error;

/// Errors that can occur during capture operations.
///
/// All failures are returned synchronously at the failing operation;
/// nothing is retried internally. Retry policy (e.g. re-scanning after a
/// removed-device error) is a caller decision.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CaptureError {
    /// Context or backend resources could not be allocated.
    #[error("allocation failed: {0}")]
    Allocation(String),

    /// Device index outside the bounds of the current registry.
    #[error("device index {index} out of range for registry of {len}")]
    OutOfRange { index: usize, len: usize },

    /// Opaque failure from the native backend: device busy, permission
    /// denied, device removed, enumeration failure.
    #[error("backend error: {0}")]
    Backend(String),
}
