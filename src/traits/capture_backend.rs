use std::sync::Arc;

use crate::models::device::DeviceDescriptor;
use crate::models::error::CaptureError;

/// Opaque identifier for a device the backend has opened.
///
/// Only meaningful to the backend that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DeviceHandle(pub u64);

/// Sink the backend feeds captured buffers into.
///
/// Invoked on a thread owned by the backend (a dedicated delivery thread
/// or a driver callback context) — the core treats it as "some thread not
/// the caller's". Keep work inside it minimal.
pub type DeliverySink = Arc<dyn Fn(&[u8]) + Send + Sync + 'static>;

/// Interface for platform-specific capture backends.
///
/// Implemented once per target platform (WASAPI, Core Audio, ALSA, ...)
/// and injected into [`CaptureContext`](crate::session::context::CaptureContext)
/// at creation, keeping the core backend-agnostic.
pub trait CaptureBackend: Send {
    /// Enumerate available input devices, in the order the platform
    /// reports them.
    fn enumerate(&mut self) -> Result<Vec<DeviceDescriptor>, CaptureError>;

    /// Open the device at `index` into the most recent enumeration.
    ///
    /// Fails with [`CaptureError::Backend`] when the device is busy, gone,
    /// or access is denied, and with [`CaptureError::Allocation`] when the
    /// backend cannot allocate its capture resources.
    fn open(&mut self, index: usize) -> Result<DeviceHandle, CaptureError>;

    /// Begin delivering captured buffers for `handle` into `sink`.
    fn start(&mut self, handle: DeviceHandle, sink: DeliverySink) -> Result<(), CaptureError>;

    /// Stop delivery for `handle`.
    ///
    /// Must not return until no further `sink` invocation can occur —
    /// join-style synchronization with the delivery thread.
    fn stop(&mut self, handle: DeviceHandle);

    /// Release the backend resources behind `handle`.
    fn close(&mut self, handle: DeviceHandle);
}
