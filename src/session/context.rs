//! Capture context: lifecycle orchestration between the caller and the
//! injected backend.

use std::any::Any;
use std::sync::Arc;

use crate::models::device::{DeviceDescriptor, DeviceRegistry};
use crate::models::error::CaptureError;
use crate::models::state::CaptureState;
use crate::processing::mailbox::{BufferView, DeliveryStats, Mailbox};
use crate::traits::capture_backend::{CaptureBackend, DeliverySink, DeviceHandle};

/// Callback invoked once per delivered buffer.
///
/// Fires on the backend's delivery thread, not the thread that started
/// capture — keep processing minimal and return promptly. The buffer is
/// only guaranteed stable until the callback returns; copy it out to keep
/// it longer.
pub type DeliveryCallback = Arc<dyn Fn(&DeliveryContext<'_>) + Send + Sync + 'static>;

/// State shared between the context and the backend's delivery thread.
///
/// Held in an `Arc` so a sink the backend retains past release cannot
/// dangle; the closed mailbox discards anything it still delivers.
struct DeliveryShared {
    mailbox: Mailbox,
    callback: DeliveryCallback,
    user_argument: Box<dyn Any + Send + Sync>,
}

/// Non-owning view of the context handed to the callback for the duration
/// of one delivery.
pub struct DeliveryContext<'a> {
    shared: &'a DeliveryShared,
}

impl DeliveryContext<'_> {
    /// The buffer for this delivery.
    pub fn buffer(&self) -> BufferView<'_> {
        self.shared.mailbox.view()
    }

    /// The opaque argument supplied at context creation.
    pub fn user_argument(&self) -> &(dyn Any + Send + Sync) {
        &*self.shared.user_argument
    }
}

/// Owns the device registry, the selected backend device, the registered
/// callback, and the latest-buffer slot; coordinates every call between
/// the caller and the [`CaptureBackend`].
///
/// Public operations take `&mut self`, so caller serialization is enforced
/// at compile time rather than by an internal lock. Only the mailbox is
/// touched by the delivery thread.
///
/// Dropping the context is the release operation: it stops delivery,
/// closes the backend device, and guarantees no callback invocation occurs
/// after the drop returns.
pub struct CaptureContext {
    backend: Box<dyn CaptureBackend>,
    registry: DeviceRegistry,
    state: CaptureState,
    open_device: Option<DeviceHandle>,
    shared: Arc<DeliveryShared>,
}

impl CaptureContext {
    /// Create an idle context with an empty registry.
    ///
    /// The callback and `user_argument` are stored verbatim and immutable
    /// for the context's lifetime; the callback is never invoked before
    /// capture starts.
    pub fn new(
        backend: Box<dyn CaptureBackend>,
        callback: DeliveryCallback,
        user_argument: impl Any + Send + Sync,
    ) -> Self {
        Self {
            backend,
            registry: DeviceRegistry::new(),
            state: CaptureState::Idle,
            open_device: None,
            shared: Arc::new(DeliveryShared {
                mailbox: Mailbox::new(),
                callback,
                user_argument: Box::new(user_argument),
            }),
        }
    }

    /// Enumerate input devices and replace the registry wholesale.
    ///
    /// Returns the new device count. Indices handed out before this call
    /// are invalidated. Legal while capturing: the active capture keeps
    /// running even if its device is absent from the new snapshot (its old
    /// index may now name a different device — a caller hazard). On
    /// enumeration failure the registry keeps its prior contents.
    pub fn scan(&mut self) -> Result<usize, CaptureError> {
        let devices = self.backend.enumerate()?;
        log::debug!("scan found {} input devices", devices.len());
        self.registry.replace(devices);
        Ok(self.registry.len())
    }

    /// Number of devices in the current registry.
    pub fn device_count(&self) -> usize {
        self.registry.len()
    }

    /// Device at `index` in the current registry.
    pub fn device(&self, index: usize) -> Result<&DeviceDescriptor, CaptureError> {
        self.registry.get(index).ok_or(CaptureError::OutOfRange {
            index,
            len: self.registry.len(),
        })
    }

    /// Devices in the current registry, in scan order.
    pub fn devices(&self) -> impl Iterator<Item = &DeviceDescriptor> {
        self.registry.iter()
    }

    /// Select the device at `index` and begin capturing from it.
    ///
    /// If already capturing, the current device is torn down symmetrically
    /// before the new one is opened, so repeated calls with different
    /// indices are safe. On backend failure the context is left idle with
    /// no device open.
    pub fn start_capture(&mut self, index: usize) -> Result<(), CaptureError> {
        if index >= self.registry.len() {
            return Err(CaptureError::OutOfRange {
                index,
                len: self.registry.len(),
            });
        }

        if self.state.is_capturing() {
            self.stop_capture();
        }

        let handle = self.backend.open(index)?;
        self.shared.mailbox.reopen();

        let sink = self.delivery_sink();
        if let Err(e) = self.backend.start(handle, sink) {
            self.shared.mailbox.close();
            self.backend.close(handle);
            log::warn!("failed to start capture on device {}: {}", index, e);
            return Err(e);
        }

        self.open_device = Some(handle);
        self.state = CaptureState::Capturing;
        log::debug!("capturing from device {}", index);
        Ok(())
    }

    /// Stop the active capture and return to idle. No-op when not
    /// capturing.
    ///
    /// Closes the mailbox before asking the backend to quiesce, then waits
    /// for any in-flight delivery to settle: once this returns, no further
    /// callback invocation for this context can occur.
    pub fn stop_capture(&mut self) {
        let Some(handle) = self.open_device.take() else {
            return;
        };

        self.shared.mailbox.close();
        self.backend.stop(handle);
        self.shared.mailbox.wait_idle();
        self.backend.close(handle);

        self.state = CaptureState::Idle;
        log::debug!("capture stopped");
    }

    /// The most recently delivered buffer.
    ///
    /// Empty if no delivery has ever occurred. Outside the scope of a
    /// callback invocation the contents may be stale or about to be
    /// superseded; recognizing that is the caller's responsibility.
    pub fn buffer_view(&self) -> BufferView<'_> {
        self.shared.mailbox.view()
    }

    /// The opaque argument supplied at creation, unchanged across any
    /// number of scan/start/stop cycles.
    pub fn user_argument(&self) -> &(dyn Any + Send + Sync) {
        &*self.shared.user_argument
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    /// Delivery traffic counters for the context's mailbox.
    pub fn diagnostics(&self) -> DeliveryStats {
        self.shared.mailbox.stats()
    }

    fn delivery_sink(&self) -> DeliverySink {
        let shared = Arc::clone(&self.shared);
        Arc::new(move |data: &[u8]| {
            shared.mailbox.deliver(data, || {
                let scope = DeliveryContext { shared: &shared };
                (shared.callback)(&scope);
            });
        })
    }
}

impl Drop for CaptureContext {
    fn drop(&mut self) {
        self.stop_capture();
        self.state = CaptureState::Stopped;
    }
}
