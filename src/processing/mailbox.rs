//! Single-slot buffer handoff between the backend's delivery thread and
//! the caller.
//!
//! Each delivery overwrites the previous buffer; there is no queue. The
//! slot is guarded by a `parking_lot::Mutex` and a condition variable so
//! that teardown can wait for an in-flight delivery to settle, which is
//! what makes the release ordering guarantee checkable.

use std::ops::Deref;

use parking_lot::{Condvar, Mutex, MutexGuard};

/// Counters describing delivery traffic through a mailbox.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryStats {
    /// Deliveries that reached the slot and invoked the callback.
    pub deliveries: u64,
    /// Total payload bytes across those deliveries.
    pub bytes_delivered: u64,
    /// Deliveries discarded because the mailbox was closed.
    pub dropped_after_close: u64,
}

#[derive(Debug, Default)]
struct Slot {
    buffer: Vec<u8>,
    delivering: bool,
    closed: bool,
    stats: DeliveryStats,
}

/// Condition-variable-guarded single-slot mailbox.
///
/// The delivery thread writes through [`Mailbox::deliver`]; the caller
/// reads through [`Mailbox::view`]. Closing the mailbox drops subsequent
/// deliveries before they can invoke the callback, and
/// [`Mailbox::wait_idle`] blocks until an in-flight delivery completes.
#[derive(Debug, Default)]
pub struct Mailbox {
    slot: Mutex<Slot>,
    settled: Condvar,
}

impl Mailbox {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `data` in the slot, then run `callback` with the slot
    /// readable and the mutex released.
    ///
    /// Concurrent deliveries are serialized: a second delivery waits until
    /// the previous callback has returned, so the buffer a callback reads
    /// is never overwritten underneath it. Returns `false` when the
    /// mailbox is closed and the delivery was discarded.
    pub fn deliver<F: FnOnce()>(&self, data: &[u8], callback: F) -> bool {
        {
            let mut slot = self.slot.lock();
            while slot.delivering {
                self.settled.wait(&mut slot);
            }
            if slot.closed {
                slot.stats.dropped_after_close += 1;
                return false;
            }
            slot.buffer.clear();
            slot.buffer.extend_from_slice(data);
            slot.delivering = true;
            slot.stats.deliveries += 1;
            slot.stats.bytes_delivered += data.len() as u64;
        }

        callback();

        let mut slot = self.slot.lock();
        slot.delivering = false;
        self.settled.notify_all();
        true
    }

    /// The most recently delivered buffer, empty if nothing has been
    /// delivered yet. The view is stable for the lifetime of the guard.
    pub fn view(&self) -> BufferView<'_> {
        BufferView {
            guard: self.slot.lock(),
        }
    }

    /// Discard all future deliveries without invoking the callback.
    pub fn close(&self) {
        self.slot.lock().closed = true;
    }

    /// Accept deliveries again after a [`Mailbox::close`].
    pub fn reopen(&self) {
        self.slot.lock().closed = false;
    }

    /// Block until no delivery is in flight.
    ///
    /// Called after the backend has quiesced; once this returns, no
    /// callback invocation started before the close is still running.
    pub fn wait_idle(&self) {
        let mut slot = self.slot.lock();
        while slot.delivering {
            self.settled.wait(&mut slot);
        }
    }

    pub fn stats(&self) -> DeliveryStats {
        self.slot.lock().stats
    }
}

/// Read guard over the mailbox's current buffer.
///
/// Derefs to `&[u8]`. Holding it blocks slot writes, so drop it promptly;
/// copy the bytes out to retain them past the guard's scope.
pub struct BufferView<'a> {
    guard: MutexGuard<'a, Slot>,
}

impl Deref for BufferView<'_> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.guard.buffer
    }
}

impl BufferView<'_> {
    pub fn len(&self) -> usize {
        self.guard.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.guard.buffer.is_empty()
    }
}
