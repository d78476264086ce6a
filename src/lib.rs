//! # mic-capture-core
//!
//! Platform-agnostic microphone capture core library.
//!
//! Provides device registry bookkeeping, capture lifecycle management, and
//! the buffer-handoff protocol between a backend's delivery thread and the
//! caller's callback. Platform-specific backends (Windows WASAPI, macOS
//! Core Audio, Linux ALSA/PipeWire) implement the `CaptureBackend` trait
//! and are injected at context creation.
//!
//! ## Architecture
//!
//! ```text
//! mic-capture-core (this crate)
//! ├── traits/       ← CaptureBackend, DeliverySink, DeviceHandle
//! ├── models/       ← CaptureError, CaptureState, DeviceDescriptor, DeviceRegistry
//! ├── processing/   ← Mailbox (single-slot buffer handoff), BufferView
//! └── session/      ← CaptureContext (lifecycle orchestrator), DeliveryContext
//! ```

pub mod models;
pub mod processing;
pub mod session;
pub mod traits;

// Re-export key types at crate root for convenience.
pub use models::device::{DeviceDescriptor, DeviceRegistry};
pub use models::error::CaptureError;
pub use models::state::CaptureState;
pub use processing::mailbox::{BufferView, DeliveryStats, Mailbox};
pub use session::context::{CaptureContext, DeliveryCallback, DeliveryContext};
pub use traits::capture_backend::{CaptureBackend, DeliverySink, DeviceHandle};
