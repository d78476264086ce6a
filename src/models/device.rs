use serde::{Deserialize, Serialize};

/// An audio input device discovered by a scan.
///
/// Immutable once produced; a new scan supersedes the whole registry
/// rather than updating entries in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceDescriptor {
    pub name: String,
    pub is_default: bool,
}

/// Snapshot of discoverable input devices, indexed 0..N-1.
///
/// Produced entirely by one scan; indices are only valid until the next
/// scan. Callers must not hold an index across a re-scan.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeviceRegistry {
    devices: Vec<DeviceDescriptor>,
}

impl DeviceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of devices in the current snapshot.
    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Device at `index`, or `None` past the end of the snapshot.
    pub fn get(&self, index: usize) -> Option<&DeviceDescriptor> {
        self.devices.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &DeviceDescriptor> {
        self.devices.iter()
    }

    /// Replace the snapshot wholesale with the result of a new scan.
    pub fn replace(&mut self, devices: Vec<DeviceDescriptor>) {
        self.devices = devices;
    }
}
