/// Capture context state machine.
///
/// State transitions:
/// ```text
/// idle ⇄ capturing
///   ↓        ↓
///   └──→ stopped (release)
/// ```
///
/// `Capturing` is entered by a successful device-selection/start and left
/// by an explicit stop, a restart with a different device, or release.
/// `Stopped` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
    Idle,
    Capturing,
    Stopped,
}

impl CaptureState {
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    pub fn is_capturing(&self) -> bool {
        matches!(self, Self::Capturing)
    }

    pub fn is_stopped(&self) -> bool {
        matches!(self, Self::Stopped)
    }
}
