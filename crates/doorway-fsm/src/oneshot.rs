//! One-shot door interaction transitions: `Closed → Opening → Open`.

use doorway_core::enums::OneShotState;

/// Result of an interact request against the focused door.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractOutcome {
    /// No interact edge this tick, or the ray hit nothing interactable.
    NoTarget,
    /// A new opening task was started.
    Started,
    /// The door is opening or already open; the request is dropped.
    AlreadyInProgress,
}

/// Try to start opening. Only a closed door can begin.
pub fn begin(state: OneShotState) -> Option<OneShotState> {
    match state {
        OneShotState::Closed => Some(OneShotState::Opening),
        OneShotState::Opening | OneShotState::Open => None,
    }
}

/// The opening task ended, by convergence or by being replaced.
/// The door stays opened either way.
pub fn finish(state: OneShotState) -> OneShotState {
    match state {
        OneShotState::Opening => OneShotState::Open,
        other => other,
    }
}
