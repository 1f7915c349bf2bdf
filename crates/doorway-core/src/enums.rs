//! Enumeration types used throughout the scene.

use serde::{Deserialize, Serialize};

/// Behaviour category of an interactable door.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DoorCategory {
    /// Opens and stays open.
    #[default]
    Standard,
    /// Requests the next level once fully open.
    Transitional,
}

/// Collision layer a door collider sits on. The interaction ray only
/// considers the layers it is configured for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InteractionLayer {
    #[default]
    Door,
    DoorLoad,
    /// Present in the scene but invisible to the interaction ray.
    Default,
}

impl InteractionLayer {
    /// Category implied by the layer: load doors are transitional.
    pub fn category(self) -> DoorCategory {
        match self {
            InteractionLayer::DoorLoad => DoorCategory::Transitional,
            InteractionLayer::Door | InteractionLayer::Default => DoorCategory::Standard,
        }
    }
}

/// Logical open/closed intent of a reusable door.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DoorIntent {
    #[default]
    Closed,
    Open,
}

impl DoorIntent {
    pub fn flipped(self) -> Self {
        match self {
            DoorIntent::Closed => DoorIntent::Open,
            DoorIntent::Open => DoorIntent::Closed,
        }
    }
}

/// Whether a door currently has an interpolation task.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DoorStatus {
    #[default]
    Idle,
    Animating,
}

/// Who started a door's interpolation task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotionOrigin {
    /// A reusable open/close toggle.
    Toggle,
    /// A one-shot open from the interaction ray.
    Interaction,
}

/// One-shot interaction state of a door, tracked by the dispatcher.
///
/// Replaces the `{opened, animating}` flag pair: `Opening` is opened and
/// animating, `Open` is opened and at rest. "Animating but not opened"
/// cannot be represented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum OneShotState {
    #[default]
    Closed,
    Opening,
    Open,
}

impl OneShotState {
    pub fn opened(self) -> bool {
        !matches!(self, OneShotState::Closed)
    }

    pub fn animating(self) -> bool {
        matches!(self, OneShotState::Opening)
    }
}

/// Lifecycle of a trigger gate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state")]
pub enum GateState {
    /// Armed, question not yet answered. Every entry redisplays the UI.
    #[default]
    Unanswered,
    /// Armed, answered; `remaining` further entries are honoured.
    Answered { remaining: u32 },
    /// Permanently disabled.
    Disarmed,
}

impl GateState {
    pub fn is_armed(self) -> bool {
        !matches!(self, GateState::Disarmed)
    }

    pub fn answered(self) -> bool {
        !matches!(self, GateState::Unanswered)
    }
}

/// How a disarmed gate was switched off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SensorState {
    #[default]
    Enabled,
    /// Only the sensor was disabled.
    SensorDisabled,
    /// No separable sensor; the whole gate entity was deactivated.
    EntityDeactivated,
}

/// Latch for the one-time clap release.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReleaseLatch {
    #[default]
    Locked,
    Released,
}
