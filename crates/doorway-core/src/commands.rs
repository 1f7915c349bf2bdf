//! Commands sent from input, physics and UI collaborators to the scene.
//!
//! Commands are queued and processed at the next tick boundary.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::types::ActorInfo;

/// All possible inputs to the scene engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SceneCommand {
    // --- Viewer ---
    /// Update the viewer's forward ray.
    SetViewer { origin: DVec3, forward: DVec3 },
    /// Interact key went down this tick (edge, not held).
    Interact,

    // --- Trigger volumes ---
    /// An object's bounds started intersecting a named trigger volume.
    TriggerEnter { volume: String, actor: ActorInfo },
    /// An object's bounds stopped intersecting a named trigger volume.
    TriggerExit { volume: String, actor: ActorInfo },

    // --- Quiz ---
    /// Display the current question on the quiz surfaces.
    ShowQuestion,
    /// Player picked an answer slot (0-based).
    SubmitAnswer { index: i64 },
    /// The question behind a gate has been answered.
    AnswerSubmitted { gate: String },
    /// Unassign the current question and blank the answer slots.
    ClearQuestion,

    // --- Doors ---
    /// Flip a reusable door between open and closed.
    ToggleDoor { door: String },
    /// The scene destroyed a door entity.
    DespawnDoor { door: String },

    // --- Clap release ---
    /// Clap signal: 1 stage (left button) or 2 stages (right button).
    Clap { stages: u8 },

    // --- Flow ---
    /// Dismiss the guide and hand control to the player.
    BeginPlay,
}
