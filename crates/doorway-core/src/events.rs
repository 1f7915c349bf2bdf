//! Events emitted by the scene for the sound, level and UI collaborators.

use serde::{Deserialize, Serialize};

/// Side effects requested during a tick, drained into the snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SceneEvent {
    /// Fire-and-forget clip playback.
    PlayClip { clip: String, volume: f32 },
    /// Request the level loader to switch levels.
    LoadLevel { name: String },
    /// The current question was written to the quiz surfaces.
    QuestionShown { text: String },
    /// An answer was evaluated.
    AnswerEvaluated { index: usize, correct: bool },
    /// A one-shot door reached its open orientation.
    DoorOpened { door: String },
    /// The locked door was released by a clap sequence.
    DoorReleased { door: String },
    /// A trigger gate switched itself off for good.
    GateDisarmed { gate: String },
    /// Player control was enabled or disabled.
    PlayerControl { enabled: bool },
}
