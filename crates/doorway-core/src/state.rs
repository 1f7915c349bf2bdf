//! Scene snapshot: the complete visible state produced after each tick.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::SceneEvent;
use crate::types::SimTime;

/// Complete scene state handed to collaborators after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SceneSnapshot {
    pub time: SimTime,
    pub player_control_enabled: bool,
    /// Door currently under the viewer's interaction ray.
    pub focused_door: Option<String>,
    pub doors: Vec<DoorView>,
    pub gates: Vec<GateView>,
    pub surfaces: Vec<SurfaceView>,
    /// Deferred tasks still waiting for their tick.
    pub pending_tasks: usize,
    pub events: Vec<SceneEvent>,
}

/// A door as seen from outside.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoorView {
    pub name: String,
    /// Heading about the vertical axis (degrees).
    pub yaw_deg: f64,
    pub category: DoorCategory,
    pub intent: DoorIntent,
    pub status: DoorStatus,
    pub interaction: OneShotState,
}

/// Trigger gate status for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateView {
    pub name: String,
    pub state: GateState,
    pub sensor: SensorState,
}

/// UI surface enable state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfaceView {
    pub name: String,
    pub active: bool,
    pub interactable: bool,
    pub alpha: f32,
    pub text: String,
}
