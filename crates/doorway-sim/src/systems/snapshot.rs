//! Snapshot system: reads the scene and assembles a SceneSnapshot.

use std::collections::HashMap;

use glam::EulerRot;
use hecs::World;

use doorway_core::components::{Door, DoorCollider, EntityName, Transform};
use doorway_core::events::SceneEvent;
use doorway_core::state::{DoorView, GateView, SceneSnapshot, SurfaceView};
use doorway_core::types::SimTime;

use crate::systems::interaction::{door_name, InteractionDispatcher};
use crate::systems::trigger_gate::TriggerGate;
use crate::ui_registry::UiRegistry;

/// Build the complete scene snapshot from current state.
#[allow(clippy::too_many_arguments)]
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    player_control_enabled: bool,
    dispatcher: &InteractionDispatcher,
    gates: &HashMap<String, TriggerGate>,
    ui: &UiRegistry,
    pending_tasks: usize,
    events: Vec<SceneEvent>,
) -> SceneSnapshot {
    SceneSnapshot {
        time: *time,
        player_control_enabled,
        focused_door: dispatcher.focused().map(|e| door_name(world, e)),
        doors: build_doors(world, dispatcher),
        gates: build_gates(gates),
        surfaces: build_surfaces(ui),
        pending_tasks,
        events,
    }
}

fn build_doors(world: &World, dispatcher: &InteractionDispatcher) -> Vec<DoorView> {
    let mut query = world.query::<(&EntityName, &Transform, &Door, Option<&DoorCollider>)>();
    let mut doors: Vec<DoorView> = query
        .iter()
        .map(|(entity, (name, transform, door, collider))| {
            let (yaw, _, _) = transform.rotation.to_euler(EulerRot::YXZ);
            DoorView {
                name: name.0.clone(),
                yaw_deg: yaw.to_degrees(),
                category: collider.map(|c| c.category()).unwrap_or_default(),
                intent: door.intent,
                status: door.status,
                interaction: dispatcher.state(entity),
            }
        })
        .collect();

    doors.sort_by(|a, b| a.name.cmp(&b.name));
    doors
}

fn build_gates(gates: &HashMap<String, TriggerGate>) -> Vec<GateView> {
    let mut views: Vec<GateView> = gates.values().map(TriggerGate::view).collect();
    views.sort_by(|a, b| a.name.cmp(&b.name));
    views
}

fn build_surfaces(ui: &UiRegistry) -> Vec<SurfaceView> {
    ui.iter()
        .map(|(_, s)| SurfaceView {
            name: s.name.clone(),
            active: s.active,
            interactable: s.interactable,
            alpha: s.alpha,
            text: s.text.clone(),
        })
        .collect()
}
