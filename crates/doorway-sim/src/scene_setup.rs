//! Entity spawn factories for populating a scene from its config.

use std::collections::HashMap;

use glam::DQuat;
use hecs::{Entity, World};

use doorway_core::components::*;
use doorway_core::config::{DoorConfig, SceneConfig};
use doorway_core::enums::*;
use doorway_fsm::door::open_orientation;

use crate::ui_registry::UiRegistry;

/// Spawn every door and register every UI surface. Returns doors by name.
pub fn setup_scene(
    world: &mut World,
    ui: &mut UiRegistry,
    config: &SceneConfig,
) -> HashMap<String, Entity> {
    for surface in &config.surfaces {
        ui.register_config(surface);
    }

    config
        .doors
        .iter()
        .map(|door| (door.name.clone(), spawn_door(world, door)))
        .collect()
}

/// Spawn a closed door. Its current heading becomes the closed orientation.
pub fn spawn_door(world: &mut World, config: &DoorConfig) -> Entity {
    let closed = DQuat::from_rotation_y(config.yaw_deg.to_radians());

    let door = Door {
        closed_orientation: closed,
        open_orientation: open_orientation(closed, config.open_angle_deg),
        intent: DoorIntent::Closed,
        status: DoorStatus::Idle,
        speed: config.speed,
    };

    world.spawn((
        EntityName(config.name.clone()),
        Tag(config.tag.clone()),
        Transform {
            position: config.position,
            rotation: closed,
        },
        DoorCollider {
            half_extents: config.half_extents,
            layer: config.layer,
        },
        door,
    ))
}
