//! Door animator system: advances every interpolation task by one tick.
//!
//! A door's task lives in its `Interpolation` component. Starting a task
//! replaces whatever was there, so the newest request always wins.

use glam::DQuat;
use hecs::{Entity, World};

use doorway_core::components::{Door, Interpolation, Transform};
use doorway_core::enums::{DoorIntent, DoorStatus, MotionOrigin};
use doorway_core::error::SceneError;
use doorway_fsm::door::{step, toggle_target};

/// A task that converged this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MotionEnd {
    pub entity: Entity,
    pub origin: MotionOrigin,
}

/// Start (or restart) the interpolation task on `entity`.
/// Returns the origin of the task that was cancelled, if any.
pub fn start_motion(
    world: &mut World,
    entity: Entity,
    target: DQuat,
    speed: f64,
    origin: MotionOrigin,
) -> Option<MotionOrigin> {
    let replaced = world
        .remove_one::<Interpolation>(entity)
        .ok()
        .map(|task| task.origin);

    if world
        .insert_one(
            entity,
            Interpolation {
                target,
                speed,
                origin,
            },
        )
        .is_err()
    {
        log::warn!("start_motion: entity {entity:?} no longer exists");
        return None;
    }

    if let Ok(mut door) = world.get::<&mut Door>(entity) {
        door.status = DoorStatus::Animating;
    }
    replaced
}

/// Flip the door's intent and animate toward the new target.
/// Returns the origin of the cancelled task, if one was in flight.
pub fn toggle(world: &mut World, entity: Entity) -> Result<Option<MotionOrigin>, SceneError> {
    let (intent, target, speed) = {
        let door = world
            .get::<&Door>(entity)
            .map_err(|_| SceneError::missing("toggle target has no Door component"))?;
        let (intent, target) = toggle_target(&door);
        (intent, target, door.speed)
    };

    if let Ok(mut door) = world.get::<&mut Door>(entity) {
        door.intent = intent;
    }
    log::debug!("door {entity:?} toggled to {intent:?}");
    Ok(start_motion(world, entity, target, speed, MotionOrigin::Toggle))
}

/// Put the door in its open orientation at once, cancelling any task.
/// Returns the origin of the cancelled task, if any.
pub fn snap_open(world: &mut World, entity: Entity) -> Result<Option<MotionOrigin>, SceneError> {
    let open = {
        let door = world
            .get::<&Door>(entity)
            .map_err(|_| SceneError::missing("snap target has no Door component"))?;
        door.open_orientation
    };

    let cancelled = world
        .remove_one::<Interpolation>(entity)
        .ok()
        .map(|task| task.origin);

    if let Ok(mut door) = world.get::<&mut Door>(entity) {
        door.intent = DoorIntent::Open;
        door.status = DoorStatus::Idle;
    }
    if let Ok(mut transform) = world.get::<&mut Transform>(entity) {
        transform.rotation = open;
    }
    Ok(cancelled)
}

/// Advance every task by `dt`. Finished tasks are removed and returned.
pub fn run(world: &mut World, dt: f64) -> Vec<MotionEnd> {
    let mut finished = Vec::new();

    for (entity, (transform, task, door)) in
        world.query_mut::<(&mut Transform, &Interpolation, Option<&mut Door>)>()
    {
        let result = step(transform.rotation, task.target, task.speed, dt);
        transform.rotation = result.rotation;
        if result.finished {
            if let Some(door) = door {
                door.status = DoorStatus::Idle;
            }
            finished.push(MotionEnd {
                entity,
                origin: task.origin,
            });
        }
    }

    for end in &finished {
        if world.remove_one::<Interpolation>(end.entity).is_err() {
            log::debug!("door {:?}: finished task already gone", end.entity);
        }
    }
    finished
}
