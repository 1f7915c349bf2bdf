//! Cleanup system: despawns doors the scene destroyed and forgets them.

use hecs::{Entity, World};

use crate::systems::interaction::InteractionDispatcher;

/// Despawn buffered entities, then drop dispatcher entries for anything
/// no longer alive.
pub fn run(
    world: &mut World,
    despawn_buffer: &mut Vec<Entity>,
    dispatcher: &mut InteractionDispatcher,
) {
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
    dispatcher.prune(world);
}
