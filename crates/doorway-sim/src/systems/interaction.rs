//! Interaction dispatcher: the view-centred ray, one-shot door opening and
//! the level transition behind load doors.

use std::collections::HashMap;

use hecs::{Entity, World};

use doorway_core::components::{Door, DoorCollider, EntityName, Tag, Transform};
use doorway_core::config::DispatcherConfig;
use doorway_core::constants::{DEFAULT_CLIP_VOLUME, DOOR_TAG};
use doorway_core::enums::{DoorCategory, DoorIntent, MotionOrigin, OneShotState};
use doorway_core::events::SceneEvent;
use doorway_core::types::Ray;
use doorway_fsm::door::open_orientation;
use doorway_fsm::oneshot::{begin, finish, InteractOutcome};

use crate::scheduler::{DeferredTask, TaskScheduler};
use crate::systems::{door_animator, raycast};

pub struct InteractionDispatcher {
    config: DispatcherConfig,
    registry: HashMap<Entity, OneShotState>,
    focused: Option<Entity>,
    area_clip_played: bool,
}

impl InteractionDispatcher {
    pub fn new(config: DispatcherConfig) -> Self {
        Self {
            config,
            registry: HashMap::new(),
            focused: None,
            area_clip_played: false,
        }
    }

    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    /// Door under the ray after the last `run`.
    pub fn focused(&self) -> Option<Entity> {
        self.focused
    }

    /// One-shot state of `entity`. Doors never interacted with are `Closed`.
    pub fn state(&self, entity: Entity) -> OneShotState {
        self.registry.get(&entity).copied().unwrap_or_default()
    }

    pub fn tracked_doors(&self) -> usize {
        self.registry.len()
    }

    /// Cast the ray and, on an interact edge, start opening the focused door.
    pub fn run(&mut self, world: &mut World, viewer: Option<&Ray>, interact: bool) -> InteractOutcome {
        let hit = match viewer {
            Some(ray) => raycast::cast(
                world,
                ray,
                self.config.interact_distance,
                &self.config.layers,
            ),
            None => None,
        };
        self.focused = hit.map(|hit| hit.entity).filter(|entity| {
            world
                .get::<&Tag>(*entity)
                .map(|tag| tag.0 == DOOR_TAG)
                .unwrap_or(false)
        });

        if !interact {
            return InteractOutcome::NoTarget;
        }
        let Some(entity) = self.focused else {
            log::debug!("interact: nothing in reach");
            return InteractOutcome::NoTarget;
        };

        let Some(next) = begin(self.state(entity)) else {
            log::debug!("interact: door {entity:?} already opened, ignored");
            return InteractOutcome::AlreadyInProgress;
        };

        let current = match world.get::<&Transform>(entity) {
            Ok(transform) => transform.rotation,
            Err(_) => {
                log::warn!("configuration missing: door {entity:?} has no transform");
                return InteractOutcome::NoTarget;
            }
        };
        let target = open_orientation(current, self.config.open_angle_deg);

        door_animator::start_motion(
            world,
            entity,
            target,
            self.config.speed,
            MotionOrigin::Interaction,
        );
        if let Ok(mut door) = world.get::<&mut Door>(entity) {
            door.intent = DoorIntent::Open;
        }
        self.registry.insert(entity, next);
        log::info!("interact: opening {}", door_name(world, entity));
        InteractOutcome::Started
    }

    /// An interaction task reached its target.
    #[allow(clippy::too_many_arguments)]
    pub fn on_motion_complete(
        &mut self,
        world: &World,
        entity: Entity,
        now_tick: u64,
        dt: f64,
        clips: &HashMap<String, f64>,
        scheduler: &mut TaskScheduler,
        events: &mut Vec<SceneEvent>,
    ) {
        let state = self.state(entity);
        if state != OneShotState::Opening {
            return;
        }
        self.registry.insert(entity, finish(state));

        let name = door_name(world, entity);
        log::info!("door '{name}' fully open");
        events.push(SceneEvent::DoorOpened { door: name });

        let category = world
            .get::<&DoorCollider>(entity)
            .map(|collider| collider.category())
            .unwrap_or_default();
        if category == DoorCategory::Transitional {
            self.begin_transition(now_tick, dt, clips, scheduler, events);
        }
    }

    /// An interaction task was replaced before it converged. The door
    /// counts as opened regardless.
    pub fn on_motion_cancelled(&mut self, entity: Entity) {
        if let Some(state) = self.registry.get_mut(&entity) {
            *state = finish(*state);
        }
    }

    /// First entry into the dispatcher's area plays the entry clip once.
    pub fn on_area_enter(&mut self, events: &mut Vec<SceneEvent>) {
        if self.area_clip_played {
            return;
        }
        match self.config.area_entry_clip.as_ref() {
            Some(clip) => {
                events.push(SceneEvent::PlayClip {
                    clip: clip.clone(),
                    volume: DEFAULT_CLIP_VOLUME,
                });
                self.area_clip_played = true;
            }
            None => log::warn!("configuration missing: area entry clip"),
        }
    }

    /// Drop registry entries whose entity no longer exists.
    pub fn prune(&mut self, world: &World) {
        self.registry.retain(|entity, _| world.contains(*entity));
        if self.focused.is_some_and(|e| !world.contains(e)) {
            self.focused = None;
        }
    }

    fn begin_transition(
        &self,
        now_tick: u64,
        dt: f64,
        clips: &HashMap<String, f64>,
        scheduler: &mut TaskScheduler,
        events: &mut Vec<SceneEvent>,
    ) {
        let Some(level) = self.config.next_level.clone() else {
            log::warn!("configuration missing: next level for transitional door");
            return;
        };

        let Some(clip) = self.config.transition_clip.as_ref() else {
            log::info!("loading level '{level}'");
            events.push(SceneEvent::LoadLevel { name: level });
            return;
        };

        events.push(SceneEvent::PlayClip {
            clip: clip.clone(),
            volume: DEFAULT_CLIP_VOLUME,
        });
        match clips.get(clip) {
            Some(&secs) => {
                log::info!("loading level '{level}' after '{clip}' ({secs:.2}s)");
                scheduler.schedule_after(now_tick, secs, dt, DeferredTask::LoadLevel { name: level });
            }
            None => {
                log::warn!("configuration missing: duration of clip '{clip}', loading now");
                events.push(SceneEvent::LoadLevel { name: level });
            }
        }
    }
}

pub(crate) fn door_name(world: &World, entity: Entity) -> String {
    world
        .get::<&EntityName>(entity)
        .map(|name| name.0.clone())
        .unwrap_or_else(|_| format!("{entity:?}"))
}
