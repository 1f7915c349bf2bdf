//! Clap release: one or two cues, then the locked door swings open.
//!
//! Each signal is its own sequence; sequences may overlap. The release runs
//! through a latch, so only the first sequence to finish has any effect.

use std::collections::HashMap;

use hecs::{Entity, World};

use doorway_core::config::ClapReleaseConfig;
use doorway_core::enums::{MotionOrigin, ReleaseLatch};
use doorway_core::error::SceneError;
use doorway_core::events::SceneEvent;
use doorway_fsm::clap::{plan, try_release};

use crate::scheduler::{DeferredTask, TaskScheduler};
use crate::systems::door_animator;
use crate::ui_registry::UiRegistry;

/// What the engine still has to do after a release.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Released {
    pub door: Option<Entity>,
    /// Task the snap cancelled, if any.
    pub cancelled: Option<MotionOrigin>,
    /// Volume to remove from the scene.
    pub trigger_volume: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ClapRelease {
    config: ClapReleaseConfig,
    latch: ReleaseLatch,
}

impl ClapRelease {
    pub fn new(config: ClapReleaseConfig) -> Self {
        Self {
            config,
            latch: ReleaseLatch::Locked,
        }
    }

    pub fn latch(&self) -> ReleaseLatch {
        self.latch
    }

    /// Start a sequence. Cues due now are emitted, later ones scheduled.
    /// Returns `true` when the release is due this tick.
    pub fn signal(
        &self,
        stages: u8,
        now_tick: u64,
        dt: f64,
        scheduler: &mut TaskScheduler,
        events: &mut Vec<SceneEvent>,
    ) -> Result<bool, SceneError> {
        let plan = plan(stages)?;
        log::info!("clap: {stages}-stage sequence");

        match &self.config.cue_clip {
            Some(clip) => {
                for offset in &plan.cue_offsets_secs {
                    if *offset <= 0.0 {
                        events.push(SceneEvent::PlayClip {
                            clip: clip.clone(),
                            volume: self.config.cue_volume,
                        });
                    } else {
                        let task = DeferredTask::PlayClip {
                            clip: clip.clone(),
                            volume: self.config.cue_volume,
                        };
                        scheduler.schedule_after(now_tick, *offset, dt, task);
                    }
                }
            }
            None => log::warn!("configuration missing: clap cue clip"),
        }

        if plan.release_offset_secs <= 0.0 {
            return Ok(true);
        }
        scheduler.schedule_after(now_tick, plan.release_offset_secs, dt, DeferredTask::ClapRelease);
        Ok(false)
    }

    /// Release the door once. Later calls return `None`.
    pub fn release(
        &mut self,
        world: &mut World,
        doors: &HashMap<String, Entity>,
        ui: &mut UiRegistry,
        events: &mut Vec<SceneEvent>,
    ) -> Option<Released> {
        let (latch, released) = try_release(self.latch);
        self.latch = latch;
        if !released {
            log::debug!("clap: door already released");
            return None;
        }

        match self.config.panel.as_deref() {
            Some(panel) => {
                if !ui.set_visible_by_name(panel, false) {
                    log::warn!("configuration missing: lock panel '{panel}' not registered");
                }
            }
            None => log::warn!("configuration missing: lock panel"),
        }

        let mut door = None;
        let mut cancelled = None;
        match self.config.door.as_deref() {
            Some(name) => match doors.get(name) {
                Some(&entity) => match door_animator::snap_open(world, entity) {
                    Ok(origin) => {
                        door = Some(entity);
                        cancelled = origin;
                        log::info!("clap: door '{name}' released");
                        events.push(SceneEvent::DoorReleased {
                            door: name.to_string(),
                        });
                    }
                    Err(err) => log::warn!("{err}"),
                },
                None => log::warn!("configuration missing: locked door '{name}' not in scene"),
            },
            None => log::warn!("configuration missing: locked door"),
        }

        Some(Released {
            door,
            cancelled,
            trigger_volume: self.config.trigger_volume.clone(),
        })
    }
}
