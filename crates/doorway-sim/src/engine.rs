//! Scene engine: the fixed-rate loop that owns every door, gate and panel.
//!
//! `SceneEngine` owns the hecs ECS world, drains queued commands at the tick
//! boundary, resumes deferred tasks, runs the systems and produces a
//! `SceneSnapshot`. Headless, so whole scenes can be driven from tests.

use std::collections::{HashMap, VecDeque};

use hecs::{Entity, World};

use doorway_core::commands::SceneCommand;
use doorway_core::config::{DispatcherConfig, QuizAction, SceneConfig};
use doorway_core::constants::{DEFAULT_CLIP_VOLUME, TICK_RATE};
use doorway_core::enums::{MotionOrigin, OneShotState, ReleaseLatch};
use doorway_core::events::SceneEvent;
use doorway_core::state::SceneSnapshot;
use doorway_core::types::{ActorInfo, Ray, SimTime};

use crate::quiz::QuizManager;
use crate::scene_setup;
use crate::scheduler::{DeferredTask, TaskScheduler};
use crate::systems;
use crate::systems::clap_release::ClapRelease;
use crate::systems::door_animator;
use crate::systems::interaction::InteractionDispatcher;
use crate::systems::panel_trigger::PanelTrigger;
use crate::systems::trigger_gate::TriggerGate;
use crate::ui_registry::UiRegistry;

/// Configuration for constructing an engine.
pub struct EngineConfig {
    /// Ticks per second.
    pub tick_rate: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tick_rate: TICK_RATE,
        }
    }
}

/// The scene engine. Owns the ECS world and all scene state.
pub struct SceneEngine {
    world: World,
    time: SimTime,
    dt: f64,
    command_queue: VecDeque<SceneCommand>,
    despawn_buffer: Vec<Entity>,
    events: Vec<SceneEvent>,
    scheduler: TaskScheduler,
    ui: UiRegistry,

    doors: HashMap<String, Entity>,
    dispatcher: InteractionDispatcher,
    gates: HashMap<String, TriggerGate>,
    panels: HashMap<String, PanelTrigger>,
    clap: Option<ClapRelease>,
    quiz: QuizManager,
    clips: HashMap<String, f64>,

    player_control: bool,
    guide_surface: Option<String>,
    viewer: Option<Ray>,
    interact_pressed: bool,
}

impl SceneEngine {
    /// Create an engine with an empty scene.
    pub fn new(config: EngineConfig) -> Self {
        let tick_rate = if config.tick_rate == 0 {
            log::warn!("tick rate 0 requested, using {TICK_RATE}");
            TICK_RATE
        } else {
            config.tick_rate
        };

        Self {
            world: World::new(),
            time: SimTime::default(),
            dt: 1.0 / f64::from(tick_rate),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            scheduler: TaskScheduler::new(),
            ui: UiRegistry::new(),
            doors: HashMap::new(),
            dispatcher: InteractionDispatcher::new(DispatcherConfig::default()),
            gates: HashMap::new(),
            panels: HashMap::new(),
            clap: None,
            quiz: QuizManager::default(),
            clips: HashMap::new(),
            player_control: false,
            guide_surface: None,
            viewer: None,
            interact_pressed: false,
        }
    }

    /// Create an engine and load `scene` into it.
    pub fn with_scene(config: EngineConfig, scene: &SceneConfig) -> Self {
        let mut engine = Self::new(config);
        engine.load_scene(scene);
        engine
    }

    /// Replace the current scene. Time restarts at zero.
    pub fn load_scene(&mut self, scene: &SceneConfig) {
        self.teardown();

        self.doors = scene_setup::setup_scene(&mut self.world, &mut self.ui, scene);
        self.dispatcher = InteractionDispatcher::new(scene.dispatcher.clone());
        self.gates = scene
            .gates
            .iter()
            .map(|gate| (gate.name.clone(), TriggerGate::new(gate, &self.ui)))
            .collect();

        let mut panels = HashMap::new();
        for panel in &scene.panel_triggers {
            let trigger = PanelTrigger::new(panel.clone(), &mut self.ui);
            panels.insert(trigger.volume().to_string(), trigger);
        }
        self.panels = panels;

        self.clap = scene.clap_release.clone().map(ClapRelease::new);
        self.quiz = QuizManager::new(&scene.quiz);
        self.clips = scene
            .clips
            .iter()
            .map(|(clip, secs)| (clip.clone(), *secs))
            .collect();
        self.player_control = scene.start_with_player_control;
        self.guide_surface = scene.guide_surface.clone();

        log::info!(
            "scene loaded: {} doors, {} gates, {} surfaces",
            self.doors.len(),
            self.gates.len(),
            self.ui.len()
        );
    }

    /// Drop every entity, surface and pending task.
    pub fn teardown(&mut self) {
        self.world.clear();
        self.ui.clear();
        self.scheduler.clear();
        self.command_queue.clear();
        self.despawn_buffer.clear();
        self.events.clear();
        self.doors.clear();
        self.dispatcher = InteractionDispatcher::new(DispatcherConfig::default());
        self.gates.clear();
        self.panels.clear();
        self.clap = None;
        self.quiz = QuizManager::default();
        self.clips.clear();
        self.player_control = false;
        self.guide_surface = None;
        self.viewer = None;
        self.interact_pressed = false;
        self.time = SimTime::default();
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: SceneCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = SceneCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the scene by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> SceneSnapshot {
        self.process_commands();
        self.run_deferred();
        self.run_systems();
        self.time.advance(self.dt);

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.player_control,
            &self.dispatcher,
            &self.gates,
            &self.ui,
            self.scheduler.len(),
            events,
        )
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Seconds per tick.
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn ui(&self) -> &UiRegistry {
        &self.ui
    }

    pub fn player_control_enabled(&self) -> bool {
        self.player_control
    }

    pub fn door_entity(&self, name: &str) -> Option<Entity> {
        self.doors.get(name).copied()
    }

    pub fn gate(&self, name: &str) -> Option<&TriggerGate> {
        self.gates.get(name)
    }

    pub fn has_panel(&self, volume: &str) -> bool {
        self.panels.contains_key(volume)
    }

    pub fn interaction_state(&self, entity: Entity) -> OneShotState {
        self.dispatcher.state(entity)
    }

    pub fn dispatcher(&self) -> &InteractionDispatcher {
        &self.dispatcher
    }

    pub fn quiz(&self) -> &QuizManager {
        &self.quiz
    }

    pub fn clap_latch(&self) -> Option<ReleaseLatch> {
        self.clap.as_ref().map(ClapRelease::latch)
    }

    /// Deferred tasks waiting for their tick.
    pub fn pending_tasks(&self) -> usize {
        self.scheduler.len()
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single command.
    fn handle_command(&mut self, command: SceneCommand) {
        match command {
            SceneCommand::SetViewer { origin, forward } => {
                self.viewer = Some(Ray::new(origin, forward));
            }
            SceneCommand::Interact => {
                self.interact_pressed = true;
            }
            SceneCommand::TriggerEnter { volume, actor } => {
                self.trigger_enter(&volume, &actor);
            }
            SceneCommand::TriggerExit { volume, actor } => {
                if let Some(gate) = self.gates.get_mut(&volume) {
                    gate.on_exit(&actor, &mut self.ui);
                }
                if let Some(panel) = self.panels.get(&volume) {
                    panel.on_exit(&actor, &mut self.ui);
                }
            }
            SceneCommand::ShowQuestion => self.show_question(),
            SceneCommand::SubmitAnswer { index } => self.submit_answer(index),
            SceneCommand::AnswerSubmitted { gate } => self.answer_gate(&gate),
            SceneCommand::ClearQuestion => self.quiz.clear(&mut self.ui),
            SceneCommand::ToggleDoor { door } => self.toggle_door(&door),
            SceneCommand::DespawnDoor { door } => match self.doors.remove(&door) {
                Some(entity) => self.despawn_buffer.push(entity),
                None => log::warn!("configuration missing: door '{door}' not in scene"),
            },
            SceneCommand::Clap { stages } => self.clap(stages),
            SceneCommand::BeginPlay => {
                match self.guide_surface.as_deref() {
                    Some(guide) => {
                        if !self.ui.set_visible_by_name(guide, false) {
                            log::warn!("configuration missing: guide surface '{guide}'");
                        }
                    }
                    None => log::warn!("configuration missing: guide surface"),
                }
                self.set_player_control(true);
            }
        }
    }

    /// Resume every deferred task due this tick.
    fn run_deferred(&mut self) {
        for task in self.scheduler.drain_due(self.time.tick) {
            match task {
                DeferredTask::PlayClip { clip, volume } => {
                    self.events.push(SceneEvent::PlayClip { clip, volume });
                }
                DeferredTask::LoadLevel { name } => {
                    log::info!("loading level '{name}'");
                    self.events.push(SceneEvent::LoadLevel { name });
                }
                DeferredTask::ClapRelease => self.release_clap(),
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self) {
        // 1. Interaction ray and interact edge
        let interact = std::mem::take(&mut self.interact_pressed);
        self.dispatcher
            .run(&mut self.world, self.viewer.as_ref(), interact);
        // 2. Door interpolation
        let finished = door_animator::run(&mut self.world, self.dt);
        for end in finished {
            if end.origin == MotionOrigin::Interaction {
                self.dispatcher.on_motion_complete(
                    &self.world,
                    end.entity,
                    self.time.tick,
                    self.dt,
                    &self.clips,
                    &mut self.scheduler,
                    &mut self.events,
                );
            }
        }
        // 3. Cleanup (despawned doors)
        systems::cleanup::run(
            &mut self.world,
            &mut self.despawn_buffer,
            &mut self.dispatcher,
        );
    }

    fn trigger_enter(&mut self, volume: &str, actor: &ActorInfo) {
        let mut handled = false;

        if self.dispatcher.config().area_volume.as_deref() == Some(volume) {
            handled = true;
            self.dispatcher.on_area_enter(&mut self.events);
        }

        if let Some(gate) = self.gates.get_mut(volume) {
            handled = true;
            if gate.on_enter(actor, &mut self.ui, &mut self.events) {
                self.show_question();
            }
        }

        if let Some(panel) = self.panels.get(volume) {
            handled = true;
            if panel.on_enter(actor, &mut self.ui, &mut self.events) {
                self.set_player_control(false);
            }
        }

        if !handled {
            log::debug!("trigger '{volume}' has no listener");
        }
    }

    fn show_question(&mut self) {
        if let Err(err) = self.quiz.show_question(&mut self.ui, &mut self.events) {
            log::warn!("{err}");
        }
    }

    fn submit_answer(&mut self, index: i64) {
        let evaluation = match self.quiz.submit_answer(index) {
            Ok(evaluation) => evaluation,
            Err(err) => {
                log::warn!("answer rejected: {err}");
                return;
            }
        };

        log::info!(
            "answer {} is {}",
            evaluation.index,
            if evaluation.correct { "correct" } else { "wrong" }
        );
        self.events.push(SceneEvent::AnswerEvaluated {
            index: evaluation.index,
            correct: evaluation.correct,
        });
        for action in evaluation.actions {
            self.apply_quiz_action(action);
        }
    }

    fn apply_quiz_action(&mut self, action: QuizAction) {
        match action {
            QuizAction::MarkGateAnswered { gate } => self.answer_gate(&gate),
            QuizAction::ToggleDoor { door } => self.toggle_door(&door),
            QuizAction::PlayClip { clip } => self.events.push(SceneEvent::PlayClip {
                clip,
                volume: DEFAULT_CLIP_VOLUME,
            }),
            QuizAction::HideSurface { surface } => {
                if !self.ui.set_visible_by_name(&surface, false) {
                    log::warn!("configuration missing: surface '{surface}'");
                }
            }
        }
    }

    fn answer_gate(&mut self, name: &str) {
        match self.gates.get_mut(name) {
            Some(gate) => {
                gate.on_answer(&mut self.events);
            }
            None => log::warn!("configuration missing: gate '{name}' not in scene"),
        }
    }

    fn toggle_door(&mut self, name: &str) {
        let Some(&entity) = self.doors.get(name) else {
            log::warn!("configuration missing: door '{name}' not in scene");
            return;
        };
        match door_animator::toggle(&mut self.world, entity) {
            Ok(Some(MotionOrigin::Interaction)) => self.dispatcher.on_motion_cancelled(entity),
            Ok(_) => {}
            Err(err) => log::warn!("{err}"),
        }
    }

    fn clap(&mut self, stages: u8) {
        let Some(clap) = self.clap.as_ref() else {
            log::warn!("configuration missing: no clap release in scene");
            return;
        };
        match clap.signal(
            stages,
            self.time.tick,
            self.dt,
            &mut self.scheduler,
            &mut self.events,
        ) {
            Ok(true) => self.release_clap(),
            Ok(false) => {}
            Err(err) => log::warn!("clap rejected: {err}"),
        }
    }

    fn release_clap(&mut self) {
        let Some(clap) = self.clap.as_mut() else {
            return;
        };
        let Some(released) =
            clap.release(&mut self.world, &self.doors, &mut self.ui, &mut self.events)
        else {
            return;
        };

        if let (Some(door), Some(MotionOrigin::Interaction)) = (released.door, released.cancelled) {
            self.dispatcher.on_motion_cancelled(door);
        }
        self.set_player_control(true);
        if let Some(volume) = released.trigger_volume {
            self.remove_volume(&volume);
        }
    }

    fn remove_volume(&mut self, volume: &str) {
        let panel = self.panels.remove(volume).is_some();
        let gate = self.gates.remove(volume).is_some();
        if panel || gate {
            log::info!("trigger volume '{volume}' removed");
        } else {
            log::warn!("configuration missing: trigger volume '{volume}' not in scene");
        }
    }

    fn set_player_control(&mut self, enabled: bool) {
        if self.player_control == enabled {
            return;
        }
        self.player_control = enabled;
        log::info!("player control {}", if enabled { "enabled" } else { "disabled" });
        self.events.push(SceneEvent::PlayerControl { enabled });
    }
}
