//! Trigger gate: shows the quiz surface while a player stands in its volume
//! and switches itself off once the answered allowance is spent.

use doorway_core::config::GateConfig;
use doorway_core::enums::{GateState, SensorState};
use doorway_core::events::SceneEvent;
use doorway_core::state::GateView;
use doorway_core::types::{ActorInfo, Capability};
use doorway_fsm::gate::{on_answer, on_entry, AnswerOutcome, EntryOutcome, GatePolicy};

use crate::ui_registry::{UiRegistry, UiTarget};

/// Decides whether an object entering a volume is player-driven.
#[derive(Debug, Clone)]
pub struct ActorClassifier {
    player_tag: String,
    movement_component: String,
}

impl ActorClassifier {
    pub fn new(player_tag: impl Into<String>, movement_component: impl Into<String>) -> Self {
        Self {
            player_tag: player_tag.into(),
            movement_component: movement_component.into(),
        }
    }

    pub fn qualifies(&self, actor: &ActorInfo) -> bool {
        actor.has_tag(&self.player_tag)
            || actor.capabilities.iter().any(|c| match c {
                Capability::CharacterController | Capability::RigidBody => true,
                Capability::Component(name) => {
                    !self.movement_component.is_empty() && *name == self.movement_component
                }
            })
    }
}

#[derive(Debug, Clone)]
pub struct TriggerGate {
    name: String,
    state: GateState,
    sensor: SensorState,
    policy: GatePolicy,
    hide_on_exit: bool,
    has_sensor: bool,
    classifier: ActorClassifier,
    target: UiTarget,
}

impl TriggerGate {
    /// Build a gate. The explicit surface, if named, is looked up once here.
    pub fn new(config: &GateConfig, ui: &UiRegistry) -> Self {
        let explicit = config.surface.as_deref().and_then(|name| {
            let found = ui.find(name);
            if found.is_none() {
                log::warn!(
                    "configuration missing: gate '{}' surface '{}' not registered",
                    config.name,
                    name
                );
            }
            found
        });

        Self {
            name: config.name.clone(),
            state: GateState::Unanswered,
            sensor: SensorState::Enabled,
            policy: GatePolicy {
                activations_after_answer: config.activations_after_answer,
                disarm_on_exhaustion: config.disarm_on_exhaustion,
            },
            hide_on_exit: config.hide_on_exit,
            has_sensor: config.has_sensor,
            classifier: ActorClassifier::new(&config.player_tag, &config.movement_component),
            target: UiTarget {
                explicit,
                owner: config.owner.clone(),
                name: Some(config.surface_name.clone()),
                tag: Some(config.surface_tag.clone()),
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> GateState {
        self.state
    }

    pub fn sensor(&self) -> SensorState {
        self.sensor
    }

    /// Handle an entry. Returns `true` when the question should be shown.
    pub fn on_enter(
        &mut self,
        actor: &ActorInfo,
        ui: &mut UiRegistry,
        events: &mut Vec<SceneEvent>,
    ) -> bool {
        if self.sensor != SensorState::Enabled || !self.classifier.qualifies(actor) {
            return false;
        }

        let (next, outcome) = on_entry(self.state, &self.policy);
        self.state = next;
        match outcome {
            EntryOutcome::Ignored => {
                log::debug!("gate '{}': entry by '{}' ignored", self.name, actor.name);
                false
            }
            EntryOutcome::Show => {
                ui.activate(&self.target);
                true
            }
            EntryOutcome::ShowAndDisarm => {
                ui.activate(&self.target);
                self.disarm(events);
                true
            }
        }
    }

    /// Handle an exit. Never changes the answer state.
    pub fn on_exit(&mut self, actor: &ActorInfo, ui: &mut UiRegistry) {
        if !self.hide_on_exit || !self.classifier.qualifies(actor) {
            return;
        }
        ui.deactivate(&self.target);
    }

    /// Record that the gate's question was answered.
    pub fn on_answer(&mut self, events: &mut Vec<SceneEvent>) -> AnswerOutcome {
        let (next, outcome) = on_answer(self.state, &self.policy);
        self.state = next;
        match outcome {
            AnswerOutcome::Recorded => {
                log::info!("gate '{}' answered, {:?}", self.name, self.state);
            }
            AnswerOutcome::RecordedAndDisarmed => {
                log::info!("gate '{}' answered with no allowance", self.name);
                self.disarm(events);
            }
            AnswerOutcome::AlreadyAnswered => {
                log::debug!("gate '{}': repeated answer ignored", self.name);
            }
        }
        outcome
    }

    pub fn view(&self) -> GateView {
        GateView {
            name: self.name.clone(),
            state: self.state,
            sensor: self.sensor,
        }
    }

    fn disarm(&mut self, events: &mut Vec<SceneEvent>) {
        self.state = GateState::Disarmed;
        self.sensor = if self.has_sensor {
            SensorState::SensorDisabled
        } else {
            SensorState::EntityDeactivated
        };
        log::info!("gate '{}' disarmed ({:?})", self.name, self.sensor);
        events.push(SceneEvent::GateDisarmed {
            gate: self.name.clone(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use doorway_core::constants::{DEFAULT_MOVEMENT_COMPONENT, PLAYER_TAG};

    fn classifier() -> ActorClassifier {
        ActorClassifier::new(PLAYER_TAG, DEFAULT_MOVEMENT_COMPONENT)
    }

    #[test]
    fn player_tag_qualifies() {
        assert!(classifier().qualifies(&ActorInfo::new("hero", "Player")));
    }

    #[test]
    fn capabilities_qualify_untagged_actors() {
        let c = classifier();
        assert!(c.qualifies(
            &ActorInfo::new("bot", "").with_capability(Capability::CharacterController)
        ));
        assert!(c.qualifies(&ActorInfo::new("ball", "").with_capability(Capability::RigidBody)));
        assert!(c.qualifies(
            &ActorInfo::new("npc", "")
                .with_capability(Capability::Component("PlayerMovement".into()))
        ));
    }

    #[test]
    fn scenery_does_not_qualify() {
        let c = classifier();
        assert!(!c.qualifies(&ActorInfo::new("lamp", "Untagged")));
        assert!(!c.qualifies(
            &ActorInfo::new("npc", "").with_capability(Capability::Component("Wander".into()))
        ));
    }

    #[test]
    fn non_qualifying_entry_leaves_ui_alone() {
        let mut ui = UiRegistry::new();
        let canvas = ui.register("QuizCanvas", None, None, None, false);
        let mut gate = TriggerGate::new(
            &GateConfig {
                name: "zone".into(),
                ..Default::default()
            },
            &ui,
        );
        let mut events = Vec::new();
        assert!(!gate.on_enter(&ActorInfo::new("lamp", ""), &mut ui, &mut events));
        assert!(!ui.get(canvas).unwrap().active);

        assert!(gate.on_enter(&ActorInfo::new("hero", "Player"), &mut ui, &mut events));
        assert!(ui.get(canvas).unwrap().active);
    }

    #[test]
    fn gate_without_sensor_deactivates_entity() {
        let ui = UiRegistry::new();
        let mut gate = TriggerGate::new(
            &GateConfig {
                name: "zone".into(),
                has_sensor: false,
                ..Default::default()
            },
            &ui,
        );
        let mut events = Vec::new();
        assert_eq!(gate.on_answer(&mut events), AnswerOutcome::RecordedAndDisarmed);
        assert_eq!(gate.sensor(), SensorState::EntityDeactivated);
        assert_eq!(
            events,
            vec![SceneEvent::GateDisarmed {
                gate: "zone".into()
            }]
        );
    }
}
