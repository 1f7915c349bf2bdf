//! Scene configuration, loaded from JSON.
//!
//! Every field has a default so a scene file only names what it changes.

use std::collections::{BTreeMap, HashSet};
use std::path::Path;

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::enums::InteractionLayer;
use crate::error::ConfigError;

/// Everything needed to populate one scene.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    pub doors: Vec<DoorConfig>,
    pub dispatcher: DispatcherConfig,
    pub gates: Vec<GateConfig>,
    pub panel_triggers: Vec<PanelTriggerConfig>,
    pub clap_release: Option<ClapReleaseConfig>,
    pub surfaces: Vec<SurfaceConfig>,
    pub quiz: QuizConfig,
    /// Clip name → duration in seconds.
    pub clips: BTreeMap<String, f64>,
    /// Surface hidden by `BeginPlay`.
    pub guide_surface: Option<String>,
    /// Whether the player may move before `BeginPlay`.
    pub start_with_player_control: bool,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            doors: Vec::new(),
            dispatcher: DispatcherConfig::default(),
            gates: Vec::new(),
            panel_triggers: Vec::new(),
            clap_release: None,
            surfaces: Vec::new(),
            quiz: QuizConfig::default(),
            clips: BTreeMap::new(),
            guide_surface: None,
            start_with_player_control: false,
        }
    }
}

/// A door leaf placed in the scene.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DoorConfig {
    pub name: String,
    pub position: DVec3,
    /// Initial heading about the vertical axis (degrees).
    pub yaw_deg: f64,
    pub open_angle_deg: f64,
    pub speed: f64,
    pub half_extents: DVec3,
    pub layer: InteractionLayer,
    pub tag: String,
}

impl Default for DoorConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            position: DVec3::ZERO,
            yaw_deg: 0.0,
            open_angle_deg: DEFAULT_OPEN_ANGLE_DEG,
            speed: DEFAULT_DOOR_SPEED,
            half_extents: DVec3::from_array(DEFAULT_DOOR_HALF_EXTENTS),
            layer: InteractionLayer::Door,
            tag: DOOR_TAG.to_string(),
        }
    }
}

/// Settings of the view-centred interaction ray.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatcherConfig {
    pub interact_distance: f64,
    pub open_angle_deg: f64,
    pub speed: f64,
    /// Layers the ray can hit.
    pub layers: Vec<InteractionLayer>,
    /// Level requested when a transitional door finishes opening.
    pub next_level: Option<String>,
    /// Clip played before the level load.
    pub transition_clip: Option<String>,
    /// Volume whose first entry plays `area_entry_clip`.
    pub area_volume: Option<String>,
    pub area_entry_clip: Option<String>,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            interact_distance: DEFAULT_INTERACT_DISTANCE,
            open_angle_deg: DEFAULT_OPEN_ANGLE_DEG,
            speed: DEFAULT_DOOR_SPEED,
            layers: vec![InteractionLayer::Door, InteractionLayer::DoorLoad],
            next_level: None,
            transition_clip: None,
            area_volume: None,
            area_entry_clip: None,
        }
    }
}

/// A quiz gate bound to the trigger volume of the same name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    pub name: String,
    /// Explicit surface reference; wins over every other lookup.
    pub surface: Option<String>,
    /// Owner whose surfaces are used when no explicit surface is set.
    pub owner: Option<String>,
    pub surface_name: String,
    pub surface_tag: String,
    pub hide_on_exit: bool,
    pub disarm_on_exhaustion: bool,
    pub activations_after_answer: u32,
    /// Whether the gate has a sensor that can be disabled on its own.
    pub has_sensor: bool,
    pub player_tag: String,
    pub movement_component: String,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            surface: None,
            owner: None,
            surface_name: DEFAULT_QUIZ_SURFACE_NAME.to_string(),
            surface_tag: DEFAULT_QUIZ_SURFACE_TAG.to_string(),
            hide_on_exit: true,
            disarm_on_exhaustion: true,
            activations_after_answer: 0,
            has_sensor: true,
            player_tag: PLAYER_TAG.to_string(),
            movement_component: DEFAULT_MOVEMENT_COMPONENT.to_string(),
        }
    }
}

/// Volume that shows a panel and freezes the player while inside.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelTriggerConfig {
    pub volume: String,
    pub panel: Option<String>,
    pub door_voice_clip: Option<String>,
}

/// The locked door released by a clap sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ClapReleaseConfig {
    pub cue_clip: Option<String>,
    pub cue_volume: f32,
    pub door: Option<String>,
    pub panel: Option<String>,
    pub trigger_volume: Option<String>,
}

impl Default for ClapReleaseConfig {
    fn default() -> Self {
        Self {
            cue_clip: None,
            cue_volume: CLAP_CUE_VOLUME,
            door: None,
            panel: None,
            trigger_volume: None,
        }
    }
}

/// A UI surface registered at scene load.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    pub name: String,
    pub tag: Option<String>,
    pub owner: Option<String>,
    pub parent: Option<String>,
    pub active: bool,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            tag: None,
            owner: None,
            parent: None,
            active: true,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizConfig {
    pub question: Option<QuizQuestion>,
    /// Surface receiving the question text.
    pub question_surface: Option<String>,
    /// One surface per answer button, in order.
    pub answer_surfaces: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizQuestion {
    pub text: String,
    pub answers: Vec<String>,
    pub correct_index: usize,
    pub on_correct: Vec<QuizAction>,
    pub on_wrong: Vec<QuizAction>,
}

/// Designer-wired reaction to an answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum QuizAction {
    MarkGateAnswered { gate: String },
    ToggleDoor { door: String },
    PlayClip { clip: String },
    HideSurface { surface: String },
}

impl SceneConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let mut config: SceneConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Reject scenes the engine cannot run and repair the ones it can.
    pub fn validate(&mut self) -> Result<(), ConfigError> {
        check_unique("door", self.doors.iter().map(|d| d.name.as_str()))?;
        check_unique("gate", self.gates.iter().map(|g| g.name.as_str()))?;

        for door in &self.doors {
            if !(door.speed.is_finite() && door.speed > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "door '{}' speed must be positive, got {}",
                    door.name, door.speed
                )));
            }
        }

        let dispatcher = &self.dispatcher;
        if !(dispatcher.speed.is_finite() && dispatcher.speed > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "dispatcher speed must be positive, got {}",
                dispatcher.speed
            )));
        }
        if !(dispatcher.interact_distance.is_finite() && dispatcher.interact_distance > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "interact distance must be positive, got {}",
                dispatcher.interact_distance
            )));
        }

        for (clip, secs) in &self.clips {
            if !(secs.is_finite() && (0.0..=MAX_CLIP_SECS).contains(secs)) {
                return Err(ConfigError::Invalid(format!(
                    "clip '{clip}' has invalid duration {secs}"
                )));
            }
        }

        if let Some(question) = self.quiz.question.as_mut() {
            let clamped = if question.answers.is_empty() {
                0
            } else {
                question.correct_index.min(question.answers.len() - 1)
            };
            if clamped != question.correct_index {
                log::warn!(
                    "quiz correct_index {} clamped to {}",
                    question.correct_index,
                    clamped
                );
                question.correct_index = clamped;
            }
        }

        Ok(())
    }
}

fn check_unique<'a>(kind: &str, names: impl Iterator<Item = &'a str>) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();
    for name in names {
        if name.is_empty() {
            return Err(ConfigError::Invalid(format!("{kind} with empty name")));
        }
        if !seen.insert(name) {
            return Err(ConfigError::Invalid(format!("duplicate {kind} name '{name}'")));
        }
    }
    Ok(())
}
