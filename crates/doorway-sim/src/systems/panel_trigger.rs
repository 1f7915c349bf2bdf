//! Lock panel volume: freezes the player in front of the locked door.

use doorway_core::config::PanelTriggerConfig;
use doorway_core::constants::{DEFAULT_CLIP_VOLUME, PLAYER_TAG};
use doorway_core::events::SceneEvent;
use doorway_core::types::ActorInfo;

use crate::ui_registry::UiRegistry;

#[derive(Debug, Clone)]
pub struct PanelTrigger {
    config: PanelTriggerConfig,
}

impl PanelTrigger {
    /// Build the trigger and hide its panel.
    pub fn new(config: PanelTriggerConfig, ui: &mut UiRegistry) -> Self {
        let trigger = Self { config };
        trigger.set_panel(ui, false);
        trigger
    }

    pub fn volume(&self) -> &str {
        &self.config.volume
    }

    /// Player entered: show the panel and play the door voice.
    /// Returns `true` when player control should be taken away.
    pub fn on_enter(
        &self,
        actor: &ActorInfo,
        ui: &mut UiRegistry,
        events: &mut Vec<SceneEvent>,
    ) -> bool {
        if !actor.has_tag(PLAYER_TAG) {
            return false;
        }
        self.set_panel(ui, true);
        match &self.config.door_voice_clip {
            Some(clip) => events.push(SceneEvent::PlayClip {
                clip: clip.clone(),
                volume: DEFAULT_CLIP_VOLUME,
            }),
            None => log::warn!(
                "configuration missing: door voice clip for '{}'",
                self.config.volume
            ),
        }
        true
    }

    pub fn on_exit(&self, actor: &ActorInfo, ui: &mut UiRegistry) {
        if actor.has_tag(PLAYER_TAG) {
            self.set_panel(ui, false);
        }
    }

    fn set_panel(&self, ui: &mut UiRegistry, visible: bool) {
        let Some(panel) = self.config.panel.as_deref() else {
            log::warn!("configuration missing: panel for '{}'", self.config.volume);
            return;
        };
        if !ui.set_visible_by_name(panel, visible) {
            log::warn!("configuration missing: panel '{panel}' not registered");
        }
    }
}
