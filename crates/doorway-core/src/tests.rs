#[cfg(test)]
mod tests {
    use crate::commands::SceneCommand;
    use crate::config::{QuizAction, SceneConfig};
    use crate::constants::*;
    use crate::enums::*;
    use crate::error::ConfigError;
    use crate::events::SceneEvent;
    use crate::types::{secs_to_ticks, ActorInfo, Capability, Ray, SimTime};
    use glam::DVec3;

    #[test]
    fn test_empty_scene_uses_defaults() {
        let config = SceneConfig::from_json_str("{}").unwrap();
        assert!(config.doors.is_empty());
        assert_eq!(config.dispatcher.interact_distance, DEFAULT_INTERACT_DISTANCE);
        assert_eq!(
            config.dispatcher.layers,
            vec![InteractionLayer::Door, InteractionLayer::DoorLoad]
        );
        assert!(!config.start_with_player_control);
    }

    #[test]
    fn test_door_defaults_fill_missing_fields() {
        let json = r#"{ "doors": [ { "name": "front", "layer": "DoorLoad" } ] }"#;
        let config = SceneConfig::from_json_str(json).unwrap();
        let door = &config.doors[0];
        assert_eq!(door.open_angle_deg, DEFAULT_OPEN_ANGLE_DEG);
        assert_eq!(door.speed, DEFAULT_DOOR_SPEED);
        assert_eq!(door.tag, DOOR_TAG);
        assert_eq!(door.layer.category(), DoorCategory::Transitional);
    }

    #[test]
    fn test_gate_defaults_match_quiz_conventions() {
        let json = r#"{ "gates": [ { "name": "quiz_zone" } ] }"#;
        let config = SceneConfig::from_json_str(json).unwrap();
        let gate = &config.gates[0];
        assert_eq!(gate.surface_name, DEFAULT_QUIZ_SURFACE_NAME);
        assert_eq!(gate.surface_tag, DEFAULT_QUIZ_SURFACE_TAG);
        assert!(gate.hide_on_exit);
        assert!(gate.disarm_on_exhaustion);
        assert_eq!(gate.activations_after_answer, 0);
    }

    #[test]
    fn test_duplicate_door_names_rejected() {
        let json = r#"{ "doors": [ { "name": "a" }, { "name": "a" } ] }"#;
        let err = SceneConfig::from_json_str(json).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(msg) if msg.contains("duplicate door")));
    }

    #[test]
    fn test_non_positive_speed_rejected() {
        let json = r#"{ "doors": [ { "name": "a", "speed": 0.0 } ] }"#;
        assert!(matches!(
            SceneConfig::from_json_str(json),
            Err(ConfigError::Invalid(_))
        ));
        let json = r#"{ "dispatcher": { "interact_distance": -1.0 } }"#;
        assert!(matches!(
            SceneConfig::from_json_str(json),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_malformed_json_is_json_error() {
        assert!(matches!(
            SceneConfig::from_json_str("{ doors: "),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_correct_index_clamped_into_range() {
        let json = r#"{ "quiz": { "question": {
            "text": "2 + 2?", "answers": ["3", "4"], "correct_index": 7,
            "on_correct": [ { "type": "MarkGateAnswered", "gate": "quiz_zone" } ]
        } } }"#;
        let config = SceneConfig::from_json_str(json).unwrap();
        let question = config.quiz.question.unwrap();
        assert_eq!(question.correct_index, 1);
        assert_eq!(
            question.on_correct,
            vec![QuizAction::MarkGateAnswered {
                gate: "quiz_zone".into()
            }]
        );
    }

    #[test]
    fn test_scene_command_tagged_json() {
        let json = r#"{ "type": "TriggerEnter", "volume": "quiz_zone",
            "actor": { "name": "hero", "tag": "Player" } }"#;
        let cmd: SceneCommand = serde_json::from_str(json).unwrap();
        match cmd {
            SceneCommand::TriggerEnter { volume, actor } => {
                assert_eq!(volume, "quiz_zone");
                assert!(actor.has_tag(PLAYER_TAG));
                assert!(actor.capabilities.is_empty());
            }
            other => panic!("unexpected command {other:?}"),
        }

        let cmd: SceneCommand = serde_json::from_str(r#"{ "type": "Clap", "stages": 2 }"#).unwrap();
        assert!(matches!(cmd, SceneCommand::Clap { stages: 2 }));
    }

    #[test]
    fn test_scene_event_serializes_with_type_tag() {
        let event = SceneEvent::LoadLevel {
            name: "level_2".into(),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"type":"LoadLevel","name":"level_2"}"#);
    }

    #[test]
    fn test_one_shot_state_flags() {
        assert!(!OneShotState::Closed.opened());
        assert!(OneShotState::Opening.opened() && OneShotState::Opening.animating());
        assert!(OneShotState::Open.opened() && !OneShotState::Open.animating());
    }

    #[test]
    fn test_gate_state_flags() {
        assert!(GateState::Unanswered.is_armed());
        assert!(!GateState::Unanswered.answered());
        assert!(GateState::Answered { remaining: 0 }.answered());
        assert!(!GateState::Disarmed.is_armed());
    }

    #[test]
    fn test_door_intent_flip_is_involution() {
        assert_eq!(DoorIntent::Closed.flipped(), DoorIntent::Open);
        assert_eq!(DoorIntent::Closed.flipped().flipped(), DoorIntent::Closed);
    }

    #[test]
    fn test_ray_normalizes_direction() {
        let ray = Ray::new(DVec3::ZERO, DVec3::new(0.0, 0.0, -4.0));
        assert!((ray.direction.length() - 1.0).abs() < 1e-12);
        assert_eq!(ray.at(2.0), DVec3::new(0.0, 0.0, -2.0));
        assert!(Ray::new(DVec3::ONE, DVec3::ZERO).is_degenerate());
    }

    #[test]
    fn test_actor_capabilities() {
        let actor = ActorInfo::new("crate", "Untagged").with_capability(Capability::RigidBody);
        assert!(actor.has_capability(&Capability::RigidBody));
        assert!(!actor.has_capability(&Capability::CharacterController));
        assert!(!actor.has_tag(""));
    }

    #[test]
    fn test_tick_timing_60_ticks_one_second() {
        let mut time = SimTime::default();
        for _ in 0..TICK_RATE {
            time.advance(DT);
        }
        assert_eq!(time.tick, 60);
        assert!((time.elapsed_secs - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_clap_delay_is_whole_ticks() {
        assert_eq!(secs_to_ticks(CLAP_SECOND_CUE_DELAY_SECS, DT), 18);
        assert_eq!(secs_to_ticks(0.5, DT), 30);
        assert_eq!(secs_to_ticks(0.0, DT), 0);
        assert_eq!(secs_to_ticks(1.0, 0.0), 0);
    }

    #[test]
    fn test_delay_rounds_up_at_coarse_tick_rates() {
        let dt = 1.0 / 7.0;
        let ticks = secs_to_ticks(CLAP_SECOND_CUE_DELAY_SECS, dt);
        assert_eq!(ticks, 3);
        assert!(ticks as f64 * dt >= CLAP_SECOND_CUE_DELAY_SECS);
        assert_eq!(secs_to_ticks(2.0 / 7.0, dt), 2);
    }

    #[test]
    fn test_oversized_clip_duration_rejected() {
        let json = r#"{ "clips": { "drone": 1e30 } }"#;
        assert!(matches!(
            SceneConfig::from_json_str(json),
            Err(ConfigError::Invalid(msg)) if msg.contains("drone")
        ));
        let json = r#"{ "clips": { "creak": 1.5 } }"#;
        assert!(SceneConfig::from_json_str(json).is_ok());
    }
}
