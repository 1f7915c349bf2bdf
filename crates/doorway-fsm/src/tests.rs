#[cfg(test)]
mod tests {
    use glam::DQuat;

    use doorway_core::components::Door;
    use doorway_core::constants::*;
    use doorway_core::enums::*;
    use doorway_core::error::SceneError;

    use crate::clap::{plan, try_release};
    use crate::door::{angle_deg, open_orientation, step, toggle_target};
    use crate::gate::{on_answer, on_entry, AnswerOutcome, EntryOutcome, GatePolicy};
    use crate::oneshot::{begin, finish};

    fn policy(activations_after_answer: u32, disarm_on_exhaustion: bool) -> GatePolicy {
        GatePolicy {
            activations_after_answer,
            disarm_on_exhaustion,
        }
    }

    fn make_door() -> Door {
        let closed = DQuat::from_rotation_y(0.3);
        Door {
            closed_orientation: closed,
            open_orientation: open_orientation(closed, DEFAULT_OPEN_ANGLE_DEG),
            intent: DoorIntent::Closed,
            status: DoorStatus::Idle,
            speed: DEFAULT_DOOR_SPEED,
        }
    }

    // ---- Door motion ----

    #[test]
    fn test_open_orientation_swings_by_open_angle() {
        let closed = DQuat::from_rotation_y(0.5);
        let open = open_orientation(closed, 90.0);
        assert!((angle_deg(closed, open) - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_step_strictly_decreases_and_terminates() {
        let start = DQuat::IDENTITY;
        let target = open_orientation(start, 90.0);
        let speeds = [0.5, DEFAULT_DOOR_SPEED, 20.0];

        for speed in speeds {
            let t = speed * DT;
            // (1 - t)^n * 90 < epsilon bounds the tick count.
            let bound = ((ANGLE_EPSILON_DEG / 90.0).ln() / (1.0 - t).ln()).ceil() as u32 + 1;

            let mut current = start;
            let mut previous = angle_deg(current, target);
            let mut ticks = 0;
            loop {
                let result = step(current, target, speed, DT);
                ticks += 1;
                if result.finished {
                    assert_eq!(result.rotation, target, "must snap exactly to target");
                    break;
                }
                let remaining = angle_deg(result.rotation, target);
                assert!(
                    remaining < previous,
                    "angle must strictly decrease: {remaining} >= {previous}"
                );
                previous = remaining;
                current = result.rotation;
                assert!(ticks <= bound, "speed {speed} exceeded {bound} ticks");
            }
            assert!(ticks <= bound);
        }
    }

    #[test]
    fn test_step_within_epsilon_snaps_immediately() {
        let target = DQuat::from_rotation_y(1.0);
        let current = DQuat::from_rotation_y(1.0 + 0.05_f64.to_radians());
        let result = step(current, target, DEFAULT_DOOR_SPEED, DT);
        assert!(result.finished);
        assert_eq!(result.rotation, target);
    }

    #[test]
    fn test_step_huge_rate_finishes_in_one_tick() {
        let target = DQuat::from_rotation_y(1.2);
        let result = step(DQuat::IDENTITY, target, 1_000.0, DT);
        assert!(result.finished);
    }

    #[test]
    fn test_step_zero_rate_snaps() {
        let target = DQuat::from_rotation_y(1.2);
        let result = step(DQuat::IDENTITY, target, 0.0, DT);
        assert!(result.finished);
        assert_eq!(result.rotation, target);
    }

    #[test]
    fn test_toggle_twice_returns_to_original_intent() {
        let mut door = make_door();
        let (intent, target) = toggle_target(&door);
        assert_eq!(intent, DoorIntent::Open);
        assert_eq!(target, door.open_orientation);
        door.intent = intent;

        let (intent, target) = toggle_target(&door);
        assert_eq!(intent, DoorIntent::Closed);
        assert_eq!(target, door.closed_orientation);
    }

    // ---- Gate ----

    #[test]
    fn test_unanswered_entries_always_show() {
        let p = policy(1, true);
        let mut state = GateState::Unanswered;
        for _ in 0..5 {
            let (next, outcome) = on_entry(state, &p);
            assert_eq!(outcome, EntryOutcome::Show);
            state = next;
        }
        assert_eq!(state, GateState::Unanswered);
    }

    #[test]
    fn test_answer_recorded_exactly_once() {
        let p = policy(2, true);
        let (state, outcome) = on_answer(GateState::Unanswered, &p);
        assert_eq!(outcome, AnswerOutcome::Recorded);
        assert_eq!(state, GateState::Answered { remaining: 2 });

        let (state, _) = on_entry(state, &p);
        assert_eq!(state, GateState::Answered { remaining: 1 });

        // A repeated answer must not refill the allowance.
        let (again, outcome) = on_answer(state, &p);
        assert_eq!(outcome, AnswerOutcome::AlreadyAnswered);
        assert_eq!(again, GateState::Answered { remaining: 1 });
    }

    #[test]
    fn test_zero_allowance_disarms_on_answer() {
        let (state, outcome) = on_answer(GateState::Unanswered, &policy(0, true));
        assert_eq!(outcome, AnswerOutcome::RecordedAndDisarmed);
        assert_eq!(state, GateState::Disarmed);
        assert!(state.answered());
    }

    #[test]
    fn test_single_allowance_sequence() {
        let p = policy(1, true);
        let (state, _) = on_answer(GateState::Unanswered, &p);
        let (state, outcome) = on_entry(state, &p);
        assert_eq!(outcome, EntryOutcome::ShowAndDisarm);
        assert_eq!(state, GateState::Disarmed);
        let (state, outcome) = on_entry(state, &p);
        assert_eq!(outcome, EntryOutcome::Ignored);
        assert_eq!(state, GateState::Disarmed);
    }

    #[test]
    fn test_exhausted_without_disarm_ignores_entries() {
        let p = policy(1, false);
        let (state, _) = on_answer(GateState::Unanswered, &p);
        let (state, outcome) = on_entry(state, &p);
        assert_eq!(outcome, EntryOutcome::Show);
        assert_eq!(state, GateState::Answered { remaining: 0 });
        let (state, outcome) = on_entry(state, &p);
        assert_eq!(outcome, EntryOutcome::Ignored);
        assert_eq!(state, GateState::Answered { remaining: 0 });
    }

    // ---- One-shot ----

    #[test]
    fn test_one_shot_opens_once() {
        let opening = begin(OneShotState::Closed).unwrap();
        assert_eq!(opening, OneShotState::Opening);
        assert_eq!(begin(opening), None);
        let open = finish(opening);
        assert_eq!(open, OneShotState::Open);
        assert_eq!(begin(open), None);
        assert_eq!(finish(OneShotState::Closed), OneShotState::Closed);
    }

    // ---- Clap ----

    #[test]
    fn test_clap_plans() {
        let single = plan(1).unwrap();
        assert_eq!(single.cue_offsets_secs, vec![0.0]);
        assert_eq!(single.release_offset_secs, 0.0);

        let double = plan(2).unwrap();
        assert_eq!(
            double.cue_offsets_secs,
            vec![0.0, CLAP_SECOND_CUE_DELAY_SECS]
        );
        assert_eq!(double.release_offset_secs, CLAP_SECOND_CUE_DELAY_SECS);
    }

    #[test]
    fn test_clap_rejects_other_stage_counts() {
        for stages in [0u8, 3, 255] {
            assert!(matches!(
                plan(stages),
                Err(SceneError::OutOfRangeInput { value, .. }) if value == i64::from(stages)
            ));
        }
    }

    #[test]
    fn test_release_latch_is_idempotent() {
        let (latch, released) = try_release(ReleaseLatch::Locked);
        assert!(released);
        let (latch, released) = try_release(latch);
        assert!(!released);
        assert_eq!(latch, ReleaseLatch::Released);
    }
}
