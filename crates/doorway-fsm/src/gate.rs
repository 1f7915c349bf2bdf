//! Trigger gate finite state machine.
//!
//! `Unanswered → Answered { remaining } → Disarmed`. The answer is recorded
//! once; `remaining` only ever counts down.

use doorway_core::enums::GateState;

/// Per-gate configuration that drives the transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GatePolicy {
    /// Entries honoured after the answer.
    pub activations_after_answer: u32,
    /// Disarm once the allowance is spent.
    pub disarm_on_exhaustion: bool,
}

/// What an entry by a qualifying actor should do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryOutcome {
    /// Nothing: the gate is disarmed or its allowance is spent.
    Ignored,
    /// Show the question UI.
    Show,
    /// Show the question UI, then disarm.
    ShowAndDisarm,
}

/// What an "answer submitted" signal did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    Recorded,
    /// Recorded with a zero allowance; disarm now.
    RecordedAndDisarmed,
    /// Repeated signal; state unchanged.
    AlreadyAnswered,
}

/// Evaluate an entry. Returns the new state and the action to take.
pub fn on_entry(state: GateState, policy: &GatePolicy) -> (GateState, EntryOutcome) {
    match state {
        GateState::Unanswered => (state, EntryOutcome::Show),
        GateState::Answered { remaining: 0 } | GateState::Disarmed => {
            (state, EntryOutcome::Ignored)
        }
        GateState::Answered { remaining } => {
            let remaining = remaining - 1;
            if remaining == 0 && policy.disarm_on_exhaustion {
                (GateState::Disarmed, EntryOutcome::ShowAndDisarm)
            } else {
                (GateState::Answered { remaining }, EntryOutcome::Show)
            }
        }
    }
}

/// Evaluate an "answer submitted" signal.
pub fn on_answer(state: GateState, policy: &GatePolicy) -> (GateState, AnswerOutcome) {
    match state {
        GateState::Unanswered => {
            let remaining = policy.activations_after_answer;
            if remaining == 0 && policy.disarm_on_exhaustion {
                (GateState::Disarmed, AnswerOutcome::RecordedAndDisarmed)
            } else {
                (GateState::Answered { remaining }, AnswerOutcome::Recorded)
            }
        }
        GateState::Answered { .. } | GateState::Disarmed => {
            (state, AnswerOutcome::AlreadyAnswered)
        }
    }
}
