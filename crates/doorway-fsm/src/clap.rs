//! Clap confirmation sequence.
//!
//! A signal of one or two stages plays the cue once per stage (the second
//! after a fixed delay), then releases the locked door. The release is
//! latched so overlapping sequences release at most once.

use doorway_core::constants::CLAP_SECOND_CUE_DELAY_SECS;
use doorway_core::enums::ReleaseLatch;
use doorway_core::error::SceneError;

/// Timing of one clap sequence, relative to the signal.
#[derive(Debug, Clone, PartialEq)]
pub struct ClapPlan {
    pub stages: u8,
    /// Offset of each cue in seconds.
    pub cue_offsets_secs: Vec<f64>,
    /// Offset of the release action in seconds.
    pub release_offset_secs: f64,
}

/// Build the plan for a signal. Only 1 and 2 stages are recognised.
pub fn plan(stages: u8) -> Result<ClapPlan, SceneError> {
    match stages {
        1 => Ok(ClapPlan {
            stages,
            cue_offsets_secs: vec![0.0],
            release_offset_secs: 0.0,
        }),
        2 => Ok(ClapPlan {
            stages,
            cue_offsets_secs: vec![0.0, CLAP_SECOND_CUE_DELAY_SECS],
            release_offset_secs: CLAP_SECOND_CUE_DELAY_SECS,
        }),
        other => Err(SceneError::OutOfRangeInput {
            what: "clap stage count",
            value: i64::from(other),
            min: 1,
            max: 2,
        }),
    }
}

/// Attempt the release. Returns the new latch and whether this call released.
pub fn try_release(latch: ReleaseLatch) -> (ReleaseLatch, bool) {
    match latch {
        ReleaseLatch::Locked => (ReleaseLatch::Released, true),
        ReleaseLatch::Released => (ReleaseLatch::Released, false),
    }
}
