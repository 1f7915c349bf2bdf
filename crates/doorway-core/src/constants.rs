//! Simulation constants and tuning parameters.

/// Scene tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Doors ---

/// Angular distance (degrees) below which an interpolation snaps to its target.
pub const ANGLE_EPSILON_DEG: f64 = 0.1;

/// Default swing of a door about the vertical axis (degrees).
pub const DEFAULT_OPEN_ANGLE_DEG: f64 = 90.0;

/// Default interpolation rate (slerp fraction per second).
pub const DEFAULT_DOOR_SPEED: f64 = 4.0;

/// Default collider half extents for a door leaf (meters).
pub const DEFAULT_DOOR_HALF_EXTENTS: [f64; 3] = [0.5, 1.0, 0.1];

/// Tag a collider must carry to be treated as an interactable door.
pub const DOOR_TAG: &str = "Door";

// --- Interaction ---

/// Maximum distance of the interaction ray (meters).
pub const DEFAULT_INTERACT_DISTANCE: f64 = 3.0;

// --- Trigger gates ---

/// Tag identifying the player actor.
pub const PLAYER_TAG: &str = "Player";

/// Movement component name that also qualifies an actor.
pub const DEFAULT_MOVEMENT_COMPONENT: &str = "PlayerMovement";

/// Default exact name of the quiz surface.
pub const DEFAULT_QUIZ_SURFACE_NAME: &str = "QuizCanvas";

/// Default tag of the quiz surface.
pub const DEFAULT_QUIZ_SURFACE_TAG: &str = "QuizUI";

/// Keyword matched (case-insensitive substring) during registry-wide search.
pub const QUIZ_SURFACE_KEYWORD: &str = "quiz";

// --- Clap release ---

/// Delay between the first and second cue of a two-stage clap (seconds).
pub const CLAP_SECOND_CUE_DELAY_SECS: f64 = 0.3;

/// Playback volume of the clap cue.
pub const CLAP_CUE_VOLUME: f32 = 0.8;

/// Longest clip duration a scene may declare (seconds).
pub const MAX_CLIP_SECS: f64 = 3600.0;

/// Playback volume used for ordinary one-shot clips.
pub const DEFAULT_CLIP_VOLUME: f32 = 1.0;
