//! Scene systems and the components that drive them.
//!
//! Free-function systems take `&mut World` (or `&World` for read-only).
//! Gates, panels and the dispatcher keep their own state and are owned by
//! the engine.

pub mod clap_release;
pub mod cleanup;
pub mod door_animator;
pub mod interaction;
pub mod panel_trigger;
pub mod raycast;
pub mod snapshot;
pub mod trigger_gate;
