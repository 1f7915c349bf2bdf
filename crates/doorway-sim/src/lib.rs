//! Scene engine for DOORWAY.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate,
//! and produces SceneSnapshots for the presentation layer.

pub mod engine;
pub mod quiz;
pub mod scene_setup;
pub mod scheduler;
pub mod systems;
pub mod ui_registry;

pub use doorway_core as core;
pub use engine::{EngineConfig, SceneEngine};
