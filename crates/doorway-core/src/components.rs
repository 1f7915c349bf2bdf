//! ECS components for hecs entities.
//!
//! Components are plain data structs. Game logic lives in systems,
//! not components.

use glam::{DQuat, DVec3};
use serde::{Deserialize, Serialize};

use crate::enums::*;

/// World placement of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: DVec3,
    pub rotation: DQuat,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: DVec3::ZERO,
            rotation: DQuat::IDENTITY,
        }
    }
}

/// Scene name of an entity (used by commands and snapshots).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityName(pub String);

/// Free-form tag, compared exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag(pub String);

/// A reusable door that toggles between two orientations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Door {
    /// Orientation captured once when the door was spawned.
    pub closed_orientation: DQuat,
    /// Closed orientation swung by the open angle about the vertical axis.
    pub open_orientation: DQuat,
    pub intent: DoorIntent,
    pub status: DoorStatus,
    /// Interpolation rate (slerp fraction per second).
    pub speed: f64,
}

/// An in-flight interpolation task. hecs holds at most one component of a
/// type per entity, so inserting a new task replaces the old one.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Interpolation {
    pub target: DQuat,
    pub speed: f64,
    pub origin: MotionOrigin,
}

/// Oriented box collider that the interaction ray can hit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DoorCollider {
    pub half_extents: DVec3,
    pub layer: InteractionLayer,
}

impl DoorCollider {
    pub fn category(&self) -> DoorCategory {
        self.layer.category()
    }
}
