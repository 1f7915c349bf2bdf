//! Fundamental geometric and simulation types.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Scene time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed scene time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one tick of length `dt` seconds.
    pub fn advance(&mut self, dt: f64) {
        self.tick += 1;
        self.elapsed_secs += dt;
    }
}

/// Convert a delay in seconds to a whole number of ticks at step `dt`.
/// Rounds up, so a deadline never lands before the requested delay.
/// The tolerance absorbs float error on exact multiples of `dt`.
pub fn secs_to_ticks(secs: f64, dt: f64) -> u64 {
    if secs <= 0.0 || dt <= 0.0 {
        return 0;
    }
    (secs / dt - 1e-9).ceil() as u64
}

/// A half-line in world space. `direction` is always unit length
/// (or zero when built from a degenerate vector).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ray {
    pub origin: DVec3,
    pub direction: DVec3,
}

impl Ray {
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// Point at distance `t` along the ray.
    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }

    pub fn is_degenerate(&self) -> bool {
        self.direction == DVec3::ZERO
    }
}

/// Something the actor carries that marks it as player-driven.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Capability {
    CharacterController,
    RigidBody,
    /// A movement component identified by name.
    Component(String),
}

/// Description of an object entering or leaving a trigger volume.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActorInfo {
    pub name: String,
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub capabilities: Vec<Capability>,
}

impl ActorInfo {
    pub fn new(name: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tag: tag.into(),
            capabilities: Vec::new(),
        }
    }

    pub fn with_capability(mut self, capability: Capability) -> Self {
        self.capabilities.push(capability);
        self
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        !tag.is_empty() && self.tag == tag
    }

    pub fn has_capability(&self, capability: &Capability) -> bool {
        self.capabilities.contains(capability)
    }
}
