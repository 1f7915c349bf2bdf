//! Door orientation math.
//!
//! Spherical interpolation toward a target orientation with a fixed
//! convergence threshold, so every task ends in a finite number of steps.

use glam::DQuat;

use doorway_core::components::Door;
use doorway_core::constants::ANGLE_EPSILON_DEG;
use doorway_core::enums::DoorIntent;

/// Result of advancing one interpolation task by one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionStep {
    pub rotation: DQuat,
    /// The task converged; `rotation` is exactly the target.
    pub finished: bool,
}

/// Angular distance between two orientations in degrees.
pub fn angle_deg(a: DQuat, b: DQuat) -> f64 {
    a.angle_between(b).to_degrees()
}

/// `closed` swung by `open_angle_deg` about the world vertical axis.
pub fn open_orientation(closed: DQuat, open_angle_deg: f64) -> DQuat {
    (DQuat::from_rotation_y(open_angle_deg.to_radians()) * closed).normalize()
}

/// Advance `current` toward `target` by a slerp fraction of `speed * dt`.
///
/// Snaps to `target` once the remaining angle is under `ANGLE_EPSILON_DEG`.
/// A non-positive rate would never converge and snaps immediately.
pub fn step(current: DQuat, target: DQuat, speed: f64, dt: f64) -> MotionStep {
    let done = MotionStep {
        rotation: target,
        finished: true,
    };

    if angle_deg(current, target) < ANGLE_EPSILON_DEG {
        return done;
    }

    let t = (speed * dt).clamp(0.0, 1.0);
    if t <= 0.0 || !t.is_finite() {
        return done;
    }

    let next = current.slerp(target, t).normalize();
    if angle_deg(next, target) < ANGLE_EPSILON_DEG {
        return done;
    }

    MotionStep {
        rotation: next,
        finished: false,
    }
}

/// Flip a door's intent and return the new intent with its target orientation.
pub fn toggle_target(door: &Door) -> (DoorIntent, DQuat) {
    let intent = door.intent.flipped();
    let target = match intent {
        DoorIntent::Closed => door.closed_orientation,
        DoorIntent::Open => door.open_orientation,
    };
    (intent, target)
}
