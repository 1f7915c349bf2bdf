//! Interaction ray query against door colliders.
//!
//! Each collider is an oriented box centred on the entity's position. A ray
//! that starts inside a box does not hit it.

use glam::DVec3;
use hecs::{Entity, World};

use doorway_core::components::{DoorCollider, Transform};
use doorway_core::enums::InteractionLayer;
use doorway_core::types::Ray;

/// Nearest collider along the ray.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub entity: Entity,
    pub distance: f64,
}

/// Closest collider on one of `layers` within `max_distance`.
pub fn cast(
    world: &World,
    ray: &Ray,
    max_distance: f64,
    layers: &[InteractionLayer],
) -> Option<RayHit> {
    if ray.is_degenerate() {
        return None;
    }

    let mut best: Option<RayHit> = None;
    let mut query = world.query::<(&Transform, &DoorCollider)>();
    for (entity, (transform, collider)) in query.iter() {
        if !layers.contains(&collider.layer) {
            continue;
        }
        let Some(distance) = intersect_box(ray, transform, collider.half_extents) else {
            continue;
        };
        if distance > max_distance {
            continue;
        }
        if best.map_or(true, |b| distance < b.distance) {
            best = Some(RayHit { entity, distance });
        }
    }
    best
}

/// Slab test in the box's local frame. Returns the entry distance.
fn intersect_box(ray: &Ray, transform: &Transform, half: DVec3) -> Option<f64> {
    let to_local = transform.rotation.inverse();
    let origin = to_local * (ray.origin - transform.position);
    let dir = to_local * ray.direction;

    if (0..3).all(|axis| origin[axis].abs() <= half[axis]) {
        return None;
    }

    let mut t_min = 0.0_f64;
    let mut t_max = f64::INFINITY;
    for axis in 0..3 {
        let (o, d, h) = (origin[axis], dir[axis], half[axis]);
        if d.abs() < 1e-12 {
            if o < -h || o > h {
                return None;
            }
            continue;
        }
        let t1 = (-h - o) / d;
        let t2 = (h - o) / d;
        t_min = t_min.max(t1.min(t2));
        t_max = t_max.min(t1.max(t2));
        if t_min > t_max {
            return None;
        }
    }
    Some(t_min)
}
