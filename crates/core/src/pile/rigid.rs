//! Rigid-body pile physics for the scene pipeline.
//!
//! Tossed fuel free-falls onto the ground plane and settles against the
//! pieces already there. Bodies are sphere proxies: good enough for a pile
//! of logs to stack believably, cheap enough to resolve pairwise every step.

use rand::Rng;

use crate::core_types::fuel::FuelKind;
use crate::core_types::unit::{FuelUnit, RigidBody};
use crate::core_types::vec::Vec3;

/// Downward acceleration in scene units per second squared.
const GRAVITY: f32 = 320.0;

/// Ground plane bounce retention.
const GROUND_RESTITUTION: f32 = 0.15;

/// Horizontal velocity retained per contact frame with the ground.
const GROUND_FRICTION: f32 = 0.85;

/// Bounce retention of body-body contacts.
const CONTACT_RESTITUTION: f32 = 0.15;

/// Fraction of interpenetration corrected per step.
const CORRECTION_PERCENT: f32 = 0.8;

/// Penetration slack left uncorrected to keep resting contacts quiet.
const CORRECTION_SLOP: f32 = 0.01;

/// Spin decay rate, per second.
const YAW_DAMPING: f32 = 3.0;

/// Height band new pieces drop from.
const DROP_HEIGHT: f32 = 140.0;

/// Build the drop pose for a freshly tossed piece.
pub(crate) fn spawn_body<R: Rng + ?Sized>(kind: FuelKind, rng: &mut R) -> RigidBody {
    RigidBody {
        position: Vec3::new(
            rng.random_range(-20.0..20.0),
            DROP_HEIGHT + rng.random::<f32>() * 40.0,
            rng.random_range(-20.0..20.0),
        ),
        velocity: Vec3::new(
            rng.random_range(-8.0..8.0),
            0.0,
            rng.random_range(-8.0..8.0),
        ),
        yaw: rng.random_range(-std::f32::consts::PI..std::f32::consts::PI),
        yaw_rate: rng.random_range(-1.5..1.5),
        radius: kind.collision_radius(),
    }
}

/// Advance every body by `dt`: gravity, ground contact, pairwise contacts.
pub(crate) fn step(units: &mut [FuelUnit], dt: f32) {
    for unit in units.iter_mut() {
        let body = &mut unit.body;

        body.velocity.y -= GRAVITY * dt;
        body.position += body.velocity * dt;
        body.yaw += body.yaw_rate * dt;
        body.yaw_rate -= body.yaw_rate * (YAW_DAMPING * dt).min(1.0);

        // Ground plane at y = 0; a body rests at its radius.
        if body.position.y < body.radius {
            body.position.y = body.radius;
            if body.velocity.y < 0.0 {
                body.velocity.y = -body.velocity.y * GROUND_RESTITUTION;
            }
            body.velocity.x *= GROUND_FRICTION;
            body.velocity.z *= GROUND_FRICTION;
            body.yaw_rate *= GROUND_FRICTION;
        }
    }

    // Pairwise sphere-sphere resolution with positional correction.
    for i in 0..units.len() {
        let (left, right) = units.split_at_mut(i + 1);
        let a = &mut left[i];
        for b in right.iter_mut() {
            resolve_contact(a, b);
        }
    }
}

fn resolve_contact(a: &mut FuelUnit, b: &mut FuelUnit) {
    let delta = b.body.position - a.body.position;
    let min_dist = a.body.radius + b.body.radius;
    let dist_sq = delta.norm_squared();
    if dist_sq >= min_dist * min_dist {
        return;
    }

    let dist = dist_sq.sqrt();
    // Coincident centers: push apart along the up axis.
    let normal = if dist > 1e-4 {
        delta / dist
    } else {
        Vec3::new(0.0, 1.0, 0.0)
    };

    let inv_a = 1.0 / a.mass;
    let inv_b = 1.0 / b.mass;
    let inv_sum = inv_a + inv_b;

    let penetration = min_dist - dist;
    let correction =
        normal * (CORRECTION_PERCENT * (penetration - CORRECTION_SLOP).max(0.0) / inv_sum);
    a.body.position -= correction * inv_a;
    b.body.position += correction * inv_b;

    let relative = b.body.velocity - a.body.velocity;
    let closing = relative.dot(&normal);
    if closing < 0.0 {
        let magnitude = -(1.0 + CONTACT_RESTITUTION) * closing / inv_sum;
        let impulse = normal * magnitude;
        a.body.velocity -= impulse * inv_a;
        b.body.velocity += impulse * inv_b;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn dropped_units(n: usize, seed: u64) -> Vec<FuelUnit> {
        let mut rng = SmallRng::seed_from_u64(seed);
        (0..n)
            .map(|_| {
                let mut unit = FuelUnit::new(FuelKind::Log, &mut rng);
                unit.body = spawn_body(FuelKind::Log, &mut rng);
                unit
            })
            .collect()
    }

    #[test]
    fn test_single_body_settles_on_ground() {
        let mut units = dropped_units(1, 31);

        for _ in 0..600 {
            step(&mut units, 1.0 / 60.0);
        }

        let body = &units[0].body;
        assert!((body.position.y - body.radius).abs() < 0.5);
        assert!(body.velocity.norm() < 5.0);
    }

    #[test]
    fn test_overlapping_bodies_separate() {
        let mut units = dropped_units(2, 32);
        units[0].body.position = Vec3::new(0.0, 50.0, 0.0);
        units[1].body.position = Vec3::new(1.0, 50.0, 0.0);

        for _ in 0..240 {
            step(&mut units, 1.0 / 60.0);
        }

        let gap = (units[1].body.position - units[0].body.position).norm();
        let min_dist = units[0].body.radius + units[1].body.radius;
        assert!(gap >= min_dist * 0.9);
    }

    #[test]
    fn test_pile_of_bodies_stays_above_ground() {
        let mut units = dropped_units(12, 33);
        for _ in 0..900 {
            step(&mut units, 1.0 / 60.0);
        }
        for unit in &units {
            assert!(unit.body.position.y >= unit.body.radius - 0.5);
        }
    }
}
