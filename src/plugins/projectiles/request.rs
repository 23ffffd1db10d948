//! Producer side: turn a shooter's `ProjectileSpec` into a spawn request.

use bevy::prelude::*;

use crate::plugins::enemies::behavior::ProjectileSpec;

use super::messages::SpawnBulletRequest;

/// Gap between the shooter's body and a fresh bullet.
const MUZZLE_GAP: f32 = 6.0;

impl SpawnBulletRequest {
    /// Bullet leaves from the edge of the shooter's body, along the aim direction.
    pub fn from_spec(spec: &ProjectileSpec, body_radius: f32, owner: Option<Entity>) -> Self {
        let dir = spec.direction.normalize_or_zero();
        let dir = if dir == Vec2::ZERO { Vec2::Y } else { dir };
        Self {
            pos: spec.origin + dir * (body_radius + MUZZLE_GAP),
            vel: dir * spec.speed,
            damage: spec.damage,
            max_range: spec.max_range,
            owner,
        }
    }
}
