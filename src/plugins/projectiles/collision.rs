//! Bullet hits.
//!
//! A `CollisionStart` involving exactly one pooled bullet is resolved once per
//! step:
//! - other side on `Layer::World`  → bullet goes back to the pool
//! - other side on `Layer::Player` → `PlayerHit` with the bullet's damage, then back to the pool
//!
//! Bullets only flag `PendingReturn` here; the commit system does the actual return.

use avian2d::prelude::*;
use bevy::platform::collections::HashSet;
use bevy::prelude::*;

use crate::common::layers::Layer;
use crate::plugins::player::PlayerHit;
use crate::plugins::player::controller::HitSource;

use super::components::{Bullet, BulletState, PooledBullet};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Struck {
    Wall,
    Player,
}

fn struck(layers: &CollisionLayers) -> Option<Struck> {
    if layers.memberships.has_all(Layer::World) {
        Some(Struck::Wall)
    } else if layers.memberships.has_all(Layer::Player) {
        Some(Struck::Player)
    } else {
        None
    }
}

/// Split a collision into (bullet collider, other body). `None` unless exactly one side is a bullet.
fn bullet_and_other(ev: &CollisionStart, is_bullet: impl Fn(Entity) -> bool) -> Option<(Entity, Entity)> {
    match (is_bullet(ev.collider1), is_bullet(ev.collider2)) {
        (true, false) => Some((ev.collider1, ev.body2.unwrap_or(ev.collider2))),
        (false, true) => Some((ev.collider2, ev.body1.unwrap_or(ev.collider1))),
        _ => None,
    }
}

pub fn process_enemy_bullet_collisions(
    mut started: MessageReader<CollisionStart>,
    mut q_bullets: Query<(&Bullet, &mut BulletState), With<PooledBullet>>,
    q_layers: Query<&CollisionLayers>,
    mut hits: MessageWriter<PlayerHit>,
    mut resolved: Local<HashSet<Entity>>,
) {
    resolved.clear();

    for ev in started.read() {
        let Some((bullet_e, other)) = bullet_and_other(ev, |e| q_bullets.contains(e)) else {
            continue;
        };
        if resolved.contains(&bullet_e) {
            continue;
        }
        let Some(target) = q_layers.get(other).ok().and_then(struck) else {
            continue;
        };
        let Ok((bullet, mut state)) = q_bullets.get_mut(bullet_e) else {
            continue;
        };
        if *state != BulletState::Active || bullet.owner == Some(other) {
            continue;
        }

        if target == Struck::Player {
            hits.write(PlayerHit { amount: bullet.damage, source: HitSource::Projectile });
        }
        *state = BulletState::PendingReturn;
        resolved.insert(bullet_e);
    }
}
