//! Spawn consumer: the only system that takes bullets out of the pool.
//!
//! Requests beyond the free list are dropped for the frame; the shooter fires
//! again on its next cooldown. A free-list entity without bullet components
//! means the pool is broken, and that panics.

use avian2d::prelude::*;
use bevy::prelude::*;

use super::components::{Bullet, BulletEntity, BulletState, PooledBullet};
use super::messages::SpawnBulletRequest;
use super::pool::{active_bullet_layers, BulletPool};

pub fn allocate_bullets_from_pool(
    mut pool: ResMut<BulletPool>,
    mut requests: MessageReader<SpawnBulletRequest>,
    mut q: Query<
        (
            &mut BulletState,
            &mut Bullet,
            &mut Transform,
            &mut LinearVelocity,
            &mut Visibility,
            &mut CollisionLayers,
        ),
        With<PooledBullet>,
    >,
) {
    let mut dropped = 0usize;

    for req in requests.read() {
        let Some(BulletEntity(e)) = pool.pop_free() else {
            dropped += 1;
            continue;
        };

        let (mut state, mut bullet, mut tf, mut vel, mut vis, mut layers) = q
            .get_mut(e)
            .expect("free list holds an entity without pooled bullet components");
        debug_assert_eq!(*state, BulletState::Inactive, "free list handed out a live bullet");

        bullet.reset_for_fire(req);
        tf.translation = req.pos.extend(tf.translation.z);
        vel.0 = req.vel;
        *layers = active_bullet_layers();
        *vis = Visibility::Visible;
        *state = BulletState::Active;
    }

    if dropped > 0 {
        debug!("bullet pool exhausted; dropped {dropped} shot(s)");
    }
}
