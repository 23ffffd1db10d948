//! Return commit: the one place a bullet goes back into the pool.
//!
//! Collisions and range expiry only flag `PendingReturn`. This runs after both,
//! so a bullet that hits a wall on the same step it runs out of range is pushed
//! to the free list once.

use avian2d::prelude::*;
use bevy::prelude::*;

use super::components::{Bullet, BulletEntity, BulletState, PooledBullet};
use super::pool::{inactive_bullet_layers, BulletPool};

pub fn return_to_pool_commit(
    mut pool: ResMut<BulletPool>,
    mut q: Query<
        (
            Entity,
            &mut BulletState,
            &mut Bullet,
            &mut Visibility,
            &mut LinearVelocity,
            &mut CollisionLayers,
        ),
        With<PooledBullet>,
    >,
) {
    for (e, mut state, mut bullet, mut vis, mut vel, mut layers) in &mut q {
        if *state != BulletState::PendingReturn {
            continue;
        }

        // Parked: hidden, still, colliding with nothing, no owner.
        *state = BulletState::Inactive;
        *bullet = Bullet::inert();
        *vis = Visibility::Hidden;
        vel.0 = Vec2::ZERO;
        *layers = inactive_bullet_layers();

        pool.push_free(BulletEntity(e));
    }

    debug_assert!(pool.free_len() <= pool.capacity(), "bullet returned twice");
}
