//! Bullet pool: pre-spawned, recycled without structural changes.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::layers::Layer;

use super::components::{Bullet, BulletEntity, BulletState, PooledBullet};

#[derive(Resource, Debug)]
pub struct BulletPool {
    free: Vec<BulletEntity>,
    capacity: usize,
}

impl BulletPool {
    pub fn new(capacity: usize) -> Self {
        Self {
            free: Vec::with_capacity(capacity),
            capacity,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn free_len(&self) -> usize {
        self.free.len()
    }

    #[inline]
    pub fn pop_free(&mut self) -> Option<BulletEntity> {
        self.free.pop()
    }

    #[inline]
    pub fn push_free(&mut self, e: BulletEntity) {
        self.free.push(e);
    }
}

#[inline]
pub fn active_bullet_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::EnemyBullet, [Layer::World, Layer::Player])
}

/// "Disabled" without structural changes: empty filters means we collide with nothing.
#[inline]
pub fn inactive_bullet_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::EnemyBullet, [] as [Layer; 0])
}

/// Pre-spawn pooled bullets (inactive).
///
/// Bullets are sensors: they report hits but never push the player around.
pub fn init_bullet_pool(mut commands: Commands, mut pool: ResMut<BulletPool>) {
    pool.free.clear();
    let cap = pool.capacity;
    pool.free.reserve(cap);

    for _ in 0..cap {
        let e = commands
            .spawn((
                Name::new("EnemyBullet(Pooled)"),
                PooledBullet,
                BulletState::Inactive,
                Bullet::inert(),
                Sprite {
                    color: Color::srgb(1.0, 0.45, 0.3),
                    custom_size: Some(Vec2::splat(8.0)),
                    ..default()
                },
                Transform::from_xyz(0.0, 0.0, 2.0),
                Visibility::Hidden,
                (
                    RigidBody::Dynamic,
                    Collider::circle(4.0),
                    Sensor,
                    GravityScale(0.0),
                    inactive_bullet_layers(),
                    LinearVelocity(Vec2::ZERO),
                    CollisionEventsEnabled,
                ),
            ))
            .id();

        pool.free.push(BulletEntity(e));
    }
}
