use bevy::prelude::*;

use super::messages::SpawnBulletRequest;

/// Marker for bullets owned by the pool.
#[derive(Component)]
pub struct PooledBullet;

/// A pooled bullet entity. Only the pool and its commit system hand these out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulletEntity(pub Entity);

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BulletState {
    #[default]
    Inactive,
    Active,
    PendingReturn,
}

#[derive(Component, Debug, Clone)]
pub struct Bullet {
    pub damage: f32,
    pub origin: Vec2,
    pub max_range: f32,
    pub owner: Option<Entity>,
}

impl Bullet {
    pub fn inert() -> Self {
        Self { damage: 0.0, origin: Vec2::ZERO, max_range: 0.0, owner: None }
    }

    #[inline]
    pub fn reset_for_fire(&mut self, req: &SpawnBulletRequest) {
        self.damage = req.damage;
        self.origin = req.pos;
        self.max_range = req.max_range;
        self.owner = req.owner;
    }

    #[inline]
    pub fn out_of_range(&self, pos: Vec2) -> bool {
        pos.distance_squared(self.origin) > self.max_range * self.max_range
    }
}
