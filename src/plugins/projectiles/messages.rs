//! Buffered spawn requests.
//!
//! Shooters write intent; the allocator is the only system that pops the pool.

use bevy::prelude::*;

#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct SpawnBulletRequest {
    pub pos: Vec2,
    pub vel: Vec2,
    pub damage: f32,
    /// Distance from `pos` after which the bullet is recycled.
    pub max_range: f32,
    pub owner: Option<Entity>,
}
