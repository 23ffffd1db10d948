//! Collision layers.
//!
//! Player and enemies never collide physically; dash contact is a distance
//! scan. Bullets and refill boxes are sensors that only report starts.

use avian2d::prelude::*;

#[derive(PhysicsLayer, Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    #[default]
    Default,
    World,
    Player,
    Enemy,
    EnemyBullet,
    Pickup,
}
