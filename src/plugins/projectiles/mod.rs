//! Projectiles plugin: **message-based producer → consumer** spawning + pooling.
//!
//! Shooter enemies are the producers. Bullets are pre-spawned and recycled by
//! mutating component values, never by adding or removing components.
//!
//! # Data flow
//! ```text
//!   Update (variable dt)
//!┌────────────────────────────────────────────────────────────────────────────┐
//!│  (A) Producer: enemies::think_enemies                                      │
//!│      - shooter brain fires → SpawnBulletRequest message                    │
//!│                                                                            │
//!│  (B) Consumer: allocate_bullets_from_pool                                  │
//!│      - pops BulletPool.free, writes BulletState/Bullet/Transform/Velocity/ │
//!│        Visibility/CollisionLayers                                          │
//!└────────────────────────────────────────────────────────────────────────────┘
//!                │
//!                v
//!   FixedPostUpdate (fixed dt)
//!┌────────────────────────────────────────────────────────────────────────────┐
//!│  (C) Avian writes CollisionStart messages                                  │
//!│  (D) process_enemy_bullet_collisions: wall → PendingReturn,                │
//!│      player → PlayerHit + PendingReturn                                    │
//!│  (E) retire_spent_bullets: past max range → PendingReturn                  │
//!│  (F) return_to_pool_commit: PendingReturn → Inactive, push back to pool    │
//!└────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Producers never borrow the pool. An empty pool drops the request; everything
//! else is treated as an invariant.

pub mod allocator;
pub mod collision;
pub mod commit;
pub mod components;
pub mod expiry;
pub mod messages;
pub mod pool;
pub mod request;

use avian2d::collision::narrow_phase::CollisionEventSystems;
use bevy::prelude::*;

use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::enemies;

pub struct ProjectilesPlugin;

impl Plugin for ProjectilesPlugin {
    fn build(&self, app: &mut App) {
        let capacity = app
            .world()
            .get_resource::<Tunables>()
            .map_or(Tunables::default().bullet_pool_capacity, |t| t.bullet_pool_capacity);

        app.insert_resource(pool::BulletPool::new(capacity))
            .add_message::<messages::SpawnBulletRequest>()
            .add_systems(Startup, pool::init_bullet_pool);

        app.add_systems(
            Update,
            allocator::allocate_bullets_from_pool
                .after(enemies::think_enemies)
                .run_if(in_state(GameState::InGame)),
        );

        app.add_systems(
            FixedPostUpdate,
            (
                collision::process_enemy_bullet_collisions.after(CollisionEventSystems),
                expiry::retire_spent_bullets,
                commit::return_to_pool_commit
                    .after(collision::process_enemy_bullet_collisions)
                    .after(expiry::retire_spent_bullets),
            )
                .run_if(in_state(GameState::InGame)),
        );
    }
}
