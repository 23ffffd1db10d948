//! Tunable gameplay constants.
//!
//! Distances are in pixels, times in seconds. The shipped values come from a
//! metre-based design scaled by `PIXELS_PER_METER`.

use bevy::prelude::*;

const PIXELS_PER_METER: f32 = 32.0;

#[inline]
const fn m(v: f32) -> f32 {
    v * PIXELS_PER_METER
}

#[derive(Resource, Debug, Clone)]
pub struct Tunables {
    pub pixels_per_meter: f32,
    /// Downward acceleration at gravity scale 1.
    pub gravity: f32,
    pub bullet_pool_capacity: usize,
    pub player: PlayerTuning,
    pub enemies: EnemyTuning,
    pub refill: RefillTuning,
    pub spawner: SpawnerTuning,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            pixels_per_meter: PIXELS_PER_METER,
            gravity: m(9.81),
            bullet_pool_capacity: 128,
            player: PlayerTuning::default(),
            enemies: EnemyTuning::default(),
            refill: RefillTuning::default(),
            spawner: SpawnerTuning::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerTuning {
    pub move_speed: f32,
    pub dash_speed: f32,
    pub jump_speed: f32,
    pub body_radius: f32,
    /// Ray length below the body used to decide whether a jump is allowed.
    pub ground_probe: f32,
    /// Dash power needed to start a dash. Once dashing, power may run down to zero.
    pub dash_start_threshold: f32,
    pub dash_recharge_rate: f32,
    pub dash_drain_rate: f32,
    pub contact_damage: f32,
    pub points_per_kill: u32,
    pub dash_kill_penalty: f32,
    /// Smoothing time constants toward the target velocity.
    pub walk_smoothing: f32,
    pub dash_smoothing: f32,
    pub walk_gravity_scale: f32,
    pub spawn_point: Vec2,
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            move_speed: m(6.0),
            dash_speed: m(15.0),
            jump_speed: m(16.0),
            body_radius: 13.0,
            ground_probe: m(0.31),
            dash_start_threshold: 30.0,
            dash_recharge_rate: 15.0,
            dash_drain_rate: 40.0,
            contact_damage: 5.0,
            points_per_kill: 15,
            dash_kill_penalty: 2.0,
            walk_smoothing: 0.05,
            dash_smoothing: 0.02,
            walk_gravity_scale: 2.0,
            spawn_point: Vec2::new(0.0, -500.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnemyTuning {
    pub body_radius: f32,
    pub melee: MeleeStats,
    pub shooter: ShooterStats,
    pub bomber: BomberStats,
    pub ghost: GhostStats,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            body_radius: 16.0,
            melee: MeleeStats::default(),
            shooter: ShooterStats::default(),
            bomber: BomberStats::default(),
            ghost: GhostStats::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MeleeStats {
    pub damage: f32,
    pub attack_interval: f32,
    pub move_speed: f32,
}

impl Default for MeleeStats {
    fn default() -> Self {
        Self { damage: 10.0, attack_interval: 5.0, move_speed: m(3.0) }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShooterStats {
    pub damage: f32,
    pub attack_interval: f32,
    pub range: f32,
    pub move_speed: f32,
    pub projectile_speed: f32,
    /// Bullets fly this much further than the firing range.
    pub projectile_reach: f32,
}

impl Default for ShooterStats {
    fn default() -> Self {
        Self {
            damage: 4.0,
            attack_interval: 3.0,
            range: m(10.0),
            move_speed: m(2.5),
            projectile_speed: m(5.0),
            projectile_reach: m(10.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BomberStats {
    pub base_damage: f32,
    /// Distance at which the fuse is lit. Damage only lands inside half of it.
    pub blast_radius: f32,
    /// Damage lost per pixel of distance from the blast.
    pub dampener: f32,
    pub fuse: f32,
    /// The telegraph colour toggles every this many ticks.
    pub flash_every_ticks: u32,
    pub move_speed: f32,
    /// Speed multiplier once the fuse is lit.
    pub fuse_speed_factor: f32,
    pub flash_color: Color,
}

impl Default for BomberStats {
    fn default() -> Self {
        Self {
            base_damage: 40.0,
            blast_radius: m(3.0),
            dampener: 0.25,
            fuse: 1.5,
            flash_every_ticks: 6,
            move_speed: m(2.5),
            fuse_speed_factor: 0.4,
            flash_color: Color::srgb(1.0, 0.95, 0.8),
        }
    }
}

/// Declared stats for the ghost. It has no attack wired up.
#[derive(Debug, Clone, PartialEq)]
pub struct GhostStats {
    pub damage: f32,
    pub attack_interval: f32,
    pub move_speed: f32,
}

impl Default for GhostStats {
    fn default() -> Self {
        Self { damage: 6.0, attack_interval: 4.0, move_speed: m(2.0) }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RefillTuning {
    pub refill_time: f32,
    pub half_size: f32,
    pub positions: Vec<Vec2>,
}

impl Default for RefillTuning {
    fn default() -> Self {
        Self {
            refill_time: 10.0,
            half_size: 14.0,
            positions: vec![Vec2::new(-640.0, -540.0), Vec2::new(640.0, -540.0)],
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpawnerTuning {
    pub interval: f32,
    pub max_live: usize,
    pub spawn_points: Vec<Vec2>,
}

impl Default for SpawnerTuning {
    fn default() -> Self {
        Self {
            interval: 3.0,
            max_live: 8,
            spawn_points: vec![
                Vec2::new(-900.0, 450.0),
                Vec2::new(900.0, 450.0),
                Vec2::new(-900.0, -200.0),
                Vec2::new(900.0, -200.0),
            ],
        }
    }
}
