//! Fx plugin: screen shake, white flash, particle bursts, dash trail, hit flash.
//!
//! Producers (player, enemies) write `ParticleBurst` / `ScreenShake` messages and
//! `PlayerCue`s. This module turns them into presentation state:
//! - `GlobalFx` holds shake trauma and flash intensity. The camera reads
//!   `GlobalFx::shake_offset` and is the only writer of its transform.
//! - sparks are plain sprites with a lifetime; they never collide.
//!
//! Shake and flash tick on real time so they keep decaying while the game is
//! paused.
//!
//! ---------------------------
//! WHY MESSAGES, NOT DIRECT WRITES
//! ---------------------------
//! Gameplay systems run headless in tests, where none of the render-side
//! entities exist. Writing a message costs nothing when nobody reads it, so
//! `think_enemies` and the contact scan never need to know whether a camera or
//! sprite is there to react.
//!
//! Shake is stored as trauma in [0, 1] and the offset grows with trauma
//! squared. Two blasts in a row saturate at 1 instead of throwing the camera
//! across the arena, and small hits barely move it.
//!
//! Sparks keep a fixed component set for their whole life and only their
//! numbers change (alpha, lifetime). They are despawned in one place once the
//! lifetime runs out.

pub mod messages;

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use bevy::time::Real;

use crate::common::state::GameState;
use crate::plugins::player::{Player, PlayerCore, PlayerCueMessage};
use crate::plugins::player::controller::PlayerCue;

use messages::{ParticleBurst, ScreenShake, ShakePreset};

// -----------------------------------------------------------------------------
// Newtypes
// -----------------------------------------------------------------------------

/// Value kept in [0..1]. Clamp once on write, read freely.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct UnitF32(f32);

impl UnitF32 {
    #[inline]
    pub fn new_clamped(v: f32) -> Self {
        Self(v.clamp(0.0, 1.0))
    }
    #[inline]
    pub fn get(self) -> f32 {
        self.0
    }
    #[inline]
    pub fn add_clamped(&mut self, dv: f32) {
        self.0 = (self.0 + dv).clamp(0.0, 1.0);
    }
    #[inline]
    pub fn decay_to_zero(&mut self, rate_per_sec: f32, dt: f32) {
        self.0 = (self.0 - rate_per_sec * dt.max(0.0)).max(0.0);
    }
}

// -----------------------------------------------------------------------------
// Components / resources
// -----------------------------------------------------------------------------

/// Global shake/flash state.
#[derive(Resource, Debug, Default)]
pub struct GlobalFx {
    trauma: UnitF32,
    shake_phase: f32,
    flash: UnitF32,
}

impl GlobalFx {
    pub fn trigger(&mut self, preset: ShakePreset) {
        match preset {
            ShakePreset::DashKill => {
                self.trauma.add_clamped(0.35);
            }
            ShakePreset::Blast => {
                self.trauma.add_clamped(0.9);
                self.flash = UnitF32::new_clamped(0.8);
            }
        }
    }

    pub fn trauma(&self) -> f32 {
        self.trauma.get()
    }

    pub fn flash(&self) -> f32 {
        self.flash.get()
    }

    pub fn advance(&mut self, dt: f32) {
        self.shake_phase += dt.max(0.0);
        self.trauma.decay_to_zero(1.4, dt);
        self.flash.decay_to_zero(3.0, dt);
    }

    /// Camera offset for this frame. Deterministic pseudo-noise, no RNG.
    pub fn shake_offset(&self) -> Vec2 {
        let t = self.trauma.get();
        if t <= 0.0 {
            return Vec2::ZERO;
        }
        let amp = 36.0 * t * t;
        let p = self.shake_phase;
        let x = (p * 37.0 * std::f32::consts::TAU).sin() + 0.5 * (p * 61.0 * std::f32::consts::TAU).sin();
        let y = (p * 41.0 * std::f32::consts::TAU).cos() + 0.5 * (p * 53.0 * std::f32::consts::TAU).cos();
        Vec2::new(x, y).clamp_length_max(1.0) * amp
    }
}

#[derive(Component, Debug)]
pub struct Spark {
    velocity: Vec2,
    life: Timer,
}

/// Damage flash on the player sprite.
#[derive(Component, Debug, Default)]
pub struct HitFlash(pub UnitF32);

#[derive(Resource, Debug)]
struct DashTrail {
    every: Timer,
}

impl Default for DashTrail {
    fn default() -> Self {
        Self { every: Timer::from_seconds(0.025, TimerMode::Repeating) }
    }
}

// -----------------------------------------------------------------------------
// Plugin wiring
// -----------------------------------------------------------------------------

pub fn plugin(app: &mut App) {
    app.add_message::<ParticleBurst>()
        .add_message::<ScreenShake>()
        .insert_resource(GlobalFx::default())
        .init_resource::<DashTrail>();

    app.add_systems(
        PostUpdate,
        (
            apply_shake_requests,
            advance_global_fx.after(apply_shake_requests),
            spawn_bursts,
            emit_dash_trail,
            animate_sparks,
            react_to_player_cues,
            fade_hit_flash.after(react_to_player_cues),
        )
            .run_if(in_state(GameState::InGame)),
    );
}

// -----------------------------------------------------------------------------
// Systems
// -----------------------------------------------------------------------------

fn apply_shake_requests(mut reader: MessageReader<ScreenShake>, mut fx: ResMut<GlobalFx>) {
    for ScreenShake(preset) in reader.read() {
        fx.trigger(*preset);
    }
}

pub(crate) fn advance_global_fx(real_time: Res<Time<Real>>, mut fx: ResMut<GlobalFx>) {
    fx.advance(real_time.delta_secs());
}

/// Evenly spaced directions so bursts look the same every time.
fn burst_velocities(count: u8, speed: f32) -> impl Iterator<Item = Vec2> {
    let n = count.max(1) as f32;
    (0..count).map(move |i| {
        let a = i as f32 / n * std::f32::consts::TAU;
        // Alternate speeds for a less uniform ring.
        let s = if i % 2 == 0 { speed } else { speed * 0.6 };
        Vec2::from_angle(a) * s
    })
}

fn spark_bundle(pos: Vec2, velocity: Vec2, color: Color, size: f32, secs: f32) -> impl Bundle {
    (
        Name::new("Spark"),
        Spark { velocity, life: Timer::from_seconds(secs, TimerMode::Once) },
        Sprite { color, custom_size: Some(Vec2::splat(size)), ..default() },
        Transform::from_translation(pos.extend(3.0)),
        DespawnOnExit(GameState::InGame),
    )
}

fn spawn_bursts(mut commands: Commands, mut reader: MessageReader<ParticleBurst>) {
    for burst in reader.read() {
        for v in burst_velocities(burst.count, burst.speed) {
            commands.spawn(spark_bundle(burst.pos, v, burst.color, 6.0, 0.5));
        }
    }
}

/// Drop small sparks behind a dashing player.
fn emit_dash_trail(
    time: Res<Time>,
    mut trail: ResMut<DashTrail>,
    mut commands: Commands,
    q_player: Query<(&Transform, &PlayerCore), With<Player>>,
) {
    let Ok((tf, core)) = q_player.single() else {
        return;
    };
    if !core.is_dashing() {
        trail.every.reset();
        return;
    }

    trail.every.tick(time.delta());
    let behind = -core.last_dash_dir() * 40.0;
    for _ in 0..trail.every.times_finished_this_tick() {
        commands.spawn(spark_bundle(
            tf.translation.truncate(),
            behind,
            Color::srgb(0.4, 0.9, 1.0),
            4.0,
            0.25,
        ));
    }
}

fn animate_sparks(
    time: Res<Time>,
    mut commands: Commands,
    mut q: Query<(Entity, &mut Spark, &mut Transform, &mut Sprite)>,
) {
    let dt = time.delta_secs();
    for (e, mut spark, mut tf, mut sprite) in &mut q {
        spark.life.tick(time.delta());
        if spark.life.is_finished() {
            commands.entity(e).despawn();
            continue;
        }

        tf.translation += (spark.velocity * dt).extend(0.0);
        spark.velocity *= 1.0 - (4.0 * dt).min(1.0);

        let mut c = sprite.color.to_srgba();
        c.alpha = 1.0 - spark.life.fraction();
        sprite.color = c.into();
    }
}

fn react_to_player_cues(
    mut reader: MessageReader<PlayerCueMessage>,
    mut q_flash: Query<&mut HitFlash, With<Player>>,
) {
    for msg in reader.read() {
        if msg.0 != PlayerCue::Damage {
            continue;
        }
        if let Ok(mut flash) = q_flash.single_mut() {
            flash.0 = UnitF32::new_clamped(1.0);
        }
    }
}

/// Tint the player sprite toward red while a hit flash decays.
fn fade_hit_flash(
    time: Res<Time>,
    mut q: Query<(&mut HitFlash, &mut Sprite, &PlayerCore), With<Player>>,
) {
    let Ok((mut flash, mut sprite, core)) = q.single_mut() else {
        return;
    };

    flash.0.decay_to_zero(5.0, time.delta_secs());
    let base = crate::plugins::player::player_color(core).to_srgba();
    let f = flash.0.get();

    let mut out = base;
    out.red = (out.red + f * 0.8).min(1.0);
    out.green *= 1.0 - f * 0.6;
    out.blue *= 1.0 - f * 0.6;
    sprite.color = out.into();
}

#[cfg(test)]
mod tests;
