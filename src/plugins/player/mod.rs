//! Player plugin.
//!
//! Pipeline:
//! - Update: sample input → respawn → `PlayerCore::tick` (mode + meter) → jump
//! - Update (after enemies think): apply `PlayerHit`s → dash-contact scan → death
//! - FixedUpdate: ease the rigid body toward `PlayerCore::target_velocity`
//!
//! `PlayerCore` is the only place health, dash power and score change. Other
//! plugins send `PlayerHit` messages instead of touching it.

pub mod controller;
pub mod meter;

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{layers::Layer, state::GameState, tunables::Tunables};
use crate::plugins::enemies::{self, behavior::{touching, EnemyBrain}, registry::EnemyRegistry, Enemy, PlayerContact};
use crate::plugins::fx::HitFlash;
use crate::plugins::fx::messages::{ParticleBurst, ScreenShake, ShakePreset};

pub use self::controller::PlayerCore;
use self::controller::{ContactOutcome, DamageOutcome, HitSource, PlayerCue};

#[derive(Component)]
pub struct Player;

#[derive(Resource, Default, Debug)]
pub struct PlayerInput {
    pub move_axis: Vec2,
    pub dash_held: bool,
    /// Latched until the jump system consumes it.
    pub jump_requested: bool,
    pub respawn_requested: bool,
}

/// Damage intent aimed at the player.
#[derive(Message, Clone, Copy, Debug)]
pub struct PlayerHit {
    pub amount: f32,
    pub source: HitSource,
}

/// Animation trigger sink.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlayerCueMessage(pub PlayerCue);

pub fn plugin(app: &mut App) {
    app.insert_resource(PlayerInput::default())
        .add_message::<PlayerHit>()
        .add_message::<PlayerCueMessage>()
        .add_systems(OnEnter(GameState::InGame), spawn)
        .add_systems(
            Update,
            (gather_input, respawn_player, advance_player, handle_jump)
                .chain()
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(
            Update,
            (apply_player_hits, resolve_enemy_contacts, handle_player_death)
                .chain()
                .after(enemies::think_enemies)
                .run_if(in_state(GameState::InGame)),
        )
        .add_systems(FixedUpdate, apply_movement.run_if(in_state(GameState::InGame)));
}

/// Body colour: cyan while dashing, blue otherwise, grey once dead.
pub fn player_color(core: &PlayerCore) -> Color {
    if !core.is_alive() {
        Color::srgb(0.4, 0.4, 0.45)
    } else if core.is_dashing() {
        Color::srgb(0.5, 0.95, 1.0)
    } else {
        Color::srgb(0.2, 0.75, 0.9)
    }
}

fn spawn(mut commands: Commands, tunables: Res<Tunables>) {
    let t = &tunables.player;
    let layers = CollisionLayers::new(
        Layer::Player,
        [Layer::World, Layer::EnemyBullet, Layer::Pickup],
    );
    let core = PlayerCore::new(t);

    commands.spawn((
        Name::new("Player"),
        Player,
        Sprite {
            color: player_color(&core),
            custom_size: Some(Vec2::splat(t.body_radius * 2.0)),
            ..default()
        },
        HitFlash::default(),
        Transform::from_translation(t.spawn_point.extend(1.0)),
        (
            RigidBody::Dynamic,
            Collider::circle(t.body_radius),
            LockedAxes::ROTATION_LOCKED,
            GravityScale(core.gravity_scale()),
            Friction::ZERO,
            layers,
            LinearVelocity::ZERO,
            TranslationInterpolation,
        ),
        core,
        DespawnOnExit(GameState::InGame),
    ));
}

fn gather_input(keys: Option<Res<ButtonInput<KeyCode>>>, mut input: ResMut<PlayerInput>) {
    // Headless apps have no keyboard; leave whatever was injected.
    let Some(keys) = keys else {
        return;
    };

    let mut axis = Vec2::ZERO;
    if keys.any_pressed([KeyCode::KeyW, KeyCode::ArrowUp]) {
        axis.y += 1.0;
    }
    if keys.any_pressed([KeyCode::KeyS, KeyCode::ArrowDown]) {
        axis.y -= 1.0;
    }
    if keys.any_pressed([KeyCode::KeyA, KeyCode::ArrowLeft]) {
        axis.x -= 1.0;
    }
    if keys.any_pressed([KeyCode::KeyD, KeyCode::ArrowRight]) {
        axis.x += 1.0;
    }

    input.move_axis = axis.normalize_or_zero();
    input.dash_held = keys.any_pressed([KeyCode::ShiftLeft, KeyCode::ShiftRight, KeyCode::KeyK]);
    input.jump_requested |= keys.just_pressed(KeyCode::Space);
    input.respawn_requested |= keys.just_pressed(KeyCode::KeyR);
}

fn respawn_player(mut input: ResMut<PlayerInput>, mut q_player: Query<&mut PlayerCore, With<Player>>) {
    if !std::mem::take(&mut input.respawn_requested) {
        return;
    }
    let Ok(mut core) = q_player.single_mut() else {
        return;
    };
    if core.is_alive() {
        return;
    }
    core.respawn();
    info!("player respawned");
}

pub(crate) fn advance_player(
    time: Res<Time>,
    input: Res<PlayerInput>,
    mut q_player: Query<&mut PlayerCore, With<Player>>,
    mut cues: MessageWriter<PlayerCueMessage>,
) {
    let Ok(mut core) = q_player.single_mut() else {
        return;
    };
    if let Some(cue) = core.tick(time.delta_secs(), input.dash_held) {
        cues.write(PlayerCueMessage(cue));
    }
}

fn handle_jump(
    mut input: ResMut<PlayerInput>,
    spatial: SpatialQuery,
    mut q_player: Query<(Entity, &Transform, &PlayerCore, &mut LinearVelocity), With<Player>>,
    mut cues: MessageWriter<PlayerCueMessage>,
) {
    if !std::mem::take(&mut input.jump_requested) {
        return;
    }
    let Ok((e, tf, core, mut vel)) = q_player.single_mut() else {
        return;
    };

    let t = core.tuning();
    let filter = SpatialQueryFilter::from_mask(Layer::World).with_excluded_entities([e]);
    let grounded = spatial
        .cast_ray(
            tf.translation.truncate(),
            Dir2::NEG_Y,
            t.body_radius + t.ground_probe,
            true,
            &filter,
        )
        .is_some();

    if !core.can_jump(grounded) {
        return;
    }
    vel.0.y = t.jump_speed;
    cues.write(PlayerCueMessage(PlayerCue::Jump));
}

/// Single writer for player damage.
pub(crate) fn apply_player_hits(
    mut hits: MessageReader<PlayerHit>,
    mut q_player: Query<&mut PlayerCore, With<Player>>,
    mut cues: MessageWriter<PlayerCueMessage>,
) {
    let Ok(mut core) = q_player.single_mut() else {
        return;
    };

    for hit in hits.read() {
        match core.take_damage(hit.amount, hit.source) {
            DamageOutcome::Ignored => {}
            DamageOutcome::Hurt(_) => {
                cues.write(PlayerCueMessage(PlayerCue::Damage));
            }
            DamageOutcome::Killed(_) => {
                cues.write(PlayerCueMessage(PlayerCue::Damage));
                info!("player killed by {:?}", hit.source);
            }
        }
    }
}

/// Scan registered enemies against the player's body.
///
/// Contact is edge-triggered per enemy. Kills only tombstone registry slots, so
/// the scan never skips the entry after a killed one.
pub(crate) fn resolve_enemy_contacts(
    tunables: Res<Tunables>,
    mut registry: ResMut<EnemyRegistry>,
    mut q_player: Query<(&Transform, &mut PlayerCore), With<Player>>,
    mut q_enemies: Query<(&Transform, &EnemyBrain, &mut PlayerContact), (With<Enemy>, Without<Player>)>,
    mut cues: MessageWriter<PlayerCueMessage>,
    mut bursts: MessageWriter<ParticleBurst>,
    mut shakes: MessageWriter<ScreenShake>,
) {
    let Ok((player_tf, mut core)) = q_player.single_mut() else {
        return;
    };
    if !core.is_alive() {
        return;
    }

    let player_pos = player_tf.translation.truncate();
    let player_r = core.tuning().body_radius;
    let enemy_r = tunables.enemies.body_radius;

    for (slot, e) in registry.live() {
        let Ok((tf, brain, mut contact)) = q_enemies.get_mut(e) else {
            continue;
        };

        let pos = tf.translation.truncate();
        let now = touching(player_pos, player_r, pos, enemy_r);
        let started = now && !contact.0;
        contact.0 = now;
        if !started {
            continue;
        }

        match core.on_enemy_contact() {
            ContactOutcome::DashKill { points } => {
                if registry.mark_dead(slot) {
                    bursts.write(ParticleBurst::death(pos, brain.kind().color()));
                    shakes.write(ScreenShake(ShakePreset::DashKill));
                    debug!("dash kill: {} (+{points})", brain.kind().name());
                }
            }
            ContactOutcome::Damaged(DamageOutcome::Hurt(_)) => {
                cues.write(PlayerCueMessage(PlayerCue::Damage));
            }
            ContactOutcome::Damaged(DamageOutcome::Killed(_)) => {
                cues.write(PlayerCueMessage(PlayerCue::Damage));
                info!("player killed by {:?}", HitSource::Contact);
            }
            ContactOutcome::Damaged(DamageOutcome::Ignored) | ContactOutcome::Ignored => {}
        }
    }
}

/// On the frame the player dies: park it at the spawn point and clear the arena.
pub(crate) fn handle_player_death(
    mut handled: Local<bool>,
    mut registry: ResMut<EnemyRegistry>,
    mut q_player: Query<(&PlayerCore, &mut Transform, &mut LinearVelocity), With<Player>>,
) {
    let Ok((core, mut tf, mut vel)) = q_player.single_mut() else {
        return;
    };
    if core.is_alive() {
        *handled = false;
        return;
    }
    if *handled {
        return;
    }
    *handled = true;

    tf.translation = core.tuning().spawn_point.extend(tf.translation.z);
    vel.0 = Vec2::ZERO;
    let cleared = registry.mark_all_dead();
    info!("player died with score {}; cleared {cleared} enemies", core.score());
}

/// Exponential ease from `current` toward `target` with time constant `tau`.
pub fn smooth_toward(current: Vec2, target: Vec2, tau: f32, dt: f32) -> Vec2 {
    if tau <= 0.0 {
        return target;
    }
    let alpha = 1.0 - (-dt.max(0.0) / tau).exp();
    current + (target - current) * alpha
}

fn apply_movement(
    time: Res<Time>,
    input: Res<PlayerInput>,
    mut q_player: Query<(&mut PlayerCore, &mut LinearVelocity, &mut GravityScale), With<Player>>,
) {
    let Ok((mut core, mut vel, mut gravity)) = q_player.single_mut() else {
        return;
    };
    let target = core.target_velocity(input.move_axis, vel.0);
    vel.0 = smooth_toward(vel.0, target, core.smoothing(), time.delta_secs());
    gravity.0 = core.gravity_scale();
}

#[cfg(test)]
mod tests;
