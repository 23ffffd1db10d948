//! Enemies plugin: melee, shooter, bomber and ghost brains driving kinematic bodies.
//!
//! ---------------------------
//! HOW THIS IS DESIGNED
//! ---------------------------
//! 1) FACTS live in `EnemyBrain` (cooldown, fuse) and `EnemyRegistry` (who is alive).
//!
//! 2) RULES run in `think_enemies`, once per frame, in registry slot order:
//!    - build a `Perception` from the player's transform and `PlayerCore`
//!    - `EnemyBrain::tick` returns a `Decision`
//!    - the system turns it into velocity, tint and messages
//!      (`PlayerHit`, `SpawnBulletRequest`, `ParticleBurst`, `ScreenShake`).
//!
//! 3) REMOVAL is deferred. Whoever kills an enemy (dash contact, bomber blast,
//!    player death) tombstones its registry slot. `despawn_dead_enemies` in
//!    PostUpdate drains the tombstones and despawns, so no system ever sees a
//!    half-removed enemy or skips one.

pub mod behavior;
pub mod registry;
pub mod spawner;

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use bevy_firefly::prelude::Occluder2d;

use crate::common::{layers::Layer, state::GameState, tunables::{EnemyTuning, Tunables}};
use crate::plugins::fx::messages::{ParticleBurst, ScreenShake, ShakePreset};
use crate::plugins::player::controller::HitSource;
use crate::plugins::player::{self, Player, PlayerCore, PlayerHit};
use crate::plugins::projectiles::messages::SpawnBulletRequest;

use behavior::{seek_velocity, touching, Attack, EnemyBrain, EnemyKind, Perception};
use registry::EnemyRegistry;

#[derive(Component)]
pub struct Enemy;

/// Whether this enemy overlapped the player last frame. Contact fires on the rising edge.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct PlayerContact(pub bool);

pub fn plugin(app: &mut App) {
    app.init_resource::<EnemyRegistry>();
    app.init_resource::<spawner::EnemySpawner>();

    app.add_systems(OnEnter(GameState::InGame), spawner::reset_spawner);

    app.add_systems(
        Update,
        think_enemies
            .after(player::advance_player)
            .run_if(in_state(GameState::InGame)),
    );

    app.add_systems(
        Update,
        spawner::spawn_enemies
            .after(player::handle_player_death)
            .run_if(in_state(GameState::InGame)),
    );

    app.add_systems(
        PostUpdate,
        despawn_dead_enemies.run_if(in_state(GameState::InGame)),
    );
}

/// Spawn one enemy and register it.
pub fn spawn_enemy(
    commands: &mut Commands,
    registry: &mut EnemyRegistry,
    tuning: &EnemyTuning,
    kind: EnemyKind,
    pos: Vec2,
) -> Entity {
    let r = tuning.body_radius;

    let e = commands
        .spawn((
            Name::new(format!("{}Enemy", kind.name())),
            Enemy,
            EnemyBrain::new(kind),
            PlayerContact::default(),
            Sprite {
                color: kind.color(),
                custom_size: Some(Vec2::splat(r * 2.0)),
                ..default()
            },
            Transform::from_translation(pos.extend(1.0)),
            (
                RigidBody::Kinematic,
                Collider::circle(r),
                CollisionLayers::new(Layer::Enemy, [Layer::World]),
                LinearVelocity::ZERO,
            ),
            Occluder2d::circle(r),
            DespawnOnExit(GameState::InGame),
        ))
        .id();

    registry.register(e);
    e
}

/// Run every live brain once and apply its decision.
pub(crate) fn think_enemies(
    time: Res<Time>,
    tunables: Res<Tunables>,
    mut registry: ResMut<EnemyRegistry>,
    q_player: Query<(&Transform, &PlayerCore), With<Player>>,
    mut q_enemies: Query<
        (&Transform, &mut EnemyBrain, &mut LinearVelocity, &mut Sprite),
        (With<Enemy>, Without<Player>),
    >,
    mut hits: MessageWriter<PlayerHit>,
    mut shots: MessageWriter<SpawnBulletRequest>,
    mut bursts: MessageWriter<ParticleBurst>,
    mut shakes: MessageWriter<ScreenShake>,
) {
    let Ok((player_tf, core)) = q_player.single() else {
        return;
    };
    if !core.is_alive() {
        return;
    }

    let dt = time.delta_secs();
    let stats = &tunables.enemies;
    let player_pos = player_tf.translation.truncate();
    let player_r = core.tuning().body_radius;

    for (slot, e) in registry.live() {
        let Ok((tf, mut brain, mut vel, mut sprite)) = q_enemies.get_mut(e) else {
            continue;
        };

        let pos = tf.translation.truncate();
        let seen = Perception {
            own_pos: pos,
            player_pos,
            player_dashing: core.is_dashing(),
            touching_player: touching(pos, stats.body_radius, player_pos, player_r),
        };

        let decision = brain.tick(dt, &seen, stats);
        sprite.color = decision.tint;

        // Melee stops at arm's length; everything else homes in.
        let stop = if brain.kind() == EnemyKind::Melee {
            (stats.body_radius + player_r - 1.0).max(0.0)
        } else {
            0.0
        };
        vel.0 = seek_velocity(pos, player_pos, decision.max_speed, stop, dt);

        match decision.attack {
            Some(Attack::Melee { damage }) => {
                hits.write(PlayerHit { amount: damage, source: HitSource::Melee });
            }
            Some(Attack::Shot(spec)) => {
                shots.write(SpawnBulletRequest::from_spec(&spec, stats.body_radius, Some(e)));
            }
            Some(Attack::Blast { damage, distance }) => {
                if let Some(amount) = damage {
                    hits.write(PlayerHit { amount, source: HitSource::Blast });
                }
                bursts.write(ParticleBurst::blast(pos));
                shakes.write(ScreenShake(ShakePreset::Blast));
                info!("bomber detonated {distance:.0}px from the player, damage {damage:?}");
            }
            None => {}
        }

        if decision.expired {
            vel.0 = Vec2::ZERO;
            registry.mark_dead(slot);
        }
    }
}

/// Drain registry tombstones and despawn their entities.
pub(crate) fn despawn_dead_enemies(mut commands: Commands, mut registry: ResMut<EnemyRegistry>) {
    for e in registry.drain_dead() {
        commands.entity(e).despawn();
    }
}
