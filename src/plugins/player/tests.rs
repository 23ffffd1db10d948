use std::time::Duration;

use avian2d::prelude::*;
use bevy::{ecs::message::Messages, prelude::*};

use crate::common::test_utils::run_system_once;
use crate::common::tunables::{PlayerTuning, Tunables};
use crate::plugins::enemies::behavior::{EnemyBrain, EnemyKind};
use crate::plugins::enemies::registry::EnemyRegistry;
use crate::plugins::enemies::{Enemy, PlayerContact};
use crate::plugins::fx::messages::{ParticleBurst, ScreenShake};

use super::controller::{ContactOutcome, DamageOutcome, HitSource, PlayerCue, PlayerMode};
use super::meter::{DashMeter, METER_MAX};
use super::{Player, PlayerCore, PlayerCueMessage, PlayerHit, PlayerInput};

/// Tiny xorshift so property tests stay deterministic without extra crates.
struct TestRng(u64);

impl TestRng {
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }

    fn unit(&mut self) -> f32 {
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }
}

fn core() -> PlayerCore {
    PlayerCore::new(&PlayerTuning::default())
}

/// Dash until the meter is below `level`, returning how many ticks it took.
fn dash_down_to(core: &mut PlayerCore, level: f32) -> usize {
    let mut ticks = 0;
    while core.meter().value() >= level {
        core.tick(0.1, true);
        ticks += 1;
        assert!(ticks < 10_000);
    }
    ticks
}

// -----------------------------------------------------------------------------
// Meter
// -----------------------------------------------------------------------------

#[test]
fn meter_stays_in_bounds_for_any_tick_sequence() {
    let mut rng = TestRng(0x9E37_79B9_7F4A_7C15);
    let mut meter = DashMeter::new(30.0, 15.0, 40.0);

    for _ in 0..5_000 {
        let dt = rng.unit() * 2.0;
        let consuming = rng.next_u64() & 1 == 0;
        meter.tick(dt, consuming);
        assert!((0.0..=METER_MAX).contains(&meter.value()), "value {}", meter.value());
    }
}

#[test]
fn meter_treats_negative_dt_as_zero() {
    let mut meter = DashMeter::new(30.0, 15.0, 40.0);
    meter.tick(-5.0, true);
    assert_eq!(meter.value(), METER_MAX);
}

#[test]
fn meter_spend_and_refill_clamp() {
    let mut meter = DashMeter::new(30.0, 15.0, 40.0);
    meter.spend(250.0);
    assert!(meter.is_empty());
    meter.refill();
    assert_eq!(meter.value(), METER_MAX);
}

// -----------------------------------------------------------------------------
// State machine
// -----------------------------------------------------------------------------

#[test]
fn dash_cannot_start_below_threshold() {
    let mut p = core();
    dash_down_to(&mut p, 20.0);
    p.tick(0.0, false);
    assert_eq!(p.mode(), PlayerMode::Walking);

    p.tick(0.1, true);
    assert_eq!(p.mode(), PlayerMode::Walking);
    assert!(!p.is_dashing());
}

#[test]
fn dash_continues_below_threshold_until_empty() {
    let mut p = core();
    assert!(p.tick(0.1, true).is_none());
    assert!(p.is_dashing());

    dash_down_to(&mut p, 10.0);
    assert!(p.is_dashing(), "a running dash ignores the start threshold");

    while !p.meter().is_empty() {
        p.tick(0.1, true);
    }
    assert_eq!(p.mode(), PlayerMode::Walking);
}

#[test]
fn meter_cues_fire_on_phase_edges() {
    let mut p = core();
    dash_down_to(&mut p, 20.0);

    assert_eq!(p.tick(0.1, false), Some(PlayerCue::Recharge));
    assert_eq!(p.tick(0.1, false), None);

    let mut cue = None;
    for _ in 0..100 {
        if let Some(c) = p.tick(0.1, false) {
            cue = Some(c);
            break;
        }
    }
    assert_eq!(cue, Some(PlayerCue::Stop));
    assert!(p.meter().can_start());
}

#[test]
fn refill_after_recharge_cue_is_followed_by_stop() {
    let mut p = core();
    dash_down_to(&mut p, 20.0);
    assert_eq!(p.tick(0.1, false), Some(PlayerCue::Recharge));

    p.refill_meter();
    assert_eq!(p.meter().value(), METER_MAX);
    assert_eq!(p.tick(0.1, false), Some(PlayerCue::Stop));
    assert_eq!(p.tick(0.1, false), None);
}

#[test]
fn respawn_after_recharge_cue_is_followed_by_stop() {
    let mut p = core();
    dash_down_to(&mut p, 20.0);
    assert_eq!(p.tick(0.1, false), Some(PlayerCue::Recharge));
    assert!(matches!(p.take_damage(500.0, HitSource::Blast), DamageOutcome::Killed(_)));

    p.respawn();
    assert_eq!(p.tick(0.1, false), Some(PlayerCue::Stop));
    assert_eq!(p.tick(0.1, false), None);
}

#[test]
fn respawn_from_a_ready_meter_stays_quiet() {
    let mut p = core();
    p.take_damage(500.0, HitSource::Blast);
    p.respawn();
    assert_eq!(p.tick(0.1, false), None);
}

#[test]
fn idle_dash_keeps_last_heading_and_walking_resets_it() {
    let mut p = core();
    p.tick(0.016, true);

    let up = p.target_velocity(Vec2::ZERO, Vec2::ZERO);
    assert_eq!(up, Vec2::Y * p.tuning().dash_speed);

    let right = p.target_velocity(Vec2::new(3.0, 0.0), Vec2::ZERO);
    assert_eq!(right, Vec2::X * p.tuning().dash_speed);
    assert_eq!(p.target_velocity(Vec2::ZERO, Vec2::ZERO), right);

    p.tick(0.016, false);
    assert_eq!(p.last_dash_dir(), Vec2::Y);
}

#[test]
fn walking_drives_only_the_horizontal_axis() {
    let mut p = core();
    let v = p.target_velocity(Vec2::new(-1.0, 1.0), Vec2::new(0.0, -42.0));
    assert_eq!(v, Vec2::new(-p.tuning().move_speed, -42.0));
    assert_eq!(p.gravity_scale(), p.tuning().walk_gravity_scale);
}

#[test]
fn jump_needs_ground_and_no_dash() {
    let mut p = core();
    assert!(p.can_jump(true));
    assert!(!p.can_jump(false));
    p.tick(0.016, true);
    assert!(!p.can_jump(true));
    assert_eq!(p.gravity_scale(), 0.0);
}

// -----------------------------------------------------------------------------
// Damage and contact
// -----------------------------------------------------------------------------

#[test]
fn dash_blocks_melee_and_contact_but_not_projectiles() {
    let mut p = core();
    p.tick(0.016, true);

    assert_eq!(p.take_damage(10.0, HitSource::Melee), DamageOutcome::Ignored);
    assert_eq!(p.take_damage(10.0, HitSource::Contact), DamageOutcome::Ignored);
    assert_eq!(p.take_damage(4.0, HitSource::Projectile), DamageOutcome::Hurt(4.0));
    assert_eq!(p.health(), 96.0);
}

#[test]
fn health_clamps_and_death_is_terminal_until_respawn() {
    let mut p = core();
    assert!(matches!(p.take_damage(500.0, HitSource::Blast), DamageOutcome::Killed(_)));
    assert_eq!(p.health(), 0.0);
    assert_eq!(p.mode(), PlayerMode::Dead);

    assert_eq!(p.take_damage(1.0, HitSource::Melee), DamageOutcome::Ignored);
    assert_eq!(p.tick(1.0, true), None);
    assert_eq!(p.mode(), PlayerMode::Dead);
    assert_eq!(p.on_enemy_contact(), ContactOutcome::Ignored);

    p.respawn();
    assert!(p.is_alive());
    assert_eq!(p.health(), 100.0);
    assert_eq!(p.score(), 0);
}

#[test]
fn dash_contact_scores_and_costs_power() {
    let mut p = core();
    p.tick(0.1, true);
    let before = p.meter().value();

    assert_eq!(p.on_enemy_contact(), ContactOutcome::DashKill { points: 15 });
    assert_eq!(p.score(), 15);
    assert!((p.meter().value() - (before - 2.0)).abs() < 1e-4);
}

#[test]
fn walking_contact_costs_health() {
    let mut p = core();
    assert_eq!(p.on_enemy_contact(), ContactOutcome::Damaged(DamageOutcome::Hurt(5.0)));
    assert_eq!(p.health(), 95.0);
}

// -----------------------------------------------------------------------------
// Systems
// -----------------------------------------------------------------------------

fn contact_world() -> World {
    let mut world = World::new();
    world.insert_resource(Tunables::default());
    world.init_resource::<EnemyRegistry>();
    world.init_resource::<Messages<PlayerCueMessage>>();
    world.init_resource::<Messages<PlayerHit>>();
    world.init_resource::<Messages<ParticleBurst>>();
    world.init_resource::<Messages<ScreenShake>>();
    world
}

fn spawn_player(world: &mut World, pos: Vec2, dashing: bool) -> Entity {
    let mut p = core();
    if dashing {
        p.tick(0.016, true);
    }
    world
        .spawn((Player, p, Transform::from_translation(pos.extend(1.0)), LinearVelocity::ZERO))
        .id()
}

fn spawn_registered_enemy(world: &mut World, pos: Vec2) -> Entity {
    let e = world
        .spawn((
            Enemy,
            EnemyBrain::new(EnemyKind::Melee),
            PlayerContact::default(),
            Transform::from_translation(pos.extend(1.0)),
        ))
        .id();
    world.resource_mut::<EnemyRegistry>().register(e);
    e
}

#[test]
fn spawn_creates_interpolated_player_at_spawn_point() {
    let mut world = World::new();
    world.insert_resource(Tunables::default());
    run_system_once(&mut world, super::spawn);

    let mut q = world.query_filtered::<(&Transform, &PlayerCore), (With<Player>, With<TranslationInterpolation>)>();
    let (tf, core) = q.single(&world).expect("one player");
    assert_eq!(tf.translation.truncate(), PlayerTuning::default().spawn_point);
    assert!(core.is_alive());
}

#[test]
fn apply_movement_eases_toward_walk_speed() {
    let mut world = World::new();
    let mut time = Time::<()>::default();
    time.advance_by(Duration::from_millis(16));
    world.insert_resource(time);
    world.insert_resource(PlayerInput { move_axis: Vec2::X, ..default() });
    world.spawn((Player, core(), LinearVelocity::ZERO, GravityScale(1.0)));

    run_system_once(&mut world, super::apply_movement);

    let mut q = world.query::<(&LinearVelocity, &GravityScale)>();
    let (v, g) = q.single(&world).unwrap();
    let top = PlayerTuning::default().move_speed;
    assert!(v.0.x > 0.0 && v.0.x < top, "vx = {}", v.0.x);
    assert_eq!(v.0.y, 0.0);
    assert_eq!(g.0, PlayerTuning::default().walk_gravity_scale);
}

#[test]
fn smooth_toward_converges_without_overshoot() {
    let target = Vec2::new(100.0, 0.0);
    let mut v = Vec2::ZERO;
    for _ in 0..200 {
        let next = super::smooth_toward(v, target, 0.05, 1.0 / 60.0);
        assert!(next.x >= v.x && next.x <= target.x);
        v = next;
    }
    assert!((v.x - target.x).abs() < 1e-2);
    assert_eq!(super::smooth_toward(v, target, 0.0, 0.1), target);
}

#[test]
fn apply_player_hits_damages_once_per_message() {
    let mut world = contact_world();
    let player = spawn_player(&mut world, Vec2::ZERO, false);
    world.write_message(PlayerHit { amount: 10.0, source: HitSource::Melee });

    run_system_once(&mut world, super::apply_player_hits);

    assert_eq!(world.get::<PlayerCore>(player).unwrap().health(), 90.0);
    let cues: Vec<_> = world.resource_mut::<Messages<PlayerCueMessage>>().drain().collect();
    assert_eq!(cues, vec![PlayerCueMessage(PlayerCue::Damage)]);
}

#[test]
fn dash_kill_removes_adjacent_enemies_without_skipping() {
    let mut world = contact_world();
    spawn_player(&mut world, Vec2::ZERO, true);
    let a = spawn_registered_enemy(&mut world, Vec2::new(10.0, 0.0));
    let b = spawn_registered_enemy(&mut world, Vec2::new(-10.0, 0.0));
    let far = spawn_registered_enemy(&mut world, Vec2::new(500.0, 0.0));

    run_system_once(&mut world, super::resolve_enemy_contacts);

    let live: Vec<Entity> = world.resource::<EnemyRegistry>().live().into_iter().map(|(_, e)| e).collect();
    assert_eq!(live, vec![far]);

    let mut q = world.query::<&PlayerCore>();
    assert_eq!(q.single(&world).unwrap().score(), 30);

    let mut dead = world.resource_mut::<EnemyRegistry>().drain_dead();
    dead.sort();
    let mut expected = vec![a, b];
    expected.sort();
    assert_eq!(dead, expected);

    assert_eq!(world.resource_mut::<Messages<ParticleBurst>>().drain().count(), 2);
}

#[test]
fn walking_contact_is_edge_triggered() {
    let mut world = contact_world();
    let player = spawn_player(&mut world, Vec2::ZERO, false);
    spawn_registered_enemy(&mut world, Vec2::new(5.0, 0.0));

    run_system_once(&mut world, super::resolve_enemy_contacts);
    run_system_once(&mut world, super::resolve_enemy_contacts);

    assert_eq!(world.get::<PlayerCore>(player).unwrap().health(), 95.0);
    assert_eq!(world.resource::<EnemyRegistry>().live_count(), 1);
}

#[test]
fn lethal_walking_contact_kills_with_one_damage_cue() {
    let mut world = contact_world();
    let player = spawn_player(&mut world, Vec2::ZERO, false);
    world.get_mut::<PlayerCore>(player).unwrap().take_damage(97.0, HitSource::Projectile);
    spawn_registered_enemy(&mut world, Vec2::new(5.0, 0.0));

    run_system_once(&mut world, super::resolve_enemy_contacts);

    let core = world.get::<PlayerCore>(player).unwrap();
    assert_eq!(core.mode(), PlayerMode::Dead);
    assert_eq!(core.health(), 0.0);
    let cues: Vec<_> = world.resource_mut::<Messages<PlayerCueMessage>>().drain().collect();
    assert_eq!(cues, vec![PlayerCueMessage(PlayerCue::Damage)]);
    assert_eq!(world.resource::<EnemyRegistry>().live_count(), 1);
}

#[test]
fn player_death_clears_enemies_and_parks_at_spawn() {
    let mut world = contact_world();
    let player = spawn_player(&mut world, Vec2::new(300.0, 200.0), false);
    spawn_registered_enemy(&mut world, Vec2::new(600.0, 0.0));
    spawn_registered_enemy(&mut world, Vec2::new(-600.0, 0.0));

    world.get_mut::<PlayerCore>(player).unwrap().take_damage(1_000.0, HitSource::Blast);
    world.get_mut::<LinearVelocity>(player).unwrap().0 = Vec2::new(50.0, 50.0);

    run_system_once(&mut world, super::handle_player_death);

    assert_eq!(world.resource::<EnemyRegistry>().live_count(), 0);
    assert_eq!(world.resource_mut::<EnemyRegistry>().drain_dead().len(), 2);
    assert_eq!(
        world.get::<Transform>(player).unwrap().translation.truncate(),
        PlayerTuning::default().spawn_point
    );
    assert_eq!(world.get::<LinearVelocity>(player).unwrap().0, Vec2::ZERO);
}

#[test]
fn respawn_only_revives_a_dead_player() {
    let mut world = World::new();
    world.insert_resource(PlayerInput { respawn_requested: true, ..default() });
    let player = world.spawn((Player, core())).id();
    world.get_mut::<PlayerCore>(player).unwrap().take_damage(30.0, HitSource::Blast);

    run_system_once(&mut world, super::respawn_player);
    assert_eq!(world.get::<PlayerCore>(player).unwrap().health(), 70.0);
    assert!(!world.resource::<PlayerInput>().respawn_requested);

    world.get_mut::<PlayerCore>(player).unwrap().take_damage(100.0, HitSource::Blast);
    world.resource_mut::<PlayerInput>().respawn_requested = true;
    run_system_once(&mut world, super::respawn_player);
    assert_eq!(world.get::<PlayerCore>(player).unwrap().health(), 100.0);
}
