use std::time::Duration;

use bevy::{ecs::message::Messages, prelude::*};

use crate::common::test_utils::run_system_once;
use crate::common::tunables::PlayerTuning;
use crate::plugins::player::controller::PlayerCue;
use crate::plugins::player::{Player, PlayerCore, PlayerCueMessage};

use super::messages::{ParticleBurst, ShakePreset};
use super::{GlobalFx, HitFlash, Spark, UnitF32};

#[test]
fn unit_f32_clamps_on_write() {
    let mut u = UnitF32::new_clamped(3.0);
    assert_eq!(u.get(), 1.0);
    u.add_clamped(-5.0);
    assert_eq!(u.get(), 0.0);
    u.add_clamped(0.25);
    u.decay_to_zero(1.0, -1.0);
    assert_eq!(u.get(), 0.25);
    u.decay_to_zero(1.0, 1.0);
    assert_eq!(u.get(), 0.0);
}

#[test]
fn blast_shakes_harder_than_a_dash_kill_and_flashes() {
    let mut kill = GlobalFx::default();
    kill.trigger(ShakePreset::DashKill);
    let mut blast = GlobalFx::default();
    blast.trigger(ShakePreset::Blast);

    assert!(blast.trauma() > kill.trauma());
    assert_eq!(kill.flash(), 0.0);
    assert!(blast.flash() > 0.0);
}

#[test]
fn shake_decays_to_rest() {
    let mut fx = GlobalFx::default();
    assert_eq!(fx.shake_offset(), Vec2::ZERO);

    fx.trigger(ShakePreset::Blast);
    for _ in 0..10 {
        fx.advance(1.0 / 60.0);
        assert!(fx.shake_offset().length() <= 36.0 + 1e-3);
    }
    for _ in 0..120 {
        fx.advance(1.0 / 60.0);
    }
    assert_eq!(fx.trauma(), 0.0);
    assert_eq!(fx.flash(), 0.0);
    assert_eq!(fx.shake_offset(), Vec2::ZERO);
}

#[test]
fn burst_velocities_cover_the_circle() {
    let vs: Vec<Vec2> = super::burst_velocities(8, 100.0).collect();
    assert_eq!(vs.len(), 8);
    let sum: Vec2 = vs.iter().copied().sum();
    // Alternating speeds keep the ring roughly balanced.
    assert!(sum.length() < 100.0);
    assert!(vs.iter().all(|v| v.length() > 0.0));
}

#[test]
fn bursts_spawn_sparks_that_expire() {
    let mut world = World::new();
    world.init_resource::<Messages<ParticleBurst>>();
    world.write_message(ParticleBurst::death(Vec2::ZERO, Color::WHITE));

    run_system_once(&mut world, super::spawn_bursts);
    assert_eq!(world.query::<&Spark>().iter(&world).count(), 14);

    let mut time = Time::<()>::default();
    time.advance_by(Duration::from_secs(1));
    world.insert_resource(time);
    run_system_once(&mut world, super::animate_sparks);
    assert_eq!(world.query::<&Spark>().iter(&world).count(), 0);
}

#[test]
fn damage_cue_flashes_the_player() {
    let mut world = World::new();
    world.init_resource::<Messages<PlayerCueMessage>>();
    let player = world
        .spawn((Player, PlayerCore::new(&PlayerTuning::default()), HitFlash::default(), Sprite::default()))
        .id();

    world.write_message(PlayerCueMessage(PlayerCue::Jump));
    run_system_once(&mut world, super::react_to_player_cues);
    assert_eq!(world.get::<HitFlash>(player).unwrap().0.get(), 0.0);

    world.write_message(PlayerCueMessage(PlayerCue::Damage));
    run_system_once(&mut world, super::react_to_player_cues);
    assert_eq!(world.get::<HitFlash>(player).unwrap().0.get(), 1.0);

    world.insert_resource(Time::<()>::default());
    run_system_once(&mut world, super::fade_hit_flash);
    let red = world.get::<Sprite>(player).unwrap().color.to_srgba().red;
    assert!(red > 0.9);
}
