use avian2d::prelude::*;
use bevy::{ecs::message::Messages, prelude::*};

use crate::common::test_utils::run_system_once;
use crate::common::tunables::{PlayerTuning, Tunables};
use crate::plugins::player::{Player, PlayerCore};

use super::refill::RefillTimer;
use super::RefillBox;

fn run_for(timer: &mut RefillTimer, secs: f32, dt: f32) {
    let steps = (secs / dt).round() as usize;
    for _ in 0..steps {
        timer.tick(dt);
    }
}

#[test]
fn timer_turns_ready_after_duration_and_stops_counting() {
    let mut t = RefillTimer::new(1.0);
    run_for(&mut t, 0.9, 0.1);
    assert!(!t.is_ready());

    run_for(&mut t, 0.3, 0.1);
    assert!(t.is_ready());

    let frozen = t.elapsed();
    run_for(&mut t, 5.0, 0.1);
    assert_eq!(t.elapsed(), frozen);
}

#[test]
fn claim_only_succeeds_when_ready_and_resets() {
    let mut t = RefillTimer::new(0.5);
    assert!(!t.try_claim());

    run_for(&mut t, 1.0, 0.1);
    assert!(t.try_claim());
    assert!(!t.is_ready());
    assert_eq!(t.elapsed(), 0.0);
    assert!(!t.try_claim());
}

#[test]
fn countdown_shows_whole_seconds_left() {
    let mut t = RefillTimer::new(10.0);
    assert_eq!(t.countdown(), Some(10));

    t.tick(2.6);
    assert_eq!(t.countdown(), Some(7));

    run_for(&mut t, 8.0, 0.5);
    assert!(t.is_ready());
    assert_eq!(t.countdown(), None);
}

fn drained_player(world: &mut World) -> Entity {
    let mut core = PlayerCore::new(&PlayerTuning::default());
    // Dash until empty.
    while !core.meter().is_empty() {
        core.tick(0.1, true);
    }
    world.spawn((Player, core)).id()
}

fn refill_box(world: &mut World, ready: bool) -> Entity {
    let mut timer = RefillTimer::new(1.0);
    if ready {
        run_for(&mut timer, 1.2, 0.1);
    }
    world.spawn(RefillBox { timer }).id()
}

#[test]
fn claim_refill_tops_up_the_meter_when_ready() {
    let mut world = World::new();
    world.init_resource::<Messages<CollisionStart>>();
    let player = drained_player(&mut world);
    let boxed = refill_box(&mut world, true);

    world.write_message(CollisionStart { collider1: boxed, collider2: player, body1: Some(boxed), body2: Some(player) });
    run_system_once(&mut world, super::claim_refill);

    assert_eq!(world.get::<PlayerCore>(player).unwrap().meter().value(), 100.0);
    assert!(!world.get::<RefillBox>(boxed).unwrap().timer.is_ready());
}

#[test]
fn claim_refill_ignores_boxes_that_are_not_ready() {
    let mut world = World::new();
    world.init_resource::<Messages<CollisionStart>>();
    let player = drained_player(&mut world);
    let boxed = refill_box(&mut world, false);

    world.write_message(CollisionStart { collider1: player, collider2: boxed, body1: Some(player), body2: Some(boxed) });
    run_system_once(&mut world, super::claim_refill);

    assert_eq!(world.get::<PlayerCore>(player).unwrap().meter().value(), 0.0);
}

#[test]
fn spawns_one_sensor_box_per_position() {
    let mut world = World::new();
    let tunables = Tunables::default();
    let expected = tunables.refill.positions.len();
    world.insert_resource(tunables);

    run_system_once(&mut world, super::spawn_refill_boxes);

    let n = world.query::<(&RefillBox, &Sensor)>().iter(&world).count();
    assert_eq!(n, expected);
}
