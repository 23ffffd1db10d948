use bevy::prelude::*;

use crate::common::tunables::Tunables;
use crate::plugins::core;

#[test]
fn inserts_resources() {
    let mut app = App::new();
    core::plugin(&mut app);
    assert!(app.world().get_resource::<Tunables>().is_some());
    assert!(app.world().get_resource::<ClearColor>().is_some());
}

#[test]
fn shipped_tunables_are_consistent() {
    let t = Tunables::default();
    let p = &t.player;
    assert!(p.dash_start_threshold > 0.0 && p.dash_start_threshold < 100.0);
    assert!(p.dash_speed > p.move_speed);
    assert!(t.enemies.shooter.range > 0.0);
    assert!(t.enemies.bomber.blast_radius > 0.0);
    assert!(!t.refill.positions.is_empty());
    assert!(!t.spawner.spawn_points.is_empty());
    assert!(t.bullet_pool_capacity > 0);
}
