//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides the core ECS runtime.
//! - `dash_game::game::configure_headless` installs the gameplay plugins.
//! - time advances by a fixed step per `app.update()` so runs are repeatable.

#![allow(dead_code)]

use std::time::Duration;

use bevy::asset::AssetPlugin;
use bevy::prelude::*;
use bevy::scene::ScenePlugin;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

use dash_game::common::tunables::Tunables;
use dash_game::plugins::enemies::behavior::EnemyKind;
use dash_game::plugins::enemies::registry::EnemyRegistry;
use dash_game::plugins::enemies::spawn_enemy;
use dash_game::plugins::player::{Player, PlayerCore};

pub const FRAME: Duration = Duration::from_micros(16_667);

pub fn app_headless() -> App {
    let mut app = App::new();

    // Add AssetPlugin + ScenePlugin so SceneSpawner exists.
    app.add_plugins((
        MinimalPlugins,
        StatesPlugin,
        AssetPlugin::default(),
        ScenePlugin,
    ));
    app.insert_resource(TimeUpdateStrategy::ManualDuration(FRAME));

    dash_game::game::configure_headless(&mut app);
    // `App::run` does this before the first update; tests drive `update()` by hand.
    app.finish();
    app.cleanup();
    app
}

/// Boot the app far enough that `OnEnter(InGame)` has spawned the world.
pub fn booted() -> App {
    let mut app = app_headless();
    app.update();
    app
}

pub fn player(app: &mut App) -> Entity {
    app.world_mut()
        .query_filtered::<Entity, With<Player>>()
        .single(app.world())
        .expect("exactly one player")
}

pub fn core(app: &mut App) -> PlayerCore {
    let e = player(app);
    app.world().get::<PlayerCore>(e).expect("player core").clone()
}

pub fn player_pos(app: &mut App) -> Vec2 {
    let e = player(app);
    app.world().get::<Transform>(e).expect("player transform").translation.truncate()
}

/// Spawn and register an enemy the same way the spawner does.
pub fn spawn_enemy_at(app: &mut App, kind: EnemyKind, pos: Vec2) -> Entity {
    let world = app.world_mut();
    let tuning = world.resource::<Tunables>().enemies.clone();
    let e = world.resource_scope(|world, mut registry: Mut<EnemyRegistry>| {
        let mut commands = world.commands();
        spawn_enemy(&mut commands, &mut registry, &tuning, kind, pos)
    });
    world.flush();
    e
}
