//! World plugin: arena walls, floor backdrop and a few ledges to jump onto.
//!
//! Everything here is `Layer::World`: the player stands on it, the jump probe
//! ray hits it, and enemy bullets are recycled when they touch it.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{layers::Layer, state::GameState};

const TILE: i32 = 64;
pub const HALF_W: f32 = (TILE * 16) as f32;
pub const HALF_H: f32 = (TILE * 9) as f32;
const WALL_THICKNESS: f32 = 30.0;

/// (centre, size) of each ledge.
const LEDGES: [(Vec2, Vec2); 4] = [
    (Vec2::new(-420.0, -330.0), Vec2::new(260.0, 20.0)),
    (Vec2::new(420.0, -330.0), Vec2::new(260.0, 20.0)),
    (Vec2::new(0.0, -120.0), Vec2::new(320.0, 20.0)),
    (Vec2::new(0.0, 180.0), Vec2::new(200.0, 20.0)),
];

#[derive(Component)]
pub struct Solid;

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), (spawn_arena, spawn_floor));
}

pub fn world_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::World, [Layer::Player, Layer::Enemy, Layer::EnemyBullet])
}

fn solid_bundle(name: &'static str, center: Vec2, size: Vec2, color: Color) -> impl Bundle {
    (
        Name::new(name),
        Solid,
        Sprite {
            color,
            custom_size: Some(size),
            ..default()
        },
        Transform::from_translation(center.extend(0.5)),
        RigidBody::Static,
        Collider::rectangle(size.x, size.y),
        world_layers(),
        DespawnOnExit(GameState::InGame),
    )
}

/// Centre and size of the four walls: top, ground, left, right.
fn wall_rects() -> [(&'static str, Vec2, Vec2); 4] {
    let t = WALL_THICKNESS;
    let wide = Vec2::new(HALF_W * 2.0 + t * 2.0, t);
    let tall = Vec2::new(t, HALF_H * 2.0);
    [
        ("WallTop", Vec2::new(0.0, HALF_H + t * 0.5), wide),
        ("Ground", Vec2::new(0.0, -HALF_H - t * 0.5), wide),
        ("WallLeft", Vec2::new(-HALF_W - t * 0.5, 0.0), tall),
        ("WallRight", Vec2::new(HALF_W + t * 0.5, 0.0), tall),
    ]
}

fn spawn_arena(mut commands: Commands) {
    let wall_color = Color::srgb(0.25, 0.27, 0.33);
    for (name, center, size) in wall_rects() {
        commands.spawn(solid_bundle(name, center, size, wall_color));
    }

    let ledge_color = Color::srgb(0.3, 0.33, 0.4);
    for (center, size) in LEDGES {
        commands.spawn(solid_bundle("Ledge", center, size, ledge_color));
    }
}

/// Checkerboard backdrop. Decorative only: no collider.
fn spawn_floor(mut commands: Commands) {
    (-(HALF_H as i32 / TILE)..=HALF_H as i32 / TILE)
        .flat_map(|y| (-(HALF_W as i32 / TILE)..=HALF_W as i32 / TILE).map(move |x| (x, y)))
        .for_each(|(x, y)| {
            let color = if (x + y) % 2 == 0 {
                Color::srgb(0.14, 0.14, 0.16)
            } else {
                Color::srgb(0.12, 0.12, 0.14)
            };

            commands.spawn((
                Sprite::from_color(color, Vec2::splat(TILE as f32)),
                Transform::from_xyz((x * TILE) as f32, (y * TILE) as f32, 0.0),
                DespawnOnExit(GameState::InGame),
            ));
        });
}
