//! Lighting plugin (Firefly) (render-only).
//!
//! One point light rides on the player. Its reach shrinks as the dash meter
//! empties and it turns cyan while dashing.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use bevy_firefly::prelude::*;

use crate::common::state::GameState;
use crate::plugins::player::{Player, PlayerCore};

const MIN_RANGE: f32 = 220.0;
const MAX_RANGE: f32 = 480.0;
const WALK_COLOR: Color = Color::srgb(1.0, 0.9, 0.75);
const DASH_COLOR: Color = Color::srgb(0.55, 0.95, 1.0);

#[derive(Component)]
pub struct PlayerLight;

pub fn plugin(app: &mut App) {
    if !app.is_plugin_added::<FireflyPlugin>() {
        app.add_plugins(FireflyPlugin);
    }

    app.add_systems(OnEnter(GameState::InGame), setup)
        .add_systems(Update, follow_player_light.run_if(in_state(GameState::InGame)));
}

fn setup(mut commands: Commands) {
    commands.spawn((
        Name::new("PlayerLight"),
        PlayerLight,
        PointLight2d {
            color: WALK_COLOR,
            radius: MAX_RANGE,
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 10.0),
        DespawnOnExit(GameState::InGame),
    ));
}

pub fn light_range(meter_fraction: f32) -> f32 {
    MIN_RANGE + (MAX_RANGE - MIN_RANGE) * meter_fraction.clamp(0.0, 1.0)
}

fn follow_player_light(
    q_player: Query<(&Transform, &PlayerCore), (With<Player>, Without<PlayerLight>)>,
    mut q_light: Query<(&mut Transform, &mut PointLight2d), (With<PlayerLight>, Without<Player>)>,
) {
    let Ok((tf_player, core)) = q_player.single() else {
        return;
    };
    let Ok((mut tf_light, mut light)) = q_light.single_mut() else {
        return;
    };

    tf_light.translation.x = tf_player.translation.x;
    tf_light.translation.y = tf_player.translation.y;

    light.radius = light_range(core.meter().fraction());
    light.color = if core.is_dashing() { DASH_COLOR } else { WALK_COLOR };
}
