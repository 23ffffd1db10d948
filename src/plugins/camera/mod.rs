//! Camera plugin (render-only).
//!
//! The camera eases toward the player, then adds `GlobalFx::shake_offset` on
//! top. The eased position lives in `MainCamera::focus` so shake never
//! accumulates into the follow.
//!
//! B0001: a system cannot hold `Query<&Transform>` and `Query<&mut Transform>`
//! unless Bevy can prove them disjoint, hence the `Without<...>` filters.
//!
//! ```text
//! OnEnter(InGame): spawn MainCamera at the player's spawn point
//! PostUpdate:      follow_player (after fx has advanced the shake)
//! ```

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use bevy_firefly::prelude::*;

use crate::common::{state::GameState, tunables::Tunables};
use crate::plugins::fx::{self, GlobalFx};
use crate::plugins::player::Player;

#[derive(Component)]
pub struct MainCamera {
    pub responsiveness: f32,
    pub focus: Vec2,
}

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_camera)
        .add_systems(
            PostUpdate,
            follow_player
                .after(fx::advance_global_fx)
                .before(TransformSystems::Propagate)
                .run_if(in_state(GameState::InGame)),
        );
}

pub(crate) fn spawn_camera(mut commands: Commands, tunables: Res<Tunables>) {
    let start = tunables.player.spawn_point;
    commands.spawn((
        Name::new("MainCamera"),
        Camera2d,
        MainCamera { responsiveness: 5.0, focus: start },
        FireflyConfig::default(),
        Transform::from_translation(start.extend(999.0)),
        DespawnOnExit(GameState::InGame),
    ));
}

/// Exponential follow: the same fraction of the gap closes each second regardless of frame rate.
pub fn follow_alpha(responsiveness: f32, dt: f32) -> f32 {
    1.0 - (-responsiveness * dt.max(0.0)).exp()
}

fn follow_player(
    time: Res<Time>,
    fx: Res<GlobalFx>,
    // Disjointness proof: Player entities are not MainCamera entities.
    q_player: Query<&Transform, (With<Player>, Without<MainCamera>)>,
    // Disjointness proof: MainCamera entities are not Player entities.
    mut q_cam: Query<(&mut Transform, &mut MainCamera), Without<Player>>,
) {
    let Ok(tf_player) = q_player.single() else {
        return;
    };
    let Ok((mut tf_cam, mut cam)) = q_cam.single_mut() else {
        return;
    };

    let alpha = follow_alpha(cam.responsiveness, time.delta_secs());
    let target = tf_player.translation.truncate();
    let focus = cam.focus;
    cam.focus += (target - focus) * alpha;

    let shown = cam.focus + fx.shake_offset();
    tf_cam.translation.x = shown.x;
    tf_cam.translation.y = shown.y;
}
