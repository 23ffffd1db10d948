//! Pickups plugin: refill boxes that top the dash meter back up.
//!
//! ```text
//! Update:           tick_refill_boxes   (count up, tint when ready)
//! FixedPostUpdate:  claim_refill        (CollisionStart player <-> box)
//! ```

pub mod refill;

use avian2d::collision::narrow_phase::CollisionEventSystems;
use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{layers::Layer, state::GameState, tunables::Tunables};
use crate::plugins::player::{Player, PlayerCore};

use refill::RefillTimer;

const IDLE_COLOR: Color = Color::srgb(0.25, 0.3, 0.35);
const READY_COLOR: Color = Color::srgb(0.35, 1.0, 0.55);

#[derive(Component, Debug)]
pub struct RefillBox {
    pub timer: RefillTimer,
}

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn_refill_boxes)
        .add_systems(
            Update,
            tick_refill_boxes.run_if(in_state(GameState::InGame)),
        )
        .add_systems(
            FixedPostUpdate,
            claim_refill
                .after(CollisionEventSystems)
                .run_if(in_state(GameState::InGame)),
        );
}

fn spawn_refill_boxes(mut commands: Commands, tunables: Res<Tunables>) {
    let t = &tunables.refill;
    let size = Vec2::splat(t.half_size * 2.0);

    for &pos in &t.positions {
        commands.spawn((
            Name::new("RefillBox"),
            RefillBox { timer: RefillTimer::new(t.refill_time) },
            Sprite {
                color: IDLE_COLOR,
                custom_size: Some(size),
                ..default()
            },
            Transform::from_translation(pos.extend(0.8)),
            (
                RigidBody::Static,
                Collider::rectangle(size.x, size.y),
                Sensor,
                CollisionEventsEnabled,
                CollisionLayers::new(Layer::Pickup, [Layer::Player]),
            ),
            DespawnOnExit(GameState::InGame),
        ));
    }
}

pub(crate) fn tick_refill_boxes(time: Res<Time>, mut q: Query<(&mut RefillBox, &mut Sprite)>) {
    let dt = time.delta_secs();
    for (mut refill, mut sprite) in &mut q {
        refill.timer.tick(dt);
        sprite.color = if refill.timer.is_ready() { READY_COLOR } else { IDLE_COLOR };
    }
}

pub(crate) fn claim_refill(
    mut started: MessageReader<CollisionStart>,
    mut q_boxes: Query<&mut RefillBox>,
    mut q_player: Query<&mut PlayerCore, With<Player>>,
) {
    for ev in started.read() {
        let pairs = [
            (ev.collider1, ev.body2.unwrap_or(ev.collider2)),
            (ev.collider2, ev.body1.unwrap_or(ev.collider1)),
        ];
        for (box_e, other) in pairs {
            let Ok(mut refill) = q_boxes.get_mut(box_e) else {
                continue;
            };
            let Ok(mut core) = q_player.get_mut(other) else {
                continue;
            };
            if core.is_alive() && refill.timer.try_claim() {
                core.refill_meter();
                debug!("refill box claimed");
            }
        }
    }
}

#[cfg(test)]
mod tests;
