//! Render-side HUD: everything here hangs off the main camera so it stays on
//! screen while the camera follows the player.

use bevy::prelude::*;

use crate::common::state::GameState;
use crate::plugins::camera::{self, MainCamera};
use crate::plugins::fx::GlobalFx;
use crate::plugins::pickups::RefillBox;

use super::{refill_label, HudReadout};

const BAR_SIZE: Vec2 = Vec2::new(240.0, 14.0);
/// Top-left corner of the HUD, relative to the camera centre.
const HUD_ORIGIN: Vec2 = Vec2::new(-620.0, 340.0);
const Z_HUD: f32 = -10.0;

const HEALTH_COLOR: Color = Color::srgb(0.85, 0.2, 0.25);
const DASH_READY_COLOR: Color = Color::srgb(0.3, 0.85, 1.0);
const DASH_LOW_COLOR: Color = Color::srgb(0.3, 0.4, 0.5);

#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub enum HudBar {
    Health,
    Dash,
}

#[derive(Component)]
pub struct ScoreText;

#[derive(Component)]
pub struct RefillLabel;

#[derive(Component)]
pub struct ScreenFlash;

pub fn plugin(app: &mut App) {
    app.add_systems(
        OnEnter(GameState::InGame),
        spawn_hud.after(camera::spawn_camera),
    )
    .add_systems(
        Update,
        (attach_refill_labels, update_bars, update_score, update_refill_labels)
            .after(super::refresh_readout)
            .run_if(in_state(GameState::InGame)),
    )
    .add_systems(
        PostUpdate,
        update_screen_flash.run_if(in_state(GameState::InGame)),
    );
}

/// Left-aligned fill: returns (local x offset, width) for a bar at `fraction`.
pub fn bar_fill(fraction: f32) -> (f32, f32) {
    let w = BAR_SIZE.x * fraction.clamp(0.0, 1.0);
    (w * 0.5, w)
}

fn spawn_hud(mut commands: Commands, q_cam: Query<Entity, With<MainCamera>>) {
    let Ok(cam) = q_cam.single() else {
        warn!("no main camera; HUD not spawned");
        return;
    };

    commands.entity(cam).with_children(|parent| {
        for (i, bar) in [HudBar::Health, HudBar::Dash].into_iter().enumerate() {
            let y = HUD_ORIGIN.y - i as f32 * (BAR_SIZE.y + 8.0);
            let left = HUD_ORIGIN.x;

            parent.spawn((
                Name::new("HudBarBack"),
                Sprite::from_color(Color::srgba(0.0, 0.0, 0.0, 0.6), BAR_SIZE + Vec2::splat(4.0)),
                Transform::from_xyz(left + BAR_SIZE.x * 0.5, y, Z_HUD),
            ));

            let color = match bar {
                HudBar::Health => HEALTH_COLOR,
                HudBar::Dash => DASH_READY_COLOR,
            };
            let (x, w) = bar_fill(1.0);
            parent.spawn((
                Name::new("HudBarFill"),
                bar,
                Sprite::from_color(color, Vec2::new(w, BAR_SIZE.y)),
                Transform::from_xyz(left + x, y, Z_HUD + 0.1),
            ));
        }

        parent.spawn((
            Name::new("ScoreText"),
            ScoreText,
            Text2d::new("Score: 0"),
            TextFont { font_size: 22.0, ..default() },
            TextColor(Color::srgb(0.95, 0.92, 0.85)),
            Transform::from_xyz(HUD_ORIGIN.x + 60.0, HUD_ORIGIN.y - 48.0, Z_HUD),
        ));

        parent.spawn((
            Name::new("ScreenFlash"),
            ScreenFlash,
            Sprite::from_color(Color::srgba(1.0, 1.0, 1.0, 0.0), Vec2::new(4000.0, 4000.0)),
            Transform::from_xyz(0.0, 0.0, Z_HUD - 1.0),
        ));
    });
}

fn attach_refill_labels(mut commands: Commands, q_new: Query<Entity, Added<RefillBox>>) {
    for e in &q_new {
        commands.entity(e).with_children(|parent| {
            parent.spawn((
                RefillLabel,
                Text2d::new(""),
                TextFont { font_size: 16.0, ..default() },
                TextColor(Color::srgb(0.9, 0.95, 0.9)),
                Transform::from_xyz(0.0, 28.0, 0.1),
            ));
        });
    }
}

fn update_bars(readout: Res<HudReadout>, mut q: Query<(&HudBar, &mut Sprite, &mut Transform)>) {
    if !readout.is_changed() {
        return;
    }
    for (bar, mut sprite, mut tf) in &mut q {
        let fraction = match bar {
            HudBar::Health => readout.health_fraction,
            HudBar::Dash => {
                sprite.color = if readout.dash_ready { DASH_READY_COLOR } else { DASH_LOW_COLOR };
                readout.dash_fraction
            }
        };
        let (x, w) = bar_fill(fraction);
        sprite.custom_size = Some(Vec2::new(w, BAR_SIZE.y));
        tf.translation.x = HUD_ORIGIN.x + x;
    }
}

fn update_score(readout: Res<HudReadout>, mut q: Query<&mut Text2d, With<ScoreText>>) {
    if !readout.is_changed() {
        return;
    }
    for mut text in &mut q {
        text.0 = if readout.alive {
            format!("Score: {}", readout.score)
        } else {
            format!("Score: {}  -  press R", readout.score)
        };
    }
}

fn update_refill_labels(
    q_boxes: Query<(&RefillBox, &Children)>,
    mut q_labels: Query<&mut Text2d, With<RefillLabel>>,
) {
    for (refill, children) in &q_boxes {
        let label = refill_label(refill);
        for child in children.iter() {
            if let Ok(mut text) = q_labels.get_mut(child) {
                if text.0 != label {
                    text.0 = label.clone();
                }
            }
        }
    }
}

fn update_screen_flash(fx: Res<GlobalFx>, mut q: Query<&mut Sprite, With<ScreenFlash>>) {
    for mut sprite in &mut q {
        sprite.color = Color::srgba(1.0, 1.0, 1.0, fx.flash() * 0.6);
    }
}
