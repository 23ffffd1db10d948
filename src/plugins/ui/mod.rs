//! UI plugin.
//!
//! Split the same way as the rest of the crate:
//! - gameplay side (`plugin`): `HudReadout`, a plain snapshot of what the HUD
//!   shows, refreshed every frame. Works headless and is what tests read.
//! - render side (`hud::plugin`): camera-pinned bars, score text, refill
//!   countdown labels and the blast flash overlay, all driven by the readout.

pub mod hud;

use bevy::prelude::*;

use crate::common::state::GameState;
use crate::plugins::pickups::RefillBox;
use crate::plugins::player::{self, Player, PlayerCore};

/// What the HUD displays this frame. Fractions are in [0, 1].
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct HudReadout {
    pub health_fraction: f32,
    pub dash_fraction: f32,
    /// The meter is above the dash start threshold.
    pub dash_ready: bool,
    pub score: u32,
    pub alive: bool,
}

impl Default for HudReadout {
    fn default() -> Self {
        Self {
            health_fraction: 1.0,
            dash_fraction: 1.0,
            dash_ready: true,
            score: 0,
            alive: true,
        }
    }
}

impl HudReadout {
    pub fn from_core(core: &PlayerCore) -> Self {
        Self {
            health_fraction: core.health_fraction().clamp(0.0, 1.0),
            dash_fraction: core.meter().fraction().clamp(0.0, 1.0),
            dash_ready: core.meter().can_start(),
            score: core.score(),
            alive: core.is_alive(),
        }
    }
}

/// Refill countdown text, or empty once the box is ready.
pub fn refill_label(refill: &RefillBox) -> String {
    refill.timer.countdown().map(|s| s.to_string()).unwrap_or_default()
}

pub fn plugin(app: &mut App) {
    app.init_resource::<HudReadout>().add_systems(
        Update,
        refresh_readout
            .after(player::handle_player_death)
            .run_if(in_state(GameState::InGame)),
    );
}

pub(crate) fn refresh_readout(
    mut readout: ResMut<HudReadout>,
    q_player: Query<&PlayerCore, With<Player>>,
) {
    let Ok(core) = q_player.single() else {
        return;
    };
    readout.set_if_neq(HudReadout::from_core(core));
}
