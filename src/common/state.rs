//! Global state machine.
//!
//! Player death is a mode of `PlayerCore`, not an app state: the arena keeps
//! running while the player waits to respawn.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, States, Default)]
pub enum GameState {
    #[default]
    InGame,
}
