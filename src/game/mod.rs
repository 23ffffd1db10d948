//! Game composition root.
//!
//! ```text
//! run ─▶ configure_full ─┬─ DefaultPlugins (window, render, input, log)
//!                        ├─ configure_game  (state + gameplay plugins)
//!                        └─ render-only plugins (lighting, camera, HUD)
//!
//! tests ─▶ configure_headless ─▶ configure_game
//! ```

use bevy::prelude::*;
use bevy::window::WindowResolution;

use crate::common::state::GameState;
use crate::plugins;

#[cfg(target_os = "windows")]
use bevy::render::{
    settings::{Backends, PowerPreference, WgpuSettings},
    RenderPlugin,
};

const TITLE: &str = "Dash Game";
const WINDOW_SIZE: (u32, u32) = (1280, 720);

pub fn run() {
    App::new().add_plugins(configure_full).run();
}

fn primary_window() -> WindowPlugin {
    WindowPlugin {
        primary_window: Some(Window {
            title: TITLE.into(),
            resolution: WindowResolution::new(WINDOW_SIZE.0, WINDOW_SIZE.1),
            ..default()
        }),
        ..default()
    }
}

/// Full configuration for `cargo run`.
pub fn configure_full(app: &mut App) {
    let default_plugins = DefaultPlugins.set(primary_window());

    // Vulkan is unreliable on some Windows drivers: force DX12 and the discrete GPU.
    #[cfg(target_os = "windows")]
    let default_plugins = default_plugins.set(RenderPlugin {
        render_creation: WgpuSettings {
            backends: Some(Backends::DX12),
            power_preference: PowerPreference::HighPerformance,
            ..default()
        }
        .into(),
        ..default()
    });

    app.add_plugins(default_plugins);
    configure_game(app);
    plugins::register_render(app);
    info!("{TITLE}: move A/D, jump Space, dash Shift or K, respawn R");
}

/// Headless configuration for integration tests: no window, renderer, Firefly, camera or HUD.
pub fn configure_headless(app: &mut App) {
    configure_game(app);
}

fn configure_game(app: &mut App) {
    app.init_state::<GameState>();
    plugins::register_gameplay(app);
}
