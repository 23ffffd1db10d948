//! Presentation requests.
//!
//! Gameplay code only writes these. The fx systems are the single consumer, so
//! nothing in the simulation depends on sprites, cameras or particles existing.

use bevy::prelude::*;

/// Spawn a ring of fading particles.
#[derive(Message, Clone, Copy, Debug)]
pub struct ParticleBurst {
    pub pos: Vec2,
    pub color: Color,
    pub count: u8,
    pub speed: f32,
}

impl ParticleBurst {
    /// Enemy death: a wide burst in the enemy's colour.
    pub fn death(pos: Vec2, color: Color) -> Self {
        Self { pos, color, count: 14, speed: 220.0 }
    }

    pub fn blast(pos: Vec2) -> Self {
        Self { pos, color: Color::srgb(1.0, 0.65, 0.2), count: 24, speed: 380.0 }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShakePreset {
    DashKill,
    Blast,
}

#[derive(Message, Clone, Copy, Debug)]
pub struct ScreenShake(pub ShakePreset);
