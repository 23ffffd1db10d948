//! Player state machine: health, dash meter, mode, score.
//!
//! ```text
//!   Walking ──(dash held && meter.can_start())──▶ Dashing
//!   Dashing ──(dash released || meter empty)────▶ Walking
//!   any     ──(health <= 0)─────────────────────▶ Dead   (until respawn)
//! ```
//!
//! Nothing here touches the ECS. Systems feed it input and apply its outputs.

use bevy::prelude::*;

use crate::common::tunables::PlayerTuning;

use super::meter::{DashMeter, METER_MAX};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerMode {
    Walking,
    Dashing,
    Dead,
}

/// Fire-and-forget animation triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerCue {
    Damage,
    Jump,
    /// Meter dropped below the start threshold while not dashing.
    Recharge,
    /// Meter is back above the start threshold.
    Stop,
}

/// Where damage came from. Melee and contact damage cannot land during a dash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitSource {
    Melee,
    Contact,
    Projectile,
    Blast,
}

impl HitSource {
    #[inline]
    fn blocked_by_dash(self) -> bool {
        matches!(self, Self::Melee | Self::Contact)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DamageOutcome {
    Ignored,
    Hurt(f32),
    Killed(f32),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ContactOutcome {
    /// Player was dashing: the enemy dies and the player scores.
    DashKill { points: u32 },
    Damaged(DamageOutcome),
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MeterPhase {
    Ready,
    Draining,
    Recharging,
}

#[derive(Component, Debug, Clone)]
pub struct PlayerCore {
    tuning: PlayerTuning,
    health: f32,
    meter: DashMeter,
    mode: PlayerMode,
    last_dash_dir: Vec2,
    score: u32,
    meter_phase: MeterPhase,
}

impl PlayerCore {
    pub fn new(tuning: &PlayerTuning) -> Self {
        Self {
            tuning: tuning.clone(),
            health: METER_MAX,
            meter: DashMeter::new(
                tuning.dash_start_threshold,
                tuning.dash_recharge_rate,
                tuning.dash_drain_rate,
            ),
            mode: PlayerMode::Walking,
            last_dash_dir: Vec2::Y,
            score: 0,
            meter_phase: MeterPhase::Ready,
        }
    }

    pub fn tuning(&self) -> &PlayerTuning {
        &self.tuning
    }

    #[inline]
    pub fn health(&self) -> f32 {
        self.health
    }

    #[inline]
    pub fn health_fraction(&self) -> f32 {
        self.health / METER_MAX
    }

    #[inline]
    pub fn meter(&self) -> &DashMeter {
        &self.meter
    }

    #[inline]
    pub fn mode(&self) -> PlayerMode {
        self.mode
    }

    #[inline]
    pub fn is_dashing(&self) -> bool {
        self.mode == PlayerMode::Dashing
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.mode != PlayerMode::Dead
    }

    #[inline]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[inline]
    pub fn last_dash_dir(&self) -> Vec2 {
        self.last_dash_dir
    }

    /// Per-frame update: mode transitions, then meter drain/recharge.
    ///
    /// Returns a meter cue when the meter crosses the start threshold.
    pub fn tick(&mut self, dt: f32, dash_held: bool) -> Option<PlayerCue> {
        if !self.is_alive() {
            return None;
        }

        self.mode = match self.mode {
            PlayerMode::Walking if dash_held && self.meter.can_start() => PlayerMode::Dashing,
            PlayerMode::Dashing if !dash_held || self.meter.is_empty() => PlayerMode::Walking,
            mode => mode,
        };

        self.meter.tick(dt, self.is_dashing());

        if self.is_dashing() && self.meter.is_empty() {
            self.mode = PlayerMode::Walking;
        }
        if self.mode == PlayerMode::Walking {
            self.last_dash_dir = Vec2::Y;
        }

        self.update_meter_phase()
    }

    /// Physics-step target velocity.
    ///
    /// Dashing ignores gravity and keeps the last heading when the stick is idle.
    /// Walking only drives the horizontal axis.
    pub fn target_velocity(&mut self, axis: Vec2, current: Vec2) -> Vec2 {
        match self.mode {
            PlayerMode::Dashing => {
                let dir = axis.normalize_or_zero();
                if dir != Vec2::ZERO {
                    self.last_dash_dir = dir;
                }
                self.last_dash_dir * self.tuning.dash_speed
            }
            PlayerMode::Walking => Vec2::new(axis.x.clamp(-1.0, 1.0) * self.tuning.move_speed, current.y),
            PlayerMode::Dead => Vec2::new(0.0, current.y),
        }
    }

    /// Smoothing time constant for the current mode.
    pub fn smoothing(&self) -> f32 {
        if self.is_dashing() {
            self.tuning.dash_smoothing
        } else {
            self.tuning.walk_smoothing
        }
    }

    pub fn gravity_scale(&self) -> f32 {
        if self.is_dashing() {
            0.0
        } else {
            self.tuning.walk_gravity_scale
        }
    }

    /// A jump is honoured only on the ground and never mid-dash.
    pub fn can_jump(&self, grounded: bool) -> bool {
        grounded && self.mode == PlayerMode::Walking
    }

    pub fn take_damage(&mut self, amount: f32, source: HitSource) -> DamageOutcome {
        if !self.is_alive() || amount <= 0.0 {
            return DamageOutcome::Ignored;
        }
        if self.is_dashing() && source.blocked_by_dash() {
            return DamageOutcome::Ignored;
        }

        self.health = (self.health - amount).clamp(0.0, METER_MAX);
        if self.health <= 0.0 {
            self.mode = PlayerMode::Dead;
            DamageOutcome::Killed(amount)
        } else {
            DamageOutcome::Hurt(amount)
        }
    }

    /// Touching an enemy: dash kills it, otherwise the player takes contact damage.
    pub fn on_enemy_contact(&mut self) -> ContactOutcome {
        match self.mode {
            PlayerMode::Dead => ContactOutcome::Ignored,
            PlayerMode::Dashing => {
                self.score += self.tuning.points_per_kill;
                self.meter.spend(self.tuning.dash_kill_penalty);
                ContactOutcome::DashKill { points: self.tuning.points_per_kill }
            }
            PlayerMode::Walking => {
                ContactOutcome::Damaged(self.take_damage(self.tuning.contact_damage, HitSource::Contact))
            }
        }
    }

    /// Fill the meter. The phase is left alone so the next `tick` reports the
    /// crossing back above the threshold as a `Stop` cue.
    pub fn refill_meter(&mut self) {
        self.meter.refill();
    }

    /// Back to a fresh player. Only meaningful once dead.
    ///
    /// The meter phase survives, so a player who died recharging still gets
    /// `Stop` on the first tick after respawn.
    pub fn respawn(&mut self) {
        let phase = self.meter_phase;
        *self = Self::new(&self.tuning);
        self.meter_phase = phase;
    }

    fn update_meter_phase(&mut self) -> Option<PlayerCue> {
        let phase = if self.meter.can_start() {
            MeterPhase::Ready
        } else if self.is_dashing() {
            MeterPhase::Draining
        } else {
            MeterPhase::Recharging
        };

        if phase == self.meter_phase {
            return None;
        }
        self.meter_phase = phase;

        match phase {
            MeterPhase::Ready => Some(PlayerCue::Stop),
            MeterPhase::Recharging => Some(PlayerCue::Recharge),
            MeterPhase::Draining => None,
        }
    }
}
