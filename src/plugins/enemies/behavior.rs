//! Enemy brains: one cooldown contract, four variant behaviours.
//!
//! Every tick the attack timer advances by `dt` (capped at the variant's
//! interval). Once it reaches the interval the variant may attack; the timer
//! resets to zero only when the attack actually happens. A melee enemy that is
//! not touching the player therefore retries every tick until a hit lands.

use bevy::prelude::*;

use crate::common::tunables::EnemyTuning;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnemyKind {
    Melee,
    Shooter,
    Bomber,
    Ghost,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 4] = [Self::Melee, Self::Shooter, Self::Bomber, Self::Ghost];

    /// Body colour, also used to tint death particles.
    pub fn color(self) -> Color {
        match self {
            Self::Melee => Color::srgb(0.9, 0.25, 0.25),
            Self::Shooter => Color::srgb(0.95, 0.6, 0.15),
            Self::Bomber => Color::srgb(0.35, 0.3, 0.3),
            Self::Ghost => Color::srgba(0.75, 0.8, 0.95, 0.6),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Melee => "Melee",
            Self::Shooter => "Shooter",
            Self::Bomber => "Bomber",
            Self::Ghost => "Ghost",
        }
    }
}

/// What the enemy knows about the world this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Perception {
    pub own_pos: Vec2,
    pub player_pos: Vec2,
    pub player_dashing: bool,
    pub touching_player: bool,
}

impl Perception {
    #[inline]
    pub fn distance(&self) -> f32 {
        self.own_pos.distance(self.player_pos)
    }
}

/// Handed to the projectile emitter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileSpec {
    pub origin: Vec2,
    pub direction: Vec2,
    pub damage: f32,
    pub speed: f32,
    pub max_range: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Attack {
    Melee { damage: f32 },
    Shot(ProjectileSpec),
    /// `damage` is `None` when the player is outside the lethal zone.
    Blast { damage: Option<f32>, distance: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decision {
    /// Speed cap for the pathing collaborator. Zero holds position.
    pub max_speed: f32,
    pub attack: Option<Attack>,
    pub tint: Color,
    /// The enemy removed itself and must be deregistered.
    pub expired: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Fuse {
    #[default]
    Armed,
    Lit { elapsed: f32, ticks: u32, flashing: bool },
    Spent,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Behavior {
    Melee,
    Shooter { holding: bool },
    Bomber(Fuse),
    Ghost,
}

#[derive(Component, Debug, Clone)]
pub struct EnemyBrain {
    kind: EnemyKind,
    attack_timer: f32,
    behavior: Behavior,
}

impl EnemyBrain {
    pub fn new(kind: EnemyKind) -> Self {
        let behavior = match kind {
            EnemyKind::Melee => Behavior::Melee,
            EnemyKind::Shooter => Behavior::Shooter { holding: false },
            EnemyKind::Bomber => Behavior::Bomber(Fuse::Armed),
            EnemyKind::Ghost => Behavior::Ghost,
        };
        Self { kind, attack_timer: 0.0, behavior }
    }

    #[inline]
    pub fn kind(&self) -> EnemyKind {
        self.kind
    }

    #[inline]
    pub fn attack_timer(&self) -> f32 {
        self.attack_timer
    }

    pub fn fuse(&self) -> Option<Fuse> {
        match self.behavior {
            Behavior::Bomber(fuse) => Some(fuse),
            _ => None,
        }
    }

    /// Shooters freeze while the player is in range.
    pub fn is_holding(&self) -> bool {
        matches!(self.behavior, Behavior::Shooter { holding: true })
    }

    pub fn tick(&mut self, dt: f32, seen: &Perception, stats: &EnemyTuning) -> Decision {
        let dt = dt.max(0.0);
        let interval = attack_interval(self.kind, stats);
        self.attack_timer = (self.attack_timer + dt).min(interval);
        let ready = self.attack_timer >= interval;
        let distance = seen.distance();

        let mut decision = Decision {
            max_speed: 0.0,
            attack: None,
            tint: self.kind.color(),
            expired: false,
        };

        match &mut self.behavior {
            Behavior::Melee => {
                decision.max_speed = stats.melee.move_speed;
                if ready && seen.touching_player && !seen.player_dashing {
                    decision.attack = Some(Attack::Melee { damage: stats.melee.damage });
                    self.attack_timer = 0.0;
                }
            }
            Behavior::Shooter { holding } => {
                let s = &stats.shooter;
                *holding = distance <= s.range;
                decision.max_speed = if *holding { 0.0 } else { s.move_speed };
                if ready && *holding {
                    decision.attack = Some(Attack::Shot(ProjectileSpec {
                        origin: seen.own_pos,
                        direction: aim(seen.own_pos, seen.player_pos),
                        damage: s.damage,
                        speed: s.projectile_speed,
                        max_range: s.range + s.projectile_reach,
                    }));
                    self.attack_timer = 0.0;
                }
            }
            Behavior::Bomber(fuse) => {
                let b = &stats.bomber;
                match fuse {
                    Fuse::Armed => {
                        decision.max_speed = b.move_speed;
                        if distance <= b.blast_radius {
                            *fuse = Fuse::Lit { elapsed: 0.0, ticks: 0, flashing: false };
                            decision.max_speed = b.move_speed * b.fuse_speed_factor;
                        }
                    }
                    Fuse::Lit { elapsed, ticks, flashing } => {
                        decision.max_speed = b.move_speed * b.fuse_speed_factor;

                        *ticks += 1;
                        if *ticks % b.flash_every_ticks.max(1) == 0 {
                            *flashing = !*flashing;
                        }
                        if *flashing {
                            decision.tint = b.flash_color;
                        }

                        *elapsed += dt;
                        if *elapsed > b.fuse {
                            let raw = (b.base_damage - distance * b.dampener).max(0.0);
                            let lethal = raw > 0.0 && distance <= b.blast_radius * 0.5;
                            decision.attack = Some(Attack::Blast {
                                damage: lethal.then_some(raw),
                                distance,
                            });
                            decision.max_speed = 0.0;
                            decision.expired = true;
                            *fuse = Fuse::Spent;
                        }
                    }
                    Fuse::Spent => {
                        decision.expired = true;
                    }
                }
            }
            Behavior::Ghost => {
                // Stats are declared but no attack is wired up.
                decision.max_speed = stats.ghost.move_speed;
            }
        }

        decision
    }
}

fn attack_interval(kind: EnemyKind, stats: &EnemyTuning) -> f32 {
    match kind {
        EnemyKind::Melee => stats.melee.attack_interval,
        EnemyKind::Shooter => stats.shooter.attack_interval,
        // Detonation runs on its own fuse.
        EnemyKind::Bomber => f32::INFINITY,
        EnemyKind::Ghost => stats.ghost.attack_interval,
    }
}

/// Unit vector from `from` to `to`, straight up when they coincide.
#[inline]
fn aim(from: Vec2, to: Vec2) -> Vec2 {
    let d = to - from;
    if d.length_squared() < 1e-4 { Vec2::Y } else { d.normalize() }
}

/// Velocity that moves `from` toward `to` at up to `max_speed`, stopping
/// `stop_distance` short and never overshooting within one `dt`.
pub fn seek_velocity(from: Vec2, to: Vec2, max_speed: f32, stop_distance: f32, dt: f32) -> Vec2 {
    let d = to - from;
    let dist = d.length();
    let room = dist - stop_distance.max(0.0);
    if room <= 1e-3 || max_speed <= 0.0 {
        return Vec2::ZERO;
    }
    let speed = if dt > 0.0 { max_speed.min(room / dt) } else { max_speed };
    d / dist * speed
}

/// Circle overlap, used for both melee reach and dash contact.
#[inline]
pub fn touching(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    a.distance_squared(b) <= (ra + rb) * (ra + rb)
}
