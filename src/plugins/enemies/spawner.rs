//! Enemy spawner: a fixed rotation of kinds and spawn points on a timer.
//!
//! Paused while the player is dead; capped by the registry's live count.

use bevy::prelude::*;

use crate::common::tunables::{SpawnerTuning, Tunables};
use crate::plugins::player::{Player, PlayerCore};

use super::behavior::EnemyKind;
use super::registry::EnemyRegistry;
use super::spawn_enemy;

#[derive(Resource, Debug)]
pub struct EnemySpawner {
    timer: Timer,
    next_kind: usize,
    next_point: usize,
}

impl Default for EnemySpawner {
    fn default() -> Self {
        Self::new(&SpawnerTuning::default())
    }
}

impl EnemySpawner {
    pub fn new(tuning: &SpawnerTuning) -> Self {
        Self {
            timer: Timer::from_seconds(tuning.interval.max(0.01), TimerMode::Repeating),
            next_kind: 0,
            next_point: 0,
        }
    }

    /// Next kind and spawn point in rotation. `None` without spawn points.
    pub fn next(&mut self, points: &[Vec2]) -> Option<(EnemyKind, Vec2)> {
        if points.is_empty() {
            return None;
        }
        let kind = EnemyKind::ALL[self.next_kind % EnemyKind::ALL.len()];
        let pos = points[self.next_point % points.len()];
        self.next_kind = (self.next_kind + 1) % EnemyKind::ALL.len();
        self.next_point = (self.next_point + 1) % points.len();
        Some((kind, pos))
    }
}

pub(crate) fn reset_spawner(mut commands: Commands, tunables: Res<Tunables>) {
    commands.insert_resource(EnemySpawner::new(&tunables.spawner));
}

pub(crate) fn spawn_enemies(
    time: Res<Time>,
    tunables: Res<Tunables>,
    mut spawner: ResMut<EnemySpawner>,
    mut registry: ResMut<EnemyRegistry>,
    mut commands: Commands,
    q_player: Query<&PlayerCore, With<Player>>,
) {
    let Ok(core) = q_player.single() else {
        return;
    };
    if !core.is_alive() {
        return;
    }

    spawner.timer.tick(time.delta());
    for _ in 0..spawner.timer.times_finished_this_tick() {
        if registry.live_count() >= tunables.spawner.max_live {
            break;
        }
        let Some((kind, pos)) = spawner.next(&tunables.spawner.spawn_points) else {
            break;
        };
        let e = spawn_enemy(&mut commands, &mut registry, &tunables.enemies, kind, pos);
        debug!("spawned {} enemy {e:?} at {pos}", kind.name());
    }
}
