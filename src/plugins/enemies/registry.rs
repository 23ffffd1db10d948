//! Active-enemy registry: an arena of slots with tombstones.
//!
//! Killing an enemy only tombstones its slot. Slots are never shifted, so a scan
//! that kills entry `i` still visits `i + 1` next. Tombstones are compacted once
//! per frame (`drain_dead`), after every system that iterates the registry.
//!
//! Removing from a list while walking it by index is the classic way to skip
//! the neighbour of whatever was removed: a dash through two enemies standing
//! side by side would kill one and miss the other. Tombstones make the kill a
//! state change instead, and the actual removal happens when nobody is
//! iterating.
//!
//! Freed slots go on a free list and are handed out again by `register`, so the
//! slot vector stays as large as the peak live count rather than growing with
//! every enemy ever spawned.
//!
//! Slots are not stored on the enemy entity. Every caller already walks
//! `live()`, which pairs each slot with its entity.

use bevy::prelude::*;

/// Stable index of an enemy inside the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EnemySlot(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Vacant,
    Live(Entity),
    Dead(Entity),
}

#[derive(Resource, Debug, Default)]
pub struct EnemyRegistry {
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl EnemyRegistry {
    pub fn register(&mut self, entity: Entity) -> EnemySlot {
        if let Some(i) = self.free.pop() {
            self.slots[i as usize] = Slot::Live(entity);
            return EnemySlot(i);
        }
        self.slots.push(Slot::Live(entity));
        EnemySlot((self.slots.len() - 1) as u32)
    }

    #[inline]
    pub fn is_live(&self, slot: EnemySlot) -> bool {
        matches!(self.slots.get(slot.0 as usize), Some(Slot::Live(_)))
    }

    /// Tombstone a live slot. Returns `true` only for the call that killed it.
    pub fn mark_dead(&mut self, slot: EnemySlot) -> bool {
        let Some(s) = self.slots.get_mut(slot.0 as usize) else {
            return false;
        };
        let Slot::Live(e) = *s else {
            return false;
        };
        *s = Slot::Dead(e);
        true
    }

    /// Tombstone every live slot. Returns how many were killed.
    pub fn mark_all_dead(&mut self) -> usize {
        let mut killed = 0;
        for s in &mut self.slots {
            if let Slot::Live(e) = *s {
                *s = Slot::Dead(e);
                killed += 1;
            }
        }
        killed
    }

    /// Snapshot of live slots in index order.
    pub fn live(&self) -> Vec<(EnemySlot, Entity)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| match s {
                Slot::Live(e) => Some((EnemySlot(i as u32), *e)),
                _ => None,
            })
            .collect()
    }

    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|s| matches!(s, Slot::Live(_))).count()
    }

    /// Free tombstoned slots and hand back their entities for despawning.
    pub fn drain_dead(&mut self) -> Vec<Entity> {
        let mut dead = Vec::new();
        for (i, s) in self.slots.iter_mut().enumerate() {
            if let Slot::Dead(e) = *s {
                *s = Slot::Vacant;
                self.free.push(i as u32);
                dead.push(e);
            }
        }
        dead
    }
}
