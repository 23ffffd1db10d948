//! Range limit: bullets that flew past their max range go back to the pool.

use bevy::prelude::*;

use super::components::{Bullet, BulletState, PooledBullet};

pub fn retire_spent_bullets(
    mut q: Query<(&Bullet, &Transform, &mut BulletState), With<PooledBullet>>,
) {
    for (bullet, tf, mut state) in &mut q {
        if *state == BulletState::Active && bullet.out_of_range(tf.translation.truncate()) {
            *state = BulletState::PendingReturn;
        }
    }
}
