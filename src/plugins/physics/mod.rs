//! Physics plugin: avian2d in pixel units with downward gravity.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::tunables::Tunables;

pub fn plugin(app: &mut App) {
    let (ppm, gravity) = {
        let t = app.world().resource::<Tunables>();
        (t.pixels_per_meter, t.gravity)
    };
    app.add_plugins(PhysicsPlugins::default().with_length_unit(ppm));
    app.insert_resource(Gravity(Vec2::NEG_Y * gravity));
}
