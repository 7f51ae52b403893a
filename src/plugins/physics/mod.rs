//! Physics plugin: avian2d as an overlap reporter.
//!
//! Ships are kinematic and projectiles are gravity-free dynamic sensors, so
//! contacts never push anything. Physics only has to publish `CollisionStart` /
//! `CollisionEnd` each fixed tick for the projectile collision systems.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::tunables::Tunables;

pub fn plugin(app: &mut App) {
    let ppm = app
        .world()
        .get_resource::<Tunables>()
        .map_or_else(|| Tunables::default().pixels_per_meter, |t| t.pixels_per_meter);

    app.add_plugins(PhysicsPlugins::new(FixedPostUpdate).with_length_unit(ppm))
        .insert_resource(Gravity::ZERO);
}
