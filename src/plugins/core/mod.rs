//! Core plugin: shared resources and global settings.

use bevy::prelude::*;

use crate::common::tunables::Tunables;
use crate::plugins::patterns::PatternRng;

pub fn plugin(app: &mut App) {
    let tunables = app
        .world()
        .get_resource::<Tunables>()
        .cloned()
        .unwrap_or_default();

    app.insert_resource(Time::<Fixed>::from_hz(tunables.fixed_hz));
    app.insert_resource(PatternRng::new(tunables.rng_seed));
    app.insert_resource(ClearColor(Color::srgb(0.05, 0.05, 0.07)));
    app.insert_resource(tunables);
}
