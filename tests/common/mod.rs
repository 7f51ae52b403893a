//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides core ECS runtime.
//! - we then call `bullet_patterns::game::configure_headless` to install gameplay plugins.
//! - time advances by exactly one fixed step per `app.update()`.

#![allow(dead_code)]

use std::time::Duration;

use bevy::asset::AssetPlugin;
use bevy::prelude::*;
use bevy::scene::ScenePlugin;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

use bullet_patterns::common::tunables::Tunables;

pub fn app_headless() -> App {
    let mut app = App::new();

    // Add AssetPlugin + ScenePlugin so SceneSpawner exists.
    app.add_plugins((
        MinimalPlugins,
        StatesPlugin,
        AssetPlugin::default(),
        ScenePlugin,
    ));

    bullet_patterns::game::configure_headless(&mut app);

    let step = 1.0 / app.world().resource::<Tunables>().fixed_hz;
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(step)));

    // `App::run` normally does this; plugins such as avian2d register
    // resources in `Plugin::finish`.
    app.finish();
    app.cleanup();
    app
}

/// Run `frames` updates.
pub fn run_frames(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}
