//! Feature plugins.

use bevy::prelude::*;

use crate::plugins::{patterns::PatternsPlugin, projectiles::ProjectilesPlugin};

pub mod arena;
pub mod core;
pub mod patterns;
pub mod physics;
pub mod projectiles;
pub mod ships;

// Render-only
pub mod camera;
pub mod visuals;

/// Register gameplay plugins that work in headless tests.
pub fn register_gameplay(app: &mut App) {
    core::plugin(app);
    physics::plugin(app);
    app.add_plugins((ProjectilesPlugin, PatternsPlugin));
    arena::plugin(app);
}

/// Register render-only plugins (requires DefaultPlugins / render infra).
pub fn register_render(app: &mut App) {
    camera::plugin(app);
    visuals::plugin(app);
}
