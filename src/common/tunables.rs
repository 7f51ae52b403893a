//! Tunable simulation constants.

use bevy::prelude::*;

#[derive(Resource, Debug, Clone)]
pub struct Tunables {
    pub pixels_per_meter: f32,
    /// Player ship speed (pixels per second).
    pub pilot_speed: f32,
    /// Fixed simulation rate (ticks per second).
    pub fixed_hz: f64,
    pub rng_seed: u64,
    /// Delay before an emitter reads its owner's stats and arms.
    pub emitter_startup_delay: f32,
    /// Floor for the scaled fire interval.
    pub min_fire_interval: f32,
    pub projectile_radius: f32,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            pixels_per_meter: 20.0,
            pilot_speed: 260.0,
            fixed_hz: 60.0,
            rng_seed: 0x5EED_B011,
            emitter_startup_delay: 0.05,
            min_fire_interval: 0.01,
            projectile_radius: 4.0,
        }
    }
}
