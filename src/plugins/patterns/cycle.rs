//! Pattern-level pause/resume: alternate shooting off and on forever.
//!
//! Runs on real (unscaled) time, so pausing the fixed clock does not stall it.

use bevy::prelude::*;

use super::config::CycleConfig;
use super::fire::{Emitter, FireTimer};

#[derive(Component, Debug, Clone, PartialEq)]
pub struct PauseResumeCycle {
    config: CycleConfig,
    running: bool,
    shooting: bool,
    remaining: f32,
}

impl PauseResumeCycle {
    pub fn new(config: CycleConfig) -> Self {
        Self { config, running: false, shooting: false, remaining: config.pause_secs }
    }

    /// Begin with a pause of `pause_secs`.
    pub fn start(&mut self) {
        self.running = true;
        self.shooting = false;
        self.remaining = self.config.pause_secs;
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.running
    }

    #[inline]
    pub fn is_shooting(&self) -> bool {
        self.shooting
    }

    /// Advance by `dt` seconds and return whether the emitter should shoot now.
    pub fn tick(&mut self, dt: f32) -> bool {
        if !self.running {
            return self.shooting;
        }

        self.remaining -= dt;
        while self.remaining <= 0.0 {
            self.shooting = !self.shooting;
            self.remaining += if self.shooting {
                self.config.resume_secs
            } else {
                self.config.pause_secs
            };
        }
        self.shooting
    }
}

pub fn cycle_pause_resume(
    real: Res<Time<Real>>,
    mut q: Query<(Entity, &mut PauseResumeCycle, &mut FireTimer), With<Emitter>>,
) {
    let dt = real.delta_secs();
    for (e, mut cycle, mut timer) in &mut q {
        if !cycle.is_running() {
            continue;
        }
        let was = cycle.is_shooting();
        let shooting = cycle.tick(dt);
        if shooting != was {
            trace!("emitter {e} {}", if shooting { "resumed" } else { "paused" });
            timer.set_shooting(shooting);
        }
    }
}
