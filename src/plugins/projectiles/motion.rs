//! Per-projectile motion state machine.
//!
//! Each fixed tick a projectile goes through, in order, stopping at the first
//! step that ends the tick:
//!
//! ```text
//!  1. expiry   remaining <= 0 ?  -> Expired (no movement)       else remaining -= dt
//!  2. pause    elapsed in [pause_at, resume_at) ? -> Held (no movement)
//!  3. heading  Homing | Weave | Straight
//!  4. speed    += acceleration·dt, then clamp
//!  5. position += forward(new heading) · speed·dt
//! ```
//!
//! Headings are stored normalized to `[0, 360)` after every tick.

use bevy::prelude::*;

use crate::common::angles::{
    bearing_degrees, heading_forward, heading_rotation, move_towards_degrees, normalize_degrees,
};

use super::components::{Projectile, ProjectileState};

/// How the heading evolves. Homing and weave are exclusive by construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Steering {
    /// Heading drifts by the motion's `turn` rate.
    Straight,
    /// Turn towards `target` at up to `turn_rate` deg/s. A missing target holds the heading.
    Homing { target: Option<Entity>, turn_rate: f32 },
    /// Sinusoidal weave around a drifting base heading.
    Weave { speed: f32, amplitude: f32, inverted: bool },
}

/// Time window (seconds since launch) during which the projectile holds still.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PauseWindow {
    pub pause_at: f32,
    pub resume_at: f32,
}

impl PauseWindow {
    #[inline]
    fn contains(self, t: f32) -> bool {
        t >= self.pause_at && t < self.resume_at
    }
}

/// Outcome of one motion tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MotionStep {
    /// Lifetime ran out; the projectile must be destroyed and must not move.
    Expired,
    /// Inside the pause window.
    Held,
    Moved { position: Vec2, heading: f32 },
}

#[derive(Component, Debug, Clone, PartialEq)]
pub struct Motion {
    pub speed: f32,
    pub heading: f32,
    /// Linear acceleration (units/s²).
    pub acceleration: f32,
    /// Angular acceleration (deg/s).
    pub turn: f32,
    pub steering: Steering,
    pub pause: Option<PauseWindow>,
    /// Seconds left before auto-expiry.
    pub expire_after: Option<f32>,
    pub min_speed: Option<f32>,
    pub max_speed: Option<f32>,

    elapsed: f32,
    weave_phase: f32,
    weave_base: f32,
}

impl Motion {
    pub fn new(speed: f32, heading: f32) -> Self {
        let heading = normalize_degrees(heading);
        Self {
            speed,
            heading,
            acceleration: 0.0,
            turn: 0.0,
            steering: Steering::Straight,
            pause: None,
            expire_after: None,
            min_speed: None,
            max_speed: None,
            elapsed: 0.0,
            weave_phase: 0.0,
            weave_base: heading,
        }
    }

    pub fn with_acceleration(mut self, acceleration: f32, turn: f32) -> Self {
        self.acceleration = acceleration;
        self.turn = turn;
        self
    }

    pub fn with_steering(mut self, steering: Steering) -> Self {
        self.steering = steering;
        self
    }

    pub fn with_pause(mut self, pause: Option<PauseWindow>) -> Self {
        self.pause = pause;
        self
    }

    pub fn with_expiry(mut self, expire_after: Option<f32>) -> Self {
        self.expire_after = expire_after;
        self
    }

    pub fn with_speed_limits(mut self, min_speed: Option<f32>, max_speed: Option<f32>) -> Self {
        self.min_speed = min_speed;
        self.max_speed = max_speed;
        self
    }

    /// Seconds since launch.
    #[inline]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Homing target, if this projectile homes.
    #[inline]
    pub fn homing_target(&self) -> Option<Entity> {
        match self.steering {
            Steering::Homing { target, .. } => target,
            _ => None,
        }
    }

    /// Advance one fixed tick from `position`.
    ///
    /// `target_pos` is the live position of the homing target, if it still exists.
    pub fn step(&mut self, dt: f32, position: Vec2, target_pos: Option<Vec2>) -> MotionStep {
        self.elapsed += dt;

        if let Some(remaining) = self.expire_after.as_mut() {
            if *remaining <= 0.0 {
                return MotionStep::Expired;
            }
            *remaining -= dt;
        }

        if self.pause.is_some_and(|w| w.contains(self.elapsed)) {
            return MotionStep::Held;
        }

        let heading = match self.steering {
            Steering::Homing { turn_rate, .. } => match target_pos {
                Some(to) if turn_rate > 0.0 => {
                    let bearing = bearing_degrees(position, to);
                    move_towards_degrees(self.heading, bearing, turn_rate * dt)
                }
                _ => self.heading,
            },
            Steering::Weave { speed, amplitude, inverted } => {
                self.weave_base = normalize_degrees(self.weave_base + self.turn * dt);
                let heading = if speed > 0.0 && amplitude > 0.0 {
                    let sign = if inverted { -1.0 } else { 1.0 };
                    self.weave_base
                        + amplitude / 2.0 * (self.weave_phase * speed / 100.0).sin() * sign
                } else {
                    self.heading
                };
                self.weave_phase += dt;
                heading
            }
            Steering::Straight => self.heading + self.turn * dt,
        };
        let heading = normalize_degrees(heading);

        self.speed += self.acceleration * dt;
        if let Some(max) = self.max_speed {
            self.speed = self.speed.min(max);
        }
        if let Some(min) = self.min_speed {
            self.speed = self.speed.max(min);
        }

        self.heading = heading;
        MotionStep::Moved {
            position: position + heading_forward(heading) * (self.speed * dt),
            heading,
        }
    }
}

/// Fixed-step driver: advance every active projectile and commit its pose.
///
/// Expiry only marks the projectile; the commit system does the rest.
pub fn advance_motion(
    time: Res<Time<Fixed>>,
    mut q: Query<(&mut Motion, &mut Transform, &mut ProjectileState), With<Projectile>>,
    // Disjointness proof: homing targets are never projectiles.
    q_targets: Query<&Transform, Without<Projectile>>,
) {
    let dt = time.delta_secs();

    for (mut motion, mut tf, mut state) in &mut q {
        if !state.is_active() {
            continue;
        }

        let target_pos = motion
            .homing_target()
            .and_then(|e| q_targets.get(e).ok())
            .map(|t| t.translation.truncate());

        match motion.step(dt, tf.translation.truncate(), target_pos) {
            MotionStep::Expired => {
                state.expire();
            }
            MotionStep::Held => {}
            MotionStep::Moved { position, heading } => {
                tf.translation.x = position.x;
                tf.translation.y = position.y;
                tf.rotation = heading_rotation(heading);
            }
        }
    }
}
