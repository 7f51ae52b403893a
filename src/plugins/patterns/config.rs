//! Emitter configuration.
//!
//! Everything here is static data supplied before an emitter spawns. Bad
//! combinations are rejected by [`EmitterConfig::validate`] when the emitter is built, never at
//! fire time, so the fire path can trust its inputs.

use std::sync::Arc;

use bevy::prelude::*;
use thiserror::Error;

use crate::plugins::projectiles::components::Payload;
use crate::plugins::projectiles::motion::PauseWindow;
use crate::plugins::projectiles::pool::ProjectileTemplate;
use crate::plugins::projectiles::targeting::{SelectMode, TargetTag};

use super::adjust::Mount;

pub const MAX_WAYS: u32 = 25;
pub const FIRE_RATE_RANGE: (f32, f32) = (0.01, 10.0);
pub const CYCLE_RANGE: (f32, f32) = (0.01, 1000.0);
pub const MAX_DAMAGE_MULTIPLIER: f32 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaveConfig {
    pub speed: f32,
    pub amplitude: f32,
    pub inverted: bool,
}

/// Alternating pattern-level pause (shooting off) and resume (shooting on).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CycleConfig {
    pub pause_secs: f32,
    pub resume_secs: f32,
}

/// Settings shared by every layout.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct ShotPattern {
    /// Base seconds between shots, before the owner's reload stat.
    pub fire_rate: f32,
    pub bullet_speed: f32,
    pub acceleration: f32,
    /// Degrees per second added to the heading.
    pub accel_turn: f32,
    pub min_speed: Option<f32>,
    pub max_speed: Option<f32>,
    pub projectile_pause: Option<PauseWindow>,
    pub expire_after: Option<f32>,
    pub weave: Option<WeaveConfig>,
    pub payload: Payload,
    pub cycle: Option<CycleConfig>,
    pub start_shooting: bool,
}

impl Default for ShotPattern {
    fn default() -> Self {
        Self {
            fire_rate: 0.2,
            bullet_speed: 2.0,
            acceleration: 0.1,
            accel_turn: 0.0,
            min_speed: None,
            max_speed: None,
            projectile_pause: None,
            expire_after: None,
            weave: None,
            payload: Payload::default(),
            cycle: None,
            start_shooting: true,
        }
    }
}

/// How one fire event lays out its projectiles.
#[derive(Component, Debug, Clone, PartialEq)]
pub enum PatternLayout {
    /// One projectile along the emitter heading.
    Single,
    /// Fan of `way_count` headings `between_angle` apart, centred on
    /// `center_angle` relative to the emitter.
    Nway { way_count: u32, center_angle: f32, between_angle: f32 },
    /// `way_count` projectiles side by side, `between_distance` apart.
    Parallel { way_count: u32, between_distance: f32 },
    /// One projectile with random speed and heading.
    Random {
        center_angle: f32,
        range_size: f32,
        min_speed: f32,
        max_speed: f32,
        evenly_distribute: bool,
        bullet_count: u32,
    },
    /// One projectile homing on a selected target.
    Homing { target: TargetTag, mode: SelectMode, turn_rate: f32 },
}

/// Rotates the emitter every tick before it fires.
#[derive(Component, Debug, Clone, PartialEq)]
pub enum OrientationAdjuster {
    /// `heading = base + amplitude · sin(t · frequency)`; `base` is the emitter
    /// heading captured on the first tick.
    Spiral { amplitude: f32, frequency: f32, base: Option<f32> },
    /// Smoothed turn towards `target`; holds when the target is missing.
    TrackTarget { target: Option<Entity>, rotation_speed: f32 },
}

impl OrientationAdjuster {
    pub fn spiral(amplitude: f32, frequency: f32) -> Self {
        Self::Spiral { amplitude, frequency, base: None }
    }
}

/// Layout fired from the spot where a projectile dies.
#[derive(Debug, Clone, PartialEq)]
pub struct StageSpec {
    pub pattern: ShotPattern,
    pub layout: PatternLayout,
    pub next: Option<Arc<StageSpec>>,
}

#[derive(Component, Debug, Clone)]
pub struct NextStage(pub Arc<StageSpec>);

/// Everything needed to spawn an emitter.
#[derive(Debug, Clone, Default)]
pub struct EmitterConfig {
    pub pattern: ShotPattern,
    pub layout: PatternLayout,
    pub adjuster: Option<OrientationAdjuster>,
    pub next_stage: Option<StageSpec>,
    pub owner: Option<Entity>,
    pub mount: Option<Mount>,
    pub template: ProjectileTemplate,
}

impl Default for PatternLayout {
    fn default() -> Self {
        Self::Single
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PatternConfigError {
    #[error("{field} must be finite")]
    NotFinite { field: &'static str },
    #[error(
        "fire rate {0} is outside {min}..={max}",
        min = FIRE_RATE_RANGE.0,
        max = FIRE_RATE_RANGE.1
    )]
    FireRate(f32),
    #[error("way count {0} is outside 1..={max}", max = MAX_WAYS)]
    WayCount(u32),
    #[error("{field} {value} is outside 0..=360")]
    AngleRange { field: &'static str, value: f32 },
    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },
    #[error("random speed range is inverted: min {min} > max {max}")]
    InvertedRandomSpeed { min: f32, max: f32 },
    #[error("bullet count must be at least 1")]
    ZeroBulletCount,
    #[error("speed clamp is inverted: min {min} > max {max}")]
    InvertedSpeedClamp { min: f32, max: f32 },
    #[error("projectile resumes at {resume_at}s, before it pauses at {pause_at}s")]
    InvertedPauseWindow { pause_at: f32, resume_at: f32 },
    #[error("damage multiplier {0} is outside (0, {max}]", max = MAX_DAMAGE_MULTIPLIER)]
    DamageMultiplier(f32),
    #[error(
        "pattern {field} {value}s is outside {min}..={max}",
        min = CYCLE_RANGE.0,
        max = CYCLE_RANGE.1
    )]
    CycleDuration { field: &'static str, value: f32 },
}

fn finite(field: &'static str, v: f32) -> Result<f32, PatternConfigError> {
    if v.is_finite() { Ok(v) } else { Err(PatternConfigError::NotFinite { field }) }
}

fn non_negative(field: &'static str, v: f32) -> Result<f32, PatternConfigError> {
    if finite(field, v)? < 0.0 {
        return Err(PatternConfigError::Negative { field, value: v });
    }
    Ok(v)
}

fn angle_span(field: &'static str, v: f32) -> Result<(), PatternConfigError> {
    if !(0.0..=360.0).contains(&finite(field, v)?) {
        return Err(PatternConfigError::AngleRange { field, value: v });
    }
    Ok(())
}

fn ways(n: u32) -> Result<(), PatternConfigError> {
    if !(1..=MAX_WAYS).contains(&n) {
        return Err(PatternConfigError::WayCount(n));
    }
    Ok(())
}

impl ShotPattern {
    pub fn validate(&self) -> Result<(), PatternConfigError> {
        let fire_rate = finite("fire rate", self.fire_rate)?;
        if !(FIRE_RATE_RANGE.0..=FIRE_RATE_RANGE.1).contains(&fire_rate) {
            return Err(PatternConfigError::FireRate(fire_rate));
        }
        finite("bullet speed", self.bullet_speed)?;
        finite("acceleration", self.acceleration)?;
        finite("accel turn", self.accel_turn)?;

        if let Some(min) = self.min_speed {
            finite("min speed", min)?;
        }
        if let Some(max) = self.max_speed {
            finite("max speed", max)?;
        }
        if let (Some(min), Some(max)) = (self.min_speed, self.max_speed) {
            if min > max {
                return Err(PatternConfigError::InvertedSpeedClamp { min, max });
            }
        }

        if let Some(w) = self.projectile_pause {
            non_negative("pause time", w.pause_at)?;
            non_negative("resume time", w.resume_at)?;
            if w.resume_at < w.pause_at {
                return Err(PatternConfigError::InvertedPauseWindow {
                    pause_at: w.pause_at,
                    resume_at: w.resume_at,
                });
            }
        }

        if let Some(t) = self.expire_after {
            non_negative("expire time", t)?;
        }

        if let Some(w) = self.weave {
            non_negative("weave speed", w.speed)?;
            non_negative("weave amplitude", w.amplitude)?;
        }

        let m = finite("damage multiplier", self.payload.damage_multiplier)?;
        if m <= 0.0 || m > MAX_DAMAGE_MULTIPLIER {
            return Err(PatternConfigError::DamageMultiplier(m));
        }

        if let Some(c) = self.cycle {
            for (field, value) in [("pause", c.pause_secs), ("resume", c.resume_secs)] {
                if !(CYCLE_RANGE.0..=CYCLE_RANGE.1).contains(&finite(field, value)?) {
                    return Err(PatternConfigError::CycleDuration { field, value });
                }
            }
        }

        Ok(())
    }
}

impl PatternLayout {
    pub fn validate(&self) -> Result<(), PatternConfigError> {
        match *self {
            Self::Single => Ok(()),
            Self::Nway { way_count, center_angle, between_angle } => {
                ways(way_count)?;
                finite("center angle", center_angle)?;
                angle_span("between angle", between_angle)
            }
            Self::Parallel { way_count, between_distance } => {
                ways(way_count)?;
                non_negative("between distance", between_distance).map(|_| ())
            }
            Self::Random { center_angle, range_size, min_speed, max_speed, bullet_count, .. } => {
                finite("random center angle", center_angle)?;
                angle_span("random range", range_size)?;
                finite("random min speed", min_speed)?;
                finite("random max speed", max_speed)?;
                if min_speed > max_speed {
                    return Err(PatternConfigError::InvertedRandomSpeed {
                        min: min_speed,
                        max: max_speed,
                    });
                }
                if bullet_count == 0 {
                    return Err(PatternConfigError::ZeroBulletCount);
                }
                Ok(())
            }
            Self::Homing { turn_rate, .. } => {
                non_negative("homing turn rate", turn_rate).map(|_| ())
            }
        }
    }
}

impl OrientationAdjuster {
    pub fn validate(&self) -> Result<(), PatternConfigError> {
        match *self {
            Self::Spiral { amplitude, frequency, .. } => {
                finite("spiral amplitude", amplitude)?;
                finite("spiral frequency", frequency)?;
            }
            Self::TrackTarget { rotation_speed, .. } => {
                non_negative("rotation speed", rotation_speed)?;
            }
        }
        Ok(())
    }
}

impl StageSpec {
    /// Validate this stage and every stage chained after it.
    pub fn validate(&self) -> Result<(), PatternConfigError> {
        let mut stage = Some(self);
        while let Some(s) = stage {
            s.pattern.validate()?;
            s.layout.validate()?;
            stage = s.next.as_deref();
        }
        Ok(())
    }
}

impl EmitterConfig {
    pub fn validate(&self) -> Result<(), PatternConfigError> {
        self.pattern.validate()?;
        self.layout.validate()?;
        if let Some(adjuster) = &self.adjuster {
            adjuster.validate()?;
        }
        if let Some(stage) = &self.next_stage {
            stage.validate()?;
        }
        Ok(())
    }
}
