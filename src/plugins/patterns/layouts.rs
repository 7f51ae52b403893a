//! Layout algorithms: one fire event in, initial pose/speed per projectile out.
//!
//! These are plain functions so they can be checked without a world.

use bevy::prelude::*;
use rand::Rng;

use crate::common::angles::{heading_right, shifted_angle};
use crate::plugins::projectiles::targeting::{SelectMode, Target, TargetTag};

use super::config::PatternLayout;

/// Where the emitter is when it fires.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmitterPose {
    pub position: Vec2,
    pub heading: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HomingShot {
    pub target: Option<Entity>,
    pub turn_rate: f32,
}

/// Initial state of one projectile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shot {
    pub position: Vec2,
    pub heading: f32,
    pub speed: f32,
    pub homing: Option<HomingShot>,
}

impl Shot {
    fn straight(position: Vec2, heading: f32, speed: f32) -> Self {
        Self { position, heading, speed, homing: None }
    }
}

/// Local fan angles around `center`: slot `i` of `n`.
pub fn nway_angles(way_count: u32, center: f32, between: f32) -> impl Iterator<Item = f32> {
    let base = if way_count % 2 == 0 { center - between / 2.0 } else { center };
    (0..way_count as usize).map(move |i| shifted_angle(i, base, between))
}

pub fn nway(pose: EmitterPose, speed: f32, way_count: u32, center: f32, between: f32) -> Vec<Shot> {
    nway_angles(way_count, center, between)
        .map(|local| Shot::straight(pose.position, pose.heading + local, speed))
        .collect()
}

/// Lateral offset of slot `i` so the row is centred on the emitter.
#[inline]
pub fn parallel_offset(index: u32, way_count: u32, spacing: f32) -> f32 {
    index as f32 * spacing - way_count.saturating_sub(1) as f32 * spacing / 2.0
}

pub fn parallel(pose: EmitterPose, speed: f32, way_count: u32, spacing: f32) -> Vec<Shot> {
    let right = heading_right(pose.heading);
    (0..way_count)
        .map(|i| {
            let pos = pose.position + right * parallel_offset(i, way_count, spacing);
            Shot::straight(pos, pose.heading, speed)
        })
        .collect()
}

/// Heading drawn inside the quarter of `[min_angle, max_angle]` that `index`
/// falls in, so that successive shots cover the range more evenly.
///
/// With fewer than 4 bullets each quarter holds one index.
pub fn evenly_distributed_heading<R: Rng + ?Sized>(
    rng: &mut R,
    index: u32,
    bullet_count: u32,
    min_angle: f32,
    max_angle: f32,
) -> f32 {
    let per_quarter = if bullet_count >= 4 { bullet_count / 4 } else { 1 };
    // Leftover indices (count not divisible by 4) land in the last quarter.
    let quarter = (index / per_quarter).min(3) as f32;
    let quarter_size = (max_angle - min_angle).abs() * 0.25;

    let lo = min_angle + quarter_size * quarter;
    let hi = min_angle + quarter_size * (quarter + 1.0);
    rng.gen_range(lo..=hi)
}

#[allow(clippy::too_many_arguments)]
pub fn random<R: Rng + ?Sized>(
    pose: EmitterPose,
    rng: &mut R,
    center: f32,
    range_size: f32,
    min_speed: f32,
    max_speed: f32,
    evenly_distribute: bool,
    bullet_count: u32,
) -> Shot {
    let index = rng.gen_range(0..bullet_count.max(1));
    let speed = rng.gen_range(min_speed..=max_speed);

    let min_angle = center - range_size * 0.5;
    let max_angle = center + range_size * 0.5;
    let heading = if evenly_distribute {
        evenly_distributed_heading(rng, index, bullet_count, min_angle, max_angle)
    } else {
        rng.gen_range(min_angle..=max_angle)
    };

    Shot::straight(pose.position, heading, speed)
}

/// Run one layout.
///
/// `select` resolves homing targets; it is only called by the homing layout.
pub fn lay_out<R: Rng + ?Sized>(
    layout: &PatternLayout,
    pose: EmitterPose,
    speed: f32,
    rng: &mut R,
    select: impl FnOnce(TargetTag, SelectMode, Vec2, &mut R) -> Option<Target>,
) -> Vec<Shot> {
    match *layout {
        PatternLayout::Single => vec![Shot::straight(pose.position, pose.heading, speed)],
        PatternLayout::Nway { way_count, center_angle, between_angle } => {
            nway(pose, speed, way_count, center_angle, between_angle)
        }
        PatternLayout::Parallel { way_count, between_distance } => {
            parallel(pose, speed, way_count, between_distance)
        }
        PatternLayout::Random {
            center_angle,
            range_size,
            min_speed,
            max_speed,
            evenly_distribute,
            bullet_count,
        } => vec![random(
            pose,
            rng,
            center_angle,
            range_size,
            min_speed,
            max_speed,
            evenly_distribute,
            bullet_count,
        )],
        PatternLayout::Homing { target, mode, turn_rate } => {
            let found = select(target, mode, pose.position, rng);
            if found.is_none() {
                debug!("no {target:?} target for homing shot; it will fly straight");
            }
            vec![Shot {
                homing: Some(HomingShot { target: found.map(|t| t.entity), turn_rate }),
                ..Shot::straight(pose.position, pose.heading, speed)
            }]
        }
    }
}
