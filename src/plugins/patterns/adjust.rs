//! Emitter pose updates that run before firing: following a ship, and
//! rotating through an [`OrientationAdjuster`].

use bevy::prelude::*;

use crate::common::angles::{bearing_degrees, heading_of, heading_rotation};

use super::config::OrientationAdjuster;
use super::fire::Emitter;

/// Keeps an emitter at `offset` (in the ship's frame) from its ship.
///
/// With `align_heading` the emitter also copies the ship's heading; leave it off
/// for emitters steered by an [`OrientationAdjuster`].
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Mount {
    pub ship: Entity,
    pub offset: Vec2,
    pub align_heading: bool,
}

impl Mount {
    pub fn new(ship: Entity, offset: Vec2) -> Self {
        Self { ship, offset, align_heading: false }
    }

    pub fn aligned(ship: Entity, offset: Vec2) -> Self {
        Self { ship, offset, align_heading: true }
    }
}

pub fn follow_mounts(
    mut q: Query<(&Mount, &mut Transform), With<Emitter>>,
    q_ships: Query<&Transform, Without<Emitter>>,
) {
    for (mount, mut tf) in &mut q {
        // Ship gone: stay where we are.
        let Ok(ship) = q_ships.get(mount.ship) else {
            continue;
        };
        let offset = (ship.rotation * mount.offset.extend(0.0)).truncate();
        let pos = ship.translation.truncate() + offset;
        tf.translation.x = pos.x;
        tf.translation.y = pos.y;
        if mount.align_heading {
            tf.rotation = ship.rotation;
        }
    }
}

pub fn adjust_orientation(
    time: Res<Time<Fixed>>,
    mut q: Query<(Entity, &mut OrientationAdjuster, &mut Transform), With<Emitter>>,
    q_targets: Query<&Transform, Without<Emitter>>,
) {
    let t = time.elapsed_secs();
    let dt = time.delta_secs();

    for (e, mut adjuster, mut tf) in &mut q {
        match &mut *adjuster {
            OrientationAdjuster::Spiral { amplitude, frequency, base } => {
                let base = *base.get_or_insert_with(|| heading_of(tf.rotation));
                tf.rotation = heading_rotation(base + *amplitude * (t * *frequency).sin());
            }
            OrientationAdjuster::TrackTarget { target, rotation_speed } => {
                let Some(target) = *target else {
                    continue;
                };
                let Ok(target_tf) = q_targets.get(target) else {
                    trace!("emitter {e} lost its tracked target {target}");
                    continue;
                };

                let bearing =
                    bearing_degrees(tf.translation.truncate(), target_tf.translation.truncate());
                let factor = (dt * *rotation_speed).min(1.0);
                tf.rotation = tf.rotation.slerp(heading_rotation(bearing), factor);
            }
        }
    }
}
