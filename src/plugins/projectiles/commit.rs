//! Destroy commit: the only place an `Expiring` projectile leaves the field.
//!
//! For every expiring projectile, in order:
//! 1. publish `Destroyed` (with its last pose, for chaining/VFX);
//! 2. pooled → release into the pool and publish `Deactivated`;
//!    unpooled (or its pool is gone) → despawn.
//!
//! Because only `Active → Expiring` is a valid request and this system moves
//! every `Expiring` projectile out of that state, no projectile can be released
//! or despawned twice.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::angles::heading_of;

use super::components::{PooledBy, Projectile, ProjectileState};
use super::messages::ProjectileLifecycle;
use super::pool::{release_projectile, ProjectilePool};

pub fn commit_destroyed_projectiles(
    mut commands: Commands,
    mut q_pools: Query<&mut ProjectilePool>,
    mut q: Query<(
        Entity,
        &mut ProjectileState,
        &PooledBy,
        &Transform,
        &mut Visibility,
        &mut LinearVelocity,
        &mut CollisionLayers,
    ), With<Projectile>>,
    mut lifecycle: MessageWriter<ProjectileLifecycle>,
) {
    for (e, mut state, pooled_by, tf, mut vis, mut vel, mut layers) in &mut q {
        if *state != ProjectileState::Expiring {
            continue;
        }

        lifecycle.write(ProjectileLifecycle::Destroyed {
            projectile: e,
            position: tf.translation.truncate(),
            heading: heading_of(tf.rotation),
        });

        let pool = pooled_by.0.and_then(|p| q_pools.get_mut(p).ok());
        match pool {
            Some(mut pool) => {
                release_projectile(&mut pool, e, &mut state, &mut vel, &mut layers, &mut vis);
                lifecycle.write(ProjectileLifecycle::Deactivated(e));
            }
            None => {
                if let Some(gone) = pooled_by.0 {
                    debug!("projectile {e} outlived its pool {gone}; despawning");
                }
                *state = ProjectileState::Inactive;
                commands.entity(e).despawn();
            }
        }
    }
}
