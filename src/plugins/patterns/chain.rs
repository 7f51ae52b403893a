//! Multi-stage patterns: a dying projectile fires the next stage from where it died.
//!
//! Runs after collisions and before the destroy commit, so it sees every
//! projectile that expired this tick exactly once.

use bevy::prelude::*;

use crate::common::angles::heading_of;
use crate::common::tunables::Tunables;
use crate::plugins::projectiles::components::{Projectile, ProjectileState, SpawnOnDestroy};
use crate::plugins::projectiles::messages::ProjectileLifecycle;
use crate::plugins::projectiles::pool::{spawn_inactive, ProjectileTemplate};
use crate::plugins::projectiles::targeting::TargetSelector;
use crate::plugins::ships::ShipStats;

use super::PatternRng;
use super::fire::{launch, owner_source};
use super::layouts::{lay_out, EmitterPose};

/// Chained projectiles have no pool; they despawn when they die.
pub fn fire_next_stages(
    mut commands: Commands,
    tunables: Res<Tunables>,
    mut rng: ResMut<PatternRng>,
    q_dying: Query<(Entity, &ProjectileState, &Projectile, &Transform, &SpawnOnDestroy)>,
    q_owners: Query<&ShipStats>,
    targets: TargetSelector,
    mut lifecycle: MessageWriter<ProjectileLifecycle>,
) {
    let template = ProjectileTemplate { radius: tunables.projectile_radius };

    for (parent, state, projectile, tf, stage) in &q_dying {
        if *state != ProjectileState::Expiring {
            continue;
        }

        let next = &stage.0;
        let pose = EmitterPose {
            position: tf.translation.truncate(),
            heading: heading_of(tf.rotation),
        };
        let speed = next.pattern.bullet_speed;
        let shots = lay_out(&next.layout, pose, speed, &mut rng.0, |tag, mode, from, rng| {
            targets.select(tag, mode, from, rng)
        });
        let source = owner_source(projectile.owner, &q_owners);

        for shot in &shots {
            let e = spawn_inactive(&mut commands, template, shot.position, shot.heading);
            launch(&mut commands, e, None, &next.pattern, shot, source, next.next.clone());
            lifecycle.write(ProjectileLifecycle::Activated(e));
        }

        trace!("projectile {parent} split into {} for its next stage", shots.len());
    }
}
