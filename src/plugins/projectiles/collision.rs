//! Collision resolution for projectiles.
//!
//! Physics only reports overlaps; the decisions live here:
//! - projectile starts touching a ship it may hit → `ProjectileHit`, and expire
//!   it if it is destroyed on ship collision;
//! - projectile stops touching the arena boundary → expire it.

use avian2d::prelude::*;
use bevy::platform::collections::HashSet;
use bevy::prelude::*;

use crate::plugins::ships::Ship;

use super::components::{Projectile, ProjectileState};
use super::messages::ProjectileHit;
use super::targeting::TargetTag;

/// Trigger volume that expires projectiles leaving it.
#[derive(Component, Debug, Clone, Copy)]
pub struct ArenaBoundary;

/// Split a collision pair into (projectile, other), if exactly one side is a projectile.
#[inline]
fn projectile_side(
    a: Entity,
    b: Entity,
    q_is_projectile: &Query<(), With<Projectile>>,
) -> Option<(Entity, Entity)> {
    match (q_is_projectile.contains(a), q_is_projectile.contains(b)) {
        (true, false) => Some((a, b)),
        (false, true) => Some((b, a)),
        _ => None,
    }
}

#[inline]
fn may_hit(projectile: &Projectile, tag: TargetTag) -> bool {
    match tag {
        TargetTag::Player => projectile.hits.player,
        TargetTag::Enemy => projectile.hits.enemy,
    }
}

/// Apply ship-collision rules for a projectile.
///
/// Returns whether the projectile was expired by the collision.
#[inline]
pub fn handle_ship_collision(projectile: &Projectile, state: &mut ProjectileState) -> bool {
    projectile.destroy_on_ship_collision && state.expire()
}

pub fn process_ship_collisions(
    mut started: MessageReader<CollisionStart>,
    q_is_projectile: Query<(), With<Projectile>>,
    mut q_projectiles: Query<(&Projectile, &mut ProjectileState)>,
    q_ships: Query<&TargetTag, With<Ship>>,
    mut hits: MessageWriter<ProjectileHit>,
    // Per-tick dedupe
    mut seen: Local<HashSet<(Entity, Entity)>>,
) {
    seen.clear();

    for ev in started.read() {
        let a = ev.body1.unwrap_or(ev.collider1);
        let b = ev.body2.unwrap_or(ev.collider2);

        let Some((projectile_e, other)) = projectile_side(a, b, &q_is_projectile) else {
            continue;
        };
        let Ok(tag) = q_ships.get(other) else {
            continue;
        };
        if !seen.insert((projectile_e, other)) {
            continue;
        }

        let Ok((projectile, mut state)) = q_projectiles.get_mut(projectile_e) else {
            continue;
        };

        // Inactive projectiles collide with nothing, but a second ship in the
        // same tick can still see an already-expiring one.
        if !state.is_active() || projectile.owner == Some(other) || !may_hit(projectile, *tag) {
            continue;
        }

        hits.write(ProjectileHit {
            projectile: projectile_e,
            ship: other,
            owner: projectile.owner,
            damage: projectile.damage(),
            crit_damage: projectile.crit_damage(),
            crit_chance: projectile.crit_chance(),
        });

        handle_ship_collision(projectile, &mut state);
    }
}

pub fn process_boundary_exits(
    mut ended: MessageReader<CollisionEnd>,
    q_is_projectile: Query<(), With<Projectile>>,
    q_boundaries: Query<(), With<ArenaBoundary>>,
    mut q_states: Query<&mut ProjectileState>,
) {
    for ev in ended.read() {
        let Some((projectile_e, other)) =
            projectile_side(ev.collider1, ev.collider2, &q_is_projectile)
        else {
            continue;
        };
        if !q_boundaries.contains(other) {
            continue;
        }
        if let Ok(mut state) = q_states.get_mut(projectile_e) {
            state.expire();
        }
    }
}
