//! Per-emitter projectile pool.
//!
//! The pool lives on its emitter entity and only stores *inactive* projectiles.
//! Deployed projectiles point back at it through [`PooledBy`]; the pool itself
//! does not track them.
//!
//! ```text
//!  acquire:  free.pop()  ──or──  spawn(template)      (never fails, grows on demand)
//!  release:  free.push() + Inactive invariants        (see commit.rs)
//!  teardown: despawn free, clear PooledBy on deployed (then despawn emitter)
//! ```

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::angles::heading_rotation;
use crate::common::layers::Layer;

use super::components::{HitMask, PendingDespawn, PooledBy, ProjectileState};

/// What a freshly built projectile looks like before it is fired.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectileTemplate {
    pub radius: f32,
}

impl Default for ProjectileTemplate {
    fn default() -> Self {
        Self { radius: 4.0 }
    }
}

#[derive(Component, Debug, Default)]
pub struct ProjectilePool {
    free: Vec<Entity>,
    pub template: ProjectileTemplate,
}

impl ProjectilePool {
    pub fn new(template: ProjectileTemplate) -> Self {
        Self { free: Vec::new(), template }
    }

    #[inline]
    pub fn pop_free(&mut self) -> Option<Entity> {
        self.free.pop()
    }

    #[inline]
    pub fn push_free(&mut self, e: Entity) {
        debug_assert!(!self.contains(e), "projectile {e} released twice into the same pool");
        self.free.push(e);
    }

    #[inline]
    pub fn free_len(&self) -> usize {
        self.free.len()
    }

    #[inline]
    pub fn contains(&self, e: Entity) -> bool {
        self.free.contains(&e)
    }
}

/// Layers for a flying projectile, chosen by what it may hit.
pub fn active_projectile_layers(hits: HitMask) -> CollisionLayers {
    // Ships only accept their opponents' bullets, so a shot that may hit both
    // sides has to belong to both bullet layers.
    let mut membership = LayerMask::NONE;
    let mut filters = LayerMask::from(Layer::Boundary);
    if hits.player {
        membership.add(Layer::EnemyBullet);
        filters.add(Layer::Player);
    }
    if hits.enemy {
        membership.add(Layer::PlayerBullet);
        filters.add(Layer::Enemy);
    }
    // Still needs a layer so the boundary sees it.
    if membership == LayerMask::NONE {
        membership = LayerMask::from(Layer::EnemyBullet);
    }

    CollisionLayers::new(membership, filters)
}

/// “Disabled” without structural changes: empty filters means we collide with nothing.
#[inline]
pub fn inactive_projectile_layers() -> CollisionLayers {
    CollisionLayers::new(Layer::EnemyBullet, [] as [Layer; 0])
}

/// Build a new, inactive projectile at the given pose.
///
/// Projectiles are dynamic sensors with no gravity: motion writes their
/// transform directly, velocity stays zero, and physics only reports overlaps.
pub fn spawn_inactive(
    commands: &mut Commands,
    template: ProjectileTemplate,
    pos: Vec2,
    heading: f32,
) -> Entity {
    commands
        .spawn((
            Name::new("Projectile"),
            ProjectileState::Inactive,
            PooledBy(None),
            Transform::from_translation(pos.extend(2.0)).with_rotation(heading_rotation(heading)),
            Visibility::Hidden,
            RigidBody::Dynamic,
            GravityScale(0.0),
            Collider::circle(template.radius),
            Sensor,
            inactive_projectile_layers(),
            LinearVelocity(Vec2::ZERO),
            // Always on; inactive projectiles have empty filters.
            CollisionEventsEnabled,
        ))
        .id()
}

/// Take a projectile out of the pool, or build a new one from the template at
/// the pool's reference pose.
///
/// The caller is expected to fire it in the same command batch.
pub fn acquire_projectile(
    commands: &mut Commands,
    pool: &mut ProjectilePool,
    pos: Vec2,
    heading: f32,
) -> Entity {
    match pool.pop_free() {
        Some(e) => e,
        None => spawn_inactive(commands, pool.template, pos, heading),
    }
}

/// Park a projectile back in its pool and enforce the inactive invariants:
/// hidden, zero velocity, collides with nothing, no motion.
pub fn release_projectile(
    pool: &mut ProjectilePool,
    e: Entity,
    state: &mut ProjectileState,
    vel: &mut LinearVelocity,
    layers: &mut CollisionLayers,
    vis: &mut Visibility,
) {
    *state = ProjectileState::Inactive;
    vel.0 = Vec2::ZERO;
    *layers = inactive_projectile_layers();
    *vis = Visibility::Hidden;

    pool.push_free(e);
}

/// Tear down the pools of emitters marked for removal, then remove the emitters.
///
/// - stored (inactive) projectiles are despawned;
/// - deployed projectiles lose their pool reference, so their eventual
///   destruction despawns them instead of returning into a pool that is gone.
pub fn teardown_retired_pools(
    mut commands: Commands,
    mut q_emitters: Query<(Entity, &mut ProjectilePool), With<PendingDespawn>>,
    mut q_projectiles: Query<&mut PooledBy>,
) {
    for (emitter, mut pool) in &mut q_emitters {
        let stored = pool.free.len();
        for e in pool.free.drain(..) {
            commands.entity(e).despawn();
        }

        let mut detached = 0usize;
        for mut pooled_by in &mut q_projectiles {
            if pooled_by.0 == Some(emitter) {
                pooled_by.0 = None;
                detached += 1;
            }
        }

        debug!(
            "emitter {emitter} retired: despawned {stored} pooled, detached {detached} deployed"
        );
        commands.entity(emitter).despawn();
    }
}
