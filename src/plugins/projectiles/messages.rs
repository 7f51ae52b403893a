//! Projectile notifications.
//!
//! These are fire-and-forget: VFX, audio and stage chaining read them, but
//! nothing in the core depends on anyone reading them.

use bevy::prelude::*;

#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub enum ProjectileLifecycle {
    /// Fired (fresh or reused from a pool).
    Activated(Entity),
    /// Destruction committed. Written before the entity is despawned or pooled,
    /// so it carries the last pose.
    Destroyed { projectile: Entity, position: Vec2, heading: f32 },
    /// Parked back in its pool.
    Deactivated(Entity),
}

/// An active projectile touched a ship it is allowed to hit.
///
/// Applying the damage is up to whoever reads this.
#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct ProjectileHit {
    pub projectile: Entity,
    pub ship: Entity,
    pub owner: Option<Entity>,
    pub damage: i64,
    pub crit_damage: i64,
    pub crit_chance: f32,
}
