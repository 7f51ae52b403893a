use std::sync::Arc;

use bevy::prelude::*;

use crate::plugins::patterns::config::StageSpec;
use crate::plugins::ships::{DamageSource, Stat};

/// Projectile lifecycle.
///
/// - `Inactive`: parked in a pool (hidden, no collisions, no motion).
/// - `Active`: flying; the only state motion and collisions act on.
/// - `Expiring`: destruction requested, committed once in `FixedPostUpdate`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProjectileState {
    #[default]
    Inactive,
    Active,
    Expiring,
}

impl ProjectileState {
    /// Request destruction. Only an `Active` projectile can expire, so a second
    /// request (or one against a pooled projectile) is a no-op.
    #[inline]
    pub fn expire(&mut self) -> bool {
        if *self == Self::Active {
            *self = Self::Expiring;
            true
        } else {
            false
        }
    }

    #[inline]
    pub fn is_active(self) -> bool {
        self == Self::Active
    }
}

/// Which ship categories a projectile may damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HitMask {
    pub player: bool,
    pub enemy: bool,
}

impl HitMask {
    pub const PLAYER: Self = Self { player: true, enemy: false };
    pub const ENEMY: Self = Self { player: false, enemy: true };
}

/// Damage-relevant settings a pattern stamps onto each projectile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Payload {
    pub damage_multiplier: f32,
    pub destroy_on_ship_collision: bool,
    pub hits: HitMask,
}

impl Default for Payload {
    fn default() -> Self {
        Self { damage_multiplier: 1.0, destroy_on_ship_collision: true, hits: HitMask::ENEMY }
    }
}

/// Damage payload and ownership of one projectile.
///
/// Damage numbers are private: they are computed once by [`Projectile::initialize`]
/// and stay fixed until the projectile is re-fired.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Projectile {
    pub owner: Option<Entity>,
    pub destroy_on_ship_collision: bool,
    pub hits: HitMask,
    damage: i64,
    crit_damage: i64,
    crit_chance: f32,
}

impl Projectile {
    /// Compute the payload from the firing entity's stats.
    ///
    /// A missing owner is not fatal: the projectile still flies, it just deals
    /// no damage.
    pub fn initialize(owner: Option<(Entity, &dyn DamageSource)>, payload: &Payload) -> Self {
        let mut projectile = Self {
            owner: owner.map(|(e, _)| e),
            destroy_on_ship_collision: payload.destroy_on_ship_collision,
            hits: payload.hits,
            damage: 0,
            crit_damage: 0,
            crit_chance: 0.0,
        };

        match owner {
            Some((_, stats)) => {
                let damage = (stats.stat(Stat::Damage) * payload.damage_multiplier).floor() as i64;
                let crit_chance = stats.stat(Stat::CritChance);
                projectile.damage = damage;
                projectile.crit_chance = crit_chance;
                projectile.crit_damage = (damage as f32 * crit_chance).floor() as i64;
            }
            None => warn!("projectile fired without an owner; damage defaults to zero"),
        }

        projectile
    }

    #[inline]
    pub fn damage(&self) -> i64 {
        self.damage
    }

    #[inline]
    pub fn crit_damage(&self) -> i64 {
        self.crit_damage
    }

    #[inline]
    pub fn crit_chance(&self) -> f32 {
        self.crit_chance
    }
}

/// Pool a projectile returns to on destruction.
///
/// `None` means the projectile is despawned outright. Pool teardown clears this
/// for deployed projectiles before the pool goes away.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PooledBy(pub Option<Entity>);

/// Next stage fired from wherever this projectile is destroyed.
#[derive(Component, Debug, Clone)]
pub struct SpawnOnDestroy(pub Arc<StageSpec>);

/// Marker: entity should be torn down and removed at the end of the frame.
///
/// Emitters are retired through this marker so their pool is torn down first.
#[derive(Component, Debug, Clone, Copy)]
pub struct PendingDespawn;
