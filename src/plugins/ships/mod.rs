//! Ships: the stat-bearing entities that own emitters.
//!
//! The projectile core never computes stats. It only asks a [`DamageSource`]
//! for numbers, and `ShipStats` is the one implementor shipped here.

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::layers::Layer;
use crate::plugins::projectiles::targeting::TargetTag;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stat {
    /// Base damage per projectile.
    Damage,
    /// Fraction `0..=1`.
    CritChance,
    /// Multiplier on an emitter's base fire interval.
    Reload,
}

pub trait DamageSource {
    fn stat(&self, stat: Stat) -> f32;
}

#[derive(Component)]
pub struct Ship;

#[derive(Component, Debug, Clone, PartialEq)]
pub struct ShipStats {
    pub damage: f32,
    pub crit_chance: f32,
    pub reload: f32,
}

impl Default for ShipStats {
    fn default() -> Self {
        Self { damage: 10.0, crit_chance: 0.1, reload: 1.0 }
    }
}

impl DamageSource for ShipStats {
    fn stat(&self, stat: Stat) -> f32 {
        match stat {
            Stat::Damage => self.damage,
            Stat::CritChance => self.crit_chance,
            Stat::Reload => self.reload,
        }
    }
}

/// Collision layers for a ship of the given side.
pub fn ship_layers(tag: TargetTag) -> CollisionLayers {
    match tag {
        TargetTag::Player => CollisionLayers::new(Layer::Player, [Layer::EnemyBullet]),
        TargetTag::Enemy => CollisionLayers::new(Layer::Enemy, [Layer::PlayerBullet]),
    }
}

/// Components for a ship at `pos`.
pub fn ship_bundle(
    name: &'static str,
    tag: TargetTag,
    stats: ShipStats,
    pos: Vec2,
    radius: f32,
) -> impl Bundle {
    (
        Name::new(name),
        Ship,
        tag,
        stats,
        Transform::from_translation(pos.extend(1.0)),
        RigidBody::Kinematic,
        Collider::circle(radius),
        ship_layers(tag),
    )
}

#[cfg(test)]
mod tests;
