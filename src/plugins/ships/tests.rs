use bevy::prelude::*;
use avian2d::prelude::*;

use crate::common::layers::Layer;
use crate::plugins::projectiles::targeting::TargetTag;

use super::*;

#[test]
fn ship_stats_answer_every_stat() {
    let stats = ShipStats { damage: 100.0, crit_chance: 0.25, reload: 0.5 };
    assert_eq!(stats.stat(Stat::Damage), 100.0);
    assert_eq!(stats.stat(Stat::CritChance), 0.25);
    assert_eq!(stats.stat(Stat::Reload), 0.5);
}

#[test]
fn ship_bundle_spawns_targetable_ship() {
    let mut world = World::new();
    let e = world
        .spawn(ship_bundle(
            "Enemy",
            TargetTag::Enemy,
            ShipStats::default(),
            Vec2::new(5.0, 6.0),
            12.0,
        ))
        .id();

    assert!(world.get::<Ship>(e).is_some());
    assert_eq!(*world.get::<TargetTag>(e).unwrap(), TargetTag::Enemy);
    assert_eq!(world.get::<Transform>(e).unwrap().translation.truncate(), Vec2::new(5.0, 6.0));

    let layers = world.get::<CollisionLayers>(e).unwrap();
    assert!(layers.memberships.has_all(Layer::Enemy));
    assert!(layers.filters.has_all(Layer::PlayerBullet));
    assert!(!layers.filters.has_all(Layer::EnemyBullet));
}
