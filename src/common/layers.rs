//! Collision layers.

use avian2d::prelude::*;

#[derive(PhysicsLayer, Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    #[default]
    Default,
    Boundary,
    Player,
    Enemy,
    PlayerBullet,
    EnemyBullet,
}
