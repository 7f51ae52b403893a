//! Target selection for homing projectiles.
//!
//! Stateless: every call looks at the live candidates and returns at most one.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use rand::Rng;

/// Category a ship can be targeted by.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TargetTag {
    Player,
    Enemy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectMode {
    /// First match in iteration order.
    #[default]
    First,
    Random,
    Nearest,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    pub entity: Entity,
    pub position: Vec2,
}

/// Pick one candidate carrying `tag`.
pub fn select_target<R: Rng + ?Sized>(
    candidates: impl IntoIterator<Item = (Entity, Vec2, TargetTag)>,
    tag: TargetTag,
    mode: SelectMode,
    from: Vec2,
    rng: &mut R,
) -> Option<Target> {
    let mut matching = candidates
        .into_iter()
        .filter(|(_, _, t)| *t == tag)
        .map(|(entity, position, _)| Target { entity, position });

    match mode {
        SelectMode::First => matching.next(),
        SelectMode::Random => {
            let all: Vec<Target> = matching.collect();
            if all.is_empty() {
                return None;
            }
            Some(all[rng.gen_range(0..all.len())])
        }
        SelectMode::Nearest => matching.fold(None, |best: Option<Target>, t| match best {
            Some(b) if b.position.distance_squared(from) <= t.position.distance_squared(from) => {
                Some(b)
            }
            _ => Some(t),
        }),
    }
}

/// Live view over every targetable entity.
#[derive(SystemParam)]
pub struct TargetSelector<'w, 's> {
    candidates: Query<'w, 's, (Entity, &'static Transform, &'static TargetTag)>,
}

impl TargetSelector<'_, '_> {
    pub fn select<R: Rng + ?Sized>(
        &self,
        tag: TargetTag,
        mode: SelectMode,
        from: Vec2,
        rng: &mut R,
    ) -> Option<Target> {
        select_target(
            self.candidates.iter().map(|(e, tf, t)| (e, tf.translation.truncate(), *t)),
            tag,
            mode,
            from,
            rng,
        )
    }
}
