//! Test helpers.
//!
//! Systems that use `Commands` only enqueue structural changes, so every helper
//! flushes the world before handing control back to the assertions.

use std::time::Duration;

use bevy::ecs::message::Messages;
use bevy::ecs::system::{IntoSystem, RunSystemOnce};
use bevy::prelude::*;

use crate::common::tunables::Tunables;
use crate::plugins::patterns::PatternRng;
use crate::plugins::projectiles::messages::{ProjectileHit, ProjectileLifecycle};

/// Run a system once on the given world, then flush deferred commands.
/// Returns the system output.
pub fn run_system_once<T, Out, Marker>(world: &mut World, system: T) -> Out
where
    T: IntoSystem<(), Out, Marker>,
{
    let out = world.run_system_once(system).expect("system run failed");
    world.flush();
    out
}

/// A `Time<Fixed>` that has advanced by `ticks` steps of `dt` seconds.
pub fn fixed_time(dt: f32, ticks: u32) -> Time<Fixed> {
    let mut t = Time::<Fixed>::default();
    for _ in 0..ticks {
        t.advance_by(Duration::from_secs_f32(dt));
    }
    t
}

/// World with the resources every projectile/pattern system expects.
pub fn sim_world() -> World {
    let mut world = World::new();
    world.insert_resource(Tunables::default());
    world.insert_resource(PatternRng::new(7));
    world.insert_resource(fixed_time(1.0 / 60.0, 1));
    world.init_resource::<Messages<ProjectileLifecycle>>();
    world.init_resource::<Messages<ProjectileHit>>();
    world
}

/// Drain every lifecycle message written so far.
pub fn drain_lifecycle(world: &mut World) -> Vec<ProjectileLifecycle> {
    world
        .resource_mut::<Messages<ProjectileLifecycle>>()
        .drain()
        .collect()
}
