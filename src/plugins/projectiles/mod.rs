//! Projectiles plugin: pooled projectiles, their motion, and their destruction.
//!
//! # Invariants first
//! Correctness checks sit at the boundaries (launch, state transitions, commit)
//! so the per-tick loops stay straight-line:
//! - only `Active` projectiles move or collide;
//! - destruction is a *request* (`Active → Expiring`), committed exactly once;
//! - a pooled projectile is hidden, still, and collides with nothing.
//!
//! # Data flow
//! ```text
//!   FixedUpdate (fixed dt)
//!┌────────────────────────────────────────────────────────────────────────────┐
//!│  (A) patterns::fire_emitters                                               │
//!│      - mutates: ProjectilePool.free (pop) or spawns from the template      │
//!│      - writes: Projectile, Motion, ProjectileState::Active, layers         │
//!│      - writes: ProjectileLifecycle::Activated                              │
//!│                                                                            │
//!│  (B) advance_motion                                                        │
//!│      - reads: target Transforms (homing)                                   │
//!│      - mutates: Motion, Transform                                          │
//!│      - mutates: ProjectileState -> Expiring (auto-expire)                  │
//!└────────────────────────────────────────────────────────────────────────────┘
//!                │
//!                v
//!   FixedPostUpdate (fixed dt)
//!┌────────────────────────────────────────────────────────────────────────────┐
//!│  (C) Physics emits CollisionStart / CollisionEnd messages (Avian)          │
//!│                                                                            │
//!│  (D) process_ship_collisions / process_boundary_exits                      │
//!│      - writes: ProjectileHit                                               │
//!│      - mutates: ProjectileState -> Expiring                                │
//!│                                                                            │
//!│  (E) patterns::fire_next_stages (SpawnOnDestroy)                           │
//!│                                                                            │
//!│  (F) commit_destroyed_projectiles                                          │
//!│      - writes: ProjectileLifecycle::Destroyed / Deactivated                │
//!│      - mutates: ProjectilePool.free (push) or despawns                     │
//!└────────────────────────────────────────────────────────────────────────────┘
//!   PostUpdate
//!┌────────────────────────────────────────────────────────────────────────────┐
//!│  (G) teardown_retired_pools (emitters marked PendingDespawn)               │
//!└────────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod collision;
pub mod commit;
pub mod components;
pub mod messages;
pub mod motion;
pub mod pool;
pub mod targeting;

use avian2d::collision::narrow_phase::CollisionEventSystems;
use bevy::prelude::*;

use crate::common::state::GameState;

pub struct ProjectilesPlugin;

impl Plugin for ProjectilesPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<messages::ProjectileLifecycle>()
            .add_message::<messages::ProjectileHit>();

        app.add_systems(
            FixedUpdate,
            motion::advance_motion.run_if(in_state(GameState::Arena)),
        );

        // Fixed collision pipeline
        app.add_systems(
            FixedPostUpdate,
            (collision::process_ship_collisions, collision::process_boundary_exits)
                .after(CollisionEventSystems)
                .run_if(in_state(GameState::Arena)),
        )
        .add_systems(
            FixedPostUpdate,
            commit::commit_destroyed_projectiles
                .after(collision::process_ship_collisions)
                .after(collision::process_boundary_exits)
                .run_if(in_state(GameState::Arena)),
        );

        app.add_systems(
            PostUpdate,
            pool::teardown_retired_pools.run_if(in_state(GameState::Arena)),
        );
    }
}

#[cfg(test)]
mod tests;
