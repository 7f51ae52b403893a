//! Bullet patterns: emitters that periodically fire projectiles in a layout.
//!
//! # Data flow
//! ```text
//!   Update (real dt)
//!┌──────────────────────────────────────────────────────────────────────┐
//!│  cycle_pause_resume       PauseResumeCycle → FireTimer Idle/Armed    │
//!└──────────────────────────────────────────────────────────────────────┘
//!   FixedUpdate (fixed dt)
//!┌──────────────────────────────────────────────────────────────────────┐
//!│  follow_mounts            ship Transform → emitter position          │
//!│  arm_emitters             startup delay → interval from reload stat  │
//!│  refresh_fire_intervals   owner ShipStats changed → new interval     │
//!│  adjust_orientation       Spiral / TrackTarget → emitter rotation    │
//!│  fire_emitters            layout → Shot[] → pool acquire → launch    │
//!│  ── then projectiles::advance_motion                                 │
//!└──────────────────────────────────────────────────────────────────────┘
//!   FixedPostUpdate
//!┌──────────────────────────────────────────────────────────────────────┐
//!│  collisions ─▶ fire_next_stages ─▶ commit_destroyed_projectiles      │
//!│               (SpawnOnDestroy on Expiring projectiles)               │
//!└──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Configuration is validated once, in [`fire::spawn_emitter`]; the systems
//! above trust what they read.

pub mod adjust;
pub mod chain;
pub mod config;
pub mod cycle;
pub mod fire;
pub mod layouts;

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::common::state::GameState;
use crate::plugins::projectiles::collision::{process_boundary_exits, process_ship_collisions};
use crate::plugins::projectiles::commit::commit_destroyed_projectiles;
use crate::plugins::projectiles::motion::advance_motion;

/// Seeded RNG for random layouts and random target selection.
///
/// One stream for the whole simulation keeps runs reproducible from the seed.
#[derive(Resource)]
pub struct PatternRng(pub ChaCha8Rng);

impl PatternRng {
    pub fn new(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}

pub struct PatternsPlugin;

impl Plugin for PatternsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            cycle::cycle_pause_resume.run_if(in_state(GameState::Arena)),
        );

        app.add_systems(
            FixedUpdate,
            (
                adjust::follow_mounts,
                fire::arm_emitters,
                fire::refresh_fire_intervals,
                adjust::adjust_orientation,
                fire::fire_emitters,
            )
                .chain()
                .before(advance_motion)
                .run_if(in_state(GameState::Arena)),
        );

        app.add_systems(
            FixedPostUpdate,
            chain::fire_next_stages
                .after(process_ship_collisions)
                .after(process_boundary_exits)
                .before(commit_destroyed_projectiles)
                .run_if(in_state(GameState::Arena)),
        );
    }
}
