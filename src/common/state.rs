//! Top-level simulation state.
//!
//! Firing, motion and collision systems only run while the arena is live.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, States, Default)]
pub enum GameState {
    #[default]
    Arena,
}
