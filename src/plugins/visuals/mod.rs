//! Visuals plugin (render-only): projectile sprites.
//!
//! A pure observer of `ProjectileLifecycle`: it decorates projectiles the first
//! time they are fired and never feeds back into the simulation. Visibility is
//! already toggled by the pool, so a reused projectile keeps its sprite.

use bevy::prelude::*;

use crate::common::tunables::Tunables;
use crate::plugins::projectiles::components::Projectile;
use crate::plugins::projectiles::messages::ProjectileLifecycle;

const PLAYER_SHOT: Color = Color::srgb(0.55, 0.95, 1.0);
const ENEMY_SHOT: Color = Color::srgb(1.0, 0.55, 0.3);

pub fn plugin(app: &mut App) {
    app.add_systems(Update, attach_projectile_sprites);
}

fn attach_projectile_sprites(
    mut commands: Commands,
    tunables: Res<Tunables>,
    mut lifecycle: MessageReader<ProjectileLifecycle>,
    q: Query<(&Projectile, Has<Sprite>)>,
) {
    let size = Vec2::splat(tunables.projectile_radius * 2.0);

    for msg in lifecycle.read() {
        let ProjectileLifecycle::Activated(e) = *msg else {
            continue;
        };
        // Already gone (destroyed in the same fixed step) or already decorated.
        let Ok((projectile, has_sprite)) = q.get(e) else {
            continue;
        };
        if has_sprite {
            continue;
        }

        let color = if projectile.hits.player { ENEMY_SHOT } else { PLAYER_SHOT };
        commands.entity(e).insert(Sprite::from_color(color, size));
    }
}
