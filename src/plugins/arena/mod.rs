//! Arena plugin: the demo scene.
//!
//! ```text
//! OnEnter(Arena):  boundary volume, player ship (+ gun), enemy ship (+ emitters)
//! Update:          sample WASD, write PilotInput
//! FixedUpdate:     apply PilotInput to the player ship's kinematic velocity
//! FixedPostUpdate: report ProjectileHit (applying damage is left to the game)
//! ```
//!
//! Every emitter here is built through `spawn_emitter`, so a bad demo config is
//! reported, not fired.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::layers::Layer;
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::patterns::adjust::Mount;
use crate::plugins::patterns::config::{
    CycleConfig, EmitterConfig, OrientationAdjuster, PatternLayout, ShotPattern, StageSpec,
    WeaveConfig,
};
use crate::plugins::patterns::fire::spawn_emitter;
use crate::plugins::projectiles::collision::{process_ship_collisions, ArenaBoundary};
use crate::plugins::projectiles::components::{HitMask, Payload};
use crate::plugins::projectiles::messages::ProjectileHit;
use crate::plugins::projectiles::motion::PauseWindow;
use crate::plugins::projectiles::pool::ProjectileTemplate;
use crate::plugins::projectiles::targeting::{SelectMode, TargetTag};
use crate::plugins::ships::{ship_bundle, ShipStats};

pub const HALF_W: f32 = 640.0;
pub const HALF_H: f32 = 360.0;
/// How far past the visible arena projectiles may fly before they expire.
const BOUNDARY_MARGIN: f32 = 48.0;

/// Ship steered by WASD.
#[derive(Component)]
pub struct Pilot;

#[derive(Resource, Default, Debug)]
struct PilotInput {
    move_axis: Vec2,
}

pub fn plugin(app: &mut App) {
    app.insert_resource(PilotInput::default())
        .add_systems(OnEnter(GameState::Arena), spawn_arena)
        .add_systems(Update, gather_input.run_if(resource_exists::<ButtonInput<KeyCode>>))
        .add_systems(FixedUpdate, apply_movement.run_if(in_state(GameState::Arena)))
        .add_systems(
            FixedPostUpdate,
            report_hits
                .after(process_ship_collisions)
                .run_if(in_state(GameState::Arena)),
        );
}

fn spawn_arena(mut commands: Commands, tunables: Res<Tunables>) {
    let size = Vec2::new(HALF_W + BOUNDARY_MARGIN, HALF_H + BOUNDARY_MARGIN) * 2.0;
    commands.spawn((
        Name::new("ArenaBoundary"),
        ArenaBoundary,
        Transform::default(),
        RigidBody::Static,
        Collider::rectangle(size.x, size.y),
        CollisionLayers::new(Layer::Boundary, [Layer::PlayerBullet, Layer::EnemyBullet]),
        DespawnOnExit(GameState::Arena),
    ));

    let player = commands
        .spawn((
            ship_bundle(
                "Player",
                TargetTag::Player,
                ShipStats::default(),
                Vec2::new(0.0, -HALF_H * 0.6),
                13.0,
            ),
            Pilot,
            LinearVelocity::ZERO,
            Sprite {
                color: Color::srgb(0.2, 0.75, 0.9),
                custom_size: Some(Vec2::splat(26.0)),
                ..default()
            },
            DespawnOnExit(GameState::Arena),
        ))
        .id();

    let enemy_stats = ShipStats { damage: 4.0, crit_chance: 0.05, reload: 1.0 };
    let enemy_pos = Vec2::new(0.0, HALF_H * 0.55);
    let enemy = commands
        .spawn((
            ship_bundle("Enemy", TargetTag::Enemy, enemy_stats, enemy_pos, 24.0),
            Sprite {
                color: Color::srgb(0.9, 0.3, 0.35),
                custom_size: Some(Vec2::splat(48.0)),
                ..default()
            },
            DespawnOnExit(GameState::Arena),
        ))
        .id();

    let template = ProjectileTemplate { radius: tunables.projectile_radius };
    let loadout = [
        ("player gun", player_gun(player, template), Vec2::new(0.0, -HALF_H * 0.6), 0.0),
        ("fan", enemy_fan(enemy, template), enemy_pos, 180.0),
        ("spiral", enemy_spiral(enemy, template), enemy_pos, 180.0),
        ("homing", enemy_homing(enemy, template), enemy_pos, 180.0),
        ("tracker", enemy_tracker(enemy, player, template), enemy_pos, 180.0),
        ("spray", enemy_spray(enemy, template), enemy_pos, 180.0),
    ];

    let mut spawned = 0usize;
    for (label, config, pos, heading) in loadout {
        match spawn_emitter(&mut commands, &tunables, config, pos, heading) {
            Ok(_) => spawned += 1,
            Err(err) => error!("demo emitter '{label}' rejected: {err}"),
        }
    }
    info!("arena ready: {spawned} emitters");
}

fn enemy_payload() -> Payload {
    Payload { hits: HitMask::PLAYER, ..default() }
}

pub fn player_gun(player: Entity, template: ProjectileTemplate) -> EmitterConfig {
    EmitterConfig {
        pattern: ShotPattern {
            fire_rate: 0.12,
            bullet_speed: 520.0,
            acceleration: 0.0,
            expire_after: Some(2.0),
            ..default()
        },
        layout: PatternLayout::Parallel { way_count: 2, between_distance: 14.0 },
        owner: Some(player),
        mount: Some(Mount::aligned(player, Vec2::new(0.0, 16.0))),
        template,
        ..default()
    }
}

pub fn enemy_fan(enemy: Entity, template: ProjectileTemplate) -> EmitterConfig {
    EmitterConfig {
        pattern: ShotPattern {
            fire_rate: 0.35,
            bullet_speed: 150.0,
            acceleration: 20.0,
            max_speed: Some(260.0),
            payload: enemy_payload(),
            cycle: Some(CycleConfig { pause_secs: 1.5, resume_secs: 2.5 }),
            ..default()
        },
        layout: PatternLayout::Nway { way_count: 7, center_angle: 0.0, between_angle: 12.0 },
        owner: Some(enemy),
        mount: Some(Mount::new(enemy, Vec2::ZERO)),
        template,
        ..default()
    }
}

pub fn enemy_spiral(enemy: Entity, template: ProjectileTemplate) -> EmitterConfig {
    EmitterConfig {
        pattern: ShotPattern {
            fire_rate: 0.1,
            bullet_speed: 120.0,
            acceleration: 0.0,
            accel_turn: 15.0,
            weave: Some(WeaveConfig { speed: 400.0, amplitude: 30.0, inverted: false }),
            payload: enemy_payload(),
            ..default()
        },
        layout: PatternLayout::Nway { way_count: 4, center_angle: 0.0, between_angle: 90.0 },
        adjuster: Some(OrientationAdjuster::spiral(120.0, 0.8)),
        owner: Some(enemy),
        mount: Some(Mount::new(enemy, Vec2::ZERO)),
        template,
        ..default()
    }
}

/// Homing missile that bursts into a ring when it dies.
pub fn enemy_homing(enemy: Entity, template: ProjectileTemplate) -> EmitterConfig {
    let burst = StageSpec {
        pattern: ShotPattern {
            bullet_speed: 110.0,
            acceleration: 0.0,
            expire_after: Some(3.0),
            payload: Payload { damage_multiplier: 0.5, ..enemy_payload() },
            ..default()
        },
        layout: PatternLayout::Nway { way_count: 8, center_angle: 0.0, between_angle: 45.0 },
        next: None,
    };

    EmitterConfig {
        pattern: ShotPattern {
            fire_rate: 2.5,
            bullet_speed: 90.0,
            acceleration: 30.0,
            max_speed: Some(200.0),
            expire_after: Some(2.5),
            payload: Payload { damage_multiplier: 3.0, ..enemy_payload() },
            ..default()
        },
        layout: PatternLayout::Homing {
            target: TargetTag::Player,
            mode: SelectMode::Nearest,
            turn_rate: 120.0,
        },
        next_stage: Some(burst),
        owner: Some(enemy),
        mount: Some(Mount::new(enemy, Vec2::new(0.0, -20.0))),
        template,
        ..default()
    }
}

pub fn enemy_tracker(enemy: Entity, player: Entity, template: ProjectileTemplate) -> EmitterConfig {
    EmitterConfig {
        pattern: ShotPattern {
            fire_rate: 0.8,
            bullet_speed: 200.0,
            acceleration: 0.0,
            payload: enemy_payload(),
            ..default()
        },
        layout: PatternLayout::Parallel { way_count: 3, between_distance: 10.0 },
        adjuster: Some(OrientationAdjuster::TrackTarget {
            target: Some(player),
            rotation_speed: 2.5,
        }),
        owner: Some(enemy),
        mount: Some(Mount::new(enemy, Vec2::new(40.0, 0.0))),
        template,
        ..default()
    }
}

/// Random spray that stalls mid-flight, then forks in two when it expires.
pub fn enemy_spray(enemy: Entity, template: ProjectileTemplate) -> EmitterConfig {
    let fork = StageSpec {
        pattern: ShotPattern {
            bullet_speed: 140.0,
            acceleration: 0.0,
            expire_after: Some(1.5),
            payload: Payload { damage_multiplier: 0.5, ..enemy_payload() },
            ..default()
        },
        layout: PatternLayout::Nway { way_count: 2, center_angle: 0.0, between_angle: 30.0 },
        next: None,
    };

    EmitterConfig {
        pattern: ShotPattern {
            fire_rate: 0.05,
            acceleration: 0.0,
            projectile_pause: Some(PauseWindow { pause_at: 0.6, resume_at: 1.1 }),
            expire_after: Some(2.0),
            payload: enemy_payload(),
            ..default()
        },
        layout: PatternLayout::Random {
            center_angle: 180.0,
            range_size: 140.0,
            min_speed: 90.0,
            max_speed: 180.0,
            evenly_distribute: true,
            bullet_count: 12,
        },
        next_stage: Some(fork),
        owner: Some(enemy),
        mount: Some(Mount::new(enemy, Vec2::new(-40.0, 0.0))),
        template,
        ..default()
    }
}

fn gather_input(keys: Res<ButtonInput<KeyCode>>, mut input: ResMut<PilotInput>) {
    let mut axis = Vec2::ZERO;

    if keys.pressed(KeyCode::KeyW) {
        axis.y += 1.0;
    }
    if keys.pressed(KeyCode::KeyS) {
        axis.y -= 1.0;
    }
    if keys.pressed(KeyCode::KeyA) {
        axis.x -= 1.0;
    }
    if keys.pressed(KeyCode::KeyD) {
        axis.x += 1.0;
    }

    input.move_axis = axis.normalize_or_zero();
}

fn apply_movement(
    tunables: Res<Tunables>,
    input: Res<PilotInput>,
    mut q_pilot: Query<&mut LinearVelocity, With<Pilot>>,
) {
    let Ok(mut vel) = q_pilot.single_mut() else {
        return;
    };
    vel.0 = input.move_axis * tunables.pilot_speed;
}

fn report_hits(mut hits: MessageReader<ProjectileHit>) {
    for hit in hits.read() {
        debug!(
            "projectile {} hit ship {} for {} (crit {} at {:.0}%)",
            hit.projectile,
            hit.ship,
            hit.damage,
            hit.crit_damage,
            hit.crit_chance * 100.0
        );
    }
}
