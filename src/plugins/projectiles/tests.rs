//! Projectiles tests (Bevy 0.18 + Avian 0.5), deterministic.
//!
//! Collisions are not produced by the physics pipeline here: tests inject
//! `CollisionStart` / `CollisionEnd` messages directly and run the resolving
//! system once.
use avian2d::prelude::*;
use bevy::{
    ecs::{message::Messages, world::CommandQueue},
    prelude::*,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::common::layers::Layer;
use crate::common::test_utils::{drain_lifecycle, fixed_time, run_system_once, sim_world};
use crate::plugins::ships::{ship_bundle, ship_layers, ShipStats};

use super::collision::{self, ArenaBoundary};
use super::commit::commit_destroyed_projectiles;
use super::components::{HitMask, Payload, PendingDespawn, PooledBy, Projectile, ProjectileState};
use super::messages::{ProjectileHit, ProjectileLifecycle};
use super::motion::{advance_motion, Motion, MotionStep, PauseWindow, Steering};
use super::pool::{self, ProjectilePool};
use super::targeting::{select_target, SelectMode, TargetTag};

// --------------------------------------------------------------------------------------
// Helpers
// --------------------------------------------------------------------------------------

fn with_commands<T>(world: &mut World, f: impl FnOnce(&mut Commands) -> T) -> T {
    let mut queue = CommandQueue::default();
    let out = {
        let mut commands = Commands::new(&mut queue, world);
        f(&mut commands)
    };
    queue.apply(world);
    out
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-3
}

fn stats(damage: f32, crit_chance: f32) -> ShipStats {
    ShipStats { damage, crit_chance, reload: 1.0 }
}

/// Acquire from `pool_e`'s pool (or build unpooled) and put it in flight.
fn fire_one(
    world: &mut World,
    pool_e: Option<Entity>,
    projectile: Projectile,
    motion: Motion,
) -> Entity {
    let e = match pool_e {
        Some(p) => {
            let mut pool = world.entity_mut(p).take::<ProjectilePool>().expect("pool");
            let e = with_commands(world, |c| {
                pool::acquire_projectile(c, &mut pool, Vec2::ZERO, 0.0)
            });
            world.entity_mut(p).insert(pool);
            e
        }
        None => with_commands(world, |c| {
            pool::spawn_inactive(c, pool::ProjectileTemplate::default(), Vec2::ZERO, 0.0)
        }),
    };

    let layers = pool::active_projectile_layers(projectile.hits);
    world.entity_mut(e).insert((
        projectile,
        motion,
        ProjectileState::Active,
        PooledBy(pool_e),
        Visibility::Visible,
        layers,
    ));
    e
}

fn unowned() -> Projectile {
    Projectile::initialize(None, &Payload::default())
}

fn state(world: &World, e: Entity) -> ProjectileState {
    *world.get::<ProjectileState>(e).expect("projectile state")
}

fn free_len(world: &World, pool_e: Entity) -> usize {
    world.get::<ProjectilePool>(pool_e).expect("pool").free_len()
}

fn write_collision_start(world: &mut World, a: Entity, b: Entity) {
    if world.get_resource::<Messages<CollisionStart>>().is_none() {
        world.init_resource::<Messages<CollisionStart>>();
    }
    world.write_message(CollisionStart {
        collider1: a,
        collider2: b,
        body1: Some(a),
        body2: Some(b),
    });
}

fn write_collision_end(world: &mut World, a: Entity, b: Entity) {
    if world.get_resource::<Messages<CollisionEnd>>().is_none() {
        world.init_resource::<Messages<CollisionEnd>>();
    }
    world.write_message(CollisionEnd {
        collider1: a,
        collider2: b,
        body1: Some(a),
        body2: Some(b),
    });
}

fn hits(world: &mut World) -> Vec<ProjectileHit> {
    world.resource_mut::<Messages<ProjectileHit>>().drain().collect()
}

// --------------------------------------------------------------------------------------
// Payload
// --------------------------------------------------------------------------------------

#[test]
fn damage_is_floored_from_owner_stats() {
    let owner = Entity::from_raw_u32(42).unwrap();
    let payload = Payload { damage_multiplier: 2.0, ..default() };
    let p = Projectile::initialize(Some((owner, &stats(100.0, 0.25))), &payload);

    assert_eq!(p.owner, Some(owner));
    assert_eq!(p.damage(), 200);
    assert_eq!(p.crit_damage(), 50);
    assert_eq!(p.crit_chance(), 0.25);

    let payload = Payload { damage_multiplier: 1.5, ..default() };
    let p = Projectile::initialize(Some((owner, &stats(7.0, 0.5))), &payload);
    assert_eq!(p.damage(), 10);
    assert_eq!(p.crit_damage(), 5);
}

#[test]
fn missing_owner_fires_with_zero_damage() {
    let p = unowned();
    assert_eq!(p.owner, None);
    assert_eq!(p.damage(), 0);
    assert_eq!(p.crit_damage(), 0);
    assert_eq!(p.crit_chance(), 0.0);
    assert!(p.destroy_on_ship_collision);
}

// --------------------------------------------------------------------------------------
// Motion (pure)
// --------------------------------------------------------------------------------------

#[test]
fn straight_motion_moves_along_heading() {
    let mut m = Motion::new(10.0, 90.0).with_acceleration(0.0, 0.0);
    match m.step(1.0, Vec2::ZERO, None) {
        MotionStep::Moved { position, heading } => {
            assert!(approx(heading, 90.0));
            assert!(position.distance(Vec2::new(-10.0, 0.0)) < 1e-3, "{position:?}");
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn homing_reaches_bearing_in_two_ticks_without_overshoot() {
    let target = Entity::from_raw_u32(9).unwrap();
    let mut m = Motion::new(0.0, 0.0)
        .with_acceleration(0.0, 0.0)
        .with_steering(Steering::Homing { target: Some(target), turn_rate: 90.0 });
    let behind = Vec2::new(0.0, -10.0);

    let MotionStep::Moved { heading, .. } = m.step(1.0, Vec2::ZERO, Some(behind)) else {
        panic!("homing projectile should move");
    };
    assert!(approx(heading, 90.0), "first tick turned to {heading}");

    let MotionStep::Moved { heading, .. } = m.step(1.0, Vec2::ZERO, Some(behind)) else {
        panic!("homing projectile should move");
    };
    assert!(approx(heading, 180.0), "second tick turned to {heading}");

    let MotionStep::Moved { heading, .. } = m.step(1.0, Vec2::ZERO, Some(behind)) else {
        panic!("homing projectile should move");
    };
    assert!(approx(heading, 180.0), "overshot to {heading}");
}

#[test]
fn homing_without_target_holds_heading() {
    let mut m = Motion::new(1.0, 30.0)
        .with_acceleration(0.0, 0.0)
        .with_steering(Steering::Homing { target: None, turn_rate: 90.0 });
    let MotionStep::Moved { heading, .. } = m.step(1.0, Vec2::ZERO, None) else {
        panic!("should move");
    };
    assert!(approx(heading, 30.0));
}

#[test]
fn auto_expire_stops_on_the_tick_remaining_hits_zero() {
    let mut m = Motion::new(5.0, 0.0).with_expiry(Some(0.1));
    assert!(matches!(m.step(0.1, Vec2::ZERO, None), MotionStep::Moved { .. }));
    assert_eq!(m.step(0.1, Vec2::ZERO, None), MotionStep::Expired);
}

#[test]
fn pause_window_holds_position_but_time_advances() {
    let mut m = Motion::new(2.0, 0.0)
        .with_acceleration(0.0, 0.0)
        .with_pause(Some(PauseWindow { pause_at: 1.0, resume_at: 2.0 }));

    let mut pos = Vec2::ZERO;
    let mut moved = Vec::new();
    for _ in 0..6 {
        match m.step(0.5, pos, None) {
            MotionStep::Moved { position, .. } => {
                moved.push(position.distance(pos));
                pos = position;
            }
            MotionStep::Held => moved.push(0.0),
            MotionStep::Expired => panic!("no expiry configured"),
        }
    }

    // elapsed 0.5, 1.0, 1.5, 2.0, 2.5, 3.0
    let expected = [1.0, 0.0, 0.0, 1.0, 1.0, 1.0];
    for (got, want) in moved.iter().zip(expected) {
        assert!(approx(*got, want), "displacements {moved:?}");
    }
    assert!(approx(m.elapsed(), 3.0));
}

#[test]
fn speed_is_clamped_after_acceleration() {
    let mut m = Motion::new(1.0, 0.0)
        .with_acceleration(10.0, 0.0)
        .with_speed_limits(Some(0.5), Some(3.0));
    m.step(1.0, Vec2::ZERO, None);
    assert!(approx(m.speed, 3.0));

    let mut m = Motion::new(1.0, 0.0)
        .with_acceleration(-10.0, 0.0)
        .with_speed_limits(Some(0.5), Some(3.0));
    m.step(1.0, Vec2::ZERO, None);
    assert!(approx(m.speed, 0.5));
}

#[test]
fn weave_oscillates_around_drifting_base() {
    let mut m = Motion::new(0.0, 0.0)
        .with_acceleration(0.0, 10.0)
        .with_steering(Steering::Weave { speed: 100.0, amplitude: 20.0, inverted: false });

    // First tick: phase 0, so heading is the drifted base.
    let MotionStep::Moved { heading, .. } = m.step(1.0, Vec2::ZERO, None) else {
        panic!("should move");
    };
    assert!(approx(heading, 10.0));

    // Second tick: base 20, phase 1 → 20 + 10·sin(1).
    let MotionStep::Moved { heading, .. } = m.step(1.0, Vec2::ZERO, None) else {
        panic!("should move");
    };
    assert!(approx(heading, 20.0 + 10.0 * 1f32.sin()));
}

#[test]
fn headings_stay_normalized() {
    let mut m = Motion::new(1.0, 350.0).with_acceleration(0.0, 30.0);
    let MotionStep::Moved { heading, .. } = m.step(1.0, Vec2::ZERO, None) else {
        panic!("should move");
    };
    assert!(approx(heading, 20.0));
}

// --------------------------------------------------------------------------------------
// Motion (system)
// --------------------------------------------------------------------------------------

#[test]
fn advance_motion_expires_without_moving() {
    let mut world = sim_world();
    world.insert_resource(fixed_time(0.1, 1));

    let motion = Motion::new(50.0, 0.0).with_expiry(Some(0.0));
    let e = fire_one(&mut world, None, unowned(), motion);

    run_system_once(&mut world, advance_motion);

    assert_eq!(state(&world, e), ProjectileState::Expiring);
    assert_eq!(world.get::<Transform>(e).unwrap().translation.truncate(), Vec2::ZERO);
}

#[test]
fn advance_motion_tracks_live_target() {
    let mut world = sim_world();
    world.insert_resource(fixed_time(1.0, 1));

    let target = world.spawn(Transform::from_xyz(10.0, 0.0, 0.0)).id();
    let motion = Motion::new(0.0, 0.0)
        .with_acceleration(0.0, 0.0)
        .with_steering(Steering::Homing { target: Some(target), turn_rate: 45.0 });
    let e = fire_one(&mut world, None, unowned(), motion);

    run_system_once(&mut world, advance_motion);

    // Bearing to +X is 270; the short way from 0 is clockwise.
    assert!(approx(world.get::<Motion>(e).unwrap().heading, 315.0));
}

#[test]
fn inactive_projectiles_do_not_move() {
    let mut world = sim_world();
    world.insert_resource(fixed_time(1.0, 1));

    let e = fire_one(&mut world, None, unowned(), Motion::new(10.0, 0.0));
    *world.get_mut::<ProjectileState>(e).unwrap() = ProjectileState::Inactive;

    run_system_once(&mut world, advance_motion);
    assert_eq!(world.get::<Transform>(e).unwrap().translation.truncate(), Vec2::ZERO);
}

// --------------------------------------------------------------------------------------
// Pool + commit
// --------------------------------------------------------------------------------------

#[test]
fn spawn_inactive_is_parked() {
    let mut world = World::new();
    let template = pool::ProjectileTemplate::default();
    let e = with_commands(&mut world, |c| pool::spawn_inactive(c, template, Vec2::ONE, 0.0));

    assert_eq!(state(&world, e), ProjectileState::Inactive);
    assert_eq!(*world.get::<Visibility>(e).unwrap(), Visibility::Hidden);
    assert!(world.get::<CollisionEventsEnabled>(e).is_some());
    let layers = world.get::<CollisionLayers>(e).unwrap();
    assert!(!layers.filters.has_all(Layer::Boundary));
    assert!(!layers.filters.has_all(Layer::Enemy));
}

#[test]
fn active_layers_follow_hit_mask() {
    let enemy_hitting = pool::active_projectile_layers(HitMask::ENEMY);
    assert!(enemy_hitting.memberships.has_all(Layer::PlayerBullet));
    assert!(enemy_hitting.filters.has_all(Layer::Enemy));
    assert!(enemy_hitting.filters.has_all(Layer::Boundary));
    assert!(!enemy_hitting.filters.has_all(Layer::Player));

    let player_hitting = pool::active_projectile_layers(HitMask::PLAYER);
    assert!(player_hitting.memberships.has_all(Layer::EnemyBullet));
    assert!(player_hitting.filters.has_all(Layer::Player));
}

#[test]
fn hit_mask_decides_which_ships_a_projectile_touches() {
    let both = HitMask { player: true, enemy: true };
    let cases = [
        (HitMask::ENEMY, false, true),
        (HitMask::PLAYER, true, false),
        (both, true, true),
        (HitMask::default(), false, false),
    ];

    for (hits, touches_player, touches_enemy) in cases {
        let layers = pool::active_projectile_layers(hits);
        let player = layers.interacts_with(ship_layers(TargetTag::Player));
        let enemy = layers.interacts_with(ship_layers(TargetTag::Enemy));
        assert_eq!((player, enemy), (touches_player, touches_enemy), "{hits:?}");
    }
}

#[test]
fn destroy_returns_pooled_projectile_and_reuses_it() {
    let mut world = sim_world();
    let pool_e = world.spawn(ProjectilePool::default()).id();

    let e = fire_one(&mut world, Some(pool_e), unowned(), Motion::new(1.0, 0.0));
    world.entity_mut(e).insert(LinearVelocity(Vec2::new(3.0, 4.0)));
    assert_eq!(free_len(&world, pool_e), 0);

    assert!(world.get_mut::<ProjectileState>(e).unwrap().expire());
    run_system_once(&mut world, commit_destroyed_projectiles);

    // Parked: in the store, hidden, still, colliding with nothing.
    assert!(world.get::<ProjectilePool>(pool_e).unwrap().contains(e));
    assert_eq!(state(&world, e), ProjectileState::Inactive);
    assert_eq!(*world.get::<Visibility>(e).unwrap(), Visibility::Hidden);
    assert_eq!(world.get::<LinearVelocity>(e).unwrap().0, Vec2::ZERO);
    assert!(!world.get::<CollisionLayers>(e).unwrap().filters.has_all(Layer::Enemy));

    let events = drain_lifecycle(&mut world);
    assert!(matches!(
        events[0],
        ProjectileLifecycle::Destroyed { projectile, .. } if projectile == e
    ));
    assert_eq!(events[1], ProjectileLifecycle::Deactivated(e));

    // Reuse before construction.
    let before = world.query::<&Projectile>().iter(&world).count();
    let again = fire_one(&mut world, Some(pool_e), unowned(), Motion::new(1.0, 0.0));
    assert_eq!(again, e);
    assert_eq!(free_len(&world, pool_e), 0);
    assert_eq!(world.query::<&Projectile>().iter(&world).count(), before);
}

#[test]
fn pool_hands_out_each_stored_projectile_once() {
    let mut world = sim_world();
    let pool_e = world.spawn(ProjectilePool::default()).id();

    let fired: Vec<Entity> = (0..3)
        .map(|_| fire_one(&mut world, Some(pool_e), unowned(), Motion::new(1.0, 0.0)))
        .collect();
    for &e in &fired {
        world.get_mut::<ProjectileState>(e).unwrap().expire();
    }
    run_system_once(&mut world, commit_destroyed_projectiles);
    assert_eq!(free_len(&world, pool_e), 3);

    let mut reused: Vec<Entity> = (0..3)
        .map(|_| fire_one(&mut world, Some(pool_e), unowned(), Motion::new(1.0, 0.0)))
        .collect();
    let mut fired = fired;
    fired.sort();
    reused.sort();
    assert_eq!(fired, reused);

    for e in reused {
        assert!(!world.get::<ProjectilePool>(pool_e).unwrap().contains(e));
    }

    let fresh = fire_one(&mut world, Some(pool_e), unowned(), Motion::new(1.0, 0.0));
    assert!(!fired.contains(&fresh));
}

#[test]
fn second_destroy_request_is_a_no_op() {
    let mut world = sim_world();
    let pool_e = world.spawn(ProjectilePool::default()).id();
    let e = fire_one(&mut world, Some(pool_e), unowned(), Motion::new(1.0, 0.0));

    let mut s = world.get_mut::<ProjectileState>(e).unwrap();
    assert!(s.expire());
    assert!(!s.expire());

    run_system_once(&mut world, commit_destroyed_projectiles);
    run_system_once(&mut world, commit_destroyed_projectiles);

    assert_eq!(free_len(&world, pool_e), 1);
    assert!(!world.get_mut::<ProjectileState>(e).unwrap().expire());
    assert_eq!(drain_lifecycle(&mut world).len(), 2);
}

#[test]
fn unpooled_projectile_despawns_on_destroy() {
    let mut world = sim_world();
    let e = fire_one(&mut world, None, unowned(), Motion::new(1.0, 0.0));
    world.get_mut::<ProjectileState>(e).unwrap().expire();

    run_system_once(&mut world, commit_destroyed_projectiles);

    assert!(world.get_entity(e).is_err());
    let events = drain_lifecycle(&mut world);
    assert_eq!(events.len(), 1);
    assert!(matches!(events[0], ProjectileLifecycle::Destroyed { .. }));
}

#[test]
fn teardown_despawns_stored_and_detaches_deployed() {
    let mut world = sim_world();
    let pool_e = world.spawn(ProjectilePool::default()).id();

    let stored = fire_one(&mut world, Some(pool_e), unowned(), Motion::new(1.0, 0.0));
    let deployed = fire_one(&mut world, Some(pool_e), unowned(), Motion::new(1.0, 0.0));
    world.get_mut::<ProjectileState>(stored).unwrap().expire();
    run_system_once(&mut world, commit_destroyed_projectiles);
    drain_lifecycle(&mut world);
    assert_eq!(free_len(&world, pool_e), 1);

    world.entity_mut(pool_e).insert(PendingDespawn);
    run_system_once(&mut world, pool::teardown_retired_pools);

    assert!(world.get_entity(pool_e).is_err());
    assert!(world.get_entity(stored).is_err());
    assert_eq!(world.get::<PooledBy>(deployed).unwrap().0, None);
    assert_eq!(state(&world, deployed), ProjectileState::Active);

    // The deployed projectile now destroys itself outright.
    world.get_mut::<ProjectileState>(deployed).unwrap().expire();
    run_system_once(&mut world, commit_destroyed_projectiles);
    assert!(world.get_entity(deployed).is_err());

    let events = drain_lifecycle(&mut world);
    assert_eq!(events.len(), 1);
    assert!(matches!(
        events[0],
        ProjectileLifecycle::Destroyed { projectile, .. } if projectile == deployed
    ));
}

// --------------------------------------------------------------------------------------
// Collisions
// --------------------------------------------------------------------------------------

fn spawn_enemy(world: &mut World) -> Entity {
    world
        .spawn(ship_bundle("Enemy", TargetTag::Enemy, ShipStats::default(), Vec2::ZERO, 10.0))
        .id()
}

#[test]
fn ship_collision_writes_hit_and_expires() {
    let mut world = sim_world();
    let owner = world
        .spawn(ship_bundle("Player", TargetTag::Player, stats(100.0, 0.25), Vec2::ZERO, 10.0))
        .id();
    let enemy = spawn_enemy(&mut world);

    let projectile =
        Projectile::initialize(Some((owner, &stats(100.0, 0.25))), &Payload::default());
    let e = fire_one(&mut world, None, projectile, Motion::new(1.0, 0.0));

    write_collision_start(&mut world, enemy, e);
    run_system_once(&mut world, collision::process_ship_collisions);

    let got = hits(&mut world);
    assert_eq!(got.len(), 1);
    assert_eq!(got[0].projectile, e);
    assert_eq!(got[0].ship, enemy);
    assert_eq!(got[0].owner, Some(owner));
    assert_eq!(got[0].damage, 100);
    assert_eq!(got[0].crit_damage, 25);
    assert_eq!(state(&world, e), ProjectileState::Expiring);
}

#[test]
fn piercing_projectile_survives_ship_collision() {
    let mut world = sim_world();
    let enemy = spawn_enemy(&mut world);

    let payload = Payload { destroy_on_ship_collision: false, ..default() };
    let projectile = Projectile::initialize(None, &payload);
    let e = fire_one(&mut world, None, projectile, Motion::new(1.0, 0.0));

    write_collision_start(&mut world, e, enemy);
    run_system_once(&mut world, collision::process_ship_collisions);

    assert_eq!(hits(&mut world).len(), 1);
    assert_eq!(state(&world, e), ProjectileState::Active);
}

#[test]
fn projectiles_ignore_owner_and_friendly_ships() {
    let mut world = sim_world();
    let owner = spawn_enemy(&mut world);
    let other_enemy = spawn_enemy(&mut world);

    // Enemy-fired projectile that hits players only.
    let payload = Payload { hits: HitMask::PLAYER, ..default() };
    let projectile = Projectile::initialize(Some((owner, &ShipStats::default())), &payload);
    let e = fire_one(&mut world, None, projectile, Motion::new(1.0, 0.0));

    write_collision_start(&mut world, e, owner);
    write_collision_start(&mut world, e, other_enemy);
    run_system_once(&mut world, collision::process_ship_collisions);

    assert!(hits(&mut world).is_empty());
    assert_eq!(state(&world, e), ProjectileState::Active);
}

#[test]
fn duplicate_collision_in_one_tick_hits_once() {
    let mut world = sim_world();
    let enemy = spawn_enemy(&mut world);
    let payload = Payload { destroy_on_ship_collision: false, ..default() };
    let projectile = Projectile::initialize(None, &payload);
    let e = fire_one(&mut world, None, projectile, Motion::new(1.0, 0.0));

    write_collision_start(&mut world, e, enemy);
    write_collision_start(&mut world, enemy, e);
    run_system_once(&mut world, collision::process_ship_collisions);

    assert_eq!(hits(&mut world).len(), 1);
}

#[test]
fn handle_ship_collision_respects_flag() {
    let mut s = ProjectileState::Active;
    let payload = Payload { destroy_on_ship_collision: false, ..default() };
    let piercing = Projectile::initialize(None, &payload);
    assert!(!collision::handle_ship_collision(&piercing, &mut s));
    assert_eq!(s, ProjectileState::Active);

    assert!(collision::handle_ship_collision(&unowned(), &mut s));
    assert_eq!(s, ProjectileState::Expiring);
    assert!(!collision::handle_ship_collision(&unowned(), &mut s));
}

#[test]
fn leaving_the_arena_expires_projectile() {
    let mut world = sim_world();
    let boundary = world.spawn(ArenaBoundary).id();
    let e = fire_one(&mut world, None, unowned(), Motion::new(1.0, 0.0));

    write_collision_end(&mut world, boundary, e);
    run_system_once(&mut world, collision::process_boundary_exits);

    assert_eq!(state(&world, e), ProjectileState::Expiring);
}

// --------------------------------------------------------------------------------------
// Target selection
// --------------------------------------------------------------------------------------

#[test]
fn select_target_modes() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let e = |i: u32| Entity::from_raw_u32(i).unwrap();
    let candidates = [
        (e(1), Vec2::new(50.0, 0.0), TargetTag::Enemy),
        (e(2), Vec2::new(0.0, 5.0), TargetTag::Player),
        (e(3), Vec2::new(10.0, 0.0), TargetTag::Enemy),
        (e(4), Vec2::new(-10.0, 0.0), TargetTag::Enemy),
    ];

    let first =
        select_target(candidates, TargetTag::Enemy, SelectMode::First, Vec2::ZERO, &mut rng)
            .unwrap();
    assert_eq!(first.entity, e(1));

    // Ties keep the earlier candidate.
    let nearest =
        select_target(candidates, TargetTag::Enemy, SelectMode::Nearest, Vec2::ZERO, &mut rng)
            .unwrap();
    assert_eq!(nearest.entity, e(3));

    for _ in 0..20 {
        let pick =
            select_target(candidates, TargetTag::Enemy, SelectMode::Random, Vec2::ZERO, &mut rng)
                .unwrap();
        assert_ne!(pick.entity, e(2));
    }

    let none = select_target(
        std::iter::empty(),
        TargetTag::Player,
        SelectMode::Random,
        Vec2::ZERO,
        &mut rng,
    );
    assert!(none.is_none());
}
