//! Emitter firing: startup, fire-rate timer, and turning shots into projectiles.
//!
//! ```text
//!  Uninitialized ──startup delay──▶ Idle ◀──pause/resume cycle──▶ Armed
//!                                    (shooting off)               (shooting on)
//! ```
//!
//! Armed emitters fire once whenever `now >= next_fire`, then schedule the next
//! shot `interval` seconds later. The interval is `max(min, base · reload)`,
//! computed at startup and again whenever the owner's stats change.

use std::sync::Arc;
use std::time::Duration;

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::angles::{heading_of, heading_rotation};
use crate::common::tunables::Tunables;
use crate::plugins::projectiles::components::{
    PendingDespawn, PooledBy, Projectile, ProjectileState, SpawnOnDestroy,
};
use crate::plugins::projectiles::messages::ProjectileLifecycle;
use crate::plugins::projectiles::motion::{Motion, Steering};
use crate::plugins::projectiles::pool::{
    acquire_projectile, active_projectile_layers, ProjectilePool,
};
use crate::plugins::projectiles::targeting::TargetSelector;
use crate::plugins::ships::{DamageSource, ShipStats, Stat};

use super::PatternRng;
use super::config::{
    EmitterConfig, NextStage, PatternConfigError, PatternLayout, ShotPattern, StageSpec,
};
use super::cycle::PauseResumeCycle;
use super::layouts::{lay_out, EmitterPose, Shot};

#[derive(Component)]
pub struct Emitter;

/// Ship whose stats drive this emitter's damage and reload.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmitterOwner(pub Option<Entity>);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireState {
    Uninitialized,
    Idle,
    Armed,
}

#[derive(Component, Debug, Clone)]
pub struct FireTimer {
    state: FireState,
    startup: Timer,
    interval: f32,
    next_fire: f32,
}

/// Seconds between shots for a base interval and an owner's reload multiplier.
#[inline]
pub fn fire_interval(base: f32, reload: f32, min_interval: f32) -> f32 {
    (base * reload).max(min_interval)
}

impl FireTimer {
    pub fn new(startup_delay: f32) -> Self {
        Self {
            state: FireState::Uninitialized,
            startup: Timer::from_seconds(startup_delay.max(0.0), TimerMode::Once),
            interval: 0.0,
            next_fire: 0.0,
        }
    }

    #[inline]
    pub fn state(&self) -> FireState {
        self.state
    }

    #[inline]
    pub fn interval(&self) -> f32 {
        self.interval
    }

    /// Advance the startup delay. Returns true once the emitter may initialize.
    pub fn tick_startup(&mut self, delta: Duration) -> bool {
        self.state == FireState::Uninitialized && self.startup.tick(delta).is_finished()
    }

    /// Leave `Uninitialized`: set the interval and start idle, then arm if asked to.
    pub fn initialize(&mut self, interval: f32, shooting: bool) {
        self.interval = interval;
        self.state = FireState::Idle;
        self.set_shooting(shooting);
    }

    pub fn set_interval(&mut self, interval: f32) {
        self.interval = interval;
    }

    /// Toggle between `Idle` and `Armed`. Ignored before initialization.
    pub fn set_shooting(&mut self, shooting: bool) {
        if self.state == FireState::Uninitialized {
            return;
        }
        self.state = if shooting { FireState::Armed } else { FireState::Idle };
    }

    /// Consume one shot if armed and due at `now`.
    pub fn try_fire(&mut self, now: f32) -> bool {
        if self.state != FireState::Armed || now < self.next_fire {
            return false;
        }
        self.next_fire = now + self.interval;
        true
    }
}

#[inline]
fn owner_reload(owner: &EmitterOwner, q_owners: &Query<&ShipStats>) -> f32 {
    owner
        .0
        .and_then(|o| q_owners.get(o).ok())
        .map_or(1.0, |s| s.stat(Stat::Reload))
}

/// Finish the startup delay: read the owner's reload stat, arm (or start the
/// pause/resume cycle).
pub fn arm_emitters(
    time: Res<Time<Fixed>>,
    tunables: Res<Tunables>,
    q_owners: Query<&ShipStats>,
    mut q: Query<(
        Entity,
        &ShotPattern,
        &EmitterOwner,
        &mut FireTimer,
        Option<&mut PauseResumeCycle>,
    ), With<Emitter>>,
) {
    for (e, pattern, owner, mut timer, cycle) in &mut q {
        if !timer.tick_startup(time.delta()) {
            continue;
        }

        let reload = owner_reload(owner, &q_owners);
        let interval = fire_interval(pattern.fire_rate, reload, tunables.min_fire_interval);

        match cycle {
            // The cycle opens with a pause; it arms the emitter when it flips.
            Some(mut cycle) => {
                timer.initialize(interval, false);
                cycle.start();
            }
            None => timer.initialize(interval, pattern.start_shooting),
        }

        debug!("emitter {e} initialized: interval {interval:.3}s, state {:?}", timer.state());
    }
}

/// Recompute intervals when an owner's stats change.
///
/// Always derived from the pattern's base rate, so repeated changes never compound.
pub fn refresh_fire_intervals(
    tunables: Res<Tunables>,
    q_owners: Query<Ref<ShipStats>>,
    mut q: Query<(&ShotPattern, &EmitterOwner, &mut FireTimer), With<Emitter>>,
) {
    for (pattern, owner, mut timer) in &mut q {
        if timer.state() == FireState::Uninitialized {
            continue;
        }
        let Some(stats) = owner.0.and_then(|o| q_owners.get(o).ok()) else {
            continue;
        };
        if !stats.is_changed() {
            continue;
        }
        let reload = stats.stat(Stat::Reload);
        timer.set_interval(fire_interval(pattern.fire_rate, reload, tunables.min_fire_interval));
    }
}

/// Motion parameters for one shot of `pattern`. Homing wins over weave.
pub fn motion_for(pattern: &ShotPattern, shot: &Shot) -> Motion {
    let steering = match (shot.homing, pattern.weave) {
        (Some(h), _) => Steering::Homing { target: h.target, turn_rate: h.turn_rate },
        (None, Some(w)) => Steering::Weave {
            speed: w.speed,
            amplitude: w.amplitude,
            inverted: w.inverted,
        },
        (None, None) => Steering::Straight,
    };

    Motion::new(shot.speed, shot.heading)
        .with_acceleration(pattern.acceleration, pattern.accel_turn)
        .with_steering(steering)
        .with_pause(pattern.projectile_pause)
        .with_expiry(pattern.expire_after)
        .with_speed_limits(pattern.min_speed, pattern.max_speed)
}

/// Fire an acquired projectile: payload, motion, pose, and the active invariants
/// (visible, colliding, moving).
pub fn launch(
    commands: &mut Commands,
    e: Entity,
    pool: Option<Entity>,
    pattern: &ShotPattern,
    shot: &Shot,
    owner: Option<(Entity, &dyn DamageSource)>,
    next_stage: Option<Arc<StageSpec>>,
) {
    let projectile = Projectile::initialize(owner, &pattern.payload);
    let layers = active_projectile_layers(projectile.hits);

    let mut entity = commands.entity(e);
    entity.insert((
        projectile,
        motion_for(pattern, shot),
        ProjectileState::Active,
        PooledBy(pool),
        Transform::from_translation(shot.position.extend(2.0))
            .with_rotation(heading_rotation(shot.heading)),
        Visibility::Visible,
        LinearVelocity(Vec2::ZERO),
        layers,
    ));

    match next_stage {
        Some(stage) => entity.insert(SpawnOnDestroy(stage)),
        None => entity.remove::<SpawnOnDestroy>(),
    };
}

/// Owner stats as the damage source a projectile reads at launch.
#[inline]
pub fn owner_source<'a>(
    owner: Option<Entity>,
    q_owners: &'a Query<&ShipStats>,
) -> Option<(Entity, &'a dyn DamageSource)> {
    let o = owner?;
    match q_owners.get(o) {
        Ok(stats) => Some((o, stats as &dyn DamageSource)),
        Err(_) => None,
    }
}

pub fn fire_emitters(
    mut commands: Commands,
    time: Res<Time<Fixed>>,
    mut rng: ResMut<PatternRng>,
    mut q: Query<(
        Entity,
        &Transform,
        &ShotPattern,
        &PatternLayout,
        &EmitterOwner,
        &mut FireTimer,
        &mut ProjectilePool,
        Option<&NextStage>,
    ), (With<Emitter>, Without<PendingDespawn>)>,
    q_owners: Query<&ShipStats>,
    targets: TargetSelector,
    mut lifecycle: MessageWriter<ProjectileLifecycle>,
) {
    let now = time.elapsed_secs();

    for (emitter, tf, pattern, layout, owner, mut timer, mut pool, next) in &mut q {
        if !timer.try_fire(now) {
            continue;
        }

        let pose = EmitterPose {
            position: tf.translation.truncate(),
            heading: heading_of(tf.rotation),
        };
        let shots = lay_out(layout, pose, pattern.bullet_speed, &mut rng.0, |tag, mode, from, rng| {
            targets.select(tag, mode, from, rng)
        });

        let source = owner_source(owner.0, &q_owners);
        if owner.0.is_some() && source.is_none() {
            debug!("emitter {emitter} owner is gone");
        }

        for shot in &shots {
            let e = acquire_projectile(&mut commands, &mut pool, pose.position, pose.heading);
            let next_stage = next.map(|n| n.0.clone());
            launch(&mut commands, e, Some(emitter), pattern, shot, source, next_stage);
            lifecycle.write(ProjectileLifecycle::Activated(e));
        }
    }
}

/// Validate `config` and spawn its emitter at the given pose.
///
/// The emitter stays `Uninitialized` for `Tunables::emitter_startup_delay` so its
/// owner's stats exist by the time it reads them.
pub fn spawn_emitter(
    commands: &mut Commands,
    tunables: &Tunables,
    config: EmitterConfig,
    position: Vec2,
    heading: f32,
) -> Result<Entity, PatternConfigError> {
    config.validate()?;

    let EmitterConfig { pattern, layout, adjuster, next_stage, owner, mount, template } = config;
    let cycle = pattern.cycle;

    let mut entity = commands.spawn((
        Name::new("Emitter"),
        Emitter,
        pattern,
        layout,
        EmitterOwner(owner),
        FireTimer::new(tunables.emitter_startup_delay),
        ProjectilePool::new(template),
        Transform::from_translation(position.extend(1.0)).with_rotation(heading_rotation(heading)),
    ));

    if let Some(cycle) = cycle {
        entity.insert(PauseResumeCycle::new(cycle));
    }
    if let Some(adjuster) = adjuster {
        entity.insert(adjuster);
    }
    if let Some(stage) = next_stage {
        entity.insert(NextStage(Arc::new(stage)));
    }
    if let Some(mount) = mount {
        entity.insert(mount);
    }

    Ok(entity.id())
}

/// Schedule an emitter for removal.
///
/// Its pool is torn down in `PostUpdate` before the emitter itself goes, so
/// projectiles still in flight finish their lives and then despawn.
pub fn retire_emitter(commands: &mut Commands, emitter: Entity) {
    commands.entity(emitter).insert(PendingDespawn);
}
