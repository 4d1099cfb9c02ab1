//! Stage setup and the per-step pipeline.
//!
//! [`Game`] owns the registry and every resource the systems need and runs
//! them in a fixed order:
//!
//! 1. [`update_world_time`]
//! 2. [`movement`] – integrate velocities
//! 3. [`collision_detector`] – fill the collision event store
//! 4. [`player_controller`] – player contacts, ladders, jumping
//! 5. [`blocking_system`] – push other movers out of geometry
//! 6. [`pickup_system`], [`damage_system`], [`ttl_system`]
//! 7. [`clear_collision_events`]
//!
//! Steps 4 to 6 all read the same event snapshot produced in step 3.

use glam::Vec2;
use serde::Serialize;

use crate::components::bounce::Bounce;
use crate::components::collider::Collider;
use crate::components::health::{Damage, Health};
use crate::components::motion::Motion;
use crate::components::pickup::{Effect, Pickup};
use crate::components::transform::Transform;
use crate::components::ttl::Ttl;
use crate::ecs::entity::{Entity, Tag};
use crate::ecs::registry::Registry;
use crate::events::collision::clear_collision_events;
use crate::resources::gameconfig::GameConfig;
use crate::resources::input::{InputSnapshot, InputState};
use crate::resources::player::{PlayerMode, PlayerState};
use crate::resources::worldtime::WorldTime;
use crate::systems::blocking::blocking_system;
use crate::systems::collision::collision_detector;
use crate::systems::damage::damage_system;
use crate::systems::movement::movement;
use crate::systems::pickup::pickup_system;
use crate::systems::player::player_controller;
use crate::systems::time::update_world_time;
use crate::systems::ttl::ttl_system;

const PLAYER_HEALTH: i32 = 3;
const PLAYER_HALF_EXTENT: Vec2 = Vec2::new(6.0, 8.0);
const PROJECTILE_HALF_EXTENT: f32 = 2.0;

pub struct Game {
    pub registry: Registry,
    pub time: WorldTime,
    pub input: InputState,
    pub config: GameConfig,
    pub player: PlayerState,
}

/// Serializable summary of the world after a step.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub frame: u64,
    pub elapsed: f32,
    pub player: Option<PlayerSnapshot>,
    pub stores: Vec<(&'static str, usize)>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerSnapshot {
    pub entity: Entity,
    pub position: Vec2,
    pub velocity: Vec2,
    pub mode: PlayerMode,
    pub jumping: bool,
    pub health: Option<i32>,
}

impl Game {
    pub fn new(config: GameConfig) -> Self {
        Self {
            registry: Registry::new(),
            time: WorldTime::default().with_time_scale(config.time_scale),
            input: InputState::default(),
            player: PlayerState::detached(),
            config,
        }
    }

    /// Advance the simulation by `dt` seconds with `snapshot` held.
    pub fn step(&mut self, dt: f32, snapshot: InputSnapshot) {
        update_world_time(&mut self.time, dt);
        self.input.update(snapshot);
        let delta = self.time.delta;

        movement(&mut self.registry, &self.time);
        collision_detector(&mut self.registry);

        player_controller(
            &mut self.registry,
            &mut self.player,
            &self.input,
            &self.config.player,
            &self.config.physics,
            delta,
        );
        blocking_system(&mut self.registry);
        pickup_system(&mut self.registry, self.player.entity, &mut self.config.player);

        let mut destroyed = damage_system(&mut self.registry, &self.time);
        destroyed.extend(ttl_system(&mut self.registry, &self.time));
        if destroyed.contains(&self.player.entity) {
            log::info!("player destroyed at frame {}", self.time.frame_count);
            self.player = PlayerState::detached();
        }

        clear_collision_events(&mut self.registry);
    }

    /// Advance by the configured fixed step.
    pub fn step_fixed(&mut self, snapshot: InputSnapshot) {
        self.step(self.config.fixed_delta, snapshot);
    }

    /// Tear down the stage. Entity ids keep counting up.
    pub fn clear_stage(&mut self) {
        self.registry.clear_all();
        self.player = PlayerState::detached();
        log::info!("stage cleared");
    }

    fn spawn_body(&mut self, tag: Tag, position: Vec2, collider: Collider) -> Entity {
        let entity = self.registry.create_entity(tag);
        self.registry
            .transforms
            .insert(entity, Transform::new(position.x, position.y));
        self.registry.colliders.insert(entity, collider);
        entity
    }

    /// Spawn the player standing at `position` and take control of it.
    /// Replaces any previous player.
    pub fn spawn_player(&mut self, position: Vec2) -> Entity {
        if !self.player.entity.is_none() {
            self.registry.remove_all_components_of(self.player.entity);
        }
        let entity = self.spawn_body(
            Tag::Player,
            position,
            Collider::new(PLAYER_HALF_EXTENT.x, PLAYER_HALF_EXTENT.y),
        );
        self.registry.motions.insert(
            entity,
            Motion::new()
                .with_acceleration(Vec2::new(0.0, self.config.physics.gravity))
                .with_terminal_velocity(self.config.physics.terminal_velocity),
        );
        self.registry.healths.insert(entity, Health::new(PLAYER_HEALTH));
        self.player = PlayerState::new(entity, self.config.player.coyote_time);
        entity
    }

    /// Solid box centred on `position` with half-size `half_extent`.
    pub fn spawn_platform(&mut self, position: Vec2, half_extent: Vec2) -> Entity {
        self.spawn_body(
            Tag::Blockable,
            position,
            Collider::new(half_extent.x, half_extent.y),
        )
    }

    pub fn spawn_ladder(&mut self, position: Vec2, half_extent: Vec2) -> Entity {
        self.spawn_body(
            Tag::Ladder,
            position,
            Collider::new(half_extent.x, half_extent.y),
        )
    }

    pub fn spawn_pickup(&mut self, position: Vec2, effect: Effect) -> Entity {
        let entity = self.spawn_body(Tag::Item, position, Collider::new(4.0, 4.0));
        self.registry.pickups.insert(entity, Pickup::new(effect));
        entity
    }

    pub fn spawn_enemy(&mut self, position: Vec2, half_extent: Vec2, health: i32) -> Entity {
        let entity = self.spawn_body(
            Tag::Enemy,
            position,
            Collider::new(half_extent.x, half_extent.y),
        );
        self.registry.motions.insert(
            entity,
            Motion::new()
                .with_acceleration(Vec2::new(0.0, self.config.physics.gravity))
                .with_terminal_velocity(self.config.physics.terminal_velocity),
        );
        self.registry.healths.insert(entity, Health::new(health));
        self.registry.damages.insert(entity, Damage::new(1));
        entity
    }

    /// Thrown projectile: flies under gravity, bounces off walls, expires
    /// after `lifetime` seconds.
    pub fn spawn_projectile(&mut self, position: Vec2, velocity: Vec2, lifetime: f32) -> Entity {
        let entity = self.spawn_body(
            Tag::Projectile,
            position,
            Collider::new(PROJECTILE_HALF_EXTENT, PROJECTILE_HALF_EXTENT),
        );
        self.registry.motions.insert(
            entity,
            Motion::new()
                .with_velocity(velocity)
                .with_acceleration(Vec2::new(0.0, self.config.physics.gravity))
                .with_terminal_velocity(self.config.physics.terminal_velocity),
        );
        self.registry.bounces.insert(entity, Bounce::default());
        self.registry.ttls.insert(entity, Ttl::new(lifetime));
        self.registry.damages.insert(entity, Damage::new(1));
        entity
    }

    pub fn snapshot(&self) -> Snapshot {
        let entity = self.player.entity;
        let player = match (
            self.registry.transforms.try_get(entity),
            self.registry.motions.try_get(entity),
        ) {
            (Some(transform), Some(motion)) => Some(PlayerSnapshot {
                entity,
                position: transform.position,
                velocity: motion.velocity,
                mode: self.player.mode(),
                jumping: self.player.jumping,
                health: self.registry.healths.try_get(entity).map(|h| h.current),
            }),
            _ => None,
        };
        Snapshot {
            frame: self.time.frame_count,
            elapsed: self.time.elapsed,
            player,
            stores: self.registry.occupancy(),
        }
    }

    /// A small stage: a floor, a raised ledge, a ladder up to it, and a
    /// pickup on the ledge.
    pub fn setup_demo_stage(&mut self) {
        self.spawn_platform(Vec2::new(160.0, 200.0), Vec2::new(160.0, 8.0));
        self.spawn_platform(Vec2::new(260.0, 120.0), Vec2::new(60.0, 8.0));
        self.spawn_ladder(Vec2::new(190.0, 152.0), Vec2::new(6.0, 40.0));
        self.spawn_pickup(Vec2::new(280.0, 104.0), Effect::JumpBoost(1.2));
        self.spawn_enemy(Vec2::new(60.0, 184.0), Vec2::new(6.0, 8.0), 2);
        self.spawn_player(Vec2::new(100.0, 184.0));
        log::info!("demo stage ready: {:?}", self.registry.occupancy());
    }
}
