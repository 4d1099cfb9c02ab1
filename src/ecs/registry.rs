//! The registry: one [`ComponentStore`] per component kind.
//!
//! The registry is an explicit context object. The game creates one and
//! passes it by `&mut` into every system, so there is exactly one writer at a
//! time and no hidden global state.
//!
//! Stores are public fields so systems can borrow two of them at once
//! (`&mut registry.transforms` next to `&registry.colliders`). Cross-cutting
//! operations go through [`Registry::stores_mut`], which views every store as
//! a [`AnyStore`] trait object.

use crate::components::bounce::Bounce;
use crate::components::collider::Collider;
use crate::components::health::{Damage, Health};
use crate::components::motion::Motion;
use crate::components::pickup::Pickup;
use crate::components::transform::Transform;
use crate::components::ttl::Ttl;
use crate::events::collision::CollisionEvent;

use super::entity::{Entity, Tag};
use super::store::{AnyStore, ComponentStore};

pub struct Registry {
    next_id: u32,
    pub transforms: ComponentStore<Transform>,
    pub motions: ComponentStore<Motion>,
    pub colliders: ComponentStore<Collider>,
    /// Several events per entity; emptied at the end of every step.
    pub collision_events: ComponentStore<CollisionEvent>,
    pub bounces: ComponentStore<Bounce>,
    pub ttls: ComponentStore<Ttl>,
    pub healths: ComponentStore<Health>,
    pub damages: ComponentStore<Damage>,
    pub pickups: ComponentStore<Pickup>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub fn new() -> Self {
        Self {
            next_id: 1,
            transforms: ComponentStore::new(),
            motions: ComponentStore::new(),
            colliders: ComponentStore::new(),
            collision_events: ComponentStore::new(),
            bounces: ComponentStore::new(),
            ttls: ComponentStore::new(),
            healths: ComponentStore::new(),
            damages: ComponentStore::new(),
            pickups: ComponentStore::new(),
        }
    }

    /// Issue a fresh identity. Ids start at 1 and are never reused, even
    /// across [`Registry::clear_all`].
    pub fn create_entity(&mut self, tag: Tag) -> Entity {
        let id = self.next_id;
        self.next_id = self
            .next_id
            .checked_add(1)
            .unwrap_or_else(|| panic!("entity ids exhausted"));
        let entity = Entity::new(id, tag);
        log::debug!("created {:?}", entity);
        entity
    }

    fn stores(&self) -> [&dyn AnyStore; 9] {
        [
            &self.transforms,
            &self.motions,
            &self.colliders,
            &self.collision_events,
            &self.bounces,
            &self.ttls,
            &self.healths,
            &self.damages,
            &self.pickups,
        ]
    }

    pub fn stores_mut(&mut self) -> [&mut dyn AnyStore; 9] {
        [
            &mut self.transforms,
            &mut self.motions,
            &mut self.colliders,
            &mut self.collision_events,
            &mut self.bounces,
            &mut self.ttls,
            &mut self.healths,
            &mut self.damages,
            &mut self.pickups,
        ]
    }

    /// Remove `entity` from every store it appears in. Used when an entity is
    /// destroyed (death, pickup consumed, projectile expired). Returns the
    /// number of values removed.
    pub fn remove_all_components_of(&mut self, entity: Entity) -> usize {
        let removed: usize = self
            .stores_mut()
            .into_iter()
            .map(|store| store.remove_all_of(entity))
            .sum();
        log::debug!("destroyed {:?} ({} components)", entity, removed);
        removed
    }

    /// Empty every store. Used on stage teardown.
    pub fn clear_all(&mut self) {
        for store in self.stores_mut() {
            store.clear();
        }
        log::debug!("registry cleared");
    }

    /// `(store name, number of values)` for every store.
    pub fn occupancy(&self) -> Vec<(&'static str, usize)> {
        self.stores()
            .into_iter()
            .map(|store| (store.name(), store.len()))
            .collect()
    }

    /// Number of stores holding at least one value for `entity`.
    pub fn len_of(&self, entity: Entity) -> usize {
        self.stores()
            .into_iter()
            .filter(|store| store.contains(entity))
            .count()
    }

    /// True when no store holds anything.
    pub fn is_empty(&self) -> bool {
        self.stores().into_iter().all(|store| store.is_empty())
    }

    /// Entities that can take part in collision detection.
    pub fn physical_entities(&self) -> Vec<Entity> {
        self.colliders
            .entities()
            .iter()
            .copied()
            .filter(|&entity| self.transforms.has(entity))
            .collect()
    }
}
