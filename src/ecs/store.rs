//! Densely packed component storage.
//!
//! [`ComponentStore`] keeps values of one component type in a contiguous
//! `Vec`, alongside a parallel `Vec` of owning entities and an
//! `FxHashMap` from entity to slot. Removal swaps the last slot into the hole
//! so the arrays stay packed; iteration order is therefore not stable across
//! removals.
//!
//! A missing component is a programming error: [`ComponentStore::get`] and
//! [`ComponentStore::insert`] panic instead of returning `Option`/`Result`.
//! Use [`ComponentStore::has`] or [`ComponentStore::try_get`] when absence is
//! a legitimate answer.
//!
//! Stores that accept several values per entity (collision events) use
//! [`ComponentStore::insert_duplicate`]. For those, the lookup map points at
//! the most recent value and [`ComponentStore::remove`] drops one value at a
//! time.

use std::any::type_name;

use rustc_hash::FxHashMap;

use super::entity::Entity;

/// Type-erased view of a store, used by the registry for whole-entity and
/// whole-registry operations.
pub trait AnyStore {
    fn name(&self) -> &'static str;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    fn contains(&self, entity: Entity) -> bool;
    /// Remove every value owned by `entity`. Returns how many were removed.
    fn remove_all_of(&mut self, entity: Entity) -> usize;
    fn clear(&mut self);
}

#[derive(Debug, Clone)]
pub struct ComponentStore<T> {
    name: &'static str,
    values: Vec<T>,
    owners: Vec<Entity>,
    lookup: FxHashMap<Entity, usize>,
    has_duplicates: bool,
}

impl<T> Default for ComponentStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ComponentStore<T> {
    pub fn new() -> Self {
        Self::named(short_type_name::<T>())
    }

    /// Create a store with an explicit name for logs and introspection.
    pub fn named(name: &'static str) -> Self {
        Self {
            name,
            values: Vec::new(),
            owners: Vec::new(),
            lookup: FxHashMap::default(),
            has_duplicates: false,
        }
    }

    /// Attach `value` to `entity`.
    ///
    /// # Panics
    /// If `entity` already holds a value in this store.
    pub fn insert(&mut self, entity: Entity, value: T) {
        if self.lookup.contains_key(&entity) {
            panic!(
                "{} store: entity {:?} already has a component",
                self.name, entity
            );
        }
        self.push(entity, value);
    }

    /// Attach `value` to `entity` even if it already holds one.
    pub fn insert_duplicate(&mut self, entity: Entity, value: T) {
        if self.lookup.contains_key(&entity) {
            self.has_duplicates = true;
        }
        self.push(entity, value);
    }

    fn push(&mut self, entity: Entity, value: T) {
        let index = self.values.len();
        self.values.push(value);
        self.owners.push(entity);
        self.lookup.insert(entity, index);
    }

    pub fn has(&self, entity: Entity) -> bool {
        self.lookup.contains_key(&entity)
    }

    /// # Panics
    /// If `entity` has no value in this store.
    pub fn get(&self, entity: Entity) -> &T {
        match self.lookup.get(&entity) {
            Some(&index) => &self.values[index],
            None => self.missing(entity),
        }
    }

    /// # Panics
    /// If `entity` has no value in this store.
    pub fn get_mut(&mut self, entity: Entity) -> &mut T {
        match self.lookup.get(&entity) {
            Some(&index) => &mut self.values[index],
            None => self.missing(entity),
        }
    }

    pub fn try_get(&self, entity: Entity) -> Option<&T> {
        self.lookup.get(&entity).map(|&index| &self.values[index])
    }

    pub fn try_get_mut(&mut self, entity: Entity) -> Option<&mut T> {
        match self.lookup.get(&entity) {
            Some(&index) => Some(&mut self.values[index]),
            None => None,
        }
    }

    fn missing(&self, entity: Entity) -> ! {
        panic!("{} store: entity {:?} has no component", self.name, entity)
    }

    /// Remove one value owned by `entity` (the most recent one for duplicate
    /// stores). The last slot is moved into the hole.
    pub fn remove(&mut self, entity: Entity) -> Option<T> {
        let index = self.lookup.remove(&entity)?;
        let last = self.values.len() - 1;
        let removed = self.values.swap_remove(index);
        self.owners.swap_remove(index);

        if index != last {
            let moved = self.owners[index];
            if self.lookup.get(&moved) == Some(&last) {
                self.lookup.insert(moved, index);
            }
        }

        if self.has_duplicates {
            if let Some(other) = self.owners.iter().rposition(|&owner| owner == entity) {
                self.lookup.insert(entity, other);
            }
        }

        Some(removed)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn clear(&mut self) {
        self.values.clear();
        self.owners.clear();
        self.lookup.clear();
        self.has_duplicates = false;
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Owning entities in storage order. May repeat for duplicate stores.
    pub fn entities(&self) -> &[Entity] {
        &self.owners
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = (Entity, &T)> {
        self.owners.iter().copied().zip(self.values.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Entity, &mut T)> {
        self.owners.iter().copied().zip(self.values.iter_mut())
    }

    /// Every value owned by `entity`, in storage order.
    pub fn all_of(&self, entity: Entity) -> impl Iterator<Item = &T> {
        self.iter()
            .filter(move |(owner, _)| *owner == entity)
            .map(|(_, value)| value)
    }
}

impl<T> AnyStore for ComponentStore<T> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn len(&self) -> usize {
        self.values.len()
    }

    fn contains(&self, entity: Entity) -> bool {
        self.has(entity)
    }

    fn remove_all_of(&mut self, entity: Entity) -> usize {
        let mut removed = 0;
        while self.remove(entity).is_some() {
            removed += 1;
        }
        removed
    }

    fn clear(&mut self) {
        ComponentStore::clear(self);
    }
}

fn short_type_name<T>() -> &'static str {
    let full = type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}
