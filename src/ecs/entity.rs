//! Entity identities.
//!
//! An [`Entity`] is a plain value: a numeric id handed out by the
//! [`Registry`](super::registry::Registry) plus a [`Tag`] fixed at creation
//! time. Game logic uses the tag as a cheap classification ("is the other
//! party a floor?") without touching any store.
//!
//! Ids are monotonic and never reused. Id `0` is reserved for
//! [`Entity::NONE`], the empty reference.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Classification attached to an entity when it is created.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tag {
    #[default]
    Untagged = 0,
    Player = 1,
    /// Solid geometry: floors, walls, platforms.
    Blockable = 2,
    Ladder = 3,
    Enemy = 4,
    Projectile = 5,
    Item = 6,
}

impl Tag {
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    /// Unknown values map to [`Tag::Untagged`].
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => Tag::Player,
            2 => Tag::Blockable,
            3 => Tag::Ladder,
            4 => Tag::Enemy,
            5 => Tag::Projectile,
            6 => Tag::Item,
            _ => Tag::Untagged,
        }
    }
}

/// Stable handle for an entity.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entity {
    id: u32,
    tag: Tag,
}

impl Entity {
    /// The empty reference.
    pub const NONE: Entity = Entity {
        id: 0,
        tag: Tag::Untagged,
    };

    pub(crate) fn new(id: u32, tag: Tag) -> Self {
        debug_assert!(id != 0, "entity id 0 is reserved for Entity::NONE");
        Self { id, tag }
    }

    pub fn id(self) -> u32 {
        self.id
    }

    pub fn tag(self) -> Tag {
        self.tag
    }

    pub fn is_none(self) -> bool {
        self.id == 0
    }

    pub fn is(self, tag: Tag) -> bool {
        self.tag == tag
    }
}

impl Default for Entity {
    fn default() -> Self {
        Self::NONE
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({}:{:?})", self.id, self.tag)
    }
}
