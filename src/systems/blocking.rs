//! Solid-body resolution against blockable geometry.
//!
//! For an entity overlapping one or more `Blockable`-tagged partners this
//! module decides, per contact, which axis to separate along and in which
//! direction, then moves the entity out.
//!
//! # Per-contact rules
//!
//! - The separation axis is the one with the smaller overlap. Ties go to the
//!   vertical axis so a body landing exactly on a corner stands on it.
//! - The direction comes from the box centres: an entity whose centre is
//!   above (or level with) the partner's is pushed up, one below is pushed
//!   down; likewise left/right on the horizontal axis. The y axis points
//!   down, so a push up is a non-positive vertical push.
//! - A vertical push up is a ground contact, a vertical push down a ceiling
//!   contact, a horizontal push a wall contact.
//!
//! # Wedged contacts
//!
//! When two contacts report the same horizontal overlap but different
//! vertical overlaps, and that overlap is narrower than the entity, the
//! entity is pressed into a column of stacked geometry from the side. The
//! contact with the smaller vertical overlap would otherwise read as ground
//! or ceiling, so its classification is revoked and it becomes a
//! [`ContactKind::Corner`]. A corner keeps its vertical push but reports
//! nothing. Partners spanning the entity's full width are real floors and
//! ceilings and are never revoked. With three or more simultaneous contacts
//! the rule is applied pairwise and has not been shown to be complete.
//!
//! # Applying the correction
//!
//! Contacts pushing the same way do not add up: for each axis and direction
//! the largest push wins. A vertical correction larger than
//! [`RESOLVE_EPSILON`] stops vertical motion into the surface. A horizontal
//! correction reflects horizontal velocity for entities with a
//! [`Bounce`](crate::components::bounce::Bounce) component.

use glam::Vec2;
use smallvec::SmallVec;

use crate::components::collider::Aabb;
use crate::ecs::entity::{Entity, Tag};
use crate::ecs::registry::Registry;

/// Corrections at or below this size leave velocity alone.
pub const RESOLVE_EPSILON: f32 = 1e-3;
/// Overlaps closer than this count as equal when looking for wedged contacts.
const SAME_OVERLAP_EPSILON: f32 = 1e-4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    Ground,
    Ceiling,
    Wall,
    /// Ground or ceiling contact revoked at the foot or head of a wall.
    Corner,
}

/// One classified contact between an entity and a blockable partner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub other: Entity,
    pub overlap: Vec2,
    pub axis: Axis,
    /// Signed push along `axis`; zero on the other axis.
    pub push: Vec2,
    pub kind: ContactKind,
    /// Direction away from the partner on each axis (-1 or 1).
    direction: Vec2,
}

/// -1 when `own` is at or before `theirs` on an axis, 1 otherwise.
fn away(own: f32, theirs: f32) -> f32 {
    if own <= theirs { -1.0 } else { 1.0 }
}

impl Contact {
    fn classify(other: Entity, overlap: Vec2, own: &Aabb, theirs: &Aabb) -> Self {
        let own_center = own.center();
        let their_center = theirs.center();
        let direction = Vec2::new(
            away(own_center.x, their_center.x),
            away(own_center.y, their_center.y),
        );
        let mut contact = Self {
            other,
            overlap,
            axis: Axis::Vertical,
            push: Vec2::ZERO,
            kind: ContactKind::Ground,
            direction,
        };
        if overlap.x < overlap.y {
            contact.make_wall();
        } else {
            contact.push = Vec2::new(0.0, direction.y * overlap.y);
            contact.kind = if contact.push.y <= 0.0 {
                ContactKind::Ground
            } else {
                ContactKind::Ceiling
            };
        }
        contact
    }

    fn make_wall(&mut self) {
        self.axis = Axis::Horizontal;
        self.push = Vec2::new(self.direction.x * self.overlap.x, 0.0);
        self.kind = ContactKind::Wall;
    }

    fn revoke(&mut self) {
        self.kind = ContactKind::Corner;
    }
}

pub type Contacts = SmallVec<[Contact; 4]>;

/// Result of resolving one entity for one step.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ContactSummary {
    /// Standing on something while not moving up.
    pub grounded: bool,
    pub ceiling: bool,
    /// Blocked by a wall on the left.
    pub wall_left: bool,
    /// Blocked by a wall on the right.
    pub wall_right: bool,
    /// Position change applied.
    pub correction: Vec2,
    pub contacts: usize,
}

fn world_aabb(registry: &Registry, entity: Entity) -> Option<Aabb> {
    let transform = registry.transforms.try_get(entity)?;
    let collider = registry.colliders.try_get(entity)?;
    Some(collider.aabb(transform))
}

/// Classify this step's events of `entity` against blockable partners.
pub fn collect_contacts(registry: &Registry, entity: Entity) -> Contacts {
    let mut contacts = Contacts::new();
    let Some(own) = world_aabb(registry, entity) else {
        return contacts;
    };
    for event in registry.collision_events.all_of(entity) {
        if !event.other.is(Tag::Blockable) {
            continue;
        }
        let Some(theirs) = world_aabb(registry, event.other) else {
            continue;
        };
        contacts.push(Contact::classify(event.other, event.overlap, &own, &theirs));
    }
    revoke_wedged_contacts(&mut contacts, own.size().x);
    contacts
}

/// Revoke the ground/ceiling classification of the shallower of two
/// contacts sharing a horizontal overlap narrower than `body_width`.
pub fn revoke_wedged_contacts(contacts: &mut [Contact], body_width: f32) {
    for i in 0..contacts.len() {
        for j in (i + 1)..contacts.len() {
            let (a, b) = (contacts[i], contacts[j]);
            let same_x = (a.overlap.x - b.overlap.x).abs() <= SAME_OVERLAP_EPSILON;
            let same_y = (a.overlap.y - b.overlap.y).abs() <= SAME_OVERLAP_EPSILON;
            let partial = a.overlap.x < body_width - SAME_OVERLAP_EPSILON;
            if !same_x || same_y || !partial {
                continue;
            }
            let shallower = if a.overlap.y < b.overlap.y { i } else { j };
            if matches!(
                contacts[shallower].kind,
                ContactKind::Ground | ContactKind::Ceiling
            ) {
                log::trace!(
                    "revoking {:?} contact with {:?}",
                    contacts[shallower].kind,
                    contacts[shallower].other
                );
                contacts[shallower].revoke();
            }
        }
    }
}

/// Combine pushes so contacts pushing the same way do not stack.
fn combine_pushes(contacts: &[Contact]) -> Vec2 {
    let mut most_negative = Vec2::ZERO;
    let mut most_positive = Vec2::ZERO;
    for contact in contacts {
        most_negative = most_negative.min(contact.push);
        most_positive = most_positive.max(contact.push);
    }
    most_negative + most_positive
}

/// Push `entity` out of the blockable geometry it overlaps this step and
/// adjust its velocity. Entities without a [`Motion`] are only classified.
///
/// [`Motion`]: crate::components::motion::Motion
pub fn resolve_entity(registry: &mut Registry, entity: Entity) -> ContactSummary {
    let contacts = collect_contacts(registry, entity);
    if contacts.is_empty() {
        return ContactSummary::default();
    }

    let velocity = registry
        .motions
        .try_get(entity)
        .map(|motion| motion.velocity)
        .unwrap_or(Vec2::ZERO);

    let mut summary = ContactSummary {
        contacts: contacts.len(),
        ..ContactSummary::default()
    };
    for contact in &contacts {
        match contact.kind {
            ContactKind::Ground => summary.grounded |= velocity.y >= 0.0,
            ContactKind::Ceiling => summary.ceiling = true,
            ContactKind::Wall if contact.push.x > 0.0 => summary.wall_left = true,
            ContactKind::Wall => summary.wall_right = true,
            ContactKind::Corner => {}
        }
    }

    let Some(motion) = registry.motions.try_get_mut(entity) else {
        return summary;
    };
    let correction = combine_pushes(&contacts);
    summary.correction = correction;

    if correction.y.abs() > RESOLVE_EPSILON && motion.velocity.y * correction.y < 0.0 {
        motion.velocity.y = 0.0;
    }
    if correction.x.abs() > RESOLVE_EPSILON && motion.velocity.x * correction.x < 0.0 {
        if let Some(bounce) = registry.bounces.try_get(entity) {
            motion.velocity.x = -motion.velocity.x * bounce.damping;
        }
    }

    registry.transforms.get_mut(entity).translate(correction);
    summary
}

/// Resolve every moving entity except the player, who is resolved by the
/// player controller. Blockable entities are static geometry and are never
/// pushed.
pub fn blocking_system(registry: &mut Registry) {
    let mut movers: Vec<Entity> = registry
        .collision_events
        .entities()
        .iter()
        .copied()
        .filter(|entity| !entity.is(Tag::Player) && !entity.is(Tag::Blockable))
        .filter(|&entity| registry.motions.has(entity))
        .collect();
    movers.sort_by_key(|entity| entity.id());
    movers.dedup();

    for entity in movers {
        resolve_entity(registry, entity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::bounce::Bounce;
    use crate::components::collider::Collider;
    use crate::components::motion::Motion;
    use crate::components::transform::Transform;
    use crate::systems::collision::collision_detector;

    const EPSILON: f32 = 1e-5;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn spawn_block(registry: &mut Registry, x: f32, y: f32, hw: f32, hh: f32) -> Entity {
        let entity = registry.create_entity(Tag::Blockable);
        registry.transforms.insert(entity, Transform::new(x, y));
        registry.colliders.insert(entity, Collider::new(hw, hh));
        entity
    }

    fn spawn_mover(registry: &mut Registry, x: f32, y: f32, velocity: Vec2) -> Entity {
        let entity = registry.create_entity(Tag::Enemy);
        registry.transforms.insert(entity, Transform::new(x, y));
        registry.colliders.insert(entity, Collider::new(1.0, 1.0));
        registry
            .motions
            .insert(entity, Motion::new().with_velocity(velocity));
        entity
    }

    fn rect(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Aabb {
        Aabb {
            min: Vec2::new(min_x, min_y),
            max: Vec2::new(max_x, max_y),
        }
    }

    fn classify(own: &Aabb, other: &Aabb) -> Contact {
        Contact::classify(Entity::NONE, own.overlap(other), own, other)
    }

    fn count_kind(contacts: &[Contact], kind: ContactKind) -> usize {
        contacts.iter().filter(|c| c.kind == kind).count()
    }

    #[test]
    fn test_smaller_overlap_axis_is_chosen() {
        let own = rect(0.0, 0.0, 2.0, 2.0);
        let contact = classify(&own, &rect(-10.0, 1.5, 10.0, 5.0));
        assert_eq!(contact.axis, Axis::Vertical);
        assert_eq!(contact.kind, ContactKind::Ground);
        assert!(approx_eq(contact.push.y, -0.5));

        let contact = classify(&own, &rect(1.8, -10.0, 5.0, 10.0));
        assert_eq!(contact.axis, Axis::Horizontal);
        assert_eq!(contact.kind, ContactKind::Wall);
        assert!(approx_eq(contact.push.x, -0.2));
    }

    #[test]
    fn test_equal_overlap_prefers_vertical() {
        let own = rect(0.0, 0.0, 2.0, 2.0);
        let contact = classify(&own, &rect(1.0, 1.0, 3.0, 3.0));
        assert_eq!(contact.axis, Axis::Vertical);
    }

    #[test]
    fn test_below_partner_is_ceiling() {
        let own = rect(0.0, 4.0, 2.0, 6.0);
        let contact = classify(&own, &rect(-10.0, 0.0, 10.0, 4.5));
        assert_eq!(contact.kind, ContactKind::Ceiling);
        assert!(approx_eq(contact.push.y, 0.5));
    }

    #[test]
    fn test_wedged_shallow_contact_loses_ground() {
        // Pressed against a column of two stacked tiles from the left: the
        // lower tile only grazes the feet.
        let own = rect(0.0, 0.0, 2.0, 4.0);
        let mut contacts = [
            classify(&own, &rect(1.5, -1.0, 3.5, 3.8)),
            classify(&own, &rect(1.5, 3.8, 3.5, 8.0)),
        ];
        assert_eq!(contacts[1].kind, ContactKind::Ground);
        revoke_wedged_contacts(&mut contacts, own.size().x);

        assert_eq!(contacts[0].kind, ContactKind::Wall);
        assert_eq!(contacts[1].kind, ContactKind::Corner);
        // The corner keeps its vertical push and adds nothing sideways.
        assert_eq!(contacts[1].push.x, 0.0);
        assert!(approx_eq(contacts[1].push.y, -0.2));
        let correction = combine_pushes(&contacts);
        assert!(approx_eq(correction.x, -0.5));
        assert!(approx_eq(correction.y, -0.2));
    }

    #[test]
    fn test_full_width_contacts_are_never_revoked() {
        // Floor and ceiling both span the body, with different depths.
        let own = rect(0.0, 0.0, 2.0, 2.0);
        let mut contacts = [
            classify(&own, &rect(-10.0, 1.9, 10.0, 4.0)),
            classify(&own, &rect(-10.0, -2.0, 10.0, 0.3)),
        ];
        revoke_wedged_contacts(&mut contacts, own.size().x);
        assert_eq!(contacts[0].kind, ContactKind::Ground);
        assert_eq!(contacts[1].kind, ContactKind::Ceiling);
        assert_eq!(combine_pushes(&contacts).x, 0.0);
    }

    #[test]
    fn test_same_overlap_on_both_axes_is_kept() {
        // Standing across the seam of two floor tiles.
        let own = rect(0.0, 0.0, 2.0, 2.0);
        let mut contacts = [
            classify(&own, &rect(-1.0, 1.8, 1.0, 4.0)),
            classify(&own, &rect(1.0, 1.8, 3.0, 4.0)),
        ];
        revoke_wedged_contacts(&mut contacts, own.size().x);
        assert!(contacts.iter().all(|c| c.kind == ContactKind::Ground));
        assert!(approx_eq(combine_pushes(&contacts).y, -0.2));
    }

    #[test]
    fn test_squeezed_between_floor_and_ceiling_stays_in_column() {
        let mut registry = Registry::new();
        spawn_block(&mut registry, 0.0, 10.0, 50.0, 1.0);
        spawn_block(&mut registry, 0.0, 6.25, 50.0, 1.0);
        let mover = spawn_mover(&mut registry, 0.0, 8.0625, Vec2::ZERO);

        for _ in 0..4 {
            registry.collision_events.clear();
            collision_detector(&mut registry);
            let contacts = collect_contacts(&registry, mover);
            assert_eq!(count_kind(&contacts, ContactKind::Ground), 1);
            assert_eq!(count_kind(&contacts, ContactKind::Ceiling), 1);

            let summary = resolve_entity(&mut registry, mover);
            assert!(summary.grounded);
            assert!(summary.ceiling);
            assert!(!summary.wall_left && !summary.wall_right);
            assert_eq!(summary.correction.x, 0.0);

            let position = registry.transforms.get(mover).position;
            assert_eq!(position.x, 0.0);
            assert!(position.y > 8.0 && position.y < 8.25);
        }
    }

    #[test]
    fn test_floor_and_wall_column_resolve_in_one_pass() {
        // Standing on a floor, pressed into a two-tile column on the right.
        // The lower column tile shares the upper tile's horizontal overlap.
        let mut registry = Registry::new();
        spawn_block(&mut registry, 0.0, 10.0, 50.0, 1.0);
        spawn_block(&mut registry, 1.75, 8.0, 1.0, 1.0);
        spawn_block(&mut registry, 1.75, 10.0, 1.0, 1.0);
        let mover = spawn_mover(&mut registry, 0.0, 8.0625, Vec2::ZERO);

        collision_detector(&mut registry);
        let contacts = collect_contacts(&registry, mover);
        assert_eq!(contacts.len(), 3);
        assert_eq!(count_kind(&contacts, ContactKind::Ground), 1);
        assert_eq!(count_kind(&contacts, ContactKind::Wall), 1);
        assert_eq!(count_kind(&contacts, ContactKind::Corner), 1);

        let summary = resolve_entity(&mut registry, mover);
        assert!(summary.grounded);
        assert!(summary.wall_right);
        assert!(!summary.ceiling);
        assert_eq!(summary.correction, Vec2::new(-0.25, -0.0625));
        let settled = registry.transforms.get(mover).position;
        assert_eq!(settled, Vec2::new(-0.25, 8.0));

        registry.collision_events.clear();
        collision_detector(&mut registry);
        let summary = resolve_entity(&mut registry, mover);
        assert_eq!(summary.contacts, 0);
        assert_eq!(registry.transforms.get(mover).position, settled);
    }

    #[test]
    fn test_resolve_pushes_out_and_stops_fall() {
        let mut registry = Registry::new();
        spawn_block(&mut registry, 0.0, 10.0, 20.0, 1.0);
        let mover = spawn_mover(&mut registry, 0.0, 8.5, Vec2::new(3.0, 50.0));

        collision_detector(&mut registry);
        let summary = resolve_entity(&mut registry, mover);

        assert!(summary.grounded);
        assert!(approx_eq(summary.correction.y, -0.5));
        assert!(approx_eq(registry.transforms.get(mover).position.y, 8.0));
        let motion = registry.motions.get(mover);
        assert_eq!(motion.velocity.y, 0.0);
        assert_eq!(motion.velocity.x, 3.0);
    }

    #[test]
    fn test_resolution_converges_and_is_idempotent() {
        let mut registry = Registry::new();
        spawn_block(&mut registry, 0.0, 10.0, 20.0, 1.0);
        let mover = spawn_mover(&mut registry, 0.0, 8.5, Vec2::new(0.0, 10.0));

        collision_detector(&mut registry);
        blocking_system(&mut registry);
        registry.collision_events.clear();
        let settled = registry.transforms.get(mover).position;

        assert_eq!(collision_detector(&mut registry), 0);
        blocking_system(&mut registry);
        assert_eq!(registry.transforms.get(mover).position, settled);
    }

    #[test]
    fn test_bounce_reflects_horizontal_velocity() {
        let mut registry = Registry::new();
        spawn_block(&mut registry, 5.0, 0.0, 1.0, 20.0);
        let mover = spawn_mover(&mut registry, 3.5, 0.0, Vec2::new(40.0, 0.0));
        registry.bounces.insert(mover, Bounce::new(0.5));

        collision_detector(&mut registry);
        let summary = resolve_entity(&mut registry, mover);

        assert!(summary.wall_right);
        assert!(approx_eq(registry.transforms.get(mover).position.x, 3.0));
        assert!(approx_eq(registry.motions.get(mover).velocity.x, -20.0));
    }

    #[test]
    fn test_wall_without_bounce_keeps_velocity() {
        let mut registry = Registry::new();
        spawn_block(&mut registry, 5.0, 0.0, 1.0, 20.0);
        let mover = spawn_mover(&mut registry, 3.5, 0.0, Vec2::new(40.0, 0.0));

        collision_detector(&mut registry);
        resolve_entity(&mut registry, mover);
        assert!(approx_eq(registry.motions.get(mover).velocity.x, 40.0));
    }

    #[test]
    fn test_non_blockable_partners_are_ignored() {
        let mut registry = Registry::new();
        let a = spawn_mover(&mut registry, 0.0, 0.0, Vec2::ZERO);
        spawn_mover(&mut registry, 1.0, 0.0, Vec2::ZERO);
        collision_detector(&mut registry);
        let summary = resolve_entity(&mut registry, a);
        assert_eq!(summary, ContactSummary::default());
        assert_eq!(registry.transforms.get(a).position, Vec2::ZERO);
    }

    #[test]
    fn test_zero_extent_contact_is_a_no_op() {
        let mut registry = Registry::new();
        let block = registry.create_entity(Tag::Blockable);
        registry.transforms.insert(block, Transform::new(0.0, 0.0));
        registry.colliders.insert(block, Collider::new(1.0, 1.0));
        let dot = registry.create_entity(Tag::Enemy);
        registry.transforms.insert(dot, Transform::new(0.0, 0.0));
        registry.colliders.insert(dot, Collider::new(0.0, 0.0));
        registry.motions.insert(dot, Motion::new());

        // A zero-size box never strictly overlaps, so inject the event the
        // way a touching pair would look.
        registry.collision_events.insert_duplicate(
            dot,
            crate::events::collision::CollisionEvent::new(Vec2::ZERO, block),
        );
        let summary = resolve_entity(&mut registry, dot);
        assert_eq!(summary.correction, Vec2::ZERO);
        assert_eq!(registry.transforms.get(dot).position, Vec2::ZERO);
    }
}
