//! Contact dispatch
//!
//! The external solver reports an undirected "these two bodies are touching"
//! event. Dispatch turns that into two ordered notifications: A learns it
//! touched B, and B learns it touched A, regardless of which order the
//! solver put them in. Bodies with no owning entity (the world boundary
//! edge loop, for one) produce no notifications at all.

use glam::Vec2;

use super::world::{EntityId, World};

/// A begin/end contact event as reported by the solver: two opaque body
/// handles, each optionally resolving to an owning entity
#[derive(Debug, Clone, Copy)]
pub struct Contact {
    pub body_a: Option<EntityId>,
    pub body_b: Option<EntityId>,
}

impl Contact {
    pub fn between(a: EntityId, b: EntityId) -> Self {
        Self {
            body_a: Some(a),
            body_b: Some(b),
        }
    }
}

/// Snapshot of one party to a contact, captured before either callback runs.
/// A callback that removes the other entity mid-dispatch cannot invalidate
/// the second notification: it is delivered against this snapshot.
#[derive(Debug, Clone, Copy)]
pub struct ContactPeer {
    pub id: EntityId,
    /// Category bitmask of the body at the moment of contact
    pub categories: u32,
    pub position: Vec2,
}

fn snapshot(world: &World, id: EntityId) -> Option<ContactPeer> {
    let entity = world.get(id)?;
    Some(ContactPeer {
        id,
        categories: entity.body.as_ref().map_or(0, |b| b.category),
        position: entity.position,
    })
}

/// Resolve both parties up front; a pair with an unowned side fires nothing
fn resolve(world: &World, contact: &Contact) -> Option<(ContactPeer, ContactPeer)> {
    let a = snapshot(world, contact.body_a?)?;
    let b = snapshot(world, contact.body_b?)?;
    Some((a, b))
}

/// Deliver "began contact" to both resolved entities, once each
pub fn dispatch_begin(world: &mut World, contact: &Contact) {
    let Some((a, b)) = resolve(world, contact) else {
        return;
    };

    world.notify_contact_begin(a.id, &b);
    world.notify_contact_begin(b.id, &a);
}

/// Deliver "ended contact" to both resolved entities, once each. Ends that
/// arrive after one party was already removed resolve to nothing and are
/// dropped, matching begin/end cadence per surviving pair.
pub fn dispatch_end(world: &mut World, contact: &Contact) {
    let Some((a, b)) = resolve(world, contact) else {
        return;
    };

    world.notify_contact_end(a.id, &b);
    world.notify_contact_end(b.id, &a);
}
