//! Entity world
//!
//! All live simulation objects for one game session: the player ship, black
//! holes, and coins, held in one id-indexed arena. Removal from the world is
//! the single terminal lifecycle event; a removed id never comes back.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{PhysicsBody, RadialGravityField, Shape};
use super::contact::ContactPeer;
use crate::consts::*;
use crate::vec2::{Size, Vector2};

pub type EntityId = u32;

/// Events the presentation layer consumes (score display, scene transition)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    CoinCollected { score: u32 },
    /// An entity finished the black-hole consume sequence and left the world
    Consumed { id: EntityId },
    /// Scene-transition request carrying the next scene's size and the
    /// final score
    GameOver { score: u32, size: Size },
}

/// Player ship state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Forward thrust magnitude per second; zero while not steering
    pub movement_speed: f32,
    pub score: u32,
    /// Point the ship's facing angle tracks while steering. The continuous
    /// reorientation itself is the external constraint primitive's job; the
    /// sim only maintains the target.
    pub orientation_target: Option<Vec2>,
    /// Sprite footprint the composite physics body is derived from
    pub ship_size: Size,
}

/// Black hole state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlackHole {
    pub radius: f32,
    pub attraction: f32,
    pub field: RadialGravityField,
}

/// Coin state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub radius: f32,
}

/// Entity variants. Contact reactions are dispatched per-variant in
/// `World::notify_contact_begin`; variants without a reaction are no-ops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EntityKind {
    Player(Player),
    BlackHole(BlackHole),
    Coin(Coin),
}

/// Scripted shrink-and-drag sequence run on whatever a black hole captures.
/// While it runs the entity has no physics body, so the solver no longer
/// moves it; the sequence owns position and scale until removal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConsumeAction {
    target: Vec2,
    start_position: Vec2,
    start_scale: f32,
    elapsed: f32,
}

impl ConsumeAction {
    fn new(target: Vec2, start_position: Vec2, start_scale: f32) -> Self {
        Self {
            target,
            start_position,
            start_scale,
            elapsed: 0.0,
        }
    }

    /// Advance the sequence, writing the entity's position and scale.
    /// Returns true once the full duration has elapsed.
    fn advance(&mut self, dt: f32, position: &mut Vec2, scale: &mut f32) -> bool {
        self.elapsed += dt;

        let shrink_t = (self.elapsed / CONSUME_SHRINK_SECS).min(1.0);
        *scale = self.start_scale * (1.0 - shrink_t);

        let move_t = (self.elapsed / CONSUME_MOVE_SECS).min(1.0);
        *position = self.start_position.lerp_to(self.target, move_t);

        self.elapsed >= CONSUME_MOVE_SECS
    }
}

/// A simulation object owned by the world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub position: Vec2,
    /// Facing angle in radians
    pub rotation: f32,
    pub scale: f32,
    /// Absent while the entity has no physics footprint (black hole with
    /// radius 0, or anything mid-consume)
    pub body: Option<PhysicsBody>,
    pub action: Option<ConsumeAction>,
    pub kind: EntityKind,
}

impl Entity {
    fn new(position: Vec2, body: Option<PhysicsBody>, kind: EntityKind) -> Self {
        Self {
            id: 0,
            position,
            rotation: 0.0,
            scale: 1.0,
            body,
            action: None,
            kind,
        }
    }

    /// Player ship at `position`, with the composite chassis+cockpit body
    pub fn player(position: Vec2, ship_size: Size) -> Self {
        Self::new(
            position,
            Some(player_body(ship_size)),
            EntityKind::Player(Player {
                movement_speed: 0.0,
                score: 0,
                orientation_target: None,
                ship_size,
            }),
        )
    }

    /// Black hole at `position`. With radius 0 it has no footprint and no
    /// contact is possible until it is resized.
    pub fn black_hole(position: Vec2, radius: f32, attraction: f32) -> Self {
        Self::new(
            position,
            black_hole_body(radius),
            EntityKind::BlackHole(BlackHole {
                radius,
                attraction,
                field: RadialGravityField::black_hole(attraction, radius),
            }),
        )
    }

    /// Coin at `position`
    pub fn coin(position: Vec2, radius: f32) -> Self {
        Self::new(
            position,
            Some(coin_body(radius)),
            EntityKind::Coin(Coin { radius }),
        )
    }

    pub fn player_state(&self) -> Option<&Player> {
        match &self.kind {
            EntityKind::Player(player) => Some(player),
            _ => None,
        }
    }

    pub fn black_hole_state(&self) -> Option<&BlackHole> {
        match &self.kind {
            EntityKind::BlackHole(hole) => Some(hole),
            _ => None,
        }
    }

    /// Resize a black hole. The visible disc, the contact body, and the
    /// field's minimum radius all change together; radius 0 drops the
    /// footprint entirely.
    pub fn set_black_hole_radius(&mut self, radius: f32) {
        if let EntityKind::BlackHole(hole) = &mut self.kind {
            hole.radius = radius;
            hole.field.minimum_radius = radius;
            self.body = black_hole_body(radius);
        }
    }

    /// Change a black hole's pull, keeping the field descriptor in sync
    pub fn set_black_hole_attraction(&mut self, attraction: f32) {
        if let EntityKind::BlackHole(hole) = &mut self.kind {
            hole.attraction = attraction;
            hole.field.strength = attraction;
        }
    }

    /// Enable or disable steering on a player: a target point enables
    /// orientation tracking and thrust at `speed`, `None` zeroes both
    pub fn set_steering(&mut self, target: Option<Vec2>, speed: f32) {
        if let EntityKind::Player(player) = &mut self.kind {
            player.movement_speed = if target.is_some() { speed } else { 0.0 };
            player.orientation_target = target;
        }
    }

    /// Per-tick movement integration for a player ship: nudge the solver's
    /// velocity by `movement_speed * dt` along the current facing angle.
    /// Position integration stays with the solver. A ship that lost its body
    /// gets a fresh one instead of a nudge.
    pub fn integrate_movement(&mut self, dt: f32) {
        let EntityKind::Player(player) = &self.kind else {
            return;
        };

        match &mut self.body {
            Some(body) => {
                let thrust = Vec2::new(player.movement_speed * dt, 0.0).rotated_by(self.rotation);
                body.velocity += thrust;
            }
            None => self.body = Some(player_body(player.ship_size)),
        }
    }
}

/// Composite ship body: a rectangular chassis covering most of the hull plus
/// a circular cockpit, unioned
fn player_body(ship_size: Size) -> PhysicsBody {
    let chassis = Shape::Rectangle {
        size: ship_size.scaled_by(0.4, 0.4),
        center: Vec2::ZERO,
    };
    let cockpit_radius = 0.12 * ship_size.height;
    let cockpit = Shape::Circle {
        radius: cockpit_radius,
        center: Vec2::new(0.2 * ship_size.width + cockpit_radius, 0.0),
    };

    let mut body = PhysicsBody::compound(vec![chassis, cockpit]);
    body.category = category::PLAYER;
    body.contact_test = category::COIN;
    body.collision = category::WORLD | category::OBSTACLE;
    body.affected_by_gravity = false;
    body.linear_damping = 0.4;
    body.restitution = 0.0;
    body
}

fn black_hole_body(radius: f32) -> Option<PhysicsBody> {
    if radius <= 0.0 {
        return None;
    }

    // Objects may overlap the disc a bit before actually coming in contact
    let mut body = PhysicsBody::new(Shape::Circle {
        radius: CAPTURE_RADIUS_FACTOR * radius,
        center: Vec2::ZERO,
    });
    body.category = category::OBSTACLE;
    body.contact_test = category::ALL;
    body.dynamic = false;
    body.friction = 1.0;
    body.restitution = 0.0;
    Some(body)
}

fn coin_body(radius: f32) -> PhysicsBody {
    let mut body = PhysicsBody::new(Shape::Circle {
        radius,
        center: Vec2::ZERO,
    });
    body.category = category::COIN;
    body.collision = category::OBSTACLE;
    body.dynamic = false;
    body.affected_by_gravity = false;
    body.restitution = 0.0;
    body
}

/// Container owning every live entity for one session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct World {
    entities: Vec<Entity>,
    next_id: EntityId,
    /// Pending events for the presentation layer, drained by the host
    pub events: Vec<GameEvent>,
}

impl World {
    pub fn new() -> Self {
        Self {
            entities: Vec::new(),
            next_id: 1,
            events: Vec::new(),
        }
    }

    /// Take ownership of an entity, assigning its id
    pub fn insert(&mut self, mut entity: Entity) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        entity.id = id;
        self.entities.push(entity);
        id
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.iter().any(|e| e.id == id)
    }

    /// Remove an entity. Idempotent: removing an absent id is a no-op.
    /// Returns whether anything was removed.
    pub fn remove(&mut self, id: EntityId) -> bool {
        let before = self.entities.len();
        self.entities.retain(|e| e.id != id);
        self.entities.len() != before
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Entity> {
        self.entities.iter_mut()
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Deliver a begin-contact notification to `target`, reacting per its
    /// variant. `other` is a snapshot taken before any callback ran, so the
    /// reaction here never observes the other party half-removed.
    pub fn notify_contact_begin(&mut self, target: EntityId, other: &ContactPeer) {
        let Some(entity) = self.get_mut(target) else {
            return;
        };

        match &mut entity.kind {
            EntityKind::Player(player) => {
                // The player gains score by collecting coins
                if other.categories & category::COIN != 0 {
                    player.score += 1;
                    let score = player.score;
                    self.remove(other.id);
                    self.events.push(GameEvent::CoinCollected { score });
                }
            }
            EntityKind::BlackHole(_) => {
                let center = entity.position;
                self.consume(other.id, center);
            }
            EntityKind::Coin(_) => {}
        }
    }

    /// Deliver an end-contact notification to `target`. No variant currently
    /// reacts; stale end events (for pairs already torn down) land here too
    /// and must stay harmless.
    pub fn notify_contact_end(&mut self, target: EntityId, other: &ContactPeer) {
        let _ = (target, other);
    }

    /// Start the consume sequence on `id`: detach it from physics control
    /// entirely, then shrink-and-drag it toward `center` until removal
    fn consume(&mut self, id: EntityId, center: Vec2) {
        let Some(entity) = self.get_mut(id) else {
            return;
        };

        // No more physics will occur; the consume action manages the entity
        // until it is removed
        entity.body = None;

        // A second hole touching mid-consume doesn't restart the sequence
        if entity.action.is_none() {
            entity.action = Some(ConsumeAction::new(center, entity.position, entity.scale));
            log::debug!("entity {} captured, consume sequence started", id);
        }
    }

    /// Advance all running consume sequences, removing entities whose
    /// sequence completed
    pub fn advance_actions(&mut self, dt: f32) {
        let mut finished = Vec::new();

        for entity in &mut self.entities {
            if let Some(action) = &mut entity.action {
                if action.advance(dt, &mut entity.position, &mut entity.scale) {
                    finished.push(entity.id);
                }
            }
        }

        for id in finished {
            self.remove(id);
            self.events.push(GameEvent::Consumed { id });
        }
    }
}
