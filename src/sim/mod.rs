//! Entity simulation and contact dispatch
//!
//! All gameplay logic lives here, independent of rendering, audio playback,
//! and the rigid-body solver:
//! - The world owns the entities; the solver owns motion
//! - Contact events flow in from the solver, velocity nudges and body/field
//!   descriptors flow back out
//! - Single-threaded, wall-clock ticked by the host's frame loop

pub mod body;
pub mod contact;
pub mod spawn;
pub mod tick;
pub mod world;

pub use body::{PhysicsBody, RadialGravityField, Shape};
pub use contact::{Contact, ContactPeer, dispatch_begin, dispatch_end};
pub use spawn::{CoinSpawner, walk_edges};
pub use tick::{GamePhase, GameState};
pub use world::{BlackHole, Coin, Entity, EntityId, EntityKind, GameEvent, Player, World};
