//! Physics-body and gravity-field descriptors
//!
//! The rigid-body solver itself is an external collaborator; the simulation
//! only fills in these descriptors (bitmasks, shapes, material scalars) and
//! reads/nudges the velocity the solver integrates.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{GRAVITY_FALLOFF, field_category};
use crate::vec2::{Rect, Size};

/// A primitive collision shape, positioned in the owning entity's local space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Rectangle { size: Size, center: Vec2 },
    Circle { radius: f32, center: Vec2 },
    /// Hollow boundary following a rectangle's edges; bodies collide with it
    /// from the inside
    EdgeLoop { rect: Rect },
}

/// Descriptor for a solver-owned rigid body.
///
/// `category` names what this body is; `contact_test` names the categories
/// whose touches should be reported back as contact events; `collision`
/// names the categories this body physically bounces against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicsBody {
    pub category: u32,
    pub contact_test: u32,
    pub collision: u32,
    /// Static bodies never move in response to forces or collisions
    pub dynamic: bool,
    pub affected_by_gravity: bool,
    pub velocity: Vec2,
    pub friction: f32,
    pub restitution: f32,
    pub linear_damping: f32,
    /// The body volume is the union of these primitives
    pub shapes: Vec<Shape>,
}

impl PhysicsBody {
    /// Body made of a single primitive shape
    pub fn new(shape: Shape) -> Self {
        Self::compound(vec![shape])
    }

    /// Composite body: the union of several primitive shapes
    pub fn compound(shapes: Vec<Shape>) -> Self {
        Self {
            category: 0,
            contact_test: 0,
            collision: u32::MAX,
            dynamic: true,
            affected_by_gravity: true,
            velocity: Vec2::ZERO,
            friction: 0.2,
            restitution: 0.2,
            linear_damping: 0.1,
            shapes,
        }
    }

    /// Hollow edge-loop body tracing `rect`, used for the world boundary
    pub fn edge_loop(rect: Rect) -> Self {
        let mut body = Self::new(Shape::EdgeLoop { rect });
        body.dynamic = false;
        body
    }

    /// True when any of `categories` bits are set on this body's category
    #[inline]
    pub fn is_category(&self, categories: u32) -> bool {
        self.category & categories != 0
    }
}

/// Descriptor for the solver's radial-gravity field primitive.
///
/// The solver applies an attractive acceleration toward the field origin,
/// scaled by `strength` and decaying with distance by the `falloff`
/// exponent; nothing inside `minimum_radius` feels a stronger pull than the
/// pull at that radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RadialGravityField {
    pub strength: f32,
    pub falloff: f32,
    pub minimum_radius: f32,
    pub category: u32,
}

impl RadialGravityField {
    pub fn black_hole(strength: f32, minimum_radius: f32) -> Self {
        Self {
            strength,
            falloff: GRAVITY_FALLOFF,
            minimum_radius,
            category: field_category::BLACK_HOLE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::category;

    #[test]
    fn test_compound_body_keeps_all_shapes() {
        let body = PhysicsBody::compound(vec![
            Shape::Rectangle {
                size: Size::new(40.0, 20.0),
                center: Vec2::ZERO,
            },
            Shape::Circle {
                radius: 6.0,
                center: Vec2::new(14.0, 0.0),
            },
        ]);
        assert_eq!(body.shapes.len(), 2);
        assert!(body.dynamic);
    }

    #[test]
    fn test_edge_loop_is_static() {
        let body = PhysicsBody::edge_loop(Rect::new(0.0, 0.0, 320.0, 240.0));
        assert!(!body.dynamic);
    }

    #[test]
    fn test_category_test_matches_any_bit() {
        let mut body = PhysicsBody::new(Shape::Circle {
            radius: 1.0,
            center: Vec2::ZERO,
        });
        body.category = category::COIN;

        assert!(body.is_category(category::COIN));
        assert!(body.is_category(category::ALL));
        assert!(!body.is_category(category::PLAYER | category::OBSTACLE));
    }

    #[test]
    fn test_black_hole_field_falloff() {
        let field = RadialGravityField::black_hole(3.0, 25.0);
        assert_eq!(field.falloff, GRAVITY_FALLOFF);
        assert_eq!(field.strength, 3.0);
        assert_eq!(field.minimum_radius, 25.0);
        assert_eq!(field.category, field_category::BLACK_HOLE);
    }
}
