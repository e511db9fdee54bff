//! 2D vector algebra and geometry
//!
//! Every quantity the simulation pushes around (positions, velocities,
//! sizes, spawn points) is a 2-component value, and all the math on them
//! funnels through the `Vector2` operations here. Steering, field sizing
//! and the perimeter walk are expressed purely in these primitives, so
//! their correctness reduces to this one small, fully unit-tested layer.

use glam::{Affine2, Vec2};
use serde::{Deserialize, Serialize};

/// A 2-component value type: point, displacement, or size.
///
/// Implementors supply component access and construction; every operation
/// is provided. All provided operations are pure functions of their inputs
/// (the `*_by` forms return a new value, the mutating forms overwrite in
/// place with the same result).
pub trait Vector2: Copy {
    fn x(&self) -> f32;
    fn y(&self) -> f32;
    fn from_xy(x: f32, y: f32) -> Self;

    /// Euclidean length
    #[inline]
    fn magnitude(&self) -> f32 {
        self.x().hypot(self.y())
    }

    /// Unit vector in the same direction.
    ///
    /// Precondition: nonzero magnitude. Callers must guard the zero vector;
    /// here it is a division by zero.
    #[inline]
    fn normalized(&self) -> Self {
        let mag = self.magnitude();
        debug_assert!(mag != 0.0, "normalized() on a zero-magnitude vector");
        Self::from_xy(self.x() / mag, self.y() / mag)
    }

    #[inline]
    fn distance_to(&self, other: Self) -> f32 {
        (other.x() - self.x()).hypot(other.y() - self.y())
    }

    #[inline]
    fn midpoint_to(&self, other: Self) -> Self {
        Self::from_xy(0.5 * (self.x() + other.x()), 0.5 * (self.y() + other.y()))
    }

    /// Signed angle from `self` to `other` in radians, in (-π, π]
    #[inline]
    fn angle_to(&self, other: Self) -> f32 {
        self.cross(other).atan2(self.dot(other))
    }

    /// Linear interpolation; `t = 0` yields `self` exactly
    #[inline]
    fn lerp_to(&self, other: Self, t: f32) -> Self {
        Self::from_xy(
            self.x() + t * (other.x() - self.x()),
            self.y() + t * (other.y() - self.y()),
        )
    }

    #[inline]
    fn translated_by(&self, tx: f32, ty: f32) -> Self {
        Self::from_xy(self.x() + tx, self.y() + ty)
    }

    #[inline]
    fn scaled_by(&self, sx: f32, sy: f32) -> Self {
        Self::from_xy(self.x() * sx, self.y() * sy)
    }

    #[inline]
    fn rotated_by(&self, angle: f32) -> Self {
        self.transformed_by(Affine2::from_angle(angle))
    }

    /// General affine transform (rotation, scale, shear, translation)
    #[inline]
    fn transformed_by(&self, t: Affine2) -> Self {
        let m = t.matrix2;
        Self::from_xy(
            m.x_axis.x * self.x() + m.y_axis.x * self.y() + t.translation.x,
            m.x_axis.y * self.x() + m.y_axis.y * self.y() + t.translation.y,
        )
    }

    #[inline]
    fn normalize(&mut self) {
        *self = self.normalized();
    }

    #[inline]
    fn translate(&mut self, tx: f32, ty: f32) {
        *self = self.translated_by(tx, ty);
    }

    #[inline]
    fn scale(&mut self, sx: f32, sy: f32) {
        *self = self.scaled_by(sx, sy);
    }

    #[inline]
    fn rotate(&mut self, angle: f32) {
        *self = self.rotated_by(angle);
    }

    #[inline]
    fn transform(&mut self, t: Affine2) {
        *self = self.transformed_by(t);
    }

    #[inline]
    fn dot(&self, other: Self) -> f32 {
        self.x() * other.x() + self.y() * other.y()
    }

    /// 2D cross product: the scalar z component of the 3D cross, useful for
    /// signed angles and signed areas
    #[inline]
    fn cross(&self, other: Self) -> f32 {
        self.x() * other.y() - self.y() * other.x()
    }
}

impl Vector2 for Vec2 {
    fn x(&self) -> f32 {
        self.x
    }

    fn y(&self) -> f32 {
        self.y
    }

    fn from_xy(x: f32, y: f32) -> Self {
        Vec2::new(x, y)
    }
}

/// A width/height pair
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Smaller of the two dimensions
    pub fn min_dimension(&self) -> f32 {
        self.width.min(self.height)
    }

    /// Larger of the two dimensions
    pub fn max_dimension(&self) -> f32 {
        self.width.max(self.height)
    }
}

impl Vector2 for Size {
    fn x(&self) -> f32 {
        self.width
    }

    fn y(&self) -> f32 {
        self.height
    }

    fn from_xy(x: f32, y: f32) -> Self {
        Size::new(x, y)
    }
}

/// Axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Size,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Size::new(width, height),
        }
    }

    /// Rectangle with the given size, origin at (0, 0)
    pub fn from_size(size: Size) -> Self {
        Self {
            origin: Vec2::ZERO,
            size,
        }
    }

    pub fn min_x(&self) -> f32 {
        self.origin.x
    }

    pub fn min_y(&self) -> f32 {
        self.origin.y
    }

    pub fn max_x(&self) -> f32 {
        self.origin.x + self.size.width
    }

    pub fn max_y(&self) -> f32 {
        self.origin.y + self.size.height
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(
            self.origin.x + 0.5 * self.size.width,
            self.origin.y + 0.5 * self.size.height,
        )
    }

    /// True when the rectangle encloses zero area
    pub fn is_empty(&self) -> bool {
        self.size.width <= 0.0 || self.size.height <= 0.0
    }

    /// Grow outward by `dx`/`dy` on every side (an outward inset)
    pub fn outset(&self, dx: f32, dy: f32) -> Rect {
        Rect {
            origin: Vec2::new(self.origin.x - dx, self.origin.y - dy),
            size: Size::new(self.size.width + 2.0 * dx, self.size.height + 2.0 * dy),
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min_x()
            && point.x <= self.max_x()
            && point.y >= self.min_y()
            && point.y <= self.max_y()
    }
}
