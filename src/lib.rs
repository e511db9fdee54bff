//! Voidfall - a gravity-well dodging arcade game
//!
//! Core modules:
//! - `vec2`: 2D vector algebra and geometry shared by the whole simulation
//! - `sim`: entity world, contact dispatch, coin spawning, game loop
//! - `audio`: injected music volume handle
//! - `tuning`: data-driven game balance

pub mod audio;
pub mod sim;
pub mod tuning;
pub mod vec2;

pub use audio::MusicControl;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Physics body categories. Distinct bit positions, shared verbatim with
    /// the external solver's category/contact-test/collision bitmasks.
    pub mod category {
        pub const WORLD: u32 = 1;
        pub const PLAYER: u32 = 1 << 1;
        pub const OBSTACLE: u32 = 1 << 2;
        pub const COIN: u32 = 1 << 3;

        pub const ALL: u32 = u32::MAX;
    }

    /// Gravity field categories (separate bitmask space from bodies)
    pub mod field_category {
        pub const BLACK_HOLE: u32 = 1;
    }

    /// Fraction of a black hole's visible radius used for its contact body,
    /// so objects overlap the disc a bit before actually coming in contact
    pub const CAPTURE_RADIUS_FACTOR: f32 = 0.6;

    /// Radial gravity falloff exponent. Not quite the quadratic falloff of
    /// actual gravity.
    pub const GRAVITY_FALLOFF: f32 = 1.5;

    /// Consume sequence: seconds to shrink a captured entity to zero scale
    pub const CONSUME_SHRINK_SECS: f32 = 0.3;
    /// Consume sequence: seconds to drag a captured entity to the hole
    /// center. Also the total sequence duration, after which the entity is
    /// removed from the world.
    pub const CONSUME_MOVE_SECS: f32 = 0.4;
}

/// Degrees to radians
#[inline]
pub fn radians(degrees: f32) -> f32 {
    degrees * (std::f32::consts::PI / 180.0)
}

/// Radians to degrees
#[inline]
pub fn degrees(radians: f32) -> f32 {
    radians * (180.0 / std::f32::consts::PI)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_angle_conversions_round_trip() {
        assert!((radians(180.0) - std::f32::consts::PI).abs() < 1e-6);
        assert!((degrees(std::f32::consts::FRAC_PI_2) - 90.0).abs() < 1e-4);
        assert!((degrees(radians(37.5)) - 37.5).abs() < 1e-4);
    }
}
