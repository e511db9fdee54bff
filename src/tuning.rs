//! Data-driven game balance
//!
//! Everything a designer might want to nudge without touching sim code.
//! Loadable from JSON; unknown or missing fields fall back to defaults.

use serde::{Deserialize, Serialize};

use crate::vec2::Size;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Forward thrust applied while steering, units per second
    pub movement_speed: f32,
    /// Seconds between coin spawns
    pub coin_spawn_interval: f64,
    /// How far outside the visible bounds the spawn perimeter sits
    pub spawn_margin: f32,
    /// Distance between adjacent spawn points along the perimeter
    pub spawn_spacing: f32,
    pub coin_radius: f32,
    /// Ship sprite footprint the composite physics body derives from
    pub ship_size: Size,
    /// Black hole visible radius as a fraction of the scene's smaller
    /// dimension
    pub black_hole_radius_factor: f32,
    pub black_hole_attraction: f32,
    /// Real-time delay between losing the ship and requesting the
    /// game-over scene, seconds
    pub game_over_delay: f64,
    /// Music volume while the game-over scene shows (ducked from 1.0)
    pub game_over_music_volume: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            movement_speed: 150.0,
            coin_spawn_interval: 0.2,
            spawn_margin: 20.0,
            spawn_spacing: 20.0,
            coin_radius: 8.0,
            ship_size: Size::new(60.0, 30.0),
            black_hole_radius_factor: 0.15,
            black_hole_attraction: 1.0,
            game_over_delay: 0.5,
            game_over_music_volume: 0.4,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON, falling back to defaults if the document is
    /// malformed
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("failed to parse tuning ({e}), using defaults");
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_round_trip_through_json() {
        let tuning = Tuning::default();
        assert_eq!(Tuning::from_json(&tuning.to_json()), tuning);
    }

    #[test]
    fn test_partial_json_keeps_remaining_defaults() {
        let tuning = Tuning::from_json(r#"{"movement_speed": 200.0}"#);
        assert_eq!(tuning.movement_speed, 200.0);
        assert_eq!(tuning.coin_spawn_interval, 0.2);
        assert_eq!(tuning.game_over_delay, 0.5);
    }

    #[test]
    fn test_malformed_json_falls_back_to_defaults() {
        assert_eq!(Tuning::from_json("not json at all"), Tuning::default());
    }
}
