//! Music control handle
//!
//! The actual playback backend lives with the host platform; the sim is
//! handed this explicit handle (never a process-wide global) and only
//! adjusts volume and play state. The game loop ducks the volume when the
//! game-over scene is requested.

/// Injected handle over the host's looping background-music player
#[derive(Debug, Clone, PartialEq)]
pub struct MusicControl {
    volume: f32,
    playing: bool,
}

impl Default for MusicControl {
    fn default() -> Self {
        Self {
            volume: 1.0,
            playing: false,
        }
    }
}

impl MusicControl {
    pub fn volume(&self) -> f32 {
        self.volume
    }

    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn start(&mut self) {
        if !self.playing {
            log::info!("music started");
        }
        self.playing = true;
    }

    pub fn stop(&mut self) {
        self.playing = false;
    }
}
