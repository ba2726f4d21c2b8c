//! Level music cues
//!
//! Tracks what the level music should be doing in response to gameplay
//! transitions. The actual audio backend is left to the host; it reads
//! `state()` and `playhead()` each frame.

use serde::{Deserialize, Serialize};

use crate::hooks::Presentation;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MusicTuning {
    /// Track for this level; no music at all when unset
    pub track: Option<String>,
    /// Start the track when the level begins
    pub play_on_start: bool,
    pub volume: f64,
}

impl Default for MusicTuning {
    fn default() -> Self {
        Self {
            track: None,
            play_on_start: true,
            volume: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MusicState {
    Stopped,
    Playing,
}

/// Music state driven by [`Presentation`] callbacks
#[derive(Debug, Clone, PartialEq)]
pub struct MusicDirector {
    pub tuning: MusicTuning,
    state: MusicState,
    playhead: f64,
    /// Times the track was (re)started from the beginning
    starts: u32,
}

impl MusicDirector {
    pub fn new(tuning: MusicTuning) -> Self {
        Self {
            tuning,
            state: MusicState::Stopped,
            playhead: 0.0,
            starts: 0,
        }
    }

    pub fn state(&self) -> MusicState {
        self.state
    }

    /// Seconds into the current track
    pub fn playhead(&self) -> f64 {
        self.playhead
    }

    pub fn starts(&self) -> u32 {
        self.starts
    }

    pub fn volume(&self) -> f64 {
        match self.state {
            MusicState::Playing => self.tuning.volume.clamp(0.0, 1.0),
            MusicState::Stopped => 0.0,
        }
    }

    /// Level began
    pub fn start_level(&mut self) {
        if self.tuning.play_on_start {
            self.play_from_start();
        }
    }

    /// Restart the track from zero
    pub fn play_from_start(&mut self) {
        let Some(track) = self.tuning.track.as_deref() else {
            log::debug!("No level music assigned");
            return;
        };
        log::debug!("Music '{track}' playing from start");
        self.state = MusicState::Playing;
        self.playhead = 0.0;
        self.starts += 1;
    }

    pub fn stop(&mut self) {
        if self.state == MusicState::Playing {
            log::debug!("Music stopped at {:.2}s", self.playhead);
        }
        self.state = MusicState::Stopped;
    }

    /// Advance the playhead by real time
    pub fn update(&mut self, unscaled_dt: f64) {
        if self.state == MusicState::Playing {
            self.playhead += unscaled_dt.max(0.0);
        }
    }
}

impl Presentation for MusicDirector {
    fn on_died(&mut self) {
        self.stop();
    }

    /// Respawned in place: the run starts over, so does the music
    fn on_respawned(&mut self) {
        self.play_from_start();
    }

    fn on_level_completed(&mut self) {
        self.stop();
    }
}
