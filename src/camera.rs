//! Camera follow
//!
//! X tracks the runner exactly. Y holds still while the runner stays in a
//! vertical dead-band and eases back toward the band edge once it leaves.
//! Meant to run after the simulation each frame.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::{sign, smooth_damp};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraTuning {
    /// Horizontal lead ahead of the runner
    pub x_offset: f64,
    /// Vertical offset above the runner
    pub y_offset: f64,
    /// Half-height of the vertical dead-band
    pub y_threshold: f64,
    /// Smoothing time for vertical catch-up (seconds)
    pub smooth_time: f64,
}

impl Default for CameraTuning {
    fn default() -> Self {
        Self {
            x_offset: 2.0,
            y_offset: 1.0,
            y_threshold: 2.0,
            smooth_time: 0.12,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CameraFollow {
    pub position: DVec2,
    pub tuning: CameraTuning,
    y_velocity: f64,
}

impl CameraFollow {
    pub fn new(position: DVec2, tuning: CameraTuning) -> Self {
        Self {
            position,
            tuning,
            y_velocity: 0.0,
        }
    }

    /// Place the camera on `target` at once, dropping any vertical motion
    pub fn snap_to(&mut self, target: DVec2) {
        self.position = target + DVec2::new(self.tuning.x_offset, self.tuning.y_offset);
        self.y_velocity = 0.0;
    }

    /// Follow `target` for one frame of `dt` seconds
    pub fn follow(&mut self, target: DVec2, dt: f64) {
        self.position.x = target.x + self.tuning.x_offset;

        let target_y = target.y + self.tuning.y_offset;
        let diff = target_y - self.position.y;
        if diff.abs() > self.tuning.y_threshold {
            let desired = target_y - sign(diff) * self.tuning.y_threshold;
            self.position.y = smooth_damp(
                self.position.y,
                desired,
                &mut self.y_velocity,
                self.tuning.smooth_time,
                dt,
            );
        }
    }
}
