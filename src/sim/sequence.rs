//! Resumable timed sequences
//!
//! Each sequence is a plain state object (current step + elapsed time)
//! advanced once per tick with unscaled time, so it completes even while
//! the simulation is paused or slowed down.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::{lerp_point, smoothstep};

/// Progress of a sequence after one advance
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceStatus {
    Running,
    /// Finished on this advance (reported exactly once)
    Finished,
    /// Already finished earlier
    Idle,
}

/// Steps of the death sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathStep {
    /// Explosion requested, not yet shown
    Explode,
    /// Waiting out the cosmetic delay
    Wait,
    /// Recovery handed back to the state machine
    Done,
}

/// Explosion followed by a fixed unscaled delay
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeathSequence {
    pub step: DeathStep,
    pub elapsed: f64,
    pub delay: f64,
}

impl DeathSequence {
    pub fn new(delay: f64) -> Self {
        Self {
            step: DeathStep::Explode,
            elapsed: 0.0,
            delay,
        }
    }

    /// Advance by `unscaled_dt`. `explode` runs once, on the first advance.
    pub fn advance(&mut self, unscaled_dt: f64, mut explode: impl FnMut()) -> SequenceStatus {
        match self.step {
            DeathStep::Explode => {
                explode();
                self.step = DeathStep::Wait;
                SequenceStatus::Running
            }
            DeathStep::Wait => {
                self.elapsed += unscaled_dt;
                if self.elapsed >= self.delay {
                    self.step = DeathStep::Done;
                    SequenceStatus::Finished
                } else {
                    SequenceStatus::Running
                }
            }
            DeathStep::Done => SequenceStatus::Idle,
        }
    }
}

/// Independent timer that fires once after `timeout`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Watchdog {
    pub elapsed: f64,
    pub timeout: f64,
    pub fired: bool,
}

impl Watchdog {
    pub fn new(timeout: f64) -> Self {
        Self {
            elapsed: 0.0,
            timeout,
            fired: false,
        }
    }

    pub fn advance(&mut self, unscaled_dt: f64) -> SequenceStatus {
        if self.fired {
            return SequenceStatus::Idle;
        }
        self.elapsed += unscaled_dt;
        if self.elapsed >= self.timeout {
            self.fired = true;
            SequenceStatus::Finished
        } else {
            SequenceStatus::Running
        }
    }
}

/// One frame of the goal animation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalFrame {
    pub position: DVec2,
    pub scale: f64,
    pub rotation: f64,
}

/// Eased pull of the body into the goal while it shrinks and spins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalSequence {
    pub from: DVec2,
    pub to: DVec2,
    pub start_rotation: f64,
    pub spin_degrees: f64,
    pub duration: f64,
    pub elapsed: f64,
    pub done: bool,
}

impl GoalSequence {
    pub fn new(from: DVec2, to: DVec2, start_rotation: f64, spin_degrees: f64, duration: f64) -> Self {
        Self {
            from,
            to,
            start_rotation,
            spin_degrees,
            duration,
            elapsed: 0.0,
            done: false,
        }
    }

    /// Normalized progress in [0, 1]
    pub fn progress(&self) -> f64 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.elapsed / self.duration).clamp(0.0, 1.0)
        }
    }

    /// Pose at the current progress
    pub fn frame(&self) -> GoalFrame {
        let eased = smoothstep(self.progress());
        GoalFrame {
            position: lerp_point(self.from, self.to, eased),
            scale: 1.0 - eased,
            rotation: self.start_rotation - self.spin_degrees * eased,
        }
    }

    pub fn advance(&mut self, unscaled_dt: f64) -> (GoalFrame, SequenceStatus) {
        if self.done {
            return (self.frame(), SequenceStatus::Idle);
        }
        self.elapsed += unscaled_dt;
        let frame = self.frame();
        if self.progress() >= 1.0 {
            self.done = true;
            (frame, SequenceStatus::Finished)
        } else {
            (frame, SequenceStatus::Running)
        }
    }
}
