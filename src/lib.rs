//! Box Runner - simulation core for a 2D auto-runner platformer
//!
//! Core modules:
//! - `sim`: Kinematic body solver, shape registry, gameplay state machine
//! - `level`: Level description (shape list, activation, registry rebuild)
//! - `session`: One level in play, wired to music, banner and camera
//! - `hooks`: Collaborator traits the simulation notifies (presentation, UI, scenes)
//! - `camera`: Camera follow with a vertical dead-band
//! - `ui`: Level message banner with unscaled fade-in
//! - `audio`: Level music cue tracking
//! - `settings`: Data-driven tuning loaded from JSON

pub mod audio;
pub mod camera;
pub mod hooks;
pub mod level;
pub mod session;
pub mod settings;
pub mod sim;
pub mod ui;

pub use level::Level;
pub use session::Session;
pub use settings::{ConfigError, Settings};

use glam::DVec2;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep used by the demo loop (60 Hz)
    pub const SIM_DT: f64 = 1.0 / 60.0;
    /// Maximum simulation ticks per rendered frame to prevent spiral of death
    pub const MAX_TICKS_PER_FRAME: u32 = 8;
    /// Frame delta clamp (seconds)
    pub const MAX_FRAME_DT: f64 = 0.1;

    /// Tolerance used when comparing the foot band against an obstacle top
    pub const GROUND_EPSILON: f64 = 0.001;
    /// Degrees in a quarter turn
    pub const QUARTER_TURN_DEG: f64 = 90.0;
}

/// Smoothstep ease: `u² (3 − 2u)` with `u` clamped to [0, 1]
#[inline]
pub fn smoothstep(u: f64) -> f64 {
    let u = u.clamp(0.0, 1.0);
    u * u * (3.0 - 2.0 * u)
}

/// Round an angle in degrees to the nearest multiple of 90°
#[inline]
pub fn snap_to_quarter_turn(degrees: f64) -> f64 {
    (degrees / consts::QUARTER_TURN_DEG).round() * consts::QUARTER_TURN_DEG
}

/// Critically damped spring toward `target`.
///
/// Returns the new value; `velocity` is carried between calls.
pub fn smooth_damp(current: f64, target: f64, velocity: &mut f64, smooth_time: f64, dt: f64) -> f64 {
    let smooth_time = smooth_time.max(0.0001);
    let omega = 2.0 / smooth_time;
    let x = omega * dt;
    let exp = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let change = current - target;
    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * exp;
    let mut output = target + (change + temp) * exp;

    // Prevent overshooting
    if (target - current > 0.0) == (output > target) {
        output = target;
        *velocity = if dt > 0.0 { (output - target) / dt } else { 0.0 };
    }

    output
}

/// Sign of `x` as -1, 0 or 1 (unlike `f64::signum`, 0 stays 0)
#[inline]
pub fn sign(x: f64) -> f64 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Linear interpolation between two points
#[inline]
pub fn lerp_point(from: DVec2, to: DVec2, t: f64) -> DVec2 {
    from + (to - from) * t
}
