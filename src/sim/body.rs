//! Kinematic body solver
//!
//! One runner body moving at constant horizontal speed under gravity.
//! Each tick integrates velocity, moves through the registry in substeps
//! with X and Y resolved one after the other, then reports contacts.
//! Axis-separated resolution is an approximation and is kept that way:
//! levels are tuned around it.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::rect::{Axis, AxisRect, min_separation};
use super::world::{ShapeId, ShapeKind, ShapeRegistry};
use crate::consts::GROUND_EPSILON;
use crate::snap_to_quarter_turn;

/// Motion tuning for the runner body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BodyTuning {
    /// Collision box size
    pub size: DVec2,
    /// Collision box offset from the body position
    pub body_offset: DVec2,
    /// Vertical acceleration (negative is down)
    pub gravity: f64,
    /// Vertical velocity set when a jump fires
    pub jump_speed: f64,
    /// Horizontal velocity, reset every tick
    pub move_speed_x: f64,
    /// Resolution passes per axis move
    pub max_solver_iters: u32,
    /// Slices per tick
    pub max_substeps: u32,
    /// Half-height of the foot band used for ground detection
    pub ground_check_padding: f64,
    /// How long an early jump press is remembered (seconds)
    pub jump_buffer_time: f64,
    /// How long a jump is still accepted after leaving ground (seconds)
    pub coyote_time: f64,
    /// Presentation spin while airborne (degrees per tick, clockwise)
    pub air_spin_per_tick: f64,
}

impl Default for BodyTuning {
    fn default() -> Self {
        Self {
            size: DVec2::new(0.9, 0.9),
            body_offset: DVec2::ZERO,
            gravity: -60.0,
            jump_speed: 22.0,
            move_speed_x: 12.0,
            max_solver_iters: 8,
            max_substeps: 1,
            ground_check_padding: 0.02,
            jump_buffer_time: 0.10,
            coyote_time: 0.06,
            air_spin_per_tick: 1.0,
        }
    }
}

/// Jump input sampled once per tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct JumpInput {
    /// Any jump button is down
    pub held: bool,
    /// A jump button went down this tick (edge-triggered)
    pub pressed: bool,
}

/// Contact outcome of one solver tick
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StepReport {
    pub grounded: bool,
    /// A jump fired this tick
    pub jumped: bool,
    /// Became grounded this tick
    pub landed: bool,
    /// First hazard overlapping the final body rect
    pub hazard: Option<ShapeId>,
    /// First goal overlapping the final body rect
    pub goal: Option<ShapeId>,
}

/// The runner's kinematic body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KinematicBody {
    pub position: DVec2,
    pub velocity: DVec2,
    pub size: DVec2,
    pub body_offset: DVec2,
    pub grounded: bool,
    pub jump_buffer_counter: f64,
    pub coyote_counter: f64,
    /// Presentation rotation in degrees
    #[serde(default)]
    pub rotation: f64,
}

impl KinematicBody {
    pub fn new(position: DVec2, tuning: &BodyTuning) -> Self {
        Self {
            position,
            velocity: DVec2::ZERO,
            size: tuning.size,
            body_offset: tuning.body_offset,
            grounded: false,
            jump_buffer_counter: 0.0,
            coyote_counter: 0.0,
            rotation: 0.0,
        }
    }

    /// Collision rect if the body were at `pos`
    #[inline]
    pub fn rect_at(&self, pos: DVec2) -> AxisRect {
        AxisRect::from_owner(pos, self.body_offset, self.size)
    }

    /// Collision rect at the current position
    #[inline]
    pub fn rect(&self) -> AxisRect {
        self.rect_at(self.position)
    }

    /// Stop all motion and drop ground contact
    pub fn freeze(&mut self) {
        self.velocity = DVec2::ZERO;
        self.grounded = false;
    }

    /// Move to `position` with a clean motion state
    pub fn teleport(&mut self, position: DVec2) {
        self.position = position;
        self.freeze();
        self.jump_buffer_counter = 0.0;
        self.coyote_counter = 0.0;
        self.rotation = snap_to_quarter_turn(self.rotation);
    }

    /// Advance one tick of `dt` seconds.
    ///
    /// `registry` is optional: without one the body moves freely and
    /// never reports ground or contacts.
    pub fn step(
        &mut self,
        tuning: &BodyTuning,
        registry: Option<&ShapeRegistry>,
        input: JumpInput,
        dt: f64,
    ) -> StepReport {
        let mut report = StepReport::default();
        let was_grounded = self.grounded;

        // Constant-speed runner: horizontal velocity is reset, not accumulated
        self.velocity.x = tuning.move_speed_x;
        self.velocity.y += tuning.gravity * dt;

        self.update_jump_timers(tuning, input, dt);

        let can_jump_now = self.grounded || self.coyote_counter > 0.0;
        let wants_jump = input.held || self.jump_buffer_counter > 0.0;
        if can_jump_now && wants_jump {
            self.velocity.y = tuning.jump_speed;
            self.jump_buffer_counter = 0.0;
            self.coyote_counter = 0.0;
            self.grounded = false;
            report.jumped = true;
            log::debug!("Jump at ({:.2}, {:.2})", self.position.x, self.position.y);
        }

        if self.grounded {
            self.rotation = snap_to_quarter_turn(self.rotation);
        } else {
            self.rotation -= tuning.air_spin_per_tick;
        }

        let steps = tuning.max_substeps.max(1);
        let slice = dt / steps as f64;
        if slice.is_nan() || slice <= 0.0 {
            report.grounded = self.grounded;
            return report;
        }

        for _ in 0..steps {
            let delta = self.velocity * slice;
            self.move_axis(tuning, registry, Axis::X, delta.x);
            self.move_axis(tuning, registry, Axis::Y, delta.y);
            self.grounded = self.check_grounded(tuning, registry);
            if self.grounded && self.velocity.y < 0.0 {
                self.velocity.y = 0.0;
            }
        }

        report.grounded = self.grounded;
        report.landed = self.grounded && !was_grounded;
        report.hazard = self.touching(registry, ShapeKind::Hazard);
        report.goal = self.touching(registry, ShapeKind::Goal);
        report
    }

    fn update_jump_timers(&mut self, tuning: &BodyTuning, input: JumpInput, dt: f64) {
        if input.pressed {
            self.jump_buffer_counter = tuning.jump_buffer_time;
        } else {
            self.jump_buffer_counter = (self.jump_buffer_counter - dt).max(0.0);
        }

        if self.grounded {
            self.coyote_counter = tuning.coyote_time;
        } else {
            self.coyote_counter = (self.coyote_counter - dt).max(0.0);
        }
    }

    /// Move `amount` along `axis`, pushing out of obstacles.
    ///
    /// Each pass pushes the candidate out of every overlapping obstacle by
    /// the smaller separation, clamped to twice the requested move, and
    /// zeroes velocity on the axis. Stops after a clean pass or after
    /// `max_solver_iters` passes, leaving any residual penetration.
    pub fn move_axis(
        &mut self,
        tuning: &BodyTuning,
        registry: Option<&ShapeRegistry>,
        axis: Axis,
        amount: f64,
    ) {
        if amount == 0.0 || !amount.is_finite() {
            return;
        }

        let mut new_pos = self.position + axis.vector(amount);
        let Some(registry) = registry else {
            self.position = new_pos;
            return;
        };
        if registry.is_empty(ShapeKind::Obstacle) {
            self.position = new_pos;
            return;
        }

        let mut candidate = self.rect_at(new_pos);
        let max_push = amount.abs() * 2.0;

        for _ in 0..tuning.max_solver_iters {
            let mut any_hit = false;

            for obstacle in registry.shapes(ShapeKind::Obstacle) {
                let other = obstacle.world_rect();
                if !candidate.overlaps(&other) {
                    continue;
                }

                any_hit = true;
                let push = min_separation(&candidate, &other, axis).clamp(-max_push, max_push);
                let separation = axis.vector(push);
                new_pos += separation;
                candidate = candidate.translated(separation);

                match axis {
                    Axis::X => self.velocity.x = 0.0,
                    Axis::Y => self.velocity.y = 0.0,
                }
            }

            if !any_hit {
                break;
            }
        }

        self.position = new_pos;
    }

    /// Whether the body rests on top of any obstacle.
    ///
    /// Uses a thin band around the bottom edge: it must overlap an obstacle
    /// horizontally, reach down to its top, and the body position must be
    /// at or above that top.
    pub fn check_grounded(&self, tuning: &BodyTuning, registry: Option<&ShapeRegistry>) -> bool {
        let Some(registry) = registry else {
            return false;
        };
        if registry.is_empty(ShapeKind::Obstacle) {
            return false;
        }

        let body = self.rect();
        let pad = tuning.ground_check_padding;
        let foot_min = DVec2::new(body.min().x, body.min().y - pad);
        let foot_max = DVec2::new(body.max().x, foot_min.y + pad * 2.0);

        registry.shapes(ShapeKind::Obstacle).any(|obstacle| {
            let r = obstacle.world_rect();
            let (r_min, r_max) = (r.min(), r.max());
            let x_overlap = foot_min.x < r_max.x && foot_max.x > r_min.x;
            let feet_reach_top = foot_min.y <= r_max.y + GROUND_EPSILON;
            let body_above = self.position.y >= r_max.y - GROUND_EPSILON;
            x_overlap && feet_reach_top && body_above
        })
    }

    /// First registered shape of `kind` the body currently overlaps
    pub fn touching(&self, registry: Option<&ShapeRegistry>, kind: ShapeKind) -> Option<ShapeId> {
        registry?.first_overlapping(kind, self.rect()).map(|s| s.id)
    }
}
