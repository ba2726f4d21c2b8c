//! Gameplay state machine
//!
//! Drives the runner through Alive, Dead and Completing. The solver only
//! runs while Alive; the other two phases play a timed sequence on unscaled
//! time and then recover (respawn or reload) or finish the level.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::body::{BodyTuning, JumpInput, KinematicBody, StepReport};
use super::sequence::{DeathSequence, GoalSequence, SequenceStatus, Watchdog};
use super::world::{ShapeKind, ShapeRegistry};
use crate::hooks::Hooks;

/// Current phase of the runner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Solver runs every tick
    Alive,
    /// Exploded, waiting to respawn or reload
    Dead,
    /// Being pulled into the goal; terminal once the animation ends
    Completing,
}

/// Timings and outcomes for death and level completion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameplayTuning {
    /// Reload the whole level on death instead of respawning in place
    pub reload_scene_on_death: bool,
    /// Cosmetic delay between explosion and recovery (unscaled seconds)
    pub death_delay: f64,
    /// Recovery is forced if still dead after this long (unscaled seconds)
    pub watchdog_timeout: f64,
    /// Hazards are ignored for this long after respawning
    pub respawn_grace: f64,
    /// Length of the pull-into-goal animation
    pub goal_duration: f64,
    /// Presentation spin over the goal animation (degrees)
    pub goal_spin_degrees: f64,
    /// Level loaded once the goal animation finishes
    pub next_level: Option<String>,
    /// Message shown on completion
    pub completed_message: String,
    /// Respawn point; the starting position when unset
    pub respawn_point: Option<DVec2>,
}

impl Default for GameplayTuning {
    fn default() -> Self {
        Self {
            reload_scene_on_death: false,
            death_delay: 0.6,
            watchdog_timeout: 2.0,
            respawn_grace: 0.5,
            goal_duration: 0.6,
            goal_spin_degrees: 360.0,
            next_level: None,
            completed_message: "Level complete!".to_string(),
            respawn_point: None,
        }
    }
}

/// Frame timing: scaled delta drives physics, unscaled drives sequences
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    pub delta: f64,
    pub unscaled_delta: f64,
}

impl FrameTime {
    /// Same delta for physics and sequences
    pub fn fixed(dt: f64) -> Self {
        Self {
            delta: dt,
            unscaled_delta: dt,
        }
    }

    /// Physics slowed (or paused with 0) by `time_scale`; sequences unaffected
    pub fn scaled(dt: f64, time_scale: f64) -> Self {
        Self {
            delta: dt * time_scale,
            unscaled_delta: dt,
        }
    }
}

/// Input commands for a single tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Jump held (keyboard, mouse, touch...)
    pub jump_held: bool,
    /// Jump went down this tick
    pub jump_pressed: bool,
}

impl TickInput {
    pub fn jump(&self) -> JumpInput {
        JumpInput {
            held: self.jump_held,
            pressed: self.jump_pressed,
        }
    }
}

/// What happened during one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickReport {
    /// Solver outcome, when it ran
    pub step: Option<StepReport>,
    pub died: bool,
    pub respawned: bool,
    pub reloaded: bool,
    /// Entered Completing this tick
    pub completed: bool,
    /// Goal animation ended this tick
    pub finished: bool,
    /// Next level handed to the scene loader
    pub loaded_level: Option<String>,
}

/// The player entity: kinematic body plus its gameplay state
#[derive(Debug, Clone)]
pub struct Runner {
    pub body: KinematicBody,
    pub body_tuning: BodyTuning,
    pub tuning: GameplayTuning,
    pub phase: Phase,
    /// Level start position, used when the level is reloaded
    pub start: DVec2,
    pub respawn_point: DVec2,
    /// Hazard contacts are ignored while `clock` is below this
    pub hazard_ignore_until: f64,
    /// Unscaled seconds since the session started
    pub clock: f64,
    /// Presentation scale (shrinks into the goal)
    pub scale: f64,
    death: Option<DeathSequence>,
    watchdog: Option<Watchdog>,
    goal: Option<GoalSequence>,
    finished: bool,
}

impl Runner {
    pub fn new(start: DVec2, body_tuning: BodyTuning, tuning: GameplayTuning) -> Self {
        let respawn_point = tuning.respawn_point.unwrap_or(start);
        Self {
            body: KinematicBody::new(start, &body_tuning),
            body_tuning,
            tuning,
            phase: Phase::Alive,
            start,
            respawn_point,
            hazard_ignore_until: 0.0,
            clock: 0.0,
            scale: 1.0,
            death: None,
            watchdog: None,
            goal: None,
            finished: false,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.phase == Phase::Dead
    }

    pub fn is_completing(&self) -> bool {
        self.phase == Phase::Completing
    }

    /// Goal animation has run to the end
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn hazards_ignored(&self) -> bool {
        self.clock < self.hazard_ignore_until
    }

    /// Advance one tick
    pub fn tick(
        &mut self,
        registry: Option<&ShapeRegistry>,
        input: &TickInput,
        time: FrameTime,
        hooks: &mut Hooks<'_>,
    ) -> TickReport {
        let mut report = TickReport::default();
        let unscaled = time.unscaled_delta.max(0.0);
        self.clock += unscaled;

        match self.phase {
            Phase::Alive => self.tick_alive(registry, input, time.delta, hooks, &mut report),
            Phase::Dead => self.tick_dead(unscaled, hooks, &mut report),
            Phase::Completing => self.tick_completing(unscaled, hooks, &mut report),
        }

        report
    }

    fn tick_alive(
        &mut self,
        registry: Option<&ShapeRegistry>,
        input: &TickInput,
        dt: f64,
        hooks: &mut Hooks<'_>,
        report: &mut TickReport,
    ) {
        let step = self.body.step(&self.body_tuning, registry, input.jump(), dt);
        report.step = Some(step);

        if step.landed {
            log::debug!("Landed at ({:.2}, {:.2})", self.body.position.x, self.body.position.y);
        }

        if step.hazard.is_some() && !self.hazards_ignored() {
            report.died = self.trigger_death(hooks);
            return;
        }

        let goal_center = step
            .goal
            .zip(registry)
            .and_then(|(id, reg)| reg.shapes(ShapeKind::Goal).find(|s| s.id == id))
            .map(|goal| goal.world_rect().center);
        if let Some(target) = goal_center {
            report.completed = self.trigger_complete(target, hooks);
        }
    }

    fn tick_dead(&mut self, unscaled: f64, hooks: &mut Hooks<'_>, report: &mut TickReport) {
        let at = self.body.position;
        let sequence_done = match self.death.as_mut() {
            Some(seq) => seq.advance(unscaled, || hooks.explode(at.x, at.y)) == SequenceStatus::Finished,
            None => false,
        };
        let watchdog_fired = self
            .watchdog
            .as_mut()
            .is_some_and(|dog| dog.advance(unscaled) == SequenceStatus::Finished);

        if sequence_done {
            self.recover(hooks, report);
        } else if watchdog_fired {
            log::warn!("Death sequence did not finish in {:.2}s, forcing recovery", self.tuning.watchdog_timeout);
            self.recover(hooks, report);
        }
    }

    fn tick_completing(&mut self, unscaled: f64, hooks: &mut Hooks<'_>, report: &mut TickReport) {
        let status = match self.goal.as_mut() {
            Some(seq) => {
                let (frame, status) = seq.advance(unscaled);
                self.body.position = frame.position;
                self.body.rotation = frame.rotation;
                self.scale = frame.scale;
                status
            }
            None => SequenceStatus::Idle,
        };

        if status == SequenceStatus::Finished {
            report.finished = true;
            report.loaded_level = self.finish_level(hooks);
        }
    }

    /// Enter Dead. Returns false if the runner is not alive (already dead or completing).
    pub fn trigger_death(&mut self, hooks: &mut Hooks<'_>) -> bool {
        if self.phase != Phase::Alive {
            return false;
        }

        log::info!("Runner died at ({:.2}, {:.2})", self.body.position.x, self.body.position.y);
        self.phase = Phase::Dead;
        self.body.freeze();
        self.death = Some(DeathSequence::new(self.tuning.death_delay));
        self.watchdog = Some(Watchdog::new(self.tuning.watchdog_timeout));
        hooks.died();
        true
    }

    /// Enter Completing, pulling the body toward `target`.
    ///
    /// Returns false when already completing or dead.
    pub fn trigger_complete(&mut self, target: DVec2, hooks: &mut Hooks<'_>) -> bool {
        if self.phase != Phase::Alive {
            return false;
        }

        log::info!("Level completed");
        self.phase = Phase::Completing;
        self.body.freeze();
        let covered = self.clock + self.tuning.goal_duration + self.tuning.respawn_grace;
        self.hazard_ignore_until = self.hazard_ignore_until.max(covered);
        self.goal = Some(GoalSequence::new(
            self.body.position,
            target,
            self.body.rotation,
            self.tuning.goal_spin_degrees,
            self.tuning.goal_duration,
        ));
        hooks.level_completed();
        hooks.show_message(&self.tuning.completed_message);
        true
    }

    /// Reload if configured, falling back to respawn when the reload fails
    fn recover(&mut self, hooks: &mut Hooks<'_>, report: &mut TickReport) {
        if self.tuning.reload_scene_on_death {
            match hooks.reload_current_level() {
                Ok(()) => {
                    log::info!("Level reloaded after death");
                    self.restart(self.start);
                    report.reloaded = true;
                    return;
                }
                Err(e) => log::warn!("Level reload failed ({e}), respawning instead"),
            }
        }
        self.respawn_and_reset(hooks);
        report.respawned = true;
    }

    /// Teleport to the respawn point and return to Alive with a hazard grace window
    pub fn respawn_and_reset(&mut self, hooks: &mut Hooks<'_>) {
        self.reset_to_spawn();
        log::debug!("Respawned at ({:.2}, {:.2})", self.respawn_point.x, self.respawn_point.y);
        hooks.respawned();
    }

    /// Start a fresh run from `start`, as on a newly loaded level.
    ///
    /// Unlike a respawn, the body is rebuilt (rotation back to 0) and placed
    /// at the level start rather than the respawn point.
    pub fn restart(&mut self, start: DVec2) {
        self.start = start;
        self.body = KinematicBody::new(start, &self.body_tuning);
        self.reset_state();
    }

    fn reset_to_spawn(&mut self) {
        self.body.teleport(self.respawn_point);
        self.reset_state();
    }

    fn reset_state(&mut self) {
        self.phase = Phase::Alive;
        self.scale = 1.0;
        self.death = None;
        self.watchdog = None;
        self.goal = None;
        self.finished = false;
        self.hazard_ignore_until = self.clock + self.tuning.respawn_grace;
    }

    /// Goal animation done: hand over to the next level, or stay put
    fn finish_level(&mut self, hooks: &mut Hooks<'_>) -> Option<String> {
        self.finished = true;
        let name = self.tuning.next_level.clone()?;
        match hooks.load_level(&name) {
            Ok(()) => {
                log::info!("Loading next level '{name}'");
                Some(name)
            }
            Err(e) => {
                log::warn!("Next level '{name}' not loaded: {e}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::fakes::*;
    use crate::sim::world::{Shape, ShapeId};

    const DT: f64 = 1.0 / 60.0;

    fn shape(id: u32, center: (f64, f64), size: (f64, f64)) -> Shape {
        Shape::new(ShapeId(id), DVec2::new(center.0, center.1), DVec2::new(size.0, size.1))
    }

    fn hazard_field() -> ShapeRegistry {
        let mut reg = ShapeRegistry::new();
        reg.register(&shape(1, (0.0, 0.0), (200.0, 200.0)), ShapeKind::Hazard);
        reg
    }

    fn runner() -> Runner {
        Runner::new(DVec2::ZERO, BodyTuning::default(), GameplayTuning::default())
    }

    fn run(runner: &mut Runner, reg: &ShapeRegistry, ticks: usize, hooks: &mut Hooks<'_>) -> Vec<TickReport> {
        (0..ticks)
            .map(|_| runner.tick(Some(reg), &TickInput::default(), FrameTime::fixed(DT), hooks))
            .collect()
    }

    #[test]
    fn test_hazard_grace_window_then_single_death() {
        let reg = hazard_field();
        let mut r = runner();
        r.hazard_ignore_until = 0.5;
        let mut log = PresentationLog::default();
        let mut hooks = Hooks::none().with_presentation(&mut log);

        let early = run(&mut r, &reg, 20, &mut hooks);
        assert!(early.iter().all(|t| !t.died));
        assert_eq!(r.phase, Phase::Alive);

        let late = run(&mut r, &reg, 20, &mut hooks);
        assert_eq!(late.iter().filter(|t| t.died).count(), 1);
        assert!(r.is_dead());
        drop(hooks);
        assert_eq!(log.died, 1);
    }

    #[test]
    fn test_trigger_death_is_idempotent() {
        let mut r = runner();
        let mut log = PresentationLog::default();
        let mut hooks = Hooks::none().with_presentation(&mut log);

        assert!(r.trigger_death(&mut hooks));
        assert!(!r.trigger_death(&mut hooks));
        drop(hooks);
        assert_eq!(log.died, 1);
        assert_eq!(r.body.velocity, DVec2::ZERO);
        assert!(!r.body.grounded);
    }

    #[test]
    fn test_death_sequence_respawns_after_delay() {
        let reg = ShapeRegistry::new();
        let mut r = Runner::new(
            DVec2::new(1.0, 2.0),
            BodyTuning::default(),
            GameplayTuning::default(),
        );
        let mut log = PresentationLog::default();
        let mut hooks = Hooks::none().with_presentation(&mut log);

        run(&mut r, &reg, 10, &mut hooks);
        r.body.velocity = DVec2::new(5.0, 5.0);
        r.body.jump_buffer_counter = 0.1;
        assert!(r.trigger_death(&mut hooks));

        let position_at_death = r.body.position;
        run(&mut r, &reg, 5, &mut hooks);
        assert!(r.is_dead());
        assert_eq!(r.body.position, position_at_death);

        // 0.6 s delay plus the explosion tick
        let reports = run(&mut r, &reg, 40, &mut hooks);
        assert_eq!(reports.iter().filter(|t| t.respawned).count(), 1);
        assert_eq!(r.phase, Phase::Alive);
        drop(hooks);

        assert_eq!(log.explosions.len(), 1);
        assert_eq!(log.respawned, 1);
    }

    #[test]
    fn test_respawn_resets_body_and_opens_grace() {
        let mut r = Runner::new(
            DVec2::new(1.0, 2.0),
            BodyTuning::default(),
            GameplayTuning::default(),
        );
        r.clock = 10.0;
        r.body.position = DVec2::new(40.0, -3.0);
        r.body.velocity = DVec2::new(12.0, -9.0);
        r.body.coyote_counter = 0.05;
        r.body.jump_buffer_counter = 0.05;
        r.body.grounded = true;

        r.respawn_and_reset(&mut Hooks::none());
        assert_eq!(r.body.position, DVec2::new(1.0, 2.0));
        assert_eq!(r.body.velocity, DVec2::ZERO);
        assert!(!r.body.grounded);
        assert_eq!(r.body.coyote_counter, 0.0);
        assert_eq!(r.body.jump_buffer_counter, 0.0);
        assert!(r.hazards_ignored());
        assert!((r.hazard_ignore_until - 10.5).abs() < 1e-12);
    }

    #[test]
    fn test_respawn_grace_prevents_instant_redeath() {
        let reg = hazard_field();
        let mut r = runner();
        let mut hooks = Hooks::none();

        assert!(r.trigger_death(&mut hooks));
        let reports = run(&mut r, &reg, 50, &mut hooks);
        let respawn_tick = reports.iter().position(|t| t.respawned).expect("respawned");
        // Still inside the hazard, but the 0.5 s grace holds for 29 more ticks
        assert!(reports[respawn_tick + 1..].iter().all(|t| !t.died));
    }

    #[test]
    fn test_watchdog_forces_recovery() {
        let reg = ShapeRegistry::new();
        let tuning = GameplayTuning {
            death_delay: 100.0,
            watchdog_timeout: 1.0,
            ..Default::default()
        };
        let mut r = Runner::new(DVec2::ZERO, BodyTuning::default(), tuning);
        let mut hooks = Hooks::none();

        r.trigger_death(&mut hooks);
        let reports = run(&mut r, &reg, 70, &mut hooks);
        assert_eq!(reports.iter().filter(|t| t.respawned).count(), 1);
        assert_eq!(r.phase, Phase::Alive);
    }

    #[test]
    fn test_sequences_run_on_unscaled_time() {
        let reg = ShapeRegistry::new();
        let mut r = runner();
        let mut hooks = Hooks::none();
        r.trigger_death(&mut hooks);

        // Physics paused, sequences still progress
        for _ in 0..60 {
            r.tick(Some(&reg), &TickInput::default(), FrameTime::scaled(DT, 0.0), &mut hooks);
        }
        assert_eq!(r.phase, Phase::Alive);
    }

    #[test]
    fn test_reload_on_death_uses_scene_loader() {
        let reg = ShapeRegistry::new();
        let tuning = GameplayTuning {
            reload_scene_on_death: true,
            ..Default::default()
        };
        let mut r = Runner::new(DVec2::ZERO, BodyTuning::default(), tuning);
        let mut scenes = FakeScenes::default();
        let mut log = PresentationLog::default();
        let mut hooks = Hooks::none()
            .with_presentation(&mut log)
            .with_scenes(&mut scenes);

        r.trigger_death(&mut hooks);
        let reports = run(&mut r, &reg, 60, &mut hooks);
        assert_eq!(reports.iter().filter(|t| t.reloaded).count(), 1);
        assert!(reports.iter().all(|t| !t.respawned));
        drop(hooks);
        assert_eq!(scenes.reloads, 1);
        assert_eq!(log.respawned, 0);
    }

    #[test]
    fn test_reload_restarts_at_level_start_not_respawn_point() {
        let reg = ShapeRegistry::new();
        let tuning = GameplayTuning {
            reload_scene_on_death: true,
            respawn_point: Some(DVec2::new(20.0, 0.45)),
            ..Default::default()
        };
        let mut r = Runner::new(DVec2::new(0.0, 0.45), BodyTuning::default(), tuning);
        let mut scenes = FakeScenes::default();
        let mut hooks = Hooks::none().with_scenes(&mut scenes);

        r.trigger_death(&mut hooks);
        r.body.rotation = -100.0;
        let reloaded = (0..60).any(|_| {
            r.tick(Some(&reg), &TickInput::default(), FrameTime::fixed(DT), &mut hooks)
                .reloaded
        });
        assert!(reloaded);
        assert_eq!(r.phase, Phase::Alive);
        assert_eq!(r.body.position, DVec2::new(0.0, 0.45));
        assert_eq!(r.body.rotation, 0.0);
        assert_eq!(r.body.velocity, DVec2::ZERO);
        assert!(r.hazards_ignored());
        // Respawn point is untouched for later in-place respawns
        assert_eq!(r.respawn_point, DVec2::new(20.0, 0.45));
    }

    #[test]
    fn test_restart_rebuilds_a_fresh_run() {
        let mut r = runner();
        r.trigger_complete(DVec2::ONE, &mut Hooks::none());
        r.scale = 0.3;
        r.body.rotation = 45.0;
        r.body.coyote_counter = 0.05;

        r.restart(DVec2::new(-4.0, 2.0));
        assert_eq!(r.phase, Phase::Alive);
        assert_eq!(r.start, DVec2::new(-4.0, 2.0));
        assert_eq!(r.body.position, DVec2::new(-4.0, 2.0));
        assert_eq!(r.body.rotation, 0.0);
        assert_eq!(r.body.coyote_counter, 0.0);
        assert_eq!(r.scale, 1.0);
        assert!(!r.is_finished());
    }

    #[test]
    fn test_failed_reload_falls_back_to_respawn() {
        let reg = ShapeRegistry::new();
        let tuning = GameplayTuning {
            reload_scene_on_death: true,
            ..Default::default()
        };
        let mut r = Runner::new(DVec2::new(3.0, 3.0), BodyTuning::default(), tuning);
        let mut scenes = FakeScenes {
            fail: true,
            ..Default::default()
        };
        let mut hooks = Hooks::none().with_scenes(&mut scenes);

        r.trigger_death(&mut hooks);
        let respawned = (0..60).any(|_| {
            r.tick(Some(&reg), &TickInput::default(), FrameTime::fixed(DT), &mut hooks)
                .respawned
        });
        assert!(respawned);
        assert_eq!(r.phase, Phase::Alive);
        assert_eq!(r.body.position, DVec2::new(3.0, 3.0));
        drop(hooks);
        assert_eq!(scenes.reloads, 0);
    }

    fn goal_level() -> ShapeRegistry {
        let mut reg = ShapeRegistry::new();
        reg.register(&shape(5, (2.0, 0.0), (2.0, 2.0)), ShapeKind::Goal);
        reg
    }

    #[test]
    fn test_goal_contact_runs_completion_sequence() {
        let reg = goal_level();
        let tuning = GameplayTuning {
            next_level: Some("level-2".to_string()),
            ..Default::default()
        };
        let mut r = Runner::new(DVec2::new(0.5, 0.0), BodyTuning::default(), tuning);
        let mut log = PresentationLog::default();
        let mut messages = MessageLog::default();
        let mut scenes = FakeScenes::default();
        let mut hooks = Hooks::none()
            .with_presentation(&mut log)
            .with_messages(&mut messages)
            .with_scenes(&mut scenes);

        let first = r.tick(Some(&reg), &TickInput::default(), FrameTime::fixed(DT), &mut hooks);
        assert!(first.completed);
        assert!(r.is_completing());
        assert!(r.hazard_ignore_until >= r.clock + 0.6);

        let reports = run(&mut r, &reg, 40, &mut hooks);
        assert_eq!(reports.iter().filter(|t| t.finished).count(), 1);
        assert!(reports.iter().all(|t| t.step.is_none()));
        assert!(r.is_finished());
        assert!(r.is_completing());
        assert!((r.body.position - DVec2::new(2.0, 0.0)).length() < 1e-9);
        assert_eq!(r.scale, 0.0);
        drop(hooks);

        assert_eq!(log.completed, 1);
        assert_eq!(messages.0, vec!["Level complete!".to_string()]);
        assert_eq!(scenes.loaded, vec!["level-2".to_string()]);
    }

    #[test]
    fn test_completion_is_idempotent_and_blocked_by_death() {
        let mut r = runner();
        let mut log = PresentationLog::default();
        let mut hooks = Hooks::none().with_presentation(&mut log);

        assert!(r.trigger_complete(DVec2::ONE, &mut hooks));
        assert!(!r.trigger_complete(DVec2::ONE, &mut hooks));
        assert!(!r.trigger_death(&mut hooks));

        let mut dead = runner();
        assert!(dead.trigger_death(&mut hooks));
        assert!(!dead.trigger_complete(DVec2::ONE, &mut hooks));
        drop(hooks);
        assert_eq!(log.completed, 1);
    }

    #[test]
    fn test_failed_next_level_load_stays_completed() {
        let reg = goal_level();
        let tuning = GameplayTuning {
            next_level: Some("missing".to_string()),
            ..Default::default()
        };
        let mut r = Runner::new(DVec2::new(0.5, 0.0), BodyTuning::default(), tuning);
        let mut scenes = FakeScenes {
            fail: true,
            ..Default::default()
        };
        let mut hooks = Hooks::none().with_scenes(&mut scenes);

        let reports = run(&mut r, &reg, 60, &mut hooks);
        assert!(reports.iter().all(|t| t.loaded_level.is_none()));
        assert!(r.is_finished());
        assert_eq!(r.phase, Phase::Completing);

        // Terminal: further ticks do nothing
        let position = r.body.position;
        run(&mut r, &reg, 10, &mut hooks);
        assert_eq!(r.body.position, position);
    }

    #[test]
    fn test_no_next_level_is_terminal() {
        let reg = goal_level();
        let mut r = Runner::new(DVec2::new(0.5, 0.0), BodyTuning::default(), GameplayTuning::default());
        let reports = run(&mut r, &reg, 60, &mut Hooks::none());
        assert_eq!(reports.iter().filter(|t| t.finished).count(), 1);
        assert!(reports.iter().all(|t| t.loaded_level.is_none()));
        assert!(r.is_completing());
    }
}
