//! Box Runner entry point
//!
//! Headless demo: loads settings, plays the built-in levels with a simple
//! jump autopilot on a fixed timestep, and logs what happens.
//!
//! Usage: `box-runner [settings.json] [level.json]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Box Runner (native) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => box_runner::Settings::load_or_default(path),
        None => box_runner::Settings::default(),
    };

    let mut levels = demo::levels();
    if let Some(path) = args.next() {
        match std::fs::read_to_string(&path)
            .map_err(box_runner::ConfigError::from)
            .and_then(|json| box_runner::Level::from_json(&json))
        {
            Ok(level) => levels.insert(0, level),
            Err(e) => log::warn!("Level {path} not loaded: {e}"),
        }
    }

    demo::play(levels, &settings);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // Headless demo is native only
}

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use box_runner::consts::*;
    use box_runner::sim::{FrameTime, Phase, Shape, ShapeId, ShapeKind, TickInput};
    use box_runner::{Level, Session, Settings};
    use glam::DVec2;

    /// Simulated wall-clock frame length (30 fps host)
    const FRAME_DT: f64 = 1.0 / 30.0;
    /// Give up on a level after this much simulated time
    const LEVEL_TIME_LIMIT: f64 = 60.0;
    /// Autopilot jumps when a hazard's near edge is this close ahead
    const JUMP_LOOKAHEAD: f64 = 1.2;

    fn block(id: u32, min: (f64, f64), max: (f64, f64)) -> Shape {
        let center = DVec2::new((min.0 + max.0) * 0.5, (min.1 + max.1) * 0.5);
        let size = DVec2::new(max.0 - min.0, max.1 - min.1);
        Shape::new(ShapeId(id), center, size)
    }

    pub fn levels() -> Vec<Level> {
        let first = Level::new("demo-1", DVec2::new(0.0, 0.45))
            .with_shape(block(1, (-2.0, -1.0), (60.0, 0.0)), ShapeKind::Obstacle)
            .with_shape(block(2, (10.0, 0.0), (10.5, 0.5)), ShapeKind::Hazard)
            .with_shape(block(3, (20.0, 0.0), (22.0, 1.0)), ShapeKind::Obstacle)
            .with_shape(block(4, (30.0, 0.0), (30.5, 0.5)), ShapeKind::Hazard)
            .with_shape(block(5, (55.0, 0.0), (56.0, 2.0)), ShapeKind::Goal)
            .with_next_level("demo-2");

        let second = Level::new("demo-2", DVec2::new(0.0, 0.45))
            .with_shape(block(1, (-2.0, -1.0), (12.0, 0.0)), ShapeKind::Obstacle)
            .with_shape(block(2, (14.0, -1.0), (40.0, 0.0)), ShapeKind::Obstacle)
            .with_shape(block(3, (-2.0, -12.0), (60.0, -10.0)), ShapeKind::Hazard)
            .with_shape(block(4, (36.0, 0.0), (37.0, 2.0)), ShapeKind::Goal);

        vec![first, second]
    }

    /// Jump when the runner is about to reach a hazard or a gap
    fn autopilot(session: &Session) -> TickInput {
        let body = &session.runner.body;
        let rect = body.rect();
        let front = rect.max().x;

        let hazard_ahead = session
            .registry
            .shapes(ShapeKind::Hazard)
            .map(|s| s.world_rect())
            .any(|r| r.max().y > rect.min().y && r.min().x > front - 0.1 && r.min().x - front < JUMP_LOOKAHEAD);

        let ahead = front + JUMP_LOOKAHEAD * 0.5;
        let ground_ahead = session
            .registry
            .shapes(ShapeKind::Obstacle)
            .map(|s| s.world_rect())
            .any(|r| r.min().x <= ahead && r.max().x >= ahead && r.max().y <= rect.min().y + 0.01);

        let jump = body.grounded && (hazard_ahead || !ground_ahead);
        TickInput {
            jump_held: jump,
            jump_pressed: jump,
        }
    }

    /// Play one level; returns the level it hands over to, if any
    fn play_level(level: Level, settings: &Settings, names: &[String]) -> Option<String> {
        let name = level.name.clone();
        let mut session = Session::new(level, settings).with_known_levels(names.iter().cloned());

        let mut accumulator = 0.0;
        let mut elapsed = 0.0;
        let mut deaths = 0u32;
        let mut jumps = 0u32;

        while elapsed < LEVEL_TIME_LIMIT {
            let dt = FRAME_DT.min(MAX_FRAME_DT);
            accumulator += dt;
            elapsed += dt;

            let mut ticks = 0;
            while accumulator >= SIM_DT && ticks < MAX_TICKS_PER_FRAME {
                let input = autopilot(&session);
                let report = session.tick(&input, FrameTime::fixed(SIM_DT));
                accumulator -= SIM_DT;
                ticks += 1;

                if report.step.is_some_and(|s| s.jumped) {
                    jumps += 1;
                }
                if report.died {
                    deaths += 1;
                }
                if report.finished {
                    log::info!(
                        "Level '{name}' finished in {elapsed:.2}s ({jumps} jumps, {deaths} deaths)"
                    );
                    return session.requested_level().map(str::to_string);
                }
            }
        }

        if session.runner.phase == Phase::Completing {
            log::info!("Level '{name}' completed");
        } else {
            log::warn!("Level '{name}' not completed after {LEVEL_TIME_LIMIT}s ({deaths} deaths)");
        }
        None
    }

    pub fn play(levels: Vec<Level>, settings: &Settings) {
        let names: Vec<String> = levels.iter().map(|l| l.name.clone()).collect();
        let mut current = levels.first().cloned();

        // At most as many handovers as there are levels
        for _ in 0..levels.len() {
            let Some(level) = current.take() else {
                break;
            };
            let next = play_level(level, settings, &names);
            current = next.and_then(|name| levels.iter().find(|l| l.name == name).cloned());
        }

        log::info!("Box Runner demo done");
    }
}
