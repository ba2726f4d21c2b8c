//! Play session
//!
//! Wires one level, its registry and the runner to the built-in
//! collaborators (music, message banner, camera). Scene requests raised by
//! the runner are recorded during the tick and applied right after it.

use std::collections::BTreeSet;

use crate::audio::MusicDirector;
use crate::camera::CameraFollow;
use crate::hooks::{Hooks, SceneError, SceneLoader};
use crate::level::Level;
use crate::settings::Settings;
use crate::sim::{FrameTime, Runner, ShapeId, ShapeRegistry, TickInput, TickReport};
use crate::ui::MessageBanner;

/// Scene requests recorded during a tick
#[derive(Debug, Default)]
struct SceneRequests {
    known: BTreeSet<String>,
    reload: bool,
    load: Option<String>,
}

impl SceneLoader for SceneRequests {
    fn reload_current_level(&mut self) -> Result<(), SceneError> {
        self.reload = true;
        Ok(())
    }

    fn load_level(&mut self, name: &str) -> Result<(), SceneError> {
        if !self.known.contains(name) {
            return Err(SceneError::UnknownLevel(name.to_string()));
        }
        self.load = Some(name.to_string());
        Ok(())
    }
}

pub struct Session {
    pub level: Level,
    /// Level as loaded, restored on reload
    initial: Level,
    pub registry: ShapeRegistry,
    pub runner: Runner,
    pub camera: CameraFollow,
    pub banner: MessageBanner,
    pub music: MusicDirector,
    scenes: SceneRequests,
    reloads: u32,
}

impl Session {
    pub fn new(level: Level, settings: &Settings) -> Self {
        let mut gameplay = settings.gameplay.clone();
        if level.next_level.is_some() {
            gameplay.next_level = level.next_level.clone();
        }
        gameplay.respawn_point = level.respawn_point.or(gameplay.respawn_point);

        let runner = Runner::new(level.spawn, settings.body.clone(), gameplay);
        let mut camera = CameraFollow::new(level.spawn, settings.camera.clone());
        camera.snap_to(level.spawn);
        let mut music = MusicDirector::new(settings.music.clone());
        music.start_level();

        log::info!("Level '{}' started with {} shapes", level.name, level.shapes.len());
        Self {
            registry: level.build_registry(),
            initial: level.clone(),
            level,
            runner,
            camera,
            banner: MessageBanner::new(settings.ui.clone()),
            music,
            scenes: SceneRequests::default(),
            reloads: 0,
        }
    }

    /// Level names the session may hand over to on completion
    pub fn with_known_levels<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scenes.known.extend(names.into_iter().map(Into::into));
        self
    }

    /// Next level requested by the runner, if any
    pub fn requested_level(&self) -> Option<&str> {
        self.scenes.load.as_deref()
    }

    pub fn reloads(&self) -> u32 {
        self.reloads
    }

    /// Activate or deactivate one of the level's shapes
    pub fn set_shape_active(&mut self, id: ShapeId, active: bool) -> bool {
        self.level.set_active(id, active, &mut self.registry)
    }

    /// Run one frame: simulation, then scene requests, then presentation
    pub fn tick(&mut self, input: &TickInput, time: FrameTime) -> TickReport {
        let mut hooks = Hooks::none()
            .with_presentation(&mut self.music)
            .with_messages(&mut self.banner)
            .with_scenes(&mut self.scenes);
        let report = self.runner.tick(Some(&self.registry), input, time, &mut hooks);

        if std::mem::take(&mut self.scenes.reload) {
            self.reload();
        }

        self.banner.update(time.unscaled_delta);
        self.music.update(time.unscaled_delta);
        self.camera.follow(self.runner.body.position, time.delta);
        report
    }

    fn reload(&mut self) {
        self.level = self.initial.clone();
        self.level.rebuild_registry(&mut self.registry);
        self.runner.restart(self.level.spawn);
        self.camera.snap_to(self.runner.body.position);
        self.banner.clear();
        self.music.start_level();
        self.reloads += 1;
        log::info!("Level '{}' reloaded", self.level.name);
    }
}
