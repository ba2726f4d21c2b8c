//! Collaborators the simulation notifies
//!
//! The core never renders, plays audio or loads assets itself. It calls out
//! through these traits, and any collaborator may be absent.

use thiserror::Error;

/// Failure reported by the scene-lifecycle collaborator
#[derive(Debug, Error)]
pub enum SceneError {
    /// No level with that name is known
    #[error("unknown level: {0}")]
    UnknownLevel(String),
    /// The level name was empty
    #[error("no level name assigned")]
    Unassigned,
    /// Loading started but failed
    #[error("level load failed: {0}")]
    LoadFailed(String),
}

/// Presentation and audio reactions to gameplay transitions
pub trait Presentation {
    fn on_died(&mut self) {}
    fn on_respawned(&mut self) {}
    fn on_level_completed(&mut self) {}
    /// Cosmetic explosion at the body position
    fn explode(&mut self, _x: f64, _y: f64) {}
}

/// On-screen message display
pub trait Messages {
    fn show_message(&mut self, text: &str);
}

/// Scene lifecycle: reloading the current level or moving to another
pub trait SceneLoader {
    fn reload_current_level(&mut self) -> Result<(), SceneError>;
    fn load_level(&mut self, name: &str) -> Result<(), SceneError>;
}

/// Optional collaborator set handed to the state machine each tick
#[derive(Default)]
pub struct Hooks<'a> {
    pub presentation: Option<&'a mut dyn Presentation>,
    pub messages: Option<&'a mut dyn Messages>,
    pub scenes: Option<&'a mut dyn SceneLoader>,
}

impl<'a> Hooks<'a> {
    /// No collaborators at all
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_presentation(mut self, presentation: &'a mut dyn Presentation) -> Self {
        self.presentation = Some(presentation);
        self
    }

    pub fn with_messages(mut self, messages: &'a mut dyn Messages) -> Self {
        self.messages = Some(messages);
        self
    }

    pub fn with_scenes(mut self, scenes: &'a mut dyn SceneLoader) -> Self {
        self.scenes = Some(scenes);
        self
    }

    pub(crate) fn died(&mut self) {
        if let Some(p) = self.presentation.as_deref_mut() {
            p.on_died();
        }
    }

    pub(crate) fn respawned(&mut self) {
        if let Some(p) = self.presentation.as_deref_mut() {
            p.on_respawned();
        }
    }

    pub(crate) fn level_completed(&mut self) {
        if let Some(p) = self.presentation.as_deref_mut() {
            p.on_level_completed();
        }
    }

    pub(crate) fn explode(&mut self, x: f64, y: f64) {
        if let Some(p) = self.presentation.as_deref_mut() {
            p.explode(x, y);
        }
    }

    pub(crate) fn show_message(&mut self, text: &str) {
        if let Some(m) = self.messages.as_deref_mut() {
            m.show_message(text);
        }
    }

    /// Reload the current level. A missing loader counts as a failure.
    pub(crate) fn reload_current_level(&mut self) -> Result<(), SceneError> {
        match self.scenes.as_deref_mut() {
            Some(scenes) => scenes.reload_current_level(),
            None => Err(SceneError::LoadFailed("no scene loader".to_string())),
        }
    }

    /// Load `name`. Blank names are rejected before reaching the loader.
    pub(crate) fn load_level(&mut self, name: &str) -> Result<(), SceneError> {
        if name.trim().is_empty() {
            return Err(SceneError::Unassigned);
        }
        match self.scenes.as_deref_mut() {
            Some(scenes) => scenes.load_level(name),
            None => Err(SceneError::LoadFailed("no scene loader".to_string())),
        }
    }
}
