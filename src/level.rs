//! Level description and shape activation
//!
//! A level owns its shapes and their active flags. Activating or
//! deactivating a shape is what registers or unregisters it with the
//! [`ShapeRegistry`]; the registry itself never decides what is live.

use std::collections::BTreeSet;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::settings::ConfigError;
use crate::sim::{Shape, ShapeId, ShapeKind, ShapeRegistry};

fn default_active() -> bool {
    true
}

/// One placed shape and whether it is currently in the world
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelShape {
    pub shape: Shape,
    pub kind: ShapeKind,
    #[serde(default = "default_active")]
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub name: String,
    /// Runner start position
    pub spawn: DVec2,
    /// Explicit respawn point; the spawn when unset
    #[serde(default)]
    pub respawn_point: Option<DVec2>,
    /// Level to load once this one is completed
    #[serde(default)]
    pub next_level: Option<String>,
    #[serde(default)]
    pub shapes: Vec<LevelShape>,
}

impl Level {
    pub fn new(name: impl Into<String>, spawn: DVec2) -> Self {
        Self {
            name: name.into(),
            spawn,
            respawn_point: None,
            next_level: None,
            shapes: Vec::new(),
        }
    }

    /// Append an active shape. Builder-style, for levels assembled in code.
    pub fn with_shape(mut self, shape: Shape, kind: ShapeKind) -> Self {
        self.shapes.push(LevelShape {
            shape,
            kind,
            active: true,
        });
        self
    }

    pub fn with_next_level(mut self, name: impl Into<String>) -> Self {
        self.next_level = Some(name.into());
        self
    }

    /// Parse and validate a level from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let level: Self = serde_json::from_str(json)?;
        level.validate()?;
        Ok(level)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::Invalid("level name is blank".into()));
        }

        let mut seen = BTreeSet::new();
        for entry in &self.shapes {
            let shape = &entry.shape;
            if !seen.insert(shape.id) {
                return Err(ConfigError::Invalid(format!(
                    "level '{}' has duplicate shape id {:?}",
                    self.name, shape.id
                )));
            }
            if !(shape.size.x > 0.0 && shape.size.y > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "shape {:?} has non-positive size {:?}",
                    shape.id, shape.size
                )));
            }
        }
        Ok(())
    }

    pub fn shape(&self, id: ShapeId) -> Option<&LevelShape> {
        self.shapes.iter().find(|s| s.shape.id == id)
    }

    /// Shapes currently in the world, with their kind
    pub fn active_shapes(&self) -> impl Iterator<Item = (&Shape, ShapeKind)> {
        self.shapes
            .iter()
            .filter(|s| s.active)
            .map(|s| (&s.shape, s.kind))
    }

    /// Registry holding only the active shapes
    pub fn build_registry(&self) -> ShapeRegistry {
        let mut registry = ShapeRegistry::new();
        self.rebuild_registry(&mut registry);
        registry
    }

    pub fn rebuild_registry(&self, registry: &mut ShapeRegistry) {
        registry.rebuild_from(self.active_shapes());
    }

    /// Activate or deactivate a shape, keeping `registry` in step.
    ///
    /// Returns false if the level has no shape with that id.
    pub fn set_active(&mut self, id: ShapeId, active: bool, registry: &mut ShapeRegistry) -> bool {
        let Some(entry) = self.shapes.iter_mut().find(|s| s.shape.id == id) else {
            log::warn!("Level '{}' has no shape {:?}", self.name, id);
            return false;
        };

        entry.active = active;
        if active {
            registry.register(&entry.shape, entry.kind);
        } else {
            registry.unregister(id, entry.kind);
        }
        true
    }

    /// Move a shape's owner. An active shape is re-registered at the new place.
    pub fn move_shape(&mut self, id: ShapeId, position: DVec2, registry: &mut ShapeRegistry) -> bool {
        let Some(entry) = self.shapes.iter_mut().find(|s| s.shape.id == id) else {
            return false;
        };

        entry.shape.position = position;
        if entry.active {
            registry.unregister(id, entry.kind);
            registry.register(&entry.shape, entry.kind);
        }
        true
    }

    pub fn respawn_point(&self) -> DVec2 {
        self.respawn_point.unwrap_or(self.spawn)
    }
}
