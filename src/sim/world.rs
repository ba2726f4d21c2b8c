//! Shape registry
//!
//! Indexes the live static obstacles, hazards and goal zones of one level
//! session. The registry never mutates a shape; owners register and
//! unregister them as they become active or inactive.

use std::collections::BTreeMap;

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::rect::AxisRect;

/// Identity of a shape within a level session
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ShapeId(pub u32);

/// Which kind-set a shape belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShapeKind {
    /// Solid static geometry the body collides with
    Obstacle,
    /// Touching kills the body
    Hazard,
    /// Touching completes the level
    Goal,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 3] = [ShapeKind::Obstacle, ShapeKind::Hazard, ShapeKind::Goal];
}

/// A static rectangle owned by something positioned in the world
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub id: ShapeId,
    /// Owner's world position
    pub position: DVec2,
    /// Offset of the rect center from the owner position
    #[serde(default)]
    pub offset: DVec2,
    /// Full width and height
    pub size: DVec2,
}

impl Shape {
    pub fn new(id: ShapeId, position: DVec2, size: DVec2) -> Self {
        Self {
            id,
            position,
            offset: DVec2::ZERO,
            size,
        }
    }

    pub fn with_offset(mut self, offset: DVec2) -> Self {
        self.offset = offset;
        self
    }

    /// World rect, recomputed on every call
    #[inline]
    pub fn world_rect(&self) -> AxisRect {
        AxisRect::from_owner(self.position, self.offset, self.size)
    }
}

/// Live kind-sets of one level session.
///
/// Sets are keyed by [`ShapeId`] so iteration order is stable.
#[derive(Debug, Clone, Default)]
pub struct ShapeRegistry {
    obstacles: BTreeMap<ShapeId, Shape>,
    hazards: BTreeMap<ShapeId, Shape>,
    goals: BTreeMap<ShapeId, Shape>,
}

impl ShapeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn set(&self, kind: ShapeKind) -> &BTreeMap<ShapeId, Shape> {
        match kind {
            ShapeKind::Obstacle => &self.obstacles,
            ShapeKind::Hazard => &self.hazards,
            ShapeKind::Goal => &self.goals,
        }
    }

    fn set_mut(&mut self, kind: ShapeKind) -> &mut BTreeMap<ShapeId, Shape> {
        match kind {
            ShapeKind::Obstacle => &mut self.obstacles,
            ShapeKind::Hazard => &mut self.hazards,
            ShapeKind::Goal => &mut self.goals,
        }
    }

    /// Add a shape to the `kind` set. Registering an already present id is a no-op.
    ///
    /// The stored copy is kept as is: re-registering a moved or resized
    /// shape under the same id leaves the old geometry in place. Unregister
    /// it first (or use [`Level::move_shape`](crate::level::Level::move_shape))
    /// to update it.
    ///
    /// A shape lives in at most one kind-set, so a registration under a new
    /// kind moves it out of the old one.
    pub fn register(&mut self, shape: &Shape, kind: ShapeKind) {
        for other in ShapeKind::ALL {
            if other != kind && self.set_mut(other).remove(&shape.id).is_some() {
                log::warn!(
                    "Shape {:?} re-registered as {:?}, removed from {:?}",
                    shape.id,
                    kind,
                    other
                );
            }
        }
        self.set_mut(kind).entry(shape.id).or_insert(*shape);
    }

    /// Remove a shape from the `kind` set. Absent shapes are ignored.
    pub fn unregister(&mut self, id: ShapeId, kind: ShapeKind) {
        self.set_mut(kind).remove(&id);
    }

    pub fn contains(&self, id: ShapeId, kind: ShapeKind) -> bool {
        self.set(kind).contains_key(&id)
    }

    pub fn len(&self, kind: ShapeKind) -> usize {
        self.set(kind).len()
    }

    pub fn is_empty(&self, kind: ShapeKind) -> bool {
        self.set(kind).is_empty()
    }

    /// All registered shapes of `kind`
    pub fn shapes(&self, kind: ShapeKind) -> impl Iterator<Item = &Shape> {
        self.set(kind).values()
    }

    /// Shapes of `kind` whose world rect overlaps `query`
    pub fn query_overlapping(
        &self,
        kind: ShapeKind,
        query: AxisRect,
    ) -> impl Iterator<Item = &Shape> {
        self.set(kind)
            .values()
            .filter(move |shape| shape.world_rect().overlaps(&query))
    }

    /// First shape of `kind` overlapping `query`
    pub fn first_overlapping(&self, kind: ShapeKind, query: AxisRect) -> Option<&Shape> {
        self.query_overlapping(kind, query).next()
    }

    pub fn clear(&mut self) {
        self.obstacles.clear();
        self.hazards.clear();
        self.goals.clear();
    }

    /// Clear every kind-set and repopulate from the currently active shapes.
    pub fn rebuild_from<'a, I>(&mut self, active: I)
    where
        I: IntoIterator<Item = (&'a Shape, ShapeKind)>,
    {
        self.clear();
        for (shape, kind) in active {
            self.register(shape, kind);
        }
        log::debug!(
            "Registry rebuilt: {} obstacles, {} hazards, {} goals",
            self.obstacles.len(),
            self.hazards.len(),
            self.goals.len()
        );
    }
}
