//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Caller-supplied timestep only
//! - Stable iteration order (by shape ID)
//! - No rendering, audio or scene-loading dependencies (see `crate::hooks`)

pub mod body;
pub mod rect;
pub mod sequence;
pub mod state;
pub mod world;

pub use body::{BodyTuning, JumpInput, KinematicBody, StepReport};
pub use rect::{Axis, AxisRect, min_separation, overlaps};
pub use sequence::{DeathSequence, DeathStep, GoalFrame, GoalSequence, SequenceStatus, Watchdog};
pub use state::{FrameTime, GameplayTuning, Phase, Runner, TickInput, TickReport};
pub use world::{Shape, ShapeId, ShapeKind, ShapeRegistry};
