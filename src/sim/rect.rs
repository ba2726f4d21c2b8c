//! Axis-aligned rectangle geometry
//!
//! Rectangles are always derived on demand from an owner's position, offset
//! and size. Nothing here stores or caches them.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// One of the two world axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// Component of `v` along this axis
    #[inline]
    pub fn of(self, v: DVec2) -> f64 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
        }
    }

    /// Vector with `amount` on this axis and zero on the other
    #[inline]
    pub fn vector(self, amount: f64) -> DVec2 {
        match self {
            Axis::X => DVec2::new(amount, 0.0),
            Axis::Y => DVec2::new(0.0, amount),
        }
    }
}

/// An axis-aligned box described by its center and half extents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRect {
    pub center: DVec2,
    pub half_size: DVec2,
}

impl AxisRect {
    pub fn new(center: DVec2, half_size: DVec2) -> Self {
        Self { center, half_size }
    }

    /// Rect for an owner at `position` with a local `offset` and full `size`
    #[inline]
    pub fn from_owner(position: DVec2, offset: DVec2, size: DVec2) -> Self {
        Self {
            center: position + offset,
            half_size: size * 0.5,
        }
    }

    /// Rect spanning the given corners
    pub fn from_min_max(min: DVec2, max: DVec2) -> Self {
        Self {
            center: (min + max) * 0.5,
            half_size: (max - min) * 0.5,
        }
    }

    #[inline]
    pub fn min(&self) -> DVec2 {
        self.center - self.half_size
    }

    #[inline]
    pub fn max(&self) -> DVec2 {
        self.center + self.half_size
    }

    #[inline]
    pub fn size(&self) -> DVec2 {
        self.half_size * 2.0
    }

    /// Same rect moved by `delta`
    #[inline]
    pub fn translated(&self, delta: DVec2) -> Self {
        Self {
            center: self.center + delta,
            half_size: self.half_size,
        }
    }

    /// Open-interval overlap on both axes. Touching edges do not overlap.
    #[inline]
    pub fn overlaps(&self, other: &AxisRect) -> bool {
        overlaps(self, other)
    }
}

/// Open-interval overlap test: `a_min < b_max && a_max > b_min` on both axes
#[inline]
pub fn overlaps(a: &AxisRect, b: &AxisRect) -> bool {
    let (a_min, a_max) = (a.min(), a.max());
    let (b_min, b_max) = (b.min(), b.max());
    a_min.x < b_max.x && a_max.x > b_min.x && a_min.y < b_max.y && a_max.y > b_min.y
}

/// Smallest signed push along `axis` that moves `moving` out of `other`.
///
/// Compares penetration entering from the low side (`other_max - self_min`)
/// with penetration from the high side (`self_max - other_min`) and pushes
/// toward whichever side needs the smaller correction. Positive means
/// "move `moving` toward +axis".
pub fn min_separation(moving: &AxisRect, other: &AxisRect, axis: Axis) -> f64 {
    let from_low = axis.of(other.max()) - axis.of(moving.min());
    let from_high = axis.of(moving.max()) - axis.of(other.min());

    if from_low < from_high {
        from_low
    } else {
        -from_high
    }
}
