//! Axis-aligned pixel box
//!
//! The player's collision shape. Half-open on both axes: a box at `pos` with
//! `size` covers pixels `[pos, pos + size)`.

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

/// Axis-aligned box in integer pixel space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelBox {
    /// Top-left corner
    pub pos: IVec2,
    /// Width and height (both positive)
    pub size: IVec2,
}

impl PixelBox {
    pub fn new(pos: IVec2, size: IVec2) -> Self {
        Self { pos, size }
    }

    #[inline]
    pub fn min(&self) -> IVec2 {
        self.pos
    }

    /// Exclusive far corner
    #[inline]
    pub fn max(&self) -> IVec2 {
        self.pos + self.size
    }

    /// Geometric centre (may fall between pixels)
    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos.as_vec2() + self.size.as_vec2() * 0.5
    }

    /// Twice the centre, kept integral for exact comparisons
    #[inline]
    pub fn center_x2(&self) -> IVec2 {
        self.pos * 2 + self.size
    }

    /// Strict overlap with another half-open rectangle
    #[inline]
    pub fn overlaps(&self, min: IVec2, max: IVec2) -> bool {
        self.pos.x < max.x && self.max().x > min.x && self.pos.y < max.y && self.max().y > min.y
    }

    #[must_use]
    pub fn translated(&self, delta: IVec2) -> Self {
        Self::new(self.pos + delta, self.size)
    }

    /// Keep the box inside `[0, extent)` on both axes
    #[must_use]
    pub fn clamped_within(&self, extent: IVec2) -> Self {
        let limit = (extent - self.size).max(IVec2::ZERO);
        Self::new(self.pos.clamp(IVec2::ZERO, limit), self.size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let b = PixelBox::new(IVec2::new(0, 0), IVec2::new(10, 10));
        assert!(!b.overlaps(IVec2::new(10, 0), IVec2::new(20, 10)));
        assert!(b.overlaps(IVec2::new(9, 9), IVec2::new(20, 20)));
    }

    #[test]
    fn test_center() {
        let b = PixelBox::new(IVec2::new(10, 20), IVec2::new(5, 4));
        assert_eq!(b.center(), Vec2::new(12.5, 22.0));
        assert_eq!(b.center_x2(), IVec2::new(25, 44));
    }

    #[test]
    fn test_clamp() {
        let extent = IVec2::new(100, 60);
        let b = PixelBox::new(IVec2::new(95, -4), IVec2::new(10, 10));
        assert_eq!(b.clamped_within(extent).pos, IVec2::new(90, 0));
    }
}
