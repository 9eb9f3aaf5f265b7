//! Catch detection
//!
//! Fruit and basket are both axis-aligned rectangles. The vertical test is
//! inclusive (touching edges count, so a fruit landing flush on the rim is
//! caught) while the horizontal test is strict.

use glam::Vec2;

/// Axis-aligned box given by its top-left corner and size (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub const fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    pub fn center(&self) -> Vec2 {
        self.min + self.size * 0.5
    }

    /// Inclusive vertical overlap
    pub fn overlaps_vertically(&self, other: &Aabb) -> bool {
        self.max().y >= other.min.y && self.min.y <= other.max().y
    }

    /// Strict horizontal overlap
    pub fn overlaps_horizontally(&self, other: &Aabb) -> bool {
        self.max().x > other.min.x && self.min.x < other.max().x
    }

    /// Both axes overlap; symmetric in its arguments
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.overlaps_vertically(other) && self.overlaps_horizontally(other)
    }
}

/// Whether a fruit's bounds are caught by the basket's bounds
#[inline]
pub fn is_caught(fruit: &Aabb, basket: &Aabb) -> bool {
    fruit.overlaps(basket)
}
