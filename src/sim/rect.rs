//! Axis-aligned rectangle geometry for entities
//!
//! Every entity occupies a rectangle in screen space:
//! - origin at the top-left of the play-field
//! - x grows right, y grows down
//! - `pos` is the top-left corner, `size` the (width, height)

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    /// Width and height
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    /// Rectangle of the given size centred on `center`
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            pos: center - size / 2.0,
            size,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Move by an offset
    #[inline]
    pub fn translate(&mut self, delta: Vec2) {
        self.pos += delta;
    }

    /// Strict overlap test (touching edges do not collide)
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }

    /// Push the rectangle back inside a `width` x `height` area anchored at the origin
    pub fn clamp_inside(&mut self, width: f32, height: f32) {
        if self.left() < 0.0 {
            self.pos.x = 0.0;
        }
        if self.right() > width {
            self.pos.x = width - self.size.x;
        }
        if self.top() < 0.0 {
            self.pos.y = 0.0;
        }
        if self.bottom() > height {
            self.pos.y = height - self.size.y;
        }
    }

    /// True if the rectangle lies entirely inside a `width` x `height` area
    pub fn is_inside(&self, width: f32, height: f32) -> bool {
        self.left() >= 0.0 && self.top() >= 0.0 && self.right() <= width && self.bottom() <= height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_and_center() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert_eq!(r.left(), 10.0);
        assert_eq!(r.right(), 40.0);
        assert_eq!(r.top(), 20.0);
        assert_eq!(r.bottom(), 60.0);
        assert_eq!(r.center(), Vec2::new(25.0, 40.0));
    }

    #[test]
    fn test_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        assert!(a.overlaps(&a));
        // Touching edges only
        assert!(!a.overlaps(&Rect::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.overlaps(&Rect::new(0.0, 20.0, 10.0, 10.0)));
    }

    #[test]
    fn test_clamp_inside() {
        let mut r = Rect::new(-5.0, 595.0, 20.0, 20.0);
        r.clamp_inside(800.0, 600.0);
        assert_eq!(r.pos, Vec2::new(0.0, 580.0));
        assert!(r.is_inside(800.0, 600.0));
    }

    #[test]
    fn test_from_center() {
        let r = Rect::from_center(Vec2::new(-100.0, 300.0), Vec2::new(64.0, 32.0));
        assert_eq!(r.center(), Vec2::new(-100.0, 300.0));
        assert_eq!(r.left(), -132.0);
    }
}
