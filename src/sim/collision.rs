//! Axis-aligned collision for the meadow
//!
//! Every gameplay entity is a box anchored at its top-left corner. Landing is
//! a one-sided check against the butterfly's previous bottom edge rather than
//! a swept test, so fast horizontal passes under a platform never snap.

use glam::Vec2;

/// Axis-aligned rectangle, `pos` is the top-left corner
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.pos.x + self.size.x
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size * 0.5
    }

    /// Strict overlap test: touching edges do not count
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.pos.x < other.right()
            && self.right() > other.pos.x
            && self.pos.y < other.bottom()
            && self.bottom() > other.pos.y
    }
}

/// Anything with a collision box
pub trait Bounds {
    fn bounds(&self) -> Rect;
}

/// AABB overlap between two entities
#[inline]
pub fn collides<A: Bounds + ?Sized, B: Bounds + ?Sized>(a: &A, b: &B) -> bool {
    a.bounds().overlaps(&b.bounds())
}

/// Whether a falling body should come to rest on `surface`
///
/// `body` is the box after this tick's movement and `vel_y` the vertical
/// velocity that moved it. The body lands only when falling and when its
/// bottom edge was at or above the surface top before the move.
pub fn lands_on(body: &Rect, vel_y: f32, surface: &Rect) -> bool {
    vel_y > 0.0 && body.overlaps(surface) && body.bottom() - vel_y <= surface.pos.y
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&Rect::new(5.0, 5.0, 10.0, 10.0)));
        assert!(!a.overlaps(&Rect::new(20.0, 0.0, 10.0, 10.0)));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&Rect::new(10.0, 0.0, 10.0, 10.0)));
        assert!(!a.overlaps(&Rect::new(0.0, 10.0, 10.0, 10.0)));
    }

    #[test]
    fn test_center() {
        let r = Rect::new(100.0, 400.0, 40.0, 40.0);
        assert_eq!(r.center(), Vec2::new(120.0, 420.0));
    }

    #[test]
    fn test_lands_when_falling_from_above() {
        let platform = Rect::new(0.0, 100.0, 100.0, 20.0);
        // Bottom moved from 98 to 104
        let body = Rect::new(10.0, 64.0, 40.0, 40.0);
        assert!(lands_on(&body, 6.0, &platform));
    }

    #[test]
    fn test_no_landing_when_rising() {
        let platform = Rect::new(0.0, 100.0, 100.0, 20.0);
        let body = Rect::new(10.0, 70.0, 40.0, 40.0);
        assert!(!lands_on(&body, -6.0, &platform));
    }

    #[test]
    fn test_no_landing_from_below() {
        let platform = Rect::new(0.0, 100.0, 100.0, 20.0);
        // Bottom was already below the top before the move
        let body = Rect::new(10.0, 80.0, 40.0, 40.0);
        assert!(!lands_on(&body, 3.0, &platform));
    }
}
