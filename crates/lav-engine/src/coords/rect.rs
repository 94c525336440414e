use super::Vec2;

/// Axis-aligned rectangle in logical pixels (top-left origin).
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub const fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// Bottom-right corner.
    #[inline]
    pub fn end(self) -> Vec2 {
        self.origin + self.size
    }

    #[inline]
    pub fn center(self) -> Vec2 {
        self.origin + self.size / 2.0
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x <= 0.0 || self.size.y <= 0.0
    }

    /// Half-open containment: [origin, end). Empty rects contain nothing.
    #[inline]
    pub fn contains(self, p: Vec2) -> bool {
        let end = self.end();
        p.x >= self.origin.x && p.y >= self.origin.y && p.x < end.x && p.y < end.y
    }

    /// Overlap of two rects. Disjoint rects yield a zero-size rect anchored at
    /// the clamped corner, so callers never see negative sizes.
    #[inline]
    pub fn clip(self, other: Rect) -> Rect {
        let origin = self.origin.max(other.origin);
        let end = self.end().min(other.end());
        Rect::from_origin_size(origin, (end - origin).max(Vec2::ZERO))
    }

    /// Shrinks the rect inward. Insets larger than the rect clamp the size at zero.
    #[inline]
    pub fn inset(self, top: f32, right: f32, bottom: f32, left: f32) -> Rect {
        let origin = self.origin + Vec2::new(left, top);
        let size = self.size - Vec2::new(left + right, top + bottom);
        Rect::from_origin_size(origin, size.max(Vec2::ZERO))
    }

    /// Clamps a point into the rect, inclusive on both ends.
    #[inline]
    pub fn clamp_point(self, p: Vec2) -> Vec2 {
        p.max(self.origin).min(self.end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(x: f32, y: f32, w: f32, h: f32) -> Rect { Rect::new(x, y, w, h) }

    // ── contains ──────────────────────────────────────────────────────────

    #[test]
    fn contains_is_half_open() {
        let rect = r(0.0, 0.0, 10.0, 10.0);
        assert!(rect.contains(Vec2::new(0.0, 0.0)));
        assert!(rect.contains(Vec2::new(9.5, 9.5)));
        assert!(!rect.contains(Vec2::new(10.0, 5.0)));
        assert!(!rect.contains(Vec2::new(-0.1, 5.0)));
    }

    #[test]
    fn empty_rect_contains_nothing() {
        assert!(!r(5.0, 5.0, 0.0, 0.0).contains(Vec2::new(5.0, 5.0)));
    }

    // ── clip ──────────────────────────────────────────────────────────────

    #[test]
    fn clip_overlapping() {
        let a = r(0.0, 0.0, 10.0, 10.0);
        let b = r(5.0, 5.0, 10.0, 10.0);
        assert_eq!(a.clip(b), r(5.0, 5.0, 5.0, 5.0));
    }

    #[test]
    fn clip_disjoint_is_zero_sized() {
        let a = r(0.0, 0.0, 5.0, 5.0);
        let b = r(20.0, 20.0, 5.0, 5.0);
        let c = a.clip(b);
        assert!(c.is_empty());
        assert!(c.size.x >= 0.0 && c.size.y >= 0.0);
    }

    // ── inset ─────────────────────────────────────────────────────────────

    #[test]
    fn inset_shrinks_each_side() {
        assert_eq!(r(0.0, 0.0, 100.0, 50.0).inset(1.0, 2.0, 3.0, 4.0), r(4.0, 1.0, 94.0, 46.0));
    }

    #[test]
    fn inset_never_goes_negative() {
        assert_eq!(r(0.0, 0.0, 4.0, 4.0).inset(5.0, 5.0, 5.0, 5.0).size, Vec2::ZERO);
    }

    #[test]
    fn clamp_point_pins_to_edges() {
        let rect = r(0.0, 0.0, 800.0, 600.0);
        assert_eq!(rect.clamp_point(Vec2::new(-4.0, 900.0)), Vec2::new(0.0, 600.0));
    }
}
