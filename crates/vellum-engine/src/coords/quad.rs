use super::Vec2;

/// Axis-aligned rectangle given by its edges, y-up (`bottom` < `top`).
///
/// This is the shape used by frames, clip regions and scissor rectangles.
/// Edges are not required to be ordered; [`normalized`](Quad::normalized)
/// produces the canonical form.
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Quad {
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
    pub top: f32,
}

impl Quad {
    #[inline]
    pub const fn new(left: f32, bottom: f32, right: f32, top: f32) -> Self {
        Self { left, bottom, right, top }
    }

    #[inline]
    pub fn width(self) -> f32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(self) -> f32 {
        self.top - self.bottom
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }

    /// Swaps edges so that `left <= right` and `bottom <= top`.
    #[inline]
    pub fn normalized(self) -> Self {
        let (left, right) = if self.left <= self.right {
            (self.left, self.right)
        } else {
            (self.right, self.left)
        };
        let (bottom, top) = if self.bottom <= self.top {
            (self.bottom, self.top)
        } else {
            (self.top, self.bottom)
        };
        Quad { left, bottom, right, top }
    }

    #[inline]
    pub fn translated(self, by: Vec2) -> Self {
        Quad::new(
            self.left + by.x,
            self.bottom + by.y,
            self.right + by.x,
            self.top + by.y,
        )
    }

    /// Clamps each edge into `bounds`. The result may be empty.
    ///
    /// This is the scissor clamp: a region partially outside the viewport is
    /// cut down to the visible part rather than rejected.
    #[inline]
    pub fn clamped_to(self, bounds: Quad) -> Self {
        let a = self.normalized();
        let b = bounds.normalized();
        Quad::new(
            a.left.max(b.left).min(b.right),
            a.bottom.max(b.bottom).min(b.top),
            a.right.min(b.right).max(b.left),
            a.top.min(b.top).max(b.bottom),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(l: f32, b: f32, r: f32, t: f32) -> Quad {
        Quad::new(l, b, r, t)
    }

    // ── normalized ────────────────────────────────────────────────────────

    #[test]
    fn normalized_ordered_is_identity() {
        let quad = q(0.0, 0.0, 10.0, 20.0);
        assert_eq!(quad.normalized(), quad);
    }

    #[test]
    fn normalized_swaps_reversed_edges() {
        let n = q(10.0, 20.0, 0.0, 0.0).normalized();
        assert_eq!(n, q(0.0, 0.0, 10.0, 20.0));
    }

    // ── translated ────────────────────────────────────────────────────────

    #[test]
    fn translated_moves_all_edges() {
        let moved = q(0.0, 0.0, 10.0, 10.0).translated(Vec2::new(5.0, -2.0));
        assert_eq!(moved, q(5.0, -2.0, 15.0, 8.0));
    }

    // ── clamped_to ────────────────────────────────────────────────────────

    #[test]
    fn clamp_inside_is_identity() {
        let inner = q(10.0, 10.0, 50.0, 50.0);
        let bounds = q(0.0, 0.0, 100.0, 100.0);
        assert_eq!(inner.clamped_to(bounds), inner);
    }

    #[test]
    fn clamp_cuts_overhang() {
        let region = q(-20.0, 50.0, 120.0, 150.0);
        let bounds = q(0.0, 0.0, 100.0, 100.0);
        assert_eq!(region.clamped_to(bounds), q(0.0, 50.0, 100.0, 100.0));
    }

    #[test]
    fn clamp_disjoint_is_empty() {
        let region = q(200.0, 200.0, 300.0, 300.0);
        let bounds = q(0.0, 0.0, 100.0, 100.0);
        assert!(region.clamped_to(bounds).is_empty());
    }

    #[test]
    fn empty_when_zero_area() {
        assert!(q(5.0, 0.0, 5.0, 10.0).is_empty());
        assert!(!q(0.0, 0.0, 1.0, 1.0).is_empty());
    }
}
