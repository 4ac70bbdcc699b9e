// ── Screen geometry ───────────────────────────────────────────────────────────

use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in screen pixels (`right`/`bottom` exclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Rect {
    pub(crate) left: i32,
    pub(crate) top: i32,
    pub(crate) width: i32,
    pub(crate) height: i32,
}

impl Rect {
    pub(crate) const fn new(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self { left, top, width, height }
    }

    /// Build from Win32-style edges.
    pub(crate) const fn from_edges(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }

    pub(crate) const fn right(&self) -> i32 {
        self.left + self.width
    }

    pub(crate) const fn bottom(&self) -> i32 {
        self.top + self.height
    }

    pub(crate) const fn center(&self) -> (i32, i32) {
        (self.left + self.width / 2, self.top + self.height / 2)
    }

    /// Shrink by `margin` on every side.  Never produces a negative size.
    pub(crate) fn inset(&self, margin: i32) -> Self {
        Self::new(
            self.left + margin,
            self.top + margin,
            (self.width - margin * 2).max(0),
            (self.height - margin * 2).max(0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_and_center() {
        let r = Rect::from_edges(10, 20, 110, 220);
        assert_eq!(r, Rect::new(10, 20, 100, 200));
        assert_eq!((r.right(), r.bottom()), (110, 220));
        assert_eq!(r.center(), (60, 120));
    }

    #[test]
    fn inset_shrinks_both_sides() {
        let r = Rect::new(0, 0, 1920, 1040).inset(10);
        assert_eq!(r, Rect::new(10, 10, 1900, 1020));
    }

    #[test]
    fn inset_saturates_at_zero_size() {
        let r = Rect::new(0, 0, 15, 15).inset(10);
        assert_eq!((r.width, r.height), (0, 0));
    }
}
