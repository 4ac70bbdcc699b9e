// ── Placement validation ──────────────────────────────────────────────────────
//
// Owns the safe area (working area minus margin) and keeps every coordinate
// handed back to callers inside it, icon bounding box included.

use rand::Rng;
use tracing::trace;

use super::LayoutConfig;
use crate::{geometry::Rect, icon::IconPosition};

/// Used when the display geometry provider has nothing to offer.
pub(crate) const FALLBACK_WORK_AREA: Rect = Rect::new(0, 0, 1920, 1080);

/// Re-roll budget per icon in [`PlacementValidator::resolve_overlaps`].
pub(crate) const MAX_OVERLAP_ATTEMPTS: usize = 50;

/// Clamps, generates and declutters icon coordinates within the safe area.
#[derive(Debug, Clone)]
pub(crate) struct PlacementValidator {
    area: Rect,
    icon_width: i32,
    icon_height: i32,
}

impl PlacementValidator {
    /// `work_area` is the primary monitor's working area, or `None` when it
    /// could not be queried.
    pub(crate) fn new(work_area: Option<Rect>, config: &LayoutConfig) -> Self {
        let area = work_area.unwrap_or(FALLBACK_WORK_AREA).inset(config.margin);
        Self {
            area,
            icon_width: config.icon_width,
            icon_height: config.icon_height,
        }
    }

    pub(crate) fn safe_area(&self) -> Rect {
        self.area
    }

    pub(crate) fn icon_size(&self) -> (i32, i32) {
        (self.icon_width, self.icon_height)
    }

    /// Largest x that still keeps the icon's box inside the area.
    /// Never less than `left`, so a too-narrow area pins icons to its edge.
    fn max_x(&self) -> i32 {
        (self.area.right() - self.icon_width).max(self.area.left)
    }

    fn max_y(&self) -> i32 {
        (self.area.bottom() - self.icon_height).max(self.area.top)
    }

    /// Pull `(x, y)` into `[left, right - icon_width] × [top, bottom - icon_height]`.
    pub(crate) fn clamp(&self, x: i32, y: i32) -> (i32, i32) {
        (
            x.clamp(self.area.left, self.max_x()),
            y.clamp(self.area.top, self.max_y()),
        )
    }

    /// Same bounds as [`clamp`](Self::clamp), without moving anything.
    pub(crate) fn is_valid(&self, x: i32, y: i32) -> bool {
        (self.area.left..=self.max_x()).contains(&x) && (self.area.top..=self.max_y()).contains(&y)
    }

    /// Uniform over `[left, right - icon_width) × [top, bottom - icon_height)`.
    pub(crate) fn random_point<R: Rng + ?Sized>(&self, rng: &mut R) -> (i32, i32) {
        (
            sample(rng, self.area.left, self.max_x()),
            sample(rng, self.area.top, self.max_y()),
        )
    }

    /// Greedy declutter in input order.
    ///
    /// A position closer than `min_spacing` on both axes to an already
    /// accepted one is re-rolled up to [`MAX_OVERLAP_ATTEMPTS`] times; if the
    /// budget runs out the last attempt is kept.  Icons are never dropped.
    pub(crate) fn resolve_overlaps<R: Rng + ?Sized>(
        &self,
        positions: Vec<IconPosition>,
        min_spacing: i32,
        rng: &mut R,
    ) -> Vec<IconPosition> {
        let mut accepted: Vec<IconPosition> = Vec::with_capacity(positions.len());

        for mut pos in positions {
            let mut attempts = 0;
            while attempts < MAX_OVERLAP_ATTEMPTS && overlaps_any(&pos, &accepted, min_spacing) {
                (pos.x, pos.y) = self.random_point(rng);
                attempts += 1;
            }
            if attempts == MAX_OVERLAP_ATTEMPTS && overlaps_any(&pos, &accepted, min_spacing) {
                trace!(index = pos.index, "overlap budget exhausted; keeping last attempt");
            }
            accepted.push(pos);
        }

        accepted
    }
}

/// Half-open `[lo, hi)`; an empty range collapses to `lo`.
fn sample<R: Rng + ?Sized>(rng: &mut R, lo: i32, hi: i32) -> i32 {
    if hi > lo {
        rng.gen_range(lo..hi)
    } else {
        lo
    }
}

fn overlaps_any(pos: &IconPosition, accepted: &[IconPosition], min_spacing: i32) -> bool {
    accepted.iter().any(|other| {
        (pos.x - other.x).abs() < min_spacing && (pos.y - other.y).abs() < min_spacing
    })
}
