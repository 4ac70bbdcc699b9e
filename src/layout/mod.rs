// ── Layout core ───────────────────────────────────────────────────────────────
//
// Pure Rust: turns a snapshot plus a mode into a new snapshot.  No Win32
// types and no I/O; every randomised step takes the caller's RNG so that
// tests can seed it.

pub(crate) mod engine;
pub(crate) mod letters;
pub(crate) mod mode;
pub(crate) mod placement;
pub(crate) mod word;


use serde::{Deserialize, Serialize};

pub(crate) use engine::RearrangementEngine;
pub(crate) use mode::Mode;
pub(crate) use placement::PlacementValidator;

/// Pixel metrics shared by every layout strategy.
///
/// Persisted under `layout` in the settings file; each field falls back to
/// its default when absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct LayoutConfig {
    /// Width of one icon's bounding box.
    pub(crate) icon_width: i32,
    /// Height of one icon's bounding box.
    pub(crate) icon_height: i32,
    /// Gap kept between the working area and any icon.
    pub(crate) margin: i32,
    /// Closer than this on both axes counts as overlapping.
    pub(crate) min_spacing: i32,
    /// Distance between neighbouring glyph cells in Word mode.
    pub(crate) icon_spacing: i32,
    /// Extra gap between letters in Word mode.
    pub(crate) letter_spacing: i32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            icon_width: 48,
            icon_height: 48,
            margin: 10,
            min_spacing: 60,
            icon_spacing: 80,
            letter_spacing: 60,
        }
    }
}
