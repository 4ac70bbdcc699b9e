// ── Platform abstraction layer ────────────────────────────────────────────────
//
// This module defines the interface the rest of the codebase uses to talk to
// the desktop.  No `unsafe` lives here; all Win32 FFI is confined to the
// `win32` sub-module and never leaks outward.  The helpers below are pure so
// they can be tested on any host.

#[cfg(windows)]
pub mod win32;

use tracing::{debug, trace};

use crate::{
    error::{JumbleError, Result},
    geometry::Rect,
    icon::IconPosition,
    scheduler::{FullscreenProbe, IconDesk},
};

// ── Desktop handles ───────────────────────────────────────────────────────────

#[cfg(windows)]
pub(crate) type Desktop = win32::icons::IconStore;
#[cfg(not(windows))]
pub(crate) type Desktop = NoDesktop;

/// Icon store for the current session.  Discovery failure is not an error:
/// the store stays undiscovered and the scheduler retries on each tick.
#[cfg(windows)]
pub(crate) fn desktop(read_names: bool) -> Result<Desktop> {
    let mut store = win32::icons::IconStore::new(read_names);
    store.initialize();
    Ok(store)
}

#[cfg(not(windows))]
pub(crate) fn desktop(_read_names: bool) -> Result<Desktop> {
    Err(JumbleError::Unsupported("desktop icon access"))
}

/// Like [`desktop`], but fails with [`JumbleError::NoIconControl`] when the
/// icon list cannot be found.
pub(crate) fn ready_desktop(read_names: bool) -> Result<Desktop> {
    let desk = desktop(read_names)?;
    if desk.is_ready() {
        Ok(desk)
    } else {
        Err(JumbleError::NoIconControl)
    }
}

/// Uninhabited desk for hosts without a shell desktop.
#[cfg(not(windows))]
pub(crate) enum NoDesktop {}

#[cfg(not(windows))]
impl IconDesk for NoDesktop {
    fn is_ready(&self) -> bool {
        match *self {}
    }

    fn refresh(&mut self) -> bool {
        match *self {}
    }

    fn snapshot(&mut self) -> Vec<IconPosition> {
        match *self {}
    }

    fn apply(&mut self, _positions: &[IconPosition]) -> usize {
        match *self {}
    }
}

pub(crate) fn fullscreen_probe() -> impl FullscreenProbe {
    #[cfg(windows)]
    {
        win32::fullscreen::ShellFullscreenProbe
    }
    #[cfg(not(windows))]
    {
        crate::scheduler::NeverFullscreen
    }
}

/// Hold the per-session scheduler lock until the returned value is dropped.
#[cfg(windows)]
pub(crate) fn single_instance() -> Result<win32::instance::InstanceGuard> {
    win32::instance::InstanceGuard::acquire()
}

#[cfg(not(windows))]
pub(crate) fn single_instance() -> Result<()> {
    Err(JumbleError::Unsupported("the scheduler"))
}

// ── Pure helpers ──────────────────────────────────────────────────────────────

/// Pack a point into the single message parameter the list control expects
/// for `LVM_SETITEMPOSITION`: low 16 bits = x, high 16 bits = y.
///
/// Each coordinate is clamped into the signed 16-bit range the control
/// unpacks, so out-of-range input saturates instead of wrapping.
pub(crate) fn pack_point(x: i32, y: i32) -> isize {
    let lo = clamp_i16(x) as u16 as u32;
    let hi = clamp_i16(y) as u16 as u32;
    // Reinterpret as signed first so a negative y sign-extends like MAKELPARAM.
    ((hi << 16) | lo) as i32 as isize
}

// ── Fail-soft batches ─────────────────────────────────────────────────────────

/// Read indices `0..count` in order, leaving out any whose read fails.
#[cfg_attr(not(windows), allow(dead_code))]
pub(crate) fn read_each(
    count: usize,
    mut read: impl FnMut(usize) -> Option<IconPosition>,
) -> Vec<IconPosition> {
    let positions: Vec<_> = (0..count).filter_map(&mut read).collect();
    if positions.len() < count {
        debug!(count, read = positions.len(), "some icon positions were unreadable");
    }
    positions
}

/// Attempt every write; a failed one does not stop the rest.  Returns how
/// many succeeded.
#[cfg_attr(not(windows), allow(dead_code))]
pub(crate) fn write_each(
    positions: &[IconPosition],
    mut write: impl FnMut(&IconPosition) -> bool,
) -> usize {
    let mut moved = 0;
    for p in positions {
        if write(p) {
            moved += 1;
        } else {
            trace!(index = p.index, "icon move failed");
        }
    }
    if moved < positions.len() {
        debug!(requested = positions.len(), moved, "some icons could not be moved");
    }
    moved
}

/// Inverse of [`pack_point`] (`GET_X_LPARAM` / `GET_Y_LPARAM`).
#[cfg(test)]
pub(crate) fn unpack_point(packed: isize) -> (i32, i32) {
    let raw = packed as u32;
    (i32::from(raw as u16 as i16), i32::from((raw >> 16) as u16 as i16))
}

fn clamp_i16(v: i32) -> i16 {
    v.clamp(i32::from(i16::MIN), i32::from(i16::MAX)) as i16
}

/// Does `window` cover `screen`, each edge within `tolerance` pixels?
#[cfg_attr(not(windows), allow(dead_code))]
pub(crate) fn covers_screen(window: Rect, screen: Rect, tolerance: i32) -> bool {
    (window.left - screen.left).abs() <= tolerance
        && (window.top - screen.top).abs() <= tolerance
        && (window.width - screen.width).abs() <= tolerance
        && (window.height - screen.height).abs() <= tolerance
}

/// Primary monitor working area, or `None` where it cannot be queried.
pub(crate) fn work_area() -> Option<Rect> {
    #[cfg(windows)]
    {
        win32::display::work_area()
    }
    #[cfg(not(windows))]
    {
        None
    }
}
