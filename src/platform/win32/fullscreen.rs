// ── Full-screen detection ─────────────────────────────────────────────────────
//
// Two signals, cheapest first:
//   1. the shell's own notification state (games, presentations, "busy")
//   2. the foreground window's rectangle against the primary screen.
// The desktop windows themselves never count as full-screen.

use windows::Win32::{
    Foundation::{HWND, RECT},
    UI::{
        Shell::{
            SHQueryUserNotificationState, QUNS_BUSY, QUNS_PRESENTATION_MODE,
            QUNS_RUNNING_D3D_FULL_SCREEN,
        },
        WindowsAndMessaging::{GetClassNameW, GetForegroundWindow, GetWindowRect, IsWindowVisible},
    },
};

use super::{
    display,
    messages::{CLASS_PROGMAN, CLASS_WORKERW},
};
use crate::{geometry::Rect, platform::covers_screen, scheduler::FullscreenProbe};

/// Edge slack when comparing a window against the screen.
const COVER_TOLERANCE: i32 = 10;

pub(crate) struct ShellFullscreenProbe;

impl FullscreenProbe for ShellFullscreenProbe {
    fn fullscreen_active(&self) -> bool {
        shell_reports_busy() || foreground_covers_screen()
    }
}

fn shell_reports_busy() -> bool {
    // SAFETY: no parameters; the state is returned by value.
    match unsafe { SHQueryUserNotificationState() } {
        Ok(state) => {
            state == QUNS_BUSY
                || state == QUNS_RUNNING_D3D_FULL_SCREEN
                || state == QUNS_PRESENTATION_MODE
        }
        Err(_) => false,
    }
}

fn foreground_covers_screen() -> bool {
    // SAFETY: GetForegroundWindow takes no parameters; a null result is
    // checked before use.
    let hwnd = unsafe { GetForegroundWindow() };
    if hwnd.is_invalid() || is_desktop(hwnd) {
        return false;
    }
    // SAFETY: hwnd is the current foreground window; a stale handle only
    // makes the calls fail.
    if !unsafe { IsWindowVisible(hwnd) }.as_bool() {
        return false;
    }

    let mut rc = RECT::default();
    // SAFETY: rc is a live local RECT the call writes once.
    if unsafe { GetWindowRect(hwnd, &mut rc) }.is_err() {
        return false;
    }
    let window = Rect::from_edges(rc.left, rc.top, rc.right, rc.bottom);
    covers_screen(window, display::screen_bounds(), COVER_TOLERANCE)
}

fn is_desktop(hwnd: HWND) -> bool {
    let mut buf = [0u16; 64];
    // SAFETY: buf is a writable local slice; the call truncates to its length.
    let len = unsafe { GetClassNameW(hwnd, &mut buf) };
    let Ok(len) = usize::try_from(len) else { return false };
    let class = String::from_utf16_lossy(&buf[..len]);
    class == CLASS_PROGMAN || class == CLASS_WORKERW
}
