use std::ffi::c_void;

use windows::Win32::{
    Foundation::RECT,
    UI::WindowsAndMessaging::{
        GetSystemMetrics, SystemParametersInfoW, SM_CXSCREEN, SM_CYSCREEN, SPI_GETWORKAREA,
        SYSTEM_PARAMETERS_INFO_UPDATE_FLAGS,
    },
};

use crate::geometry::Rect;

/// Primary monitor working area (screen minus taskbar), or `None` if the
/// query fails or reports an empty rectangle.
pub(crate) fn work_area() -> Option<Rect> {
    let mut rc = RECT::default();
    // SAFETY: SPI_GETWORKAREA writes exactly one RECT through pvParam; rc is a
    // live local of that type.
    let ok = unsafe {
        SystemParametersInfoW(
            SPI_GETWORKAREA,
            0,
            Some(&mut rc as *mut RECT as *mut c_void),
            SYSTEM_PARAMETERS_INFO_UPDATE_FLAGS(0),
        )
    };
    if ok.is_err() {
        return None;
    }
    let area = Rect::from_edges(rc.left, rc.top, rc.right, rc.bottom);
    (area.width > 0 && area.height > 0).then_some(area)
}

/// Full primary-screen rectangle, origin at (0, 0).
pub(crate) fn screen_bounds() -> Rect {
    // SAFETY: GetSystemMetrics takes no pointers and returns 0 on failure.
    let (w, h) = unsafe { (GetSystemMetrics(SM_CXSCREEN), GetSystemMetrics(SM_CYSCREEN)) };
    Rect::new(0, 0, w, h)
}
