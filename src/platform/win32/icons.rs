// ── Desktop icon store ────────────────────────────────────────────────────────
//
// Wraps the shell's desktop `SysListView32`.  Reads go through a scratch
// buffer inside explorer (see `remote`); writes pass the packed point by value
// and need no buffer.  Every per-icon operation is fail-soft: a failure is
// logged at debug/trace level and the icon is skipped.
//
// The LVITEMW layout written into explorer assumes this binary has the same
// pointer width as explorer, i.e. a 64-bit build on 64-bit Windows.

use std::mem;

use tracing::{debug, trace};
use windows::{
    core::{PCWSTR, PWSTR},
    Win32::{
        Foundation::{HWND, LPARAM, POINT, WPARAM},
        UI::{
            Controls::{LVIF_TEXT, LVITEMW},
            WindowsAndMessaging::{
                FindWindowExW, GetWindowThreadProcessId, IsWindow, SendMessageW,
            },
        },
    },
};

use super::{
    messages::{
        CLASS_DEFVIEW, CLASS_LISTVIEW, CLASS_PROGMAN, CLASS_WORKERW, LVM_GETITEMCOUNT,
        LVM_GETITEMPOSITION, LVM_GETITEMTEXTW, LVM_SETITEMPOSITION,
    },
    remote::RemoteProcess,
};
use crate::{
    icon::IconPosition,
    platform::{pack_point, read_each, write_each},
    scheduler::IconDesk,
};

/// Longest caption read back, in UTF-16 units including the terminator.
const NAME_CAPACITY: usize = 260;

/// Discovered desktop list view plus the id of the process that owns it.
#[derive(Debug)]
struct Control {
    hwnd: HWND,
    pid: u32,
}

/// Indexed get/set access to the desktop icons' coordinates.
///
/// Starts undiscovered; call [`initialize`](Self::initialize) (or
/// [`refresh`](Self::refresh) after an explorer restart).
pub(crate) struct IconStore {
    control: Option<Control>,
    read_names: bool,
}

impl IconStore {
    /// `read_names` additionally fetches each icon's caption on reads.
    pub(crate) fn new(read_names: bool) -> Self {
        Self { control: None, read_names }
    }

    /// Locate the desktop list view.  `false` leaves the store undiscovered;
    /// every other operation then degrades to a no-op.
    pub(crate) fn initialize(&mut self) -> bool {
        self.control = find_desktop_listview().and_then(|hwnd| {
            let mut pid = 0u32;
            // SAFETY: hwnd was just returned by FindWindowExW; pid is a live
            // local the call writes once.
            unsafe { GetWindowThreadProcessId(hwnd, Some(&mut pid as *mut u32)) };
            (pid != 0).then_some(Control { hwnd, pid })
        });
        match &self.control {
            Some(c) => debug!(pid = c.pid, "found desktop icon list"),
            None => debug!("desktop icon list not found"),
        }
        self.control.is_some()
    }

    /// Re-run discovery, e.g. after the shell recreated its windows.
    pub(crate) fn refresh(&mut self) -> bool {
        self.initialize()
    }

    /// `true` while the discovered list view still exists.  After an
    /// explorer restart the old handle is dead and this turns `false`.
    pub(crate) fn is_initialized(&self) -> bool {
        // SAFETY: IsWindow accepts any handle value, including stale ones.
        self.control.as_ref().is_some_and(|c| unsafe { IsWindow(c.hwnd) }.as_bool())
    }

    /// Number of icons on the desktop; 0 when undiscovered.
    pub(crate) fn icon_count(&self) -> usize {
        let Some(c) = &self.control else { return 0 };
        // SAFETY: hwnd is the discovered list view; LVM_GETITEMCOUNT is a
        // read-only query without pointer parameters.
        let count = unsafe { SendMessageW(c.hwnd, LVM_GETITEMCOUNT, WPARAM(0), LPARAM(0)) };
        usize::try_from(count.0).unwrap_or(0)
    }

    /// Read icon `index`'s position out of explorer's address space.
    pub(crate) fn get_position(&self, index: usize) -> Option<IconPosition> {
        let c = self.control.as_ref()?;
        let process = RemoteProcess::open(c.pid)?;
        let buffer = process.alloc(mem::size_of::<POINT>())?;

        // SAFETY: the LPARAM is a POINT-sized committed buffer inside the
        // list view's own process, which is what LVM_GETITEMPOSITION writes to.
        let ok = unsafe {
            SendMessageW(
                c.hwnd,
                LVM_GETITEMPOSITION,
                WPARAM(index),
                LPARAM(buffer.remote_addr(0) as isize),
            )
        };
        if ok.0 == 0 {
            trace!(index, "LVM_GETITEMPOSITION failed");
            return None;
        }

        let point: POINT = buffer.read(0)?;
        let mut icon = IconPosition::new(index, point.x, point.y);
        if self.read_names {
            icon.name = self.icon_name(index);
        }
        Some(icon)
    }

    /// Caption of icon `index`, or `None` if it could not be read.
    pub(crate) fn icon_name(&self, index: usize) -> Option<String> {
        let c = self.control.as_ref()?;
        let item_len = mem::size_of::<LVITEMW>();
        let process = RemoteProcess::open(c.pid)?;
        let buffer = process.alloc(item_len + NAME_CAPACITY * mem::size_of::<u16>())?;

        // The item descriptor sits at the start of the buffer and points the
        // control at the text area right behind it.
        let item = LVITEMW {
            mask: LVIF_TEXT,
            iItem: i32::try_from(index).ok()?,
            iSubItem: 0,
            pszText: PWSTR(buffer.remote_addr(item_len) as *mut u16),
            cchTextMax: NAME_CAPACITY as i32,
            ..Default::default()
        };
        buffer.write(0, &item)?;

        // SAFETY: the LPARAM is an LVITEMW inside the list view's process
        // whose pszText/cchTextMax describe memory in the same allocation.
        let copied = unsafe {
            SendMessageW(
                c.hwnd,
                LVM_GETITEMTEXTW,
                WPARAM(index),
                LPARAM(buffer.remote_addr(0) as isize),
            )
        };
        let len = usize::try_from(copied.0).ok()?.min(NAME_CAPACITY - 1);

        let mut text = vec![0u16; len];
        buffer.read_slice(item_len, &mut text)?;
        Some(String::from_utf16_lossy(&text))
    }

    /// Move icon `index` to `(x, y)`.  No remote buffer is needed: the control
    /// takes the packed point by value.
    pub(crate) fn set_position(&self, index: usize, x: i32, y: i32) -> bool {
        let Some(c) = &self.control else { return false };
        // SAFETY: hwnd is the discovered list view; the LPARAM carries the
        // coordinates by value, no pointer is involved.
        let ok = unsafe {
            SendMessageW(c.hwnd, LVM_SETITEMPOSITION, WPARAM(index), LPARAM(pack_point(x, y)))
        };
        ok.0 != 0
    }

    /// Positions of every readable icon, in index order.
    pub(crate) fn get_all_positions(&self) -> Vec<IconPosition> {
        read_each(self.icon_count(), |i| self.get_position(i))
    }

    /// Apply every entry; a failed move does not stop the rest.
    pub(crate) fn set_all_positions(&self, positions: &[IconPosition]) -> usize {
        write_each(positions, |p| self.set_position(p.index, p.x, p.y))
    }
}

impl IconDesk for IconStore {
    fn is_ready(&self) -> bool {
        self.is_initialized()
    }

    fn refresh(&mut self) -> bool {
        IconStore::refresh(self)
    }

    fn snapshot(&mut self) -> Vec<IconPosition> {
        self.get_all_positions()
    }

    fn apply(&mut self, positions: &[IconPosition]) -> usize {
        self.set_all_positions(positions)
    }
}

// ── Discovery ─────────────────────────────────────────────────────────────────

/// Classic layout first (`Progman` → `SHELLDLL_DefView` → `SysListView32`),
/// then every top-level `WorkerW` in turn.
fn find_desktop_listview() -> Option<HWND> {
    if let Some(lv) = find_window(HWND::default(), HWND::default(), CLASS_PROGMAN)
        .and_then(listview_under)
    {
        return Some(lv);
    }

    let mut worker = HWND::default();
    loop {
        worker = find_window(HWND::default(), worker, CLASS_WORKERW)?;
        if let Some(lv) = listview_under(worker) {
            return Some(lv);
        }
    }
}

fn listview_under(host: HWND) -> Option<HWND> {
    let defview = find_window(host, HWND::default(), CLASS_DEFVIEW)?;
    find_window(defview, HWND::default(), CLASS_LISTVIEW)
}

/// `FindWindowExW` by class; `parent` null searches top-level windows.
fn find_window(parent: HWND, after: HWND, class: &str) -> Option<HWND> {
    let class_wide: Vec<u16> = class.encode_utf16().chain(std::iter::once(0)).collect();
    // SAFETY: class_wide is a null-terminated UTF-16 string that outlives the
    // call; parent/after are null or handles returned by earlier lookups.
    let found = unsafe { FindWindowExW(parent, after, PCWSTR(class_wide.as_ptr()), PCWSTR::null()) };
    found.ok().filter(|h| !h.is_invalid())
}
