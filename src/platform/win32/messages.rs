// ── List-view message constants ───────────────────────────────────────────────
//
// Source of truth: CommCtrl.h.  Only the subset the icon accessor sends is
// listed here.  All LVM_* values are sent via
// SendMessageW(hwnd_listview, LVM_*, wparam, lparam).

/// Base of the list-view message range.
const LVM_FIRST: u32 = 0x1000;

/// Return the number of items.  WPARAM=0; LPARAM=0.
pub(super) const LVM_GETITEMCOUNT: u32 = LVM_FIRST + 4;

/// Move an item.  WPARAM=item index; LPARAM=MAKELPARAM(x, y).
pub(super) const LVM_SETITEMPOSITION: u32 = LVM_FIRST + 15;

/// Copy an item's position.  WPARAM=item index; LPARAM=`POINT*` which must be
/// addressable from the list view's own process.
pub(super) const LVM_GETITEMPOSITION: u32 = LVM_FIRST + 16;

/// Copy an item's caption.  WPARAM=item index; LPARAM=`LVITEMW*` (with
/// `pszText`/`cchTextMax` set) in the list view's own process.  Returns the
/// number of characters copied.
pub(super) const LVM_GETITEMTEXTW: u32 = LVM_FIRST + 115;

// ── Window classes ────────────────────────────────────────────────────────────
//
// The desktop nests `SysListView32` under `SHELLDLL_DefView`, whose parent is
// `Progman` on a classic shell or one of the `WorkerW` wallpaper hosts once
// the wallpaper slideshow / animated background has split them.

pub(super) const CLASS_PROGMAN: &str = "Progman";
pub(super) const CLASS_WORKERW: &str = "WorkerW";
pub(super) const CLASS_DEFVIEW: &str = "SHELLDLL_DefView";
pub(super) const CLASS_LISTVIEW: &str = "SysListView32";
