// ── Win32 platform implementation ─────────────────────────────────────────────
//
// The only module in the codebase where `unsafe` code is permitted.  Every
// `unsafe` block MUST carry a `// SAFETY:` comment that states:
//   • which invariant makes the operation sound, and
//   • what the caller is responsible for maintaining.
//
// Nothing in this module is `pub` beyond what callers genuinely need; keep the
// unsafe surface as small as possible.

#![allow(unsafe_code)]

// ── Sub-modules ───────────────────────────────────────────────────────────────

pub(crate) mod display; // SPI_GETWORKAREA
pub(crate) mod fullscreen; // foreground / notification-state probe
pub(crate) mod icons; // desktop SysListView32 accessor
pub(crate) mod instance; // named-mutex single-instance guard

mod messages; // LVM_* constants
mod remote; // scoped cross-process handle + buffer
