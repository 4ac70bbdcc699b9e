// ── Central error type ────────────────────────────────────────────────────────
//
// Only the command layer produces errors: settings I/O, the single-instance
// guard and argument validation.  The layout core and the per-icon Win32
// paths are fail-soft and never return `JumbleError`.

use thiserror::Error;

/// Every error that Jumble can produce.
#[derive(Debug, Error)]
pub enum JumbleError {
    /// A Win32 API call returned a failure code.
    #[error("{function} failed (error {code:#010x})")]
    Win32 {
        /// The name of the failing function, for display purposes.
        function: &'static str,
        /// The raw Win32 error code (`GetLastError()` value) or HRESULT.
        code: u32,
    },

    /// A standard I/O error (settings read or write).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The settings file could not be serialised or parsed.
    #[error("settings format error: {0}")]
    Json(#[from] serde_json::Error),

    /// The desktop icon-list control could not be found.
    #[error("desktop icon list not found (is the shell running?)")]
    NoIconControl,

    /// Another Jumble scheduler already holds the instance mutex.
    #[error("jumble is already running")]
    AlreadyRunning,

    /// Rearrangement interval outside the accepted range.
    #[error("interval must be between 1 and 1440 minutes (got {0})")]
    InvalidInterval(u32),

    /// A mode name that no rearrangement strategy answers to.
    #[error("unknown mode {0:?} (expected full-chaos, sneaky, orbit or word)")]
    UnknownMode(String),

    /// The command needs a desktop this platform does not have.
    #[error("{0} is only available on Windows")]
    Unsupported(&'static str),
}

// Convert a windows-crate error (HRESULT) directly into a JumbleError so that
// `?` can be used on `windows::core::Result<T>` throughout the platform module.
#[cfg(windows)]
impl From<windows::core::Error> for JumbleError {
    fn from(e: windows::core::Error) -> Self {
        // HRESULT.0 is i32; reinterpret bits as u32 for display purposes.
        Self::Win32 {
            function: "windows",
            code: e.code().0 as u32,
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, JumbleError>;
