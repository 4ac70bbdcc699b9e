use windows::{
    core::w,
    Win32::{
        Foundation::{CloseHandle, GetLastError, ERROR_ALREADY_EXISTS, FALSE, HANDLE},
        System::Threading::CreateMutexW,
    },
};

use crate::error::{JumbleError, Result};

/// Holds the named scheduler mutex for as long as it lives.
pub(crate) struct InstanceGuard(HANDLE);

impl InstanceGuard {
    /// Claim the per-session scheduler mutex, failing with
    /// [`JumbleError::AlreadyRunning`] if another scheduler holds it.
    pub(crate) fn acquire() -> Result<Self> {
        // SAFETY: default security attributes; the name is a static
        // null-terminated literal.
        let handle = unsafe { CreateMutexW(None, FALSE, w!("Local\\JumbleScheduler")) }?;

        // SAFETY: read immediately after CreateMutexW on the same thread.
        if unsafe { GetLastError() } == ERROR_ALREADY_EXISTS {
            // SAFETY: handle is valid and not stored anywhere else.
            unsafe {
                let _ = CloseHandle(handle);
            }
            return Err(JumbleError::AlreadyRunning);
        }
        Ok(Self(handle))
    }
}

impl Drop for InstanceGuard {
    fn drop(&mut self) {
        // SAFETY: the handle came from CreateMutexW and is closed exactly once.
        unsafe {
            let _ = CloseHandle(self.0);
        }
    }
}
