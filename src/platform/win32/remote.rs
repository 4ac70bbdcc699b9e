// ── Cross-process scratch memory ──────────────────────────────────────────────
//
// The desktop list view lives in explorer.exe and only writes results through
// pointers valid in *its* address space.  Each query therefore:
//   1. opens explorer with VM read/write/operation rights  (`RemoteProcess`)
//   2. allocates a small buffer inside it                  (`RemoteBuffer`)
//   3. lets the control fill the buffer, copies it back
//   4. frees the buffer, then closes the process handle.
//
// Step 4 lives in the `Drop` impls.  `RemoteBuffer` borrows its `RemoteProcess`, so
// the borrow checker guarantees the buffer is released before the handle is
// closed, on every exit path including early `?`/`None` returns.

use std::{ffi::c_void, mem};

use tracing::trace;
use windows::Win32::{
    Foundation::{CloseHandle, FALSE, HANDLE},
    System::{
        Diagnostics::Debug::{ReadProcessMemory, WriteProcessMemory},
        Memory::{VirtualAllocEx, VirtualFreeEx, MEM_COMMIT, MEM_RELEASE, MEM_RESERVE, PAGE_READWRITE},
        Threading::{OpenProcess, PROCESS_VM_OPERATION, PROCESS_VM_READ, PROCESS_VM_WRITE},
    },
};

// ── RemoteProcess ─────────────────────────────────────────────────────────────

/// RAII handle to another process, opened for VM operations.
pub(super) struct RemoteProcess(HANDLE);

impl RemoteProcess {
    /// Open `pid` with the rights needed to allocate, read and write memory.
    pub(super) fn open(pid: u32) -> Option<Self> {
        // SAFETY: OpenProcess takes no pointers; failure is reported through
        // the Result and leaves nothing to clean up.
        let handle = unsafe {
            OpenProcess(PROCESS_VM_OPERATION | PROCESS_VM_READ | PROCESS_VM_WRITE, FALSE, pid)
        };
        match handle {
            Ok(h) => Some(Self(h)),
            Err(e) => {
                trace!(pid, error = %e, "OpenProcess failed");
                None
            }
        }
    }

    /// Commit `len` read/write bytes inside the process.
    pub(super) fn alloc(&self, len: usize) -> Option<RemoteBuffer<'_>> {
        // SAFETY: self.0 is an open handle with PROCESS_VM_OPERATION.  A None
        // address lets the system pick the region; nothing is dereferenced here.
        let ptr = unsafe {
            VirtualAllocEx(self.0, None, len, MEM_COMMIT | MEM_RESERVE, PAGE_READWRITE)
        };
        if ptr.is_null() {
            trace!(len, "VirtualAllocEx failed");
            return None;
        }
        Some(RemoteBuffer { process: self, ptr, len })
    }
}

impl Drop for RemoteProcess {
    fn drop(&mut self) {
        // SAFETY: self.0 came from a successful OpenProcess and is closed
        // exactly once, here.  Every RemoteBuffer borrowing this process has
        // already been dropped.
        unsafe {
            let _ = CloseHandle(self.0);
        }
    }
}

// ── RemoteBuffer ──────────────────────────────────────────────────────────────

/// A committed allocation inside a [`RemoteProcess`].
///
/// The pointer is only meaningful in the remote address space; it is never
/// dereferenced locally, only handed to the remote control or to
/// `Read/WriteProcessMemory`.
pub(super) struct RemoteBuffer<'p> {
    process: &'p RemoteProcess,
    ptr: *mut c_void,
    len: usize,
}

impl RemoteBuffer<'_> {
    /// Remote address of byte `offset`, for passing in a message LPARAM.
    pub(super) fn remote_addr(&self, offset: usize) -> usize {
        self.ptr as usize + offset
    }

    fn fits(&self, offset: usize, size: usize) -> bool {
        offset.checked_add(size).is_some_and(|end| end <= self.len)
    }

    /// Copy a `T` out of the buffer at `offset`.
    pub(super) fn read<T: Copy + Default>(&self, offset: usize) -> Option<T> {
        let mut value = T::default();
        let size = mem::size_of::<T>();
        self.read_raw(offset, (&mut value as *mut T).cast(), size)?;
        Some(value)
    }

    /// Fill `out` from the buffer at `offset`.
    pub(super) fn read_slice<T: Copy>(&self, offset: usize, out: &mut [T]) -> Option<()> {
        self.read_raw(offset, out.as_mut_ptr().cast(), mem::size_of_val(out))
    }

    fn read_raw(&self, offset: usize, dst: *mut c_void, size: usize) -> Option<()> {
        if !self.fits(offset, size) {
            return None;
        }
        let mut copied = 0usize;
        // SAFETY: the remote range [offset, offset + size) lies inside our
        // committed allocation (checked above).  `dst` points to `size`
        // writable local bytes owned by the caller for the duration of the call.
        let ok = unsafe {
            ReadProcessMemory(
                self.process.0,
                self.remote_addr(offset) as *const c_void,
                dst,
                size,
                Some(&mut copied as *mut usize),
            )
        };
        (ok.is_ok() && copied == size).then_some(())
    }

    /// Copy `value` into the buffer at `offset`.
    pub(super) fn write<T: Copy>(&self, offset: usize, value: &T) -> Option<()> {
        let size = mem::size_of::<T>();
        if !self.fits(offset, size) {
            return None;
        }
        let mut copied = 0usize;
        // SAFETY: the remote range lies inside our committed allocation and
        // `value` is a live local `T` of exactly `size` bytes.
        let ok = unsafe {
            WriteProcessMemory(
                self.process.0,
                self.remote_addr(offset) as *const c_void,
                (value as *const T).cast(),
                size,
                Some(&mut copied as *mut usize),
            )
        };
        (ok.is_ok() && copied == size).then_some(())
    }
}

impl Drop for RemoteBuffer<'_> {
    fn drop(&mut self) {
        // SAFETY: ptr came from VirtualAllocEx on this process and is released
        // exactly once.  MEM_RELEASE requires a size of 0.  The process handle
        // is still open because `self.process` outlives this buffer.
        unsafe {
            let _ = VirtualFreeEx(self.process.0, self.ptr, 0, MEM_RELEASE);
        }
    }
}
