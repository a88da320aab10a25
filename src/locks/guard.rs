//! RAII lock guard implementation.

use super::handle::LockHandle;
use super::types::LockMode;
use std::path::Path;

/// RAII guard for a lock held by a [`LockHandle`].
///
/// When dropped, including while a panic unwinds, the lock is released.
/// The guard borrows the handle mutably, so the handle cannot be locked again
/// or released behind the guard's back while it lives.
#[derive(Debug)]
pub struct LockGuard<'a> {
    handle: &'a mut LockHandle,
    mode: LockMode,
}

impl<'a> LockGuard<'a> {
    pub(super) fn new(handle: &'a mut LockHandle, mode: LockMode) -> Self {
        Self { handle, mode }
    }

    /// Path of the locked coordination file.
    pub fn path(&self) -> &Path {
        self.handle.path()
    }

    /// Mode the lock was taken in.
    pub fn mode(&self) -> LockMode {
        self.mode
    }

    /// Release the lock now instead of at the end of the scope.
    pub fn unlock(self) {
        drop(self);
    }
}

impl Drop for LockGuard<'_> {
    fn drop(&mut self) {
        self.handle.release();
    }
}
