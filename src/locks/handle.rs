//! The lock handle: one open coordination file plus its held/not-held state.

use super::guard::LockGuard;
use super::types::{Blocking, LockMode};
use crate::error::{FlockError, Result};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// An open coordination file that can take one advisory lock at a time.
///
/// The OS attaches the lock to the open file, so every handle is an
/// independent holder, even when several handles in one process share a path.
/// Mutating methods take `&mut self`; a handle has exactly one owner and is
/// not meant to be shared between threads.
///
/// Dropping a handle that still holds its lock releases it, but that is a
/// safety net only. Call [`release`](LockHandle::release) or use a
/// [`LockGuard`].
#[derive(Debug)]
pub struct LockHandle {
    path: PathBuf,
    file: File,
    held: bool,
}

impl LockHandle {
    /// Open the coordination file at `path`, creating it if absent.
    ///
    /// The file is opened for reading and writing and never truncated. On Unix
    /// it is created with mode `0o666`, reduced by the process umask. Its
    /// contents are never read or written.
    ///
    /// # Errors
    ///
    /// * `FlockError::Open` - The file could not be opened or created
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let mut options = OpenOptions::new();
        options.read(true).write(true).create(true).truncate(false);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o666);
        }

        let file = options.open(path).map_err(|e| FlockError::open(path, e))?;

        debug!(path = %path.display(), "opened lock file");

        Ok(Self {
            path: path.to_path_buf(),
            file,
            held: false,
        })
    }

    /// Path of the coordination file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether this handle currently holds a lock it acquired.
    pub fn is_held(&self) -> bool {
        self.held
    }

    /// Take a shared lock.
    pub fn acquire_shared(&mut self, blocking: impl Into<Blocking>) -> Result<()> {
        self.acquire(LockMode::Shared, blocking)
    }

    /// Take an exclusive lock.
    pub fn acquire_exclusive(&mut self, blocking: impl Into<Blocking>) -> Result<()> {
        self.acquire(LockMode::Exclusive, blocking)
    }

    /// Take a lock in `mode`.
    ///
    /// With [`Blocking::Blocking`] the calling thread waits, without timeout,
    /// until the OS grants the lock. With [`Blocking::NonBlocking`] the call
    /// fails at once if another holder is in the way.
    ///
    /// # Errors
    ///
    /// * `FlockError::DoubleLock` - This handle already holds a lock; nothing
    ///   is requested from the OS
    /// * `FlockError::Lock` - The OS refused the lock (contention in
    ///   non-blocking mode, or any other failure); the handle stays unlocked
    pub fn acquire(&mut self, mode: LockMode, blocking: impl Into<Blocking>) -> Result<()> {
        let blocking = blocking.into();

        if self.held {
            return Err(FlockError::DoubleLock {
                path: self.path.clone(),
            });
        }

        // Fully qualified calls: std's inherent `File` lock methods shadow
        // the trait methods of the same name.
        let outcome = match (mode, blocking) {
            (LockMode::Shared, Blocking::Blocking) => FileExt::lock_shared(&self.file),
            (LockMode::Shared, Blocking::NonBlocking) => FileExt::try_lock_shared(&self.file),
            (LockMode::Exclusive, Blocking::Blocking) => FileExt::lock_exclusive(&self.file),
            (LockMode::Exclusive, Blocking::NonBlocking) => {
                FileExt::try_lock_exclusive(&self.file)
            }
        };

        outcome.map_err(|e| FlockError::lock(&self.path, e))?;
        self.held = true;

        debug!(path = %self.path.display(), %mode, %blocking, "acquired lock");
        Ok(())
    }

    /// Release the lock if held. Never fails.
    ///
    /// Calling this on a handle that holds nothing is a no-op. An error from
    /// the OS unlock call is logged and swallowed; the OS drops the lock
    /// anyway once the file is closed.
    pub fn release(&mut self) {
        if !self.held {
            return;
        }
        self.held = false;

        match FileExt::unlock(&self.file) {
            Ok(()) => debug!(path = %self.path.display(), "released lock"),
            Err(e) => warn!(
                path = %self.path.display(),
                error = %e,
                "failed to release lock; it is dropped when the file closes"
            ),
        }
    }

    /// Take a shared lock held by the returned guard.
    pub fn lock_shared(&mut self, blocking: impl Into<Blocking>) -> Result<LockGuard<'_>> {
        self.lock(LockMode::Shared, blocking)
    }

    /// Take an exclusive lock held by the returned guard.
    pub fn lock_exclusive(&mut self, blocking: impl Into<Blocking>) -> Result<LockGuard<'_>> {
        self.lock(LockMode::Exclusive, blocking)
    }

    /// Take a lock in `mode` and return a guard that releases it on drop.
    ///
    /// Same errors as [`acquire`](LockHandle::acquire).
    pub fn lock(
        &mut self,
        mode: LockMode,
        blocking: impl Into<Blocking>,
    ) -> Result<LockGuard<'_>> {
        self.acquire(mode, blocking)?;
        Ok(LockGuard::new(self, mode))
    }
}

impl Drop for LockHandle {
    fn drop(&mut self) {
        if self.held {
            warn!(
                path = %self.path.display(),
                "lock handle dropped while holding its lock; releasing"
            );
            self.release();
        }
    }
}
