//! Helpers for safely changing the process working directory in tests.
//!
//! The working directory is process-global, so [`set_dir`] holds a global
//! mutex for as long as the returned guard lives and restores the original
//! directory on drop.
//!
//! # Examples
//!
//! ```no_run
//! use run_settings_test_helpers::cwd;
//!
//! # fn main() -> anyhow::Result<()> {
//! let guard = cwd::set_dir("/tmp")?;
//! // Relative paths now resolve against `/tmp`.
//! guard.restore()?;
//! # Ok(())
//! # }
//! ```

use std::sync::LazyLock;

use anyhow::{Context, Result, anyhow};
use camino::{Utf8Path, Utf8PathBuf};
use parking_lot::{Mutex, MutexGuard};

static CWD_MUTEX: LazyLock<Mutex<()>> = LazyLock::new(Mutex::default);

/// RAII guard that restores the working directory on drop.
#[must_use = "dropping restores the prior working directory"]
pub struct CwdGuard {
    original: Utf8PathBuf,
    _lock: MutexGuard<'static, ()>,
}

impl CwdGuard {
    /// The directory that was current before the guard was created.
    #[must_use]
    pub fn original(&self) -> &Utf8Path {
        &self.original
    }

    /// Restore the original directory now, reporting failure.
    ///
    /// # Errors
    ///
    /// Returns an error if `set_current_dir` fails.
    pub fn restore(&self) -> std::io::Result<()> {
        std::env::set_current_dir(&self.original)
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        // Best effort; call `restore` to observe failures.
        let _ignored = std::env::set_current_dir(&self.original);
    }
}

/// Change the working directory to `path` until the guard is dropped.
///
/// The original directory is read and checked for UTF-8 before anything
/// changes.
///
/// # Errors
///
/// Returns an error if the current directory cannot be read or is not valid
/// UTF-8, or if `path` cannot be made current.
pub fn set_dir(path: impl AsRef<Utf8Path>) -> Result<CwdGuard> {
    let lock = CWD_MUTEX.lock();
    let current = std::env::current_dir().context("read current dir")?;
    let original = Utf8PathBuf::from_path_buf(current)
        .map_err(|non_utf8| anyhow!("cwd is not valid UTF-8: {}", non_utf8.display()))?;
    std::env::set_current_dir(path.as_ref())
        .with_context(|| format!("set current dir to {}", path.as_ref()))?;
    Ok(CwdGuard {
        original,
        _lock: lock,
    })
}
