//! Helpers for safely mutating environment variables in tests.
//!
//! Every mutation takes a global re-entrant mutex and returns an
//! [`EnvVarGuard`] that puts the previous value back (or removes the
//! variable) when dropped. Guards for the same key restore in LIFO order.
//!
//! Use [`lock`] when a test needs several mutations, or a mutation plus the
//! code reading it, to happen without interleaving with other tests.
//!
//! # Examples
//!
//! ```
//! use run_settings_test_helpers::env;
//!
//! let _guard = env::set_var("RUN_SETTINGS_DOC_KEY", "value");
//! assert_eq!(std::env::var("RUN_SETTINGS_DOC_KEY").ok().as_deref(), Some("value"));
//! ```

use std::env;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::sync::LazyLock;

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};

static ENV_MUTEX: LazyLock<ReentrantMutex<()>> = LazyLock::new(ReentrantMutex::default);

/// RAII guard restoring an environment variable to its prior value on drop.
#[must_use = "dropping restores the prior value"]
pub struct EnvVarGuard {
    key: String,
    original: Option<OsString>,
}

impl fmt::Debug for EnvVarGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvVarGuard")
            .field("key", &self.key)
            .field("had_original", &self.original.is_some())
            .finish_non_exhaustive()
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        let _lock = ENV_MUTEX.lock();
        match self.original.take() {
            // SAFETY: `ENV_MUTEX` is held for the write.
            Some(value) => unsafe { env::set_var(&self.key, value) },
            // SAFETY: `ENV_MUTEX` is held for the write.
            None => unsafe { env::remove_var(&self.key) },
        }
    }
}

/// Holds the environment lock until dropped.
#[must_use = "dropping releases the environment lock"]
pub struct EnvLock {
    _guard: ReentrantMutexGuard<'static, ()>,
}

impl fmt::Debug for EnvLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvLock").finish_non_exhaustive()
    }
}

fn mutate<F>(key: String, mutator: F) -> EnvVarGuard
where
    F: FnOnce(&str),
{
    let _lock = ENV_MUTEX.lock();
    let original = env::var_os(&key);
    mutator(&key);
    EnvVarGuard { key, original }
}

/// Sets an environment variable and returns a guard restoring its prior
/// value.
///
/// # Examples
///
/// ```
/// use run_settings_test_helpers::env;
///
/// let _guard = env::set_var("RUN_SETTINGS_SET_KEY", "bar");
/// assert!(matches!(std::env::var("RUN_SETTINGS_SET_KEY"), Ok(ref value) if value == "bar"));
/// ```
pub fn set_var<K, V>(key: K, value: V) -> EnvVarGuard
where
    K: Into<String>,
    V: AsRef<OsStr>,
{
    // SAFETY: `mutate` holds `ENV_MUTEX` while the closure runs.
    mutate(key.into(), |name| unsafe { env::set_var(name, value.as_ref()) })
}

/// Removes an environment variable and returns a guard restoring its prior
/// value.
pub fn remove_var<K>(key: K) -> EnvVarGuard
where
    K: Into<String>,
{
    // SAFETY: `mutate` holds `ENV_MUTEX` while the closure runs.
    mutate(key.into(), |name| unsafe { env::remove_var(name) })
}

/// Acquire the environment lock for the lifetime of the returned value.
///
/// The lock is re-entrant, so [`set_var`] and [`remove_var`] still work on
/// the same thread while it is held.
///
/// # Examples
///
/// ```
/// use run_settings_test_helpers::env;
///
/// let _lock = env::lock();
/// let _guard = env::set_var("RUN_SETTINGS_LOCKED_KEY", "value");
/// ```
pub fn lock() -> EnvLock {
    EnvLock {
        _guard: ENV_MUTEX.lock(),
    }
}
