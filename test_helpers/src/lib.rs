//! Test helpers shared across crates in the workspace.
//!
//! This crate currently provides environment variable guards.

pub mod env {
    //! Helpers for safely mutating environment variables in tests.
    //!
    //! Each mutation acquires a global mutex and returns an RAII guard that
    //! restores the previous state when dropped. Guards for the same key
    //! restore in LIFO order; avoid interleaving mutations of one key across
    //! threads unless access is coordinated externally.
    //!
    //! # Examples
    //!
    //! ```
    //! use test_helpers::env;
    //!
    //! let _g = env::set_var("KEY", "VALUE");
    //! // `KEY` is set to `VALUE` for the duration of the guard.
    //! ```

    use parking_lot::{ReentrantMutex, ReentrantMutexGuard};
    use std::env;
    use std::ffi::{OsStr, OsString};
    use std::sync::LazyLock;

    static ENV_MUTEX: LazyLock<ReentrantMutex<()>> = LazyLock::new(ReentrantMutex::default);

    /// RAII guard restoring an environment variable to its prior value on drop.
    #[must_use = "dropping restores the prior value"]
    #[derive(Debug)]
    pub struct EnvVarGuard {
        key: String,
        original: Option<OsString>,
    }

    /// RAII guard that serialises environment access for its lifetime.
    ///
    /// Use this when a test needs exclusive access to environment state
    /// across multiple operations, such as clearing several variables before
    /// probing the filesystem.
    ///
    /// # Examples
    ///
    /// ```
    /// use test_helpers::env;
    ///
    /// let _lock = env::lock();
    /// let _guard = env::set_var("KEY", "VALUE");
    /// ```
    #[must_use = "dropping releases the environment lock"]
    pub struct EnvVarLock {
        _guard: ReentrantMutexGuard<'static, ()>,
    }

    /// Sets an environment variable and returns a guard restoring its prior value.
    ///
    /// Access is serialised by a global re-entrant mutex during the mutation
    /// and again during restoration; other keys may interleave between those
    /// operations.
    pub fn set_var<K, V>(key: K, value: V) -> EnvVarGuard
    where
        K: Into<String>,
        V: AsRef<OsStr>,
    {
        let key = key.into();
        let _guard = ENV_MUTEX.lock();
        let original = env::var_os(&key);
        // SAFETY: the global mutex serialises all environment mutations.
        unsafe { env::set_var(&key, value.as_ref()) };
        EnvVarGuard { key, original }
    }

    /// Removes an environment variable and returns a guard restoring its prior value.
    ///
    /// Access is serialised by a global re-entrant mutex during the mutation
    /// and again during restoration; other keys may interleave between those
    /// operations.
    pub fn remove_var<K>(key: K) -> EnvVarGuard
    where
        K: Into<String>,
    {
        let key = key.into();
        let _guard = ENV_MUTEX.lock();
        let original = env::var_os(&key);
        // SAFETY: the global mutex serialises all environment mutations.
        unsafe { env::remove_var(&key) };
        EnvVarGuard { key, original }
    }

    /// Acquire the global environment lock for the lifetime of the guard.
    pub fn lock() -> EnvVarLock {
        EnvVarLock {
            _guard: ENV_MUTEX.lock(),
        }
    }

    impl Drop for EnvVarGuard {
        fn drop(&mut self) {
            let _guard = ENV_MUTEX.lock();
            if let Some(val) = self.original.take() {
                // SAFETY: the global mutex is held during restoration.
                unsafe { env::set_var(&self.key, &val) };
            } else {
                // SAFETY: the global mutex is held during restoration.
                unsafe { env::remove_var(&self.key) };
            }
        }
    }

}
