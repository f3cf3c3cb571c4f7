//! Test helpers shared across crates.
//!
//! Environment-variable guards for credential tests, and a blocking
//! wrapper around a mock HTTP server for exercising the synchronous API
//! client without a live console.

pub mod env {
    //! Helpers for safely mutating environment variables in tests.
    //!
    //! Each mutation acquires a global mutex and returns an RAII guard that
    //! restores the previous state when dropped.
    //!
    //! # Examples
    //!
    //! ```
    //! use test_helpers::env;
    //!
    //! let _g = env::set_var("KALEIDO_API_KEY", "secret");
    //! // The variable holds `secret` for the duration of the guard.
    //! ```

    use std::env;
    use std::ffi::{OsStr, OsString};
    use std::sync::{LazyLock, Mutex};

    static ENV_LOCK: LazyLock<Mutex<()>> = LazyLock::new(Mutex::default);

    /// RAII guard restoring an environment variable to its prior value on drop.
    #[must_use = "dropping restores the prior value"]
    pub struct EnvVarGuard {
        key: String,
        previous: Option<OsString>,
    }

    impl EnvVarGuard {
        fn mutate(key: String, op: impl FnOnce(&str)) -> Self {
            let previous = locked(|| {
                let previous = env::var_os(&key);
                op(&key);
                previous
            });
            Self { key, previous }
        }
    }

    /// Sets an environment variable and returns a guard restoring its prior value.
    pub fn set_var<K, V>(key: K, value: V) -> EnvVarGuard
    where
        K: Into<String>,
        V: AsRef<OsStr>,
    {
        EnvVarGuard::mutate(key.into(), |k| unsafe { env::set_var(k, value.as_ref()) })
    }

    /// Removes an environment variable and returns a guard restoring its prior value.
    pub fn remove_var<K: Into<String>>(key: K) -> EnvVarGuard {
        EnvVarGuard::mutate(key.into(), |k| unsafe { env::remove_var(k) })
    }

    impl Drop for EnvVarGuard {
        fn drop(&mut self) {
            let previous = self.previous.take();
            locked(|| match previous {
                Some(value) => unsafe { env::set_var(&self.key, value) },
                None => unsafe { env::remove_var(&self.key) },
            });
        }
    }

    fn locked<F, R>(f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let _guard = ENV_LOCK.lock().expect("lock env mutex");
        f()
    }
}

pub mod http {
    //! Blocking facade over a `wiremock` mock server.
    //!
    //! The harness under test is synchronous, but `wiremock` needs an async
    //! runtime. [`MockApi`] owns a small multi-thread runtime and drives the
    //! server on it, so tests stay plain blocking functions.

    use anyhow::{Context, Result};
    use tokio::runtime::Runtime;
    use wiremock::{Mock, MockServer};

    /// A mock HTTP server with a blocking registration interface.
    ///
    /// Field order matters: the server must drop while its runtime is
    /// still alive.
    pub struct MockApi {
        server: MockServer,
        runtime: Runtime,
    }

    impl MockApi {
        /// Starts a mock server on a fresh runtime.
        ///
        /// # Errors
        ///
        /// Returns an error if the runtime cannot be built.
        pub fn start() -> Result<Self> {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .worker_threads(2)
                .enable_all()
                .build()
                .context("build mock server runtime")?;
            let server = runtime.block_on(MockServer::start());
            Ok(Self { server, runtime })
        }

        /// Base URI of the mock server, e.g. `http://127.0.0.1:54321`.
        #[must_use]
        pub fn uri(&self) -> String {
            self.server.uri()
        }

        /// Registers a mock expectation.
        pub fn register(&self, mock: Mock) {
            self.runtime.block_on(self.server.register(mock));
        }

        /// Removes every registered mock; later requests fall through to
        /// the server's default 404.
        pub fn reset(&self) {
            self.runtime.block_on(self.server.reset());
        }
    }
}
