//! # Service Leader Lock
//!
//! Takes an exclusive lock on a service-specific node in the coordination
//! service so two schedulers are never actively managing the same service.
//! Acquisition runs once at startup, before any plan execution; if the lock
//! cannot be taken within the fixed attempt budget the process exits with the
//! dedicated [`ExitCode::LockUnavailable`] code and lets the supervisor restart
//! it. There is no infinite retry at this layer.
//!
//! The locker is an owned value constructed by the composition root, not a
//! process-wide singleton. Calling [`ServiceLocker::acquire`] while a previous
//! guard is outstanding, or releasing a guard twice, is a programmer-misuse
//! defect and panics.

use crate::config::LockerConfig;
use crate::constants::ExitCode;
use crate::coordination::client::{Connector, CoordinationClient, RetryPolicy, ServiceMutex};
use crate::coordination::paths;
use crate::error::{CoordinationError, Result};
use parking_lot::Mutex;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Seam for fatal process exit, overridable in tests.
pub trait ExitHandler: Send + Sync {
    fn exit(&self, code: ExitCode);
}

/// Production exit handler: terminates the process immediately.
pub struct ProcessExit;

impl ExitHandler for ProcessExit {
    fn exit(&self, code: ExitCode) {
        error!(exit_code = code.code(), "Hard-exiting scheduler process");
        std::process::exit(code.code());
    }
}

/// Acquires and owns the leader lock for one service.
pub struct ServiceLocker {
    service_name: String,
    config: LockerConfig,
    connector: Arc<dyn Connector>,
    exit_handler: Arc<dyn ExitHandler>,
    /// True while a guard from this locker is outstanding. Lock and release
    /// both transition through this mutex, so concurrent callers cannot race
    /// into a double-acquire or double-release.
    locked: Arc<Mutex<bool>>,
}

impl ServiceLocker {
    pub fn new(
        service_name: impl Into<String>,
        config: LockerConfig,
        connector: Arc<dyn Connector>,
    ) -> Self {
        Self::with_exit_handler(service_name, config, connector, Arc::new(ProcessExit))
    }

    /// Constructor with an injectable exit handler, for tests that must observe
    /// the fatal-exit path without terminating the test process.
    pub fn with_exit_handler(
        service_name: impl Into<String>,
        config: LockerConfig,
        connector: Arc<dyn Connector>,
        exit_handler: Arc<dyn ExitHandler>,
    ) -> Self {
        Self {
            service_name: service_name.into(),
            config,
            connector,
            exit_handler,
            locked: Arc::new(Mutex::new(false)),
        }
    }

    /// Acquire the leader lock for this service.
    ///
    /// When locking is disabled in configuration (a test-only escape hatch for
    /// components that internally take the lock), returns a no-op guard
    /// immediately without touching the coordination service.
    ///
    /// # Panics
    ///
    /// Panics if a guard from this locker is still outstanding. Acquiring twice
    /// is a defect, not a retryable condition.
    pub async fn acquire(&self) -> Result<ServiceLockGuard> {
        if !self.config.enabled {
            debug!(service = %self.service_name, "Leader locking disabled, skipping acquisition");
            return Ok(ServiceLockGuard::disabled());
        }
        {
            let mut locked = self.locked.lock();
            if *locked {
                panic!(
                    "Already locked: leader lock for service '{}' was acquired twice without release",
                    self.service_name
                );
            }
            *locked = true;
        }
        match self.acquire_inner().await {
            Ok(guard) => Ok(guard),
            Err(err) => {
                *self.locked.lock() = false;
                Err(err)
            }
        }
    }

    async fn acquire_inner(&self) -> Result<ServiceLockGuard> {
        let retry = RetryPolicy::from_config(&self.config.retry);
        let client = self.connector.connect(&self.config.endpoint, &retry).await?;
        client.start().await?;

        let lock_path = paths::lock_path(&self.service_name);
        let mutex = client.mutex(&lock_path);
        let attempts = self.config.attempts;
        let timeout = self.config.attempt_timeout();
        info!(lock_path = %lock_path, "Acquiring leader lock");

        let mut unexpected: Option<CoordinationError> = None;
        // Attempts are 1-indexed for readable "k/3" progress logging.
        for attempt in 1..=attempts {
            match mutex.acquire(timeout).await {
                Ok(true) => {
                    info!(
                        attempt = %format!("{attempt}/{attempts}"),
                        lock_path = %lock_path,
                        "Lock acquired"
                    );
                    return Ok(ServiceLockGuard::held(
                        client,
                        mutex,
                        Arc::clone(&self.locked),
                        lock_path,
                    ));
                }
                Ok(false) => {
                    if attempt < attempts {
                        warn!(
                            attempt = %format!("{attempt}/{attempts}"),
                            lock_path = %lock_path,
                            "Failed to acquire leader lock. Duplicate service named '{0}', \
                             or recently restarted instance of '{0}'? Retrying lock...",
                            self.service_name
                        );
                    }
                }
                Err(err) => {
                    error!(
                        lock_path = %lock_path,
                        error = %err,
                        "Unexpected error acquiring leader lock"
                    );
                    unexpected = Some(err);
                    break;
                }
            }
        }

        if unexpected.is_none() {
            error!(
                lock_path = %lock_path,
                "Failed to acquire leader lock on all {attempts} attempts. Duplicate service \
                 named '{0}', or recently restarted instance of '{0}'? Restarting scheduler \
                 process to try again.",
                self.service_name
            );
        }

        // No partial-success state is left behind: the client is closed and its
        // reference dropped before the fatal exit.
        client.close().await;
        self.exit_handler.exit(ExitCode::LockUnavailable);
        // Reached only when a test exit handler does not terminate the process.
        Err(CoordinationError::LockUnavailable {
            service: self.service_name.clone(),
            lock_path,
        })
    }

    /// Scoped acquisition: take the lock, run the future racing a termination
    /// signal, and release on every exit path. Returns `Ok(None)` when a
    /// termination signal cut the run short.
    pub async fn run_locked<F, T>(&self, fut: F) -> Result<Option<T>>
    where
        F: Future<Output = T>,
    {
        let mut guard = self.acquire().await?;
        let output = tokio::select! {
            output = fut => Some(output),
            _ = tokio::signal::ctrl_c() => {
                info!(service = %self.service_name, "Termination signal received, releasing leader lock");
                None
            }
        };
        guard.release().await;
        Ok(output)
    }
}

/// Proof of a held leader lock. Release is explicit and best-effort; dropping
/// an unreleased guard only logs, leaving the coordination service's session
/// timeout to reap the lock.
pub struct ServiceLockGuard {
    client: Option<Arc<dyn CoordinationClient>>,
    mutex: Option<Arc<dyn ServiceMutex>>,
    locked: Option<Arc<Mutex<bool>>>,
    lock_path: String,
    disabled: bool,
}

impl std::fmt::Debug for ServiceLockGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceLockGuard")
            .field("lock_path", &self.lock_path)
            .field("disabled", &self.disabled)
            .finish_non_exhaustive()
    }
}

impl ServiceLockGuard {
    fn held(
        client: Arc<dyn CoordinationClient>,
        mutex: Arc<dyn ServiceMutex>,
        locked: Arc<Mutex<bool>>,
        lock_path: String,
    ) -> Self {
        Self {
            client: Some(client),
            mutex: Some(mutex),
            locked: Some(locked),
            lock_path,
            disabled: false,
        }
    }

    fn disabled() -> Self {
        Self {
            client: None,
            mutex: None,
            locked: None,
            lock_path: String::new(),
            disabled: true,
        }
    }

    /// Whether this guard currently holds the lock. False for disabled guards
    /// and after release.
    pub fn is_held(&self) -> bool {
        self.client.is_some()
    }

    /// Release the lock and close the client connection.
    ///
    /// Release errors are logged, never propagated; the client is closed
    /// regardless and both handles are cleared.
    ///
    /// # Panics
    ///
    /// Panics if the guard was already released (double-release defect). The
    /// panic fires before any coordination-service call.
    pub async fn release(&mut self) {
        if self.disabled {
            debug!("Releasing disabled lock guard (no-op)");
            return;
        }
        let Some(client) = self.client.take() else {
            panic!(
                "Already unlocked: leader lock on '{}' was released twice",
                self.lock_path
            );
        };
        let mutex = self
            .mutex
            .take()
            .unwrap_or_else(|| unreachable!("lock guard held a client without a mutex"));

        if let Err(err) = mutex.release().await {
            error!(
                lock_path = %self.lock_path,
                error = %err,
                "Error releasing leader lock"
            );
        }
        client.close().await;
        if let Some(locked) = self.locked.take() {
            *locked.lock() = false;
        }
        info!(lock_path = %self.lock_path, "Leader lock released");
    }
}

impl Drop for ServiceLockGuard {
    fn drop(&mut self) {
        if self.client.is_some() {
            warn!(
                lock_path = %self.lock_path,
                "Lock guard dropped without release; the coordination service session \
                 timeout will reap the lock"
            );
        }
    }
}
