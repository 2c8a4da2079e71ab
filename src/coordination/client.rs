//! # Coordination-Service Client Contracts
//!
//! Trait seams for the coordination service (ZooKeeper-style hierarchical store
//! with a mutual-exclusion recipe). The concrete client lives behind these
//! traits so the locker can be tested without a live service, and so client
//! connection/retry internals stay a collaborator concern.

use crate::config::RetryConfig;
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

/// Bounded exponential backoff handed to the client for connection retries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub base_delay: Duration,
    pub max_delay: Duration,
    pub max_retries: u32,
}

impl RetryPolicy {
    pub fn from_config(config: &RetryConfig) -> Self {
        Self {
            base_delay: Duration::from_millis(config.base_delay_ms),
            max_delay: Duration::from_millis(config.max_delay_ms),
            max_retries: config.max_retries,
        }
    }

    /// Delay before the given 1-indexed retry attempt: base doubled per
    /// attempt, capped at the maximum.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(31);
        let delay = self
            .base_delay
            .saturating_mul(1u32.checked_shl(exponent).unwrap_or(u32::MAX));
        delay.min(self.max_delay)
    }
}

/// Factory for coordination clients.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(
        &self,
        endpoint: &str,
        retry: &RetryPolicy,
    ) -> Result<Arc<dyn CoordinationClient>>;
}

/// A connected (but not necessarily started) coordination-service client.
#[async_trait]
pub trait CoordinationClient: Send + Sync {
    async fn start(&self) -> Result<()>;

    /// Close the connection. Never fails; close problems are the client's to log.
    async fn close(&self);

    /// Handle to the mutual-exclusion primitive at the given node path.
    fn mutex(&self, path: &str) -> Arc<dyn ServiceMutex>;
}

/// Named mutual-exclusion primitive over the coordination service.
#[async_trait]
pub trait ServiceMutex: Send + Sync {
    /// Try to acquire within the timeout. `Ok(false)` means the timeout elapsed
    /// with the lock held elsewhere; `Err` is an unexpected client failure.
    async fn acquire(&self, timeout: Duration) -> Result<bool>;

    async fn release(&self) -> Result<()>;
}
