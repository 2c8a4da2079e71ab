//! # Distributed Coordination
//!
//! Leader-lock machinery guaranteeing one active scheduler per service, built
//! over trait seams for the coordination service. The lock lives at
//! `<serviceRoot>/lock` in the service's hierarchical namespace; nothing is
//! stored at that path beyond what the mutual-exclusion primitive itself writes.

pub mod client;
pub mod locker;
pub mod paths;

pub use client::{Connector, CoordinationClient, RetryPolicy, ServiceMutex};
pub use locker::{ExitHandler, ProcessExit, ServiceLockGuard, ServiceLocker};
pub use paths::{join, lock_path, service_root};
