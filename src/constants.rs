//! # System Constants
//!
//! Core constants that define the operational boundaries of the scheduler
//! coordination layer: process exit codes, the leader-lock attempt budget, and the
//! fixed names used in the coordination service's hierarchical namespace.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Process exit codes emitted by the scheduler.
///
/// Supervisors key off these values, so they are a public contract:
/// [`ExitCode::LockUnavailable`] specifically distinguishes "another scheduler
/// instance holds the leader lock" from every other crash cause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExitCode {
    /// Clean shutdown.
    Success = 0,
    /// Startup failed before the scheduler became operational.
    InitializationFailure = 1,
    /// The leader lock could not be acquired within the attempt budget.
    LockUnavailable = 2,
}

impl ExitCode {
    pub fn code(self) -> i32 {
        self as i32
    }
}

/// Leader-lock acquisition budget and timing.
pub mod lock {
    use super::Duration;

    /// Number of acquisition attempts before the process gives up and exits.
    pub const LOCK_ATTEMPTS: u32 = 3;

    /// How long each individual acquisition attempt blocks.
    pub const LOCK_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Name of the lock node beneath a service's root path.
    pub const LOCK_PATH_NAME: &str = "lock";
}

/// Coordination-service namespace layout.
pub mod paths {
    /// Root prefix under which every service keeps its nodes.
    pub const NAMESPACE_ROOT: &str = "/helmsman";
}
