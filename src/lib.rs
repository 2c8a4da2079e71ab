#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Helmsman Core
//!
//! Coordination core for a cluster-framework scheduler. Two concerns live here:
//!
//! - **Leader lock**: before any scheduling logic runs, the process takes an
//!   exclusive lock on a service-specific node in a shared coordination service,
//!   guaranteeing a single active scheduler per service. Acquisition is bounded
//!   (3 attempts, 10s each); exhaustion terminates the process with a dedicated
//!   exit code so supervisors can tell "lock held elsewhere" apart from other
//!   crashes.
//! - **Execution plan tree**: deployment work is a hierarchy of elements
//!   (plan → phases → steps). Composites compute status on demand through an
//!   ordered precedence rule table and fan control commands (update, restart,
//!   force-complete, interrupt, proceed) out to their children. A single control
//!   loop drives all reads and writes into the tree.
//!
//! ## Module Organization
//!
//! - [`coordination`] - Leader lock, coordination-service client seams, paths
//! - [`plan`] - Plan elements, status aggregation, strategies, control loop
//! - [`config`] - Configuration management
//! - [`constants`] - Exit codes and lock budget
//! - [`error`] - Structured error handling
//! - [`logging`] - Tracing subscriber initialization

pub mod config;
pub mod constants;
pub mod coordination;
pub mod error;
pub mod logging;
pub mod plan;

pub use config::{CoreConfig, DriverConfig, LockerConfig, RetryConfig};
pub use constants::ExitCode;
pub use coordination::{
    Connector, CoordinationClient, ExitHandler, ProcessExit, RetryPolicy, ServiceLockGuard,
    ServiceLocker, ServiceMutex,
};
pub use error::{CoordinationError, Result};
pub use plan::{
    Element, ElementGroup, PlanDriver, PlanOutcome, SerialStrategy, Status, Step, Strategy,
    TaskStatusUpdate,
};
