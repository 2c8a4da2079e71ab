//! # Execution Plan Tree
//!
//! Hierarchical execution plan for deployment work: a plan groups phases, phases
//! group steps, and every node implements [`Element`]. Composites aggregate
//! status through an ordered precedence rule table and fan control commands out
//! to their children; a single control loop ([`PlanDriver`]) drives all reads
//! and writes, so the tree performs no internal locking.

pub mod aggregate;
pub mod driver;
pub mod element;
pub mod parent;
pub mod status;
pub mod strategy;

pub use aggregate::{aggregate_status, collect_errors, AggregationInput};
pub use driver::{PlanDriver, PlanOutcome};
pub use element::{Element, Step};
pub use parent::ElementGroup;
pub use status::{all_have_status, any_have_status, Status};
pub use strategy::{InterruptFlag, SerialStrategy, Strategy};

use serde::{Deserialize, Serialize};

/// External task-status event fed into the plan tree.
///
/// Composites forward the event unmodified to every child; only the leaf whose
/// task it names reacts. The wire format this is decoded from is a collaborator
/// concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStatusUpdate {
    /// Name of the task the event describes.
    pub task_name: String,
    /// Reported lifecycle state.
    pub state: Status,
    /// Optional human-readable diagnostic, recorded as a step error when the
    /// state is [`Status::Error`].
    pub message: Option<String>,
}

impl TaskStatusUpdate {
    pub fn new(task_name: impl Into<String>, state: Status) -> Self {
        Self {
            task_name: task_name.into(),
            state,
            message: None,
        }
    }

    pub fn with_message(
        task_name: impl Into<String>,
        state: Status,
        message: impl Into<String>,
    ) -> Self {
        Self {
            task_name: task_name.into(),
            state,
            message: Some(message.into()),
        }
    }
}
