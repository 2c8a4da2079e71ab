//! # Plan Control Loop
//!
//! The single logical control loop that owns the root of the plan tree. All
//! task-status events enter the tree here, and all aggregate status reads happen
//! here, which is what lets the tree itself stay unsynchronized.

use super::element::Element;
use super::parent::ElementGroup;
use super::status::Status;
use super::TaskStatusUpdate;
use crate::config::DriverConfig;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// How a finished plan run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlanOutcome {
    /// Every element reported complete.
    Complete,
    /// The plan reached `Status::Error`; errors are available on the root.
    Failed,
    /// The event channel closed before the plan reached a terminal status.
    InputClosed,
}

/// Owns the root element and a receiver of task-status events.
pub struct PlanDriver {
    root: ElementGroup,
    events: mpsc::Receiver<TaskStatusUpdate>,
    status_check_interval: Duration,
}

impl PlanDriver {
    pub fn new(
        root: ElementGroup,
        events: mpsc::Receiver<TaskStatusUpdate>,
        config: &DriverConfig,
    ) -> Self {
        Self {
            root,
            events,
            status_check_interval: config.status_check_interval(),
        }
    }

    /// Current aggregate status of the whole plan.
    pub fn status(&self) -> Status {
        self.root.status()
    }

    pub fn root(&self) -> &ElementGroup {
        &self.root
    }

    /// Pause the root's strategy; in-flight work finishes on its own.
    pub fn interrupt(&self) {
        self.root.interrupt();
    }

    /// Resume after an interruption.
    pub fn proceed(&self) {
        self.root.proceed();
    }

    /// Run the control loop until the plan reaches a terminal status or the
    /// event channel closes. Returns the root along with the outcome so callers
    /// can inspect errors or restart.
    pub async fn run(mut self) -> (PlanOutcome, ElementGroup) {
        let mut last_status = self.root.status();
        info!(plan = %self.root.name(), status = %last_status, "Plan control loop started");

        let outcome = loop {
            if let Some(outcome) = Self::terminal_outcome(last_status) {
                break outcome;
            }

            tokio::select! {
                event = self.events.recv() => {
                    match event {
                        Some(update) => {
                            self.root.update(&update);
                        }
                        None => {
                            warn!(plan = %self.root.name(), "Task status input closed before plan finished");
                            break PlanOutcome::InputClosed;
                        }
                    }
                }
                _ = tokio::time::sleep(self.status_check_interval) => {
                    debug!(plan = %self.root.name(), status = %last_status, "Periodic plan status check");
                }
            }

            let status = self.root.status();
            if status != last_status {
                info!(
                    plan = %self.root.name(),
                    from = %last_status,
                    to = %status,
                    "Plan status changed"
                );
                last_status = status;
            }
        };

        info!(plan = %self.root.name(), outcome = ?outcome, "Plan control loop finished");
        (outcome, self.root)
    }

    fn terminal_outcome(status: Status) -> Option<PlanOutcome> {
        match status {
            Status::Complete => Some(PlanOutcome::Complete),
            Status::Error => Some(PlanOutcome::Failed),
            _ => None,
        }
    }
}
