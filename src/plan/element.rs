//! # Plan Elements
//!
//! [`Element`] is the capability interface every plan node implements, leaf or
//! composite. The tree is immutable in shape once built; only node-internal
//! state changes, driven by a single control loop.

use super::status::Status;
use super::TaskStatusUpdate;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// A node in the execution plan tree.
pub trait Element: Send {
    /// Stable identity for logging and diagnostics.
    fn name(&self) -> &str;

    /// Current status. Leaves store it; composites compute it on demand.
    fn status(&self) -> Status;

    /// Errors local to this node plus, for composites, all descendant errors.
    fn errors(&self) -> Vec<String>;

    /// React to an external task-status event. Composites forward the event
    /// unmodified to every child.
    fn update(&mut self, update: &TaskStatusUpdate);

    /// Reset this node (and any descendants) to start over.
    fn restart(&mut self);

    /// Mark this node (and any descendants) complete without doing the work.
    fn force_complete(&mut self);

    /// Propagate updated plan parameters to this node and any descendants.
    fn update_parameters(&mut self, parameters: &HashMap<String, String>);

    /// Whether this node may be offered work. `dirty_assets` names assets some
    /// other element is already operating on.
    fn is_eligible(&self, dirty_assets: &HashSet<String>) -> bool {
        self.status() != Status::Complete
            && self.errors().is_empty()
            && !dirty_assets.contains(self.name())
    }
}

/// A leaf unit of deployment work. How the work is actually performed is a
/// collaborator concern; the step only tracks reported state.
#[derive(Debug)]
pub struct Step {
    name: String,
    status: Status,
    errors: Vec<String>,
    parameters: HashMap<String, String>,
}

impl Step {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: Status::Pending,
            errors: Vec::new(),
            parameters: HashMap::new(),
        }
    }

    /// A step already in the given state, for plan reconstruction.
    pub fn with_status(name: impl Into<String>, status: Status) -> Self {
        Self {
            status,
            ..Self::new(name)
        }
    }

    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn parameters(&self) -> &HashMap<String, String> {
        &self.parameters
    }
}

impl Element for Step {
    fn name(&self) -> &str {
        &self.name
    }

    fn status(&self) -> Status {
        self.status
    }

    fn errors(&self) -> Vec<String> {
        self.errors.clone()
    }

    fn update(&mut self, update: &TaskStatusUpdate) {
        if update.task_name != self.name {
            return;
        }
        debug!(
            step = %self.name,
            status = %update.state,
            "Step received task status update"
        );
        if update.state == Status::Error {
            self.errors.push(
                update
                    .message
                    .clone()
                    .unwrap_or_else(|| format!("Task {} reported an error", update.task_name)),
            );
        }
        self.status = update.state;
    }

    fn restart(&mut self) {
        debug!(step = %self.name, "Restarting step");
        self.status = Status::Pending;
        self.errors.clear();
    }

    fn force_complete(&mut self) {
        debug!(step = %self.name, "Forcing step completion");
        self.status = Status::Complete;
    }

    fn update_parameters(&mut self, parameters: &HashMap<String, String>) {
        for (key, value) in parameters {
            self.parameters.insert(key.clone(), value.clone());
        }
    }
}
