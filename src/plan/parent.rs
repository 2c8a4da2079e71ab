//! # Composite Plan Elements
//!
//! [`ElementGroup`] is the composite node of the plan tree: an ordered collection
//! of child elements plus exactly one execution [`Strategy`]. Phases group steps;
//! a plan groups phases. Both are `ElementGroup`s, so depth is arbitrary.
//!
//! Status is never stored on a composite; every read runs the aggregation rule
//! table over the children. Control commands fan out unconditionally to every
//! child in child order, with no short-circuiting and no aggregated return value.
//! Interruption is the one exception: it is a property of this node's own
//! strategy and is not propagated downward.

use super::aggregate::{aggregate_status, collect_errors, AggregationInput};
use super::element::Element;
use super::status::Status;
use super::strategy::{SerialStrategy, Strategy};
use super::TaskStatusUpdate;
use std::collections::{HashMap, HashSet};
use tracing::info;

/// A composite element owning an ordered collection of children and a strategy.
pub struct ElementGroup {
    name: String,
    errors: Vec<String>,
    children: Vec<Box<dyn Element>>,
    strategy: Box<dyn Strategy>,
}

impl ElementGroup {
    /// Group with the default serial strategy.
    pub fn new(name: impl Into<String>, children: Vec<Box<dyn Element>>) -> Self {
        Self::with_strategy(name, children, Box::new(SerialStrategy::new()))
    }

    pub fn with_strategy(
        name: impl Into<String>,
        children: Vec<Box<dyn Element>>,
        strategy: Box<dyn Strategy>,
    ) -> Self {
        Self {
            name: name.into(),
            errors: Vec::new(),
            children,
            strategy,
        }
    }

    /// Children in insertion order. Order is significant for display and
    /// fan-out, not for status precedence.
    pub fn children(&self) -> &[Box<dyn Element>] {
        &self.children
    }

    /// Record an error local to this composite (e.g. a plan construction
    /// problem). Surfaces as `Status::Error` on the next status read.
    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    /// Pause this node's strategy. Children observe the interruption through
    /// their own eligibility checks; the command is not forwarded to them.
    pub fn interrupt(&self) {
        info!(element = %self.name, "Interrupting element");
        self.strategy.interrupt();
    }

    /// Clear a previous interruption on this node's strategy.
    pub fn proceed(&self) {
        info!(element = %self.name, "Proceeding with element");
        self.strategy.proceed();
    }

    pub fn is_interrupted(&self) -> bool {
        self.strategy.is_interrupted()
    }
}

impl Element for ElementGroup {
    fn name(&self) -> &str {
        &self.name
    }

    fn status(&self) -> Status {
        let statuses: Vec<Status> = self.children.iter().map(|c| c.status()).collect();
        let input = AggregationInput {
            statuses: &statuses,
            has_errors: !self.errors().is_empty(),
            interrupted: self.strategy.is_interrupted(),
        };
        aggregate_status(&self.name, &input)
    }

    fn errors(&self) -> Vec<String> {
        collect_errors(&self.errors, &self.children)
    }

    fn update(&mut self, update: &TaskStatusUpdate) {
        info!(
            element = %self.name,
            task = %update.task_name,
            state = %update.state,
            "Updating element with task status"
        );
        for child in &mut self.children {
            child.update(update);
        }
    }

    fn restart(&mut self) {
        info!(element = %self.name, "Restarting child elements");
        for child in &mut self.children {
            child.restart();
        }
    }

    fn force_complete(&mut self) {
        info!(element = %self.name, "Forcing completion of child elements");
        for child in &mut self.children {
            child.force_complete();
        }
    }

    fn update_parameters(&mut self, parameters: &HashMap<String, String>) {
        for child in &mut self.children {
            child.update_parameters(parameters);
        }
    }

    fn is_eligible(&self, dirty_assets: &HashSet<String>) -> bool {
        self.status() != Status::Complete
            && self.errors().is_empty()
            && !dirty_assets.contains(self.name())
            && !self.strategy.is_interrupted()
    }
}
