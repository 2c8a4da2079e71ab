//! # Status Aggregation Rules
//!
//! Computes a composite element's status from its children. The precedence policy
//! is an ordered rule table evaluated top to bottom; the first matching rule wins.
//! Ordering matters throughout this table; later rules assume earlier ones did
//! not match. Modify with care.
//!
//! Several rules can reach the same outcome for overlapping inputs (e.g. a mix of
//! `Prepared` and `Complete` children). They are kept as separate entries anyway:
//! each carries its own log line, and operators read those lines to understand why
//! a plan shows the status it does.

use super::element::Element;
use super::status::{all_have_status, any_have_status, Status};
use tracing::{debug, info, warn};

/// Everything the rule table needs to know about a composite element.
#[derive(Debug, Clone, Copy)]
pub struct AggregationInput<'a> {
    /// Children statuses, in child order.
    pub statuses: &'a [Status],
    /// Whether this element or any descendant recorded an error.
    pub has_errors: bool,
    /// Whether this element's strategy reports interrupted.
    pub interrupted: bool,
}

/// Log level for a matched rule. Routine branches log at debug; the interruption
/// branch is operator-relevant and logs at info.
#[derive(Debug, Clone, Copy)]
enum RuleLevel {
    Debug,
    Info,
}

/// One predicate → status entry in the precedence table.
struct Rule {
    outcome: Status,
    level: RuleLevel,
    reason: &'static str,
    matches: fn(&AggregationInput<'_>) -> bool,
}

/// The precedence table. First match wins; the fallback for "no match" lives in
/// [`aggregate_status`], not here.
const RULES: &[Rule] = &[
    Rule {
        outcome: Status::Error,
        level: RuleLevel::Debug,
        reason: "element or descendants contain errors",
        matches: |input| input.has_errors,
    },
    Rule {
        outcome: Status::Complete,
        level: RuleLevel::Debug,
        reason: "empty collection of child elements",
        matches: |input| input.statuses.is_empty(),
    },
    Rule {
        outcome: Status::Complete,
        level: RuleLevel::Debug,
        reason: "all child elements are complete",
        matches: |input| all_have_status(Status::Complete, input.statuses),
    },
    Rule {
        outcome: Status::Waiting,
        level: RuleLevel::Info,
        reason: "element is interrupted",
        matches: |input| input.interrupted,
    },
    Rule {
        outcome: Status::Waiting,
        level: RuleLevel::Debug,
        reason: "at least one child element is waiting",
        matches: |input| any_have_status(Status::Waiting, input.statuses),
    },
    Rule {
        outcome: Status::Pending,
        level: RuleLevel::Debug,
        reason: "all child elements are pending",
        matches: |input| all_have_status(Status::Pending, input.statuses),
    },
    Rule {
        outcome: Status::InProgress,
        level: RuleLevel::Debug,
        reason: "at least one child element is prepared",
        matches: |input| any_have_status(Status::Prepared, input.statuses),
    },
    Rule {
        outcome: Status::InProgress,
        level: RuleLevel::Debug,
        reason: "at least one child element is in progress",
        matches: |input| any_have_status(Status::InProgress, input.statuses),
    },
    Rule {
        outcome: Status::InProgress,
        level: RuleLevel::Debug,
        reason: "some child elements are complete and some are pending",
        matches: |input| {
            any_have_status(Status::Complete, input.statuses)
                && any_have_status(Status::Pending, input.statuses)
        },
    },
    Rule {
        outcome: Status::Starting,
        level: RuleLevel::Debug,
        reason: "at least one child element is starting",
        matches: |input| any_have_status(Status::Starting, input.statuses),
    },
];

/// Evaluate the precedence table for the named element.
///
/// If no rule matches, the combination of child statuses is one the policy never
/// anticipated; that is reported as [`Status::Error`] with a warning rather than
/// silently defaulted to a healthy status.
pub fn aggregate_status(name: &str, input: &AggregationInput<'_>) -> Status {
    for rule in RULES {
        if (rule.matches)(input) {
            match rule.level {
                RuleLevel::Debug => debug!(
                    element = %name,
                    status = %rule.outcome,
                    reason = rule.reason,
                    "Aggregated element status"
                ),
                RuleLevel::Info => info!(
                    element = %name,
                    status = %rule.outcome,
                    reason = rule.reason,
                    "Aggregated element status"
                ),
            }
            return rule.outcome;
        }
    }

    warn!(
        element = %name,
        children_statuses = ?input.statuses,
        "Unexpected combination of child statuses, reporting error"
    );
    Status::Error
}

/// Concatenate parent-level errors with every child's errors, depth-first in
/// child order.
pub fn collect_errors(parent_errors: &[String], children: &[Box<dyn Element>]) -> Vec<String> {
    let mut errors: Vec<String> = parent_errors.to_vec();
    for child in children {
        errors.extend(child.errors());
    }
    errors
}
