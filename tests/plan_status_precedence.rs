//! Status aggregation precedence through the public plan API.
//!
//! The rule order is load-bearing: each test here pins one rule against the
//! rules below it, so a reordering shows up as a failure, not just a coverage
//! gap.

use helmsman_core::plan::{Element, ElementGroup, Status, Step};
use proptest::prelude::*;

fn group_of(statuses: &[Status]) -> ElementGroup {
    let children: Vec<Box<dyn Element>> = statuses
        .iter()
        .enumerate()
        .map(|(i, s)| Box::new(Step::with_status(format!("step-{i}"), *s)) as Box<dyn Element>)
        .collect();
    ElementGroup::new("plan", children)
}

#[test]
fn errors_dominate_all_statuses() {
    let mut failed = Step::with_status("bad", Status::Complete);
    failed.add_error("disk full");
    let children: Vec<Box<dyn Element>> = vec![
        Box::new(Step::with_status("ok", Status::Complete)),
        Box::new(failed),
    ];
    let group = ElementGroup::new("plan", children);
    assert_eq!(group.status(), Status::Error);
}

#[test]
fn childless_composite_is_complete() {
    assert_eq!(group_of(&[]).status(), Status::Complete);
}

#[test]
fn all_complete_is_complete() {
    assert_eq!(
        group_of(&[Status::Complete, Status::Complete]).status(),
        Status::Complete
    );
}

#[test]
fn all_complete_beats_interruption() {
    let group = group_of(&[Status::Complete, Status::Complete]);
    group.interrupt();
    assert_eq!(group.status(), Status::Complete);
}

#[test]
fn interruption_beats_child_progress() {
    let group = group_of(&[Status::InProgress, Status::Pending]);
    group.interrupt();
    assert_eq!(group.status(), Status::Waiting);
    group.proceed();
    assert_eq!(group.status(), Status::InProgress);
}

#[test]
fn waiting_child_beats_prepared_child() {
    assert_eq!(
        group_of(&[Status::Prepared, Status::Waiting]).status(),
        Status::Waiting
    );
}

#[test]
fn all_pending_is_pending() {
    assert_eq!(
        group_of(&[Status::Pending, Status::Pending]).status(),
        Status::Pending
    );
}

#[test]
fn prepared_child_means_in_progress() {
    assert_eq!(
        group_of(&[Status::Prepared, Status::Pending]).status(),
        Status::InProgress
    );
}

#[test]
fn complete_plus_pending_is_in_progress() {
    assert_eq!(
        group_of(&[Status::Complete, Status::Pending]).status(),
        Status::InProgress
    );
}

#[test]
fn starting_plus_pending_is_starting() {
    assert_eq!(
        group_of(&[Status::Starting, Status::Pending]).status(),
        Status::Starting
    );
}

#[test]
fn aggregation_recurses_through_nested_groups() {
    let done_phase = group_of(&[Status::Complete]);
    let pending_phase = group_of(&[Status::Pending]);
    let root = ElementGroup::new(
        "deploy",
        vec![
            Box::new(done_phase) as Box<dyn Element>,
            Box::new(pending_phase) as Box<dyn Element>,
        ],
    );
    assert_eq!(root.status(), Status::InProgress);
}

fn arb_status() -> impl Strategy<Value = Status> {
    prop::sample::select(vec![
        Status::Pending,
        Status::Prepared,
        Status::Starting,
        Status::InProgress,
        Status::Waiting,
        Status::Complete,
        Status::Error,
    ])
}

proptest! {
    /// Status is a pure function of the tree: two reads without intervening
    /// mutation agree, for any combination of child statuses and interruption.
    #[test]
    fn status_read_is_pure(
        statuses in prop::collection::vec(arb_status(), 0..6),
        interrupted in any::<bool>(),
    ) {
        let group = group_of(&statuses);
        if interrupted {
            group.interrupt();
        }
        prop_assert_eq!(group.status(), group.status());
    }

    /// A descendant with a non-empty error list forces Error regardless of the
    /// other children.
    #[test]
    fn any_descendant_error_forces_error(
        statuses in prop::collection::vec(arb_status(), 1..6),
    ) {
        let mut children: Vec<Box<dyn Element>> = statuses
            .iter()
            .enumerate()
            .map(|(i, s)| Box::new(Step::with_status(format!("step-{i}"), *s)) as Box<dyn Element>)
            .collect();
        let mut failed = Step::new("failed");
        failed.add_error("boom");
        children.push(Box::new(failed));
        let group = ElementGroup::new("plan", children);
        prop_assert_eq!(group.status(), Status::Error);
    }
}
