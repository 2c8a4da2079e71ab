//! # Execution Strategies
//!
//! A [`Strategy`] decides how a composite element's children execute. The only
//! part of that contract the coordination core depends on is interruption: the
//! flag is owned by the strategy, set and cleared top-down, and observed by the
//! status aggregation rules. Concrete child-ordering policies build on top of
//! [`InterruptFlag`] without the tree knowing which policy is in play.

use std::sync::atomic::{AtomicBool, Ordering};

/// Execution policy owned by a composite element.
pub trait Strategy: Send + Sync {
    /// Pause issuing new work. Already-running children finish on their own.
    fn interrupt(&self);

    /// Clear a previous interruption.
    fn proceed(&self);

    fn is_interrupted(&self) -> bool;
}

/// Shared interruption state for strategy implementations.
#[derive(Debug, Default)]
pub struct InterruptFlag {
    interrupted: AtomicBool,
}

impl InterruptFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self) {
        self.interrupted.store(true, Ordering::SeqCst);
    }

    pub fn clear(&self) {
        self.interrupted.store(false, Ordering::SeqCst);
    }

    pub fn is_set(&self) -> bool {
        self.interrupted.load(Ordering::SeqCst)
    }
}

/// Strategy that executes children in their given order and supports manual
/// interruption. The default for phases and plans.
#[derive(Debug, Default)]
pub struct SerialStrategy {
    flag: InterruptFlag,
}

impl SerialStrategy {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Strategy for SerialStrategy {
    fn interrupt(&self) {
        self.flag.set();
    }

    fn proceed(&self) {
        self.flag.clear();
    }

    fn is_interrupted(&self) -> bool {
        self.flag.is_set()
    }
}
