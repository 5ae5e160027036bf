/*!
 * Duplicate-processing prevention.
 *
 * The guard holds the set of task identifiers currently being processed.
 * Acquire before starting work on a task and release when done, including
 * on every failure path, or the task is stuck until restart.
 */

use parking_lot::Mutex;
use std::collections::HashSet;

/// Tracks which tasks are currently in flight
#[derive(Debug, Default)]
pub struct ProcessingGuard {
    in_flight: Mutex<HashSet<String>>,
}

impl ProcessingGuard {
    /// Create an empty guard
    pub fn new() -> Self {
        Self::default()
    }

    /// Try to claim a task. Returns false when it is already being
    /// processed by someone else.
    pub fn try_acquire(&self, task_id: &str) -> bool {
        self.in_flight.lock().insert(task_id.to_string())
    }

    /// Release a claimed task. Releasing an unclaimed task is a no-op.
    pub fn release(&self, task_id: &str) {
        self.in_flight.lock().remove(task_id);
    }

    /// Number of tasks currently claimed
    pub fn in_flight_count(&self) -> usize {
        self.in_flight.lock().len()
    }
}
