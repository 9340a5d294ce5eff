//! Planning errors.
//!
//! The planner itself cannot fail on a validated query. These errors come
//! from running it: the deadline expiring or the worker task dying.

use std::time::Duration;

/// Error from running a planning job.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PlanError {
    /// Planning did not finish before the deadline
    #[error("planning timed out after {0:?}")]
    Timeout(Duration),

    /// The blocking task running the planner panicked or was cancelled
    #[error("planning task failed: {0}")]
    TaskFailed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = PlanError::Timeout(Duration::from_millis(1500));
        assert_eq!(err.to_string(), "planning timed out after 1.5s");

        let err = PlanError::TaskFailed("task 3 panicked".into());
        assert_eq!(err.to_string(), "planning task failed: task 3 panicked");
    }
}
