/// Task state definitions for tracking fetch progress
use crate::KeeperError;
use std::fmt;

/// Represents the current state of a single fetch task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskState {
    /// Task has been created but its request has not started
    Pending,

    /// Task is fetching its page (including backoff waits)
    Fetching,

    /// Page was fetched and stored
    Succeeded,

    /// Fetch or store failed; an error line was reported
    Failed,
}

impl TaskState {
    /// Returns true if this is a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed)
    }

    /// Returns true if the task may move from `self` to `next`
    pub fn can_transition_to(&self, next: TaskState) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Fetching)
                | (Self::Fetching, Self::Succeeded)
                | (Self::Fetching, Self::Failed)
        )
    }

    /// Moves to `next`, rejecting transitions outside the state machine
    pub fn advance(&mut self, next: TaskState) -> Result<(), KeeperError> {
        if !self.can_transition_to(next) {
            return Err(KeeperError::InvalidTransition {
                from: *self,
                to: next,
            });
        }

        *self = next;
        Ok(())
    }

    /// Short lowercase name used in log fields
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Fetching => "fetching",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
