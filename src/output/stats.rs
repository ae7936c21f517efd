//! Per-run result counts

use std::fmt;

/// Counts of how each input link ended up
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Links given on the command line
    pub requested: usize,

    /// Links rejected before a task was spawned
    pub invalid: usize,

    /// Tasks that fetched and stored their page
    pub succeeded: usize,

    /// Tasks whose fetch or store failed
    pub failed: usize,
}

impl RunSummary {
    /// Creates an empty summary for `requested` links
    pub fn new(requested: usize) -> Self {
        Self {
            requested,
            ..Self::default()
        }
    }

    /// Number of links that produced a task
    pub fn spawned(&self) -> usize {
        self.succeeded + self.failed
    }

    /// Returns true if every link was fetched and stored
    pub fn all_succeeded(&self) -> bool {
        self.succeeded == self.requested
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} link(s): {} stored, {} failed, {} invalid",
            self.requested, self.succeeded, self.failed, self.invalid
        )
    }
}
