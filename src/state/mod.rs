//! State module for tracking fetch task progress
//!
//! Each link handed to the orchestrator becomes one task that moves through
//! `Pending -> Fetching -> {Succeeded, Failed}` and never moves back.

mod task_state;

pub use task_state::TaskState;
