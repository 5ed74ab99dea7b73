use async_trait::async_trait;

use crate::{context::Context, error::Result};

/// Result of a task execution
#[derive(Debug, Clone)]
pub struct TaskResult {
    /// Response to show to the user
    pub response: Option<String>,
    /// Next action to take
    pub next_action: NextAction,
    /// Short description of what the task did, kept on the session
    pub status_message: Option<String>,
    /// ID of the task that produced this result, filled in by the graph
    pub task_id: String,
}

impl TaskResult {
    pub fn new(response: Option<String>, next_action: NextAction) -> Self {
        Self {
            response,
            next_action,
            status_message: None,
            task_id: String::new(),
        }
    }

    pub fn new_with_status(
        response: Option<String>,
        next_action: NextAction,
        status_message: Option<String>,
    ) -> Self {
        Self {
            response,
            next_action,
            status_message,
            task_id: String::new(),
        }
    }

    /// Stay where we are and wait for the next user action
    pub fn wait(status_message: impl Into<String>) -> Self {
        Self::new_with_status(None, NextAction::WaitForInput, Some(status_message.into()))
    }
}

/// Defines what should happen after a task completes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextAction {
    /// Move to the next task along the outgoing edges
    Continue,
    /// Jump to a specific task by ID
    GoTo(String),
    /// Return to the previously visited task
    GoBack,
    /// Clear the context and return to the start task
    Reset,
    /// Stay at the current task until more input arrives
    WaitForInput,
}

/// Core trait that all tasks must implement
#[async_trait]
pub trait Task: Send + Sync {
    /// Unique identifier for this task
    fn id(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Execute the task with the given context
    async fn run(&self, context: Context) -> Result<TaskResult>;
}
