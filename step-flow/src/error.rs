use thiserror::Error;

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("Task execution failed: {0}")]
    TaskExecutionFailed(String),

    #[error("Task not found: {0}")]
    TaskNotFound(String),

    #[error("Context error: {0}")]
    ContextError(String),

    #[error("Graph {0} has no start task")]
    MissingStartTask(String),
}

pub type Result<T> = std::result::Result<T, GraphError>;
