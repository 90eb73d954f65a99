use planner::CompileError;
use thiserror::Error;

/// Failures reported by a search backend.
#[derive(Debug, Error)]
pub enum ExecutorError {
    #[error("Backend error: {0}")]
    Backend(String),

    /// An error occurred while joining a task.
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),

    #[error("Unknown error: {0}")]
    Unknown(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// Top-level errors of a search request.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Compilation error: {0}")]
    Compile(#[from] CompileError),

    #[error("Executor error: {0}")]
    Executor(#[from] ExecutorError),

    /// A single result was demanded and nothing matched.
    #[error("No result for query `{query}`")]
    NotFound { query: String },

    /// A single result was demanded and more than one row matched.
    #[error("More than one result for query `{query}`")]
    Ambiguous { query: String },
}
