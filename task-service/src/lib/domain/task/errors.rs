use thiserror::Error;

/// Error for TaskId parsing failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskIdError {
    #[error("Invalid UUID format: {0}")]
    InvalidFormat(String),
}

/// Error for Title validation failures
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TitleError {
    #[error("Title cannot be empty")]
    Empty,

    #[error("Title too long: maximum {max} characters, got {actual}")]
    TooLong { max: usize, actual: usize },
}

/// Error for assistant (LLM) operations
#[derive(Debug, Clone, Error)]
pub enum AssistantError {
    #[error("Assistant request failed: {0}")]
    RequestFailed(String),

    #[error("Assistant returned an unusable response: {0}")]
    InvalidResponse(String),
}

/// Top-level error for all task-related operations
#[derive(Debug, Clone, Error)]
pub enum TaskError {
    // Value object validation errors (automatically converted via #[from])
    #[error("Invalid task ID: {0}")]
    InvalidTaskId(#[from] TaskIdError),

    #[error("Invalid title: {0}")]
    InvalidTitle(#[from] TitleError),

    // Domain-level errors
    #[error("Task not found: {0}")]
    NotFound(String),

    #[error("Task is already completed: {0}")]
    AlreadyCompleted(String),

    #[error("Could not process the request: {0}")]
    Extraction(#[from] AssistantError),

    // Infrastructure errors
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for TaskError {
    fn from(err: anyhow::Error) -> Self {
        TaskError::Unknown(err.to_string())
    }
}
