use async_trait::async_trait;

use crate::domain::task::models::CreateTaskCommand;
use crate::domain::task::models::ExtractedTask;
use crate::domain::task::models::Suggestion;
use crate::domain::task::models::Task;
use crate::domain::task::models::TaskFilter;
use crate::domain::task::models::TaskId;
use crate::domain::task::models::UpdateTaskCommand;
use crate::domain::user::models::UserId;
use crate::task::errors::AssistantError;
use crate::task::errors::TaskError;

/// Port for task domain service operations.
///
/// Every operation is scoped to the owning user; a task belonging to
/// someone else is indistinguishable from one that does not exist.
#[async_trait]
pub trait TaskServicePort: Send + Sync + 'static {
    /// Create a task manually.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create_task(
        &self,
        user_id: UserId,
        command: CreateTaskCommand,
    ) -> Result<Task, TaskError>;

    /// Create a task from a natural-language request via the assistant.
    ///
    /// # Errors
    /// * `Extraction` - The assistant could not produce structured data
    /// * `InvalidTitle` - The extracted title fails validation
    /// * `DatabaseError` - Database operation failed
    async fn create_task_smart(&self, user_id: UserId, input: String) -> Result<Task, TaskError>;

    /// List the user's tasks, optionally filtered, ordered by due date
    /// ascending with undated tasks last.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list_tasks(&self, user_id: UserId, filter: TaskFilter)
        -> Result<Vec<Task>, TaskError>;

    /// Retrieve one of the user's tasks.
    ///
    /// # Errors
    /// * `NotFound` - Task does not exist or belongs to another user
    /// * `DatabaseError` - Database operation failed
    async fn get_task(&self, user_id: UserId, task_id: &TaskId) -> Result<Task, TaskError>;

    /// Partially update one of the user's tasks.
    ///
    /// # Errors
    /// * `NotFound` - Task does not exist or belongs to another user
    /// * `DatabaseError` - Database operation failed
    async fn update_task(
        &self,
        user_id: UserId,
        task_id: &TaskId,
        command: UpdateTaskCommand,
    ) -> Result<Task, TaskError>;

    /// Delete one of the user's tasks.
    ///
    /// # Errors
    /// * `NotFound` - Task does not exist or belongs to another user
    /// * `DatabaseError` - Database operation failed
    async fn delete_task(&self, user_id: UserId, task_id: &TaskId) -> Result<(), TaskError>;

    /// Mark one of the user's tasks completed, stamping `completed_at`.
    ///
    /// # Errors
    /// * `NotFound` - Task does not exist or belongs to another user
    /// * `AlreadyCompleted` - Task was already completed
    /// * `DatabaseError` - Database operation failed
    async fn complete_task(&self, user_id: UserId, task_id: &TaskId) -> Result<Task, TaskError>;

    /// Recommend which task to work on next.
    ///
    /// Never fails on assistant errors; falls back to a deterministic
    /// recommendation by due date and priority.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn suggest_next(&self, user_id: UserId) -> Result<Suggestion, TaskError>;
}

/// Persistence operations for the task aggregate.
#[async_trait]
pub trait TaskRepository: Send + Sync + 'static {
    /// Persist a new task to storage.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, task: Task) -> Result<Task, TaskError>;

    /// Retrieve a task by identifier, scoped to its owner.
    ///
    /// # Returns
    /// Optional task entity (None if absent or owned by another user)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, user_id: UserId, task_id: &TaskId)
        -> Result<Option<Task>, TaskError>;

    /// Retrieve the user's tasks matching the filter, ordered by due date
    /// ascending with nulls last.
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn list(&self, user_id: UserId, filter: TaskFilter) -> Result<Vec<Task>, TaskError>;

    /// Update an existing task in storage.
    ///
    /// # Errors
    /// * `NotFound` - Task does not exist
    /// * `DatabaseError` - Database operation failed
    async fn update(&self, task: Task) -> Result<Task, TaskError>;

    /// Remove a task from storage, scoped to its owner.
    ///
    /// # Errors
    /// * `NotFound` - Task does not exist or belongs to another user
    /// * `DatabaseError` - Database operation failed
    async fn delete(&self, user_id: UserId, task_id: &TaskId) -> Result<(), TaskError>;
}

/// Outbound port for the natural-language assistant.
#[async_trait]
pub trait TaskAssistant: Send + Sync + 'static {
    /// Extract structured task data from a natural-language request.
    ///
    /// # Errors
    /// * `RequestFailed` - The assistant could not be reached
    /// * `InvalidResponse` - The assistant's answer could not be parsed
    async fn extract_task(&self, input: &str) -> Result<ExtractedTask, AssistantError>;

    /// Recommend which of the given active tasks to do now.
    ///
    /// # Errors
    /// * `RequestFailed` - The assistant could not be reached
    /// * `InvalidResponse` - The assistant's answer could not be parsed
    async fn suggest_next(&self, tasks: &[Task]) -> Result<Suggestion, AssistantError>;
}
