use chrono::DateTime;
use chrono::Utc;
use serde::Serialize;

use crate::domain::task::models::Task;
use crate::domain::task::models::TaskId;
use crate::domain::task::models::TaskPriority;
use crate::domain::task::models::TaskStatus;
use crate::inbound::http::handlers::ApiError;
use crate::task::errors::TaskIdError;

pub mod complete_task;
pub mod create_task;
pub mod create_task_smart;
pub mod delete_task;
pub mod get_task;
pub mod list_tasks;
pub mod suggest_next;
pub mod update_task;

/// Public view of a task, shared by every task endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskData {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: Option<DateTime<Utc>>,
    pub original_input: Option<String>,
    pub created_by_ai: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl From<&Task> for TaskData {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.to_string(),
            title: task.title.as_str().to_string(),
            description: task.description.clone(),
            status: task.status,
            priority: task.priority,
            due_date: task.due_date,
            original_input: task.original_input.clone(),
            created_by_ai: task.created_by_ai,
            created_at: task.created_at,
            updated_at: task.updated_at,
            completed_at: task.completed_at,
        }
    }
}

/// Parse a path segment into a task ID, answering 422 on garbage.
fn parse_task_id(raw: &str) -> Result<TaskId, ApiError> {
    TaskId::from_string(raw)
        .map_err(|e: TaskIdError| ApiError::UnprocessableEntity(e.to_string()))
}
