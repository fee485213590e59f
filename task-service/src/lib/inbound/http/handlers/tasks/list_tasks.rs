use axum::extract::Query;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Deserialize;

use super::TaskData;
use crate::domain::task::models::TaskFilter;
use crate::domain::task::models::TaskPriority;
use crate::domain::task::models::TaskStatus;
use crate::domain::task::ports::TaskServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;

pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Query(query): Query<ListTasksQuery>,
) -> Result<ApiSuccess<Vec<TaskData>>, ApiError> {
    let filter = TaskFilter {
        status: query.status,
        priority: query.priority,
    };

    state
        .task_service
        .list_tasks(current.user.id, filter)
        .await
        .map_err(ApiError::from)
        .map(|tasks| {
            ApiSuccess::new(StatusCode::OK, tasks.iter().map(TaskData::from).collect())
        })
}

/// Optional query string filters for the task list
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ListTasksQuery {
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
}
