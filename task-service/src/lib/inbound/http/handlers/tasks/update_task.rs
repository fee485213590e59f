use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;

use super::parse_task_id;
use super::TaskData;
use crate::domain::task::models::TaskPriority;
use crate::domain::task::models::TaskStatus;
use crate::domain::task::models::Title;
use crate::domain::task::models::UpdateTaskCommand;
use crate::domain::task::ports::TaskServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;
use crate::task::errors::TitleError;

const MAX_DESCRIPTION_LENGTH: usize = 1000;

pub async fn update_task(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Path(task_id): Path<String>,
    Json(body): Json<UpdateTaskRequest>,
) -> Result<ApiSuccess<TaskData>, ApiError> {
    let task_id = parse_task_id(&task_id)?;

    state
        .task_service
        .update_task(current.user.id, &task_id, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref task| ApiSuccess::new(StatusCode::OK, task.into()))
}

/// HTTP request body for a partial task update; absent fields are untouched
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UpdateTaskRequest {
    title: Option<String>,
    description: Option<String>,
    status: Option<TaskStatus>,
    priority: Option<TaskPriority>,
    due_date: Option<DateTime<Utc>>,
    completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Error)]
enum ParseUpdateTaskRequestError {
    #[error("Invalid title: {0}")]
    Title(#[from] TitleError),

    #[error("Description too long: maximum {MAX_DESCRIPTION_LENGTH} characters")]
    DescriptionTooLong,
}

impl UpdateTaskRequest {
    fn try_into_command(self) -> Result<UpdateTaskCommand, ParseUpdateTaskRequestError> {
        let title = self.title.map(Title::new).transpose()?;
        if let Some(ref description) = self.description {
            if description.chars().count() > MAX_DESCRIPTION_LENGTH {
                return Err(ParseUpdateTaskRequestError::DescriptionTooLong);
            }
        }
        Ok(UpdateTaskCommand {
            title,
            description: self.description,
            status: self.status,
            priority: self.priority,
            due_date: self.due_date,
            completed_at: self.completed_at,
        })
    }
}

impl From<ParseUpdateTaskRequestError> for ApiError {
    fn from(err: ParseUpdateTaskRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}
