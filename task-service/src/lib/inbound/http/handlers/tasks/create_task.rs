use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use thiserror::Error;

use super::TaskData;
use crate::domain::task::models::CreateTaskCommand;
use crate::domain::task::models::TaskPriority;
use crate::domain::task::models::Title;
use crate::domain::task::ports::TaskServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;
use crate::task::errors::TitleError;

const MAX_DESCRIPTION_LENGTH: usize = 1000;

pub async fn create_task(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(body): Json<CreateTaskRequest>,
) -> Result<ApiSuccess<TaskData>, ApiError> {
    state
        .task_service
        .create_task(current.user.id, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref task| ApiSuccess::new(StatusCode::CREATED, task.into()))
}

/// HTTP request body for creating a task manually (raw JSON)
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CreateTaskRequest {
    title: String,
    description: Option<String>,
    priority: Option<TaskPriority>,
    due_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Error)]
enum ParseCreateTaskRequestError {
    #[error("Invalid title: {0}")]
    Title(#[from] TitleError),

    #[error("Description too long: maximum {MAX_DESCRIPTION_LENGTH} characters")]
    DescriptionTooLong,
}

impl CreateTaskRequest {
    fn try_into_command(self) -> Result<CreateTaskCommand, ParseCreateTaskRequestError> {
        let title = Title::new(self.title)?;
        if let Some(ref description) = self.description {
            if description.chars().count() > MAX_DESCRIPTION_LENGTH {
                return Err(ParseCreateTaskRequestError::DescriptionTooLong);
            }
        }
        Ok(CreateTaskCommand {
            title,
            description: self.description,
            priority: self.priority.unwrap_or(TaskPriority::Medium),
            due_date: self.due_date,
        })
    }
}

impl From<ParseCreateTaskRequestError> for ApiError {
    fn from(err: ParseCreateTaskRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}
