use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use crate::domain::task::models::Suggestion;
use crate::domain::task::ports::TaskServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;

pub async fn suggest_next(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
) -> Result<ApiSuccess<SuggestionData>, ApiError> {
    state
        .task_service
        .suggest_next(current.user.id)
        .await
        .map_err(ApiError::from)
        .map(|ref suggestion| ApiSuccess::new(StatusCode::OK, suggestion.into()))
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuggestionData {
    pub message: String,
    pub task_id: Option<String>,
}

impl From<&Suggestion> for SuggestionData {
    fn from(suggestion: &Suggestion) -> Self {
        Self {
            message: suggestion.message.clone(),
            task_id: suggestion.task_id.map(|id| id.to_string()),
        }
    }
}
