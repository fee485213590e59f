use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;
use axum::Json;
use serde::Deserialize;
use thiserror::Error;

use super::TaskData;
use crate::domain::task::ports::TaskServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::middleware::CurrentUser;
use crate::inbound::http::router::AppState;

const MIN_INPUT_LENGTH: usize = 5;
const MAX_INPUT_LENGTH: usize = 500;

pub async fn create_task_smart(
    State(state): State<AppState>,
    Extension(current): Extension<CurrentUser>,
    Json(body): Json<CreateTaskSmartRequest>,
) -> Result<ApiSuccess<TaskData>, ApiError> {
    let input = body.validated_input()?;

    state
        .task_service
        .create_task_smart(current.user.id, input)
        .await
        .map_err(ApiError::from)
        .map(|ref task| ApiSuccess::new(StatusCode::CREATED, task.into()))
}

/// HTTP request body carrying the natural-language task description
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateTaskSmartRequest {
    input: String,
}

#[derive(Debug, Clone, Error)]
enum ParseCreateTaskSmartRequestError {
    #[error("Input too short: minimum {MIN_INPUT_LENGTH} characters")]
    TooShort,

    #[error("Input too long: maximum {MAX_INPUT_LENGTH} characters")]
    TooLong,
}

impl CreateTaskSmartRequest {
    fn validated_input(self) -> Result<String, ParseCreateTaskSmartRequestError> {
        let length = self.input.trim().chars().count();
        if length < MIN_INPUT_LENGTH {
            return Err(ParseCreateTaskSmartRequestError::TooShort);
        }
        if length > MAX_INPUT_LENGTH {
            return Err(ParseCreateTaskSmartRequestError::TooLong);
        }
        Ok(self.input)
    }
}

impl From<ParseCreateTaskSmartRequestError> for ApiError {
    fn from(err: ParseCreateTaskSmartRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(input: &str) -> CreateTaskSmartRequest {
        CreateTaskSmartRequest {
            input: input.to_string(),
        }
    }

    #[test]
    fn test_input_bounds() {
        assert!(request("call mom tomorrow").validated_input().is_ok());
        assert!(matches!(
            request("hey").validated_input(),
            Err(ParseCreateTaskSmartRequestError::TooShort)
        ));
        assert!(matches!(
            request(&"x".repeat(501)).validated_input(),
            Err(ParseCreateTaskSmartRequestError::TooLong)
        ));
    }

    #[test]
    fn test_whitespace_padding_does_not_satisfy_minimum() {
        assert!(matches!(
            request("  ab   ").validated_input(),
            Err(ParseCreateTaskSmartRequestError::TooShort)
        ));
    }
}
