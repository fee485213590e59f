use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use thiserror::Error;

use super::UserData;
use crate::domain::user::models::DisplayName;
use crate::domain::user::models::EmailAddress;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;
use crate::user::errors::DisplayNameError;
use crate::user::errors::EmailError;

const MIN_PASSWORD_LENGTH: usize = 8;

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<ApiSuccess<UserData>, ApiError> {
    state
        .user_service
        .register_user(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref user| ApiSuccess::new(StatusCode::CREATED, user.into()))
}

/// HTTP request body for registering a user (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    email: String,
    display_name: String,
    password: String,
}

#[derive(Debug, Clone, Error)]
enum ParseRegisterRequestError {
    #[error("Invalid email: {0}")]
    Email(#[from] EmailError),

    #[error("Invalid display name: {0}")]
    DisplayName(#[from] DisplayNameError),

    #[error("Password too short: minimum {MIN_PASSWORD_LENGTH} characters")]
    PasswordTooShort,
}

impl RegisterRequest {
    fn try_into_command(self) -> Result<RegisterUserCommand, ParseRegisterRequestError> {
        let email = EmailAddress::new(self.email)?;
        let display_name = DisplayName::new(self.display_name)?;
        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(ParseRegisterRequestError::PasswordTooShort);
        }
        Ok(RegisterUserCommand::new(email, display_name, self.password))
    }
}

impl From<ParseRegisterRequestError> for ApiError {
    fn from(err: ParseRegisterRequestError) -> Self {
        ApiError::UnprocessableEntity(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(email: &str, display_name: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.to_string(),
            display_name: display_name.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_valid_request_converts() {
        let command = request("u@example.com", "Jane Doe", "password123")
            .try_into_command()
            .unwrap();
        assert_eq!(command.email.as_str(), "u@example.com");
        assert_eq!(command.display_name.as_str(), "Jane Doe");
    }

    #[test]
    fn test_short_password_is_rejected() {
        let result = request("u@example.com", "Jane Doe", "short").try_into_command();
        assert!(matches!(
            result,
            Err(ParseRegisterRequestError::PasswordTooShort)
        ));
    }

    #[test]
    fn test_invalid_email_is_rejected() {
        let result = request("not-an-email", "Jane Doe", "password123").try_into_command();
        assert!(matches!(result, Err(ParseRegisterRequestError::Email(_))));
    }
}
