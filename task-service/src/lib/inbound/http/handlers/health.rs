use axum::http::StatusCode;
use serde::Serialize;

use super::ApiSuccess;

pub async fn welcome() -> ApiSuccess<WelcomeData> {
    ApiSuccess::new(
        StatusCode::OK,
        WelcomeData {
            message: "Task Manager API".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    )
}

pub async fn health() -> ApiSuccess<HealthData> {
    ApiSuccess::new(
        StatusCode::OK,
        HealthData {
            status: "healthy".to_string(),
        },
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WelcomeData {
    pub message: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthData {
    pub status: String,
}
