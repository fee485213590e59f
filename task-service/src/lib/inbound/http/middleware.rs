use std::sync::Arc;

use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::IntoResponse;
use axum::response::Response;

use crate::domain::user::models::User;
use crate::domain::user::ports::UserServicePort;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::router::AppState;

/// Extension type carrying the authenticated principal through the request
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: User,
}

/// Middleware resolving the bearer token to a stored user.
///
/// Every failure mode answers the same way: a 401 with a bearer challenge
/// and no hint of whether the token was absent, forged, expired, or pointed
/// at a principal that no longer exists.
pub async fn authenticate(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, Response> {
    let token = bearer_token(&req);

    let user = state
        .authenticator
        .resolve(token, |email| {
            let user_service = Arc::clone(&state.user_service);
            async move { user_service.lookup_principal(&email).await }
        })
        .await
        .map_err(|_| {
            tracing::debug!("Request could not be authenticated");
            ApiError::Unauthorized("Authentication required".to_string()).into_response()
        })?;

    req.extensions_mut().insert(CurrentUser { user });

    Ok(next.run(req).await)
}

/// Extract the token from an `Authorization: Bearer <token>` header, if any.
fn bearer_token(req: &Request) -> Option<&str> {
    req.headers()
        .get(http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}
