use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::patch;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::auth::login::login;
use super::handlers::auth::me::me;
use super::handlers::auth::register::register;
use super::handlers::health::health;
use super::handlers::health::welcome;
use super::handlers::tasks::complete_task::complete_task;
use super::handlers::tasks::create_task::create_task;
use super::handlers::tasks::create_task_smart::create_task_smart;
use super::handlers::tasks::delete_task::delete_task;
use super::handlers::tasks::get_task::get_task;
use super::handlers::tasks::list_tasks::list_tasks;
use super::handlers::tasks::suggest_next::suggest_next;
use super::handlers::tasks::update_task::update_task;
use super::middleware::authenticate as auth_middleware;
use crate::domain::task::service::TaskService;
use crate::domain::user::service::UserService;
use crate::outbound::assistant::GeminiAssistant;
use crate::outbound::repositories::task::PostgresTaskRepository;
use crate::outbound::repositories::user::PostgresUserRepository;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService<PostgresUserRepository>>,
    pub task_service: Arc<TaskService<PostgresTaskRepository, GeminiAssistant>>,
    pub authenticator: Arc<Authenticator>,
}

pub fn create_router(
    user_service: Arc<UserService<PostgresUserRepository>>,
    task_service: Arc<TaskService<PostgresTaskRepository, GeminiAssistant>>,
    authenticator: Arc<Authenticator>,
) -> Router {
    let state = AppState {
        user_service,
        task_service,
        authenticator,
    };

    let public_routes = Router::new()
        .route("/", get(welcome))
        .route("/health", get(health))
        .route("/auth/register", post(register))
        .route("/auth/login", post(login));

    let protected_routes = Router::new()
        .route("/auth/me", get(me))
        .route("/tasks", post(create_task))
        .route("/tasks", get(list_tasks))
        .route("/tasks/create-smart", post(create_task_smart))
        .route("/tasks/suggest-next", post(suggest_next))
        .route("/tasks/:task_id", get(get_task))
        .route("/tasks/:task_id", put(update_task))
        .route("/tasks/:task_id", delete(delete_task))
        .route("/tasks/:task_id/complete", patch(complete_task))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
