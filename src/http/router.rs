//! Route table and middleware stack.

use std::any::Any;
use std::sync::Arc;

use axum::{
    Json, Router,
    http::{HeaderName, Method, StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, put},
};
use mockable::Clock;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any as AnyOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::error;

use super::{
    error::ApiError,
    handlers::{self, MessageBody},
};
use crate::config::AllowedOrigin;
use crate::task::{ports::TaskRepository, services::TaskService};

/// Task service with the repository and clock erased, shared by handlers.
pub type SharedTaskService = TaskService<dyn TaskRepository, dyn Clock + Send + Sync>;

/// State handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Service executing the task operations.
    pub tasks: SharedTaskService,
}

impl AppState {
    /// Builds state from a concrete repository and clock.
    #[must_use]
    pub fn new(repository: Arc<dyn TaskRepository>, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self {
            tasks: TaskService::new(repository, clock),
        }
    }
}

/// Builds the application router with CORS, tracing, and panic recovery.
#[must_use]
pub fn router(state: AppState, origin: &AllowedOrigin) -> Router {
    Router::new()
        .route(
            "/api/tasks",
            get(handlers::list_tasks).post(handlers::create_task),
        )
        .route(
            "/api/tasks/{id}",
            put(handlers::edit_task).delete(handlers::delete_task),
        )
        .route("/api/tasks/{id}/complete", put(handlers::complete_task))
        .route("/api/health", get(handlers::health))
        .fallback(handlers::not_found)
        .method_not_allowed_fallback(handlers::not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(origin))
        .with_state(state)
}

fn cors_layer(origin: &AllowedOrigin) -> CorsLayer {
    let methods = [
        Method::GET,
        Method::POST,
        Method::PUT,
        Method::DELETE,
        Method::OPTIONS,
    ];
    let headers: [HeaderName; 2] = [header::CONTENT_TYPE, header::ACCEPT];
    match origin {
        AllowedOrigin::Any => CorsLayer::new()
            .allow_origin(AnyOrigin)
            .allow_methods(methods)
            .allow_headers(headers),
        AllowedOrigin::Exact(value) => CorsLayer::new()
            .allow_origin(value.clone())
            .allow_methods(methods)
            .allow_headers(headers),
    }
}

fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    error!(panic = %panic_detail(payload), "request handler panicked");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(MessageBody {
            message: ApiError::INTERNAL_MESSAGE.to_owned(),
        }),
    )
        .into_response()
}

fn panic_detail(payload: Box<dyn Any + Send + 'static>) -> String {
    match payload.downcast::<String>() {
        Ok(message) => *message,
        Err(other) => other
            .downcast_ref::<&str>()
            .map_or_else(|| "non-string panic payload".to_owned(), |message| (*message).to_owned()),
    }
}
