pub mod auth;
pub mod board;
pub mod middleware;
pub mod session;
pub mod state;
pub mod views;

pub use session::CurrentSession;
pub use state::AppState;

use axum::{
    http::StatusCode,
    Router,
    routing::{get, post},
    middleware as axum_middleware,
};
use tower_http::{
    trace::TraceLayer,
    timeout::TimeoutLayer,
};
use std::time::Duration;
use serde::Serialize;

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

pub fn create_router(state: AppState) -> Router {
    let timeout = Duration::from_secs(state.config.request_timeout_secs);

    // Routes behind the access guard
    let guarded = Router::new()
        .route("/newMessage", get(board::new_message_form))
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::require_login,
        ));

    Router::new()
        // Health check
        .route("/health", get(health))

        // Feed
        .route("/", get(board::index))
        .route("/new", post(board::create_message))

        // Authentication
        .route("/login", get(auth::login_form).post(auth::login))
        .route("/logout", get(auth::logout))
        .route("/signUp", get(auth::signup_form).post(auth::signup))

        .merge(guarded)
        .layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, timeout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> axum::Json<HealthResponse> {
    axum::Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
