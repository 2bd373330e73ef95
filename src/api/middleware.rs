use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::api::session::CurrentSession;
use crate::api::state::AppState;
use crate::error::AppError;

/// Access guard - lets authenticated requests through, sends everyone else to /login
pub async fn require_login(
    State(state): State<AppState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let current = CurrentSession::resolve(&state, &jar).await?;

    let Some(user) = current.user else {
        tracing::debug!("🚫 Unauthenticated request to {}", request.uri().path());
        return Ok(Redirect::to("/login").into_response());
    };

    // Store the user in request extensions
    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}
