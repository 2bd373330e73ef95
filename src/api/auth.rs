use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
    Form,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::api::session::{self, CurrentSession};
use crate::api::state::AppState;
use crate::api::views::{render, LoginPage, SignUpPage, SignupDraft};
use crate::auth::{validate_signup, FieldError, SignupForm, Verification};
use crate::crypto::hash_password_async;
use crate::db::{SessionRepository, UserRepository};
use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// GET /login
pub async fn login_form(
    State(state): State<AppState>,
    current: CurrentSession,
) -> Result<Response, AppError> {
    if current.is_authenticated() {
        return Ok(Redirect::to("/").into_response());
    }

    let err = match current.token() {
        Some(token) => SessionRepository::take_messages(&state.db, token).await?,
        None => Vec::new(),
    };

    render(&LoginPage {
        title: "Log In",
        err,
    })
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    current: CurrentSession,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<(CookieJar, Redirect), AppError> {
    let outcome = state.verifier.verify(&form.username, &form.password).await?;

    match outcome {
        Verification::Verified(user) => {
            let jar = session::log_in(&state, jar, &current, &user).await?;
            Ok((jar, Redirect::to("/")))
        }
        failed => {
            let message = failed.failure_message().unwrap_or("Login failed");
            tracing::warn!("Failed login for {}: {}", form.username, message);
            let jar = session::flash(&state, jar, &current, message).await?;
            Ok((jar, Redirect::to("/login")))
        }
    }
}

/// GET /logout
pub async fn logout(
    State(state): State<AppState>,
    current: CurrentSession,
    jar: CookieJar,
) -> Result<(CookieJar, Redirect), AppError> {
    if let Some(token) = current.token() {
        SessionRepository::delete(&state.db, token).await?;
    }

    if let Some(user) = &current.user {
        tracing::info!("👋 {} logged out", user.name);
    }

    Ok((jar.remove(session::removal_cookie()), Redirect::to("/")))
}

/// GET /signUp
pub async fn signup_form(current: CurrentSession) -> Result<Response, AppError> {
    if current.is_authenticated() {
        return Ok(Redirect::to("/").into_response());
    }

    render(&SignUpPage {
        title: "Sign Up",
        user: None,
        err: Vec::new(),
    })
}

/// POST /signUp
pub async fn signup(
    State(state): State<AppState>,
    current: CurrentSession,
    jar: CookieJar,
    Form(form): Form<SignupForm>,
) -> Result<Response, AppError> {
    let form = form.trimmed();
    let mut errors = validate_signup(&form);

    if errors.is_empty() && UserRepository::get_by_name(&state.db, &form.name).await?.is_some() {
        errors.push(FieldError::new("name", "Name is already taken"));
    }

    if !errors.is_empty() {
        tracing::debug!("Sign-up rejected with {} validation error(s)", errors.len());
        return render(&SignUpPage {
            title: "Sign Up",
            user: Some(SignupDraft {
                name: form.name,
                email: form.email,
            }),
            err: errors,
        });
    }

    let password_hash = hash_password_async(form.password, state.config.password_cost).await?;
    let user = UserRepository::create(&state.db, &form.name, &form.email, &password_hash).await?;
    tracing::info!("✅ New account created: {}", user.name);

    let jar = session::log_in(&state, jar, &current, &user).await?;
    Ok((jar, Redirect::to("/?logged")).into_response())
}
