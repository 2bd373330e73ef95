use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use crate::api::state::AppState;
use crate::config::Config;
use crate::db::{Session, SessionRepository, User, UserRepository};
use crate::error::AppError;

pub const SESSION_COOKIE: &str = "sid";

/// The session attached to a request, if its cookie names a live one.
#[derive(Debug, Clone, Default)]
pub struct CurrentSession {
    pub session: Option<Session>,
    pub user: Option<User>,
}

impl CurrentSession {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.token.as_str())
    }

    /// Looks up the session named by the cookie and the user bound to it.
    pub async fn resolve(state: &AppState, jar: &CookieJar) -> Result<Self, AppError> {
        let Some(cookie) = jar.get(SESSION_COOKIE) else {
            return Ok(Self::default());
        };

        let Some(session) = SessionRepository::get_by_token(&state.db, cookie.value()).await?
        else {
            return Ok(Self::default());
        };

        let user = match &session.user_id {
            Some(user_id) => UserRepository::get_by_id(&state.db, user_id).await?,
            None => None,
        };

        Ok(Self {
            session: Some(session),
            user,
        })
    }
}

impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        Self::resolve(state, &jar).await
    }
}

/// Starts a fresh session bound to `user`, discarding whatever session the client had.
pub async fn log_in(
    state: &AppState,
    jar: CookieJar,
    current: &CurrentSession,
    user: &User,
) -> Result<CookieJar, AppError> {
    if let Some(token) = current.token() {
        SessionRepository::delete(&state.db, token).await?;
    }

    let session = SessionRepository::create(
        &state.db,
        Some(&user.id),
        state.config.session_expiry_hours,
    ).await?;

    tracing::info!("🔑 Session started for {}", user.name);
    Ok(jar.add(session_cookie(&state.config, session.token)))
}

/// Records a flash message, creating an anonymous session when the client has none.
pub async fn flash(
    state: &AppState,
    jar: CookieJar,
    current: &CurrentSession,
    message: &str,
) -> Result<CookieJar, AppError> {
    if let Some(token) = current.token() {
        SessionRepository::push_message(&state.db, token, message).await?;
        return Ok(jar);
    }

    let session = SessionRepository::create(
        &state.db,
        None,
        state.config.session_expiry_hours,
    ).await?;
    SessionRepository::push_message(&state.db, &session.token, message).await?;

    Ok(jar.add(session_cookie(&state.config, session.token)))
}

pub fn session_cookie(config: &Config, token: String) -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(config.cookie_secure)
        .build()
}

pub fn removal_cookie() -> Cookie<'static> {
    Cookie::build((SESSION_COOKIE, "")).path("/").build()
}
