use axum::{
    extract::State,
    response::{Redirect, Response},
    Extension, Form,
};
use serde::Deserialize;

use crate::api::session::CurrentSession;
use crate::api::state::AppState;
use crate::api::views::{render, IndexPage, NewMessagePage};
use crate::db::User;
use crate::error::AppError;
use crate::feed::FeedEntry;

#[derive(Debug, Deserialize)]
pub struct NewMessageForm {
    #[serde(default)]
    pub msg: String,
    #[serde(default)]
    pub username: String,
}

/// GET /
pub async fn index(
    State(state): State<AppState>,
    current: CurrentSession,
) -> Result<Response, AppError> {
    render(&IndexPage {
        title: "Welcome",
        messages: state.feed.snapshot().await,
        user: current.user,
    })
}

/// GET /newMessage (requires auth)
pub async fn new_message_form(
    Extension(user): Extension<User>,
) -> Result<Response, AppError> {
    render(&NewMessagePage {
        title: "New Message",
        username: user.name,
    })
}

/// POST /new
///
/// Only the in-memory feed changes; nothing is written to the post store.
pub async fn create_message(
    State(state): State<AppState>,
    Form(form): Form<NewMessageForm>,
) -> Redirect {
    tracing::debug!("📝 New feed message from {}", form.username);
    state.feed.prepend(FeedEntry::now(form.msg, form.username)).await;
    Redirect::to("/")
}
