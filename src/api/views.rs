use askama::Template;
use axum::response::{Html, IntoResponse, Response};

use crate::auth::FieldError;
use crate::db::User;
use crate::error::AppError;
use crate::feed::FeedEntry;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub title: &'static str,
    pub messages: Vec<FeedEntry>,
    pub user: Option<User>,
}

#[derive(Template)]
#[template(path = "new_message.html")]
pub struct NewMessagePage {
    pub title: &'static str,
    pub username: String,
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginPage {
    pub title: &'static str,
    pub err: Vec<String>,
}

/// What the visitor typed into the sign-up form, echoed back on failure.
#[derive(Debug, Clone)]
pub struct SignupDraft {
    pub name: String,
    pub email: String,
}

#[derive(Template)]
#[template(path = "sign_up.html")]
pub struct SignUpPage {
    pub title: &'static str,
    pub user: Option<SignupDraft>,
    pub err: Vec<FieldError>,
}

/// Renders `template` into an HTML response.
pub fn render<T: Template>(template: &T) -> Result<Response, AppError> {
    Ok(Html(template.render()?).into_response())
}
