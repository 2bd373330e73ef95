#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, Response, StatusCode},
    Router,
};
use sqlx::{sqlite::SqlitePoolOptions, Pool, Sqlite};
use tower::ServiceExt;

use message_board::{
    api::{create_router, AppState},
    config::{AuthStrategy, Config, PasswordCost},
    db::MIGRATOR,
    feed::{Feed, FeedEntry},
};

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
}

pub fn test_config() -> Config {
    Config {
        server_host: "127.0.0.1".to_string(),
        server_port: 0,
        database_url: "sqlite::memory:".to_string(),
        session_expiry_hours: 1,
        db_max_connections: 1,
        db_min_connections: 1,
        request_timeout_secs: 30,
        cookie_secure: false,
        auth_strategy: AuthStrategy::Local,
        password_cost: PasswordCost {
            memory_kib: 1024,
            iterations: 1,
        },
        feed_max_entries: 500,
    }
}

/// A single-connection in-memory database, kept open for the whole test.
pub async fn test_pool() -> Pool<Sqlite> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    MIGRATOR.run(&pool).await.unwrap();
    pool
}

impl TestApp {
    pub async fn new() -> Self {
        let feed = Feed::new(vec![
            FeedEntry::now("Hey how you doing", "hunter2"),
            FeedEntry::now("Whats up?", "BobSmith"),
        ]);
        let state = AppState::new(test_pool().await, Arc::new(test_config()), feed);
        let router = create_router(state.clone());
        Self { router, state }
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder().method("GET").uri(uri);
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::empty()).unwrap()).await
    }

    pub async fn post_form(&self, uri: &str, body: &str, cookie: Option<&str>) -> Response<Body> {
        let mut builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap()).await
    }

    /// Signs up a user and returns the session cookie it was given.
    pub async fn sign_up(&self, name: &str, password: &str) -> String {
        let body = format!(
            "name={}&email={}%40example.com&password={}&passwordConfirm={}",
            name, name, password, password
        );
        let response = self.post_form("/signUp", &body, None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        session_cookie(&response).expect("sign-up should set a session cookie")
    }
}

/// The `sid=<token>` pair from a response's Set-Cookie headers, if any.
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter(|value| value.starts_with("sid="))
        .map(|value| value.split(';').next().unwrap_or_default().to_string())
        .find(|pair| pair.len() > "sid=".len())
}

pub fn location(response: &Response<Body>) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|value| value.to_str().ok())
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}
