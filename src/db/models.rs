use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: i64,
}

#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: String,
    pub token: String,
    pub user_id: Option<String>,
    /// JSON array of flash messages waiting to be shown
    pub messages: String,
    pub expires_at: i64,
    pub created_at: i64,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.user_id.is_some()
    }
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub msg: String,
    pub added: i64,
    pub author: String,
    pub author_name: String, // Joined from users table
}
