use sqlx::{Pool, Sqlite};
use uuid::Uuid;
use crate::db::models::Session;
use crate::error::AppError;

pub struct SessionRepository;

impl SessionRepository {
    /// Creates a session; `user_id = None` makes an anonymous one that only carries flash messages.
    pub async fn create(
        pool: &Pool<Sqlite>,
        user_id: Option<&str>,
        expiry_hours: i64,
    ) -> Result<Session, AppError> {
        let id = Uuid::new_v4().to_string();
        let token = Uuid::new_v4().to_string();
        let created_at = chrono::Utc::now().timestamp();
        let expires_at = created_at + (expiry_hours * 3600);

        let session = sqlx::query_as::<_, Session>(
            r#"
INSERT INTO sessions (id, token, user_id, messages, expires_at, created_at)
VALUES (?, ?, ?, '[]', ?, ?)
RETURNING *
            "#,
        )
        .bind(&id)
        .bind(&token)
        .bind(user_id)
        .bind(expires_at)
        .bind(created_at)
        .fetch_one(pool)
        .await?;

        Ok(session)
    }

    pub async fn get_by_token(
        pool: &Pool<Sqlite>,
        token: &str,
    ) -> Result<Option<Session>, AppError> {
        let now = chrono::Utc::now().timestamp();

        let session = sqlx::query_as::<_, Session>(
            "SELECT * FROM sessions WHERE token = ? AND expires_at > ?"
        )
        .bind(token)
        .bind(now)
        .fetch_optional(pool)
        .await?;

        Ok(session)
    }

    /// Appends a flash message to the session's pending list.
    pub async fn push_message(
        pool: &Pool<Sqlite>,
        token: &str,
        message: &str,
    ) -> Result<(), AppError> {
        sqlx::query(
            "UPDATE sessions SET messages = json_insert(messages, '$[#]', ?) WHERE token = ?"
        )
        .bind(message)
        .bind(token)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Returns the pending flash messages and clears them.
    pub async fn take_messages(
        pool: &Pool<Sqlite>,
        token: &str,
    ) -> Result<Vec<String>, AppError> {
        let mut tx = pool.begin().await?;

        let row: Option<(String,)> = sqlx::query_as(
            "SELECT messages FROM sessions WHERE token = ?"
        )
        .bind(token)
        .fetch_optional(&mut *tx)
        .await?;

        sqlx::query("UPDATE sessions SET messages = '[]' WHERE token = ?")
            .bind(token)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        match row {
            Some((raw,)) => serde_json::from_str(&raw)
                .map_err(|e| AppError::Internal(format!("Corrupt session messages: {}", e))),
            None => Ok(Vec::new()),
        }
    }

    pub async fn delete(
        pool: &Pool<Sqlite>,
        token: &str,
    ) -> Result<(), AppError> {
        sqlx::query("DELETE FROM sessions WHERE token = ?")
            .bind(token)
            .execute(pool)
            .await?;

        Ok(())
    }

    pub async fn cleanup_expired(pool: &Pool<Sqlite>) -> Result<u64, AppError> {
        let now = chrono::Utc::now().timestamp();

        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
            .bind(now)
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }
}
