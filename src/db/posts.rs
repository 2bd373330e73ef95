use serde::Deserialize;
use sqlx::{Pool, Sqlite};
use uuid::Uuid;
use validator::Validate;
use crate::db::models::Post;
use crate::error::AppError;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewPost {
    #[validate(length(min = 3, max = 15, message = "Title must be 3-15 characters"))]
    pub title: String,
    #[validate(length(min = 3, message = "Message must be at least 3 characters"))]
    pub msg: String,
    pub author: String,
}

pub struct PostRepository;

impl PostRepository {
    /// Persists a post stamped with the current time. The author must be an existing user.
    pub async fn create(
        pool: &Pool<Sqlite>,
        post: NewPost,
    ) -> Result<Post, AppError> {
        post.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let id = Uuid::new_v4().to_string();
        let added = chrono::Utc::now().timestamp();

        sqlx::query(
            r#"
INSERT INTO posts (id, title, msg, added, author)
VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&post.title)
        .bind(&post.msg)
        .bind(added)
        .bind(&post.author)
        .execute(pool)
        .await?;

        // Fetch with author name joined
        let post = Self::get_by_id(pool, &id).await?
            .ok_or_else(|| AppError::Internal("Failed to fetch created post".to_string()))?;

        Ok(post)
    }

    pub async fn get_by_id(
        pool: &Pool<Sqlite>,
        id: &str,
    ) -> Result<Option<Post>, AppError> {
        let post = sqlx::query_as::<_, Post>(
            r#"
SELECT p.id, p.title, p.msg, p.added, p.author, u.name AS author_name
FROM posts p
JOIN users u ON p.author = u.id
WHERE p.id = ?
            "#
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(post)
    }

    pub async fn get_recent(
        pool: &Pool<Sqlite>,
        limit: i64,
    ) -> Result<Vec<Post>, AppError> {
        let posts = sqlx::query_as::<_, Post>(
            r#"
SELECT p.id, p.title, p.msg, p.added, p.author, u.name AS author_name
FROM posts p
JOIN users u ON p.author = u.id
ORDER BY p.added DESC, p.rowid DESC
LIMIT ?
            "#
        )
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(posts)
    }

    pub async fn count(pool: &Pool<Sqlite>) -> Result<i64, AppError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM posts")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}
