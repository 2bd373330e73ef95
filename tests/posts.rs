mod common;

use common::test_pool;
use message_board::db::{NewPost, PostRepository, UserRepository};
use message_board::error::AppError;

fn new_post(title: &str, msg: &str, author: &str) -> NewPost {
    NewPost {
        title: title.to_string(),
        msg: msg.to_string(),
        author: author.to_string(),
    }
}

#[tokio::test]
async fn test_create_post() {
    let pool = test_pool().await;
    let user = UserRepository::create(&pool, "Alice1", "a@example.com", "$argon2id$stub")
        .await
        .unwrap();

    let post = PostRepository::create(&pool, new_post("Hello", "First post!", &user.id))
        .await
        .unwrap();

    assert_eq!(post.title, "Hello");
    assert_eq!(post.msg, "First post!");
    assert_eq!(post.author, user.id);
    assert_eq!(post.author_name, "Alice1");
    assert!(post.added > 0);

    let fetched = PostRepository::get_by_id(&pool, &post.id).await.unwrap().unwrap();
    assert_eq!(fetched.id, post.id);
}

#[tokio::test]
async fn test_post_requires_existing_author() {
    let pool = test_pool().await;

    let err = PostRepository::create(&pool, new_post("Hello", "Orphaned", "no-such-user"))
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Database(_)));
    assert_eq!(PostRepository::count(&pool).await.unwrap(), 0);
}

#[tokio::test]
async fn test_post_field_lengths() {
    let pool = test_pool().await;
    let user = UserRepository::create(&pool, "Alice1", "a@example.com", "$argon2id$stub")
        .await
        .unwrap();

    for (title, msg) in [
        ("Hi", "long enough"),
        ("This title is far too long", "long enough"),
        ("Hello", "no"),
    ] {
        let err = PostRepository::create(&pool, new_post(title, msg, &user.id))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)), "{} / {}", title, msg);
    }

    // Boundaries are inclusive
    PostRepository::create(&pool, new_post("abc", "xyz", &user.id)).await.unwrap();
    PostRepository::create(&pool, new_post("fifteen chars!!", "xyz", &user.id)).await.unwrap();

    assert_eq!(PostRepository::count(&pool).await.unwrap(), 2);
}

#[tokio::test]
async fn test_recent_posts_newest_first() {
    let pool = test_pool().await;
    let user = UserRepository::create(&pool, "Alice1", "a@example.com", "$argon2id$stub")
        .await
        .unwrap();

    for title in ["first", "second", "third"] {
        PostRepository::create(&pool, new_post(title, "body", &user.id)).await.unwrap();
    }

    let recent = PostRepository::get_recent(&pool, 2).await.unwrap();
    let titles: Vec<&str> = recent.iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, vec!["third", "second"]);
}
