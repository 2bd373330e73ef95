pub mod models;
pub mod users;
pub mod sessions;
pub mod posts;

pub use models::{User, Session, Post};
pub use users::UserRepository;
pub use sessions::SessionRepository;
pub use posts::{NewPost, PostRepository};

use sqlx::migrate::Migrator;

/// Schema migrations, embedded at compile time.
pub static MIGRATOR: Migrator = sqlx::migrate!("./migrations");
