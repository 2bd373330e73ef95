use std::sync::Arc;

use async_trait::async_trait;
use sqlx::{Pool, Sqlite};

use crate::config::AuthStrategy;
use crate::crypto::verify_password_async;
use crate::db::{User, UserRepository};
use crate::error::AppError;

/// Result of checking a set of credentials.
#[derive(Debug, Clone)]
pub enum Verification {
    Verified(User),
    UnknownUser,
    WrongPassword,
}

impl Verification {
    /// Message shown on the login page when verification fails.
    pub fn failure_message(&self) -> Option<&'static str> {
        match self {
            Verification::Verified(_) => None,
            Verification::UnknownUser => Some("Incorrect username"),
            Verification::WrongPassword => Some("Incorrect password"),
        }
    }
}

/// Decides whether a username/password pair identifies a user.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    async fn verify(&self, username: &str, password: &str) -> Result<Verification, AppError>;
}

/// Looks the user up by name and checks the password against the stored hash.
pub struct LocalStrategy {
    db: Pool<Sqlite>,
}

impl LocalStrategy {
    pub fn new(db: Pool<Sqlite>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CredentialVerifier for LocalStrategy {
    async fn verify(&self, username: &str, password: &str) -> Result<Verification, AppError> {
        let Some(user) = UserRepository::get_by_name(&self.db, username.trim()).await? else {
            return Ok(Verification::UnknownUser);
        };

        let matches =
            verify_password_async(password.to_string(), user.password_hash.clone()).await?;

        if matches {
            Ok(Verification::Verified(user))
        } else {
            Ok(Verification::WrongPassword)
        }
    }
}

/// Builds the verifier named by configuration.
pub fn verifier_for(strategy: AuthStrategy, db: Pool<Sqlite>) -> Arc<dyn CredentialVerifier> {
    match strategy {
        AuthStrategy::Local => Arc::new(LocalStrategy::new(db)),
    }
}
