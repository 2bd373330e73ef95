use std::sync::Arc;
use sqlx::{Pool, Sqlite};
use crate::auth::{verifier_for, CredentialVerifier};
use crate::config::Config;
use crate::feed::Feed;

#[derive(Clone)]
pub struct AppState {
    pub db: Pool<Sqlite>,
    pub config: Arc<Config>,
    pub feed: Arc<Feed>,
    pub verifier: Arc<dyn CredentialVerifier>,
}

impl AppState {
    /// Wires the configured credential verifier to `db`.
    pub fn new(db: Pool<Sqlite>, config: Arc<Config>, feed: Feed) -> Self {
        let verifier = verifier_for(config.auth_strategy, db.clone());
        Self {
            db,
            config,
            feed: Arc::new(feed),
            verifier,
        }
    }
}
