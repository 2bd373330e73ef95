use std::str::FromStr;

use crate::error::AppError;

/// Which credential verifier the login route uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuthStrategy {
    /// Name + password checked against the user store.
    Local,
}

impl FromStr for AuthStrategy {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(AuthStrategy::Local),
            other => Err(AppError::Config(format!("Unknown AUTH_STRATEGY: {}", other))),
        }
    }
}

/// Argon2id cost settings used when hashing new passwords.
#[derive(Clone, Copy, Debug)]
pub struct PasswordCost {
    pub memory_kib: u32,
    pub iterations: u32,
}

impl PasswordCost {
    /// Argon2 parameters for this cost, single lane.
    pub fn params(&self) -> Result<argon2::Params, AppError> {
        argon2::Params::new(self.memory_kib, self.iterations, 1, None)
            .map_err(|e| AppError::Config(format!("Invalid password cost: {}", e)))
    }
}

#[derive(Clone, Debug)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub database_url: String,
    pub session_expiry_hours: i64,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub request_timeout_secs: u64,
    pub cookie_secure: bool,
    pub auth_strategy: AuthStrategy,
    pub password_cost: PasswordCost,
    /// Oldest feed entries are dropped past this many; 0 keeps everything.
    pub feed_max_entries: usize,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let password_cost = PasswordCost {
            memory_kib: parse_var("PASSWORD_MEMORY_KIB", "19456")?,
            iterations: parse_var("PASSWORD_ITERATIONS", "2")?,
        };
        password_cost.params()?;

        Ok(Config {
            server_host: std::env::var("SERVER_HOST")
                .unwrap_or_else(|_| "127.0.0.1".to_string()),
            server_port: parse_var("SERVER_PORT", "3000")?,
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite://message_board.db?mode=rwc".to_string()),
            session_expiry_hours: parse_var("SESSION_EXPIRY_HOURS", "24")?,
            db_max_connections: parse_var("DB_MAX_CONNECTIONS", "5")?,
            db_min_connections: parse_var("DB_MIN_CONNECTIONS", "1")?,
            request_timeout_secs: parse_var("REQUEST_TIMEOUT_SECS", "30")?,
            cookie_secure: parse_var("COOKIE_SECURE", "false")?,
            auth_strategy: parse_var("AUTH_STRATEGY", "local")?,
            password_cost,
            feed_max_entries: parse_var("FEED_MAX_ENTRIES", "500")?,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_var<T>(name: &str, default: &str) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = std::env::var(name).unwrap_or_else(|_| default.to_string());
    parse_value(name, &raw)
}

fn parse_value<T>(name: &str, raw: &str) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse()
        .map_err(|e| AppError::Config(format!("Invalid {}: {}", name, e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value() {
        let port: u16 = parse_value("SERVER_PORT", "8080").unwrap();
        assert_eq!(port, 8080);

        let secure: bool = parse_value("COOKIE_SECURE", " true ").unwrap();
        assert!(secure);

        let err = parse_value::<u16>("SERVER_PORT", "not-a-port").unwrap_err();
        assert!(matches!(err, AppError::Config(msg) if msg.starts_with("Invalid SERVER_PORT")));
    }

    #[test]
    fn test_password_cost_params() {
        let cost = PasswordCost {
            memory_kib: 19456,
            iterations: 2,
        };
        assert_eq!(cost.params().unwrap().m_cost(), 19456);

        let too_little_memory = PasswordCost {
            memory_kib: 1,
            iterations: 2,
        };
        let err = too_little_memory.params().unwrap_err();
        assert!(matches!(err, AppError::Config(msg) if msg.starts_with("Invalid password cost")));

        let no_iterations = PasswordCost {
            memory_kib: 19456,
            iterations: 0,
        };
        assert!(matches!(no_iterations.params(), Err(AppError::Config(_))));
    }

    #[test]
    fn test_auth_strategy() {
        assert_eq!("local".parse::<AuthStrategy>().unwrap(), AuthStrategy::Local);
        assert_eq!("LOCAL".parse::<AuthStrategy>().unwrap(), AuthStrategy::Local);
        assert!("oauth".parse::<AuthStrategy>().is_err());
    }
}
