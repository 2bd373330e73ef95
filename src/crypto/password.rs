use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Version};
use rand::Rng;

use crate::config::PasswordCost;
use crate::error::AppError;

/// Generate a cryptographically secure random salt
pub fn generate_salt() -> [u8; 16] {
    rand::thread_rng().gen()
}

/// Hash a password with Argon2id, returning the PHC string that is stored.
pub fn hash_password(password: &str, cost: PasswordCost) -> Result<String, AppError> {
    let params = cost.params()?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let salt = SaltString::encode_b64(&generate_salt())
        .map_err(|e| AppError::Crypto(format!("Salt encoding failed: {}", e)))?;

    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Crypto(format!("Password hashing failed: {}", e)))?;

    Ok(hash.to_string())
}

/// Verify a password against a stored PHC string.
///
/// The cost parameters are read back from the stored hash, so hashes created
/// under older settings keep verifying.
pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, AppError> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| AppError::Crypto(format!("Invalid stored hash: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

/// Runs [`hash_password`] on the blocking pool.
pub async fn hash_password_async(password: String, cost: PasswordCost) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || hash_password(&password, cost)).await?
}

/// Runs [`verify_password`] on the blocking pool.
pub async fn verify_password_async(password: String, stored_hash: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash)).await?
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_COST: PasswordCost = PasswordCost {
        memory_kib: 1024,
        iterations: 1,
    };

    #[test]
    fn test_hash_verify() {
        let password = "test_password_123";

        let hash = hash_password(password, TEST_COST).unwrap();
        assert_ne!(hash, password);
        assert!(hash.starts_with("$argon2id$"));
        assert!(verify_password(password, &hash).unwrap());
        assert!(!verify_password("wrong_password", &hash).unwrap());
        assert!(!verify_password("", &hash).unwrap());
    }

    #[test]
    fn test_salts_differ() {
        let first = hash_password("secret1", TEST_COST).unwrap();
        let second = hash_password("secret1", TEST_COST).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn test_garbage_hash_is_an_error() {
        let err = verify_password("secret1", "not-a-phc-string").unwrap_err();
        assert!(matches!(err, AppError::Crypto(_)));
    }

    #[tokio::test]
    async fn test_async_round_trip() {
        let hash = hash_password_async("secret1".to_string(), TEST_COST)
            .await
            .unwrap();
        assert!(verify_password_async("secret1".to_string(), hash.clone())
            .await
            .unwrap());
        assert!(!verify_password_async("secret2".to_string(), hash)
            .await
            .unwrap());
    }
}
