#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("Bcrypt operation failed: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),
}

/// Verify a password against a bcrypt hash
pub fn verify_password(plaintext: &str, hash: &str) -> Result<bool, PasswordError> {
    bcrypt::verify(plaintext, hash).map_err(PasswordError::from)
}

/// Hash a password with bcrypt at the given cost
pub fn hash_password(plaintext: &str, cost: u32) -> Result<String, PasswordError> {
    bcrypt::hash(plaintext, cost).map_err(PasswordError::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verify_password_correct() {
        let hash = hash_password("test_password", bcrypt::DEFAULT_COST).unwrap();
        assert!(verify_password("test_password", &hash).unwrap());
    }

    #[test]
    fn test_verify_password_incorrect() {
        let hash = hash_password("test_password", 4).unwrap();
        assert!(!verify_password("wrong_password", &hash).unwrap());
    }

    #[test]
    fn test_verify_password_invalid_hash() {
        assert!(verify_password("test_password", "invalid_hash").is_err());
    }

    #[test]
    fn test_hash_password_rejects_bad_cost() {
        assert!(hash_password("test_password", 99).is_err());
    }
}
