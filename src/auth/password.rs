// Password hashing utilities
// Uses bcrypt; callers treat it as an opaque one-way hash + verify

use bcrypt::{hash, verify};

pub use bcrypt::DEFAULT_COST;

/// Hashes a password using bcrypt at the given cost
///
/// # Arguments
/// * `password` - The plaintext password to hash
/// * `cost` - bcrypt work factor (`DEFAULT_COST` in production)
///
/// # Returns
/// * `Ok(String)` - The bcrypt hash
/// * `Err(String)` - If hashing fails
///
/// # Example
/// ```
/// use marketplace_api::auth::password::hash_password;
///
/// let hash = hash_password("my_password", 4).expect("valid hash");
/// assert_ne!(hash, "my_password");
/// ```
pub fn hash_password(password: &str, cost: u32) -> Result<String, String> {
    hash(password, cost).map_err(|e| e.to_string())
}

/// Verifies a password against a bcrypt hash
///
/// # Returns
/// * `Ok(bool)` - True if password matches, false otherwise
/// * `Err(String)` - If the stored hash is malformed
pub fn verify_password(password: &str, hash: &str) -> Result<bool, String> {
    verify(password, hash).map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_COST: u32 = 4;

    #[test]
    fn hash_and_verify_password() {
        let password = "test_password_123";
        let hash = hash_password(password, TEST_COST).expect("valid hash");

        let valid = verify_password(password, &hash).expect("valid verification");
        assert!(valid);
    }

    #[test]
    fn verify_wrong_password() {
        let hash = hash_password("test_password_123", TEST_COST).expect("valid hash");

        let valid = verify_password("wrong_password", &hash).expect("valid verification");
        assert!(!valid);
    }

    #[test]
    fn hash_never_contains_plaintext() {
        let password = "plaintext-secret";
        let hash1 = hash_password(password, TEST_COST).expect("valid hash");
        let hash2 = hash_password(password, TEST_COST).expect("valid hash");

        assert!(!hash1.contains(password));
        // Salted
        assert_ne!(hash1, hash2);
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(verify_password("anything", "not-a-bcrypt-hash").is_err());
    }
}
