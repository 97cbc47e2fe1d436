/**
 * Password Hasher
 *
 * This module wraps bcrypt behind a small hasher type so the cost factor is
 * configured in one place and no other module touches digests directly.
 *
 * # Security
 *
 * - bcrypt embeds a random salt, so hashing the same password twice yields
 *   different digests
 * - verification is constant-time with respect to the digest contents
 * - a malformed digest verifies as `false` instead of erroring, keeping the
 *   failure path identical to a wrong password
 * - plaintext passwords are never logged or stored
 */

use crate::error::AuthError;

/// bcrypt-backed password hasher
///
/// The cost factor is set once at construction. Production uses
/// `bcrypt::DEFAULT_COST`; the test suites use the bcrypt minimum (4) to
/// keep hashing out of the measured time.
///
/// # Example
///
/// ```rust
/// use keyward::auth::password::PasswordHasher;
///
/// let hasher = PasswordHasher::new(4);
/// let digest = hasher.hash("correct horse battery").unwrap();
/// assert!(hasher.verify("correct horse battery", &digest));
/// assert!(!hasher.verify("wrong password", &digest));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    /// Create a hasher with an explicit bcrypt cost factor
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Hash a plaintext password
    ///
    /// # Returns
    ///
    /// A bcrypt digest string embedding salt and cost.
    ///
    /// # Errors
    ///
    /// `AuthError::Storage` if bcrypt rejects the input; with a valid cost
    /// and non-NUL input this does not happen in practice.
    pub fn hash(&self, plaintext: &str) -> Result<String, AuthError> {
        bcrypt::hash(plaintext, self.cost).map_err(|e| {
            tracing::error!("password hashing failed: {:?}", e);
            AuthError::storage("password hashing failed")
        })
    }

    /// Verify a plaintext password against a stored digest
    ///
    /// A digest that bcrypt cannot parse counts as a failed verification;
    /// the caller sees the same `false` as for a wrong password.
    pub fn verify(&self, plaintext: &str, digest: &str) -> bool {
        match bcrypt::verify(plaintext, digest) {
            Ok(matched) => matched,
            Err(e) => {
                tracing::debug!("password verification against malformed digest: {:?}", e);
                false
            }
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}
