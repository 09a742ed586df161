use thiserror::Error;

/// Error type for password hashing and verification.
///
/// A wrong password is not an error; both variants indicate the operation
/// itself could not run.
#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Password verification failed: {0}")]
    VerificationFailed(String),
}
