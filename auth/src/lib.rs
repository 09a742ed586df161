//! Authentication utilities library
//!
//! Provides reusable authentication infrastructure for services:
//! - Password hashing (Argon2id)
//! - Audience-scoped bearer token issuance and verification
//!
//! Each service defines its own authentication traits and adapts these implementations.
//! This avoids coupling services through shared domain logic while reducing code duplication.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! let is_valid = hasher.verify("my_password", &hash).unwrap();
//! assert!(is_valid);
//! ```
//!
//! ## Bearer Tokens
//! ```
//! use auth::{Audience, Claims, JwtHandler};
//!
//! let handler = JwtHandler::new(b"secret_key_at_least_32_bytes_long!");
//! let token = handler.issue(&Claims::api("account123")).unwrap();
//!
//! let decoded = handler.verify(&token, Audience::Api).unwrap();
//! assert_eq!(decoded.sub, "account123");
//!
//! // The same token never passes a check for the other audience
//! assert!(handler.verify(&token, Audience::EmailConfirmation).is_err());
//! ```

pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use jwt::Audience;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
