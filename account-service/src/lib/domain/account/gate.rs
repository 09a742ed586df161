use std::sync::Arc;

use auth::Audience;
use auth::JwtHandler;
use auth::PasswordHasher;

use crate::account::errors::AccountError;
use crate::account::ports::AccountRepository;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;

/// Credential checking strategy for signin
///
/// Owns the account lookup and the password comparison. An unknown email and
/// a wrong password produce the same `InvalidCredentials`, so callers cannot
/// probe which identities exist.
pub struct PasswordStrategy {
    repository: Arc<dyn AccountRepository>,
    password_hasher: PasswordHasher,
}

impl PasswordStrategy {
    pub fn new(repository: Arc<dyn AccountRepository>) -> Self {
        Self {
            repository,
            password_hasher: PasswordHasher::new(),
        }
    }

    /// Proves ownership of an account with an email and password pair
    ///
    /// # Errors
    /// * `AccountError::InvalidCredentials` - Unknown email or wrong password
    pub async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Account, AccountError> {
        let account = self
            .repository
            .find_by_email(email)
            .await?
            .ok_or(AccountError::InvalidCredentials)?;

        // The comparison recomputes Argon2id, keep it off the async workers
        let hasher = self.password_hasher.clone();
        let password = password.to_string();
        let password_hash = account.password_hash.clone();
        let matches = tokio::task::spawn_blocking(move || hasher.verify(&password, &password_hash))
            .await
            .map_err(|e| AccountError::Unknown(format!("Verification task failed: {}", e)))??;

        if !matches {
            return Err(AccountError::InvalidCredentials);
        }

        Ok(account)
    }
}

/// Request-boundary guard for bearer tokens and signin credentials
///
/// Built once at startup with an explicit strategy and token handler, then
/// shared across requests. Protected routes call `authorize`; the signin
/// handler calls `verify_credentials` before the service issues a token.
pub struct AuthenticationGate {
    credentials: PasswordStrategy,
    tokens: Arc<JwtHandler>,
}

impl AuthenticationGate {
    pub fn new(credentials: PasswordStrategy, tokens: Arc<JwtHandler>) -> Self {
        Self {
            credentials,
            tokens,
        }
    }

    /// Proves ownership of an account with an email and password pair
    pub async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Account, AccountError> {
        self.credentials.verify_credentials(email, password).await
    }

    /// Authorizes a bearer token for API access and resolves its account ID
    ///
    /// Tokens minted for email confirmation never pass this check.
    ///
    /// # Errors
    /// * `AccountError::InvalidToken` - Malformed, forged, expired, or wrong-audience token
    pub fn authorize(&self, token: &str) -> Result<AccountId, AccountError> {
        let claims = self
            .tokens
            .verify(token, Audience::Api)
            .map_err(|_| AccountError::InvalidToken)?;

        AccountId::from_string(&claims.sub).map_err(|_| AccountError::InvalidToken)
    }
}
