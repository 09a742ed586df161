use async_trait::async_trait;

use crate::account::errors::AccountError;
use crate::account::errors::NotifierError;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::DeliveryReceipt;
use crate::domain::account::models::EmailAddress;
use crate::domain::account::models::SigninGrant;
use crate::domain::account::models::SignupCommand;
use crate::domain::account::models::Username;

/// Repository port for account persistence operations
///
/// The store is the final arbiter for identity uniqueness: `create` must
/// reject a duplicate email or username even when the caller checked first.
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    /// Persists a new account
    ///
    /// # Arguments
    /// * `account` - The account to persist, including its password hash
    ///
    /// # Returns
    /// * `Ok(Account)` - The persisted account
    ///
    /// # Errors
    /// * `AccountError::EmailAlreadyExists` - An account with this email exists
    /// * `AccountError::UsernameAlreadyExists` - An account with this username exists
    /// * `AccountError::DatabaseError` - Database operation failed
    async fn create(&self, account: Account) -> Result<Account, AccountError>;

    /// Finds an account by its unique identifier
    ///
    /// # Returns
    /// * `Ok(Some(Account))` - Account found
    /// * `Ok(None)` - No account with this ID
    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError>;

    /// Finds an account by its email address
    ///
    /// # Returns
    /// * `Ok(Some(Account))` - Account found
    /// * `Ok(None)` - No account with this email
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError>;

    /// Finds an account by its username
    ///
    /// # Returns
    /// * `Ok(Some(Account))` - Account found
    /// * `Ok(None)` - No account with this username
    async fn find_by_username(&self, username: &Username) -> Result<Option<Account>, AccountError>;

    /// Marks an account's email address as confirmed
    ///
    /// Confirming an already confirmed account is a no-op that still
    /// succeeds.
    ///
    /// # Errors
    /// * `AccountError::NotFound` - No account with this ID
    /// * `AccountError::DatabaseError` - Database operation failed
    async fn set_confirmed(&self, id: &AccountId) -> Result<(), AccountError>;
}

/// Port for dispatching account confirmation emails
///
/// Implementations are constructed explicitly at startup and injected into
/// the service; there is no ambient default transport.
#[async_trait]
pub trait ConfirmationNotifier: Send + Sync + 'static {
    /// Sends a confirmation email carrying the given token
    ///
    /// # Arguments
    /// * `recipient` - Email address of the account owner
    /// * `token` - Confirmation token to embed in the link
    ///
    /// # Returns
    /// * `Ok(DeliveryReceipt)` - Transport-level receipt for the dispatch
    ///
    /// # Errors
    /// * `NotifierError::DeliveryFailed` - The transport could not deliver
    /// * `NotifierError::InvalidResponse` - The transport answered with something unusable
    async fn send_confirmation(
        &self,
        recipient: &EmailAddress,
        token: &str,
    ) -> Result<DeliveryReceipt, NotifierError>;
}

/// Service port defining the account business operations
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Registers a new account and dispatches its confirmation email
    ///
    /// The caller receives the created account, but HTTP responses must not
    /// echo it; signup answers with a neutral check-your-email message.
    ///
    /// # Errors
    /// * `AccountError::EmailAlreadyExists` - Email is taken
    /// * `AccountError::UsernameAlreadyExists` - Username is taken
    /// * `AccountError::Notifier` - Account was stored but the email failed
    async fn signup(&self, command: SignupCommand) -> Result<Account, AccountError>;

    /// Confirms an account from an email confirmation token
    ///
    /// # Arguments
    /// * `token` - The token from the confirmation link
    ///
    /// # Errors
    /// * `AccountError::InvalidToken` - Token is malformed, expired, forged, or for the wrong audience
    /// * `AccountError::NotFound` - Token is valid but the account no longer exists
    async fn confirm_email(&self, token: &str) -> Result<(), AccountError>;

    /// Issues an API bearer token for an account whose credentials were already proven
    ///
    /// # Arguments
    /// * `account` - The account returned by a successful credential check
    ///
    /// # Errors
    /// * `AccountError::NotConfirmed` - The email address was never confirmed
    async fn signin(&self, account: Account) -> Result<SigninGrant, AccountError>;
}
