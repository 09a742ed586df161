use std::sync::Arc;

use async_trait::async_trait;
use auth::Claims;
use auth::JwtHandler;
use auth::PasswordHasher;
use chrono::Utc;

use crate::account::errors::AccountError;
use crate::account::ports::AccountRepository;
use crate::account::ports::AccountServicePort;
use crate::account::ports::ConfirmationNotifier;
use crate::domain::account::models::Account;
use crate::domain::account::models::AccountId;
use crate::domain::account::models::SigninGrant;
use crate::domain::account::models::SignupCommand;

/// Main service implementing the account business logic
///
/// Generic over the repository to allow dependency injection of
/// different implementations.
pub struct AccountService<AR>
where
    AR: AccountRepository,
{
    repository: Arc<AR>,
    notifier: Arc<dyn ConfirmationNotifier>,
    tokens: Arc<JwtHandler>,
    password_hasher: PasswordHasher,
}

impl<AR> AccountService<AR>
where
    AR: AccountRepository,
{
    pub fn new(
        repository: Arc<AR>,
        notifier: Arc<dyn ConfirmationNotifier>,
        tokens: Arc<JwtHandler>,
    ) -> Self {
        Self {
            repository,
            notifier,
            tokens,
            password_hasher: PasswordHasher::new(),
        }
    }
}

#[async_trait]
impl<AR> AccountServicePort for AccountService<AR>
where
    AR: AccountRepository,
{
    async fn signup(&self, command: SignupCommand) -> Result<Account, AccountError> {
        // Pre-checks give precise conflicts; the store still enforces
        // uniqueness for the race where two signups pass them together
        if self
            .repository
            .find_by_email(command.email.as_str())
            .await?
            .is_some()
        {
            return Err(AccountError::EmailAlreadyExists(
                command.email.as_str().to_string(),
            ));
        }

        if self
            .repository
            .find_by_username(&command.username)
            .await?
            .is_some()
        {
            return Err(AccountError::UsernameAlreadyExists(
                command.username.as_str().to_string(),
            ));
        }

        // Argon2id is deliberately slow, keep it off the async workers
        let hasher = self.password_hasher.clone();
        let password = command.password.into_inner();
        let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AccountError::Unknown(format!("Hashing task failed: {}", e)))??;

        let now = Utc::now();
        let account = Account {
            id: AccountId::new(),
            email: command.email,
            username: command.username,
            birthday: command.birthday,
            password_hash,
            confirmed: false,
            created_at: now,
            updated_at: now,
        };

        let account = self.repository.create(account).await?;

        let claims = Claims::email_confirmation(account.id);
        let token = self.tokens.issue(&claims)?;

        let receipt = self.notifier.send_confirmation(&account.email, &token).await?;
        tracing::info!(
            account_id = %account.id,
            message_id = %receipt.message_id,
            "Confirmation email dispatched"
        );
        if let Some(preview_url) = receipt.preview_url {
            tracing::debug!(%preview_url, "Confirmation email preview available");
        }

        Ok(account)
    }

    async fn confirm_email(&self, token: &str) -> Result<(), AccountError> {
        // Any verification failure collapses to InvalidToken so the response
        // does not reveal whether the token was expired, forged, or an API
        // token smuggled into the confirmation endpoint
        let claims = self
            .tokens
            .verify(token, auth::Audience::EmailConfirmation)
            .map_err(|_| AccountError::InvalidToken)?;

        let account_id =
            AccountId::from_string(&claims.sub).map_err(|_| AccountError::InvalidToken)?;

        let account = self
            .repository
            .find_by_id(&account_id)
            .await?
            .ok_or(AccountError::NotFound(account_id.to_string()))?;

        self.repository.set_confirmed(&account.id).await?;
        tracing::info!(account_id = %account.id, "Account email confirmed");

        Ok(())
    }

    async fn signin(&self, account: Account) -> Result<SigninGrant, AccountError> {
        // Confirmation state is only consulted after the credential proof,
        // which the gate performed before calling in here
        if !account.confirmed {
            return Err(AccountError::NotConfirmed);
        }

        let claims = Claims::api(account.id);
        let token = self.tokens.issue(&claims)?;

        Ok(SigninGrant { token, account })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use auth::Audience;
    use chrono::Utc;
    use mockall::mock;

    use super::*;
    use crate::account::errors::NotifierError;
    use crate::domain::account::models::DeliveryReceipt;
    use crate::domain::account::models::EmailAddress;
    use crate::domain::account::models::Password;
    use crate::domain::account::models::Username;

    const TEST_SECRET: &[u8] = b"unit-test-secret-key-with-enough-bytes";

    mock! {
        pub TestAccountRepository {}

        #[async_trait]
        impl AccountRepository for TestAccountRepository {
            async fn create(&self, account: Account) -> Result<Account, AccountError>;
            async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, AccountError>;
            async fn find_by_email(&self, email: &str) -> Result<Option<Account>, AccountError>;
            async fn find_by_username(
                &self,
                username: &Username,
            ) -> Result<Option<Account>, AccountError>;
            async fn set_confirmed(&self, id: &AccountId) -> Result<(), AccountError>;
        }
    }

    mock! {
        pub TestNotifier {}

        #[async_trait]
        impl ConfirmationNotifier for TestNotifier {
            async fn send_confirmation(
                &self,
                recipient: &EmailAddress,
                token: &str,
            ) -> Result<DeliveryReceipt, NotifierError>;
        }
    }

    fn test_tokens() -> Arc<JwtHandler> {
        Arc::new(JwtHandler::new(TEST_SECRET))
    }

    fn test_account(confirmed: bool) -> Account {
        let now = Utc::now();
        Account {
            id: AccountId::new(),
            email: EmailAddress::new("test@example.com".to_string()).unwrap(),
            username: Username::new("tester".to_string()).unwrap(),
            birthday: None,
            password_hash: "$argon2id$stub".to_string(),
            confirmed,
            created_at: now,
            updated_at: now,
        }
    }

    fn test_receipt() -> DeliveryReceipt {
        DeliveryReceipt {
            message_id: "msg-1".to_string(),
            preview_url: None,
        }
    }

    fn signup_command(email: &str, username: &str) -> SignupCommand {
        SignupCommand::new(
            EmailAddress::new(email.to_string()).unwrap(),
            Username::new(username.to_string()).unwrap(),
            Password::new("secret123".to_string()).unwrap(),
            None,
        )
    }

    #[tokio::test]
    async fn test_signup_success() {
        let mut repository = MockTestAccountRepository::new();
        let mut notifier = MockTestNotifier::new();

        repository
            .expect_find_by_email()
            .withf(|email| email == "new@example.com")
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_create()
            .withf(|account| {
                account.email.as_str() == "new@example.com"
                    && !account.confirmed
                    && account.password_hash.starts_with("$argon2")
            })
            .times(1)
            .returning(|account| Ok(account));
        notifier
            .expect_send_confirmation()
            .withf(|recipient, token| {
                let tokens = JwtHandler::new(TEST_SECRET);
                recipient.as_str() == "new@example.com"
                    && tokens.verify(token, Audience::EmailConfirmation).is_ok()
            })
            .times(1)
            .returning(|_, _| Ok(test_receipt()));

        let service =
            AccountService::new(Arc::new(repository), Arc::new(notifier), test_tokens());

        let account = service
            .signup(signup_command("new@example.com", "newcomer"))
            .await
            .unwrap();

        assert!(!account.confirmed);
        assert!(account.password_hash.starts_with("$argon2"));
        assert_ne!(account.password_hash, "secret123");
    }

    #[tokio::test]
    async fn test_signup_existing_email() {
        let mut repository = MockTestAccountRepository::new();
        let mut notifier = MockTestNotifier::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(Some(test_account(false))));
        repository.expect_find_by_username().times(0);
        repository.expect_create().times(0);
        notifier.expect_send_confirmation().times(0);

        let service =
            AccountService::new(Arc::new(repository), Arc::new(notifier), test_tokens());

        let result = service
            .signup(signup_command("test@example.com", "newcomer"))
            .await;

        assert!(matches!(result, Err(AccountError::EmailAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_signup_existing_username() {
        let mut repository = MockTestAccountRepository::new();
        let mut notifier = MockTestNotifier::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(Some(test_account(false))));
        repository.expect_create().times(0);
        notifier.expect_send_confirmation().times(0);

        let service =
            AccountService::new(Arc::new(repository), Arc::new(notifier), test_tokens());

        let result = service
            .signup(signup_command("new@example.com", "tester"))
            .await;

        assert!(matches!(
            result,
            Err(AccountError::UsernameAlreadyExists(_))
        ));
    }

    #[tokio::test]
    async fn test_signup_race_lost_at_store() {
        // Both pre-checks pass but another signup wins the insert
        let mut repository = MockTestAccountRepository::new();
        let mut notifier = MockTestNotifier::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));
        repository.expect_create().times(1).returning(|account| {
            Err(AccountError::EmailAlreadyExists(
                account.email.as_str().to_string(),
            ))
        });
        notifier.expect_send_confirmation().times(0);

        let service =
            AccountService::new(Arc::new(repository), Arc::new(notifier), test_tokens());

        let result = service
            .signup(signup_command("new@example.com", "newcomer"))
            .await;

        assert!(matches!(result, Err(AccountError::EmailAlreadyExists(_))));
    }

    #[tokio::test]
    async fn test_signup_reports_failed_dispatch() {
        // The account row is already written when the notifier fails; the
        // caller sees the failure but the account exists
        let mut repository = MockTestAccountRepository::new();
        let mut notifier = MockTestNotifier::new();

        repository
            .expect_find_by_email()
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_find_by_username()
            .times(1)
            .returning(|_| Ok(None));
        repository
            .expect_create()
            .times(1)
            .returning(|account| Ok(account));
        notifier
            .expect_send_confirmation()
            .times(1)
            .returning(|_, _| Err(NotifierError::DeliveryFailed("mail API down".to_string())));

        let service =
            AccountService::new(Arc::new(repository), Arc::new(notifier), test_tokens());

        let result = service
            .signup(signup_command("new@example.com", "newcomer"))
            .await;

        assert!(matches!(result, Err(AccountError::Notifier(_))));
    }

    #[tokio::test]
    async fn test_confirm_email_success() {
        let mut repository = MockTestAccountRepository::new();
        let notifier = MockTestNotifier::new();

        let account = test_account(false);
        let account_id = account.id;
        let token = test_tokens()
            .issue(&Claims::email_confirmation(account_id))
            .unwrap();

        repository
            .expect_find_by_id()
            .withf(move |id| *id == account_id)
            .times(1)
            .returning(move |_| Ok(Some(account.clone())));
        repository
            .expect_set_confirmed()
            .withf(move |id| *id == account_id)
            .times(1)
            .returning(|_| Ok(()));

        let service =
            AccountService::new(Arc::new(repository), Arc::new(notifier), test_tokens());

        assert!(service.confirm_email(&token).await.is_ok());
    }

    #[tokio::test]
    async fn test_confirm_email_rejects_api_token() {
        let mut repository = MockTestAccountRepository::new();
        let notifier = MockTestNotifier::new();

        repository.expect_find_by_id().times(0);
        repository.expect_set_confirmed().times(0);

        let token = test_tokens().issue(&Claims::api(AccountId::new())).unwrap();

        let service =
            AccountService::new(Arc::new(repository), Arc::new(notifier), test_tokens());

        let result = service.confirm_email(&token).await;
        assert!(matches!(result, Err(AccountError::InvalidToken)));
    }

    #[tokio::test]
    async fn test_confirm_email_rejects_garbage_token() {
        let mut repository = MockTestAccountRepository::new();
        let notifier = MockTestNotifier::new();

        repository.expect_find_by_id().times(0);
        repository.expect_set_confirmed().times(0);

        let service =
            AccountService::new(Arc::new(repository), Arc::new(notifier), test_tokens());

        let result = service.confirm_email("not.a.token").await;
        assert!(matches!(result, Err(AccountError::InvalidToken)));
    }

    #[tokio::test]
    async fn test_confirm_email_unknown_account() {
        let mut repository = MockTestAccountRepository::new();
        let notifier = MockTestNotifier::new();

        let token = test_tokens()
            .issue(&Claims::email_confirmation(AccountId::new()))
            .unwrap();

        repository
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));
        repository.expect_set_confirmed().times(0);

        let service =
            AccountService::new(Arc::new(repository), Arc::new(notifier), test_tokens());

        let result = service.confirm_email(&token).await;
        assert!(matches!(result, Err(AccountError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_signin_rejects_unconfirmed_account() {
        let repository = MockTestAccountRepository::new();
        let notifier = MockTestNotifier::new();

        let service =
            AccountService::new(Arc::new(repository), Arc::new(notifier), test_tokens());

        let result = service.signin(test_account(false)).await;
        assert!(matches!(result, Err(AccountError::NotConfirmed)));
    }

    #[tokio::test]
    async fn test_signin_issues_api_audience_token() {
        let repository = MockTestAccountRepository::new();
        let notifier = MockTestNotifier::new();
        let tokens = test_tokens();

        let service = AccountService::new(
            Arc::new(repository),
            Arc::new(notifier),
            Arc::clone(&tokens),
        );

        let account = test_account(true);
        let account_id = account.id;

        let grant = service.signin(account).await.unwrap();

        let claims = tokens.verify(&grant.token, Audience::Api).unwrap();
        assert_eq!(claims.sub, account_id.to_string());
        assert!(tokens
            .verify(&grant.token, Audience::EmailConfirmation)
            .is_err());
        assert_eq!(grant.account.id, account_id);
    }
}
