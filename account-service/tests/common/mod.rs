use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::JwtHandler;
use uuid::Uuid;

use account_service::account::errors::NotifierError;
use account_service::account::gate::AuthenticationGate;
use account_service::account::gate::PasswordStrategy;
use account_service::account::models::DeliveryReceipt;
use account_service::account::models::EmailAddress;
use account_service::account::ports::ConfirmationNotifier;
use account_service::account::service::AccountService;
use account_service::inbound::http::router::create_router;
use account_service::item::service::ItemService;
use account_service::repositories::InMemoryAccountRepository;
use account_service::repositories::InMemoryItemRepository;

pub const TEST_JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// One recorded confirmation dispatch: the recipient and the token that was
/// embedded in the link.
#[derive(Debug, Clone)]
pub struct SentConfirmation {
    pub email: String,
    pub token: String,
}

/// Notifier double that records every confirmation instead of sending it.
///
/// Tests pull tokens back out of it to drive the confirmation flow without
/// any mail transport.
#[derive(Debug, Clone, Default)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<SentConfirmation>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every confirmation recorded so far, oldest first.
    pub fn sent(&self) -> Vec<SentConfirmation> {
        self.sent.lock().expect("Notifier lock poisoned").clone()
    }

    /// The most recent confirmation token recorded for `email`, if any.
    pub fn last_token_for(&self, email: &str) -> Option<String> {
        self.sent
            .lock()
            .expect("Notifier lock poisoned")
            .iter()
            .rev()
            .find(|confirmation| confirmation.email == email)
            .map(|confirmation| confirmation.token.clone())
    }
}

#[async_trait]
impl ConfirmationNotifier for RecordingNotifier {
    async fn send_confirmation(
        &self,
        recipient: &EmailAddress,
        token: &str,
    ) -> Result<DeliveryReceipt, NotifierError> {
        self.sent
            .lock()
            .expect("Notifier lock poisoned")
            .push(SentConfirmation {
                email: recipient.to_string(),
                token: token.to_string(),
            });

        Ok(DeliveryReceipt {
            message_id: Uuid::new_v4().to_string(),
            preview_url: None,
        })
    }
}

pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub notifier: RecordingNotifier,
    pub jwt_handler: JwtHandler,
}

impl TestApp {
    /// Spawn the application on a random local port, backed by in-memory
    /// repositories and a recording notifier, and return a handle for
    /// driving it over HTTP.
    pub async fn spawn() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();
        let address = format!("http://127.0.0.1:{}", port);

        let account_repository = Arc::new(InMemoryAccountRepository::new());
        let item_repository = Arc::new(InMemoryItemRepository::new());
        let notifier = RecordingNotifier::new();
        let jwt_handler = Arc::new(JwtHandler::new(TEST_JWT_SECRET));

        let account_service = Arc::new(AccountService::new(
            account_repository.clone(),
            Arc::new(notifier.clone()),
            jwt_handler.clone(),
        ));
        let item_service = Arc::new(ItemService::new(item_repository));
        let credentials = PasswordStrategy::new(account_repository);
        let gate = Arc::new(AuthenticationGate::new(credentials, jwt_handler));

        let router = create_router(account_service, item_service, gate);

        tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("Failed to run test server");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            notifier,
            jwt_handler: JwtHandler::new(TEST_JWT_SECRET),
        }
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// GET with a bearer token attached.
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path)
            .header("Authorization", format!("Bearer {}", token))
    }
}
