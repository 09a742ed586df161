use async_trait::async_trait;
use uuid::Uuid;

use super::confirmation_link;
use crate::account::errors::NotifierError;
use crate::account::ports::ConfirmationNotifier;
use crate::domain::account::models::DeliveryReceipt;
use crate::domain::account::models::EmailAddress;

/// Local dev notifier that logs the confirmation link instead of sending mail
///
/// The receipt's preview URL carries the link, so a developer can follow the
/// flow end to end from the service log alone.
pub struct LogNotifier {
    base_url: String,
}

impl LogNotifier {
    pub fn new(base_url: String) -> Self {
        Self { base_url }
    }
}

#[async_trait]
impl ConfirmationNotifier for LogNotifier {
    async fn send_confirmation(
        &self,
        recipient: &EmailAddress,
        token: &str,
    ) -> Result<DeliveryReceipt, NotifierError> {
        let link = confirmation_link(&self.base_url, token);
        let message_id = Uuid::new_v4().to_string();

        tracing::info!(
            recipient = %recipient,
            message_id = %message_id,
            confirmation_link = %link,
            "Confirmation email logged instead of sent"
        );

        Ok(DeliveryReceipt {
            message_id,
            preview_url: Some(link),
        })
    }
}
