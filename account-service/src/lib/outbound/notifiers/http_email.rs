use async_trait::async_trait;
use serde_json::json;

use super::confirmation_link;
use crate::account::errors::NotifierError;
use crate::account::ports::ConfirmationNotifier;
use crate::domain::account::models::DeliveryReceipt;
use crate::domain::account::models::EmailAddress;

const CONFIRMATION_SUBJECT: &str = "Confirm your account";

/// Confirmation notifier backed by a transactional mail HTTP API
///
/// Posts a JSON payload with an `api-key` header and reads the message ID
/// out of the response.
pub struct HttpEmailNotifier {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    from_address: String,
    base_url: String,
}

impl HttpEmailNotifier {
    pub fn new(api_url: String, api_key: String, from_address: String, base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_url,
            api_key,
            from_address,
            base_url,
        }
    }
}

#[async_trait]
impl ConfirmationNotifier for HttpEmailNotifier {
    async fn send_confirmation(
        &self,
        recipient: &EmailAddress,
        token: &str,
    ) -> Result<DeliveryReceipt, NotifierError> {
        let link = confirmation_link(&self.base_url, token);
        let html = format!(
            "<p>Welcome! Please confirm your email address within 24 hours.</p>\
             <p><a href=\"{}\">Confirm your account</a></p>",
            link
        );

        let payload = json!({
            "sender": { "email": self.from_address },
            "to": [ { "email": recipient.as_str() } ],
            "subject": CONFIRMATION_SUBJECT,
            "htmlContent": html,
        });

        let response = self
            .client
            .post(&self.api_url)
            .header("api-key", &self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| NotifierError::DeliveryFailed(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NotifierError::DeliveryFailed(format!(
                "Mail API returned {}",
                status
            )));
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| NotifierError::InvalidResponse(e.to_string()))?;

        let message_id = body
            .get("messageId")
            .and_then(|v| v.as_str())
            .ok_or_else(|| {
                NotifierError::InvalidResponse("Response carries no messageId".to_string())
            })?
            .to_string();

        Ok(DeliveryReceipt {
            message_id,
            preview_url: None,
        })
    }
}
