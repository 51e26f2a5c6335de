mod stub;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

pub use stub::StubProvider;

#[derive(Debug, Error)]
pub enum PaymentError {
    #[error("Invalid webhook signature")]
    InvalidSignature,

    #[error("Malformed webhook payload: {0}")]
    MalformedPayload(String),

    #[error("Payment provider error: {0}")]
    Provider(String),
}

/// Payment link handed to the user plus the provider's opaque invoice
/// reference correlating the attempt to a (stage, participant) pair.
#[derive(Debug, Clone)]
pub struct PaymentLink {
    pub url: String,
    pub invoice: String,
}

/// Verified and decoded payment callback.
#[derive(Debug, Clone)]
pub struct WebhookEvent {
    pub stage_id: String,
    pub user_id: i64,
    /// Provider status vocabulary, trimmed but otherwise raw; mapping
    /// to the stored pay-status vocabulary happens in the workflow.
    pub status: String,
}

/// Payment backend behind a narrow interface. Invoice structure is
/// provider-defined; the core never parses it, it only round-trips it
/// through the provider's own webhook handler.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn create_payment(
        &self,
        stage_id: &str,
        user_id: i64,
        amount: &str,
    ) -> Result<PaymentLink, PaymentError>;

    /// Verify the callback signature and decode the payload back into
    /// the (stage, participant, status) triple.
    async fn handle_webhook(
        &self,
        body: &[u8],
        signature: Option<&str>,
    ) -> Result<WebhookEvent, PaymentError>;
}

/// Provider selection by configured name.
pub fn create_provider(
    name: &str,
    secret: &str,
    base_url: &str,
) -> Result<Arc<dyn PaymentProvider>, PaymentError> {
    match name {
        "stub" => Ok(Arc::new(StubProvider::new(secret, base_url))),
        other => Err(PaymentError::Provider(format!(
            "unknown payment provider: {other}"
        ))),
    }
}
