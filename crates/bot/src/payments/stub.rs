use async_trait::async_trait;
use serde::Deserialize;
use subtle::ConstantTimeEq;

use crate::payments::{PaymentError, PaymentLink, PaymentProvider, WebhookEvent};
use crate::token::hmac_sha256_hex;

/// Test/demo payment backend.
///
/// `create_payment` links to the local `/pay/stub` confirmation page;
/// the webhook is a JSON body signed with `X-Signature` =
/// hex(HMAC-SHA256(secret, raw body)). The invoice encodes the stage
/// and participant so the webhook needs no lookup to recover them.
pub struct StubProvider {
    secret: String,
    base_url: String,
}

impl StubProvider {
    pub fn new(secret: &str, base_url: &str) -> Self {
        Self {
            secret: secret.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[derive(Deserialize)]
struct WebhookPayload {
    invoice: String,
    #[serde(default)]
    status: String,
}

#[async_trait]
impl PaymentProvider for StubProvider {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn create_payment(
        &self,
        stage_id: &str,
        user_id: i64,
        _amount: &str,
    ) -> Result<PaymentLink, PaymentError> {
        let invoice = format!("{stage_id}:{user_id}:{}", storage::now_rfc3339());
        let url = format!("{}/pay/stub?invoice={invoice}", self.base_url);
        Ok(PaymentLink { url, invoice })
    }

    async fn handle_webhook(
        &self,
        body: &[u8],
        signature: Option<&str>,
    ) -> Result<WebhookEvent, PaymentError> {
        let expected = hmac_sha256_hex(&self.secret, body);
        let presented = signature.unwrap_or("");
        let matches: bool = expected.as_bytes().ct_eq(presented.as_bytes()).into();
        if presented.is_empty() || !matches {
            return Err(PaymentError::InvalidSignature);
        }

        let payload: WebhookPayload = serde_json::from_slice(body)
            .map_err(|e| PaymentError::MalformedPayload(e.to_string()))?;

        let mut parts = payload.invoice.splitn(3, ':');
        let stage_id = parts.next().unwrap_or("").to_string();
        let user_id: i64 = parts
            .next()
            .unwrap_or("")
            .parse()
            .map_err(|_| PaymentError::MalformedPayload("bad invoice".into()))?;
        if stage_id.is_empty() {
            return Err(PaymentError::MalformedPayload("bad invoice".into()));
        }

        Ok(WebhookEvent {
            stage_id,
            user_id,
            status: payload.status.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signed(provider: &StubProvider, body: &str) -> String {
        hmac_sha256_hex(&provider.secret, body.as_bytes())
    }

    #[tokio::test]
    async fn create_payment_encodes_stage_and_user_in_invoice() {
        let provider = StubProvider::new("s3cret", "https://bot.example/");
        let link = provider.create_payment("st1", 42, "1500").await.unwrap();

        assert!(link.url.starts_with("https://bot.example/pay/stub?invoice=st1:42:"));
        assert!(link.invoice.starts_with("st1:42:"));
    }

    #[tokio::test]
    async fn webhook_round_trips_the_invoice() {
        let provider = StubProvider::new("s3cret", "");
        let body = r#"{"invoice":"st1:42:2026-03-01T10:00:00Z","status":"cancelled"}"#;
        let sig = signed(&provider, body);

        let event = provider
            .handle_webhook(body.as_bytes(), Some(&sig))
            .await
            .unwrap();
        assert_eq!(event.stage_id, "st1");
        assert_eq!(event.user_id, 42);
        assert_eq!(event.status, "cancelled");
    }

    #[tokio::test]
    async fn webhook_rejects_missing_or_wrong_signature() {
        let provider = StubProvider::new("s3cret", "");
        let body = br#"{"invoice":"st1:42:t","status":"paid"}"#;

        let err = provider.handle_webhook(body, None).await.unwrap_err();
        assert!(matches!(err, PaymentError::InvalidSignature));

        let err = provider
            .handle_webhook(body, Some("deadbeef"))
            .await
            .unwrap_err();
        assert!(matches!(err, PaymentError::InvalidSignature));
    }

    #[tokio::test]
    async fn tampered_body_fails_verification() {
        let provider = StubProvider::new("s3cret", "");
        let body = r#"{"invoice":"st1:42:t","status":"paid"}"#;
        let sig = signed(&provider, body);
        let tampered = body.replace("paid", "free");

        let err = provider
            .handle_webhook(tampered.as_bytes(), Some(&sig))
            .await
            .unwrap_err();
        assert!(matches!(err, PaymentError::InvalidSignature));
    }

    #[tokio::test]
    async fn webhook_rejects_malformed_invoice() {
        let provider = StubProvider::new("s3cret", "");
        let body = r#"{"invoice":"no-user-part","status":"paid"}"#;
        let sig = signed(&provider, body);

        let err = provider
            .handle_webhook(body.as_bytes(), Some(&sig))
            .await
            .unwrap_err();
        assert!(matches!(err, PaymentError::MalformedPayload(_)));
    }

    #[tokio::test]
    async fn empty_status_is_passed_through() {
        let provider = StubProvider::new("s3cret", "");
        let body = r#"{"invoice":"st1:42:t"}"#;
        let sig = signed(&provider, body);

        let event = provider
            .handle_webhook(body.as_bytes(), Some(&sig))
            .await
            .unwrap();
        assert_eq!(event.status, "");
    }
}
