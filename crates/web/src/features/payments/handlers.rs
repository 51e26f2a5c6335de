use axum::{
    Json,
    body::Bytes,
    extract::{Query, State},
    http::HeaderMap,
    response::Html,
};
use serde::Deserialize;
use serde_json::{Value, json};

use bot::token::hmac_sha256_hex;

use crate::error::{WebError, WebResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct StubPageQuery {
    invoice: Option<String>,
}

/// Minimal confirmation page for the stub provider. Only reachable in
/// test and local setups; a real provider hosts its own checkout.
pub async fn stub_pay_page(Query(query): Query<StubPageQuery>) -> WebResult<Html<String>> {
    let invoice = query
        .invoice
        .filter(|v| !v.is_empty())
        .ok_or_else(|| WebError::BadRequest("missing invoice".into()))?;

    // JSON-encoding the invoice keeps it safe to embed in the script;
    // the display copy needs HTML escaping instead.
    let invoice_js = serde_json::to_string(&invoice)
        .map_err(|e| WebError::Internal(e.to_string()))?;
    let invoice_html = html_escape(&invoice);

    let page = format!(
        r#"<!doctype html>
<html>
<head><meta charset="utf-8"><title>Stub payment</title></head>
<body>
  <h1>Stub payment</h1>
  <p>Invoice: <code>{invoice_html}</code></p>
  <button onclick="send('paid')">Pay</button>
  <button onclick="send('cancelled')">Cancel</button>
  <p id="out"></p>
  <script>
    async function send(status) {{
      const resp = await fetch('/webhooks/stub', {{
        method: 'POST',
        headers: {{'Content-Type': 'application/json'}},
        body: JSON.stringify({{invoice: {invoice_js}, status}}),
      }});
      document.getElementById('out').textContent = await resp.text();
    }}
  </script>
</body>
</html>
"#
    );
    Ok(Html(page))
}

/// Payment callback endpoint. The signature check happens inside the
/// provider over the raw body, so the body is taken unparsed.
pub async fn stub_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> WebResult<Json<Value>> {
    let mut signature = headers
        .get("X-Signature")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    // Local-only affordance: the stub page cannot sign its own
    // request, so an unsigned body is signed here before verification
    // as long as the service is not published anywhere.
    if signature.is_none() && is_local(&state.base_public_url) {
        signature = Some(hmac_sha256_hex(&state.webhook_secret, &body));
    }

    let receipt = state
        .engine
        .reconcile_webhook(&body, signature.as_deref())
        .await?;

    Ok(Json(json!({
        "ok": true,
        "stage_id": receipt.stage_id,
        "tg_id": receipt.user_id,
        "pay_status": receipt.pay_status,
        "ts": storage::now_rfc3339(),
    })))
}

fn is_local(base_public_url: &str) -> bool {
    base_public_url.is_empty() || base_public_url.contains("localhost")
}

fn html_escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn self_signing_only_applies_locally() {
        assert!(is_local(""));
        assert!(is_local("http://localhost:8080"));
        assert!(!is_local("https://karting.example.com"));
    }

    #[test]
    fn displayed_invoice_is_html_escaped() {
        assert_eq!(
            html_escape(r#"<script>alert("1")</script>&'"#),
            "&lt;script&gt;alert(&quot;1&quot;)&lt;/script&gt;&amp;&#39;"
        );
        assert_eq!(html_escape("st1:7:t"), "st1:7:t");
    }
}
