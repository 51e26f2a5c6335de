use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::handlers::{stub_pay_page, stub_webhook};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/pay/stub", get(stub_pay_page))
        .route("/webhooks/stub", post(stub_webhook))
}
