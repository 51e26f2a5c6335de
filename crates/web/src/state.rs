use std::sync::Arc;

use bot::Engine;

/// Shared router state.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<Engine>,
    /// Shared secret for webhook signatures and export tokens.
    pub webhook_secret: String,
    /// Public base URL; empty in local development.
    pub base_public_url: String,
}
