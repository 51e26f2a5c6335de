use std::collections::HashSet;
use std::sync::Arc;

use tokio::sync::mpsc;

use storage::RowStore;

use crate::gateway::{ChatEvent, ChatGateway};
use crate::locks::StageLocks;
use crate::payments::PaymentProvider;
use crate::session::SessionStore;

/// Configuration slice the engine needs beyond its collaborators.
#[derive(Debug, Clone)]
pub struct EngineOptions {
    pub admin_ids: HashSet<i64>,
    /// Shared secret for webhook signatures and export tokens.
    pub webhook_secret: String,
    pub base_public_url: String,
    pub http_addr: String,
}

/// The conversation/workflow engine: routes inbound chat events
/// through per-user flows and owns the registration and payment
/// business logic. Collaborators sit behind narrow traits.
pub struct Engine {
    pub(crate) store: Arc<dyn RowStore>,
    pub(crate) gateway: Arc<dyn ChatGateway>,
    pub(crate) payments: Arc<dyn PaymentProvider>,
    pub(crate) sessions: SessionStore,
    pub(crate) stage_locks: StageLocks,
    pub(crate) options: EngineOptions,
}

impl Engine {
    pub fn new(
        store: Arc<dyn RowStore>,
        gateway: Arc<dyn ChatGateway>,
        payments: Arc<dyn PaymentProvider>,
        options: EngineOptions,
    ) -> Self {
        Self {
            store,
            gateway,
            payments,
            sessions: SessionStore::new(),
            stage_locks: StageLocks::new(),
            options,
        }
    }

    pub fn store(&self) -> &dyn RowStore {
        self.store.as_ref()
    }

    pub(crate) fn is_admin(&self, user_id: i64) -> bool {
        self.options.admin_ids.contains(&user_id)
    }

    /// Drain the chat-event channel until the transport closes it.
    /// Events are handled one at a time: all chat-originated mutations
    /// are serialized through this loop.
    pub async fn run(&self, mut events: mpsc::Receiver<ChatEvent>) {
        while let Some(event) = events.recv().await {
            self.handle_event(event).await;
        }
        tracing::info!("chat event channel closed, engine stopping");
    }
}
