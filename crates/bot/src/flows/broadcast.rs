//! Admin broadcast: one message to every known participant, sent
//! sequentially with a small delay to stay under transport rate
//! limits. Per-recipient failures never abort the batch.

use std::time::Duration;

use storage::repository::ParticipantRepository;

use crate::engine::Engine;
use crate::error::BotError;
use crate::session::Flow;
use crate::texts;

const SEND_GAP: Duration = Duration::from_millis(35);

pub(crate) async fn on_text(engine: &Engine, user_id: i64, text: &str) -> Result<(), BotError> {
    let message = text.trim();
    if message.is_empty() {
        engine.sessions.put(user_id, Flow::Broadcast).await;
        engine
            .gateway
            .send_text(user_id, texts::BROADCAST_TEXT_EMPTY)
            .await?;
        return Ok(());
    }

    let ids = ParticipantRepository::new(engine.store()).list_ids().await?;
    let full_text = format!("{}{message}", texts::BROADCAST_PREFIX);

    let mut attempted = 0usize;
    for id in ids {
        if let Err(err) = engine.gateway.send_text(id, &full_text).await {
            tracing::warn!(recipient = id, error = %err, "broadcast send failed");
        }
        attempted += 1;
        tokio::time::sleep(SEND_GAP).await;
    }

    engine.sessions.clear(user_id).await;
    engine
        .gateway
        .send_text(
            user_id,
            &format!("✅ Broadcast finished: {attempted} recipients."),
        )
        .await?;
    Ok(())
}
