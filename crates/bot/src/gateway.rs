use async_trait::async_trait;
use thiserror::Error;

/// An inbound chat event from the transport.
#[derive(Debug, Clone)]
pub struct ChatEvent {
    pub user_id: i64,
    pub kind: EventKind,
}

#[derive(Debug, Clone)]
pub enum EventKind {
    /// Slash command without the leading `/`, e.g. `start`.
    Command(String),
    /// Free-text message.
    Text(String),
    /// Inline-button press carrying its opaque payload.
    Button(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub payload: String,
}

impl Button {
    pub fn new(label: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            payload: payload.into(),
        }
    }
}

/// Inline keyboard as rows of buttons.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keyboard {
    pub rows: Vec<Vec<Button>>,
}

impl Keyboard {
    pub fn new(rows: Vec<Vec<Button>>) -> Self {
        Self { rows }
    }

    pub fn push_row(&mut self, row: Vec<Button>) {
        self.rows.push(row);
    }
}

#[derive(Debug, Error)]
#[error("Transport error: {0}")]
pub struct TransportError(pub String);

/// Outbound side of the chat transport. The real messenger client
/// lives outside this service; implementations here are a logging
/// stand-in and test doubles.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    async fn send_text(&self, user_id: i64, text: &str) -> Result<(), TransportError>;

    async fn send_keyboard(
        &self,
        user_id: i64,
        text: &str,
        keyboard: Keyboard,
    ) -> Result<(), TransportError>;
}

/// Gateway that writes outbound traffic to the log. Used when no real
/// chat transport is wired up (local runs, demos).
pub struct LoggingGateway;

#[async_trait]
impl ChatGateway for LoggingGateway {
    async fn send_text(&self, user_id: i64, text: &str) -> Result<(), TransportError> {
        tracing::info!(user_id, %text, "outbound message");
        Ok(())
    }

    async fn send_keyboard(
        &self,
        user_id: i64,
        text: &str,
        keyboard: Keyboard,
    ) -> Result<(), TransportError> {
        let buttons: Vec<String> = keyboard
            .rows
            .iter()
            .flatten()
            .map(|b| format!("[{} -> {}]", b.label, b.payload))
            .collect();
        tracing::info!(user_id, %text, buttons = buttons.join(" "), "outbound keyboard");
        Ok(())
    }
}
