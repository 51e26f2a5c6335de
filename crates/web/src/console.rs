//! Stdin chat transport for local development. Each line is
//! `<user_id> <message>`; a message starting with `/` is a command,
//! with `!` a button payload, anything else free text. Replies go to
//! the log via the engine's logging gateway.

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use bot::{ChatEvent, EventKind};

pub fn spawn(events: mpsc::Sender<ChatEvent>) {
    tokio::spawn(async move {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => break,
                Err(err) => {
                    tracing::error!(error = %err, "stdin read failed");
                    break;
                }
            };
            let Some(event) = parse_line(&line) else {
                if !line.trim().is_empty() {
                    tracing::warn!(line, "unparsable console line, expected '<user_id> <message>'");
                }
                continue;
            };
            if events.send(event).await.is_err() {
                break;
            }
        }
        tracing::info!("console transport stopped");
    });
}

fn parse_line(line: &str) -> Option<ChatEvent> {
    let (id, rest) = line.trim().split_once(' ')?;
    let user_id = id.parse::<i64>().ok()?;
    let rest = rest.trim();
    if rest.is_empty() {
        return None;
    }
    let kind = if let Some(command) = rest.strip_prefix('/') {
        EventKind::Command(command.to_string())
    } else if let Some(payload) = rest.strip_prefix('!') {
        EventKind::Button(payload.to_string())
    } else {
        EventKind::Text(rest.to_string())
    };
    Some(ChatEvent { user_id, kind })
}
