use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use bot::{ChatGateway, Engine, EngineOptions, Keyboard, TransportError};
use storage::InMemoryRowStore;
use storage::models::{Participant, Stage};
use storage::repository::{ParticipantRepository, StageRepository};

pub const SECRET: &str = "test-secret";
pub const ADMIN_ID: i64 = 99;

/// Gateway double that records all outbound traffic.
#[derive(Default)]
pub struct RecordingGateway {
    pub sent: Mutex<Vec<(i64, String)>>,
    pub keyboards: Mutex<Vec<(i64, String, Keyboard)>>,
}

impl RecordingGateway {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub async fn texts_for(&self, user_id: i64) -> Vec<String> {
        self.sent
            .lock()
            .await
            .iter()
            .filter(|(id, _)| *id == user_id)
            .map(|(_, text)| text.clone())
            .collect()
    }

    pub async fn last_text(&self, user_id: i64) -> Option<String> {
        self.texts_for(user_id).await.pop()
    }

    pub async fn last_keyboard(&self, user_id: i64) -> Option<(String, Keyboard)> {
        self.keyboards
            .lock()
            .await
            .iter()
            .filter(|(id, _, _)| *id == user_id)
            .map(|(_, text, kb)| (text.clone(), kb.clone()))
            .next_back()
    }
}

#[async_trait]
impl ChatGateway for RecordingGateway {
    async fn send_text(&self, user_id: i64, text: &str) -> Result<(), TransportError> {
        self.sent.lock().await.push((user_id, text.to_string()));
        Ok(())
    }

    async fn send_keyboard(
        &self,
        user_id: i64,
        text: &str,
        keyboard: Keyboard,
    ) -> Result<(), TransportError> {
        self.keyboards
            .lock()
            .await
            .push((user_id, text.to_string(), keyboard));
        Ok(())
    }
}

pub fn test_engine(store: Arc<InMemoryRowStore>, gateway: Arc<RecordingGateway>) -> Engine {
    let payments = bot::payments::create_provider("stub", SECRET, "").unwrap();
    Engine::new(
        store,
        gateway,
        payments,
        EngineOptions {
            admin_ids: HashSet::from([ADMIN_ID]),
            webhook_secret: SECRET.to_string(),
            base_public_url: String::new(),
            http_addr: ":8080".to_string(),
        },
    )
}

pub async fn seed_stage(store: &InMemoryRowStore, stage_id: &str, open: bool) {
    StageRepository::new(store)
        .create(&Stage {
            stage_id: stage_id.into(),
            title: format!("Stage {stage_id}"),
            date: "2026-03-10".into(),
            time: "18:00".into(),
            place: "Track".into(),
            address: String::new(),
            reg_open: if open { "да".into() } else { "нет".into() },
            price: "1500".into(),
        })
        .await
        .unwrap();
}

pub async fn seed_participant(store: &InMemoryRowStore, user_id: i64, team: &str) {
    ParticipantRepository::new(store)
        .create(&Participant {
            user_id,
            first_name: format!("First{user_id}"),
            last_name: format!("Last{user_id}"),
            nick: format!("nick{user_id}"),
            team_name: team.into(),
            created_at: "2026-03-01T10:00:00Z".into(),
        })
        .await
        .unwrap();
}
