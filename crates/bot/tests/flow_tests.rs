mod common;

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use bot::payments::create_provider;
use bot::{
    ChatEvent, ChatGateway, Engine, EngineOptions, EventKind, Keyboard, TransportError,
};
use storage::repository::{ParticipantRepository, StageRepository, TeamRepository};
use storage::{InMemoryRowStore, RowStore, Table};

use common::{ADMIN_ID, RecordingGateway, seed_participant, test_engine};

async fn command(engine: &Engine, user_id: i64, cmd: &str) {
    engine
        .handle_event(ChatEvent {
            user_id,
            kind: EventKind::Command(cmd.to_string()),
        })
        .await;
}

async fn text(engine: &Engine, user_id: i64, msg: &str) {
    engine
        .handle_event(ChatEvent {
            user_id,
            kind: EventKind::Text(msg.to_string()),
        })
        .await;
}

async fn button(engine: &Engine, user_id: i64, payload: &str) {
    engine
        .handle_event(ChatEvent {
            user_id,
            kind: EventKind::Button(payload.to_string()),
        })
        .await;
}

#[tokio::test]
async fn registration_conversation_persists_the_participant() {
    let store = Arc::new(InMemoryRowStore::new());
    let gateway = RecordingGateway::new();
    let engine = test_engine(store.clone(), gateway.clone());
    TeamRepository::new(store.as_ref())
        .create("Foxes")
        .await
        .unwrap();

    command(&engine, 5, "start").await;
    assert!(
        gateway
            .last_text(5)
            .await
            .unwrap()
            .contains("first name")
    );

    text(&engine, 5, "Alice").await;
    assert_eq!(gateway.last_text(5).await.unwrap(), "Your last name:");

    text(&engine, 5, "Smith").await;
    text(&engine, 5, "ace").await;

    // The nick answer ends in a team picker with one row per team.
    let (prompt, keyboard) = gateway.last_keyboard(5).await.unwrap();
    assert!(prompt.contains("team"));
    assert_eq!(keyboard.rows[0][0].payload, "u:reg_team:Foxes");

    button(&engine, 5, "u:reg_team:Foxes").await;
    assert!(
        gateway
            .last_text(5)
            .await
            .unwrap()
            .contains("Registration complete")
    );

    let (participant, _) = ParticipantRepository::new(store.as_ref())
        .find(5)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(participant.first_name, "Alice");
    assert_eq!(participant.last_name, "Smith");
    assert_eq!(participant.nick, "ace");
    assert_eq!(participant.team_name, "Foxes");
}

#[tokio::test]
async fn create_team_detour_finishes_registration_with_the_new_team() {
    let store = Arc::new(InMemoryRowStore::new());
    let gateway = RecordingGateway::new();
    let engine = test_engine(store.clone(), gateway.clone());

    command(&engine, 5, "start").await;
    text(&engine, 5, "Bob").await;
    text(&engine, 5, "Jones").await;
    text(&engine, 5, "bj").await;

    // With no teams yet the picker offers only the create-new button.
    let (_, keyboard) = gateway.last_keyboard(5).await.unwrap();
    let create_payload = keyboard.rows.last().unwrap()[0].payload.clone();

    button(&engine, 5, &create_payload).await;
    assert_eq!(gateway.last_text(5).await.unwrap(), "Name of the new team:");

    text(&engine, 5, "Night Owls").await;
    assert!(
        gateway
            .last_text(5)
            .await
            .unwrap()
            .contains("Registration complete")
    );

    let teams = TeamRepository::new(store.as_ref()).list().await.unwrap();
    assert_eq!(teams.len(), 1);
    assert_eq!(teams[0].team_name, "Night Owls");

    let (participant, _) = ParticipantRepository::new(store.as_ref())
        .find(5)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(participant.team_name, "Night Owls");
}

#[tokio::test]
async fn start_shows_the_profile_once_registered() {
    let store = Arc::new(InMemoryRowStore::new());
    let gateway = RecordingGateway::new();
    let engine = test_engine(store.clone(), gateway.clone());
    seed_participant(&store, 5, "Foxes").await;

    command(&engine, 5, "start").await;

    let (profile, keyboard) = gateway.last_keyboard(5).await.unwrap();
    assert!(profile.contains("Team: Foxes"));
    assert_eq!(keyboard.rows[0][0].payload, "u:stages");
}

#[tokio::test]
async fn stage_wizard_creates_a_closed_stage_and_toggle_opens_it() {
    let store = Arc::new(InMemoryRowStore::new());
    let gateway = RecordingGateway::new();
    let engine = test_engine(store.clone(), gateway.clone());

    command(&engine, ADMIN_ID, "admin").await;
    button(&engine, ADMIN_ID, "a:create_stage").await;
    assert!(gateway.last_text(ADMIN_ID).await.unwrap().contains("stage id"));

    // An empty id re-prompts without advancing.
    text(&engine, ADMIN_ID, "   ").await;
    assert!(gateway.last_text(ADMIN_ID).await.unwrap().contains("empty"));

    text(&engine, ADMIN_ID, "st9").await;
    text(&engine, ADMIN_ID, "Spring Cup").await;
    text(&engine, ADMIN_ID, "2026-04-01").await;
    text(&engine, ADMIN_ID, "18:00").await;
    text(&engine, ADMIN_ID, "Forza Karting").await;
    text(&engine, ADMIN_ID, "Main St 1").await;
    text(&engine, ADMIN_ID, "2000").await;
    assert!(
        gateway
            .last_text(ADMIN_ID)
            .await
            .unwrap()
            .contains("Stage created")
    );

    let repo = StageRepository::new(store.as_ref());
    let stage = repo.find("st9").await.unwrap().unwrap();
    assert_eq!(stage.title, "Spring Cup");
    assert_eq!(stage.price, "2000");
    assert!(!stage.is_reg_open());

    button(&engine, ADMIN_ID, "a:toggle_reg:st9").await;
    let stage = repo.find("st9").await.unwrap().unwrap();
    assert!(stage.is_reg_open());
    assert!(
        gateway
            .last_text(ADMIN_ID)
            .await
            .unwrap()
            .contains("Registration opened")
    );
}

#[tokio::test]
async fn broadcast_reaches_every_participant_and_reports_the_count() {
    let store = Arc::new(InMemoryRowStore::new());
    let gateway = RecordingGateway::new();
    let engine = test_engine(store.clone(), gateway.clone());
    seed_participant(&store, 1, "Foxes").await;
    seed_participant(&store, 2, "Owls").await;

    button(&engine, ADMIN_ID, "a:broadcast").await;
    text(&engine, ADMIN_ID, "Race day moved to Sunday").await;

    for id in [1, 2] {
        let received = gateway.last_text(id).await.unwrap();
        assert!(received.contains("Message from the organizers"));
        assert!(received.contains("Race day moved to Sunday"));
    }
    assert!(
        gateway
            .last_text(ADMIN_ID)
            .await
            .unwrap()
            .contains("2 recipients")
    );
}

#[tokio::test]
async fn admin_surface_is_denied_to_non_admins() {
    let store = Arc::new(InMemoryRowStore::new());
    let gateway = RecordingGateway::new();
    let engine = test_engine(store.clone(), gateway.clone());

    command(&engine, 5, "admin").await;
    assert_eq!(gateway.last_text(5).await.unwrap(), "Access denied.");

    button(&engine, 5, "a:broadcast").await;
    assert_eq!(gateway.last_text(5).await.unwrap(), "Access denied.");

    // Denied button presses never open a flow; the next text falls
    // through to plain navigation.
    text(&engine, 5, "hello").await;
    assert_eq!(
        gateway.last_text(5).await.unwrap(),
        "You are not registered yet. Press /start"
    );
}

/// Gateway double whose registration confirmation send fails once;
/// everything else succeeds silently.
#[derive(Default)]
struct FlakyConfirmationGateway {
    confirmation_failed: Mutex<bool>,
}

#[async_trait]
impl ChatGateway for FlakyConfirmationGateway {
    async fn send_text(&self, _user_id: i64, text: &str) -> Result<(), TransportError> {
        if text.contains("Registration complete") {
            let mut failed = self.confirmation_failed.lock().await;
            if !*failed {
                *failed = true;
                return Err(TransportError("connection reset".into()));
            }
        }
        Ok(())
    }

    async fn send_keyboard(
        &self,
        _user_id: i64,
        _text: &str,
        _keyboard: Keyboard,
    ) -> Result<(), TransportError> {
        Ok(())
    }
}

#[tokio::test]
async fn lost_confirmation_never_duplicates_the_participant_row() {
    let store = Arc::new(InMemoryRowStore::new());
    let engine = Engine::new(
        store.clone(),
        Arc::new(FlakyConfirmationGateway::default()),
        create_provider("stub", "s", "").unwrap(),
        EngineOptions {
            admin_ids: HashSet::new(),
            webhook_secret: "s".to_string(),
            base_public_url: String::new(),
            http_addr: ":8080".to_string(),
        },
    );

    command(&engine, 5, "start").await;
    text(&engine, 5, "Alice").await;
    text(&engine, 5, "Smith").await;
    text(&engine, 5, "ace").await;

    // The confirmation send fails, but the row is already written and
    // the flow closed; a second press of the stale team button must
    // not write another row.
    button(&engine, 5, "u:reg_team:Foxes").await;
    button(&engine, 5, "u:reg_team:Foxes").await;

    let rows = store.read_all(Table::Participants).await.unwrap();
    assert_eq!(rows.len(), 2, "header plus one participant row");
    let (participant, _) = ParticipantRepository::new(store.as_ref())
        .find(5)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(participant.team_name, "Foxes");
}

#[tokio::test]
async fn failed_step_keeps_the_flow_so_the_user_can_retry() {
    let store = Arc::new(InMemoryRowStore::new());
    let gateway = RecordingGateway::new();
    let engine = test_engine(store.clone(), gateway.clone());

    // Duplicate stage wizard answers on the id step: blank input is the
    // only rejection path and it must leave the wizard on the same step.
    button(&engine, ADMIN_ID, "a:create_stage").await;
    text(&engine, ADMIN_ID, "").await;
    text(&engine, ADMIN_ID, "st1").await;
    assert_eq!(gateway.last_text(ADMIN_ID).await.unwrap(), "Stage title:");
}
