use std::collections::HashMap;

use tokio::sync::Mutex;

/// A user's position within a multi-step conversation. Each flow is a
/// tagged variant with its own step enum and typed partial data, so an
/// illegal step is unrepresentable rather than a runtime surprise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    Registration {
        step: RegStep,
        draft: ParticipantDraft,
    },
    TeamCreate {
        then: AfterTeamCreate,
    },
    CreateStage {
        step: StageStep,
        draft: StageDraft,
    },
    Broadcast,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegStep {
    FirstName,
    LastName,
    Nick,
    Team,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParticipantDraft {
    pub first_name: String,
    pub last_name: String,
    pub nick: String,
}

/// Where control returns after the team-creation sub-flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AfterTeamCreate {
    /// Continuation of registration: finish creating the participant
    /// with the new team.
    FinishRegistration(ParticipantDraft),
    /// Standalone team switch from the profile menu.
    UpdateProfile,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageStep {
    Id,
    Title,
    Date,
    Time,
    Place,
    Address,
    Price,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StageDraft {
    pub stage_id: String,
    pub title: String,
    pub date: String,
    pub time: String,
    pub place: String,
    pub address: String,
}

/// Per-identity conversation state, in-process only; lifecycle is tied
/// to process uptime. Handlers take the flow out, work, and put back
/// the successor, so the chat task and concurrent HTTP tasks never act
/// on the same identity's state at once.
#[derive(Default)]
pub struct SessionStore {
    flows: Mutex<HashMap<i64, Flow>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return the active flow, leaving no state behind.
    pub async fn take(&self, user_id: i64) -> Option<Flow> {
        self.flows.lock().await.remove(&user_id)
    }

    pub async fn put(&self, user_id: i64, flow: Flow) {
        self.flows.lock().await.insert(user_id, flow);
    }

    pub async fn clear(&self, user_id: i64) {
        self.flows.lock().await.remove(&user_id);
    }
}
