//! Participant registration: first name, last name, nick collected as
//! free text, then a team selection keyboard.

use storage::models::Participant;
use storage::repository::ParticipantRepository;

use crate::engine::Engine;
use crate::error::BotError;
use crate::flows::team::CREATE_NEW;
use crate::session::{AfterTeamCreate, Flow, ParticipantDraft, RegStep};
use crate::texts;

pub(crate) async fn on_text(
    engine: &Engine,
    user_id: i64,
    text: &str,
    step: RegStep,
    mut draft: ParticipantDraft,
) -> Result<(), BotError> {
    match step {
        RegStep::FirstName => {
            draft.first_name = text.to_string();
            engine
                .sessions
                .put(
                    user_id,
                    Flow::Registration {
                        step: RegStep::LastName,
                        draft,
                    },
                )
                .await;
            engine.gateway.send_text(user_id, texts::ASK_LAST_NAME).await?;
        }
        RegStep::LastName => {
            draft.last_name = text.to_string();
            engine
                .sessions
                .put(
                    user_id,
                    Flow::Registration {
                        step: RegStep::Nick,
                        draft,
                    },
                )
                .await;
            engine.gateway.send_text(user_id, texts::ASK_NICK).await?;
        }
        RegStep::Nick => {
            draft.nick = text.to_string();
            engine
                .sessions
                .put(
                    user_id,
                    Flow::Registration {
                        step: RegStep::Team,
                        draft,
                    },
                )
                .await;
            show_team_picker(engine, user_id).await?;
        }
        RegStep::Team => {
            // The final step needs a selection event, not free text.
            engine
                .sessions
                .put(
                    user_id,
                    Flow::Registration {
                        step: RegStep::Team,
                        draft,
                    },
                )
                .await;
            show_team_picker(engine, user_id).await?;
        }
    }
    Ok(())
}

async fn show_team_picker(engine: &Engine, user_id: i64) -> Result<(), BotError> {
    let keyboard = engine.team_keyboard("u:reg_team:").await?;
    engine
        .gateway
        .send_keyboard(user_id, texts::PICK_TEAM_FOR_REGISTRATION, keyboard)
        .await?;
    Ok(())
}

/// A `u:reg_team:` button: either finalize registration with the
/// chosen team, or detour into the team-creation sub-flow with a
/// continuation marker so control returns here afterwards.
pub(crate) async fn on_team_selected(
    engine: &Engine,
    user_id: i64,
    team: &str,
) -> Result<(), BotError> {
    let Some(flow) = engine.sessions.take(user_id).await else {
        engine.gateway.send_text(user_id, texts::PRESS_START).await?;
        return Ok(());
    };
    let original = flow.clone();
    let result = match flow {
        Flow::Registration { draft, .. } => {
            if team == CREATE_NEW {
                engine
                    .sessions
                    .put(
                        user_id,
                        Flow::TeamCreate {
                            then: AfterTeamCreate::FinishRegistration(draft),
                        },
                    )
                    .await;
                engine.gateway.send_text(user_id, texts::ASK_TEAM_NAME).await?;
                Ok(())
            } else {
                finalize(engine, user_id, team, draft).await
            }
        }
        other => {
            engine.sessions.put(user_id, other).await;
            engine.gateway.send_text(user_id, texts::PRESS_START).await?;
            return Ok(());
        }
    };
    if result.is_err() {
        engine.sessions.put(user_id, original).await;
    }
    result
}

/// Persist the participant and close the flow. Once the row is
/// written the flow is over: a failed confirmation send is logged, not
/// surfaced, so a retry can never append a second row for the same
/// identity.
pub(crate) async fn finalize(
    engine: &Engine,
    user_id: i64,
    team_name: &str,
    draft: ParticipantDraft,
) -> Result<(), BotError> {
    let repo = ParticipantRepository::new(engine.store());
    repo.create(&Participant {
        user_id,
        first_name: draft.first_name,
        last_name: draft.last_name,
        nick: draft.nick,
        team_name: team_name.to_string(),
        created_at: storage::now_rfc3339(),
    })
    .await?;
    engine.sessions.clear(user_id).await;
    if let Err(err) = engine
        .gateway
        .send_text(user_id, texts::REGISTRATION_DONE)
        .await
    {
        tracing::error!(user_id, error = %err, "registration confirmation failed");
    }
    Ok(())
}
