//! Team creation: a single free-text step, entered either as a detour
//! from registration or standalone from the profile menu.

use storage::StorageError;
use storage::repository::{ParticipantRepository, TeamRepository};

use crate::engine::Engine;
use crate::error::BotError;
use crate::flows::registration;
use crate::session::{AfterTeamCreate, Flow};
use crate::texts;

/// Sentinel payload for the "create a new team" keyboard option.
pub(crate) const CREATE_NEW: &str = "__create__";

pub(crate) async fn on_text(
    engine: &Engine,
    user_id: i64,
    text: &str,
    then: AfterTeamCreate,
) -> Result<(), BotError> {
    let name = text.trim();
    if name.is_empty() {
        // Re-prompt without advancing.
        engine.sessions.put(user_id, Flow::TeamCreate { then }).await;
        engine
            .gateway
            .send_text(user_id, texts::TEAM_NAME_EMPTY)
            .await?;
        return Ok(());
    }

    let team = TeamRepository::new(engine.store()).create(name).await?;

    match then {
        AfterTeamCreate::FinishRegistration(draft) => {
            registration::finalize(engine, user_id, &team.team_name, draft).await
        }
        AfterTeamCreate::UpdateProfile => {
            ParticipantRepository::new(engine.store())
                .update_team(user_id, &team.team_name)
                .await
                .map_err(|e| match e {
                    StorageError::NotFound => BotError::ParticipantNotRegistered,
                    other => BotError::Storage(other),
                })?;
            engine.sessions.clear(user_id).await;
            engine
                .gateway
                .send_text(
                    user_id,
                    &format!(
                        "✅ Team created and selected: {}. Press /start",
                        team.team_name
                    ),
                )
                .await?;
            Ok(())
        }
    }
}
