//! Admin stage-creation wizard: seven free-text steps, one field each.

use storage::models::Stage;
use storage::models::stage::REG_OPEN_FALSE;
use storage::repository::StageRepository;

use crate::engine::Engine;
use crate::error::BotError;
use crate::session::{Flow, StageDraft, StageStep};
use crate::texts;

pub(crate) async fn on_text(
    engine: &Engine,
    user_id: i64,
    text: &str,
    step: StageStep,
    mut draft: StageDraft,
) -> Result<(), BotError> {
    let (next_step, prompt) = match step {
        StageStep::Id => {
            let id = text.trim();
            if id.is_empty() {
                // Re-prompt without advancing.
                engine
                    .sessions
                    .put(user_id, Flow::CreateStage { step, draft })
                    .await;
                engine
                    .gateway
                    .send_text(user_id, texts::STAGE_ID_EMPTY)
                    .await?;
                return Ok(());
            }
            draft.stage_id = id.to_string();
            (StageStep::Title, texts::ASK_STAGE_TITLE)
        }
        StageStep::Title => {
            draft.title = text.to_string();
            (StageStep::Date, texts::ASK_STAGE_DATE)
        }
        StageStep::Date => {
            draft.date = text.to_string();
            (StageStep::Time, texts::ASK_STAGE_TIME)
        }
        StageStep::Time => {
            draft.time = text.to_string();
            (StageStep::Place, texts::ASK_STAGE_PLACE)
        }
        StageStep::Place => {
            draft.place = text.to_string();
            (StageStep::Address, texts::ASK_STAGE_ADDRESS)
        }
        StageStep::Address => {
            draft.address = text.to_string();
            (StageStep::Price, texts::ASK_STAGE_PRICE)
        }
        StageStep::Price => {
            // Final field. Registration starts closed; the admin opens
            // it later from the stage list.
            let stage = Stage {
                stage_id: draft.stage_id,
                title: draft.title,
                date: draft.date,
                time: draft.time,
                place: draft.place,
                address: draft.address,
                reg_open: REG_OPEN_FALSE.to_string(),
                price: text.to_string(),
            };
            StageRepository::new(engine.store()).create(&stage).await?;
            engine.sessions.clear(user_id).await;
            engine
                .gateway
                .send_text(user_id, texts::STAGE_CREATED)
                .await?;
            return Ok(());
        }
    };

    engine
        .sessions
        .put(
            user_id,
            Flow::CreateStage {
                step: next_step,
                draft,
            },
        )
        .await;
    engine.gateway.send_text(user_id, prompt).await?;
    Ok(())
}
