//! CSV export of a stage's registrations joined with participant
//! profiles. Token gating happens at the HTTP layer; this builder only
//! assembles the report.

use storage::RowStore;
use storage::repository::{ParticipantRepository, RegistrationRepository};

use crate::error::BotError;

const HEADER: [&str; 6] = ["team", "first_name", "last_name", "nick", "role", "pay_status"];

/// One line per registration with a resolvable participant. A
/// registration whose participant row is gone is a tolerated
/// referential-integrity violation: skipped, not reported.
pub async fn build_stage_csv(store: &dyn RowStore, stage_id: &str) -> Result<String, BotError> {
    let registrations = RegistrationRepository::new(store)
        .list_for_stage(stage_id)
        .await?;
    let participants = ParticipantRepository::new(store);

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(HEADER)
        .map_err(|e| storage::StorageError::Backend(e.to_string()))?;

    for reg in registrations {
        let Some((participant, _)) = participants.find(reg.user_id).await? else {
            continue;
        };
        writer
            .write_record([
                reg.team_name.as_str(),
                participant.first_name.as_str(),
                participant.last_name.as_str(),
                participant.nick.as_str(),
                reg.role.as_str(),
                reg.pay_status.as_str(),
            ])
            .map_err(|e| storage::StorageError::Backend(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| storage::StorageError::Backend(e.to_string()))?;
    String::from_utf8(bytes)
        .map_err(|e| storage::StorageError::Backend(e.to_string()).into())
}
