use crate::error::{Result, StorageError};
use crate::models::Participant;
use crate::repository::cell;
use crate::rowstore::{RowStore, Table};

/// Column index of `team_name` in the Participants table.
const COL_TEAM: usize = 4;

/// Repository for Participant rows.
pub struct ParticipantRepository<'a> {
    store: &'a dyn RowStore,
}

impl<'a> ParticipantRepository<'a> {
    pub fn new(store: &'a dyn RowStore) -> Self {
        Self { store }
    }

    /// Find a participant by chat identity. Also returns the 1-based
    /// sheet row number, needed for cell updates.
    pub async fn find(&self, user_id: i64) -> Result<Option<(Participant, usize)>> {
        let rows = self.store.read_all(Table::Participants).await?;
        for (i, row) in rows.iter().enumerate().skip(1) {
            if cell(row, 0) == user_id.to_string() {
                let participant = Participant {
                    user_id,
                    first_name: cell(row, 1).to_string(),
                    last_name: cell(row, 2).to_string(),
                    nick: cell(row, 3).to_string(),
                    team_name: cell(row, COL_TEAM).to_string(),
                    created_at: cell(row, 5).to_string(),
                };
                return Ok(Some((participant, i + 1)));
            }
        }
        Ok(None)
    }

    pub async fn create(&self, p: &Participant) -> Result<()> {
        self.store
            .append_row(
                Table::Participants,
                vec![
                    p.user_id.to_string(),
                    p.first_name.clone(),
                    p.last_name.clone(),
                    p.nick.clone(),
                    p.team_name.clone(),
                    p.created_at.clone(),
                ],
            )
            .await
    }

    pub async fn update_team(&self, user_id: i64, team_name: &str) -> Result<()> {
        let (_, row_number) = self.find(user_id).await?.ok_or(StorageError::NotFound)?;
        self.store
            .update_cell(
                Table::Participants,
                row_number,
                COL_TEAM,
                team_name.to_string(),
            )
            .await
    }

    /// All known chat identities, for broadcast. Unparsable id cells
    /// are skipped.
    pub async fn list_ids(&self) -> Result<Vec<i64>> {
        let rows = self.store.read_all(Table::Participants).await?;
        Ok(rows
            .iter()
            .skip(1)
            .filter_map(|row| cell(row, 0).parse().ok())
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryRowStore;

    fn participant(user_id: i64, team: &str) -> Participant {
        Participant {
            user_id,
            first_name: "Alex".into(),
            last_name: "Swift".into(),
            nick: "ace".into(),
            team_name: team.into(),
            created_at: "2026-03-01T10:00:00Z".into(),
        }
    }

    #[tokio::test]
    async fn create_then_find_returns_row_number() {
        let store = InMemoryRowStore::new();
        let repo = ParticipantRepository::new(&store);
        repo.create(&participant(7, "Foxes")).await.unwrap();

        let (found, row_number) = repo.find(7).await.unwrap().unwrap();
        assert_eq!(found.team_name, "Foxes");
        assert_eq!(row_number, 2);
        assert!(repo.find(8).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn update_team_rewrites_the_team_cell() {
        let store = InMemoryRowStore::new();
        let repo = ParticipantRepository::new(&store);
        repo.create(&participant(7, "Foxes")).await.unwrap();

        repo.update_team(7, "Wolves").await.unwrap();
        let (found, _) = repo.find(7).await.unwrap().unwrap();
        assert_eq!(found.team_name, "Wolves");
    }

    #[tokio::test]
    async fn update_team_for_unknown_participant_is_not_found() {
        let store = InMemoryRowStore::new();
        let repo = ParticipantRepository::new(&store);
        let err = repo.update_team(99, "Wolves").await.unwrap_err();
        assert!(matches!(err, StorageError::NotFound));
    }

    #[tokio::test]
    async fn list_ids_skips_unparsable_rows() {
        let store = InMemoryRowStore::new();
        let repo = ParticipantRepository::new(&store);
        repo.create(&participant(7, "Foxes")).await.unwrap();
        store
            .append_row(
                Table::Participants,
                vec!["not-a-number".into(), "X".into()],
            )
            .await
            .unwrap();
        repo.create(&participant(8, "Wolves")).await.unwrap();

        assert_eq!(repo.list_ids().await.unwrap(), vec![7, 8]);
    }
}
