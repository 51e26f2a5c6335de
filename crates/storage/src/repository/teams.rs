use crate::error::{Result, StorageError};
use crate::models::Team;
use crate::models::team::slug;
use crate::now_rfc3339;
use crate::repository::cell;
use crate::rowstore::{RowStore, Table};

/// Repository for Team rows.
///
/// Team names are not guaranteed unique by the store; callers treat the
/// first match by name as canonical.
pub struct TeamRepository<'a> {
    store: &'a dyn RowStore,
}

impl<'a> TeamRepository<'a> {
    pub fn new(store: &'a dyn RowStore) -> Self {
        Self { store }
    }

    /// All teams with a non-blank name.
    pub async fn list(&self) -> Result<Vec<Team>> {
        let rows = self.store.read_all(Table::Teams).await?;
        Ok(rows
            .iter()
            .skip(1)
            .filter(|row| !cell(row, 1).trim().is_empty())
            .map(|row| Team {
                team_id: cell(row, 0).to_string(),
                team_name: cell(row, 1).to_string(),
                created_at: cell(row, 2).to_string(),
            })
            .collect())
    }

    pub async fn create(&self, name: &str) -> Result<Team> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StorageError::InvalidInput("team name is empty".into()));
        }
        let team = Team {
            team_id: slug(name),
            team_name: name.to_string(),
            created_at: now_rfc3339(),
        };
        self.store
            .append_row(
                Table::Teams,
                vec![
                    team.team_id.clone(),
                    team.team_name.clone(),
                    team.created_at.clone(),
                ],
            )
            .await?;
        Ok(team)
    }
}
