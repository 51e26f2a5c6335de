use crate::error::{Result, StorageError};
use crate::models::{PayStatus, Registration, Role};
use crate::repository::cell;
use crate::rowstore::{RowStore, Table};

/// Column indexes in the Stage_Registrations table.
const COL_ROLE: usize = 3;
const COL_PAY_STATUS: usize = 4;

/// Repository for Registration rows, keyed by (stage_id, user_id).
/// Uniqueness of the pair is the workflow's responsibility; the store
/// itself enforces nothing.
pub struct RegistrationRepository<'a> {
    store: &'a dyn RowStore,
}

impl<'a> RegistrationRepository<'a> {
    pub fn new(store: &'a dyn RowStore) -> Self {
        Self { store }
    }

    pub async fn list_for_stage(&self, stage_id: &str) -> Result<Vec<Registration>> {
        let rows = self.store.read_all(Table::Registrations).await?;
        Ok(rows
            .iter()
            .skip(1)
            .filter(|row| cell(row, 0) == stage_id)
            .map(|row| Registration {
                stage_id: stage_id.to_string(),
                user_id: cell(row, 1).parse().unwrap_or(0),
                team_name: cell(row, 2).to_string(),
                role: Role::parse(cell(row, COL_ROLE)),
                pay_status: PayStatus::parse(cell(row, COL_PAY_STATUS)),
                created_at: cell(row, 5).to_string(),
            })
            .collect())
    }

    pub async fn exists(&self, stage_id: &str, user_id: i64) -> Result<bool> {
        Ok(self.find_row(stage_id, user_id).await?.is_some())
    }

    pub async fn create(&self, r: &Registration) -> Result<()> {
        self.store
            .append_row(
                Table::Registrations,
                vec![
                    r.stage_id.clone(),
                    r.user_id.to_string(),
                    r.team_name.clone(),
                    r.role.as_str().to_string(),
                    r.pay_status.as_str().to_string(),
                    r.created_at.clone(),
                ],
            )
            .await
    }

    pub async fn update_pay_status(
        &self,
        stage_id: &str,
        user_id: i64,
        status: PayStatus,
    ) -> Result<()> {
        let row_number = self
            .find_row(stage_id, user_id)
            .await?
            .ok_or(StorageError::NotFound)?;
        self.store
            .update_cell(
                Table::Registrations,
                row_number,
                COL_PAY_STATUS,
                status.as_str().to_string(),
            )
            .await
    }

    pub async fn update_role(&self, stage_id: &str, user_id: i64, role: Role) -> Result<()> {
        let row_number = self
            .find_row(stage_id, user_id)
            .await?
            .ok_or(StorageError::NotFound)?;
        self.store
            .update_cell(
                Table::Registrations,
                row_number,
                COL_ROLE,
                role.as_str().to_string(),
            )
            .await
    }

    /// Number of `main` registrations for a team on a stage. Team
    /// comparison is trimmed and case-insensitive, matching how team
    /// names drift in a hand-edited sheet.
    pub async fn count_main_for_team(&self, stage_id: &str, team_name: &str) -> Result<usize> {
        let regs = self.list_for_stage(stage_id).await?;
        let wanted = team_name.trim().to_lowercase();
        Ok(regs
            .iter()
            .filter(|r| r.role == Role::Main && r.team_name.trim().to_lowercase() == wanted)
            .count())
    }

    async fn find_row(&self, stage_id: &str, user_id: i64) -> Result<Option<usize>> {
        let rows = self.store.read_all(Table::Registrations).await?;
        let uid = user_id.to_string();
        for (i, row) in rows.iter().enumerate().skip(1) {
            if cell(row, 0) == stage_id && cell(row, 1) == uid {
                return Ok(Some(i + 1));
            }
        }
        Ok(None)
    }
}
