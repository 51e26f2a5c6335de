use crate::error::{Result, StorageError};
use crate::models::Stage;
use crate::models::stage::{flag_token, parse_flag};
use crate::repository::cell;
use crate::rowstore::{RowStore, Table};

/// Column index of `reg_open` in the Stages table.
const COL_REG_OPEN: usize = 6;

/// Repository for Stage rows. Only the registration-open flag is
/// mutable after creation.
pub struct StageRepository<'a> {
    store: &'a dyn RowStore,
}

impl<'a> StageRepository<'a> {
    pub fn new(store: &'a dyn RowStore) -> Self {
        Self { store }
    }

    /// List stages, optionally filtered down to those currently open
    /// for registration. Rows with a blank id or title are skipped.
    pub async fn list(&self, include_closed: bool) -> Result<Vec<Stage>> {
        let rows = self.store.read_all(Table::Stages).await?;
        Ok(rows
            .iter()
            .skip(1)
            .map(|row| Stage {
                stage_id: cell(row, 0).to_string(),
                title: cell(row, 1).to_string(),
                date: cell(row, 2).to_string(),
                time: cell(row, 3).to_string(),
                place: cell(row, 4).to_string(),
                address: cell(row, 5).to_string(),
                reg_open: cell(row, COL_REG_OPEN).to_string(),
                price: cell(row, 7).to_string(),
            })
            .filter(|s| !s.stage_id.trim().is_empty() && !s.title.trim().is_empty())
            .filter(|s| include_closed || s.is_reg_open())
            .collect())
    }

    pub async fn find(&self, stage_id: &str) -> Result<Option<Stage>> {
        let stages = self.list(true).await?;
        Ok(stages.into_iter().find(|s| s.stage_id == stage_id))
    }

    pub async fn create(&self, s: &Stage) -> Result<()> {
        self.store
            .append_row(
                Table::Stages,
                vec![
                    s.stage_id.clone(),
                    s.title.clone(),
                    s.date.clone(),
                    s.time.clone(),
                    s.place.clone(),
                    s.address.clone(),
                    s.reg_open.clone(),
                    s.price.clone(),
                ],
            )
            .await
    }

    pub async fn set_reg_open(&self, stage_id: &str, open: bool) -> Result<()> {
        let rows = self.store.read_all(Table::Stages).await?;
        for (i, row) in rows.iter().enumerate().skip(1) {
            if cell(row, 0) == stage_id {
                return self
                    .store
                    .update_cell(Table::Stages, i + 1, COL_REG_OPEN, flag_token(open).into())
                    .await;
            }
        }
        Err(StorageError::NotFound)
    }

    /// Current normalized flag value, for toggling.
    pub async fn is_reg_open(&self, stage_id: &str) -> Result<bool> {
        let stage = self.find(stage_id).await?.ok_or(StorageError::NotFound)?;
        Ok(parse_flag(&stage.reg_open))
    }
}
