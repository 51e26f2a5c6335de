use crate::error::Result;
use crate::models::StageResult;
use crate::repository::cell;
use crate::rowstore::{RowStore, Table};

/// Repository for Result rows. The table is populated externally by
/// the organizers; this side only reads it.
pub struct ResultRepository<'a> {
    store: &'a dyn RowStore,
}

impl<'a> ResultRepository<'a> {
    pub fn new(store: &'a dyn RowStore) -> Self {
        Self { store }
    }

    pub async fn find(&self, stage_id: &str, user_id: i64) -> Result<Option<StageResult>> {
        let rows = self.store.read_all(Table::Results).await?;
        let uid = user_id.to_string();
        for row in rows.iter().skip(1) {
            if cell(row, 0) == stage_id && cell(row, 1) == uid {
                return Ok(Some(StageResult {
                    stage_id: stage_id.to_string(),
                    user_id,
                    best_time: cell(row, 2).to_string(),
                    position: cell(row, 3).to_string(),
                    points: cell(row, 4).to_string(),
                }));
            }
        }
        Ok(None)
    }

    /// Season total for one participant. Unparsable points cells count
    /// as zero.
    pub async fn sum_points(&self, user_id: i64) -> Result<i64> {
        let rows = self.store.read_all(Table::Results).await?;
        let uid = user_id.to_string();
        Ok(rows
            .iter()
            .skip(1)
            .filter(|row| cell(row, 1) == uid)
            .map(|row| cell(row, 4).trim().parse::<i64>().unwrap_or(0))
            .sum())
    }
}
