use crate::error::Result;
use crate::models::Photo;
use crate::repository::cell;
use crate::rowstore::{RowStore, Table};

/// Repository for Photo rows, one URL per stage.
pub struct PhotoRepository<'a> {
    store: &'a dyn RowStore,
}

impl<'a> PhotoRepository<'a> {
    pub fn new(store: &'a dyn RowStore) -> Self {
        Self { store }
    }

    pub async fn find(&self, stage_id: &str) -> Result<Option<Photo>> {
        let rows = self.store.read_all(Table::Photos).await?;
        for row in rows.iter().skip(1) {
            if cell(row, 0) == stage_id {
                return Ok(Some(Photo {
                    stage_id: stage_id.to_string(),
                    url: cell(row, 1).to_string(),
                }));
            }
        }
        Ok(None)
    }
}
