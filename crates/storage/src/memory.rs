use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{Result, StorageError};
use crate::rowstore::{RowStore, Table};

/// A thread-safe in-memory row store.
///
/// Backs the test suite and local/demo deployments where no spreadsheet
/// document is wired up. Tables are pre-seeded with their header rows so
/// reads and cell updates address rows exactly like the real backend.
#[derive(Clone)]
pub struct InMemoryRowStore {
    tables: Arc<RwLock<HashMap<Table, Vec<Vec<String>>>>>,
}

impl InMemoryRowStore {
    pub fn new() -> Self {
        let mut tables = HashMap::new();
        for table in Table::ALL {
            tables.insert(table, vec![header_row(table)]);
        }
        Self {
            tables: Arc::new(RwLock::new(tables)),
        }
    }
}

impl Default for InMemoryRowStore {
    fn default() -> Self {
        Self::new()
    }
}

fn header_row(table: Table) -> Vec<String> {
    let columns: &[&str] = match table {
        Table::Participants => &[
            "user_id",
            "first_name",
            "last_name",
            "nick",
            "team_name",
            "created_at",
        ],
        Table::Teams => &["team_id", "team_name", "created_at"],
        Table::Stages => &[
            "stage_id", "title", "date", "time", "place", "address", "reg_open", "price",
        ],
        Table::Registrations => &[
            "stage_id",
            "user_id",
            "team_name",
            "role",
            "pay_status",
            "created_at",
        ],
        Table::Results => &["stage_id", "user_id", "best_time", "position", "points"],
        Table::Photos => &["stage_id", "url"],
    };
    columns.iter().map(|c| c.to_string()).collect()
}

#[async_trait]
impl RowStore for InMemoryRowStore {
    async fn read_all(&self, table: Table) -> Result<Vec<Vec<String>>> {
        let tables = self.tables.read().await;
        Ok(tables.get(&table).cloned().unwrap_or_default())
    }

    async fn append_row(&self, table: Table, row: Vec<String>) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables.entry(table).or_default().push(row);
        Ok(())
    }

    async fn update_cell(
        &self,
        table: Table,
        row_number: usize,
        column: usize,
        value: String,
    ) -> Result<()> {
        let mut tables = self.tables.write().await;
        let rows = tables.entry(table).or_default();
        if row_number == 0 || row_number > rows.len() {
            return Err(StorageError::Backend(format!(
                "row {row_number} out of range for {}",
                table.name()
            )));
        }
        let row = &mut rows[row_number - 1];
        if row.len() <= column {
            row.resize(column + 1, String::new());
        }
        row[column] = value;
        Ok(())
    }
}
