use async_trait::async_trait;

use crate::error::Result;

/// Logical tables of the row store. Each maps to one worksheet in the
/// backing spreadsheet document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Participants,
    Teams,
    Stages,
    Registrations,
    Results,
    Photos,
}

impl Table {
    pub const ALL: [Table; 6] = [
        Table::Participants,
        Table::Teams,
        Table::Stages,
        Table::Registrations,
        Table::Results,
        Table::Photos,
    ];

    /// Worksheet name in the backing document.
    pub fn name(self) -> &'static str {
        match self {
            Table::Participants => "Participants",
            Table::Teams => "Teams",
            Table::Stages => "Stages",
            Table::Registrations => "Stage_Registrations",
            Table::Results => "Results",
            Table::Photos => "Photos",
        }
    }
}

/// Narrow interface over the row-oriented backing store.
///
/// The store offers no transactions and no indexes: every query is a
/// full-table scan over `read_all`, and writes are either a row append
/// or a single-cell update. Row numbers are 1-based and include the
/// header row, matching spreadsheet addressing.
#[async_trait]
pub trait RowStore: Send + Sync {
    /// All rows of a table, header row included at index 0.
    async fn read_all(&self, table: Table) -> Result<Vec<Vec<String>>>;

    async fn append_row(&self, table: Table, row: Vec<String>) -> Result<()>;

    /// Overwrite one cell. `row_number` is 1-based (header row is 1),
    /// `column` is 0-based.
    async fn update_cell(
        &self,
        table: Table,
        row_number: usize,
        column: usize,
        value: String,
    ) -> Result<()>;
}
