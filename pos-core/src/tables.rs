//! Table Lifecycle Manager
//!
//! Keeps the ordered table list and drives status changes from cart
//! activity. `Reserved` is only entered or left through [`TableBoard::set_status`];
//! cart operations never touch a reserved table.

use shared::models::{Table, TableCreate, TableStatus};
use shared::{PosError, PosResult};

/// A status change that actually happened
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusTransition {
    pub table_id: String,
    pub from: TableStatus,
    pub to: TableStatus,
}

/// Number of tables per status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub free: usize,
    pub occupied: usize,
    pub reserved: usize,
}

#[derive(Debug, Clone, Default)]
pub struct TableBoard {
    tables: Vec<Table>,
}

impl TableBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tables(tables: Vec<Table>) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn get(&self, table_id: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.id == table_id)
    }

    pub fn contains(&self, table_id: &str) -> bool {
        self.get(table_id).is_some()
    }

    /// Build the row for a new table without inserting it
    ///
    /// The name is trimmed and must not be empty. The id is `T<n>` where `n`
    /// is one past the current table count.
    pub fn prepare(&self, input: &TableCreate, default_capacity: u32) -> PosResult<Table> {
        let name = input.name.trim();
        if name.is_empty() {
            return Err(PosError::InvalidTableName);
        }

        Ok(Table {
            id: self.next_table_id(),
            name: name.to_string(),
            status: TableStatus::Free,
            capacity: input.capacity.unwrap_or(default_capacity),
            position: input.position,
        })
    }

    /// Append a table row (usually one returned by [`prepare`](Self::prepare))
    pub fn insert(&mut self, table: Table) {
        self.tables.push(table);
    }

    /// A product was added to the table's cart
    pub fn on_cart_populated(&mut self, table_id: &str) -> PosResult<Option<StatusTransition>> {
        self.transition_from(table_id, TableStatus::Free, TableStatus::Occupied)
    }

    /// The table's cart was cleared or checked out
    pub fn on_cart_cleared(&mut self, table_id: &str) -> PosResult<Option<StatusTransition>> {
        self.transition_from(table_id, TableStatus::Occupied, TableStatus::Free)
    }

    /// Manual status toggle; returns `None` if the status is unchanged
    pub fn set_status(
        &mut self,
        table_id: &str,
        status: TableStatus,
    ) -> PosResult<Option<StatusTransition>> {
        let table = self.get_mut(table_id)?;
        if table.status == status {
            return Ok(None);
        }
        let from = table.status;
        table.status = status;
        Ok(Some(StatusTransition {
            table_id: table_id.to_string(),
            from,
            to: status,
        }))
    }

    pub fn status_counts(&self) -> StatusCounts {
        self.tables
            .iter()
            .fold(StatusCounts::default(), |mut counts, table| {
                match table.status {
                    TableStatus::Free => counts.free += 1,
                    TableStatus::Occupied => counts.occupied += 1,
                    TableStatus::Reserved => counts.reserved += 1,
                }
                counts
            })
    }

    fn transition_from(
        &mut self,
        table_id: &str,
        from: TableStatus,
        to: TableStatus,
    ) -> PosResult<Option<StatusTransition>> {
        let table = self.get_mut(table_id)?;
        if table.status != from {
            return Ok(None);
        }
        table.status = to;
        Ok(Some(StatusTransition {
            table_id: table_id.to_string(),
            from,
            to,
        }))
    }

    fn get_mut(&mut self, table_id: &str) -> PosResult<&mut Table> {
        self.tables
            .iter_mut()
            .find(|t| t.id == table_id)
            .ok_or_else(|| PosError::TableNotFound(table_id.to_string()))
    }

    fn next_table_id(&self) -> String {
        format!("T{}", self.tables.len() + 1)
    }
}
