//! Memory store client.
//!
//! `MemoryStore` is the only code that reaches the `memories` table. The
//! table itself sits behind [`MemoryTable`] so the HTTP layer can be driven
//! against an in-process table in tests. There is deliberately no update or
//! delete path.

mod postgrest;

#[cfg(test)]
pub mod fake;

pub use postgrest::PostgrestTable;

use async_trait::async_trait;
use second_brain_types::{DraftError, LIST_LIMIT, Memory, MemoryDraft, NewMemory};
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("invalid input: {0}")]
    InvalidInput(DraftError),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Raw access to the backing table.
#[async_trait]
pub trait MemoryTable: Send + Sync {
    /// Newest rows first, at most `limit` of them.
    async fn select_recent(&self, limit: usize) -> Result<Vec<Memory>, String>;

    /// Inserts one row and returns it as stored, with `id` and `created_at` set.
    async fn insert_row(&self, row: &NewMemory) -> Result<Memory, String>;

    /// Human readable location for logs.
    fn describe(&self) -> String;
}

#[derive(Clone)]
pub struct MemoryStore {
    table: Arc<dyn MemoryTable>,
}

impl MemoryStore {
    pub fn new(table: Arc<dyn MemoryTable>) -> Self {
        Self { table }
    }

    pub fn describe(&self) -> String {
        self.table.describe()
    }

    pub async fn list_recent(&self) -> Result<Vec<Memory>, StoreError> {
        let mut memories = self
            .table
            .select_recent(LIST_LIMIT)
            .await
            .map_err(StoreError::Unavailable)?;
        memories.truncate(LIST_LIMIT);
        Ok(memories)
    }

    pub async fn insert(&self, draft: MemoryDraft) -> Result<Memory, StoreError> {
        let row = draft.normalize().map_err(StoreError::InvalidInput)?;
        self.table
            .insert_row(&row)
            .await
            .map_err(StoreError::Unavailable)
    }
}
