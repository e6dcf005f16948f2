use sqlx::SqlitePool;

use crate::error::TreeResult;
use crate::tree::date::parse_timestamp;
use crate::tree::mutation::{apply_import, delete_subtree, DeleteOutcome, ImportOutcome};
use crate::tree::query;
use crate::tree::repository::SqliteNodeStore;
use crate::tree::validation::{validate_batch, validate_batch_date};
use crate::types::{ImportRequest, ItemSummary, NodeView};

/// Entry point for every tree operation.
///
/// Each write runs in its own transaction that is committed only after the
/// whole batch or subtree succeeded; an early return drops the transaction
/// and rolls it back. Reads run inside a transaction as well so a folder and
/// its children come from one snapshot.
#[derive(Clone)]
pub struct TreeStore {
    pool: SqlitePool,
}

impl TreeStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn import(&self, request: &ImportRequest) -> TreeResult<ImportOutcome> {
        validate_batch_date(&request.update_date)?;

        let mut tx = self.pool.begin().await?;
        let mut store = SqliteNodeStore::new(&mut *tx);
        validate_batch(&request.items, &mut store).await?;
        let outcome = apply_import(&mut store, &request.items, &request.update_date).await?;
        tx.commit().await?;
        Ok(outcome)
    }

    pub async fn delete(&self, id: &str, date: &str) -> TreeResult<DeleteOutcome> {
        parse_timestamp(date)?;

        let mut tx = self.pool.begin().await?;
        let outcome = delete_subtree(&mut SqliteNodeStore::new(&mut *tx), id, date).await?;
        tx.commit().await?;
        Ok(outcome)
    }

    pub async fn get_node(&self, id: &str) -> TreeResult<NodeView> {
        let mut tx = self.pool.begin().await?;
        let view = query::get_node(&mut SqliteNodeStore::new(&mut *tx), id).await?;
        Ok(view)
    }

    pub async fn updates(&self, date: &str) -> TreeResult<Vec<ItemSummary>> {
        let mut tx = self.pool.begin().await?;
        let items = query::get_updates_in_window(&mut SqliteNodeStore::new(&mut *tx), date).await?;
        Ok(items)
    }

    pub async fn list_path_children(&self, path: &str) -> TreeResult<Vec<ItemSummary>> {
        let mut tx = self.pool.begin().await?;
        let items = query::list_path_children(&mut SqliteNodeStore::new(&mut *tx), path).await?;
        Ok(items)
    }
}
