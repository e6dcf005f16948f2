//! Row-level access to the `items` table.
//!
//! No validation happens here. Whether the calls participate in a transaction
//! is decided by the connection handed to [`SqliteNodeStore::new`].

use async_trait::async_trait;
use sqlx::{sqlite::SqliteRow, Row, SqliteConnection};

use crate::error::TreeResult;
use crate::tree::node::Node;

#[async_trait]
pub trait NodeStore: Send {
    async fn get(&mut self, id: &str) -> TreeResult<Option<Node>>;

    /// Direct children of `parent_id`; `None` lists the roots.
    async fn list_children(&mut self, parent_id: Option<&str>) -> TreeResult<Vec<Node>>;

    async fn list_all(&mut self) -> TreeResult<Vec<Node>>;

    /// Inserts the node or overwrites every field of the existing row.
    async fn upsert(&mut self, node: &Node) -> TreeResult<()>;

    /// Returns `true` if a row was removed.
    async fn delete(&mut self, id: &str) -> TreeResult<bool>;
}

pub struct SqliteNodeStore<'c> {
    conn: &'c mut SqliteConnection,
}

impl<'c> SqliteNodeStore<'c> {
    pub fn new(conn: &'c mut SqliteConnection) -> Self {
        Self { conn }
    }
}

const SELECT_COLUMNS: &str = "SELECT id, parent_id, url, size, type, update_date FROM items";

fn node_from_row(row: &SqliteRow) -> TreeResult<Node> {
    let node_type: String = row.try_get("type")?;
    Ok(Node {
        id: row.try_get("id")?,
        parent_id: row.try_get("parent_id")?,
        url: row.try_get("url")?,
        size: row.try_get("size")?,
        node_type: node_type.parse()?,
        update_date: row.try_get("update_date")?,
    })
}

#[async_trait]
impl NodeStore for SqliteNodeStore<'_> {
    async fn get(&mut self, id: &str) -> TreeResult<Option<Node>> {
        let row = sqlx::query(&format!("{} WHERE id = ?1", SELECT_COLUMNS))
            .bind(id)
            .fetch_optional(&mut *self.conn)
            .await?;
        row.as_ref().map(node_from_row).transpose()
    }

    async fn list_children(&mut self, parent_id: Option<&str>) -> TreeResult<Vec<Node>> {
        let rows = match parent_id {
            Some(pid) => {
                sqlx::query(&format!("{} WHERE parent_id = ?1 ORDER BY id", SELECT_COLUMNS))
                    .bind(pid)
                    .fetch_all(&mut *self.conn)
                    .await?
            }
            None => {
                sqlx::query(&format!("{} WHERE parent_id IS NULL ORDER BY id", SELECT_COLUMNS))
                    .fetch_all(&mut *self.conn)
                    .await?
            }
        };
        rows.iter().map(node_from_row).collect()
    }

    async fn list_all(&mut self) -> TreeResult<Vec<Node>> {
        let rows = sqlx::query(&format!("{} ORDER BY id", SELECT_COLUMNS))
            .fetch_all(&mut *self.conn)
            .await?;
        rows.iter().map(node_from_row).collect()
    }

    async fn upsert(&mut self, node: &Node) -> TreeResult<()> {
        sqlx::query(
            r#"INSERT INTO items (id, parent_id, url, size, type, update_date)
               VALUES (?1, ?2, ?3, ?4, ?5, ?6)
               ON CONFLICT(id) DO UPDATE SET
                   parent_id = excluded.parent_id,
                   url = excluded.url,
                   size = excluded.size,
                   type = excluded.type,
                   update_date = excluded.update_date"#,
        )
        .bind(&node.id)
        .bind(node.parent_id.as_deref())
        .bind(node.url.as_deref())
        .bind(node.size)
        .bind(node.node_type.as_str())
        .bind(&node.update_date)
        .execute(&mut *self.conn)
        .await?;
        Ok(())
    }

    async fn delete(&mut self, id: &str) -> TreeResult<bool> {
        let res = sqlx::query("DELETE FROM items WHERE id = ?1").bind(id).execute(&mut *self.conn).await?;
        Ok(res.rows_affected() > 0)
    }
}
