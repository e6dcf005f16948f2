//! Integration and unit tests for the SpeicherBaum application.
//!
//! ## Test Modules
//!
//! - **repository_tests**: Row access on the `items` table
//! - **validation_tests**: Batch checks run before an import is written
//! - **mutation_tests**: Imports, cascading deletes and date propagation
//! - **query_tests**: Node lookup, change feed and path listing
//! - **api_tests**: HTTP endpoints end to end
//! - **error_tests**: Error mapping and response bodies
//! - **config_tests**: Configuration defaults and validation
//! - **db_tests**: Schema initialization
//!
//! Individual test modules can be run with:
//! ```bash
//! cargo test mutation_tests
//! ```

pub mod query_tests;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tempfile::TempDir;

use crate::tree::NodeType;
use crate::types::{ImportRequest, NodeInput};

/// Fresh on-disk database with the schema applied.
///
/// The returned directory must outlive the pool.
pub async fn test_pool() -> (SqlitePool, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let options = SqliteConnectOptions::new()
        .filename(dir.path().join("test.db"))
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new().max_connections(1).connect_with(options).await.unwrap();
    crate::db::init_db(&pool).await.unwrap();
    (pool, dir)
}

pub fn folder(id: &str, parent: Option<&str>) -> NodeInput {
    NodeInput {
        id: id.to_string(),
        parent_id: parent.map(str::to_string),
        url: None,
        size: None,
        node_type: NodeType::Folder,
    }
}

pub fn file(id: &str, parent: Option<&str>, size: i64) -> NodeInput {
    NodeInput {
        id: id.to_string(),
        parent_id: parent.map(str::to_string),
        url: Some(format!("/file/{}", id)),
        size: Some(size),
        node_type: NodeType::File,
    }
}

pub fn batch(items: Vec<NodeInput>, date: &str) -> ImportRequest {
    ImportRequest { items, update_date: date.to_string() }
}
