use sqlx::SqlitePool;

pub async fn init_db(pool: &SqlitePool) -> anyhow::Result<()> {
    // Pragmas for better durability/performance (best-effort)
    if let Err(e) = sqlx::query("PRAGMA journal_mode=WAL;").execute(pool).await {
        tracing::warn!("Failed to set WAL journal mode: {}", e);
    }
    if let Err(e) = sqlx::query("PRAGMA synchronous=NORMAL;").execute(pool).await {
        tracing::warn!("Failed to set synchronous mode: {}", e);
    }
    if let Err(e) = sqlx::query("PRAGMA busy_timeout=10000;").execute(pool).await {
        tracing::warn!("Failed to set busy_timeout: {}", e);
    }

    // items table: one row per file or folder. Referential integrity between
    // parent_id and id is checked before writes, not by the schema.
    sqlx::query(
        r#"CREATE TABLE IF NOT EXISTS items (
            id TEXT PRIMARY KEY,
            parent_id TEXT NULL,
            url TEXT NULL,
            size INTEGER NULL,
            type TEXT NOT NULL,
            update_date TEXT NOT NULL
        )"#,
    )
    .execute(pool)
    .await?;

    if let Err(e) = sqlx::query("CREATE INDEX IF NOT EXISTS idx_items_parent ON items(parent_id)")
        .execute(pool)
        .await
    {
        match &e {
            sqlx::Error::Database(db_err) if db_err.message().to_lowercase().contains("already exists") => {
                tracing::debug!("Index idx_items_parent already exists, skipping");
            }
            _ => tracing::warn!("Failed to create index idx_items_parent: {}", e),
        }
    }

    Ok(())
}
