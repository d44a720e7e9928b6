// Local mirror of monitoring data: filesystem items, their triggers and numeric history.

use sqlx::SqlitePool;

/// Creates the items, triggers and history tables and indexes if not present.
pub async fn init_tables(pool: &SqlitePool) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS items (
            itemid INTEGER PRIMARY KEY AUTOINCREMENT,
            host TEXT NOT NULL,
            key_ TEXT NOT NULL,
            lastvalue REAL,
            UNIQUE (host, key_)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS triggers (
            itemid INTEGER NOT NULL REFERENCES items(itemid) ON DELETE CASCADE,
            priority INTEGER NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_triggers_itemid ON triggers(itemid)")
        .execute(pool)
        .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS history (
            itemid INTEGER NOT NULL REFERENCES items(itemid) ON DELETE CASCADE,
            clock INTEGER NOT NULL,
            value REAL NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_history_itemid_clock ON history(itemid, clock)")
        .execute(pool)
        .await?;

    Ok(())
}
