use std::time::Duration;

use libsql::{Builder, Connection, Database, OpenFlags, Transaction};
use log::error;

use crate::{config::DatabaseConfig, types::StringError};

pub async fn get_database(config: &DatabaseConfig) -> anyhow::Result<Database> {
    match config {
        DatabaseConfig::Remote { url, auth_key } => {
            Ok(Builder::new_remote(url.clone(), auth_key.clone())
                .build()
                .await?)
        }
        DatabaseConfig::Local { path } => open_local(path).await,
    }
}

pub async fn open_local(path: &str) -> anyhow::Result<Database> {
    Ok(Builder::new_local(path)
        .flags(OpenFlags::default())
        .build()
        .await?)
}

/// How long a writer waits on another connection's lock before `SQLITE_BUSY`.
pub const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Every request connection goes through here. Remote connections ignore the
/// busy timeout.
pub fn connect(db: &Database) -> libsql::Result<Connection> {
    let conn = db.connect()?;
    conn.busy_timeout(BUSY_TIMEOUT)?;
    Ok(conn)
}

pub async fn rollback_tx(tx: Transaction, context: &str) {
    if let Err(e) = tx.rollback().await {
        error!("[{context}] Failed to rollback {}", e);
    };
}

pub const URLS_T: &str = "urls";
pub const URL_CHECKS_T: &str = "url_checks";

pub const VERSION_T: &str = "db_version";

async fn v1(conn: Connection) -> anyhow::Result<()> {
    #[rustfmt::skip]
    let stmnts = [
        format!(
            "CREATE TABLE IF NOT EXISTS `{URLS_T}`(
                `id` INTEGER NOT NULL PRIMARY KEY,
                `name` TEXT NOT NULL UNIQUE,
                `created_at` TEXT NOT NULL
            )"
        ),
        format!(
            "CREATE TABLE IF NOT EXISTS `{URL_CHECKS_T}`(
                `id` INTEGER NOT NULL PRIMARY KEY,
                `url_id` INTEGER NOT NULL REFERENCES `{URLS_T}` (`id`),
                `created_at` TEXT NOT NULL
            )"
        ),
        format!(
            "CREATE TABLE IF NOT EXISTS `{VERSION_T}`(
                `id` INTEGER NOT NULL PRIMARY KEY,
                `version_number` INTEGER NOT NULL
            )"
        ),
    ];

    let mut _res = conn
        .execute_transactional_batch(&stmnts.join(";\n"))
        .await?;

    Ok(())
}

async fn get_version_number(conn: Connection) -> anyhow::Result<u32> {
    let mut res = conn
        .query(&format!("SELECT * FROM {VERSION_T} WHERE id = ?1"), [1])
        .await?;

    debug_assert_eq!(
        "version_number",
        res.column_name(1)
            .ok_or_else(|| StringError("Missing second column in version table".into()))?
    );

    let Some(row) = res.next().await? else {
        return Ok(1);
    };

    Ok(row.get(1)?)
}

async fn v2(conn: Connection) -> anyhow::Result<()> {
    #[rustfmt::skip]
    let stmnts = [
        format!("INSERT INTO {VERSION_T} (version_number) VALUES (2)"),
        format!("CREATE INDEX IF NOT EXISTS idx_url_checks_url_id ON {URL_CHECKS_T} (url_id)"),
        format!("CREATE INDEX IF NOT EXISTS idx_urls_created_at ON {URLS_T} (created_at)"),
    ];

    let mut _res = conn
        .execute_transactional_batch(&stmnts.join(";\n"))
        .await?;

    Ok(())
}

pub async fn migrate_db(conn: Connection) -> anyhow::Result<()> {
    v1(conn.clone()).await?;

    let version_number = get_version_number(conn.clone()).await?;

    if version_number < 2 {
        v2(conn.clone()).await?;
    }

    Ok(())
}
