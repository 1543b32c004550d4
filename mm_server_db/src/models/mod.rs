use std::{str::FromStr, time::Duration};

use sea_orm::{DatabaseConnection, DbErr, SqlxSqliteConnector};
use sea_orm_migration::MigratorTrait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};

use crate::config::DatabaseConfig;
use crate::error::DatabaseError;

pub mod migrator;

/// Opens the SQLite file named by `config`, creating it if needed.
///
/// Foreign keys are switched on for every pooled connection; child tables
/// rely on them to cascade deletes from `Post`.
pub async fn open_or_create_db(config: &DatabaseConfig) -> Result<DatabaseConnection, DatabaseError> {
    let options = SqliteConnectOptions::new()
        .filename(config.database_path())
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections())
        .connect_with(options)
        .await?;

    log::info!("opened server database at {}", config.database_path().display());
    Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
}

/// Private in-memory database. A single connection that is never recycled,
/// otherwise the data would vanish with it.
pub async fn open_in_memory() -> Result<DatabaseConnection, DatabaseError> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None::<Duration>)
        .max_lifetime(None::<Duration>)
        .connect_with(options)
        .await?;

    Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
}

pub async fn migrate_up(db: &DatabaseConnection) -> Result<(), DbErr> {
    migrator::Migrator::up(db, None).await
}
