use sea_orm::DbErr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no data directory available on this platform")]
    NoDataDir,

    #[error("config io error")]
    Io(#[from] std::io::Error),

    #[error("malformed config file")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("could not load config")]
    Config(#[from] ConfigError),

    #[error("data store disconnected")]
    AquireError(#[from] sqlx::Error),

    #[error("fatal database error")]
    DbError(#[from] DbErr),

    #[error("table {0} is registered twice")]
    DuplicateTable(&'static str),

    #[error("table {0} is missing from the database")]
    MissingTable(&'static str),

    #[error("column {table}.{column} is missing from the database")]
    MissingColumn {
        table: &'static str,
        column: &'static str,
    },
}
