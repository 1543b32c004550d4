pub mod config;
pub mod entity;
pub mod error;
pub mod ids;
pub mod models;
pub mod schema;
pub mod service;

#[cfg(test)]
pub(crate) mod test_utils;

use std::sync::Arc;

use sea_orm::DatabaseConnection;
use tokio::sync::OnceCell;

use crate::error::DatabaseError;
use crate::schema::SchemaRegistry;
use crate::service::posts::PostsService;

static SERVER_DATABASE: OnceCell<Arc<ServerDatabase>> = OnceCell::const_new();

/// Process-wide database handle, opened and migrated on first use.
pub async fn database() -> Result<Arc<ServerDatabase>, DatabaseError> {
    SERVER_DATABASE
        .get_or_try_init(|| async {
            let config = config::get_or_init().await?;
            ServerDatabase::open(config).await.map(Arc::new)
        })
        .await
        .cloned()
}

/// Main handle for the local server database.
pub struct ServerDatabase {
    pub config: config::DatabaseConfig,

    /// Schemas checked against the database when it was opened.
    pub registry: SchemaRegistry,

    db: DatabaseConnection,

    pub posts: PostsService,
}

impl ServerDatabase {
    pub async fn open(config: config::DatabaseConfig) -> Result<Self, DatabaseError> {
        log::debug!("{config:?}");

        let db = models::open_or_create_db(&config).await?;
        models::migrate_up(&db).await?;

        let registry = SchemaRegistry::server()?;
        registry.verify(&db).await?;

        let posts = PostsService::new(db.clone());

        Ok(Self {
            config,
            registry,
            db,
            posts,
        })
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    pub async fn shutdown(self) -> Result<(), DatabaseError> {
        self.db.close().await?;
        Ok(())
    }
}

pub mod prelude {
    pub use super::config;
    pub use super::entity;
    pub use super::error;
    pub use super::ids;
    pub use super::models;
    pub use super::schema;
    pub use super::service;

    pub use super::{database, ServerDatabase};
}
