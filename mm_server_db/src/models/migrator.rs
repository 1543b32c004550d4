use sea_orm_migration::prelude::*;

mod m20261018_000001_create_channel_table;
mod m20261018_000002_create_user_table;
mod m20261018_000003_create_post_table;
mod m20261018_000004_create_draft_table;
mod m20261018_000005_create_file_table;
mod m20261018_000006_create_posts_in_thread_table;
mod m20261018_000007_create_post_metadata_table;
mod m20261018_000008_create_reaction_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20261018_000001_create_channel_table::Migration),
            Box::new(m20261018_000002_create_user_table::Migration),
            Box::new(m20261018_000003_create_post_table::Migration),
            Box::new(m20261018_000004_create_draft_table::Migration),
            Box::new(m20261018_000005_create_file_table::Migration),
            Box::new(m20261018_000006_create_posts_in_thread_table::Migration),
            Box::new(m20261018_000007_create_post_metadata_table::Migration),
            Box::new(m20261018_000008_create_reaction_table::Migration),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::tables;

    #[tokio::test]
    async fn test_migrations_okay() -> Result<(), DbErr> {
        let db = crate::models::open_in_memory().await.expect("in-memory db");
        let schema_manager = SchemaManager::new(&db);

        Migrator::refresh(&db).await?;

        for table in [
            tables::CHANNEL,
            tables::USER,
            tables::POST,
            tables::DRAFT,
            tables::FILE,
            tables::POSTS_IN_THREAD,
            tables::POST_METADATA,
            tables::REACTION,
        ] {
            assert!(schema_manager.has_table(table).await?, "{table} missing");
        }

        assert!(schema_manager.has_column(tables::POST, "props").await?);
        assert!(schema_manager.has_column(tables::POST, "type").await?);

        Ok(())
    }

    #[tokio::test]
    async fn test_migrations_down_drops_tables() -> Result<(), DbErr> {
        let db = crate::models::open_in_memory().await.expect("in-memory db");
        let schema_manager = SchemaManager::new(&db);

        Migrator::up(&db, None).await?;
        Migrator::down(&db, None).await?;

        assert!(!schema_manager.has_table(tables::POST).await?);
        assert!(!schema_manager.has_table(tables::REACTION).await?);

        Ok(())
    }
}
