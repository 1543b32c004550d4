use sea_orm_migration::{prelude::*, schema::*};

use super::m20261018_000003_create_post_table::Post;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(PostMetadata::Table)
                    .col(
                        ColumnDef::new(PostMetadata::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(string(PostMetadata::PostId))
                    .col(string(PostMetadata::Type))
                    .col(json_null(PostMetadata::Data))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-post_metadata-post_id")
                            .from(PostMetadata::Table, PostMetadata::PostId)
                            .to(Post::Table, Post::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_post_metadata_post_id")
                    .table(PostMetadata::Table)
                    .col(PostMetadata::PostId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PostMetadata::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum PostMetadata {
    #[sea_orm(iden = "PostMetadata")]
    Table,
    Id,
    PostId,
    Type,
    Data,
}
