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
                    .table(Draft::Table)
                    .col(ColumnDef::new(Draft::Id).string().not_null().primary_key())
                    .col(string(Draft::ChannelId))
                    .col(string_null(Draft::RootId)) // Set for thread drafts only
                    .col(text(Draft::Message))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-draft-root_id")
                            .from(Draft::Table, Draft::RootId)
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
                    .name("idx_draft_channel_id")
                    .table(Draft::Table)
                    .col(Draft::ChannelId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_draft_root_id")
                    .table(Draft::Table)
                    .col(Draft::RootId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Draft::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Draft {
    #[sea_orm(iden = "Draft")]
    Table,
    Id,
    ChannelId,
    RootId,
    Message,
}
