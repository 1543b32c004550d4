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
                    .table(Reaction::Table)
                    .col(
                        ColumnDef::new(Reaction::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(string(Reaction::PostId))
                    .col(string(Reaction::UserId))
                    .col(string(Reaction::EmojiName))
                    .col(big_integer(Reaction::CreateAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-reaction-post_id")
                            .from(Reaction::Table, Reaction::PostId)
                            .to(Post::Table, Post::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // One reaction per (post, user, emoji)
        manager
            .create_index(
                Index::create()
                    .name("idx_reaction_post_user_emoji_unique")
                    .table(Reaction::Table)
                    .col(Reaction::PostId)
                    .col(Reaction::UserId)
                    .col(Reaction::EmojiName)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reaction_post_id")
                    .table(Reaction::Table)
                    .col(Reaction::PostId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reaction::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Reaction {
    #[sea_orm(iden = "Reaction")]
    Table,
    Id,
    PostId,
    UserId,
    EmojiName,
    CreateAt,
}
