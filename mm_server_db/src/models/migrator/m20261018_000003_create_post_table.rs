use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // No foreign keys to Channel/User: posts are stored before their
        // channel or author has been fetched.
        manager
            .create_table(
                Table::create()
                    .table(Post::Table)
                    .col(ColumnDef::new(Post::Id).string().not_null().primary_key())
                    .col(string_null(Post::ChannelId))
                    .col(string_null(Post::UserId))
                    .col(big_integer_null(Post::CreateAt))
                    .col(big_integer_null(Post::EditAt))
                    .col(big_integer_null(Post::DeleteAt))
                    .col(boolean_null(Post::IsPinned))
                    .col(text_null(Post::Message))
                    .col(string_null(Post::OriginalId))
                    .col(string_null(Post::PendingPostId))
                    .col(string_null(Post::PreviousPostId))
                    .col(string_null(Post::RootId))
                    .col(string_null(Post::Type))
                    .col(json_null(Post::Props))
                    .to_owned(),
            )
            .await?;

        // Create index on channel_id
        manager
            .create_index(
                Index::create()
                    .name("idx_post_channel_id")
                    .table(Post::Table)
                    .col(Post::ChannelId)
                    .to_owned(),
            )
            .await?;

        // Create index on user_id
        manager
            .create_index(
                Index::create()
                    .name("idx_post_user_id")
                    .table(Post::Table)
                    .col(Post::UserId)
                    .to_owned(),
            )
            .await?;

        // Create index on root_id for thread lookups
        manager
            .create_index(
                Index::create()
                    .name("idx_post_root_id")
                    .table(Post::Table)
                    .col(Post::RootId)
                    .to_owned(),
            )
            .await?;

        // Create index on pending_post_id to match optimistic posts with server acks
        manager
            .create_index(
                Index::create()
                    .name("idx_post_pending_post_id")
                    .table(Post::Table)
                    .col(Post::PendingPostId)
                    .to_owned(),
            )
            .await?;

        // Create index on create_at
        manager
            .create_index(
                Index::create()
                    .name("idx_post_create_at")
                    .table(Post::Table)
                    .col(Post::CreateAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Post::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Post {
    #[sea_orm(iden = "Post")]
    Table,
    Id,
    ChannelId,
    UserId,
    CreateAt,
    EditAt,
    DeleteAt,
    IsPinned,
    Message,
    OriginalId,
    PendingPostId,
    PreviousPostId,
    RootId,
    Type,
    Props,
}
