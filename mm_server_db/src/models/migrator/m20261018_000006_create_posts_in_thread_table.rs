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
                    .table(PostsInThread::Table)
                    .col(
                        ColumnDef::new(PostsInThread::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(string(PostsInThread::PostId))
                    .col(big_integer(PostsInThread::Earliest))
                    .col(big_integer(PostsInThread::Latest))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-posts_in_thread-post_id")
                            .from(PostsInThread::Table, PostsInThread::PostId)
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
                    .name("idx_posts_in_thread_post_id")
                    .table(PostsInThread::Table)
                    .col(PostsInThread::PostId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(PostsInThread::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum PostsInThread {
    #[sea_orm(iden = "PostsInThread")]
    Table,
    Id,
    PostId,
    Earliest,
    Latest,
}
