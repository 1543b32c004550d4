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
                    .table(File::Table)
                    .col(ColumnDef::new(File::Id).string().not_null().primary_key())
                    .col(string(File::PostId))
                    .col(string(File::Name))
                    .col(string(File::Extension))
                    .col(string(File::MimeType))
                    .col(big_integer(File::Size))
                    .col(integer_null(File::Width))
                    .col(integer_null(File::Height))
                    .col(string_null(File::LocalPath))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-file-post_id")
                            .from(File::Table, File::PostId)
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
                    .name("idx_file_post_id")
                    .table(File::Table)
                    .col(File::PostId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(File::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum File {
    #[sea_orm(iden = "File")]
    Table,
    Id,
    PostId,
    Name,
    Extension,
    MimeType,
    Size,
    Width,
    Height,
    LocalPath,
}
